//! Session tokens.
//!
//! Tokens are compact HS256 JWTs (`header.payload.signature`, base64url
//! without padding) with a fixed two-hour lifetime. The signing key lives
//! in this process, which only makes sense because the whole backend is a
//! simulation; [`TokenSigner`] is the seam where a real deployment would
//! swap in server-held custody without touching any caller.
//!
//! [`TokenService::decode`] reads claims without checking the signature
//! and is only for display; trust decisions go through
//! [`TokenService::verify`].

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{Duration, Utc};
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use tracing::{debug, warn};

use gasdepot_core::{Role, UserProfile};

use crate::repos::profiles::ProfileRepository;
use crate::store::RepositoryError;

/// Fixed token lifetime: two hours.
pub const TOKEN_TTL_SECS: i64 = 2 * 60 * 60;

const JWT_HEADER: &str = r#"{"alg":"HS256","typ":"JWT"}"#;

/// Errors from token handling.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    /// The token is not three base64url segments of valid JSON.
    #[error("token is structurally malformed")]
    Malformed,
    /// The signature does not verify under the current key.
    #[error("token signature does not verify")]
    InvalidSignature,
    /// The token verified but its expiry has passed.
    #[error("token has expired")]
    Expired,
    /// The signing key was rejected by the MAC implementation.
    #[error("signing key rejected")]
    InvalidKey,
}

/// Errors from the login path.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Email/secret pair matches no account.
    #[error("invalid email or secret")]
    InvalidCredentials,
    /// Token issuance failed.
    #[error(transparent)]
    Token(#[from] TokenError),
    /// The profile repository failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// The signed claim bundle identifying an authenticated actor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Actor's RUT in display form.
    pub rut: String,
    /// Actor's login email.
    pub email: String,
    /// Actor's role.
    pub role: Role,
    /// Issued-at, seconds since the epoch.
    pub iat: i64,
    /// Expiry, seconds since the epoch.
    pub exp: i64,
}

/// Computes and checks token signatures.
///
/// The seam for moving key custody out of the client process.
pub trait TokenSigner: Send + Sync {
    /// Sign a message.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::InvalidKey`] if the key is unusable.
    fn sign(&self, message: &[u8]) -> Result<Vec<u8>, TokenError>;

    /// Whether `signature` is valid for `message`. Comparison is
    /// constant-time; any internal failure reads as invalid.
    fn verify(&self, message: &[u8], signature: &[u8]) -> bool;
}

/// HMAC-SHA256 signer over a process-held secret.
pub struct HmacSha256Signer {
    secret: SecretString,
}

impl HmacSha256Signer {
    /// Signer over the given secret.
    #[must_use]
    pub const fn new(secret: SecretString) -> Self {
        Self { secret }
    }

    fn mac(&self) -> Result<Hmac<Sha256>, TokenError> {
        Hmac::<Sha256>::new_from_slice(self.secret.expose_secret().as_bytes())
            .map_err(|_| TokenError::InvalidKey)
    }
}

impl TokenSigner for HmacSha256Signer {
    fn sign(&self, message: &[u8]) -> Result<Vec<u8>, TokenError> {
        let mut mac = self.mac()?;
        mac.update(message);
        Ok(mac.finalize().into_bytes().to_vec())
    }

    fn verify(&self, message: &[u8], signature: &[u8]) -> bool {
        let Ok(mut mac) = self.mac() else {
            return false;
        };
        mac.update(message);
        mac.verify_slice(signature).is_ok()
    }
}

/// Issues, verifies, and decodes session tokens.
pub struct TokenService {
    signer: Box<dyn TokenSigner>,
    ttl: Duration,
}

impl TokenService {
    /// Service over an HMAC signer with the standard two-hour lifetime.
    #[must_use]
    pub fn new(secret: SecretString) -> Self {
        Self::with_signer(
            Box::new(HmacSha256Signer::new(secret)),
            Duration::seconds(TOKEN_TTL_SECS),
        )
    }

    /// Service over an injected signer and lifetime.
    #[must_use]
    pub fn with_signer(signer: Box<dyn TokenSigner>, ttl: Duration) -> Self {
        Self { signer, ttl }
    }

    /// Issue a token for an authenticated profile.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError`] if signing fails.
    pub fn issue(&self, profile: &UserProfile) -> Result<String, TokenError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            rut: profile.rut.formatted(),
            email: profile.email.to_string(),
            role: profile.role,
            iat: now,
            exp: now + self.ttl.num_seconds(),
        };

        let payload = serde_json::to_string(&claims).map_err(|_| TokenError::Malformed)?;
        let message = format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(JWT_HEADER),
            URL_SAFE_NO_PAD.encode(payload)
        );
        let signature = self.signer.sign(message.as_bytes())?;

        debug!(rut = %claims.rut, role = %claims.role, "token issued");
        Ok(format!("{message}.{}", URL_SAFE_NO_PAD.encode(signature)))
    }

    /// Verify structure, signature, and expiry, returning the claims.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Malformed`] for structural problems,
    /// [`TokenError::InvalidSignature`] when the signature fails, and
    /// [`TokenError::Expired`] for a verified but stale token.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let segments: Vec<&str> = token.split('.').collect();
        let [header, payload, signature] = segments.as_slice() else {
            return Err(TokenError::Malformed);
        };
        let signature = URL_SAFE_NO_PAD
            .decode(signature)
            .map_err(|_| TokenError::Malformed)?;

        let message = format!("{header}.{payload}");
        if !self.signer.verify(message.as_bytes(), &signature) {
            return Err(TokenError::InvalidSignature);
        }

        let claims = Self::decode(token).ok_or(TokenError::Malformed)?;
        if claims.exp < Utc::now().timestamp() {
            return Err(TokenError::Expired);
        }
        Ok(claims)
    }

    /// Read claims without checking the signature. Display purposes only.
    #[must_use]
    pub fn decode(token: &str) -> Option<Claims> {
        let mut segments = token.split('.');
        let _header = segments.next()?;
        let payload = segments.next()?;
        let _signature = segments.next()?;
        if segments.next().is_some() {
            return None;
        }

        let payload = URL_SAFE_NO_PAD.decode(payload).ok()?;
        serde_json::from_slice(&payload).ok()
    }

    /// Whether the token's expiry has passed. A token that cannot be
    /// decoded counts as expired.
    #[must_use]
    pub fn is_expired(token: &str) -> bool {
        Self::decode(token).is_none_or(|claims| claims.exp < Utc::now().timestamp())
    }
}

/// Current session state for one running client.
///
/// Holds at most one token. Every read re-checks expiry; a stale token is
/// cleared on sight, which is the forced-logout behavior the UI relies on
/// at application start and on session-state changes.
pub struct Session {
    tokens: TokenService,
    token: Option<String>,
}

impl Session {
    /// Fresh session with nobody logged in.
    #[must_use]
    pub const fn new(tokens: TokenService) -> Self {
        Self {
            tokens,
            token: None,
        }
    }

    /// Authenticate against the profile repository and store a new token.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::InvalidCredentials`] when the email/secret
    /// pair matches no account.
    pub fn login(
        &mut self,
        profiles: &ProfileRepository,
        email: &str,
        secret: &str,
    ) -> Result<Claims, SessionError> {
        let profile = profiles
            .validate_credentials(email, secret)?
            .ok_or(SessionError::InvalidCredentials)?;

        let token = self.tokens.issue(&profile)?;
        let claims = TokenService::decode(&token).ok_or(TokenError::Malformed)?;
        self.token = Some(token);
        debug!(rut = %claims.rut, "session opened");
        Ok(claims)
    }

    /// Claims of the logged-in actor, if any.
    ///
    /// An expired token is cleared and reported as no session.
    pub fn current(&mut self) -> Option<Claims> {
        let token = self.token.as_deref()?;
        if TokenService::is_expired(token) {
            warn!("session token expired, forcing logout");
            self.token = None;
            return None;
        }
        TokenService::decode(token)
    }

    /// Signature-checked claims for trust decisions.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Expired`] when nobody is logged in or the
    /// token is stale, and the usual verification errors otherwise.
    pub fn verified(&self) -> Result<Claims, TokenError> {
        let token = self.token.as_deref().ok_or(TokenError::Expired)?;
        self.tokens.verify(token)
    }

    /// The raw token, if a session is open.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Drop the session state.
    pub fn logout(&mut self) {
        if self.token.take().is_some() {
            debug!("session closed");
        }
    }
}
