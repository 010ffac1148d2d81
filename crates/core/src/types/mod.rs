//! Core types for GasDepot.
//!
//! This module provides validated wrappers for common domain concepts.

pub mod email;
pub mod phone;
pub mod role;
pub mod rut;
pub mod status;

pub use email::{Email, EmailError};
pub use phone::{Phone, PhoneError};
pub use role::Role;
pub use rut::{Rut, RutError};
pub use status::{OrderStatus, PaymentMethod};
