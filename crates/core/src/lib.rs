//! GasDepot Core - Shared types library.
//!
//! This crate provides common types used across all GasDepot components:
//! - `backend` - Emulated store backend (record store, repositories, sessions)
//! - `cli` - Command-line stand-in for the storefront UI
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access. This
//! keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Validated newtypes (RUT, phone, email) and domain enums
//! - [`records`] - Domain records persisted by the backend repositories

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod records;
pub mod types;

pub use records::*;
pub use types::*;
