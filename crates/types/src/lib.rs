//! Shared types for the account service
//!
//! This crate contains the domain model and error types used across the
//! account service components.

pub mod account;
pub mod error;

// Re-export commonly used types
pub use account::{Account, AccountId};
pub use error::{AccountServiceError, ConfigError};
