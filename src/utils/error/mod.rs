//! Error handling for the service
//!
//! This module defines the crate error type and its HTTP mapping.

mod helpers;
mod response;
mod types;

pub use response::{ErrorDetail, ErrorResponse};
pub use types::{GatewayError, Result};
