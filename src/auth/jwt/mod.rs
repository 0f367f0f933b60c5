//! JWT token handling
//!
//! This module provides access token creation and verification.

mod handler;
mod types;


pub use types::{Claims, JwtHandler};
