//! Integration tests for kitchen-monitor
//!
//! These tests drive the crate through its public API only.

pub mod alerting_tests;
pub mod config_validation_tests;
pub mod http_tests;
pub mod monitoring_tests;
