//! Common test utilities for kitchen-monitor

pub mod assertions;
pub mod fixtures;

pub use fixtures::{RecordFactory, TestApp};
