//! Utilities Module
//!
//! Common utilities used across the crate.

mod json;
pub mod crypto;
pub mod logging;

pub use json::*;
pub use crypto::*;
