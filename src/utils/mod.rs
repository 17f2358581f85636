//! Utilities module
//!
//! Contains error handling and logging helpers.

pub mod error;
pub mod logging;
