//! Configuration management module
//!
//! Responsible for loading and validating gateway client configuration.

pub mod settings;

pub use settings::GatewaySettings;
