//! Configuration module for ringkas
//!
//! Handles loading and managing application settings from TOML files.

mod settings;

pub use settings::{ContentSettings, Settings, BROWSER_USER_AGENT};
