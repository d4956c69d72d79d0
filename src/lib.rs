// Tweak browser library - search and selection core for a debug-tweaks browser

pub mod config;
pub mod view;

pub use config::{BrowserConfig, ConfigError};
