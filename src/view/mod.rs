//! View layer
//!
//! Browser logic the UI host drives. Rendering itself lives in the host.

pub mod tweaks;
