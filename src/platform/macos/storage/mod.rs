//! Storage for macOS using NSUserDefaults.
//!
//! Reads the trigger configuration from the macOS preferences system.

pub mod preferences;

pub use preferences::*;
