//! Event handlers for macOS.
//!
//! - dispatcher.rs: drains the event bus on the main thread

pub mod dispatcher;

pub use dispatcher::{dispatch_events, shutdown};
