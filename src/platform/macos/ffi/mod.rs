//! FFI layer for macOS.
//!
//! - bridge.rs: objc2 helpers for the dynamic `msg_send!` style
//! - accessibility.rs: AXUIElement service and trust prompt

pub mod accessibility;
pub mod bridge;

pub use accessibility::{ensure_accessibility_prompt, AxElement, AxService};
