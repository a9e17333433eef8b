//! macOS implementation using AppKit via objc2, Accessibility via
//! accessibility-sys and CGEventTap via core-graphics.
//!
//! - FFI bindings (objc2 bridge, AXUIElement service)
//! - Input handling (event tap host, system observers)
//! - Storage (NSUserDefaults settings)
//! - UI (NSMenu presenter, permission alert)
//! - App wiring (controller object, dispatcher, main-thread state)

pub mod app;
pub mod ffi;
pub mod handlers;
pub mod input;
pub mod storage;
pub mod ui;

pub use ffi::bridge;
