//! Platform-specific implementations.
//!
//! macOS is the only platform with an accessibility menu bar to mirror.
//! Its submodule implements the service traits of the library:
//! - FFI bindings (AXUIElement, CGEventTap, Cocoa bridge)
//! - Input handling (event tap host, system observers)
//! - Storage (NSUserDefaults settings snapshot)
//! - UI (NSMenu presenter, permission alert)

#[cfg(target_os = "macos")]
pub mod macos;

#[cfg(target_os = "macos")]
pub use macos::*;
