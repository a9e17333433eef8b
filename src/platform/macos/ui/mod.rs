//! UI components for macOS.
//!
//! - context_menu.rs: NSMenu presenter and its row callbacks
//! - alert.rs: accessibility permission alert

pub mod alert;
pub mod context_menu;

pub use alert::show_permission_alert;
pub use context_menu::NsMenuPresenter;
