//! Input handling module.
//!
//! - event_tap.rs: CGEventTap host for the interceptor
//! - observers.rs: system notifications (settings, wake, termination)

pub mod event_tap;
pub mod observers;

pub use event_tap::{CgEventTapHost, InstalledTap};
pub use observers::{install_settings_observer, install_termination_observer, install_wakeup_observers};
