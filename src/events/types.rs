//! Application events for inter-module communication.
//!
//! These events represent high-level application actions that can be
//! published by any module and handled by the event dispatcher.
//! This module is pure Rust with no FFI dependencies, making it fully testable.

/// What produced a trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerSource {
    /// The global keyboard shortcut.
    Shortcut,
    /// A modifier-qualified right click.
    ModifierClick,
}

/// Application-level events for decoupled communication between modules.
///
/// Events flow from producers (event tap, observers) through the EventBus
/// to the dispatcher, which executes the appropriate actions on the main
/// thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    // === Input Events ===
    /// A trigger was consumed by the event tap; show the menu.
    TriggerRequested(TriggerSource),

    // === Configuration Events ===
    /// Persisted settings changed; reload and re-arm.
    SettingsChanged,

    // === System Events ===
    /// The event tap must be re-armed (disabled by the OS, wake, session).
    ReinstallTap,

    /// The application is about to terminate; release the tap.
    Terminating,
}

impl AppEvent {
    /// Returns true if this event should re-arm the interceptor.
    pub fn requires_rearm(&self) -> bool {
        matches!(self, AppEvent::SettingsChanged | AppEvent::ReinstallTap)
    }

    /// Returns true if this event starts a trigger pipeline run.
    pub fn is_trigger(&self) -> bool {
        matches!(self, AppEvent::TriggerRequested(_))
    }

    /// Returns a human-readable description of the event for debugging.
    pub fn description(&self) -> &'static str {
        match self {
            AppEvent::TriggerRequested(TriggerSource::Shortcut) => "Trigger from keyboard shortcut",
            AppEvent::TriggerRequested(TriggerSource::ModifierClick) => {
                "Trigger from modifier click"
            }
            AppEvent::SettingsChanged => "Settings changed",
            AppEvent::ReinstallTap => "Reinstall event tap",
            AppEvent::Terminating => "Application terminating",
        }
    }
}
