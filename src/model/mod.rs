//! Application domain model.
//!
//! This module contains pure business logic (no FFI dependencies):
//! modifier sets, the trigger settings snapshot and the menu tree snapshot.
//!
//! Platform-specific persistence is in `platform::macos::storage`.

pub mod constants;
pub mod menu_node;
pub mod modifiers;
pub mod trigger;

pub use constants::*;
pub use menu_node::{MenuForest, MenuNode, Role};
pub use modifiers::ModifierSet;
pub use trigger::{
    InputEvent, Shortcut, StoredSettings, TapDecision, TapKind, TriggerMode, TriggerSettings,
    UnknownTriggerMode,
};
