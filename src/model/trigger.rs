//! Trigger configuration and event classification (pure Rust, no FFI).
//!
//! A [`TriggerSettings`] value is an immutable snapshot of the persisted
//! configuration. The event-tap callback owns its own copy and asks it,
//! for every observed event, whether the event must be consumed.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use super::constants::*;
use super::modifiers::ModifierSet;

/// Which interceptor is armed. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TriggerMode {
    #[default]
    KeyboardShortcut,
    ClickModifier,
}

impl TriggerMode {
    /// Value persisted in the settings store.
    pub fn as_str(&self) -> &'static str {
        match self {
            TriggerMode::KeyboardShortcut => "Keyboard Shortcut",
            TriggerMode::ClickModifier => "Click Modifier",
        }
    }

    /// Kind of OS tap this mode needs.
    pub fn tap_kind(&self) -> TapKind {
        match self {
            TriggerMode::KeyboardShortcut => TapKind::Keyboard,
            TriggerMode::ClickModifier => TapKind::Mouse,
        }
    }

    /// Parse a stored value, falling back to the default for unknown text.
    pub fn from_stored(value: Option<&str>) -> Self {
        value.and_then(|v| v.parse().ok()).unwrap_or_default()
    }
}

impl fmt::Display for TriggerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a stored trigger mode is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown trigger mode '{0}'")]
pub struct UnknownTriggerMode(pub String);

impl FromStr for TriggerMode {
    type Err = UnknownTriggerMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Keyboard Shortcut" => Ok(TriggerMode::KeyboardShortcut),
            "Click Modifier" => Ok(TriggerMode::ClickModifier),
            other => Err(UnknownTriggerMode(other.to_string())),
        }
    }
}

/// Kind of low-level event tap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TapKind {
    /// Key-down events.
    Keyboard,
    /// Right-mouse-down events.
    Mouse,
}

impl fmt::Display for TapKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TapKind::Keyboard => f.write_str("keyboard"),
            TapKind::Mouse => f.write_str("mouse"),
        }
    }
}

/// A global keyboard trigger: virtual key code plus exact modifier set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shortcut {
    pub key_code: u16,
    pub modifiers: ModifierSet,
}

impl Shortcut {
    pub const fn new(key_code: u16, modifiers: ModifierSet) -> Self {
        Self {
            key_code,
            modifiers,
        }
    }

    /// Exact match: same key and the very same modifier set.
    ///
    /// A superset of the configured modifiers does not match.
    pub fn matches(&self, key_code: u16, modifiers: ModifierSet) -> bool {
        self.key_code == key_code && self.modifiers == modifiers
    }
}

impl Default for Shortcut {
    fn default() -> Self {
        Self::new(DEFAULT_SHORTCUT_KEY_CODE, DEFAULT_SHORTCUT_MODIFIERS)
    }
}

/// An input event as seen by the tap callback, already normalised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    KeyDown { key_code: u16, modifiers: ModifierSet },
    RightMouseDown { modifiers: ModifierSet },
    /// The OS disabled the tap (timeout or user input).
    TapDisabled,
    Other,
}

/// What the tap callback tells the OS to do with an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapDecision {
    /// Forward the event unmodified.
    PassThrough,
    /// Suppress the event and schedule a trigger.
    Consume,
}

/// Immutable snapshot of the trigger configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct TriggerSettings {
    pub mode: TriggerMode,
    /// `None` when no shortcut has been recorded; nothing matches then.
    pub shortcut: Option<Shortcut>,
    pub click_modifiers: ModifierSet,
    /// Accessibility messaging timeout in seconds (0 = OS default).
    pub ax_messaging_timeout: f64,
}

impl Default for TriggerSettings {
    fn default() -> Self {
        Self {
            mode: TriggerMode::default(),
            shortcut: Some(Shortcut::default()),
            click_modifiers: DEFAULT_CLICK_MODIFIERS,
            ax_messaging_timeout: DEFAULT_AX_MESSAGING_TIMEOUT,
        }
    }
}

impl TriggerSettings {
    /// Clamps values read from the store to usable ranges.
    pub fn validate(&mut self) {
        if !self.ax_messaging_timeout.is_finite() || self.ax_messaging_timeout < 0.0 {
            self.ax_messaging_timeout = DEFAULT_AX_MESSAGING_TIMEOUT;
        }
        self.ax_messaging_timeout = self.ax_messaging_timeout.min(MAX_AX_MESSAGING_TIMEOUT);
        self.click_modifiers = ModifierSet::from_bits(self.click_modifiers.bits());
    }

    pub fn tap_kind(&self) -> TapKind {
        self.mode.tap_kind()
    }

    /// Decide whether an observed event is a trigger.
    ///
    /// Only the event type belonging to the active mode can match; every
    /// other event passes through untouched.
    pub fn classify(&self, event: &InputEvent) -> TapDecision {
        let hit = match (self.mode, event) {
            (
                TriggerMode::KeyboardShortcut,
                InputEvent::KeyDown {
                    key_code,
                    modifiers,
                },
            ) => self
                .shortcut
                .is_some_and(|s| s.matches(*key_code, *modifiers)),
            (TriggerMode::ClickModifier, InputEvent::RightMouseDown { modifiers }) => {
                *modifiers == self.click_modifiers
            }
            _ => false,
        };
        if hit {
            TapDecision::Consume
        } else {
            TapDecision::PassThrough
        }
    }
}

/// Raw preference values as read from the user-defaults store.
///
/// `None` means the key is absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoredSettings {
    pub trigger_mode: Option<String>,
    pub selected_modifiers: Option<i64>,
    pub shortcut_key_code: Option<i64>,
    pub shortcut_modifiers: Option<i64>,
    pub ax_messaging_timeout: Option<f64>,
}

impl TriggerSettings {
    /// Build a validated snapshot from stored values, filling defaults.
    ///
    /// A negative or out-of-range key code means no shortcut is recorded.
    pub fn from_stored(stored: &StoredSettings) -> Self {
        let shortcut_modifiers = stored
            .shortcut_modifiers
            .map(|bits| ModifierSet::from_bits(bits as u64))
            .unwrap_or(DEFAULT_SHORTCUT_MODIFIERS);
        let shortcut = match stored.shortcut_key_code {
            None => Some(Shortcut::new(DEFAULT_SHORTCUT_KEY_CODE, shortcut_modifiers)),
            Some(code) => u16::try_from(code)
                .ok()
                .map(|key_code| Shortcut::new(key_code, shortcut_modifiers)),
        };
        let mut settings = Self {
            mode: TriggerMode::from_stored(stored.trigger_mode.as_deref()),
            shortcut,
            click_modifiers: stored
                .selected_modifiers
                .map(|bits| ModifierSet::from_bits(bits as u64))
                .unwrap_or(DEFAULT_CLICK_MODIFIERS),
            ax_messaging_timeout: stored
                .ax_messaging_timeout
                .unwrap_or(DEFAULT_AX_MESSAGING_TIMEOUT),
        };
        settings.validate();
        settings
    }
}
