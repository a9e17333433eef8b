//! Configuration constants and default values.
//!
//! This module contains all application constants including NSUserDefaults
//! keys, trigger defaults and the accessibility attribute names we read.

use std::time::Duration;

use super::modifiers::ModifierSet;

// === NSUserDefaults Keys ===

/// Key for the trigger mode ("Keyboard Shortcut" | "Click Modifier").
pub const PREF_TRIGGER_MODE: &str = "triggerMode";

/// Key for the click-trigger modifier bitmask.
pub const PREF_SELECTED_MODIFIERS: &str = "selectedModifiers";

/// Key for the global shortcut's virtual key code (negative = none).
pub const PREF_SHORTCUT_KEY_CODE: &str = "shortcutKeyCode";

/// Key for the global shortcut's modifier bitmask.
pub const PREF_SHORTCUT_MODIFIERS: &str = "shortcutModifiers";

/// Key for the accessibility messaging timeout in seconds (0 = OS default).
pub const PREF_AX_MESSAGING_TIMEOUT: &str = "axMessagingTimeout";

// === Trigger Defaults ===

/// kVK_ANSI_R
pub const KEY_CODE_R: u16 = 15;

/// Default shortcut key: Command+Option+R.
pub const DEFAULT_SHORTCUT_KEY_CODE: u16 = KEY_CODE_R;

/// Default shortcut modifiers.
pub const DEFAULT_SHORTCUT_MODIFIERS: ModifierSet = ModifierSet::COMMAND.union(ModifierSet::OPTION);

/// Default modifiers for the right-click trigger.
pub const DEFAULT_CLICK_MODIFIERS: ModifierSet = ModifierSet::COMMAND;

/// Default accessibility messaging timeout (0 keeps the system default).
pub const DEFAULT_AX_MESSAGING_TIMEOUT: f64 = 0.0;

/// Upper bound accepted for the messaging timeout.
pub const MAX_AX_MESSAGING_TIMEOUT: f64 = 30.0;

// === Accessibility Attributes ===

pub const AX_CHILDREN: &str = "AXChildren";
pub const AX_TITLE: &str = "AXTitle";
pub const AX_ROLE: &str = "AXRole";
pub const AX_ENABLED: &str = "AXEnabled";
pub const AX_MENU_BAR: &str = "AXMenuBar";
pub const AX_MENU_ITEM_CMD_CHAR: &str = "AXMenuItemCmdChar";
pub const AX_MENU_ITEM_CMD_MODIFIERS: &str = "AXMenuItemCmdModifiers";

/// The only action ever performed on a foreign element.
pub const AX_PRESS_ACTION: &str = "AXPress";

// === Accessibility Roles ===

pub const AX_ROLE_MENU_BAR_ITEM: &str = "AXMenuBarItem";
pub const AX_ROLE_MENU: &str = "AXMenu";
pub const AX_ROLE_MENU_ITEM: &str = "AXMenuItem";

/// Role recorded when the role query fails.
pub const AX_ROLE_UNKNOWN: &str = "unknown";

// === Main Loop ===

/// Interval of the main-thread timer that drains the event bus.
pub const DISPATCH_INTERVAL_SECS: f64 = 0.016;

/// Minimum gap between attempts to install a missing event tap.
pub const ARM_RETRY_INTERVAL: Duration = Duration::from_secs(2);

// === Permission Alert ===

pub const PERMISSION_ALERT_TITLE: &str = "Accessibility Permission Required";

pub const PERMISSION_ALERT_TEXT: &str = "This app needs Accessibility permission to read and interact with other apps' menu bars. Please enable it in System Settings > Privacy & Security > Accessibility.";

pub const PERMISSION_ALERT_BUTTON: &str = "OK";
