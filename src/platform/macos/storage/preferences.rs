//! Trigger settings from NSUserDefaults.
//!
//! The store is read-only from this process; a separate preferences UI
//! writes it and the defaults-changed notification prompts a reload.

use crate::platform::macos::ffi::bridge::{get_class, id, msg_send, nil, nsstring_id, nsstring_to_string};

use crate::model::constants::*;
use crate::model::{StoredSettings, TriggerSettings};

unsafe fn user_defaults() -> id {
    msg_send![get_class("NSUserDefaults"), standardUserDefaults]
}

/// Whether `key` has any stored value.
///
/// # Safety
/// Must be called from main thread with valid autorelease pool.
pub unsafe fn prefs_has(key: &str) -> bool {
    let obj: id = msg_send![user_defaults(), objectForKey: nsstring_id(key)];
    obj != nil
}

/// Reads an integer from NSUserDefaults, `None` if not set.
///
/// # Safety
/// Must be called from main thread with valid autorelease pool.
pub unsafe fn prefs_get_int(key: &str) -> Option<i64> {
    if !prefs_has(key) {
        return None;
    }
    // NSInteger is i64 on 64-bit macOS
    let val: isize = msg_send![user_defaults(), integerForKey: nsstring_id(key)];
    Some(val as i64)
}

/// Reads a double from NSUserDefaults, `None` if not set.
///
/// # Safety
/// Must be called from main thread with valid autorelease pool.
pub unsafe fn prefs_get_double(key: &str) -> Option<f64> {
    if !prefs_has(key) {
        return None;
    }
    Some(msg_send![user_defaults(), doubleForKey: nsstring_id(key)])
}

/// Reads a string from NSUserDefaults, `None` if not set or not a string.
///
/// # Safety
/// Must be called from main thread with valid autorelease pool.
pub unsafe fn prefs_get_string(key: &str) -> Option<String> {
    let obj: id = msg_send![user_defaults(), stringForKey: nsstring_id(key)];
    nsstring_to_string(obj)
}

/// Loads a validated settings snapshot.
///
/// # Safety
/// Must be called from main thread with valid autorelease pool.
pub unsafe fn load_settings() -> TriggerSettings {
    let stored = StoredSettings {
        trigger_mode: prefs_get_string(PREF_TRIGGER_MODE),
        selected_modifiers: prefs_get_int(PREF_SELECTED_MODIFIERS),
        shortcut_key_code: prefs_get_int(PREF_SHORTCUT_KEY_CODE),
        shortcut_modifiers: prefs_get_int(PREF_SHORTCUT_MODIFIERS),
        ax_messaging_timeout: prefs_get_double(PREF_AX_MESSAGING_TIMEOUT),
    };
    TriggerSettings::from_stored(&stored)
}
