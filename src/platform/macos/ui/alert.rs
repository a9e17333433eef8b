//! Blocking permission alert.

use tracing::debug;

use crate::model::constants::{PERMISSION_ALERT_BUTTON, PERMISSION_ALERT_TEXT, PERMISSION_ALERT_TITLE};
use crate::platform::macos::ffi::bridge::{
    get_class, id, msg_send, nsstring_id, release, NSApp, YES,
};

/// Tell the user accessibility access is missing. Blocks until dismissed.
///
/// # Safety
/// Must be called from main thread with valid autorelease pool.
pub unsafe fn show_permission_alert() {
    let alert: id = msg_send![get_class("NSAlert"), alloc];
    let alert: id = msg_send![alert, init];
    let _: () = msg_send![alert, setMessageText: nsstring_id(PERMISSION_ALERT_TITLE)];
    let _: () = msg_send![alert, setInformativeText: nsstring_id(PERMISSION_ALERT_TEXT)];
    let _: id = msg_send![alert, addButtonWithTitle: nsstring_id(PERMISSION_ALERT_BUTTON)];

    // Accessory apps are never active on their own.
    let _: () = msg_send![NSApp(), activateIgnoringOtherApps: YES];
    let response: isize = msg_send![alert, runModal];
    debug!(response, "permission alert dismissed");
    release(alert);
}
