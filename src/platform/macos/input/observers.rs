//! System observers feeding the event bus.
//!
//! - user-defaults changes → [`AppEvent::SettingsChanged`]
//! - wake from sleep, session became active → [`AppEvent::ReinstallTap`]
//! - application termination → [`AppEvent::Terminating`], then the tap is released

use std::ffi::CStr;

use block2::RcBlock;
use tracing::debug;

use crate::events::{publish, AppEvent};
use crate::platform::macos::ffi::bridge::{get_class, id, msg_send, nil};

unsafe fn notification_name(name: &CStr) -> id {
    msg_send![get_class("NSString"), stringWithUTF8String: name.as_ptr()]
}

/// Register `on_note` for `name` on `center`, delivered on the main queue.
unsafe fn observe<F>(center: id, name: &'static CStr, on_note: F)
where
    F: Fn() + 'static,
{
    let block = RcBlock::new(move |_note: id| on_note());
    let main_queue: id = msg_send![get_class("NSOperationQueue"), mainQueue];
    let _: id = msg_send![
        center,
        addObserverForName: notification_name(name),
        object: nil,
        queue: main_queue,
        usingBlock: &*block
    ];
    debug!(name = %name.to_string_lossy(), "observer installed");
}

/// Publish `SettingsChanged` whenever the user-defaults store changes.
///
/// # Safety
/// Must be called from main thread with valid autorelease pool.
pub unsafe fn install_settings_observer() {
    let center: id = msg_send![get_class("NSNotificationCenter"), defaultCenter];
    observe(center, c"NSUserDefaultsDidChangeNotification", || {
        publish(AppEvent::SettingsChanged);
    });
}

/// Ask for a fresh tap after events that can silently kill it.
///
/// # Safety
/// Must be called from main thread with valid autorelease pool.
pub unsafe fn install_wakeup_observers() {
    let workspace: id = msg_send![get_class("NSWorkspace"), sharedWorkspace];
    let center: id = msg_send![workspace, notificationCenter];
    for name in [
        c"NSWorkspaceDidWakeNotification",
        c"NSWorkspaceSessionDidBecomeActiveNotification",
    ] {
        observe(center, name, || publish(AppEvent::ReinstallTap));
    }
}

/// Publish `Terminating` and run `on_terminate` when the application is
/// about to quit.
///
/// The timer never fires again after this point, so `on_terminate` must
/// release the tap itself.
///
/// # Safety
/// Must be called from main thread with valid autorelease pool.
pub unsafe fn install_termination_observer(on_terminate: fn()) {
    let center: id = msg_send![get_class("NSNotificationCenter"), defaultCenter];
    observe(center, c"NSApplicationWillTerminateNotification", move || {
        publish(AppEvent::Terminating);
        on_terminate();
    });
}
