//! Event dispatcher for handling application events.
//!
//! Called from the main-thread timer; drains the event bus and turns each
//! event into an action on the [`AppState`](crate::platform::macos::app::AppState).
//!
//! ```text
//! tap callback / observers → EventBus → dispatch_events() → AppState
//! ```

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, error, info, warn};

use crate::events::{drain_events, AppEvent};
use crate::handlers::{DispatchQueue, TriggerOutcome};
use crate::platform::macos::app::with_app_state;
use crate::platform::macos::ffi::bridge::autoreleasepool;
use crate::platform::macos::storage::load_settings;

/// Held while events are being dispatched.
///
/// The timer keeps firing while the popup menu or the permission alert
/// runs its own event loop; those nested ticks must not dispatch.
static DISPATCH_GUARD: AtomicBool = AtomicBool::new(false);

/// Dispatch all pending events from the global event bus.
pub fn dispatch_events() {
    if DISPATCH_GUARD
        .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
        .is_err()
    {
        return;
    }

    // No tap until accessibility is granted; pick it up once it is.
    with_app_state(|state| state.retry_arm());

    let mut queue = DispatchQueue::new(drain_events());
    while let Some(event) = queue.next_event() {
        debug!(event = event.description(), "dispatching");
        if event.is_trigger() {
            autoreleasepool(run_trigger);
            queue.trigger_finished(drain_events());
        } else {
            dispatch_system_event(&event);
        }
    }

    DISPATCH_GUARD.store(false, Ordering::SeqCst);
}

/// Release the tap at termination.
///
/// Runs pending events first. If termination arrives while a menu or the
/// alert holds the state, the tap is left to go away with the process.
pub fn shutdown() {
    dispatch_events();
    match with_app_state(|state| state.disarm()) {
        Some(()) => info!("event tap released for shutdown"),
        None => warn!("application state busy at termination, tap released on exit"),
    }
}

fn run_trigger() {
    let Some(outcome) = with_app_state(|state| state.run_trigger()) else {
        warn!("trigger ignored, application state unavailable");
        return;
    };
    match outcome {
        TriggerOutcome::Activated { title } => info!(%title, "menu item activated"),
        TriggerOutcome::ActivationFailed { title, error } => {
            warn!(%title, %error, "menu item activation failed");
        }
        other => debug!(outcome = ?other, "trigger finished"),
    }
}

fn dispatch_system_event(event: &AppEvent) {
    match event {
        AppEvent::SettingsChanged => {
            let settings = unsafe { load_settings() };
            match with_app_state(|state| state.reload(settings)) {
                Some(Ok(true)) => info!("event tap re-armed for new settings"),
                Some(Ok(false)) | None => {}
                Some(Err(err)) => error!(%err, "failed to re-arm event tap"),
            }
        }
        AppEvent::ReinstallTap => match with_app_state(|state| state.arm()) {
            Some(Ok(())) => info!("event tap reinstalled"),
            Some(Err(err)) => error!(%err, "failed to reinstall event tap"),
            None => {}
        },
        AppEvent::Terminating => {
            with_app_state(|state| state.disarm());
            debug!("terminating, event tap released");
        }
        AppEvent::TriggerRequested(_) => {}
    }
}
