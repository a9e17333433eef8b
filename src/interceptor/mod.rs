//! Global input interceptor.
//!
//! Owns zero or one OS event tap. Arming always releases the previous tap
//! before acquiring the new one, so two taps are never live at once.
//!
//! The tap callback is a closure bound at install time. It classifies each
//! event against an immutable [`TriggerSettings`] snapshot, publishes a
//! trigger on a match and returns the propagation decision synchronously.

mod retry;

pub use retry::ArmRetry;

use tracing::{debug, info, trace};

use crate::error::TapError;
use crate::events::{AppEvent, EventPublisher, TriggerSource};
use crate::model::{InputEvent, TapDecision, TapKind, TriggerMode, TriggerSettings};

/// Callback installed into an OS tap.
pub type TapHandler = Box<dyn Fn(&InputEvent) -> TapDecision + 'static>;

/// OS low-level event tap service.
pub trait EventTapHost {
    /// An installed tap together with its run-loop registration.
    type Tap;

    /// Install a tap for `kind`. The handler runs for every observed event.
    fn install(&mut self, kind: TapKind, handler: TapHandler) -> Result<Self::Tap, TapError>;

    /// Release a tap and its run-loop registration.
    fn remove(&mut self, tap: Self::Tap);
}

struct ActiveTap<T> {
    kind: TapKind,
    settings: TriggerSettings,
    tap: T,
}

/// Component owning the single process-wide tap.
pub struct Interceptor<H: EventTapHost> {
    host: H,
    publisher: EventPublisher,
    active: Option<ActiveTap<H::Tap>>,
}

impl<H: EventTapHost> Interceptor<H> {
    pub fn new(host: H, publisher: EventPublisher) -> Self {
        Self {
            host,
            publisher,
            active: None,
        }
    }

    /// Install the tap required by `settings`, tearing down any existing one first.
    pub fn arm(&mut self, settings: &TriggerSettings) -> Result<(), TapError> {
        self.disarm();

        let kind = settings.tap_kind();
        let handler = make_handler(settings.clone(), self.publisher.clone());
        let tap = self.host.install(kind, handler)?;
        info!(%kind, mode = %settings.mode, "event tap armed");
        self.active = Some(ActiveTap {
            kind,
            settings: settings.clone(),
            tap,
        });
        Ok(())
    }

    /// Re-arm only if `settings` differ from the live snapshot.
    ///
    /// Returns whether a new tap was installed.
    pub fn rearm(&mut self, settings: &TriggerSettings) -> Result<bool, TapError> {
        if self.active.as_ref().is_some_and(|a| a.settings == *settings) {
            debug!("settings unchanged, keeping event tap");
            return Ok(false);
        }
        self.arm(settings)?;
        Ok(true)
    }

    /// Release the tap if one is installed. Safe to call repeatedly.
    pub fn disarm(&mut self) {
        if let Some(active) = self.active.take() {
            self.host.remove(active.tap);
            debug!(kind = %active.kind, "event tap removed");
        }
    }

    pub fn is_armed(&self) -> bool {
        self.active.is_some()
    }

    /// Kind of the live tap, if any.
    pub fn active_kind(&self) -> Option<TapKind> {
        self.active.as_ref().map(|a| a.kind)
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
}

impl<H: EventTapHost> Drop for Interceptor<H> {
    fn drop(&mut self) {
        self.disarm();
    }
}

fn trigger_source(mode: TriggerMode) -> TriggerSource {
    match mode {
        TriggerMode::KeyboardShortcut => TriggerSource::Shortcut,
        TriggerMode::ClickModifier => TriggerSource::ModifierClick,
    }
}

/// Build the tap callback. Must stay non-blocking.
fn make_handler(settings: TriggerSettings, publisher: EventPublisher) -> TapHandler {
    let source = trigger_source(settings.mode);
    Box::new(move |event: &InputEvent| {
        if let InputEvent::TapDisabled = event {
            publisher.publish(AppEvent::ReinstallTap);
            return TapDecision::PassThrough;
        }
        let decision = settings.classify(event);
        if decision == TapDecision::Consume {
            trace!(?event, "trigger consumed");
            publisher.publish(AppEvent::TriggerRequested(source));
        }
        decision
    })
}
