//! Trigger state machine.
//!
//! ```text
//! Idle → PermissionCheck ─denied→ (alert) → Idle
//!                        └granted→ Fetching ─none→ Idle
//!                                           └some→ Presenting → Idle
//! ```
//!
//! A run is single-shot and non-reentrant: a trigger arriving while
//! another run is in flight is dropped with [`TriggerOutcome::Busy`].

use std::cell::Cell;

use tracing::{debug, info};

use crate::accessibility::{fetch_frontmost_menu_bar, AccessibilityService, PermissionGate};
use crate::error::AxError;
use crate::menu::{activate, build_menu_bar, PresentedItem, PresentedMenu};

/// Host-UI side of a trigger.
pub trait MenuPresenter<E> {
    /// Show the blocking "accessibility permission required" alert.
    fn show_permission_alert(&mut self);

    /// Pop `menu` up at the pointer and block until it closes.
    ///
    /// Returns the leaf row the user chose, if any.
    fn present<'m>(&mut self, menu: &'m PresentedMenu<E>) -> Option<&'m PresentedItem<E>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerState {
    Idle,
    PermissionCheck,
    Fetching,
    Presenting,
}

/// How a trigger run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerOutcome {
    /// Another run was in flight; this trigger was dropped.
    Busy,
    /// Not trusted for accessibility; the alert was shown.
    PermissionDenied,
    /// No frontmost app or no readable menu bar; nothing shown.
    NoMenuBar,
    /// The menu closed without choosing an actionable row.
    Dismissed,
    /// The chosen item was pressed.
    Activated { title: String },
    /// The chosen item could not be pressed.
    ActivationFailed { title: String, error: AxError },
}

/// Runs triggers one at a time.
#[derive(Debug)]
pub struct TriggerPipeline {
    state: Cell<TriggerState>,
}

impl Default for TriggerPipeline {
    fn default() -> Self {
        Self::new()
    }
}

/// Returns the pipeline to `Idle` when a run ends, including by panic.
struct RunGuard<'p> {
    state: &'p Cell<TriggerState>,
}

impl RunGuard<'_> {
    fn advance(&self, next: TriggerState) {
        debug!(from = ?self.state.get(), to = ?next, "trigger state");
        self.state.set(next);
    }
}

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        self.state.set(TriggerState::Idle);
    }
}

impl TriggerPipeline {
    pub fn new() -> Self {
        Self {
            state: Cell::new(TriggerState::Idle),
        }
    }

    pub fn state(&self) -> TriggerState {
        self.state.get()
    }

    pub fn is_busy(&self) -> bool {
        self.state.get() != TriggerState::Idle
    }

    /// Run one trigger end to end.
    pub fn run<S, G, P>(&self, service: &S, gate: &G, presenter: &mut P) -> TriggerOutcome
    where
        S: AccessibilityService,
        G: PermissionGate,
        P: MenuPresenter<S::Element>,
    {
        if self.is_busy() {
            debug!(state = ?self.state.get(), "trigger dropped, run in flight");
            return TriggerOutcome::Busy;
        }
        let guard = RunGuard { state: &self.state };

        guard.advance(TriggerState::PermissionCheck);
        if !gate.is_trusted() {
            info!("accessibility permission not granted");
            presenter.show_permission_alert();
            return TriggerOutcome::PermissionDenied;
        }

        guard.advance(TriggerState::Fetching);
        let Some(forest) = fetch_frontmost_menu_bar(service) else {
            return TriggerOutcome::NoMenuBar;
        };
        let menu = build_menu_bar(&forest);

        guard.advance(TriggerState::Presenting);
        // Submenu and inert rows carry no action.
        let Some(item) = presenter
            .present(&menu)
            .filter(|item| item.element().is_some())
        else {
            return TriggerOutcome::Dismissed;
        };

        let title = item.title.clone();
        match activate(service, item) {
            Ok(()) => TriggerOutcome::Activated { title },
            Err(error) => TriggerOutcome::ActivationFailed { title, error },
        }
    }
}
