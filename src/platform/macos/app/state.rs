//! Main-thread application state.
//!
//! Owned by a thread-local so the timer and notification callbacks can
//! reach it without passing pointers through Objective-C.

use std::cell::RefCell;
use std::time::Instant;

use tracing::info;

use crate::accessibility::PermissionGate;
use crate::error::TapError;
use crate::events::EventPublisher;
use crate::handlers::{TriggerOutcome, TriggerPipeline};
use crate::interceptor::{ArmRetry, Interceptor};
use crate::model::constants::ARM_RETRY_INTERVAL;
use crate::model::TriggerSettings;
use crate::platform::macos::ffi::accessibility::AxService;
use crate::platform::macos::input::CgEventTapHost;
use crate::platform::macos::ui::NsMenuPresenter;

thread_local! {
    static APP_STATE: RefCell<Option<AppState>> = const { RefCell::new(None) };
}

pub struct AppState {
    interceptor: Interceptor<CgEventTapHost>,
    retry: ArmRetry,
    pipeline: TriggerPipeline,
    service: AxService,
    presenter: NsMenuPresenter,
    settings: TriggerSettings,
}

impl AppState {
    pub fn new(
        presenter: NsMenuPresenter,
        settings: TriggerSettings,
        publisher: EventPublisher,
    ) -> Self {
        Self {
            interceptor: Interceptor::new(CgEventTapHost::new(), publisher),
            retry: ArmRetry::new(ARM_RETRY_INTERVAL),
            pipeline: TriggerPipeline::new(),
            service: AxService::new(&settings),
            presenter,
            settings,
        }
    }

    pub fn settings(&self) -> &TriggerSettings {
        &self.settings
    }

    /// Install a fresh tap for the current settings.
    pub fn arm(&mut self) -> Result<(), TapError> {
        self.interceptor.arm(&self.settings)
    }

    /// Swap in a new settings snapshot, re-arming if it changed.
    pub fn reload(&mut self, settings: TriggerSettings) -> Result<bool, TapError> {
        if settings != self.settings {
            info!(mode = %settings.mode, "settings changed");
        }
        self.service.apply_settings(&settings);
        self.settings = settings;
        self.interceptor.rearm(&self.settings)
    }

    /// Install the tap if it is still missing and access has been granted
    /// since. Cheap when armed.
    pub fn retry_arm(&mut self) -> bool {
        if self.interceptor.is_armed() {
            return false;
        }
        let trusted = self.service.is_trusted();
        self.interceptor
            .arm_if_due(&self.settings, trusted, &mut self.retry, Instant::now())
    }

    pub fn disarm(&mut self) {
        self.interceptor.disarm();
    }

    /// Run one trigger: permission check, fetch, present, activate.
    pub fn run_trigger(&mut self) -> TriggerOutcome {
        self.pipeline
            .run(&self.service, &self.service, &mut self.presenter)
    }
}

/// Make `state` the process-wide main-thread state.
pub fn install_app_state(state: AppState) {
    APP_STATE.with(|cell| *cell.borrow_mut() = Some(state));
}

/// Run `f` against the state. `None` if it is missing or already borrowed.
pub fn with_app_state<R>(f: impl FnOnce(&mut AppState) -> R) -> Option<R> {
    APP_STATE.with(|cell| {
        let mut guard = cell.try_borrow_mut().ok()?;
        guard.as_mut().map(f)
    })
}
