//! macOS entry point: wires the tap, observers and dispatch timer, then
//! hands control to the AppKit run loop.

use tracing::{error, info, warn};

use menubar_popup::events::publisher;
use menubar_popup::platform::macos::app::{
    install_app_state, register_and_create_controller, start_dispatch_timer, AppState,
};
use menubar_popup::platform::macos::ffi::bridge::{
    autoreleasepool, msg_send, Bool, NSApp, ACTIVATION_POLICY_ACCESSORY,
};
use menubar_popup::platform::macos::ffi::ensure_accessibility_prompt;
use menubar_popup::platform::macos::handlers::shutdown;
use menubar_popup::platform::macos::input::{
    install_settings_observer, install_termination_observer, install_wakeup_observers,
};
use menubar_popup::platform::macos::storage::load_settings;
use menubar_popup::platform::macos::ui::NsMenuPresenter;

/// Main entry point for macOS. The event bus is already initialized.
pub fn run() {
    autoreleasepool(|| unsafe {
        if !ensure_accessibility_prompt() {
            warn!("accessibility access not granted yet; event tap installs once it is");
        }

        let app = NSApp();
        let _: Bool = msg_send![app, setActivationPolicy: ACTIVATION_POLICY_ACCESSORY];

        let controller = register_and_create_controller();
        let settings = load_settings();
        info!(mode = %settings.mode, "starting");

        let mut state = AppState::new(NsMenuPresenter::new(controller), settings, publisher());
        // Fails until accessibility is granted; the dispatch timer retries.
        if let Err(err) = state.arm() {
            error!(%err, "failed to install event tap");
        }
        install_app_state(state);

        install_settings_observer();
        install_wakeup_observers();
        install_termination_observer(shutdown);
        let _ = start_dispatch_timer(controller);

        let _: () = msg_send![app, run];
    });
}
