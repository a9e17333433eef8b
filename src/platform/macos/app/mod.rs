//! Application wiring: the controller object and the main-thread state
//! shared by the dispatcher.

pub mod controller;
pub mod state;

pub use controller::{register_and_create_controller, start_dispatch_timer};
pub use state::{install_app_state, with_app_state, AppState};
