#![allow(unexpected_cfgs)] // Silence cfg warnings from objc macros

//! menubar-popup: press a shortcut (or modifier + right-click) anywhere to
//! get the frontmost application's menu bar as a context menu.

#[cfg(target_os = "macos")]
mod macos_main;

use menubar_popup::events::init_event_bus;
use menubar_popup::logging;

fn main() {
    logging::init();
    init_event_bus();

    #[cfg(target_os = "macos")]
    macos_main::run();

    #[cfg(not(target_os = "macos"))]
    {
        tracing::error!("menubar-popup needs the macOS accessibility API");
        std::process::exit(1);
    }
}
