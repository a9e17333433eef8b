//! Menu synthesis and dispatch.
//!
//! - [`synthesis`]: turns a menu-bar forest into a [`PresentedMenu`]
//! - [`activate`]: replays the press of a chosen leaf on its live element

pub mod synthesis;

pub use synthesis::{
    build_menu, build_menu_bar, ItemAction, MenuEntry, PresentedItem, PresentedMenu,
};

use tracing::{debug, warn};

use crate::accessibility::AccessibilityService;
use crate::error::AxError;

/// Perform the primary action of a chosen leaf item.
///
/// Failures are logged and returned; the menu has already closed, so
/// there is nothing left to recover.
pub fn activate<S: AccessibilityService>(
    service: &S,
    item: &PresentedItem<S::Element>,
) -> Result<(), AxError> {
    let Some(element) = item.element() else {
        debug!(title = %item.title, "selected item has no action");
        return Ok(());
    };
    service.press(element).inspect_err(|err| {
        warn!(title = %item.title, error = %err, "failed to perform action on menu item");
    })
}
