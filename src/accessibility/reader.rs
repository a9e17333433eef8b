//! Menu-bar tree reader.
//!
//! Walks the frontmost application's `AXMenuBar` and materialises an
//! immutable [`MenuNode`] forest. Individual attribute failures degrade to
//! default values; only a missing menu bar aborts the read.

use tracing::{debug, trace};

use super::{AccessibilityService, FrontmostApp};
use crate::model::constants::*;
use crate::model::{MenuForest, MenuNode, ModifierSet, Role};

/// Read the menu bar of the frontmost application.
///
/// Returns `None` when there is no frontmost application or its menu bar
/// cannot be obtained. Callers treat `None` as "do nothing".
pub fn fetch_frontmost_menu_bar<S: AccessibilityService>(
    service: &S,
) -> Option<MenuForest<S::Element>> {
    let Some(app) = service.frontmost_application() else {
        debug!("no frontmost application");
        return None;
    };
    debug!(pid = app.pid, name = app_name(&app), "frontmost application");

    let menu_bar = match service.menu_bar(&app) {
        Ok(menu_bar) => menu_bar,
        Err(err) => {
            debug!(pid = app.pid, error = %err, "menu bar unavailable");
            return None;
        }
    };

    let forest = parse_tree(service, &menu_bar);
    debug!(
        pid = app.pid,
        top_level = forest.len(),
        nodes = forest.iter().map(MenuNode::node_count).sum::<usize>(),
        "menu bar read"
    );
    Some(forest)
}

/// Recursively read the children of `element`.
///
/// Every child is descended into through its generic children attribute,
/// which is how a menu item's nested `AXMenu` is discovered. Depth is
/// whatever the live application exposes.
pub fn parse_tree<S: AccessibilityService>(
    service: &S,
    element: &S::Element,
) -> Vec<MenuNode<S::Element>> {
    let children = match service.children(element) {
        Ok(children) => children,
        Err(err) => {
            trace!(error = %err, "children unavailable");
            return Vec::new();
        }
    };

    children
        .into_iter()
        .map(|child| read_node(service, child))
        .collect()
}

fn read_node<S: AccessibilityService>(service: &S, child: S::Element) -> MenuNode<S::Element> {
    let title = service.string_attribute(&child, AX_TITLE).unwrap_or_default();
    let role = service
        .string_attribute(&child, AX_ROLE)
        .map(|r| Role::from_ax(&r))
        .unwrap_or_default();
    let enabled = service.bool_attribute(&child, AX_ENABLED).unwrap_or(false);
    let key_equivalent = service
        .string_attribute(&child, AX_MENU_ITEM_CMD_CHAR)
        .unwrap_or_default();
    let key_equivalent_modifiers = service
        .integer_attribute(&child, AX_MENU_ITEM_CMD_MODIFIERS)
        .map(ModifierSet::from_menu_item_modifiers)
        .unwrap_or_default();

    let children = parse_tree(service, &child);

    MenuNode::new(
        title,
        role,
        child,
        children,
        enabled,
        key_equivalent,
        key_equivalent_modifiers,
    )
}

fn app_name(app: &FrontmostApp) -> &str {
    app.name.as_deref().unwrap_or("Unknown")
}
