//! NSMenu presenter.
//!
//! Mirrors a [`PresentedMenu`] into a fresh NSMenu tree and pops it up at
//! the mouse location. Every row gets a tag indexing a per-presentation
//! table; `validateMenuItem:` and `menuItemClicked:` on the controller
//! look the tag up there.

use std::cell::{Cell, RefCell};

use tracing::{debug, trace};

use crate::handlers::MenuPresenter;
use crate::menu::{MenuEntry, PresentedItem, PresentedMenu};
use crate::platform::macos::ffi::accessibility::AxElement;
use crate::platform::macos::ffi::bridge::{
    autorelease, get_class, id, msg_send, nil, nsstring_id, release, sel, AnyObject, Bool, NSPoint,
    Sel, NO, YES,
};
use crate::platform::macos::ui::alert::show_permission_alert;

thread_local! {
    /// Validation result per tag for the menu currently on screen.
    static ROW_ENABLED: RefCell<Vec<bool>> = const { RefCell::new(Vec::new()) };
    /// Tag of the row chosen during the current presentation.
    static SELECTED_TAG: Cell<Option<usize>> = const { Cell::new(None) };
}

/// Presents menus on behalf of the trigger pipeline.
pub struct NsMenuPresenter {
    /// Target for row actions and validation (the app controller).
    target: id,
}

impl NsMenuPresenter {
    /// # Safety
    /// `target` must be a live controller that outlives the presenter.
    pub unsafe fn new(target: id) -> Self {
        Self { target }
    }
}

/// Build one NSMenu level, appending every row to `rows` in tag order.
///
/// # Safety
/// Must be called from main thread with valid autorelease pool.
unsafe fn build_ns_menu<'m>(
    menu: &'m PresentedMenu<AxElement>,
    target: id,
    rows: &mut Vec<&'m PresentedItem<AxElement>>,
) -> id {
    let ns_menu: id = msg_send![get_class("NSMenu"), alloc];
    let ns_menu: id = msg_send![ns_menu, initWithTitle: nsstring_id("")];
    let _: () = msg_send![ns_menu, setAutoenablesItems: YES];

    for entry in menu.entries() {
        let item: id = match entry {
            MenuEntry::Separator => msg_send![get_class("NSMenuItem"), separatorItem],
            MenuEntry::Item(row) => {
                let tag = rows.len();
                rows.push(row);
                build_ns_item(row, tag, target, rows)
            }
        };
        let _: () = msg_send![ns_menu, addItem: item];
    }
    ns_menu
}

unsafe fn build_ns_item<'m>(
    row: &'m PresentedItem<AxElement>,
    tag: usize,
    target: id,
    rows: &mut Vec<&'m PresentedItem<AxElement>>,
) -> id {
    let action: Option<Sel> = row.element().map(|_| sel!(menuItemClicked:));
    let item: id = msg_send![get_class("NSMenuItem"), alloc];
    let item: id = msg_send![
        item,
        initWithTitle: nsstring_id(&row.title),
        action: action,
        keyEquivalent: nsstring_id(&row.key_equivalent)
    ];
    if !row.key_equivalent.is_empty() {
        let _: () = msg_send![item, setKeyEquivalentModifierMask: row.modifiers.bits() as usize];
    }
    let _: () = msg_send![item, setTag: tag as isize];
    if action.is_some() {
        let _: () = msg_send![item, setTarget: target];
    }
    if let Some(submenu) = row.submenu() {
        let ns_submenu = build_ns_menu(submenu, target, rows);
        let _: () = msg_send![ns_submenu, setTitle: nsstring_id(&row.title)];
        let _: () = msg_send![item, setSubmenu: ns_submenu];
        release(ns_submenu);
    }
    autorelease(item)
}

impl MenuPresenter<AxElement> for NsMenuPresenter {
    fn show_permission_alert(&mut self) {
        unsafe { show_permission_alert() };
    }

    fn present<'m>(
        &mut self,
        menu: &'m PresentedMenu<AxElement>,
    ) -> Option<&'m PresentedItem<AxElement>> {
        if menu.is_empty() {
            debug!("menu bar has no presentable items");
            return None;
        }
        let mut rows = Vec::new();
        let selected = unsafe {
            let ns_menu = build_ns_menu(menu, self.target, &mut rows);
            ROW_ENABLED.with(|r| *r.borrow_mut() = rows.iter().map(|row| row.validate()).collect());
            SELECTED_TAG.with(|s| s.set(None));

            let location: NSPoint = msg_send![get_class("NSEvent"), mouseLocation];
            trace!(x = location.x, y = location.y, rows = rows.len(), "presenting menu");
            let _: Bool = msg_send![
                ns_menu,
                popUpMenuPositioningItem: nil,
                atLocation: location,
                inView: nil
            ];
            release(ns_menu);

            ROW_ENABLED.with(|r| r.borrow_mut().clear());
            SELECTED_TAG.with(|s| s.take())
        };
        selected
            .and_then(|tag| rows.get(tag).copied())
            .filter(|row| row.element().is_some())
    }
}

/// `menuItemClicked:`: remember the chosen row. Activation happens
/// after the menu has closed.
pub(crate) unsafe extern "C-unwind" fn menu_item_clicked(
    _this: &mut AnyObject,
    _cmd: Sel,
    sender: id,
) {
    if sender == nil {
        return;
    }
    let tag: isize = msg_send![sender, tag];
    if let Ok(tag) = usize::try_from(tag) {
        SELECTED_TAG.with(|s| s.set(Some(tag)));
    }
}

/// `validateMenuItem:`: separators and submenu rows are always enabled.
pub(crate) unsafe extern "C-unwind" fn validate_menu_item(
    _this: &mut AnyObject,
    _cmd: Sel,
    item: id,
) -> Bool {
    if item == nil {
        return NO;
    }
    let is_separator: Bool = msg_send![item, isSeparatorItem];
    let has_submenu: Bool = msg_send![item, hasSubmenu];
    if is_separator.as_bool() || has_submenu.as_bool() {
        return YES;
    }
    let tag: isize = msg_send![item, tag];
    let enabled = usize::try_from(tag)
        .ok()
        .and_then(|tag| ROW_ENABLED.with(|r| r.borrow().get(tag).copied()))
        .unwrap_or(false);
    Bool::new(enabled)
}
