//! In-memory stand-ins for the OS services, shared by the integration tests.
#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::rc::Rc;

use menubar_popup::accessibility::{AccessibilityService, FrontmostApp, PermissionGate};
use menubar_popup::error::{AxError, TapError};
use menubar_popup::handlers::MenuPresenter;
use menubar_popup::interceptor::{EventTapHost, TapHandler};
use menubar_popup::menu::{PresentedItem, PresentedMenu};
use menubar_popup::model::constants::*;
use menubar_popup::model::{InputEvent, TapDecision, TapKind};

/// `kAXErrorAttributeUnsupported`
const ATTRIBUTE_UNSUPPORTED: i32 = -25205;
/// `kAXErrorCannotComplete`
const CANNOT_COMPLETE: i32 = -25204;

// === Accessibility tree fixture ===

/// One element of a fake accessibility tree. `None` attributes fail to read.
#[derive(Debug, Clone, Default)]
pub struct FakeItem {
    pub title: Option<String>,
    pub role: Option<String>,
    pub enabled: Option<bool>,
    pub cmd_char: Option<String>,
    pub cmd_modifiers: Option<i64>,
    pub children: Vec<FakeItem>,
}

impl FakeItem {
    fn with_role(role: &str) -> Self {
        Self {
            role: Some(role.to_string()),
            ..Self::default()
        }
    }

    pub fn menu(items: Vec<FakeItem>) -> Self {
        Self {
            children: items,
            ..Self::with_role(AX_ROLE_MENU)
        }
    }

    /// A top-level bar item. An empty `items` list gives an item with no menu.
    pub fn bar_item(title: &str, items: Vec<FakeItem>) -> Self {
        let children = if items.is_empty() {
            Vec::new()
        } else {
            vec![Self::menu(items)]
        };
        Self {
            title: Some(title.to_string()),
            enabled: Some(true),
            children,
            ..Self::with_role(AX_ROLE_MENU_BAR_ITEM)
        }
    }

    pub fn item(title: &str, enabled: bool) -> Self {
        Self {
            title: Some(title.to_string()),
            enabled: Some(enabled),
            ..Self::with_role(AX_ROLE_MENU_ITEM)
        }
    }

    pub fn separator() -> Self {
        Self::item("", false)
    }

    pub fn submenu(title: &str, items: Vec<FakeItem>) -> Self {
        Self {
            children: vec![Self::menu(items)],
            ..Self::item(title, true)
        }
    }

    pub fn with_shortcut(mut self, cmd_char: &str, cmd_modifiers: i64) -> Self {
        self.cmd_char = Some(cmd_char.to_string());
        self.cmd_modifiers = Some(cmd_modifiers);
        self
    }
}

/// Fake accessibility service backed by an arena of [`FakeItem`]s.
///
/// Elements are arena indices; index 0 is the menu bar.
#[derive(Debug, Default)]
pub struct FakeAx {
    nodes: Vec<FakeItem>,
    children: Vec<Vec<usize>>,
    frontmost: bool,
    has_menu_bar: bool,
    failing_presses: HashSet<usize>,
    queries: Cell<usize>,
    pressed: RefCell<Vec<usize>>,
}

impl FakeAx {
    /// A frontmost application whose menu bar holds `items`.
    pub fn with_menu_bar(items: Vec<FakeItem>) -> Self {
        let mut ax = Self {
            frontmost: true,
            has_menu_bar: true,
            ..Self::default()
        };
        ax.insert(FakeItem {
            children: items,
            ..FakeItem::with_role("AXMenuBar")
        });
        ax
    }

    /// A frontmost application that exposes no menu bar.
    pub fn without_menu_bar() -> Self {
        Self {
            frontmost: true,
            ..Self::default()
        }
    }

    /// No application is frontmost.
    pub fn without_frontmost_app() -> Self {
        Self::default()
    }

    fn insert(&mut self, item: FakeItem) -> usize {
        let index = self.nodes.len();
        let kids = item.children.clone();
        self.nodes.push(FakeItem {
            children: Vec::new(),
            ..item
        });
        self.children.push(Vec::new());
        let child_ids = kids.into_iter().map(|kid| self.insert(kid)).collect();
        self.children[index] = child_ids;
        index
    }

    /// Element index of the first node titled `title`.
    pub fn element_titled(&self, title: &str) -> Option<usize> {
        self.nodes
            .iter()
            .position(|n| n.title.as_deref() == Some(title))
    }

    /// Make `AXPress` fail on the node titled `title`.
    pub fn fail_press_on(&mut self, title: &str) {
        if let Some(index) = self.element_titled(title) {
            self.failing_presses.insert(index);
        }
    }

    pub fn query_count(&self) -> usize {
        self.queries.get()
    }

    pub fn pressed(&self) -> Vec<usize> {
        self.pressed.borrow().clone()
    }

    fn count(&self) {
        self.queries.set(self.queries.get() + 1);
    }

    fn node(&self, element: &usize) -> &FakeItem {
        &self.nodes[*element]
    }
}

fn unsupported(attribute: &'static str) -> AxError {
    AxError::AttributeFailed {
        attribute,
        code: ATTRIBUTE_UNSUPPORTED,
    }
}

impl AccessibilityService for FakeAx {
    type Element = usize;

    fn frontmost_application(&self) -> Option<FrontmostApp> {
        self.count();
        self.frontmost.then(|| FrontmostApp {
            pid: 4242,
            name: Some("Fixture".to_string()),
        })
    }

    fn menu_bar(&self, _app: &FrontmostApp) -> Result<usize, AxError> {
        self.count();
        if self.has_menu_bar {
            Ok(0)
        } else {
            Err(AxError::AttributeFailed {
                attribute: AX_MENU_BAR,
                code: CANNOT_COMPLETE,
            })
        }
    }

    fn children(&self, element: &usize) -> Result<Vec<usize>, AxError> {
        self.count();
        let kids = &self.children[*element];
        if kids.is_empty() {
            Err(unsupported(AX_CHILDREN))
        } else {
            Ok(kids.clone())
        }
    }

    fn string_attribute(&self, element: &usize, attribute: &'static str) -> Result<String, AxError> {
        self.count();
        let node = self.node(element);
        let value = match attribute {
            AX_TITLE => node.title.clone(),
            AX_ROLE => node.role.clone(),
            AX_MENU_ITEM_CMD_CHAR => node.cmd_char.clone(),
            _ => None,
        };
        value.ok_or(unsupported(attribute))
    }

    fn bool_attribute(&self, element: &usize, attribute: &'static str) -> Result<bool, AxError> {
        self.count();
        match attribute {
            AX_ENABLED => self.node(element).enabled.ok_or(unsupported(attribute)),
            _ => Err(unsupported(attribute)),
        }
    }

    fn integer_attribute(&self, element: &usize, attribute: &'static str) -> Result<i64, AxError> {
        self.count();
        match attribute {
            AX_MENU_ITEM_CMD_MODIFIERS => self
                .node(element)
                .cmd_modifiers
                .ok_or(unsupported(attribute)),
            _ => Err(unsupported(attribute)),
        }
    }

    fn press(&self, element: &usize) -> Result<(), AxError> {
        self.count();
        if self.failing_presses.contains(element) {
            return Err(AxError::ActionFailed {
                action: AX_PRESS_ACTION,
                code: CANNOT_COMPLETE,
            });
        }
        self.pressed.borrow_mut().push(*element);
        Ok(())
    }
}

pub struct FakeGate {
    pub trusted: bool,
}

impl PermissionGate for FakeGate {
    fn is_trusted(&self) -> bool {
        self.trusted
    }
}

// === Presenter ===

/// Records what it was shown and picks the row at `choose`, if any.
#[derive(Debug, Default)]
pub struct FakePresenter {
    pub choose: Option<Vec<String>>,
    pub alerts: usize,
    pub presentations: usize,
    /// Titles of the root rows of the last presented menu.
    pub last_root: Vec<String>,
}

impl FakePresenter {
    pub fn choosing(path: &[&str]) -> Self {
        Self {
            choose: Some(path.iter().map(|s| s.to_string()).collect()),
            ..Self::default()
        }
    }
}

impl<E> MenuPresenter<E> for FakePresenter {
    fn show_permission_alert(&mut self) {
        self.alerts += 1;
    }

    fn present<'m>(&mut self, menu: &'m PresentedMenu<E>) -> Option<&'m PresentedItem<E>> {
        self.presentations += 1;
        self.last_root = menu.items().map(|i| i.title.clone()).collect();
        let path = self.choose.as_ref()?;
        let path: Vec<&str> = path.iter().map(String::as_str).collect();
        menu.find(&path)
    }
}

// === Event tap host ===

/// Observable tap bookkeeping, shared so it survives the interceptor.
#[derive(Debug, Default)]
pub struct TapLedger {
    pub live: Vec<(usize, TapKind)>,
    pub installs: usize,
    pub removes: usize,
    pub max_live: usize,
}

#[derive(Default)]
pub struct FakeTapHost {
    pub ledger: Rc<RefCell<TapLedger>>,
    handlers: Vec<(usize, TapHandler)>,
    next_id: usize,
    pub refuse: Option<TapKind>,
}

impl FakeTapHost {
    pub fn new() -> (Self, Rc<RefCell<TapLedger>>) {
        let host = Self::default();
        let ledger = Rc::clone(&host.ledger);
        (host, ledger)
    }

    /// Deliver `event` to every live tap, in install order.
    pub fn deliver(&self, event: &InputEvent) -> Vec<TapDecision> {
        self.handlers.iter().map(|(_, h)| h(event)).collect()
    }
}

impl EventTapHost for FakeTapHost {
    type Tap = usize;

    fn install(&mut self, kind: TapKind, handler: TapHandler) -> Result<usize, TapError> {
        if self.refuse == Some(kind) {
            return Err(TapError::Creation { kind });
        }
        self.next_id += 1;
        let id = self.next_id;
        self.handlers.push((id, handler));
        let mut ledger = self.ledger.borrow_mut();
        ledger.live.push((id, kind));
        ledger.installs += 1;
        ledger.max_live = ledger.max_live.max(ledger.live.len());
        Ok(id)
    }

    fn remove(&mut self, tap: usize) {
        self.handlers.retain(|(id, _)| *id != tap);
        let mut ledger = self.ledger.borrow_mut();
        ledger.live.retain(|(id, _)| *id != tap);
        ledger.removes += 1;
    }
}
