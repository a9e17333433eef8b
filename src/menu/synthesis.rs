//! Conversion of a [`MenuNode`] forest into a presentable menu.
//!
//! The result is a plain tree of [`MenuEntry`] values that a platform
//! presenter turns into native menu objects. Leaf items keep a clone of the
//! originating element handle so the press can be replayed on the live
//! element.

use crate::model::{MenuNode, ModifierSet, Role};

/// A transient menu ready to be shown.
#[derive(Debug, Clone, PartialEq)]
pub struct PresentedMenu<E> {
    entries: Vec<MenuEntry<E>>,
}

/// One row of a presented menu.
#[derive(Debug, Clone, PartialEq)]
pub enum MenuEntry<E> {
    Separator,
    Item(PresentedItem<E>),
}

/// A labelled row.
#[derive(Debug, Clone, PartialEq)]
pub struct PresentedItem<E> {
    pub title: String,
    /// Lower-cased key equivalent, display only.
    pub key_equivalent: String,
    /// Key equivalent modifiers, display only.
    pub modifiers: ModifierSet,
    /// `enabled` flag of the originating node.
    pub enabled: bool,
    pub action: ItemAction<E>,
}

/// What selecting a row does.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemAction<E> {
    /// Opens a nested menu; the row itself has no activation.
    Submenu(PresentedMenu<E>),
    /// Replays `AXPress` on the original element.
    Press(E),
    /// Top-level bar item without a menu. Rendered, never clickable.
    Inert,
}

impl<E> PresentedMenu<E> {
    pub fn entries(&self) -> &[MenuEntry<E>] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Labelled rows only, in order.
    pub fn items(&self) -> impl Iterator<Item = &PresentedItem<E>> {
        self.entries.iter().filter_map(|e| match e {
            MenuEntry::Item(item) => Some(item),
            MenuEntry::Separator => None,
        })
    }

    /// Find a row by title path, e.g. `["File", "Open Recent", "a.txt"]`.
    pub fn find(&self, path: &[&str]) -> Option<&PresentedItem<E>> {
        let (first, rest) = path.split_first()?;
        let item = self.items().find(|i| i.title == *first)?;
        if rest.is_empty() {
            return Some(item);
        }
        match &item.action {
            ItemAction::Submenu(sub) => sub.find(rest),
            _ => None,
        }
    }
}

impl<E> MenuEntry<E> {
    /// Validation pass run by the host menu before showing each row.
    ///
    /// Separators and submenu openers are always enabled, leaf items follow
    /// their node's flag and inert top-level rows are disabled. This only
    /// controls graying and clickability; every row stays visible.
    pub fn validate(&self) -> bool {
        match self {
            MenuEntry::Separator => true,
            MenuEntry::Item(item) => item.validate(),
        }
    }
}

impl<E> PresentedItem<E> {
    pub fn validate(&self) -> bool {
        match self.action {
            ItemAction::Submenu(_) => true,
            ItemAction::Press(_) => self.enabled,
            ItemAction::Inert => false,
        }
    }

    pub fn has_submenu(&self) -> bool {
        matches!(self.action, ItemAction::Submenu(_))
    }

    pub fn submenu(&self) -> Option<&PresentedMenu<E>> {
        match &self.action {
            ItemAction::Submenu(sub) => Some(sub),
            _ => None,
        }
    }

    /// Element to press, for leaf rows.
    pub fn element(&self) -> Option<&E> {
        match &self.action {
            ItemAction::Press(element) => Some(element),
            _ => None,
        }
    }
}

/// Build the root menu from a menu-bar forest.
///
/// Only `MenuBarItem` nodes with a title become rows. A bar item whose
/// children contain a `Menu` gets that menu's children as its submenu;
/// one without stays visible as an inert row.
pub fn build_menu_bar<E: Clone>(forest: &[MenuNode<E>]) -> PresentedMenu<E> {
    let entries = forest
        .iter()
        .filter(|node| *node.role() == Role::MenuBarItem && !node.title().is_empty())
        .map(|node| {
            let action = match node.submenu() {
                Some(menu) => ItemAction::Submenu(build_menu(menu.children())),
                None => ItemAction::Inert,
            };
            MenuEntry::Item(PresentedItem {
                title: node.title().to_string(),
                key_equivalent: String::new(),
                modifiers: ModifierSet::EMPTY,
                enabled: node.is_enabled(),
                action,
            })
        })
        .collect();
    PresentedMenu { entries }
}

/// Build a menu from the children of an `AXMenu`.
///
/// Only `MenuItem` nodes are rendered. Untitled items become separators;
/// an item with a `Menu` child opens that menu's children as a submenu,
/// every other item presses its element.
pub fn build_menu<E: Clone>(nodes: &[MenuNode<E>]) -> PresentedMenu<E> {
    let entries = nodes
        .iter()
        .filter(|node| *node.role() == Role::MenuItem)
        .map(|node| {
            if node.is_separator() {
                return MenuEntry::Separator;
            }
            let action = match node.submenu() {
                Some(menu) => ItemAction::Submenu(build_menu(menu.children())),
                None => ItemAction::Press(node.element().clone()),
            };
            MenuEntry::Item(PresentedItem {
                title: node.title().to_string(),
                key_equivalent: node.key_equivalent().to_lowercase(),
                modifiers: node.key_equivalent_modifiers(),
                enabled: node.is_enabled(),
                action,
            })
        })
        .collect();
    PresentedMenu { entries }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(
        title: &str,
        role: Role,
        element: u32,
        enabled: bool,
        children: Vec<MenuNode<u32>>,
    ) -> MenuNode<u32> {
        MenuNode::new(
            title.to_string(),
            role,
            element,
            children,
            enabled,
            String::new(),
            ModifierSet::EMPTY,
        )
    }

    #[test]
    fn test_non_menu_item_children_are_skipped() {
        let nodes = vec![
            node("Copy", Role::MenuItem, 1, true, vec![]),
            node("label", Role::Other("AXStaticText".into()), 2, true, vec![]),
        ];
        let menu = build_menu(&nodes);
        assert_eq!(menu.len(), 1);
    }

    #[test]
    fn test_key_equivalent_is_lowercased() {
        let item = MenuNode::new(
            "Save As…".to_string(),
            Role::MenuItem,
            7,
            Vec::new(),
            true,
            "S".to_string(),
            ModifierSet::COMMAND | ModifierSet::SHIFT,
        );
        let menu = build_menu(&[item]);
        let row = menu.items().next().expect("one row");
        assert_eq!(row.key_equivalent, "s");
        assert_eq!(row.modifiers, ModifierSet::COMMAND | ModifierSet::SHIFT);
        assert_eq!(row.element(), Some(&7));
    }

    #[test]
    fn test_submenu_uses_menu_children_not_menu_node() {
        let inner = node(
            "",
            Role::Menu,
            10,
            true,
            vec![node("a.txt", Role::MenuItem, 11, true, vec![])],
        );
        let opener = node("Open Recent", Role::MenuItem, 9, false, vec![inner]);
        let menu = build_menu(&[opener]);
        let row = menu.items().next().expect("one row");
        assert!(row.has_submenu());
        assert!(row.element().is_none());
        // Submenu openers validate even if the node itself is disabled.
        assert!(row.validate());
        let sub = row.submenu().expect("submenu");
        assert_eq!(sub.find(&["a.txt"]).and_then(|i| i.element()), Some(&11));
    }

    #[test]
    fn test_bar_items_filtered_by_role_and_title() {
        let forest = vec![
            node("", Role::MenuBarItem, 1, true, vec![]),
            node("Apple", Role::Other("AXMenuBarItemApple".into()), 2, true, vec![]),
            node("File", Role::MenuBarItem, 3, true, vec![node("", Role::Menu, 4, true, vec![])]),
        ];
        let menu = build_menu_bar(&forest);
        assert_eq!(menu.len(), 1);
        assert!(menu.find(&["File"]).is_some_and(|i| i.has_submenu()));
    }

    #[test]
    fn test_bar_item_without_menu_is_inert_and_disabled() {
        let forest = vec![node("Help", Role::MenuBarItem, 1, true, vec![])];
        let menu = build_menu_bar(&forest);
        let row = menu.find(&["Help"]).expect("row");
        assert_eq!(row.action, ItemAction::Inert);
        assert!(!row.validate());
    }

    #[test]
    fn test_separator_always_validates() {
        let entry: MenuEntry<u32> = MenuEntry::Separator;
        assert!(entry.validate());
    }
}
