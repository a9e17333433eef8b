//! Snapshot of a foreign application's menu tree (pure Rust, no FFI).
//!
//! A [`MenuNode`] tree is built once per trigger, consumed by menu
//! synthesis and then dropped. Nodes carry a handle to the live
//! accessibility element they were read from; the handle is only used to
//! replay a press and never owns the foreign object.

use super::constants::*;
use super::modifiers::ModifierSet;

/// Accessibility role of a node, as far as menu reconstruction cares.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Role {
    MenuBarItem,
    Menu,
    MenuItem,
    Other(String),
}

impl Role {
    pub fn from_ax(role: &str) -> Self {
        match role {
            AX_ROLE_MENU_BAR_ITEM => Role::MenuBarItem,
            AX_ROLE_MENU => Role::Menu,
            AX_ROLE_MENU_ITEM => Role::MenuItem,
            other => Role::Other(other.to_string()),
        }
    }

    pub fn as_ax(&self) -> &str {
        match self {
            Role::MenuBarItem => AX_ROLE_MENU_BAR_ITEM,
            Role::Menu => AX_ROLE_MENU,
            Role::MenuItem => AX_ROLE_MENU_ITEM,
            Role::Other(other) => other,
        }
    }
}

impl Default for Role {
    fn default() -> Self {
        Role::Other(AX_ROLE_UNKNOWN.to_string())
    }
}

/// Immutable snapshot of one accessibility element.
///
/// `E` is the handle type of the accessibility service the tree was read
/// from. Children are exclusively owned by their parent.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuNode<E> {
    title: String,
    role: Role,
    element: E,
    children: Vec<MenuNode<E>>,
    enabled: bool,
    key_equivalent: String,
    key_equivalent_modifiers: ModifierSet,
}

/// Top-level sequence produced by one traversal.
pub type MenuForest<E> = Vec<MenuNode<E>>;

impl<E> MenuNode<E> {
    pub(crate) fn new(
        title: String,
        role: Role,
        element: E,
        children: Vec<MenuNode<E>>,
        enabled: bool,
        key_equivalent: String,
        key_equivalent_modifiers: ModifierSet,
    ) -> Self {
        Self {
            title,
            role,
            element,
            children,
            enabled,
            key_equivalent,
            key_equivalent_modifiers,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn role(&self) -> &Role {
        &self.role
    }

    /// Handle to the live element, for replaying an activation.
    pub fn element(&self) -> &E {
        &self.element
    }

    pub fn children(&self) -> &[MenuNode<E>] {
        &self.children
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn key_equivalent(&self) -> &str {
        &self.key_equivalent
    }

    pub fn key_equivalent_modifiers(&self) -> ModifierSet {
        self.key_equivalent_modifiers
    }

    /// An empty title renders as a separator.
    pub fn is_separator(&self) -> bool {
        self.title.is_empty()
    }

    /// First child with role `Menu`, i.e. the nested menu this node opens.
    pub fn submenu(&self) -> Option<&MenuNode<E>> {
        self.children.iter().find(|c| c.role == Role::Menu)
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(MenuNode::node_count).sum::<usize>()
    }

    /// Depth of this subtree (a leaf has depth 1).
    pub fn depth(&self) -> usize {
        1 + self.children.iter().map(MenuNode::depth).max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(title: &str, role: Role) -> MenuNode<u32> {
        MenuNode::new(
            title.to_string(),
            role,
            0,
            Vec::new(),
            true,
            String::new(),
            ModifierSet::EMPTY,
        )
    }

    #[test]
    fn test_role_from_ax_names() {
        assert_eq!(Role::from_ax("AXMenuBarItem"), Role::MenuBarItem);
        assert_eq!(Role::from_ax("AXMenu"), Role::Menu);
        assert_eq!(Role::from_ax("AXMenuItem"), Role::MenuItem);
        assert_eq!(Role::from_ax("AXButton"), Role::Other("AXButton".into()));
        assert_eq!(Role::from_ax("AXButton").as_ax(), "AXButton");
    }

    #[test]
    fn test_default_role_is_unknown() {
        assert_eq!(Role::default().as_ax(), AX_ROLE_UNKNOWN);
    }

    #[test]
    fn test_submenu_is_first_menu_child() {
        let menu = leaf("", Role::Menu);
        let item = MenuNode::new(
            "Open Recent".to_string(),
            Role::MenuItem,
            1,
            vec![leaf("x", Role::Other("AXStaticText".into())), menu.clone()],
            true,
            String::new(),
            ModifierSet::EMPTY,
        );
        assert_eq!(item.submenu(), Some(&menu));
        assert!(leaf("Quit", Role::MenuItem).submenu().is_none());
    }

    #[test]
    fn test_separator_is_empty_title() {
        assert!(leaf("", Role::MenuItem).is_separator());
        assert!(!leaf("Copy", Role::MenuItem).is_separator());
    }

    #[test]
    fn test_node_count_and_depth() {
        let menu = MenuNode::new(
            String::new(),
            Role::Menu,
            2,
            vec![leaf("a", Role::MenuItem), leaf("b", Role::MenuItem)],
            true,
            String::new(),
            ModifierSet::EMPTY,
        );
        let bar_item = MenuNode::new(
            "File".to_string(),
            Role::MenuBarItem,
            1,
            vec![menu],
            true,
            String::new(),
            ModifierSet::EMPTY,
        );
        assert_eq!(bar_item.node_count(), 4);
        assert_eq!(bar_item.depth(), 3);
    }
}
