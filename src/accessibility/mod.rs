//! Accessibility tree access.
//!
//! The OS accessibility service is modelled as a pair of traits so that the
//! tree reader can run against the real AXUIElement API on macOS and
//! against in-memory fixtures in tests.
//!
//! - [`AccessibilityService`]: query-by-attribute and perform-action
//! - [`PermissionGate`]: side-effect-free trust check
//! - [`reader`]: builds a [`MenuForest`](crate::model::MenuForest) from the
//!   frontmost application's menu bar

pub mod reader;

pub use reader::{fetch_frontmost_menu_bar, parse_tree};

use crate::error::AxError;

/// The frontmost application, as reported by the window server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontmostApp {
    pub pid: i32,
    pub name: Option<String>,
}

/// Attribute-level access to another process's accessibility hierarchy.
///
/// `Element` is a cheap, cloneable, non-owning handle to a live element.
/// Every method is a synchronous round-trip to the target process.
pub trait AccessibilityService {
    type Element: Clone;

    fn frontmost_application(&self) -> Option<FrontmostApp>;

    /// The `AXMenuBar` element of an application.
    fn menu_bar(&self, app: &FrontmostApp) -> Result<Self::Element, AxError>;

    /// The `AXChildren` of an element, in order.
    fn children(&self, element: &Self::Element) -> Result<Vec<Self::Element>, AxError>;

    fn string_attribute(
        &self,
        element: &Self::Element,
        attribute: &'static str,
    ) -> Result<String, AxError>;

    fn bool_attribute(
        &self,
        element: &Self::Element,
        attribute: &'static str,
    ) -> Result<bool, AxError>;

    fn integer_attribute(
        &self,
        element: &Self::Element,
        attribute: &'static str,
    ) -> Result<i64, AxError>;

    /// Perform `AXPress` on an element.
    fn press(&self, element: &Self::Element) -> Result<(), AxError>;
}

/// OS-level accessibility trust status.
pub trait PermissionGate {
    /// Whether this process may query other processes' accessibility trees.
    fn is_trusted(&self) -> bool;
}
