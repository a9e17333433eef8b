//! Error types for accessibility queries and event-tap management.

use thiserror::Error;

use crate::model::TapKind;

/// Errors reported by an accessibility service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AxError {
    /// The process is not trusted for accessibility access.
    #[error("process is not trusted for accessibility access")]
    PermissionDenied,

    /// No application is frontmost.
    #[error("no frontmost application")]
    NoFrontmostApplication,

    /// An attribute query returned an error code.
    #[error("query for {attribute} failed (AXError {code})")]
    AttributeFailed { attribute: &'static str, code: i32 },

    /// An attribute query succeeded but the value has the wrong type.
    #[error("{attribute} has an unexpected value type")]
    UnexpectedType { attribute: &'static str },

    /// Performing an action on an element failed.
    #[error("action {action} failed (AXError {code})")]
    ActionFailed { action: &'static str, code: i32 },
}

/// Errors raised while installing an event tap.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TapError {
    /// The OS refused to create the tap (usually missing permission).
    #[error("failed to create {kind} event tap")]
    Creation { kind: TapKind },

    /// The tap was created but could not be attached to the run loop.
    #[error("failed to create run loop source for {kind} event tap")]
    RunLoopSource { kind: TapKind },
}
