#![allow(unexpected_cfgs)] // Silence cfg warnings from objc macros

//! Pop up the frontmost application's menu bar as a context menu.
//!
//! Everything outside `platform` is pure Rust and runs as normal tests on
//! any host:
//!
//! - [`model`]: modifier sets, trigger settings, menu tree snapshot
//! - [`interceptor`]: single-tap ownership and event classification
//! - [`accessibility`]: service traits and the menu-bar tree reader
//! - [`menu`]: menu synthesis, validation and activation
//! - [`handlers`]: the per-trigger state machine
//! - [`events`]: event bus between the tap callback and the main thread

pub mod accessibility;
pub mod error;
pub mod events;
pub mod handlers;
pub mod interceptor;
pub mod logging;
pub mod menu;
pub mod model;
pub mod platform;

pub use error::{AxError, TapError};
pub use events::{AppEvent, EventBus, EventPublisher, TriggerSource};
pub use model::{MenuNode, ModifierSet, TriggerMode, TriggerSettings};
