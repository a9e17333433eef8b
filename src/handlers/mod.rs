//! Trigger handling.
//!
//! - [`pipeline`]: the per-trigger state machine shared by every platform
//! - [`queue`]: ordering rules for a drained batch of bus events
//!
//! The platform dispatcher (see `platform::macos::handlers`) drains the
//! event bus on the main thread and feeds triggers into the pipeline.

pub mod pipeline;
pub mod queue;

pub use pipeline::{MenuPresenter, TriggerOutcome, TriggerPipeline, TriggerState};
pub use queue::{plan_dispatch, DispatchQueue};
