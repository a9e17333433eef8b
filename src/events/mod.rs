//! Event system for decoupled inter-module communication.
//!
//! The event-tap callback runs in a latency-sensitive context and must
//! return a propagation decision immediately. It therefore only publishes
//! an [`AppEvent`]; the main-thread dispatcher drains the bus and does the
//! slow work (accessibility reads, menu presentation).
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Event tap  │     │  Settings   │     │  Observers  │
//! │  callback   │     │  observer   │     │ (wake, quit)│
//! └──────┬──────┘     └──────┬──────┘     └──────┬──────┘
//!        │ publish()         │ publish()         │ publish()
//!        ▼                   ▼                   ▼
//! ┌─────────────────────────────────────────────────────┐
//! │                     EventBus                        │
//! │                   (mpsc channel)                    │
//! └─────────────────────────┬───────────────────────────┘
//!                           │ drain()
//!                           ▼
//! ┌─────────────────────────────────────────────────────┐
//! │                    Dispatcher                       │
//! │               (main thread timer)                   │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! - [`types`]: Event definitions (`AppEvent` enum)
//! - [`bus`]: `EventBus` and `EventPublisher` types
//! - [`global`]: Static access functions

pub mod bus;
pub mod global;
pub mod types;

pub use bus::{EventBus, EventPublisher};
pub use global::{drain_events, init_event_bus, publish, publisher, take_event};
pub use types::{AppEvent, TriggerSource};
