//! Global access to the application event bus.
//!
//! The bus must be initialized once at application startup via
//! `init_event_bus()`; after that any module (observers, the event-tap
//! callback) can publish with `publish()` or hold a `publisher()`.
//!
//! - `Sender` is stored in `OnceLock` - it's `Send + Sync`
//! - `Receiver` is stored in `Mutex` - only drained from the main thread

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Mutex, OnceLock};

use super::bus::EventPublisher;
use super::types::AppEvent;

static SENDER: OnceLock<Sender<AppEvent>> = OnceLock::new();

static RECEIVER: OnceLock<Mutex<Receiver<AppEvent>>> = OnceLock::new();

/// Initialize the global event bus.
///
/// # Panics
///
/// Panics if the event bus has already been initialized.
pub fn init_event_bus() {
    let (sender, receiver) = mpsc::channel();

    SENDER
        .set(sender)
        .expect("Event bus already initialized (sender)");

    RECEIVER
        .set(Mutex::new(receiver))
        .expect("Event bus already initialized (receiver)");
}

/// Get a publisher handle for the global event bus.
///
/// # Panics
///
/// Panics if `init_event_bus()` has not been called.
pub fn publisher() -> EventPublisher {
    let sender = SENDER
        .get()
        .expect("Event bus not initialized - call init_event_bus() first");

    EventPublisher::from_sender(sender.clone())
}

/// Publish an event to the global event bus.
///
/// Events published before `init_event_bus()` are dropped.
pub fn publish(event: AppEvent) {
    if let Some(sender) = SENDER.get() {
        let _ = sender.send(event);
    }
}

/// Take the next pending event, if any.
pub fn take_event() -> Option<AppEvent> {
    let receiver = RECEIVER.get()?;
    let receiver = receiver.lock().ok()?;
    receiver.try_recv().ok()
}

/// Drain all pending events from the global event bus.
pub fn drain_events() -> Vec<AppEvent> {
    let mut events = Vec::new();
    while let Some(event) = take_event() {
        events.push(event);
    }
    events
}
