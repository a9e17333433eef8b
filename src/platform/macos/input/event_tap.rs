//! CGEventTap host.
//!
//! Installs a session-level, head-inserted filtering tap on the main run
//! loop. Consumed events are rewritten to `CGEventType::Null`, which the
//! window server drops.

use core_foundation::base::TCFType;
use core_foundation::runloop::{kCFRunLoopCommonModes, CFRunLoop, CFRunLoopSource};
use core_foundation_sys::mach_port::CFMachPortInvalidate;
use core_graphics::event::{
    CGEvent, CGEventTap, CGEventTapLocation, CGEventTapOptions, CGEventTapPlacement, CGEventType,
    EventField,
};
use tracing::debug;

use crate::error::TapError;
use crate::interceptor::{EventTapHost, TapHandler};
use crate::model::{InputEvent, ModifierSet, TapDecision, TapKind};

/// A live tap and its run-loop registration.
pub struct InstalledTap {
    kind: TapKind,
    tap: CGEventTap<'static>,
    source: CFRunLoopSource,
    run_loop: CFRunLoop,
}

/// Event tap host bound to the current (main) run loop.
#[derive(Debug, Default)]
pub struct CgEventTapHost;

impl CgEventTapHost {
    pub fn new() -> Self {
        Self
    }
}

fn event_types(kind: TapKind) -> Vec<CGEventType> {
    match kind {
        TapKind::Keyboard => vec![CGEventType::KeyDown],
        TapKind::Mouse => vec![CGEventType::RightMouseDown],
    }
}

/// Normalise a raw tap event for the classifier.
fn translate(kind: TapKind, event_type: CGEventType, event: &CGEvent) -> InputEvent {
    match (kind, event_type) {
        (_, CGEventType::TapDisabledByTimeout | CGEventType::TapDisabledByUserInput) => {
            InputEvent::TapDisabled
        }
        (TapKind::Keyboard, CGEventType::KeyDown) => InputEvent::KeyDown {
            key_code: event.get_integer_value_field(EventField::KEYBOARD_EVENT_KEYCODE) as u16,
            modifiers: ModifierSet::from_event_flags(event.get_flags().bits()),
        },
        (TapKind::Mouse, CGEventType::RightMouseDown) => InputEvent::RightMouseDown {
            modifiers: ModifierSet::from_event_flags(event.get_flags().bits()),
        },
        _ => InputEvent::Other,
    }
}

impl EventTapHost for CgEventTapHost {
    type Tap = InstalledTap;

    fn install(&mut self, kind: TapKind, handler: TapHandler) -> Result<InstalledTap, TapError> {
        let tap = CGEventTap::new(
            CGEventTapLocation::Session,
            CGEventTapPlacement::HeadInsertEventTap,
            CGEventTapOptions::Default,
            event_types(kind),
            move |_proxy, event_type, event| {
                let input = translate(kind, event_type, event);
                match handler(&input) {
                    TapDecision::PassThrough => None,
                    TapDecision::Consume => {
                        let consumed = event.clone();
                        consumed.set_type(CGEventType::Null);
                        Some(consumed)
                    }
                }
            },
        )
        .map_err(|_| TapError::Creation { kind })?;

        let source = tap
            .mach_port
            .create_runloop_source(0)
            .map_err(|_| TapError::RunLoopSource { kind })?;
        let run_loop = CFRunLoop::get_current();
        unsafe {
            run_loop.add_source(&source, kCFRunLoopCommonModes);
        }
        tap.enable();
        debug!(%kind, "event tap installed");

        Ok(InstalledTap {
            kind,
            tap,
            source,
            run_loop,
        })
    }

    fn remove(&mut self, installed: InstalledTap) {
        let InstalledTap {
            kind,
            tap,
            source,
            run_loop,
        } = installed;
        unsafe {
            CFMachPortInvalidate(tap.mach_port.as_concrete_TypeRef());
            run_loop.remove_source(&source, kCFRunLoopCommonModes);
        }
        drop(tap);
        debug!(%kind, "event tap released");
    }
}
