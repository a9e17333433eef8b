//! Tests for single-tap ownership across arm, re-arm and teardown.

mod support;

use std::time::{Duration, Instant};

use menubar_popup::events::{AppEvent, EventBus, TriggerSource};
use menubar_popup::interceptor::{ArmRetry, Interceptor};
use menubar_popup::model::constants::*;
use menubar_popup::model::{InputEvent, ModifierSet, TapDecision, TapKind, TriggerMode, TriggerSettings};
use menubar_popup::TapError;

use support::FakeTapHost;

fn click_mode() -> TriggerSettings {
    TriggerSettings {
        mode: TriggerMode::ClickModifier,
        ..TriggerSettings::default()
    }
}

#[test]
fn disarm_without_tap_is_a_no_op() {
    let bus = EventBus::new();
    let (host, ledger) = FakeTapHost::new();
    let mut interceptor = Interceptor::new(host, bus.publisher());
    interceptor.disarm();
    interceptor.disarm();
    assert!(!interceptor.is_armed());
    assert_eq!(ledger.borrow().removes, 0);
}

#[test]
fn disarm_twice_releases_once() {
    let bus = EventBus::new();
    let (host, ledger) = FakeTapHost::new();
    let mut interceptor = Interceptor::new(host, bus.publisher());
    interceptor.arm(&TriggerSettings::default()).unwrap();
    interceptor.disarm();
    interceptor.disarm();
    let ledger = ledger.borrow();
    assert_eq!(ledger.removes, 1);
    assert!(ledger.live.is_empty());
}

#[test]
fn mode_switch_leaves_exactly_one_tap_of_new_kind() {
    let bus = EventBus::new();
    let (host, ledger) = FakeTapHost::new();
    let mut interceptor = Interceptor::new(host, bus.publisher());

    interceptor.arm(&TriggerSettings::default()).unwrap();
    assert_eq!(interceptor.active_kind(), Some(TapKind::Keyboard));
    interceptor.arm(&click_mode()).unwrap();
    assert_eq!(interceptor.active_kind(), Some(TapKind::Mouse));

    let ledger = ledger.borrow();
    assert_eq!(ledger.live.len(), 1);
    assert_eq!(ledger.live[0].1, TapKind::Mouse);
    assert_eq!(ledger.max_live, 1, "old tap must be released before the new one");
}

#[test]
fn repeated_rearm_never_overlaps() {
    let bus = EventBus::new();
    let (host, ledger) = FakeTapHost::new();
    let mut interceptor = Interceptor::new(host, bus.publisher());
    for i in 0..10 {
        let settings = if i % 2 == 0 {
            TriggerSettings::default()
        } else {
            click_mode()
        };
        interceptor.arm(&settings).unwrap();
    }
    let ledger = ledger.borrow();
    assert_eq!(ledger.installs, 10);
    assert_eq!(ledger.removes, 9);
    assert_eq!(ledger.max_live, 1);
}

#[test]
fn failed_install_leaves_nothing_armed() {
    let bus = EventBus::new();
    let (mut host, ledger) = FakeTapHost::new();
    host.refuse = Some(TapKind::Mouse);
    let mut interceptor = Interceptor::new(host, bus.publisher());

    interceptor.arm(&TriggerSettings::default()).unwrap();
    let err = interceptor.arm(&click_mode()).unwrap_err();
    assert_eq!(err, TapError::Creation { kind: TapKind::Mouse });
    assert!(!interceptor.is_armed());
    assert!(ledger.borrow().live.is_empty());
}

#[test]
fn dropping_the_interceptor_releases_its_tap() {
    let bus = EventBus::new();
    let (host, ledger) = FakeTapHost::new();
    {
        let mut interceptor = Interceptor::new(host, bus.publisher());
        interceptor.arm(&TriggerSettings::default()).unwrap();
    }
    assert!(ledger.borrow().live.is_empty());
}

#[test]
fn armed_tap_publishes_one_trigger_per_match() {
    let bus = EventBus::new();
    let (host, _ledger) = FakeTapHost::new();
    let mut interceptor = Interceptor::new(host, bus.publisher());
    interceptor.arm(&TriggerSettings::default()).unwrap();

    let hit = InputEvent::KeyDown {
        key_code: KEY_CODE_R,
        modifiers: DEFAULT_SHORTCUT_MODIFIERS,
    };
    let miss = InputEvent::KeyDown {
        key_code: KEY_CODE_R,
        modifiers: ModifierSet::COMMAND,
    };
    assert_eq!(interceptor.host().deliver(&hit), vec![TapDecision::Consume]);
    assert_eq!(interceptor.host().deliver(&miss), vec![TapDecision::PassThrough]);
    assert_eq!(
        bus.drain(),
        vec![AppEvent::TriggerRequested(TriggerSource::Shortcut)]
    );
}

#[test]
fn new_settings_take_effect_only_after_rearm() {
    let bus = EventBus::new();
    let (host, _ledger) = FakeTapHost::new();
    let mut interceptor = Interceptor::new(host, bus.publisher());
    interceptor.arm(&TriggerSettings::default()).unwrap();

    let click = InputEvent::RightMouseDown {
        modifiers: DEFAULT_CLICK_MODIFIERS,
    };
    assert_eq!(interceptor.host().deliver(&click), vec![TapDecision::PassThrough]);

    assert!(interceptor.rearm(&click_mode()).unwrap());
    assert_eq!(interceptor.host().deliver(&click), vec![TapDecision::Consume]);
    assert_eq!(
        bus.drain(),
        vec![AppEvent::TriggerRequested(TriggerSource::ModifierClick)]
    );
}

#[test]
fn missing_tap_is_installed_once_trust_is_granted() {
    let bus = EventBus::new();
    let (mut host, ledger) = FakeTapHost::new();
    host.refuse = Some(TapKind::Keyboard);
    let mut interceptor = Interceptor::new(host, bus.publisher());
    let settings = TriggerSettings::default();
    let mut retry = ArmRetry::new(ARM_RETRY_INTERVAL);
    let start = Instant::now();

    // First launch: not trusted yet, creation refused.
    assert!(interceptor.arm(&settings).is_err());
    assert!(!interceptor.arm_if_due(&settings, false, &mut retry, start));
    assert_eq!(ledger.borrow().installs, 0);

    // Trusted, but the OS still refuses: one attempt per interval.
    assert!(!interceptor.arm_if_due(&settings, true, &mut retry, start));
    assert!(!interceptor.arm_if_due(&settings, true, &mut retry, start + Duration::from_millis(16)));

    interceptor.host_mut().refuse = None;
    assert!(!interceptor.arm_if_due(&settings, true, &mut retry, start + Duration::from_millis(32)));
    assert!(interceptor.arm_if_due(&settings, true, &mut retry, start + ARM_RETRY_INTERVAL));
    assert!(interceptor.is_armed());

    // Armed: nothing more to do.
    let later = start + ARM_RETRY_INTERVAL * 3;
    assert!(!interceptor.arm_if_due(&settings, true, &mut retry, later));
    let ledger = ledger.borrow();
    assert_eq!(ledger.installs, 1);
    assert_eq!(ledger.live.len(), 1);
}
