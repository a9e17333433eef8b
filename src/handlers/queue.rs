//! Ordering rules for a drained batch of bus events.
//!
//! - only one trigger runs per batch; triggers queued behind it, or
//!   published while its menu was on screen, are stale and dropped
//! - a re-arm request followed by the same request later in the queue is
//!   skipped, the later copy covers it
//! - everything else keeps its arrival order

use std::collections::VecDeque;

use tracing::debug;

use crate::events::AppEvent;

/// Pending events for one dispatcher tick.
#[derive(Debug, Default)]
pub struct DispatchQueue {
    pending: VecDeque<AppEvent>,
}

impl DispatchQueue {
    pub fn new(events: impl IntoIterator<Item = AppEvent>) -> Self {
        Self {
            pending: events.into_iter().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Next event to handle, skipping re-arm requests that are queued again later.
    pub fn next_event(&mut self) -> Option<AppEvent> {
        while let Some(event) = self.pending.pop_front() {
            if event.requires_rearm() && self.pending.contains(&event) {
                continue;
            }
            return Some(event);
        }
        None
    }

    /// Call once a trigger has run. `late` holds what was published while
    /// it ran. Returns how many triggers were dropped.
    pub fn trigger_finished(&mut self, late: impl IntoIterator<Item = AppEvent>) -> usize {
        self.pending.extend(late);
        let before = self.pending.len();
        self.pending.retain(|event| !event.is_trigger());
        let dropped = before - self.pending.len();
        if dropped > 0 {
            debug!(dropped, "discarded triggers queued during presentation");
        }
        dropped
    }
}

/// The events a tick handles for `events`, in order, assuming nothing is
/// published while a trigger runs.
pub fn plan_dispatch(events: impl IntoIterator<Item = AppEvent>) -> Vec<AppEvent> {
    let mut queue = DispatchQueue::new(events);
    let mut plan = Vec::new();
    while let Some(event) = queue.next_event() {
        if event.is_trigger() {
            queue.trigger_finished(std::iter::empty::<AppEvent>());
        }
        plan.push(event);
    }
    plan
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::TriggerSource;

    const SHORTCUT: AppEvent = AppEvent::TriggerRequested(TriggerSource::Shortcut);
    const CLICK: AppEvent = AppEvent::TriggerRequested(TriggerSource::ModifierClick);

    #[test]
    fn test_queued_triggers_run_once() {
        assert_eq!(plan_dispatch([SHORTCUT, SHORTCUT]), vec![SHORTCUT]);
        assert_eq!(plan_dispatch([CLICK, SHORTCUT, CLICK]), vec![CLICK]);
    }

    #[test]
    fn test_repeated_settings_change_rearms_once() {
        assert_eq!(
            plan_dispatch([AppEvent::SettingsChanged, AppEvent::SettingsChanged]),
            vec![AppEvent::SettingsChanged]
        );
    }

    #[test]
    fn test_reinstall_behind_trigger_survives() {
        assert_eq!(
            plan_dispatch([SHORTCUT, SHORTCUT, AppEvent::ReinstallTap]),
            vec![SHORTCUT, AppEvent::ReinstallTap]
        );
    }

    #[test]
    fn test_distinct_rearm_requests_are_both_kept() {
        assert_eq!(
            plan_dispatch([
                AppEvent::ReinstallTap,
                AppEvent::SettingsChanged,
                AppEvent::ReinstallTap,
            ]),
            vec![AppEvent::SettingsChanged, AppEvent::ReinstallTap]
        );
    }

    #[test]
    fn test_terminating_is_never_coalesced() {
        assert_eq!(
            plan_dispatch([AppEvent::Terminating, AppEvent::Terminating]),
            vec![AppEvent::Terminating, AppEvent::Terminating]
        );
    }

    #[test]
    fn test_late_triggers_are_dropped_after_a_run() {
        let mut queue = DispatchQueue::new([SHORTCUT]);
        assert_eq!(queue.next_event(), Some(SHORTCUT));

        let dropped = queue.trigger_finished([CLICK, AppEvent::SettingsChanged, SHORTCUT]);
        assert_eq!(dropped, 2);
        assert_eq!(queue.next_event(), Some(AppEvent::SettingsChanged));
        assert_eq!(queue.next_event(), None);
        assert!(queue.is_empty());
    }
}
