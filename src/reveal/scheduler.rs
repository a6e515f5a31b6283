//! Deferred reveal schedule.
//!
//! Staggered card reveals are held as explicit (due-instant, action)
//! pairs and executed when the event loop ticks past their deadline.
//! Nothing here cancels: once scheduled, an action runs even if its
//! container scrolls back out of view.

use crate::model::SectionId;
use std::time::{Duration, Instant};

/// A deferred presentation mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealAction {
    RevealCard { section: SectionId, card: usize },
}

#[derive(Debug, Clone, Copy)]
struct Entry {
    due: Instant,
    /// Insertion order, to keep draining stable for equal deadlines.
    seq: u64,
    action: RevealAction,
}

/// Executes deferred actions in deadline order.
#[derive(Debug, Default)]
pub struct RevealScheduler {
    entries: Vec<Entry>,
    next_seq: u64,
}

impl RevealScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `action` to run `delay` after `now`.
    pub fn schedule_after(&mut self, now: Instant, delay: Duration, action: RevealAction) {
        self.entries.push(Entry {
            due: now + delay,
            seq: self.next_seq,
            action,
        });
        self.next_seq += 1;
    }

    /// Remove and return every action due at or before `now`, ordered by
    /// deadline (insertion order breaks ties).
    pub fn drain_due(&mut self, now: Instant) -> Vec<RevealAction> {
        let mut due: Vec<Entry> = Vec::new();
        let mut i = 0;
        while i < self.entries.len() {
            if self.entries[i].due <= now {
                due.push(self.entries.swap_remove(i));
            } else {
                i += 1;
            }
        }
        due.sort_by_key(|e| (e.due, e.seq));
        due.into_iter().map(|e| e.action).collect()
    }

    /// Earliest outstanding deadline, used to size the event-loop poll
    /// timeout.
    pub fn next_due(&self) -> Option<Instant> {
        self.entries.iter().map(|e| e.due).min()
    }

    pub fn pending(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn card(i: usize) -> RevealAction {
        RevealAction::RevealCard {
            section: 0,
            card: i,
        }
    }

    #[test]
    fn test_drain_respects_deadlines() {
        let now = Instant::now();
        let mut scheduler = RevealScheduler::new();
        scheduler.schedule_after(now, Duration::from_millis(200), card(1));
        scheduler.schedule_after(now, Duration::ZERO, card(0));

        assert_eq!(scheduler.drain_due(now), vec![card(0)]);
        assert_eq!(scheduler.pending(), 1);

        assert_eq!(
            scheduler.drain_due(now + Duration::from_millis(199)),
            Vec::<RevealAction>::new()
        );
        assert_eq!(
            scheduler.drain_due(now + Duration::from_millis(200)),
            vec![card(1)]
        );
        assert!(scheduler.is_empty());
    }

    #[test]
    fn test_drain_orders_by_deadline_then_insertion() {
        let now = Instant::now();
        let mut scheduler = RevealScheduler::new();
        scheduler.schedule_after(now, Duration::from_millis(400), card(2));
        scheduler.schedule_after(now, Duration::from_millis(200), card(1));
        scheduler.schedule_after(now, Duration::from_millis(200), card(3));
        scheduler.schedule_after(now, Duration::ZERO, card(0));

        let drained = scheduler.drain_due(now + Duration::from_secs(1));
        assert_eq!(drained, vec![card(0), card(1), card(3), card(2)]);
    }

    #[test]
    fn test_next_due_is_earliest() {
        let now = Instant::now();
        let mut scheduler = RevealScheduler::new();
        assert_eq!(scheduler.next_due(), None);

        scheduler.schedule_after(now, Duration::from_millis(400), card(1));
        scheduler.schedule_after(now, Duration::from_millis(100), card(0));
        assert_eq!(scheduler.next_due(), Some(now + Duration::from_millis(100)));
    }

    proptest! {
        /// Draining past every deadline yields all actions, in
        /// nondecreasing deadline order.
        #[test]
        fn prop_drain_is_complete_and_ordered(delays in prop::collection::vec(0u64..5_000, 0..64)) {
            let now = Instant::now();
            let mut scheduler = RevealScheduler::new();
            for (i, &ms) in delays.iter().enumerate() {
                scheduler.schedule_after(now, Duration::from_millis(ms), card(i));
            }

            let drained = scheduler.drain_due(now + Duration::from_secs(10));
            prop_assert_eq!(drained.len(), delays.len());
            prop_assert!(scheduler.is_empty());

            // Deadlines are nondecreasing across the drained sequence.
            let drained_delays: Vec<u64> = drained
                .iter()
                .map(|a| {
                    let RevealAction::RevealCard { card: i, .. } = a;
                    delays[*i]
                })
                .collect();
            for pair in drained_delays.windows(2) {
                prop_assert!(pair[0] <= pair[1]);
            }
        }
    }
}
