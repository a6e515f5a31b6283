//! Section reveal animator.
//!
//! Flips a container visible the moment it is notified, then staggers
//! its nested cards through the scheduler: card `i` reveals `i * stagger`
//! after the notification. The container flip is idempotent; the card
//! scheduling deliberately is not. Duplicate notifications append a
//! fresh schedule, restarting card transitions, and tests assert that
//! behavior as-is.

use super::scheduler::{RevealAction, RevealScheduler};
use crate::model::{CardState, Page, RevealState, SectionId};
use std::time::{Duration, Instant};

/// Reveals containers and staggers their nested cards.
#[derive(Debug)]
pub struct SectionRevealAnimator {
    stagger: Duration,
}

impl SectionRevealAnimator {
    pub fn new(stagger: Duration) -> Self {
        Self { stagger }
    }

    /// Handle a container that just became visible: immediate container
    /// flip, staggered card schedule in document order.
    pub fn reveal(
        &self,
        page: &mut Page,
        id: SectionId,
        scheduler: &mut RevealScheduler,
        now: Instant,
    ) {
        let Some(section) = page.section_mut(id) else {
            tracing::debug!("Section {} not found, skipping reveal", id);
            return;
        };

        if !section.reveal.is_revealed() {
            section.reveal = RevealState::Revealed;
        }

        for i in 0..section.cards.len() {
            scheduler.schedule_after(
                now,
                self.stagger * i as u32,
                RevealAction::RevealCard { section: id, card: i },
            );
        }
    }

    /// Execute one due action from the scheduler.
    pub fn apply(&self, page: &mut Page, action: RevealAction, now: Instant) {
        match action {
            RevealAction::RevealCard { section, card } => {
                let Some(card) = page
                    .section_mut(section)
                    .and_then(|s| s.cards.get_mut(card))
                else {
                    tracing::debug!("Card {:?} vanished before reveal", action);
                    return;
                };
                // No idempotence guard: a re-run restarts the transition.
                card.state = CardState::Revealing { since: now };
            }
        }
    }
}
