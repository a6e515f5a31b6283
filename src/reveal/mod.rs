//! Scroll-triggered reveal subsystem.
//!
//! The pipeline wires the visibility watcher to the two animators over
//! one shared scheduler: crossings from the skills group fill skill
//! bars; crossings from the general group flip sections and stagger
//! their cards. Everything runs inside one event-loop turn; the only
//! deferred work is the card stagger, held in the scheduler.

pub mod scheduler;
pub mod sections;
pub mod skill_bars;
pub mod watcher;

use crate::config::AnimationsConfig;
use crate::model::layout::{DocumentLayout, RowSpan};
use crate::model::{CardState, FillState, Page, RevealState};
use scheduler::RevealScheduler;
use sections::SectionRevealAnimator;
use skill_bars::{parse_level, SkillBarAnimator};
use std::time::{Duration, Instant};
use watcher::{VisibilityWatcher, WatchGroup};

/// The assembled reveal core: watcher, animators, scheduler.
#[derive(Debug)]
pub struct RevealPipeline {
    watcher: VisibilityWatcher,
    scheduler: RevealScheduler,
    skill_bars: SkillBarAnimator,
    sections: SectionRevealAnimator,
}

impl RevealPipeline {
    /// Construct the pipeline with explicit references to its targets:
    /// the skills container joins the skills group, every animatable
    /// section joins the general group.
    pub fn new(cfg: &AnimationsConfig, page: &Page) -> Self {
        let mut watcher = if cfg.enabled {
            VisibilityWatcher::new(cfg)
        } else {
            VisibilityWatcher::inert()
        };

        if let Some(id) = page.skills_section_id() {
            watcher.register(id, WatchGroup::Skills);
        }
        for id in page.animatable_section_ids() {
            watcher.register(id, WatchGroup::Sections);
        }
        tracing::debug!("Reveal pipeline observing {} containers", watcher.observed());

        Self {
            watcher,
            scheduler: RevealScheduler::new(),
            skill_bars: SkillBarAnimator::new(),
            sections: SectionRevealAnimator::new(Duration::from_millis(cfg.stagger_ms)),
        }
    }

    /// One event-loop turn: detect crossings, dispatch to animators,
    /// run due deferred reveals. Returns true if anything changed.
    pub fn tick(
        &mut self,
        page: &mut Page,
        viewport: RowSpan,
        layout: &DocumentLayout,
        now: Instant,
    ) -> bool {
        let mut changed = false;

        for crossing in self.watcher.observe(viewport, layout) {
            changed = true;
            match crossing.group {
                WatchGroup::Skills => {
                    self.skill_bars.animate(page, crossing.target, now);
                }
                WatchGroup::Sections => {
                    // unseen → visible-pending; the animator finishes the
                    // transition to revealed within this same turn.
                    if let Some(section) = page.section_mut(crossing.target) {
                        if section.reveal == RevealState::Unseen {
                            section.reveal = RevealState::VisiblePending;
                        }
                    }
                    self.sections
                        .reveal(page, crossing.target, &mut self.scheduler, now);
                }
            }
        }

        for action in self.scheduler.drain_due(now) {
            changed = true;
            self.sections.apply(page, action, now);
        }

        changed
    }

    /// Earliest pending deferred reveal, for event-loop pacing.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.scheduler.next_due()
    }

    /// Number of scheduled card reveals not yet executed.
    pub fn pending_reveals(&self) -> usize {
        self.scheduler.pending()
    }

    pub fn is_active(&self) -> bool {
        self.watcher.is_active()
    }

    /// Reduced-motion path: put the whole page in its final visual state
    /// with no transitions. Invalid skill levels are still skipped.
    pub fn reveal_everything(page: &mut Page) {
        for section in &mut page.sections {
            section.reveal = RevealState::Revealed;
            for card in &mut section.cards {
                card.state = CardState::Shown;
            }
            for item in &mut section.skills {
                if item.animated {
                    continue;
                }
                match parse_level(&item.level) {
                    Ok(target) => {
                        item.animated = true;
                        item.fill = FillState::Set { target };
                    }
                    Err(e) => {
                        tracing::warn!("Skipping skill '{}': {}", item.name, e);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Content;

    fn fixture() -> (Page, DocumentLayout, RevealPipeline) {
        let page = Page::from_content(&Content::default());
        let layout = DocumentLayout::of(&page);
        let pipeline = RevealPipeline::new(&AnimationsConfig::default(), &page);
        (page, layout, pipeline)
    }

    #[test]
    fn test_full_viewport_reveals_sections_and_schedules_cards() {
        let (mut page, layout, mut pipeline) = fixture();
        let viewport = RowSpan::new(0, layout.total_rows);
        let now = Instant::now();

        let changed = pipeline.tick(&mut page, viewport, &layout, now);
        assert!(changed);

        for id in page.animatable_section_ids() {
            assert!(page.section(id).unwrap().reveal.is_revealed());
        }
        // Cards with zero delay were applied within the same tick; the
        // staggered remainder is still pending.
        assert!(pipeline.pending_reveals() > 0);
    }

    #[test]
    fn test_cards_apply_as_time_passes() {
        let (mut page, layout, mut pipeline) = fixture();
        let viewport = RowSpan::new(0, layout.total_rows);
        let now = Instant::now();

        pipeline.tick(&mut page, viewport, &layout, now);
        let still_pending = pipeline.pending_reveals();
        assert!(still_pending > 0);

        pipeline.tick(
            &mut page,
            viewport,
            &layout,
            now + Duration::from_millis(600),
        );
        assert_eq!(pipeline.pending_reveals(), 0);

        for section in &page.sections {
            for card in &section.cards {
                assert!(matches!(card.state, CardState::Revealing { .. }));
            }
        }
    }

    #[test]
    fn test_idle_tick_reports_no_change() {
        let (mut page, layout, mut pipeline) = fixture();
        let viewport = RowSpan::new(0, layout.total_rows);
        let now = Instant::now();

        pipeline.tick(&mut page, viewport, &layout, now);
        let later = now + Duration::from_secs(2);
        pipeline.tick(&mut page, viewport, &layout, later);

        // Everything revealed and drained; further ticks are no-ops.
        assert!(!pipeline.tick(&mut page, viewport, &layout, later + Duration::from_secs(1)));
    }

    #[test]
    fn test_disabled_config_builds_inert_pipeline() {
        let page = Page::from_content(&Content::default());
        let cfg = AnimationsConfig {
            enabled: false,
            ..Default::default()
        };
        let mut pipeline = RevealPipeline::new(&cfg, &page);
        assert!(!pipeline.is_active());

        let layout = DocumentLayout::of(&page);
        let mut page = page;
        let viewport = RowSpan::new(0, layout.total_rows);
        assert!(!pipeline.tick(&mut page, viewport, &layout, Instant::now()));
    }

    #[test]
    fn test_reveal_everything_is_transitionless() {
        let mut page = Page::from_content(&Content::default());
        RevealPipeline::reveal_everything(&mut page);

        for section in &page.sections {
            assert!(section.reveal.is_revealed());
            for card in &section.cards {
                assert_eq!(card.state, CardState::Shown);
            }
            for item in &section.skills {
                assert!(matches!(item.fill, FillState::Set { .. }));
            }
        }
    }
}
