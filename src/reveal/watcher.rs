//! Visibility watcher.
//!
//! Observes a fixed set of containers and reports threshold crossings,
//! exactly once per crossing, per container independently. Containers
//! are handed in at construction; there is no ambient lookup and no
//! unregistering in the default configuration.

use crate::config::AnimationsConfig;
use crate::model::layout::{DocumentLayout, RowSpan};
use crate::model::SectionId;

/// Which animator a container is wired to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchGroup {
    /// Skill-bar containers, threshold 0.20 by default.
    Skills,
    /// General reveal-on-scroll containers, threshold 0.10 by default.
    Sections,
}

/// A container that crossed its group's visibility threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Crossing {
    pub target: SectionId,
    pub group: WatchGroup,
}

#[derive(Debug)]
struct WatchEntry {
    target: SectionId,
    group: WatchGroup,
    was_visible: bool,
}

/// Threshold-crossing detector over the document layout.
#[derive(Debug)]
pub struct VisibilityWatcher {
    entries: Vec<WatchEntry>,
    skills_threshold: f64,
    sections_threshold: f64,
    /// Unobserve after the first crossing. Documented variant, off by
    /// default.
    observe_once: bool,
    /// False when the intersection primitive is unavailable; the watcher
    /// then never reports crossings and the page simply stays unanimated.
    active: bool,
}

impl VisibilityWatcher {
    /// Build a watcher from config. Invalid thresholds are a config
    /// error: fall back to the defaults with a warning, never crash.
    pub fn new(cfg: &AnimationsConfig) -> Self {
        let defaults = AnimationsConfig::default();
        let skills_threshold = if valid_threshold(cfg.skills_threshold) {
            cfg.skills_threshold
        } else {
            tracing::warn!(
                "Invalid skills threshold {}, falling back to {}",
                cfg.skills_threshold,
                defaults.skills_threshold
            );
            defaults.skills_threshold
        };
        let sections_threshold = if valid_threshold(cfg.sections_threshold) {
            cfg.sections_threshold
        } else {
            tracing::warn!(
                "Invalid sections threshold {}, falling back to {}",
                cfg.sections_threshold,
                defaults.sections_threshold
            );
            defaults.sections_threshold
        };

        Self {
            entries: Vec::new(),
            skills_threshold,
            sections_threshold,
            observe_once: cfg.observe_once,
            active: true,
        }
    }

    /// A watcher that never fires: the graceful path when intersection
    /// observation is unavailable in the host environment.
    pub fn inert() -> Self {
        Self {
            entries: Vec::new(),
            skills_threshold: 1.0,
            sections_threshold: 1.0,
            observe_once: false,
            active: false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Begin observing `target` under the rules of `group`.
    pub fn register(&mut self, target: SectionId, group: WatchGroup) {
        self.entries.push(WatchEntry {
            target,
            group,
            was_visible: false,
        });
    }

    pub fn observed(&self) -> usize {
        self.entries.len()
    }

    /// Evaluate every observed container against the viewport and return
    /// containers that just crossed their threshold. Containers falling
    /// below the threshold produce nothing but re-arm edge detection, so
    /// scrolling away and back triggers again (animators guard repeats).
    pub fn observe(&mut self, viewport: RowSpan, layout: &DocumentLayout) -> Vec<Crossing> {
        if !self.active || viewport.height == 0 {
            return Vec::new();
        }

        let mut crossings = Vec::new();
        for entry in &mut self.entries {
            let fraction = layout.visible_fraction(entry.target, viewport);
            let threshold = match entry.group {
                WatchGroup::Skills => self.skills_threshold,
                WatchGroup::Sections => self.sections_threshold,
            };
            let is_visible = fraction >= threshold;
            if is_visible && !entry.was_visible {
                crossings.push(Crossing {
                    target: entry.target,
                    group: entry.group,
                });
            }
            entry.was_visible = is_visible;
        }

        if self.observe_once && !crossings.is_empty() {
            let fired: Vec<SectionId> = crossings.iter().map(|c| c.target).collect();
            self.entries.retain(|e| !fired.contains(&e.target));
        }

        crossings
    }
}

fn valid_threshold(t: f64) -> bool {
    t > 0.0 && t <= 1.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Content;
    use crate::model::layout::DocumentLayout;
    use crate::model::Page;

    fn fixture() -> (Page, DocumentLayout, VisibilityWatcher) {
        let page = Page::from_content(&Content::default());
        let layout = DocumentLayout::of(&page);
        let mut watcher = VisibilityWatcher::new(&AnimationsConfig::default());
        if let Some(id) = page.skills_section_id() {
            watcher.register(id, WatchGroup::Skills);
        }
        for id in page.animatable_section_ids() {
            watcher.register(id, WatchGroup::Sections);
        }
        (page, layout, watcher)
    }

    fn viewport_over(layout: &DocumentLayout, id: usize, rows: usize) -> RowSpan {
        let extent = layout.extent(id).unwrap();
        RowSpan::new(extent.top, rows)
    }

    #[test]
    fn test_crossing_fires_once_while_visible() {
        let (page, layout, mut watcher) = fixture();
        let skills = page.skills_section_id().unwrap();
        let viewport = viewport_over(&layout, skills, 20);

        let first = watcher.observe(viewport, &layout);
        assert!(first.iter().any(|c| c.target == skills));

        // Still visible: no repeat notification.
        let second = watcher.observe(viewport, &layout);
        assert!(!second.iter().any(|c| c.target == skills));
    }

    #[test]
    fn test_scrolling_away_rearms_the_edge() {
        let (page, layout, mut watcher) = fixture();
        let skills = page.skills_section_id().unwrap();
        let visible = viewport_over(&layout, skills, 20);
        let away = RowSpan::new(0, 1);

        assert!(watcher
            .observe(visible, &layout)
            .iter()
            .any(|c| c.target == skills));
        assert!(!watcher
            .observe(away, &layout)
            .iter()
            .any(|c| c.target == skills));
        // Back in view: a new crossing.
        assert!(watcher
            .observe(visible, &layout)
            .iter()
            .any(|c| c.target == skills));
    }

    #[test]
    fn test_below_threshold_does_not_fire() {
        let (page, layout, mut watcher) = fixture();
        let skills = page.skills_section_id().unwrap();
        let extent = layout.extent(skills).unwrap();

        // One row of an 11-row section is under the 20% threshold.
        let sliver = RowSpan::new(extent.top, 1);
        assert!(extent.height >= 5);
        let crossings = watcher.observe(sliver, &layout);
        assert!(!crossings.iter().any(|c| c.target == skills));
    }

    #[test]
    fn test_groups_are_independent() {
        let (page, layout, mut watcher) = fixture();
        let skills = page.skills_section_id().unwrap();
        let about = 1usize;

        // A viewport spanning both containers fires both groups.
        let viewport = RowSpan::new(0, layout.total_rows);
        let crossings = watcher.observe(viewport, &layout);
        assert!(crossings
            .iter()
            .any(|c| c.target == skills && c.group == WatchGroup::Skills));
        assert!(crossings
            .iter()
            .any(|c| c.target == about && c.group == WatchGroup::Sections));
    }

    #[test]
    fn test_inert_watcher_never_fires() {
        let (page, layout, _) = fixture();
        let mut watcher = VisibilityWatcher::inert();
        if let Some(id) = page.skills_section_id() {
            watcher.register(id, WatchGroup::Skills);
        }
        let viewport = RowSpan::new(0, layout.total_rows);
        assert!(watcher.observe(viewport, &layout).is_empty());
        assert!(!watcher.is_active());
    }

    #[test]
    fn test_zero_viewport_yields_nothing() {
        let (_, layout, mut watcher) = fixture();
        assert!(watcher.observe(RowSpan::new(0, 0), &layout).is_empty());
    }

    #[test]
    fn test_invalid_threshold_falls_back() {
        let cfg = AnimationsConfig {
            skills_threshold: 1.5,
            sections_threshold: -0.2,
            ..Default::default()
        };
        let watcher = VisibilityWatcher::new(&cfg);
        let defaults = AnimationsConfig::default();
        assert_eq!(watcher.skills_threshold, defaults.skills_threshold);
        assert_eq!(watcher.sections_threshold, defaults.sections_threshold);
    }

    #[test]
    fn test_observe_once_disconnects_after_crossing() {
        let (page, layout, _) = fixture();
        let cfg = AnimationsConfig {
            observe_once: true,
            ..Default::default()
        };
        let mut watcher = VisibilityWatcher::new(&cfg);
        let skills = page.skills_section_id().unwrap();
        watcher.register(skills, WatchGroup::Skills);

        let viewport = viewport_over(&layout, skills, 20);
        assert_eq!(watcher.observe(viewport, &layout).len(), 1);
        assert_eq!(watcher.observed(), 0);

        // Scroll away and back: nothing left to observe.
        let away = RowSpan::new(0, 1);
        watcher.observe(away, &layout);
        assert!(watcher.observe(viewport, &layout).is_empty());
    }
}
