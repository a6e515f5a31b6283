//! Hero typewriter animation.
//!
//! Cycles through the configured titles forever: type one character at a
//! time, hold the full title, erase, pause, move on. A small state
//! machine driven by deadlines so the event loop can ask when it next
//! needs to wake up.

use crate::config::TypewriterConfig;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Typing,
    Holding,
    Erasing,
    Waiting,
}

#[derive(Debug)]
pub struct Typewriter {
    titles: Vec<String>,
    cfg: TypewriterConfig,
    title_idx: usize,
    shown_chars: usize,
    phase: Phase,
    /// Next step deadline; None when there is nothing to animate.
    next_at: Option<Instant>,
}

impl Typewriter {
    pub fn new(titles: Vec<String>, cfg: TypewriterConfig, now: Instant) -> Self {
        let next_at = if titles.is_empty() {
            None
        } else {
            Some(now + delay(cfg.start_delay_ms))
        };
        Self {
            titles,
            cfg,
            title_idx: 0,
            shown_chars: 0,
            phase: Phase::Typing,
            next_at,
        }
    }

    /// Advance past every due deadline. Returns true if the visible text
    /// changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut changed = false;
        while let Some(at) = self.next_at {
            if now < at {
                break;
            }
            changed |= self.step(at);
        }
        changed
    }

    /// The currently visible prefix of the active title.
    pub fn visible(&self) -> String {
        self.titles
            .get(self.title_idx)
            .map(|t| t.chars().take(self.shown_chars).collect())
            .unwrap_or_default()
    }

    pub fn is_animating(&self) -> bool {
        self.next_at.is_some()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.next_at
    }

    fn step(&mut self, at: Instant) -> bool {
        let title_len = self
            .titles
            .get(self.title_idx)
            .map(|t| t.chars().count())
            .unwrap_or(0);

        match self.phase {
            Phase::Typing => {
                if self.shown_chars < title_len {
                    self.shown_chars += 1;
                    self.next_at = Some(if self.shown_chars == title_len {
                        at + delay(self.cfg.hold_ms)
                    } else {
                        at + delay(self.cfg.type_ms)
                    });
                    if self.shown_chars == title_len {
                        self.phase = Phase::Holding;
                    }
                    true
                } else {
                    // Empty title: nothing to type, hold and move on.
                    self.phase = Phase::Holding;
                    self.next_at = Some(at + delay(self.cfg.hold_ms));
                    false
                }
            }
            Phase::Holding => {
                self.phase = Phase::Erasing;
                self.next_at = Some(at + delay(self.cfg.erase_ms));
                false
            }
            Phase::Erasing => {
                if self.shown_chars > 0 {
                    self.shown_chars -= 1;
                    self.next_at = Some(at + delay(self.cfg.erase_ms));
                    true
                } else {
                    self.phase = Phase::Waiting;
                    self.next_at = Some(at + delay(self.cfg.gap_ms));
                    false
                }
            }
            Phase::Waiting => {
                self.title_idx = (self.title_idx + 1) % self.titles.len().max(1);
                self.phase = Phase::Typing;
                // Type the first character of the next title immediately.
                self.next_at = Some(at);
                false
            }
        }
    }
}

/// Zero-length delays would spin the deadline loop; clamp to 1ms.
fn delay(ms: u64) -> Duration {
    Duration::from_millis(ms.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> TypewriterConfig {
        TypewriterConfig::default()
    }

    fn at(base: Instant, ms: u64) -> Instant {
        base + Duration::from_millis(ms)
    }

    #[test]
    fn test_nothing_before_start_delay() {
        let base = Instant::now();
        let mut tw = Typewriter::new(vec!["Hi".to_string()], cfg(), base);

        assert!(!tw.tick(at(base, 999)));
        assert_eq!(tw.visible(), "");
    }

    #[test]
    fn test_types_one_char_per_interval() {
        let base = Instant::now();
        let mut tw = Typewriter::new(vec!["Hi".to_string()], cfg(), base);

        assert!(tw.tick(at(base, 1000)));
        assert_eq!(tw.visible(), "H");

        assert!(tw.tick(at(base, 1080)));
        assert_eq!(tw.visible(), "Hi");
    }

    #[test]
    fn test_holds_then_erases() {
        let base = Instant::now();
        let mut tw = Typewriter::new(vec!["Hi".to_string()], cfg(), base);

        // Fully typed at 1080; hold lasts 1500.
        tw.tick(at(base, 1080));
        assert_eq!(tw.visible(), "Hi");
        assert!(!tw.tick(at(base, 2579)));

        // Hold expires, then erasing starts one erase interval later.
        assert!(tw.tick(at(base, 2580 + 40)));
        assert_eq!(tw.visible(), "H");
        assert!(tw.tick(at(base, 2580 + 80)));
        assert_eq!(tw.visible(), "");
    }

    #[test]
    fn test_cycles_to_next_title_and_wraps() {
        let base = Instant::now();
        let mut tw = Typewriter::new(vec!["Ab".to_string(), "C".to_string()], cfg(), base);

        // Run well past one full cycle of the first title.
        tw.tick(at(base, 1000 + 80 + 1500 + 40 * 3 + 500));
        assert_eq!(tw.visible(), "C");

        // And far enough to wrap back around to the first title.
        tw.tick(at(base, 20_000));
        assert!(tw.is_animating());
    }

    #[test]
    fn test_no_titles_is_inactive() {
        let base = Instant::now();
        let mut tw = Typewriter::new(Vec::new(), cfg(), base);
        assert!(!tw.is_animating());
        assert!(!tw.tick(at(base, 60_000)));
        assert_eq!(tw.visible(), "");
    }

    #[test]
    fn test_multibyte_titles_type_by_char() {
        let base = Instant::now();
        let mut tw = Typewriter::new(vec!["héllo".to_string()], cfg(), base);
        tw.tick(at(base, 1080));
        assert_eq!(tw.visible(), "hé");
    }
}
