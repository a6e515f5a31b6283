//! Smooth in-page navigation.
//!
//! Animates the scroll offset toward a target row with an ease-out
//! curve. A new request supersedes an in-flight one; manual scrolling
//! cancels.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy)]
struct Anim {
    from: f64,
    to: f64,
    started: Instant,
    duration: Duration,
}

#[derive(Debug, Default)]
pub struct SmoothScroll {
    anim: Option<Anim>,
}

impl SmoothScroll {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start animating from `from` to `to`. A zero duration jumps on the
    /// next tick.
    pub fn start(&mut self, from: usize, to: usize, duration: Duration, now: Instant) {
        self.anim = Some(Anim {
            from: from as f64,
            to: to as f64,
            started: now,
            duration,
        });
    }

    /// Current offset while animating. Returns the final offset once,
    /// then None.
    pub fn tick(&mut self, now: Instant) -> Option<usize> {
        let anim = self.anim?;
        let elapsed = now.saturating_duration_since(anim.started);

        if anim.duration.is_zero() || elapsed >= anim.duration {
            self.anim = None;
            return Some(anim.to.round() as usize);
        }

        let t = elapsed.as_secs_f64() / anim.duration.as_secs_f64();
        let eased = ease_out_cubic(t);
        let offset = anim.from + (anim.to - anim.from) * eased;
        Some(offset.round() as usize)
    }

    pub fn cancel(&mut self) {
        self.anim = None;
    }

    pub fn is_animating(&self) -> bool {
        self.anim.is_some()
    }
}

fn ease_out_cubic(t: f64) -> f64 {
    let inv = 1.0 - t;
    1.0 - inv * inv * inv
}
