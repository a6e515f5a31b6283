//! Skill-bar animator.
//!
//! Reveals each skill's progress indicator to its configured percentage,
//! exactly once. Levels arrive as raw content strings and are validated
//! here: a bad level is a content error, so the item is skipped with a
//! warning and its siblings still animate.

use crate::model::{FillState, Page, SectionId};
use std::time::Instant;

/// Level validation failure.
#[derive(Debug, PartialEq, Eq)]
pub enum LevelError {
    NotANumber,
    OutOfRange(i64),
}

impl std::fmt::Display for LevelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LevelError::NotANumber => write!(f, "level is not a number"),
            LevelError::OutOfRange(v) => write!(f, "level {v} is outside 0-100"),
        }
    }
}

/// Parse a raw level attribute into a validated percentage.
pub fn parse_level(raw: &str) -> Result<u8, LevelError> {
    let value: i64 = raw.trim().parse().map_err(|_| LevelError::NotANumber)?;
    if (0..=100).contains(&value) {
        Ok(value as u8)
    } else {
        Err(LevelError::OutOfRange(value))
    }
}

/// Fills skill bars in a container that just became visible.
#[derive(Debug, Default)]
pub struct SkillBarAnimator;

impl SkillBarAnimator {
    pub fn new() -> Self {
        Self
    }

    /// Start the fill transition for every not-yet-animated skill in the
    /// container. Items that already animated are left untouched, so
    /// duplicate visibility notifications cannot reset a bar.
    pub fn animate(&self, page: &mut Page, id: SectionId, now: Instant) {
        let Some(section) = page.section_mut(id) else {
            tracing::debug!("Skill container {} not found, skipping", id);
            return;
        };

        for item in &mut section.skills {
            if item.animated {
                continue;
            }
            match parse_level(&item.level) {
                Ok(target) => {
                    item.animated = true;
                    item.fill = FillState::Filling {
                        target,
                        started: now,
                    };
                }
                Err(e) => {
                    tracing::warn!("Skipping skill '{}': {} ({:?})", item.name, e, item.level);
                }
            }
        }
    }
}
