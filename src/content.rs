//! Static portfolio content.
//!
//! The document structure is the only input boundary of the page: a hero
//! with typewriter titles, an about section, skills with a raw level
//! string each, project and experience cards, and the contact blurb.
//! Content is loaded from a JSON file or falls back to the embedded
//! sample. Skill levels stay raw strings here; they are validated at
//! animation time, not at load time.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Full portfolio content as declared by the content file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    pub name: String,

    /// Titles the hero typewriter cycles through.
    #[serde(default)]
    pub titles: Vec<String>,

    /// About paragraphs, one line each.
    #[serde(default)]
    pub about: Vec<String>,

    #[serde(default)]
    pub skills: Vec<SkillDef>,

    #[serde(default)]
    pub projects: Vec<CardDef>,

    #[serde(default)]
    pub experience: Vec<CardDef>,

    #[serde(default = "default_contact_blurb")]
    pub contact_blurb: String,
}

fn default_contact_blurb() -> String {
    "Have a project in mind? Send me a message.".to_string()
}

/// One skill entry. `level` is the raw attribute string from the content
/// file; expected to parse as an integer percentage 0-100.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillDef {
    pub name: String,
    pub level: String,
}

/// One card entry (project or experience timeline item).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardDef {
    pub title: String,
    pub body: String,
    #[serde(default)]
    pub meta: Option<String>,
}

/// Content loading error
#[derive(Debug)]
pub enum ContentError {
    IoError(String),
    ParseError(String),
}

impl std::fmt::Display for ContentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContentError::IoError(msg) => write!(f, "IO error: {msg}"),
            ContentError::ParseError(msg) => write!(f, "Parse error: {msg}"),
        }
    }
}

impl std::error::Error for ContentError {}

impl Content {
    /// Load content from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ContentError> {
        let contents = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ContentError::IoError(e.to_string()))?;

        let content: Content =
            serde_json::from_str(&contents).map_err(|e| ContentError::ParseError(e.to_string()))?;

        Ok(content)
    }

    /// Save content to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ContentError> {
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| ContentError::ParseError(e.to_string()))?;

        std::fs::write(path.as_ref(), contents).map_err(|e| ContentError::IoError(e.to_string()))
    }
}

impl Default for Content {
    fn default() -> Self {
        Self {
            name: "Ada Reyes".to_string(),
            titles: vec![
                "Systems Engineer".to_string(),
                "Open Source Maintainer".to_string(),
                "Performance Tinkerer".to_string(),
            ],
            about: vec![
                "I build fast, reliable tooling for developers.".to_string(),
                "Most of my work lives in the terminal, where latency is a feature.".to_string(),
            ],
            skills: vec![
                SkillDef {
                    name: "Rust".to_string(),
                    level: "90".to_string(),
                },
                SkillDef {
                    name: "Distributed Systems".to_string(),
                    level: "75".to_string(),
                },
                SkillDef {
                    name: "Databases".to_string(),
                    level: "70".to_string(),
                },
                SkillDef {
                    name: "Frontend".to_string(),
                    level: "40".to_string(),
                },
            ],
            projects: vec![
                CardDef {
                    title: "ledgerd".to_string(),
                    body: "An append-only storage engine with CRC-chained segments.".to_string(),
                    meta: Some("Rust · 2.1k stars".to_string()),
                },
                CardDef {
                    title: "hexview".to_string(),
                    body: "A terminal hex viewer that handles multi-gigabyte files.".to_string(),
                    meta: Some("Rust · 800 stars".to_string()),
                },
            ],
            experience: vec![
                CardDef {
                    title: "Staff Engineer, Metrics Corp".to_string(),
                    body: "Led the ingestion pipeline rewrite; 4x throughput.".to_string(),
                    meta: Some("2022 - present".to_string()),
                },
                CardDef {
                    title: "Senior Engineer, Datastore Inc".to_string(),
                    body: "Owned the replication layer of the hosted database.".to_string(),
                    meta: Some("2018 - 2022".to_string()),
                },
                CardDef {
                    title: "Engineer, Embedded Labs".to_string(),
                    body: "Shipped firmware update tooling for industrial sensors.".to_string(),
                    meta: Some("2015 - 2018".to_string()),
                },
            ],
            contact_blurb: default_contact_blurb(),
        }
    }
}
