use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Persisted theme flag ("dark"/"light"). Absent means: detect the
    /// terminal preference at startup.
    #[serde(default)]
    pub theme: Option<String>,

    #[serde(default)]
    pub animations: AnimationsConfig,

    #[serde(default)]
    pub typewriter: TypewriterConfig,

    #[serde(default)]
    pub contact: ContactConfig,
}

/// Reveal animation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimationsConfig {
    /// Master switch; off means everything renders revealed, no motion.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Stop observing a container after its first crossing. Documented
    /// variant of the watcher, off by default.
    #[serde(default = "default_false")]
    pub observe_once: bool,

    /// Fraction of the skills container that must be on screen.
    #[serde(default = "default_skills_threshold")]
    pub skills_threshold: f64,

    /// Fraction of a general section that must be on screen.
    #[serde(default = "default_sections_threshold")]
    pub sections_threshold: f64,

    /// Delay step between consecutive card reveals.
    #[serde(default = "default_stagger_ms")]
    pub stagger_ms: u64,

    /// Card opacity/position transition length.
    #[serde(default = "default_card_transition_ms")]
    pub card_transition_ms: u64,

    /// Skill bar fill transition length.
    #[serde(default = "default_fill_transition_ms")]
    pub fill_transition_ms: u64,

    /// Smooth in-page navigation transition length.
    #[serde(default = "default_smooth_scroll_ms")]
    pub smooth_scroll_ms: u64,
}

fn default_true() -> bool {
    true
}

fn default_false() -> bool {
    false
}

fn default_skills_threshold() -> f64 {
    0.2
}

fn default_sections_threshold() -> f64 {
    0.1
}

fn default_stagger_ms() -> u64 {
    200
}

fn default_card_transition_ms() -> u64 {
    700
}

fn default_fill_transition_ms() -> u64 {
    700
}

fn default_smooth_scroll_ms() -> u64 {
    400
}

impl Default for AnimationsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            observe_once: false,
            skills_threshold: default_skills_threshold(),
            sections_threshold: default_sections_threshold(),
            stagger_ms: default_stagger_ms(),
            card_transition_ms: default_card_transition_ms(),
            fill_transition_ms: default_fill_transition_ms(),
            smooth_scroll_ms: default_smooth_scroll_ms(),
        }
    }
}

/// Hero typewriter timing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypewriterConfig {
    #[serde(default = "default_start_delay_ms")]
    pub start_delay_ms: u64,

    #[serde(default = "default_type_ms")]
    pub type_ms: u64,

    #[serde(default = "default_erase_ms")]
    pub erase_ms: u64,

    /// Pause with the full title shown before erasing.
    #[serde(default = "default_hold_ms")]
    pub hold_ms: u64,

    /// Pause between erasing a title and typing the next.
    #[serde(default = "default_gap_ms")]
    pub gap_ms: u64,
}

fn default_start_delay_ms() -> u64 {
    1000
}

fn default_type_ms() -> u64 {
    80
}

fn default_erase_ms() -> u64 {
    40
}

fn default_hold_ms() -> u64 {
    1500
}

fn default_gap_ms() -> u64 {
    500
}

impl Default for TypewriterConfig {
    fn default() -> Self {
        Self {
            start_delay_ms: default_start_delay_ms(),
            type_ms: default_type_ms(),
            erase_ms: default_erase_ms(),
            hold_ms: default_hold_ms(),
            gap_ms: default_gap_ms(),
        }
    }
}

/// Contact form endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_endpoint() -> String {
    "http://localhost:3000/submit".to_string()
}

fn default_timeout_secs() -> u64 {
    5
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Config {
    /// Default config file location: `{config_dir}/folio/config.json`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("folio").join("config.json"))
    }

    /// Load configuration from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::IoError(e.to_string()))?;

        let config: Config =
            serde_json::from_str(&contents).map_err(|e| ConfigError::ParseError(e.to_string()))?;

        Ok(config)
    }

    /// Load from `path` if it exists, else defaults. A present but
    /// unreadable file is an error, never silently ignored.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to a JSON file, creating parent directories.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::IoError(e.to_string()))?;
        }

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializeError(e.to_string()))?;

        std::fs::write(path.as_ref(), contents).map_err(|e| ConfigError::IoError(e.to_string()))?;

        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(theme) = &self.theme {
            let known = ["dark", "light"];
            if !known.contains(&theme.to_lowercase().as_str()) {
                return Err(ConfigError::ValidationError(format!(
                    "unknown theme '{theme}', expected one of: {}",
                    known.join(", ")
                )));
            }
        }

        for (name, value) in [
            ("skills_threshold", self.animations.skills_threshold),
            ("sections_threshold", self.animations.sections_threshold),
        ] {
            if !(value > 0.0 && value <= 1.0) {
                return Err(ConfigError::ValidationError(format!(
                    "{name} must be within (0, 1], got {value}"
                )));
            }
        }

        if self.contact.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "contact.timeout_secs must be greater than 0".to_string(),
            ));
        }

        if self.contact.endpoint.is_empty() {
            return Err(ConfigError::ValidationError(
                "contact.endpoint cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}

/// Configuration error types
#[derive(Debug)]
pub enum ConfigError {
    IoError(String),
    ParseError(String),
    SerializeError(String),
    ValidationError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(msg) => write!(f, "IO error: {msg}"),
            ConfigError::ParseError(msg) => write!(f, "Parse error: {msg}"),
            ConfigError::SerializeError(msg) => write!(f, "Serialize error: {msg}"),
            ConfigError::ValidationError(msg) => write!(f, "Validation error: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}
