use ratatui::style::Color;

pub const THEME_DARK: &str = "dark";
pub const THEME_LIGHT: &str = "light";

/// Resolved color palette for the whole page.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub name: &'static str,
    pub bg: Color,
    pub fg: Color,
    pub heading_fg: Color,
    pub accent_fg: Color,
    pub dim_fg: Color,
    pub bar_filled_fg: Color,
    pub bar_empty_fg: Color,
    pub nav_fg: Color,
    pub nav_bg: Color,
    pub nav_active_fg: Color,
    pub status_bar_fg: Color,
    pub status_bar_bg: Color,
    pub form_label_fg: Color,
    pub form_focus_bg: Color,
    pub success_fg: Color,
    pub error_fg: Color,
    pub pending_fg: Color,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: THEME_DARK,
            bg: Color::Rgb(24, 24, 30),
            fg: Color::Rgb(212, 212, 212),
            heading_fg: Color::Rgb(86, 156, 214),
            accent_fg: Color::Rgb(78, 201, 176),
            dim_fg: Color::DarkGray,
            bar_filled_fg: Color::Rgb(78, 201, 176),
            bar_empty_fg: Color::Rgb(60, 60, 70),
            nav_fg: Color::Gray,
            nav_bg: Color::Rgb(36, 36, 46),
            nav_active_fg: Color::Rgb(78, 201, 176),
            status_bar_fg: Color::Gray,
            status_bar_bg: Color::Rgb(36, 36, 46),
            form_label_fg: Color::Gray,
            form_focus_bg: Color::Rgb(48, 48, 60),
            success_fg: Color::Green,
            error_fg: Color::Red,
            pending_fg: Color::Rgb(86, 156, 214),
        }
    }

    pub fn light() -> Self {
        Self {
            name: THEME_LIGHT,
            bg: Color::Rgb(250, 250, 248),
            fg: Color::Rgb(40, 40, 40),
            heading_fg: Color::Rgb(0, 90, 180),
            accent_fg: Color::Rgb(0, 130, 110),
            dim_fg: Color::Gray,
            bar_filled_fg: Color::Rgb(0, 130, 110),
            bar_empty_fg: Color::Rgb(220, 220, 215),
            nav_fg: Color::Rgb(80, 80, 80),
            nav_bg: Color::Rgb(235, 235, 230),
            nav_active_fg: Color::Rgb(0, 130, 110),
            status_bar_fg: Color::Rgb(80, 80, 80),
            status_bar_bg: Color::Rgb(235, 235, 230),
            form_label_fg: Color::Rgb(100, 100, 100),
            form_focus_bg: Color::Rgb(225, 232, 240),
            success_fg: Color::Green,
            error_fg: Color::Red,
            pending_fg: Color::Rgb(0, 90, 180),
        }
    }

    /// Look up a theme by name, case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            THEME_DARK => Some(Self::dark()),
            THEME_LIGHT => Some(Self::light()),
            _ => None,
        }
    }

    /// Resolve the startup theme: persisted flag, else terminal
    /// preference, else light.
    pub fn resolve(stored: Option<&str>) -> Self {
        if let Some(name) = stored {
            if let Some(theme) = Self::from_name(name) {
                return theme;
            }
            tracing::warn!("Unknown theme '{}' in config, detecting instead", name);
        }
        Self::detect()
    }

    /// Pick a theme from the terminal's advertised background, when it
    /// advertises one via COLORFGBG.
    pub fn detect() -> Self {
        match std::env::var("COLORFGBG") {
            Ok(value) if dark_background_from_colorfgbg(&value) == Some(true) => Self::dark(),
            _ => Self::light(),
        }
    }

    /// The other theme of the pair.
    pub fn toggled(&self) -> Self {
        if self.name == THEME_DARK {
            Self::light()
        } else {
            Self::dark()
        }
    }
}

/// Parse the `COLORFGBG` convention ("fg;bg", sometimes "fg;default;bg")
/// and report whether the background is a dark palette color. None when
/// the variable is unparsable.
fn dark_background_from_colorfgbg(value: &str) -> Option<bool> {
    let bg: u8 = value.split(';').last()?.trim().parse().ok()?;
    // 7 and 15 are the white/bright-white palette slots.
    Some(bg != 7 && bg != 15)
}
