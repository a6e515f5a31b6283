//! Test harness: the real `App` rendered into ratatui's `TestBackend`,
//! driven by a `TestTimeSource` so every animation is deterministic.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use folio::app::App;
use folio::config::Config;
use folio::content::Content;
use folio::services::time_source::TestTimeSource;
use ratatui::backend::TestBackend;
use ratatui::style::Style;
use ratatui::Terminal;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

pub struct PortfolioTestHarness {
    terminal: Terminal<TestBackend>,
    app: App,
    time: Arc<TestTimeSource>,
}

impl PortfolioTestHarness {
    pub fn new(width: u16, height: u16) -> anyhow::Result<Self> {
        Self::with_config(width, height, Config::default())
    }

    pub fn with_config(width: u16, height: u16, config: Config) -> anyhow::Result<Self> {
        Self::with_parts(width, height, config, None, Content::default())
    }

    pub fn with_parts(
        width: u16,
        height: u16,
        config: Config,
        config_path: Option<PathBuf>,
        content: Content,
    ) -> anyhow::Result<Self> {
        let time = TestTimeSource::shared();
        let app = App::new(config, config_path, &content, time.clone(), width, height);
        let terminal = Terminal::new(TestBackend::new(width, height))?;
        Ok(Self {
            terminal,
            app,
            time,
        })
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }

    pub fn time(&self) -> &Arc<TestTimeSource> {
        &self.time
    }

    /// Advance logical time and run one tick, like the event loop would.
    pub fn advance(&mut self, duration: Duration) {
        self.time.advance(duration);
        self.app.tick();
    }

    pub fn tick(&mut self) -> bool {
        self.app.tick()
    }

    /// Press a key (no modifiers) and tick.
    pub fn key(&mut self, code: KeyCode) {
        self.app
            .handle_key(KeyEvent::new(code, KeyModifiers::NONE));
        self.app.tick();
    }

    /// Type a string into whatever currently has focus.
    pub fn type_str(&mut self, s: &str) {
        for c in s.chars() {
            self.key(KeyCode::Char(c));
        }
    }

    pub fn render(&mut self) -> anyhow::Result<()> {
        let app = &self.app;
        self.terminal.draw(|frame| app.render(frame))?;
        Ok(())
    }

    /// The whole screen as plain text, one line per row.
    pub fn screen_to_string(&self) -> String {
        let buffer = self.terminal.backend().buffer();
        let area = buffer.area;
        let mut out = String::new();
        for y in 0..area.height {
            for x in 0..area.width {
                match buffer.cell((x, y)) {
                    Some(cell) => out.push_str(cell.symbol()),
                    None => out.push(' '),
                }
            }
            out.push('\n');
        }
        out
    }

    #[track_caller]
    pub fn assert_screen_contains(&self, needle: &str) {
        let screen = self.screen_to_string();
        assert!(
            screen.contains(needle),
            "Expected screen to contain {needle:?}\n--- screen ---\n{screen}"
        );
    }

    #[track_caller]
    pub fn assert_screen_not_contains(&self, needle: &str) {
        let screen = self.screen_to_string();
        assert!(
            !screen.contains(needle),
            "Expected screen to NOT contain {needle:?}\n--- screen ---\n{screen}"
        );
    }

    pub fn get_cell_style(&self, x: u16, y: u16) -> Option<Style> {
        self.terminal
            .backend()
            .buffer()
            .cell((x, y))
            .map(|cell| cell.style())
    }
}
