//! Application state and event handling.
//!
//! One `App` owns the page model, the reveal pipeline, and the three
//! independent collaborators (typewriter, smooth scroll, contact form).
//! The event loop in `main` calls `handle_key`, `tick`, and `render`;
//! everything else is internal.

pub mod contact_form;
pub mod smooth_scroll;
pub mod typewriter;

use crate::config::Config;
use crate::content::Content;
use crate::model::layout::{DocumentLayout, RowSpan};
use crate::model::{Page, SectionId, SectionKind};
use crate::reveal::RevealPipeline;
use crate::services::submit::{self, SubmitOutcome};
use crate::services::time_source::{SharedTimeSource, TimeSource};
use crate::view;
use crate::view::theme::Theme;
use contact_form::{ContactForm, SubmitState};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use smooth_scroll::SmoothScroll;
use std::path::PathBuf;
use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::{Duration, Instant};
use typewriter::Typewriter;

pub struct App {
    pub(crate) config: Config,
    config_path: Option<PathBuf>,
    pub(crate) page: Page,
    pub(crate) layout: DocumentLayout,
    pub(crate) theme: Theme,
    pipeline: RevealPipeline,
    pub(crate) typewriter: Typewriter,
    smooth: SmoothScroll,
    pub(crate) form: ContactForm,
    submit_rx: Option<Receiver<SubmitOutcome>>,
    pub(crate) time: SharedTimeSource,
    pub(crate) scroll: usize,
    view_width: u16,
    view_height: u16,
    /// Number-key navigation targets, in page order.
    nav_ids: Vec<SectionId>,
    should_quit: bool,
}

impl App {
    pub fn new(
        config: Config,
        config_path: Option<PathBuf>,
        content: &Content,
        time: SharedTimeSource,
        width: u16,
        height: u16,
    ) -> Self {
        let mut page = Page::from_content(content);
        let layout = DocumentLayout::of(&page);
        let theme = Theme::resolve(config.theme.as_deref());
        let pipeline = RevealPipeline::new(&config.animations, &page);
        if !config.animations.enabled {
            tracing::info!("Animations disabled, revealing everything");
            RevealPipeline::reveal_everything(&mut page);
        }
        let now = time.now();
        let typewriter = Typewriter::new(page.titles.clone(), config.typewriter.clone(), now);
        let nav_ids = page.navigable_section_ids();

        Self {
            config,
            config_path,
            page,
            layout,
            theme,
            pipeline,
            typewriter,
            smooth: SmoothScroll::new(),
            form: ContactForm::new(),
            submit_rx: None,
            time,
            scroll: 0,
            view_width: width,
            view_height: height,
            nav_ids,
            should_quit: false,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn layout(&self) -> &DocumentLayout {
        &self.layout
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn scroll(&self) -> usize {
        self.scroll
    }

    pub fn form(&self) -> &ContactForm {
        &self.form
    }

    pub fn typewriter(&self) -> &Typewriter {
        &self.typewriter
    }

    /// Card reveals scheduled but not yet executed.
    pub fn pending_reveals(&self) -> usize {
        self.pipeline.pending_reveals()
    }

    /// Earliest instant a deferred reveal or typewriter step is due;
    /// lets the event loop sleep precisely instead of polling blind.
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.typewriter.next_deadline(), self.pipeline.next_deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    pub fn size(&self) -> (u16, u16) {
        (self.view_width, self.view_height)
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.view_width = width;
        self.view_height = height;
        self.scroll = self.scroll.min(self.max_scroll());
    }

    pub fn render(&self, frame: &mut Frame) {
        view::render(frame, self);
    }

    /// Advance every animation to `now`. Returns true when a render is
    /// needed.
    pub fn tick(&mut self) -> bool {
        let now = self.time.now();
        let mut changed = self.typewriter.tick(now);

        if let Some(offset) = self.smooth.tick(now) {
            let offset = offset.min(self.max_scroll());
            if offset != self.scroll {
                self.scroll = offset;
                changed = true;
            }
        }

        let viewport = self.viewport();
        changed |= self
            .pipeline
            .tick(&mut self.page, viewport, &self.layout, now);

        changed |= self.poll_submission();
        changed || self.has_active_transitions(now)
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if self.form.is_editing() {
            self.handle_form_key(key);
            return;
        }

        match (key.code, key.modifiers) {
            (KeyCode::Char('q'), KeyModifiers::NONE)
            | (KeyCode::Char('q'), KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            (KeyCode::Char('t'), KeyModifiers::NONE) => self.toggle_theme(),
            (KeyCode::Up, _) => self.scroll_by(-1),
            (KeyCode::Down, _) => self.scroll_by(1),
            (KeyCode::PageUp, _) => self.scroll_by(-(self.content_height() as isize)),
            (KeyCode::PageDown, _) => self.scroll_by(self.content_height() as isize),
            (KeyCode::Home, _) => self.scroll_to_row(0),
            (KeyCode::End, _) => self.scroll_to_row(usize::MAX),
            (KeyCode::Char(c), KeyModifiers::NONE) if c.is_ascii_digit() => {
                let idx = (c as usize).wrapping_sub('1' as usize);
                if let Some(&id) = self.nav_ids.get(idx) {
                    self.scroll_to_section(id);
                }
            }
            (KeyCode::Tab, _) => {
                if let Some(contact) = self.contact_section_id() {
                    self.scroll_to_section(contact);
                }
                self.form.focus_first();
            }
            _ => {}
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent) {
        match (key.code, key.modifiers) {
            (KeyCode::Esc, _) => self.form.blur(),
            (KeyCode::Tab, _) => self.form.focus_next(),
            (KeyCode::BackTab, _) => self.form.focus_prev(),
            (KeyCode::Enter, _) => self.submit_form(),
            (KeyCode::Backspace, _) => self.form.backspace(),
            (KeyCode::Char(c), KeyModifiers::NONE) | (KeyCode::Char(c), KeyModifiers::SHIFT) => {
                self.form.insert_char(c);
            }
            _ => {}
        }
    }

    /// Toggle dark/light and persist the flag. Persistence failures are
    /// logged, never fatal.
    fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        self.config.theme = Some(self.theme.name.to_string());
        tracing::info!("Theme switched to {}", self.theme.name);

        if let Some(path) = &self.config_path {
            if let Err(e) = self.config.save_to_file(path) {
                tracing::warn!("Failed to persist theme to {:?}: {}", path, e);
            }
        }
    }

    fn submit_form(&mut self) {
        if self.form.state() == &SubmitState::Pending {
            return;
        }
        self.form.set_state(SubmitState::Pending);
        let rx = submit::submit_in_background(
            self.config.contact.endpoint.clone(),
            &self.form.payload(),
            Duration::from_secs(self.config.contact.timeout_secs),
        );
        self.submit_rx = Some(rx);
    }

    fn poll_submission(&mut self) -> bool {
        let Some(rx) = &self.submit_rx else {
            return false;
        };
        match rx.try_recv() {
            Ok(SubmitOutcome::Accepted { message }) => {
                self.form.set_state(SubmitState::Success(message));
                self.form.clear_fields();
            }
            Ok(SubmitOutcome::Rejected { error })
            | Ok(SubmitOutcome::Unreachable { error }) => {
                self.form.set_state(SubmitState::Failure(error));
            }
            Err(TryRecvError::Empty) => return false,
            Err(TryRecvError::Disconnected) => {
                tracing::warn!("Submission worker vanished without a result");
                self.form
                    .set_state(SubmitState::Failure("Submission failed.".to_string()));
            }
        }
        self.submit_rx = None;
        true
    }

    fn scroll_by(&mut self, delta: isize) {
        self.smooth.cancel();
        let target = self.scroll as isize + delta;
        self.scroll = target.clamp(0, self.max_scroll() as isize) as usize;
    }

    /// Jump straight to a document row (clamped), cancelling any smooth
    /// navigation in flight.
    pub fn scroll_to_row(&mut self, row: usize) {
        self.smooth.cancel();
        self.scroll = row.min(self.max_scroll());
    }

    fn scroll_to_section(&mut self, id: SectionId) {
        let Some(extent) = self.layout.extent(id) else {
            return;
        };
        let target = extent.top.min(self.max_scroll());
        let duration = if self.config.animations.enabled {
            Duration::from_millis(self.config.animations.smooth_scroll_ms)
        } else {
            Duration::ZERO
        };
        self.smooth.start(self.scroll, target, duration, self.time.now());
    }

    fn contact_section_id(&self) -> Option<SectionId> {
        self.page
            .sections
            .iter()
            .find(|s| s.kind == SectionKind::Contact)
            .map(|s| s.id)
    }

    pub(crate) fn viewport(&self) -> RowSpan {
        RowSpan::new(self.scroll, self.content_height())
    }

    fn content_height(&self) -> usize {
        self.view_height.saturating_sub(view::CHROME_ROWS) as usize
    }

    fn max_scroll(&self) -> usize {
        self.layout.total_rows.saturating_sub(self.content_height())
    }

    /// True while any eased transition still has frames to draw.
    fn has_active_transitions(&self, now: Instant) -> bool {
        if self.smooth.is_animating() {
            return true;
        }

        let fill = Duration::from_millis(self.config.animations.fill_transition_ms);
        let card = Duration::from_millis(self.config.animations.card_transition_ms);

        self.page.sections.iter().any(|section| {
            section.skills.iter().any(|item| {
                matches!(item.fill, crate::model::FillState::Filling { started, .. }
                    if now.saturating_duration_since(started) < fill)
            }) || section.cards.iter().any(|c| {
                matches!(c.state, crate::model::CardState::Revealing { since }
                    if now.saturating_duration_since(since) < card)
            })
        })
    }
}
