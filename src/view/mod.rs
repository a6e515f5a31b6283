//! Page rendering.
//!
//! The document is rendered as one fixed column of styled lines whose
//! row counts come from [`crate::model::layout`]; the visible window is
//! the slice starting at the scroll offset. Hidden containers render as
//! blank rows of the same height, so revealing never reflows the page.

pub mod theme;

use crate::app::contact_form::{ContactForm, FormField, SubmitState};
use crate::app::App;
use crate::model::layout::{self, section_height};
use crate::model::{Card, CardState, FillState, Section, SectionKind, SkillItem};
use crate::services::time_source::TimeSource;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use std::time::{Duration, Instant};
use theme::Theme;
use unicode_width::UnicodeWidthChar;

pub const NAV_ROWS: u16 = 1;
pub const STATUS_ROWS: u16 = 1;
pub const CHROME_ROWS: u16 = NAV_ROWS + STATUS_ROWS;

/// Maximum skill bar width in columns.
const BAR_WIDTH: usize = 40;
/// Columns a card slides in from during its reveal transition.
const CARD_SLIDE_COLS: usize = 6;

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let theme = app.theme();
    let base = Style::default().bg(theme.bg).fg(theme.fg);

    if area.height < CHROME_ROWS || area.width < 4 {
        frame.render_widget(Paragraph::new("").style(base), area);
        return;
    }

    let nav_area = Rect::new(area.x, area.y, area.width, NAV_ROWS);
    let content_area = Rect::new(
        area.x,
        area.y + NAV_ROWS,
        area.width,
        area.height - CHROME_ROWS,
    );
    let status_area = Rect::new(area.x, area.y + area.height - STATUS_ROWS, area.width, STATUS_ROWS);

    render_nav(frame, nav_area, app);
    render_content(frame, content_area, app, base);
    render_status(frame, status_area, app, content_area.height as usize);
}

fn render_content(frame: &mut Frame, area: Rect, app: &App, base: Style) {
    if area.height == 0 {
        return;
    }
    let now = app.time.now();
    let lines = document_lines(app, now, area.width as usize);
    debug_assert_eq!(lines.len(), app.layout().total_rows);

    let visible: Vec<Line> = lines
        .into_iter()
        .skip(app.scroll())
        .take(area.height as usize)
        .collect();

    frame.render_widget(Paragraph::new(Text::from(visible)).style(base), area);
}

/// Render the whole document into one line per row.
fn document_lines(app: &App, now: Instant, width: usize) -> Vec<Line<'static>> {
    let theme = app.theme();
    let fill_ms = Duration::from_millis(app.config.animations.fill_transition_ms);
    let card_ms = Duration::from_millis(app.config.animations.card_transition_ms);
    let text_width = width.saturating_sub(4);

    let mut lines = Vec::with_capacity(app.layout().total_rows);
    for section in &app.page().sections {
        let height = section_height(section);
        let mut body = match section.kind {
            SectionKind::Hero => hero_lines(app, theme, text_width),
            _ if !section.reveal.is_revealed() => Vec::new(),
            SectionKind::About => about_lines(section, theme, text_width),
            SectionKind::Skills => skill_lines(section, theme, now, fill_ms, text_width),
            SectionKind::Projects | SectionKind::Experience => {
                card_lines(section, theme, now, card_ms, text_width)
            }
            SectionKind::Contact => contact_lines(section, &app.form, theme, text_width),
        };
        fix_len(&mut body, height);
        lines.append(&mut body);
    }
    lines
}

fn hero_lines(app: &App, theme: &Theme, width: usize) -> Vec<Line<'static>> {
    vec![
        Line::default(),
        Line::from(Span::styled(
            clip(&app.page().owner_name, width),
            Style::default()
                .fg(theme.heading_fg)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled("> ", Style::default().fg(theme.dim_fg)),
            Span::styled(
                clip(&app.typewriter.visible(), width.saturating_sub(3)),
                Style::default().fg(theme.accent_fg),
            ),
            Span::styled("▌", Style::default().fg(theme.accent_fg)),
        ]),
        Line::default(),
        Line::from(Span::styled(
            clip("1-5 jump · tab contact · t theme · q quit", width),
            Style::default().fg(theme.dim_fg),
        )),
        Line::default(),
    ]
}

fn header_lines(section: &Section, theme: &Theme, width: usize) -> Vec<Line<'static>> {
    vec![
        Line::from(vec![
            Span::styled("▌ ", Style::default().fg(theme.accent_fg)),
            Span::styled(
                clip(&section.title, width),
                Style::default()
                    .fg(theme.heading_fg)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::default(),
    ]
}

fn about_lines(section: &Section, theme: &Theme, width: usize) -> Vec<Line<'static>> {
    let mut lines = header_lines(section, theme, width);
    for paragraph in &section.paragraphs {
        lines.push(Line::from(Span::styled(
            format!("  {}", clip(paragraph, width)),
            Style::default().fg(theme.fg),
        )));
    }
    lines
}

fn skill_lines(
    section: &Section,
    theme: &Theme,
    now: Instant,
    fill_ms: Duration,
    width: usize,
) -> Vec<Line<'static>> {
    let mut lines = header_lines(section, theme, width);
    let bar_width = BAR_WIDTH.min(width.saturating_sub(2)).max(1);

    for item in &section.skills {
        let percent = fill_percent(item, now, fill_ms);
        let mut name_spans = vec![Span::styled(
            format!("  {}", clip(&item.name, width.saturating_sub(7))),
            Style::default().fg(theme.fg),
        )];
        if item.fill.target().is_some() {
            name_spans.push(Span::styled(
                format!("  {:>3.0}%", percent),
                Style::default().fg(theme.accent_fg),
            ));
        }
        lines.push(Line::from(name_spans));

        let filled = ((bar_width as f64) * percent / 100.0).round() as usize;
        let filled = filled.min(bar_width);
        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled(
                "█".repeat(filled),
                Style::default().fg(theme.bar_filled_fg),
            ),
            Span::styled(
                "░".repeat(bar_width - filled),
                Style::default().fg(theme.bar_empty_fg),
            ),
        ]));
    }
    lines
}

/// Current visual fill of a skill bar, eased while transitioning.
fn fill_percent(item: &SkillItem, now: Instant, fill_ms: Duration) -> f64 {
    match item.fill {
        FillState::Empty => 0.0,
        FillState::Set { target } => target as f64,
        FillState::Filling { target, started } => {
            target as f64 * ease_out_cubic(progress(started, now, fill_ms))
        }
    }
}

fn card_lines(
    section: &Section,
    theme: &Theme,
    now: Instant,
    card_ms: Duration,
    width: usize,
) -> Vec<Line<'static>> {
    let mut lines = header_lines(section, theme, width);
    for card in &section.cards {
        lines.extend(single_card_lines(card, theme, now, card_ms, width));
    }
    lines
}

fn single_card_lines(
    card: &Card,
    theme: &Theme,
    now: Instant,
    card_ms: Duration,
    width: usize,
) -> Vec<Line<'static>> {
    let (p, shown) = match card.state {
        CardState::Hidden => return vec![Line::default(); layout::CARD_ROWS],
        CardState::Shown => (1.0, true),
        CardState::Revealing { since } => {
            let p = progress(since, now, card_ms);
            (p, p >= 1.0)
        }
    };

    // Position eases in from the right; color stays dimmed until the
    // transition completes (the terminal's stand-in for opacity).
    let indent = " ".repeat(((1.0 - ease_out_cubic(p)) * CARD_SLIDE_COLS as f64).round() as usize);
    let title_style = if shown {
        Style::default().fg(theme.fg).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.dim_fg)
    };
    let body_style = if shown {
        Style::default().fg(theme.fg)
    } else {
        Style::default().fg(theme.dim_fg)
    };
    let meta_style = Style::default().fg(theme.dim_fg);

    vec![
        Line::from(Span::styled(
            format!("{indent}  • {}", clip(&card.title, width.saturating_sub(6))),
            title_style,
        )),
        Line::from(Span::styled(
            format!("{indent}    {}", clip(&card.body, width.saturating_sub(6))),
            body_style,
        )),
        match &card.meta {
            Some(meta) => Line::from(Span::styled(
                format!("{indent}    {}", clip(meta, width.saturating_sub(6))),
                meta_style,
            )),
            None => Line::default(),
        },
        Line::default(),
    ]
}

fn contact_lines(
    section: &Section,
    form: &ContactForm,
    theme: &Theme,
    width: usize,
) -> Vec<Line<'static>> {
    let mut lines = header_lines(section, theme, width);

    for paragraph in &section.paragraphs {
        lines.push(Line::from(Span::styled(
            format!("  {}", clip(paragraph, width)),
            Style::default().fg(theme.fg),
        )));
    }

    for field in [FormField::Name, FormField::Email, FormField::Message] {
        let focused = form.focus() == Some(field);
        let marker = if focused { "▸ " } else { "  " };
        let mut value_style = Style::default().fg(theme.fg);
        if focused {
            value_style = value_style.bg(theme.form_focus_bg);
        }
        let value = clip(form.field_value(field), width.saturating_sub(14));
        let cursor = if focused { "▌" } else { "" };
        lines.push(Line::from(vec![
            Span::styled(marker, Style::default().fg(theme.accent_fg)),
            Span::styled(
                format!("{:<9}", field.label()),
                Style::default().fg(theme.form_label_fg),
            ),
            Span::styled(format!("{value}{cursor}"), value_style),
        ]));
    }

    lines.push(Line::from(Span::styled(
        clip("  tab next field · enter send · esc back to page", width),
        Style::default().fg(theme.dim_fg),
    )));

    let status = match form.state() {
        SubmitState::Idle => Line::default(),
        SubmitState::Pending => Line::from(Span::styled(
            "  Sending message...".to_string(),
            Style::default().fg(theme.pending_fg),
        )),
        SubmitState::Success(message) => Line::from(Span::styled(
            format!("  {}", clip(message, width)),
            Style::default().fg(theme.success_fg),
        )),
        SubmitState::Failure(error) => Line::from(Span::styled(
            format!("  {}", clip(error, width)),
            Style::default().fg(theme.error_fg),
        )),
    };
    lines.push(status);

    lines
}

fn render_nav(frame: &mut Frame, area: Rect, app: &App) {
    let theme = app.theme();
    let active = app.layout().section_at(app.scroll());

    let mut spans = vec![Span::styled(
        format!(" folio · {} ", app.page().owner_name),
        Style::default()
            .fg(theme.accent_fg)
            .add_modifier(Modifier::BOLD),
    )];

    for (i, &id) in app.page().navigable_section_ids().iter().enumerate() {
        let section = &app.page().sections[id];
        let style = if active == Some(id) {
            Style::default()
                .fg(theme.nav_active_fg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.nav_fg)
        };
        spans.push(Span::styled(
            format!(" [{}] {} ", i + 1, section.title),
            style,
        ));
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default().bg(theme.nav_bg)),
        area,
    );
}

fn render_status(frame: &mut Frame, area: Rect, app: &App, content_height: usize) {
    let theme = app.theme();
    let max_scroll = app.layout().total_rows.saturating_sub(content_height);
    let percent = if max_scroll == 0 {
        100
    } else {
        (app.scroll() * 100) / max_scroll
    };

    let section_title = app
        .layout()
        .section_at(app.scroll())
        .map(|id| app.page().sections[id].title.as_str())
        .filter(|t| !t.is_empty())
        .unwrap_or("Top");

    let line = Line::from(vec![
        Span::styled(
            format!(" {section_title} · {percent}% "),
            Style::default().fg(theme.status_bar_fg),
        ),
        Span::styled(
            format!("· {} theme ", theme.name),
            Style::default().fg(theme.status_bar_fg),
        ),
    ]);

    frame.render_widget(
        Paragraph::new(line).style(Style::default().bg(theme.status_bar_bg)),
        area,
    );
}

/// Pad with blank lines or truncate so a section renders exactly its
/// layout height.
fn fix_len(lines: &mut Vec<Line<'static>>, height: usize) {
    lines.truncate(height);
    while lines.len() < height {
        lines.push(Line::default());
    }
}

/// Truncate to a display width, respecting wide characters.
fn clip(s: &str, max: usize) -> String {
    let mut width = 0;
    let mut out = String::new();
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if width + w > max {
            break;
        }
        width += w;
        out.push(ch);
    }
    out
}

fn progress(since: Instant, now: Instant, duration: Duration) -> f64 {
    if duration.is_zero() {
        return 1.0;
    }
    (now.saturating_duration_since(since).as_secs_f64() / duration.as_secs_f64()).min(1.0)
}

fn ease_out_cubic(t: f64) -> f64 {
    let inv = 1.0 - t;
    1.0 - inv * inv * inv
}
