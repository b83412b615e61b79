//! Help and log overlays drawn above the panes.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::constants::{TITLE_HELP, TITLE_LOGS};
use crate::ui::core::Overlay;
use crate::ui::layout::LayoutManager;

const HELP_LINES: &[&str] = &[
    "Global",
    "  Tab / Shift+Tab   switch pane",
    "  ?                 this help",
    "  G                 logs",
    "  q / Ctrl+C        quit",
    "",
    "Filters",
    "  ↑ ↓               move between inputs and checkboxes",
    "  type / Backspace  edit search and decision dates (YYYY-MM-DD)",
    "  Space             toggle the focused checkbox",
    "",
    "Matters",
    "  ↑ ↓ / j k         move between tiles",
    "  Enter             show the matter in the detail card",
    "  n / p, → / ←      next / previous page",
    "  r                 retry the last query",
    "  y                 copy the matter as JSON",
    "  /                 inline search (when enabled)",
    "",
    "Detail",
    "  o / Enter         open the record page (Esc to return)",
];

pub struct OverlayView;

impl OverlayView {
    pub fn render(f: &mut Frame, area: Rect, overlay: Overlay, logs: &[String]) {
        let (width, height) = LayoutManager::overlay_dimensions(area.width, area.height);
        let rect = LayoutManager::centered_rect(width, height, area);

        let (title, lines): (&str, Vec<Line>) = match overlay {
            Overlay::Help => (TITLE_HELP, HELP_LINES.iter().map(|l| Line::from(*l)).collect()),
            Overlay::Logs if logs.is_empty() => (TITLE_LOGS, vec![Line::from("No log entries")]),
            Overlay::Logs => (TITLE_LOGS, logs.iter().map(|l| Line::from(l.as_str())).collect()),
        };

        let widget = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .title(title)
                .border_style(Style::default().fg(Color::Cyan)),
        );

        f.render_widget(Clear, rect);
        f.render_widget(widget, rect);
    }
}
