//! Status bar component

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    widgets::{Block, Paragraph},
    Frame,
};

use crate::ui::core::Pane;

/// Status bar component
pub struct StatusBar;

impl StatusBar {
    /// Render the status bar: an info message when there is one, otherwise
    /// shortcuts for the focused pane.
    pub fn render(f: &mut Frame, area: Rect, focus: Pane, loading: bool, info: Option<&str>) {
        let (status_text, status_color) = if let Some(info) = info {
            (info.to_string(), Color::Green)
        } else {
            let shortcuts = match focus {
                Pane::Filters => "↑↓: move • type: edit • Space: toggle • Tab: next pane • ?: help",
                Pane::List => "↑↓: move • Enter: select • n/p: page • r: retry • y: copy • Tab: next pane • q: quit",
                Pane::Detail => "o: open record • Tab: next pane • G: logs • q: quit",
            };
            let color = if loading { Color::Yellow } else { Color::Gray };
            (shortcuts.to_string(), color)
        };

        let status_bar = Paragraph::new(status_text)
            .block(Block::default())
            .alignment(Alignment::Center)
            .style(Style::default().fg(status_color));

        f.render_widget(status_bar, area);
    }
}
