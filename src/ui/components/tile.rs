//! Presentation of a single matter in the list.

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::ListItem,
};

use crate::model::Matter;

/// Events a tile can emit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TileEvent {
    Selected { item_id: String },
    DragStarted { payload: String },
}

/// Stateless view of one matter. All data comes from the assigned record.
#[derive(Debug, Clone, Copy)]
pub struct Tile<'a> {
    matter: &'a Matter,
    draggable: bool,
}

impl<'a> Tile<'a> {
    pub fn new(matter: &'a Matter, draggable: bool) -> Self {
        Self { matter, draggable }
    }

    pub fn matter(&self) -> &'a Matter {
        self.matter
    }

    pub fn click(&self) -> TileEvent {
        TileEvent::Selected {
            item_id: self.matter.id.clone(),
        }
    }

    /// JSON of the record for external drop targets. `None` when the tile
    /// is not draggable.
    pub fn drag_start(&self) -> Option<serde_json::Result<TileEvent>> {
        if !self.draggable {
            return None;
        }
        Some(serde_json::to_string(self.matter).map(|payload| TileEvent::DragStarted { payload }))
    }

    pub fn render(&self, selected: bool) -> ListItem<'static> {
        let name_style = if selected {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
        };
        let detail_style = Style::default().fg(Color::Gray);

        let marker = if selected { "▶ " } else { "  " };
        let number = self.matter.matter_number.clone().unwrap_or_default();
        let matter_type = self.matter.matter_type.clone().unwrap_or_default();
        let status = self.matter.status.clone().unwrap_or_default();

        ListItem::new(vec![
            Line::from(vec![
                Span::styled(marker, name_style),
                Span::styled(self.matter.name.clone(), name_style),
                Span::styled(format!("  {}", number), detail_style),
            ]),
            Line::from(vec![
                Span::raw("  "),
                Span::styled(matter_type, Style::default().fg(Color::Blue)),
                Span::styled(" • ", detail_style),
                Span::styled(status, status_style(self.matter.status.as_deref())),
            ]),
        ])
    }
}

fn status_style(status: Option<&str>) -> Style {
    match status {
        Some("Open") => Style::default().fg(Color::Green),
        Some("Closed") => Style::default().fg(Color::DarkGray),
        _ => Style::default().fg(Color::Yellow),
    }
}
