//! Layout management and calculations

use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::constants::{DETAIL_PANEL_MIN_WIDTH, FILTER_PANEL_MIN_WIDTH};

/// Manages layout calculations and constraints for the UI
pub struct LayoutManager;

/// Areas of the three-pane screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaneAreas {
    pub filters: Rect,
    pub list: Rect,
    pub detail: Rect,
    pub status: Rect,
}

/// Minimum width left for the tile list
const LIST_MIN_WIDTH: u16 = 24;

impl LayoutManager {
    /// Split the screen into filter panel, list and detail card side by side,
    /// with a one-line status bar below.
    ///
    /// Side panes shrink toward their minimum widths before the list does.
    #[must_use]
    pub fn main_layout(area: Rect, filter_width: u16, detail_width: u16) -> PaneAreas {
        let top_height = area.height.saturating_sub(1);
        let top = Rect::new(area.x, area.y, area.width, top_height);
        let status = Rect::new(area.x, area.y + top_height, area.width, 1);

        let budget = area.width.saturating_sub(LIST_MIN_WIDTH);
        let filter_width = filter_width.min(budget / 2).max(FILTER_PANEL_MIN_WIDTH.min(budget / 2));
        let detail_width = detail_width
            .min(budget.saturating_sub(filter_width))
            .max(DETAIL_PANEL_MIN_WIDTH.min(budget.saturating_sub(filter_width)));

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(filter_width),
                Constraint::Min(0),
                Constraint::Length(detail_width),
            ])
            .split(top);

        PaneAreas {
            filters: chunks[0],
            list: chunks[1],
            detail: chunks[2],
            status,
        }
    }

    /// Calculate a centered rectangle within the given area
    #[must_use]
    pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
        let popup_layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage((100 - percent_y) / 2),
                Constraint::Percentage(percent_y),
                Constraint::Percentage((100 - percent_y) / 2),
            ])
            .split(r);

        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage((100 - percent_x) / 2),
                Constraint::Percentage(percent_x),
                Constraint::Percentage((100 - percent_x) / 2),
            ])
            .split(popup_layout[1])[1]
    }

    /// Overlay dimensions (percent of width, percent of height) for the screen size
    #[must_use]
    pub fn overlay_dimensions(screen_width: u16, screen_height: u16) -> (u16, u16) {
        let width = if screen_width < 80 { 90 } else { 70 };
        let height = if screen_height < 30 { 80 } else { 60 };
        (width, height)
    }
}
