use super::actions::Action;
use crossterm::event::KeyEvent;
use ratatui::{layout::Rect, Frame};

pub trait Component {
    /// Returns `Action::None` when the key was not consumed.
    fn handle_key_events(&mut self, key: KeyEvent) -> Action;

    /// Whether the component wants every printable key (text entry).
    fn captures_text(&self) -> bool {
        false
    }

    fn render(&mut self, f: &mut Frame, rect: Rect, focused: bool);

    // Optional lifecycle methods
    fn on_focus(&mut self) {}
    fn on_blur(&mut self) {}
}
