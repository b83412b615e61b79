//! Navigation collaborator for the terminal app.

use tokio::sync::mpsc;

use crate::service::{NavigationTarget, Navigator};
use crate::ui::core::Action;

/// Turns navigation requests into `Action::Navigate` on the action channel.
pub struct ChannelNavigator {
    sender: mpsc::UnboundedSender<Action>,
}

impl ChannelNavigator {
    pub fn new(sender: mpsc::UnboundedSender<Action>) -> Self {
        Self { sender }
    }
}

impl Navigator for ChannelNavigator {
    fn navigate(&self, target: NavigationTarget) {
        if self.sender.send(Action::Navigate(target)).is_err() {
            log::warn!("Navigator: action channel closed, navigation dropped");
        }
    }
}
