//! Detail card for the matter selected on the bus.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};

use crate::bus::{Message, MessageBus, Subscription, Topic};
use crate::constants::{DETAIL_PLACEHOLDER, ERROR_RECORD_FAILED, LOADING_RECORD, TITLE_DETAIL, TITLE_RECORD_PAGE};
use crate::model::Matter;
use crate::service::{NavigationTarget, Navigator, RecordLoader, ServiceError};
use crate::ui::core::{Action, Component, RequestId, RequestTracker, TaskManager};

/// Load state of the displayed record.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordState {
    /// Nothing selected
    Empty,
    Loading,
    Loaded(Matter),
    Failed(ServiceError),
}

struct CardCore {
    item_id: Option<String>,
    state: RecordState,
    requests: RequestTracker,
    loader: Arc<dyn RecordLoader>,
    tasks: TaskManager,
}

impl CardCore {
    fn select(&mut self, item_id: Option<String>) {
        match item_id {
            Some(id) => {
                let request_id = self.requests.issue();
                log::debug!("DetailCard: loading '{}' (request {})", id, request_id);
                self.item_id = Some(id.clone());
                self.state = RecordState::Loading;
                self.tasks.spawn_record_load(request_id, Arc::clone(&self.loader), id);
            }
            None => {
                // Invalidate anything still in flight
                self.requests.issue();
                self.item_id = None;
                self.state = RecordState::Empty;
            }
        }
    }
}

pub struct DetailCard {
    core: Rc<RefCell<CardCore>>,
    subscriptions: Vec<Subscription>,
    navigator: Box<dyn Navigator>,
}

impl DetailCard {
    pub fn new(
        bus: &MessageBus,
        tasks: TaskManager,
        loader: Arc<dyn RecordLoader>,
        navigator: Box<dyn Navigator>,
    ) -> Self {
        let core = Rc::new(RefCell::new(CardCore {
            item_id: None,
            state: RecordState::Empty,
            requests: RequestTracker::new(),
            loader,
            tasks,
        }));

        let weak = Rc::downgrade(&core);
        let subscription = bus.subscribe(Topic::MatterSelected, move |message| {
            let Message::ItemSelected { item_id } = message else {
                return Ok(());
            };
            let core = weak
                .upgrade()
                .ok_or_else(|| anyhow::anyhow!("detail card no longer exists"))?;
            let mut core = core
                .try_borrow_mut()
                .map_err(|_| anyhow::anyhow!("detail card state is busy"))?;
            core.select(item_id.clone());
            Ok(())
        });

        Self {
            core,
            subscriptions: vec![subscription],
            navigator,
        }
    }

    pub fn item_id(&self) -> Option<String> {
        self.core.borrow().item_id.clone()
    }

    pub fn state(&self) -> RecordState {
        self.core.borrow().state.clone()
    }

    pub fn latest_request(&self) -> Option<RequestId> {
        self.core.borrow().requests.latest()
    }

    /// Apply a record load response. Returns false when it is stale.
    pub fn apply_record(&mut self, request_id: RequestId, result: Result<Matter, ServiceError>) -> bool {
        let mut core = self.core.borrow_mut();
        if !core.requests.is_current(request_id) {
            log::debug!("DetailCard: discarding stale record response {}", request_id);
            return false;
        }
        core.state = match result {
            Ok(matter) => RecordState::Loaded(matter),
            Err(e) => {
                log::error!("DetailCard: {}", e);
                RecordState::Failed(e)
            }
        };
        true
    }

    /// Display fields in order. Values are blank until a record is loaded.
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        let core = self.core.borrow();
        let matter = match &core.state {
            RecordState::Loaded(matter) => Some(matter),
            _ => None,
        };
        let text = |value: Option<&String>| value.cloned().unwrap_or_default();

        vec![
            ("Name", matter.map(|m| m.name.clone()).unwrap_or_default()),
            ("Matter Number", text(matter.and_then(|m| m.matter_number.as_ref()))),
            ("Stage", text(matter.and_then(|m| m.stage.as_ref()))),
            ("Status", text(matter.and_then(|m| m.status.as_ref()))),
            ("Statute", text(matter.and_then(|m| m.statute.as_ref()))),
            ("Type", text(matter.and_then(|m| m.matter_type.as_ref()))),
            ("Subtype", text(matter.and_then(|m| m.subtype.as_ref()))),
            (
                "Decision Date",
                matter
                    .and_then(|m| m.decision_date)
                    .map(|d| d.format("%Y-%m-%d").to_string())
                    .unwrap_or_default(),
            ),
        ]
    }

    /// Navigation target for the displayed record, if one is selected.
    pub fn navigation_target(&self) -> Option<NavigationTarget> {
        self.item_id().map(NavigationTarget::record_page)
    }

    /// Ask the navigator to open the record page. False unless the selected
    /// record has loaded.
    pub fn navigate_to_record(&self) -> bool {
        if !matches!(self.state(), RecordState::Loaded(_)) {
            log::debug!("DetailCard: no loaded record to navigate to");
            return false;
        }
        match self.navigation_target() {
            Some(target) => {
                log::info!("DetailCard: navigating to record page of '{}'", target.item_id);
                self.navigator.navigate(target);
                true
            }
            None => false,
        }
    }

    pub fn dispose(&mut self) {
        for subscription in self.subscriptions.drain(..) {
            subscription.unsubscribe();
        }
    }

    fn body(&self) -> Vec<Line<'static>> {
        match self.state() {
            RecordState::Empty => vec![Line::from(Span::styled(
                DETAIL_PLACEHOLDER,
                Style::default().fg(Color::DarkGray),
            ))],
            RecordState::Loading => vec![Line::from(Span::styled(LOADING_RECORD, Style::default().fg(Color::Yellow)))],
            RecordState::Failed(error) => vec![
                Line::from(Span::styled(ERROR_RECORD_FAILED, Style::default().fg(Color::Red))),
                Line::from(""),
                Line::from(Span::styled(error.to_string(), Style::default().fg(Color::Red))),
            ],
            RecordState::Loaded(_) => {
                let mut lines = Vec::new();
                for (label, value) in self.fields() {
                    lines.push(Line::from(Span::styled(
                        label,
                        Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD),
                    )));
                    lines.push(Line::from(Span::raw(value)));
                }
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(
                    "o: open record page",
                    Style::default().fg(Color::DarkGray),
                )));
                lines
            }
        }
    }

    /// Full-screen record page reached through navigation.
    pub fn render_record_page(&self, f: &mut Frame, rect: Rect) {
        let mut lines = self.body();
        if let RecordState::Loaded(matter) = self.state() {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                format!("Id: {}", matter.id),
                Style::default().fg(Color::DarkGray),
            )));
        }
        lines.push(Line::from(Span::styled("Esc: back", Style::default().fg(Color::DarkGray))));

        let page = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .title(TITLE_RECORD_PAGE)
                .border_style(Style::default().fg(Color::Cyan)),
        );
        f.render_widget(page, rect);
    }
}

impl Component for DetailCard {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Char('o') | KeyCode::Enter => {
                self.navigate_to_record();
                Action::None
            }
            _ => Action::None,
        }
    }

    fn render(&mut self, f: &mut Frame, rect: Rect, focused: bool) {
        let border = if focused { Color::Cyan } else { Color::DarkGray };
        let alignment = if matches!(self.state(), RecordState::Loaded(_)) {
            Alignment::Left
        } else {
            Alignment::Center
        };
        let card = Paragraph::new(self.body())
            .alignment(alignment)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .title(TITLE_DETAIL)
                    .border_style(Style::default().fg(border)),
            );
        f.render_widget(card, rect);
    }
}

impl Drop for DetailCard {
    fn drop(&mut self) {
        self.dispose();
    }
}
