//! Paged list of matter tiles driven by `FiltersChanged` messages.
//!
//! State is `(filters, page_number)`. Any change to either issues a new page
//! request through the query service. Responses arrive asynchronously and
//! are tagged with the request id that produced them; only the latest
//! request's response is applied, everything else is dropped on arrival.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, BorderType, Borders, List, ListState, Paragraph, Wrap},
    Frame,
};

use crate::bus::{Message, MessageBus, Subscription, Topic};
use crate::constants::{EMPTY_STATE_NO_MATTERS, ERROR_QUERY_FAILED, INFO_DRAG_PAYLOAD, LOADING_MATTERS, TITLE_MATTERS};
use crate::model::{page_count, FilterState, Matter, PageRequest, PageResult};
use crate::service::{QueryService, ServiceError};
use crate::ui::components::tile::{Tile, TileEvent};
use crate::ui::core::{Action, Component, RequestId, RequestTracker, TaskManager};

/// Presentation flags for the list.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListOptions {
    pub tiles_draggable: bool,
    pub search_bar_visible: bool,
}

/// What the list currently renders.
#[derive(Debug, Clone, PartialEq)]
pub enum ListView {
    /// No response yet
    Loading,
    /// Query failed; tiles and paginator are suppressed
    Error(ServiceError),
    /// Zero matching matters; tiles and paginator are suppressed
    Empty,
    /// Tiles plus paginator
    Page { item_count: usize, page_number: u32, page_count: u32 },
}

struct ListCore {
    filters: FilterState,
    page_number: u32,
    page_size: u32,
    total_item_count: Option<u64>,
    page: Option<PageResult>,
    error: Option<ServiceError>,
    requests: RequestTracker,
    in_flight: bool,
    query: Arc<dyn QueryService>,
    tasks: TaskManager,
}

impl ListCore {
    fn requery(&mut self) -> RequestId {
        let request_id = self.requests.issue();
        let request = PageRequest {
            filters: self.filters.clone(),
            page_number: self.page_number,
        };
        log::debug!("ListContainer: request {} for page {}", request_id, self.page_number);
        self.in_flight = true;
        self.tasks.spawn_page_query(request_id, Arc::clone(&self.query), request);
        request_id
    }

    /// New filters start a new result set: the old total no longer bounds
    /// paging and the old error no longer applies.
    fn set_filters(&mut self, filters: FilterState) -> RequestId {
        self.filters = filters;
        self.page_number = 1;
        self.total_item_count = None;
        self.error = None;
        self.requery()
    }

    fn is_last_page(&self) -> bool {
        match self.total_item_count {
            Some(total) => u64::from(self.page_number) * u64::from(self.page_size) >= total,
            None => true,
        }
    }

    fn view(&self) -> ListView {
        if let Some(error) = &self.error {
            // A retry in flight replaces the error surface
            return if self.in_flight {
                ListView::Loading
            } else {
                ListView::Error(error.clone())
            };
        }
        match (&self.page, self.total_item_count) {
            (_, Some(0)) => ListView::Empty,
            (Some(page), Some(total)) => ListView::Page {
                item_count: page.items.len(),
                page_number: page.page_number,
                page_count: page_count(total, page.page_size),
            },
            _ => ListView::Loading,
        }
    }

    /// Tiles on screen. Empty unless the page view is shown.
    fn visible_items(&self) -> &[Matter] {
        match (self.view(), &self.page) {
            (ListView::Page { .. }, Some(page)) => &page.items,
            _ => &[],
        }
    }
}

pub struct ListContainer {
    core: Rc<RefCell<ListCore>>,
    bus: MessageBus,
    subscriptions: Vec<Subscription>,
    options: ListOptions,
    searching: bool,
    search_text: String,
    list_state: ListState,
}

impl ListContainer {
    /// Subscribe to filter changes and issue the initial page request.
    pub fn new(
        bus: MessageBus,
        tasks: TaskManager,
        query: Arc<dyn QueryService>,
        page_size: u32,
        options: ListOptions,
    ) -> Self {
        let core = Rc::new(RefCell::new(ListCore {
            filters: FilterState::default(),
            page_number: 1,
            page_size: page_size.max(1),
            total_item_count: None,
            page: None,
            error: None,
            requests: RequestTracker::new(),
            in_flight: false,
            query,
            tasks,
        }));

        let weak = Rc::downgrade(&core);
        let subscription = bus.subscribe(Topic::MattersFiltered, move |message| {
            let Message::FiltersChanged { filters } = message else {
                return Ok(());
            };
            let core = weak
                .upgrade()
                .ok_or_else(|| anyhow::anyhow!("list container no longer exists"))?;
            let mut core = core
                .try_borrow_mut()
                .map_err(|_| anyhow::anyhow!("list container state is busy"))?;
            core.set_filters(filters.clone());
            Ok(())
        });

        core.borrow_mut().requery();

        Self {
            core,
            bus,
            subscriptions: vec![subscription],
            options,
            searching: false,
            search_text: String::new(),
            list_state: ListState::default(),
        }
    }

    pub fn filters(&self) -> FilterState {
        self.core.borrow().filters.clone()
    }

    pub fn page_number(&self) -> u32 {
        self.core.borrow().page_number
    }

    pub fn total_item_count(&self) -> Option<u64> {
        self.core.borrow().total_item_count
    }

    /// Tiles currently displayed. Empty while loading a new result set and
    /// in the empty or error views.
    pub fn items(&self) -> Vec<Matter> {
        self.core.borrow().visible_items().to_vec()
    }

    /// Page number of the response currently displayed.
    pub fn displayed_page_number(&self) -> Option<u32> {
        self.core.borrow().page.as_ref().map(|page| page.page_number)
    }

    pub fn latest_request(&self) -> Option<RequestId> {
        self.core.borrow().requests.latest()
    }

    pub fn is_loading(&self) -> bool {
        self.core.borrow().in_flight
    }

    pub fn is_last_page(&self) -> bool {
        self.core.borrow().is_last_page()
    }

    pub fn view(&self) -> ListView {
        self.core.borrow().view()
    }

    /// Advance one page. No-op on the last page.
    pub fn next_page(&mut self) -> bool {
        let mut core = self.core.borrow_mut();
        if core.is_last_page() {
            log::debug!("ListContainer: already on last page {}", core.page_number);
            return false;
        }
        core.page_number += 1;
        core.requery();
        true
    }

    /// Go back one page. No-op on page 1.
    pub fn previous_page(&mut self) -> bool {
        let mut core = self.core.borrow_mut();
        if core.page_number <= 1 {
            return false;
        }
        core.page_number -= 1;
        core.requery();
        true
    }

    /// Re-issue the current request, e.g. after a failure.
    pub fn retry(&mut self) -> RequestId {
        self.core.borrow_mut().requery()
    }

    /// Inline search bar edit: replaces the filters with a lowercase search key.
    pub fn handle_search_key_change(&mut self, text: &str) -> RequestId {
        self.core
            .borrow_mut()
            .set_filters(FilterState::with_search_key(text.to_lowercase()))
    }

    /// Apply a query response. Returns false when the response is stale.
    pub fn apply_page_result(&mut self, request_id: RequestId, result: Result<PageResult, ServiceError>) -> bool {
        let mut core = self.core.borrow_mut();
        if !core.requests.is_current(request_id) {
            log::debug!(
                "ListContainer: discarding stale response {} (latest {:?})",
                request_id,
                core.requests.latest()
            );
            return false;
        }
        core.in_flight = false;

        match result {
            Ok(page) => {
                core.total_item_count = Some(page.total_item_count);
                core.page_size = page.page_size.max(1);
                core.error = None;
                core.page = Some(page);
            }
            Err(e) => {
                log::error!("ListContainer: {}", e);
                core.error = Some(e);
            }
        }
        drop(core);
        self.clamp_selection();
        true
    }

    /// Route an event from one of this list's tiles.
    pub fn handle_tile_event(&self, event: TileEvent) -> Action {
        match event {
            TileEvent::Selected { item_id } => {
                log::info!("ListContainer: matter '{}' selected", item_id);
                self.bus.publish(Message::ItemSelected { item_id: Some(item_id) });
                Action::None
            }
            TileEvent::DragStarted { payload } => {
                log::info!("ListContainer: drag payload {}", payload);
                Action::ShowInfo(format!("{}: {}", INFO_DRAG_PAYLOAD, payload))
            }
        }
    }

    /// Select the tile at `index` on the current page.
    pub fn select(&mut self, index: usize) -> Action {
        let items = self.items();
        let Some(matter) = items.get(index) else {
            return Action::None;
        };
        self.list_state.select(Some(index));
        let event = Tile::new(matter, self.options.tiles_draggable).click();
        self.handle_tile_event(event)
    }

    fn drag_selected(&self) -> Action {
        let items = self.items();
        let Some(matter) = self.list_state.selected().and_then(|i| items.get(i)) else {
            return Action::None;
        };
        match Tile::new(matter, self.options.tiles_draggable).drag_start() {
            Some(Ok(event)) => self.handle_tile_event(event),
            Some(Err(e)) => {
                log::error!("ListContainer: failed to serialize matter '{}': {}", matter.id, e);
                Action::None
            }
            None => Action::None,
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.core.borrow().visible_items().len();
        if len == 0 {
            self.list_state.select(None);
        } else {
            let index = self.list_state.selected().unwrap_or(0).min(len - 1);
            self.list_state.select(Some(index));
        }
    }

    fn move_selection(&mut self, delta: isize) {
        let len = self.core.borrow().visible_items().len();
        if len == 0 {
            return;
        }
        let current = self.list_state.selected().unwrap_or(0);
        let next = current.saturating_add_signed(delta).min(len - 1);
        self.list_state.select(Some(next));
    }

    /// Drop all bus subscriptions held by the list.
    pub fn dispose(&mut self) {
        for subscription in self.subscriptions.drain(..) {
            subscription.unsubscribe();
        }
    }

    fn render_search_bar(&self, f: &mut Frame, rect: Rect, focused: bool) {
        let mut text = self.search_text.clone();
        if self.searching && focused {
            text.push('▏');
        }
        let color = if self.searching { Color::Cyan } else { Color::DarkGray };
        let bar = Paragraph::new(text).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .title("Search (/)")
                .border_style(Style::default().fg(color)),
        );
        f.render_widget(bar, rect);
    }

    fn render_message(f: &mut Frame, rect: Rect, text: String, color: Color) {
        let message = Paragraph::new(text)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .style(Style::default().fg(color));
        f.render_widget(message, rect);
    }

    fn render_paginator(&self, f: &mut Frame, rect: Rect, page_number: u32, pages: u32) {
        let core = self.core.borrow();
        let total = core.total_item_count.unwrap_or(0);
        let loading = if core.in_flight { "  ⟳" } else { "" };
        let previous = if page_number > 1 { "◀ p" } else { "   " };
        let next = if core.is_last_page() { "   " } else { "n ▶" };
        let text = format!(
            "{}  Page {} of {}  {}  •  {} matters{}",
            previous, page_number, pages, next, total, loading
        );
        Self::render_message(f, rect, text, Color::Gray);
    }
}

impl Component for ListContainer {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        if self.searching {
            match key.code {
                KeyCode::Esc | KeyCode::Enter => self.searching = false,
                KeyCode::Backspace => {
                    self.search_text.pop();
                    let text = self.search_text.clone();
                    self.handle_search_key_change(&text);
                }
                KeyCode::Char(c) => {
                    self.search_text.push(c);
                    let text = self.search_text.clone();
                    self.handle_search_key_change(&text);
                }
                _ => {}
            }
            return Action::None;
        }

        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.move_selection(-1);
                Action::None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.move_selection(1);
                Action::None
            }
            KeyCode::Enter => match self.list_state.selected() {
                Some(index) => self.select(index),
                None => Action::None,
            },
            KeyCode::Right | KeyCode::Char('n') => {
                self.next_page();
                Action::None
            }
            KeyCode::Left | KeyCode::Char('p') => {
                self.previous_page();
                Action::None
            }
            KeyCode::Char('r') => {
                self.retry();
                Action::None
            }
            KeyCode::Char('y') => self.drag_selected(),
            KeyCode::Char('/') if self.options.search_bar_visible => {
                self.searching = true;
                Action::None
            }
            _ => Action::None,
        }
    }

    fn captures_text(&self) -> bool {
        self.searching
    }

    fn on_blur(&mut self) {
        self.searching = false;
    }

    fn render(&mut self, f: &mut Frame, rect: Rect, focused: bool) {
        let border = if focused { Color::Cyan } else { Color::DarkGray };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(TITLE_MATTERS)
            .border_style(Style::default().fg(border));
        let inner = block.inner(rect);
        f.render_widget(block, rect);

        let search_height = if self.options.search_bar_visible { 3 } else { 0 };
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(search_height),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(inner);

        if self.options.search_bar_visible {
            self.render_search_bar(f, chunks[0], focused);
        }

        match self.view() {
            ListView::Loading => Self::render_message(f, chunks[1], LOADING_MATTERS.to_string(), Color::Yellow),
            ListView::Error(error) => Self::render_message(
                f,
                chunks[1],
                format!("{}\n\n{}\n\nPress 'r' to retry", ERROR_QUERY_FAILED, error),
                Color::Red,
            ),
            ListView::Empty => {
                Self::render_message(f, chunks[1], EMPTY_STATE_NO_MATTERS.to_string(), Color::Gray)
            }
            ListView::Page {
                page_number,
                page_count,
                ..
            } => {
                let items = self.items();
                let selected = if focused { self.list_state.selected() } else { None };
                let tiles: Vec<_> = items
                    .iter()
                    .enumerate()
                    .map(|(i, matter)| Tile::new(matter, self.options.tiles_draggable).render(selected == Some(i)))
                    .collect();
                f.render_stateful_widget(List::new(tiles), chunks[1], &mut self.list_state);
                self.render_paginator(f, chunks[2], page_number, page_count);
            }
        }
    }
}

impl Drop for ListContainer {
    fn drop(&mut self) {
        self.dispose();
    }
}
