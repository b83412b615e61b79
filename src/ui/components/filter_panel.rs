//! Filter panel: owns the filter criteria and publishes them on the bus.
//!
//! Checkbox toggles publish immediately. Free-text edits (search key and the
//! decision date bounds) restart a single debounce timer and only the state
//! after the quiet period is published.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::bus::{Message, MessageBus};
use crate::constants::{ERROR_CATALOG_FAILED, TITLE_FILTERS};
use crate::model::{FilterField, FilterState, PicklistValue};
use crate::service::{CatalogService, ServiceError};
use crate::ui::core::{Action, Component, Debouncer, TaskManager};

/// Load state of one field's selectable values.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogState {
    Loading,
    Loaded(Vec<PicklistValue>),
    Failed(ServiceError),
}

/// Free-text inputs of the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextInput {
    SearchKey,
    BeginningDecisionDate,
    EndingDecisionDate,
}

impl TextInput {
    fn label(self) -> &'static str {
        match self {
            TextInput::SearchKey => "Search",
            TextInput::BeginningDecisionDate => "Decided from",
            TextInput::EndingDecisionDate => "Decided to",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Row {
    Text(TextInput),
    Checkbox { field: FilterField, value: String, label: String },
}

pub struct FilterPanel {
    filters: FilterState,
    catalogs: BTreeMap<FilterField, CatalogState>,
    seeded: bool,
    search_text: String,
    begin_text: String,
    end_text: String,
    debouncer: Debouncer,
    bus: MessageBus,
    tasks: TaskManager,
    cursor: usize,
    scroll: u16,
}

impl FilterPanel {
    pub fn new(bus: MessageBus, tasks: TaskManager, debounce_delay: Duration) -> Self {
        let catalogs = FilterField::ALL.iter().map(|f| (*f, CatalogState::Loading)).collect();
        Self {
            filters: FilterState::default(),
            catalogs,
            seeded: false,
            search_text: String::new(),
            begin_text: String::new(),
            end_text: String::new(),
            debouncer: Debouncer::new(debounce_delay),
            bus,
            tasks,
            cursor: 0,
            scroll: 0,
        }
    }

    /// Ask the catalog service for every field's values.
    pub fn request_catalogs(&mut self, service: &Arc<dyn CatalogService>) {
        for field in FilterField::ALL {
            self.catalogs.insert(field, CatalogState::Loading);
            self.tasks.spawn_catalog_load(field, Arc::clone(service));
        }
    }

    pub fn apply_catalog(&mut self, field: FilterField, result: Result<Vec<PicklistValue>, ServiceError>) {
        let state = match result {
            Ok(values) => {
                log::debug!("FilterPanel: {} catalog loaded with {} values", field, values.len());
                if self.seeded && self.filters.set(field).is_none() {
                    log::debug!(
                        "FilterPanel: {} catalog arrived after seeding; it stays unconstrained until toggled",
                        field
                    );
                }
                CatalogState::Loaded(values)
            }
            Err(e) => {
                log::warn!("FilterPanel: omitting {} filter: {}", field, e);
                CatalogState::Failed(e)
            }
        };
        self.catalogs.insert(field, state);
        self.clamp_cursor();
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn catalog_state(&self, field: FilterField) -> Option<&CatalogState> {
        self.catalogs.get(&field)
    }

    /// Fields whose checkbox group is rendered.
    pub fn visible_controls(&self) -> Vec<FilterField> {
        FilterField::ALL
            .into_iter()
            .filter(|field| matches!(self.catalogs.get(field), Some(CatalogState::Loaded(_))))
            .collect()
    }

    fn catalog_values(&self, field: FilterField) -> Option<&[PicklistValue]> {
        match self.catalogs.get(&field) {
            Some(CatalogState::Loaded(values)) => Some(values),
            _ => None,
        }
    }

    pub fn is_checked(&self, field: FilterField, value: &str) -> bool {
        self.filters.set(field).map_or(true, |set| set.contains(value))
    }

    pub fn has_pending_publish(&self) -> bool {
        self.debouncer.is_pending()
    }

    fn publish(&self) {
        log::debug!("FilterPanel: publishing filters {:?}", self.filters);
        self.bus.publish(Message::FiltersChanged {
            filters: self.filters.clone(),
        });
    }

    fn schedule_publish(&mut self) {
        self.debouncer.schedule(&self.tasks);
    }

    /// Called when a debounce timer elapses. Publishes if it is still the
    /// pending one.
    pub fn on_debounce_elapsed(&mut self, generation: u64) -> bool {
        if self.debouncer.fire(generation) {
            self.publish();
            true
        } else {
            log::trace!("FilterPanel: ignoring superseded debounce timer {}", generation);
            false
        }
    }

    pub fn handle_search_key_change(&mut self, text: impl Into<String>) {
        self.search_text = text.into();
        self.filters.search_key = self.search_text.clone();
        self.schedule_publish();
    }

    pub fn handle_beginning_date_change(&mut self, text: impl Into<String>) {
        self.begin_text = text.into();
        self.filters.decision_date.begin = parse_date(&self.begin_text);
        self.schedule_publish();
    }

    pub fn handle_ending_date_change(&mut self, text: impl Into<String>) {
        self.end_text = text.into();
        self.filters.decision_date.end = parse_date(&self.end_text);
        self.schedule_publish();
    }

    /// Record a checkbox toggle and publish immediately.
    ///
    /// Returns false when `field` has no rendered control or `value` is not
    /// one of its catalog values.
    pub fn handle_checkbox_change(&mut self, field: FilterField, value: &str, checked: bool) -> bool {
        let Some(values) = self.catalog_values(field) else {
            log::warn!("FilterPanel: ignoring toggle on {} which has no loaded catalog", field);
            return false;
        };
        if !values.iter().any(|v| v.value == value) {
            log::warn!("FilterPanel: ignoring toggle of unknown {} value '{}'", field, value);
            return false;
        }

        if !self.seeded {
            self.seed_from_catalogs();
        }
        if self.filters.set(field).is_none() {
            self.seed_field(field);
        }

        if let Some(set) = self.filters.set_mut(field) {
            if checked {
                set.insert(value.to_string());
            } else {
                set.remove(value);
            }
        }

        self.publish();
        true
    }

    /// First interaction: every loaded field starts out fully selected.
    fn seed_from_catalogs(&mut self) {
        for field in FilterField::ALL {
            self.seed_field(field);
        }
        self.seeded = true;
    }

    fn seed_field(&mut self, field: FilterField) {
        let Some(values) = self.catalog_values(field) else {
            return;
        };
        let all: BTreeSet<String> = values.iter().map(|v| v.value.clone()).collect();
        *self.filters.set_mut(field) = Some(all);
    }

    /// Cancel any pending publish. The panel holds no bus subscriptions.
    pub fn dispose(&mut self) {
        self.debouncer.cancel(&self.tasks);
    }

    fn rows(&self) -> Vec<Row> {
        let mut rows = vec![
            Row::Text(TextInput::SearchKey),
            Row::Text(TextInput::BeginningDecisionDate),
            Row::Text(TextInput::EndingDecisionDate),
        ];
        for field in FilterField::ALL {
            if let Some(values) = self.catalog_values(field) {
                rows.extend(values.iter().map(|v| Row::Checkbox {
                    field,
                    value: v.value.clone(),
                    label: v.label.clone(),
                }));
            }
        }
        rows
    }

    fn clamp_cursor(&mut self) {
        let len = self.rows().len();
        if self.cursor >= len {
            self.cursor = len.saturating_sub(1);
        }
    }

    fn current_row(&self) -> Option<Row> {
        self.rows().into_iter().nth(self.cursor)
    }

    fn text(&self, input: TextInput) -> &str {
        match input {
            TextInput::SearchKey => &self.search_text,
            TextInput::BeginningDecisionDate => &self.begin_text,
            TextInput::EndingDecisionDate => &self.end_text,
        }
    }

    fn edit_text(&mut self, input: TextInput, edit: impl FnOnce(&mut String)) {
        let mut text = self.text(input).to_string();
        edit(&mut text);
        match input {
            TextInput::SearchKey => self.handle_search_key_change(text),
            TextInput::BeginningDecisionDate => self.handle_beginning_date_change(text),
            TextInput::EndingDecisionDate => self.handle_ending_date_change(text),
        }
    }

    fn build_lines(&self, focused: bool) -> (Vec<Line<'static>>, usize) {
        let mut lines = Vec::new();
        let mut cursor_line = 0;
        let mut row_index = 0;
        let highlight = |selected: bool| {
            if selected && focused {
                Style::default().fg(Color::Black).bg(Color::Cyan)
            } else {
                Style::default()
            }
        };

        for input in [
            TextInput::SearchKey,
            TextInput::BeginningDecisionDate,
            TextInput::EndingDecisionDate,
        ] {
            let selected = row_index == self.cursor;
            if selected {
                cursor_line = lines.len();
            }
            let mut value = self.text(input).to_string();
            if selected && focused {
                value.push('▏');
            }
            let raw = self.text(input);
            let invalid = input != TextInput::SearchKey && !raw.trim().is_empty() && parse_date(raw).is_none();
            lines.push(Line::from(vec![
                Span::styled(format!("{:<13}", input.label()), Style::default().fg(Color::Gray)),
                Span::styled(
                    format!("[{}]", value),
                    highlight(selected).fg(if invalid { Color::Red } else { Color::White }),
                ),
            ]));
            row_index += 1;
        }

        for field in FilterField::ALL {
            lines.push(Line::from(""));
            match self.catalogs.get(&field) {
                Some(CatalogState::Loaded(values)) => {
                    lines.push(Line::from(Span::styled(
                        field.label().to_string(),
                        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                    )));
                    for value in values {
                        let selected = row_index == self.cursor;
                        if selected {
                            cursor_line = lines.len();
                        }
                        let mark = if self.is_checked(field, &value.value) { "[x]" } else { "[ ]" };
                        lines.push(Line::from(Span::styled(
                            format!("{} {}", mark, value.label),
                            highlight(selected),
                        )));
                        row_index += 1;
                    }
                }
                Some(CatalogState::Failed(_)) => {
                    lines.push(Line::from(Span::styled(
                        format!("{} {}", ERROR_CATALOG_FAILED, field.label()),
                        Style::default().fg(Color::Red),
                    )));
                }
                Some(CatalogState::Loading) | None => {
                    lines.push(Line::from(Span::styled(
                        format!("{} …", field.label()),
                        Style::default().fg(Color::DarkGray),
                    )));
                }
            }
        }

        (lines, cursor_line)
    }
}

fn parse_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d").ok()
}

impl Component for FilterPanel {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        let row_count = self.rows().len();
        match (key.code, self.current_row()) {
            (KeyCode::Up, _) => {
                self.cursor = self.cursor.saturating_sub(1);
                Action::None
            }
            (KeyCode::Down, _) => {
                if self.cursor + 1 < row_count {
                    self.cursor += 1;
                }
                Action::None
            }
            (KeyCode::Char(c), Some(Row::Text(input))) => {
                self.edit_text(input, |text| text.push(c));
                Action::None
            }
            (KeyCode::Backspace, Some(Row::Text(input))) => {
                self.edit_text(input, |text| {
                    text.pop();
                });
                Action::None
            }
            (KeyCode::Char(' ') | KeyCode::Enter, Some(Row::Checkbox { field, value, .. })) => {
                let checked = !self.is_checked(field, &value);
                self.handle_checkbox_change(field, &value, checked);
                Action::None
            }
            _ => Action::None,
        }
    }

    fn captures_text(&self) -> bool {
        matches!(self.current_row(), Some(Row::Text(_)))
    }

    fn render(&mut self, f: &mut Frame, rect: Rect, focused: bool) {
        let (lines, cursor_line) = self.build_lines(focused);

        // Keep the cursor row inside the viewport
        let visible = rect.height.saturating_sub(2);
        let cursor_line = u16::try_from(cursor_line).unwrap_or(u16::MAX);
        if cursor_line < self.scroll {
            self.scroll = cursor_line;
        } else if visible > 0 && cursor_line >= self.scroll + visible {
            self.scroll = cursor_line + 1 - visible;
        }

        let border = if focused { Color::Cyan } else { Color::DarkGray };
        let panel = Paragraph::new(lines).scroll((self.scroll, 0)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .title(TITLE_FILTERS)
                .border_style(Style::default().fg(border)),
        );
        f.render_widget(panel, rect);
    }
}
