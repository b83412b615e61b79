use crate::config::Config;
use crate::logger::Logger;
use crate::service::NavigationTarget;
use crate::ui::components::{DetailCard, FilterPanel, ListContainer, ListOptions, OverlayView, StatusBar};
use crate::ui::core::{Action, AppContext, Component, Overlay, Pane, TaskManager};
use crate::ui::layout::LayoutManager;
use crate::ui::navigation::ChannelNavigator;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;

/// Root component: owns the three panes and routes keys and background
/// results to them.
pub struct AppComponent {
    // Component composition
    filters: FilterPanel,
    list: ListContainer,
    detail: DetailCard,

    // Simple UI state
    focus: Pane,
    overlay: Option<Overlay>,
    record_page: Option<NavigationTarget>,
    info_message: Option<String>,
    should_quit: bool,

    // Services
    tasks: TaskManager,
    logger: Option<Logger>,
    config: Config,
}

impl AppComponent {
    /// Build the panes. The list issues its first query and the filter
    /// panel starts loading catalogs immediately.
    pub fn new(ctx: &AppContext) -> Self {
        let mut filters = FilterPanel::new(
            ctx.bus.clone(),
            ctx.tasks.clone(),
            ctx.config.filters.debounce_delay(),
        );
        filters.request_catalogs(&ctx.catalogs);

        let list = ListContainer::new(
            ctx.bus.clone(),
            ctx.tasks.clone(),
            ctx.query.clone(),
            ctx.config.data.page_size,
            ListOptions {
                tiles_draggable: ctx.config.ui.tiles_draggable,
                search_bar_visible: ctx.config.ui.search_bar_visible,
            },
        );

        let navigator = ChannelNavigator::new(ctx.tasks.action_sender());
        let detail = DetailCard::new(&ctx.bus, ctx.tasks.clone(), ctx.records.clone(), Box::new(navigator));

        Self {
            filters,
            list,
            detail,
            focus: Pane::default(),
            overlay: None,
            record_page: None,
            info_message: None,
            should_quit: false,
            tasks: ctx.tasks.clone(),
            logger: ctx.logger.clone(),
            config: ctx.config.clone(),
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn focus(&self) -> Pane {
        self.focus
    }

    pub fn overlay(&self) -> Option<Overlay> {
        self.overlay
    }

    pub fn record_page(&self) -> Option<&NavigationTarget> {
        self.record_page.as_ref()
    }

    pub fn info_message(&self) -> Option<&str> {
        self.info_message.as_deref()
    }

    pub fn filter_panel(&mut self) -> &mut FilterPanel {
        &mut self.filters
    }

    pub fn list(&mut self) -> &mut ListContainer {
        &mut self.list
    }

    pub fn detail(&mut self) -> &mut DetailCard {
        &mut self.detail
    }

    fn focused(&mut self) -> &mut dyn Component {
        match self.focus {
            Pane::Filters => &mut self.filters,
            Pane::List => &mut self.list,
            Pane::Detail => &mut self.detail,
        }
    }

    fn set_focus(&mut self, pane: Pane) {
        if pane != self.focus {
            self.focused().on_blur();
            self.focus = pane;
            self.focused().on_focus();
        }
    }

    /// Translate a key press into an action, letting the focused pane
    /// consume it first when it is editing text.
    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        if let Some(overlay) = self.overlay {
            return match key.code {
                KeyCode::Esc | KeyCode::Char('q') => Action::HideOverlay,
                KeyCode::Char('G') if overlay == Overlay::Logs => Action::HideOverlay,
                KeyCode::Char('?') if overlay == Overlay::Help => Action::HideOverlay,
                _ => Action::None,
            };
        }

        if self.record_page.is_some() {
            return match key.code {
                KeyCode::Esc | KeyCode::Backspace => Action::CloseRecordPage,
                KeyCode::Char('q') => Action::Quit,
                _ => Action::None,
            };
        }

        self.info_message = None;

        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return Action::Quit,
            KeyCode::Tab => return Action::FocusNext,
            KeyCode::BackTab => return Action::FocusPrevious,
            _ => {}
        }

        if self.focused().captures_text() {
            return self.focused().handle_key_events(key);
        }

        match key.code {
            KeyCode::Char('q') => {
                log::info!("Global key: 'q' - quitting application");
                Action::Quit
            }
            KeyCode::Char('?') => Action::ShowOverlay(Overlay::Help),
            KeyCode::Char('G') => Action::ShowOverlay(Overlay::Logs),
            _ => self.focused().handle_key_events(key),
        }
    }

    /// Apply an action, whether it came from a key or a background task.
    pub fn handle_app_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::FocusNext => self.set_focus(self.focus.next()),
            Action::FocusPrevious => self.set_focus(self.focus.previous()),
            Action::CatalogLoaded { field, result } => self.filters.apply_catalog(field, result),
            Action::PageLoaded { request_id, result } => {
                self.list.apply_page_result(request_id, result);
            }
            Action::RecordLoaded { request_id, result } => {
                self.detail.apply_record(request_id, result);
            }
            Action::DebounceElapsed { generation } => {
                self.filters.on_debounce_elapsed(generation);
            }
            Action::Navigate(target) => {
                log::info!("Opening record page for '{}'", target.item_id);
                self.record_page = Some(target);
            }
            Action::CloseRecordPage => self.record_page = None,
            Action::ShowInfo(message) => self.info_message = Some(message),
            Action::ShowOverlay(overlay) => self.overlay = Some(overlay),
            Action::HideOverlay => self.overlay = None,
            Action::None => {}
        }
    }

    /// Housekeeping run once per loop iteration.
    pub fn on_tick(&mut self) {
        for (task_id, description) in self.tasks.cleanup_finished_tasks() {
            log::trace!("Task {} finished: {}", task_id, description);
        }
    }

    pub fn slow_tasks(&self, threshold: std::time::Duration) -> Vec<String> {
        self.tasks.long_running(threshold)
    }

    pub fn render(&mut self, f: &mut Frame) {
        let area = f.area();

        if self.record_page.is_some() {
            self.detail.render_record_page(f, area);
            return;
        }

        let panes = LayoutManager::main_layout(
            area,
            self.config.ui.filter_panel_width,
            self.config.ui.detail_panel_width,
        );

        let focus = self.focus;
        self.filters.render(f, panes.filters, focus == Pane::Filters);
        self.list.render(f, panes.list, focus == Pane::List);
        self.detail.render(f, panes.detail, focus == Pane::Detail);
        StatusBar::render(
            f,
            panes.status,
            focus,
            self.list.is_loading(),
            self.info_message.as_deref(),
        );

        if let Some(overlay) = self.overlay {
            let logs = self.logger.as_ref().map(Logger::get_logs).unwrap_or_default();
            OverlayView::render(f, area, overlay, &logs);
        }
    }

    /// Unsubscribe every pane and stop background work.
    pub fn shutdown(&mut self) {
        self.filters.dispose();
        self.list.dispose();
        self.detail.dispose();
        self.tasks.cancel_all_tasks();
    }
}
