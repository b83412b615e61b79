mod common;

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use matterlist::bus::{Message, MessageBus, Subscription, Topic};
use matterlist::model::{FilterField, FilterState};
use matterlist::service::CatalogService;
use matterlist::ui::components::{CatalogState, FilterPanel};
use matterlist::ui::core::{Action, Component, TaskManager};
use tokio::sync::mpsc::UnboundedReceiver;

const DEBOUNCE: Duration = Duration::from_millis(350);

struct Harness {
    panel: FilterPanel,
    published: Rc<RefCell<Vec<FilterState>>>,
    rx: UnboundedReceiver<Action>,
    _subscription: Subscription,
}

impl Harness {
    fn new() -> Self {
        let bus = MessageBus::new();
        let (tasks, rx) = TaskManager::new();
        let published = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&published);
        let subscription = bus.subscribe(Topic::MattersFiltered, move |message| {
            if let Message::FiltersChanged { filters } = message {
                sink.borrow_mut().push(filters.clone());
            }
            Ok(())
        });

        Self {
            panel: FilterPanel::new(bus, tasks, DEBOUNCE),
            published,
            rx,
            _subscription: subscription,
        }
    }

    /// Load catalogs from `service` and apply every result.
    async fn with_catalogs(service: Arc<dyn CatalogService>) -> Self {
        let mut harness = Self::new();
        harness.panel.request_catalogs(&service);
        let actions = common::settle(&mut harness.rx).await;
        harness.pump(actions);
        harness
    }

    fn pump(&mut self, actions: Vec<Action>) {
        for action in actions {
            match action {
                Action::CatalogLoaded { field, result } => self.panel.apply_catalog(field, result),
                Action::DebounceElapsed { generation } => {
                    self.panel.on_debounce_elapsed(generation);
                }
                _ => {}
            }
        }
    }

    async fn advance(&mut self, duration: Duration) {
        let actions = common::advance(&mut self.rx, duration).await;
        self.pump(actions);
    }

    fn publish_count(&self) -> usize {
        self.published.borrow().len()
    }

    fn last_published(&self) -> FilterState {
        self.published.borrow().last().cloned().expect("nothing was published")
    }
}

fn set(values: &[&str]) -> Option<BTreeSet<String>> {
    Some(values.iter().map(|v| v.to_string()).collect())
}

#[tokio::test(start_paused = true)]
async fn test_unchecking_seeds_from_catalog_and_publishes_immediately() {
    let mut h = Harness::with_catalogs(common::fixture(3, 10)).await;
    assert_eq!(h.publish_count(), 0);
    assert!(h.panel.is_checked(FilterField::Type, "Consumer"));

    assert!(h.panel.handle_checkbox_change(FilterField::Type, "Consumer", false));

    assert_eq!(h.publish_count(), 1);
    let published = h.last_published();
    assert_eq!(published.types, set(&["Employment", "Housing"]));
    assert_eq!(published.stages, set(&["Closed", "Intake"]));
    assert!(!h.panel.is_checked(FilterField::Type, "Consumer"));
}

#[tokio::test(start_paused = true)]
async fn test_toggling_twice_restores_full_set() {
    let mut h = Harness::with_catalogs(common::fixture(3, 10)).await;

    h.panel.handle_checkbox_change(FilterField::Stage, "Closed", false);
    h.panel.handle_checkbox_change(FilterField::Stage, "Closed", true);

    assert_eq!(h.publish_count(), 2);
    assert_eq!(h.last_published().stages, set(&["Closed", "Intake"]));
}

#[tokio::test(start_paused = true)]
async fn test_published_set_is_catalog_minus_unchecked() {
    let mut h = Harness::with_catalogs(common::fixture(3, 10)).await;
    let catalog = ["Consumer", "Employment", "Housing"];
    let mut unchecked: BTreeSet<&str> = BTreeSet::new();

    let toggles = [
        ("Housing", false),
        ("Consumer", false),
        ("Housing", true),
        ("Employment", false),
        ("Employment", false),
        ("Consumer", true),
        ("Employment", true),
    ];

    for (value, checked) in toggles {
        h.panel.handle_checkbox_change(FilterField::Type, value, checked);
        if checked {
            unchecked.remove(value);
        } else {
            unchecked.insert(value);
        }

        let expected: BTreeSet<String> = catalog
            .iter()
            .filter(|v| !unchecked.contains(*v))
            .map(|v| v.to_string())
            .collect();
        assert_eq!(h.last_published().types, Some(expected));
    }
    assert_eq!(h.publish_count(), toggles.len());
}

#[tokio::test(start_paused = true)]
async fn test_rapid_edits_publish_once_with_final_text() {
    let mut h = Harness::with_catalogs(common::fixture(3, 10)).await;

    for text in ["a", "ac", "acm", "acme"] {
        h.panel.handle_search_key_change(text);
        h.advance(Duration::from_millis(100)).await;
    }
    assert_eq!(h.publish_count(), 0);
    assert!(h.panel.has_pending_publish());

    h.advance(Duration::from_millis(400)).await;

    assert_eq!(h.publish_count(), 1);
    assert_eq!(h.last_published().search_key, "acme");
    assert!(!h.panel.has_pending_publish());
}

#[tokio::test(start_paused = true)]
async fn test_edits_separated_by_quiet_period_publish_each() {
    let mut h = Harness::new();

    h.panel.handle_search_key_change("smith");
    h.advance(Duration::from_millis(400)).await;
    h.panel.handle_search_key_change("smithson");
    h.advance(Duration::from_millis(400)).await;

    let keys: Vec<String> = h.published.borrow().iter().map(|f| f.search_key.clone()).collect();
    assert_eq!(keys, vec!["smith", "smithson"]);
}

#[tokio::test(start_paused = true)]
async fn test_superseded_timer_is_ignored() {
    let mut h = Harness::new();

    h.panel.handle_search_key_change("a");
    h.panel.handle_search_key_change("ab");

    // Generation 1 was replaced by generation 2
    assert!(!h.panel.on_debounce_elapsed(1));
    assert_eq!(h.publish_count(), 0);
    assert!(h.panel.on_debounce_elapsed(2));
    assert_eq!(h.last_published().search_key, "ab");
}

#[tokio::test(start_paused = true)]
async fn test_date_bounds_are_debounced_and_parsed() {
    let mut h = Harness::new();

    h.panel.handle_beginning_date_change("2024-01-01");
    h.panel.handle_ending_date_change("2024-13-40");
    h.advance(Duration::from_millis(400)).await;

    assert_eq!(h.publish_count(), 1);
    let published = h.last_published();
    assert_eq!(
        published.decision_date.begin,
        chrono::NaiveDate::from_ymd_opt(2024, 1, 1)
    );
    assert_eq!(published.decision_date.end, None);
}

#[tokio::test(start_paused = true)]
async fn test_checkbox_does_not_cancel_pending_text_publish() {
    let mut h = Harness::with_catalogs(common::fixture(3, 10)).await;

    h.panel.handle_search_key_change("acme");
    h.panel.handle_checkbox_change(FilterField::Type, "Housing", false);
    assert_eq!(h.publish_count(), 1);
    assert!(h.panel.has_pending_publish());

    h.advance(Duration::from_millis(400)).await;

    assert_eq!(h.publish_count(), 2);
    let published = h.last_published();
    assert_eq!(published.search_key, "acme");
    assert_eq!(published.types, set(&["Consumer", "Employment"]));
}

#[tokio::test(start_paused = true)]
async fn test_failed_catalog_omits_control() {
    let mut h = Harness::with_catalogs(common::PartialCatalog::failing(&[FilterField::Stage])).await;

    assert!(matches!(
        h.panel.catalog_state(FilterField::Stage),
        Some(CatalogState::Failed(_))
    ));
    assert!(!h.panel.visible_controls().contains(&FilterField::Stage));
    assert!(h.panel.visible_controls().contains(&FilterField::Type));

    assert!(!h.panel.handle_checkbox_change(FilterField::Stage, "Intake", false));
    assert_eq!(h.publish_count(), 0);

    // Other fields still work and the failed field stays unconstrained
    assert!(h.panel.handle_checkbox_change(FilterField::Type, "Housing", false));
    assert_eq!(h.last_published().stages, None);
}

#[tokio::test(start_paused = true)]
async fn test_catalog_arriving_after_seeding_stays_unconstrained_until_toggled() {
    let mut h = Harness::new();
    let service = common::fixture(3, 10);

    let types = service.get_categories(FilterField::Type).await;
    h.panel.apply_catalog(FilterField::Type, types);
    h.panel.handle_checkbox_change(FilterField::Type, "Housing", false);
    assert_eq!(h.last_published().stages, None);

    let stages = service.get_categories(FilterField::Stage).await;
    h.panel.apply_catalog(FilterField::Stage, stages);
    assert_eq!(h.panel.filters().stages, None);

    h.panel.handle_checkbox_change(FilterField::Stage, "Closed", false);
    let published = h.last_published();
    assert_eq!(published.stages, set(&["Intake"]));
    assert_eq!(published.types, set(&["Consumer", "Employment"]));
}

#[tokio::test(start_paused = true)]
async fn test_typing_on_search_row_edits_search_key() {
    let mut h = Harness::new();
    assert!(h.panel.captures_text());

    for c in ['a', 'b', 'c'] {
        h.panel.handle_key_events(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE));
    }
    h.panel.handle_key_events(KeyEvent::new(KeyCode::Backspace, KeyModifiers::NONE));
    assert_eq!(h.panel.filters().search_key, "ab");

    h.advance(Duration::from_millis(400)).await;
    assert_eq!(h.publish_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_dispose_cancels_pending_publish() {
    let mut h = Harness::new();

    h.panel.handle_search_key_change("never sent");
    h.panel.dispose();
    h.advance(Duration::from_millis(400)).await;

    assert_eq!(h.publish_count(), 0);
    assert!(!h.panel.has_pending_publish());
}

#[tokio::test(start_paused = true)]
async fn test_value_outside_catalog_is_rejected() {
    let mut h = Harness::with_catalogs(common::fixture(3, 10)).await;

    assert!(!h.panel.handle_checkbox_change(FilterField::Type, "Bogus", true));
    assert_eq!(h.publish_count(), 0);
    assert_eq!(h.panel.filters().types, None);

    h.panel.handle_checkbox_change(FilterField::Type, "Housing", false);
    assert!(!h.panel.handle_checkbox_change(FilterField::Type, "Bogus", true));
    assert_eq!(h.publish_count(), 1);
    assert_eq!(h.last_published().types, set(&["Consumer", "Employment"]));
}
