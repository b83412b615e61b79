//! Shared test doubles and helpers.
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use matterlist::model::{FilterField, Matter, PageRequest, PageResult, PicklistValue};
use matterlist::service::{
    CatalogService, Dataset, FixtureService, NavigationTarget, Navigator, QueryService, RecordLoader, ServiceError,
};
use matterlist::ui::core::Action;
use tokio::sync::mpsc::UnboundedReceiver;

pub fn matter(id: &str, name: &str) -> Matter {
    Matter {
        id: id.to_string(),
        name: name.to_string(),
        ..Matter::default()
    }
}

/// `count` matters named so that name order equals id order.
pub fn matters(count: usize) -> Vec<Matter> {
    (1..=count)
        .map(|i| {
            let mut m = matter(&format!("{:03}", i), &format!("Matter {:03}", i));
            m.matter_number = Some(format!("M-{:04}", i));
            m.matter_type = Some(if i % 2 == 0 { "Consumer" } else { "Employment" }.to_string());
            m.subtype = Some("CWA".to_string());
            m.statute = Some("Clean Water Act".to_string());
            m.stage = Some("Intake".to_string());
            m
        })
        .collect()
}

pub fn dataset(count: usize) -> Dataset {
    let mut picklists = HashMap::new();
    picklists.insert(
        "Type__c".to_string(),
        vec![
            PicklistValue::new("Consumer", "Consumer"),
            PicklistValue::new("Employment", "Employment"),
            PicklistValue::new("Housing", "Housing"),
        ],
    );
    picklists.insert(
        "Stage__c".to_string(),
        vec![PicklistValue::new("Intake", "Intake"), PicklistValue::new("Closed", "Closed")],
    );
    Dataset {
        matters: matters(count),
        picklists,
    }
}

pub fn fixture(count: usize, page_size: u32) -> Arc<FixtureService> {
    Arc::new(FixtureService::new(dataset(count), page_size))
}

/// Query service that records requests, can be switched to failing, and
/// delays answers for one search key.
pub struct ScriptedQuery {
    inner: FixtureService,
    requests: Mutex<Vec<PageRequest>>,
    failing: AtomicBool,
    slow: Mutex<Option<(String, Duration)>>,
}

impl ScriptedQuery {
    pub fn new(count: usize, page_size: u32) -> Arc<Self> {
        Arc::new(Self {
            inner: FixtureService::new(dataset(count), page_size),
            requests: Mutex::new(Vec::new()),
            failing: AtomicBool::new(false),
            slow: Mutex::new(None),
        })
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn slow_for(&self, search_key: &str, delay: Duration) {
        *self.slow.lock().unwrap() = Some((search_key.to_string(), delay));
    }

    pub fn requests(&self) -> Vec<PageRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl QueryService for ScriptedQuery {
    async fn get_items(&self, request: PageRequest) -> Result<PageResult, ServiceError> {
        self.requests.lock().unwrap().push(request.clone());
        let delay = match &*self.slow.lock().unwrap() {
            Some((key, delay)) if *key == request.filters.search_key => *delay,
            _ => Duration::from_millis(10),
        };
        tokio::time::sleep(delay).await;
        if self.failing.load(Ordering::SeqCst) {
            return Err(ServiceError::Query("backend unavailable".to_string()));
        }
        self.inner.get_items(request).await
    }
}

/// Record loader whose answer time depends on the id.
pub struct SlowLoader {
    inner: FixtureService,
    delays: HashMap<String, Duration>,
}

impl SlowLoader {
    pub fn new(count: usize, delays: &[(&str, u64)]) -> Arc<Self> {
        Arc::new(Self {
            inner: FixtureService::new(dataset(count), 10),
            delays: delays
                .iter()
                .map(|(id, ms)| (id.to_string(), Duration::from_millis(*ms)))
                .collect(),
        })
    }
}

#[async_trait]
impl RecordLoader for SlowLoader {
    async fn load(&self, item_id: &str) -> Result<Matter, ServiceError> {
        let delay = self.delays.get(item_id).copied().unwrap_or(Duration::from_millis(10));
        tokio::time::sleep(delay).await;
        self.inner.load(item_id).await
    }
}

/// Catalog service that fails for the listed fields.
pub struct PartialCatalog {
    inner: FixtureService,
    failing: Vec<FilterField>,
}

impl PartialCatalog {
    pub fn failing(failing: &[FilterField]) -> Arc<Self> {
        Arc::new(Self {
            inner: FixtureService::new(dataset(3), 10),
            failing: failing.to_vec(),
        })
    }
}

#[async_trait]
impl CatalogService for PartialCatalog {
    async fn get_categories(&self, field: FilterField) -> Result<Vec<PicklistValue>, ServiceError> {
        if self.failing.contains(&field) {
            return Err(ServiceError::CatalogLoad {
                field,
                reason: "service unavailable".to_string(),
            });
        }
        self.inner.get_categories(field).await
    }
}

/// Navigator that remembers every target it was asked to open.
#[derive(Clone, Default)]
pub struct RecordingNavigator {
    pub targets: Rc<RefCell<Vec<NavigationTarget>>>,
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, target: NavigationTarget) {
        self.targets.borrow_mut().push(target);
    }
}

/// Let every pending timer and task run, then collect the actions they sent.
///
/// Relies on the paused clock auto-advancing while the test task sleeps.
pub async fn settle(rx: &mut UnboundedReceiver<Action>) -> Vec<Action> {
    tokio::time::sleep(Duration::from_secs(10)).await;
    let mut actions = Vec::new();
    while let Ok(action) = rx.try_recv() {
        actions.push(action);
    }
    actions
}

/// Advance the paused clock by `duration` and collect what arrived.
pub async fn advance(rx: &mut UnboundedReceiver<Action>, duration: Duration) -> Vec<Action> {
    tokio::time::sleep(duration).await;
    let mut actions = Vec::new();
    while let Ok(action) = rx.try_recv() {
        actions.push(action);
    }
    actions
}
