//! JSON dataset backed implementation of the data collaborators.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::catalog::builtin_catalog;
use super::{CatalogService, QueryService, RecordLoader, ServiceError};
use crate::model::{FilterField, Matter, PageRequest, PageResult, PicklistValue};

const SAMPLE_DATASET: &str = include_str!("../../data/matters.json");

/// Matters plus optional picklists keyed by record field name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub matters: Vec<Matter>,
    #[serde(default)]
    pub picklists: HashMap<String, Vec<PicklistValue>>,
}

impl Dataset {
    /// The dataset compiled into the binary.
    pub fn sample() -> Result<Self> {
        Self::from_json(SAMPLE_DATASET).context("Failed to parse built-in sample dataset")
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read dataset: {}", path.as_ref().display()))?;
        Self::from_json(&content).with_context(|| format!("Failed to parse dataset: {}", path.as_ref().display()))
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let dataset: Dataset = serde_json::from_str(content)?;
        dataset.validate()?;
        Ok(dataset)
    }

    fn validate(&self) -> Result<()> {
        let mut seen = std::collections::HashSet::new();
        for matter in &self.matters {
            if matter.id.is_empty() {
                anyhow::bail!("matter '{}' has an empty Id", matter.name);
            }
            if !seen.insert(matter.id.as_str()) {
                anyhow::bail!("duplicate matter Id '{}'", matter.id);
            }
        }
        Ok(())
    }
}

/// Serves queries, records and catalogs from an in-memory [`Dataset`].
#[derive(Clone)]
pub struct FixtureService {
    dataset: Arc<Dataset>,
    page_size: u32,
    latency: Duration,
}

impl FixtureService {
    pub fn new(dataset: Dataset, page_size: u32) -> Self {
        Self {
            dataset: Arc::new(dataset),
            page_size: page_size.max(1),
            latency: Duration::ZERO,
        }
    }

    /// Delay every response by `latency`, to exercise in-flight handling.
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    fn query(&self, request: &PageRequest) -> Result<PageResult, ServiceError> {
        if request.page_number == 0 {
            return Err(ServiceError::Query("page number must be at least 1".to_string()));
        }

        let mut matching: Vec<&Matter> = self
            .dataset
            .matters
            .iter()
            .filter(|matter| request.filters.matches(matter))
            .collect();
        matching.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));

        let page_size = self.page_size as usize;
        let offset = (request.page_number as usize - 1).saturating_mul(page_size);
        let items = matching.iter().skip(offset).take(page_size).map(|m| (*m).clone()).collect();

        Ok(PageResult {
            items,
            total_item_count: matching.len() as u64,
            page_size: self.page_size,
            page_number: request.page_number,
        })
    }
}

#[async_trait]
impl QueryService for FixtureService {
    async fn get_items(&self, request: PageRequest) -> Result<PageResult, ServiceError> {
        self.simulate_latency().await;
        let result = self.query(&request)?;
        log::debug!(
            "Query page {} matched {} matters ({} on page)",
            result.page_number,
            result.total_item_count,
            result.items.len()
        );
        Ok(result)
    }
}

#[async_trait]
impl RecordLoader for FixtureService {
    async fn load(&self, item_id: &str) -> Result<Matter, ServiceError> {
        self.simulate_latency().await;
        self.dataset
            .matters
            .iter()
            .find(|matter| matter.id == item_id)
            .cloned()
            .ok_or_else(|| ServiceError::RecordLoad {
                item_id: item_id.to_string(),
                reason: "no such record".to_string(),
            })
    }
}

#[async_trait]
impl CatalogService for FixtureService {
    async fn get_categories(&self, field: FilterField) -> Result<Vec<PicklistValue>, ServiceError> {
        self.simulate_latency().await;
        if let Some(values) = self.dataset.picklists.get(field.api_name()) {
            return Ok(values.clone());
        }
        builtin_catalog(field).ok_or_else(|| ServiceError::CatalogLoad {
            field,
            reason: format!("no picklist defined for {}", field.api_name()),
        })
    }
}
