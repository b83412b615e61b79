//! Service abstraction layer for the matter data source.
//!
//! This module defines the collaborators the UI components talk to: the page
//! query service, the single-record loader, the picklist catalog and the
//! navigation target. Implementations must tolerate independent concurrent
//! calls; callers tag each call with their own request identity.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::model::{FilterField, Matter, PageRequest, PageResult, PicklistValue};

pub mod catalog;
pub mod fixture;

pub use fixture::{Dataset, FixtureService};

/// Failures reported by the data collaborators.
///
/// Cloneable so results can travel back to the UI inside actions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ServiceError {
    #[error("Failed to load {field} values: {reason}")]
    CatalogLoad { field: FilterField, reason: String },

    #[error("Query failed: {0}")]
    Query(String),

    #[error("Failed to load matter '{item_id}': {reason}")]
    RecordLoad { item_id: String, reason: String },

    #[error("Invalid data: {0}")]
    Data(String),
}

/// Returns pages of matters matching a filter set.
#[async_trait]
pub trait QueryService: Send + Sync {
    async fn get_items(&self, request: PageRequest) -> Result<PageResult, ServiceError>;
}

/// Loads the full record for a single matter.
#[async_trait]
pub trait RecordLoader: Send + Sync {
    async fn load(&self, item_id: &str) -> Result<Matter, ServiceError>;
}

/// Supplies the selectable values for a categorical filter field.
#[async_trait]
pub trait CatalogService: Send + Sync {
    async fn get_categories(&self, field: FilterField) -> Result<Vec<PicklistValue>, ServiceError>;
}

/// What a record page navigation should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageAction {
    View,
}

/// Target of a navigation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationTarget {
    pub item_id: String,
    pub object_api_name: String,
    pub action: PageAction,
}

impl NavigationTarget {
    pub fn record_page(item_id: impl Into<String>) -> Self {
        Self {
            item_id: item_id.into(),
            object_api_name: crate::constants::MATTER_OBJECT_API_NAME.to_string(),
            action: PageAction::View,
        }
    }
}

/// Fire-and-forget navigation to a record page.
pub trait Navigator {
    fn navigate(&self, target: NavigationTarget);
}
