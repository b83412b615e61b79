use crate::model::{FilterField, Matter, PageResult, PicklistValue};
use crate::service::{NavigationTarget, ServiceError};

use super::requests::RequestId;

/// The pane that currently receives key events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pane {
    Filters,
    #[default]
    List,
    Detail,
}

impl Pane {
    pub fn next(self) -> Self {
        match self {
            Pane::Filters => Pane::List,
            Pane::List => Pane::Detail,
            Pane::Detail => Pane::Filters,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            Pane::Filters => Pane::Detail,
            Pane::List => Pane::Filters,
            Pane::Detail => Pane::List,
        }
    }
}

#[derive(Debug, Clone)]
pub enum Action {
    // Focus
    FocusNext,
    FocusPrevious,

    // Background results
    CatalogLoaded {
        field: FilterField,
        result: Result<Vec<PicklistValue>, ServiceError>,
    },
    PageLoaded {
        request_id: RequestId,
        result: Result<PageResult, ServiceError>,
    },
    RecordLoaded {
        request_id: RequestId,
        result: Result<Matter, ServiceError>,
    },
    DebounceElapsed {
        generation: u64,
    },

    // Navigation
    Navigate(NavigationTarget),
    CloseRecordPage,

    // UI operations
    ShowInfo(String),
    ShowOverlay(Overlay),
    HideOverlay,

    // App control
    Quit,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    Help,
    Logs,
}
