//! Constants used throughout the application
//!
//! This module centralizes magic strings, UI text, and other constant values
//! to improve maintainability and consistency.

// Filter behaviour
/// Quiet period before a free-text filter edit is published
pub const DEBOUNCE_DELAY_MS: u64 = 350;
/// Upper bound accepted for a configured debounce delay
pub const DEBOUNCE_MAX_MS: u64 = 5_000;

// Paging
/// Number of matters shown per page unless configured otherwise
pub const DEFAULT_PAGE_SIZE: u32 = 9;
/// Largest page size accepted from configuration
pub const MAX_PAGE_SIZE: u32 = 200;

// Record schema
pub const MATTER_OBJECT_API_NAME: &str = "Matter__c";

// UI Section Headers
pub const TITLE_FILTERS: &str = "🔎 Filters";
pub const TITLE_MATTERS: &str = "📁 Matters";
pub const TITLE_DETAIL: &str = "📄 Matter";
pub const TITLE_RECORD_PAGE: &str = "📄 Matter Record";
pub const TITLE_LOGS: &str = "🔍 Logs - Press 'Esc', 'G' or 'q' to close";
pub const TITLE_HELP: &str = "❓ Help - Press 'Esc' or '?' to close";

// Placeholders and empty states
pub const EMPTY_STATE_NO_MATTERS: &str = "There are no matters matching your current selection";
pub const DETAIL_PLACEHOLDER: &str = "Select a matter to see details";
pub const LOADING_MATTERS: &str = "Loading matters...";
pub const LOADING_RECORD: &str = "Loading record...";

// Error Messages
pub const ERROR_QUERY_FAILED: &str = "❌ Failed to load matters";
pub const ERROR_RECORD_FAILED: &str = "❌ Failed to load matter";
pub const ERROR_CATALOG_FAILED: &str = "❌ Failed to load values for";

// Info Messages
pub const INFO_DRAG_PAYLOAD: &str = "📋 Matter payload ready";
pub const CONFIG_GENERATED: &str = "✅ Generated default configuration file";

// UI Layout Constants
/// Minimum filter panel width in columns
pub const FILTER_PANEL_MIN_WIDTH: u16 = 20;
/// Maximum filter panel width in columns
pub const FILTER_PANEL_MAX_WIDTH: u16 = 60;
/// Default filter panel width in columns
pub const FILTER_PANEL_DEFAULT_WIDTH: u16 = 34;
/// Minimum detail panel width in columns
pub const DETAIL_PANEL_MIN_WIDTH: u16 = 24;
/// Maximum detail panel width in columns
pub const DETAIL_PANEL_MAX_WIDTH: u16 = 80;
/// Default detail panel width in columns
pub const DETAIL_PANEL_DEFAULT_WIDTH: u16 = 40;

// Logging
/// Number of log lines retained in memory for the log overlay
pub const LOG_BUFFER_CAPACITY: usize = 500;
pub const LOG_FILE_NAME: &str = "matterlist.log";
