//! Matterlist - a terminal browser for legal matters
//!
//! A filter panel, a paginated tile list and a detail card kept in sync
//! through a publish/subscribe message bus. Free-text filter edits are
//! debounced, the list only ever shows the newest query it issued, and the
//! detail card follows the most recent selection.
//!
//! # Modules
//!
//! * [`bus`] - Topic based publish/subscribe between components
//! * [`config`] - Application configuration management
//! * [`model`] - Matters, filter state and paging types
//! * [`service`] - Query, record and catalog collaborators
//! * [`ui`] - Terminal user interface components

/// Message bus connecting the filter panel, list and detail card
pub mod bus;

/// Configuration module for managing application settings
pub mod config;

/// Application constants and default values
pub mod constants;

/// Logging setup with an in-memory buffer for the log overlay
pub mod logger;

/// Domain types shared by services and components
pub mod model;

/// Data collaborators and the fixture-backed implementation
pub mod service;

/// Terminal user interface components and rendering
pub mod ui;

pub use bus::{Message, MessageBus, Subscription, Topic};
pub use model::{FilterField, FilterState, Matter, PageRequest, PageResult};
