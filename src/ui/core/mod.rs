//! Core UI functionality for the Matterlist application.
//!
//! This module contains the fundamental building blocks for the user interface,
//! including event handling, component abstractions and background task
//! management. It provides the foundation that all UI components build upon.
//!
//! # Module Components
//!
//! - [`actions`] - Action definitions and UI state transitions
//! - [`component`] - Base component trait and rendering abstractions
//! - [`context`] - Services and shared handles for building components
//! - [`debounce`] - Cancelable quiet-period timer for text edits
//! - [`event_handler`] - Terminal input polling
//! - [`requests`] - Request identity for last-request-wins consumers
//! - [`task_manager`] - Background task management and async operation handling
//!
//! # Architecture
//!
//! Components run on the UI task only. Anything asynchronous (service calls,
//! timers) is spawned through the [`TaskManager`] and comes back as an
//! [`Action`] on a channel that the main loop drains and routes to the
//! component that asked for it.

pub mod actions;
pub mod component;
pub mod context;
pub mod debounce;
pub mod event_handler;
pub mod requests;
pub mod task_manager;

pub use actions::{Action, Overlay, Pane};
pub use component::Component;
pub use context::AppContext;
pub use debounce::Debouncer;
pub use event_handler::{EventHandler, EventType};
pub use requests::{RequestId, RequestTracker};
pub use task_manager::{TaskId, TaskManager};
