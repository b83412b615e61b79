//! UI module for Matterlist
//!
//! This module handles all user interface components, rendering, and user interactions.

pub mod app_component;
pub mod components;
pub mod core;
pub mod layout;
pub mod navigation;
pub mod renderer;

pub use app_component::AppComponent;
pub use layout::LayoutManager;
pub use navigation::ChannelNavigator;
pub use renderer::run_app;
