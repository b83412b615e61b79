//! Reusable UI components

// Panes
pub mod detail_card;
pub mod filter_panel;
pub mod list_container;
pub mod tile;

// Chrome
pub mod overlay;
pub mod status_bar;

// Component exports
pub use detail_card::{DetailCard, RecordState};
pub use filter_panel::{CatalogState, FilterPanel, TextInput};
pub use list_container::{ListContainer, ListOptions, ListView};
pub use overlay::OverlayView;
pub use status_bar::StatusBar;
pub use tile::{Tile, TileEvent};
