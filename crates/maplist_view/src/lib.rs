//! Maplist View
//!
//! A reusable widget combining a map surface and a list surface in one
//! scrollable container. Scrolling the list drives the map's height
//! (parallax), pulling past a configurable threshold pops the map out to
//! full screen, and an optional close affordance shrinks it back down.
//!
//! The widget orchestrates size, position, and visibility only. Row
//! content, map annotations, and all other content questions are forwarded
//! to host-supplied providers through the delegation bridge - the widget
//! holds non-owning references and implements no data or map logic itself.
//!
//! # Example
//!
//! ```rust,ignore
//! use maplist_view::prelude::*;
//!
//! let mut picker = MapListView::new(390.0, 844.0)
//!     .pull_to_expand(true)
//!     .show_close_button(true);
//! picker.mount();
//! ```

pub mod bridge;
pub mod callbacks;
pub mod close_button;
pub mod config;
pub mod layout;
pub mod parallax;
pub mod picker;
pub mod providers;
pub mod surfaces;
pub mod transition;

pub use bridge::DelegationBridge;
pub use callbacks::{CallbackSet, MapListViewObserver};
pub use close_button::CloseButton;
pub use config::{PickerConfig, MIN_MAP_HEIGHT};
pub use parallax::{LayoutState, ParallaxPhysics, ReleaseDecision};
pub use picker::{MapListView, SharedMapListView};
pub use providers::{ListBehavior, ListDataSource, MapBehavior, DEFAULT_ROW_HEIGHT};
pub use surfaces::{BackgroundSpacer, Coordinate, ListSurface, MapRegion, MapSurface};
pub use transition::PickerState;

/// Commonly used types, one import away
pub mod prelude {
    pub use crate::callbacks::MapListViewObserver;
    pub use crate::close_button::CloseButton;
    pub use crate::config::PickerConfig;
    pub use crate::parallax::{LayoutState, ReleaseDecision};
    pub use crate::picker::{MapListView, SharedMapListView};
    pub use crate::providers::{ListBehavior, ListDataSource, MapBehavior};
    pub use crate::surfaces::{Coordinate, MapRegion};
    pub use crate::transition::PickerState;
}
