//! The composite map + list container
//!
//! [`MapListView`] owns the two surfaces and coordinates them: list scroll
//! offsets run through the parallax physics and move the map on every
//! update, a pull release past the threshold (or an explicit API call)
//! hands control to the transition controller, and all content questions
//! are forwarded through the delegation bridge to the host's providers.
//!
//! # Example
//!
//! ```rust,ignore
//! use maplist_view::prelude::*;
//!
//! let mut picker = MapListView::new(390.0, 844.0)
//!     .pull_to_expand(true)
//!     .show_close_button(true)
//!     .on_did_expand(|_map| println!("map is full screen"));
//! picker.mount();
//!
//! // Host event loop:
//! picker.on_scroll(-40.0);      // live parallax
//! picker.on_scroll_end(-150.0); // crossed the pull threshold -> expands
//! while picker.tick(1.0 / 120.0) {}
//! assert!(picker.is_full_screen());
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use maplist_animation::AnimationScheduler;
use maplist_core::events::{event_types, Event, EventData, EventDispatcher};
use maplist_core::geometry::{Color, Point, Rect as Frame};

use crate::bridge::DelegationBridge;
use crate::callbacks::{CallbackSet, MapListViewObserver};
use crate::close_button::CloseButton;
use crate::config::PickerConfig;
use crate::parallax::{LayoutState, ParallaxPhysics, ReleaseDecision};
use crate::providers::{ListBehavior, ListDataSource, MapBehavior};
use crate::surfaces::{ListSurface, MapRegion, MapSurface, Surfaces};
use crate::transition::{PickerState, TransitionController, Trigger};

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Shared handle used when wiring the picker into an [`EventDispatcher`]
pub type SharedMapListView = Arc<Mutex<MapListView>>;

/// A map surface and a list surface in one scrollable container
pub struct MapListView {
    id: u64,
    bounds: Frame,
    config: PickerConfig,
    physics: ParallaxPhysics,
    scheduler: Arc<Mutex<AnimationScheduler>>,
    controller: TransitionController,
    callbacks: CallbackSet,
    bridge: DelegationBridge,
    surfaces: Option<Surfaces>,
    close_button: CloseButton,
}

impl MapListView {
    /// Create an unmounted picker for a container of the given size.
    /// Configure it with the builder methods, then call [`mount`].
    ///
    /// [`mount`]: MapListView::mount
    pub fn new(width: f32, height: f32) -> Self {
        let config = PickerConfig::default();
        let scheduler = Arc::new(Mutex::new(AnimationScheduler::new()));
        let controller = TransitionController::new(&scheduler, &config);
        let physics = ParallaxPhysics::new(config, height);
        Self {
            id: NEXT_ID.fetch_add(1, Ordering::Relaxed),
            bounds: Frame::sized(width, height),
            config,
            physics,
            scheduler,
            controller,
            callbacks: CallbackSet::new(),
            bridge: DelegationBridge::new(),
            surfaces: None,
            close_button: CloseButton::default(),
        }
    }

    // =========================================================================
    // Builder configuration
    // =========================================================================

    pub fn default_map_height(mut self, height: f32) -> Self {
        self.config.default_map_height = height;
        self
    }

    pub fn parallax_scroll_factor(mut self, factor: f32) -> Self {
        self.config.parallax_scroll_factor = factor;
        self
    }

    pub fn pull_to_expand(mut self, enabled: bool) -> Self {
        self.config.pull_to_expand_enabled = enabled;
        self
    }

    pub fn pull_threshold(mut self, threshold: f32) -> Self {
        self.config.pull_threshold = threshold;
        self
    }

    pub fn show_close_button(mut self, show: bool) -> Self {
        self.config.show_close_button = show;
        self
    }

    pub fn background_color(mut self, color: Color) -> Self {
        self.config.background_color = color;
        self
    }

    pub fn transition_duration_ms(mut self, duration_ms: u32) -> Self {
        self.config.transition_duration_ms = duration_ms;
        self
    }

    pub fn config(mut self, config: PickerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn on_map_ready<F: Fn(&MapSurface) + Send + Sync + 'static>(mut self, hook: F) -> Self {
        self.callbacks.on_map_ready(hook);
        self
    }

    pub fn on_list_ready<F: Fn(&ListSurface) + Send + Sync + 'static>(mut self, hook: F) -> Self {
        self.callbacks.on_list_ready(hook);
        self
    }

    pub fn on_will_expand<F: Fn(&MapSurface) + Send + Sync + 'static>(mut self, hook: F) -> Self {
        self.callbacks.on_will_expand(hook);
        self
    }

    pub fn on_did_expand<F: Fn(&MapSurface) + Send + Sync + 'static>(mut self, hook: F) -> Self {
        self.callbacks.on_did_expand(hook);
        self
    }

    pub fn on_will_collapse<F: Fn(&MapSurface) + Send + Sync + 'static>(mut self, hook: F) -> Self {
        self.callbacks.on_will_collapse(hook);
        self
    }

    pub fn on_did_collapse<F: Fn(&MapSurface) + Send + Sync + 'static>(mut self, hook: F) -> Self {
        self.callbacks.on_did_collapse(hook);
        self
    }

    /// Register a lifecycle observer alongside any closure hooks; both
    /// styles fire for the same events
    pub fn observer(mut self, observer: &Arc<dyn MapListViewObserver>) -> Self {
        self.callbacks.add_observer(observer);
        self
    }

    pub fn data_source(mut self, source: &Arc<dyn ListDataSource>) -> Self {
        self.bridge.set_data_source(source);
        self
    }

    pub fn list_behavior(mut self, behavior: &Arc<dyn ListBehavior>) -> Self {
        self.bridge.set_list_behavior(behavior);
        self
    }

    pub fn map_behavior(mut self, behavior: &Arc<dyn MapBehavior>) -> Self {
        self.bridge.set_map_behavior(behavior);
        self
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Build the surfaces and make the widget live.
    ///
    /// Fires the map-ready and list-ready hooks exactly once each, before
    /// any provider call is forwarded. A degenerate (empty) container stays
    /// unmounted and every subsequent operation is a silent no-op.
    pub fn mount(&mut self) {
        if self.surfaces.is_some() {
            return;
        }

        self.config = self.config.sanitized(self.bounds.height);
        self.physics = ParallaxPhysics::new(self.config, self.bounds.height);
        self.controller = TransitionController::new(&self.scheduler, &self.config);

        let Some(mut surfaces) = Surfaces::build(self.bounds, &self.config, &self.physics) else {
            tracing::debug!("mount skipped: degenerate container {:?}", self.bounds);
            return;
        };

        self.callbacks.fire_map_ready(&surfaces.map);
        self.callbacks.fire_list_ready(&surfaces.list);

        // First provider forward happens only after both ready hooks
        surfaces.list.set_content_height(self.bridge.content_height());
        self.surfaces = Some(surfaces);
        tracing::debug!(
            "mounted picker id={} bounds={:?} rows={}",
            self.id,
            self.bounds,
            self.bridge.row_count()
        );
    }

    pub fn is_mounted(&self) -> bool {
        self.surfaces.is_some()
    }

    /// Re-query the data source and resize the scrollable content
    pub fn reload_data(&mut self) {
        let Some(surfaces) = self.surfaces.as_mut() else {
            return;
        };
        surfaces.list.set_content_height(self.bridge.content_height());
    }

    /// Adopt a new container size (host resize or rotation)
    pub fn resize(&mut self, width: f32, height: f32) {
        self.bounds = Frame::sized(width, height);
        self.physics.resize(height);
        if let Some(surfaces) = self.surfaces.as_mut() {
            surfaces.resize(self.bounds, &self.physics);
        }
    }

    // =========================================================================
    // Scroll pipeline
    // =========================================================================

    /// The list reported a new absolute scroll offset. Applies the parallax
    /// layout immediately - every update, not just at rest - unless an
    /// animation currently owns the map height, in which case only the
    /// latest offset is retained.
    pub fn on_scroll(&mut self, offset_y: f32) {
        let Some(surfaces) = self.surfaces.as_mut() else {
            return;
        };
        if !self.controller.allows_parallax() {
            self.physics.note_offset(offset_y);
            return;
        }
        self.physics.on_scroll(offset_y);
        surfaces.apply(&self.physics);
    }

    /// The scroll gesture ended at the given offset. Crossing the pull
    /// threshold expands the map; a stretched map released short of the
    /// threshold snaps back to its default height.
    pub fn on_scroll_end(&mut self, offset_y: f32) {
        let Some(surfaces) = self.surfaces.as_mut() else {
            return;
        };
        match self.physics.on_scroll_end(offset_y) {
            ReleaseDecision::Expand => {
                self.controller.request(
                    Trigger::Expand,
                    true,
                    &mut self.physics,
                    &self.callbacks,
                    surfaces,
                );
                self.sync_close_button();
            }
            ReleaseDecision::SettleToDefault => {
                self.controller.settle_to_default(&mut self.physics, surfaces);
            }
            ReleaseDecision::NoOp => {}
        }
    }

    // =========================================================================
    // Direct API
    // =========================================================================

    /// Make the map view full screen
    pub fn expand(&mut self, animated: bool) {
        let Some(surfaces) = self.surfaces.as_mut() else {
            return;
        };
        self.controller.request(
            Trigger::Expand,
            animated,
            &mut self.physics,
            &self.callbacks,
            surfaces,
        );
        self.sync_close_button();
    }

    /// Shrink the map view back down to its default height
    pub fn collapse(&mut self, animated: bool) {
        let Some(surfaces) = self.surfaces.as_mut() else {
            return;
        };
        self.controller.request(
            Trigger::Collapse,
            animated,
            &mut self.physics,
            &self.callbacks,
            surfaces,
        );
        self.sync_close_button();
    }

    /// Animated [`expand`](MapListView::expand)
    pub fn expand_now(&mut self) {
        self.expand(true);
    }

    /// Animated [`collapse`](MapListView::collapse)
    pub fn collapse_now(&mut self) {
        self.collapse(true);
    }

    /// Expand or collapse depending on the current state
    pub fn toggle(&mut self) {
        if self.physics.is_full_screen() {
            self.collapse(true);
        } else {
            self.expand(true);
        }
    }

    /// Replace the close affordance. The current opacity carries over, so
    /// swapping the button mid-transition (or while full screen) never
    /// interrupts the running animation. Supplying a custom button implies
    /// showing one.
    pub fn set_close_button(&mut self, custom: CloseButton) {
        let opacity = self.close_button.opacity();
        self.close_button = custom;
        self.close_button.set_opacity(opacity);
        self.config.show_close_button = true;
    }

    // =========================================================================
    // Frame tick
    // =========================================================================

    /// Advance all running animations by `dt` seconds and apply the
    /// resulting layout. Returns true while anything is still moving.
    pub fn tick(&mut self, dt: f32) -> bool {
        let Some(surfaces) = self.surfaces.as_mut() else {
            return false;
        };
        self.scheduler.lock().unwrap().tick(dt);
        let active = self
            .controller
            .tick(&mut self.physics, &self.callbacks, surfaces);
        self.sync_close_button();
        active
    }

    fn sync_close_button(&mut self) {
        if self.config.show_close_button {
            self.close_button.set_opacity(self.controller.progress());
        }
    }

    // =========================================================================
    // Event routing
    // =========================================================================

    /// Route a host event to the right handler
    pub fn handle_event(&mut self, event: &Event) {
        match (event.event_type, &event.data) {
            (event_types::SCROLL, EventData::Scroll { offset_y }) => self.on_scroll(*offset_y),
            (event_types::SCROLL_END, EventData::Scroll { offset_y }) => {
                self.on_scroll_end(*offset_y)
            }
            (event_types::POINTER_UP, EventData::Pointer { x, y, .. }) => {
                self.on_pointer_up(Point::new(*x, *y))
            }
            (event_types::RESIZE, EventData::Resize { width, height }) => {
                self.resize(*width, *height)
            }
            _ => {}
        }
    }

    /// A tap on the visible close affordance collapses the full-screen map
    fn on_pointer_up(&mut self, point: Point) {
        if !self.is_mounted() || self.controller.state() != PickerState::FullScreen {
            return;
        }
        if self.close_button.hit_test(self.bounds, point) {
            self.collapse(true);
        }
    }

    /// Register this picker's event handlers with a dispatcher. Events
    /// dispatched to the picker's id are routed through
    /// [`handle_event`](MapListView::handle_event).
    pub fn install_handlers(picker: &SharedMapListView, dispatcher: &mut EventDispatcher) {
        let id = picker.lock().unwrap().id();
        for event_type in [
            event_types::SCROLL,
            event_types::SCROLL_END,
            event_types::POINTER_UP,
            event_types::RESIZE,
        ] {
            let picker = Arc::clone(picker);
            dispatcher.register(id, event_type, move |event| {
                picker.lock().unwrap().handle_event(event);
            });
        }
    }

    // =========================================================================
    // Content forwarding
    // =========================================================================

    /// The host selected a row; forwarded verbatim to the list observer
    pub fn select_row(&mut self, index: usize) {
        if !self.is_mounted() {
            return;
        }
        self.bridge.row_selected(index);
    }

    /// Move the map's visible region and notify the map observer
    pub fn set_map_region(&mut self, region: MapRegion) {
        let Some(surfaces) = self.surfaces.as_mut() else {
            return;
        };
        surfaces.map.set_region(region);
        self.bridge.region_changed(&region);
    }

    /// The host tapped an annotation; forwarded verbatim to the map observer
    pub fn select_annotation(&mut self, annotation_id: u64) {
        if !self.is_mounted() {
            return;
        }
        self.bridge.annotation_selected(annotation_id);
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn bounds(&self) -> Frame {
        self.bounds
    }

    /// Is the map covering the full container?
    pub fn is_full_screen(&self) -> bool {
        self.physics.is_full_screen()
    }

    pub fn state(&self) -> PickerState {
        self.controller.state()
    }

    pub fn layout(&self) -> LayoutState {
        self.physics.layout()
    }

    pub fn close_button(&self) -> &CloseButton {
        &self.close_button
    }

    pub fn map_surface(&self) -> Option<&MapSurface> {
        self.surfaces.as_ref().map(|s| &s.map)
    }

    pub fn list_surface(&self) -> Option<&ListSurface> {
        self.surfaces.as_ref().map(|s| &s.list)
    }

    pub fn spacer_frame(&self) -> Option<Frame> {
        self.surfaces.as_ref().map(|s| s.spacer.frame)
    }
}
