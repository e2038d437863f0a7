//! Parallax physics
//!
//! Pure geometry state for the map/list coupling: maps the list's absolute
//! scroll offset to a map height, derives the full-screen flag, and decides
//! what a gesture release should do. No rendering, no animation - the
//! transition layer consumes this state and drives the effects.

use crate::config::{PickerConfig, MIN_MAP_HEIGHT};

/// Resolved layout for the map surface
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutState {
    /// Current height of the map surface
    pub map_height: f32,
    /// True exactly when the map fills the container
    pub is_full_screen: bool,
}

/// What to do when a scroll gesture is released
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReleaseDecision {
    /// The pull crossed the threshold: pop the map out to full screen
    Expand,
    /// The map is stretched past its default height: snap it back
    SettleToDefault,
    /// Nothing to do
    NoOp,
}

/// Scroll-offset-to-map-height state
///
/// Offsets are absolute list offsets; negative means the list is pulled
/// past its top edge. Every computation starts from the latest offset, so
/// rapid repeated deliveries are idempotent and nothing stale accumulates.
#[derive(Clone, Debug)]
pub struct ParallaxPhysics {
    config: PickerConfig,
    container_height: f32,
    map_height: f32,
    is_full_screen: bool,
    last_offset_y: f32,
}

impl ParallaxPhysics {
    pub fn new(config: PickerConfig, container_height: f32) -> Self {
        let container_height = container_height.max(MIN_MAP_HEIGHT);
        let config = config.sanitized(container_height);
        Self {
            config,
            container_height,
            map_height: config.default_map_height,
            is_full_screen: false,
            last_offset_y: 0.0,
        }
    }

    pub fn config(&self) -> &PickerConfig {
        &self.config
    }

    pub fn container_height(&self) -> f32 {
        self.container_height
    }

    pub fn map_height(&self) -> f32 {
        self.map_height
    }

    pub fn default_height(&self) -> f32 {
        self.config.default_map_height
    }

    pub fn is_full_screen(&self) -> bool {
        self.is_full_screen
    }

    /// The offset most recently reported, whether or not it was applied
    pub fn last_offset(&self) -> f32 {
        self.last_offset_y
    }

    /// How far the map is currently stretched beyond its default height
    pub fn stretch(&self) -> f32 {
        (self.map_height - self.config.default_map_height).max(0.0)
    }

    pub fn layout(&self) -> LayoutState {
        LayoutState {
            map_height: self.map_height,
            is_full_screen: self.is_full_screen,
        }
    }

    /// Map height for an absolute scroll offset, clamped into
    /// [`MIN_MAP_HEIGHT`, container height]
    pub fn height_for_offset(&self, offset_y: f32) -> f32 {
        let raw = self.config.default_map_height - offset_y * self.config.parallax_scroll_factor;
        raw.clamp(MIN_MAP_HEIGHT, self.container_height)
    }

    /// Recompute the layout from the latest scroll offset
    pub fn on_scroll(&mut self, offset_y: f32) -> LayoutState {
        self.last_offset_y = offset_y;
        let state = self.set_height(self.height_for_offset(offset_y));
        tracing::trace!(
            "scroll offset_y={:.1} -> map_height={:.1} full_screen={}",
            offset_y,
            state.map_height,
            state.is_full_screen
        );
        state
    }

    /// Record an offset without applying it. Used while a height transition
    /// is in flight: only the latest offset is kept, so no stale layouts
    /// queue up behind the animation.
    pub fn note_offset(&mut self, offset_y: f32) {
        self.last_offset_y = offset_y;
    }

    /// Decide what a gesture release at the given offset should do.
    ///
    /// Expansion requires crossing the pull threshold; the return leg has
    /// no second threshold - a stretched map always settles back when
    /// released short of the threshold.
    pub fn on_scroll_end(&self, offset_y: f32) -> ReleaseDecision {
        if self.config.pull_to_expand_enabled && offset_y <= -self.config.pull_threshold {
            ReleaseDecision::Expand
        } else if self.map_height > self.config.default_map_height {
            ReleaseDecision::SettleToDefault
        } else {
            ReleaseDecision::NoOp
        }
    }

    /// Force the full-screen terminal state, independent of scroll position
    pub fn expand(&mut self) -> LayoutState {
        self.set_height(self.container_height)
    }

    /// Force the default terminal state, independent of scroll position
    pub fn collapse(&mut self) -> LayoutState {
        self.set_height(self.config.default_map_height)
    }

    /// Set the map height directly (animation frames land here). The value
    /// is clamped and the full-screen flag rederived, so the invariant
    /// `is_full_screen == (map_height == container_height)` always holds.
    pub fn set_height(&mut self, height: f32) -> LayoutState {
        self.map_height = height.clamp(MIN_MAP_HEIGHT, self.container_height);
        self.is_full_screen = self.map_height >= self.container_height;
        self.layout()
    }

    /// Adopt a new container height (host resize/rotation). The current
    /// height is re-clamped; a full-screen map keeps filling the container.
    pub fn resize(&mut self, container_height: f32) {
        self.container_height = container_height.max(MIN_MAP_HEIGHT);
        self.config = self.config.sanitized(self.container_height);
        if self.is_full_screen {
            self.map_height = self.container_height;
        } else {
            self.set_height(self.map_height);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTAINER: f32 = 844.0;

    fn physics(config: PickerConfig) -> ParallaxPhysics {
        ParallaxPhysics::new(config, CONTAINER)
    }

    #[test]
    fn test_height_is_always_within_bounds() {
        let physics = physics(PickerConfig::default());
        for offset in [-10_000.0, -844.0, -140.0, -1.0, 0.0, 1.0, 360.0, 10_000.0] {
            let h = physics.height_for_offset(offset);
            assert!(h >= MIN_MAP_HEIGHT, "offset {offset} gave {h}");
            assert!(h <= CONTAINER, "offset {offset} gave {h}");
        }
    }

    #[test]
    fn test_pull_grows_the_map() {
        // default 180, factor 0.5: pulling down 40 -> 180 - (-40 * 0.5) = 200
        let mut physics = physics(PickerConfig::default());
        let state = physics.on_scroll(-40.0);
        assert_eq!(state.map_height, 200.0);
        assert!(!state.is_full_screen);
    }

    #[test]
    fn test_scroll_down_shrinks_to_min() {
        let mut physics = physics(PickerConfig::default());
        let state = physics.on_scroll(5000.0);
        assert_eq!(state.map_height, MIN_MAP_HEIGHT);
        assert!(!state.is_full_screen);
    }

    #[test]
    fn test_on_scroll_is_idempotent() {
        let mut physics = physics(PickerConfig::default());
        let first = physics.on_scroll(-73.5);
        let second = physics.on_scroll(-73.5);
        assert_eq!(first, second);
    }

    #[test]
    fn test_zero_factor_freezes_height() {
        let mut physics = physics(PickerConfig {
            parallax_scroll_factor: 0.0,
            ..Default::default()
        });
        for offset in [-500.0, -140.0, 0.0, 300.0] {
            assert_eq!(physics.on_scroll(offset).map_height, 180.0);
        }
        // Explicit expand still works with a frozen factor
        assert!(physics.expand().is_full_screen);
    }

    #[test]
    fn test_release_past_threshold_expands() {
        let physics = physics(PickerConfig::with_pull_to_expand());
        assert_eq!(physics.on_scroll_end(-150.0), ReleaseDecision::Expand);
        assert_eq!(physics.on_scroll_end(-140.0), ReleaseDecision::Expand);
    }

    #[test]
    fn test_release_short_of_threshold_never_expands() {
        let mut physics = physics(PickerConfig::with_pull_to_expand());
        physics.on_scroll(-139.9);
        let decision = physics.on_scroll_end(-139.9);
        assert_ne!(decision, ReleaseDecision::Expand);
        assert_eq!(decision, ReleaseDecision::SettleToDefault);
    }

    #[test]
    fn test_release_disabled_settles_instead_of_expanding() {
        let mut physics = physics(PickerConfig::default());
        physics.on_scroll(-300.0);
        assert_eq!(
            physics.on_scroll_end(-300.0),
            ReleaseDecision::SettleToDefault
        );
    }

    #[test]
    fn test_release_at_rest_is_noop() {
        let physics = physics(PickerConfig::default());
        assert_eq!(physics.on_scroll_end(0.0), ReleaseDecision::NoOp);
        assert_eq!(physics.on_scroll_end(250.0), ReleaseDecision::NoOp);
    }

    #[test]
    fn test_full_screen_iff_height_equals_container() {
        let mut physics = physics(PickerConfig::default());
        assert!(!physics.is_full_screen());

        let state = physics.expand();
        assert!(state.is_full_screen);
        assert_eq!(state.map_height, CONTAINER);

        let state = physics.collapse();
        assert!(!state.is_full_screen);
        assert_eq!(state.map_height, 180.0);

        // One pixel short of the container is not full screen
        let state = physics.set_height(CONTAINER - 1.0);
        assert!(!state.is_full_screen);
    }

    #[test]
    fn test_note_offset_keeps_only_latest() {
        let mut physics = physics(PickerConfig::default());
        physics.note_offset(-10.0);
        physics.note_offset(-250.0);
        physics.note_offset(-30.0);
        assert_eq!(physics.last_offset(), -30.0);
        // Noting an offset does not move the map
        assert_eq!(physics.map_height(), 180.0);
    }

    #[test]
    fn test_resize_keeps_full_screen_filling() {
        let mut physics = physics(PickerConfig::default());
        physics.expand();
        physics.resize(600.0);
        assert!(physics.is_full_screen());
        assert_eq!(physics.map_height(), 600.0);
    }

    #[test]
    fn test_resize_reclamps_default_state() {
        let mut physics = physics(PickerConfig::default());
        physics.on_scroll(-40.0); // 200.0
        physics.resize(150.0);
        assert_eq!(physics.map_height(), 150.0);
        assert!(physics.is_full_screen());
    }

    #[test]
    fn test_degenerate_config_is_clamped_not_rejected() {
        let mut physics = ParallaxPhysics::new(
            PickerConfig {
                parallax_scroll_factor: -1.0,
                default_map_height: -200.0,
                pull_threshold: -5.0,
                ..Default::default()
            },
            CONTAINER,
        );
        assert_eq!(physics.default_height(), MIN_MAP_HEIGHT);
        // Negative factor clamps to 0: scrolling never moves the map
        assert_eq!(physics.on_scroll(-400.0).map_height, MIN_MAP_HEIGHT);
    }
}
