//! Picker configuration

use maplist_animation::{Easing, SpringConfig};
use maplist_core::Color;

/// The map never collapses below this height, so it stays tappable even
/// when the list is scrolled all the way down.
pub const MIN_MAP_HEIGHT: f32 = 44.0;

/// Configuration for a [`MapListView`](crate::MapListView)
///
/// Immutable per session: values are read at mount and never change while
/// the widget is live. Out-of-range values are clamped at mount, not
/// rejected.
#[derive(Clone, Copy, Debug)]
pub struct PickerConfig {
    /// How much of the container the map takes up initially and the height
    /// it returns to after scrolling is done (default: 180.0)
    pub default_map_height: f32,
    /// How fast the map grows and shrinks relative to list scrolling.
    /// 1.0 moves at list speed, smaller values are slower, larger faster
    /// (default: 0.5)
    pub parallax_scroll_factor: f32,
    /// Whether pulling the list past its top edge can pop the map out to
    /// full screen. Disabled by default because it may interfere with
    /// pull-to-refresh controls.
    pub pull_to_expand_enabled: bool,
    /// How far the user must overscroll past the top to trigger the
    /// full-screen expansion (default: 140.0)
    pub pull_threshold: f32,
    /// Show a close affordance while the map is full screen (default: off)
    pub show_close_button: bool,
    /// Fill color of the spacer behind the list, above its content
    pub background_color: Color,
    /// Duration of the expand/collapse height transition
    pub transition_duration_ms: u32,
    /// Easing of the expand/collapse height transition
    pub transition_easing: Easing,
    /// Spring used for the elastic settle-back after an under-threshold
    /// pull release
    pub settle_spring: SpringConfig,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            default_map_height: 180.0,
            parallax_scroll_factor: 0.5,
            pull_to_expand_enabled: false,
            pull_threshold: 140.0,
            show_close_button: false,
            background_color: Color::WHITE,
            transition_duration_ms: 300,
            transition_easing: Easing::EaseInOutCubic,
            settle_spring: SpringConfig::snap(),
        }
    }
}

impl PickerConfig {
    /// Config with pull-to-expand enabled at the default threshold
    pub fn with_pull_to_expand() -> Self {
        Self {
            pull_to_expand_enabled: true,
            ..Default::default()
        }
    }

    /// Clamp out-of-range values into a safe range for the given container
    /// height. Negative factors and thresholds become 0; the default map
    /// height is kept between [`MIN_MAP_HEIGHT`] and the container height.
    pub fn sanitized(mut self, container_height: f32) -> Self {
        let max_height = container_height.max(MIN_MAP_HEIGHT);
        self.parallax_scroll_factor = self.parallax_scroll_factor.max(0.0);
        self.pull_threshold = self.pull_threshold.max(0.0);
        self.default_map_height = self.default_map_height.clamp(MIN_MAP_HEIGHT, max_height);
        self
    }
}
