//! Map and list surfaces
//!
//! The renderable regions owned by the composite container. Surfaces carry
//! geometry and the minimum state the widget must coordinate (map region,
//! list content height); everything drawn inside them belongs to the host.

use taffy::prelude::*;

use maplist_core::geometry::{Color, Rect as Frame};

use crate::config::PickerConfig;
use crate::layout::{LayoutNodeId, LayoutTree};
use crate::parallax::ParallaxPhysics;

/// A geographic coordinate
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// The visible area of the map
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MapRegion {
    pub center: Coordinate,
    pub latitude_span: f64,
    pub longitude_span: f64,
}

impl MapRegion {
    pub const fn new(center: Coordinate, latitude_span: f64, longitude_span: f64) -> Self {
        Self {
            center,
            latitude_span,
            longitude_span,
        }
    }
}

impl Default for MapRegion {
    fn default() -> Self {
        Self::new(Coordinate::default(), 1.0, 1.0)
    }
}

/// The map surface. Sits at the top of the container; its height is driven
/// by the parallax physics and the transition controller.
#[derive(Clone, Debug, Default)]
pub struct MapSurface {
    pub frame: Frame,
    region: MapRegion,
}

impl MapSurface {
    pub fn region(&self) -> MapRegion {
        self.region
    }

    pub(crate) fn set_region(&mut self, region: MapRegion) {
        self.region = region;
    }
}

/// The list surface. Overlaps the map visually; scrolling it reveals or
/// covers the map. Content comes from the host's data source.
#[derive(Clone, Debug, Default)]
pub struct ListSurface {
    pub frame: Frame,
    content_height: f32,
}

impl ListSurface {
    pub fn content_height(&self) -> f32 {
        self.content_height
    }

    pub(crate) fn set_content_height(&mut self, height: f32) {
        self.content_height = height;
    }
}

/// Background-colored spacer filling the gap behind the list before its
/// content begins. Sized to the default map height plus any current
/// parallax stretch.
#[derive(Clone, Debug, Default)]
pub struct BackgroundSpacer {
    pub frame: Frame,
    pub color: Color,
}

/// The container's surface set plus the layout tree that positions it
pub struct Surfaces {
    pub map: MapSurface,
    pub list: ListSurface,
    pub spacer: BackgroundSpacer,
    tree: LayoutTree,
    root: LayoutNodeId,
    map_node: LayoutNodeId,
    spacer_node: LayoutNodeId,
    list_node: LayoutNodeId,
    bounds: Frame,
}

/// Absolute node pinned to the top edge, stretched to the full width
fn top_strip(height: f32) -> Style {
    Style {
        position: Position::Absolute,
        inset: taffy::Rect {
            left: length(0.0),
            right: length(0.0),
            top: length(0.0),
            bottom: auto(),
        },
        size: Size {
            width: auto(),
            height: length(height),
        },
        ..Default::default()
    }
}

/// Absolute node filling the whole container
fn fill() -> Style {
    Style {
        position: Position::Absolute,
        inset: taffy::Rect {
            left: length(0.0),
            right: length(0.0),
            top: length(0.0),
            bottom: length(0.0),
        },
        ..Default::default()
    }
}

impl Surfaces {
    /// Build the surface set for a container. Returns None for a degenerate
    /// (empty) container; callers treat that as "not mounted".
    pub fn build(bounds: Frame, config: &PickerConfig, physics: &ParallaxPhysics) -> Option<Self> {
        if bounds.is_empty() {
            return None;
        }

        let mut tree = LayoutTree::new();
        let root = tree.create_node(Style {
            size: Size {
                width: length(bounds.width),
                height: length(bounds.height),
            },
            ..Default::default()
        })?;
        // Paint order is spacer, map, list: the list overlaps the map and
        // reveals it as it scrolls.
        let spacer_node = tree.create_node(top_strip(physics.map_height()))?;
        let map_node = tree.create_node(top_strip(physics.map_height()))?;
        let list_node = tree.create_node(fill())?;
        tree.add_child(root, spacer_node);
        tree.add_child(root, map_node);
        tree.add_child(root, list_node);

        let mut surfaces = Self {
            map: MapSurface::default(),
            list: ListSurface::default(),
            spacer: BackgroundSpacer {
                frame: Frame::default(),
                color: config.background_color,
            },
            tree,
            root,
            map_node,
            spacer_node,
            list_node,
            bounds,
        };
        surfaces.apply(physics);
        Some(surfaces)
    }

    /// Re-solve the layout from the current parallax state and write the
    /// computed frames back into the surfaces.
    pub fn apply(&mut self, physics: &ParallaxPhysics) {
        self.tree.set_height(self.map_node, physics.map_height());
        self.tree.set_height(
            self.spacer_node,
            physics.default_height() + physics.stretch(),
        );
        self.tree
            .compute(self.root, self.bounds.width, self.bounds.height);

        if let Some(frame) = self.tree.bounds(self.map_node) {
            self.map.frame = frame;
        }
        if let Some(frame) = self.tree.bounds(self.spacer_node) {
            self.spacer.frame = frame;
        }
        if let Some(frame) = self.tree.bounds(self.list_node) {
            self.list.frame = frame;
        }
    }

    /// Adopt new container bounds and re-solve
    pub fn resize(&mut self, bounds: Frame, physics: &ParallaxPhysics) {
        self.bounds = bounds;
        self.tree.set_style(
            self.root,
            Style {
                size: Size {
                    width: length(bounds.width),
                    height: length(bounds.height),
                },
                ..Default::default()
            },
        );
        self.apply(physics);
    }

    pub fn bounds(&self) -> Frame {
        self.bounds
    }
}
