//! Layout tree management
//!
//! Thin wrapper mapping widget node ids onto a Taffy tree. The picker keeps
//! one tree with four nodes (container, map, spacer, list) and re-solves it
//! whenever the parallax height changes.

use slotmap::{new_key_type, SlotMap};
use taffy::prelude::*;

use maplist_core::geometry::Rect as Frame;

new_key_type! {
    pub struct LayoutNodeId;
}

/// Maps between widget node IDs and Taffy node IDs
pub struct LayoutTree {
    taffy: TaffyTree,
    node_map: SlotMap<LayoutNodeId, NodeId>,
}

impl LayoutTree {
    pub fn new() -> Self {
        Self {
            taffy: TaffyTree::new(),
            node_map: SlotMap::with_key(),
        }
    }

    /// Create a new layout node with the given style
    pub fn create_node(&mut self, style: Style) -> Option<LayoutNodeId> {
        let taffy_node = self.taffy.new_leaf(style).ok()?;
        Some(self.node_map.insert(taffy_node))
    }

    /// Add a child to a parent node
    pub fn add_child(&mut self, parent: LayoutNodeId, child: LayoutNodeId) {
        if let (Some(&parent_node), Some(&child_node)) =
            (self.node_map.get(parent), self.node_map.get(child))
        {
            let _ = self.taffy.add_child(parent_node, child_node);
        }
    }

    /// Set the style for a node
    pub fn set_style(&mut self, id: LayoutNodeId, style: Style) {
        if let Some(&taffy_node) = self.node_map.get(id) {
            let _ = self.taffy.set_style(taffy_node, style);
        }
    }

    /// Update only the fixed height of a node, keeping the rest of its style
    pub fn set_height(&mut self, id: LayoutNodeId, height: f32) {
        if let Some(&taffy_node) = self.node_map.get(id) {
            if let Ok(style) = self.taffy.style(taffy_node) {
                let mut style = style.clone();
                style.size.height = length(height);
                let _ = self.taffy.set_style(taffy_node, style);
            }
        }
    }

    /// Compute layout for a tree rooted at the given node
    pub fn compute(&mut self, root: LayoutNodeId, width: f32, height: f32) {
        if let Some(&taffy_node) = self.node_map.get(root) {
            let _ = self.taffy.compute_layout(
                taffy_node,
                Size {
                    width: AvailableSpace::Definite(width),
                    height: AvailableSpace::Definite(height),
                },
            );
        }
    }

    /// Get the computed frame for a node, relative to its parent
    pub fn bounds(&self, id: LayoutNodeId) -> Option<Frame> {
        let &taffy_node = self.node_map.get(id)?;
        let layout = self.taffy.layout(taffy_node).ok()?;
        Some(Frame::new(
            layout.location.x,
            layout.location.y,
            layout.size.width,
            layout.size.height,
        ))
    }
}

impl Default for LayoutTree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_child_height_updates() {
        let mut tree = LayoutTree::new();

        let root = tree
            .create_node(Style {
                size: Size {
                    width: length(390.0),
                    height: length(844.0),
                },
                ..Default::default()
            })
            .unwrap();
        let map = tree
            .create_node(Style {
                position: Position::Absolute,
                inset: taffy::Rect {
                    left: length(0.0),
                    right: length(0.0),
                    top: length(0.0),
                    bottom: auto(),
                },
                size: Size {
                    width: auto(),
                    height: length(180.0),
                },
                ..Default::default()
            })
            .unwrap();
        tree.add_child(root, map);

        tree.compute(root, 390.0, 844.0);
        let frame = tree.bounds(map).unwrap();
        assert_eq!(frame, Frame::new(0.0, 0.0, 390.0, 180.0));

        tree.set_height(map, 200.0);
        tree.compute(root, 390.0, 844.0);
        let frame = tree.bounds(map).unwrap();
        assert_eq!(frame.height, 200.0);
        assert_eq!(frame.width, 390.0);
    }
}
