//! Delegation bridge
//!
//! Forwards list-data, list-behavior, and map-behavior calls to the host's
//! providers. References are weak: the host owns the providers and the
//! widget, and a provider that has been dropped simply stops receiving
//! forwards - the widget falls back to safe defaults.

use std::sync::{Arc, Weak};

use crate::providers::{ListBehavior, ListDataSource, MapBehavior};
use crate::surfaces::MapRegion;

/// Non-owning fan-out point for the externally supplied providers
#[derive(Default)]
pub struct DelegationBridge {
    data_source: Option<Weak<dyn ListDataSource>>,
    list_behavior: Option<Weak<dyn ListBehavior>>,
    map_behavior: Option<Weak<dyn MapBehavior>>,
}

impl DelegationBridge {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_data_source(&mut self, source: &Arc<dyn ListDataSource>) {
        self.data_source = Some(Arc::downgrade(source));
    }

    pub fn set_list_behavior(&mut self, behavior: &Arc<dyn ListBehavior>) {
        self.list_behavior = Some(Arc::downgrade(behavior));
    }

    pub fn set_map_behavior(&mut self, behavior: &Arc<dyn MapBehavior>) {
        self.map_behavior = Some(Arc::downgrade(behavior));
    }

    pub fn has_data_source(&self) -> bool {
        self.data_source
            .as_ref()
            .is_some_and(|weak| weak.strong_count() > 0)
    }

    fn data_source(&self) -> Option<Arc<dyn ListDataSource>> {
        self.data_source.as_ref().and_then(Weak::upgrade)
    }

    /// Number of rows reported by the data source, 0 when absent
    pub fn row_count(&self) -> usize {
        self.data_source()
            .map(|source| source.row_count())
            .unwrap_or(0)
    }

    /// Total height of the list content
    pub fn content_height(&self) -> f32 {
        let Some(source) = self.data_source() else {
            return 0.0;
        };
        let count = source.row_count();
        let height = (0..count).map(|index| source.row_height(index)).sum();
        tracing::trace!("content_height rows={} height={:.1}", count, height);
        height
    }

    /// Forward a row selection to the list observer
    pub fn row_selected(&self, index: usize) {
        if let Some(behavior) = self.list_behavior.as_ref().and_then(Weak::upgrade) {
            behavior.row_selected(index);
        }
    }

    /// Forward a region change to the map observer
    pub fn region_changed(&self, region: &MapRegion) {
        if let Some(behavior) = self.map_behavior.as_ref().and_then(Weak::upgrade) {
            behavior.region_changed(region);
        }
    }

    /// Forward an annotation tap to the map observer
    pub fn annotation_selected(&self, annotation_id: u64) {
        if let Some(behavior) = self.map_behavior.as_ref().and_then(Weak::upgrade) {
            behavior.annotation_selected(annotation_id);
        }
    }
}
