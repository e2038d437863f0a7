//! External content providers
//!
//! Capability interfaces supplied by the host. The widget forwards content
//! questions to these verbatim and never filters or overrides the answers;
//! providers own their data, the widget holds only non-owning references.

use crate::surfaces::MapRegion;

/// Row height assumed when a data source does not override it
pub const DEFAULT_ROW_HEIGHT: f32 = 44.0;

/// Supplies the list's content shape. The widget only needs enough to size
/// the scrollable area; rendering the rows is the host's business.
pub trait ListDataSource: Send + Sync {
    /// Number of rows in the list
    fn row_count(&self) -> usize;

    /// Height of one row
    fn row_height(&self, _index: usize) -> f32 {
        DEFAULT_ROW_HEIGHT
    }
}

/// Observes list interactions
pub trait ListBehavior: Send + Sync {
    /// A row was selected
    fn row_selected(&self, _index: usize) {}
}

/// Observes map interactions
pub trait MapBehavior: Send + Sync {
    /// The visible region changed
    fn region_changed(&self, _region: &MapRegion) {}

    /// An annotation was tapped
    fn annotation_selected(&self, _annotation_id: u64) {}
}
