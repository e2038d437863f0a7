//! Lifecycle callbacks
//!
//! Six hooks cover the widget's life: the two surfaces becoming ready, and
//! the will/did pairs around expand and collapse. Hooks can be registered
//! as plain closures or through an observer trait; both styles append to
//! the same per-event handler list, so both fire for the same event, in
//! registration order. Observers are held weakly - a dropped observer just
//! stops being called.

use std::sync::{Arc, Weak};

use smallvec::SmallVec;

use crate::surfaces::{ListSurface, MapSurface};

/// Hook receiving the map surface
pub type MapHook = Box<dyn Fn(&MapSurface) + Send + Sync>;
/// Hook receiving the list surface
pub type ListHook = Box<dyn Fn(&ListSurface) + Send + Sync>;

/// Observer interface for the widget's lifecycle. All methods have empty
/// defaults; implement only what you need.
pub trait MapListViewObserver: Send + Sync {
    /// The map surface was constructed
    fn map_ready(&self, _map: &MapSurface) {}

    /// The list surface was constructed
    fn list_ready(&self, _list: &ListSurface) {}

    /// The map is about to expand to full screen
    fn will_expand(&self, _map: &MapSurface) {}

    /// The map finished expanding to full screen
    fn did_expand(&self, _map: &MapSurface) {}

    /// The map is about to collapse back to its default height
    fn will_collapse(&self, _map: &MapSurface) {}

    /// The map finished collapsing to its default height
    fn did_collapse(&self, _map: &MapSurface) {}
}

/// Per-event handler lists. Most widgets register at most a closure and an
/// observer per event, hence the inline capacity of two.
#[derive(Default)]
pub struct CallbackSet {
    map_ready: SmallVec<[MapHook; 2]>,
    list_ready: SmallVec<[ListHook; 2]>,
    will_expand: SmallVec<[MapHook; 2]>,
    did_expand: SmallVec<[MapHook; 2]>,
    will_collapse: SmallVec<[MapHook; 2]>,
    did_collapse: SmallVec<[MapHook; 2]>,
}

impl CallbackSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_map_ready<F: Fn(&MapSurface) + Send + Sync + 'static>(&mut self, hook: F) {
        self.map_ready.push(Box::new(hook));
    }

    pub fn on_list_ready<F: Fn(&ListSurface) + Send + Sync + 'static>(&mut self, hook: F) {
        self.list_ready.push(Box::new(hook));
    }

    pub fn on_will_expand<F: Fn(&MapSurface) + Send + Sync + 'static>(&mut self, hook: F) {
        self.will_expand.push(Box::new(hook));
    }

    pub fn on_did_expand<F: Fn(&MapSurface) + Send + Sync + 'static>(&mut self, hook: F) {
        self.did_expand.push(Box::new(hook));
    }

    pub fn on_will_collapse<F: Fn(&MapSurface) + Send + Sync + 'static>(&mut self, hook: F) {
        self.will_collapse.push(Box::new(hook));
    }

    pub fn on_did_collapse<F: Fn(&MapSurface) + Send + Sync + 'static>(&mut self, hook: F) {
        self.did_collapse.push(Box::new(hook));
    }

    /// Register an observer: appends a weak-upgrading adapter to each of
    /// the six handler lists.
    pub fn add_observer(&mut self, observer: &Arc<dyn MapListViewObserver>) {
        let weak = Arc::downgrade(observer);
        self.map_ready.push(adapter(&weak, |obs, map| obs.map_ready(map)));
        {
            let weak = weak.clone();
            self.list_ready.push(Box::new(move |list| {
                if let Some(obs) = weak.upgrade() {
                    obs.list_ready(list);
                }
            }));
        }
        self.will_expand
            .push(adapter(&weak, |obs, map| obs.will_expand(map)));
        self.did_expand
            .push(adapter(&weak, |obs, map| obs.did_expand(map)));
        self.will_collapse
            .push(adapter(&weak, |obs, map| obs.will_collapse(map)));
        self.did_collapse
            .push(adapter(&weak, |obs, map| obs.did_collapse(map)));
    }

    pub fn fire_map_ready(&self, map: &MapSurface) {
        tracing::trace!("fire map_ready handlers={}", self.map_ready.len());
        for hook in &self.map_ready {
            hook(map);
        }
    }

    pub fn fire_list_ready(&self, list: &ListSurface) {
        tracing::trace!("fire list_ready handlers={}", self.list_ready.len());
        for hook in &self.list_ready {
            hook(list);
        }
    }

    pub fn fire_will_expand(&self, map: &MapSurface) {
        tracing::trace!("fire will_expand handlers={}", self.will_expand.len());
        for hook in &self.will_expand {
            hook(map);
        }
    }

    pub fn fire_did_expand(&self, map: &MapSurface) {
        tracing::trace!("fire did_expand handlers={}", self.did_expand.len());
        for hook in &self.did_expand {
            hook(map);
        }
    }

    pub fn fire_will_collapse(&self, map: &MapSurface) {
        tracing::trace!("fire will_collapse handlers={}", self.will_collapse.len());
        for hook in &self.will_collapse {
            hook(map);
        }
    }

    pub fn fire_did_collapse(&self, map: &MapSurface) {
        tracing::trace!("fire did_collapse handlers={}", self.did_collapse.len());
        for hook in &self.did_collapse {
            hook(map);
        }
    }
}

/// Wrap a weak observer reference into a map-surface hook
fn adapter(
    weak: &Weak<dyn MapListViewObserver>,
    call: impl Fn(&Arc<dyn MapListViewObserver>, &MapSurface) + Send + Sync + 'static,
) -> MapHook {
    let weak = weak.clone();
    Box::new(move |map| {
        if let Some(observer) = weak.upgrade() {
            call(&observer, map);
        }
    })
}
