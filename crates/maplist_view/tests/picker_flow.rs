//! End-to-end flows through the picker: mount, parallax, pull-to-expand,
//! close, and dispatcher-driven event routing.

use std::sync::{Arc, Mutex};

use maplist_core::events::{Event, EventDispatcher};
use maplist_view::prelude::*;
use maplist_view::{ListSurface, MapSurface};

const DT: f32 = 1.0 / 120.0;

#[derive(Default)]
struct EventLog(Mutex<Vec<String>>);

impl EventLog {
    fn push(&self, entry: impl Into<String>) {
        self.0.lock().unwrap().push(entry.into());
    }

    fn entries(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

struct Observer {
    log: Arc<EventLog>,
}

impl MapListViewObserver for Observer {
    fn map_ready(&self, _map: &MapSurface) {
        self.log.push("observer:map_ready");
    }

    fn list_ready(&self, _list: &ListSurface) {
        self.log.push("observer:list_ready");
    }

    fn will_expand(&self, _map: &MapSurface) {
        self.log.push("observer:will_expand");
    }

    fn did_expand(&self, map: &MapSurface) {
        self.log.push(format!("observer:did_expand@{}", map.frame.height));
    }

    fn will_collapse(&self, _map: &MapSurface) {
        self.log.push("observer:will_collapse");
    }

    fn did_collapse(&self, _map: &MapSurface) {
        self.log.push("observer:did_collapse");
    }
}

struct TenRows;

impl ListDataSource for TenRows {
    fn row_count(&self) -> usize {
        10
    }

    fn row_height(&self, _index: usize) -> f32 {
        50.0
    }
}

struct Selections {
    log: Arc<EventLog>,
}

impl ListBehavior for Selections {
    fn row_selected(&self, index: usize) {
        self.log.push(format!("row_selected:{index}"));
    }
}

impl MapBehavior for Selections {
    fn region_changed(&self, region: &MapRegion) {
        self.log
            .push(format!("region_changed:{:.1}", region.center.latitude));
    }

    fn annotation_selected(&self, annotation_id: u64) {
        self.log.push(format!("annotation_selected:{annotation_id}"));
    }
}

fn run_until_idle(picker: &mut MapListView) {
    let mut frames = 0;
    while picker.tick(DT) {
        frames += 1;
        assert!(frames < 10_000, "animation never finished");
    }
}

#[test]
fn mount_fires_ready_hooks_once_before_provider_calls() {
    let log = Arc::new(EventLog::default());

    let closure_log = log.clone();
    let observer: Arc<dyn MapListViewObserver> = Arc::new(Observer { log: log.clone() });
    let source: Arc<dyn ListDataSource> = Arc::new(TenRows);

    let mut picker = MapListView::new(390.0, 844.0)
        .on_map_ready(move |_| closure_log.push("closure:map_ready"))
        .observer(&observer)
        .data_source(&source);

    picker.mount();
    // Mounting twice must not refire the ready hooks
    picker.mount();

    assert_eq!(
        log.entries(),
        vec![
            "closure:map_ready",
            "observer:map_ready",
            "observer:list_ready"
        ]
    );
    // Provider was queried after the hooks: 10 rows of 50
    assert_eq!(picker.list_surface().unwrap().content_height(), 500.0);
}

#[test]
fn pull_past_threshold_expands_with_ordered_hooks() {
    let log = Arc::new(EventLog::default());
    let observer: Arc<dyn MapListViewObserver> = Arc::new(Observer { log: log.clone() });

    let mut picker = MapListView::new(390.0, 844.0)
        .pull_to_expand(true)
        .show_close_button(true)
        .observer(&observer);
    picker.mount();

    // Live parallax while the finger drags
    picker.on_scroll(-40.0);
    assert_eq!(picker.layout().map_height, 200.0);
    assert!(!picker.is_full_screen());

    // Released past the 140pt threshold: the map pops out
    picker.on_scroll(-150.0);
    picker.on_scroll_end(-150.0);
    assert_eq!(picker.state(), PickerState::Expanding);

    run_until_idle(&mut picker);

    assert!(picker.is_full_screen());
    assert_eq!(picker.layout().map_height, 844.0);
    assert_eq!(picker.close_button().opacity(), 1.0);

    let entries = log.entries();
    let will = entries
        .iter()
        .position(|e| e == "observer:will_expand")
        .expect("will_expand fired");
    let did = entries
        .iter()
        .position(|e| e.starts_with("observer:did_expand"))
        .expect("did_expand fired");
    assert!(will < did, "will hook must precede did hook: {entries:?}");
    // The did hook saw the final, full-height map frame
    assert!(entries[did].ends_with("@844"), "{entries:?}");
}

#[test]
fn release_short_of_threshold_settles_back() {
    let log = Arc::new(EventLog::default());
    let observer: Arc<dyn MapListViewObserver> = Arc::new(Observer { log: log.clone() });

    let mut picker = MapListView::new(390.0, 844.0)
        .pull_to_expand(true)
        .observer(&observer);
    picker.mount();

    picker.on_scroll(-100.0); // stretched to 230, threshold not crossed
    picker.on_scroll_end(-100.0);
    assert_eq!(picker.state(), PickerState::Default);

    run_until_idle(&mut picker);

    assert_eq!(picker.layout().map_height, 180.0);
    assert!(!picker.is_full_screen());
    // The snap-back is not an expand/collapse: no hooks fire
    assert!(log
        .entries()
        .iter()
        .all(|e| e.ends_with("_ready")), "{:?}", log.entries());
}

#[test]
fn close_button_tap_round_trips_back_to_default() {
    let mut picker = MapListView::new(390.0, 844.0).show_close_button(true);
    picker.mount();

    picker.expand(true);
    run_until_idle(&mut picker);
    assert!(picker.is_full_screen());
    assert!(picker.close_button().is_visible());

    // Tap the affordance in the top-right corner
    picker.handle_event(&Event::pointer_up(picker.id(), 350.0, 30.0));
    run_until_idle(&mut picker);

    assert!(!picker.is_full_screen());
    assert_eq!(picker.layout().map_height, 180.0);
    assert!(!picker.close_button().is_visible());
}

#[test]
fn dispatcher_routes_events_to_the_picker() {
    let picker = MapListView::new(390.0, 844.0).pull_to_expand(true);
    let id = picker.id();
    let picker: SharedMapListView = Arc::new(Mutex::new(picker));
    picker.lock().unwrap().mount();

    let mut dispatcher = EventDispatcher::new();
    MapListView::install_handlers(&picker, &mut dispatcher);

    dispatcher.dispatch(&mut Event::scroll(id, -40.0));
    assert_eq!(picker.lock().unwrap().layout().map_height, 200.0);

    dispatcher.dispatch(&mut Event::scroll_end(id, -150.0));
    assert_eq!(picker.lock().unwrap().state(), PickerState::Expanding);

    let mut frames = 0;
    while picker.lock().unwrap().tick(DT) {
        frames += 1;
        assert!(frames < 10_000);
    }
    assert!(picker.lock().unwrap().is_full_screen());
}

#[test]
fn content_and_map_calls_forward_verbatim() {
    let log = Arc::new(EventLog::default());
    let behaviors = Arc::new(Selections { log: log.clone() });
    let list_behavior: Arc<dyn ListBehavior> = behaviors.clone();
    let map_behavior: Arc<dyn MapBehavior> = behaviors.clone();
    let source: Arc<dyn ListDataSource> = Arc::new(TenRows);

    let mut picker = MapListView::new(390.0, 844.0)
        .data_source(&source)
        .list_behavior(&list_behavior)
        .map_behavior(&map_behavior);
    picker.mount();

    picker.select_row(3);
    picker.set_map_region(MapRegion::new(Coordinate::new(47.6, -122.3), 0.5, 0.5));
    picker.select_annotation(42);

    assert_eq!(
        log.entries(),
        vec![
            "row_selected:3",
            "region_changed:47.6",
            "annotation_selected:42"
        ]
    );
    assert_eq!(
        picker.map_surface().unwrap().region().center.longitude,
        -122.3
    );
}

#[test]
fn toggle_mid_animation_is_dropped_not_queued() {
    let mut picker = MapListView::new(390.0, 844.0);
    picker.mount();

    picker.expand(true);
    assert_eq!(picker.state(), PickerState::Expanding);

    // Toggle sees a non-full-screen map and re-requests expand: dropped
    picker.toggle();
    assert_eq!(picker.state(), PickerState::Expanding);

    run_until_idle(&mut picker);
    assert!(picker.is_full_screen());

    // After landing, the next toggle is honored normally
    picker.toggle();
    assert_eq!(picker.state(), PickerState::Collapsing);
    run_until_idle(&mut picker);
    assert!(!picker.is_full_screen());
}
