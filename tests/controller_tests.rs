use rocca::{
    controller::LocationFactory, AnnotationId, ControllerConfig, CoordinateSpan, GestureEvent,
    HeadlessSurface, LatLng, LocationAccuracy, LocationSource, LocationState, MapController,
    MapSurface, MapType, Point, Region, TextLabel,
};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Surface that records every call and the peak number of annotations
struct RecordingSurface {
    inner: HeadlessSurface,
    calls: Vec<String>,
    peak_annotations: usize,
}

impl RecordingSurface {
    fn new() -> Self {
        Self {
            inner: HeadlessSurface::new(Point::new(320.0, 480.0)),
            calls: Vec::new(),
            peak_annotations: 0,
        }
    }

    fn mutations(&self) -> usize {
        self.calls.len()
    }
}

impl MapSurface for RecordingSurface {
    fn set_region(&mut self, region: Region, animated: bool) {
        self.calls.push(format!("set_region animated={}", animated));
        self.inner.set_region(region, animated);
    }

    fn region(&self) -> Region {
        self.inner.region()
    }

    fn set_map_type(&mut self, map_type: MapType) {
        self.calls.push(format!("set_map_type {}", map_type));
        self.inner.set_map_type(map_type);
    }

    fn map_type(&self) -> MapType {
        self.inner.map_type()
    }

    fn set_zoom_enabled(&mut self, enabled: bool) {
        self.calls.push(format!("zoom {}", enabled));
        self.inner.set_zoom_enabled(enabled);
    }

    fn set_scroll_enabled(&mut self, enabled: bool) {
        self.calls.push(format!("scroll {}", enabled));
        self.inner.set_scroll_enabled(enabled);
    }

    fn add_annotation(&mut self, coordinate: LatLng) -> AnnotationId {
        self.calls.push("add_annotation".to_string());
        let id = self.inner.add_annotation(coordinate);
        self.peak_annotations = self.peak_annotations.max(self.inner.annotation_count());
        id
    }

    fn remove_annotation(&mut self, id: AnnotationId) {
        self.calls.push("remove_annotation".to_string());
        self.inner.remove_annotation(id);
    }

    fn convert_point(&self, point: Point) -> LatLng {
        self.inner.convert_point(point)
    }
}

/// Location source whose calls land in a shared log
#[derive(Clone, Default)]
struct ScriptedLocation {
    calls: Rc<RefCell<Vec<&'static str>>>,
    enabled: Rc<Cell<bool>>,
    built: Rc<Cell<usize>>,
}

impl ScriptedLocation {
    fn enabled() -> Self {
        let location = Self::default();
        location.enabled.set(true);
        location
    }

    fn factory(&self) -> LocationFactory {
        let script = self.clone();
        Box::new(move || {
            script.built.set(script.built.get() + 1);
            Box::new(script.clone()) as Box<dyn LocationSource>
        })
    }

    fn calls(&self) -> Vec<&'static str> {
        self.calls.borrow().clone()
    }

    fn count(&self, call: &str) -> usize {
        self.calls.borrow().iter().filter(|c| **c == call).count()
    }
}

impl LocationSource for ScriptedLocation {
    fn set_desired_accuracy(&mut self, accuracy: LocationAccuracy) {
        assert_eq!(accuracy, LocationAccuracy::Best);
        self.calls.borrow_mut().push("accuracy");
    }

    fn request_when_in_use_authorization(&mut self) {
        self.calls.borrow_mut().push("authorize");
    }

    fn is_service_enabled(&self) -> bool {
        self.enabled.get()
    }

    fn start_updating(&mut self) {
        self.calls.borrow_mut().push("start");
    }

    fn stop_updating(&mut self) {
        self.calls.borrow_mut().push("stop");
    }
}

fn landmark() -> LatLng {
    LatLng::new(41.129437, 14.782375)
}

fn controller(location: &ScriptedLocation) -> MapController<RecordingSurface, TextLabel> {
    let _ = env_logger::builder().is_test(true).try_init();
    MapController::new(
        ControllerConfig::default(),
        RecordingSurface::new(),
        TextLabel::default(),
        location.factory(),
    )
    .unwrap()
}

#[test]
fn test_single_taps_cycle_and_wrap_after_six() {
    let mut controller = controller(&ScriptedLocation::enabled());
    let expected = [
        (MapType::Hybrid, "Hybrid"),
        (MapType::HybridFlyover, "Hybrid Flyover"),
        (MapType::MutedStandard, "Muted Standard"),
        (MapType::Satellite, "Satellite"),
        (MapType::SatelliteFlyover, "Satellite Flyover"),
        (MapType::Standard, "Standard"),
    ];

    for (map_type, label) in expected {
        controller.handle_gesture(GestureEvent::SingleTap(Point::new(10.0, 10.0)));
        assert_eq!(controller.map_type(), map_type);
        assert_eq!(controller.surface().map_type(), map_type);
        assert_eq!(controller.label().text(), label);
    }

    for _ in 0..12 {
        controller.handle_gesture(GestureEvent::SingleTap(Point::new(10.0, 10.0)));
    }
    assert_eq!(controller.map_type(), MapType::Standard);
}

#[test]
fn test_long_press_on_map_pins_converted_coordinate() {
    let mut controller = controller(&ScriptedLocation::enabled());
    let point = Point::new(80.0, 360.0);
    let expected = controller.surface().convert_point(point);

    controller.handle_gesture(GestureEvent::LongPressOnMap(point));

    let pin = controller.pin().unwrap();
    assert_eq!(pin.coordinate, expected);
    assert_eq!(controller.label().text(), expected.to_label());
    assert_eq!(
        controller.label().text(),
        format!("{} : {}", expected.lat as f32, expected.lng as f32)
    );
    assert_eq!(controller.surface().inner.annotations(), vec![(pin.annotation, expected)]);
}

#[test]
fn test_at_most_one_annotation_for_any_sequence() {
    let location = ScriptedLocation::enabled();
    let mut controller = controller(&location);

    for i in 0..10 {
        let point = Point::new(10.0 * i as f64, 20.0 * i as f64);
        controller.handle_gesture(GestureEvent::LongPressOnMap(point));
        if i % 3 == 0 {
            controller.handle_gesture(GestureEvent::LongPressOnLabel);
            controller.on_location_fix(&[LatLng::new(40.0 + i as f64 * 0.01, 14.0)]);
        }
        assert_eq!(controller.surface().inner.annotation_count(), 1);
    }
    assert_eq!(controller.surface().peak_annotations, 1);

    // every replacement removes before it adds
    let pin_calls: Vec<_> = controller
        .surface()
        .calls
        .iter()
        .filter(|c| c.ends_with("annotation"))
        .collect();
    assert_eq!(pin_calls[0], "add_annotation");
    for pair in pin_calls[1..].chunks(2) {
        assert_eq!(pair[0], "remove_annotation");
        assert_eq!(pair[1], "add_annotation");
    }
}

#[test]
fn test_locate_one_shot_recenters_keeping_span() {
    let location = ScriptedLocation::enabled();
    let mut controller = controller(&location);
    let span_before = controller.surface().region().span;

    controller.handle_gesture(GestureEvent::LongPressOnLabel);
    assert_eq!(location.calls(), vec!["accuracy", "authorize", "start"]);
    assert_eq!(controller.location_state(), LocationState::AwaitingFix);

    let fix = LatLng::new(41.13, 14.78);
    let later = LatLng::new(42.0, 15.0);
    assert!(controller.on_location_fix(&[fix, later]));

    assert_eq!(location.calls(), vec!["accuracy", "authorize", "start", "stop"]);
    assert_eq!(controller.location_state(), LocationState::FixDelivered);
    assert_eq!(
        controller.surface().region(),
        Region::new(fix, span_before)
    );
    assert_eq!(controller.pin().unwrap().coordinate, fix);
    assert!(controller
        .surface()
        .calls
        .contains(&"set_region animated=true".to_string()));

    // further fixes from the same subscription change nothing
    let mutations = controller.surface().mutations();
    assert!(!controller.on_location_fix(&[later]));
    assert_eq!(controller.surface().mutations(), mutations);
    assert_eq!(controller.surface().region().center, fix);
    assert_eq!(location.count("stop"), 1);
}

#[test]
fn test_locate_keeps_user_zoom() {
    let location = ScriptedLocation::enabled();
    let mut controller = controller(&location);
    controller.surface_mut().inner.zoom_by(2.0);
    let zoomed = controller.surface().region().span;
    assert_eq!(zoomed, CoordinateSpan::new(0.00075, 0.00075));

    controller.handle_gesture(GestureEvent::LongPressOnLabel);
    controller.on_location_fix(&[LatLng::new(45.0, 9.0)]);
    assert_eq!(controller.surface().region().span, zoomed);
}

#[test]
fn test_locate_rearms_with_same_source() {
    let location = ScriptedLocation::enabled();
    let mut controller = controller(&location);

    controller.handle_gesture(GestureEvent::LongPressOnLabel);
    controller.on_location_fix(&[LatLng::new(41.0, 14.0)]);
    controller.handle_gesture(GestureEvent::LongPressOnLabel);
    assert_eq!(controller.location_state(), LocationState::AwaitingFix);
    controller.on_location_fix(&[LatLng::new(41.5, 14.5)]);

    assert_eq!(location.built.get(), 1);
    assert_eq!(location.count("authorize"), 1);
    assert_eq!(location.count("start"), 2);
    assert_eq!(location.count("stop"), 2);
    assert_eq!(controller.pin().unwrap().coordinate, LatLng::new(41.5, 14.5));
}

#[test]
fn test_locate_with_services_disabled_is_noop() {
    let location = ScriptedLocation::default();
    let mut controller = controller(&location);
    let mutations = controller.surface().mutations();
    let pin = controller.pin();

    controller.handle_gesture(GestureEvent::LongPressOnLabel);

    assert_eq!(location.calls(), vec!["accuracy", "authorize"]);
    assert_eq!(controller.location_state(), LocationState::Configured);
    assert_eq!(controller.surface().mutations(), mutations);
    assert_eq!(controller.pin(), pin);
    assert_eq!(controller.label().updates(), 0);

    // a fix that arrives anyway is not part of a lookup
    assert!(!controller.on_location_fix(&[LatLng::new(1.0, 1.0)]));
    assert_eq!(controller.pin(), pin);
}

#[test]
fn test_empty_fix_list_keeps_waiting() {
    let location = ScriptedLocation::enabled();
    let mut controller = controller(&location);

    controller.handle_gesture(GestureEvent::LongPressOnLabel);
    assert!(!controller.on_location_fix(&[]));
    assert_eq!(controller.location_state(), LocationState::AwaitingFix);
    assert_eq!(location.count("stop"), 0);
    assert_eq!(controller.pin().unwrap().coordinate, landmark());
}

#[test]
fn test_initial_setup_calls() {
    let controller = controller(&ScriptedLocation::enabled());
    let calls = &controller.surface().calls;

    assert!(calls.contains(&"zoom true".to_string()));
    assert!(calls.contains(&"scroll true".to_string()));
    assert!(calls.contains(&"set_region animated=false".to_string()));
    assert_eq!(
        controller.surface().region(),
        Region::new(landmark(), CoordinateSpan::new(0.0015, 0.0015))
    );
    assert_eq!(controller.pin().unwrap().coordinate, landmark());
}
