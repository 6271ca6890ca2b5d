//! Map interaction controller
//!
//! Owns the map style, the single pin and the one-shot location lookup, and
//! maps recognized gestures onto the host's map surface and status label.

use crate::{
    core::{config::ControllerConfig, geo::LatLng, geo::Point, map_type::MapType},
    input::{
        events::{GestureEvent, TouchInput},
        gestures::{GestureRecognizer, GestureRules, RecognizerKind},
    },
    location::channel::LocationUpdate,
    prelude::Instant,
    traits::{AnnotationId, LocationAccuracy, LocationSource, MapSurface, StatusLabel},
    Result,
};

/// Builds the location source the first time it is needed
pub type LocationFactory = Box<dyn FnMut() -> Box<dyn LocationSource>>;

/// The single location marker on the map
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pin {
    pub coordinate: LatLng,
    pub annotation: AnnotationId,
}

/// Progress of the one-shot location lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LocationState {
    /// No location source built yet
    #[default]
    Uninitialized,
    /// Source built, accuracy and authorization requested
    Configured,
    /// Updates started, waiting for the first fix
    AwaitingFix,
    /// A fix arrived and updates were stopped
    FixDelivered,
}

pub struct MapController<S: MapSurface, L: StatusLabel> {
    config: ControllerConfig,
    surface: S,
    label: L,
    map_type: MapType,
    pin: Option<Pin>,
    recognizer: GestureRecognizer,
    location: Option<Box<dyn LocationSource>>,
    location_factory: LocationFactory,
    location_state: LocationState,
}

impl<S: MapSurface, L: StatusLabel> MapController<S, L> {
    /// Frames the landmark, enables pan and zoom and drops the first pin
    pub fn new(
        config: ControllerConfig,
        surface: S,
        label: L,
        location_factory: LocationFactory,
    ) -> Result<Self> {
        config.validate()?;

        let mut rules = GestureRules::none();
        rules.require_failure_of(RecognizerKind::SingleTap, RecognizerKind::DoubleTap)?;
        let recognizer = GestureRecognizer::with_config(config.gestures.clone(), rules);

        let mut controller = Self {
            config,
            surface,
            label,
            map_type: MapType::Standard,
            pin: None,
            recognizer,
            location: None,
            location_factory,
            location_state: LocationState::Uninitialized,
        };
        controller.setup_surface();
        Ok(controller)
    }

    fn setup_surface(&mut self) {
        self.surface.set_zoom_enabled(self.config.zoom_enabled);
        self.surface.set_scroll_enabled(self.config.scroll_enabled);
        self.surface.set_map_type(self.map_type);
        self.surface.set_region(self.config.initial_region(), false);

        let landmark = self.config.landmark;
        self.set_pin(landmark);
        log::info!("map centered on landmark {}", landmark);
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn map_type(&self) -> MapType {
        self.map_type
    }

    pub fn pin(&self) -> Option<Pin> {
        self.pin
    }

    pub fn location_state(&self) -> LocationState {
        self.location_state
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// For user pan and zoom driven by the host
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn label(&self) -> &L {
        &self.label
    }

    pub fn recognizer(&self) -> &GestureRecognizer {
        &self.recognizer
    }

    /// Feeds a raw touch through the recognizer and handles what it completes
    pub fn dispatch_touch(&mut self, input: TouchInput, now: Instant) -> Vec<GestureEvent> {
        let events = self.recognizer.process(input, now);
        for event in &events {
            self.handle_gesture(*event);
        }
        events
    }

    /// Releases taps whose double tap window closed; call once per frame
    pub fn poll(&mut self, now: Instant) -> Vec<GestureEvent> {
        let events = self.recognizer.poll(now);
        for event in &events {
            self.handle_gesture(*event);
        }
        events
    }

    /// Forgets touches in flight, e.g. when the host window loses focus
    pub fn cancel_touches(&mut self) {
        self.recognizer.reset();
    }

    pub fn handle_gesture(&mut self, event: GestureEvent) {
        log::debug!("gesture: {:?}", event);
        match event {
            GestureEvent::SingleTap(_) => self.advance_map_type(),
            GestureEvent::DoubleTap(_) => {}
            GestureEvent::LongPressOnMap(point) => self.pin_at_point(point),
            GestureEvent::LongPressOnLabel => self.locate(),
        }
    }

    /// Switches to the next map style and names it in the label
    pub fn advance_map_type(&mut self) {
        self.map_type = self.map_type.next();
        self.surface.set_map_type(self.map_type);
        self.label.set_text(self.map_type.label());
    }

    /// Pins the coordinate under a screen point and shows it in the label
    pub fn pin_at_point(&mut self, point: Point) {
        let coordinate = self.surface.convert_point(point);
        self.label.set_text(&coordinate.to_label());
        self.set_pin(coordinate);
    }

    /// Starts a one-shot lookup of the device position
    ///
    /// With location services off this does nothing at all. A denied
    /// authorization is not detected either; the fix simply never comes.
    pub fn locate(&mut self) {
        if self.location.is_none() {
            self.location = Some(self.build_location_source());
            self.location_state = LocationState::Configured;
        }
        let Some(source) = self.location.as_mut() else {
            return;
        };

        if !source.is_service_enabled() {
            log::debug!("location services disabled, locate ignored");
            return;
        }

        source.start_updating();
        self.location_state = LocationState::AwaitingFix;
    }

    fn build_location_source(&mut self) -> Box<dyn LocationSource> {
        let mut source = (self.location_factory)();
        source.set_desired_accuracy(LocationAccuracy::Best);
        source.request_when_in_use_authorization();
        source
    }

    /// Handles fixes from the location source
    ///
    /// Only the first fix of a lookup is used; updates stop as soon as it
    /// arrives. Returns whether the fix moved the map.
    pub fn on_location_fix(&mut self, fixes: &[LatLng]) -> bool {
        if self.location_state != LocationState::AwaitingFix {
            log::debug!("ignoring {} fix(es) outside a lookup", fixes.len());
            return false;
        }
        let Some(&fix) = fixes.first() else {
            return false;
        };

        if let Some(source) = self.location.as_mut() {
            source.stop_updating();
        }
        self.location_state = LocationState::FixDelivered;

        let region = self.surface.region().recentered(fix);
        self.surface.set_region(region, true);
        self.set_pin(fix);
        log::info!("device located at {}", fix);
        true
    }

    pub fn on_location_update(&mut self, update: &LocationUpdate) -> bool {
        self.on_location_fix(&update.fixes)
    }

    /// Replaces the pin; the old annotation goes before the new one is added
    fn set_pin(&mut self, coordinate: LatLng) {
        if let Some(pin) = self.pin.take() {
            self.surface.remove_annotation(pin.annotation);
        }
        let annotation = self.surface.add_annotation(coordinate);
        self.pin = Some(Pin {
            coordinate,
            annotation,
        });
    }
}
