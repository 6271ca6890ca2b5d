//! Capabilities the controller consumes from its host
//!
//! A host wires a map widget, a location provider and a text label to these
//! traits. All calls happen on the host's dispatch thread.

use crate::core::{
    geo::{LatLng, Point},
    map_type::MapType,
    region::Region,
};
use serde::{Deserialize, Serialize};

/// Handle for an annotation placed on a map surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AnnotationId(pub u64);

/// The map widget: viewport, style, annotations and screen projection
pub trait MapSurface {
    /// Frame the viewport, optionally with an animated transition
    fn set_region(&mut self, region: Region, animated: bool);

    /// Currently framed viewport
    fn region(&self) -> Region;

    fn set_map_type(&mut self, map_type: MapType);

    fn map_type(&self) -> MapType;

    fn set_zoom_enabled(&mut self, enabled: bool);

    fn set_scroll_enabled(&mut self, enabled: bool);

    /// Place a marker and return its handle
    fn add_annotation(&mut self, coordinate: LatLng) -> AnnotationId;

    /// Remove a marker; unknown handles are ignored
    fn remove_annotation(&mut self, id: AnnotationId);

    /// Coordinate under a point in the surface's screen space
    fn convert_point(&self, point: Point) -> LatLng;
}

/// Accuracy requested from a location provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LocationAccuracy {
    #[default]
    Best,
    NearestTenMeters,
    HundredMeters,
    Kilometer,
}

/// A device location provider
///
/// Fixes are not returned from these calls. The provider delivers them
/// later through whatever channel the host set up, and the host forwards
/// them to [`MapController::on_location_fix`](crate::MapController::on_location_fix).
pub trait LocationSource {
    fn set_desired_accuracy(&mut self, accuracy: LocationAccuracy);

    /// Ask to use location while the application is in the foreground
    fn request_when_in_use_authorization(&mut self);

    fn is_service_enabled(&self) -> bool;

    fn start_updating(&mut self);

    fn stop_updating(&mut self);
}

/// Text sink for the status line
pub trait StatusLabel {
    fn set_text(&mut self, text: &str);
}
