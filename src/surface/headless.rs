use crate::{
    core::{
        geo::{LatLng, Point},
        map_type::MapType,
        region::{CoordinateSpan, Region},
    },
    prelude::HashMap,
    traits::{AnnotationId, MapSurface},
};

/// Smallest and largest span the user can zoom to, in degrees
const MIN_SPAN_DELTA: f64 = 0.0001;
const MAX_SPAN_DELTA: f64 = 90.0;

/// In-memory map surface
///
/// Keeps the region, style and annotations of a map widget and projects
/// linearly between the widget's pixel space and the region. Screen `y`
/// grows downward. Hosts paint from this state; tests inspect it.
#[derive(Debug, Clone)]
pub struct HeadlessSurface {
    /// Widget size in pixels
    size: Point,
    region: Region,
    map_type: MapType,
    zoom_enabled: bool,
    scroll_enabled: bool,
    annotations: HashMap<AnnotationId, LatLng>,
    next_annotation_id: u64,
    animated_transitions: usize,
}

impl HeadlessSurface {
    pub fn new(size: Point) -> Self {
        Self {
            size,
            region: Region::new(LatLng::default(), CoordinateSpan::new(1.0, 1.0)),
            map_type: MapType::default(),
            zoom_enabled: false,
            scroll_enabled: false,
            annotations: HashMap::default(),
            next_annotation_id: 0,
            animated_transitions: 0,
        }
    }

    pub fn size(&self) -> Point {
        self.size
    }

    pub fn set_size(&mut self, size: Point) {
        self.size = size;
    }

    pub fn is_zoom_enabled(&self) -> bool {
        self.zoom_enabled
    }

    pub fn is_scroll_enabled(&self) -> bool {
        self.scroll_enabled
    }

    /// All placed annotations, ordered by handle
    pub fn annotations(&self) -> Vec<(AnnotationId, LatLng)> {
        let mut placed: Vec<_> = self.annotations.iter().map(|(id, c)| (*id, *c)).collect();
        placed.sort_by_key(|(id, _)| *id);
        placed
    }

    pub fn annotation_count(&self) -> usize {
        self.annotations.len()
    }

    /// Number of region changes requested with animation
    pub fn animated_transitions(&self) -> usize {
        self.animated_transitions
    }

    /// Screen position of a coordinate, the inverse of `convert_point`
    pub fn point_for(&self, coordinate: LatLng) -> Point {
        let sw = self.region.south_west();
        let ne = self.region.north_east();
        Point::new(
            (coordinate.lng - sw.lng) / self.region.span.longitude_delta * self.size.x,
            (ne.lat - coordinate.lat) / self.region.span.latitude_delta * self.size.y,
        )
    }

    /// User drag by a pixel delta; ignored while scrolling is disabled
    ///
    /// Latitude stops at the poles, longitude wraps across the antimeridian.
    pub fn pan_by(&mut self, delta: Point) {
        if !self.scroll_enabled || self.size.x <= 0.0 || self.size.y <= 0.0 {
            return;
        }
        let span = self.region.span;
        let center = LatLng::new(
            (self.region.center.lat + delta.y / self.size.y * span.latitude_delta)
                .clamp(-90.0, 90.0),
            self.region.center.lng - delta.x / self.size.x * span.longitude_delta,
        )
        .wrapped();
        self.region = self.region.recentered(center);
    }

    /// User zoom; `factor > 1.0` zooms in. Ignored while zooming is disabled
    pub fn zoom_by(&mut self, factor: f64) {
        if !self.zoom_enabled || !(factor.is_finite() && factor > 0.0) {
            return;
        }
        let span = self.region.span;
        self.region.span = CoordinateSpan::new(
            (span.latitude_delta / factor).clamp(MIN_SPAN_DELTA, MAX_SPAN_DELTA),
            (span.longitude_delta / factor).clamp(MIN_SPAN_DELTA, MAX_SPAN_DELTA * 2.0),
        );
    }
}

impl MapSurface for HeadlessSurface {
    fn set_region(&mut self, region: Region, animated: bool) {
        if animated {
            self.animated_transitions += 1;
        }
        log::debug!(
            "region set to {} span {}x{} (animated: {})",
            region.center,
            region.span.latitude_delta,
            region.span.longitude_delta,
            animated
        );
        self.region = region;
    }

    fn region(&self) -> Region {
        self.region
    }

    fn set_map_type(&mut self, map_type: MapType) {
        self.map_type = map_type;
    }

    fn map_type(&self) -> MapType {
        self.map_type
    }

    fn set_zoom_enabled(&mut self, enabled: bool) {
        self.zoom_enabled = enabled;
    }

    fn set_scroll_enabled(&mut self, enabled: bool) {
        self.scroll_enabled = enabled;
    }

    fn add_annotation(&mut self, coordinate: LatLng) -> AnnotationId {
        let id = AnnotationId(self.next_annotation_id);
        self.next_annotation_id += 1;
        self.annotations.insert(id, coordinate);
        id
    }

    fn remove_annotation(&mut self, id: AnnotationId) {
        if self.annotations.remove(&id).is_none() {
            log::warn!("tried to remove unknown annotation {:?}", id);
        }
    }

    fn convert_point(&self, point: Point) -> LatLng {
        let sw = self.region.south_west();
        let ne = self.region.north_east();
        LatLng::new(
            (ne.lat - point.y / self.size.y * self.region.span.latitude_delta).clamp(-90.0, 90.0),
            sw.lng + point.x / self.size.x * self.region.span.longitude_delta,
        )
        .wrapped()
    }
}
