use crate::core::geo::LatLng;
use serde::{Deserialize, Serialize};

/// Angular extent of a region in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoordinateSpan {
    pub latitude_delta: f64,
    pub longitude_delta: f64,
}

impl CoordinateSpan {
    pub fn new(latitude_delta: f64, longitude_delta: f64) -> Self {
        Self {
            latitude_delta,
            longitude_delta,
        }
    }

    /// Both deltas must be finite and strictly positive
    pub fn is_valid(&self) -> bool {
        self.latitude_delta.is_finite()
            && self.longitude_delta.is_finite()
            && self.latitude_delta > 0.0
            && self.longitude_delta > 0.0
    }
}

/// The visible map viewport: a center coordinate and the span around it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub center: LatLng,
    pub span: CoordinateSpan,
}

impl Region {
    pub fn new(center: LatLng, span: CoordinateSpan) -> Self {
        Self { center, span }
    }

    /// Same zoom, new center
    pub fn recentered(&self, center: LatLng) -> Self {
        Self::new(center, self.span)
    }

    /// South-west corner of the region
    pub fn south_west(&self) -> LatLng {
        LatLng::new(
            self.center.lat - self.span.latitude_delta / 2.0,
            self.center.lng - self.span.longitude_delta / 2.0,
        )
    }

    /// North-east corner of the region
    pub fn north_east(&self) -> LatLng {
        LatLng::new(
            self.center.lat + self.span.latitude_delta / 2.0,
            self.center.lng + self.span.longitude_delta / 2.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recentered_keeps_span() {
        let region = Region::new(LatLng::new(10.0, 20.0), CoordinateSpan::new(0.5, 0.25));
        let moved = region.recentered(LatLng::new(-3.0, 7.0));
        assert_eq!(moved.center, LatLng::new(-3.0, 7.0));
        assert_eq!(moved.span, region.span);
    }

    #[test]
    fn test_region_corners() {
        let region = Region::new(LatLng::new(0.0, 0.0), CoordinateSpan::new(2.0, 4.0));
        assert_eq!(region.south_west(), LatLng::new(-1.0, -2.0));
        assert_eq!(region.north_east(), LatLng::new(1.0, 2.0));
    }

    #[test]
    fn test_span_validity() {
        assert!(CoordinateSpan::new(0.0015, 0.0015).is_valid());
        assert!(!CoordinateSpan::new(0.0, 0.0015).is_valid());
        assert!(!CoordinateSpan::new(f64::NAN, 1.0).is_valid());
    }
}
