//! Configuration for the controller and its gesture recognizer
//!
//! Every field has a default matching the landmark view, so a JSON file only
//! needs to name the values it overrides.

use crate::core::{
    constants::{
        DEFAULT_SPAN_DELTA, DOUBLE_TAP_DISTANCE_PX, DOUBLE_TAP_TIMEOUT_MS, LANDMARK_LAT,
        LANDMARK_LNG, LONG_PRESS_TIMEOUT_MS, MOVEMENT_THRESHOLD_PX,
    },
    geo::LatLng,
    region::{CoordinateSpan, Region},
};
use crate::{MapError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Coordinate the map opens on and the initial pin
    pub landmark: LatLng,
    pub span: CoordinateSpan,
    pub zoom_enabled: bool,
    pub scroll_enabled: bool,
    pub gestures: GestureConfig,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            landmark: LatLng::new(LANDMARK_LAT, LANDMARK_LNG),
            span: CoordinateSpan::new(DEFAULT_SPAN_DELTA, DEFAULT_SPAN_DELTA),
            zoom_enabled: true,
            scroll_enabled: true,
            gestures: GestureConfig::default(),
        }
    }
}

impl ControllerConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: ControllerConfig = serde_json::from_str(json).map_err(MapError::from)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(MapError::from)?;
        log::debug!("loaded controller config from {}", path.display());
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.landmark.is_valid() {
            return Err(MapError::InvalidCoordinates(format!(
                "landmark {} is out of range",
                self.landmark
            ))
            .into());
        }
        if !self.span.is_valid() {
            return Err(MapError::Config(format!(
                "span must be positive, got {} x {}",
                self.span.latitude_delta, self.span.longitude_delta
            ))
            .into());
        }
        self.gestures.validate()
    }

    pub fn initial_region(&self) -> Region {
        Region::new(self.landmark, self.span)
    }
}

/// Timing and distance thresholds for gesture recognition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Maximum time between the two taps of a double tap
    pub double_tap_timeout_ms: u64,
    /// Minimum hold time for a long press
    pub long_press_timeout_ms: u64,
    /// Travel that turns a touch into a pan
    pub movement_threshold: f64,
    /// Maximum distance between double tap touches
    pub double_tap_distance: f64,
}

impl GestureConfig {
    pub fn double_tap_timeout(&self) -> Duration {
        Duration::from_millis(self.double_tap_timeout_ms)
    }

    pub fn long_press_timeout(&self) -> Duration {
        Duration::from_millis(self.long_press_timeout_ms)
    }

    pub fn validate(&self) -> Result<()> {
        if self.long_press_timeout_ms == 0 {
            return Err(MapError::Config("long_press_timeout_ms must be non-zero".into()).into());
        }
        if !(self.movement_threshold >= 0.0 && self.double_tap_distance >= 0.0) {
            return Err(MapError::Config("gesture distances must be non-negative".into()).into());
        }
        Ok(())
    }
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            double_tap_timeout_ms: DOUBLE_TAP_TIMEOUT_MS,
            long_press_timeout_ms: LONG_PRESS_TIMEOUT_MS,
            movement_threshold: MOVEMENT_THRESHOLD_PX,
            double_tap_distance: DOUBLE_TAP_DISTANCE_PX,
        }
    }
}
