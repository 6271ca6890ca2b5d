//! Fixed values for the landmark view.

/// Rocca dei Rettori, Benevento.
pub const LANDMARK_LAT: f64 = 41.129437;
pub const LANDMARK_LNG: f64 = 14.782375;

/// Street-level zoom, in degrees on both axes.
pub const DEFAULT_SPAN_DELTA: f64 = 0.0015;

/// Gesture timing defaults in milliseconds.
pub const DOUBLE_TAP_TIMEOUT_MS: u64 = 300;
pub const LONG_PRESS_TIMEOUT_MS: u64 = 500;

/// Pixels a finger may travel before a tap or press becomes a pan.
pub const MOVEMENT_THRESHOLD_PX: f64 = 10.0;

/// Maximum distance between the two taps of a double tap.
pub const DOUBLE_TAP_DISTANCE_PX: f64 = 50.0;
