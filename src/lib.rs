//! # Rocca
//!
//! A single-screen landmark map controller.
//!
//! The controller centers a map on a fixed landmark, cycles the map style on
//! single taps, drops a pin on long presses and can pin the device position
//! with a one-shot location lookup. Map drawing, location hardware and the
//! status label are capabilities supplied by the host through the traits in
//! [`traits`].

pub mod controller;
pub mod core;
pub mod input;
pub mod location;
pub mod prelude;
pub mod surface;
pub mod traits;
pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    config::{ControllerConfig, GestureConfig},
    geo::{LatLng, Point},
    map_type::MapType,
    region::{CoordinateSpan, Region},
};

pub use crate::controller::{LocationState, MapController, Pin};

pub use crate::input::{
    events::{GestureEvent, TouchInput, TouchTarget},
    gestures::{GestureRecognizer, GestureRules, RecognizerKind},
};

pub use crate::location::channel::{ChannelLocationSource, LocationUpdate};

pub use crate::surface::{headless::HeadlessSurface, label::TextLabel};

pub use crate::traits::{AnnotationId, LocationAccuracy, LocationSource, MapSurface, StatusLabel};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Error type alias for convenience
pub type Error = MapError;
