//! Prelude module for common rocca types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use rocca::prelude::*;`

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

pub use crate::{Error as MapError, Result};

pub use std::time::{Duration, Instant};

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};
