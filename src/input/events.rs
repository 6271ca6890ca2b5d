use crate::core::geo::Point;
use serde::{Deserialize, Serialize};

/// Recognized gestures the controller reacts to
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GestureEvent {
    /// One tap on the map, reported once a double tap is ruled out
    SingleTap(Point),
    /// Two quick taps on the map
    DoubleTap(Point),
    /// Press and hold on the map
    LongPressOnMap(Point),
    /// Press and hold on the status label
    LongPressOnLabel,
}

/// Which view a touch landed on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TouchTarget {
    Map,
    Label,
}

/// Raw single-finger touch input from the host
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TouchInput {
    /// Finger down
    Down { position: Point, target: TouchTarget },
    /// Finger moved while down
    Move { position: Point },
    /// Finger lifted
    Up { position: Point },
    /// The host took the touch away (e.g. the window lost focus)
    Cancel,
}

impl GestureEvent {
    /// Gets the screen position associated with this gesture, if any
    pub fn position(&self) -> Option<Point> {
        match self {
            GestureEvent::SingleTap(position)
            | GestureEvent::DoubleTap(position)
            | GestureEvent::LongPressOnMap(position) => Some(*position),
            GestureEvent::LongPressOnLabel => None,
        }
    }
}

impl TouchInput {
    pub fn position(&self) -> Option<Point> {
        match self {
            TouchInput::Down { position, .. }
            | TouchInput::Move { position }
            | TouchInput::Up { position } => Some(*position),
            TouchInput::Cancel => None,
        }
    }
}
