pub mod events;
pub mod gestures;

// Re-export the essential types
pub use events::{GestureEvent, TouchInput, TouchTarget};
pub use gestures::{GestureRecognizer, GestureRules, RecognizerKind};
