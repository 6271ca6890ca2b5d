use crate::{
    core::{config::GestureConfig, geo::Point},
    input::events::{GestureEvent, TouchInput, TouchTarget},
    prelude::{HashSet, Instant},
    MapError, Result,
};

/// The recognizers the controller registers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecognizerKind {
    SingleTap,
    DoubleTap,
    LongPressOnMap,
    LongPressOnLabel,
}

/// "Require failure of" dependencies between recognizers
///
/// A pair `(a, b)` means `a` may only fire once `b` has failed to recognize.
/// Only the tap recognizers compete for the same touches; long presses are
/// independent and cannot take part in a dependency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GestureRules {
    requirements: HashSet<(RecognizerKind, RecognizerKind)>,
}

impl GestureRules {
    /// No dependencies: every tap fires immediately
    pub fn none() -> Self {
        Self {
            requirements: HashSet::default(),
        }
    }

    pub fn require_failure_of(
        &mut self,
        recognizer: RecognizerKind,
        other: RecognizerKind,
    ) -> Result<()> {
        if recognizer != RecognizerKind::SingleTap || other != RecognizerKind::DoubleTap {
            return Err(MapError::Config(format!(
                "{:?} cannot be made to wait for {:?}",
                recognizer, other
            ))
            .into());
        }
        self.requirements.insert((recognizer, other));
        Ok(())
    }

    pub fn requires_failure_of(&self, recognizer: RecognizerKind, other: RecognizerKind) -> bool {
        self.requirements.contains(&(recognizer, other))
    }

    fn single_waits_for_double(&self) -> bool {
        self.requires_failure_of(RecognizerKind::SingleTap, RecognizerKind::DoubleTap)
    }
}

impl Default for GestureRules {
    /// A single tap waits until the double tap has failed
    fn default() -> Self {
        let mut requirements = HashSet::default();
        requirements.insert((RecognizerKind::SingleTap, RecognizerKind::DoubleTap));
        Self { requirements }
    }
}

/// A finger that is currently down
#[derive(Debug, Clone)]
struct Press {
    start_position: Point,
    start_time: Instant,
    target: TouchTarget,
    moved: bool,
}

/// Turns raw touches into [`GestureEvent`]s
///
/// Time is passed in by the caller so the host's event timestamps drive
/// recognition. Call [`poll`](Self::poll) periodically so a pending single
/// tap is released once the double tap window closes.
pub struct GestureRecognizer {
    pub enabled: bool,
    config: GestureConfig,
    rules: GestureRules,
    press: Option<Press>,
    /// Tap held back while a double tap is still possible
    pending_tap: Option<(Point, Instant)>,
    /// Last tap already reported, used when single taps do not wait
    last_tap: Option<(Point, Instant)>,
}

impl GestureRecognizer {
    pub fn new() -> Self {
        Self::with_config(GestureConfig::default(), GestureRules::default())
    }

    pub fn with_config(config: GestureConfig, rules: GestureRules) -> Self {
        Self {
            enabled: true,
            config,
            rules,
            press: None,
            pending_tap: None,
            last_tap: None,
        }
    }

    pub fn rules(&self) -> &GestureRules {
        &self.rules
    }

    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Whether a single tap is waiting on the double tap
    pub fn has_pending_tap(&self) -> bool {
        self.pending_tap.is_some()
    }

    /// Processes one touch and returns the gestures it completed
    pub fn process(&mut self, input: TouchInput, now: Instant) -> Vec<GestureEvent> {
        let mut output = Vec::new();
        if !self.enabled {
            return output;
        }

        match input {
            TouchInput::Down { position, target } => {
                self.expire_pending_tap(now, &mut output);
                self.press = Some(Press {
                    start_position: position,
                    start_time: now,
                    target,
                    moved: false,
                });
            }
            TouchInput::Move { position } => {
                if let Some(press) = self.press.as_mut() {
                    if press.start_position.distance_to(&position) > self.config.movement_threshold {
                        press.moved = true;
                    }
                }
            }
            TouchInput::Up { position } => {
                if let Some(press) = self.press.take() {
                    self.finish_press(press, position, now, &mut output);
                }
            }
            TouchInput::Cancel => {
                self.press = None;
            }
        }

        output
    }

    /// Releases a pending single tap whose double tap window has closed
    pub fn poll(&mut self, now: Instant) -> Vec<GestureEvent> {
        let mut output = Vec::new();
        if self.enabled {
            self.expire_pending_tap(now, &mut output);
        }
        output
    }

    /// Drops all in-flight state
    pub fn reset(&mut self) {
        self.press = None;
        self.pending_tap = None;
        self.last_tap = None;
    }

    fn finish_press(
        &mut self,
        press: Press,
        position: Point,
        now: Instant,
        output: &mut Vec<GestureEvent>,
    ) {
        if press.moved || press.start_position.distance_to(&position) > self.config.movement_threshold
        {
            // A pan; any tap waiting on a second tap has lost it
            self.flush_pending_tap(output);
            return;
        }

        let held = now.saturating_duration_since(press.start_time);
        if held >= self.config.long_press_timeout() {
            match press.target {
                TouchTarget::Map => {
                    self.flush_pending_tap(output);
                    output.push(GestureEvent::LongPressOnMap(press.start_position));
                }
                TouchTarget::Label => {
                    self.flush_pending_tap(output);
                    output.push(GestureEvent::LongPressOnLabel);
                }
            }
            return;
        }

        if press.target == TouchTarget::Map {
            self.tap(press.start_position, now, output);
        }
    }

    fn tap(&mut self, position: Point, now: Instant, output: &mut Vec<GestureEvent>) {
        if self.rules.single_waits_for_double() {
            match self.pending_tap.take() {
                Some((first, at)) if self.is_second_tap(first, at, position, now) => {
                    output.push(GestureEvent::DoubleTap(first));
                }
                previous => {
                    if let Some((first, _)) = previous {
                        output.push(GestureEvent::SingleTap(first));
                    }
                    self.pending_tap = Some((position, now));
                }
            }
        } else {
            output.push(GestureEvent::SingleTap(position));
            match self.last_tap.take() {
                Some((first, at)) if self.is_second_tap(first, at, position, now) => {
                    output.push(GestureEvent::DoubleTap(first));
                }
                _ => self.last_tap = Some((position, now)),
            }
        }
    }

    fn is_second_tap(&self, first: Point, at: Instant, position: Point, now: Instant) -> bool {
        now.saturating_duration_since(at) <= self.config.double_tap_timeout()
            && first.distance_to(&position) <= self.config.double_tap_distance
    }

    fn expire_pending_tap(&mut self, now: Instant, output: &mut Vec<GestureEvent>) {
        if let Some((_, at)) = self.pending_tap {
            if now.saturating_duration_since(at) > self.config.double_tap_timeout() {
                self.flush_pending_tap(output);
            }
        }
    }

    fn flush_pending_tap(&mut self, output: &mut Vec<GestureEvent>) {
        if let Some((position, _)) = self.pending_tap.take() {
            output.push(GestureEvent::SingleTap(position));
        }
    }
}

impl Default for GestureRecognizer {
    fn default() -> Self {
        Self::new()
    }
}
