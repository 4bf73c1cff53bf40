use crate::carousel::state::{Direction, DragHint, Gesture, Navigation};
use crate::constants::*;
use crate::error::CarouselError;

/// Thresholds that shape how eagerly input turns into navigation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarouselTunables {
    /// Displacement at gesture end that commits a swipe. Kept tiny so any
    /// decisive motion navigates.
    pub swipe_commit_threshold: f32,
    pub drag_hint_threshold: f32,
    pub wheel_threshold: f32,
}

impl Default for CarouselTunables {
    fn default() -> Self {
        Self {
            swipe_commit_threshold: SWIPE_COMMIT_THRESHOLD,
            drag_hint_threshold: DRAG_HINT_THRESHOLD,
            wheel_threshold: WHEEL_THRESHOLD,
        }
    }
}

/// What a wheel event did.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum WheelOutcome {
    /// Vertical-dominant, left to the default scroll handling.
    Ignored,
    /// Horizontal-dominant but too small to navigate. Still swallowed.
    Consumed,
    Navigated(Navigation),
}

/// Index, direction and gesture state of the carousel.
///
/// All mutation happens on the input thread, one event at a time. Every path
/// that changes `current` goes through modulo arithmetic or a bounds check,
/// so it is always a valid slide index.
#[derive(Debug)]
pub struct Carousel {
    len: usize,
    current: usize,
    direction: Option<Direction>,
    gesture: Gesture,
    tunables: CarouselTunables,
}

impl Carousel {
    pub fn new(len: usize, tunables: CarouselTunables) -> Result<Self, CarouselError> {
        if len == 0 {
            return Err(CarouselError::NoSlides);
        }
        Ok(Self {
            len,
            current: 0,
            direction: None,
            gesture: Gesture::Idle,
            tunables,
        })
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn current(&self) -> usize {
        self.current
    }

    /// `None` until the first navigation.
    pub fn direction(&self) -> Option<Direction> {
        self.direction
    }

    #[cfg(test)]
    pub fn gesture(&self) -> Gesture {
        self.gesture
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.gesture, Gesture::Dragging { .. })
    }

    pub fn drag_offset(&self) -> Option<f32> {
        match self.gesture {
            Gesture::Dragging { offset } => Some(offset),
            Gesture::Idle => None,
        }
    }

    /// Indices of the previous, current and next slides.
    pub fn neighbours(&self) -> [usize; 3] {
        [
            self.wrap(self.current as isize - 1),
            self.current,
            self.wrap(self.current as isize + 1),
        ]
    }

    pub fn paginate(&mut self, direction: Direction) -> Navigation {
        let from = self.current;
        self.current = self.wrap(from as isize + direction.step());
        self.direction = Some(direction);
        log::debug!("paginate {:?}: {} -> {}", direction, from, self.current);
        Navigation { from, to: self.current, direction }
    }

    pub fn next(&mut self) -> Navigation {
        self.paginate(Direction::Forward)
    }

    pub fn previous(&mut self) -> Navigation {
        self.paginate(Direction::Backward)
    }

    /// Jumps straight to `target`.
    ///
    /// The direction is a plain index comparison: jumping from the last slide
    /// to the first counts as backward even though they are adjacent on the
    /// ring. Transition animations rely on this rule.
    pub fn go_to(&mut self, target: usize) -> Option<Navigation> {
        if target >= self.len {
            return None;
        }
        let from = self.current;
        let direction = if target > from { Direction::Forward } else { Direction::Backward };
        self.direction = Some(direction);
        self.current = target;
        log::debug!("go_to {:?}: {} -> {}", direction, from, target);
        Some(Navigation { from, to: target, direction })
    }

    pub fn begin_drag(&mut self) {
        self.gesture = Gesture::Dragging { offset: 0.0 };
    }

    /// Records the cumulative horizontal displacement of the gesture.
    pub fn drag_to(&mut self, offset: f32) {
        if let Gesture::Dragging { offset: current } = &mut self.gesture {
            *current = offset;
        }
    }

    /// Ends the gesture. A leftward displacement past the commit threshold
    /// goes forward, a rightward one goes backward.
    pub fn end_drag(&mut self, displacement: f32) -> Option<Navigation> {
        if !self.is_dragging() {
            return None;
        }
        self.gesture = Gesture::Idle;

        let threshold = self.tunables.swipe_commit_threshold;
        if displacement < -threshold {
            Some(self.paginate(Direction::Forward))
        } else if displacement > threshold {
            Some(self.paginate(Direction::Backward))
        } else {
            None
        }
    }

    /// Drops a gesture without navigating, e.g. when the window loses focus.
    pub fn cancel_drag(&mut self) {
        self.gesture = Gesture::Idle;
    }

    pub fn drag_hint(&self) -> Option<DragHint> {
        let offset = self.drag_offset()?;
        let threshold = self.tunables.drag_hint_threshold;
        if offset > threshold {
            Some(DragHint::Previous)
        } else if offset < -threshold {
            Some(DragHint::Next)
        } else {
            None
        }
    }

    pub fn wheel(&mut self, dx: f32, dy: f32) -> WheelOutcome {
        if dx.abs() <= dy.abs() {
            return WheelOutcome::Ignored;
        }
        if dx.abs() <= self.tunables.wheel_threshold {
            return WheelOutcome::Consumed;
        }
        let direction = if dx > 0.0 { Direction::Forward } else { Direction::Backward };
        WheelOutcome::Navigated(self.paginate(direction))
    }

    fn wrap(&self, index: isize) -> usize {
        index.rem_euclid(self.len as isize) as usize
    }
}
