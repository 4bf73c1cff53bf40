use raylib::prelude::*;

use crate::carousel::{Direction, Navigation};
use crate::constants::*;

/// Placement of one slide during a transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlideFrame {
    /// Horizontal offset as a fraction of the viewport width.
    pub offset: f32,
    pub alpha: f32,
}

impl SlideFrame {
    pub const RESTING: SlideFrame = SlideFrame { offset: 0.0, alpha: 1.0 };
}

/// Incoming slide enters from the side the carousel moves towards, the
/// outgoing one leaves through the opposite side.
pub struct SlideTransition {
    pub outgoing: usize,
    pub incoming: usize,
    direction: Direction,
    elapsed: f32,
    progress: f32,
    opacity: f32,
    tween_slide: ease::Tween,
    tween_fade: ease::Tween,
}

impl SlideTransition {
    pub fn new(navigation: Navigation) -> Self {
        Self {
            outgoing: navigation.from,
            incoming: navigation.to,
            direction: navigation.direction,
            elapsed: 0.0,
            progress: 0.0,
            opacity: 0.0,
            tween_slide: ease::Tween::new(ease::cubic_in_out, 0.0, 1.0, SLIDE_DURATION),
            tween_fade: ease::Tween::new(ease::linear_none, 0.0, 1.0, FADE_DURATION),
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.elapsed += dt;
        self.progress = self.tween_slide.apply(dt).clamp(0.0, 1.0);
        self.opacity = self.tween_fade.apply(dt).clamp(0.0, 1.0);
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= SLIDE_DURATION.max(FADE_DURATION)
    }

    pub fn incoming_frame(&self) -> SlideFrame {
        SlideFrame {
            offset: self.direction.sign() * (1.0 - self.progress),
            alpha: self.opacity,
        }
    }

    pub fn outgoing_frame(&self) -> SlideFrame {
        SlideFrame {
            offset: -self.direction.sign() * self.progress,
            alpha: 1.0 - self.opacity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    fn transition(direction: Direction) -> SlideTransition {
        SlideTransition::new(Navigation { from: 0, to: 1, direction })
    }

    #[test]
    fn forward_enters_from_the_right() {
        let mut t = transition(Direction::Forward);
        t.update(0.0);
        assert!((t.incoming_frame().offset - 1.0).abs() < EPS);
        assert!(t.incoming_frame().alpha.abs() < EPS);
        assert!(t.outgoing_frame().offset.abs() < EPS);
        assert!((t.outgoing_frame().alpha - 1.0).abs() < EPS);

        t.update(SLIDE_DURATION / 2.0);
        assert!((t.incoming_frame().offset - 0.5).abs() < EPS);
        assert!((t.outgoing_frame().offset + 0.5).abs() < EPS);
        assert!(!t.is_finished());
    }

    #[test]
    fn backward_enters_from_the_left() {
        let mut t = transition(Direction::Backward);
        t.update(0.0);
        assert!((t.incoming_frame().offset + 1.0).abs() < EPS);

        t.update(SLIDE_DURATION);
        assert!(t.is_finished());
        assert!(t.incoming_frame().offset.abs() < EPS);
        assert!((t.incoming_frame().alpha - 1.0).abs() < EPS);
        assert!((t.outgoing_frame().offset - 1.0).abs() < EPS);
        assert!(t.outgoing_frame().alpha.abs() < EPS);
    }

    #[test]
    fn fade_finishes_before_slide() {
        let mut t = transition(Direction::Forward);
        t.update(FADE_DURATION);
        assert!((t.incoming_frame().alpha - 1.0).abs() < EPS);
        assert!(t.incoming_frame().offset > 0.0);
        assert!(!t.is_finished());
    }
}
