use crate::carousel::{Carousel, ControlVisibility, Navigation, WheelOutcome};
use crate::confetti::Confetti;
use crate::constants::*;
use crate::input::{InputEvent, KeyAction};
use crate::transition::SlideTransition;
use crate::view::{Hit, Layout};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Press {
    Gesture { origin_x: f32 },
    /// Activates on release if the pointer is still over the same control.
    Control(Hit),
}

/// Routes input to the carousel and owns the presentation state that
/// follows from it: running transition, control fade and confetti.
pub struct Controller {
    carousel: Carousel,
    controls: ControlVisibility,
    controls_alpha: f32,
    transition: Option<SlideTransition>,
    confetti: Confetti,
    press: Option<Press>,
}

impl Controller {
    pub fn new(carousel: Carousel, controls: ControlVisibility) -> Self {
        Self {
            carousel,
            controls,
            controls_alpha: 1.0,
            transition: None,
            confetti: Confetti::new(),
            press: None,
        }
    }

    pub fn carousel(&self) -> &Carousel {
        &self.carousel
    }

    #[cfg(test)]
    pub fn controls_visible(&self) -> bool {
        self.controls.is_visible()
    }

    pub fn controls_alpha(&self) -> f32 {
        self.controls_alpha
    }

    pub fn transition(&self) -> Option<&SlideTransition> {
        self.transition.as_ref()
    }

    pub fn confetti(&self) -> &Confetti {
        &self.confetti
    }

    /// Slides that may be drawn right now: the current one, its neighbours
    /// and the slide leaving in a running transition.
    pub fn slide_window(&self) -> Vec<usize> {
        let mut window = self.carousel.neighbours().to_vec();
        if let Some(transition) = &self.transition {
            window.push(transition.outgoing);
        }
        window.sort_unstable();
        window.dedup();
        window
    }

    pub fn celebrate(&mut self, layout: &Layout) {
        self.confetti.burst(layout.center(), &mut rand::rng());
        log::debug!("confetti burst, {} pieces falling", self.confetti.len());
    }

    /// Handles one event. Returns the navigation it caused, if any.
    pub fn handle(&mut self, event: InputEvent, layout: &Layout) -> Option<Navigation> {
        let navigation = match event {
            InputEvent::PointerMoved(_) | InputEvent::TouchStarted => {
                self.controls.on_activity();
                None
            }
            InputEvent::PointerPressed(position) => {
                self.press = Some(match layout.hit_test(position) {
                    Some(hit) => Press::Control(hit),
                    None => {
                        self.carousel.begin_drag();
                        Press::Gesture { origin_x: position.x }
                    }
                });
                None
            }
            InputEvent::PointerDragged(position) => {
                if let Some(Press::Gesture { origin_x }) = self.press {
                    self.carousel.drag_to(position.x - origin_x);
                }
                None
            }
            InputEvent::PointerReleased(position) => match self.press.take() {
                Some(Press::Gesture { origin_x }) => self.carousel.end_drag(position.x - origin_x),
                Some(Press::Control(hit)) if layout.hit_test(position) == Some(hit) => self.activate(hit),
                _ => None,
            },
            InputEvent::Wheel { dx, dy } => match self.carousel.wheel(dx, dy) {
                WheelOutcome::Navigated(navigation) => Some(navigation),
                WheelOutcome::Consumed | WheelOutcome::Ignored => None,
            },
            InputEvent::Key(action) => match action {
                KeyAction::Previous => Some(self.carousel.previous()),
                KeyAction::Next => Some(self.carousel.next()),
                KeyAction::First => self.carousel.go_to(0),
                KeyAction::Last => self.carousel.go_to(self.carousel.len() - 1),
                KeyAction::Celebrate => {
                    self.celebrate(layout);
                    None
                }
            },
            InputEvent::FocusLost => {
                self.carousel.cancel_drag();
                self.press = None;
                None
            }
        };

        if let Some(navigation) = navigation {
            if navigation.changed_slide() {
                self.transition = Some(SlideTransition::new(navigation));
            }
        }
        navigation
    }

    fn activate(&mut self, hit: Hit) -> Option<Navigation> {
        match hit {
            Hit::Previous => Some(self.carousel.previous()),
            Hit::Next => Some(self.carousel.next()),
            Hit::Dot(index) => self.carousel.go_to(index),
        }
    }

    pub fn update(&mut self, dt: f32, layout: &Layout) {
        self.controls.update(dt);

        let target = if self.controls.is_visible() { 1.0 } else { 0.0 };
        let step = dt / CONTROLS_FADE_DURATION;
        self.controls_alpha = if self.controls_alpha < target {
            (self.controls_alpha + step).min(target)
        } else {
            (self.controls_alpha - step).max(target)
        };

        if let Some(transition) = self.transition.as_mut() {
            transition.update(dt);
            if transition.is_finished() {
                self.transition = None;
            }
        }

        if self.confetti.is_active() {
            self.confetti.update(dt, layout.width, layout.height);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use raylib::prelude::Vector2;

    use crate::carousel::state::Gesture;
    use crate::carousel::{CarouselTunables, Direction};

    fn layout() -> Layout {
        Layout::new(540.0, 960.0, 5)
    }

    fn controller() -> Controller {
        let carousel = Carousel::new(5, CarouselTunables::default()).unwrap();
        Controller::new(carousel, ControlVisibility::new(CONTROLS_HIDE_DELAY))
    }

    fn swipe(c: &mut Controller, from: f32, to: f32) -> Option<Navigation> {
        let layout = layout();
        c.handle(InputEvent::PointerPressed(Vector2::new(from, 300.0)), &layout);
        c.handle(InputEvent::PointerDragged(Vector2::new((from + to) * 0.5, 300.0)), &layout);
        c.handle(InputEvent::PointerDragged(Vector2::new(to, 300.0)), &layout);
        c.handle(InputEvent::PointerReleased(Vector2::new(to, 300.0)), &layout)
    }

    #[test]
    fn swipe_left_goes_forward() {
        let mut c = controller();
        let nav = swipe(&mut c, 300.0, 285.0).unwrap();
        assert_eq!(nav.direction, Direction::Forward);
        assert_eq!(c.carousel().current(), 1);
        assert!(c.transition().is_some());
        assert_eq!(c.carousel().gesture(), Gesture::Idle);
    }

    #[test]
    fn swipe_right_goes_backward() {
        let mut c = controller();
        swipe(&mut c, 300.0, 315.0);
        assert_eq!(c.carousel().current(), 4);
    }

    #[test]
    fn tiny_drag_does_not_navigate() {
        let mut c = controller();
        assert_eq!(swipe(&mut c, 300.0, 305.0), None);
        assert_eq!(c.carousel().current(), 0);
        assert!(c.transition().is_none());
    }

    #[test]
    fn drag_offset_tracks_pointer() {
        let mut c = controller();
        let layout = layout();
        c.handle(InputEvent::PointerPressed(Vector2::new(200.0, 300.0)), &layout);
        c.handle(InputEvent::PointerDragged(Vector2::new(150.0, 310.0)), &layout);
        assert_eq!(c.carousel().drag_offset(), Some(-50.0));
    }

    #[test]
    fn buttons_navigate_on_release_without_dragging() {
        let mut c = controller();
        let layout = layout();
        let next = layout.next_button();

        c.handle(InputEvent::PointerPressed(next), &layout);
        assert!(!c.carousel().is_dragging());
        let nav = c.handle(InputEvent::PointerReleased(next), &layout).unwrap();
        assert_eq!(nav, Navigation { from: 0, to: 1, direction: Direction::Forward });

        let previous = layout.previous_button();
        c.handle(InputEvent::PointerPressed(previous), &layout);
        c.handle(InputEvent::PointerReleased(previous), &layout);
        assert_eq!(c.carousel().current(), 0);
    }

    #[test]
    fn releasing_off_the_button_cancels_it() {
        let mut c = controller();
        let layout = layout();
        c.handle(InputEvent::PointerPressed(layout.next_button()), &layout);
        assert_eq!(c.handle(InputEvent::PointerReleased(layout.center()), &layout), None);
        assert_eq!(c.carousel().current(), 0);
    }

    #[test]
    fn dots_jump_with_index_comparison_direction() {
        let mut c = controller();
        let layout = layout();
        let dot = layout.dot(3);
        c.handle(InputEvent::PointerPressed(dot), &layout);
        let nav = c.handle(InputEvent::PointerReleased(dot), &layout).unwrap();
        assert_eq!(nav.direction, Direction::Forward);

        c.handle(InputEvent::Key(KeyAction::Last), &layout);
        let dot = layout.dot(0);
        c.handle(InputEvent::PointerPressed(dot), &layout);
        let nav = c.handle(InputEvent::PointerReleased(dot), &layout).unwrap();
        assert_eq!(nav, Navigation { from: 4, to: 0, direction: Direction::Backward });
    }

    #[test]
    fn current_dot_starts_no_transition() {
        let mut c = controller();
        let layout = layout();
        let dot = layout.dot(0);
        c.handle(InputEvent::PointerPressed(dot), &layout);
        assert!(c.handle(InputEvent::PointerReleased(dot), &layout).is_some());
        assert!(c.transition().is_none());
    }

    #[test]
    fn wheel_follows_thresholds() {
        let mut c = controller();
        let layout = layout();
        assert!(c.handle(InputEvent::Wheel { dx: 40.0, dy: 5.0 }, &layout).is_some());
        assert!(c.handle(InputEvent::Wheel { dx: 10.0, dy: 2.0 }, &layout).is_none());
        assert!(c.handle(InputEvent::Wheel { dx: 5.0, dy: 40.0 }, &layout).is_none());
        assert_eq!(c.carousel().current(), 1);
    }

    #[test]
    fn keys_navigate() {
        let mut c = controller();
        let layout = layout();
        c.handle(InputEvent::Key(KeyAction::Previous), &layout);
        assert_eq!(c.carousel().current(), 4);
        c.handle(InputEvent::Key(KeyAction::Next), &layout);
        assert_eq!(c.carousel().current(), 0);
        c.handle(InputEvent::Key(KeyAction::Last), &layout);
        assert_eq!(c.carousel().current(), 4);
        c.handle(InputEvent::Key(KeyAction::First), &layout);
        assert_eq!(c.carousel().current(), 0);
    }

    #[test]
    fn focus_loss_drops_the_gesture() {
        let mut c = controller();
        let layout = layout();
        c.handle(InputEvent::PointerPressed(Vector2::new(300.0, 300.0)), &layout);
        c.handle(InputEvent::FocusLost, &layout);
        assert!(!c.carousel().is_dragging());
        assert_eq!(c.handle(InputEvent::PointerReleased(Vector2::new(100.0, 300.0)), &layout), None);
        assert_eq!(c.carousel().current(), 0);
    }

    #[test]
    fn controls_hide_and_reappear_on_movement() {
        let mut c = controller();
        let layout = layout();
        c.update(CONTROLS_HIDE_DELAY, &layout);
        assert!(!c.controls_visible());

        c.handle(InputEvent::PointerMoved(Vector2::new(1.0, 1.0)), &layout);
        assert!(c.controls_visible());

        c.update(CONTROLS_HIDE_DELAY - 0.5, &layout);
        assert!(c.controls_visible());
        c.handle(InputEvent::TouchStarted, &layout);
        c.update(CONTROLS_HIDE_DELAY - 0.5, &layout);
        assert!(c.controls_visible());
    }

    #[test]
    fn controls_fade_instead_of_vanishing() {
        let mut c = controller();
        let layout = layout();
        c.update(CONTROLS_HIDE_DELAY - 0.01, &layout);
        assert_eq!(c.controls_alpha(), 1.0);
        c.update(0.02, &layout);
        assert!(!c.controls_visible());
        assert!(c.controls_alpha() > 0.0);
        c.update(CONTROLS_FADE_DURATION, &layout);
        assert_eq!(c.controls_alpha(), 0.0);
    }

    #[test]
    fn transition_ends() {
        let mut c = controller();
        let layout = layout();
        c.handle(InputEvent::Key(KeyAction::Next), &layout);
        assert!(c.transition().is_some());
        c.update(SLIDE_DURATION, &layout);
        assert!(c.transition().is_none());
    }

    #[test]
    fn space_fires_confetti() {
        let mut c = controller();
        let layout = layout();
        assert!(!c.confetti().is_active());
        c.handle(InputEvent::Key(KeyAction::Celebrate), &layout);
        assert_eq!(c.confetti().len(), CONFETTI_PIECES);
    }

    #[test]
    fn new_navigation_replaces_running_transition() {
        let mut c = controller();
        let layout = layout();
        c.handle(InputEvent::Key(KeyAction::Next), &layout);
        c.update(SLIDE_DURATION / 2.0, &layout);
        c.handle(InputEvent::Key(KeyAction::Next), &layout);

        let transition = c.transition().unwrap();
        assert_eq!((transition.outgoing, transition.incoming), (1, 2));

        // Timed from the second press, so the first one's end passes unnoticed
        c.update(SLIDE_DURATION / 2.0, &layout);
        assert!(c.transition().is_some());
        c.update(SLIDE_DURATION / 2.0, &layout);
        assert!(c.transition().is_none());
    }

    #[test]
    fn slide_window_keeps_the_outgoing_slide_until_the_transition_ends() {
        let mut c = controller();
        let layout = layout();
        assert_eq!(c.slide_window(), [0, 1, 4]);

        c.handle(InputEvent::Key(KeyAction::Next), &layout);
        c.handle(InputEvent::Key(KeyAction::Next), &layout);
        c.update(SLIDE_DURATION, &layout);
        assert_eq!(c.slide_window(), [1, 2, 3]);

        c.handle(InputEvent::Key(KeyAction::First), &layout);
        assert_eq!(c.slide_window(), [0, 1, 2, 4]);
        c.update(SLIDE_DURATION, &layout);
        assert_eq!(c.slide_window(), [0, 1, 4]);
    }
}
