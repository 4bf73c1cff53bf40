/// Side a navigation moves towards. Drives which edge the incoming slide
/// enters from.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    pub fn step(self) -> isize {
        match self {
            Direction::Forward => 1,
            Direction::Backward => -1,
        }
    }

    /// +1.0 for forward, -1.0 for backward. Used to pick the transition side.
    pub fn sign(self) -> f32 {
        self.step() as f32
    }
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Gesture {
    Idle,
    Dragging { offset: f32 },
}

/// A committed index change.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Navigation {
    pub from: usize,
    pub to: usize,
    pub direction: Direction,
}

impl Navigation {
    pub fn changed_slide(&self) -> bool {
        self.from != self.to
    }
}

/// Chevron shown while a drag is in progress.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum DragHint {
    Previous, // Dragging right
    Next,     // Dragging left
}
