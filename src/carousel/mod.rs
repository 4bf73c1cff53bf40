pub mod engine;
pub mod state;
pub mod visibility;

pub use engine::{Carousel, CarouselTunables, WheelOutcome};
pub use state::{Direction, DragHint, Navigation};
pub use visibility::ControlVisibility;
