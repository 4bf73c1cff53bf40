pub const WINDOW_WIDTH: i32 = 540;            // Default window width (portrait, 9:16)
pub const WINDOW_HEIGHT: i32 = 960;           // Default window height
pub const FPS: u32 = 60;                      // Frames per second

pub const SWIPE_COMMIT_THRESHOLD: f32 = 10.0; // Drag displacement that commits a navigation (px)
pub const DRAG_HINT_THRESHOLD: f32 = 20.0;    // Drag displacement that shows the chevron hints (px)
pub const DRAG_ELASTIC: f32 = 0.8;            // Fraction of the drag offset applied to the slide
pub const WHEEL_THRESHOLD: f32 = 30.0;        // Horizontal wheel delta that navigates (px)
pub const WHEEL_PIXELS_PER_NOTCH: f32 = 100.0; // raylib reports notches, browsers report pixels

pub const CONTROLS_HIDE_DELAY: f32 = 2.0;     // Idle time before controls hide (seconds)
pub const CONTROLS_FADE_DURATION: f32 = 0.3;  // Controls fade in/out time (seconds)

pub const SLIDE_DURATION: f32 = 0.3;          // Horizontal slide transition (seconds)
pub const FADE_DURATION: f32 = 0.2;           // Opacity transition (seconds)

pub const FETCH_TIMEOUT_SECS: u64 = 15;      // Whole-request HTTP timeout for image fetches

pub const CONFETTI_PIECES: usize = 200;       // Pieces per burst
pub const CONFETTI_GRAVITY: f32 = 0.05;       // Per frame at 60 fps, in px/frame²

pub const TITLE_FONT_SIZE: f32 = 36.0;
pub const CAPTION_FONT_SIZE: f32 = 24.0;
pub const FONT_SPACING: f32 = 1.0;

pub const BUTTON_RADIUS: f32 = 22.0;          // Previous/next buttons
pub const BUTTON_MARGIN: f32 = 16.0;
pub const DOT_RADIUS: f32 = 4.0;              // Slide indicator dots
pub const DOT_GAP: f32 = 6.0;
pub const DOTS_BOTTOM_MARGIN: f32 = 24.0;
