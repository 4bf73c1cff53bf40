use std::path::PathBuf;

use clap::Parser;

use crate::carousel::CarouselTunables;
use crate::constants::*;

/// Full-window photo carousel with captions.
#[derive(Parser, Debug)]
#[command(version)]
pub struct Args {
    /// TOML slide manifest. Defaults to the built-in greeting.
    #[arg(long, conflicts_with = "dir")]
    pub manifest: Option<PathBuf>,

    /// Show every image in a directory, sorted by file name.
    #[arg(long)]
    pub dir: Option<PathBuf>,

    /// Heading drawn above the slides. Overrides the manifest title.
    #[arg(long)]
    pub title: Option<String>,

    /// TTF/OTF font for headings and captions (raylib's default font has no accents).
    #[arg(long)]
    pub font: Option<PathBuf>,

    #[arg(long, default_value_t = WINDOW_WIDTH)]
    pub width: i32,

    #[arg(long, default_value_t = WINDOW_HEIGHT)]
    pub height: i32,

    #[arg(long)]
    pub fullscreen: bool,

    /// Idle time before the navigation controls hide.
    #[arg(long, default_value_t = (CONTROLS_HIDE_DELAY * 1000.0) as u64)]
    pub hide_after_ms: u64,

    /// Horizontal drag distance that commits a swipe.
    #[arg(long, default_value_t = SWIPE_COMMIT_THRESHOLD)]
    pub swipe_threshold: f32,

    /// Horizontal wheel delta that changes slides.
    #[arg(long, default_value_t = WHEEL_THRESHOLD)]
    pub wheel_threshold: f32,

    /// Skip the confetti burst at start.
    #[arg(long)]
    pub no_confetti: bool,
}

impl Args {
    pub fn tunables(&self) -> CarouselTunables {
        CarouselTunables {
            swipe_commit_threshold: self.swipe_threshold,
            wheel_threshold: self.wheel_threshold,
            ..CarouselTunables::default()
        }
    }

    pub fn hide_after(&self) -> f32 {
        self.hide_after_ms as f32 / 1000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_constants() {
        let args = Args::parse_from(["carousel"]);
        assert_eq!(args.tunables(), CarouselTunables::default());
        assert_eq!(args.hide_after(), CONTROLS_HIDE_DELAY);
        assert_eq!(args.width, WINDOW_WIDTH);
        assert!(!args.no_confetti);
    }

    #[test]
    fn thresholds_are_overridable() {
        let args = Args::parse_from([
            "carousel",
            "--swipe-threshold",
            "40",
            "--wheel-threshold",
            "80",
            "--hide-after-ms",
            "500",
        ]);
        let tunables = args.tunables();
        assert_eq!(tunables.swipe_commit_threshold, 40.0);
        assert_eq!(tunables.wheel_threshold, 80.0);
        assert_eq!(tunables.drag_hint_threshold, DRAG_HINT_THRESHOLD);
        assert_eq!(args.hide_after(), 0.5);
    }

    #[test]
    fn manifest_and_dir_are_exclusive() {
        let result = Args::try_parse_from(["carousel", "--manifest", "a.toml", "--dir", "photos"]);
        assert!(result.is_err());
    }
}
