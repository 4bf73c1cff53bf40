use std::process;
use anyhow::{Context, Result};
use clap::Parser;
use raylib::prelude::*;

mod app;
mod carousel;
mod config;
mod confetti;
mod constants;
mod controller;
mod error;
mod input;
mod preload;
mod slides;
mod texture_loader;
mod transition;
mod view;

use crate::app::CarouselApp;
use crate::carousel::{Carousel, ControlVisibility};
use crate::config::Args;
use crate::constants::*;
use crate::controller::Controller;
use crate::slides::SlideDeck;
use crate::view::Renderer;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run(Args::parse()) {
        log::error!("{:#}", e);
        process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    // --- Load Slides ---
    let mut deck = match (&args.manifest, &args.dir) {
        (Some(path), _) => SlideDeck::from_manifest(path)
            .with_context(|| format!("loading manifest {}", path.display()))?,
        (None, Some(dir)) => SlideDeck::from_dir(dir)?,
        (None, None) => SlideDeck::builtin().context("loading built-in slides")?,
    };
    if let Some(title) = &args.title {
        deck.title = Some(title.clone());
    }

    let carousel = Carousel::new(deck.slides.len(), args.tunables())?;
    log::info!(
        "{} slide(s), title {:?}",
        deck.slides.len(),
        deck.title.as_deref().unwrap_or("")
    );

    let mut builder = raylib::init();
    builder
        .size(args.width, args.height)
        .title(deck.title.as_deref().unwrap_or("Carousel"))
        .vsync()
        .msaa_4x()
        .resizable();
    if args.fullscreen {
        builder.fullscreen();
    }
    let (mut rl, thread) = builder.build();
    rl.set_target_fps(FPS);
    rl.set_trace_log(TraceLogLevel::LOG_ERROR);

    let font = match &args.font {
        Some(path) => {
            let glyphs = glyph_set(&deck.all_text());
            let font = rl
                .load_font_ex(&thread, &path.to_string_lossy(), CAPTION_FONT_SIZE as i32 * 2, Some(&glyphs))
                .map_err(|e| anyhow::anyhow!("loading font {}: {}", path.display(), e))?;
            Some(font)
        }
        None => None,
    };
    let renderer = Renderer::new(font, rl.get_font_default());

    let controller = Controller::new(carousel, ControlVisibility::new(args.hide_after()));
    let mut app = CarouselApp::new(deck, controller, renderer);
    app.initialize(&rl, !args.no_confetti);

    // --- Main Loop ---
    while !rl.window_should_close() {
        let dt = rl.get_frame_time();
        app.render_frame(dt, &mut rl, &thread);
    }
    Ok(())
}

/// Printable ASCII plus every character the captions use.
fn glyph_set(text: &str) -> String {
    let mut glyphs: String = (' '..='~').collect();
    for c in text.chars() {
        if !glyphs.contains(c) {
            glyphs.push(c);
        }
    }
    glyphs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glyph_set_adds_accents_once() {
        let glyphs = glyph_set("você é");
        assert!(glyphs.starts_with(" !\""));
        assert_eq!(glyphs.matches('ê').count(), 1);
        assert!(glyphs.ends_with("êé"));
    }
}
