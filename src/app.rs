use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use raylib::prelude::*;

use crate::controller::Controller;
use crate::input::InputCollector;
use crate::preload::{preload_after, preload_window, HttpOrFileTransport, Preloader};
use crate::slides::SlideDeck;
use crate::texture_loader::load_texture;
use crate::view::{Layout, Renderer, Scene};

/// The running carousel: input, engine, preloading and drawing, driven one
/// frame at a time from the main loop.
pub struct CarouselApp {
    deck: SlideDeck,
    controller: Controller,
    preloader: Preloader,
    textures: HashMap<String, Texture2D>,
    renderer: Renderer,
    input: InputCollector,
}

impl CarouselApp {
    pub fn new(deck: SlideDeck, controller: Controller, renderer: Renderer) -> Self {
        Self {
            deck,
            controller,
            preloader: Preloader::new(Arc::new(HttpOrFileTransport::default())),
            textures: HashMap::new(),
            renderer,
            input: InputCollector::new(),
        }
    }

    pub fn initialize(&mut self, rl: &RaylibHandle, celebrate: bool) {
        preload_window(self.controller.carousel(), &self.deck.slides, &mut self.preloader);
        if celebrate {
            let layout = self.layout(rl);
            self.controller.celebrate(&layout);
        }
    }

    pub fn render_frame(&mut self, dt: f32, rl: &mut RaylibHandle, thread: &RaylibThread) {
        let layout = self.layout(rl);

        for event in self.input.collect(rl) {
            let Some(navigation) = self.controller.handle(event, &layout) else {
                continue;
            };
            if !navigation.changed_slide() {
                continue;
            }
            let source = &self.deck.slides[navigation.to].source;
            if !self.preloader.is_preloaded(source) {
                log::debug!("slide {} shown before its image arrived", navigation.to);
            }
            preload_after(&navigation, self.controller.carousel(), &self.deck.slides, &mut self.preloader);
            self.release_distant_textures();
        }
        self.controller.update(dt, &layout);

        let window = self.window_keys();
        for fetched in self.preloader.poll() {
            // Navigated away while it was loading; fetched again on return
            if !window.contains(&fetched.source.key()) {
                continue;
            }
            match load_texture(rl, thread, &fetched) {
                Ok(texture) => {
                    log::debug!(
                        "texture ready for {} ({} image(s) preloaded)",
                        fetched.source,
                        self.preloader.preloaded().len()
                    );
                    self.textures.insert(fetched.source.key(), texture);
                }
                Err(e) => log::warn!("{}", e),
            }
        }

        let scene = Scene {
            title: self.deck.title.as_deref(),
            slides: &self.deck.slides,
            textures: &self.textures,
        };
        let mut d = rl.begin_drawing(thread);
        self.renderer.draw(&mut d, &layout, &scene, &self.controller);
    }

    fn window_keys(&self) -> HashSet<String> {
        self.controller
            .slide_window()
            .into_iter()
            .map(|i| self.deck.slides[i].source.key())
            .collect()
    }

    /// Unloads textures outside the slide window, and refetches window slides
    /// whose texture was unloaded earlier. The preloaded set never shrinks,
    /// so those are not requested again by the preloader.
    fn release_distant_textures(&mut self) {
        let window = self.window_keys();
        let before = self.textures.len();
        self.textures.retain(|key, _| window.contains(key));
        if self.textures.len() < before {
            log::debug!("released {} texture(s)", before - self.textures.len());
        }

        for i in self.controller.slide_window() {
            let source = &self.deck.slides[i].source;
            if self.preloader.is_preloaded(source)
                && !self.textures.contains_key(&source.key())
                && self.preloader.refetch(source)
            {
                log::debug!("reloading {}", source);
            }
        }
    }

    fn layout(&self, rl: &RaylibHandle) -> Layout {
        Layout::new(rl.get_screen_width() as f32, rl.get_screen_height() as f32, self.deck.slides.len())
    }
}
