use std::collections::HashMap;

use raylib::prelude::*;

use crate::carousel::DragHint;
use crate::constants::*;
use crate::controller::Controller;
use crate::slides::Slide;
use crate::transition::SlideFrame;

/// On-screen control under a point.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Hit {
    Previous,
    Next,
    Dot(usize),
}

/// Where the controls sit for a given window size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub width: f32,
    pub height: f32,
    pub slide_count: usize,
}

impl Layout {
    pub fn new(width: f32, height: f32, slide_count: usize) -> Self {
        Self { width, height, slide_count }
    }

    pub fn center(&self) -> Vector2 {
        Vector2::new(self.width * 0.5, self.height * 0.5)
    }

    pub fn previous_button(&self) -> Vector2 {
        Vector2::new(BUTTON_MARGIN + BUTTON_RADIUS, self.height * 0.5)
    }

    pub fn next_button(&self) -> Vector2 {
        Vector2::new(self.width - BUTTON_MARGIN - BUTTON_RADIUS, self.height * 0.5)
    }

    pub fn dot(&self, index: usize) -> Vector2 {
        let pitch = DOT_RADIUS * 2.0 + DOT_GAP;
        let row_width = self.slide_count as f32 * pitch - DOT_GAP;
        let first = (self.width - row_width) * 0.5 + DOT_RADIUS;
        Vector2::new(first + index as f32 * pitch, self.height - DOTS_BOTTOM_MARGIN)
    }

    pub fn hit_test(&self, point: Vector2) -> Option<Hit> {
        if point.distance_to(self.previous_button()) <= BUTTON_RADIUS {
            return Some(Hit::Previous);
        }
        if point.distance_to(self.next_button()) <= BUTTON_RADIUS {
            return Some(Hit::Next);
        }
        // Dots are tiny, accept anything within half the pitch
        let reach = DOT_RADIUS + DOT_GAP * 0.5;
        (0..self.slide_count).find(|&i| {
            let dot = self.dot(i);
            (point.x - dot.x).abs() <= reach && (point.y - dot.y).abs() <= reach * 2.0
        })
        .map(Hit::Dot)
    }
}

/// Source rectangle that crops a texture to fill the viewport without
/// distortion, centred.
pub fn cover_source(tex_width: f32, tex_height: f32, width: f32, height: f32) -> Rectangle {
    let scale = (width / tex_width).max(height / tex_height);
    let src_width = width / scale;
    let src_height = height / scale;
    Rectangle::new(
        (tex_width - src_width) * 0.5,
        (tex_height - src_height) * 0.5,
        src_width,
        src_height,
    )
}

/// Greedy word wrap. Words wider than `max_width` get a line of their own.
pub fn wrap_text(text: &str, max_width: f32, measure: impl Fn(&str) -> f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        if line.is_empty() {
            line.push_str(word);
            continue;
        }
        let candidate = format!("{} {}", line, word);
        if measure(&candidate) <= max_width {
            line = candidate;
        } else {
            lines.push(std::mem::replace(&mut line, word.to_string()));
        }
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

pub fn faded(color: Color, alpha: f32) -> Color {
    Color::new(color.r, color.g, color.b, (color.a as f32 * alpha.clamp(0.0, 1.0)) as u8)
}

/// Everything the renderer needs besides the controller state.
pub struct Scene<'a> {
    pub title: Option<&'a str>,
    pub slides: &'a [Slide],
    /// Uploaded textures keyed by image source.
    pub textures: &'a HashMap<String, Texture2D>,
}

pub struct Renderer {
    font: Option<Font>,
    fallback_font: WeakFont,
}

impl Renderer {
    pub fn new(font: Option<Font>, fallback_font: WeakFont) -> Self {
        Self { font, fallback_font }
    }

    pub fn draw(&self, d: &mut RaylibDrawHandle, layout: &Layout, scene: &Scene, controller: &Controller) {
        d.clear_background(Color::BLACK);

        let carousel = controller.carousel();
        match controller.transition() {
            Some(transition) => {
                self.draw_slide(d, layout, scene, transition.outgoing, transition.outgoing_frame(), 0.0);
                self.draw_slide(d, layout, scene, transition.incoming, transition.incoming_frame(), 0.0);
            }
            None => {
                let drag = carousel.drag_offset().unwrap_or(0.0) * DRAG_ELASTIC;
                self.draw_slide(d, layout, scene, carousel.current(), SlideFrame::RESTING, drag);
            }
        }

        if let Some(title) = scene.title {
            self.draw_centered(d, title, 24.0, TITLE_FONT_SIZE, layout.width, Color::WHITE);
        }

        match carousel.drag_hint() {
            Some(DragHint::Previous) => draw_chevron(d, Vector2::new(40.0, layout.height * 0.5), -1.0, 1.0),
            Some(DragHint::Next) => draw_chevron(d, Vector2::new(layout.width - 40.0, layout.height * 0.5), 1.0, 1.0),
            None => {}
        }

        let alpha = controller.controls_alpha();
        if alpha > 0.0 {
            self.draw_controls(d, layout, carousel.current(), alpha);
        }

        controller.confetti().draw(d);
    }

    fn draw_slide(
        &self,
        d: &mut RaylibDrawHandle,
        layout: &Layout,
        scene: &Scene,
        index: usize,
        frame: SlideFrame,
        drag: f32,
    ) {
        let x = frame.offset * layout.width + drag;
        let Some(slide) = scene.slides.get(index) else {
            return;
        };

        match scene.textures.get(&slide.source.key()) {
            Some(texture) => {
                let source = cover_source(texture.width() as f32, texture.height() as f32, layout.width, layout.height);
                d.draw_texture_pro(
                    texture,
                    source,
                    Rectangle::new(x, 0.0, layout.width, layout.height),
                    Vector2::new(0.0, 0.0),
                    0.0,
                    faded(Color::WHITE, frame.alpha),
                );
            }
            // Not loaded yet, or failed: an empty frame
            None => d.draw_rectangle_v(
                Vector2::new(x, 0.0),
                Vector2::new(layout.width, layout.height),
                faded(Color::new(24, 24, 28, 255), frame.alpha),
            ),
        }

        // Gradient behind the captions
        let band = layout.height * 0.25;
        d.draw_rectangle_gradient_v(
            x as i32,
            (layout.height - band) as i32,
            layout.width as i32,
            band as i32,
            faded(Color::BLACK, 0.0),
            faded(Color::BLACK, 0.6 * frame.alpha),
        );

        let text_color = faded(Color::WHITE, frame.alpha);
        if !slide.caption_above.is_empty() {
            self.draw_wrapped(d, &slide.caption_above, x, 24.0 + TITLE_FONT_SIZE * 1.5, layout, text_color, false);
        }
        if !slide.caption_below.is_empty() {
            let bottom = layout.height - DOTS_BOTTOM_MARGIN - 24.0;
            self.draw_wrapped(d, &slide.caption_below, x, bottom, layout, text_color, true);
        }
    }

    /// Draws wrapped, centred text starting at `y`, or ending at `y` when
    /// `from_bottom` is set.
    fn draw_wrapped(
        &self,
        d: &mut RaylibDrawHandle,
        text: &str,
        x: f32,
        y: f32,
        layout: &Layout,
        color: Color,
        from_bottom: bool,
    ) {
        let max_width = layout.width - 2.0 * (BUTTON_MARGIN + BUTTON_RADIUS * 2.0);
        let lines = wrap_text(text, max_width, |s| self.measure(s, CAPTION_FONT_SIZE).x);
        let line_height = CAPTION_FONT_SIZE * 1.25;
        let mut top = if from_bottom { y - lines.len() as f32 * line_height } else { y };
        for line in &lines {
            let size = self.measure(line, CAPTION_FONT_SIZE);
            let position = Vector2::new(x + (layout.width - size.x) * 0.5, top);
            self.draw_text(d, line, position, CAPTION_FONT_SIZE, color);
            top += line_height;
        }
    }

    fn draw_centered(&self, d: &mut RaylibDrawHandle, text: &str, y: f32, size: f32, width: f32, color: Color) {
        let measured = self.measure(text, size);
        self.draw_text(d, text, Vector2::new((width - measured.x) * 0.5, y), size, color);
    }

    fn draw_controls(&self, d: &mut RaylibDrawHandle, layout: &Layout, current: usize, alpha: f32) {
        for (center, side) in [(layout.previous_button(), -1.0), (layout.next_button(), 1.0)] {
            d.draw_circle_v(center, BUTTON_RADIUS, faded(Color::BLACK, 0.3 * alpha));
            draw_chevron(d, center, side, alpha);
        }

        for i in 0..layout.slide_count {
            let color = if i == current { Color::WHITE } else { faded(Color::WHITE, 0.4) };
            d.draw_circle_v(layout.dot(i), DOT_RADIUS, faded(color, alpha));
        }
    }

    fn measure(&self, text: &str, size: f32) -> Vector2 {
        match &self.font {
            Some(font) => font.measure_text(text, size, FONT_SPACING),
            None => self.fallback_font.measure_text(text, size, FONT_SPACING),
        }
    }

    fn draw_text(&self, d: &mut RaylibDrawHandle, text: &str, position: Vector2, size: f32, color: Color) {
        match &self.font {
            Some(font) => d.draw_text_ex(font, text, position, size, FONT_SPACING, color),
            None => d.draw_text_ex(&self.fallback_font, text, position, size, FONT_SPACING, color),
        }
    }
}

/// `side` is -1 for a left-pointing chevron, 1 for right-pointing.
fn draw_chevron(d: &mut RaylibDrawHandle, center: Vector2, side: f32, alpha: f32) {
    let arm = BUTTON_RADIUS * 0.4;
    let tip = Vector2::new(center.x + side * arm * 0.5, center.y);
    let color = faded(Color::WHITE, alpha);
    d.draw_line_ex(Vector2::new(tip.x - side * arm, center.y - arm), tip, 3.0, color);
    d.draw_line_ex(Vector2::new(tip.x - side * arm, center.y + arm), tip, 3.0, color);
}
