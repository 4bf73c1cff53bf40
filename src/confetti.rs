use rand::Rng;
use raylib::prelude::*;

use crate::constants::*;

const PALETTE: [Color; 4] = [
    Color { r: 0xff, g: 0x4d, b: 0x6d, a: 0xff },
    Color { r: 0xff, g: 0x6b, b: 0x81, a: 0xff },
    Color { r: 0xff, g: 0xd7, b: 0x00, a: 0xff },
    Color { r: 0xf8, g: 0xe1, b: 0xe7, a: 0xff },
];

struct Piece {
    position: Vector2,
    velocity: Vector2, // px per frame at 60 fps
    size: Vector2,
    rotation: f32,
    spin: f32,
    color: Color,
}

/// A single, non-recycling confetti burst.
pub struct Confetti {
    pieces: Vec<Piece>,
}

impl Confetti {
    pub fn new() -> Self {
        Self { pieces: Vec::new() }
    }

    pub fn is_active(&self) -> bool {
        !self.pieces.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    /// Adds a burst on top of whatever is still falling.
    pub fn burst(&mut self, origin: Vector2, rng: &mut impl Rng) {
        for _ in 0..CONFETTI_PIECES {
            self.pieces.push(Piece {
                position: origin,
                velocity: Vector2::new(rng.random_range(-4.0..4.0), rng.random_range(-10.0..0.0)),
                size: Vector2::new(rng.random_range(5.0..10.0), rng.random_range(10.0..20.0)),
                rotation: rng.random_range(0.0..360.0),
                spin: rng.random_range(-6.0..6.0),
                color: PALETTE[rng.random_range(0..PALETTE.len())],
            });
        }
    }

    pub fn update(&mut self, dt: f32, width: f32, height: f32) {
        let frames = dt * FPS as f32;
        for piece in self.pieces.iter_mut() {
            piece.velocity.y += CONFETTI_GRAVITY * frames;
            piece.velocity.x *= 0.99_f32.powf(frames); // Air drag
            piece.position.x += piece.velocity.x * frames;
            piece.position.y += piece.velocity.y * frames;
            piece.rotation += piece.spin * frames;
        }
        let margin = 20.0;
        self.pieces.retain(|p| {
            p.position.y < height + margin && p.position.x > -margin && p.position.x < width + margin
        });
    }

    pub fn draw(&self, d: &mut impl RaylibDraw) {
        for piece in &self.pieces {
            d.draw_rectangle_pro(
                Rectangle::new(piece.position.x, piece.position.y, piece.size.x, piece.size.y),
                Vector2::new(piece.size.x * 0.5, piece.size.y * 0.5),
                piece.rotation,
                piece.color,
            );
        }
    }
}
