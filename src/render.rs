//! Draws the field: a translucent disc per particle plus a faint line between
//! every pair closer than [`CONNECTION_DISTANCE`].
//!
//! The pair pass is quadratic. That is fine while the pool is capped at
//! [`MAX_PARTICLES`](crate::particle::MAX_PARTICLES); a larger cap would want
//! a uniform grid with `CONNECTION_DISTANCE`-sized cells instead.

use egui::{Color32, Mesh, Pos2, Shape, Stroke};
use glam::Vec2;

use crate::particle::Particle;

pub const CONNECTION_DISTANCE: f32 = 150.0;
pub const MAX_LINE_OPACITY: f32 = 0.2;
pub const LINE_WIDTH: f32 = 1.0;

/// Blue-500.
pub const FIELD_RGB: [u8; 3] = [59, 130, 246];
pub const PARTICLE_PAINT: Paint = Paint::new(FIELD_RGB, 0.5);
/// `#0B0E14`, the rim of the backdrop and the surface clear colour.
pub const BACKGROUND_RGB: [u8; 3] = [11, 14, 20];
/// `#1E212B`, the centre of the backdrop.
pub const BACKDROP_CENTER_RGB: [u8; 3] = [30, 33, 43];
pub const BACKDROP_SEGMENTS: u32 = 64;

/// An sRGB colour with straight (unmultiplied) alpha in `0.0..=1.0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Paint {
    pub rgb: [u8; 3],
    pub alpha: f32,
}

impl Paint {
    pub const fn new(rgb: [u8; 3], alpha: f32) -> Self {
        Self { rgb, alpha }
    }
}

impl From<Paint> for Color32 {
    fn from(paint: Paint) -> Self {
        let [r, g, b] = paint.rgb;
        let a = (paint.alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
        Color32::from_rgba_unmultiplied(r, g, b, a)
    }
}

/// A 2D surface the field can be drawn onto.
pub trait Canvas {
    fn clear(&mut self);
    fn fill_disc(&mut self, center: Vec2, radius: f32, paint: Paint);
    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, paint: Paint);
}

/// What the last [`draw`] put on the canvas.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DrawStats {
    pub discs: usize,
    pub lines: usize,
}

/// Line opacity for two particles `distance` apart, or `None` when they are
/// too far apart to be connected.
pub fn connection_opacity(distance: f32) -> Option<f32> {
    if distance.is_nan() || distance >= CONNECTION_DISTANCE {
        return None;
    }

    let opacity = (1.0 - distance / CONNECTION_DISTANCE) * MAX_LINE_OPACITY;
    Some(opacity.min(MAX_LINE_OPACITY))
}

pub fn draw<C: Canvas + ?Sized>(particles: &[Particle], canvas: &mut C) -> DrawStats {
    canvas.clear();

    for particle in particles {
        canvas.fill_disc(particle.position, particle.radius, PARTICLE_PAINT);
    }

    let mut lines = 0;
    for (i, a) in particles.iter().enumerate() {
        for b in &particles[i + 1..] {
            let Some(opacity) = connection_opacity(a.position.distance(b.position)) else {
                continue;
            };

            canvas.stroke_line(
                a.position,
                b.position,
                LINE_WIDTH,
                Paint::new(FIELD_RGB, opacity),
            );
            lines += 1;
        }
    }

    DrawStats {
        discs: particles.len(),
        lines,
    }
}

/// Radial backdrop for a surface of `size`: [`BACKDROP_CENTER_RGB`] in the
/// middle fading to [`BACKGROUND_RGB`] at the farthest corner.
///
/// Built as a triangle fan whose rim circumscribes that corner circle, so the
/// whole surface is covered.
pub fn background_gradient(size: Vec2) -> Shape {
    let [r, g, b] = BACKDROP_CENTER_RGB;
    let center_color = Color32::from_rgb(r, g, b);
    let [r, g, b] = BACKGROUND_RGB;
    let rim_color = Color32::from_rgb(r, g, b);

    let center = size * 0.5;
    let step = std::f32::consts::TAU / BACKDROP_SEGMENTS as f32;
    let radius = center.length() / (step * 0.5).cos();

    let mut mesh = Mesh::default();
    mesh.colored_vertex(to_pos(center), center_color);
    for i in 0..BACKDROP_SEGMENTS {
        let rim = center + Vec2::from_angle(i as f32 * step) * radius;
        mesh.colored_vertex(to_pos(rim), rim_color);
    }
    for i in 0..BACKDROP_SEGMENTS {
        mesh.add_triangle(0, 1 + i, 1 + (i + 1) % BACKDROP_SEGMENTS);
    }

    Shape::mesh(mesh)
}

/// Collects the field as egui shapes, to be painted on the background layer.
#[derive(Default)]
pub struct ShapeCanvas {
    shapes: Vec<Shape>,
}

impl ShapeCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Hands the shapes over, leaving the buffer's allocation in place.
    pub fn drain(&mut self) -> std::vec::Drain<'_, Shape> {
        self.shapes.drain(..)
    }
}

impl Canvas for ShapeCanvas {
    fn clear(&mut self) {
        self.shapes.clear();
    }

    fn fill_disc(&mut self, center: Vec2, radius: f32, paint: Paint) {
        self.shapes
            .push(Shape::circle_filled(to_pos(center), radius, paint));
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, paint: Paint) {
        self.shapes.push(Shape::line_segment(
            [to_pos(from), to_pos(to)],
            Stroke::new(width, paint),
        ));
    }
}

fn to_pos(v: Vec2) -> Pos2 {
    Pos2::new(v.x, v.y)
}
