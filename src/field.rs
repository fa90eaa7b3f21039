use glam::Vec2;
use log::{debug, info};
use rand::Rng;

use crate::{
    particle::{Particle, ParticlePool},
    physics,
    pointer::Pointer,
    render::{self, Canvas, DrawStats},
    viewport::Viewport,
};

/// Everything one mounted particle field owns: the pool, the surface size and
/// the pointer. Input signals go in through `resize`/`pointer_*`, frames come
/// out through [`Field::frame`].
#[derive(Clone, Debug)]
pub struct Field {
    viewport: Viewport,
    pointer: Pointer,
    pool: ParticlePool,

    frames: u64,
    last_draw: DrawStats,
}

impl Field {
    /// Sizes the pool from the viewport width; later resizes keep the count.
    pub fn mount<R: Rng + ?Sized>(viewport: Viewport, rng: &mut R) -> Self {
        let pool = ParticlePool::generate(&viewport, rng);
        info!(
            "Mounted field with {} particles on a {}x{} surface",
            pool.len(),
            viewport.width,
            viewport.height
        );

        Self::with_pool(viewport, pool)
    }

    pub fn with_pool(viewport: Viewport, pool: ParticlePool) -> Self {
        Self {
            viewport,
            pointer: Pointer::default(),
            pool,

            frames: 0,
            last_draw: DrawStats::default(),
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        debug!("Field resized to {}x{}", width, height);
        self.viewport.resize(width, height);
    }

    pub fn pointer_moved(&mut self, position: Vec2) {
        self.pointer.moved(position);
    }

    pub fn pointer_left(&mut self) {
        if self.pointer.active {
            debug!("Pointer left the field");
        }
        self.pointer.left();
    }

    /// Advances the simulation one frame without drawing. Returns `false`,
    /// leaving every particle untouched, while the viewport has no area.
    pub fn step(&mut self) -> bool {
        if self.viewport.is_empty() {
            return false;
        }

        physics::step(self.pool.as_mut_slice(), &self.viewport, &self.pointer);
        self.frames += 1;
        true
    }

    /// Steps every particle, then redraws the whole field onto `canvas`.
    /// A zero-area viewport does neither and leaves `canvas` alone.
    pub fn frame<C: Canvas + ?Sized>(&mut self, canvas: &mut C) -> DrawStats {
        if !self.step() {
            return DrawStats::default();
        }

        self.last_draw = render::draw(self.pool.as_slice(), canvas);
        self.last_draw
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn pointer(&self) -> &Pointer {
        &self.pointer
    }

    pub fn particles(&self) -> &[Particle] {
        self.pool.as_slice()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn last_draw(&self) -> DrawStats {
        self.last_draw
    }
}
