use glam::Vec2;
use rand::Rng;

use crate::viewport::Viewport;

/// Particles spawned per surface pixel of width.
pub const DENSITY: f32 = 0.1;
/// Hard cap on the pool; the pairwise connection pass is quadratic in this.
pub const MAX_PARTICLES: usize = 100;
/// Bound of each initial velocity component, in pixels per frame.
pub const MAX_INITIAL_VELOCITY: f32 = 0.25;
pub const MIN_RADIUS: f32 = 1.0;
pub const MAX_RADIUS: f32 = 3.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    pub radius: f32,
}

/// Fixed-size particle storage. The length is decided once, from the
/// viewport width at creation, and never changes afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct ParticlePool {
    particles: Box<[Particle]>,
}

impl ParticlePool {
    pub fn generate<R: Rng + ?Sized>(viewport: &Viewport, rng: &mut R) -> Self {
        Self {
            particles: generate_particles(viewport, rng).into_boxed_slice(),
        }
    }

    pub fn from_particles(particles: Vec<Particle>) -> Self {
        Self {
            particles: particles.into_boxed_slice(),
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn as_slice(&self) -> &[Particle] {
        &self.particles
    }

    pub fn as_mut_slice(&mut self) -> &mut [Particle] {
        &mut self.particles
    }
}

/// `floor(width * DENSITY)`, capped at [`MAX_PARTICLES`].
pub fn particle_count(width: f32) -> usize {
    if !width.is_finite() || width <= 0.0 {
        return 0;
    }

    ((width * DENSITY).floor() as usize).min(MAX_PARTICLES)
}

pub fn generate_particles<R: Rng + ?Sized>(viewport: &Viewport, rng: &mut R) -> Vec<Particle> {
    let count = particle_count(viewport.width);

    (0..count)
        .map(|_| Particle {
            position: Vec2::new(
                sample_axis(rng, viewport.width),
                sample_axis(rng, viewport.height),
            ),
            velocity: Vec2::new(
                rng.gen_range(-MAX_INITIAL_VELOCITY..=MAX_INITIAL_VELOCITY),
                rng.gen_range(-MAX_INITIAL_VELOCITY..=MAX_INITIAL_VELOCITY),
            ),
            radius: rng.gen_range(MIN_RADIUS..=MAX_RADIUS),
        })
        .collect()
}

// Uniform in [0, extent); a collapsed axis pins particles to its origin.
fn sample_axis<R: Rng + ?Sized>(rng: &mut R, extent: f32) -> f32 {
    if extent > 0.0 && extent.is_finite() {
        rng.gen_range(0.0..extent)
    } else {
        0.0
    }
}
