//! One-frame particle integration.
//!
//! Every frame each particle, in pool order:
//! 1. moves by its velocity (unit timestep),
//! 2. has a velocity component inverted if it now lies outside the viewport
//!    and is still heading away from it,
//! 3. is pushed away from an active pointer within [`INTERACTION_RADIUS`],
//! 4. has its speed clamped to [`MAX_SPEED`].
//!
//! Reflection happens after the move, so a particle may sit just outside the
//! viewport for a frame before heading back in. A particle that is already
//! travelling back (after the viewport shrank under it, or after the pointer
//! pushed it out) keeps its heading instead of being flipped outward again.

use glam::Vec2;

use crate::{particle::Particle, pointer::Pointer, viewport::Viewport};

pub const MAX_SPEED: f32 = 2.0;
pub const INTERACTION_RADIUS: f32 = 200.0;
/// Velocity change applied at zero distance from the pointer.
pub const REPULSION_STRENGTH: f32 = 0.5;

pub fn step(particles: &mut [Particle], viewport: &Viewport, pointer: &Pointer) {
    let pointer = pointer.active_position();

    for particle in particles.iter_mut() {
        step_particle(particle, viewport, pointer);
    }
}

pub fn step_particle(particle: &mut Particle, viewport: &Viewport, pointer: Option<Vec2>) {
    particle.position += particle.velocity;

    particle.velocity.x = reflect(particle.position.x, particle.velocity.x, viewport.width);
    particle.velocity.y = reflect(particle.position.y, particle.velocity.y, viewport.height);

    if let Some(pointer) = pointer {
        particle.velocity -= repulsion(particle.position, pointer);
    }

    particle.velocity = particle.velocity.clamp_length_max(MAX_SPEED);
}

fn reflect(position: f32, velocity: f32, extent: f32) -> f32 {
    if (position < 0.0 && velocity < 0.0) || (position > extent && velocity > 0.0) {
        -velocity
    } else {
        velocity
    }
}

/// Velocity to subtract from a particle at `position`: points toward the
/// pointer, scaled linearly from [`REPULSION_STRENGTH`] at the pointer down
/// to zero at [`INTERACTION_RADIUS`]. Zero when the two coincide.
pub fn repulsion(position: Vec2, pointer: Vec2) -> Vec2 {
    let delta = pointer - position;
    let distance = delta.length();

    if distance <= 0.0 || distance >= INTERACTION_RADIUS {
        return Vec2::ZERO;
    }

    let force = (INTERACTION_RADIUS - distance) / INTERACTION_RADIUS * REPULSION_STRENGTH;
    delta / distance * force
}
