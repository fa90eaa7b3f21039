//! An ambient particle field: particles drift across a surface, bounce off its
//! edges, shy away from the pointer and are joined by lines that fade with
//! distance.
//!
//! [`Field`] owns the simulation state. The host feeds it resize and pointer
//! signals, and drives [`Field::frame`] from a [`FrameScheduler`] tied to the
//! display refresh.

pub mod field;
pub mod particle;
pub mod physics;
pub mod pointer;
pub mod render;
pub mod scheduler;
pub mod viewport;

pub use field::Field;
pub use particle::{Particle, ParticlePool};
pub use pointer::Pointer;
pub use render::{Canvas, DrawStats, Paint, ShapeCanvas};
pub use scheduler::{FrameScheduler, FrameTicket, RefreshSource, SchedulerState};
pub use viewport::Viewport;
