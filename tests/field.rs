use std::cell::Cell;

use glam::Vec2;
use plexus_field::{
    physics::MAX_SPEED, Canvas, Field, FrameScheduler, Paint, Particle, ParticlePool,
    RefreshSource, Viewport,
};
use rand::{rngs::StdRng, SeedableRng};

#[derive(Default)]
struct Display {
    requests: Cell<u32>,
}

impl RefreshSource for Display {
    fn request_refresh(&self) {
        self.requests.set(self.requests.get() + 1);
    }
}

#[derive(Default)]
struct CountingCanvas {
    clears: u32,
    discs: u32,
    lines: Vec<f32>,
}

impl Canvas for CountingCanvas {
    fn clear(&mut self) {
        self.clears += 1;
    }

    fn fill_disc(&mut self, _center: Vec2, _radius: f32, _paint: Paint) {
        self.discs += 1;
    }

    fn stroke_line(&mut self, _from: Vec2, _to: Vec2, _width: f32, paint: Paint) {
        self.lines.push(paint.alpha);
    }
}

/// Delivers one display refresh the way the host does.
fn refresh(
    scheduler: &mut FrameScheduler,
    field: &mut Field,
    canvas: &mut CountingCanvas,
    display: &Display,
) {
    if let Some(ticket) = scheduler.begin_frame() {
        field.frame(canvas);
        scheduler.end_frame(ticket, display);
    }
}

fn still(x: f32, y: f32) -> Particle {
    Particle {
        position: Vec2::new(x, y),
        velocity: Vec2::ZERO,
        radius: 2.0,
    }
}

#[test]
fn test_frames_run_until_teardown() {
    let display = Display::default();
    let mut scheduler = FrameScheduler::new();
    let mut rng = StdRng::seed_from_u64(5);
    let mut field = Field::mount(Viewport::new(800.0, 600.0), &mut rng);
    let mut canvas = CountingCanvas::default();

    scheduler.start(&display);
    for _ in 0..10 {
        refresh(&mut scheduler, &mut field, &mut canvas, &display);
    }
    assert_eq!(field.frames(), 10);
    assert_eq!(canvas.clears, 10);
    assert_eq!(canvas.discs, 10 * 80);

    let before = field.particles().to_vec();
    assert!(scheduler.teardown());
    assert!(!scheduler.teardown());

    // The refresh requested by the last frame still arrives.
    refresh(&mut scheduler, &mut field, &mut canvas, &display);
    refresh(&mut scheduler, &mut field, &mut canvas, &display);

    assert_eq!(field.frames(), 10);
    assert_eq!(canvas.clears, 10);
    assert_eq!(field.particles(), &before[..]);
}

#[test]
fn test_pointer_move_is_seen_by_next_frame() {
    let viewport = Viewport::new(1000.0, 1000.0);
    let pool = ParticlePool::from_particles(vec![still(500.0, 500.0)]);
    let mut field = Field::with_pool(viewport, pool);
    let mut canvas = CountingCanvas::default();

    field.pointer_moved(Vec2::new(550.0, 500.0));
    field.frame(&mut canvas);

    assert!(field.particles()[0].velocity.x < 0.0);

    field.pointer_left();
    let velocity = field.particles()[0].velocity;
    field.frame(&mut canvas);
    assert_eq!(field.particles()[0].velocity, velocity);
}

#[test]
fn test_pointer_on_particle_stays_finite() {
    let viewport = Viewport::new(1000.0, 1000.0);
    let pool = ParticlePool::from_particles(vec![still(250.0, 250.0)]);
    let mut field = Field::with_pool(viewport, pool);
    let mut canvas = CountingCanvas::default();

    field.pointer_moved(Vec2::new(250.0, 250.0));
    field.frame(&mut canvas);

    let particle = field.particles()[0];
    assert_eq!(particle.velocity, Vec2::ZERO);
    assert!(particle.position.is_finite());
}

#[test]
fn test_line_opacity_for_pair_at_75() {
    let viewport = Viewport::new(1000.0, 1000.0);
    let pool = ParticlePool::from_particles(vec![still(100.0, 100.0), still(175.0, 100.0)]);
    let mut field = Field::with_pool(viewport, pool);
    let mut canvas = CountingCanvas::default();

    let stats = field.frame(&mut canvas);

    assert_eq!(stats.lines, 1);
    assert!((canvas.lines[0] - 0.1).abs() < f32::EPSILON);
}

#[test]
fn test_same_seed_and_pointer_path_replay() {
    let run = || {
        let mut rng = StdRng::seed_from_u64(1234);
        let mut field = Field::mount(Viewport::new(900.0, 500.0), &mut rng);
        let mut canvas = CountingCanvas::default();

        for frame in 0..600u32 {
            match frame % 120 {
                0..=89 => field.pointer_moved(Vec2::new(frame as f32 % 900.0, 250.0)),
                _ => field.pointer_left(),
            }
            field.frame(&mut canvas);
        }

        (field.particles().to_vec(), canvas.lines)
    };

    assert_eq!(run(), run());
}

#[test]
fn test_shrunk_viewport_particles_come_back() {
    let particles = vec![
        Particle {
            position: Vec2::new(900.0, 100.0),
            velocity: Vec2::new(0.25, 0.0),
            radius: 1.0,
        },
        Particle {
            position: Vec2::new(150.0, 700.0),
            velocity: Vec2::new(0.0, -0.2),
            radius: 1.0,
        },
    ];
    let pool = ParticlePool::from_particles(particles);
    let mut field = Field::with_pool(Viewport::new(1000.0, 800.0), pool);
    let mut canvas = CountingCanvas::default();

    field.resize(300.0, 200.0);
    for _ in 0..3_000 {
        field.frame(&mut canvas);
    }

    assert_eq!(field.particles().len(), 2);
    for p in field.particles() {
        assert!(p.position.x >= -MAX_SPEED && p.position.x <= 300.0 + MAX_SPEED);
        assert!(p.position.y >= -MAX_SPEED && p.position.y <= 200.0 + MAX_SPEED);
    }
}
