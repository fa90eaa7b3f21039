use std::time::{Duration, Instant};

/// Measures frame intervals and, when a cap is set, holds each frame until
/// its time slot is over.
pub struct Framepacer {
    frame_start: Instant,
    interval: Duration,
}

impl Framepacer {
    pub fn new() -> Self {
        Self {
            frame_start: Instant::now(),
            interval: Duration::ZERO,
        }
    }

    /// Seconds between the starts of the last two frames.
    pub fn frametime(&self) -> f32 {
        self.interval.as_secs_f32()
    }

    pub fn framerate(&self) -> f32 {
        let frametime = self.frametime();
        if frametime > f32::EPSILON {
            1.0 / frametime
        } else {
            0.0
        }
    }

    pub fn begin_frame(&mut self) {
        let now = Instant::now();
        self.interval = now - self.frame_start;
        self.frame_start = now;
    }

    pub fn end_frame(&mut self, framerate_cap: Option<u32>) {
        let Some(limit_frametime) = framerate_cap
            .filter(|fps| *fps > 0)
            .map(|fps| Duration::from_secs_f64(1.0 / fps as f64))
        else {
            return;
        };

        const ACCURACY: Duration = Duration::from_micros(100);
        let deadline = self.frame_start + limit_frametime;

        if let Some(sleep_time) = deadline
            .checked_duration_since(Instant::now())
            .and_then(|remaining| remaining.checked_sub(ACCURACY))
        {
            std::thread::sleep(sleep_time);
        }

        while Instant::now() < deadline {
            std::thread::yield_now();
        }
    }
}
