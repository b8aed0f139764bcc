//! Short-lived "bubble" particles released while the bar expands.
//!
//! The field is populated once when an expand run enters its particle
//! window and left untouched until the window is left again, so each
//! expansion gets a fresh burst without reallocating per frame.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Random numbers for particle placement. Tests plug in a fixed sequence.
pub trait RandomSource {
    /// Uniform value in `0.0..1.0`
    fn unit(&mut self) -> f32;
    fn coin(&mut self) -> bool;
}

impl RandomSource for SmallRng {
    fn unit(&mut self) -> f32 {
        self.random::<f32>()
    }

    fn coin(&mut self) -> bool {
        self.random_bool(0.5)
    }
}

/// Seeded source when `seed` is given, OS entropy otherwise.
pub fn random_source(seed: Option<u64>) -> Box<dyn RandomSource> {
    match seed {
        Some(seed) => Box::new(SmallRng::seed_from_u64(seed)),
        None => Box::new(SmallRng::from_os_rng()),
    }
}

const MIN_SPEED: f32 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bubble {
    pub radius: f32,
    pub speed: f32,
    pub origin_x: f32,
    pub origin_y: f32,
}

pub struct ParticleField {
    bubbles: Vec<Bubble>,
    count: usize,
    min_size: f32,
    max_size: f32,
    active: bool,
    progress: f32,
    rng: Box<dyn RandomSource>,
}

impl ParticleField {
    pub fn new(count: usize, min_size: f32, max_size: f32, rng: Box<dyn RandomSource>) -> Self {
        Self {
            bubbles: Vec::with_capacity(count),
            count,
            min_size,
            max_size,
            active: false,
            progress: 0.0,
            rng,
        }
    }

    /// Place the particles along `[offset_x, offset_x + width]` at `center_y`.
    ///
    /// No-op while the field is already active.
    pub fn activate(&mut self, offset_x: f32, width: f32, center_y: f32) {
        if self.active {
            return;
        }
        self.active = true;
        self.progress = 0.0;
        self.bubbles.clear();

        let half = (self.count / 2).max(1);
        let step = width / half as f32;
        for i in 0..self.count {
            let index = (i % half) as f32;
            let speed = MIN_SPEED + (1.0 - MIN_SPEED) * self.rng.unit();
            let size = self.min_size + (self.max_size - self.min_size) * self.rng.unit();
            let jitter = step * self.rng.unit();
            let sign = if self.rng.coin() { 1.0 } else { -1.0 };
            self.bubbles.push(Bubble {
                radius: size / 2.0,
                speed,
                origin_x: offset_x + index * step + jitter * sign,
                origin_y: center_y,
            });
        }
        log::debug!("particle field activated with {} bubbles", self.bubbles.len());
    }

    /// Mark the layout stale; the next activation regenerates it.
    pub fn deactivate(&mut self) {
        self.active = false;
    }

    pub fn advance(&mut self, progress: f32) {
        self.progress = progress.clamp(0.0, 1.0);
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn bubbles(&self) -> &[Bubble] {
        &self.bubbles
    }

    /// Current `(cx, cy, radius)` of each particle. The first half rises,
    /// the second half sinks.
    pub fn positions(&self) -> impl Iterator<Item = (f32, f32, f32)> + '_ {
        let half = self.count / 2;
        self.bubbles.iter().enumerate().map(move |(i, b)| {
            let travel = b.speed * self.progress;
            let cy = if i < half {
                b.origin_y * (1.0 - travel)
            } else {
                b.origin_y * (1.0 + travel)
            };
            (b.origin_x, cy, b.radius)
        })
    }
}
