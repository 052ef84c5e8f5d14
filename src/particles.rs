use crate::core::Millis;

/// Interval between spawns.
pub const SPAWN_PERIOD: Millis = Millis(300);
/// Wall time after which a spawned particle is removed.
pub const LIFETIME: Millis = Millis(5000);

/// One decorative background particle. Created by the spawner, removed by a
/// scheduled expiry; never part of the page model.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub id: u64,
    /// Horizontal position, percent of container width.
    pub left_pct: f64,
    /// Fall animation duration, 2000-5000ms.
    pub fall_ms: u64,
    /// 0.3-0.8.
    pub opacity: f64,
}

/// Live particles plus the seeded RNG that shapes them. Same seed, same
/// particle stream.
#[derive(Debug)]
pub struct ParticleField {
    particles: Vec<Particle>,
    next_id: u64,
    rng: SplitMix64,
}

impl ParticleField {
    pub fn new(seed: u64) -> Self {
        Self {
            particles: Vec::new(),
            next_id: 0,
            rng: SplitMix64(seed),
        }
    }

    pub fn spawn(&mut self) -> Particle {
        let id = self.next_id;
        self.next_id += 1;
        let particle = Particle {
            id,
            left_pct: self.rng.next_f64() * 100.0,
            fall_ms: 2000 + (self.rng.next_f64() * 3000.0) as u64,
            opacity: 0.3 + self.rng.next_f64() * 0.5,
        };
        self.particles.push(particle.clone());
        particle
    }

    pub fn expire(&mut self, id: u64) {
        self.particles.retain(|p| p.id != id);
    }

    pub fn live(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

/// SplitMix64, enough for decorative jitter and fully deterministic.
#[derive(Clone, Debug)]
struct SplitMix64(u64);

impl SplitMix64 {
    fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform in [0, 1).
    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}
