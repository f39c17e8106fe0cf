//! Fixed-capacity particle pool
//!
//! All slots are allocated up front; emitting claims inactive slots and
//! expiry just clears the `active` flag, so the per-frame path never
//! allocates. Particles are purely visual and draw from their own RNG
//! stream, separate from the gameplay source.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Velocities are authored in units per frame at this rate
pub const VELOCITY_FRAME_RATE: f32 = 60.0;

/// A single visual-effect particle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Seconds remaining
    pub life: f32,
    pub max_life: f32,
    pub size: f32,
    pub initial_size: f32,
    /// RGBA, alpha fades with life
    pub color: [f32; 4],
    pub initial_alpha: f32,
    pub active: bool,
}

impl Default for Particle {
    fn default() -> Self {
        Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            life: 0.0,
            max_life: 1.0,
            size: 3.0,
            initial_size: 3.0,
            color: [1.0, 1.0, 0.8, 0.8],
            initial_alpha: 0.8,
            active: false,
        }
    }
}

impl Particle {
    fn spawn(&mut self, pos: Vec2, vel: Vec2, life: f32, size: f32, color: [f32; 4]) {
        *self = Self {
            pos,
            vel,
            life,
            max_life: life,
            size,
            initial_size: size,
            color,
            initial_alpha: color[3],
            active: true,
        };
    }

    /// Age the particle by `dt` seconds
    pub fn update(&mut self, dt: f32) {
        if !self.active {
            return;
        }
        self.life -= dt;
        if self.life <= 0.0 {
            self.active = false;
            return;
        }
        self.pos += self.vel * dt * VELOCITY_FRAME_RATE;

        // Linear fade to zero
        let fade = (self.life / self.max_life).max(0.0);
        self.color[3] = self.initial_alpha * fade;
        self.size = self.initial_size * fade;
    }
}

/// Parameters for one burst of particles
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmitSpec {
    pub count: usize,
    pub color: [f32; 4],
    /// Lifetime range in seconds
    pub lifetime: (f32, f32),
    pub size: (f32, f32),
    /// Range for each velocity component, units per frame
    pub velocity: (f32, f32),
    /// Offset of the emitter from the given origin
    pub offset: Vec2,
}

impl EmitSpec {
    /// Grey smoke under the plane at takeoff
    pub const TAKEOFF_SMOKE: EmitSpec = EmitSpec {
        count: 200,
        color: [0.5, 0.5, 0.5, 0.5],
        lifetime: (1.2, 2.5),
        size: (12.0, 24.0),
        velocity: (-1.6, 0.8),
        offset: Vec2::new(0.0, -60.0),
    };

    /// Engine exhaust trailing the plane in flight
    pub const EXHAUST: EmitSpec = EmitSpec {
        count: 75,
        color: [1.0, 0.5, 0.2, 0.9],
        lifetime: (0.6, 1.2),
        size: (6.0, 12.0),
        velocity: (-0.5, 0.5),
        offset: Vec2::new(0.0, -75.0),
    };

    /// Main fireball at the crash position
    pub const EXPLOSION: EmitSpec = EmitSpec {
        count: 400,
        color: [1.0, 0.3, 0.1, 0.8],
        lifetime: (0.8, 3.0),
        size: (5.0, 23.0),
        velocity: (-4.0, 4.0),
        offset: Vec2::ZERO,
    };

    /// Follow-up burst shortly after the explosion
    pub const SECONDARY_BURST: EmitSpec = EmitSpec {
        count: 200,
        color: [1.0, 0.4, 0.1, 0.7],
        lifetime: (0.5, 2.0),
        size: (8.0, 18.0),
        velocity: (-5.0, 5.0),
        offset: Vec2::ZERO,
    };
}

/// Pre-allocated particle storage
#[derive(Debug, Clone)]
pub struct ParticlePool {
    slots: Box<[Particle]>,
    rng: Pcg32,
}

impl ParticlePool {
    pub fn new(capacity: usize, seed: u64) -> Self {
        Self {
            slots: vec![Particle::default(); capacity].into_boxed_slice(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Activate up to `spec.count` inactive slots around `origin`.
    /// Returns how many were emitted; the rest of the request is dropped.
    pub fn emit(&mut self, origin: Vec2, spec: &EmitSpec) -> usize {
        let pos = origin + spec.offset;
        let mut emitted = 0;
        for slot in self.slots.iter_mut() {
            if emitted >= spec.count {
                break;
            }
            if slot.active {
                continue;
            }
            let life = sample(&mut self.rng, spec.lifetime);
            let size = sample(&mut self.rng, spec.size);
            let vel = Vec2::new(
                sample(&mut self.rng, spec.velocity),
                sample(&mut self.rng, spec.velocity),
            );
            slot.spawn(pos, vel, life, size, spec.color);
            emitted += 1;
        }
        emitted
    }

    /// Emit `spec` with probability `chance`. Returns how many were emitted.
    pub fn maybe_emit(&mut self, origin: Vec2, spec: &EmitSpec, chance: f32) -> usize {
        if self.rng.random::<f32>() < chance {
            self.emit(origin, spec)
        } else {
            0
        }
    }

    /// Advance every live particle by `dt` seconds
    pub fn update(&mut self, dt: f32) {
        for particle in self.slots.iter_mut().filter(|p| p.active) {
            particle.update(dt);
        }
    }

    /// Deactivate everything
    pub fn clear(&mut self) {
        for particle in self.slots.iter_mut() {
            particle.active = false;
        }
    }

    /// Live particles, in slot order
    pub fn iter_active(&self) -> impl Iterator<Item = &Particle> {
        self.slots.iter().filter(|p| p.active)
    }

    /// All slots, live or not (for renderers that mirror the pool 1:1)
    pub fn slots(&self) -> &[Particle] {
        &self.slots
    }

    pub fn active_count(&self) -> usize {
        self.iter_active().count()
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }
}

#[inline]
fn sample(rng: &mut Pcg32, (lo, hi): (f32, f32)) -> f32 {
    lo + (hi - lo) * rng.random::<f32>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn spec(count: usize) -> EmitSpec {
        EmitSpec {
            count,
            color: [1.0, 0.0, 0.0, 0.8],
            lifetime: (1.0, 1.0),
            size: (10.0, 10.0),
            velocity: (1.0, 1.0),
            offset: Vec2::ZERO,
        }
    }

    #[test]
    fn test_emit_within_capacity() {
        let mut pool = ParticlePool::new(16, 1);
        assert_eq!(pool.emit(Vec2::ZERO, &spec(5)), 5);
        assert_eq!(pool.active_count(), 5);
    }

    #[test]
    fn test_emit_overflow_drops_excess() {
        let mut pool = ParticlePool::new(10, 1);
        assert_eq!(pool.emit(Vec2::ZERO, &spec(7)), 7);
        assert_eq!(pool.emit(Vec2::ZERO, &spec(7)), 3);
        assert_eq!(pool.emit(Vec2::ZERO, &spec(7)), 0);
        assert_eq!(pool.active_count(), 10);
        assert_eq!(pool.capacity(), 10);
    }

    #[test]
    fn test_ranges_respected() {
        let mut pool = ParticlePool::new(800, 9);
        pool.emit(Vec2::new(100.0, 100.0), &EmitSpec::EXPLOSION);
        for p in pool.iter_active() {
            assert!(p.life >= 0.8 && p.life <= 3.0);
            assert!(p.size >= 5.0 && p.size <= 23.0);
            assert!(p.vel.x >= -4.0 && p.vel.x <= 4.0);
            assert!(p.vel.y >= -4.0 && p.vel.y <= 4.0);
            assert_eq!(p.pos, Vec2::new(100.0, 100.0));
        }
    }

    #[test]
    fn test_offset_applied() {
        let mut pool = ParticlePool::new(300, 2);
        pool.emit(Vec2::new(50.0, 100.0), &EmitSpec::TAKEOFF_SMOKE);
        assert!(pool.iter_active().all(|p| p.pos == Vec2::new(50.0, 40.0)));
    }

    #[test]
    fn test_update_integrates_and_fades() {
        let mut pool = ParticlePool::new(1, 3);
        pool.emit(Vec2::ZERO, &spec(1));
        pool.update(0.5);

        let p = pool.iter_active().next().unwrap();
        // 1 unit/frame * 0.5s * 60
        assert!((p.pos.x - 30.0).abs() < 1e-4);
        assert!((p.life - 0.5).abs() < 1e-6);
        assert!((p.size - 5.0).abs() < 1e-4);
        assert!((p.color[3] - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_expired_slots_are_reused() {
        let mut pool = ParticlePool::new(4, 4);
        pool.emit(Vec2::ZERO, &spec(4));
        pool.update(1.0);
        assert_eq!(pool.active_count(), 0);
        assert_eq!(pool.emit(Vec2::ZERO, &spec(4)), 4);
    }

    #[test]
    fn test_maybe_emit_bounds() {
        let mut pool = ParticlePool::new(8, 6);
        assert_eq!(pool.maybe_emit(Vec2::ZERO, &spec(3), 0.0), 0);
        assert_eq!(pool.maybe_emit(Vec2::ZERO, &spec(3), 1.0), 3);
    }

    #[test]
    fn test_clear() {
        let mut pool = ParticlePool::new(8, 5);
        pool.emit(Vec2::ZERO, &spec(8));
        pool.clear();
        assert_eq!(pool.active_count(), 0);
    }

    proptest! {
        #[test]
        fn prop_never_exceeds_capacity(
            capacity in 0usize..64,
            bursts in proptest::collection::vec(0usize..100, 1..10),
        ) {
            let mut pool = ParticlePool::new(capacity, 7);
            for count in bursts {
                let before = pool.active_count();
                let emitted = pool.emit(Vec2::ZERO, &spec(count));
                prop_assert_eq!(emitted, count.min(capacity - before));
                prop_assert!(pool.active_count() <= capacity);
            }
        }
    }
}
