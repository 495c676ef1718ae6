//! Fixed-capacity bullet pool
//!
//! Bullets are allocated once and recycled: firing activates an idle slot,
//! leaving the playfield or hitting an enemy returns it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::{facing, velocity_from_rotation};

/// Index of a bullet slot in the pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BulletId(pub u32);

/// A pooled projectile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub id: BulletId,
    pub active: bool,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Sprite rotation (heading + facing offset)
    pub rotation: f32,
}

/// Recycling allocator for bullets
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulletPool {
    slots: Vec<Bullet>,
    speed: f32,
}

impl BulletPool {
    pub fn new(capacity: usize, speed: f32) -> Self {
        let slots = (0..capacity as u32)
            .map(|i| Bullet {
                id: BulletId(i),
                active: false,
                pos: Vec2::ZERO,
                vel: Vec2::ZERO,
                rotation: 0.0,
            })
            .collect();
        Self { slots, speed }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Fire a bullet from `origin` along `angle`.
    ///
    /// Returns `None` when every slot is in flight; the shot is simply dropped.
    pub fn acquire(&mut self, origin: Vec2, angle: f32) -> Option<BulletId> {
        let speed = self.speed;
        let bullet = self.slots.iter_mut().find(|b| !b.active)?;
        bullet.active = true;
        bullet.pos = origin;
        bullet.vel = velocity_from_rotation(angle, speed);
        bullet.rotation = facing(angle);
        Some(bullet.id)
    }

    /// Return a bullet to the pool. Releasing an idle bullet is a no-op.
    pub fn release(&mut self, id: BulletId) {
        if let Some(bullet) = self.slots.get_mut(id.0 as usize) {
            bullet.active = false;
            bullet.vel = Vec2::ZERO;
        }
    }

    pub fn get(&self, id: BulletId) -> Option<&Bullet> {
        self.slots.get(id.0 as usize)
    }

    pub fn is_active(&self, id: BulletId) -> bool {
        self.get(id).is_some_and(|b| b.active)
    }

    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|b| b.active).count()
    }

    pub fn active(&self) -> impl Iterator<Item = &Bullet> {
        self.slots.iter().filter(|b| b.active)
    }

    pub fn active_mut(&mut self) -> impl Iterator<Item = &mut Bullet> {
        self.slots.iter_mut().filter(|b| b.active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_acquire_sets_kinematics() {
        let mut pool = BulletPool::new(50, 500.0);
        let id = pool.acquire(Vec2::new(10.0, 20.0), 0.0).unwrap();
        let b = pool.get(id).unwrap();
        assert!(b.active);
        assert_eq!(b.pos, Vec2::new(10.0, 20.0));
        assert!((b.vel - Vec2::new(500.0, 0.0)).length() < 1e-3);
        assert!((b.rotation - FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn test_exhausted_pool_drops_shot() {
        let mut pool = BulletPool::new(3, 500.0);
        for _ in 0..3 {
            assert!(pool.acquire(Vec2::ZERO, 0.0).is_some());
        }
        assert_eq!(pool.acquire(Vec2::ZERO, 0.0), None);
        assert_eq!(pool.active_count(), 3);
    }

    #[test]
    fn test_release_is_idempotent_and_recycles() {
        let mut pool = BulletPool::new(1, 500.0);
        let id = pool.acquire(Vec2::ZERO, 0.0).unwrap();
        pool.release(id);
        pool.release(id);
        pool.release(BulletId(99));
        assert_eq!(pool.active_count(), 0);
        assert_eq!(pool.acquire(Vec2::ONE, 1.0), Some(id));
    }

    proptest! {
        #[test]
        fn prop_active_never_exceeds_capacity(
            ops in proptest::collection::vec(any::<(bool, u8)>(), 0..300)
        ) {
            let mut pool = BulletPool::new(50, 500.0);
            for (fire, slot) in ops {
                if fire {
                    let _ = pool.acquire(Vec2::ZERO, 0.3);
                } else {
                    pool.release(BulletId(slot as u32 % 60));
                }
                prop_assert!(pool.active_count() <= 50);
            }
        }
    }
}
