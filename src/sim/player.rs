//! Player controller: movement, aim, rate-limited fire and health

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::bullet::{BulletId, BulletPool};
use crate::tuning::Tuning;
use crate::{angle_between, facing};

/// Player lifecycle. `Dead` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifeState {
    Alive,
    Dead,
}

/// Directional keys held this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveKeys {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

/// Result of a contact hit on the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    /// Still inside the invulnerability window (or already dead)
    Ignored,
    Hurt { health: i32 },
    Killed,
}

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Sprite rotation (aim heading + facing offset)
    pub rotation: f32,
    pub radius: f32,
    pub health: i32,
    /// Remaining invulnerability (ms). May dip below zero; only `<= 0` matters.
    pub hit_cooldown_ms: f32,
    /// Earliest sim time (ms) the next shot may be fired after
    pub last_fired_at: f64,
    pub life: LifeState,
}

impl Player {
    pub fn new(pos: Vec2, tuning: &Tuning) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            rotation: 0.0,
            radius: tuning.player_radius,
            health: tuning.player_health,
            hit_cooldown_ms: 0.0,
            last_fired_at: 0.0,
            life: LifeState::Alive,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.life == LifeState::Alive
    }

    /// Set velocity from the held keys and turn to face the pointer.
    ///
    /// Axes are driven independently, so diagonals run at ~1.41x axis speed.
    pub fn steer(&mut self, keys: MoveKeys, pointer: Vec2, speed: f32) {
        if !self.is_alive() {
            self.vel = Vec2::ZERO;
            return;
        }

        let mut vel = Vec2::ZERO;
        if keys.up {
            vel.y = -speed;
        }
        if keys.down {
            vel.y = speed;
        }
        if keys.left {
            vel.x = -speed;
        }
        if keys.right {
            vel.x = speed;
        }
        self.vel = vel;
        self.rotation = facing(angle_between(self.pos, pointer));
    }

    /// Fire toward `pointer` if the fire interval has elapsed.
    ///
    /// The interval restarts even when the pool is exhausted and the shot is dropped.
    pub fn try_fire(
        &mut self,
        time_ms: f64,
        pointer: Vec2,
        pool: &mut BulletPool,
        interval_ms: f64,
    ) -> Option<BulletId> {
        if !self.is_alive() || time_ms <= self.last_fired_at {
            return None;
        }
        self.last_fired_at = time_ms + interval_ms;
        let fired = pool.acquire(self.pos, angle_between(self.pos, pointer));
        if fired.is_none() {
            log::debug!("Bullet pool exhausted, shot dropped");
        }
        fired
    }

    /// Apply one point of contact damage, gated by the hit cooldown
    pub fn take_hit(&mut self, cooldown_ms: f32) -> HitOutcome {
        if !self.is_alive() || self.hit_cooldown_ms > 0.0 {
            return HitOutcome::Ignored;
        }
        self.health -= 1;
        self.hit_cooldown_ms = cooldown_ms;
        if self.health <= 0 {
            self.life = LifeState::Dead;
            self.vel = Vec2::ZERO;
            log::info!("Game Over!");
            HitOutcome::Killed
        } else {
            HitOutcome::Hurt {
                health: self.health,
            }
        }
    }

    /// Tick the invulnerability window down
    pub fn cool_down(&mut self, dt_ms: f32) {
        if self.hit_cooldown_ms > 0.0 {
            self.hit_cooldown_ms -= dt_ms;
        }
    }
}
