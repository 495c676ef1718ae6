//! Enemies and the live enemy set
//!
//! Collision callbacks refer to enemies by `EnemyId`; the set is the only
//! lookup from id to entity.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::{angle_between, facing, velocity_toward};

/// Stable enemy handle (never reused within a run)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EnemyId(pub u32);

/// A chasing enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: EnemyId,
    pub pos: Vec2,
    pub vel: Vec2,
    pub rotation: f32,
    pub radius: f32,
    pub health: i32,
}

impl Enemy {
    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Turn toward `target` and head straight for it.
    /// Called every tick so the enemy tracks a moving target.
    pub fn pursue(&mut self, target: Vec2, speed: f32) {
        if !self.is_alive() {
            return;
        }
        self.rotation = facing(angle_between(self.pos, target));
        self.vel = velocity_toward(self.pos, target, speed);
    }

    /// Take one point of bullet damage; returns remaining health, or `None`
    /// if the enemy was already spent.
    pub fn damage(&mut self) -> Option<i32> {
        if !self.is_alive() {
            return None;
        }
        self.health -= 1;
        Some(self.health)
    }
}

/// All live enemies (sorted by id for deterministic iteration)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Enemies {
    list: Vec<Enemy>,
    next_id: u32,
}

impl Enemies {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an enemy with an initial (one-shot) velocity
    pub fn spawn(&mut self, pos: Vec2, vel: Vec2, health: i32, radius: f32) -> EnemyId {
        let id = EnemyId(self.next_id);
        self.next_id += 1;
        self.list.push(Enemy {
            id,
            pos,
            vel,
            rotation: facing(vel.y.atan2(vel.x)),
            radius,
            health,
        });
        id
    }

    pub fn get(&self, id: EnemyId) -> Option<&Enemy> {
        self.list
            .binary_search_by_key(&id, |e| e.id)
            .ok()
            .map(|i| &self.list[i])
    }

    pub fn get_mut(&mut self, id: EnemyId) -> Option<&mut Enemy> {
        match self.list.binary_search_by_key(&id, |e| e.id) {
            Ok(i) => Some(&mut self.list[i]),
            Err(_) => None,
        }
    }

    /// Remove an enemy. Removing twice (or an unknown id) returns `None`.
    pub fn remove(&mut self, id: EnemyId) -> Option<Enemy> {
        let i = self.list.binary_search_by_key(&id, |e| e.id).ok()?;
        Some(self.list.remove(i))
    }

    /// Remove every enemy, returning the ids that were live
    pub fn clear(&mut self) -> Vec<EnemyId> {
        self.list.drain(..).map(|e| e.id).collect()
    }

    pub fn contains(&self, id: EnemyId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Enemy> {
        self.list.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Enemy> {
        self.list.iter_mut()
    }
}
