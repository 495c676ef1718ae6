//! Minimal arcade physics: integration, world bounds and overlap contacts
//!
//! Every body is a circle. Contacts are reported as events for the combat
//! resolver; nothing here changes health or currency.

use glam::Vec2;

use super::bullet::BulletId;
use super::enemy::EnemyId;
use super::state::GameState;

/// An overlap between two bodies this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    BulletEnemy { bullet: BulletId, enemy: EnemyId },
    PlayerEnemy { enemy: EnemyId },
    PlayerDoor,
}

#[inline]
pub fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    let r = ra + rb;
    a.distance_squared(b) < r * r
}

/// Whether `pos` lies inside the playfield
#[inline]
pub fn in_bounds(pos: Vec2, viewport: Vec2) -> bool {
    pos.x >= 0.0 && pos.y >= 0.0 && pos.x <= viewport.x && pos.y <= viewport.y
}

/// Move every body by its velocity.
///
/// The player is kept inside the playfield. Bullets that leave it go back to
/// the pool. Enemies are free to travel outside (they spawn there).
pub fn integrate(state: &mut GameState, dt_ms: f32) {
    let dt = dt_ms / 1000.0;
    let viewport = state.viewport;

    let player = &mut state.player;
    if player.is_alive() {
        player.pos += player.vel * dt;
        let r = Vec2::splat(player.radius);
        player.pos = player.pos.clamp(r, (viewport - r).max(r));
    }

    for enemy in state.enemies.iter_mut() {
        enemy.pos += enemy.vel * dt;
    }

    let mut exited = Vec::new();
    for bullet in state.bullets.active_mut() {
        bullet.pos += bullet.vel * dt;
        if !in_bounds(bullet.pos, viewport) {
            exited.push(bullet.id);
        }
    }
    for id in exited {
        state.bullets.release(id);
    }
}

/// Collect overlaps between bullets, enemies, the player and the door.
///
/// A dead player has no body and produces no contacts.
pub fn detect_contacts(state: &GameState) -> Vec<Contact> {
    let mut contacts = Vec::new();
    let tuning = &state.tuning;

    for bullet in state.bullets.active() {
        for enemy in state.enemies.iter() {
            if circles_overlap(bullet.pos, tuning.bullet_radius, enemy.pos, enemy.radius) {
                contacts.push(Contact::BulletEnemy {
                    bullet: bullet.id,
                    enemy: enemy.id,
                });
            }
        }
    }

    let player = &state.player;
    if player.is_alive() {
        for enemy in state.enemies.iter() {
            if circles_overlap(player.pos, player.radius, enemy.pos, enemy.radius) {
                contacts.push(Contact::PlayerEnemy { enemy: enemy.id });
            }
        }
        if circles_overlap(player.pos, player.radius, tuning.door_pos, tuning.door_radius) {
            contacts.push(Contact::PlayerDoor);
        }
    }

    contacts
}
