//! Collision-driven damage and rewards
//!
//! Bullets damage enemies and pay out currency per hit. Enemies damage the
//! player on contact, gated by the player's hit cooldown, and are never
//! harmed by that contact.

use super::bullet::BulletId;
use super::collision::Contact;
use super::enemy::EnemyId;
use super::player::HitOutcome;
use super::state::{GameEvent, GameState};

/// Apply a batch of contacts in order
pub fn resolve(state: &mut GameState, contacts: &[Contact]) {
    for contact in contacts {
        match *contact {
            Contact::BulletEnemy { bullet, enemy } => bullet_hits_enemy(state, bullet, enemy),
            Contact::PlayerEnemy { enemy } => enemy_touches_player(state, enemy),
            // Door contact is handled by the tick
            Contact::PlayerDoor => {}
        }
    }
}

/// One bullet against one enemy.
///
/// A bullet already back in the pool, or an enemy already removed earlier
/// in the batch, means the contact is stale and is skipped.
pub fn bullet_hits_enemy(state: &mut GameState, bullet: BulletId, enemy: EnemyId) {
    if !state.bullets.is_active(bullet) || !state.enemies.contains(enemy) {
        return;
    }
    state.bullets.release(bullet);

    let Some(health) = state.enemies.get_mut(enemy).and_then(|e| e.damage()) else {
        return;
    };

    state.currency = state.currency.saturating_add(state.tuning.currency_per_hit);
    state.push_event(GameEvent::CurrencyChanged {
        currency: state.currency,
    });
    state.push_event(GameEvent::EnemyHit { id: enemy, health });

    if health <= 0 && state.enemies.remove(enemy).is_some() {
        state.push_event(GameEvent::EnemyKilled { id: enemy });
    }
}

/// Contact damage from an enemy to the player
pub fn enemy_touches_player(state: &mut GameState, enemy: EnemyId) {
    if !state.enemies.contains(enemy) {
        return;
    }
    match state.player.take_hit(state.tuning.hit_cooldown_ms) {
        HitOutcome::Ignored => {}
        HitOutcome::Hurt { health } => state.push_event(GameEvent::PlayerHit { health }),
        HitOutcome::Killed => {
            state.push_event(GameEvent::PlayerHit { health: 0 });
            state.push_event(GameEvent::PlayerDied);
        }
    }
}
