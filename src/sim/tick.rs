//! Per-frame simulation step
//!
//! Order within a tick: player input, difficulty ramp, timers (spawning),
//! movement, combat, enemy pursuit, cooldowns, door check.

use glam::Vec2;

use super::collision::{self, Contact};
use super::combat;
use super::player::MoveKeys;
use super::state::{GameEvent, GameState, Phase};
use super::timer::TimerEvent;

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Directional keys held
    pub keys: MoveKeys,
    /// Pointer position in world space
    pub pointer: Vec2,
    /// Fire button held
    pub fire: bool,
}

/// Advance the game state by `dt_ms`.
///
/// Does nothing while the secondary room is open.
pub fn tick(state: &mut GameState, input: &TickInput, dt_ms: f32) {
    if state.phase == Phase::RoomOpen {
        return;
    }

    state.time_ms += dt_ms as f64;

    // Player
    state
        .player
        .steer(input.keys, input.pointer, state.tuning.player_speed);
    if input.fire {
        if let Some(id) = state.player.try_fire(
            state.time_ms,
            input.pointer,
            &mut state.bullets,
            state.tuning.fire_interval_ms,
        ) {
            state.push_event(GameEvent::BulletFired { id });
        }
    }

    // Difficulty ramp
    state
        .spawner
        .escalate(dt_ms, &state.tuning, &mut state.timers);

    // Timers
    for event in state.timers.advance(dt_ms) {
        match event {
            TimerEvent::SpawnWave => state.spawn_wave(),
        }
    }

    // Movement and contacts
    collision::integrate(state, dt_ms);
    let contacts = collision::detect_contacts(state);
    combat::resolve(state, &contacts);

    // Enemies chase the player's current position
    let target = state.player.pos;
    let speed = state.tuning.enemy_speed;
    for enemy in state.enemies.iter_mut() {
        enemy.pursue(target, speed);
    }

    state.player.cool_down(dt_ms);

    if contacts.contains(&Contact::PlayerDoor) && state.enter_room() {
        log::info!("Player reached the door (currency {})", state.currency);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT_MS;
    use crate::sim::LifeState;
    use crate::tuning::Tuning;

    fn state() -> GameState {
        GameState::new(12345, Vec2::new(800.0, 600.0), 0, Tuning::default())
    }

    fn run(state: &mut GameState, input: &TickInput, ms: f32) {
        let mut t = 0.0;
        while t < ms {
            tick(state, input, SIM_DT_MS);
            t += SIM_DT_MS;
        }
    }

    #[test]
    fn test_first_wave_after_base_delay() {
        let mut s = state();
        let input = TickInput {
            pointer: Vec2::new(400.0, 0.0),
            ..Default::default()
        };
        tick(&mut s, &input, 1999.0);
        assert!(s.enemies.is_empty());
        tick(&mut s, &input, 1.0);
        assert_eq!(s.enemies.len(), 1);
    }

    #[test]
    fn test_escalation_after_five_seconds() {
        let mut s = state();
        let input = TickInput::default();
        tick(&mut s, &input, 4000.0);
        assert_eq!(s.spawner.delay_ms, 2000.0);
        tick(&mut s, &input, 1000.0);
        assert_eq!(s.spawner.delay_ms, 1800.0);
        assert_eq!(s.spawner.multiplier, 1.5);
    }

    #[test]
    fn test_enemies_close_in_on_player() {
        let mut s = state();
        s.player.pos = Vec2::new(400.0, 300.0);
        let e = s.enemies.spawn(Vec2::new(400.0, -50.0), Vec2::ZERO, 3, 16.0);
        let input = TickInput::default();
        tick(&mut s, &input, SIM_DT_MS);
        // First tick only retargets
        let d0 = s.enemies.get(e).unwrap().pos.distance(s.player.pos);
        run(&mut s, &input, 500.0);
        let d1 = s.enemies.get(e).unwrap().pos.distance(s.player.pos);
        assert!(d1 < d0 - 40.0);
    }

    #[test]
    fn test_fire_spawns_bullets_rate_limited() {
        let mut s = state();
        let input = TickInput {
            pointer: Vec2::new(400.0, 0.0),
            fire: true,
            ..Default::default()
        };
        // 1s at 60Hz with a 200ms interval: at most 5 shots
        run(&mut s, &input, 1000.0);
        let fired = s
            .events()
            .iter()
            .filter(|e| matches!(e, GameEvent::BulletFired { .. }))
            .count();
        assert!((4..=5).contains(&fired), "fired {fired}");
    }

    #[test]
    fn test_shooting_an_enemy_pays_out() {
        let mut s = state();
        s.timers.remove_all();
        let e = s.enemies.spawn(Vec2::new(400.0, 150.0), Vec2::ZERO, 3, 16.0);
        let input = TickInput {
            pointer: Vec2::new(400.0, 0.0),
            fire: true,
            ..Default::default()
        };
        run(&mut s, &input, 3000.0);
        assert!(!s.enemies.contains(e));
        assert_eq!(s.currency, 30);
    }

    #[test]
    fn test_touching_door_opens_room_once() {
        let mut s = state();
        s.spawn_wave();
        s.player.pos = s.tuning.door_pos;
        tick(&mut s, &TickInput::default(), SIM_DT_MS);
        assert_eq!(s.phase, Phase::RoomOpen);
        assert!(s.enemies.is_empty());
        assert!(s.timers.is_empty());

        // Parked: nothing advances
        let before = s.time_ms;
        run(&mut s, &TickInput::default(), 10_000.0);
        assert_eq!(s.time_ms, before);
        assert!(s.enemies.is_empty());
        let opened = s
            .events()
            .iter()
            .filter(|e| matches!(e, GameEvent::RoomOpened { .. }))
            .count();
        assert_eq!(opened, 1);
    }

    #[test]
    fn test_player_dies_after_four_spaced_contacts() {
        let mut s = state();
        s.timers.remove_all();
        let center = s.center();
        s.enemies.spawn(center, Vec2::ZERO, 3, 16.0);
        let input = TickInput::default();
        run(&mut s, &input, 7000.0);
        assert_eq!(s.player.life, LifeState::Dead);
        assert_eq!(s.player.health, 0);
        assert!(s.events().contains(&GameEvent::PlayerDied));
    }
}
