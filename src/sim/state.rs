//! Game state and core simulation types
//!
//! One `GameState` holds everything a run needs: entities, economy, spawn
//! schedule and RNG. The orchestrator is its only writer.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::bullet::{BulletId, BulletPool};
use super::enemy::{Enemies, EnemyId};
use super::player::Player;
use super::spawner::{SpawnEdge, Spawner};
use super::timer::Timers;
use crate::tuning::Tuning;
use crate::velocity_toward;

/// Whether the main scene is live or parked while the secondary room is open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    MainActive,
    RoomOpen,
}

/// Things that happened during a tick, for the UI and platform layers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    BulletFired { id: BulletId },
    EnemySpawned { id: EnemyId },
    EnemyHit { id: EnemyId, health: i32 },
    EnemyKilled { id: EnemyId },
    EnemiesCleared { ids: Vec<EnemyId> },
    PlayerHit { health: i32 },
    PlayerDied,
    CurrencyChanged { currency: u64 },
    RoomOpened { currency: u64 },
    RoomClosed { currency: u64 },
}

/// Complete game state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    /// Playfield size
    pub viewport: Vec2,
    pub phase: Phase,
    /// Main-scene play time (ms); frozen while the room is open
    pub time_ms: f64,
    pub currency: u64,
    pub player: Player,
    pub bullets: BulletPool,
    pub enemies: Enemies,
    pub spawner: Spawner,
    pub timers: Timers,
    rng: Pcg32,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Start a run with the player centered and the spawner armed
    pub fn new(seed: u64, viewport: Vec2, currency: u64, tuning: Tuning) -> Self {
        let player = Player::new(viewport * 0.5, &tuning);
        let bullets = BulletPool::new(tuning.bullet_pool_capacity, tuning.bullet_speed);
        let spawner = Spawner::new(&tuning);

        let mut state = Self {
            seed,
            tuning,
            viewport,
            phase: Phase::MainActive,
            time_ms: 0.0,
            currency,
            player,
            bullets,
            enemies: Enemies::new(),
            spawner,
            timers: Timers::new(),
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
        };
        state.spawner.start(&mut state.timers);
        state
    }

    pub fn center(&self) -> Vec2 {
        self.viewport * 0.5
    }

    pub fn is_room_open(&self) -> bool {
        self.phase == Phase::RoomOpen
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Take all events recorded since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Spawn one batch of enemies on random edges, each aimed at the player
    pub fn spawn_wave(&mut self) {
        let target = self.player.pos;
        for _ in 0..self.spawner.batch_size() {
            let edge = SpawnEdge::random(&mut self.rng);
            let pos = edge.point(&mut self.rng, self.viewport, self.tuning.spawn_margin);
            let vel = velocity_toward(pos, target, self.tuning.enemy_speed);
            let id = self
                .enemies
                .spawn(pos, vel, self.tuning.enemy_health, self.tuning.enemy_radius);
            self.events.push(GameEvent::EnemySpawned { id });
        }
    }

    /// Park the main scene: cancel spawning and wipe the enemies.
    ///
    /// Returns false (and does nothing) if the room is already open.
    pub fn enter_room(&mut self) -> bool {
        if self.phase == Phase::RoomOpen {
            return false;
        }
        self.phase = Phase::RoomOpen;
        self.timers.remove_all();
        self.spawner.stop();
        self.clear_enemies();
        self.events.push(GameEvent::RoomOpened {
            currency: self.currency,
        });
        true
    }

    /// Resume the main scene after the room closes.
    ///
    /// `returned_currency` replaces the balance when the room reported one.
    /// The player is recentered and spawning restarts at the current
    /// difficulty.
    pub fn leave_room(&mut self, returned_currency: Option<u64>) {
        if self.phase != Phase::RoomOpen {
            return;
        }
        self.phase = Phase::MainActive;

        if let Some(currency) = returned_currency {
            self.currency = currency;
            self.events.push(GameEvent::CurrencyChanged { currency });
        }

        self.clear_enemies();
        self.player.pos = self.center();
        self.player.vel = Vec2::ZERO;
        self.spawner.restart(&mut self.timers);
        self.events.push(GameEvent::RoomClosed {
            currency: self.currency,
        });
    }

    fn clear_enemies(&mut self) {
        let ids = self.enemies.clear();
        if !ids.is_empty() {
            self.events.push(GameEvent::EnemiesCleared { ids });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> GameState {
        GameState::new(42, Vec2::new(800.0, 600.0), 0, Tuning::default())
    }

    #[test]
    fn test_initial_state() {
        let s = state();
        assert_eq!(s.player.health, 4);
        assert_eq!(s.currency, 0);
        assert_eq!(s.spawner.delay_ms, 2000.0);
        assert_eq!(s.spawner.multiplier, 1.0);
        assert_eq!(s.player.pos, Vec2::new(400.0, 300.0));
        assert!(s.spawner.is_running());
        assert_eq!(s.timers.len(), 1);
    }

    #[test]
    fn test_spawn_wave_aims_at_player() {
        let mut s = state();
        s.spawner.multiplier = 3.7;
        s.spawn_wave();
        assert_eq!(s.enemies.len(), 3);
        for e in s.enemies.iter() {
            let to_player = (s.player.pos - e.pos).normalize();
            assert!((e.vel.normalize() - to_player).length() < 1e-4);
            assert!((e.vel.length() - 100.0).abs() < 1e-3);
            assert_eq!(e.health, 3);
        }
        let spawned = s
            .events()
            .iter()
            .filter(|e| matches!(e, GameEvent::EnemySpawned { .. }))
            .count();
        assert_eq!(spawned, 3);
    }

    #[test]
    fn test_same_seed_same_spawns() {
        let mut a = state();
        let mut b = state();
        a.spawn_wave();
        b.spawn_wave();
        let pa: Vec<_> = a.enemies.iter().map(|e| e.pos).collect();
        let pb: Vec<_> = b.enemies.iter().map(|e| e.pos).collect();
        assert_eq!(pa, pb);
    }

    #[test]
    fn test_enter_room_guarded() {
        let mut s = state();
        s.spawn_wave();
        assert!(s.enter_room());
        assert!(s.enemies.is_empty());
        assert!(s.timers.is_empty());
        assert!(!s.spawner.is_running());
        assert!(!s.enter_room());
        let opened = s
            .events()
            .iter()
            .filter(|e| matches!(e, GameEvent::RoomOpened { .. }))
            .count();
        assert_eq!(opened, 1);
    }

    #[test]
    fn test_leave_room_restores() {
        let mut s = state();
        s.spawner.delay_ms = 1600.0;
        s.spawner.multiplier = 2.0;
        s.player.pos = Vec2::new(20.0, 30.0);
        s.enter_room();

        s.leave_room(Some(120));
        assert_eq!(s.phase, Phase::MainActive);
        assert_eq!(s.currency, 120);
        assert_eq!(s.player.pos, s.center());
        assert_eq!(s.timers.len(), 1);
        assert_eq!(s.spawner.delay_ms, 1600.0);
        assert_eq!(s.spawner.multiplier, 2.0);

        // Second leave is a no-op
        s.leave_room(Some(999));
        assert_eq!(s.currency, 120);
    }

    #[test]
    fn test_leave_room_without_currency_keeps_balance() {
        let mut s = state();
        s.currency = 70;
        s.enter_room();
        s.leave_room(None);
        assert_eq!(s.currency, 70);
    }
}
