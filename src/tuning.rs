//! Data-driven game balance
//!
//! Every gameplay number lives here so a build can be rebalanced without
//! touching the simulation. Persisted in LocalStorage on the web.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Gameplay tuning values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player ===
    /// Per-axis movement speed (units/s)
    pub player_speed: f32,
    /// Starting health
    pub player_health: i32,
    /// Minimum time between shots (ms)
    pub fire_interval_ms: f64,
    /// Invulnerability window after taking a hit (ms)
    pub hit_cooldown_ms: f32,
    pub player_radius: f32,

    // === Bullets ===
    pub bullet_speed: f32,
    /// Fixed pool size; shots beyond this are dropped
    pub bullet_pool_capacity: usize,
    pub bullet_radius: f32,

    // === Enemies ===
    pub enemy_speed: f32,
    pub enemy_health: i32,
    pub enemy_radius: f32,

    // === Spawning ===
    /// Spawn period at the start of a run (ms)
    pub spawn_delay_ms: f32,
    /// How much the spawn period shrinks per escalation (ms)
    pub spawn_delay_step_ms: f32,
    /// Spawn period never drops below this (ms)
    pub min_spawn_delay_ms: f32,
    /// Play time between escalations (ms)
    pub escalation_interval_ms: f32,
    /// Spawn multiplier growth per escalation
    pub spawn_multiplier_step: f32,
    /// Distance outside the visible bounds that enemies appear at
    pub spawn_margin: f32,

    // === Economy ===
    pub currency_per_hit: u64,

    // === Door ===
    pub door_pos: Vec2,
    pub door_radius: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_speed: 200.0,
            player_health: 4,
            fire_interval_ms: 200.0,
            hit_cooldown_ms: 2000.0,
            player_radius: 16.0,

            bullet_speed: 500.0,
            bullet_pool_capacity: 50,
            bullet_radius: 4.0,

            enemy_speed: 100.0,
            enemy_health: 3,
            enemy_radius: 16.0,

            spawn_delay_ms: 2000.0,
            spawn_delay_step_ms: 200.0,
            min_spawn_delay_ms: 200.0,
            escalation_interval_ms: 5000.0,
            spawn_multiplier_step: 0.5,
            spawn_margin: 50.0,

            currency_per_hit: 10,

            door_pos: Vec2::new(100.0, 100.0),
            door_radius: 24.0,
        }
    }
}

impl Tuning {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "arena_shooter_tuning";

    /// Parse tuning from JSON; absent fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load tuning from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(tuning) => {
                        log::info!("Loaded tuning from LocalStorage");
                        return tuning;
                    }
                    Err(e) => log::warn!("Ignoring malformed tuning: {}", e),
                }
            }
        }

        log::info!("Using default tuning");
        Self::default()
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
