//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Simulation time only (no wall clock)
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod bullet;
pub mod collision;
pub mod combat;
pub mod enemy;
pub mod player;
pub mod spawner;
pub mod state;
pub mod tick;
pub mod timer;

pub use bullet::{Bullet, BulletId, BulletPool};
pub use collision::Contact;
pub use enemy::{Enemies, Enemy, EnemyId};
pub use player::{HitOutcome, LifeState, MoveKeys, Player};
pub use spawner::{SpawnEdge, Spawner};
pub use state::{GameEvent, GameState, Phase};
pub use tick::{TickInput, tick};
pub use timer::{TimerEvent, Timers};
