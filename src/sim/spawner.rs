//! Enemy spawn scheduling and difficulty ramp
//!
//! A repeating timer fires every `delay_ms`; each firing spawns
//! `floor(multiplier)` enemies just outside a random screen edge. Every
//! escalation interval of play time the delay shrinks (down to a floor) and
//! the multiplier grows without bound.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::timer::{TimerEvent, TimerId, Timers};
use crate::tuning::Tuning;

/// Screen edge an enemy enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpawnEdge {
    Top,
    Bottom,
    Left,
    Right,
}

impl SpawnEdge {
    /// Pick one of the four edges uniformly
    pub fn random(rng: &mut impl Rng) -> Self {
        match rng.random_range(1..=4) {
            1 => SpawnEdge::Top,
            2 => SpawnEdge::Bottom,
            3 => SpawnEdge::Left,
            _ => SpawnEdge::Right,
        }
    }

    /// Random point along this edge, `margin` outside the visible area
    pub fn point(self, rng: &mut impl Rng, viewport: Vec2, margin: f32) -> Vec2 {
        match self {
            SpawnEdge::Top => Vec2::new(random_coord(rng, viewport.x), -margin),
            SpawnEdge::Bottom => Vec2::new(random_coord(rng, viewport.x), viewport.y + margin),
            SpawnEdge::Left => Vec2::new(-margin, random_coord(rng, viewport.y)),
            SpawnEdge::Right => Vec2::new(viewport.x + margin, random_coord(rng, viewport.y)),
        }
    }
}

/// Whole-unit coordinate in [0, extent]
fn random_coord(rng: &mut impl Rng, extent: f32) -> f32 {
    rng.random_range(0..=extent.max(0.0) as i32) as f32
}

/// Spawn schedule and difficulty state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Spawner {
    /// Current spawn period (ms)
    pub delay_ms: f32,
    /// Enemies per firing, before truncation
    pub multiplier: f32,
    /// Play time since the last escalation (ms)
    pub elapsed_ms: f32,
    timer: Option<TimerId>,
}

impl Spawner {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            delay_ms: tuning.spawn_delay_ms,
            multiplier: 1.0,
            elapsed_ms: 0.0,
            timer: None,
        }
    }

    /// Whether a spawn timer is currently armed
    pub fn is_running(&self) -> bool {
        self.timer.is_some()
    }

    /// Arm the repeating spawn timer at the current delay
    pub fn start(&mut self, timers: &mut Timers) {
        self.timer = Some(timers.add_repeating(self.delay_ms, TimerEvent::SpawnWave));
    }

    /// Forget the spawn timer. The caller cancels it in the scheduler.
    pub fn stop(&mut self) {
        self.timer = None;
    }

    /// Cancel everything pending and re-arm at the current delay.
    /// Difficulty is kept, not reset.
    pub fn restart(&mut self, timers: &mut Timers) {
        timers.remove_all();
        self.start(timers);
    }

    /// Accumulate play time and step difficulty when the interval is reached.
    /// Returns true if an escalation happened.
    pub fn escalate(&mut self, dt_ms: f32, tuning: &Tuning, timers: &mut Timers) -> bool {
        self.elapsed_ms += dt_ms;
        if self.elapsed_ms < tuning.escalation_interval_ms {
            return false;
        }

        self.elapsed_ms = 0.0;
        self.delay_ms = (self.delay_ms - tuning.spawn_delay_step_ms).max(tuning.min_spawn_delay_ms);
        self.multiplier += tuning.spawn_multiplier_step;
        if let Some(timer) = self.timer {
            timers.set_period(timer, self.delay_ms);
        }
        log::debug!(
            "Difficulty up: delay {}ms, multiplier {}",
            self.delay_ms,
            self.multiplier
        );
        true
    }

    /// Enemies spawned per firing
    pub fn batch_size(&self) -> usize {
        self.multiplier.floor().max(0.0) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_single_escalation() {
        let tuning = Tuning::default();
        let mut timers = Timers::new();
        let mut spawner = Spawner::new(&tuning);
        spawner.start(&mut timers);

        assert!(!spawner.escalate(4999.0, &tuning, &mut timers));
        assert!(spawner.escalate(1.0, &tuning, &mut timers));
        assert_eq!(spawner.delay_ms, 1800.0);
        assert_eq!(spawner.multiplier, 1.5);
        assert_eq!(spawner.batch_size(), 1);
        assert_eq!(spawner.elapsed_ms, 0.0);
    }

    #[test]
    fn test_delay_floor() {
        let tuning = Tuning::default();
        let mut timers = Timers::new();
        let mut spawner = Spawner::new(&tuning);
        for _ in 0..20 {
            spawner.escalate(5000.0, &tuning, &mut timers);
        }
        assert_eq!(spawner.delay_ms, 200.0);
        assert_eq!(spawner.multiplier, 11.0);
        assert_eq!(spawner.batch_size(), 11);
    }

    #[test]
    fn test_escalation_retunes_live_timer() {
        let tuning = Tuning::default();
        let mut timers = Timers::new();
        let mut spawner = Spawner::new(&tuning);
        spawner.start(&mut timers);
        spawner.escalate(5000.0, &tuning, &mut timers);
        assert_eq!(timers.len(), 1);
        // First cycle was armed at 2000 and runs out; next one uses 1800
        assert_eq!(timers.advance(2000.0).len(), 1);
        assert!(timers.advance(1799.0).is_empty());
        assert_eq!(timers.advance(1.0).len(), 1);
    }

    #[test]
    fn test_restart_keeps_difficulty_and_single_timer() {
        let tuning = Tuning::default();
        let mut timers = Timers::new();
        let mut spawner = Spawner::new(&tuning);
        spawner.start(&mut timers);
        spawner.escalate(5000.0, &tuning, &mut timers);
        spawner.restart(&mut timers);
        spawner.restart(&mut timers);
        assert_eq!(timers.len(), 1);
        assert_eq!(spawner.delay_ms, 1800.0);
        assert_eq!(spawner.multiplier, 1.5);
    }

    #[test]
    fn test_spawn_points_sit_outside_view() {
        let mut rng = Pcg32::seed_from_u64(7);
        let viewport = Vec2::new(800.0, 600.0);
        for _ in 0..200 {
            let edge = SpawnEdge::random(&mut rng);
            let p = edge.point(&mut rng, viewport, 50.0);
            match edge {
                SpawnEdge::Top => assert!(p.y == -50.0 && (0.0..=800.0).contains(&p.x)),
                SpawnEdge::Bottom => assert!(p.y == 650.0 && (0.0..=800.0).contains(&p.x)),
                SpawnEdge::Left => assert!(p.x == -50.0 && (0.0..=600.0).contains(&p.y)),
                SpawnEdge::Right => assert!(p.x == 850.0 && (0.0..=600.0).contains(&p.y)),
            }
        }
    }

    #[test]
    fn test_all_edges_reachable() {
        let mut rng = Pcg32::seed_from_u64(1);
        let edges: Vec<_> = (0..100).map(|_| SpawnEdge::random(&mut rng)).collect();
        for edge in [SpawnEdge::Top, SpawnEdge::Bottom, SpawnEdge::Left, SpawnEdge::Right] {
            assert!(edges.contains(&edge));
        }
    }

    proptest! {
        #[test]
        fn prop_difficulty_is_monotonic(dts in proptest::collection::vec(0.0f32..3000.0, 1..200)) {
            let tuning = Tuning::default();
            let mut timers = Timers::new();
            let mut spawner = Spawner::new(&tuning);
            spawner.start(&mut timers);
            let (mut delay, mut mult) = (spawner.delay_ms, spawner.multiplier);
            for dt in dts {
                spawner.escalate(dt, &tuning, &mut timers);
                prop_assert!(spawner.delay_ms <= delay);
                prop_assert!(spawner.delay_ms >= 200.0);
                prop_assert!(spawner.multiplier >= mult);
                delay = spawner.delay_ms;
                mult = spawner.multiplier;
            }
        }
    }
}
