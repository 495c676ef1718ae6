//! Repeating timed events, advanced by simulation time
//!
//! Timers fire between the player update and combat within a tick, never
//! in the middle of either.

use serde::{Deserialize, Serialize};

/// What a timer does when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerEvent {
    /// Spawn a batch of enemies
    SpawnWave,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerId(u32);

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Timer {
    id: TimerId,
    event: TimerEvent,
    period_ms: f32,
    remaining_ms: f32,
}

/// Shortest allowed period; keeps `advance` from spinning
const MIN_PERIOD_MS: f32 = 1.0;

/// Scheduler for repeating timers
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Timers {
    timers: Vec<Timer>,
    next_id: u32,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `event` every `period_ms`, first firing one period from now
    pub fn add_repeating(&mut self, period_ms: f32, event: TimerEvent) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        let period_ms = period_ms.max(MIN_PERIOD_MS);
        self.timers.push(Timer {
            id,
            event,
            period_ms,
            remaining_ms: period_ms,
        });
        id
    }

    /// Change a timer's period from its next cycle on. Unknown ids are ignored.
    pub fn set_period(&mut self, id: TimerId, period_ms: f32) {
        if let Some(timer) = self.timers.iter_mut().find(|t| t.id == id) {
            timer.period_ms = period_ms.max(MIN_PERIOD_MS);
        }
    }

    pub fn period(&self, id: TimerId) -> Option<f32> {
        self.timers.iter().find(|t| t.id == id).map(|t| t.period_ms)
    }

    /// Cancel every pending timer
    pub fn remove_all(&mut self) {
        self.timers.clear();
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Advance all timers by `dt_ms`, returning fired events in order
    pub fn advance(&mut self, dt_ms: f32) -> Vec<TimerEvent> {
        let mut fired = Vec::new();
        for timer in &mut self.timers {
            timer.remaining_ms -= dt_ms;
            while timer.remaining_ms <= 0.0 {
                fired.push(timer.event);
                timer.remaining_ms += timer.period_ms;
            }
        }
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeating_fires_each_period() {
        let mut timers = Timers::new();
        timers.add_repeating(100.0, TimerEvent::SpawnWave);
        assert!(timers.advance(99.0).is_empty());
        assert_eq!(timers.advance(1.0), vec![TimerEvent::SpawnWave]);
        assert!(timers.advance(50.0).is_empty());
        // Due at 200, 300 and 400
        assert_eq!(timers.advance(250.0).len(), 3);
    }

    #[test]
    fn test_set_period_applies_next_cycle() {
        let mut timers = Timers::new();
        let id = timers.add_repeating(100.0, TimerEvent::SpawnWave);
        timers.advance(40.0);
        timers.set_period(id, 50.0);
        // Current cycle still runs out at 100
        assert!(timers.advance(59.0).is_empty());
        assert_eq!(timers.advance(1.0).len(), 1);
        assert_eq!(timers.advance(50.0).len(), 1);
        assert_eq!(timers.period(id), Some(50.0));
    }

    #[test]
    fn test_remove_all_cancels() {
        let mut timers = Timers::new();
        timers.add_repeating(10.0, TimerEvent::SpawnWave);
        timers.add_repeating(20.0, TimerEvent::SpawnWave);
        timers.remove_all();
        assert!(timers.is_empty());
        assert!(timers.advance(1000.0).is_empty());
    }
}
