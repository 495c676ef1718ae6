//! Arena Shooter - A top-down arena shooter with a cross-tab room hand-off
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, spawning, combat, game state)
//! - `session`: Main scene / secondary room orchestration
//! - `platform`: Browser collaborators (URL query, secondary window)
//! - `tuning`: Data-driven game balance
//! - `ui`: Floating text labels

pub mod platform;
pub mod session;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use session::Session;
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep in milliseconds (60 Hz)
    pub const SIM_DT_MS: f32 = 1000.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Sprites face "up" while headings are measured from +X, so every
    /// facing is the heading plus a quarter turn.
    pub const FACING_OFFSET: f32 = std::f32::consts::FRAC_PI_2;

    /// Health labels float this far above their body
    pub const LABEL_OFFSET_Y: f32 = 25.0;

    /// Page loaded into the secondary window
    pub const ROOM_PAGE: &str = "room.html";
    /// How often the secondary window is checked for closure
    pub const ROOM_POLL_MS: i32 = 500;
}

/// Heading from `from` to `to` in radians (0 = +X, clockwise in screen space)
#[inline]
pub fn angle_between(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    d.y.atan2(d.x)
}

/// Velocity of magnitude `speed` along heading `angle`
#[inline]
pub fn velocity_from_rotation(angle: f32, speed: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin()) * speed
}

/// Sprite rotation for a given heading
#[inline]
pub fn facing(heading: f32) -> f32 {
    heading + consts::FACING_OFFSET
}

/// Velocity that moves `from` toward `to` at `speed` (zero when already there)
#[inline]
pub fn velocity_toward(from: Vec2, to: Vec2, speed: f32) -> Vec2 {
    (to - from).normalize_or_zero() * speed
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_angle_between_axes() {
        let origin = Vec2::ZERO;
        assert!((angle_between(origin, Vec2::new(10.0, 0.0))).abs() < 1e-6);
        assert!((angle_between(origin, Vec2::new(0.0, 10.0)) - FRAC_PI_2).abs() < 1e-6);
        assert!((angle_between(origin, Vec2::new(-10.0, 0.0)).abs() - PI).abs() < 1e-6);
    }

    #[test]
    fn test_velocity_from_rotation_magnitude() {
        let v = velocity_from_rotation(0.7, 500.0);
        assert!((v.length() - 500.0).abs() < 1e-3);
    }

    #[test]
    fn test_facing_adds_quarter_turn() {
        assert!((facing(0.0) - FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn test_velocity_toward_same_point_is_zero() {
        let p = Vec2::new(3.0, 4.0);
        assert_eq!(velocity_toward(p, p, 100.0), Vec2::ZERO);
        let v = velocity_toward(Vec2::ZERO, Vec2::new(3.0, 4.0), 100.0);
        assert!((v - Vec2::new(60.0, 80.0)).length() < 1e-3);
    }
}
