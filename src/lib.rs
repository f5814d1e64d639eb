//! Side Striker - A side-scrolling arcade shooter core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (weapons, drone, stage, lives, session tick)
//! - `tuning`: Data-driven game balance
//! - `error`: Configuration errors raised at construction time
//!
//! Rendering, physics bodies, input polling and collision detection live
//! outside this crate. The host feeds [`sim::TickInput`], elapsed time and
//! [`sim::Collision`] events into [`sim::tick`] and applies the returned
//! [`sim::GameEvent`]s.

pub mod error;
pub mod sim;
pub mod tuning;

pub use error::ConfigError;
pub use tuning::GameConfig;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz), in milliseconds
    pub const SIM_DT_MS: f32 = 1000.0 / 60.0;

    /// Visible play area
    pub const VIEW_WIDTH: f32 = 960.0;
    pub const VIEW_HEIGHT: f32 = 540.0;

    /// Player defaults
    pub const PLAYER_SPEED: f32 = 260.0;
    pub const PLAYER_SPAWN_X: f32 = 120.0;
    pub const PLAYER_LIVES: u32 = 3;
    pub const RESPAWN_DELAY_MS: f32 = 1000.0;
    /// Keep the ship this far inside the camera edges
    pub const CAMERA_CLAMP_PADDING_X: f32 = 24.0;
    pub const CAMERA_CLAMP_PADDING_Y: f32 = 16.0;

    /// Normal shot defaults
    pub const BULLET_SPEED: f32 = 520.0;
    pub const BULLET_COOLDOWN_MS: f32 = 160.0;
    pub const BULLET_SPAWN_OFFSET_X: f32 = 20.0;
    pub const BULLET_CULL_PADDING: f32 = 40.0;

    /// Enemy defaults (fixed leftward motion)
    pub const ENEMY_SPEED: f32 = 140.0;
    pub const ENEMY_SPAWN_OFFSET_X: f32 = 40.0;
    pub const ENEMY_MAX_HEALTH: u32 = 1;
    pub const ENEMY_CULL_PADDING: f32 = 60.0;
    pub const ENEMY_SPAWN_INTERVAL_MS: f32 = 1200.0;
    pub const ENEMY_SPAWN_PADDING_Y: f32 = 28.0;
    /// Shortest ambient spawn interval accepted
    pub const MIN_SPAWN_INTERVAL_MS: f32 = 1.0;

    /// Charged beam
    pub const BEAM_SPEED: f32 = 640.0;
    pub const BEAM_DURATION_MS: f32 = 450.0;
    pub const BEAM_WIDTH: f32 = 48.0;
    pub const CHARGE_START_MS: f32 = 300.0;
    pub const CHARGE_THRESHOLDS_MS: [f32; 3] = [400.0, 800.0, 1200.0];
    pub const BEAM_COOLDOWN_MS: f32 = 800.0;

    /// Support drone
    pub const DRONE_FRONT_OFFSET_X: f32 = 40.0;
    pub const DRONE_REAR_OFFSET_X: f32 = -40.0;
    pub const DRONE_DETACHED_OFFSET_X: f32 = 120.0;
    pub const DRONE_OFFSET_Y: f32 = 0.0;
    pub const DRONE_FOLLOW_LERP: f32 = 0.1;
    pub const DRONE_BULLET_OFFSET_X: f32 = 12.0;
    /// Enemies touched by the drone are pushed back to the right
    pub const KNOCKBACK_SPEED_X: f32 = 220.0;
    pub const KNOCKBACK_DURATION_MS: f32 = 240.0;

    /// Score per destroyed enemy
    pub const ENEMY_KILL_SCORE: u64 = 100;

    /// Stage layout
    pub const STAGE_SCROLL_SPEED: f32 = 60.0;
    pub const STAGE_END_X: f32 = 3600.0;
    pub const STAGE_CHECKPOINTS: [f32; 3] = [0.0, 1200.0, 2400.0];
}

/// Linear interpolation between two points
#[inline]
pub fn lerp_vec2(current: Vec2, target: Vec2, t: f32) -> Vec2 {
    current + (target - current) * t
}

/// Unit movement direction from digital input (screen space, +y is down)
#[inline]
pub fn input_direction(up: bool, down: bool, left: bool, right: bool) -> Vec2 {
    let mut dir = Vec2::ZERO;
    if left {
        dir.x -= 1.0;
    }
    if right {
        dir.x += 1.0;
    }
    if up {
        dir.y -= 1.0;
    }
    if down {
        dir.y += 1.0;
    }
    dir.normalize_or_zero()
}
