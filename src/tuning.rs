//! Data-driven game balance
//!
//! All tuning is supplied once when a session is built. Every section has
//! defaults from [`crate::consts`], so a JSON file only needs the values it
//! overrides. Validation happens eagerly; a config that passes
//! [`GameConfig::validate`] cannot produce undefined cooldown or charge math.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{ConfigError, non_negative, positive};

/// Visible play area (camera viewport)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewTuning {
    pub width: f32,
    pub height: f32,
}

impl Default for ViewTuning {
    fn default() -> Self {
        Self {
            width: VIEW_WIDTH,
            height: VIEW_HEIGHT,
        }
    }
}

/// Player ship movement and life settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    /// Pixels per second
    pub speed: f32,
    /// Spawn x, relative to the camera's left edge
    pub spawn_x: f32,
    pub lives: u32,
    pub respawn_delay_ms: f32,
    pub clamp_padding_x: f32,
    pub clamp_padding_y: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            speed: PLAYER_SPEED,
            spawn_x: PLAYER_SPAWN_X,
            lives: PLAYER_LIVES,
            respawn_delay_ms: RESPAWN_DELAY_MS,
            clamp_padding_x: CAMERA_CLAMP_PADDING_X,
            clamp_padding_y: CAMERA_CLAMP_PADDING_Y,
        }
    }
}

/// Normal shot settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BulletTuning {
    pub speed: f32,
    /// Minimum time between volleys (0 = every tick)
    pub cooldown_ms: f32,
    pub spawn_offset_x: f32,
    pub cull_padding: f32,
}

impl Default for BulletTuning {
    fn default() -> Self {
        Self {
            speed: BULLET_SPEED,
            cooldown_ms: BULLET_COOLDOWN_MS,
            spawn_offset_x: BULLET_SPAWN_OFFSET_X,
            cull_padding: BULLET_CULL_PADDING,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyTuning {
    /// Leftward speed, pixels per second
    pub speed: f32,
    pub spawn_offset_x: f32,
    pub max_health: u32,
    pub cull_padding: f32,
}

impl Default for EnemyTuning {
    fn default() -> Self {
        Self {
            speed: ENEMY_SPEED,
            spawn_offset_x: ENEMY_SPAWN_OFFSET_X,
            max_health: ENEMY_MAX_HEALTH,
            cull_padding: ENEMY_CULL_PADDING,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BeamTuning {
    pub speed: f32,
    /// Lifetime before the beam is switched off
    pub duration_ms: f32,
    pub width: f32,
}

impl Default for BeamTuning {
    fn default() -> Self {
        Self {
            speed: BEAM_SPEED,
            duration_ms: BEAM_DURATION_MS,
            width: BEAM_WIDTH,
        }
    }
}

/// Charge weapon timing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChargeConfig {
    /// Hold time before charge starts accumulating
    pub start_ms: f32,
    /// Charge needed for levels 1, 2 and 3
    pub thresholds_ms: [f32; 3],
    pub beam_cooldown_ms: f32,
}

impl Default for ChargeConfig {
    fn default() -> Self {
        Self {
            start_ms: CHARGE_START_MS,
            thresholds_ms: CHARGE_THRESHOLDS_MS,
            beam_cooldown_ms: BEAM_COOLDOWN_MS,
        }
    }
}

impl ChargeConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative("charge.start_ms", self.start_ms)?;
        non_negative("charge.beam_cooldown_ms", self.beam_cooldown_ms)?;
        let [t1, t2, t3] = self.thresholds_ms;
        let ordered = t1.is_finite() && t3.is_finite() && t1 >= 0.0 && t1 < t2 && t2 < t3;
        if !ordered {
            return Err(ConfigError::ThresholdOrder(self.thresholds_ms));
        }
        Ok(())
    }
}

/// Drone placement relative to the player
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DroneOffsets {
    pub front_x: f32,
    pub rear_x: f32,
    pub detached_x: f32,
    pub offset_y: f32,
}

impl Default for DroneOffsets {
    fn default() -> Self {
        Self {
            front_x: DRONE_FRONT_OFFSET_X,
            rear_x: DRONE_REAR_OFFSET_X,
            detached_x: DRONE_DETACHED_OFFSET_X,
            offset_y: DRONE_OFFSET_Y,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DroneConfig {
    pub offsets: DroneOffsets,
    /// Fraction of the remaining distance covered per tick while detached
    pub follow_lerp: f32,
    pub bullet_offset_x: f32,
}

impl Default for DroneConfig {
    fn default() -> Self {
        Self {
            offsets: DroneOffsets::default(),
            follow_lerp: DRONE_FOLLOW_LERP,
            bullet_offset_x: DRONE_BULLET_OFFSET_X,
        }
    }
}

impl DroneConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_follow_lerp(self.follow_lerp)
    }
}

pub(crate) fn validate_follow_lerp(follow_lerp: f32) -> Result<(), ConfigError> {
    if follow_lerp > 0.0 && follow_lerp <= 1.0 {
        Ok(())
    } else {
        Err(ConfigError::FollowLerp(follow_lerp))
    }
}

/// Push-back applied to enemies that touch the drone
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KnockbackTuning {
    pub speed_x: f32,
    pub duration_ms: f32,
}

impl Default for KnockbackTuning {
    fn default() -> Self {
        Self {
            speed_x: KNOCKBACK_SPEED_X,
            duration_ms: KNOCKBACK_DURATION_MS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreTuning {
    pub enemy_kill: u64,
}

impl Default for ScoreTuning {
    fn default() -> Self {
        Self {
            enemy_kill: ENEMY_KILL_SCORE,
        }
    }
}

/// One scripted enemy group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaveSpec {
    pub id: String,
    /// Camera scroll position that releases the wave
    pub trigger_x: f32,
    /// One enemy per entry, in spawn order
    pub y_positions: Vec<f32>,
    /// Horizontal gap between consecutive enemies
    pub spacing_x: f32,
}

impl WaveSpec {
    pub fn new(id: &str, trigger_x: f32, y_positions: &[f32], spacing_x: f32) -> Self {
        Self {
            id: id.to_string(),
            trigger_x,
            y_positions: y_positions.to_vec(),
            spacing_x,
        }
    }
}

/// Stage scroll, checkpoints and wave script
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StageConfig {
    /// Camera scroll speed, pixels per second
    pub scroll_speed: f32,
    /// Scroll position that clears the stage
    pub end_x: f32,
    /// Ascending scroll positions
    pub checkpoints: Vec<f32>,
    /// Wave script; order here is spawn order within a tick
    pub waves: Vec<WaveSpec>,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            scroll_speed: STAGE_SCROLL_SPEED,
            end_x: STAGE_END_X,
            checkpoints: STAGE_CHECKPOINTS.to_vec(),
            waves: default_wave_script(),
        }
    }
}

impl StageConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative("stage.scroll_speed", self.scroll_speed)?;
        non_negative("stage.end_x", self.end_x)?;

        let Some(&first) = self.checkpoints.first() else {
            return Err(ConfigError::NoCheckpoints);
        };
        non_negative("stage.checkpoints", first)?;
        for pair in self.checkpoints.windows(2) {
            let (prev, next) = (pair[0], pair[1]);
            if !next.is_finite() || next < prev {
                return Err(ConfigError::CheckpointOrder { prev, next });
            }
        }

        let mut ids = BTreeSet::new();
        for wave in &self.waves {
            non_negative("wave.trigger_x", wave.trigger_x)?;
            non_negative("wave.spacing_x", wave.spacing_x)?;
            if !ids.insert(wave.id.as_str()) {
                return Err(ConfigError::DuplicateWave(wave.id.clone()));
            }
        }
        Ok(())
    }
}

/// Periodic random-height spawner that runs alongside the wave script
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnerConfig {
    pub interval_ms: f32,
    /// Keep spawns this far from the top and bottom edges
    pub padding_y: f32,
    /// Spawn this far past the camera's right edge
    pub offset_x: f32,
}

impl Default for SpawnerConfig {
    fn default() -> Self {
        Self {
            interval_ms: ENEMY_SPAWN_INTERVAL_MS,
            padding_y: ENEMY_SPAWN_PADDING_Y,
            offset_x: ENEMY_SPAWN_OFFSET_X,
        }
    }
}

impl SpawnerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let interval_ok = self.interval_ms.is_finite() && self.interval_ms >= MIN_SPAWN_INTERVAL_MS;
        if !interval_ok {
            return Err(ConfigError::SpawnInterval {
                min: MIN_SPAWN_INTERVAL_MS,
                value: self.interval_ms,
            });
        }
        non_negative("spawner.padding_y", self.padding_y)
    }
}

/// Complete session configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub view: ViewTuning,
    pub player: PlayerTuning,
    pub bullet: BulletTuning,
    pub enemy: EnemyTuning,
    pub beam: BeamTuning,
    pub charge: ChargeConfig,
    pub drone: DroneConfig,
    pub knockback: KnockbackTuning,
    pub score: ScoreTuning,
    pub stage: StageConfig,
    /// Off by default; the wave script is the only enemy source
    pub ambient_spawner: Option<SpawnerConfig>,
}

impl GameConfig {
    /// Parse and validate a JSON config (missing keys keep their defaults)
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        log::info!(
            "Loaded config: {} waves, {} checkpoints, end at {}",
            config.stage.waves.len(),
            config.stage.checkpoints.len(),
            config.stage.end_x
        );
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("view.width", self.view.width)?;
        positive("view.height", self.view.height)?;

        non_negative("player.speed", self.player.speed)?;
        non_negative("player.respawn_delay_ms", self.player.respawn_delay_ms)?;
        non_negative("player.clamp_padding_x", self.player.clamp_padding_x)?;
        non_negative("player.clamp_padding_y", self.player.clamp_padding_y)?;
        if self.player.lives == 0 {
            return Err(ConfigError::NoLives);
        }

        non_negative("bullet.speed", self.bullet.speed)?;
        non_negative("bullet.cooldown_ms", self.bullet.cooldown_ms)?;
        non_negative("bullet.cull_padding", self.bullet.cull_padding)?;

        non_negative("enemy.speed", self.enemy.speed)?;
        non_negative("enemy.cull_padding", self.enemy.cull_padding)?;

        non_negative("beam.speed", self.beam.speed)?;
        non_negative("beam.duration_ms", self.beam.duration_ms)?;
        non_negative("beam.width", self.beam.width)?;

        non_negative("knockback.duration_ms", self.knockback.duration_ms)?;

        self.charge.validate()?;
        self.drone.validate()?;
        self.stage.validate()?;
        if let Some(spawner) = &self.ambient_spawner {
            spawner.validate()?;
        }
        Ok(())
    }
}

/// Built-in stage 1 wave script
pub fn default_wave_script() -> Vec<WaveSpec> {
    vec![
        WaveSpec::new("opening", 200.0, &[180.0, 270.0, 360.0], 48.0),
        WaveSpec::new("pincer", 650.0, &[120.0, 420.0], 0.0),
        WaveSpec::new("column", 1000.0, &[200.0, 240.0, 280.0, 320.0], 36.0),
        WaveSpec::new("checkpoint-rush", 1350.0, &[270.0, 270.0, 270.0], 60.0),
        WaveSpec::new("stagger", 1800.0, &[140.0, 400.0, 200.0, 340.0], 52.0),
        WaveSpec::new("wall", 2250.0, &[100.0, 180.0, 260.0, 340.0, 420.0], 0.0),
        WaveSpec::new("finale", 2700.0, &[160.0, 270.0, 380.0], 40.0),
        WaveSpec::new("last-stand", 3200.0, &[220.0, 320.0], 64.0),
    ]
}
