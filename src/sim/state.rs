//! Session state and entity types
//!
//! Everything a renderer needs to draw a frame, and everything the tick needs
//! to stay deterministic, lives in [`GameState`].

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::charge::ChargeController;
use super::cooldown::WeaponSystem;
use super::drone::{DroneController, DroneState};
use super::spawner::IntervalSpawner;
use super::stage::StageController;
use super::timeline::Timeline;
use crate::error::ConfigError;
use crate::tuning::GameConfig;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Player is down, waiting for the respawn delay
    Respawning,
    /// Out of lives; only restart is accepted
    GameOver,
    /// Reached the end of the stage; only restart is accepted
    StageClear,
}

/// The player's ship
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    /// False while down (hidden, no collisions)
    pub alive: bool,
}

/// The support drone's body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Drone {
    pub pos: Vec2,
    /// Position before the last follow step (used to back out of terrain)
    pub prev_pos: Vec2,
    pub alive: bool,
}

/// A normal shot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bullet {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
}

/// A charged beam (pierces enemies)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Beam {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Charge level it was fired at (1..=3)
    pub level: u8,
}

/// An enemy moving in a straight line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub health: u32,
    /// Currently pushed back by the drone
    #[serde(default)]
    pub knockback: bool,
}

/// Things that happened during a tick, for the host to render or play back
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    BulletFired { id: u32, pos: Vec2, vel: Vec2 },
    BeamFired { id: u32, pos: Vec2, level: u8 },
    BeamExpired { id: u32 },
    DroneCycled { state: DroneState },
    WaveTriggered { wave_id: String, count: usize },
    EnemySpawned { id: u32, pos: Vec2 },
    EnemyDestroyed { id: u32, score: u64 },
    EnemyKnockedBack { id: u32 },
    CheckpointReached { index: usize, x: f32 },
    PlayerDied { lives: u32 },
    PlayerRespawned { pos: Vec2, checkpoint_x: f32 },
    GameOver { score: u64 },
    StageClear { score: u64 },
    Restarted,
}

/// HUD values for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HudSnapshot {
    pub score: u64,
    pub lives: u32,
    pub drone_label: &'static str,
    pub charge_level: u8,
    pub charging: bool,
    pub phase: GamePhase,
}

impl HudSnapshot {
    pub fn charge_label(&self) -> &'static str {
        if self.charging { "CHARGING" } else { "READY" }
    }
}

/// Complete session state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub config: GameConfig,
    pub phase: GamePhase,
    pub score: u64,
    pub lives: u32,
    /// Session clock, sum of all tick deltas
    pub time_ms: f64,
    /// Simulation tick counter
    pub tick_count: u64,
    /// Camera left edge in stage space
    pub scroll_x: f32,
    pub player: Player,
    pub drone: Drone,
    /// Active entities (sorted by id for determinism)
    pub bullets: Vec<Bullet>,
    pub beams: Vec<Beam>,
    pub enemies: Vec<Enemy>,
    pub weapon: WeaponSystem,
    pub charge: ChargeController,
    pub drone_control: DroneController,
    pub stage: StageController,
    pub spawner: Option<IntervalSpawner>,
    pub timeline: Timeline,
    /// Fire key state last tick (release edge detection)
    pub prev_fire_held: bool,
    /// Where the pending respawn will put the camera
    pub pending_checkpoint: usize,
    rng: Pcg32,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Build a session from validated config
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;

        let charge = ChargeController::new(config.charge.clone())?;
        let drone_control = DroneController::new(config.drone.offsets, config.drone.follow_lerp)?;
        let stage = StageController::new(config.stage.clone())?;
        let weapon = WeaponSystem::new(f64::from(config.bullet.cooldown_ms));
        let spawner = config.ambient_spawner.clone().map(|spawner_config| {
            let mut spawner = IntervalSpawner::new(spawner_config);
            spawner.start();
            spawner
        });

        let player_pos = Vec2::new(config.player.spawn_x, config.view.height * 0.5);
        let drone_pos = player_pos
            + Vec2::new(config.drone.offsets.front_x, config.drone.offsets.offset_y);

        log::info!(
            "New session: seed={}, lives={}, {} waves",
            seed,
            config.player.lives,
            config.stage.waves.len()
        );

        Ok(Self {
            seed,
            phase: GamePhase::Playing,
            score: 0,
            lives: config.player.lives,
            time_ms: 0.0,
            tick_count: 0,
            scroll_x: 0.0,
            player: Player {
                pos: player_pos,
                vel: Vec2::ZERO,
                alive: true,
            },
            drone: Drone {
                pos: drone_pos,
                prev_pos: drone_pos,
                alive: true,
            },
            bullets: Vec::new(),
            beams: Vec::new(),
            enemies: Vec::new(),
            weapon,
            charge,
            drone_control,
            stage,
            spawner,
            timeline: Timeline::new(),
            prev_fire_held: false,
            pending_checkpoint: 0,
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
            config,
        })
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn spawn_bullet(&mut self, pos: Vec2) -> u32 {
        let id = self.next_entity_id();
        let vel = Vec2::new(self.config.bullet.speed, 0.0);
        self.bullets.push(Bullet { id, pos, vel });
        id
    }

    pub fn spawn_beam(&mut self, pos: Vec2, level: u8) -> u32 {
        let id = self.next_entity_id();
        let vel = Vec2::new(self.config.beam.speed, 0.0);
        self.beams.push(Beam { id, pos, vel, level });
        id
    }

    pub fn spawn_enemy(&mut self, pos: Vec2) -> u32 {
        let id = self.next_entity_id();
        self.enemies.push(Enemy {
            id,
            pos,
            vel: Vec2::new(-self.config.enemy.speed, 0.0),
            health: self.config.enemy.max_health.max(1),
            knockback: false,
        });
        id
    }

    pub fn enemy(&self, id: u32) -> Option<&Enemy> {
        self.enemies.iter().find(|e| e.id == id)
    }

    /// Remove enemies, bullets and beams (respawn, stage clear)
    pub fn clear_active_entities(&mut self) {
        self.enemies.clear();
        self.bullets.clear();
        self.beams.clear();
    }

    /// Session still accepts gameplay input (not ended)
    pub fn is_running(&self) -> bool {
        matches!(self.phase, GamePhase::Playing | GamePhase::Respawning)
    }

    /// Spawn points from the ambient spawner for this tick (empty when disabled)
    pub fn ambient_spawns(&mut self, delta_ms: f32) -> Vec<Vec2> {
        match self.spawner.as_mut() {
            Some(spawner) => {
                spawner.update(delta_ms, self.scroll_x, &self.config.view, &mut self.rng)
            }
            None => Vec::new(),
        }
    }

    pub fn hud(&self) -> HudSnapshot {
        HudSnapshot {
            score: self.score,
            lives: self.lives,
            drone_label: self.drone_control.state().label(),
            charge_level: self.charge.charge_level(),
            charging: self.charge.is_charging(),
            phase: self.phase,
        }
    }

    /// Ensure entities are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.bullets.sort_by_key(|b| b.id);
        self.beams.sort_by_key(|b| b.id);
        self.enemies.sort_by_key(|e| e.id);
    }
}
