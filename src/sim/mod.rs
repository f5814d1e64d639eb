//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering, input polling or collision detection

pub mod charge;
pub mod cooldown;
pub mod drone;
pub mod lives;
pub mod spawner;
pub mod stage;
pub mod state;
pub mod tick;
pub mod timeline;

pub use charge::{ChargeController, ChargeState, MAX_CHARGE_LEVEL, charge_level, clamp_charge};
pub use cooldown::{WeaponSystem, can_fire};
pub use drone::{DroneController, DroneState};
pub use lives::{LifeResult, apply_player_death};
pub use spawner::IntervalSpawner;
pub use stage::StageController;
pub use state::{Beam, Bullet, Drone, Enemy, GameEvent, GamePhase, GameState, HudSnapshot, Player};
pub use tick::{Collision, TickInput, tick};
pub use timeline::{TimedEffect, Timeline};
