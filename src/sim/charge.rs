//! Charge weapon state machine
//!
//! Holding fire first counts toward `start_ms`; only after that does charge
//! accumulate. Letting go of the key drops the hold time but keeps the charge
//! built so far until [`ChargeController::release`] consumes it, which allows
//! pulsed charging. The beam cooldown ticks down on every update, held or not.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::tuning::ChargeConfig;

/// Highest charge level
pub const MAX_CHARGE_LEVEL: u8 = 3;

/// Result of releasing the fire key
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChargeState {
    /// Charge accumulated before the release
    pub charge_ms: f32,
    /// 0..=3
    pub level: u8,
    pub can_fire_beam: bool,
}

/// Floor at zero, ceiling at `max_ms`
#[inline]
pub fn clamp_charge(charge_ms: f32, max_ms: f32) -> f32 {
    if charge_ms < 0.0 {
        return 0.0;
    }
    charge_ms.min(max_ms)
}

/// Discrete level for an amount of charge
pub fn charge_level(charge_ms: f32, thresholds_ms: &[f32; 3]) -> u8 {
    if charge_ms >= thresholds_ms[2] {
        3
    } else if charge_ms >= thresholds_ms[1] {
        2
    } else if charge_ms >= thresholds_ms[0] {
        1
    } else {
        0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChargeController {
    config: ChargeConfig,
    charge_ms: f32,
    hold_ms: f32,
    charging: bool,
    beam_cooldown_remaining: f32,
}

impl ChargeController {
    pub fn new(config: ChargeConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            charge_ms: 0.0,
            hold_ms: 0.0,
            charging: false,
            beam_cooldown_remaining: 0.0,
        })
    }

    /// Hard reset, including the beam cooldown (used on respawn)
    pub fn reset(&mut self) {
        self.charge_ms = 0.0;
        self.hold_ms = 0.0;
        self.charging = false;
        self.beam_cooldown_remaining = 0.0;
    }

    /// Advance by `delta_ms` with the fire key held or not
    pub fn update(&mut self, delta_ms: f32, is_held: bool) {
        let delta_ms = delta_ms.max(0.0);

        if self.beam_cooldown_remaining > 0.0 {
            self.beam_cooldown_remaining = (self.beam_cooldown_remaining - delta_ms).max(0.0);
        }

        if is_held {
            self.hold_ms += delta_ms;
            if self.hold_ms >= self.config.start_ms {
                self.charging = true;
                let max_ms = self.config.thresholds_ms[2];
                self.charge_ms = clamp_charge(self.charge_ms + delta_ms, max_ms);
            }
        } else {
            self.hold_ms = 0.0;
            self.charging = false;
        }
    }

    /// Consume the charge. Starts the beam cooldown only when a beam fires.
    pub fn release(&mut self) -> ChargeState {
        let level = charge_level(self.charge_ms, &self.config.thresholds_ms);
        let can_fire_beam = self.charging && level >= 1 && self.beam_cooldown_remaining == 0.0;

        if can_fire_beam {
            self.beam_cooldown_remaining = self.config.beam_cooldown_ms;
        }

        let result = ChargeState {
            charge_ms: self.charge_ms,
            level,
            can_fire_beam,
        };

        self.charge_ms = 0.0;
        self.hold_ms = 0.0;
        self.charging = false;
        result
    }

    pub fn charge_ms(&self) -> f32 {
        self.charge_ms
    }

    pub fn charge_level(&self) -> u8 {
        charge_level(self.charge_ms, &self.config.thresholds_ms)
    }

    pub fn is_charging(&self) -> bool {
        self.charging
    }

    pub fn hold_ms(&self) -> f32 {
        self.hold_ms
    }

    pub fn cooldown_remaining_ms(&self) -> f32 {
        self.beam_cooldown_remaining
    }

    pub fn config(&self) -> &ChargeConfig {
        &self.config
    }
}
