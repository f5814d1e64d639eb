//! Fire-rate gating for the normal shot

use serde::{Deserialize, Serialize};

/// True when at least `cooldown_ms` has passed since `last_fire_ms`.
/// A zero or negative cooldown always permits firing.
#[inline]
pub fn can_fire(now_ms: f64, last_fire_ms: f64, cooldown_ms: f64) -> bool {
    if cooldown_ms <= 0.0 {
        return true;
    }
    now_ms - last_fire_ms >= cooldown_ms
}

/// Last-fire bookkeeping around [`can_fire`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponSystem {
    cooldown_ms: f64,
    last_fire_ms: f64,
}

impl WeaponSystem {
    pub fn new(cooldown_ms: f64) -> Self {
        Self {
            cooldown_ms,
            // First attempt always passes
            last_fire_ms: -cooldown_ms,
        }
    }

    pub fn reset(&mut self) {
        self.last_fire_ms = -self.cooldown_ms;
    }

    /// Run `effect` once if firing is requested and the cooldown allows it.
    /// Spawning is the caller's job; this only gates timing.
    pub fn try_fire<F: FnOnce()>(&mut self, now_ms: f64, is_firing: bool, effect: F) -> bool {
        if !is_firing {
            return false;
        }
        if !can_fire(now_ms, self.last_fire_ms, self.cooldown_ms) {
            return false;
        }
        self.last_fire_ms = now_ms;
        effect();
        true
    }

    pub fn cooldown_ms(&self) -> f64 {
        self.cooldown_ms
    }

    pub fn last_fire_ms(&self) -> f64 {
        self.last_fire_ms
    }
}
