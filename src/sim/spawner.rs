//! Periodic enemy spawner
//!
//! Runs alongside the wave script when a session enables it. Spawn heights
//! come from the session's seeded RNG so runs stay reproducible.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::MIN_SPAWN_INTERVAL_MS;
use crate::tuning::{SpawnerConfig, ViewTuning};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntervalSpawner {
    config: SpawnerConfig,
    active: bool,
    elapsed_ms: f32,
}

impl IntervalSpawner {
    /// Created stopped; call [`IntervalSpawner::start`]
    pub fn new(config: SpawnerConfig) -> Self {
        Self {
            config,
            active: false,
            elapsed_ms: 0.0,
        }
    }

    pub fn start(&mut self) {
        self.active = true;
        self.elapsed_ms = 0.0;
    }

    pub fn stop(&mut self) {
        self.active = false;
        self.elapsed_ms = 0.0;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Spawn points for every whole interval elapsed, just past the right edge
    pub fn update<R: Rng>(
        &mut self,
        delta_ms: f32,
        scroll_x: f32,
        view: &ViewTuning,
        rng: &mut R,
    ) -> Vec<Vec2> {
        let mut spawns = Vec::new();
        // IntervalSpawner::new does not validate; NaN also fails this check
        let interval_ok = self.config.interval_ms >= MIN_SPAWN_INTERVAL_MS;
        if !self.active || !interval_ok {
            return spawns;
        }

        self.elapsed_ms += delta_ms.max(0.0);

        let min_y = self.config.padding_y.round() as i32;
        let max_y = ((view.height - self.config.padding_y).round() as i32).max(min_y);
        let x = scroll_x + view.width + self.config.offset_x;

        while self.elapsed_ms >= self.config.interval_ms {
            self.elapsed_ms -= self.config.interval_ms;
            let y = rng.random_range(min_y..=max_y);
            spawns.push(Vec2::new(x, y as f32));
        }
        spawns
    }
}
