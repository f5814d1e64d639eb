//! Scroll-driven checkpoints and one-shot wave triggers

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::tuning::{StageConfig, WaveSpec};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageController {
    config: StageConfig,
    /// Waves already released since the last checkpoint reset
    triggered: BTreeSet<String>,
    checkpoint_index: usize,
}

impl StageController {
    pub fn new(config: StageConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            triggered: BTreeSet::new(),
            checkpoint_index: 0,
        })
    }

    pub fn scroll_speed(&self) -> f32 {
        self.config.scroll_speed
    }

    pub fn end_x(&self) -> f32 {
        self.config.end_x
    }

    pub fn checkpoint_index(&self) -> usize {
        self.checkpoint_index
    }

    pub fn checkpoint_x(&self) -> f32 {
        self.config
            .checkpoints
            .get(self.checkpoint_index)
            .copied()
            .unwrap_or(0.0)
    }

    pub fn is_triggered(&self, wave_id: &str) -> bool {
        self.triggered.contains(wave_id)
    }

    pub fn config(&self) -> &StageConfig {
        &self.config
    }

    /// Advance to `scroll_x` and return the waves to spawn now, in script order
    pub fn update(&mut self, scroll_x: f32) -> Vec<WaveSpec> {
        self.update_checkpoint(scroll_x);

        let mut to_spawn = Vec::new();
        for wave in &self.config.waves {
            if scroll_x >= wave.trigger_x && !self.triggered.contains(&wave.id) {
                self.triggered.insert(wave.id.clone());
                to_spawn.push(wave.clone());
            }
        }
        to_spawn
    }

    /// Rewind to a checkpoint: waves at or before it stay spent, later ones re-arm
    pub fn reset_to_checkpoint(&mut self, index: usize) {
        self.checkpoint_index = index.min(self.config.checkpoints.len().saturating_sub(1));
        let checkpoint_x = self.checkpoint_x();
        self.triggered = self
            .config
            .waves
            .iter()
            .filter(|wave| wave.trigger_x <= checkpoint_x)
            .map(|wave| wave.id.clone())
            .collect();
    }

    /// Highest checkpoint at or below `scroll_x`; unchanged if none is reached
    fn update_checkpoint(&mut self, scroll_x: f32) {
        if let Some(index) = self
            .config
            .checkpoints
            .iter()
            .rposition(|&checkpoint| scroll_x >= checkpoint)
        {
            self.checkpoint_index = index;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn stage() -> StageController {
        StageController::new(StageConfig {
            scroll_speed: 60.0,
            end_x: 3600.0,
            checkpoints: vec![0.0, 1200.0, 2400.0],
            waves: vec![
                WaveSpec::new("a", 100.0, &[100.0], 0.0),
                WaveSpec::new("c", 900.0, &[300.0, 320.0], 20.0),
                WaveSpec::new("b", 700.0, &[200.0], 0.0),
                WaveSpec::new("d", 1200.0, &[250.0], 0.0),
                WaveSpec::new("e", 1500.0, &[260.0], 0.0),
            ],
        })
        .unwrap()
    }

    fn ids(waves: &[WaveSpec]) -> Vec<&str> {
        waves.iter().map(|w| w.id.as_str()).collect()
    }

    #[test]
    fn test_picks_highest_reached_checkpoint() {
        let mut stage = stage();
        stage.update(1800.0);
        assert_eq!(stage.checkpoint_index(), 1);
        assert_eq!(stage.checkpoint_x(), 1200.0);

        // Exact equality counts as reached
        stage.update(2400.0);
        assert_eq!(stage.checkpoint_index(), 2);
    }

    #[test]
    fn test_waves_fire_once() {
        let mut stage = stage();
        assert!(stage.update(50.0).is_empty());
        assert_eq!(ids(&stage.update(100.0)), ["a"]);
        assert!(stage.update(100.0).is_empty());
        assert!(stage.update(150.0).is_empty());
    }

    #[test]
    fn test_same_tick_waves_follow_script_order() {
        let mut stage = stage();
        // "c" is declared before "b" even though it triggers later
        assert_eq!(ids(&stage.update(1000.0)), ["a", "c", "b"]);
    }

    #[test]
    fn test_reset_rearms_waves_past_checkpoint() {
        let mut stage = stage();
        stage.update(1600.0);
        assert_eq!(stage.checkpoint_index(), 1);
        assert!(stage.is_triggered("e"));

        stage.reset_to_checkpoint(stage.checkpoint_index());
        // At-or-before the checkpoint stay spent, including the one exactly on it
        for id in ["a", "b", "c", "d"] {
            assert!(stage.is_triggered(id), "{id} should stay spent");
        }
        assert!(!stage.is_triggered("e"));

        assert!(stage.update(1200.0).is_empty());
        assert_eq!(ids(&stage.update(1500.0)), ["e"]);
    }

    #[test]
    fn test_reset_clamps_index() {
        let mut stage = stage();
        stage.reset_to_checkpoint(99);
        assert_eq!(stage.checkpoint_index(), 2);
        assert_eq!(stage.checkpoint_x(), 2400.0);
        assert!(stage.is_triggered("e"));
    }

    #[test]
    fn test_accessors() {
        let stage = stage();
        assert_eq!(stage.scroll_speed(), 60.0);
        assert_eq!(stage.end_x(), 3600.0);
        assert_eq!(stage.checkpoint_index(), 0);
        assert_eq!(stage.checkpoint_x(), 0.0);
    }

    #[test]
    fn test_checkpoint_kept_before_first() {
        let mut stage = StageController::new(StageConfig {
            checkpoints: vec![500.0, 1000.0],
            waves: Vec::new(),
            ..Default::default()
        })
        .unwrap();
        stage.update(100.0);
        assert_eq!(stage.checkpoint_index(), 0);
        assert_eq!(stage.checkpoint_x(), 500.0);
    }

    proptest! {
        #[test]
        fn prop_no_wave_twice(steps in proptest::collection::vec(0.0f32..200.0, 1..60)) {
            let mut stage = stage();
            let mut scroll = 0.0;
            let mut seen = BTreeSet::new();
            for step in steps {
                scroll += step;
                for wave in stage.update(scroll) {
                    prop_assert!(seen.insert(wave.id.clone()), "wave {} fired twice", wave.id);
                }
            }
        }

        #[test]
        fn prop_checkpoint_is_highest_reached(scroll in 0.0f32..4000.0) {
            let mut stage = stage();
            stage.update(scroll);
            let expected = [0.0, 1200.0, 2400.0]
                .iter()
                .rposition(|&c| scroll >= c)
                .unwrap_or(0);
            prop_assert_eq!(stage.checkpoint_index(), expected);
        }
    }
}
