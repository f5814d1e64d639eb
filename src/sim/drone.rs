//! Support drone attachment cycle

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::lerp_vec2;
use crate::tuning::{DroneOffsets, validate_follow_lerp};

/// Drone attachment mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DroneState {
    /// Locked in front of the ship
    #[default]
    AttachedFront,
    /// Locked behind the ship
    AttachedRear,
    /// Trails a point ahead of the ship with smoothing
    Detached,
}

impl DroneState {
    /// Next state in the Front -> Rear -> Detached cycle
    pub fn next(self) -> Self {
        match self {
            DroneState::AttachedFront => DroneState::AttachedRear,
            DroneState::AttachedRear => DroneState::Detached,
            DroneState::Detached => DroneState::AttachedFront,
        }
    }

    /// HUD label
    pub fn label(&self) -> &'static str {
        match self {
            DroneState::AttachedFront => "FRONT",
            DroneState::AttachedRear => "REAR",
            DroneState::Detached => "DETACHED",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DroneController {
    state: DroneState,
    offsets: DroneOffsets,
    follow_lerp: f32,
}

impl DroneController {
    pub fn new(offsets: DroneOffsets, follow_lerp: f32) -> Result<Self, ConfigError> {
        validate_follow_lerp(follow_lerp)?;
        Ok(Self {
            state: DroneState::AttachedFront,
            offsets,
            follow_lerp,
        })
    }

    pub fn state(&self) -> DroneState {
        self.state
    }

    pub fn cycle_state(&mut self) {
        self.state = self.state.next();
    }

    /// Where the drone should be this tick.
    ///
    /// Attached states snap to a fixed offset. Detached moves `current` a
    /// fixed fraction toward its anchor per call, so the caller must invoke
    /// this once per fixed simulation step.
    pub fn target_position(&self, player: Vec2, current: Vec2) -> Vec2 {
        let offsets = &self.offsets;
        match self.state {
            DroneState::AttachedFront => player + Vec2::new(offsets.front_x, offsets.offset_y),
            DroneState::AttachedRear => player + Vec2::new(offsets.rear_x, offsets.offset_y),
            DroneState::Detached => {
                let anchor = player + Vec2::new(offsets.detached_x, offsets.offset_y);
                lerp_vec2(current, anchor, self.follow_lerp)
            }
        }
    }

    pub fn offsets(&self) -> &DroneOffsets {
        &self.offsets
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn controller() -> DroneController {
        DroneController::new(
            DroneOffsets {
                front_x: 40.0,
                rear_x: -40.0,
                detached_x: 120.0,
                offset_y: 0.0,
            },
            0.1,
        )
        .unwrap()
    }

    #[test]
    fn test_cycles_front_rear_detached() {
        let mut drone = controller();
        assert_eq!(drone.state(), DroneState::AttachedFront);
        drone.cycle_state();
        assert_eq!(drone.state(), DroneState::AttachedRear);
        drone.cycle_state();
        assert_eq!(drone.state(), DroneState::Detached);
        drone.cycle_state();
        assert_eq!(drone.state(), DroneState::AttachedFront);
    }

    #[test]
    fn test_attached_states_snap() {
        let mut drone = controller();
        let player = Vec2::new(300.0, 200.0);
        let far_away = Vec2::new(-999.0, 999.0);
        assert_eq!(drone.target_position(player, far_away), Vec2::new(340.0, 200.0));
        drone.cycle_state();
        assert_eq!(drone.target_position(player, far_away), Vec2::new(260.0, 200.0));
    }

    #[test]
    fn test_detached_lerps_toward_anchor() {
        let mut drone = controller();
        drone.cycle_state();
        drone.cycle_state();

        let player = Vec2::new(100.0, 100.0);
        let start = Vec2::new(100.0, 200.0);
        let next = drone.target_position(player, start);
        // Anchor is (220, 100); 10% of the way there
        assert!((next - Vec2::new(112.0, 190.0)).length() < 1e-4);

        let mut pos = start;
        for _ in 0..200 {
            pos = drone.target_position(player, pos);
        }
        assert!((pos - Vec2::new(220.0, 100.0)).length() < 0.01);
    }

    #[test]
    fn test_rejects_out_of_range_lerp() {
        let offsets = DroneOffsets::default();
        assert!(DroneController::new(offsets, 0.0).is_err());
        assert!(DroneController::new(offsets, 1.5).is_err());
        assert!(DroneController::new(offsets, f32::NAN).is_err());
        assert!(DroneController::new(offsets, 1.0).is_ok());
    }

    #[test]
    fn test_labels() {
        assert_eq!(DroneState::AttachedFront.label(), "FRONT");
        assert_eq!(DroneState::AttachedRear.label(), "REAR");
        assert_eq!(DroneState::Detached.label(), "DETACHED");
    }

    proptest! {
        #[test]
        fn prop_cycle_is_mod_three(n in 0usize..100) {
            let mut drone = controller();
            for _ in 0..n {
                drone.cycle_state();
            }
            let expected = [
                DroneState::AttachedFront,
                DroneState::AttachedRear,
                DroneState::Detached,
            ][n % 3];
            prop_assert_eq!(drone.state(), expected);
        }
    }
}
