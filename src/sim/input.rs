//! Gravity from player input
//!
//! Two sources can steer the ball: a touch/pointer held somewhere on the
//! board (gravity pulls toward it) and the device accelerometer.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::settings::{InputMode, Rules};

/// Input sampled for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TickInput {
    /// Pointer position in world coordinates while a touch is held
    pub touch: Option<Vec2>,
    /// Accelerometer reading in g (device x, device y)
    pub tilt: Option<Vec2>,
}

impl TickInput {
    pub fn touch(pos: Vec2) -> Self {
        Self {
            touch: Some(pos),
            tilt: None,
        }
    }

    pub fn tilt(accel: Vec2) -> Self {
        Self {
            touch: None,
            tilt: Some(accel),
        }
    }
}

/// Gravity pulling the ball toward a held touch
#[inline]
pub fn touch_gravity(touch: Vec2, player_pos: Vec2, sensitivity: f32) -> Vec2 {
    (touch - player_pos) * sensitivity
}

/// Gravity from an accelerometer reading
///
/// The board is played in landscape, so device y drives world x (inverted)
/// and device x drives world y.
#[inline]
pub fn tilt_gravity(accel: Vec2, sensitivity: f32) -> Vec2 {
    Vec2::new(accel.y * -sensitivity, accel.x * sensitivity)
}

/// Gravity for this tick, or None when the active source has no sample
pub fn gravity_from_input(input: &TickInput, player_pos: Vec2, rules: &Rules) -> Option<Vec2> {
    match rules.input_mode {
        InputMode::Touch => input
            .touch
            .map(|t| touch_gravity(t, player_pos, rules.touch_sensitivity)),
        InputMode::Tilt => input
            .tilt
            .map(|a| tilt_gravity(a, rules.tilt_sensitivity)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_touch_pulls_toward_pointer() {
        let g = touch_gravity(Vec2::new(300.0, 100.0), Vec2::new(100.0, 100.0), 0.01);
        assert!(g.abs_diff_eq(Vec2::new(2.0, 0.0), 1e-4));
    }

    #[test]
    fn test_tilt_axis_mapping() {
        let g = tilt_gravity(Vec2::new(0.2, -0.4), 50.0);
        assert!((g.x - 20.0).abs() < 1e-4);
        assert!((g.y - 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_mode_selects_source() {
        let tilt_rules = Rules::default();
        let touch_rules = Rules {
            input_mode: InputMode::Touch,
            ..Rules::default()
        };
        let input = TickInput {
            touch: Some(Vec2::new(200.0, 0.0)),
            tilt: Some(Vec2::new(1.0, 0.0)),
        };
        let touch = gravity_from_input(&input, Vec2::ZERO, &touch_rules).unwrap();
        let tilt = gravity_from_input(&input, Vec2::ZERO, &tilt_rules).unwrap();
        assert!(touch.abs_diff_eq(Vec2::new(2.0, 0.0), 1e-4));
        assert!(tilt.abs_diff_eq(Vec2::new(0.0, 50.0), 1e-4));
    }

    #[test]
    fn test_missing_sample_yields_none() {
        let touch_rules = Rules {
            input_mode: InputMode::Touch,
            ..Rules::default()
        };
        let input = TickInput::tilt(Vec2::X);
        assert!(gravity_from_input(&input, Vec2::ZERO, &touch_rules).is_none());
        assert!(gravity_from_input(&TickInput::default(), Vec2::ZERO, &Rules::default()).is_none());
    }
}
