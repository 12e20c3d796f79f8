//! Demo autopilot
//!
//! Tilts the board toward the nearest star (or the finish flag once the
//! stars are gone), with a little seeded wobble so the ball can work its
//! way off walls. Same seed, same run.

use glam::{Mat2, Vec2};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::input::TickInput;
use super::level::EntityKind;
use super::state::GameState;
use crate::settings::InputMode;

/// How hard the autopilot tilts, in g
pub const AUTOPILOT_TILT: f32 = 0.3;
/// Largest random steering deviation (radians)
pub const AUTOPILOT_WOBBLE: f32 = 0.9;

/// Seeded input generator for headless runs
#[derive(Debug, Clone)]
pub struct Autopilot {
    rng: Pcg32,
}

impl Autopilot {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Where the ball should head next
    pub fn target(state: &GameState) -> Option<Vec2> {
        let player = state.player.as_ref()?;
        state
            .live_entities(EntityKind::Collectible)
            .map(|e| e.pos)
            .min_by(|a, b| {
                a.distance_squared(player.pos)
                    .partial_cmp(&b.distance_squared(player.pos))
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .or_else(|| state.live_entities(EntityKind::Goal).map(|e| e.pos).next())
    }

    /// Input for the next tick
    pub fn next_input(&mut self, state: &GameState) -> TickInput {
        let (Some(player), Some(target)) = (state.player.as_ref(), Self::target(state)) else {
            return TickInput::default();
        };

        let wobble = self.rng.random_range(-AUTOPILOT_WOBBLE..=AUTOPILOT_WOBBLE);
        let dir = Mat2::from_angle(wobble) * (target - player.pos).normalize_or_zero();

        match state.rules.input_mode {
            InputMode::Tilt => {
                // Inverse of the landscape axis mapping in `tilt_gravity`
                TickInput::tilt(Vec2::new(dir.y, -dir.x) * AUTOPILOT_TILT)
            }
            InputMode::Touch => TickInput::touch(player.pos + dir * 100.0),
        }
    }
}
