//! Respawn sequence
//!
//! When the ball hits a vortex it slides to the vortex centre, shrinks to
//! nothing and detaches. The sequence is a plain record advanced by the
//! frame loop, so tests drive it by stepping simulated time.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::EntityId;
use crate::consts::RESPAWN_MIN_SCALE;

/// A respawn in flight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingRespawn {
    /// Ball being swallowed
    pub player: EntityId,
    /// Vortex doing the swallowing
    pub hazard: EntityId,
    pub from: Vec2,
    pub to: Vec2,
    pub move_secs: f32,
    pub shrink_secs: f32,
    /// Seconds since the sequence began
    pub elapsed: f32,
}

impl PendingRespawn {
    pub fn new(
        player: EntityId,
        hazard: EntityId,
        from: Vec2,
        to: Vec2,
        move_secs: f32,
        shrink_secs: f32,
    ) -> Self {
        Self {
            player,
            hazard,
            from,
            to,
            move_secs: move_secs.max(0.0),
            shrink_secs: shrink_secs.max(0.0),
            elapsed: 0.0,
        }
    }

    pub fn duration(&self) -> f32 {
        self.move_secs + self.shrink_secs
    }

    /// Advance by dt seconds; returns true once the sequence has finished
    pub fn advance(&mut self, dt: f32) -> bool {
        self.elapsed = (self.elapsed + dt).min(self.duration());
        self.is_done()
    }

    pub fn is_done(&self) -> bool {
        self.elapsed >= self.duration()
    }

    /// Animated ball position
    pub fn position(&self) -> Vec2 {
        if self.move_secs <= 0.0 || self.elapsed >= self.move_secs {
            return self.to;
        }
        self.from.lerp(self.to, self.elapsed / self.move_secs)
    }

    /// Animated ball scale
    pub fn scale(&self) -> f32 {
        if self.elapsed <= self.move_secs {
            return 1.0;
        }
        if self.shrink_secs <= 0.0 {
            return RESPAWN_MIN_SCALE;
        }
        let t = ((self.elapsed - self.move_secs) / self.shrink_secs).min(1.0);
        1.0 + (RESPAWN_MIN_SCALE - 1.0) * t
    }
}
