//! Marble Maze - a tilting maze where a ball rolls under device gravity
//!
//! Core modules:
//! - `sim`: Deterministic simulation (level loading, game state, contacts)
//! - `settings`: Data-driven rules and runner configuration

pub mod settings;
pub mod sim;

pub use settings::{InputMode, Rules, Settings};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (one tick per rendered frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Size of one grid cell in world units
    pub const TILE_PITCH: f32 = 64.0;

    /// Where the player appears on start and after every respawn
    pub const PLAYER_START: (f32, f32) = (96.0, 672.0);
    pub const PLAYER_RADIUS: f32 = 22.0;
    /// Hazards, stars and the finish flag fill their cell
    pub const SENSOR_RADIUS: f32 = TILE_PITCH / 2.0;

    /// Tilt reading (in g) to gravity
    pub const TILT_SENSITIVITY: f32 = 50.0;
    /// Touch drag delta (world units) to gravity
    pub const TOUCH_SENSITIVITY: f32 = 1.0 / 100.0;
    pub const PLAYER_LINEAR_DAMPING: f32 = 0.5;

    /// Respawn sequence: slide into the vortex, then shrink away
    pub const RESPAWN_MOVE_SECS: f32 = 0.25;
    pub const RESPAWN_SHRINK_SECS: f32 = 0.25;
    /// Final scale of the shrink stage
    pub const RESPAWN_MIN_SCALE: f32 = 0.0001;

    /// Points per metre used when turning gravity into acceleration
    pub const POINTS_PER_METER: f32 = 150.0;
}

/// Collision category bits
pub mod category {
    pub const PLAYER: u32 = 1;
    pub const WALL: u32 = 2;
    pub const STAR: u32 = 4;
    pub const VORTEX: u32 = 8;
    pub const FINISH: u32 = 16;
}

/// Centre of grid cell (column, row) in world coordinates. Row 0 is the bottom row.
#[inline]
pub fn grid_to_world(column: usize, row: usize) -> Vec2 {
    let half = consts::TILE_PITCH / 2.0;
    Vec2::new(
        consts::TILE_PITCH * column as f32 + half,
        consts::TILE_PITCH * row as f32 + half,
    )
}

/// Fixed player spawn point
#[inline]
pub fn player_start() -> Vec2 {
    Vec2::new(consts::PLAYER_START.0, consts::PLAYER_START.1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_to_world_centres_cells() {
        assert_eq!(grid_to_world(0, 0), Vec2::new(32.0, 32.0));
        assert_eq!(grid_to_world(2, 3), Vec2::new(160.0, 224.0));
    }

    #[test]
    fn test_player_start_is_a_cell_centre() {
        assert_eq!(player_start(), grid_to_world(1, 10));
    }
}
