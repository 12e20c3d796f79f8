//! Level loading
//!
//! A level is an ASCII grid, one character per cell. The first text line is
//! the top of the maze, so rows are numbered bottom-up.
//!
//! | char | entity      |
//! |------|-------------|
//! | `x`  | Wall        |
//! | `v`  | Hazard      |
//! | `s`  | Collectible |
//! | `f`  | Goal        |
//!
//! Anything else is an empty cell.

use std::path::{Path, PathBuf};

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::{category, grid_to_world, player_start};

/// Physical shape of a body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Rect { half_extents: Vec2 },
    Circle { radius: f32 },
}

/// What an entity is, which decides how contacts with it play out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Wall,
    Hazard,
    Collectible,
    Goal,
    Player,
}

impl EntityKind {
    /// Map a grid character to the entity placed there
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'x' => Some(EntityKind::Wall),
            'v' => Some(EntityKind::Hazard),
            's' => Some(EntityKind::Collectible),
            'f' => Some(EntityKind::Goal),
            _ => None,
        }
    }

    pub fn shape(&self) -> Shape {
        match self {
            EntityKind::Wall => Shape::Rect {
                half_extents: Vec2::splat(TILE_PITCH / 2.0),
            },
            EntityKind::Player => Shape::Circle {
                radius: PLAYER_RADIUS,
            },
            EntityKind::Hazard | EntityKind::Collectible | EntityKind::Goal => Shape::Circle {
                radius: SENSOR_RADIUS,
            },
        }
    }

    pub fn category(&self) -> u32 {
        match self {
            EntityKind::Player => category::PLAYER,
            EntityKind::Wall => category::WALL,
            EntityKind::Collectible => category::STAR,
            EntityKind::Hazard => category::VORTEX,
            EntityKind::Goal => category::FINISH,
        }
    }

    /// Categories whose contact with this body should be reported
    pub fn contact_mask(&self) -> u32 {
        match self {
            EntityKind::Player => category::STAR | category::VORTEX | category::FINISH,
            EntityKind::Wall => 0,
            EntityKind::Hazard | EntityKind::Collectible | EntityKind::Goal => category::PLAYER,
        }
    }

    /// Categories this body physically bounces off
    pub fn collision_mask(&self) -> u32 {
        match self {
            EntityKind::Player => category::WALL,
            // Static walls never move, so what they collide with is irrelevant
            EntityKind::Wall => u32::MAX,
            // Sensors
            EntityKind::Hazard | EntityKind::Collectible | EntityKind::Goal => 0,
        }
    }

    pub fn is_dynamic(&self) -> bool {
        matches!(self, EntityKind::Player)
    }
}

/// Zero-based grid cell, row 0 at the bottom
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridPos {
    pub column: usize,
    pub row: usize,
}

/// An entity placed by the level file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelEntity {
    pub kind: EntityKind,
    pub cell: GridPos,
    pub pos: Vec2,
}

/// A parsed level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    /// Placed entities in text order (bottom row first)
    pub entities: Vec<LevelEntity>,
    /// Number of text lines (zero for empty text)
    pub rows: usize,
    /// Longest line, in characters
    pub columns: usize,
    pub player_start: Vec2,
}

impl Level {
    /// A level with nothing in it
    pub fn empty() -> Self {
        Self {
            entities: Vec::new(),
            rows: 0,
            columns: 0,
            player_start: player_start(),
        }
    }

    pub fn of_kind(&self, kind: EntityKind) -> impl Iterator<Item = &LevelEntity> {
        self.entities.iter().filter(move |e| e.kind == kind)
    }

    pub fn walls(&self) -> impl Iterator<Item = &LevelEntity> {
        self.of_kind(EntityKind::Wall)
    }

    pub fn hazards(&self) -> impl Iterator<Item = &LevelEntity> {
        self.of_kind(EntityKind::Hazard)
    }

    pub fn collectibles(&self) -> impl Iterator<Item = &LevelEntity> {
        self.of_kind(EntityKind::Collectible)
    }

    /// The first finish flag, if the level has one
    pub fn goal(&self) -> Option<&LevelEntity> {
        self.of_kind(EntityKind::Goal).next()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

/// Parse level text into placed entities
///
/// Lines are split on `\n` only, so a trailing newline yields an empty
/// bottom row. Unknown characters are skipped without complaint. Empty
/// text is the empty level.
pub fn load_level(text: &str) -> Level {
    if text.is_empty() {
        return Level::empty();
    }
    let lines: Vec<&str> = text.split('\n').collect();
    let mut entities = Vec::new();
    let mut columns = 0;

    for (row, line) in lines.iter().rev().enumerate() {
        let mut width = 0;
        for (column, c) in line.chars().enumerate() {
            width = column + 1;
            if let Some(kind) = EntityKind::from_char(c) {
                entities.push(LevelEntity {
                    kind,
                    cell: GridPos { column, row },
                    pos: grid_to_world(column, row),
                });
            }
        }
        columns = columns.max(width);
    }

    Level {
        entities,
        rows: lines.len(),
        columns,
        player_start: player_start(),
    }
}

/// Level resource failure
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("failed to read level {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Read and parse a level file, reporting why it could not be read
pub fn try_load_level_file(path: impl AsRef<Path>) -> Result<Level, LevelError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| LevelError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let level = load_level(&text);
    log::info!(
        "Loaded level {}: {}x{} grid, {} walls, {} hazards, {} stars, goal: {}",
        path.display(),
        level.columns,
        level.rows,
        level.walls().count(),
        level.hazards().count(),
        level.collectibles().count(),
        level.goal().is_some()
    );
    Ok(level)
}

/// Read a level file; a missing or unreadable file gives an empty level
pub fn load_level_file(path: impl AsRef<Path>) -> Level {
    match try_load_level_file(path) {
        Ok(level) => level,
        Err(e) => {
            log::warn!("{e}; starting with an empty level");
            Level::empty()
        }
    }
}
