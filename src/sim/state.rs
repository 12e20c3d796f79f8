//! Game state and core simulation types
//!
//! Everything the frame loop mutates lives in [`GameState`]. The physics
//! world is never touched from here: changes it must see are queued as
//! [`WorldCommand`]s and applied by the frame driver.

use std::collections::BTreeMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::level::{EntityKind, Level, Shape};
use super::respawn::PendingRespawn;
use crate::settings::Rules;

/// Stable handle shared by the game state and the physics world
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ball rolls under input gravity
    Playing,
    /// Ball is being swallowed by a vortex; input and contacts are ignored
    Respawning,
}

/// A level entity (wall, hazard, collectible or goal)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub kind: EntityKind,
    pub pos: Vec2,
    /// Cleared when a collectible is picked up
    pub alive: bool,
}

/// The player's ball
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: EntityId,
    pub pos: Vec2,
    /// Whether physics may move the ball
    pub dynamic: bool,
    /// Visual scale (shrinks during the respawn sequence)
    pub scale: f32,
}

/// Rigid body parameters handed to the physics world
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyDesc {
    pub shape: Shape,
    pub pos: Vec2,
    pub dynamic: bool,
    pub category: u32,
    pub contact_mask: u32,
    pub collision_mask: u32,
    pub linear_damping: f32,
    pub allows_rotation: bool,
}

impl BodyDesc {
    /// Default body for an entity kind at a position
    pub fn for_kind(kind: EntityKind, pos: Vec2, linear_damping: f32) -> Self {
        let dynamic = kind.is_dynamic();
        Self {
            shape: kind.shape(),
            pos,
            dynamic,
            category: kind.category(),
            contact_mask: kind.contact_mask(),
            collision_mask: kind.collision_mask(),
            linear_damping: if dynamic { linear_damping } else { 0.0 },
            allows_rotation: false,
        }
    }
}

/// Change the physics world must apply
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WorldCommand {
    AddBody { id: EntityId, body: BodyDesc },
    RemoveBody { id: EntityId },
    SetDynamic { id: EntityId, dynamic: bool },
}

/// Notifications for the HUD and other observers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Score changed; carries the new value
    ScoreChanged { score: i64 },
    StarCollected { id: EntityId },
    /// Player touched a vortex and the respawn sequence started
    PlayerCaught { hazard: EntityId },
    /// A fresh player is back at the start
    PlayerRespawned { id: EntityId },
}

/// Complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub rules: Rules,
    /// Level entities by id
    pub entities: BTreeMap<EntityId, Entity>,
    /// Absent only between the old ball detaching and the new one spawning
    pub player: Option<Player>,
    pub player_start: Vec2,
    /// May go negative
    pub score: i64,
    pub phase: GamePhase,
    pub respawn: Option<PendingRespawn>,
    /// Last gravity written to the world
    pub gravity: Vec2,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Queued for the physics world
    #[serde(skip)]
    pub commands: Vec<WorldCommand>,
    /// Queued for observers
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Build the world for a level and spawn the player
    pub fn new(level: &Level, rules: Rules) -> Self {
        let mut state = Self {
            rules,
            entities: BTreeMap::new(),
            player: None,
            player_start: level.player_start,
            score: 0,
            phase: GamePhase::Playing,
            respawn: None,
            gravity: Vec2::ZERO,
            time_ticks: 0,
            commands: Vec::new(),
            events: Vec::new(),
            next_id: 1,
        };

        for placed in &level.entities {
            let id = state.next_entity_id();
            state.entities.insert(
                id,
                Entity {
                    id,
                    kind: placed.kind,
                    pos: placed.pos,
                    alive: true,
                },
            );
            state.commands.push(WorldCommand::AddBody {
                id,
                body: BodyDesc::for_kind(placed.kind, placed.pos, 0.0),
            });
        }

        state.spawn_player();
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Create a fresh player at the start position
    pub fn spawn_player(&mut self) -> EntityId {
        let id = self.next_entity_id();
        let pos = self.player_start;
        self.player = Some(Player {
            id,
            pos,
            dynamic: true,
            scale: 1.0,
        });
        self.commands.push(WorldCommand::AddBody {
            id,
            body: BodyDesc::for_kind(EntityKind::Player, pos, self.rules.player_linear_damping),
        });
        id
    }

    pub fn player_id(&self) -> Option<EntityId> {
        self.player.as_ref().map(|p| p.id)
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::Respawning
    }

    /// Kind of a live entity
    pub fn kind_of(&self, id: EntityId) -> Option<EntityKind> {
        self.entities.get(&id).filter(|e| e.alive).map(|e| e.kind)
    }

    pub fn live_entities(&self, kind: EntityKind) -> impl Iterator<Item = &Entity> {
        self.entities
            .values()
            .filter(move |e| e.alive && e.kind == kind)
    }

    /// Change the score and tell observers
    pub fn add_score(&mut self, delta: i64) {
        self.score += delta;
        self.events.push(GameEvent::ScoreChanged { score: self.score });
    }

    /// Take queued world commands
    pub fn drain_commands(&mut self) -> Vec<WorldCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Take queued events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
