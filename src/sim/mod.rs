//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering, input-device or platform dependencies

pub mod autopilot;
pub mod contact;
pub mod input;
pub mod level;
pub mod physics;
pub mod respawn;
pub mod sdf;
pub mod state;
pub mod tick;

pub use autopilot::Autopilot;
pub use contact::{Contact, ContactOutcome, advance_respawn, handle_contact};
pub use input::{TickInput, gravity_from_input, tilt_gravity, touch_gravity};
pub use level::{
    EntityKind, GridPos, Level, LevelEntity, LevelError, Shape, load_level, load_level_file,
    try_load_level_file,
};
pub use physics::{BasicPhysics, PhysicsWorld};
pub use respawn::PendingRespawn;
pub use sdf::{check_sdf_collision, sd_box, sd_circle};
pub use state::{
    BodyDesc, Entity, EntityId, GameEvent, GamePhase, GameState, Player, WorldCommand,
};
pub use tick::{flush_commands, tick};
