//! Fixed timestep simulation tick
//!
//! One call per frame, always in the same order: apply queued world
//! changes, turn input into gravity, step physics, handle the contacts it
//! reported, then advance any respawn in flight.

use super::contact::{advance_respawn, handle_contact};
use super::input::{TickInput, gravity_from_input};
use super::physics::PhysicsWorld;
use super::state::{GamePhase, GameState};

/// Send queued game commands to the physics world
pub fn flush_commands<W: PhysicsWorld>(state: &mut GameState, world: &mut W) {
    for command in state.drain_commands() {
        world.apply(command);
    }
}

/// Advance the game by one frame
pub fn tick<W: PhysicsWorld>(state: &mut GameState, world: &mut W, input: &TickInput, dt: f32) {
    flush_commands(state, world);
    state.time_ticks += 1;

    // No steering while the ball is being swallowed
    if state.phase == GamePhase::Playing {
        if let Some(player) = state.player.as_ref() {
            if let Some(gravity) = gravity_from_input(input, player.pos, &state.rules) {
                state.gravity = gravity;
                world.set_gravity(gravity);
            }
        }
    }

    let contacts = world.step(dt);

    if let Some(player) = state.player.as_mut() {
        if player.dynamic {
            if let Some(pos) = world.body_position(player.id) {
                player.pos = pos;
            }
        }
    }

    for contact in contacts {
        handle_contact(state, contact);
    }

    advance_respawn(state, dt);
    flush_commands(state, world);
}
