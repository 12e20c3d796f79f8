//! Contact handling
//!
//! The physics world reports pairs of bodies that started touching. Only
//! pairs involving the current player matter; the other body's kind decides
//! what happens.

use serde::{Deserialize, Serialize};

use super::level::EntityKind;
use super::respawn::PendingRespawn;
use super::state::{EntityId, GameEvent, GamePhase, GameState, WorldCommand};

/// Two bodies that began touching
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub a: EntityId,
    pub b: EntityId,
}

impl Contact {
    pub fn new(a: EntityId, b: EntityId) -> Self {
        Self { a, b }
    }

    /// The body in this contact that is not `id`, if `id` is involved
    pub fn other(&self, id: EntityId) -> Option<EntityId> {
        if self.a == id {
            Some(self.b)
        } else if self.b == id {
            Some(self.a)
        } else {
            None
        }
    }
}

/// What a contact did to the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactOutcome {
    /// Not a player contact, the game is respawning, or the other body is gone
    Ignored,
    /// Player fell into a vortex
    Caught,
    /// Player picked up a star
    Collected,
    /// Player reached the finish flag (no effect yet)
    ReachedGoal,
    /// Player touched a wall
    Touched,
}

/// Apply one contact to the game state
pub fn handle_contact(state: &mut GameState, contact: Contact) -> ContactOutcome {
    if state.phase == GamePhase::Respawning {
        return ContactOutcome::Ignored;
    }
    let Some(player_id) = state.player_id() else {
        return ContactOutcome::Ignored;
    };
    let Some(other) = contact.other(player_id) else {
        return ContactOutcome::Ignored;
    };
    let Some(kind) = state.kind_of(other) else {
        return ContactOutcome::Ignored;
    };

    match kind {
        EntityKind::Hazard => {
            player_caught(state, player_id, other);
            ContactOutcome::Caught
        }
        EntityKind::Collectible => {
            collect_star(state, other);
            ContactOutcome::Collected
        }
        EntityKind::Goal => {
            log::debug!("Player reached goal {:?}", other);
            ContactOutcome::ReachedGoal
        }
        EntityKind::Wall | EntityKind::Player => ContactOutcome::Touched,
    }
}

/// Freeze the player, take a point and start the respawn sequence
fn player_caught(state: &mut GameState, player_id: EntityId, hazard: EntityId) {
    let Some(hazard_pos) = state.entities.get(&hazard).map(|e| e.pos) else {
        return;
    };
    let Some(player) = state.player.as_mut() else {
        return;
    };

    player.dynamic = false;
    let from = player.pos;
    state.commands.push(WorldCommand::SetDynamic {
        id: player_id,
        dynamic: false,
    });
    state.phase = GamePhase::Respawning;
    state.add_score(-1);
    state.respawn = Some(PendingRespawn::new(
        player_id,
        hazard,
        from,
        hazard_pos,
        state.rules.respawn_move_secs,
        state.rules.respawn_shrink_secs,
    ));
    state.events.push(GameEvent::PlayerCaught { hazard });
    log::debug!("Player caught by vortex {:?}, score {}", hazard, state.score);
}

/// Remove a star from the world and score it
fn collect_star(state: &mut GameState, star: EntityId) {
    if let Some(entity) = state.entities.get_mut(&star) {
        entity.alive = false;
    }
    state.commands.push(WorldCommand::RemoveBody { id: star });
    state.add_score(1);
    state.events.push(GameEvent::StarCollected { id: star });
    log::debug!("Collected star {:?}, score {}", star, state.score);
}

/// Advance a pending respawn; when it finishes, detach the old ball and
/// spawn a fresh one at the start
pub fn advance_respawn(state: &mut GameState, dt: f32) {
    let Some(pending) = state.respawn.as_mut() else {
        return;
    };
    let done = pending.advance(dt);
    let (pos, scale, old_id) = (pending.position(), pending.scale(), pending.player);

    if let Some(player) = state.player.as_mut() {
        player.pos = pos;
        player.scale = scale;
    }
    if !done {
        return;
    }

    state.respawn = None;
    state.player = None;
    state.commands.push(WorldCommand::RemoveBody { id: old_id });

    let id = state.spawn_player();
    state.phase = GamePhase::Playing;
    state.events.push(GameEvent::PlayerRespawned { id });
    log::info!("Player respawned as {:?}", id);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Rules;
    use crate::sim::level::load_level;
    use glam::Vec2;

    fn setup() -> (GameState, EntityId, EntityId, EntityId, EntityId) {
        // Hazard, goal, wall, star (bottom row first)
        let level = load_level("x..s\n.v.f\n....");
        let mut state = GameState::new(&level, Rules::default());
        state.drain_commands();
        let find = |state: &GameState, kind: EntityKind| {
            state
                .entities
                .values()
                .find(|e| e.kind == kind)
                .map(|e| e.id)
                .unwrap()
        };
        let hazard = find(&state, EntityKind::Hazard);
        let star = find(&state, EntityKind::Collectible);
        let goal = find(&state, EntityKind::Goal);
        let wall = find(&state, EntityKind::Wall);
        (state, hazard, star, goal, wall)
    }

    #[test]
    fn test_hazard_starts_respawn() {
        let (mut state, hazard, _, _, _) = setup();
        let player = state.player_id().unwrap();

        let outcome = handle_contact(&mut state, Contact::new(hazard, player));
        assert_eq!(outcome, ContactOutcome::Caught);
        assert_eq!(state.phase, GamePhase::Respawning);
        assert!(state.is_game_over());
        assert_eq!(state.score, -1);
        assert!(!state.player.as_ref().unwrap().dynamic);
        assert_eq!(
            state.drain_commands(),
            vec![WorldCommand::SetDynamic {
                id: player,
                dynamic: false
            }]
        );
        let pending = state.respawn.as_ref().unwrap();
        assert_eq!(pending.to, Vec2::new(96.0, 96.0));
    }

    #[test]
    fn test_second_hazard_while_respawning_is_ignored() {
        let (mut state, hazard, star, _, _) = setup();
        let player = state.player_id().unwrap();

        handle_contact(&mut state, Contact::new(player, hazard));
        let outcome = handle_contact(&mut state, Contact::new(player, hazard));
        assert_eq!(outcome, ContactOutcome::Ignored);
        assert_eq!(state.score, -1);

        // Stars are off limits too while the ball is being swallowed
        assert_eq!(
            handle_contact(&mut state, Contact::new(player, star)),
            ContactOutcome::Ignored
        );
        assert!(state.entities[&star].alive);
    }

    #[test]
    fn test_respawn_completes_at_start() {
        let (mut state, hazard, _, _, _) = setup();
        let old = state.player_id().unwrap();
        handle_contact(&mut state, Contact::new(old, hazard));
        state.drain_commands();
        state.drain_events();

        advance_respawn(&mut state, 0.25);
        assert_eq!(state.phase, GamePhase::Respawning);
        assert_eq!(state.player.as_ref().unwrap().pos, Vec2::new(96.0, 96.0));

        advance_respawn(&mut state, 0.25);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.respawn.is_none());

        let player = state.player.clone().unwrap();
        assert_ne!(player.id, old);
        assert_eq!(player.pos, Vec2::new(96.0, 672.0));
        assert!(player.dynamic);
        assert_eq!(player.scale, 1.0);

        let commands = state.drain_commands();
        assert_eq!(commands[0], WorldCommand::RemoveBody { id: old });
        assert!(matches!(
            commands[1],
            WorldCommand::AddBody { id, ref body } if id == player.id && body.dynamic
        ));
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::PlayerRespawned { id: player.id }]
        );
    }

    #[test]
    fn test_star_collected_once() {
        let (mut state, _, star, _, _) = setup();
        let player = state.player_id().unwrap();

        assert_eq!(
            handle_contact(&mut state, Contact::new(player, star)),
            ContactOutcome::Collected
        );
        assert_eq!(state.score, 1);
        assert!(!state.entities[&star].alive);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(
            state.drain_commands(),
            vec![WorldCommand::RemoveBody { id: star }]
        );

        assert_eq!(
            handle_contact(&mut state, Contact::new(star, player)),
            ContactOutcome::Ignored
        );
        assert_eq!(state.score, 1);
        assert!(state.drain_commands().is_empty());
    }

    #[test]
    fn test_goal_is_a_no_op() {
        let (mut state, _, _, goal, _) = setup();
        let player = state.player_id().unwrap();

        assert_eq!(
            handle_contact(&mut state, Contact::new(player, goal)),
            ContactOutcome::ReachedGoal
        );
        assert_eq!(state.score, 0);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.drain_commands().is_empty());
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_contacts_without_player_are_ignored() {
        let (mut state, hazard, star, _, wall) = setup();
        assert_eq!(
            handle_contact(&mut state, Contact::new(hazard, star)),
            ContactOutcome::Ignored
        );
        assert_eq!(
            handle_contact(&mut state, Contact::new(wall, EntityId(999))),
            ContactOutcome::Ignored
        );
        assert_eq!(state.score, 0);
        assert!(state.entities[&star].alive);
    }

    #[test]
    fn test_wall_contact_changes_nothing() {
        let (mut state, _, _, _, wall) = setup();
        let player = state.player_id().unwrap();
        assert_eq!(
            handle_contact(&mut state, Contact::new(player, wall)),
            ContactOutcome::Touched
        );
        assert_eq!(state.score, 0);
    }
}
