//! Physics world interface
//!
//! Rigid-body simulation is a collaborator: anything that can hold shaped
//! bodies, apply a global gravity and report begin-contacts can drive the
//! game. [`BasicPhysics`] is a small built-in world good enough for a ball
//! rolling between square walls.

use std::collections::{BTreeMap, BTreeSet};

use glam::Vec2;

use super::contact::Contact;
use super::level::Shape;
use super::sdf::{bounce, check_sdf_collision, sd_box, sd_circle};
use super::state::{BodyDesc, EntityId, WorldCommand};
use crate::consts::POINTS_PER_METER;

/// Rigid-body world the game drives each frame
pub trait PhysicsWorld {
    fn add_body(&mut self, id: EntityId, body: BodyDesc);
    fn remove_body(&mut self, id: EntityId);
    fn set_dynamic(&mut self, id: EntityId, dynamic: bool);
    /// Global gravity, in the same units the input mapping produces
    fn set_gravity(&mut self, gravity: Vec2);
    fn body_position(&self, id: EntityId) -> Option<Vec2>;
    /// Advance the simulation and return contacts that began this step
    fn step(&mut self, dt: f32) -> Vec<Contact>;

    /// Apply a queued game command
    fn apply(&mut self, command: WorldCommand) {
        match command {
            WorldCommand::AddBody { id, body } => self.add_body(id, body),
            WorldCommand::RemoveBody { id } => self.remove_body(id),
            WorldCommand::SetDynamic { id, dynamic } => self.set_dynamic(id, dynamic),
        }
    }
}

/// Bounciness of the ball against walls
pub const WALL_RESTITUTION: f32 = 0.2;
/// Speed cap (points/s) so substepping stays bounded
pub const MAX_BODY_SPEED: f32 = 2000.0;
/// Maximum substeps per step to prevent spiral of death
pub const MAX_SUBSTEPS: u32 = 16;

#[derive(Debug, Clone)]
struct Body {
    desc: BodyDesc,
    pos: Vec2,
    vel: Vec2,
}

impl Body {
    /// Signed distance from a point to this body's surface
    fn distance(&self, p: Vec2) -> f32 {
        match self.desc.shape {
            Shape::Circle { radius } => sd_circle(p, self.pos, radius),
            Shape::Rect { half_extents } => sd_box(p, self.pos, half_extents),
        }
    }

    fn radius(&self) -> Option<f32> {
        match self.desc.shape {
            Shape::Circle { radius } => Some(radius),
            Shape::Rect { .. } => None,
        }
    }
}

/// Whether two bodies overlap; box-box pairs never do here
fn overlaps(a: &Body, b: &Body) -> bool {
    match (a.radius(), b.radius()) {
        (Some(ra), _) => b.distance(a.pos) < ra,
        (None, Some(rb)) => a.distance(b.pos) < rb,
        (None, None) => false,
    }
}

fn wants_contact(a: &BodyDesc, b: &BodyDesc) -> bool {
    (a.category & b.contact_mask) != 0 || (b.category & a.contact_mask) != 0
}

/// Minimal rigid-body world: dynamic circles against static shapes
#[derive(Debug, Clone, Default)]
pub struct BasicPhysics {
    bodies: BTreeMap<EntityId, Body>,
    gravity: Vec2,
    /// Pairs currently touching (smaller id first)
    touching: BTreeSet<(EntityId, EntityId)>,
}

impl BasicPhysics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.bodies.contains_key(&id)
    }

    fn integrate(&mut self, id: EntityId, dt: f32) {
        let accel = self.gravity * POINTS_PER_METER;
        let Some(body) = self.bodies.get_mut(&id) else {
            return;
        };
        body.vel += accel * dt;
        body.vel /= 1.0 + body.desc.linear_damping * dt;
        body.vel = body.vel.clamp_length_max(MAX_BODY_SPEED);

        let travel = body.vel.length() * dt;
        let radius = body.radius().unwrap_or(1.0).max(1.0);
        let substeps = ((travel / (radius * 0.5)).ceil() as u32).clamp(1, MAX_SUBSTEPS);
        let sub_dt = dt / substeps as f32;

        for _ in 0..substeps {
            if let Some(body) = self.bodies.get_mut(&id) {
                body.pos += body.vel * sub_dt;
            }
            self.resolve_collisions(id);
        }
    }

    /// Push a dynamic circle out of every solid body it collides with
    fn resolve_collisions(&mut self, id: EntityId) {
        let Some(body) = self.bodies.get(&id) else {
            return;
        };
        let Some(radius) = body.radius() else {
            return;
        };
        let mask = body.desc.collision_mask;
        let (mut pos, mut vel) = (body.pos, body.vel);

        for (other_id, other) in &self.bodies {
            if *other_id == id || other.desc.dynamic || (mask & other.desc.category) == 0 {
                continue;
            }
            let hit = check_sdf_collision(pos, radius, |p| other.distance(p));
            if hit.hit {
                pos += hit.normal * hit.penetration;
                vel = bounce(vel, hit.normal, WALL_RESTITUTION);
            }
        }

        if let Some(body) = self.bodies.get_mut(&id) {
            body.pos = pos;
            body.vel = vel;
        }
    }

    /// Begin-contacts for pairs that want them
    fn detect_contacts(&mut self) -> Vec<Contact> {
        let mut contacts = Vec::new();
        let bodies: Vec<(&EntityId, &Body)> = self.bodies.iter().collect();

        for (i, (a_id, a)) in bodies.iter().enumerate() {
            for (b_id, b) in &bodies[i + 1..] {
                if !(a.desc.dynamic || b.desc.dynamic) || !wants_contact(&a.desc, &b.desc) {
                    continue;
                }
                let pair = (**a_id, **b_id);
                if overlaps(a, b) {
                    if self.touching.insert(pair) {
                        contacts.push(Contact::new(pair.0, pair.1));
                    }
                } else {
                    self.touching.remove(&pair);
                }
            }
        }
        contacts
    }
}

impl PhysicsWorld for BasicPhysics {
    fn add_body(&mut self, id: EntityId, body: BodyDesc) {
        let pos = body.pos;
        self.bodies.insert(
            id,
            Body {
                desc: body,
                pos,
                vel: Vec2::ZERO,
            },
        );
    }

    fn remove_body(&mut self, id: EntityId) {
        self.bodies.remove(&id);
        self.touching.retain(|(a, b)| *a != id && *b != id);
    }

    fn set_dynamic(&mut self, id: EntityId, dynamic: bool) {
        if let Some(body) = self.bodies.get_mut(&id) {
            body.desc.dynamic = dynamic;
            if !dynamic {
                body.vel = Vec2::ZERO;
            }
        }
    }

    fn set_gravity(&mut self, gravity: Vec2) {
        self.gravity = gravity;
    }

    fn body_position(&self, id: EntityId) -> Option<Vec2> {
        self.bodies.get(&id).map(|b| b.pos)
    }

    fn step(&mut self, dt: f32) -> Vec<Contact> {
        let dynamic: Vec<EntityId> = self
            .bodies
            .iter()
            .filter(|(_, b)| b.desc.dynamic)
            .map(|(id, _)| *id)
            .collect();
        for id in dynamic {
            self.integrate(id, dt);
        }
        self.detect_contacts()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::grid_to_world;
    use crate::sim::level::EntityKind;

    fn ball(pos: Vec2) -> BodyDesc {
        BodyDesc::for_kind(EntityKind::Player, pos, 0.5)
    }

    #[test]
    fn test_gravity_moves_dynamic_bodies_only() {
        let mut world = BasicPhysics::new();
        world.add_body(EntityId(1), ball(Vec2::new(100.0, 100.0)));
        world.add_body(
            EntityId(2),
            BodyDesc::for_kind(EntityKind::Hazard, Vec2::new(500.0, 500.0), 0.0),
        );
        world.set_gravity(Vec2::new(1.0, 0.0));

        for _ in 0..10 {
            world.step(SIM_DT);
        }
        assert!(world.body_position(EntityId(1)).unwrap().x > 100.0);
        assert_eq!(
            world.body_position(EntityId(2)).unwrap(),
            Vec2::new(500.0, 500.0)
        );
    }

    #[test]
    fn test_wall_stops_ball() {
        let mut world = BasicPhysics::new();
        let wall = grid_to_world(3, 1);
        world.add_body(EntityId(1), BodyDesc::for_kind(EntityKind::Wall, wall, 0.0));
        world.add_body(EntityId(2), ball(grid_to_world(1, 1)));
        world.set_gravity(Vec2::new(50.0, 0.0));

        for _ in 0..240 {
            world.step(SIM_DT);
        }
        let pos = world.body_position(EntityId(2)).unwrap();
        // Wall's left face is at x = 192
        assert!(pos.x <= 192.0 - 22.0 + 0.5, "ball went through wall: {pos:?}");
        assert!(pos.x > 150.0);
    }

    #[test]
    fn test_sensor_contact_reported_once() {
        let mut world = BasicPhysics::new();
        world.add_body(
            EntityId(1),
            BodyDesc::for_kind(EntityKind::Collectible, Vec2::new(100.0, 100.0), 0.0),
        );
        world.add_body(EntityId(2), ball(Vec2::new(100.0, 100.0)));

        let first = world.step(SIM_DT);
        assert_eq!(first, vec![Contact::new(EntityId(1), EntityId(2))]);
        assert!(world.step(SIM_DT).is_empty());

        // Sensors do not push the ball around
        assert_eq!(
            world.body_position(EntityId(2)).unwrap(),
            Vec2::new(100.0, 100.0)
        );
    }

    #[test]
    fn test_wall_contacts_are_not_reported() {
        let mut world = BasicPhysics::new();
        world.add_body(
            EntityId(1),
            BodyDesc::for_kind(EntityKind::Wall, Vec2::new(100.0, 100.0), 0.0),
        );
        world.add_body(EntityId(2), ball(Vec2::new(140.0, 100.0)));
        assert!(world.step(SIM_DT).is_empty());
    }

    #[test]
    fn test_commands_apply() {
        let mut world = BasicPhysics::new();
        world.apply(WorldCommand::AddBody {
            id: EntityId(7),
            body: ball(Vec2::ZERO),
        });
        world.set_gravity(Vec2::new(0.0, -10.0));
        world.apply(WorldCommand::SetDynamic {
            id: EntityId(7),
            dynamic: false,
        });
        world.step(SIM_DT);
        assert_eq!(world.body_position(EntityId(7)), Some(Vec2::ZERO));

        world.apply(WorldCommand::RemoveBody { id: EntityId(7) });
        assert!(!world.contains(EntityId(7)));
        assert_eq!(world.body_count(), 0);
    }
}
