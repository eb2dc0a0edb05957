// Feeding entities through the rapier world each step

use glam::Vec2;
use parry2d::bounding_volume::Aabb;

use super::world::{BodyKind, BoxShape, CharacterMove};
use super::CollisionEvent;
use crate::engine::world::{EntityId, Tag, World};

/// Upward motion cut short by more than this means the head hit a platform
const CEILING_TOLERANCE: f32 = 1.0e-3;

fn box_shape(aabb: &Aabb) -> BoxShape {
    let center = aabb.center();
    let half_extents = aabb.half_extents();
    BoxShape {
        center: Vec2::new(center.x, center.y),
        half_extents: Vec2::new(half_extents.x, half_extents.y),
    }
}

impl World {
    /// Mirror a freshly spawned entity's hitbox into the physics world.
    /// Platforms become fixed bodies. Children of an entity with a hitbox ride on
    /// its body as sensors. Movers without a `Body` get velocity-driven bodies.
    pub(crate) fn attach_hitbox(&mut self, id: EntityId) {
        let Some(shape) = self.hitbox(id).map(|aabb| box_shape(&aabb)) else {
            return;
        };
        let Some(parent) = self.get(id).map(|entity| entity.parent) else {
            return;
        };

        if let Some(parent) = parent {
            if let Some(parent_pos) = self.world_position(parent) {
                if self.physics.add_child_sensor(id, parent, parent_pos, shape) {
                    return;
                }
            }
        }

        let Some(entity) = self.get(id) else {
            return;
        };

        let kind = if entity.has_tag(Tag::Platform) {
            BodyKind::Fixed
        } else if entity.body.is_none() && entity.velocity != Vec2::ZERO {
            BodyKind::Mover
        } else {
            BodyKind::Kinematic
        };
        let velocity = entity.velocity;
        let sensor = entity.is_sensor();
        let Some(position) = self.world_position(id) else {
            return;
        };
        self.physics.add_body(id, kind, position, velocity, shape, sensor);
    }

    /// Advance bodies and constant-velocity movers by `dt` seconds,
    /// then let rapier report what overlaps
    pub fn step_physics(&mut self, dt: f32) {
        let roots: Vec<EntityId> = self
            .entities
            .values()
            .filter(|e| e.parent.is_none() && !e.has_tag(Tag::Platform))
            .map(|e| e.id())
            .collect();

        for &id in &roots {
            let has_body = self.get(id).is_some_and(|e| e.body.is_some());
            if has_body {
                self.move_character(id, dt);
            } else if self.physics.kind(id) != Some(BodyKind::Mover) {
                if let Some(entity) = self.get_mut(id) {
                    entity.pos += entity.velocity * dt;
                }
            }
        }

        self.sync_physics();
        self.physics.step(dt);

        for id in roots {
            if self.physics.kind(id) != Some(BodyKind::Mover) {
                continue;
            }
            let position = self.physics.body_position(id);
            if let (Some(entity), Some(position)) = (self.entities.get_mut(&id), position) {
                entity.pos = position;
            }
        }
    }

    /// Overlaps that began or ended during the last physics step
    pub fn collision_events(&self) -> Vec<CollisionEvent> {
        self.physics.collision_events()
    }

    /// Gravity, queued walking and a character-controller sweep against platforms
    fn move_character(&mut self, id: EntityId, dt: f32) {
        let gravity = self.config.gravity;
        let max_fall_speed = self.config.max_fall_speed;
        let center = self.hitbox(id).map(|aabb| box_shape(&aabb).center);

        let Some(body) = self.entities.get_mut(&id).and_then(|e| e.body.as_mut()) else {
            return;
        };
        body.velocity.y = (body.velocity.y + gravity * dt).min(max_fall_speed);
        let desired = (body.velocity + body.take_pending_motion()) * dt;

        let movement = center
            .and_then(|center| self.physics.move_character(id, center, desired, dt))
            .unwrap_or(CharacterMove {
                translation: desired,
                grounded: false,
            });

        let Some(entity) = self.entities.get_mut(&id) else {
            return;
        };
        entity.pos += movement.translation;
        if let Some(body) = entity.body.as_mut() {
            let blocked_above =
                desired.y < 0.0 && movement.translation.y > desired.y + CEILING_TOLERANCE;
            body.settle(movement.grounded, blocked_above);
        }
    }

    /// Copy entity positions onto their rigid bodies before rapier looks at them
    fn sync_physics(&mut self) {
        let ids: Vec<EntityId> = self.entities.keys().copied().collect();
        for id in ids {
            let Some(anchor) = self.physics.anchor(id) else {
                continue;
            };
            if anchor == id {
                let velocity = self.get(id).map_or(Vec2::ZERO, |e| e.velocity);
                if let Some(position) = self.world_position(id) {
                    self.physics.place_body(id, position, velocity);
                }
            } else if let (Some(aabb), Some(anchor_pos)) =
                (self.hitbox(id), self.world_position(anchor))
            {
                self.physics.place_child(id, box_shape(&aabb).center - anchor_pos);
            }
        }
    }
}
