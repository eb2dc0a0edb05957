// Rapier physics world: rigid bodies, colliders and the character controller

use std::collections::HashMap;
use std::fmt;

use glam::Vec2;
use rapier2d::control::{CharacterLength, KinematicCharacterController};
use rapier2d::prelude::*;

use super::collision::{CollisionEvent, CollisionEventQueue, CollisionLayer};
use crate::engine::world::EntityId;

/// Gap kept between a moving character and the platforms it touches
const CHARACTER_SKIN: Real = 0.01;

/// How an entity's rigid body is driven
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    /// Level geometry that never moves
    Fixed,
    /// Placed by game code every step; characters move through the controller
    Kinematic,
    /// Advanced by the pipeline at a constant velocity
    Mover,
}

/// Where an entity's hitbox lives in the rapier sets
#[derive(Debug, Clone, Copy)]
struct Hitbox {
    /// Entity whose position the rigid body follows; differs from the owner for child hitboxes
    anchor: EntityId,
    body: RigidBodyHandle,
    collider: ColliderHandle,
    kind: BodyKind,
}

/// Box hitbox in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxShape {
    pub center: Vec2,
    pub half_extents: Vec2,
}

/// Result of moving a character through the level
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CharacterMove {
    pub translation: Vec2,
    pub grounded: bool,
}

fn to_vector(v: Vec2) -> Vector<Real> {
    vector![v.x, v.y]
}

fn to_vec2(v: &Vector<Real>) -> Vec2 {
    Vec2::new(v.x, v.y)
}

/// Owns every rapier structure for one scene
pub struct PhysicsWorld {
    integration_parameters: IntegrationParameters,
    physics_pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    impulse_joint_set: ImpulseJointSet,
    multibody_joint_set: MultibodyJointSet,
    ccd_solver: CCDSolver,
    query_pipeline: QueryPipeline,
    rigid_body_set: RigidBodySet,
    collider_set: ColliderSet,
    collision_event_queue: CollisionEventQueue,
    character_controller: KinematicCharacterController,
    hitboxes: HashMap<EntityId, Hitbox>,
    collider_to_entity: HashMap<ColliderHandle, EntityId>,
    /// Level geometry changed since the query pipeline was last rebuilt
    platforms_dirty: bool,
}

impl PhysicsWorld {
    pub fn new() -> Self {
        let mut integration_parameters = IntegrationParameters::default();
        integration_parameters.dt = 1.0 / 60.0;

        // Y grows downward
        let character_controller = KinematicCharacterController {
            up: rapier2d::na::Unit::new_normalize(vector![0.0, -1.0]),
            offset: CharacterLength::Absolute(CHARACTER_SKIN),
            snap_to_ground: None,
            ..Default::default()
        };

        Self {
            integration_parameters,
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            collision_event_queue: CollisionEventQueue::default(),
            character_controller,
            hitboxes: HashMap::new(),
            collider_to_entity: HashMap::new(),
            platforms_dirty: false,
        }
    }

    /// Give `entity` a rigid body of its own, placed at `position`
    pub fn add_body(
        &mut self,
        entity: EntityId,
        kind: BodyKind,
        position: Vec2,
        velocity: Vec2,
        shape: BoxShape,
        sensor: bool,
    ) {
        let body = match kind {
            BodyKind::Fixed => RigidBodyBuilder::fixed(),
            BodyKind::Kinematic => RigidBodyBuilder::kinematic_position_based().can_sleep(false),
            BodyKind::Mover => RigidBodyBuilder::kinematic_velocity_based()
                .linvel(to_vector(velocity))
                .can_sleep(false),
        }
        .translation(to_vector(position))
        .build();
        let body = self.rigid_body_set.insert(body);

        let layer = if kind == BodyKind::Fixed {
            self.platforms_dirty = true;
            CollisionLayer::Platform
        } else {
            CollisionLayer::Actor
        };
        let offset = shape.center - position;
        let collider = self.insert_collider(body, offset, shape.half_extents, sensor, layer);

        self.track(entity, entity, body, collider, kind);
    }

    /// Hang a sensor hitbox for `entity` off the rigid body of `anchor`.
    /// Returns false if `anchor` has no body.
    pub fn add_child_sensor(
        &mut self,
        entity: EntityId,
        anchor: EntityId,
        anchor_position: Vec2,
        shape: BoxShape,
    ) -> bool {
        let Some(parent) = self.hitboxes.get(&anchor).copied() else {
            return false;
        };
        let collider = self.insert_collider(
            parent.body,
            shape.center - anchor_position,
            shape.half_extents,
            true,
            CollisionLayer::Actor,
        );
        self.track(entity, anchor, parent.body, collider, parent.kind);
        true
    }

    fn insert_collider(
        &mut self,
        body: RigidBodyHandle,
        offset: Vec2,
        half_extents: Vec2,
        sensor: bool,
        layer: CollisionLayer,
    ) -> ColliderHandle {
        let mut builder = ColliderBuilder::cuboid(half_extents.x, half_extents.y)
            .translation(to_vector(offset))
            .sensor(sensor)
            .collision_groups(layer.interaction_groups())
            .active_collision_types(ActiveCollisionTypes::all());
        if layer == CollisionLayer::Actor {
            builder = builder.active_events(ActiveEvents::COLLISION_EVENTS);
        }
        self.collider_set
            .insert_with_parent(builder.build(), body, &mut self.rigid_body_set)
    }

    fn track(
        &mut self,
        entity: EntityId,
        anchor: EntityId,
        body: RigidBodyHandle,
        collider: ColliderHandle,
        kind: BodyKind,
    ) {
        self.collider_to_entity.insert(collider, entity);
        self.hitboxes.insert(
            entity,
            Hitbox {
                anchor,
                body,
                collider,
                kind,
            },
        );
    }

    /// Drop the hitbox of `entity`, and its rigid body if it owns one
    pub fn remove(&mut self, entity: EntityId) {
        let Some(hitbox) = self.hitboxes.remove(&entity) else {
            return;
        };
        self.collider_to_entity.remove(&hitbox.collider);
        if hitbox.kind == BodyKind::Fixed {
            self.platforms_dirty = true;
        }

        if hitbox.anchor == entity {
            self.rigid_body_set.remove(
                hitbox.body,
                &mut self.island_manager,
                &mut self.collider_set,
                &mut self.impulse_joint_set,
                &mut self.multibody_joint_set,
                true,
            );
            // Child hitboxes went down with the body
            let orphans: Vec<EntityId> = self
                .hitboxes
                .iter()
                .filter(|(_, child)| child.body == hitbox.body)
                .map(|(&id, _)| id)
                .collect();
            for orphan in orphans {
                if let Some(child) = self.hitboxes.remove(&orphan) {
                    self.collider_to_entity.remove(&child.collider);
                }
            }
        } else {
            self.collider_set.remove(
                hitbox.collider,
                &mut self.island_manager,
                &mut self.rigid_body_set,
                true,
            );
        }
    }

    pub fn kind(&self, entity: EntityId) -> Option<BodyKind> {
        self.hitboxes.get(&entity).map(|hitbox| hitbox.kind)
    }

    /// Anchor whose rigid body carries the hitbox of `entity`
    pub fn anchor(&self, entity: EntityId) -> Option<EntityId> {
        self.hitboxes.get(&entity).map(|hitbox| hitbox.anchor)
    }

    /// Slide the hitbox of `entity` by `desired`, stopping at platforms
    pub fn move_character(
        &mut self,
        entity: EntityId,
        center: Vec2,
        desired: Vec2,
        dt: f32,
    ) -> Option<CharacterMove> {
        if self.platforms_dirty {
            self.query_pipeline.update(&self.rigid_body_set, &self.collider_set);
            self.platforms_dirty = false;
        }

        let hitbox = self.hitboxes.get(&entity)?;
        let collider = self.collider_set.get(hitbox.collider)?;
        let filter = QueryFilter::default()
            .groups(CollisionLayer::platforms_only())
            .exclude_rigid_body(hitbox.body)
            .exclude_sensors();

        let movement = self.character_controller.move_shape(
            dt,
            &self.rigid_body_set,
            &self.collider_set,
            &self.query_pipeline,
            collider.shape(),
            &Isometry::translation(center.x, center.y),
            to_vector(desired),
            filter,
            |_| {},
        );

        Some(CharacterMove {
            translation: to_vec2(&movement.translation),
            grounded: movement.grounded,
        })
    }

    /// Put the rigid body of `entity` at `position`; movers also take `velocity`
    pub fn place_body(&mut self, entity: EntityId, position: Vec2, velocity: Vec2) {
        let Some(hitbox) = self.hitboxes.get(&entity) else {
            return;
        };
        if hitbox.anchor != entity || hitbox.kind == BodyKind::Fixed {
            return;
        }
        if let Some(body) = self.rigid_body_set.get_mut(hitbox.body) {
            body.set_translation(to_vector(position), true);
            if hitbox.kind == BodyKind::Mover {
                body.set_linvel(to_vector(velocity), true);
            }
        }
    }

    /// Move a child hitbox to `offset` from its anchor's body
    pub fn place_child(&mut self, entity: EntityId, offset: Vec2) {
        let Some(hitbox) = self.hitboxes.get(&entity) else {
            return;
        };
        if let Some(collider) = self.collider_set.get_mut(hitbox.collider) {
            collider.set_position_wrt_parent(Isometry::translation(offset.x, offset.y));
        }
    }

    /// Where the pipeline left the rigid body of `entity`
    pub fn body_position(&self, entity: EntityId) -> Option<Vec2> {
        let hitbox = self.hitboxes.get(&entity)?;
        let body = self.rigid_body_set.get(hitbox.body)?;
        Some(to_vec2(body.translation()))
    }

    /// Run collision detection and advance movers by `dt`
    pub fn step(&mut self, dt: f32) {
        self.integration_parameters.dt = dt;

        self.physics_pipeline.step(
            &vector![0.0, 0.0],
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            &self.collision_event_queue,
        );
        self.platforms_dirty = false;
    }

    /// Collision events since the last call, in terms of entities.
    /// Colliders removed in the meantime are dropped.
    pub fn collision_events(&self) -> Vec<CollisionEvent> {
        self.collision_event_queue
            .drain()
            .into_iter()
            .filter_map(|event| {
                let entity1 = *self.collider_to_entity.get(&event.collider1())?;
                let entity2 = *self.collider_to_entity.get(&event.collider2())?;
                Some(if event.started() {
                    CollisionEvent::Started { entity1, entity2 }
                } else {
                    CollisionEvent::Stopped { entity1, entity2 }
                })
            })
            .collect()
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for PhysicsWorld {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PhysicsWorld")
            .field("bodies", &self.rigid_body_set.len())
            .field("colliders", &self.collider_set.len())
            .field("hitboxes", &self.hitboxes.len())
            .finish_non_exhaustive()
    }
}
