// Entity storage, composition and lookup

use std::collections::BTreeMap;

use glam::Vec2;
use parry2d::bounding_volume::Aabb;
use parry2d::math::Point;

use super::animation::AnimationPlayer;
use super::error::{EngineError, EngineResult};
use super::physics::{Body, PhysicsWorld};
use super::scene::SceneId;

/// Handle returned when an entity is spawned
pub type EntityId = u32;

/// Labels used to route collisions and find entities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Tag {
    Player,
    Enemy,
    Exit,
    Platform,
    InhaleEffect,
    InhaleZone,
    ShootingStar,
}

/// Rectangular hitbox in the entity's local (unscaled) space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Area {
    pub offset: Vec2,
    pub size: Vec2,
}

impl Area {
    pub fn new(offset: Vec2, width: f32, height: f32) -> Self {
        Self {
            offset,
            size: Vec2::new(width, height),
        }
    }
}

/// Global simulation parameters
#[derive(Debug, Clone, Copy)]
pub struct WorldConfig {
    /// Downward acceleration in units/second² (y grows downward)
    pub gravity: f32,
    /// Terminal falling speed in units/second
    pub max_fall_speed: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            gravity: 2100.0,
            max_fall_speed: 2400.0,
        }
    }
}

/// A composed game object
#[derive(Debug, Clone)]
pub struct Entity {
    id: EntityId,
    tags: Vec<Tag>,
    /// Position of the top-left corner; relative to the parent if there is one
    pub pos: Vec2,
    pub parent: Option<EntityId>,
    pub scale: f32,
    opacity: f32,
    pub area: Option<Area>,
    pub sprite: Option<AnimationPlayer>,
    pub body: Option<Body>,
    /// Constant velocity for non-physical movers
    pub velocity: Vec2,
    /// Whether the inhale ability can consume this entity
    pub inhalable: bool,
    sensor: bool,
}

impl Entity {
    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn has_tag(&self, tag: Tag) -> bool {
        self.tags.contains(&tag)
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Hitbox reports overlaps without ever blocking movement
    pub fn is_sensor(&self) -> bool {
        self.sensor
    }

    pub fn set_opacity(&mut self, opacity: f32) {
        self.opacity = opacity.clamp(0.0, 1.0);
    }

    /// Switch the sprite's clip, if the entity has a sprite
    pub fn play(&mut self, animation: &str) {
        if let Some(sprite) = self.sprite.as_mut() {
            sprite.play(animation);
        }
    }

    pub fn set_flip_x(&mut self, flip: bool) {
        if let Some(sprite) = self.sprite.as_mut() {
            sprite.set_flip_horizontal(flip);
        }
    }

    pub fn current_animation(&self) -> Option<&str> {
        self.sprite.as_ref().map(|s| s.current_animation())
    }

    pub fn is_flipped_x(&self) -> bool {
        self.sprite
            .as_ref()
            .is_some_and(|s| s.is_flipped_horizontal())
    }
}

/// Builder for composing entities before spawning
#[derive(Debug, Clone)]
pub struct EntityBuilder {
    tags: Vec<Tag>,
    pos: Vec2,
    parent: Option<EntityId>,
    scale: f32,
    opacity: f32,
    area: Option<Area>,
    sprite: Option<AnimationPlayer>,
    body: Option<Body>,
    velocity: Vec2,
    inhalable: bool,
    sensor: bool,
}

impl Default for EntityBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityBuilder {
    pub fn new() -> Self {
        Self {
            tags: Vec::new(),
            pos: Vec2::ZERO,
            parent: None,
            scale: 1.0,
            opacity: 1.0,
            area: None,
            sprite: None,
            body: None,
            velocity: Vec2::ZERO,
            inhalable: false,
            sensor: false,
        }
    }

    pub fn tag(mut self, tag: Tag) -> Self {
        if !self.tags.contains(&tag) {
            self.tags.push(tag);
        }
        self
    }

    pub fn pos(mut self, x: f32, y: f32) -> Self {
        self.pos = Vec2::new(x, y);
        self
    }

    /// Attach to a parent; `pos` becomes relative to it
    pub fn child_of(mut self, parent: EntityId) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    pub fn area(mut self, area: Area) -> Self {
        self.area = Some(area);
        self
    }

    /// Sprite from the shared sheet, starting on `animation`
    pub fn sprite(mut self, animation: &str) -> Self {
        self.sprite = Some(AnimationPlayer::kirb_sheet().starting_with(animation));
        self
    }

    pub fn flip_x(mut self, flip: bool) -> Self {
        if let Some(sprite) = self.sprite.as_mut() {
            sprite.set_flip_horizontal(flip);
        }
        self
    }

    pub fn body(mut self, body: Body) -> Self {
        self.body = Some(body);
        self
    }

    /// Move at a constant velocity (units/second), ignoring gravity
    pub fn moving(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn inhalable(mut self, inhalable: bool) -> Self {
        self.inhalable = inhalable;
        self
    }

    /// Overlap-only hitbox: detected, never stood on
    pub fn sensor(mut self) -> Self {
        self.sensor = true;
        self
    }
}

/// Owns every live entity of the current scene
#[derive(Debug, Default)]
pub struct World {
    pub(crate) entities: BTreeMap<EntityId, Entity>,
    next_id: EntityId,
    pub(crate) config: WorldConfig,
    pub(crate) physics: PhysicsWorld,
    pending_scene: Option<SceneId>,
}

impl World {
    pub fn new(config: WorldConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Create an entity and return its handle
    pub fn spawn(&mut self, builder: EntityBuilder) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;

        let entity = Entity {
            id,
            tags: builder.tags,
            pos: builder.pos,
            parent: builder.parent,
            scale: builder.scale,
            opacity: builder.opacity,
            area: builder.area,
            sprite: builder.sprite,
            body: builder.body,
            velocity: builder.velocity,
            inhalable: builder.inhalable,
            sensor: builder.sensor,
        };
        self.entities.insert(id, entity);
        self.attach_hitbox(id);

        id
    }

    /// Remove an entity and all of its children. Returns whether it existed.
    pub fn destroy(&mut self, id: EntityId) -> bool {
        if self.entities.remove(&id).is_none() {
            return false;
        }
        self.physics.remove(id);

        let children: Vec<EntityId> = self
            .entities
            .values()
            .filter(|e| e.parent == Some(id))
            .map(|e| e.id)
            .collect();
        for child in children {
            self.destroy(child);
        }
        true
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(&id)
    }

    pub fn entity(&self, id: EntityId) -> EngineResult<&Entity> {
        self.get(id).ok_or(EngineError::EntityNotFound(id))
    }

    pub fn entity_mut(&mut self, id: EntityId) -> EngineResult<&mut Entity> {
        self.get_mut(id).ok_or(EngineError::EntityNotFound(id))
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.contains_key(&id)
    }

    pub fn has_tag(&self, id: EntityId, tag: Tag) -> bool {
        self.get(id).is_some_and(|e| e.has_tag(tag))
    }

    /// Handles of every entity carrying `tag`, in spawn order
    #[cfg(test)]
    pub fn with_tag(&self, tag: Tag) -> Vec<EntityId> {
        self.entities
            .values()
            .filter(|e| e.has_tag(tag))
            .map(|e| e.id)
            .collect()
    }

    /// Position in world space, following the parent chain
    pub fn world_position(&self, id: EntityId) -> Option<Vec2> {
        let entity = self.get(id)?;
        match entity.parent {
            Some(parent) => {
                let parent_pos = self.world_position(parent)?;
                let parent_scale = self.world_scale(parent)?;
                Some(parent_pos + entity.pos * parent_scale)
            }
            None => Some(entity.pos),
        }
    }

    /// Accumulated scale, following the parent chain
    pub fn world_scale(&self, id: EntityId) -> Option<f32> {
        let entity = self.get(id)?;
        match entity.parent {
            Some(parent) => Some(self.world_scale(parent)? * entity.scale),
            None => Some(entity.scale),
        }
    }

    /// World-space bounding box of the entity's hitbox
    pub fn hitbox(&self, id: EntityId) -> Option<Aabb> {
        let area = self.get(id)?.area?;
        let pos = self.world_position(id)?;
        let scale = self.world_scale(id)?;

        let min = pos + area.offset * scale;
        let max = min + area.size * scale;
        Some(Aabb::new(Point::new(min.x, min.y), Point::new(max.x, max.y)))
    }

    /// Request a scene transition; applied by the game after the current frame
    pub fn go(&mut self, scene: SceneId) {
        log::debug!("Scene transition requested: {}", scene);
        self.pending_scene = Some(scene);
    }

    pub fn take_pending_scene(&mut self) -> Option<SceneId> {
        self.pending_scene.take()
    }

    /// Remove every entity along with its bodies and colliders
    pub fn clear(&mut self) {
        self.entities.clear();
        self.physics = PhysicsWorld::new();
        self.pending_scene = None;
    }
}
