// Enemies: the things the player inhales, dodges, or shoots

use glam::Vec2;

use crate::engine::physics::Body;
use crate::engine::timer::Countdown;
use crate::engine::{Area, EntityBuilder, EntityId, Tag, World};

use super::characters::Player;

/// Speed at which an inhalable enemy is dragged toward an inhaling player
pub const PULL_SPEED: f32 = 800.0;
/// Walking speed of a patrolling guy
pub const GUY_SPEED: f32 = 100.0;
/// Seconds a guy walks before turning around
pub const GUY_TURN_INTERVAL: f32 = 2.0;
/// Flying speed of a bird (moves left)
pub const BIRD_SPEED: f32 = 120.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnemyKind {
    /// Sits still on the ground
    Flame,
    /// Walks back and forth
    Guy,
    /// Flies left in a straight line, ignoring gravity
    Bird,
}

impl EnemyKind {
    pub fn animation_name(&self) -> &'static str {
        match self {
            Self::Flame => "flame",
            Self::Guy => "guyWalk",
            Self::Bird => "bird",
        }
    }
}

#[derive(Debug, Clone)]
struct Patrol {
    /// -1 walking left, 1 walking right
    heading: f32,
    turn: Countdown,
}

/// A live enemy and its behavior state
#[derive(Debug, Clone)]
pub struct Enemy {
    entity: EntityId,
    patrol: Option<Patrol>,
}

impl Enemy {
    /// Spawn at map coordinates (`x`, `y`), scaled into the world
    pub fn spawn(world: &mut World, kind: EnemyKind, x: f32, y: f32, scale: f32) -> Self {
        let mut builder = EntityBuilder::new()
            .tag(Tag::Enemy)
            .sprite(kind.animation_name())
            .area(Area::new(Vec2::new(2.0, 2.0), 12.0, 14.0))
            .pos(x * scale, y * scale)
            .scale(scale);

        builder = match kind {
            EnemyKind::Flame | EnemyKind::Guy => builder.body(Body::new(0.0)),
            EnemyKind::Bird => builder.moving(Vec2::new(-BIRD_SPEED, 0.0)),
        };

        let entity = world.spawn(builder);
        let patrol = (kind == EnemyKind::Guy).then(|| Patrol {
            heading: -1.0,
            turn: Countdown::start(GUY_TURN_INTERVAL),
        });

        Self { entity, patrol }
    }

    pub fn is_alive(&self, world: &World) -> bool {
        world.contains(self.entity)
    }

    /// Per-frame behavior: patrolling, and being dragged in by an inhaling player
    pub fn update(&mut self, world: &mut World, player: &Player, dt: f32) {
        let player_pos = player.position(world);
        let Some(entity) = world.get_mut(self.entity) else {
            return;
        };

        if let Some(patrol) = self.patrol.as_mut() {
            if patrol.turn.tick(dt) {
                patrol.heading = -patrol.heading;
                patrol.turn = Countdown::start(GUY_TURN_INTERVAL);
            }
            entity.set_flip_x(patrol.heading > 0.0);
            if let Some(body) = entity.body.as_mut() {
                body.move_by(Vec2::new(patrol.heading * GUY_SPEED, 0.0));
            }
        }

        if player.is_alive() && player.is_inhaling() && entity.inhalable {
            if let Some(target) = player_pos {
                let toward = if target.x < entity.pos.x { -1.0 } else { 1.0 };
                entity.pos.x += toward * PULL_SPEED * dt;
            }
        }
    }
}

/// An enemy entered (`true`) or left (`false`) the player's inhale zone
pub fn set_in_inhale_zone(world: &mut World, enemy: EntityId, inside: bool) {
    if let Some(entity) = world.get_mut(enemy) {
        entity.inhalable = inside;
    }
}
