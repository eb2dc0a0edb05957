// Shooting star spat out by a full player

use glam::Vec2;

use crate::engine::{Area, EntityBuilder, EntityId, Tag, World};

use super::characters::{Direction, Player};

/// Launch a star in front of the player, moving away from it
pub fn spawn_shooting_star(world: &mut World, player: &Player) -> Option<EntityId> {
    let origin = player.position(world)?;
    let stats = player.stats();
    let direction = player.direction();

    let pos = origin
        + Vec2::new(
            direction.sign() * stats.star_spawn_offset.x,
            stats.star_spawn_offset.y,
        );

    let star = world.spawn(
        EntityBuilder::new()
            .tag(Tag::ShootingStar)
            .sprite("shootingStar")
            .flip_x(direction == Direction::Right)
            .area(Area::new(Vec2::new(5.0, 4.0), 6.0, 6.0))
            .pos(pos.x, pos.y)
            .scale(stats.scale)
            .moving(Vec2::new(direction.sign() * stats.star_speed, 0.0))
            .sensor(),
    );

    log::debug!("Shooting star {} launched {}", star, direction.name());
    Some(star)
}
