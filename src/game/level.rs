// Level layouts

use glam::Vec2;

use crate::engine::{Area, EntityBuilder, SceneId, Tag, World};

use super::enemy::{Enemy, EnemyKind};

/// Axis-aligned rectangle in map units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl MapRect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Static description of a level, in map units (multiplied by the sprite scale when built)
#[derive(Debug, Clone)]
pub struct LevelLayout {
    pub player_spawn: Vec2,
    pub platforms: Vec<MapRect>,
    pub enemies: Vec<(EnemyKind, Vec2)>,
    pub exit: Option<MapRect>,
}

impl LevelLayout {
    pub fn for_scene(scene: SceneId) -> Self {
        match scene {
            SceneId::Level1 => Self::level_1(),
            SceneId::Level2 => Self::level_2(),
        }
    }

    fn level_1() -> Self {
        Self {
            player_spawn: Vec2::new(20.0, 100.0),
            platforms: vec![
                MapRect::new(0.0, 150.0, 300.0, 20.0),
                MapRect::new(340.0, 150.0, 300.0, 20.0),
                MapRect::new(200.0, 110.0, 60.0, 8.0),
            ],
            enemies: vec![
                (EnemyKind::Flame, Vec2::new(150.0, 133.0)),
                (EnemyKind::Guy, Vec2::new(420.0, 133.0)),
                (EnemyKind::Bird, Vec2::new(600.0, 70.0)),
            ],
            exit: Some(MapRect::new(610.0, 118.0, 16.0, 32.0)),
        }
    }

    fn level_2() -> Self {
        Self {
            player_spawn: Vec2::new(20.0, 100.0),
            platforms: vec![
                MapRect::new(0.0, 150.0, 180.0, 20.0),
                MapRect::new(220.0, 120.0, 80.0, 8.0),
                MapRect::new(340.0, 150.0, 400.0, 20.0),
            ],
            enemies: vec![
                (EnemyKind::Guy, Vec2::new(120.0, 133.0)),
                (EnemyKind::Flame, Vec2::new(400.0, 133.0)),
                (EnemyKind::Guy, Vec2::new(520.0, 133.0)),
                (EnemyKind::Bird, Vec2::new(700.0, 60.0)),
            ],
            exit: None,
        }
    }

    /// Spawn the level's static geometry and enemies into `world`
    pub fn build(&self, world: &mut World, scale: f32) -> Vec<Enemy> {
        for rect in &self.platforms {
            world.spawn(
                EntityBuilder::new()
                    .tag(Tag::Platform)
                    .pos(rect.x * scale, rect.y * scale)
                    .area(Area::new(
                        Vec2::ZERO,
                        rect.width * scale,
                        rect.height * scale,
                    )),
            );
        }

        if let Some(rect) = self.exit {
            world.spawn(
                EntityBuilder::new()
                    .tag(Tag::Exit)
                    .pos(rect.x * scale, rect.y * scale)
                    .area(Area::new(
                        Vec2::ZERO,
                        rect.width * scale,
                        rect.height * scale,
                    ))
                    .sensor(),
            );
        }

        self.enemies
            .iter()
            .map(|&(kind, pos)| Enemy::spawn(world, kind, pos.x, pos.y, scale))
            .collect()
    }
}
