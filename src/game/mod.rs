// Gameplay: the player, its controls, enemies and levels

pub mod characters;
pub mod controls;
pub mod enemy;
pub mod level;
pub mod projectile;

use crate::engine::input::ActionState;
use crate::engine::physics::CollisionEvent;
use crate::engine::{EngineResult, EntityId, SceneId, Tag, World, WorldConfig};

use characters::{Player, PlayerStats};
use controls::Controls;
use enemy::Enemy;
use level::LevelLayout;

/// One running game: the current scene and everything in it
#[derive(Debug)]
pub struct Game {
    world: World,
    player: Player,
    controls: Controls,
    enemies: Vec<Enemy>,
    scene: SceneId,
    stats: PlayerStats,
}

impl Game {
    pub fn new(scene: SceneId, stats: PlayerStats, config: WorldConfig) -> Self {
        let mut world = World::new(config);
        let (player, enemies) = Self::populate(&mut world, scene, &stats);
        let controls = Controls::new(&player);

        log::info!("Loaded {}", scene);

        Self {
            world,
            player,
            controls,
            enemies,
            scene,
            stats,
        }
    }

    fn populate(world: &mut World, scene: SceneId, stats: &PlayerStats) -> (Player, Vec<Enemy>) {
        let layout = LevelLayout::for_scene(scene);
        let enemies = layout.build(world, stats.scale);
        let player = Player::spawn(
            world,
            stats.clone(),
            layout.player_spawn.x,
            layout.player_spawn.y,
        );
        (player, enemies)
    }

    /// Tear down the current scene and build `scene` from scratch
    pub fn load_scene(&mut self, scene: SceneId) {
        self.world.clear();
        let (player, enemies) = Self::populate(&mut self.world, scene, &self.stats);
        self.controls = Controls::new(&player);
        self.player = player;
        self.enemies = enemies;
        self.scene = scene;
        log::info!("Loaded {}", scene);
    }

    /// One-line summary for the window title
    pub fn status(&self) -> String {
        let sprite = self.world.get(self.player.entity());
        let pose = sprite.and_then(|e| e.current_animation()).unwrap_or("gone");
        let facing = if sprite.is_some_and(|e| e.is_flipped_x()) {
            "left"
        } else {
            "right"
        };
        format!(
            "Kirb | {} | health {} | {:?} | {} facing {}",
            self.scene,
            self.player.health(),
            self.player.state(),
            pose,
            facing
        )
    }

    /// Run one fixed simulation step
    pub fn update(&mut self, dt: f32, input: &ActionState) -> EngineResult<()> {
        self.controls.apply(input, &mut self.player, &mut self.world)?;

        for enemy in &mut self.enemies {
            enemy.update(&mut self.world, &self.player, dt);
        }

        self.world.step_physics(dt);

        // Zone overlaps first, so an enemy entering zone and body together is already inhalable
        let zone = self.player.inhale_zone();
        let (zone_events, other_events): (Vec<_>, Vec<_>) = self
            .world
            .collision_events()
            .into_iter()
            .partition(|event| event.other(zone).is_some());
        for event in zone_events.into_iter().chain(other_events) {
            self.dispatch(event);
        }

        self.player.update(&mut self.world, dt);

        let world = &self.world;
        self.enemies.retain(|enemy| enemy.is_alive(world));

        if let Some(scene) = self.world.take_pending_scene() {
            self.load_scene(scene);
        }

        Ok(())
    }

    /// Route one collision to whoever reacts to it
    fn dispatch(&mut self, event: CollisionEvent) {
        let (a, b) = event.entities();
        if !self.world.contains(a) || !self.world.contains(b) {
            return;
        }
        let started = event.is_started();

        if let Some(other) = event.other(self.player.entity()) {
            if started && self.player.is_alive() {
                self.on_player_touch(other);
            }
            return;
        }

        if let Some(other) = event.other(self.player.inhale_zone()) {
            if self.world.has_tag(other, Tag::Enemy) {
                enemy::set_in_inhale_zone(&mut self.world, other, started);
            }
            return;
        }

        if started {
            if let Some((star, other)) = self.tagged_pair(a, b, Tag::ShootingStar) {
                self.on_star_hit(star, other);
            }
        }
    }

    fn on_player_touch(&mut self, other: EntityId) {
        if self.world.has_tag(other, Tag::Enemy) {
            let contact = self.player.on_enemy_collision(&mut self.world, other);
            log::debug!("Enemy {} contact: {:?}", other, contact);
        } else if self.world.has_tag(other, Tag::Exit) {
            self.player.on_exit_collision(&mut self.world);
        }
    }

    fn on_star_hit(&mut self, star: EntityId, other: EntityId) {
        if self.world.has_tag(other, Tag::Platform) {
            self.world.destroy(star);
        } else if self.world.has_tag(other, Tag::Enemy) {
            log::debug!("Shooting star {} hit enemy {}", star, other);
            self.world.destroy(other);
            self.world.destroy(star);
        }
    }

    /// Order a pair so the entity carrying `tag` comes first
    fn tagged_pair(&self, a: EntityId, b: EntityId, tag: Tag) -> Option<(EntityId, EntityId)> {
        if self.world.has_tag(a, tag) {
            Some((a, b))
        } else if self.world.has_tag(b, tag) {
            Some((b, a))
        } else {
            None
        }
    }
}
