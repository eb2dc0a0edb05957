// Player entity: construction, collision reactions and per-frame upkeep

use glam::Vec2;

use crate::engine::physics::Body;
use crate::engine::{Area, EntityBuilder, EntityId, SceneId, Tag, World};

use super::flash::Flash;
use super::state::{HoldOutcome, InhaleState, PlayerStateMachine, Pose, ReleaseOutcome};
use super::stats::{DeathRule, PlayerStats};

/// Facing direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    Left,
    #[default]
    Right,
}

impl Direction {
    /// -1 for left, 1 for right
    pub fn sign(&self) -> f32 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

/// What an enemy collision did to the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyContact {
    /// The enemy was swallowed
    Inhaled,
    /// The player took a hit
    Hurt,
    /// The player was removed and the level restarts
    Died,
}

/// The player character and the entities it owns
#[derive(Debug)]
pub struct Player {
    entity: EntityId,
    inhale_zone: EntityId,
    inhale_effect: EntityId,
    direction: Direction,
    health: i32,
    alive: bool,
    state: PlayerStateMachine,
    flash: Flash,
    stats: PlayerStats,
}

impl Player {
    /// Build the player at map coordinates (`x`, `y`), scaled into the world,
    /// together with its inhale effect and inhale zone.
    pub fn spawn(world: &mut World, stats: PlayerStats, x: f32, y: f32) -> Self {
        let entity = world.spawn(
            EntityBuilder::new()
                .tag(Tag::Player)
                .sprite(Pose::Idle.animation_name())
                .area(Area::new(Vec2::new(4.0, 5.9), 8.0, 10.0))
                .body(Body::new(stats.jump_force).with_double_jump(stats.max_jumps))
                .pos(x * stats.scale, y * stats.scale)
                .scale(stats.scale)
                .opacity(1.0),
        );

        let inhale_effect = world.spawn(
            EntityBuilder::new()
                .tag(Tag::InhaleEffect)
                .sprite("kirbInhaleEffect")
                .scale(stats.scale)
                .opacity(0.0),
        );

        let inhale_zone = world.spawn(
            EntityBuilder::new()
                .tag(Tag::InhaleZone)
                .area(Area::new(Vec2::ZERO, 20.0, 4.0))
                .child_of(entity),
        );

        log::debug!("Player spawned as entity {} at ({}, {})", entity, x, y);

        let mut player = Self {
            entity,
            inhale_zone,
            inhale_effect,
            direction: Direction::Right,
            health: stats.max_health,
            alive: true,
            state: PlayerStateMachine::new(stats.idle_delay),
            flash: Flash::new(stats.flash_leg_duration),
            stats,
        };
        player.track_inhale_zone(world);
        player
    }

    pub fn entity(&self) -> EntityId {
        self.entity
    }

    pub fn inhale_zone(&self) -> EntityId {
        self.inhale_zone
    }

    pub fn inhale_effect(&self) -> EntityId {
        self.inhale_effect
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn stats(&self) -> &PlayerStats {
        &self.stats
    }

    pub fn state(&self) -> InhaleState {
        self.state.state()
    }

    pub fn is_inhaling(&self) -> bool {
        self.state.is_inhaling()
    }

    pub fn position(&self, world: &World) -> Option<Vec2> {
        world.world_position(self.entity)
    }

    /// Lose one point of health, never going below zero
    fn hurt(&mut self) {
        self.health = (self.health - 1).max(0);
    }

    fn set_pose(&mut self, world: &mut World) {
        let animation = self.state.pose().animation_name();
        if let Some(entity) = world.get_mut(self.entity) {
            entity.play(animation);
        }
    }

    fn die(&mut self, world: &mut World) {
        log::info!("Player died, restarting {}", SceneId::Level1);
        self.alive = false;
        world.destroy(self.entity);
        world.go(SceneId::Level1);
    }

    /// React to touching an enemy
    pub fn on_enemy_collision(&mut self, world: &mut World, enemy: EntityId) -> EnemyContact {
        let inhalable = world.get(enemy).is_some_and(|e| e.inhalable);
        if self.state.is_inhaling() && inhalable {
            world.destroy(enemy);
            self.state.capture();
            log::debug!("Inhaled enemy {}", enemy);
            return EnemyContact::Inhaled;
        }

        if self.health == 0 {
            self.die(world);
            return EnemyContact::Died;
        }

        self.hurt();
        log::debug!("Player hit by enemy {}, health {}", enemy, self.health);

        if self.health == 0 && self.stats.death_rule == DeathRule::Immediate {
            self.die(world);
            return EnemyContact::Died;
        }

        let opacity = world.get(self.entity).map_or(1.0, |e| e.opacity());
        self.flash.start(opacity);
        EnemyContact::Hurt
    }

    /// Touching the exit always moves on to the next level
    pub fn on_exit_collision(&mut self, world: &mut World) {
        log::info!("Reached the exit");
        world.go(SceneId::Level2);
    }

    /// Face a direction and walk that way at `speed` for this frame
    pub fn walk(&mut self, world: &mut World, direction: Direction) {
        self.direction = direction;
        let speed = self.stats.speed;

        let Some(entity) = world.get_mut(self.entity) else {
            return;
        };
        entity.set_flip_x(direction == Direction::Left);
        if let Some(body) = entity.body.as_mut() {
            body.move_by(Vec2::new(direction.sign() * speed, 0.0));
        }
    }

    /// Jump from the ground or mid-air while air jumps remain
    pub fn jump(&mut self, world: &mut World) -> bool {
        world
            .get_mut(self.entity)
            .and_then(|e| e.body.as_mut())
            .is_some_and(|body| body.double_jump())
    }

    /// Special action held this frame
    pub fn hold_inhale(&mut self, world: &mut World) -> HoldOutcome {
        let outcome = self.state.hold();
        self.set_pose(world);
        outcome
    }

    /// Special action released
    pub fn release_inhale(&mut self, world: &mut World) -> ReleaseOutcome {
        let outcome = self.state.release();
        self.set_pose(world);
        outcome
    }

    /// Per-frame upkeep: fall check, inhale zone tracking, flash and pose timers
    pub fn update(&mut self, world: &mut World, dt: f32) {
        if !self.alive {
            return;
        }

        if let Some(pos) = self.position(world) {
            if pos.y > self.stats.fall_limit {
                log::info!("Fell out of the level at y = {}", pos.y);
                world.go(SceneId::Level1);
            }
        }

        self.track_inhale_zone(world);

        if let Some(opacity) = self.flash.advance(dt) {
            if let Some(entity) = world.get_mut(self.entity) {
                entity.set_opacity(opacity);
            }
        }

        if self.state.update(dt) {
            self.set_pose(world);
        }
    }

    /// Keep the inhale zone and effect in front of the player
    fn track_inhale_zone(&self, world: &mut World) {
        let Some(player_pos) = self.position(world) else {
            return;
        };
        let sign = self.direction.sign();

        if let Some(zone) = world.get_mut(self.inhale_zone) {
            zone.pos = Vec2::new(
                sign * self.stats.inhale_zone_offset.x,
                self.stats.inhale_zone_offset.y,
            );
        }

        if let Some(effect) = world.get_mut(self.inhale_effect) {
            effect.pos = player_pos + Vec2::new(sign * self.stats.inhale_effect_offset, 0.0);
            effect.set_flip_x(self.direction == Direction::Left);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::WorldConfig;
    use approx::assert_relative_eq;

    fn setup() -> (World, Player) {
        let mut world = World::new(WorldConfig::default());
        let player = Player::spawn(&mut world, PlayerStats::default(), 10.0, 10.0);
        (world, player)
    }

    fn spawn_enemy(world: &mut World, inhalable: bool) -> EntityId {
        world.spawn(
            EntityBuilder::new()
                .tag(Tag::Enemy)
                .area(Area::new(Vec2::ZERO, 16.0, 16.0))
                .inhalable(inhalable),
        )
    }

    #[test]
    fn test_spawn_composes_player() {
        let (world, player) = setup();

        let entity = world.get(player.entity()).unwrap();
        assert!(entity.has_tag(Tag::Player));
        assert_eq!(entity.pos, Vec2::new(40.0, 40.0));
        assert_eq!(entity.current_animation(), Some("kirbIdle"));
        assert_eq!(entity.opacity(), 1.0);
        assert_eq!(entity.body.unwrap().jumps_left(), Some(10));

        assert_eq!(player.health(), 3);
        assert_eq!(player.direction(), Direction::Right);
        assert_eq!(player.state(), InhaleState::Idle);

        let effect = world.get(player.inhale_effect()).unwrap();
        assert!(effect.has_tag(Tag::InhaleEffect));
        assert_eq!(effect.opacity(), 0.0);

        let zone = world.get(player.inhale_zone()).unwrap();
        assert!(zone.has_tag(Tag::InhaleZone));
        assert_eq!(zone.parent, Some(player.entity()));
    }

    #[test]
    fn test_hit_reduces_health_and_flashes_once() {
        for start in [2, 1] {
            let (mut world, mut player) = setup();
            player.health = start;
            let enemy = spawn_enemy(&mut world, false);

            let contact = player.on_enemy_collision(&mut world, enemy);

            assert_eq!(contact, EnemyContact::Hurt);
            assert_eq!(player.health(), start - 1);
            player.update(&mut world, 0.05);
            assert_relative_eq!(world.get(player.entity()).unwrap().opacity(), 0.0);
            assert!(world.contains(enemy));
            assert!(world.contains(player.entity()));
        }
    }

    #[test]
    fn test_flash_drives_player_opacity() {
        let (mut world, mut player) = setup();
        let enemy = spawn_enemy(&mut world, false);
        player.on_enemy_collision(&mut world, enemy);

        player.update(&mut world, 0.05);
        assert_relative_eq!(world.get(player.entity()).unwrap().opacity(), 0.0);

        player.update(&mut world, 0.05);
        assert_relative_eq!(world.get(player.entity()).unwrap().opacity(), 1.0);

        // Finished flashes leave opacity alone
        world.get_mut(player.entity()).unwrap().set_opacity(0.3);
        player.update(&mut world, 0.05);
        assert_relative_eq!(world.get(player.entity()).unwrap().opacity(), 0.3);
    }

    #[test]
    fn test_inhaling_consumes_inhalable_enemy() {
        let (mut world, mut player) = setup();
        let enemy = spawn_enemy(&mut world, true);
        player.hold_inhale(&mut world);

        let contact = player.on_enemy_collision(&mut world, enemy);

        assert_eq!(contact, EnemyContact::Inhaled);
        assert!(!world.contains(enemy));
        assert_eq!(player.state(), InhaleState::Full);
        assert_eq!(player.health(), 3);
        player.update(&mut world, 0.05);
        assert_eq!(world.get(player.entity()).unwrap().opacity(), 1.0);
    }

    #[test]
    fn test_inhaling_does_not_consume_regular_enemy() {
        let (mut world, mut player) = setup();
        let enemy = spawn_enemy(&mut world, false);
        player.hold_inhale(&mut world);

        assert_eq!(player.on_enemy_collision(&mut world, enemy), EnemyContact::Hurt);
        assert!(world.contains(enemy));
        assert_eq!(player.health(), 2);
    }

    #[test]
    fn test_hit_at_zero_health_kills_and_restarts() {
        let (mut world, mut player) = setup();
        player.health = 0;
        let enemy = spawn_enemy(&mut world, false);

        let contact = player.on_enemy_collision(&mut world, enemy);

        assert_eq!(contact, EnemyContact::Died);
        assert!(!player.is_alive());
        assert!(!world.contains(player.entity()));
        assert!(!world.contains(player.inhale_zone()));
        assert_eq!(world.take_pending_scene(), Some(SceneId::Level1));
    }

    #[test]
    fn test_last_point_lost_still_flashes_by_default() {
        let (mut world, mut player) = setup();
        player.health = 1;
        let enemy = spawn_enemy(&mut world, false);

        assert_eq!(player.on_enemy_collision(&mut world, enemy), EnemyContact::Hurt);
        assert_eq!(player.health(), 0);
        assert!(player.is_alive());
        assert_eq!(world.take_pending_scene(), None);
    }

    #[test]
    fn test_immediate_death_rule() {
        let mut world = World::new(WorldConfig::default());
        let stats = PlayerStats {
            death_rule: DeathRule::Immediate,
            ..PlayerStats::default()
        };
        let mut player = Player::spawn(&mut world, stats, 0.0, 0.0);
        player.health = 1;
        let enemy = spawn_enemy(&mut world, false);

        assert_eq!(player.on_enemy_collision(&mut world, enemy), EnemyContact::Died);
        assert_eq!(world.take_pending_scene(), Some(SceneId::Level1));
    }

    #[test]
    fn test_exit_goes_to_level_two() {
        let (mut world, mut player) = setup();
        player.health = 0;
        player.hold_inhale(&mut world);
        player.on_exit_collision(&mut world);
        assert_eq!(world.take_pending_scene(), Some(SceneId::Level2));
    }

    #[test]
    fn test_fall_restarts_level_without_damage() {
        let (mut world, mut player) = setup();
        world.get_mut(player.entity()).unwrap().pos.y = 2000.5;

        player.update(&mut world, 1.0 / 60.0);

        assert_eq!(world.take_pending_scene(), Some(SceneId::Level1));
        assert_eq!(player.health(), 3);
    }

    #[test]
    fn test_at_fall_limit_is_safe() {
        let (mut world, mut player) = setup();
        world.get_mut(player.entity()).unwrap().pos.y = 2000.0;
        player.update(&mut world, 1.0 / 60.0);
        assert_eq!(world.take_pending_scene(), None);
    }

    #[test]
    fn test_inhale_zone_tracks_direction() {
        let (mut world, mut player) = setup();
        player.update(&mut world, 0.0);
        assert_eq!(world.get(player.inhale_zone()).unwrap().pos, Vec2::new(14.0, 8.0));
        let effect = world.get(player.inhale_effect()).unwrap();
        assert_eq!(effect.pos, Vec2::new(100.0, 40.0));
        assert!(!effect.is_flipped_x());

        player.walk(&mut world, Direction::Left);
        player.update(&mut world, 0.0);
        assert_eq!(world.get(player.inhale_zone()).unwrap().pos, Vec2::new(-14.0, 8.0));
        let effect = world.get(player.inhale_effect()).unwrap();
        assert_eq!(effect.pos, Vec2::new(-20.0, 40.0));
        assert!(effect.is_flipped_x());
    }

    #[test]
    fn test_walk_flips_sprite_and_queues_motion() {
        let (mut world, mut player) = setup();
        player.walk(&mut world, Direction::Left);

        assert_eq!(player.direction(), Direction::Left);
        assert!(world.get(player.entity()).unwrap().is_flipped_x());

        world.step_physics(0.5);
        assert_relative_eq!(world.get(player.entity()).unwrap().pos.x, -110.0);
    }

    #[test]
    fn test_spit_pose_returns_to_idle() {
        let (mut world, mut player) = setup();
        let enemy = spawn_enemy(&mut world, true);
        player.hold_inhale(&mut world);
        player.on_enemy_collision(&mut world, enemy);

        assert_eq!(player.release_inhale(&mut world), ReleaseOutcome::Spit);
        assert_eq!(
            world.get(player.entity()).unwrap().current_animation(),
            Some("kirbInhaling")
        );

        player.update(&mut world, 1.0);
        assert_eq!(
            world.get(player.entity()).unwrap().current_animation(),
            Some("kirbIdle")
        );
    }
}
