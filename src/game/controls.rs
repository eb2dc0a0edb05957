// Keyboard controls: turns held / pressed / released actions into player behavior

use crate::engine::input::{Action, ActionState};
use crate::engine::{EngineResult, EntityId, World};

use super::characters::{Direction, HoldOutcome, Player, ReleaseOutcome};
use super::projectile::spawn_shooting_star;

/// Binds the action state to one player and its inhale effect
#[derive(Debug, Clone, Copy)]
pub struct Controls {
    inhale_effect: EntityId,
}

impl Controls {
    pub fn new(player: &Player) -> Self {
        Self {
            inhale_effect: player.inhale_effect(),
        }
    }

    fn set_effect_visible(&self, world: &mut World, visible: bool) -> EngineResult<()> {
        let effect = world.entity_mut(self.inhale_effect)?;
        effect.set_opacity(if visible { 1.0 } else { 0.0 });
        Ok(())
    }

    /// Apply one frame of input. Returns a newly launched shooting star, if any.
    pub fn apply(
        &self,
        input: &ActionState,
        player: &mut Player,
        world: &mut World,
    ) -> EngineResult<Option<EntityId>> {
        if !player.is_alive() {
            return Ok(None);
        }

        if input.is_pressed(Action::MoveLeft) {
            player.walk(world, Direction::Left);
        }
        if input.is_pressed(Action::MoveRight) {
            player.walk(world, Direction::Right);
        }

        if input.is_pressed(Action::Inhale) {
            match player.hold_inhale(world) {
                HoldOutcome::ShowFull => self.set_effect_visible(world, false)?,
                HoldOutcome::Inhaling => self.set_effect_visible(world, true)?,
            }
        }

        if input.just_pressed(Action::Jump) {
            player.jump(world);
        }

        if input.just_released(Action::Inhale) {
            match player.release_inhale(world) {
                ReleaseOutcome::Spit => return Ok(spawn_shooting_star(world, player)),
                ReleaseOutcome::Stopped => self.set_effect_visible(world, false)?,
            }
        }

        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::error::EngineError;
    use crate::engine::{Area, EntityBuilder, Tag, WorldConfig};
    use crate::game::characters::{InhaleState, PlayerStats};
    use glam::Vec2;

    fn setup() -> (World, Player, Controls, ActionState) {
        let mut world = World::new(WorldConfig::default());
        let player = Player::spawn(&mut world, PlayerStats::default(), 25.0, 25.0);
        let controls = Controls::new(&player);
        (world, player, controls, ActionState::new())
    }

    fn effect_opacity(world: &World, player: &Player) -> f32 {
        world.get(player.inhale_effect()).unwrap().opacity()
    }

    fn make_full(world: &mut World, player: &mut Player) {
        let enemy = world.spawn(
            EntityBuilder::new()
                .tag(Tag::Enemy)
                .area(Area::new(Vec2::ZERO, 16.0, 16.0))
                .inhalable(true),
        );
        player.hold_inhale(world);
        player.on_enemy_collision(world, enemy);
    }

    #[test]
    fn test_holding_inhale_shows_effect() {
        let (mut world, mut player, controls, mut input) = setup();
        input.press(Action::Inhale);

        controls.apply(&input, &mut player, &mut world).unwrap();

        assert!(player.is_inhaling());
        assert_eq!(effect_opacity(&world, &player), 1.0);
        assert_eq!(
            world.get(player.entity()).unwrap().current_animation(),
            Some("kirbInhaling")
        );
    }

    #[test]
    fn test_holding_inhale_while_full_hides_effect() {
        let (mut world, mut player, controls, mut input) = setup();
        make_full(&mut world, &mut player);
        input.press(Action::Inhale);

        controls.apply(&input, &mut player, &mut world).unwrap();

        assert_eq!(player.state(), InhaleState::Full);
        assert_eq!(effect_opacity(&world, &player), 0.0);
        assert_eq!(
            world.get(player.entity()).unwrap().current_animation(),
            Some("kirbFull")
        );
    }

    #[test]
    fn test_release_without_capture_hides_effect() {
        let (mut world, mut player, controls, mut input) = setup();
        input.press(Action::Inhale);
        controls.apply(&input, &mut player, &mut world).unwrap();
        input.end_frame();

        input.release(Action::Inhale);
        let star = controls.apply(&input, &mut player, &mut world).unwrap();

        assert_eq!(star, None);
        assert_eq!(player.state(), InhaleState::Idle);
        assert_eq!(effect_opacity(&world, &player), 0.0);
        assert_eq!(
            world.get(player.entity()).unwrap().current_animation(),
            Some("kirbIdle")
        );
    }

    #[test]
    fn test_losing_focus_while_inhaling_stops() {
        let (mut world, mut player, controls, mut input) = setup();
        input.press(Action::Inhale);
        controls.apply(&input, &mut player, &mut world).unwrap();
        input.end_frame();

        input.release_all();
        controls.apply(&input, &mut player, &mut world).unwrap();

        assert!(!player.is_inhaling());
        assert_eq!(effect_opacity(&world, &player), 0.0);
        assert_eq!(
            world.get(player.entity()).unwrap().current_animation(),
            Some("kirbIdle")
        );
    }

    #[test]
    fn test_release_while_full_spits_one_star() {
        let (mut world, mut player, controls, mut input) = setup();
        input.press(Action::Inhale);
        controls.apply(&input, &mut player, &mut world).unwrap();
        make_full(&mut world, &mut player);
        input.end_frame();

        input.release(Action::Inhale);
        let star = controls.apply(&input, &mut player, &mut world).unwrap();

        let star = star.expect("a star should be launched");
        assert_eq!(world.with_tag(Tag::ShootingStar), vec![star]);
        let player_pos = player.position(&world).unwrap();
        assert_eq!(world.get(star).unwrap().pos.x, player_pos.x + 80.0);
        assert_eq!(player.state(), InhaleState::Idle);
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

    #[test]
    fn test_holding_left_moves_and_faces_left() {
        let (mut world, mut player, controls, mut input) = setup();
        input.press(Action::MoveLeft);

        controls.apply(&input, &mut player, &mut world).unwrap();
        world.step_physics(0.1);

        assert_eq!(player.direction(), Direction::Left);
        assert!(world.get(player.entity()).unwrap().is_flipped_x());
        approx::assert_relative_eq!(
            world.get(player.entity()).unwrap().pos.x,
            70.0,
            epsilon = 1e-4
        );
        assert_eq!(player.state(), InhaleState::Idle);
    }

    #[test]
    fn test_jump_is_edge_triggered() {
        let (mut world, mut player, controls, mut input) = setup();
        input.press(Action::Jump);
        controls.apply(&input, &mut player, &mut world).unwrap();
        let jumps_after_press = world
            .get(player.entity())
            .and_then(|e| e.body)
            .and_then(|b| b.jumps_left())
            .unwrap();
        assert_eq!(jumps_after_press, 9);

        input.end_frame();
        controls.apply(&input, &mut player, &mut world).unwrap();
        let jumps_while_held = world
            .get(player.entity())
            .and_then(|e| e.body)
            .and_then(|b| b.jumps_left())
            .unwrap();
        assert_eq!(jumps_while_held, 9);
    }

    #[test]
    fn test_missing_effect_is_an_error() {
        let (mut world, mut player, controls, mut input) = setup();
        world.destroy(player.inhale_effect());
        input.press(Action::Inhale);

        let result = controls.apply(&input, &mut player, &mut world);
        assert!(matches!(result, Err(EngineError::EntityNotFound(_))));
    }

    #[test]
    fn test_dead_player_ignores_input() {
        let (mut world, mut player, controls, mut input) = setup();
        let enemy = world.spawn(EntityBuilder::new().tag(Tag::Enemy));
        for _ in 0..4 {
            player.on_enemy_collision(&mut world, enemy);
        }
        assert!(!player.is_alive());

        input.press(Action::Inhale);
        assert_eq!(controls.apply(&input, &mut player, &mut world).unwrap(), None);
        assert_eq!(player.state(), InhaleState::Idle);
    }
}
