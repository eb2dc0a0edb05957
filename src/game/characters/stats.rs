// Player tuning values

use glam::Vec2;

/// What happens when an enemy hits a player whose health is already spent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeathRule {
    /// Die on the first hit taken at zero health (one hit after the last point is lost)
    OnNextHit,
    /// Die as soon as health reaches zero
    Immediate,
}

/// Player configuration
#[derive(Debug, Clone)]
pub struct PlayerStats {
    // Movement
    /// Horizontal walking speed (units/second)
    pub speed: f32,
    /// Upward speed applied by each jump
    pub jump_force: f32,
    /// Jumps available before landing again
    pub max_jumps: u32,

    // Health
    pub max_health: i32,
    pub death_rule: DeathRule,
    /// Length of each leg of the hit flash (seconds)
    pub flash_leg_duration: f32,

    // Sprite
    /// Sprite scale; spawn coordinates are multiplied by it too
    pub scale: f32,

    /// Falling below this y (world units) restarts the level
    pub fall_limit: f32,

    // Inhale / spit
    /// Inhale zone position relative to the player, facing right (local units)
    pub inhale_zone_offset: Vec2,
    /// Horizontal distance of the inhale effect from the player (world units)
    pub inhale_effect_offset: f32,
    /// Where a shooting star appears relative to the player (world units)
    pub star_spawn_offset: Vec2,
    pub star_speed: f32,
    /// Delay before the idle pose returns after spitting a star (seconds)
    pub idle_delay: f32,
}

pub const BASE_STATS: PlayerStats = PlayerStats {
    speed: 300.0,
    jump_force: 640.0,
    max_jumps: 10,

    max_health: 3,
    death_rule: DeathRule::OnNextHit,
    flash_leg_duration: 0.05,

    scale: 4.0,

    fall_limit: 2000.0,

    inhale_zone_offset: Vec2::new(14.0, 8.0),
    inhale_effect_offset: 60.0,
    star_spawn_offset: Vec2::new(80.0, 5.0),
    star_speed: 800.0,
    idle_delay: 1.0,
};

impl Default for PlayerStats {
    fn default() -> Self {
        BASE_STATS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_stats() {
        let stats = PlayerStats::default();
        assert_eq!(stats.speed, 300.0);
        assert_eq!(stats.max_health, 3);
        assert_eq!(stats.max_jumps, 10);
        assert_eq!(stats.fall_limit, 2000.0);
        assert_eq!(stats.death_rule, DeathRule::OnNextHit);
    }

    #[test]
    fn test_spit_tuning() {
        let stats = PlayerStats::default();
        assert_eq!(stats.star_spawn_offset.x, 80.0);
        assert_eq!(stats.star_speed, 800.0);
        assert_eq!(stats.idle_delay, 1.0);
        assert_eq!(stats.flash_leg_duration, 0.05);
    }
}
