/// Tunables for one game session.
///
/// World units are "pixels" of a 1280×720 field; the terminal renderer
/// scales them down to whatever size the terminal happens to be.

use std::time::Duration;

use crate::entities::AsteroidTier;

// ── Field ────────────────────────────────────────────────────────────────────

pub const SCREEN_WIDTH: f32 = 1280.0;
pub const SCREEN_HEIGHT: f32 = 720.0;

// ── Asteroids ────────────────────────────────────────────────────────────────

pub const ASTEROID_MIN_RADIUS: f32 = 20.0;
pub const ASTEROID_KINDS: u32 = 3;
/// Seconds between two edge spawns.
pub const ASTEROID_SPAWN_RATE: f32 = 0.8;
pub const ASTEROID_MIN_SPEED: f32 = 40.0;
pub const ASTEROID_MAX_SPEED: f32 = 100.0;
/// Half-width of the cone (degrees) around the inward edge normal.
pub const ASTEROID_SPAWN_SPREAD: f32 = 30.0;
pub const SPLIT_MIN_ANGLE: f32 = 20.0;
pub const SPLIT_MAX_ANGLE: f32 = 50.0;
pub const SPLIT_SPEEDUP: f32 = 1.2;

// ── Player ───────────────────────────────────────────────────────────────────

pub const PLAYER_RADIUS: f32 = 20.0;
/// Degrees per second.
pub const PLAYER_TURN_SPEED: f32 = 300.0;
pub const PLAYER_ACCELERATION: f32 = 10.0;
pub const PLAYER_MAX_SPEED: f32 = 300.0;
/// Drag subtracted per frame while coasting.
pub const PLAYER_DECELERATION: f32 = 0.05;
pub const PLAYER_SHOOT_SPEED: f32 = 500.0;
/// Seconds between two shots.
pub const PLAYER_SHOOT_COOLDOWN: f32 = 0.3;

// ── Shots ────────────────────────────────────────────────────────────────────

pub const SHOT_RADIUS: f32 = 5.0;
pub const SHOT_LIFETIME: f32 = 2.0;

// ── Scoring ──────────────────────────────────────────────────────────────────

pub const SMALL_POINTS: u32 = 100;
pub const MEDIUM_POINTS: u32 = 50;
pub const LARGE_POINTS: u32 = 20;
pub const POINTS_PER_SECOND: f32 = 10.0;

// ── Loop ─────────────────────────────────────────────────────────────────────

pub const FRAME_RATE: u32 = 60;

#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    pub screen_width: f32,
    pub screen_height: f32,

    pub asteroid_min_radius: f32,
    pub asteroid_kinds: u32,
    pub asteroid_spawn_rate: f32,
    pub asteroid_min_speed: f32,
    pub asteroid_max_speed: f32,
    pub asteroid_spawn_spread: f32,
    pub split_min_angle: f32,
    pub split_max_angle: f32,
    pub split_speedup: f32,

    pub player_radius: f32,
    pub player_turn_speed: f32,
    pub player_acceleration: f32,
    pub player_max_speed: f32,
    pub player_deceleration: f32,
    pub player_shoot_speed: f32,
    pub player_shoot_cooldown: f32,

    pub shot_radius: f32,
    pub shot_lifetime: f32,

    pub small_points: u32,
    pub medium_points: u32,
    pub large_points: u32,
    pub points_per_second: f32,

    pub frame_rate: u32,
    /// Start a second ship bound to the arrow keys.
    pub multiplayer: bool,
}

impl GameConfig {
    /// Radius of the biggest asteroid tier, also the off-screen spawn margin.
    pub fn asteroid_max_radius(&self) -> f32 {
        self.asteroid_min_radius * self.asteroid_kinds as f32
    }

    /// Score awarded per asteroid destroyed.
    pub fn points_for(&self, tier: AsteroidTier) -> u32 {
        match tier {
            AsteroidTier::Small => self.small_points,
            AsteroidTier::Medium => self.medium_points,
            AsteroidTier::Large => self.large_points,
        }
    }

    /// Duration of one frame at the capped frame rate.
    pub fn frame_duration(&self) -> Duration {
        Duration::from_nanos(1_000_000_000 / u64::from(self.frame_rate.max(1)))
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,

            asteroid_min_radius: ASTEROID_MIN_RADIUS,
            asteroid_kinds: ASTEROID_KINDS,
            asteroid_spawn_rate: ASTEROID_SPAWN_RATE,
            asteroid_min_speed: ASTEROID_MIN_SPEED,
            asteroid_max_speed: ASTEROID_MAX_SPEED,
            asteroid_spawn_spread: ASTEROID_SPAWN_SPREAD,
            split_min_angle: SPLIT_MIN_ANGLE,
            split_max_angle: SPLIT_MAX_ANGLE,
            split_speedup: SPLIT_SPEEDUP,

            player_radius: PLAYER_RADIUS,
            player_turn_speed: PLAYER_TURN_SPEED,
            player_acceleration: PLAYER_ACCELERATION,
            player_max_speed: PLAYER_MAX_SPEED,
            player_deceleration: PLAYER_DECELERATION,
            player_shoot_speed: PLAYER_SHOOT_SPEED,
            player_shoot_cooldown: PLAYER_SHOOT_COOLDOWN,

            shot_radius: SHOT_RADIUS,
            shot_lifetime: SHOT_LIFETIME,

            small_points: SMALL_POINTS,
            medium_points: MEDIUM_POINTS,
            large_points: LARGE_POINTS,
            points_per_second: POINTS_PER_SECOND,

            frame_rate: FRAME_RATE,
            multiplayer: false,
        }
    }
}
