/// All game entity types — plain data plus the geometry every kind shares.
/// Per-frame behaviour lives in `compute`.

use std::collections::BTreeMap;

use glam::Vec2;

use crate::error::{GameError, Result};

/// Heading of a ship with `rotation == 0` (screen y grows downward).
pub const FORWARD: Vec2 = Vec2::new(0.0, 1.0);

/// Rotate `v` clockwise-on-screen by `degrees`.
pub fn rotate_deg(v: Vec2, degrees: f32) -> Vec2 {
    Vec2::from_angle(degrees.to_radians()).rotate(v)
}

// ── Moving circle ─────────────────────────────────────────────────────────────

/// Moving circular body shared by every entity kind.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Body {
    pub position: Vec2,
    pub velocity: Vec2,
    pub acceleration: Vec2,
    pub radius: f32,
}

impl Body {
    pub fn new(position: Vec2, radius: f32) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            acceleration: Vec2::ZERO,
            radius,
        }
    }

    pub fn with_velocity(position: Vec2, velocity: Vec2, radius: f32) -> Self {
        Self {
            velocity,
            ..Self::new(position, radius)
        }
    }

    /// Ballistic integration.
    pub fn update(&mut self, dt: f32) {
        self.position += self.velocity * dt;
    }

    /// Circles touching exactly at the rim count as colliding.
    pub fn collides(&self, other: &Body) -> bool {
        self.position.distance(other.position) <= self.radius + other.radius
    }
}

// ── Asteroids ─────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AsteroidTier {
    Small,
    Medium,
    Large,
}

impl AsteroidTier {
    pub const ALL: [AsteroidTier; 3] = [AsteroidTier::Small, AsteroidTier::Medium, AsteroidTier::Large];

    /// Classify a radius by how many minimum radii it spans.
    pub fn from_radius(radius: f32, min_radius: f32) -> Result<Self> {
        match (radius / min_radius).floor() as i64 {
            1 => Ok(AsteroidTier::Small),
            2 => Ok(AsteroidTier::Medium),
            3 => Ok(AsteroidTier::Large),
            _ => Err(GameError::UnknownTier { radius }),
        }
    }

    pub fn multiple(self) -> f32 {
        match self {
            AsteroidTier::Small => 1.0,
            AsteroidTier::Medium => 2.0,
            AsteroidTier::Large => 3.0,
        }
    }

    pub fn radius(self, min_radius: f32) -> f32 {
        min_radius * self.multiple()
    }

    /// Tier that a split of this one produces, if any.
    pub fn smaller(self) -> Option<AsteroidTier> {
        match self {
            AsteroidTier::Large => Some(AsteroidTier::Medium),
            AsteroidTier::Medium => Some(AsteroidTier::Small),
            AsteroidTier::Small => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AsteroidTier::Small => "Small",
            AsteroidTier::Medium => "Medium",
            AsteroidTier::Large => "Large",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Asteroid {
    pub body: Body,
}

impl Asteroid {
    pub fn new(position: Vec2, velocity: Vec2, radius: f32) -> Self {
        Self {
            body: Body::with_velocity(position, velocity, radius),
        }
    }

    pub fn tier(&self, min_radius: f32) -> Result<AsteroidTier> {
        AsteroidTier::from_radius(self.body.radius, min_radius)
    }
}

// ── Shots ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Shot {
    pub body: Body,
    /// Seconds left before the shot fizzles out.
    pub ttl: f32,
}

impl Shot {
    pub fn new(position: Vec2, velocity: Vec2, radius: f32, ttl: f32) -> Self {
        Self {
            body: Body::with_velocity(position, velocity, radius),
            ttl,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.ttl <= 0.0
    }
}

// ── Players ───────────────────────────────────────────────────────────────────

/// Which control bindings a ship answers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlayerSlot {
    One,
    Two,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub body: Body,
    pub slot: PlayerSlot,
    /// Heading in degrees.
    pub rotation: f32,
    /// Seconds until the next shot is allowed; firing needs this `<= 0`.
    pub shoot_cooldown: f32,
}

impl Player {
    pub fn new(position: Vec2, radius: f32, slot: PlayerSlot) -> Self {
        Self {
            body: Body::new(position, radius),
            slot,
            rotation: 0.0,
            shoot_cooldown: 0.0,
        }
    }

    /// Unit vector the nose points along.
    pub fn forward(&self) -> Vec2 {
        rotate_deg(FORWARD, self.rotation)
    }

    /// Nose, then the two rear corners.
    pub fn triangle(&self) -> [Vec2; 3] {
        let forward = self.forward();
        let right = rotate_deg(FORWARD, self.rotation + 90.0) * self.body.radius / 1.5;
        let p = self.body.position;
        let r = self.body.radius;
        [
            p + forward * r,
            p - forward * r - right,
            p - forward * r + right,
        ]
    }
}

// ── Session state ─────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    GameOver,
}

/// Everything the session owns.  Entities never point back into it.
#[derive(Clone, Debug)]
pub struct GameState {
    pub players: Vec<Player>,
    pub asteroids: Vec<Asteroid>,
    pub shots: Vec<Shot>,
    /// Points from destroyed asteroids.
    pub score: u32,
    /// Survival bonus collected as ships are lost.
    pub survival_points: u32,
    pub destroyed: BTreeMap<AsteroidTier, u32>,
    /// Seconds since the session started.
    pub elapsed: f32,
    pub status: GameStatus,
    pub frame: u64,
}

impl GameState {
    pub fn total_score(&self) -> u32 {
        self.score + self.survival_points
    }
}
