/// Asteroid field: drops a Large asteroid just outside a random screen edge
/// every `asteroid_spawn_rate` seconds, aimed roughly inward.

use glam::Vec2;
use rand::Rng;

use crate::config::GameConfig;
use crate::entities::{rotate_deg, Asteroid, AsteroidTier};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Edge {
    Left,
    Right,
    Top,
    Bottom,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Left, Edge::Right, Edge::Top, Edge::Bottom];

    /// Unit vector pointing into the field.
    pub fn inward(self) -> Vec2 {
        match self {
            Edge::Left => Vec2::new(1.0, 0.0),
            Edge::Right => Vec2::new(-1.0, 0.0),
            Edge::Top => Vec2::new(0.0, 1.0),
            Edge::Bottom => Vec2::new(0.0, -1.0),
        }
    }

    /// Point `t ∈ [0, 1]` along this edge, pushed `margin` off-screen.
    pub fn point(self, t: f32, margin: f32, config: &GameConfig) -> Vec2 {
        let (w, h) = (config.screen_width, config.screen_height);
        match self {
            Edge::Left => Vec2::new(-margin, t * h),
            Edge::Right => Vec2::new(w + margin, t * h),
            Edge::Top => Vec2::new(t * w, -margin),
            Edge::Bottom => Vec2::new(t * w, h + margin),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AsteroidField {
    spawn_timer: f32,
}

impl AsteroidField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn_timer(&self) -> f32 {
        self.spawn_timer
    }

    /// Build one edge asteroid.  Only the randomness and the config decide
    /// where it lands.
    pub fn spawn(rng: &mut impl Rng, config: &GameConfig) -> Asteroid {
        let edge = Edge::ALL[rng.gen_range(0..Edge::ALL.len())];
        let spread = config.asteroid_spawn_spread;
        let speed = rng.gen_range(config.asteroid_min_speed..=config.asteroid_max_speed);
        let velocity = rotate_deg(edge.inward() * speed, rng.gen_range(-spread..=spread));
        let position = edge.point(rng.gen_range(0.0..=1.0), config.asteroid_max_radius(), config);
        let radius = AsteroidTier::Large.radius(config.asteroid_min_radius);

        log::debug!("spawn asteroid on {:?} edge at {:?}, speed {:.0}", edge, position, speed);
        Asteroid::new(position, velocity, radius)
    }

    /// Advance the spawn timer; pushes at most one asteroid per call.
    pub fn update(
        &mut self,
        dt: f32,
        rng: &mut impl Rng,
        config: &GameConfig,
        asteroids: &mut Vec<Asteroid>,
    ) {
        self.spawn_timer += dt;
        if self.spawn_timer > config.asteroid_spawn_rate {
            self.spawn_timer = 0.0;
            asteroids.push(Self::spawn(rng, config));
        }
    }
}
