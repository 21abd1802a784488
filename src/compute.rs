/// Game logic: entity behaviour and the per-frame session step.
///
/// Nothing here touches the terminal.  All randomness comes through an
/// injected `Rng` so callers control determinism (tests use a seeded one),
/// and entity operations that create entities are handed the vector they
/// should push into.

use std::collections::BTreeMap;

use crossterm::event::KeyEvent;
use glam::Vec2;
use rand::Rng;

use crate::config::GameConfig;
use crate::entities::{
    rotate_deg, Asteroid, AsteroidTier, GameState, GameStatus, Player, PlayerSlot, Shot,
};
use crate::field::AsteroidField;
use crate::input::{Controls, InputState};

// ── Player ───────────────────────────────────────────────────────────────────

impl Player {
    /// Turn by `turn_speed * dt` degrees; negative `dt` turns left.
    pub fn rotate(&mut self, dt: f32, config: &GameConfig) {
        self.rotation += config.player_turn_speed * dt;
    }

    /// Point the acceleration along the heading; negative `dt` reverses.
    pub fn thrust(&mut self, dt: f32, config: &GameConfig) {
        self.body.acceleration = self.forward() * config.player_acceleration * dt;
    }

    /// Bleed off speed while no thrust key is held.  Never overshoots: once
    /// the drag would exceed the speed the ship stops dead.
    pub fn decelerate(&mut self, config: &GameConfig) {
        let speed = self.body.velocity.length();
        if speed <= 0.0 {
            return;
        }
        let drag = self.body.velocity / speed * config.player_deceleration;
        if drag.length() > speed {
            self.body.velocity = Vec2::ZERO;
            self.body.acceleration = Vec2::ZERO;
        } else {
            self.body.velocity -= drag;
        }
    }

    /// Fire along the heading unless the cooldown is still running.
    /// Returns whether a shot was pushed.
    pub fn shoot(&mut self, config: &GameConfig, shots: &mut Vec<Shot>) -> bool {
        if self.shoot_cooldown > 0.0 {
            return false;
        }
        self.shoot_cooldown = config.player_shoot_cooldown;
        shots.push(Shot::new(
            self.body.position,
            self.forward() * config.player_shoot_speed,
            config.shot_radius,
            config.shot_lifetime,
        ));
        true
    }

    pub fn update(
        &mut self,
        dt: f32,
        controls: &Controls,
        config: &GameConfig,
        shots: &mut Vec<Shot>,
    ) {
        // Gates on `max_speed * dt`, a per-frame threshold, not a real cap.
        // Velocity is a per-frame displacement, hence no `* dt` below.
        if self.body.velocity.length() < config.player_max_speed * dt {
            self.body.velocity += self.body.acceleration;
        }
        self.body.position += self.body.velocity;
        self.shoot_cooldown -= dt;

        if controls.left {
            self.rotate(-dt, config);
        }
        if controls.right {
            self.rotate(dt, config);
        }

        if controls.forward || controls.backward {
            if controls.forward {
                self.thrust(dt, config);
            }
            if controls.backward {
                self.thrust(-dt, config);
            }
        } else {
            self.decelerate(config);
        }

        if controls.shoot {
            self.shoot(config, shots);
        }
    }
}

// ── Asteroid ─────────────────────────────────────────────────────────────────

impl Asteroid {
    pub fn update(&mut self, dt: f32) {
        self.body.update(dt);
    }

    /// Drifted more than two spawn margins past the field and still heading
    /// away from its centre: it can never come back into play.
    pub fn is_lost(&self, config: &GameConfig) -> bool {
        let margin = config.asteroid_max_radius() * 2.0;
        let p = self.body.position;
        let outside = p.x < -margin
            || p.y < -margin
            || p.x > config.screen_width + margin
            || p.y > config.screen_height + margin;
        let centre = Vec2::new(config.screen_width / 2.0, config.screen_height / 2.0);
        outside && self.body.velocity.dot(centre - p) <= 0.0
    }

    /// Break apart.  Small asteroids (and ones with an unknown tier) just
    /// vanish; bigger ones leave two faster children of the next tier that
    /// veer off in opposite directions.
    pub fn split(self, rng: &mut impl Rng, config: &GameConfig, spawned: &mut Vec<Asteroid>) {
        let tier = match self.tier(config.asteroid_min_radius) {
            Ok(tier) => tier,
            Err(e) => {
                log::warn!("{}; destroying without children", e);
                return;
            }
        };
        let Some(child) = tier.smaller() else {
            return;
        };

        let angle = rng.gen_range(config.split_min_angle..=config.split_max_angle);
        let radius = child.radius(config.asteroid_min_radius);
        let position = self.body.position;
        for signed in [angle, -angle] {
            let velocity = rotate_deg(self.body.velocity, signed) * config.split_speedup;
            spawned.push(Asteroid::new(position, velocity, radius));
        }
        log::debug!("{:?} asteroid split into two {:?} at {:?}", tier, child, position);
    }
}

// ── Shot ─────────────────────────────────────────────────────────────────────

impl Shot {
    pub fn update(&mut self, dt: f32) {
        self.body.update(dt);
        self.ttl -= dt;
    }
}

// ── Score summary ────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct TierTally {
    pub tier: AsteroidTier,
    pub count: u32,
    pub points: u32,
}

impl TierTally {
    pub fn subtotal(&self) -> u32 {
        self.count * self.points
    }
}

/// End-of-game breakdown printed after the terminal is restored.
#[derive(Clone, Debug, PartialEq)]
pub struct ScoreSummary {
    /// Largest tier first.
    pub tallies: Vec<TierTally>,
    pub elapsed: f32,
    pub points_per_second: f32,
    pub survival_points: u32,
    pub total: u32,
}

impl ScoreSummary {
    pub fn render(&self, verbose: bool) -> String {
        if !verbose {
            return format!("Score: {}", self.total);
        }
        let mut lines: Vec<String> = self
            .tallies
            .iter()
            .map(|t| {
                format!(
                    "{:<8} {:>4} x {:>4} = {:>7}",
                    t.tier.label(),
                    t.count,
                    t.points,
                    t.subtotal()
                )
            })
            .collect();
        lines.push(format!(
            "Survived {:.1}s x {} pts/s = {:>7}",
            self.elapsed, self.points_per_second, self.survival_points
        ));
        lines.push(format!("Total: {}", self.total));
        lines.join("\n")
    }
}

// ── Session ──────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub enum StepOutcome {
    Continue,
    /// Quit key pressed: stop now, print nothing.
    Quit,
    /// Last ship lost.
    GameOver(ScoreSummary),
}

/// Fresh state with one ship at the centre, or two mirrored either side of
/// it in multiplayer.
pub fn init_state(config: &GameConfig) -> GameState {
    let centre = Vec2::new(config.screen_width / 2.0, config.screen_height / 2.0);
    let r = config.player_radius;
    let players = if config.multiplayer {
        let offset = Vec2::new(r * 2.0, 0.0);
        vec![
            Player::new(centre - offset, r, PlayerSlot::One),
            Player::new(centre + offset, r, PlayerSlot::Two),
        ]
    } else {
        vec![Player::new(centre, r, PlayerSlot::One)]
    };

    GameState {
        players,
        asteroids: Vec::new(),
        shots: Vec::new(),
        score: 0,
        survival_points: 0,
        destroyed: BTreeMap::new(),
        elapsed: 0.0,
        status: GameStatus::Playing,
        frame: 0,
    }
}

/// Owns every entity and is the only thing that mutates score.
#[derive(Clone, Debug)]
pub struct Session {
    pub state: GameState,
    pub field: AsteroidField,
    pub input: InputState,
    pub config: GameConfig,
}

impl Session {
    pub fn new(config: GameConfig) -> Self {
        log::info!(
            "new session: {} player(s)",
            if config.multiplayer { 2 } else { 1 }
        );
        Self {
            state: init_state(&config),
            field: AsteroidField::new(),
            input: InputState::new(),
            config,
        }
    }

    /// One frame: drain `events`, then advance by `dt` seconds.
    pub fn step(&mut self, events: &[KeyEvent], dt: f32, rng: &mut impl Rng) -> StepOutcome {
        self.input.begin_frame();
        for event in events {
            if self.input.apply(event) {
                log::info!("quit requested at {:.1}s", self.state.elapsed);
                return StepOutcome::Quit;
            }
        }
        self.tick(dt, rng)
    }

    /// Advance the simulation by `dt` seconds with the current input.
    pub fn tick(&mut self, dt: f32, rng: &mut impl Rng) -> StepOutcome {
        if self.state.status == GameStatus::GameOver {
            return StepOutcome::GameOver(self.summary());
        }
        self.state.frame += 1;
        self.state.elapsed += dt;

        // ── 1. Integrate ─────────────────────────────────────────────────────
        for shot in self.state.shots.iter_mut() {
            shot.update(dt);
        }
        self.state.shots.retain(|s| !s.is_expired());

        for asteroid in self.state.asteroids.iter_mut() {
            asteroid.update(dt);
        }
        let before = self.state.asteroids.len();
        self.state.asteroids.retain(|a| !a.is_lost(&self.config));
        let culled = before - self.state.asteroids.len();
        if culled > 0 {
            log::debug!("culled {} asteroid(s) past the field edge", culled);
        }

        for player in self.state.players.iter_mut() {
            let controls = self.input.controls_for(player.slot);
            player.update(dt, &controls, &self.config, &mut self.state.shots);
        }

        self.field
            .update(dt, rng, &self.config, &mut self.state.asteroids);

        // ── 2. Collisions ────────────────────────────────────────────────────
        self.resolve_collisions(rng);

        if self.state.players.is_empty() {
            self.state.status = GameStatus::GameOver;
            let summary = self.summary();
            log::info!(
                "game over after {:.1}s, total score {}",
                self.state.elapsed,
                summary.total
            );
            return StepOutcome::GameOver(summary);
        }
        StepOutcome::Continue
    }

    /// Asteroid by asteroid: ships it touches die, and the first shot it
    /// touches destroys it.  Both checks run for every asteroid, so a shot
    /// and a ship hitting the same rock on the same frame are both handled.
    fn resolve_collisions(&mut self, rng: &mut impl Rng) {
        let asteroids = std::mem::take(&mut self.state.asteroids);
        let mut survivors = Vec::with_capacity(asteroids.len());
        let mut spawned = Vec::new();

        for asteroid in asteroids {
            let before = self.state.players.len();
            self.state
                .players
                .retain(|p| !asteroid.body.collides(&p.body));
            for _ in self.state.players.len()..before {
                let bonus = (self.state.elapsed * self.config.points_per_second) as u32;
                self.state.survival_points += bonus;
                log::debug!(
                    "ship destroyed at {:.1}s, survival bonus {}",
                    self.state.elapsed,
                    bonus
                );
            }

            let hit = self
                .state
                .shots
                .iter()
                .position(|s| s.body.collides(&asteroid.body));
            match hit {
                Some(i) => {
                    self.state.shots.swap_remove(i);
                    self.award(&asteroid);
                    asteroid.split(rng, &self.config, &mut spawned);
                }
                None => survivors.push(asteroid),
            }
        }

        survivors.extend(spawned);
        self.state.asteroids = survivors;
    }

    fn award(&mut self, asteroid: &Asteroid) {
        match asteroid.tier(self.config.asteroid_min_radius) {
            Ok(tier) => {
                self.state.score += self.config.points_for(tier);
                *self.state.destroyed.entry(tier).or_insert(0) += 1;
            }
            Err(e) => log::warn!("{}; no points awarded", e),
        }
    }

    pub fn summary(&self) -> ScoreSummary {
        let tallies = AsteroidTier::ALL
            .iter()
            .rev()
            .map(|&tier| TierTally {
                tier,
                count: self.state.destroyed.get(&tier).copied().unwrap_or(0),
                points: self.config.points_for(tier),
            })
            .collect();
        ScoreSummary {
            tallies,
            elapsed: self.state.elapsed,
            points_per_second: self.config.points_per_second,
            survival_points: self.state.survival_points,
            total: self.state.total_score(),
        }
    }
}
