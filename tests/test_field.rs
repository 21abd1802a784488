use asteroids::config::GameConfig;
use asteroids::entities::{Asteroid, AsteroidTier};
use asteroids::field::*;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

#[test]
fn no_spawn_before_interval() {
    let config = GameConfig::default();
    let mut field = AsteroidField::new();
    let mut asteroids: Vec<Asteroid> = Vec::new();
    field.update(config.asteroid_spawn_rate * 0.5, &mut seeded_rng(), &config, &mut asteroids);
    assert!(asteroids.is_empty());
    assert!(field.spawn_timer() > 0.0);
}

#[test]
fn spawns_once_interval_exceeded_and_resets() {
    let config = GameConfig::default();
    let mut field = AsteroidField::new();
    let mut rng = seeded_rng();
    let mut asteroids = Vec::new();
    field.update(config.asteroid_spawn_rate * 0.6, &mut rng, &config, &mut asteroids);
    field.update(config.asteroid_spawn_rate * 0.6, &mut rng, &config, &mut asteroids);
    assert_eq!(asteroids.len(), 1);
    assert_eq!(field.spawn_timer(), 0.0);
}

#[test]
fn at_most_one_spawn_per_update() {
    let config = GameConfig::default();
    let mut field = AsteroidField::new();
    let mut asteroids = Vec::new();
    field.update(config.asteroid_spawn_rate * 10.0, &mut seeded_rng(), &config, &mut asteroids);
    assert_eq!(asteroids.len(), 1);
}

#[test]
fn spawned_asteroids_are_large_offscreen_and_inbound() {
    let config = GameConfig::default();
    let mut rng = seeded_rng();
    let margin = config.asteroid_max_radius();
    for _ in 0..200 {
        let a = AsteroidField::spawn(&mut rng, &config);
        assert_eq!(a.tier(config.asteroid_min_radius).unwrap(), AsteroidTier::Large);

        let p = a.body.position;
        let outside = p.x <= -margin + 1e-3
            || p.x >= config.screen_width + margin - 1e-3
            || p.y <= -margin + 1e-3
            || p.y >= config.screen_height + margin - 1e-3;
        assert!(outside, "spawned inside the field at {:?}", p);

        let speed = a.body.velocity.length();
        assert!(speed >= config.asteroid_min_speed - 1e-3);
        assert!(speed <= config.asteroid_max_speed + 1e-3);

        // Inbound: velocity has a positive component toward the centre
        let centre = glam::Vec2::new(config.screen_width / 2.0, config.screen_height / 2.0);
        let to_centre = centre - p;
        let v = a.body.velocity;
        let (along, inward) = if p.x < 0.0 || p.x > config.screen_width {
            (v.x, to_centre.x)
        } else {
            (v.y, to_centre.y)
        };
        assert!(along * inward > 0.0, "asteroid at {:?} heading {:?}", p, v);
    }
}

#[test]
fn edge_inward_vectors_point_into_field() {
    let config = GameConfig::default();
    for edge in Edge::ALL {
        let on_edge = edge.point(0.5, 0.0, &config);
        let next = on_edge + edge.inward() * 10.0;
        assert!(next.x >= 0.0 && next.x <= config.screen_width);
        assert!(next.y >= 0.0 && next.y <= config.screen_height);
    }
}

#[test]
fn same_seed_same_asteroid() {
    let config = GameConfig::default();
    let a = AsteroidField::spawn(&mut StdRng::seed_from_u64(7), &config);
    let b = AsteroidField::spawn(&mut StdRng::seed_from_u64(7), &config);
    assert_eq!(a, b);
}
