use asteroids::entities::*;
use asteroids::GameError;
use glam::Vec2;

const MIN: f32 = 20.0;
const EPS: f32 = 1e-4;

fn circle(x: f32, y: f32, r: f32) -> Body {
    Body::new(Vec2::new(x, y), r)
}

// ── Body::collides ───────────────────────────────────────────────────────────

#[test]
fn overlapping_circles_collide() {
    assert!(circle(0.0, 0.0, 10.0).collides(&circle(15.0, 0.0, 10.0)));
}

#[test]
fn distant_circles_do_not_collide() {
    assert!(!circle(0.0, 0.0, 10.0).collides(&circle(25.0, 0.0, 10.0)));
}

#[test]
fn touching_circles_collide() {
    // distance == r1 + r2 is inclusive
    assert!(circle(0.0, 0.0, 10.0).collides(&circle(0.0, 30.0, 20.0)));
}

#[test]
fn collision_is_symmetric() {
    let bodies = [
        circle(0.0, 0.0, 10.0),
        circle(12.0, 5.0, 3.0),
        circle(100.0, 100.0, 60.0),
        circle(-40.0, 20.0, 5.0),
        circle(30.0, 0.0, 20.0),
    ];
    for a in &bodies {
        for b in &bodies {
            assert_eq!(a.collides(b), b.collides(a));
        }
    }
}

#[test]
fn body_update_is_ballistic() {
    let mut b = Body::with_velocity(Vec2::new(10.0, 10.0), Vec2::new(100.0, -50.0), 5.0);
    b.update(0.5);
    assert!((b.position - Vec2::new(60.0, -15.0)).length() < EPS);
    assert_eq!(b.velocity, Vec2::new(100.0, -50.0));
}

// ── AsteroidTier ─────────────────────────────────────────────────────────────

#[test]
fn tier_from_valid_multiples() {
    assert_eq!(AsteroidTier::from_radius(MIN, MIN).unwrap(), AsteroidTier::Small);
    assert_eq!(AsteroidTier::from_radius(MIN * 2.0, MIN).unwrap(), AsteroidTier::Medium);
    assert_eq!(AsteroidTier::from_radius(MIN * 3.0, MIN).unwrap(), AsteroidTier::Large);
}

#[test]
fn tier_is_stable_across_repeated_classification() {
    for tier in AsteroidTier::ALL {
        let r = tier.radius(MIN);
        for _ in 0..3 {
            assert_eq!(AsteroidTier::from_radius(r, MIN).unwrap(), tier);
        }
    }
}

#[test]
fn tier_outside_known_range_is_an_error() {
    for r in [0.0, MIN * 0.5, MIN * 4.0, MIN * 10.0] {
        match AsteroidTier::from_radius(r, MIN) {
            Err(GameError::UnknownTier { radius }) => assert_eq!(radius, r),
            other => panic!("expected UnknownTier for {}, got {:?}", r, other),
        }
    }
}

#[test]
fn tier_smaller_chain() {
    assert_eq!(AsteroidTier::Large.smaller(), Some(AsteroidTier::Medium));
    assert_eq!(AsteroidTier::Medium.smaller(), Some(AsteroidTier::Small));
    assert_eq!(AsteroidTier::Small.smaller(), None);
}

// ── Player geometry ──────────────────────────────────────────────────────────

#[test]
fn forward_at_zero_rotation_points_down_screen() {
    let p = Player::new(Vec2::ZERO, 20.0, PlayerSlot::One);
    assert!((p.forward() - Vec2::new(0.0, 1.0)).length() < EPS);
}

#[test]
fn forward_follows_rotation() {
    let mut p = Player::new(Vec2::ZERO, 20.0, PlayerSlot::One);
    p.rotation = 90.0;
    assert!((p.forward() - Vec2::new(-1.0, 0.0)).length() < EPS);
}

#[test]
fn triangle_nose_is_one_radius_ahead() {
    let p = Player::new(Vec2::new(100.0, 100.0), 20.0, PlayerSlot::Two);
    let [nose, left, right] = p.triangle();
    assert!((nose - Vec2::new(100.0, 120.0)).length() < EPS);
    // Rear corners sit behind the centre, mirrored around the heading
    assert!((left.y - 80.0).abs() < EPS);
    assert!((right.y - 80.0).abs() < EPS);
    assert!((left.x + right.x - 200.0).abs() < EPS);
}

#[test]
fn shot_expires_at_zero_ttl() {
    let mut s = Shot::new(Vec2::ZERO, Vec2::ZERO, 5.0, 0.1);
    assert!(!s.is_expired());
    s.ttl = 0.0;
    assert!(s.is_expired());
}
