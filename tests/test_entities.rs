use space_defender::entities::*;

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn enum_eq_and_copy() {
    assert_eq!(EnemyKind::Tank, EnemyKind::Tank);
    assert_ne!(EnemyKind::Fast, EnemyKind::Normal);
    assert_ne!(BossPhase::One, BossPhase::Two);
    assert_ne!(GameStatus::Playing, GameStatus::GameOver);

    let kind = PowerUpKind::Shield;
    let copied = kind;
    assert_eq!(kind, copied);
}

#[test]
fn game_state_clone_is_independent() {
    let original = GameState::default();
    let mut cloned = original.clone();

    cloned.player.x = 99.0;
    cloned.score = 999;
    cloned
        .enemies
        .push(Enemy::new(EnemyKind::Normal, 5.0, 5.0, 1.0));

    assert_eq!(original.player.x, 400.0);
    assert_eq!(original.score, 0);
    assert!(original.enemies.is_empty());
}

// ── Damage ───────────────────────────────────────────────────────────────────

#[test]
fn shield_overflow_hits_health() {
    let mut p = Player::default();
    p.shield = 10;
    p.take_damage(25);
    assert_eq!(p.shield, 0);
    assert_eq!(p.health, 85);
}

#[test]
fn shield_absorbs_small_hits() {
    let mut p = Player::default();
    p.shield = 30;
    p.take_damage(10);
    assert_eq!(p.shield, 20);
    assert_eq!(p.health, 100);
}

#[test]
fn exact_shield_hit_leaves_health() {
    let mut p = Player::default();
    p.shield = 20;
    p.take_damage(20);
    assert_eq!((p.shield, p.health), (0, 100));
}

#[test]
fn unshielded_damage_saturates() {
    let mut p = Player::default();
    p.health = 5;
    p.take_damage(20);
    assert_eq!(p.health, 0);
    assert!(p.is_dead());
}

#[test]
fn pickups_are_capped() {
    let mut p = Player::default();
    p.health = 90;
    p.heal(30);
    assert_eq!(p.health, 100);
    p.add_shield(30);
    p.add_shield(30);
    assert_eq!(p.shield, 50);
    p.upgrade_weapon();
    p.upgrade_weapon();
    p.upgrade_weapon();
    assert_eq!(p.weapon_level, 3);
}

// ── Enemy variants ───────────────────────────────────────────────────────────

#[test]
fn variant_gates_by_wave() {
    assert_eq!(EnemyKind::for_wave(1, 0.0), EnemyKind::Normal);
    assert_eq!(EnemyKind::for_wave(2, 0.1), EnemyKind::Fast);
    assert_eq!(EnemyKind::for_wave(2, 0.6), EnemyKind::Normal);
    assert_eq!(EnemyKind::for_wave(3, 0.1), EnemyKind::Tank);
    assert_eq!(EnemyKind::for_wave(3, 0.3), EnemyKind::Fast);
    assert_eq!(EnemyKind::for_wave(3, 0.5), EnemyKind::Normal);
}

#[test]
fn variant_stats() {
    let tank = Enemy::new(EnemyKind::Tank, 0.0, 0.0, 1.0);
    assert_eq!((tank.w, tank.h), (45.0, 45.0));
    assert_eq!((tank.health, tank.max_health), (5, 5));
    assert_eq!(EnemyKind::Fast.points(), 15);
    assert_eq!(EnemyKind::Normal.health(), 2);
}

#[test]
fn spawned_enemy_starts_above_screen() {
    let mut rng = StdRng::seed_from_u64(7);
    for kind in [EnemyKind::Normal, EnemyKind::Fast, EnemyKind::Tank] {
        for _ in 0..50 {
            let e = Enemy::spawn(kind, &mut rng);
            let (lo, hi) = kind.speed_range();
            assert!((-100.0..=-40.0).contains(&e.y));
            assert!((0.0..=760.0).contains(&e.x));
            assert!(e.speed >= lo && e.speed < hi);
        }
    }
}

// ── Boss ─────────────────────────────────────────────────────────────────────

#[test]
fn boss_descends_then_patrols() {
    let mut boss = Boss {
        y: 79.0,
        ..Boss::default()
    };
    boss.update();
    assert_eq!(boss.y, 80.0);
    assert_eq!(boss.movement, BossMovement::Patrolling { direction: 1.0 });
    let x = boss.x;
    boss.update();
    assert_eq!(boss.x, x + 2.0);
}

#[test]
fn boss_bounces_off_edges() {
    let mut boss = Boss {
        x: 699.0,
        y: 80.0,
        movement: BossMovement::Patrolling { direction: 1.0 },
        ..Boss::default()
    };
    boss.update();
    assert_eq!(boss.movement, BossMovement::Patrolling { direction: -1.0 });
    boss.update();
    assert_eq!(boss.x, 699.0);
}

#[test]
fn boss_phase_switches_below_half() {
    let mut boss = Boss::default();
    boss.health = 50;
    boss.update();
    assert_eq!(boss.phase, BossPhase::One);
    assert_eq!(boss.fire_rate(), 30);
    assert_eq!(boss.shoot().len(), 1);

    boss.health = 49;
    boss.update();
    assert_eq!(boss.phase, BossPhase::Two);
    assert_eq!(boss.fire_rate(), 20);
    assert_eq!(boss.shoot().len(), 3);
    assert_ne!(boss.color(), Boss::default().color());
}

// ── Projectiles, particles, power-ups ────────────────────────────────────────

#[test]
fn enemy_bullet_hitbox_is_centred() {
    let b = EnemyBullet::new(50.0, 60.0, 0.0);
    assert_eq!(b.rect(), Rect::new(45.0, 55.0, 10.0, 10.0));
}

#[test]
fn bullet_off_screen_edges() {
    assert!(Bullet::new(-1.0, 100.0).is_off_screen());
    assert!(Bullet::new(801.0, 100.0).is_off_screen());
    assert!(Bullet::new(100.0, -0.5).is_off_screen());
    assert!(!Bullet::new(800.0, 0.0).is_off_screen());
}

#[test]
fn particle_shrinks_and_ages() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut p = Particle::new(0.0, 0.0, Rgb(9, 9, 9), &mut rng);
    assert!((2.0..=5.0).contains(&p.size));
    assert!(p.vx.abs() <= 3.0 && p.vy.abs() <= 3.0);
    for _ in 0..30 {
        p.update();
    }
    assert!(p.is_expired());
    assert!(p.size >= 1.0);
}

#[test]
fn random_power_up_covers_every_kind() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut seen = Vec::new();
    for _ in 0..200 {
        let kind = PowerUpKind::random(&mut rng);
        if !seen.contains(&kind) {
            seen.push(kind);
        }
    }
    assert_eq!(seen.len(), PowerUpKind::ALL.len());
}

// ── Invariants ───────────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn health_and_shield_stay_in_range(
        shield in 0u32..=50,
        health in 1u32..=100,
        hits in prop::collection::vec(0u32..60, 0..20),
        pickups in prop::collection::vec(0usize..4, 0..10),
    ) {
        let mut p = Player { shield, health, ..Player::default() };
        for (i, dmg) in hits.iter().enumerate() {
            p.take_damage(*dmg);
            if let Some(&k) = pickups.get(i) {
                match PowerUpKind::ALL[k] {
                    PowerUpKind::Health => p.heal(30),
                    PowerUpKind::Shield => p.add_shield(30),
                    PowerUpKind::WeaponUp => p.upgrade_weapon(),
                    PowerUpKind::RapidFire => {}
                }
            }
            prop_assert!(p.health <= p.max_health);
            prop_assert!(p.shield <= p.max_shield);
            prop_assert!((1..=3).contains(&p.weapon_level));
        }
    }

    #[test]
    fn shield_overflow_formula(shield in 1u32..=50, damage in 0u32..200) {
        let mut p = Player { shield, ..Player::default() };
        p.take_damage(damage);
        let overflow = damage.saturating_sub(shield);
        prop_assert_eq!(p.shield, shield.saturating_sub(damage));
        prop_assert_eq!(p.health, 100u32.saturating_sub(overflow));
    }
}
