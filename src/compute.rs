//! Pure game-logic functions.
//!
//! Every public function takes an immutable reference to the current
//! `GameState` (plus the frame's `Controls` and, where needed, an RNG handle)
//! and returns a brand-new `GameState`. Side effects are limited to the
//! injected RNG and log output.
//!
//! Entity lists are never edited while being walked: each phase takes the
//! list out of the state, decides the fate of every element once, and puts
//! the survivors back. An element that is dropped in a phase is therefore
//! never looked at again that frame.

use log::{debug, info};
use rand::Rng;

use crate::consts::*;
use crate::entities::{
    Boss, Bullet, Enemy, EnemyKind, GameState, GameStatus, Particle, PowerUp, PowerUpKind, Rgb,
};
use crate::platform::Controls;

// ── Tables ───────────────────────────────────────────────────────────────────

/// Frames between enemy spawns; shrinks with each wave down to a floor.
pub fn enemy_spawn_rate(wave: u32) -> u32 {
    ENEMY_SPAWN_BASE
        .saturating_sub(wave.saturating_mul(ENEMY_SPAWN_STEP))
        .max(ENEMY_SPAWN_FLOOR)
}

/// Score for a kill that brings the combo to `combo`.
pub fn kill_score(kind: EnemyKind, combo: u32) -> u32 {
    kind.points() + COMBO_BONUS_PER_STEP * combo
}

fn is_boss_wave(wave: u32) -> bool {
    wave % BOSS_WAVE_INTERVAL == 0
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// Startup state: full health, wave 1, nothing on screen.
pub fn init_state() -> GameState {
    GameState::default()
}

/// Throw the whole session away and start over.
pub fn restart() -> GameState {
    info!("restarting session");
    init_state()
}

// ── Input-driven state transitions (pure) ───────────────────────────────────

/// Sum the held directions, scale by the ship speed and keep the ship fully
/// on-screen.
pub fn move_player(state: &GameState, controls: &Controls) -> GameState {
    let mut next = state.clone();
    apply_movement(&mut next, controls);
    next
}

/// Fire a volley if the cooldown has run out; otherwise a no-op.
pub fn player_shoot(state: &GameState) -> GameState {
    let mut next = state.clone();
    fire_volley(&mut next);
    next
}

/// Apply a collected power-up to the player / session.
pub fn apply_power_up(state: &GameState, kind: PowerUpKind) -> GameState {
    let mut next = state.clone();
    collect_power_up(&mut next, kind);
    next
}

fn apply_movement(s: &mut GameState, controls: &Controls) {
    let p = &mut s.player;
    let mut dx = 0.0;
    let mut dy = 0.0;
    if controls.left {
        dx -= p.speed;
    }
    if controls.right {
        dx += p.speed;
    }
    if controls.up {
        dy -= p.speed;
    }
    if controls.down {
        dy += p.speed;
    }
    p.x = (p.x + dx).clamp(0.0, WIDTH - p.w);
    p.y = (p.y + dy).clamp(0.0, HEIGHT - p.h);
}

fn fire_volley(s: &mut GameState) {
    if s.shoot_cooldown > 0 {
        return;
    }
    let cx = s.player.center_x();
    let y = s.player.y;
    match s.player.weapon_level {
        0 | 1 => s.bullets.push(Bullet::new(cx - 2.0, y)),
        2 => {
            s.bullets.push(Bullet::new(cx - 10.0, y));
            s.bullets.push(Bullet::new(cx + 6.0, y));
        }
        _ => {
            let offsets: [f32; 3] = [-10.0, -2.0, 6.0];
            for (dx, angle) in offsets.into_iter().zip(WEAPON_FAN) {
                s.bullets.push(Bullet::angled(cx + dx, y, angle));
            }
        }
    }
    s.shoot_cooldown = if s.is_rapid_fire() {
        RAPID_FIRE_RATE
    } else {
        FIRE_RATE
    };
}

fn collect_power_up(s: &mut GameState, kind: PowerUpKind) {
    match kind {
        PowerUpKind::Health => s.player.heal(HEALTH_PICKUP),
        PowerUpKind::RapidFire => s.rapid_fire_timer = RAPID_FIRE_DURATION,
        PowerUpKind::Shield => s.player.add_shield(SHIELD_PICKUP),
        PowerUpKind::WeaponUp => s.player.upgrade_weapon(),
    }
    debug!("picked up {:?}", kind);
}

// ── Particles ────────────────────────────────────────────────────────────────

fn burst(s: &mut GameState, count: usize, (x, y): (f32, f32), color: Rgb, rng: &mut impl Rng) {
    for _ in 0..count {
        s.particles.push(Particle::new(x, y, color, rng));
    }
}

/// Like `burst`, but each particle picks its own colour from `palette`.
fn burst_mixed(
    s: &mut GameState,
    count: usize,
    (x, y): (f32, f32),
    palette: &[Rgb],
    rng: &mut impl Rng,
) {
    for _ in 0..count {
        let color = palette[rng.gen_range(0..palette.len())];
        s.particles.push(Particle::new(x, y, color, rng));
    }
}

// ── Per-frame tick (nearly pure, RNG is injected) ─────────────────────────

/// Advance the simulation by one frame. All randomness comes through `rng`
/// so callers control determinism (useful for tests with a seeded RNG).
///
/// Once the game is over nothing moves; the only transition left is the
/// restart action, which returns a fresh session.
pub fn tick(state: &GameState, controls: &Controls, rng: &mut impl Rng) -> GameState {
    if state.status == GameStatus::GameOver {
        return if controls.restart {
            restart()
        } else {
            state.clone()
        };
    }

    let mut s = state.clone();
    s.frame += 1;

    // ── 1. Player movement & firing ──────────────────────────────────────────
    apply_movement(&mut s, controls);
    s.shoot_cooldown = s.shoot_cooldown.saturating_sub(1);
    if controls.fire {
        fire_volley(&mut s);
    }

    // ── 2. Timers ────────────────────────────────────────────────────────────
    s.rapid_fire_timer = s.rapid_fire_timer.saturating_sub(1);
    s.combo_timer = s.combo_timer.saturating_sub(1);
    if s.combo_timer == 0 {
        s.combo = 0;
    }

    // ── 3. Boss trigger ──────────────────────────────────────────────────────
    if is_boss_wave(s.wave) && s.kills_this_wave >= BOSS_TRIGGER_KILLS && s.boss.is_none() {
        info!("wave {}: boss incoming, clearing {} enemies", s.wave, s.enemies.len());
        s.enemies.clear();
        s.boss = Some(Boss::default());
    }

    // ── 4. Spawning ──────────────────────────────────────────────────────────
    spawn_enemies(&mut s, rng);
    spawn_power_ups(&mut s, rng);

    // ── 5. Boss ──────────────────────────────────────────────────────────────
    update_boss(&mut s, rng);

    // ── 6. Projectiles ───────────────────────────────────────────────────────
    update_enemy_bullets(&mut s, rng);
    update_player_bullets(&mut s);

    // ── 7. Enemies (movement + every collision they take part in) ──────────
    update_enemies(&mut s, rng);

    // ── 8. Power-ups & particles ─────────────────────────────────────────────
    update_power_ups(&mut s, rng);
    update_particles(&mut s);

    // ── 9. Game over ─────────────────────────────────────────────────────────
    if s.player.is_dead() {
        info!("game over: score {} on wave {}", s.score, s.wave);
        s.status = GameStatus::GameOver;
    }

    s
}

fn spawn_enemies(s: &mut GameState, rng: &mut impl Rng) {
    if s.boss.is_some() {
        return;
    }
    s.enemy_spawn_timer += 1;
    if s.enemy_spawn_timer > enemy_spawn_rate(s.wave) {
        let kind = EnemyKind::for_wave(s.wave, rng.gen::<f64>());
        s.enemies.push(Enemy::spawn(kind, rng));
        s.enemy_spawn_timer = 0;
    }
}

fn spawn_power_ups(s: &mut GameState, rng: &mut impl Rng) {
    s.power_up_spawn_timer += 1;
    if s.power_up_spawn_timer > POWER_UP_SPAWN_INTERVAL {
        let power_up = PowerUp::spawn(rng);
        debug!("spawned {:?} power-up at x={}", power_up.kind, power_up.x);
        s.power_ups.push(power_up);
        s.power_up_spawn_timer = 0;
    }
}

fn update_boss(s: &mut GameState, rng: &mut impl Rng) {
    let Some(mut boss) = s.boss.take() else {
        return;
    };

    boss.update();
    boss.shoot_timer += 1;
    if boss.shoot_timer > boss.fire_rate() {
        s.enemy_bullets.extend(boss.shoot());
        boss.shoot_timer = 0;
    }

    // Player bullets vs boss. No combo interaction.
    let boss_rect = boss.rect();
    let bullets = std::mem::take(&mut s.bullets);
    for bullet in bullets {
        if boss_rect.intersects(&bullet.rect()) {
            boss.health = boss.health.saturating_sub(bullet.damage);
            burst(s, BURST_BOSS_HIT, (bullet.x, bullet.y), ORANGE, rng);
        } else {
            s.bullets.push(bullet);
        }
    }

    if boss.is_defeated() {
        let center = boss.rect().center();
        s.score += BOSS_POINTS;
        s.wave += 1;
        s.kills_this_wave = 0;
        burst_mixed(s, BURST_BOSS_DEATH, center, &[YELLOW, ORANGE, RED, PURPLE], rng);
        s.power_ups
            .push(PowerUp::new(PowerUpKind::WeaponUp, center.0, center.1));
        info!("boss defeated, advancing to wave {}", s.wave);
    } else {
        s.boss = Some(boss);
    }
}

fn update_enemy_bullets(s: &mut GameState, rng: &mut impl Rng) {
    let player_rect = s.player.rect();
    let bullets = std::mem::take(&mut s.enemy_bullets);
    for mut bullet in bullets {
        bullet.update();
        if bullet.is_off_screen() {
            continue;
        }
        if bullet.rect().intersects(&player_rect) {
            s.player.take_damage(ENEMY_BULLET_DAMAGE);
            burst(s, BURST_PLAYER_HIT, (bullet.x, bullet.y), RED, rng);
            continue;
        }
        s.enemy_bullets.push(bullet);
    }
}

fn update_player_bullets(s: &mut GameState) {
    for bullet in &mut s.bullets {
        bullet.update();
    }
    s.bullets.retain(|b| !b.is_off_screen());
}

fn update_enemies(s: &mut GameState, rng: &mut impl Rng) {
    let enemies = std::mem::take(&mut s.enemies);
    for mut enemy in enemies {
        enemy.update();

        // Slipped past the player: gone, and the streak with it.
        if enemy.is_off_screen() {
            s.combo = 0;
            continue;
        }

        let rect = enemy.rect();
        if rect.intersects(&s.player.rect()) {
            s.player.take_damage(ENEMY_RAM_DAMAGE);
            s.combo = 0;
            burst(s, BURST_RAM, rect.center(), RED, rng);
            continue;
        }

        // Each bullet is spent on the first enemy it touches, and a dead
        // enemy soaks no further bullets.
        while let Some(i) = s.bullets.iter().position(|b| b.rect().intersects(&rect)) {
            let bullet = s.bullets.remove(i);
            enemy.health = enemy.health.saturating_sub(bullet.damage);
            if enemy.health == 0 {
                break;
            }
        }

        if enemy.health == 0 {
            record_kill(s, &enemy);
            burst_mixed(s, BURST_KILL, rect.center(), &[YELLOW, ORANGE, RED], rng);
            continue;
        }

        s.enemies.push(enemy);
    }
}

fn record_kill(s: &mut GameState, enemy: &Enemy) {
    s.combo += 1;
    s.combo_timer = COMBO_WINDOW;
    s.score += kill_score(enemy.kind, s.combo);
    s.kills_this_wave += 1;

    if s.kills_this_wave >= WAVE_ADVANCE_KILLS && s.boss.is_none() && !is_boss_wave(s.wave) {
        s.wave += 1;
        s.kills_this_wave = 0;
        info!("advancing to wave {}", s.wave);
    }
}

fn update_power_ups(s: &mut GameState, rng: &mut impl Rng) {
    let power_ups = std::mem::take(&mut s.power_ups);
    for mut power_up in power_ups {
        power_up.update();
        if power_up.is_off_screen() {
            continue;
        }
        if power_up.rect().intersects(&s.player.rect()) {
            collect_power_up(s, power_up.kind);
            burst(s, BURST_PICKUP, (power_up.x, power_up.y), GREEN, rng);
            continue;
        }
        s.power_ups.push(power_up);
    }
}

fn update_particles(s: &mut GameState) {
    for particle in &mut s.particles {
        particle.update();
    }
    s.particles.retain(|p| !p.is_expired());
}
