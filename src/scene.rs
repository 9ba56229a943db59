//! Scene layer: translates a `GameState` into `Renderer` calls.
//!
//! No game logic is performed here. Draw order is back to front:
//! starfield, ship, projectiles, enemies, boss, particles, power-ups, HUD.

use crate::consts::*;
use crate::entities::{Boss, Enemy, EnemyKind, GameState, GameStatus, Player, PowerUp, PowerUpKind, Rect};
use crate::error::Result;
use crate::platform::{Renderer, TextSize};

const STAR_COUNT: u64 = 50;

const HEALTH_BAR: Rect = Rect {
    x: 10.0,
    y: 40.0,
    w: 200.0,
    h: 20.0,
};
const SHIELD_BAR: Rect = Rect {
    x: 10.0,
    y: 65.0,
    w: 200.0,
    h: 15.0,
};

// ── Public entry point ────────────────────────────────────────────────────────

/// Render and present one complete frame. `ticks_ms` only drives the
/// scrolling starfield.
pub fn render<R: Renderer>(out: &mut R, state: &GameState, ticks_ms: u64) -> Result<()> {
    out.clear(BLACK);

    draw_stars(out, ticks_ms);
    draw_player(out, &state.player);

    for bullet in &state.bullets {
        out.fill_rect(bullet.rect(), YELLOW);
    }
    for bullet in &state.enemy_bullets {
        out.fill_circle((bullet.x, bullet.y), ENEMY_BULLET_RADIUS, RED);
    }
    for enemy in &state.enemies {
        draw_enemy(out, enemy);
    }
    if let Some(boss) = &state.boss {
        draw_boss(out, boss);
    }
    for particle in &state.particles {
        out.fill_circle((particle.x, particle.y), particle.size, particle.color);
    }
    for power_up in &state.power_ups {
        draw_power_up(out, power_up);
    }

    draw_hud(out, state);

    if state.status == GameStatus::GameOver {
        draw_game_over(out, state);
    }

    out.present()
}

// ── Background ────────────────────────────────────────────────────────────────

/// Star `i` sits in a fixed column and drifts down one unit every 10 ms.
pub fn star_position(i: u64, ticks_ms: u64) -> (f32, f32) {
    let x = (i * 123) % WIDTH as u64;
    let y = (i * 456 + ticks_ms / 10) % HEIGHT as u64;
    (x as f32, y as f32)
}

fn draw_stars<R: Renderer>(out: &mut R, ticks_ms: u64) {
    for i in 0..STAR_COUNT {
        out.fill_circle(star_position(i, ticks_ms), 1.0, WHITE);
    }
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_player<R: Renderer>(out: &mut R, p: &Player) {
    let cx = p.center_x();
    if p.shield > 0 {
        out.stroke_circle((cx, p.y + p.h / 2.0), p.w, SHIELD_BLUE);
    }

    // Hull, nose up
    out.fill_polygon(&[(cx, p.y), (p.x, p.y + p.h), (p.x + p.w, p.y + p.h)], CYAN);
    // Cockpit
    out.fill_circle((cx, p.y + 15.0), 8.0, BLUE);

    // One pip per weapon upgrade
    for i in 1..p.weapon_level {
        let pip_x = p.x + 10.0 * i as f32;
        out.fill_circle((pip_x, p.y + p.h - 5.0), 2.0, GOLD);
    }
}

fn draw_enemy<R: Renderer>(out: &mut R, e: &Enemy) {
    let color = e.kind.color();
    out.fill_rect(e.rect(), color);
    out.fill_polygon(
        &[(e.x, e.y), (e.x + e.w / 2.0, e.y - 10.0), (e.x + e.w, e.y)],
        color.halved(),
    );

    if e.kind == EnemyKind::Tank {
        draw_health_bar(out, Rect::new(e.x, e.y - 8.0, e.w, 4.0), e.health, e.max_health);
    }
}

fn draw_boss<R: Renderer>(out: &mut R, b: &Boss) {
    out.fill_rect(b.rect(), b.color());
    out.fill_rect(Rect::new(b.x + 10.0, b.y + 10.0, b.w - 20.0, b.h - 20.0), ORANGE);

    for eye_x in [b.x + 30.0, b.x + 70.0] {
        out.fill_circle((eye_x, b.y + 40.0), 10.0, YELLOW);
        out.fill_circle((eye_x, b.y + 40.0), 5.0, RED);
    }

    let bar = Rect::new(b.x, b.y - 15.0, b.w, 8.0);
    draw_health_bar(out, bar, b.health, b.max_health);
    out.stroke_rect(bar, WHITE);
}

fn draw_power_up<R: Renderer>(out: &mut R, p: &PowerUp) {
    let (cx, cy) = p.rect().center();
    out.fill_circle((cx, cy), p.w / 2.0, p.kind.color());
    out.fill_circle((cx, cy), p.w / 4.0, WHITE);

    match p.kind {
        PowerUpKind::Health => {
            out.fill_rect(Rect::new(cx - 5.0, cy - 1.0, 10.0, 2.0), WHITE);
            out.fill_rect(Rect::new(cx - 1.0, cy - 5.0, 2.0, 10.0), WHITE);
        }
        PowerUpKind::WeaponUp => {
            out.fill_polygon(&[(cx, cy - 5.0), (cx - 4.0, cy + 5.0), (cx + 4.0, cy + 5.0)], WHITE);
        }
        PowerUpKind::RapidFire | PowerUpKind::Shield => {}
    }
}

/// Red background with a green fill proportional to `value / max`.
fn draw_health_bar<R: Renderer>(out: &mut R, bar: Rect, value: u32, max: u32) {
    out.fill_rect(bar, RED);
    let ratio = if max == 0 { 0.0 } else { value as f32 / max as f32 };
    out.fill_rect(Rect { w: bar.w * ratio, ..bar }, GREEN);
}

// ── HUD ───────────────────────────────────────────────────────────────────────

fn draw_hud<R: Renderer>(out: &mut R, state: &GameState) {
    out.draw_text(&format!("Score: {}", state.score), (10.0, 10.0), WHITE, TextSize::Small);
    out.draw_text(&format!("Wave: {}", state.wave), (WIDTH - 120.0, 10.0), WHITE, TextSize::Small);

    if state.combo > 1 {
        out.draw_text(
            &format!("x{} COMBO!", state.combo),
            (WIDTH / 2.0 - 80.0, 50.0),
            GOLD,
            TextSize::Large,
        );
    }

    let p = &state.player;
    out.fill_rect(HEALTH_BAR, RED);
    out.fill_rect(
        Rect { w: HEALTH_BAR.w * p.health as f32 / p.max_health as f32, ..HEALTH_BAR },
        GREEN,
    );
    out.stroke_rect(HEALTH_BAR, WHITE);

    if p.shield > 0 {
        out.fill_rect(SHIELD_BAR, SHIELD_BAR_BG);
        out.fill_rect(
            Rect { w: SHIELD_BAR.w * p.shield as f32 / p.max_shield as f32, ..SHIELD_BAR },
            CYAN,
        );
        out.stroke_rect(SHIELD_BAR, WHITE);
    }

    if state.is_rapid_fire() {
        out.draw_text("RAPID FIRE!", (10.0, 85.0), PURPLE, TextSize::Small);
    }

    if state.is_boss_active() {
        out.draw_text("BOSS BATTLE!", (WIDTH / 2.0 - 100.0, 10.0), RED, TextSize::Large);
    }
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<R: Renderer>(out: &mut R, state: &GameState) {
    let cx = WIDTH / 2.0;
    let cy = HEIGHT / 2.0;
    out.draw_text("GAME OVER", (cx - 100.0, cy - 80.0), RED, TextSize::Large);
    out.draw_text(
        &format!("Final Score: {}", state.score),
        (cx - 120.0, cy - 30.0),
        WHITE,
        TextSize::Large,
    );
    out.draw_text(
        &format!("Reached Wave: {}", state.wave),
        (cx - 100.0, cy + 10.0),
        WHITE,
        TextSize::Small,
    );
    out.draw_text("Press R to Restart", (cx - 100.0, cy + 50.0), WHITE, TextSize::Small);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stars_scroll_down_and_wrap() {
        assert_eq!(star_position(0, 0), (0.0, 0.0));
        assert_eq!(star_position(1, 0), (123.0, 456.0));
        assert_eq!(star_position(1, 100), (123.0, 466.0));
        // 456 + 150 = 606 wraps to 6
        assert_eq!(star_position(1, 1500), (123.0, 6.0));
    }
}
