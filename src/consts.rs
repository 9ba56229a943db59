//! Balance and layout constants. Everything is hard-coded on purpose: there is
//! no difficulty selection.

use crate::entities::Rgb;

// ── World ─────────────────────────────────────────────────────────────────────

pub const WIDTH: f32 = 800.0;
pub const HEIGHT: f32 = 600.0;
pub const TARGET_FPS: u32 = 60;

// ── Player ────────────────────────────────────────────────────────────────────

pub const PLAYER_SIZE: f32 = 40.0;
pub const PLAYER_SPEED: f32 = 5.0;
pub const PLAYER_MAX_HEALTH: u32 = 100;
pub const PLAYER_MAX_SHIELD: u32 = 50;
pub const MAX_WEAPON_LEVEL: u8 = 3;

/// Frames between shots.
pub const FIRE_RATE: u32 = 15;
/// Frames between shots while rapid fire is active.
pub const RAPID_FIRE_RATE: u32 = 5;

// ── Projectiles ───────────────────────────────────────────────────────────────

pub const BULLET_SPEED: f32 = 8.0;
pub const BULLET_WIDTH: f32 = 4.0;
pub const BULLET_HEIGHT: f32 = 15.0;
pub const BULLET_DAMAGE: u32 = 1;
/// Fan angles (degrees) for a level-3 volley, left to right.
pub const WEAPON_FAN: [f32; 3] = [-10.0, 0.0, 10.0];

pub const ENEMY_BULLET_SPEED: f32 = 5.0;
pub const ENEMY_BULLET_RADIUS: f32 = 5.0;

// ── Damage ────────────────────────────────────────────────────────────────────

pub const ENEMY_BULLET_DAMAGE: u32 = 10;
pub const ENEMY_RAM_DAMAGE: u32 = 20;

// ── Scoring ───────────────────────────────────────────────────────────────────

/// Frames a combo survives without a kill.
pub const COMBO_WINDOW: u32 = 120;
pub const COMBO_BONUS_PER_STEP: u32 = 2;
pub const BOSS_POINTS: u32 = 500;

// ── Waves & spawning ──────────────────────────────────────────────────────────

pub const BOSS_WAVE_INTERVAL: u32 = 5;
pub const BOSS_TRIGGER_KILLS: u32 = 20;
pub const WAVE_ADVANCE_KILLS: u32 = 30;

pub const ENEMY_SPAWN_BASE: u32 = 40;
pub const ENEMY_SPAWN_STEP: u32 = 2;
pub const ENEMY_SPAWN_FLOOR: u32 = 20;
pub const POWER_UP_SPAWN_INTERVAL: u32 = 600;

pub const TANK_MIN_WAVE: u32 = 3;
pub const TANK_CHANCE: f64 = 0.2;
pub const FAST_MIN_WAVE: u32 = 2;
pub const FAST_CHANCE: f64 = 0.5;

// ── Boss ──────────────────────────────────────────────────────────────────────

pub const BOSS_SIZE: f32 = 100.0;
pub const BOSS_MAX_HEALTH: u32 = 100;
pub const BOSS_DESCENT_SPEED: f32 = 1.0;
pub const BOSS_PATROL_SPEED: f32 = 2.0;
/// The boss stops descending once its top edge reaches this row.
pub const BOSS_PATROL_Y: f32 = 80.0;
pub const BOSS_FIRE_RATE_PHASE_ONE: u32 = 30;
pub const BOSS_FIRE_RATE_PHASE_TWO: u32 = 20;
pub const BOSS_SPREAD: [f32; 3] = [-20.0, 0.0, 20.0];

// ── Power-ups ─────────────────────────────────────────────────────────────────

pub const POWER_UP_SIZE: f32 = 30.0;
pub const POWER_UP_SPEED: f32 = 2.0;
pub const HEALTH_PICKUP: u32 = 30;
pub const SHIELD_PICKUP: u32 = 30;
pub const RAPID_FIRE_DURATION: u32 = 300;

// ── Particles ─────────────────────────────────────────────────────────────────

pub const PARTICLE_LIFE: u32 = 30;
pub const PARTICLE_MAX_SPEED: f32 = 3.0;
pub const PARTICLE_SHRINK: f32 = 0.1;

pub const BURST_BOSS_HIT: usize = 5;
pub const BURST_PLAYER_HIT: usize = 8;
pub const BURST_PICKUP: usize = 10;
pub const BURST_RAM: usize = 15;
pub const BURST_KILL: usize = 20;
pub const BURST_BOSS_DEATH: usize = 50;

// ── Palette ───────────────────────────────────────────────────────────────────

pub const BLACK: Rgb = Rgb(0, 0, 0);
pub const WHITE: Rgb = Rgb(255, 255, 255);
pub const RED: Rgb = Rgb(255, 0, 0);
pub const GREEN: Rgb = Rgb(0, 255, 0);
pub const BLUE: Rgb = Rgb(0, 100, 255);
pub const YELLOW: Rgb = Rgb(255, 255, 0);
pub const CYAN: Rgb = Rgb(0, 255, 255);
pub const PURPLE: Rgb = Rgb(200, 0, 255);
pub const ORANGE: Rgb = Rgb(255, 165, 0);
pub const PINK: Rgb = Rgb(255, 105, 180);
pub const GOLD: Rgb = Rgb(255, 215, 0);
pub const DARK_PURPLE: Rgb = Rgb(100, 0, 100);
pub const SHIELD_BLUE: Rgb = Rgb(0, 200, 255);
pub const SHIELD_BAR_BG: Rgb = Rgb(0, 100, 150);
