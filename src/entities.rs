//! All game entity types: plain data plus the small per-entity behaviour
//! (movement, damage, spawning helpers). Nothing here knows about the loop.

use rand::Rng;

use crate::consts::*;

// ── Geometry & colour ────────────────────────────────────────────────────────

/// 24-bit colour, independent of any terminal colour type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Same hue at half brightness (used for enemy nose cones).
    pub fn halved(self) -> Rgb {
        Rgb(self.0 / 2, self.1 / 2, self.2 / 2)
    }
}

/// Axis-aligned bounding box in world units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Strict overlap: rectangles that only share an edge do not collide.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.x + other.w
            && other.x < self.x + self.w
            && self.y < other.y + other.h
            && other.y < self.y + self.h
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.w / 2.0, self.y + self.h / 2.0)
    }
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub speed: f32,
    pub health: u32,
    pub max_health: u32,
    pub shield: u32,
    pub max_shield: u32,
    /// 1..=MAX_WEAPON_LEVEL; number of bullets per volley.
    pub weapon_level: u8,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            x: WIDTH / 2.0,
            y: HEIGHT - 80.0,
            w: PLAYER_SIZE,
            h: PLAYER_SIZE,
            speed: PLAYER_SPEED,
            health: PLAYER_MAX_HEALTH,
            max_health: PLAYER_MAX_HEALTH,
            shield: 0,
            max_shield: PLAYER_MAX_SHIELD,
            weapon_level: 1,
        }
    }
}

impl Player {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.w, self.h)
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.w / 2.0
    }

    /// Shield soaks damage first; whatever it cannot absorb hits health.
    pub fn take_damage(&mut self, damage: u32) {
        if self.shield > 0 {
            let overflow = damage.saturating_sub(self.shield);
            self.shield = self.shield.saturating_sub(damage);
            self.health = self.health.saturating_sub(overflow);
        } else {
            self.health = self.health.saturating_sub(damage);
        }
    }

    pub fn heal(&mut self, amount: u32) {
        self.health = (self.health + amount).min(self.max_health);
    }

    pub fn add_shield(&mut self, amount: u32) {
        self.shield = (self.shield + amount).min(self.max_shield);
    }

    pub fn upgrade_weapon(&mut self) {
        self.weapon_level = (self.weapon_level + 1).min(MAX_WEAPON_LEVEL);
    }

    pub fn is_dead(&self) -> bool {
        self.health == 0
    }
}

// ── Projectiles ───────────────────────────────────────────────────────────────

/// A player-fired bullet. `angle` is in degrees from straight up, positive
/// leaning right.
#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub x: f32,
    pub y: f32,
    pub speed: f32,
    pub angle: f32,
    pub damage: u32,
}

impl Bullet {
    pub fn new(x: f32, y: f32) -> Self {
        Self::angled(x, y, 0.0)
    }

    pub fn angled(x: f32, y: f32, angle: f32) -> Self {
        Self {
            x,
            y,
            speed: BULLET_SPEED,
            angle,
            damage: BULLET_DAMAGE,
        }
    }

    pub fn update(&mut self) {
        let rad = self.angle.to_radians();
        self.y -= self.speed * rad.cos();
        self.x += self.speed * rad.sin();
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, BULLET_WIDTH, BULLET_HEIGHT)
    }

    pub fn is_off_screen(&self) -> bool {
        self.y < 0.0 || self.x < 0.0 || self.x > WIDTH
    }
}

/// A boss-fired bullet. Position is the centre; `angle` is in degrees from
/// straight down.
#[derive(Clone, Debug, PartialEq)]
pub struct EnemyBullet {
    pub x: f32,
    pub y: f32,
    pub speed: f32,
    pub angle: f32,
}

impl EnemyBullet {
    pub fn new(x: f32, y: f32, angle: f32) -> Self {
        Self {
            x,
            y,
            speed: ENEMY_BULLET_SPEED,
            angle,
        }
    }

    pub fn update(&mut self) {
        let rad = self.angle.to_radians();
        self.y += self.speed * rad.cos();
        self.x += self.speed * rad.sin();
    }

    pub fn rect(&self) -> Rect {
        Rect::new(
            self.x - ENEMY_BULLET_RADIUS,
            self.y - ENEMY_BULLET_RADIUS,
            ENEMY_BULLET_RADIUS * 2.0,
            ENEMY_BULLET_RADIUS * 2.0,
        )
    }

    pub fn is_off_screen(&self) -> bool {
        self.y > HEIGHT || self.x < 0.0 || self.x > WIDTH
    }
}

// ── Enemies ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnemyKind {
    Normal,
    Fast,
    Tank,
}

impl EnemyKind {
    /// Pick a variant for `wave` from a uniform draw in `[0, 1)`.
    /// Tanks unlock at wave 3, fast enemies at wave 2.
    pub fn for_wave(wave: u32, roll: f64) -> EnemyKind {
        if wave >= TANK_MIN_WAVE && roll < TANK_CHANCE {
            EnemyKind::Tank
        } else if wave >= FAST_MIN_WAVE && roll < FAST_CHANCE {
            EnemyKind::Fast
        } else {
            EnemyKind::Normal
        }
    }

    /// Inclusive-exclusive range the descent speed is drawn from.
    pub fn speed_range(self) -> (f32, f32) {
        match self {
            EnemyKind::Normal => (1.5, 3.5),
            EnemyKind::Fast => (3.5, 5.0),
            EnemyKind::Tank => (1.0, 2.0),
        }
    }

    pub fn health(self) -> u32 {
        match self {
            EnemyKind::Normal => 2,
            EnemyKind::Fast => 1,
            EnemyKind::Tank => 5,
        }
    }

    /// Base score for destroying this variant (before combo bonus).
    pub fn points(self) -> u32 {
        match self {
            EnemyKind::Normal => 10,
            EnemyKind::Fast => 15,
            EnemyKind::Tank => 30,
        }
    }

    pub fn size(self) -> f32 {
        match self {
            EnemyKind::Tank => 45.0,
            EnemyKind::Normal | EnemyKind::Fast => 35.0,
        }
    }

    pub fn color(self) -> Rgb {
        match self {
            EnemyKind::Normal => RED,
            EnemyKind::Fast => PINK,
            EnemyKind::Tank => DARK_PURPLE,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub speed: f32,
    pub health: u32,
    pub max_health: u32,
    pub kind: EnemyKind,
}

impl Enemy {
    pub fn new(kind: EnemyKind, x: f32, y: f32, speed: f32) -> Self {
        let size = kind.size();
        Self {
            x,
            y,
            w: size,
            h: size,
            speed,
            health: kind.health(),
            max_health: kind.health(),
            kind,
        }
    }

    /// A fresh enemy at a random column just above the screen.
    pub fn spawn(kind: EnemyKind, rng: &mut impl Rng) -> Self {
        let x = rng.gen_range(0..=(WIDTH as i32 - 40)) as f32;
        let y = rng.gen_range(-100..=-40) as f32;
        let (lo, hi) = kind.speed_range();
        let speed = rng.gen_range(lo..hi);
        Self::new(kind, x, y, speed)
    }

    pub fn update(&mut self) {
        self.y += self.speed;
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.w, self.h)
    }

    pub fn is_off_screen(&self) -> bool {
        self.y > HEIGHT
    }
}

// ── Boss ──────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BossMovement {
    /// Entering from above the screen.
    Descending,
    /// Sliding sideways; `direction` is +1.0 (right) or -1.0 (left).
    Patrolling { direction: f32 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BossPhase {
    /// Single aimed-down shot, slow fire rate.
    One,
    /// Three-way spread, faster fire rate. Entered below half health.
    Two,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Boss {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub health: u32,
    pub max_health: u32,
    pub movement: BossMovement,
    pub phase: BossPhase,
    /// Frames since the last volley.
    pub shoot_timer: u32,
}

impl Default for Boss {
    fn default() -> Self {
        Self {
            x: WIDTH / 2.0 - BOSS_SIZE / 2.0,
            y: -150.0,
            w: BOSS_SIZE,
            h: BOSS_SIZE,
            health: BOSS_MAX_HEALTH,
            max_health: BOSS_MAX_HEALTH,
            movement: BossMovement::Descending,
            phase: BossPhase::One,
            shoot_timer: 0,
        }
    }
}

impl Boss {
    pub fn update(&mut self) {
        match self.movement {
            BossMovement::Descending => {
                self.y += BOSS_DESCENT_SPEED;
                if self.y >= BOSS_PATROL_Y {
                    self.movement = BossMovement::Patrolling { direction: 1.0 };
                }
            }
            BossMovement::Patrolling { direction } => {
                self.x += direction * BOSS_PATROL_SPEED;
                if self.x <= 0.0 || self.x >= WIDTH - self.w {
                    self.movement = BossMovement::Patrolling {
                        direction: -direction,
                    };
                }
            }
        }

        // health * 2 < max is "below 50%" without going through floats
        if self.health * 2 < self.max_health {
            self.phase = BossPhase::Two;
        }
    }

    /// Frames the shoot timer must exceed before the next volley.
    pub fn fire_rate(&self) -> u32 {
        match self.phase {
            BossPhase::One => BOSS_FIRE_RATE_PHASE_ONE,
            BossPhase::Two => BOSS_FIRE_RATE_PHASE_TWO,
        }
    }

    pub fn shoot(&self) -> Vec<EnemyBullet> {
        let muzzle_x = self.x + self.w / 2.0;
        let muzzle_y = self.y + self.h;
        match self.phase {
            BossPhase::One => vec![EnemyBullet::new(muzzle_x, muzzle_y, 0.0)],
            BossPhase::Two => BOSS_SPREAD
                .iter()
                .map(|&angle| EnemyBullet::new(muzzle_x, muzzle_y, angle))
                .collect(),
        }
    }

    pub fn color(&self) -> Rgb {
        match self.phase {
            BossPhase::One => RED,
            BossPhase::Two => PURPLE,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.w, self.h)
    }

    pub fn is_defeated(&self) -> bool {
        self.health == 0
    }
}

// ── Particles ─────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    /// Remaining frames.
    pub life: u32,
    pub size: f32,
    pub color: Rgb,
}

impl Particle {
    pub fn new(x: f32, y: f32, color: Rgb, rng: &mut impl Rng) -> Self {
        Self {
            x,
            y,
            vx: rng.gen_range(-PARTICLE_MAX_SPEED..=PARTICLE_MAX_SPEED),
            vy: rng.gen_range(-PARTICLE_MAX_SPEED..=PARTICLE_MAX_SPEED),
            life: PARTICLE_LIFE,
            size: rng.gen_range(2..=5) as f32,
            color,
        }
    }

    pub fn update(&mut self) {
        self.x += self.vx;
        self.y += self.vy;
        self.life = self.life.saturating_sub(1);
        self.size = (self.size - PARTICLE_SHRINK).max(1.0);
    }

    pub fn is_expired(&self) -> bool {
        self.life == 0
    }
}

// ── Power-ups ─────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PowerUpKind {
    /// Restores HEALTH_PICKUP health.
    Health,
    /// Drops the fire cooldown for RAPID_FIRE_DURATION frames.
    RapidFire,
    /// Adds SHIELD_PICKUP shield.
    Shield,
    /// One more bullet per volley, up to MAX_WEAPON_LEVEL.
    WeaponUp,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 4] = [
        PowerUpKind::Health,
        PowerUpKind::RapidFire,
        PowerUpKind::Shield,
        PowerUpKind::WeaponUp,
    ];

    pub fn random(rng: &mut impl Rng) -> PowerUpKind {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }

    pub fn color(self) -> Rgb {
        match self {
            PowerUpKind::Health => GREEN,
            PowerUpKind::RapidFire => PURPLE,
            PowerUpKind::Shield => CYAN,
            PowerUpKind::WeaponUp => GOLD,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PowerUp {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub speed: f32,
    pub kind: PowerUpKind,
}

impl PowerUp {
    pub fn new(kind: PowerUpKind, x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            w: POWER_UP_SIZE,
            h: POWER_UP_SIZE,
            speed: POWER_UP_SPEED,
            kind,
        }
    }

    /// A random power-up at a random column just above the screen.
    pub fn spawn(rng: &mut impl Rng) -> Self {
        let x = rng.gen_range(0..=(WIDTH - POWER_UP_SIZE) as i32) as f32;
        Self::new(PowerUpKind::random(rng), x, -POWER_UP_SIZE)
    }

    pub fn update(&mut self) {
        self.y += self.speed;
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.w, self.h)
    }

    pub fn is_off_screen(&self) -> bool {
        self.y > HEIGHT
    }
}

// ── Session state ─────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    GameOver,
}

/// Which half of the wave/boss state machine the session is in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    NormalWave,
    BossActive,
}

/// The entire game state. Cloneable so the pure update functions can
/// return a new copy without mutating the original. Restarting is
/// `GameState::default()`.
#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    pub player: Player,
    pub bullets: Vec<Bullet>,
    pub enemy_bullets: Vec<EnemyBullet>,
    pub enemies: Vec<Enemy>,
    /// At most one boss; `Some` means the boss fight is on.
    pub boss: Option<Boss>,
    pub particles: Vec<Particle>,
    pub power_ups: Vec<PowerUp>,
    pub score: u32,
    pub combo: u32,
    /// Frames left before the combo lapses.
    pub combo_timer: u32,
    pub wave: u32,
    pub kills_this_wave: u32,
    pub enemy_spawn_timer: u32,
    pub power_up_spawn_timer: u32,
    /// Frames until the player may fire again.
    pub shoot_cooldown: u32,
    pub rapid_fire_timer: u32,
    pub status: GameStatus,
    pub frame: u64,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            player: Player::default(),
            bullets: Vec::new(),
            enemy_bullets: Vec::new(),
            enemies: Vec::new(),
            boss: None,
            particles: Vec::new(),
            power_ups: Vec::new(),
            score: 0,
            combo: 0,
            combo_timer: 0,
            wave: 1,
            kills_this_wave: 0,
            enemy_spawn_timer: 0,
            power_up_spawn_timer: 0,
            shoot_cooldown: 0,
            rapid_fire_timer: 0,
            status: GameStatus::Playing,
            frame: 0,
        }
    }
}

impl GameState {
    pub fn stage(&self) -> Stage {
        if self.boss.is_some() {
            Stage::BossActive
        } else {
            Stage::NormalWave
        }
    }

    pub fn is_boss_active(&self) -> bool {
        self.boss.is_some()
    }

    pub fn is_rapid_fire(&self) -> bool {
        self.rapid_fire_timer > 0
    }
}
