/// Pure shooter logic.
///
/// Every public function takes an immutable reference to the current
/// `GameState` (and, where needed, an input sample and an RNG handle) and
/// returns a brand-new `GameState`.  Side effects are limited to the
/// injected RNG, so a seeded RNG makes the whole simulation deterministic.

use rand::Rng;

use crate::entities::{
    Enemy, EnemyKind, GameState, GameStatus, InputFrame, Missile, MissileOwner, Player,
};

// ── Canvas & entity constants ────────────────────────────────────────────────

pub const CANVAS_W: f32 = 480.0;
pub const CANVAS_H: f32 = 640.0;

pub const PLAYER_SIZE: f32 = 40.0;
pub const PLAYER_SPEED: f32 = 5.0;
pub const PLAYER_HP: u32 = 3;

pub const ENEMY_SIZE: f32 = 40.0;
/// New-level grunts (and recycled ones) spawn with y in `[0, SPAWN_STRIP_H)`.
pub const SPAWN_STRIP_H: f32 = 80.0;

pub const MISSILE_W: f32 = 6.0;
pub const MISSILE_H: f32 = 12.0;
/// Player missile speed, canvas units per tick (upward).
pub const MISSILE_SPEED: f32 = 8.0;
/// Enemy missile speed, canvas units per tick (downward).
pub const ENEMY_MISSILE_SPEED: f32 = 5.0;

/// Every `BOSS_INTERVAL`-th level is a boss level.
pub const BOSS_INTERVAL: u32 = 5;
/// Boss hit points — constant across all boss levels, never scaled.
pub const BOSS_HP: u32 = 20;
pub const BOSS_SIZE: f32 = 100.0;
pub const BOSS_DX: f32 = 3.0;
pub const BOSS_DY: f32 = 2.0;
pub const BOSS_SHOOT_CHANCE: f64 = 0.02;
/// Score awarded once, when the boss's hp reaches 0.
pub const BOSS_BONUS: u32 = 100;

// ── Difficulty tables ────────────────────────────────────────────────────────

/// Grunts spawned on a regular level.
pub fn grunt_count(level: u32) -> usize {
    (5.0 + level as f32 * 0.5).floor() as usize
}

/// Fall speed of a grunt, canvas units per tick.
pub fn grunt_speed(level: u32) -> f32 {
    1.0 + level as f32 * 0.2
}

/// Per-tick chance that a grunt fires.
pub fn grunt_shoot_chance(level: u32) -> f64 {
    (0.01 + level as f64 * 0.005).min(1.0)
}

// ── Geometry ─────────────────────────────────────────────────────────────────

/// Axis-aligned bounding box.  Overlap is boundary-exclusive: rectangles
/// that merely touch along an edge do not overlap.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.x + other.w
            && self.x + self.w > other.x
            && self.y < other.y + other.h
            && self.y + self.h > other.y
    }
}

pub fn player_rect(p: &Player) -> Rect {
    Rect { x: p.x, y: p.y, w: p.w, h: p.h }
}

pub fn enemy_rect(e: &Enemy) -> Rect {
    Rect { x: e.x, y: e.y, w: e.w, h: e.h }
}

pub fn missile_rect(m: &Missile) -> Rect {
    Rect { x: m.x, y: m.y, w: MISSILE_W, h: MISSILE_H }
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build a fresh game: level 0, empty roster.  The first tick notices the
/// empty roster and starts level 1.  Also serves as the reset path when
/// the player restarts after a game over.
pub fn init_state() -> GameState {
    GameState {
        player: Player {
            x: (CANVAS_W - PLAYER_SIZE) / 2.0,
            y: CANVAS_H - PLAYER_SIZE - 20.0,
            w: PLAYER_SIZE,
            h: PLAYER_SIZE,
            speed: PLAYER_SPEED,
            hp: PLAYER_HP,
        },
        enemies: Vec::new(),
        missiles: Vec::new(),
        score: 0,
        level: 0,
        boss_level: false,
        status: GameStatus::Playing,
        frame: 0,
    }
}

fn spawn_grunt(level: u32, rng: &mut impl Rng) -> Enemy {
    Enemy {
        x: rng.gen_range(0.0..CANVAS_W - ENEMY_SIZE),
        y: rng.gen_range(0.0..SPAWN_STRIP_H),
        w: ENEMY_SIZE,
        h: ENEMY_SIZE,
        speed: grunt_speed(level),
        can_shoot: true,
        shoot_chance: grunt_shoot_chance(level),
        rotation: rng.gen_range(-15.0..15.0),
        kind: EnemyKind::Grunt,
    }
}

fn spawn_boss() -> Enemy {
    Enemy {
        x: (CANVAS_W - BOSS_SIZE) / 2.0,
        y: 0.0,
        w: BOSS_SIZE,
        h: BOSS_SIZE,
        speed: 0.0,
        can_shoot: true,
        shoot_chance: BOSS_SHOOT_CHANCE,
        rotation: 0.0,
        kind: EnemyKind::Boss { dx: BOSS_DX, dy: BOSS_DY, hp: BOSS_HP },
    }
}

/// Advance to the next level and populate the roster: one boss on every
/// `BOSS_INTERVAL`-th level, otherwise a batch of grunts scaled by level.
/// The roster is never left empty.
pub fn start_level(state: &mut GameState, rng: &mut impl Rng) {
    state.level += 1;
    state.boss_level = state.level % BOSS_INTERVAL == 0;

    state.enemies.clear();
    if state.boss_level {
        state.enemies.push(spawn_boss());
    } else {
        for _ in 0..grunt_count(state.level) {
            state.enemies.push(spawn_grunt(state.level, rng));
        }
    }
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// Advance the simulation by one frame, in fixed order: input, player
/// missiles, enemies, enemy missiles, collisions, level completion.
///
/// Returns immediately (status `GameOver`) the instant the player's hp
/// reaches 0 — no further entity mutation happens inside that tick, so
/// the final state is exactly the state at the moment of death.
pub fn tick(state: &GameState, input: &InputFrame, rng: &mut impl Rng) -> GameState {
    let mut s = state.clone();
    s.frame += 1;

    // ── 1. Apply input ───────────────────────────────────────────────────────
    if input.left {
        s.player.x -= s.player.speed;
    }
    if input.right {
        s.player.x += s.player.speed;
    }
    s.player.x = s.player.x.clamp(0.0, CANVAS_W - s.player.w);

    if input.fire {
        // One missile per press edge, from the player's horizontal centre.
        s.missiles.push(Missile {
            x: s.player.x + s.player.w / 2.0 - MISSILE_W / 2.0,
            y: s.player.y - MISSILE_H,
            owner: MissileOwner::Player,
        });
    }

    // ── 2. Advance player missiles ───────────────────────────────────────────
    for m in s.missiles.iter_mut().filter(|m| m.owner == MissileOwner::Player) {
        m.y -= MISSILE_SPEED;
    }
    // Drop those whose bottom has crossed above the top edge
    s.missiles
        .retain(|m| m.owner != MissileOwner::Player || m.y + MISSILE_H >= 0.0);

    // ── 3. Advance enemies ───────────────────────────────────────────────────
    let mut fired: Vec<Missile> = Vec::new();
    for e in s.enemies.iter_mut() {
        match &mut e.kind {
            EnemyKind::Boss { dx, dy, .. } => {
                // Elastic reflection inside [left, right] × [top, half-height],
                // same policy as the bouncing-ball demo.
                e.x += *dx;
                e.y += *dy;
                if e.x < 0.0 || e.x + e.w > CANVAS_W {
                    *dx = -*dx;
                }
                if e.y < 0.0 || e.y + e.h > CANVAS_H / 2.0 {
                    *dy = -*dy;
                }
            }
            EnemyKind::Grunt => {
                e.y += e.speed;
                if e.y > CANVAS_H {
                    // Recycle instead of destroy: back to the top at a new
                    // random column (infinite-descent spawn pattern).
                    e.y = 0.0;
                    e.x = rng.gen_range(0.0..CANVAS_W - e.w);
                }
            }
        }

        if e.can_shoot && rng.gen_bool(e.shoot_chance) {
            fired.push(Missile {
                x: e.x + e.w / 2.0 - MISSILE_W / 2.0,
                y: e.y + e.h,
                owner: MissileOwner::Enemy,
            });
        }
    }
    s.missiles.extend(fired);

    // ── 4. Advance enemy missiles ────────────────────────────────────────────
    for m in s.missiles.iter_mut().filter(|m| m.owner == MissileOwner::Enemy) {
        m.y += ENEMY_MISSILE_SPEED;
    }
    s.missiles
        .retain(|m| m.owner != MissileOwner::Enemy || m.y <= CANVAS_H);

    // ── 5a. Collision: enemy body ↔ player ───────────────────────────────────
    let player_box = player_rect(&s.player);
    let mut i = 0;
    while i < s.enemies.len() {
        if enemy_rect(&s.enemies[i]).overlaps(&player_box) {
            // The boss is never removed by body contact — it only dies to
            // missile damage.  Grunts are consumed by the collision.
            let boss = s.enemies[i].is_boss();
            if !boss {
                s.enemies.remove(i);
            }
            s.player.hp = s.player.hp.saturating_sub(1);
            if s.player.hp == 0 {
                s.status = GameStatus::GameOver;
                return s;
            }
            if boss {
                i += 1;
            }
        } else {
            i += 1;
        }
    }

    // ── 5b. Collision: player missiles ↔ enemies ─────────────────────────────
    let mut mi = 0;
    while mi < s.missiles.len() {
        if s.missiles[mi].owner != MissileOwner::Player {
            mi += 1;
            continue;
        }
        let m_box = missile_rect(&s.missiles[mi]);
        // Reverse creation order; each missile hits at most one enemy.
        let hit = (0..s.enemies.len())
            .rev()
            .find(|&ei| m_box.overlaps(&enemy_rect(&s.enemies[ei])));
        match hit {
            Some(ei) => {
                s.missiles.remove(mi);
                // A dead grunt scores 1; the boss only falls (and pays its
                // bonus) once missile damage exhausts its hp.
                let points = match &mut s.enemies[ei].kind {
                    EnemyKind::Boss { hp, .. } => {
                        *hp = hp.saturating_sub(1);
                        (*hp == 0).then_some(BOSS_BONUS)
                    }
                    EnemyKind::Grunt => Some(1),
                };
                if let Some(points) = points {
                    s.enemies.remove(ei);
                    s.score += points;
                }
            }
            None => mi += 1,
        }
    }

    // ── 5c. Collision: enemy missiles ↔ player ───────────────────────────────
    let player_box = player_rect(&s.player);
    let mut mi = 0;
    while mi < s.missiles.len() {
        if s.missiles[mi].owner == MissileOwner::Enemy
            && missile_rect(&s.missiles[mi]).overlaps(&player_box)
        {
            s.missiles.remove(mi);
            s.player.hp = s.player.hp.saturating_sub(1);
            if s.player.hp == 0 {
                s.status = GameStatus::GameOver;
                return s;
            }
        } else {
            mi += 1;
        }
    }

    // ── 6. Level completion ──────────────────────────────────────────────────
    if s.enemies.is_empty() {
        start_level(&mut s, rng);
    }

    s
}
