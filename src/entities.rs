/// All game entity types — pure data, no logic.
///
/// Positions are in logical canvas units (see the canvas constants in
/// `compute`), not terminal cells; the display layer scales at draw time.

#[derive(Clone, Debug, PartialEq)]
pub enum GameStatus {
    Playing,
    GameOver,
}

#[derive(Clone, Debug, PartialEq)]
pub enum MissileOwner {
    Player,
    Enemy,
}

#[derive(Clone, Debug, PartialEq)]
pub enum EnemyKind {
    /// Regular enemy: falls straight down, recycled to the top when it
    /// leaves the bottom of the canvas.
    Grunt,
    /// Boss: bounces inside the upper half of the canvas and only dies
    /// to missile damage.  At most one exists at a time.
    Boss { dx: f32, dy: f32, hp: u32 },
}

// ── Projectiles ───────────────────────────────────────────────────────────────

/// A missile, fired by the player (travels up) or an enemy (travels down).
/// Size is fixed (`MISSILE_W` × `MISSILE_H` in `compute`).
#[derive(Clone, Debug)]
pub struct Missile {
    pub x: f32,
    pub y: f32,
    pub owner: MissileOwner,
}

// ── Player & enemy ────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub speed: f32,
    pub hp: u32,
}

#[derive(Clone, Debug)]
pub struct Enemy {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    /// Fall speed per tick (unused for the boss, which moves by its
    /// velocity vector instead).
    pub speed: f32,
    pub can_shoot: bool,
    /// Per-tick probability of firing an enemy missile.
    pub shoot_chance: f64,
    /// Visual tilt in degrees, chosen at spawn and never updated.
    pub rotation: f32,
    pub kind: EnemyKind,
}

impl Enemy {
    pub fn is_boss(&self) -> bool {
        matches!(self.kind, EnemyKind::Boss { .. })
    }
}

// ── Input ─────────────────────────────────────────────────────────────────────

/// Input sampled by the host for one tick.  `left`/`right` are level
/// signals (key currently held); `fire` is edge-triggered — the host sets
/// it on a key-press edge and clears it after the tick consumes it, so one
/// press fires exactly one missile.
#[derive(Clone, Debug, Default)]
pub struct InputFrame {
    pub left: bool,
    pub right: bool,
    pub fire: bool,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire shooter state.  Cloneable so the pure `tick` function can
/// return a new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct GameState {
    pub player: Player,
    /// Current level's roster.  Empty only transiently: `tick` starts a
    /// new level the moment the roster empties.
    pub enemies: Vec<Enemy>,
    /// Player and enemy missiles, in creation order.
    pub missiles: Vec<Missile>,
    pub score: u32,
    /// 0 before the first level starts; incremented by `start_level`.
    pub level: u32,
    /// Derived: `level % BOSS_INTERVAL == 0`, recomputed at level start.
    pub boss_level: bool,
    pub status: GameStatus,
    pub frame: u64,
}
