/// Rendering layer — all terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// game state.  No game logic is performed; this module only translates
/// state into terminal commands.  Logical canvas coordinates are scaled
/// to the terminal cell grid per frame.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use mini_arcade::bounce::Ball;
use mini_arcade::compute::{BOSS_HP, CANVAS_H, CANVAS_W};
use mini_arcade::entities::{Enemy, EnemyKind, GameState, GameStatus, Missile, MissileOwner};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_LEVEL: Color = Color::Green;
const C_HUD_BOSS: Color = Color::Red;
const C_HUD_HP: Color = Color::Red;
const C_PLAYER: Color = Color::White;
const C_GRUNT: Color = Color::Green;
const C_BOSS: Color = Color::Red;
const C_BOSS_BAR: Color = Color::Magenta;
const C_MISSILE_PLAYER: Color = Color::Cyan;
const C_MISSILE_ENEMY: Color = Color::Magenta;
const C_BALL: Color = Color::Red;
const C_HINT: Color = Color::DarkGrey;

// ── Canvas → terminal mapping ─────────────────────────────────────────────────

/// Playfield geometry: row 0 is the HUD, rows 1 and `rows-2` the border,
/// the last row the controls hint.  Everything between is the play area.
struct Viewport {
    cols: u16,
    rows: u16,
}

impl Viewport {
    fn new(cols: u16, rows: u16) -> Self {
        Viewport { cols, rows }
    }

    fn play_bottom(&self) -> u16 {
        self.rows.saturating_sub(2)
    }

    /// Map a logical canvas point to a terminal cell, clamped inside the
    /// play area.
    fn cell(&self, x: f32, y: f32) -> (u16, u16) {
        let inner_w = self.cols.saturating_sub(2).max(1) as f32;
        let inner_h = self.rows.saturating_sub(4).max(1) as f32;
        let cx = 1 + (x / CANVAS_W * inner_w) as i32;
        let cy = 2 + (y / CANVAS_H * inner_h) as i32;
        let max_x = self.cols.saturating_sub(2).max(1) as i32;
        let max_y = self.play_bottom().saturating_sub(1).max(2) as i32;
        (cx.clamp(1, max_x) as u16, cy.clamp(2, max_y) as u16)
    }
}

// ── Shooter frame ─────────────────────────────────────────────────────────────

/// Render one complete shooter frame.
pub fn render<W: Write>(
    out: &mut W,
    state: &GameState,
    cols: u16,
    rows: u16,
    best_score: u32,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let vp = Viewport::new(cols, rows);

    draw_border(out, &vp)?;
    draw_hud(out, state, &vp, best_score)?;

    for enemy in &state.enemies {
        draw_enemy(out, enemy, &vp)?;
    }
    for missile in &state.missiles {
        draw_missile(out, missile, &vp)?;
    }

    draw_player(out, state, &vp)?;
    draw_hint(out, &vp, "← → / A D : Move   SPACE : Shoot   ESC : Menu   Q : Quit")?;

    if state.status == GameStatus::GameOver {
        draw_game_over(out, state, &vp, best_score)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, vp: &Viewport) -> std::io::Result<()> {
    let w = vp.cols as usize;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    out.queue(cursor::MoveTo(0, vp.play_bottom()))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    for row in 2..vp.play_bottom() {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(vp.cols.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(
    out: &mut W,
    state: &GameState,
    vp: &Viewport,
    best_score: u32,
) -> std::io::Result<()> {
    // Score (and best) — left
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    if best_score > 0 {
        out.queue(Print(format!(
            "Score:{:>6}  Best:{:>6}",
            state.score, best_score
        )))?;
    } else {
        out.queue(Print(format!("Score:{:>6}", state.score)))?;
    }

    // Level — centre (boss levels get their own tag)
    let level_str = if state.boss_level {
        format!("[ BOSS  LV {} ]", state.level)
    } else {
        format!("[ LEVEL {} ]", state.level)
    };
    let level_color = if state.boss_level { C_HUD_BOSS } else { C_HUD_LEVEL };
    let lx = (vp.cols / 2).saturating_sub(level_str.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(lx, 0))?;
    out.queue(style::SetForegroundColor(level_color))?;
    out.queue(Print(level_str))?;

    // Hit points — right
    let hearts: String = "♥".repeat(state.player.hp as usize);
    let hp_str = format!("HP:{}", hearts);
    let rx = vp.cols.saturating_sub(hp_str.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_HP))?;
    out.queue(Print(hp_str))?;

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_player<W: Write>(out: &mut W, state: &GameState, vp: &Viewport) -> std::io::Result<()> {
    // 2-row sprite:
    //   ▲       ← tip
    //  /█\      ← fuselage + wings
    let p = &state.player;
    let (cx, cy) = vp.cell(p.x + p.w / 2.0, p.y);
    out.queue(style::SetForegroundColor(C_PLAYER))?;

    out.queue(cursor::MoveTo(cx, cy))?;
    out.queue(Print("▲"))?;

    if cy + 1 < vp.play_bottom() {
        out.queue(cursor::MoveTo(cx.saturating_sub(1).max(1), cy + 1))?;
        out.queue(Print("/█\\"))?;
    }

    Ok(())
}

/// Grunt glyph for a static rotation band.  Rotation is fixed at spawn,
/// so the tilt never changes while the enemy is alive.
fn grunt_sprite(rotation: f32) -> &'static str {
    if rotation < -5.0 {
        "\\▼\\"
    } else if rotation > 5.0 {
        "/▼/"
    } else {
        "«▼»"
    }
}

fn draw_enemy<W: Write>(out: &mut W, enemy: &Enemy, vp: &Viewport) -> std::io::Result<()> {
    let (cx, cy) = vp.cell(enemy.x + enemy.w / 2.0, enemy.y);
    let lx = cx.saturating_sub(1).max(1);

    match &enemy.kind {
        EnemyKind::Grunt => {
            out.queue(style::SetForegroundColor(C_GRUNT))?;
            out.queue(cursor::MoveTo(lx, cy))?;
            out.queue(Print(grunt_sprite(enemy.rotation)))?;
        }
        EnemyKind::Boss { hp, .. } => {
            // Health bar above the sprite, scaled to hp / BOSS_HP
            let lx = cx.saturating_sub(2).max(1);
            if cy > 2 {
                let filled = ((*hp as f32 / BOSS_HP as f32) * 5.0).ceil() as usize;
                out.queue(style::SetForegroundColor(C_BOSS_BAR))?;
                out.queue(cursor::MoveTo(lx, cy - 1))?;
                out.queue(Print(format!(
                    "{}{}",
                    "█".repeat(filled),
                    "░".repeat(5usize.saturating_sub(filled))
                )))?;
            }
            out.queue(style::SetForegroundColor(C_BOSS))?;
            out.queue(cursor::MoveTo(lx, cy))?;
            out.queue(Print("╔═▼═╗"))?;
            if cy + 1 < vp.play_bottom() {
                out.queue(cursor::MoveTo(lx, cy + 1))?;
                out.queue(Print("╚═══╝"))?;
            }
        }
    }
    Ok(())
}

fn draw_missile<W: Write>(out: &mut W, missile: &Missile, vp: &Viewport) -> std::io::Result<()> {
    let (cx, cy) = vp.cell(missile.x, missile.y);
    match missile.owner {
        MissileOwner::Player => {
            out.queue(cursor::MoveTo(cx, cy))?;
            out.queue(style::SetForegroundColor(C_MISSILE_PLAYER))?;
            out.queue(Print("║"))?;
        }
        MissileOwner::Enemy => {
            out.queue(cursor::MoveTo(cx, cy))?;
            out.queue(style::SetForegroundColor(C_MISSILE_ENEMY))?;
            out.queue(Print("↓"))?;
        }
    }
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_hint<W: Write>(out: &mut W, vp: &Viewport, hint: &str) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, vp.rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(hint))?;
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(
    out: &mut W,
    state: &GameState,
    vp: &Viewport,
    best_score: u32,
) -> std::io::Result<()> {
    let score_line = format!("Final Score: {:>6}", state.score);
    let best = best_score.max(state.score);
    let new_best = state.score >= best_score && state.score > 0;
    let best_line = if new_best {
        format!("★ NEW BEST: {:>6} ★", best)
    } else {
        format!("Best Score:  {:>6}", best)
    };

    let box_lines: &[&str] = &[
        "╔════════════════════╗",
        "║    GAME  OVER      ║",
        "╚════════════════════╝",
    ];

    let cx = vp.cols / 2;
    let total_rows = box_lines.len() + 3;
    let start_row = (vp.rows / 2).saturating_sub(total_rows as u16 / 2);

    out.queue(style::SetForegroundColor(Color::Red))?;
    for (i, msg) in box_lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(Print(*msg))?;
    }

    let score_row = start_row + box_lines.len() as u16;
    let col = cx.saturating_sub(score_line.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, score_row))?;
    out.queue(style::SetForegroundColor(Color::Yellow))?;
    out.queue(Print(&score_line))?;

    let best_row = score_row + 1;
    let col = cx.saturating_sub(best_line.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, best_row))?;
    out.queue(style::SetForegroundColor(if new_best {
        Color::Yellow
    } else {
        Color::DarkGrey
    }))?;
    out.queue(Print(&best_line))?;

    let hint = "R - Play Again   M - Menu   Q - Quit";
    let col = cx.saturating_sub(hint.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, best_row + 1))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print(hint))?;

    Ok(())
}

// ── Bouncing-ball frame ───────────────────────────────────────────────────────

/// Render one frame of the bouncing-ball demo.
pub fn render_ball<W: Write>(
    out: &mut W,
    ball: &Ball,
    cols: u16,
    rows: u16,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let vp = Viewport::new(cols, rows);

    draw_border(out, &vp)?;

    let title = "BOUNCING  BALL";
    let lx = (vp.cols / 2).saturating_sub(title.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(lx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_LEVEL))?;
    out.queue(Print(title))?;

    let (cx, cy) = vp.cell(ball.x, ball.y);
    out.queue(cursor::MoveTo(cx, cy))?;
    out.queue(style::SetForegroundColor(C_BALL))?;
    out.queue(Print("●"))?;

    draw_hint(out, &vp, "ESC : Menu   Q : Quit")?;

    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}
