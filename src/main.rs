mod display;

use std::collections::HashMap;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
        KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    style::{self, Color, Print},
    terminal,
    ExecutableCommand, QueueableCommand,
};
use rand::thread_rng;

use mini_arcade::bounce::{ball_tick, Ball};
use mini_arcade::compute::{init_state, tick};
use mini_arcade::entities::{GameState, GameStatus, InputFrame};

const FRAME: Duration = Duration::from_millis(33); // ≈30 FPS

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so a window of 4 frames (≈133 ms) is
/// always refreshed before expiry.
const HOLD_WINDOW: u64 = 4;

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

// ── Best-score persistence ────────────────────────────────────────────────────

fn best_score_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".mini_arcade_score")
}

fn load_best_score() -> u32 {
    std::fs::read_to_string(best_score_path())
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(0)
}

fn save_best_score(score: u32) {
    let _ = std::fs::write(best_score_path(), score.to_string());
}

// ── Menu ──────────────────────────────────────────────────────────────────────

enum MenuResult {
    Shooter,
    Ball,
    Quit,
}

fn show_menu<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    best_score: u32,
) -> std::io::Result<MenuResult> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let (width, height) = terminal::size()?;
    let cx = width / 2;
    let cy = height / 2;

    let title = "★  MINI  ARCADE  ★";
    out.queue(cursor::MoveTo(
        cx.saturating_sub(title.chars().count() as u16 / 2),
        cy.saturating_sub(6),
    ))?;
    out.queue(style::SetForegroundColor(Color::Cyan))?;
    out.queue(Print(title))?;

    if best_score > 0 {
        let bs_str = format!("Best Score: {}", best_score);
        out.queue(cursor::MoveTo(
            cx.saturating_sub(bs_str.chars().count() as u16 / 2),
            cy.saturating_sub(5),
        ))?;
        out.queue(style::SetForegroundColor(Color::Yellow))?;
        out.queue(Print(&bs_str))?;
    }

    out.queue(cursor::MoveTo(cx.saturating_sub(12), cy.saturating_sub(3)))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print("Select a game:"))?;

    let options: &[(&str, &str, Color, &str)] = &[
        ("1", "Space Shooter", Color::Green, "Levels, bosses, lasers"),
        ("2", "Bouncing Ball", Color::Yellow, "A classic, nothing more"),
    ];

    for (i, (key, label, color, desc)) in options.iter().enumerate() {
        let row = cy.saturating_sub(1) + i as u16;
        out.queue(cursor::MoveTo(cx.saturating_sub(12), row))?;
        out.queue(style::SetForegroundColor(Color::DarkGrey))?;
        out.queue(Print(format!("[{}] ", key)))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(format!("{:<14}", label)))?;
        out.queue(style::SetForegroundColor(Color::DarkGrey))?;
        out.queue(Print(format!(" — {}", desc)))?;
    }

    out.queue(cursor::MoveTo(cx.saturating_sub(12), cy + 3))?;
    out.queue(style::SetForegroundColor(Color::DarkGrey))?;
    out.queue(Print("← → / A D : Move   SPACE : Shoot   Q : Quit"))?;

    out.queue(style::ResetColor)?;
    out.flush()?;

    // Block until the user makes a choice
    loop {
        if let Ok(Event::Key(KeyEvent { code, kind, .. })) = rx.recv() {
            if kind == KeyEventKind::Release {
                continue;
            }
            match code {
                KeyCode::Char('1') => return Ok(MenuResult::Shooter),
                KeyCode::Char('2') => return Ok(MenuResult::Ball),
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                    return Ok(MenuResult::Quit);
                }
                _ => {}
            }
        }
    }
}

// ── Game loops ────────────────────────────────────────────────────────────────

enum GameExit {
    /// Full reset: rebuild the state and run again.
    Restart,
    Menu,
    Quit,
}

/// Run the shooter until the player leaves.
///
/// Input model: a `key_frame` map records the frame number of the last
/// press/repeat event for every key; each frame we check which keys are
/// still "fresh" (within `HOLD_WINDOW` frames) and treat those as held.
/// Works both on keyboard-enhancement terminals (real release events) and
/// on classic terminals (keys expire after `HOLD_WINDOW` frames of
/// silence, which is shorter than the OS repeat interval).
///
/// Firing is different: it is edge-triggered.  Only a `Press` event sets
/// the fire intent (never `Repeat`), and the flag is cleared right after
/// the tick consumes it, so holding Space emits exactly one missile.
fn shooter_loop<W: Write>(
    out: &mut W,
    state: &mut GameState,
    rx: &mpsc::Receiver<Event>,
    best_score: u32,
) -> std::io::Result<GameExit> {
    let mut rng = thread_rng();

    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut fire_intent = false;
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(Event::Key(KeyEvent { code, kind, modifiers, .. })) = rx.try_recv() {
            match kind {
                KeyEventKind::Press => {
                    key_frame.insert(code.clone(), frame);
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') => return Ok(GameExit::Quit),
                        KeyCode::Char('c')
                            if modifiers.contains(KeyModifiers::CONTROL) =>
                        {
                            return Ok(GameExit::Quit);
                        }
                        KeyCode::Esc => return Ok(GameExit::Menu),
                        KeyCode::Char('m') | KeyCode::Char('M')
                            if state.status == GameStatus::GameOver =>
                        {
                            return Ok(GameExit::Menu);
                        }
                        KeyCode::Char('r') | KeyCode::Char('R')
                            if state.status == GameStatus::GameOver =>
                        {
                            return Ok(GameExit::Restart);
                        }
                        // Fire-intent edge: press only, not repeat
                        KeyCode::Char(' ') if state.status == GameStatus::Playing => {
                            fire_intent = true;
                        }
                        _ => {}
                    }
                }
                KeyEventKind::Repeat => {
                    key_frame.insert(code.clone(), frame);
                }
                KeyEventKind::Release => {
                    key_frame.remove(&code);
                }
            }
        }

        // ── Advance the simulation (ticks stop at game over) ──────────────────
        if state.status == GameStatus::Playing {
            let input = InputFrame {
                left: is_held(&key_frame, &KeyCode::Left, frame)
                    || is_held(&key_frame, &KeyCode::Char('a'), frame)
                    || is_held(&key_frame, &KeyCode::Char('A'), frame),
                right: is_held(&key_frame, &KeyCode::Right, frame)
                    || is_held(&key_frame, &KeyCode::Char('d'), frame)
                    || is_held(&key_frame, &KeyCode::Char('D'), frame),
                fire: fire_intent,
            };
            *state = tick(state, &input, &mut rng);
            fire_intent = false; // consumed by exactly one tick
        }

        let (cols, rows) = terminal::size()?;
        display::render(out, state, cols, rows, best_score)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
}

/// Run the bouncing-ball demo until the player leaves.
fn ball_loop<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>) -> std::io::Result<GameExit> {
    let mut ball = Ball::new();

    loop {
        let frame_start = Instant::now();

        while let Ok(Event::Key(KeyEvent { code, kind, modifiers, .. })) = rx.try_recv() {
            if kind == KeyEventKind::Release {
                continue;
            }
            match code {
                KeyCode::Char('q') | KeyCode::Char('Q') => return Ok(GameExit::Quit),
                KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                    return Ok(GameExit::Quit);
                }
                KeyCode::Esc | KeyCode::Char('m') | KeyCode::Char('M') => {
                    return Ok(GameExit::Menu);
                }
                _ => {}
            }
        }

        ball = ball_tick(&ball);

        let (cols, rows) = terminal::size()?;
        display::render_ball(out, &ball, cols, rows)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> std::io::Result<()> {
    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Ghostty / kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loops never block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        loop {
            match event::read() {
                Ok(ev) => {
                    if tx.send(ev).is_err() {
                        break; // receiver dropped → program exiting
                    }
                }
                Err(_) => break,
            }
        }
    });

    let result = run(&mut out, &rx);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

fn run<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>) -> std::io::Result<()> {
    let mut best_score = load_best_score();

    loop {
        match show_menu(out, rx, best_score)? {
            MenuResult::Quit => break,
            MenuResult::Ball => {
                if let GameExit::Quit = ball_loop(out, rx)? {
                    break;
                }
            }
            MenuResult::Shooter => loop {
                let mut state = init_state();
                let exit = shooter_loop(out, &mut state, rx, best_score)?;

                // Persist new best score if beaten
                if state.score > best_score {
                    best_score = state.score;
                    save_best_score(best_score);
                }

                match exit {
                    GameExit::Restart => continue,
                    GameExit::Menu => break,
                    GameExit::Quit => return Ok(()),
                }
            },
        }
    }
    Ok(())
}
