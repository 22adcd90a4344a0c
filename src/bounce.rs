/// The bouncing-ball demo — a single ball reflecting elastically off the
/// canvas edges.  Pure like the shooter: `ball_tick` returns a new ball.

use crate::compute::{CANVAS_H, CANVAS_W};

pub const BALL_RADIUS: f32 = 20.0;
pub const BALL_SPEED: f32 = 5.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ball {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub dx: f32,
    pub dy: f32,
}

impl Ball {
    /// A ball at the canvas centre, moving down-right.
    pub fn new() -> Self {
        Ball {
            x: CANVAS_W / 2.0,
            y: CANVAS_H / 2.0,
            radius: BALL_RADIUS,
            dx: BALL_SPEED,
            dy: BALL_SPEED,
        }
    }
}

impl Default for Ball {
    fn default() -> Self {
        Ball::new()
    }
}

/// Advance the ball one frame: move, then negate whichever velocity
/// component carried the ball across an edge.  Reflection happens after
/// the move, so the ball may sit one frame past the edge before turning
/// back.
pub fn ball_tick(ball: &Ball) -> Ball {
    let mut b = *ball;
    b.x += b.dx;
    b.y += b.dy;

    if b.x + b.radius > CANVAS_W || b.x - b.radius < 0.0 {
        b.dx = -b.dx;
    }
    if b.y + b.radius > CANVAS_H || b.y - b.radius < 0.0 {
        b.dy = -b.dy;
    }
    b
}
