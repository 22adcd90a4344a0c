//! A tiny terminal arcade: a vertical space shooter and a bouncing-ball
//! demo, selected from a menu.  All game logic is pure (state in, state
//! out) so it can be tested without a terminal.

pub mod bounce;
pub mod compute;
pub mod entities;
