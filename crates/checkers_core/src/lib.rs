pub mod animation;
pub mod board;
pub mod config;
pub mod interaction;
pub mod movegen;
pub mod session;
pub mod surface;
pub mod turn;
pub mod types;

#[cfg(test)]
mod turn_tests;

pub use animation::*;
pub use board::*;
pub use config::*;
pub use interaction::*;
pub use movegen::*;
pub use session::*;
pub use surface::*;
pub use turn::*;
pub use types::*;

// =============================================================================
// Agent trait — implemented by every automated player
// =============================================================================

/// A policy that picks one move out of the current legal set.
///
/// Agents see only the legal moves, never the board, so any source of moves
/// (random, scripted, a test double) can drive a side through the same
/// simulated-drag path a human uses.
pub trait Agent: Send {
    /// Chooses a move. Returns `None` only when `legal` is empty.
    fn select_move(&mut self, legal: &[Move]) -> Option<Move>;

    /// Name used in logs and reports.
    fn name(&self) -> &str;

    /// Reset internal state for a new game.
    fn new_game(&mut self) {}
}
