//! Random Move Checkers Agent
//!
//! Picks uniformly at random among the legal moves, restricted to captures
//! whenever any capture is on offer. Useful for:
//! - The computer opponent of a casual game
//! - Automated demo games where both sides play themselves
//! - Stress testing the rules engine

use checkers_core::{Agent, Move};
use rand::rngs::StdRng;
use rand::seq::IteratorRandom;
use rand::{RngCore, SeedableRng};
use tracing::trace;


/// An agent that plays random legal moves, captures first.
///
/// The random source is injectable so games can be replayed from a seed.
pub struct RandomAgent {
    rng: Box<dyn RngCore + Send>,
    name: String,
}

impl Default for RandomAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomAgent {
    /// Seeded from OS entropy.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Reproducible agent; the same seed yields the same choices.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(rng: impl RngCore + Send + 'static) -> Self {
        Self {
            rng: Box::new(rng),
            name: "Random v1.0".to_string(),
        }
    }

    /// Renames the agent, e.g. to tell two random agents apart in a report.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

/// Uniform choice among the captures if there are any, otherwise among all moves.
pub fn choose_preferring_captures<R: RngCore + ?Sized>(legal: &[Move], rng: &mut R) -> Option<Move> {
    let captures = legal.iter().filter(|m| m.is_capture());
    let picked = if legal.iter().any(Move::is_capture) {
        captures.choose(rng)
    } else {
        legal.iter().choose(rng)
    };
    picked.copied()
}

impl Agent for RandomAgent {
    fn select_move(&mut self, legal: &[Move]) -> Option<Move> {
        let mv = choose_preferring_captures(legal, &mut self.rng);
        trace!(agent = %self.name, choices = legal.len(), ?mv, "random pick");
        mv
    }

    fn name(&self) -> &str {
        &self.name
    }
}
