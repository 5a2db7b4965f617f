//! Match runner for playing automated games between agents

use checkers_core::{Agent, GameConfig, GameResult, GridSurface, Phase, Player, Seat, Session};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

use crate::error::SelfplayError;
use crate::results::{GameRecord, MatchReport};

/// Configuration for a match
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Number of games to play
    pub num_games: u32,
    /// Plies per game before it is scored as a draw
    pub max_plies: u32,
    /// Whether the agents swap sides each game
    pub alternate_seats: bool,
    /// Log each finished game
    pub verbose: bool,
    /// Rules and animation timing for every game
    pub game: GameConfig,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            num_games: 10,
            max_plies: 300,
            alternate_seats: true,
            verbose: true,
            game: GameConfig::default(),
        }
    }
}

impl MatchConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, SelfplayError> {
        let config: MatchConfig = toml::from_str(s)?;
        config.game.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, SelfplayError> {
        Self::from_toml_str(&std::fs::read_to_string(path)?)
    }

    /// Ticks a single ply may take: the agent's delay plus the drag animation.
    fn ticks_per_ply(&self) -> u64 {
        let anim = &self.game.animation;
        (anim.delay_ms + anim.duration_ms) / anim.frame_ms.max(1) + 2
    }
}

/// Runs matches between two agents
pub struct MatchRunner {
    config: MatchConfig,
}

impl MatchRunner {
    pub fn new(config: MatchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Run a match between two agents.
    ///
    /// Agents are built fresh for every game from the given factories, which
    /// receive the 0-based game index. The result is from the first agent's
    /// perspective.
    pub fn run_match<A, B>(&self, name: &str, mut make_a: A, mut make_b: B) -> MatchReport
    where
        A: FnMut(u32) -> Box<dyn Agent>,
        B: FnMut(u32) -> Box<dyn Agent>,
    {
        let mut report: Option<MatchReport> = None;

        for game_num in 0..self.config.num_games {
            let agent_a = make_a(game_num);
            let agent_b = make_b(game_num);
            let report = report.get_or_insert_with(|| {
                MatchReport::new(
                    name,
                    [agent_a.name().to_string(), agent_b.name().to_string()],
                    self.config,
                )
            });

            // Alternate sides if configured
            let a_is_p1 = !self.config.alternate_seats || game_num % 2 == 0;
            let seat = if a_is_p1 { Player::P1 } else { Player::P2 };
            let (p1, p2) = if a_is_p1 {
                (agent_a, agent_b)
            } else {
                (agent_b, agent_a)
            };

            let mut record = self.play_game(p1, p2);
            record.game = game_num + 1;
            record.seat = seat;
            report.add_game(record);

            if self.config.verbose {
                let r = &report.result;
                info!(
                    game = game_num + 1,
                    of = self.config.num_games,
                    %seat,
                    outcome = ?report.games.last().map(GameRecord::outcome),
                    score = %format!("{}-{}-{}", r.wins, r.losses, r.draws),
                    "game finished"
                );
            }
        }

        report.unwrap_or_else(|| {
            MatchReport::new(name, [String::new(), String::new()], self.config)
        })
    }

    /// Play a single game; the record's seat is P1's.
    pub fn play_game(&self, p1: Box<dyn Agent>, p2: Box<dyn Agent>) -> GameRecord {
        let mut session = Session::new(
            self.config.game,
            GridSurface::default(),
            Seat::Agent(p1),
            Seat::Agent(p2),
        );
        let frame = self.config.game.animation.frame();
        let stall_limit = self.config.ticks_per_ply() * 4;
        let max_plies = self.config.max_plies as usize;

        let mut last_plies = 0;
        let mut idle_ticks = 0;
        while !session.turn().is_over() && session.turn().plies() < max_plies {
            session.tick(frame);
            if session.turn().plies() != last_plies {
                last_plies = session.turn().plies();
                idle_ticks = 0;
            } else {
                idle_ticks += 1;
                if idle_ticks > stall_limit {
                    warn!(plies = last_plies, "no progress, abandoning game");
                    break;
                }
            }
        }

        let plies = session.turn().plies() as u32;
        match session.turn().phase() {
            Phase::GameOver { result, reason } => GameRecord {
                game: 0,
                seat: Player::P1,
                result,
                reason: Some(reason),
                plies,
            },
            // Max plies reached
            _ => GameRecord {
                game: 0,
                seat: Player::P1,
                result: GameResult::Draw,
                reason: None,
                plies,
            },
        }
    }
}

#[cfg(test)]
#[path = "match_runner_tests.rs"]
mod match_runner_tests;
