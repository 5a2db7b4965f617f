//! Match results and report storage

use checkers_core::{EndReason, GameResult, Player};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::SelfplayError;
use crate::match_runner::MatchConfig;

/// Result of a single game from the first agent's point of view
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Loss,
    Draw,
}

impl Outcome {
    /// Reads a game result from the side `seat` played.
    pub fn for_seat(result: GameResult, seat: Player) -> Self {
        match result.winner() {
            Some(winner) if winner == seat => Outcome::Win,
            Some(_) => Outcome::Loss,
            None => Outcome::Draw,
        }
    }
}

/// Win/loss/draw tally over a match
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MatchResult {
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
}

impl MatchResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Win => self.wins += 1,
            Outcome::Loss => self.losses += 1,
            Outcome::Draw => self.draws += 1,
        }
    }

    pub fn total_games(&self) -> u32 {
        self.wins + self.losses + self.draws
    }

    /// Fraction of points scored, a draw counting half
    pub fn score(&self) -> f64 {
        let total = self.total_games();
        if total == 0 {
            return 0.5;
        }
        (self.wins as f64 + 0.5 * self.draws as f64) / total as f64
    }
}

/// One finished (or abandoned) game
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameRecord {
    /// 1-based game number within the match
    pub game: u32,
    /// Side the first agent played
    pub seat: Player,
    pub result: GameResult,
    /// `None` when the game was cut off at the ply limit
    pub reason: Option<EndReason>,
    pub plies: u32,
}

impl GameRecord {
    pub fn outcome(&self) -> Outcome {
        Outcome::for_seat(self.result, self.seat)
    }
}

/// Complete match report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchReport {
    /// Name/description of the match
    pub name: String,
    /// Names of the two agents, first agent first
    pub agents: [String; 2],
    /// Configuration used
    pub config: MatchConfig,
    pub result: MatchResult,
    pub games: Vec<GameRecord>,
}

impl MatchReport {
    pub fn new(name: &str, agents: [String; 2], config: MatchConfig) -> Self {
        Self {
            name: name.to_string(),
            agents,
            config,
            result: MatchResult::new(),
            games: Vec::new(),
        }
    }

    pub fn add_game(&mut self, record: GameRecord) {
        self.result.record(record.outcome());
        self.games.push(record);
    }

    /// Save report to a JSON file
    pub fn save(&self, path: &Path) -> Result<(), SelfplayError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load report from a JSON file
    pub fn load(path: &Path) -> Result<Self, SelfplayError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Average game length in plies
    pub fn average_plies(&self) -> f64 {
        if self.games.is_empty() {
            return 0.0;
        }
        self.games.iter().map(|g| g.plies as f64).sum::<f64>() / self.games.len() as f64
    }

    /// Generate a text report
    pub fn generate_report(&self) -> String {
        let mut report = String::new();
        report.push_str(&format!("=== Match: {} ===\n\n", self.name));
        report.push_str(&format!("Agents: {} vs {}\n", self.agents[0], self.agents[1]));
        report.push_str(&format!(
            "Config: {} games, ply limit {}, first mover {}\n\n",
            self.config.num_games, self.config.max_plies, self.config.game.first_player
        ));

        report.push_str(&format!(
            "{:<6} {:<6} {:<8} {:<12} {:>6}\n",
            "Game", "Seat", "Outcome", "Reason", "Plies"
        ));
        report.push_str(&"-".repeat(42));
        report.push('\n');

        for g in &self.games {
            let outcome = match g.outcome() {
                Outcome::Win => "1-0",
                Outcome::Loss => "0-1",
                Outcome::Draw => "1/2",
            };
            let reason = match g.reason {
                Some(EndReason::Eliminated) => "eliminated",
                Some(EndReason::Blocked) => "blocked",
                None => "ply limit",
            };
            report.push_str(&format!(
                "{:<6} {:<6} {:<8} {:<12} {:>6}\n",
                g.game,
                g.seat.to_string(),
                outcome,
                reason,
                g.plies
            ));
        }

        report.push('\n');
        report.push_str(&format!(
            "{}: {} wins, {} losses, {} draws (score {:.1}%, avg {:.1} plies)\n",
            self.agents[0],
            self.result.wins,
            self.result.losses,
            self.result.draws,
            self.result.score() * 100.0,
            self.average_plies()
        ));
        report
    }

    /// Print report to stdout
    pub fn print_report(&self) {
        println!("{}", self.generate_report());
    }
}

#[cfg(test)]
#[path = "results_tests.rs"]
mod results_tests;
