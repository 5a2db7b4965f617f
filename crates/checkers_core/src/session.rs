//! One game as seen by a front end: pointer events in, agent replies out.

use crate::animation::Point;
use crate::config::GameConfig;
use crate::interaction::{DropOutcome, InteractionController, InteractionError};
use crate::surface::Surface;
use crate::turn::TurnController;
use crate::types::{Player, Square};
use crate::Agent;
use std::time::Duration;
use tracing::{debug, warn};

/// Who plays a side.
pub enum Seat {
    Human,
    Agent(Box<dyn Agent>),
}

impl Seat {
    pub fn is_agent(&self) -> bool {
        matches!(self, Seat::Agent(_))
    }
}

pub struct Session<S: Surface> {
    turn: TurnController,
    interaction: InteractionController<S>,
    seats: [Seat; 2],
    /// Time the side to move has been on turn with nothing in flight.
    idle: Duration,
}

impl<S: Surface> Session<S> {
    pub fn new(config: GameConfig, surface: S, p1: Seat, p2: Seat) -> Self {
        Self {
            turn: TurnController::new(config),
            interaction: InteractionController::new(surface),
            seats: [p1, p2],
            idle: Duration::ZERO,
        }
    }

    /// Builds a session around an existing turn controller.
    pub fn with_turn(turn: TurnController, surface: S, p1: Seat, p2: Seat) -> Self {
        Self {
            turn,
            interaction: InteractionController::new(surface),
            seats: [p1, p2],
            idle: Duration::ZERO,
        }
    }

    pub fn turn(&self) -> &TurnController {
        &self.turn
    }

    pub fn interaction(&self) -> &InteractionController<S> {
        &self.interaction
    }

    pub fn surface(&self) -> &S {
        self.interaction.surface()
    }

    pub fn seat(&self, player: Player) -> &Seat {
        &self.seats[player.idx()]
    }

    /// Picks up the piece under the pointer, if it belongs to a human side to move.
    pub fn pointer_down(&mut self, point: Point) -> Result<(), InteractionError> {
        if self.seats[self.turn.current_player().idx()].is_agent() {
            return Err(InteractionError::AgentSeat);
        }
        if self.interaction.is_dragging() {
            return Err(InteractionError::DragActive);
        }
        let piece = self
            .interaction
            .surface()
            .square_at_point(point)
            .and_then(|sq| self.turn.board().piece_at(sq))
            .filter(|pc| pc.owner == self.turn.current_player())
            .ok_or(InteractionError::NothingToPick)?;
        self.interaction.begin_drag(&mut self.turn, piece.id, point)
    }

    pub fn pointer_move(&mut self, point: Point) -> Result<Option<Square>, InteractionError> {
        self.interaction.update_position(point)
    }

    pub fn pointer_up(&mut self) -> Result<DropOutcome, InteractionError> {
        let outcome = self.interaction.end_drag(&mut self.turn)?;
        self.idle = Duration::ZERO;
        Ok(outcome)
    }

    /// True when an agent is on turn and no move is in flight.
    pub fn agent_due(&self) -> bool {
        !self.turn.is_over()
            && !self.interaction.is_dragging()
            && self.seats[self.turn.current_player().idx()].is_agent()
    }

    /// Advances time. Runs the current simulated drag, or asks the agent on
    /// turn for a move once the configured delay has passed.
    pub fn tick(&mut self, elapsed: Duration) -> Option<DropOutcome> {
        if self.interaction.is_simulating() {
            let outcome = self.interaction.tick(&mut self.turn, elapsed);
            if outcome.is_some() {
                self.idle = Duration::ZERO;
            }
            return outcome;
        }
        if !self.agent_due() {
            self.idle = Duration::ZERO;
            return None;
        }

        self.idle += elapsed;
        if self.idle < self.turn.config().animation.delay() {
            return None;
        }
        self.idle = Duration::ZERO;

        let player = self.turn.current_player();
        let Seat::Agent(agent) = &mut self.seats[player.idx()] else {
            return None;
        };
        let Some(mv) = agent.select_move(self.turn.legal_moves()) else {
            warn!(agent = agent.name(), "agent returned no move");
            return None;
        };
        debug!(agent = agent.name(), %player, %mv, "agent chose move");
        if let Err(err) = self.interaction.simulate_move(&mut self.turn, mv.piece, mv.to) {
            warn!(%err, "agent move not playable");
        }
        None
    }

    /// Throws the current game away and starts a new one.
    pub fn reset(&mut self) {
        self.interaction.abort(&mut self.turn);
        self.turn.reset();
        self.idle = Duration::ZERO;
        for seat in &mut self.seats {
            if let Seat::Agent(agent) = seat {
                agent.new_game();
            }
        }
    }
}
