//! Turns a continuous drag gesture, real or simulated, into one discrete move.
//!
//! Only one piece can be held at a time. Pointer input and agent-driven
//! simulations share that slot, so starting a second drag while one is in
//! flight is refused.

use crate::animation::{DragAnimation, Point};
use crate::surface::Surface;
use crate::turn::{CommitOutcome, TurnController};
use crate::types::{PieceId, Square};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, trace};

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum InteractionError {
    #[error("a piece is already being dragged")]
    DragActive,
    #[error("piece {0:?} has no legal move")]
    NotMovable(PieceId),
    #[error("no drag in progress")]
    NoDrag,
    #[error("pointer input is ignored while a simulated move runs")]
    SimulationActive,
    #[error("{1} is not a legal destination for piece {0:?}")]
    NotATarget(PieceId, Square),
    #[error("no piece of the side to move under the pointer")]
    NothingToPick,
    #[error("the side to move is played by an agent")]
    AgentSeat,
}

/// Result of letting go of the held piece.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DropOutcome {
    /// Dropped on a legal target and handed to the turn controller.
    Committed(CommitOutcome),
    /// Dropped elsewhere; the piece went back to its origin square.
    Returned,
}

#[derive(Clone, Debug)]
struct Simulation {
    animation: DragAnimation,
    elapsed: Duration,
    destination: Square,
}

#[derive(Clone, Debug)]
struct ActiveDrag {
    piece: PieceId,
    origin: Square,
    targets: Vec<Square>,
    pending: Option<Square>,
    pointer: Point,
    simulation: Option<Simulation>,
}

pub struct InteractionController<S: Surface> {
    surface: S,
    drag: Option<ActiveDrag>,
}

impl<S: Surface> InteractionController<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            drag: None,
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn is_simulating(&self) -> bool {
        matches!(&self.drag, Some(d) if d.simulation.is_some())
    }

    pub fn held_piece(&self) -> Option<PieceId> {
        self.drag.as_ref().map(|d| d.piece)
    }

    /// Square the held piece started from.
    pub fn origin(&self) -> Option<Square> {
        self.drag.as_ref().map(|d| d.origin)
    }

    /// Last known position of the held piece.
    pub fn pointer(&self) -> Option<Point> {
        self.drag.as_ref().map(|d| d.pointer)
    }

    pub fn pending_target(&self) -> Option<Square> {
        self.drag.as_ref().and_then(|d| d.pending)
    }

    pub fn targets(&self) -> &[Square] {
        match &self.drag {
            Some(d) => &d.targets,
            None => &[],
        }
    }

    /// Picks up `piece` under the pointer and highlights its legal destinations.
    pub fn begin_drag(
        &mut self,
        turn: &mut TurnController,
        piece: PieceId,
        pointer: Point,
    ) -> Result<(), InteractionError> {
        self.pick(turn, piece, pointer, None)
    }

    /// Follows the pointer. Returns the pending target, if any.
    pub fn update_position(&mut self, pointer: Point) -> Result<Option<Square>, InteractionError> {
        self.ensure_pointer_drag()?;
        Ok(self.move_to(pointer))
    }

    /// Lets go of a pointer-held piece.
    pub fn end_drag(&mut self, turn: &mut TurnController) -> Result<DropOutcome, InteractionError> {
        self.ensure_pointer_drag()?;
        Ok(self.drop(turn))
    }

    /// Starts an animated drag of `piece` to `destination`, as if a user did it.
    /// Advance it with [`tick`](Self::tick); it cannot be cancelled.
    pub fn simulate_move(
        &mut self,
        turn: &mut TurnController,
        piece: PieceId,
        destination: Square,
    ) -> Result<(), InteractionError> {
        if self.drag.is_some() {
            return Err(InteractionError::DragActive);
        }
        if !turn.targets_for(piece).contains(&destination) {
            return Err(InteractionError::NotATarget(piece, destination));
        }
        let origin = turn
            .board()
            .locate(piece)
            .ok_or(InteractionError::NotMovable(piece))?;

        let anim = turn.config().animation;
        let from = self.surface.square_center(origin);
        let to = self.surface.square_center(destination);
        let simulation = Simulation {
            animation: DragAnimation::new(from, to, anim.duration(), anim.tolerance),
            elapsed: Duration::ZERO,
            destination,
        };
        debug!(piece = ?piece, from = %origin, to = %destination, "simulated drag started");
        self.pick(turn, piece, from, Some(simulation))
    }

    /// Advances a running simulation by `elapsed`. Returns the drop outcome on
    /// the tick that finishes it.
    pub fn tick(&mut self, turn: &mut TurnController, elapsed: Duration) -> Option<DropOutcome> {
        let (point, finished) = {
            let sim = self.drag.as_mut()?.simulation.as_mut()?;
            sim.elapsed += elapsed;
            (
                sim.animation.position_at(sim.elapsed),
                sim.animation.is_finished(sim.elapsed),
            )
        };
        trace!(x = point.x, y = point.y, "animation frame");
        self.move_to(point);
        if finished {
            Some(self.drop(turn))
        } else {
            None
        }
    }

    /// Drops whatever is held without moving it. Used when the game is reset.
    pub fn abort(&mut self, turn: &mut TurnController) {
        if let Some(drag) = self.drag.take() {
            self.clear_highlights(&drag);
            turn.cancel_move();
        }
    }

    fn ensure_pointer_drag(&self) -> Result<(), InteractionError> {
        match &self.drag {
            None => Err(InteractionError::NoDrag),
            Some(d) if d.simulation.is_some() => Err(InteractionError::SimulationActive),
            Some(_) => Ok(()),
        }
    }

    fn pick(
        &mut self,
        turn: &mut TurnController,
        piece: PieceId,
        pointer: Point,
        simulation: Option<Simulation>,
    ) -> Result<(), InteractionError> {
        if self.drag.is_some() {
            return Err(InteractionError::DragActive);
        }
        let origin = turn
            .board()
            .locate(piece)
            .ok_or(InteractionError::NotMovable(piece))?;
        let targets = turn
            .begin_move(piece)
            .ok_or(InteractionError::NotMovable(piece))?;

        for &sq in &targets {
            self.surface.highlight_target(sq);
        }
        self.drag = Some(ActiveDrag {
            piece,
            origin,
            targets,
            pending: None,
            pointer,
            simulation,
        });
        self.move_to(pointer);
        Ok(())
    }

    fn move_to(&mut self, pointer: Point) -> Option<Square> {
        let Self { surface, drag } = self;
        let drag = drag.as_mut()?;
        drag.pointer = pointer;
        surface.hold_piece(drag.piece, pointer);

        let hovered = surface
            .square_at_point(pointer)
            .filter(|sq| drag.targets.contains(sq));
        if hovered != drag.pending {
            if let Some(prev) = drag.pending {
                surface.clear_pending(prev);
            }
            if let Some(next) = hovered {
                surface.set_pending(next);
            }
            drag.pending = hovered;
        }
        drag.pending
    }

    fn drop(&mut self, turn: &mut TurnController) -> DropOutcome {
        let drag = match self.drag.take() {
            Some(d) => d,
            None => return DropOutcome::Returned,
        };
        self.clear_highlights(&drag);

        // A simulated drag always lands where it was sent.
        let target = match &drag.simulation {
            Some(sim) => Some(sim.destination),
            None => drag.pending,
        };
        let Some(to) = target else {
            debug!(piece = ?drag.piece, origin = %drag.origin, "dropped outside targets");
            turn.cancel_move();
            return DropOutcome::Returned;
        };

        let mv = turn
            .state()
            .moves_for(drag.piece)
            .find(|m| m.to == to)
            .copied();
        match mv.map(|mv| turn.commit(&mv)) {
            Some(CommitOutcome::Rejected) | None => {
                turn.cancel_move();
                DropOutcome::Returned
            }
            Some(outcome) => DropOutcome::Committed(outcome),
        }
    }

    fn clear_highlights(&mut self, drag: &ActiveDrag) {
        if let Some(p) = drag.pending {
            self.surface.clear_pending(p);
        }
        for &sq in &drag.targets {
            self.surface.clear_target(sq);
        }
        self.surface.release_piece(drag.piece);
    }
}
