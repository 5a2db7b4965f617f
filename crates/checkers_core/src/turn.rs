//! Turn progression: whose move it is, which moves are legal, chain captures
//! and the end of the game.

use crate::board::Board;
use crate::config::{BlockedRule, ChainRule, GameConfig};
use crate::movegen::{apply_forced_capture, piece_moves, player_moves};
use crate::types::*;
use tracing::{debug, info};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// The side to move may play any move in the legal set.
    AwaitingMove,
    /// A piece has been picked up and a move is being executed.
    MoveInProgress,
    /// The piece that just captured must keep jumping.
    ChainCapture,
    GameOver { result: GameResult, reason: EndReason },
}

/// Snapshot of what the side to move may do. Rebuilt, never patched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnState {
    pub current_player: Player,
    pub legal_moves: Vec<Move>,
    /// Set while a capture chain restricts play to a single piece.
    pub forced_capture_chain: Option<PieceId>,
}

impl TurnState {
    pub fn moves_for(&self, piece: PieceId) -> impl Iterator<Item = &Move> {
        self.legal_moves.iter().filter(move |m| m.piece == piece)
    }

    pub fn contains(&self, mv: &Move) -> bool {
        self.legal_moves.contains(mv)
    }
}

/// What happened to a move handed to [`TurnController::commit`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommitOutcome {
    /// Not in the legal set; nothing changed.
    Rejected,
    /// Capture applied, the same piece must jump again.
    ChainContinues,
    /// Move applied, the other side is to move.
    TurnPassed,
    GameOver(GameResult),
}

#[derive(Clone, Debug)]
pub struct TurnController {
    board: Board,
    config: GameConfig,
    state: TurnState,
    phase: Phase,
    /// Piece picked up by `begin_move`, while the phase is `MoveInProgress`.
    moving: Option<PieceId>,
    history: Vec<Move>,
}

impl TurnController {
    pub fn new(config: GameConfig) -> Self {
        Self::with_board(Board::startpos(), config.first_player, config)
    }

    /// Starts from an arbitrary position with `to_move` on turn.
    pub fn with_board(board: Board, to_move: Player, config: GameConfig) -> Self {
        let mut tc = TurnController {
            board,
            config,
            state: TurnState {
                current_player: to_move,
                legal_moves: Vec::new(),
                forced_capture_chain: None,
            },
            phase: Phase::AwaitingMove,
            moving: None,
            history: Vec::new(),
        };
        tc.enter_turn(to_move);
        tc
    }

    /// Discards the current game and sets up a fresh one.
    pub fn reset(&mut self) {
        self.board = Board::startpos();
        self.history.clear();
        self.moving = None;
        self.enter_turn(self.config.first_player);
        info!(first = %self.config.first_player, "new game");
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> &TurnState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The piece whose move is in progress, if any.
    pub fn moving_piece(&self) -> Option<PieceId> {
        self.moving
    }

    pub fn current_player(&self) -> Player {
        self.state.current_player
    }

    pub fn legal_moves(&self) -> &[Move] {
        &self.state.legal_moves
    }

    pub fn result(&self) -> Option<GameResult> {
        match self.phase {
            Phase::GameOver { result, .. } => Some(result),
            _ => None,
        }
    }

    pub fn is_over(&self) -> bool {
        self.result().is_some()
    }

    /// Moves committed so far in this game.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    pub fn plies(&self) -> usize {
        self.history.len()
    }

    /// Destinations the given piece may move to right now.
    pub fn targets_for(&self, piece: PieceId) -> Vec<Square> {
        if self.is_over() {
            return Vec::new();
        }
        self.state.moves_for(piece).map(|m| m.to).collect()
    }

    /// Marks a move as in progress for `piece`.
    ///
    /// Returns the legal destinations, or `None` when the piece has no legal
    /// move or another move is already in progress.
    pub fn begin_move(&mut self, piece: PieceId) -> Option<Vec<Square>> {
        match self.phase {
            Phase::AwaitingMove | Phase::ChainCapture => {}
            _ => return None,
        }
        let targets = self.targets_for(piece);
        if targets.is_empty() {
            return None;
        }
        self.phase = Phase::MoveInProgress;
        self.moving = Some(piece);
        Some(targets)
    }

    /// Abandons an in-progress move. The piece is considered back on its origin.
    pub fn cancel_move(&mut self) {
        if self.phase == Phase::MoveInProgress {
            self.phase = self.resting_phase();
        }
        self.moving = None;
    }

    /// Looks up the legal move between two squares and commits it.
    pub fn try_move(&mut self, from: Square, to: Square) -> CommitOutcome {
        let found = self
            .state
            .legal_moves
            .iter()
            .find(|m| m.from == from && m.to == to)
            .copied();
        match found {
            Some(mv) => self.commit(&mv),
            None => {
                self.cancel_move();
                CommitOutcome::Rejected
            }
        }
    }

    /// Applies a move if it is in the current legal set, then advances the turn.
    ///
    /// While a move is in progress only the picked-up piece may be committed;
    /// a move of any other piece is rejected and the pick-up stays in place.
    pub fn commit(&mut self, mv: &Move) -> CommitOutcome {
        if matches!(self.moving, Some(held) if held != mv.piece) {
            debug!(%mv, held = ?self.moving, "rejected move of a piece not picked up");
            return CommitOutcome::Rejected;
        }
        if self.is_over() || !self.state.contains(mv) {
            debug!(%mv, "rejected move");
            self.cancel_move();
            return CommitOutcome::Rejected;
        }

        self.moving = None;
        let mover = self.state.current_player;
        let mut piece = self.board.remove(mv.from);
        if let Some(captured) = mv.captured {
            let taken = self.board.remove(captured);
            debug_assert_ne!(taken.owner, mover, "captured own piece");
        }
        if mv.to.row == mover.promotion_row() && piece.promote() {
            debug!(piece = ?piece.id, square = %mv.to, "crowned");
        }
        self.board.place(piece, mv.to);
        self.history.push(*mv);
        debug!(player = %mover, %mv, "move committed");

        if mv.is_capture() && self.config.chain_rule == ChainRule::Mandatory {
            let mut follow_ups = piece_moves(&self.board, mv.to);
            follow_ups.retain(Move::is_capture);
            if !follow_ups.is_empty() {
                debug!(piece = ?piece.id, count = follow_ups.len(), "capture chain continues");
                self.state = TurnState {
                    current_player: mover,
                    legal_moves: follow_ups,
                    forced_capture_chain: Some(piece.id),
                };
                self.phase = Phase::ChainCapture;
                return CommitOutcome::ChainContinues;
            }
        }

        self.enter_turn(mover.other());
        match self.phase {
            Phase::GameOver { result, .. } => CommitOutcome::GameOver(result),
            _ => CommitOutcome::TurnPassed,
        }
    }

    fn resting_phase(&self) -> Phase {
        if self.state.forced_capture_chain.is_some() {
            Phase::ChainCapture
        } else {
            Phase::AwaitingMove
        }
    }

    /// Builds the turn state for `player` and detects the end of the game.
    fn enter_turn(&mut self, player: Player) {
        let mut moves = player_moves(&self.board, player);
        apply_forced_capture(&mut moves);
        let stuck = moves.is_empty();
        self.state = TurnState {
            current_player: player,
            legal_moves: moves,
            forced_capture_chain: None,
        };

        if self.board.count(player) == 0 {
            self.finish(GameResult::win_for(player.other()), EndReason::Eliminated);
        } else if stuck {
            let result = match self.config.blocked_rule {
                BlockedRule::OpponentWins => GameResult::win_for(player.other()),
                BlockedRule::Draw => GameResult::Draw,
            };
            self.finish(result, EndReason::Blocked);
        } else {
            self.phase = Phase::AwaitingMove;
        }
    }

    fn finish(&mut self, result: GameResult, reason: EndReason) {
        info!(?result, ?reason, plies = self.history.len(), "game over");
        self.phase = Phase::GameOver { result, reason };
    }
}
