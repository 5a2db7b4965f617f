use crate::{board::Board, types::*};

/// Every move available to the piece on `from`, as a fresh vector.
/// Empty when the square is empty or the piece is stuck.
pub fn piece_moves(board: &Board, from: Square) -> Vec<Move> {
    let mut out = Vec::with_capacity(8);
    piece_moves_into(board, from, &mut out);
    out
}

/// Appends the moves of the piece on `from` to `out`, reusing the buffer.
pub fn piece_moves_into(board: &Board, from: Square, out: &mut Vec<Move>) {
    let pc = match board.piece_at(from) {
        Some(p) => p,
        None => return,
    };

    for &rdir in pc.directions() {
        for cdir in [-1, 1] {
            let next = match board.neighbor(from, rdir, cdir) {
                Some(s) => s,
                None => continue,
            };
            match board.piece_at(next) {
                None => out.push(Move::simple(pc.id, from, next)),
                Some(other) if other.owner != pc.owner => {
                    if let Some(landing) = board.neighbor(from, 2 * rdir, 2 * cdir) {
                        if board.is_empty(landing) {
                            out.push(Move::capture(pc.id, from, landing, next));
                        }
                    }
                }
                Some(_) => {}
            }
        }
    }
}

/// Union of the moves of all of `player`'s pieces. Forced capture is not applied here.
pub fn player_moves(board: &Board, player: Player) -> Vec<Move> {
    let mut out = Vec::with_capacity(32);
    for (sq, _) in board.pieces_of(player) {
        piece_moves_into(board, sq, &mut out);
    }
    out
}

pub fn has_capture(moves: &[Move]) -> bool {
    moves.iter().any(Move::is_capture)
}

/// Keeps only the captures when at least one is present.
pub fn apply_forced_capture(moves: &mut Vec<Move>) {
    if has_capture(moves) {
        moves.retain(Move::is_capture);
    }
}
