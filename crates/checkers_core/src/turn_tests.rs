use super::*;

fn sq(row: i8, col: i8) -> Square {
    Square::new(row, col).unwrap()
}

fn setup(pieces: &[(Player, Rank, i8, i8)]) -> Board {
    let mut board = Board::empty();
    for &(owner, rank, row, col) in pieces {
        board.spawn(owner, rank, sq(row, col));
    }
    board
}

/// p1 man on (2,1) can jump (3,2) and then (5,4); p2 keeps a spare man on (7,0).
fn chain_board() -> Board {
    setup(&[
        (Player::P1, Rank::Man, 2, 1),
        (Player::P1, Rank::Man, 0, 5),
        (Player::P2, Rank::Man, 3, 2),
        (Player::P2, Rank::Man, 5, 4),
        (Player::P2, Rank::Man, 7, 0),
    ])
}

#[test]
fn new_game_starts_with_p2() {
    let tc = TurnController::new(GameConfig::default());
    assert_eq!(tc.phase(), Phase::AwaitingMove);
    assert_eq!(tc.current_player(), Player::P2);
    assert_eq!(tc.legal_moves().len(), 7);
    assert_eq!(tc.state().forced_capture_chain, None);
    assert_eq!(tc.plies(), 0);
}

#[test]
fn first_player_is_configurable() {
    let config = GameConfig {
        first_player: Player::P1,
        ..Default::default()
    };
    let tc = TurnController::new(config);
    assert_eq!(tc.current_player(), Player::P1);
}

#[test]
fn simple_move_passes_the_turn() {
    let mut tc = TurnController::new(GameConfig::default());
    let outcome = tc.try_move(sq(5, 2), sq(4, 3));
    assert_eq!(outcome, CommitOutcome::TurnPassed);
    assert_eq!(tc.current_player(), Player::P1);
    assert!(tc.board().is_empty(sq(5, 2)));
    assert_eq!(tc.board().piece_at(sq(4, 3)).unwrap().owner, Player::P2);
    assert_eq!(tc.history().len(), 1);
}

#[test]
fn illegal_move_is_rejected_without_changes() {
    let mut tc = TurnController::new(GameConfig::default());
    let before = tc.board().clone();

    // Backwards, and a p1 piece while p2 is on turn
    assert_eq!(tc.try_move(sq(5, 2), sq(6, 3)), CommitOutcome::Rejected);
    assert_eq!(tc.try_move(sq(2, 1), sq(3, 2)), CommitOutcome::Rejected);

    let forged = Move::simple(PieceId(20), sq(5, 2), sq(3, 4));
    assert_eq!(tc.commit(&forged), CommitOutcome::Rejected);

    assert_eq!(tc.board(), &before);
    assert_eq!(tc.current_player(), Player::P2);
    assert_eq!(tc.phase(), Phase::AwaitingMove);
    assert_eq!(tc.plies(), 0);
}

#[test]
fn forced_capture_restricts_legal_moves() {
    let board = setup(&[
        (Player::P1, Rank::Man, 3, 2),
        (Player::P1, Rank::Man, 0, 5),
        (Player::P2, Rank::Man, 4, 3),
        (Player::P2, Rank::Man, 7, 0),
    ]);
    let tc = TurnController::with_board(board, Player::P1, GameConfig::default());
    assert_eq!(tc.legal_moves().len(), 1);
    assert!(tc.legal_moves().iter().all(Move::is_capture));
}

#[test]
fn capture_removes_the_jumped_piece() {
    let board = setup(&[
        (Player::P1, Rank::Man, 3, 2),
        (Player::P2, Rank::Man, 4, 3),
    ]);
    let mut tc = TurnController::with_board(board, Player::P1, GameConfig::default());
    let outcome = tc.try_move(sq(3, 2), sq(5, 4));

    assert!(tc.board().is_empty(sq(4, 3)));
    assert!(tc.board().is_empty(sq(3, 2)));
    assert_eq!(tc.board().piece_at(sq(5, 4)).unwrap().owner, Player::P1);
    assert_eq!(tc.board().count(Player::P2), 0);
    assert_eq!(outcome, CommitOutcome::GameOver(GameResult::P1Wins));
    assert_eq!(
        tc.phase(),
        Phase::GameOver {
            result: GameResult::P1Wins,
            reason: EndReason::Eliminated
        }
    );
}

#[test]
fn chain_capture_keeps_the_turn() {
    let mut tc = TurnController::with_board(chain_board(), Player::P1, GameConfig::default());
    let jumper = tc.board().piece_at(sq(2, 1)).unwrap().id;

    assert_eq!(tc.try_move(sq(2, 1), sq(4, 3)), CommitOutcome::ChainContinues);
    assert_eq!(tc.phase(), Phase::ChainCapture);
    assert_eq!(tc.current_player(), Player::P1);
    assert_eq!(tc.state().forced_capture_chain, Some(jumper));
    assert_eq!(tc.legal_moves().len(), 1);
    assert!(tc.legal_moves().iter().all(|m| m.piece == jumper && m.is_capture()));

    // Other pieces may not move mid-chain
    assert_eq!(tc.try_move(sq(0, 5), sq(1, 4)), CommitOutcome::Rejected);
    assert_eq!(tc.phase(), Phase::ChainCapture);

    assert_eq!(tc.try_move(sq(4, 3), sq(6, 5)), CommitOutcome::TurnPassed);
    assert_eq!(tc.current_player(), Player::P2);
    assert_eq!(tc.state().forced_capture_chain, None);
    assert_eq!(tc.board().count(Player::P2), 1);
}

#[test]
fn single_jump_rule_ends_turn_after_one_capture() {
    let config = GameConfig {
        chain_rule: ChainRule::SingleJump,
        ..Default::default()
    };
    let mut tc = TurnController::with_board(chain_board(), Player::P1, config);
    assert_eq!(tc.try_move(sq(2, 1), sq(4, 3)), CommitOutcome::TurnPassed);
    assert_eq!(tc.current_player(), Player::P2);
}

#[test]
fn man_reaching_far_row_is_crowned() {
    let board = setup(&[
        (Player::P1, Rank::Man, 6, 1),
        (Player::P2, Rank::Man, 4, 7),
    ]);
    let mut tc = TurnController::with_board(board, Player::P1, GameConfig::default());
    assert_eq!(tc.try_move(sq(6, 1), sq(7, 0)), CommitOutcome::TurnPassed);
    assert_eq!(tc.board().piece_at(sq(7, 0)).unwrap().rank, Rank::King);
}

#[test]
fn king_on_far_row_stays_king() {
    let board = setup(&[
        (Player::P1, Rank::King, 6, 1),
        (Player::P2, Rank::Man, 4, 7),
    ]);
    let mut tc = TurnController::with_board(board, Player::P1, GameConfig::default());
    assert_eq!(tc.try_move(sq(6, 1), sq(7, 2)), CommitOutcome::TurnPassed);
    assert_eq!(tc.board().piece_at(sq(7, 2)).unwrap().rank, Rank::King);

    // and can walk back down
    assert_eq!(tc.try_move(sq(4, 7), sq(3, 6)), CommitOutcome::TurnPassed);
    assert_eq!(tc.try_move(sq(7, 2), sq(6, 3)), CommitOutcome::TurnPassed);
}

#[test]
fn p2_is_crowned_on_row_zero() {
    let board = setup(&[
        (Player::P2, Rank::Man, 1, 2),
        (Player::P1, Rank::Man, 3, 6),
    ]);
    let mut tc = TurnController::with_board(board, Player::P2, GameConfig::default());
    assert_eq!(tc.try_move(sq(1, 2), sq(0, 1)), CommitOutcome::TurnPassed);
    assert!(tc.board().piece_at(sq(0, 1)).unwrap().is_king());
}

#[test]
fn no_pieces_at_turn_start_is_game_over() {
    let board = setup(&[(Player::P1, Rank::Man, 2, 1)]);
    let tc = TurnController::with_board(board, Player::P2, GameConfig::default());
    assert_eq!(
        tc.phase(),
        Phase::GameOver {
            result: GameResult::P1Wins,
            reason: EndReason::Eliminated
        }
    );
    assert!(tc.legal_moves().is_empty());
}

#[test]
fn blocked_side_loses() {
    // p2 on (7,0) is walled in by two p1 men
    let board = setup(&[
        (Player::P2, Rank::Man, 7, 0),
        (Player::P1, Rank::Man, 6, 1),
        (Player::P1, Rank::Man, 5, 2),
    ]);
    let tc = TurnController::with_board(board, Player::P2, GameConfig::default());
    assert_eq!(
        tc.phase(),
        Phase::GameOver {
            result: GameResult::P1Wins,
            reason: EndReason::Blocked
        }
    );
    assert_eq!(tc.board().count(Player::P2), 1);
}

#[test]
fn blocked_side_draws_under_draw_rule() {
    let board = setup(&[
        (Player::P2, Rank::Man, 7, 0),
        (Player::P1, Rank::Man, 6, 1),
        (Player::P1, Rank::Man, 5, 2),
    ]);
    let config = GameConfig {
        blocked_rule: BlockedRule::Draw,
        ..Default::default()
    };
    let tc = TurnController::with_board(board, Player::P2, config);
    assert_eq!(tc.result(), Some(GameResult::Draw));
}

#[test]
fn game_over_is_terminal() {
    let board = setup(&[(Player::P1, Rank::Man, 2, 1)]);
    let mut tc = TurnController::with_board(board, Player::P2, GameConfig::default());
    assert_eq!(tc.try_move(sq(2, 1), sq(3, 2)), CommitOutcome::Rejected);
    assert_eq!(tc.begin_move(PieceId(0)), None);
    assert!(tc.is_over());
}

#[test]
fn reset_restores_the_opening() {
    let board = setup(&[(Player::P1, Rank::Man, 2, 1)]);
    let mut tc = TurnController::with_board(board, Player::P2, GameConfig::default());
    tc.reset();
    assert_eq!(tc.board(), &Board::startpos());
    assert_eq!(tc.phase(), Phase::AwaitingMove);
    assert_eq!(tc.current_player(), Player::P2);
    assert!(tc.history().is_empty());
}

#[test]
fn begin_and_cancel_move() {
    let mut tc = TurnController::new(GameConfig::default());
    let back_row = tc.board().piece_at(sq(7, 0)).unwrap().id;
    let front = tc.board().piece_at(sq(5, 2)).unwrap().id;

    assert_eq!(tc.begin_move(back_row), None);
    let targets = tc.begin_move(front).unwrap();
    assert_eq!(targets.len(), 2);
    assert_eq!(tc.phase(), Phase::MoveInProgress);
    assert_eq!(tc.begin_move(front), None);

    tc.cancel_move();
    assert_eq!(tc.phase(), Phase::AwaitingMove);
}

#[test]
fn commit_of_other_piece_is_rejected_while_one_is_held() {
    let mut tc = TurnController::new(GameConfig::default());
    let held = tc.board().piece_at(sq(5, 2)).unwrap().id;
    let other = tc.board().piece_at(sq(5, 0)).unwrap().id;
    tc.begin_move(held).unwrap();

    let stray = *tc.state().moves_for(other).next().unwrap();
    assert_eq!(tc.commit(&stray), CommitOutcome::Rejected);
    assert_eq!(tc.phase(), Phase::MoveInProgress);
    assert_eq!(tc.moving_piece(), Some(held));
    assert!(tc.history().is_empty());

    let mv = *tc.state().moves_for(held).next().unwrap();
    assert_eq!(tc.commit(&mv), CommitOutcome::TurnPassed);
    assert_eq!(tc.moving_piece(), None);
}

#[test]
fn cancel_clears_the_held_piece() {
    let mut tc = TurnController::new(GameConfig::default());
    let held = tc.board().piece_at(sq(5, 2)).unwrap().id;
    tc.begin_move(held).unwrap();
    tc.cancel_move();
    assert_eq!(tc.moving_piece(), None);
    assert_eq!(tc.try_move(sq(5, 0), sq(4, 1)), CommitOutcome::TurnPassed);
}

#[test]
fn cancel_during_chain_returns_to_chain() {
    let mut tc = TurnController::with_board(chain_board(), Player::P1, GameConfig::default());
    tc.try_move(sq(2, 1), sq(4, 3));
    let jumper = tc.state().forced_capture_chain.unwrap();
    assert!(tc.begin_move(jumper).is_some());
    tc.cancel_move();
    assert_eq!(tc.phase(), Phase::ChainCapture);
}

#[test]
fn config_from_toml() {
    let config = GameConfig::from_toml_str(
        r#"
first_player = "p1"
chain_rule = "single_jump"

[animation]
duration_ms = 120
"#,
    )
    .unwrap();
    assert_eq!(config.first_player, Player::P1);
    assert_eq!(config.chain_rule, ChainRule::SingleJump);
    assert_eq!(config.blocked_rule, BlockedRule::OpponentWins);
    assert_eq!(config.animation.duration_ms, 120);
    assert_eq!(config.animation.delay_ms, 250);

    assert_eq!(GameConfig::from_toml_str("").unwrap(), GameConfig::default());
    assert!(GameConfig::from_toml_str("chain_rule = \"sometimes\"").is_err());
    assert!(matches!(
        GameConfig::from_toml_str("[animation]\nframe_ms = 0"),
        Err(ConfigError::ZeroFrame)
    ));
}

#[test]
fn man_crowned_by_capture_keeps_jumping_as_king() {
    let board = setup(&[
        (Player::P1, Rank::Man, 5, 2),
        (Player::P2, Rank::Man, 6, 3),
        (Player::P2, Rank::Man, 6, 5),
        (Player::P2, Rank::Man, 2, 7),
    ]);
    let mut tc = TurnController::with_board(board, Player::P1, GameConfig::default());
    let jumper = tc.board().piece_at(sq(5, 2)).unwrap().id;

    assert_eq!(tc.try_move(sq(5, 2), sq(7, 4)), CommitOutcome::ChainContinues);
    assert!(tc.board().piece_at(sq(7, 4)).unwrap().is_king());
    assert!(tc.board().is_empty(sq(6, 3)));
    assert_eq!(tc.phase(), Phase::ChainCapture);
    assert_eq!(tc.state().forced_capture_chain, Some(jumper));
    assert_eq!(
        tc.legal_moves(),
        &[Move::capture(jumper, sq(7, 4), sq(5, 6), sq(6, 5))]
    );

    assert_eq!(tc.try_move(sq(7, 4), sq(5, 6)), CommitOutcome::TurnPassed);
    assert_eq!(tc.board().count(Player::P2), 1);
}
