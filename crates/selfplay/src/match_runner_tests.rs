use super::*;
use crate::results::Outcome;
use random_agent::RandomAgent;

fn quick_config(num_games: u32) -> MatchConfig {
    let mut config = MatchConfig {
        num_games,
        max_plies: 120,
        verbose: false,
        ..Default::default()
    };
    // Short animations keep the tick loop small
    config.game.animation.delay_ms = 0;
    config.game.animation.duration_ms = 20;
    config.game.animation.frame_ms = 10;
    config
}

#[test]
fn test_self_play() {
    let runner = MatchRunner::new(quick_config(4));
    let report = runner.run_match(
        "smoke",
        |g| Box::new(RandomAgent::seeded(2 * g as u64)) as Box<dyn Agent>,
        |g| Box::new(RandomAgent::seeded(2 * g as u64 + 1)) as Box<dyn Agent>,
    );

    // Self-play should complete without panic
    assert_eq!(report.result.total_games(), 4);
    assert_eq!(report.games.len(), 4);
    assert!(report.games.iter().all(|g| g.plies > 0 && g.plies <= 120));
    assert_eq!(report.agents[0], "Random v1.0");
}

#[test]
fn seats_alternate() {
    let runner = MatchRunner::new(quick_config(3));
    let report = runner.run_match(
        "seats",
        |g| Box::new(RandomAgent::seeded(g as u64).named("a")) as Box<dyn Agent>,
        |g| Box::new(RandomAgent::seeded(100 + g as u64).named("b")) as Box<dyn Agent>,
    );
    let seats: Vec<Player> = report.games.iter().map(|g| g.seat).collect();
    assert_eq!(seats, vec![Player::P1, Player::P2, Player::P1]);
    assert_eq!(report.agents, ["a".to_string(), "b".to_string()]);
}

#[test]
fn seeded_matches_are_reproducible() {
    let runner = MatchRunner::new(quick_config(2));
    let play = || {
        runner.run_match(
            "repro",
            |g| Box::new(RandomAgent::seeded(g as u64)) as Box<dyn Agent>,
            |g| Box::new(RandomAgent::seeded(50 + g as u64)) as Box<dyn Agent>,
        )
    };
    assert_eq!(play().games, play().games);
}

#[test]
fn ply_limit_scores_a_draw() {
    let mut config = quick_config(1);
    config.max_plies = 2;
    let runner = MatchRunner::new(config);
    let record = runner.play_game(
        Box::new(RandomAgent::seeded(1)),
        Box::new(RandomAgent::seeded(2)),
    );
    assert_eq!(record.plies, 2);
    assert_eq!(record.reason, None);
    assert_eq!(record.outcome(), Outcome::Draw);
}

#[test]
fn config_from_toml() {
    let config = MatchConfig::from_toml_str(
        r#"
num_games = 4
max_plies = 80

[game]
first_player = "p1"

[game.animation]
delay_ms = 0
"#,
    )
    .unwrap();
    assert_eq!(config.num_games, 4);
    assert_eq!(config.max_plies, 80);
    assert!(config.alternate_seats);
    assert_eq!(config.game.first_player, Player::P1);
    assert_eq!(config.game.animation.delay_ms, 0);
    assert_eq!(config.game.animation.duration_ms, 300);

    assert!(MatchConfig::from_toml_str("[game.animation]\nframe_ms = 0").is_err());
}
