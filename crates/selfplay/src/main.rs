//! Self-play CLI
//!
//! Run automated games between random agents and report the results.

use anyhow::{bail, Context};
use checkers_core::Agent;
use random_agent::RandomAgent;
use selfplay::{MatchConfig, MatchReport, MatchRunner};
use std::env;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

fn print_usage() {
    println!("Checkers Self-play Runner");
    println!();
    println!("Usage:");
    println!("  selfplay match [--games N] [--max-plies N] [--seed S] [--config FILE] [--out FILE]");
    println!("  selfplay show <FILE>");
    println!();
    println!("Options:");
    println!("  --games, -g      number of games (default 10)");
    println!("  --max-plies      plies before a game is scored as a draw (default 300)");
    println!("  --seed, -s       seed both agents for a reproducible match");
    println!("  --config, -c     TOML match config; flags override it");
    println!("  --out, -o        write the JSON report here");
    println!();
    println!("Examples:");
    println!("  selfplay match --games 20 --seed 7 --out report.json");
    println!("  selfplay show report.json");
}

fn flag_value<'a>(args: &'a [String], i: usize, flag: &str) -> anyhow::Result<&'a str> {
    match args.get(i + 1) {
        Some(v) => Ok(v.as_str()),
        None => bail!("{flag} needs a value"),
    }
}

fn random_agent(seed: Option<u64>, name: &str) -> Box<dyn Agent> {
    let agent = match seed {
        Some(s) => RandomAgent::seeded(s),
        None => RandomAgent::new(),
    };
    Box::new(agent.named(name))
}

fn run_match(args: &[String]) -> anyhow::Result<()> {
    let mut config_path: Option<PathBuf> = None;
    let mut num_games: Option<u32> = None;
    let mut max_plies: Option<u32> = None;
    let mut seed: Option<u64> = None;
    let mut out: Option<PathBuf> = None;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--games" | "-g" => {
                num_games = Some(flag_value(args, i, "--games")?.parse().context("--games")?);
                i += 1;
            }
            "--max-plies" => {
                max_plies = Some(flag_value(args, i, "--max-plies")?.parse().context("--max-plies")?);
                i += 1;
            }
            "--seed" | "-s" => {
                seed = Some(flag_value(args, i, "--seed")?.parse().context("--seed")?);
                i += 1;
            }
            "--config" | "-c" => {
                config_path = Some(PathBuf::from(flag_value(args, i, "--config")?));
                i += 1;
            }
            "--out" | "-o" => {
                out = Some(PathBuf::from(flag_value(args, i, "--out")?));
                i += 1;
            }
            other => bail!("unknown option: {other}"),
        }
        i += 1;
    }

    let mut config = match &config_path {
        Some(path) => MatchConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => MatchConfig::default(),
    };
    if let Some(n) = num_games {
        config.num_games = n;
    }
    if let Some(n) = max_plies {
        config.max_plies = n;
    }

    println!("=== Match: random-a vs random-b ===");
    println!(
        "Games: {}, ply limit: {}, first mover: {}",
        config.num_games, config.max_plies, config.game.first_player
    );
    println!();

    let runner = MatchRunner::new(config);
    let report = runner.run_match(
        "random-a vs random-b",
        |g| random_agent(seed.map(|s| s.wrapping_add(2 * g as u64)), "random-a"),
        |g| random_agent(seed.map(|s| s.wrapping_add(2 * g as u64 + 1)), "random-b"),
    );
    report.print_report();

    if let Some(path) = out {
        report
            .save(&path)
            .with_context(|| format!("writing report {}", path.display()))?;
        println!("Report written to {}", path.display());
    }
    Ok(())
}

fn show_report(args: &[String]) -> anyhow::Result<()> {
    let Some(path) = args.first() else {
        bail!("show requires a report file");
    };
    let report = MatchReport::load(Path::new(path))
        .with_context(|| format!("reading report {path}"))?;
    report.print_report();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        return Ok(());
    }

    match args[1].as_str() {
        "match" => run_match(&args[2..]),
        "show" => show_report(&args[2..]),
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        _ => {
            eprintln!("Unknown command: {}", args[1]);
            print_usage();
            Ok(())
        }
    }
}
