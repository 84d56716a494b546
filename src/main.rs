// boxstat entry point.
//
// Startup sequence:
// 1. Initialize tracing (stderr; stdout carries the JSON results)
// 2. Load four-factors weights (weights.toml if present, defaults otherwise)
// 3. Load player and/or team CSV exports named on the command line
// 4. Run the aggregators and print one JSON object per entity
//
// Usage:
//   boxstat [--weights weights.toml] [--players players.csv] [--teams teams.csv]
//
// Team CSVs are expected in game-pair order: each consecutive pair of rows
// is one game, and both sides of the pair are reported.

use boxscore_analytics::config;
use boxscore_analytics::loader;
use boxscore_analytics::metrics;

use anyhow::{bail, Context};
use std::path::PathBuf;
use tracing::{info, warn};

fn main() -> anyhow::Result<()> {
    init_tracing()?;

    let args = parse_args().context("failed to parse command line")?;
    if args.players.is_none() && args.teams.is_none() {
        bail!("nothing to do: pass --players <csv> and/or --teams <csv>");
    }

    let weights = config::load_weights_or_default(&args.weights)
        .context("failed to load four-factors weights")?;
    info!(
        "Four-factors weights: shooting={} turnovers={} rebounding={} free_throws={}",
        weights.shooting, weights.turnovers, weights.rebounding, weights.free_throws
    );

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    if let Some(path) = &args.players {
        let rows = loader::load_players(path).context("failed to load player box scores")?;
        info!("Loaded {} player rows from {}", rows.len(), path.display());
        for row in &rows {
            let stats = metrics::player_stats(&row.boxscore);
            let line = serde_json::json!({
                "kind": "player",
                "name": row.name,
                "stats": stats,
            });
            serde_json::to_writer(&mut out, &line).context("failed to write player stats")?;
            std::io::Write::write_all(&mut out, b"\n")?;
        }
    }

    if let Some(path) = &args.teams {
        let rows = loader::load_teams(path).context("failed to load team box scores")?;
        info!("Loaded {} team rows from {}", rows.len(), path.display());
        if rows.len() % 2 != 0 {
            warn!("odd number of team rows; the last row has no opponent and is dropped");
        }
        for pair in rows.chunks_exact(2) {
            for (team, opponent) in [(&pair[0], &pair[1]), (&pair[1], &pair[0])] {
                let stats = metrics::team_stats(&team.boxscore, &opponent.boxscore, &weights);
                let line = serde_json::json!({
                    "kind": "team",
                    "name": team.name,
                    "opponent": opponent.name,
                    "stats": stats,
                });
                serde_json::to_writer(&mut out, &line).context("failed to write team stats")?;
                std::io::Write::write_all(&mut out, b"\n")?;
            }
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Argument parsing
// ---------------------------------------------------------------------------

struct Args {
    weights: PathBuf,
    players: Option<PathBuf>,
    teams: Option<PathBuf>,
}

fn parse_args() -> anyhow::Result<Args> {
    let mut args = Args {
        weights: PathBuf::from("weights.toml"),
        players: None,
        teams: None,
    };

    let mut iter = std::env::args().skip(1);
    while let Some(flag) = iter.next() {
        let mut value = |name: &str| {
            iter.next()
                .with_context(|| format!("{name} requires a file path argument"))
        };
        match flag.as_str() {
            "--weights" => args.weights = PathBuf::from(value("--weights")?),
            "--players" => args.players = Some(PathBuf::from(value("--players")?)),
            "--teams" => args.teams = Some(PathBuf::from(value("--teams")?)),
            other => bail!("unknown argument: {other}"),
        }
    }

    Ok(args)
}

// ---------------------------------------------------------------------------
// Tracing
// ---------------------------------------------------------------------------

/// Initialize tracing to stderr so stdout stays a clean JSON stream.
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("boxscore_analytics=info,boxstat=info,warn")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
