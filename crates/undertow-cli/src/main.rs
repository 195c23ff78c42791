//! Headless Undertow session runner.
//!
//! Loads a session config, replays a scripted command timeline against a
//! fixed-rate clock, and writes one JSON snapshot per line to stdout. Logs
//! go to stderr.

mod script;

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde::de::DeserializeOwned;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use undertow_core::{SessionConfig, Simulation};

use crate::script::{Script, Timeline};

#[derive(Parser, Debug)]
#[command(name = "undertow", version, about = "Run an Undertow session without a display")]
struct Arguments {
    /// Session config as JSON; defaults to the reference two-vessel session
    #[arg(long)]
    config: Option<PathBuf>,

    /// Command timeline as JSON
    #[arg(long)]
    script: Option<PathBuf>,

    /// Number of ticks to run
    #[arg(long, default_value_t = 600)]
    ticks: u64,

    /// Clock rate in ticks per second
    #[arg(long, default_value_t = 60)]
    rate: u32,

    /// Print a snapshot every N ticks
    #[arg(long, default_value_t = 1)]
    every: u64,
}

#[derive(Debug, Default, PartialEq, Eq)]
struct Summary {
    ticks: u64,
    snapshots: u64,
    launched: usize,
    rejected: usize,
    expired: usize,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("undertow=info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Arguments::parse();

    let config = match &args.config {
        Some(path) => load_json(path)?,
        None => SessionConfig::reference(),
    };
    let mut sim = Simulation::from_config(&config).context("invalid session config")?;

    let timeline = match &args.script {
        Some(path) => {
            let script: Script = load_json(path)?;
            script
                .resolve(&sim)
                .with_context(|| format!("invalid script {}", path.display()))?
        }
        None => Timeline::default(),
    };
    if let Some(last) = timeline.last_tick() {
        if last >= args.ticks {
            warn!(last, ticks = args.ticks, "script runs past the end of the session");
        }
    }

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let summary = run(&mut sim, &timeline, &args, &mut out)?;
    out.flush().context("flushing stdout")?;

    info!(
        ticks = summary.ticks,
        snapshots = summary.snapshots,
        launched = summary.launched,
        rejected = summary.rejected,
        expired = summary.expired,
        torpedoes = sim.arena().torpedo_ids().len(),
        "session finished"
    );
    Ok(())
}

/// Steps the session and writes snapshots as JSON lines.
fn run<W: Write>(
    sim: &mut Simulation,
    timeline: &Timeline,
    args: &Arguments,
    out: &mut W,
) -> Result<Summary> {
    if args.rate == 0 {
        bail!("--rate must be at least 1");
    }
    if args.every == 0 {
        bail!("--every must be at least 1");
    }

    let mut summary = Summary::default();
    for tick in 0..args.ticks {
        let now_ms = tick * 1000 / u64::from(args.rate);
        let report = sim.step(now_ms, &timeline.input_for(tick));
        summary.ticks += 1;
        summary.launched += report.launched.len();
        summary.rejected += report.rejected.len();
        summary.expired += report.expired.len();

        if (tick + 1) % args.every == 0 {
            serde_json::to_writer(&mut *out, &sim.snapshot()).context("writing snapshot")?;
            writeln!(out).context("writing snapshot")?;
            summary.snapshots += 1;
        }
    }
    Ok(summary)
}

fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}
