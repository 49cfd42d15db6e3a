use std::io::{self, BufRead, Write};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Context;
use clap::Parser;
use sapper_core::{BoardGenerator, CellCount, Coord, GameConfig, GameSession, RandomBoardGenerator};

mod command;
mod render;

use command::{Command, HELP};
use render::TextView;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Board height in cells
    #[arg(long, default_value_t = GameConfig::default().rows)]
    rows: Coord,

    /// Board width in cells
    #[arg(long, default_value_t = GameConfig::default().cols)]
    cols: Coord,

    /// Number of mines, must leave at least one safe cell
    #[arg(short, long, default_value_t = GameConfig::default().mines)]
    mines: CellCount,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Print every snapshot as a JSON line instead of a text grid
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let config = GameConfig::new(args.rows, args.cols, args.mines)
        .context("Invalid board configuration")?;
    let seed = args.seed.unwrap_or_else(seed_from_clock);
    log::debug!("seed: {seed}");

    let mut session = GameSession::new(config, RandomBoardGenerator::new(seed))?;
    run(&mut session, io::stdin().lock(), io::stdout().lock(), args.json)
}

fn seed_from_clock() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}

/// Feeds each input line to the session and redraws after it, until `quit` or end of input.
fn run<G: BoardGenerator>(
    session: &mut GameSession<G>,
    input: impl BufRead,
    mut output: impl Write,
    json: bool,
) -> anyhow::Result<()> {
    draw(session, &mut output, json)?;

    for line in input.lines() {
        let line = line.context("Could not read input")?;

        match command::parse(&line) {
            Ok(Command::Play(input)) => {
                let outcome = session.apply(input)?;
                log::debug!("{input:?} -> {outcome:?}");
                if outcome.has_update() {
                    draw(session, &mut output, json)?;
                }
            }
            Ok(Command::Ignored) => {}
            Ok(Command::Help) => writeln!(output, "{HELP}")?,
            Ok(Command::Quit) => break,
            Err(err) => writeln!(output, "{err}\n{HELP}")?,
        }
    }

    output.flush()?;
    Ok(())
}

fn draw<G: BoardGenerator>(
    session: &GameSession<G>,
    output: &mut impl Write,
    json: bool,
) -> anyhow::Result<()> {
    let snapshot = session.snapshot();
    if json {
        serde_json::to_writer(&mut *output, &snapshot)?;
        writeln!(output)?;
    } else {
        writeln!(output, "{}", TextView(snapshot))?;
    }
    Ok(())
}
