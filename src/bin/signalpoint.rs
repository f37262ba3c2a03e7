use clap::{Parser, ValueEnum};
use signalpoint::{
    BestPoint, DEFAULT_PARALLEL_THRESHOLD, Emitter, OctreeSearch, ParseError, SearchConfig,
    Universe, load_emitters, load_emitters_from_path,
};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum UniverseArg {
    /// Tight box around every emitter's range.
    Data,
    /// The full 32-bit coordinate cube, widened to reach every emitter.
    I32,
}

/// Find the point in range of the most emitters, nearest to the origin.
#[derive(Debug, Parser)]
#[command(name = "signalpoint", version)]
struct Args {
    /// File with one `pos=<X,Y,Z>, r=R` record per line, or `-` for stdin.
    input: PathBuf,

    /// Starting region of the search.
    #[arg(long, value_enum, default_value_t = UniverseArg::Data)]
    universe: UniverseArg,

    /// Emitter count from which octant bounds are computed in parallel.
    #[arg(long, default_value_t = DEFAULT_PARALLEL_THRESHOLD)]
    parallel_threshold: usize,

    /// Worker threads for parallel bound computation (default: all cores).
    #[arg(long)]
    threads: Option<usize>,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn read_input(input: &Path) -> Result<Vec<Emitter>, ParseError> {
    if input.as_os_str() == "-" {
        load_emitters(io::stdin().lock())
    } else {
        load_emitters_from_path(input)
    }
}

fn report<W: Write>(out: &mut W, best: Option<&BestPoint>) -> io::Result<()> {
    match best {
        Some(best) => writeln!(out, "Best point distance: {}", best.distance()),
        None => writeln!(out, "No point in range of any emitter; no best point"),
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Some(threads) = args.threads {
        if let Err(err) = rayon::ThreadPoolBuilder::new().num_threads(threads).build_global() {
            error!(%err, "failed to configure thread pool");
            return ExitCode::FAILURE;
        }
    }

    let emitters = match read_input(&args.input) {
        Ok(emitters) => emitters,
        Err(err) => {
            eprintln!("error: {}", err);
            return ExitCode::FAILURE;
        }
    };
    info!(count = emitters.len(), input = %args.input.display(), "loaded emitters");

    let config = SearchConfig {
        universe: match args.universe {
            UniverseArg::Data => Universe::FromEmitters,
            UniverseArg::I32 => Universe::Full32,
        },
        parallel_threshold: args.parallel_threshold,
    };
    let outcome = OctreeSearch::with_config(&emitters, config).run();
    if let Some(best) = &outcome.best {
        info!(point = ?best.point, count = best.count, "best point found");
    }
    info!(stats = ?outcome.stats, "search statistics");

    let mut stdout = io::stdout().lock();
    if let Err(err) = report(&mut stdout, outcome.best.as_ref()) {
        error!(%err, "failed to write result");
        return ExitCode::FAILURE;
    }

    if outcome.best.is_some() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(2)
    }
}
