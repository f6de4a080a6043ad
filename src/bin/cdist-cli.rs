//! cdist command line: distance matrix of two point sets read from JSON

use std::env;
use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use cdist::{DistanceConfig, DistanceEngine, Metric, PointSet};
use serde::Deserialize;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Deserialize)]
struct Input {
    left: Vec<Vec<f64>>,
    right: Vec<Vec<f64>>,
    #[serde(default)]
    metric: Option<String>,
}

#[derive(Debug, Default)]
struct Args {
    input: Option<PathBuf>,
    metric: Option<String>,
    config: Option<PathBuf>,
    verbose: u8,
    help: bool,
    version: bool,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = parse_args(env::args().skip(1))?;

    if args.help {
        print_help();
        return Ok(());
    }
    if args.version {
        println!("cdist v{}", VERSION);
        return Ok(());
    }

    init_logging(args.verbose);

    let input_path = args
        .input
        .ok_or_else(|| anyhow!("missing input file (see --help)"))?;

    let config = match &args.config {
        Some(path) => DistanceConfig::from_json_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => DistanceConfig::default(),
    };

    let raw = std::fs::read_to_string(&input_path)
        .with_context(|| format!("reading {}", input_path.display()))?;
    let input: Input = serde_json::from_str(&raw)
        .with_context(|| format!("parsing {}", input_path.display()))?;

    // Flag beats input file beats config default
    let metric = match args.metric.or(input.metric) {
        Some(name) => name.parse::<Metric>()?,
        None => config.default_metric,
    };

    let left = PointSet::from_rows(&input.left).context("invalid left point set")?;
    let right = PointSet::from_rows(&input.right).context("invalid right point set")?;
    info!(
        metric = %metric,
        left_rows = left.len(),
        right_rows = right.len(),
        dim = left.dim(),
        "input loaded"
    );

    let engine = DistanceEngine::new(config);
    let matrix = engine.compute(&left, &right, metric)?;

    println!("{}", serde_json::to_string(&matrix.to_rows())?);
    Ok(())
}

fn parse_args<I: Iterator<Item = String>>(mut iter: I) -> Result<Args> {
    let mut args = Args::default();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--help" | "-h" => args.help = true,
            "--version" | "-V" => args.version = true,
            "--metric" | "-m" => {
                args.metric = Some(iter.next().ok_or_else(|| anyhow!("--metric needs a value"))?);
            }
            "--config" | "-c" => {
                let path = iter.next().ok_or_else(|| anyhow!("--config needs a value"))?;
                args.config = Some(PathBuf::from(path));
            }
            flag if flag.starts_with("-v") && flag[1..].chars().all(|c| c == 'v') => {
                args.verbose = args.verbose.saturating_add((flag.len() - 1) as u8);
            }
            flag if flag.starts_with('-') => bail!("unknown option {}", flag),
            path => {
                if args.input.is_some() {
                    bail!("unexpected argument {}", path);
                }
                args.input = Some(PathBuf::from(path));
            }
        }
    }
    Ok(args)
}

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn print_help() {
    println!(
        r#"
cdist v{} - pairwise distance matrices

Usage:
  cdist-cli <input.json> [options]

Input file:
  {{ "left": [[1, 2], [3, 4]], "right": [[10, 11], [12, 13]], "metric": "cosine" }}
  "metric" is optional.

Options:
  -m, --metric <NAME>   euclidean | cosine (overrides the input file)
  -c, --config <FILE>   JSON engine config (default_metric, zero_norm, parallel_threshold)
  -v, -vv, -vvv         log to stderr at info / debug / trace
  -V, --version         print version
  -h, --help            print this help

Output:
  The distance matrix as a JSON array of rows on stdout.
"#,
        VERSION
    );
}
