//! qplot Command-Line Interface
//!
//! Build or load a circuit, run it on a backend, and plot the counts.
//!
//! ```text
//! $ qplot run --circuit bell --shots 1024
//! → Running bell on qasm_simulator (1024 shots)
//!   Loaded: 2 qubits, depth 3
//!
//!   00 │████████████████████████████████████████ 0.503 (515)
//!   11 │███████████████████████████████████████  0.497 (509)
//! ```

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::{Args, Parser, Subcommand, ValueEnum};
use console::style;
use qplot_viz::{HistogramOptions, SortOrder};
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{backends, plot, run, version};

/// qplot - build quantum circuits, run them, plot the counts
#[derive(Parser)]
#[command(name = "qplot")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a circuit on a backend and plot the counts
    Run {
        /// Circuit file (JSON)
        #[arg(short, long, conflicts_with = "circuit")]
        input: Option<String>,

        /// Built-in circuit (bell, ghz:N)
        #[arg(short, long, default_value = "bell")]
        circuit: String,

        /// Number of shots
        #[arg(short, long, default_value = "1024", env = "QPLOT_SHOTS")]
        shots: u32,

        /// Backend to use
        #[arg(short, long, default_value = "qasm_simulator", env = "QPLOT_BACKEND")]
        backend: String,

        /// Simulator seed for reproducible counts
        #[arg(long)]
        seed: Option<u64>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Histogram)]
        format: OutputFormat,

        /// Output file (.svg or text for histograms, JSON for --format json)
        #[arg(short, long)]
        output: Option<String>,

        #[command(flatten)]
        histogram: HistogramArgs,
    },

    /// Plot counts saved with `run --format json`
    Plot {
        /// Result or counts file (JSON)
        #[arg(short, long)]
        input: String,

        /// Output file (.svg, anything else is text)
        #[arg(short, long)]
        output: Option<String>,

        #[command(flatten)]
        histogram: HistogramArgs,
    },

    /// List available backends
    Backends,

    /// Show version information
    Version,
}

/// How `run` reports its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Histogram of probabilities
    Histogram,
    /// Counts table
    Table,
    /// Full result as JSON
    Json,
}

/// Histogram options shared by `run` and `plot`.
#[derive(Debug, Args)]
pub struct HistogramArgs {
    /// Bar order (asc, desc, hamming, value, value_desc)
    #[arg(long, default_value = "asc")]
    sort: SortOrder,

    /// Reference bitstring for --sort hamming
    #[arg(long)]
    target_string: Option<String>,

    /// Keep the N most frequent outcomes, fold the rest into `rest`
    #[arg(long)]
    number_to_keep: Option<usize>,

    /// Plot title
    #[arg(long)]
    title: Option<String>,

    /// Hide the value next to each bar
    #[arg(long)]
    no_bar_labels: bool,

    /// Width of the longest bar in terminal columns
    #[arg(long, default_value = "40")]
    bar_width: usize,
}

impl HistogramArgs {
    /// Convert to histogram options.
    pub fn to_options(&self) -> HistogramOptions {
        HistogramOptions {
            sort: self.sort,
            target_string: self.target_string.clone(),
            number_to_keep: self.number_to_keep,
            bar_labels: !self.no_bar_labels,
            title: self.title.clone(),
            bar_width: self.bar_width,
            ..HistogramOptions::default()
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    let result = match cli.command {
        Commands::Run {
            input,
            circuit,
            shots,
            backend,
            seed,
            format,
            output,
            histogram,
        } => {
            let source = match &input {
                Some(path) => run::CircuitSource::File(path),
                None => run::CircuitSource::Builtin(&circuit),
            };
            run::execute(
                source,
                shots,
                &backend,
                seed,
                format,
                output.as_deref(),
                &histogram.to_options(),
            )
            .await
        }

        Commands::Plot {
            input,
            output,
            histogram,
        } => plot::execute(&input, output.as_deref(), &histogram.to_options()),

        Commands::Backends => backends::execute().await,

        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_run_defaults() {
        let cli = Cli::try_parse_from(["qplot", "run"]).unwrap();
        match cli.command {
            Commands::Run {
                input,
                circuit,
                backend,
                seed,
                format,
                histogram,
                ..
            } => {
                assert!(input.is_none());
                assert_eq!(circuit, "bell");
                assert_eq!(backend, "qasm_simulator");
                assert!(seed.is_none());
                assert_eq!(format, OutputFormat::Histogram);
                assert_eq!(histogram.sort, SortOrder::Asc);
                assert!(histogram.to_options().bar_labels);
            }
            _ => panic!("Expected Run command"),
        }
    }

    #[test]
    fn test_parse_run_with_all_args() {
        let cli = Cli::try_parse_from([
            "qplot",
            "-vv",
            "run",
            "--circuit",
            "ghz:3",
            "-s",
            "2048",
            "-b",
            "simulator",
            "--seed",
            "7",
            "-f",
            "json",
            "-o",
            "out.json",
            "--sort",
            "value_desc",
            "--number-to-keep",
            "4",
            "--no-bar-labels",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Run {
                circuit,
                shots,
                backend,
                seed,
                format,
                output,
                histogram,
                ..
            } => {
                assert_eq!(circuit, "ghz:3");
                assert_eq!(shots, 2048);
                assert_eq!(backend, "simulator");
                assert_eq!(seed, Some(7));
                assert_eq!(format, OutputFormat::Json);
                assert_eq!(output.as_deref(), Some("out.json"));

                let options = histogram.to_options();
                assert_eq!(options.sort, SortOrder::ValueDesc);
                assert_eq!(options.number_to_keep, Some(4));
                assert!(!options.bar_labels);
            }
            _ => panic!("Expected Run command"),
        }
    }

    #[test]
    fn test_input_conflicts_with_circuit() {
        assert!(
            Cli::try_parse_from(["qplot", "run", "-i", "c.json", "--circuit", "ghz:2"]).is_err()
        );
        assert!(Cli::try_parse_from(["qplot", "run", "-i", "c.json"]).is_ok());
    }

    #[test]
    fn test_rejects_unknown_sort() {
        assert!(Cli::try_parse_from(["qplot", "run", "--sort", "random"]).is_err());
    }

    #[test]
    fn test_parse_plot_requires_input() {
        assert!(Cli::try_parse_from(["qplot", "plot"]).is_err());

        let cli = Cli::try_parse_from([
            "qplot",
            "plot",
            "-i",
            "r.json",
            "--sort",
            "hamming",
            "--target-string",
            "11",
        ])
        .unwrap();
        match cli.command {
            Commands::Plot { input, histogram, .. } => {
                assert_eq!(input, "r.json");
                assert_eq!(histogram.target_string.as_deref(), Some("11"));
            }
            _ => panic!("Expected Plot command"),
        }
    }

    #[test]
    fn test_parse_simple_commands() {
        assert!(matches!(
            Cli::try_parse_from(["qplot", "backends"]).unwrap().command,
            Commands::Backends
        ));
        assert!(matches!(
            Cli::try_parse_from(["qplot", "version"]).unwrap().command,
            Commands::Version
        ));
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
