//! Bell-state histogram demo.
//!
//! Builds the Bell circuit, runs it on the local simulator and plots the
//! counts. Only `00` and `11` should show up, each about half the time.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use qplot_demos::{
    print_header, print_info, print_result, print_section, print_success, print_warning,
    run_bell_example,
};

#[derive(Parser, Debug)]
#[command(name = "bell-histogram")]
#[command(about = "Run a Bell circuit on qasm_simulator and plot the counts")]
struct Args {
    /// Number of shots
    #[arg(short, long, default_value = "1024")]
    shots: u32,

    /// Simulator seed for reproducible counts
    #[arg(long)]
    seed: Option<u64>,

    /// Also write the histogram as SVG to this path
    #[arg(long)]
    svg: Option<String>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .init();

    let args = Args::parse();

    print_header("Bell State Histogram");

    let run = match run_bell_example(args.shots, args.seed).await {
        Ok(run) => run,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    print_section("Circuit");
    print_result("Qubits", run.circuit.num_qubits());
    print_result("Classical bits", run.circuit.num_clbits());
    print_result("Depth", run.circuit.depth());
    println!();
    print!("{}", run.circuit);

    print_section("Counts");
    print_result("Backend", run.result.backend.as_deref().unwrap_or("unknown"));
    print_result("Shots", run.result.shots);
    for (bitstring, count) in run.result.counts.sorted() {
        print_result(bitstring, count);
    }

    let histogram = match run.histogram() {
        Ok(histogram) => histogram,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    print_section("Histogram");
    print!("{}", histogram.render_text(true));

    if let Some(path) = &args.svg {
        if let Err(e) = histogram.save(path) {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
        print_info(&format!("SVG written to {path}"));
    }

    println!();
    let stray = run.uncorrelated_outcomes();
    if stray.is_empty() {
        print_success("Only the correlated outcomes 00 and 11 appear.");
    } else {
        print_warning(&format!("Uncorrelated outcomes seen: {}", stray.join(", ")));
    }
}
