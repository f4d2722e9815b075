//! qplot demos
//!
//! The Bell-state walkthrough: build a two-qubit circuit, run it on the
//! local `qasm_simulator` and plot the counts.
//!
//! ```ignore
//! let run = qplot_demos::run_bell_example(1024, Some(7)).await?;
//! println!("{}", run.histogram()?.render_text(true));
//! ```

use console::style;
use tracing::info;

use qplot_hal::{ExecutionResult, HalResult, execute};
use qplot_ir::{Circuit, ClbitId, QubitId};
use qplot_viz::{Histogram, HistogramOptions, VizResult, plot_histogram};

/// Build the Bell circuit: H on qubit 0, CX 0 → 1, then measure both
/// qubits into the matching classical bits.
pub fn bell_circuit() -> HalResult<Circuit> {
    let mut circuit = Circuit::with_size("bell", 2, 2);
    circuit
        .h(QubitId(0))?
        .cx(QubitId(0), QubitId(1))?
        .measure_many([QubitId(0), QubitId(1)], [ClbitId(0), ClbitId(1)])?;
    Ok(circuit)
}

/// A finished Bell run.
#[derive(Debug, Clone)]
pub struct BellRun {
    /// The circuit that was executed.
    pub circuit: Circuit,
    /// What the simulator returned.
    pub result: ExecutionResult,
}

impl BellRun {
    /// Histogram of the counts with default options and a title.
    pub fn histogram(&self) -> VizResult<Histogram> {
        let options = HistogramOptions::new().with_title("Bell state");
        plot_histogram(&self.result.counts, &options)
    }

    /// Outcomes other than `00` and `11`, sorted.
    ///
    /// An ideal simulator never produces any; noise or a broken circuit would.
    pub fn uncorrelated_outcomes(&self) -> Vec<&str> {
        self.result
            .counts
            .keys_sorted()
            .into_iter()
            .map(String::as_str)
            .filter(|bitstring| !matches!(*bitstring, "00" | "11"))
            .collect()
    }
}

/// Run the Bell circuit on `qasm_simulator` for `shots` shots.
///
/// A seed makes the counts reproducible.
pub async fn run_bell_example(shots: u32, seed: Option<u64>) -> HalResult<BellRun> {
    let circuit = bell_circuit()?;

    let registry = qplot_adapter_sim::registry();
    let mut config = qplot_hal::BackendConfig::new(qplot_adapter_sim::BACKEND_NAME);
    if let Some(seed) = seed {
        config = config.with_extra("seed_simulator", serde_json::json!(seed));
    }
    let backend = registry.create(qplot_adapter_sim::BACKEND_NAME, config)?;

    let job = execute(&circuit, backend.as_ref(), shots).await?;
    info!("Bell job {} submitted", job.id());
    let result = job.result().await?;

    Ok(BellRun { circuit, result })
}

/// Print a demo header.
pub fn print_header(title: &str) {
    println!();
    println!("{}", style("═".repeat(60)).cyan());
    println!("{}", style(format!("  {title}")).cyan().bold());
    println!("{}", style("═".repeat(60)).cyan());
    println!();
}

/// Print a demo section.
pub fn print_section(title: &str) {
    println!();
    println!("{}", style(format!("▶ {title}")).green().bold());
    println!("{}", style("─".repeat(40)).dim());
}

/// Print a result line.
pub fn print_result(label: &str, value: impl std::fmt::Display) {
    println!("  {} {}", style(format!("{label}:")).dim(), value);
}

/// Print a success message.
pub fn print_success(message: &str) {
    println!("{} {}", style("✓").green().bold(), message);
}

/// Print an info message.
pub fn print_info(message: &str) {
    println!("{} {}", style("ℹ").blue(), message);
}

/// Print a warning message.
pub fn print_warning(message: &str) {
    println!("{} {}", style("!").yellow().bold(), message);
}
