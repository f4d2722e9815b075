//! Run command implementation.

use std::time::Duration;

use anyhow::{Context, Result};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use qplot_hal::{BackendConfig, execute as execute_job};
use qplot_viz::{HistogramOptions, plot_histogram};

use super::common::{builtin_circuit, load_circuit, print_results};
use crate::OutputFormat;

/// Where the circuit comes from.
#[derive(Debug, Clone, Copy)]
pub enum CircuitSource<'a> {
    /// A JSON circuit file.
    File(&'a str),
    /// A built-in circuit spec such as `bell` or `ghz:3`.
    Builtin(&'a str),
}

/// Execute the run command.
pub async fn execute(
    source: CircuitSource<'_>,
    shots: u32,
    backend: &str,
    seed: Option<u64>,
    format: OutputFormat,
    output: Option<&str>,
    options: &HistogramOptions,
) -> Result<()> {
    let (label, circuit) = match source {
        CircuitSource::File(path) => (path, load_circuit(path)?),
        CircuitSource::Builtin(spec) => (spec, builtin_circuit(spec)?),
    };

    if format != OutputFormat::Json {
        println!(
            "{} Running {} on {} ({} shots)",
            style("→").cyan().bold(),
            style(label).green(),
            style(backend).yellow(),
            shots
        );
        println!(
            "  Loaded: {} qubits, depth {}",
            circuit.num_qubits(),
            circuit.depth()
        );
    }

    let registry = qplot_adapter_sim::registry();
    let mut config = BackendConfig::new(backend);
    if let Some(seed) = seed {
        config = config.with_extra("seed_simulator", serde_json::json!(seed));
    }
    let backend_impl = registry.create(backend, config)?;

    let avail = backend_impl.availability().await?;
    if !avail.is_available {
        anyhow::bail!("Backend '{backend}' is not available");
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")?);
    spinner.set_message("Submitting job...");
    spinner.enable_steady_tick(Duration::from_millis(100));

    let job = execute_job(&circuit, backend_impl.as_ref(), shots).await?;
    spinner.set_message(format!("Running job {}...", job.id()));
    info!("Job {} submitted to {}", job.id(), backend_impl.name());

    let result = job.result().await?;
    spinner.finish_and_clear();

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&result)?;
            match output {
                Some(path) => {
                    std::fs::write(path, json)
                        .with_context(|| format!("Failed to write result to {path}"))?;
                    eprintln!("{} Result saved to {}", style("✓").green().bold(), path);
                }
                None => println!("{json}"),
            }
        }
        OutputFormat::Table => {
            print_results(&result);
            if let Some(path) = output {
                plot_histogram(&result.counts, options)?.save(path)?;
                println!("\n  Histogram saved to {}", style(path).green());
            }
        }
        OutputFormat::Histogram => {
            let histogram = plot_histogram(&result.counts, options)?;
            println!();
            print!("{}", histogram.render_text(true));
            if let Some(time_ms) = result.execution_time_ms {
                println!("\n  Execution time: {} ms", style(time_ms).yellow());
            }
            if let Some(path) = output {
                histogram.save(path)?;
                println!("  Histogram saved to {}", style(path).green());
            }
        }
    }

    Ok(())
}
