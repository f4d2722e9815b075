//! Plot command implementation.

use anyhow::Result;
use console::style;

use qplot_viz::{HistogramOptions, plot_histogram};

use super::common::load_counts;

/// Execute the plot command.
pub fn execute(input: &str, output: Option<&str>, options: &HistogramOptions) -> Result<()> {
    let counts = load_counts(input)?;
    let histogram = plot_histogram(&counts, options)?;

    print!("{}", histogram.render_text(true));

    if let Some(path) = output {
        histogram.save(path)?;
        println!("\n{} Histogram saved to {}", style("✓").green().bold(), path);
    }

    Ok(())
}
