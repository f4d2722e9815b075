//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - build quantum circuits, run them, plot the counts",
        style("qplot").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  qplot-ir           Circuit representation and builder");
    println!("  qplot-hal          Backends, jobs, counts and the registry");
    println!("  qplot-adapter-sim  Local statevector simulator (qasm_simulator)");
    println!("  qplot-viz          Histograms as text or SVG");
    println!("  qplot-cli          Command-line interface");
    println!();
    println!("License:    {}", style("Apache-2.0").dim());
}
