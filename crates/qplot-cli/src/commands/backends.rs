//! Backends command implementation.

use anyhow::Result;
use console::style;

/// Execute the backends command.
pub async fn execute() -> Result<()> {
    println!("{} Available backends:\n", style("qplot").cyan().bold());

    let registry = qplot_adapter_sim::registry();
    for name in registry.available_backends() {
        let backend = registry.get_backend(&name)?;

        if backend.name() != name {
            println!(
                "  {} {} (alias of {})",
                style("→").dim(),
                style(&name).bold(),
                backend.name()
            );
            println!();
            continue;
        }

        let caps = backend.capabilities();
        let available = backend.availability().await?.is_available;
        println!(
            "  {} {} {}",
            if available {
                style("●").green()
            } else {
                style("○").red()
            },
            style(&name).bold(),
            if caps.is_simulator { "(local)" } else { "" }
        );
        println!("    Qubits: {}", caps.num_qubits);
        println!("    Max shots: {}", caps.max_shots);
        println!("    Gates: {}", caps.gate_set.all().join(", "));
        if !caps.features.is_empty() {
            println!("    Features: {}", caps.features.join(", "));
        }
        println!();
    }

    Ok(())
}
