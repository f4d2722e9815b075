//! Shared helpers for CLI commands.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use console::style;

use qplot_hal::{Counts, ExecutionResult};
use qplot_ir::Circuit;

/// Load a circuit from a JSON file.
pub fn load_circuit(path: &str) -> Result<Circuit> {
    let path_obj = Path::new(path);

    if !path_obj.exists() {
        anyhow::bail!("File not found: {path}");
    }

    let ext = path_obj.extension().and_then(|e| e.to_str()).unwrap_or("");
    if !ext.eq_ignore_ascii_case("json") {
        anyhow::bail!("Unsupported circuit format '.{ext}': only JSON circuits can be loaded");
    }

    let source =
        fs::read_to_string(path).with_context(|| format!("Failed to read file: {path}"))?;
    Circuit::from_json(&source).with_context(|| format!("Invalid circuit in {path}"))
}

/// Build a named circuit: `bell` or `ghz:N`.
pub fn builtin_circuit(spec: &str) -> Result<Circuit> {
    let spec = spec.trim().to_lowercase();
    match spec.split_once(':') {
        None if spec == "bell" => Ok(Circuit::bell()?),
        Some(("ghz", n)) => {
            let n: u32 = n
                .parse()
                .with_context(|| format!("Invalid GHZ size '{n}'"))?;
            if n == 0 {
                anyhow::bail!("GHZ circuit needs at least one qubit");
            }
            Ok(Circuit::ghz(n)?)
        }
        _ => anyhow::bail!("Unknown circuit: '{spec}'. Available: bell, ghz:N"),
    }
}

/// Load counts from a saved result, or from a plain `{"bitstring": count}` map.
pub fn load_counts(path: &str) -> Result<Counts> {
    let source =
        fs::read_to_string(path).with_context(|| format!("Failed to read file: {path}"))?;

    if let Ok(result) = serde_json::from_str::<ExecutionResult>(&source) {
        return Ok(result.counts);
    }
    serde_json::from_str::<Counts>(&source)
        .with_context(|| format!("{path} holds neither a result nor a counts map"))
}

/// Print execution results in a table format.
#[allow(clippy::cast_precision_loss)]
pub fn print_results(result: &ExecutionResult) {
    println!(
        "\n{} Results ({} shots):",
        style("✓").green().bold(),
        result.shots
    );

    let sorted = result.counts.sorted();
    let total = result.counts.total_shots() as f64;

    for (bitstring, count) in sorted.iter().take(16) {
        let prob = **count as f64 / total * 100.0;
        println!(
            "  {}: {:>6} ({:>5.2}%)",
            style(bitstring).cyan(),
            count,
            prob
        );
    }

    if sorted.len() > 16 {
        println!("  ... and {} more outcomes", sorted.len() - 16);
    }

    if let Some(time_ms) = result.execution_time_ms {
        println!("\n  Execution time: {} ms", style(time_ms).yellow());
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_builtin_circuits() {
        let bell = builtin_circuit("bell").unwrap();
        assert_eq!(bell.num_qubits(), 2);

        let ghz = builtin_circuit("GHZ:4").unwrap();
        assert_eq!(ghz.num_qubits(), 4);

        assert!(builtin_circuit("ghz:0").is_err());
        assert!(builtin_circuit("ghz:x").is_err());
        assert!(builtin_circuit("qft").is_err());
    }

    #[test]
    fn test_load_nonexistent_file() {
        let err = load_circuit("/nonexistent/circuit.json").unwrap_err();
        assert!(err.to_string().contains("File not found"));
    }

    #[test]
    fn test_load_circuit_from_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        let json = Circuit::bell().unwrap().to_json().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let path = file.path().to_str().unwrap();
        let circuit = load_circuit(path).unwrap();
        assert_eq!(circuit.num_qubits(), 2);
        assert!(circuit.has_measurements());
    }

    #[test]
    fn test_non_json_circuit_rejected() {
        let file = tempfile::Builder::new().suffix(".qasm").tempfile().unwrap();
        let path = file.path().to_str().unwrap();
        let err = load_circuit(path).unwrap_err();
        assert!(err.to_string().contains("only JSON"));
    }

    #[test]
    fn test_load_counts_both_shapes() {
        let mut plain = tempfile::NamedTempFile::new().unwrap();
        plain.write_all(br#"{"00": 3, "11": 5}"#).unwrap();
        let counts = load_counts(plain.path().to_str().unwrap()).unwrap();
        assert_eq!(counts.total_shots(), 8);

        let mut saved = tempfile::NamedTempFile::new().unwrap();
        let result = ExecutionResult::new(Counts::from_pairs([("1", 4)]), 4);
        saved
            .write_all(serde_json::to_string(&result).unwrap().as_bytes())
            .unwrap();
        let counts = load_counts(saved.path().to_str().unwrap()).unwrap();
        assert_eq!(counts.get("1"), 4);
    }
}
