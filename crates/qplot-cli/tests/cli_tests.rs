//! End-to-end tests for the `qplot` binary.

use std::process::{Command, Output};

fn qplot(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_qplot"))
        .args(args)
        .env_remove("QPLOT_SHOTS")
        .env_remove("QPLOT_BACKEND")
        .output()
        .expect("failed to run qplot")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

// ============================================================================
// run
// ============================================================================

#[test]
fn test_run_bell_json_to_stdout() {
    let output = qplot(&["run", "--seed", "7", "--format", "json"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let result: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(result["shots"], 1024);
    assert_eq!(result["backend"], "qasm_simulator");

    let counts = result["counts"].as_object().unwrap();
    let mut total = 0;
    for (bitstring, count) in counts {
        assert!(bitstring == "00" || bitstring == "11", "got {bitstring}");
        total += count.as_u64().unwrap();
    }
    assert_eq!(total, 1024);
}

#[test]
fn test_run_seed_is_reproducible() {
    let args = ["run", "-c", "ghz:3", "-s", "256", "--seed", "99", "-f", "json"];
    let first: serde_json::Value = serde_json::from_str(&stdout(&qplot(&args))).unwrap();
    let second: serde_json::Value = serde_json::from_str(&stdout(&qplot(&args))).unwrap();
    assert_eq!(first["counts"], second["counts"]);
}

#[test]
fn test_run_histogram_output() {
    let output = qplot(&["run", "-s", "100", "--seed", "1"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let text = stdout(&output);
    assert!(text.contains("Running bell on qasm_simulator (100 shots)"));
    assert!(text.contains("00 │"));
    assert!(text.contains("11 │"));
    assert!(!text.contains("01 │"));
}

#[test]
fn test_run_unknown_backend_fails() {
    let output = qplot(&["run", "-b", "ibmq_lima"]);
    assert_eq!(output.status.code(), Some(1));

    let err = stderr(&output);
    assert!(err.contains("Error:"));
    assert!(err.contains("ibmq_lima"));
    assert!(err.contains("qasm_simulator"));
}

#[test]
fn test_run_rejects_zero_shots() {
    let output = qplot(&["run", "-s", "0"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Invalid shots"));
}

#[test]
fn test_run_circuit_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("x.json");

    let mut circuit = qplot_ir::Circuit::with_size("flip", 1, 1);
    circuit
        .x(qplot_ir::QubitId(0))
        .unwrap()
        .measure(qplot_ir::QubitId(0), qplot_ir::ClbitId(0))
        .unwrap();
    std::fs::write(&path, circuit.to_json().unwrap()).unwrap();

    let output = qplot(&["run", "-i", path.to_str().unwrap(), "-s", "10", "-f", "json"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let result: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(result["counts"]["1"], 10);
}

#[test]
fn test_run_rejects_huge_register_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("huge.json");
    std::fs::write(
        &path,
        r#"{"qregs":[{"name":"a","size":4294967295},{"name":"b","size":2}]}"#,
    )
    .unwrap();

    let output = qplot(&["run", "-i", path.to_str().unwrap(), "-s", "1"]);
    assert_eq!(output.status.code(), Some(1));
    let err = stderr(&output);
    assert!(err.contains("Invalid circuit in"), "stderr: {err}");
    assert!(err.contains("Invalid register"), "stderr: {err}");
}

// ============================================================================
// plot
// ============================================================================

#[test]
fn test_run_then_plot_svg() {
    let dir = tempfile::tempdir().unwrap();
    let result_path = dir.path().join("result.json");
    let svg_path = dir.path().join("bell.svg");

    let run = qplot(&[
        "run",
        "--seed",
        "3",
        "-f",
        "json",
        "-o",
        result_path.to_str().unwrap(),
    ]);
    assert!(run.status.success(), "stderr: {}", stderr(&run));
    assert!(result_path.exists());

    let plot = qplot(&[
        "plot",
        "-i",
        result_path.to_str().unwrap(),
        "-o",
        svg_path.to_str().unwrap(),
        "--title",
        "Bell",
    ]);
    assert!(plot.status.success(), "stderr: {}", stderr(&plot));

    let svg = std::fs::read_to_string(&svg_path).unwrap();
    assert!(svg.starts_with("<svg "));
    assert!(svg.contains(">Bell</text>"));
}

#[test]
fn test_plot_plain_counts_map() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("counts.json");
    std::fs::write(&path, r#"{"00": 3, "11": 1}"#).unwrap();

    let output = qplot(&["plot", "-i", path.to_str().unwrap(), "--sort", "value_desc"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let text = stdout(&output);
    let first = text.find("00 │").unwrap();
    let second = text.find("11 │").unwrap();
    assert!(first < second);
    assert!(text.contains("0.750 (3)"));
}

#[test]
fn test_plot_missing_file() {
    let output = qplot(&["plot", "-i", "/nonexistent/result.json"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Error:"));
}

// ============================================================================
// backends / version
// ============================================================================

#[test]
fn test_backends_lists_simulator() {
    let output = qplot(&["backends"]);
    assert!(output.status.success());

    let text = stdout(&output);
    assert!(text.contains("qasm_simulator"));
    assert!(text.contains("Max shots: 1000000"));
    assert!(text.contains("alias of qasm_simulator"));
}

#[test]
fn test_version() {
    let output = qplot(&["version"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains(env!("CARGO_PKG_VERSION")));
}
