//! End-to-end tests: registry lookup, execute, result.

use qplot_adapter_sim::registry;
use qplot_hal::{BackendConfig, DEFAULT_SHOTS, HalError, execute};
use qplot_ir::{Circuit, QubitId};

#[tokio::test]
async fn bell_counts_only_correlated_outcomes() {
    let registry = registry();
    let backend = registry.get_backend("qasm_simulator").unwrap();

    let circuit = Circuit::bell().unwrap();
    let job = execute(&circuit, backend.as_ref(), DEFAULT_SHOTS).await.unwrap();
    let result = job.result().await.unwrap();
    let counts = result.get_counts();

    assert_eq!(counts.keys_sorted(), vec!["00", "11"]);
    assert_eq!(counts.total_shots(), u64::from(DEFAULT_SHOTS));
    // Binomial(1024, 0.5) has sigma 16; 200 is far outside any plausible run.
    for key in ["00", "11"] {
        let n = counts.get(key);
        assert!((312..=712).contains(&n), "{key}: {n}");
    }
}

#[tokio::test]
async fn seeded_backend_from_config_is_reproducible() {
    let registry = registry();
    let config =
        BackendConfig::new("qasm_simulator").with_extra("seed_simulator", serde_json::json!(7));
    let backend = registry.create("qasm_simulator", config).unwrap();

    let circuit = Circuit::ghz(5).unwrap();
    let first = execute(&circuit, backend.as_ref(), 300).await.unwrap().result().await.unwrap();
    let second = execute(&circuit, backend.as_ref(), 300).await.unwrap().result().await.unwrap();

    assert_eq!(first.counts, second.counts);
    assert_eq!(first.counts.get("00000") + first.counts.get("11111"), 300);
}

#[tokio::test]
async fn execute_rejects_circuit_without_measurements() {
    let registry = registry();
    let backend = registry.get_backend("simulator").unwrap();

    let mut circuit = Circuit::with_size("bare", 2, 2);
    circuit.h(QubitId(0)).unwrap();

    match execute(&circuit, backend.as_ref(), 10).await {
        Err(HalError::InvalidCircuit(msg)) => assert!(msg.contains("no measurements")),
        other => panic!("expected InvalidCircuit, got {other:?}"),
    }
}

#[tokio::test]
async fn execute_rejects_too_many_shots() {
    let registry = registry();
    let backend = registry.get_backend("qasm_simulator").unwrap();
    let circuit = Circuit::bell().unwrap();

    assert!(matches!(
        execute(&circuit, backend.as_ref(), 1_000_001).await,
        Err(HalError::InvalidShots(_))
    ));
}

#[tokio::test]
async fn measure_all_uses_meas_register() {
    let registry = registry();
    let backend = registry.get_backend("qasm_simulator").unwrap();

    let mut circuit = Circuit::with_size("meas_all", 3, 0);
    circuit.x(QubitId(2)).unwrap();
    circuit.measure_all().unwrap();

    let result = execute(&circuit, backend.as_ref(), 16)
        .await
        .unwrap()
        .result()
        .await
        .unwrap();
    assert_eq!(result.counts.get("100"), 16);
}

#[test]
fn unknown_backend_is_reported() {
    let registry = registry();
    match registry.get_backend("aer_simulator") {
        Err(err @ HalError::BackendNotFound { .. }) => {
            assert!(err.to_string().contains("qasm_simulator"));
        }
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("unknown backend resolved"),
    }
}
