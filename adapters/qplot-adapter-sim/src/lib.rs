//! qplot Local Statevector Simulator
//!
//! This crate provides the `qasm_simulator` backend: an exact statevector
//! simulator that produces measurement counts the way a sampling device
//! would.
//!
//! # Features
//!
//! - **All Standard Gates**: every gate of `qplot-ir`
//! - **Measurement Sampling**: circuits whose measurements all come last are
//!   evolved once and sampled; anything else is re-run per shot
//! - **Mid-circuit Measurement and Reset**: collapse on every measure/reset
//! - **Reproducible Runs**: `seed_simulator` fixes the random stream
//!
//! # Performance
//!
//! | Qubits | Memory | Simulation Speed |
//! |--------|--------|------------------|
//! | 10 | ~16 KB | Instant |
//! | 15 | ~512 KB | Fast |
//! | 20 | ~16 MB | Moderate |
//! | 24 | ~256 MB | Slow |
//!
//! # Example
//!
//! ```ignore
//! use qplot_hal::{execute, DEFAULT_SHOTS};
//! use qplot_ir::Circuit;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let registry = qplot_adapter_sim::registry();
//!     let backend = registry.get_backend("qasm_simulator")?;
//!
//!     let circuit = Circuit::bell()?;
//!     let result = execute(&circuit, backend.as_ref(), DEFAULT_SHOTS)
//!         .await?
//!         .result()
//!         .await?;
//!
//!     // Expect ~50% "00" and ~50% "11"
//!     println!("{:?}", result.get_counts().sorted());
//!     Ok(())
//! }
//! ```

mod simulator;
pub mod statevector;

pub use simulator::{BACKEND_NAME, DEFAULT_MAX_QUBITS, SimulationMethod, SimulatorBackend};
pub use statevector::Statevector;

use qplot_hal::BackendRegistry;

/// A registry holding the simulator as `qasm_simulator`, aliased `simulator`.
pub fn registry() -> BackendRegistry {
    let mut registry = BackendRegistry::new();
    registry.register::<SimulatorBackend>(BACKEND_NAME);
    registry.alias("simulator", BACKEND_NAME);
    registry
}

#[cfg(test)]
mod tests {
    use qplot_hal::Backend;

    use super::*;

    #[test]
    fn test_registry_lists_simulator() {
        let registry = registry();
        assert_eq!(
            registry.available_backends(),
            vec!["qasm_simulator", "simulator"]
        );

        let backend = registry.get_backend("simulator").unwrap();
        assert_eq!(backend.name(), "qasm_simulator");
    }
}
