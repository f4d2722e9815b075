//! Property tests for circuit construction.

use proptest::prelude::*;
use qplot_ir::{Circuit, ClbitId, IrError, QubitId};

proptest! {
    /// Appending only succeeds for in-range operands, and a rejected call
    /// leaves the circuit untouched.
    #[test]
    fn cx_accepts_exactly_valid_pairs(n in 1u32..8, a in 0u32..10, b in 0u32..10) {
        let mut circuit = Circuit::with_size("prop", n, 0);
        let result = circuit.cx(QubitId(a), QubitId(b)).map(|_| ());

        let valid = a < n && b < n && a != b;
        prop_assert_eq!(result.is_ok(), valid);
        prop_assert_eq!(circuit.instructions().len(), usize::from(valid));
    }

    #[test]
    fn measure_checks_classical_bits(n in 1u32..6, clbit in 0u32..8) {
        let mut circuit = Circuit::with_size("prop", n, n);
        let result = circuit.measure(QubitId(0), ClbitId(clbit)).map(|_| ());
        if clbit < n {
            prop_assert!(result.is_ok());
        } else {
            let is_clbit_error = matches!(result, Err(IrError::ClbitNotFound { .. }));
            prop_assert!(is_clbit_error);
        }
    }

    /// GHZ depth: one H, a CX chain, one layer of measurements.
    #[test]
    fn ghz_depth_is_linear(n in 1u32..12) {
        let circuit = Circuit::ghz(n).unwrap();
        prop_assert_eq!(circuit.depth(), n as usize + 1);
        prop_assert_eq!(circuit.num_clbits(), n as usize);
    }

    #[test]
    fn json_form_reloads(n in 1u32..6) {
        let circuit = Circuit::ghz(n).unwrap();
        let reloaded = Circuit::from_json(&circuit.to_json().unwrap()).unwrap();
        prop_assert_eq!(reloaded.instructions(), circuit.instructions());
        prop_assert_eq!(reloaded.depth(), circuit.depth());
    }
}
