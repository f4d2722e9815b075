//! The fixed gate set understood by the IR and the simulator.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A gate from the built-in set.
///
/// Angles are plain radians, already bound. On the wire each gate is its
/// lowercase OpenQASM mnemonic; parameterized gates become a one-key map
/// such as `{"rz": 1.5}` or `{"u": [theta, phi, lambda]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StandardGate {
    /// Leaves the qubit untouched.
    #[serde(rename = "id")]
    I,
    /// Bit flip.
    X,
    /// Bit and phase flip.
    Y,
    /// Phase flip.
    Z,
    /// Maps |0⟩ and |1⟩ onto |+⟩ and |−⟩.
    H,
    /// Quarter turn about Z.
    S,
    /// Inverse of [`StandardGate::S`].
    Sdg,
    /// Eighth turn about Z.
    T,
    /// Inverse of [`StandardGate::T`].
    Tdg,
    /// Half of an X flip.
    SX,
    /// Inverse of [`StandardGate::SX`].
    SXdg,
    /// `exp(-iθX/2)`.
    Rx(f64),
    /// `exp(-iθY/2)`.
    Ry(f64),
    /// `exp(-iθZ/2)`.
    Rz(f64),
    /// Adds phase `e^{iλ}` to |1⟩.
    P(f64),
    /// Generic single-qubit rotation, `U(θ, φ, λ)`.
    U(f64, f64, f64),
    /// Flips the target when the control is |1⟩.
    CX,
    /// Controlled Y.
    CY,
    /// Controlled Z; symmetric in its operands.
    CZ,
    /// Controlled Hadamard.
    CH,
    /// Exchanges two qubits.
    Swap,
    /// Controlled [`StandardGate::Rz`].
    CRz(f64),
    /// Controlled [`StandardGate::P`].
    CP(f64),
    /// Toffoli: flips the target when both controls are |1⟩.
    CCX,
    /// Fredkin: swaps the last two qubits when the first is |1⟩.
    CSwap,
}

impl StandardGate {
    /// OpenQASM mnemonic, also used as the key in operation counts.
    #[inline]
    pub fn name(&self) -> &'static str {
        use StandardGate::*;
        match self {
            I => "id",
            X => "x",
            Y => "y",
            Z => "z",
            H => "h",
            S => "s",
            Sdg => "sdg",
            T => "t",
            Tdg => "tdg",
            SX => "sx",
            SXdg => "sxdg",
            Rx(_) => "rx",
            Ry(_) => "ry",
            Rz(_) => "rz",
            P(_) => "p",
            U(..) => "u",
            CX => "cx",
            CY => "cy",
            CZ => "cz",
            CH => "ch",
            Swap => "swap",
            CRz(_) => "crz",
            CP(_) => "cp",
            CCX => "ccx",
            CSwap => "cswap",
        }
    }

    /// How many qubit operands an instruction carrying this gate needs.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        use StandardGate::*;
        match self {
            CCX | CSwap => 3,
            CX | CY | CZ | CH | Swap | CRz(_) | CP(_) => 2,
            _ => 1,
        }
    }

    /// Bound angles in declaration order; empty for fixed gates.
    pub fn params(&self) -> Vec<f64> {
        use StandardGate::*;
        match *self {
            Rx(angle) | Ry(angle) | Rz(angle) | P(angle) | CRz(angle) | CP(angle) => vec![angle],
            U(theta, phi, lambda) => vec![theta, phi, lambda],
            _ => Vec::new(),
        }
    }
}

impl fmt::Display for StandardGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())?;
        let params = self.params();
        if let Some((first, rest)) = params.split_first() {
            write!(f, "({first:.4}")?;
            for angle in rest {
                write!(f, ", {angle:.4}")?;
            }
            f.write_str(")")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_controlled_gates_take_extra_qubits() {
        for gate in [StandardGate::CY, StandardGate::CRz(0.1), StandardGate::CP(0.2)] {
            assert_eq!(gate.num_qubits(), 2, "{gate}");
        }
        assert_eq!(StandardGate::CCX.num_qubits(), 3);
        assert_eq!(StandardGate::U(0.0, 0.0, 0.0).num_qubits(), 1);
    }

    #[test]
    fn test_params_follow_declaration_order() {
        assert!(StandardGate::Swap.params().is_empty());
        assert_eq!(StandardGate::CP(FRAC_PI_2).params(), vec![FRAC_PI_2]);
        assert_eq!(StandardGate::U(1.0, 2.0, 3.0).params(), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_display_rounds_angles() {
        assert_eq!(StandardGate::Tdg.to_string(), "tdg");
        assert_eq!(StandardGate::Ry(FRAC_PI_2).to_string(), "ry(1.5708)");
        assert_eq!(StandardGate::U(0.25, -1.0, 2.0).to_string(), "u(0.2500, -1.0000, 2.0000)");
    }

    #[test]
    fn test_wire_form_uses_mnemonics() {
        let json = serde_json::to_value([StandardGate::I, StandardGate::CSwap]).unwrap();
        assert_eq!(json, serde_json::json!(["id", "cswap"]));

        let u: StandardGate = serde_json::from_str(r#"{"u": [0.5, 0.0, -0.5]}"#).unwrap();
        assert_eq!(u, StandardGate::U(0.5, 0.0, -0.5));

        assert!(serde_json::from_str::<StandardGate>(r#""iswap""#).is_err());
        assert!(serde_json::from_str::<StandardGate>(r#""I""#).is_err());
    }
}
