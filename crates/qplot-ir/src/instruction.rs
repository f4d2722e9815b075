//! One step of a circuit: an operation and the wires it touches.

use serde::{Deserialize, Serialize};

use crate::gate::StandardGate;
use crate::qubit::{ClbitId, QubitId};

/// What an [`Instruction`] does.
///
/// Serialized as `{"gate": ...}` or as the bare strings `"measure"`,
/// `"reset"` and `"barrier"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstructionKind {
    Gate(StandardGate),
    /// Collapses `qubits[i]` and stores the outcome in `clbits[i]`.
    Measure,
    /// Returns the qubit to |0⟩.
    Reset,
    /// No effect on the state; only orders the instructions around it.
    Barrier,
}

/// An operation bound to concrete qubits and, for measurements, clbits.
///
/// Operand indices are checked when the instruction is appended to a
/// circuit, not here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    pub kind: InstructionKind,
    pub qubits: Vec<QubitId>,
    /// Empty unless `kind` is [`InstructionKind::Measure`]; left out of
    /// the JSON when empty.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub clbits: Vec<ClbitId>,
}

impl Instruction {
    fn on_qubits(kind: InstructionKind, qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self {
            kind,
            qubits: qubits.into_iter().collect(),
            clbits: Vec::new(),
        }
    }

    /// `gate` applied to `qubits`, controls first.
    pub fn gate(gate: StandardGate, qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self::on_qubits(InstructionKind::Gate(gate), qubits)
    }

    /// Measure `qubit` into `clbit`.
    pub fn measure(qubit: QubitId, clbit: ClbitId) -> Self {
        Self {
            kind: InstructionKind::Measure,
            qubits: vec![qubit],
            clbits: vec![clbit],
        }
    }

    pub fn reset(qubit: QubitId) -> Self {
        Self::on_qubits(InstructionKind::Reset, [qubit])
    }

    pub fn barrier(qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self::on_qubits(InstructionKind::Barrier, qubits)
    }

    pub fn is_measure(&self) -> bool {
        self.kind == InstructionKind::Measure
    }

    pub fn is_reset(&self) -> bool {
        self.kind == InstructionKind::Reset
    }

    pub fn is_barrier(&self) -> bool {
        self.kind == InstructionKind::Barrier
    }

    /// The gate, for gate instructions.
    pub fn as_gate(&self) -> Option<&StandardGate> {
        if let InstructionKind::Gate(gate) = &self.kind {
            Some(gate)
        } else {
            None
        }
    }

    /// Label used by `count_ops` and the text drawing.
    pub fn name(&self) -> &str {
        match &self.kind {
            InstructionKind::Gate(gate) => gate.name(),
            InstructionKind::Measure => "measure",
            InstructionKind::Reset => "reset",
            InstructionKind::Barrier => "barrier",
        }
    }
}
