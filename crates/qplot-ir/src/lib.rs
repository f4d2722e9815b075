//! qplot Circuit Representation
//!
//! This crate provides the data structures for describing quantum circuits:
//! qubits and classical bits grouped into registers, a fixed set of standard
//! gates, and an ordered instruction list with a builder API.
//!
//! # Overview
//!
//! A [`Circuit`] owns its qubits, classical bits and instructions. Each
//! builder call checks its operands immediately, so every circuit that
//! exists references only valid indices.
//!
//! # Example: Building a Bell State
//!
//! ```rust
//! use qplot_ir::{Circuit, QubitId};
//!
//! // 2 qubits in register `q`, 2 classical bits in register `c`
//! let mut circuit = Circuit::with_size("bell_state", 2, 2);
//!
//! // |00⟩ → (|00⟩ + |11⟩)/√2
//! circuit.h(QubitId(0)).unwrap();
//! circuit.cx(QubitId(0), QubitId(1)).unwrap();
//!
//! // qubit i -> classical bit i
//! circuit.measure_many([0u32, 1], [0u32, 1]).unwrap();
//!
//! assert_eq!(circuit.num_qubits(), 2);
//! assert_eq!(circuit.depth(), 3);
//! ```
//!
//! # Supported Gates
//!
//! | Gate | Qubits | Description |
//! |------|--------|-------------|
//! | `H` | 1 | Hadamard gate |
//! | `X`, `Y`, `Z` | 1 | Pauli gates |
//! | `S`, `Sdg`, `T`, `Tdg` | 1 | Phase gates |
//! | `SX`, `SXdg` | 1 | sqrt(X) and its inverse |
//! | `Rx`, `Ry`, `Rz`, `P` | 1 | Rotation and phase gates |
//! | `U` | 1 | Universal single-qubit gate U(θ,φ,λ) |
//! | `CX`, `CY`, `CZ`, `CH` | 2 | Controlled gates |
//! | `Swap` | 2 | SWAP gate |
//! | `CRz`, `CP` | 2 | Controlled rotations |
//! | `CCX`, `CSwap` | 3 | Toffoli and Fredkin gates |

pub mod circuit;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod qubit;

pub use circuit::{Circuit, MAX_WIRES};
pub use error::{IrError, IrResult};
pub use gate::StandardGate;
pub use instruction::{Instruction, InstructionKind};
pub use qubit::{ClassicalRegister, Clbit, ClbitId, QuantumRegister, Qubit, QubitId};
