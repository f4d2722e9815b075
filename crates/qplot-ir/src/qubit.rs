//! Qubit, classical bit and register types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Index of a qubit within a circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QubitId(pub u32);

impl QubitId {
    /// The id as a `usize` index.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for QubitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

impl From<u32> for QubitId {
    fn from(id: u32) -> Self {
        QubitId(id)
    }
}

/// Index of a classical bit within a circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClbitId(pub u32);

impl ClbitId {
    /// The id as a `usize` index.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ClbitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c{}", self.0)
    }
}

impl From<u32> for ClbitId {
    fn from(id: u32) -> Self {
        ClbitId(id)
    }
}

/// A quantum bit with its register membership.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Qubit {
    /// The circuit-wide identifier.
    pub id: QubitId,
    /// The register this qubit belongs to.
    pub register: String,
    /// The index within the register.
    pub index: u32,
}

impl Qubit {
    /// Create a qubit belonging to `register` at position `index`.
    pub fn new(id: QubitId, register: impl Into<String>, index: u32) -> Self {
        Self {
            id,
            register: register.into(),
            index,
        }
    }
}

impl fmt::Display for Qubit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.register, self.index)
    }
}

/// A classical bit with its register membership.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Clbit {
    /// The circuit-wide identifier.
    pub id: ClbitId,
    /// The register this bit belongs to.
    pub register: String,
    /// The index within the register.
    pub index: u32,
}

impl Clbit {
    /// Create a classical bit belonging to `register` at position `index`.
    pub fn new(id: ClbitId, register: impl Into<String>, index: u32) -> Self {
        Self {
            id,
            register: register.into(),
            index,
        }
    }
}

impl fmt::Display for Clbit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.register, self.index)
    }
}

/// A named, contiguous group of classical bits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassicalRegister {
    /// Register name.
    pub name: String,
    /// Bits in the register, lowest index first.
    pub bits: Vec<ClbitId>,
}

impl ClassicalRegister {
    /// Number of bits in the register.
    pub fn size(&self) -> usize {
        self.bits.len()
    }
}

/// A named, contiguous group of qubits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantumRegister {
    /// Register name.
    pub name: String,
    /// Qubits in the register, lowest index first.
    pub qubits: Vec<QubitId>,
}

impl QuantumRegister {
    /// Number of qubits in the register.
    pub fn size(&self) -> usize {
        self.qubits.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qubit_display() {
        let q = Qubit::new(QubitId(1), "q", 1);
        assert_eq!(format!("{q}"), "q[1]");
        assert_eq!(format!("{}", q.id), "q1");
    }

    #[test]
    fn test_clbit_display() {
        let c = Clbit::new(ClbitId(3), "meas", 0);
        assert_eq!(format!("{c}"), "meas[0]");
        assert_eq!(format!("{}", c.id), "c3");
    }

    #[test]
    fn test_ids_serialize_as_plain_numbers() {
        let json = serde_json::to_string(&(QubitId(2), ClbitId(5))).unwrap();
        assert_eq!(json, "[2,5]");
    }
}
