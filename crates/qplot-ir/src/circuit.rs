//! High-level circuit builder API.

use std::collections::BTreeMap;
use std::fmt;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::gate::StandardGate;
use crate::instruction::{Instruction, InstructionKind};
use crate::qubit::{ClassicalRegister, Clbit, ClbitId, QuantumRegister, Qubit, QubitId};

/// Most qubits, and separately most classical bits, a circuit may declare.
pub const MAX_WIRES: usize = 1 << 16;

/// A quantum circuit.
///
/// Instructions are kept in program order. Every instruction is checked
/// against the circuit's qubits and classical bits when it is appended, so a
/// `Circuit` never references an index it does not own.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "CircuitData", into = "CircuitData")]
pub struct Circuit {
    name: String,
    qubits: Vec<Qubit>,
    clbits: Vec<Clbit>,
    qregs: Vec<QuantumRegister>,
    cregs: Vec<ClassicalRegister>,
    instructions: Vec<Instruction>,
}

impl Circuit {
    /// Create a new empty circuit.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            qubits: vec![],
            clbits: vec![],
            qregs: vec![],
            cregs: vec![],
            instructions: vec![],
        }
    }

    /// Create a circuit with a quantum register `q` and a classical register `c`.
    ///
    /// A size of zero skips the corresponding register. Sizes are not
    /// checked against [`MAX_WIRES`]; go through [`Circuit::add_qreg`] and
    /// [`Circuit::add_creg`] for sizes that come from outside the program.
    pub fn with_size(name: impl Into<String>, num_qubits: u32, num_clbits: u32) -> Self {
        let mut circuit = Self::new(name);
        if num_qubits > 0 {
            circuit.push_qreg("q".into(), num_qubits);
        }
        if num_clbits > 0 {
            circuit.push_creg("c".into(), num_clbits);
        }
        circuit
    }

    /// Add a quantum register.
    ///
    /// Fails if the circuit would end up with more than [`MAX_WIRES`] qubits.
    pub fn add_qreg(&mut self, name: impl Into<String>, size: u32) -> IrResult<Vec<QubitId>> {
        let name = name.into();
        self.check_register_name(&name, self.qregs.iter().any(|r| r.name == name))?;
        check_wire_budget(&name, self.qubits.len(), size, "qubits")?;
        Ok(self.push_qreg(name, size))
    }

    /// Add a classical register.
    ///
    /// Fails if the circuit would end up with more than [`MAX_WIRES`] bits.
    pub fn add_creg(&mut self, name: impl Into<String>, size: u32) -> IrResult<Vec<ClbitId>> {
        let name = name.into();
        self.check_register_name(&name, self.cregs.iter().any(|r| r.name == name))?;
        check_wire_budget(&name, self.clbits.len(), size, "classical bits")?;
        Ok(self.push_creg(name, size))
    }

    fn check_register_name(&self, name: &str, taken: bool) -> IrResult<()> {
        if name.is_empty() {
            return Err(IrError::InvalidRegister("register name is empty".into()));
        }
        if taken {
            return Err(IrError::InvalidRegister(format!(
                "register '{name}' already exists in circuit '{}'",
                self.name
            )));
        }
        Ok(())
    }

    fn push_qreg(&mut self, name: String, size: u32) -> Vec<QubitId> {
        let start = self.qubits.len() as u32;
        let ids: Vec<_> = (start..start + size).map(QubitId).collect();
        for (index, id) in ids.iter().enumerate() {
            self.qubits.push(Qubit::new(*id, &name, index as u32));
        }
        self.qregs.push(QuantumRegister {
            name,
            qubits: ids.clone(),
        });
        ids
    }

    fn push_creg(&mut self, name: String, size: u32) -> Vec<ClbitId> {
        let start = self.clbits.len() as u32;
        let ids: Vec<_> = (start..start + size).map(ClbitId).collect();
        for (index, id) in ids.iter().enumerate() {
            self.clbits.push(Clbit::new(*id, &name, index as u32));
        }
        self.cregs.push(ClassicalRegister {
            name,
            bits: ids.clone(),
        });
        ids
    }

    /// Append an instruction after checking its operands.
    pub fn append(&mut self, instruction: Instruction) -> IrResult<&mut Self> {
        self.check(&instruction)?;
        self.instructions.push(instruction);
        Ok(self)
    }

    fn check(&self, inst: &Instruction) -> IrResult<()> {
        let gate_name = inst.as_gate().map(|g| g.name().to_string());

        if let InstructionKind::Gate(gate) = &inst.kind {
            if gate.num_qubits() as usize != inst.qubits.len() {
                return Err(IrError::QubitCountMismatch {
                    gate_name: gate.name().into(),
                    expected: gate.num_qubits(),
                    got: inst.qubits.len() as u32,
                });
            }
        }
        if inst.is_measure() && inst.qubits.len() != inst.clbits.len() {
            return Err(IrError::MeasureArityMismatch {
                qubits: inst.qubits.len(),
                clbits: inst.clbits.len(),
            });
        }
        if inst.is_reset() && inst.qubits.len() != 1 {
            return Err(IrError::QubitCountMismatch {
                gate_name: "reset".into(),
                expected: 1,
                got: inst.qubits.len() as u32,
            });
        }

        let mut seen = FxHashSet::default();
        for &qubit in &inst.qubits {
            if qubit.index() >= self.qubits.len() {
                return Err(IrError::QubitNotFound {
                    qubit,
                    num_qubits: self.qubits.len(),
                    gate_name,
                });
            }
            if !seen.insert(qubit) {
                return Err(IrError::DuplicateQubit { qubit, gate_name });
            }
        }
        for &clbit in &inst.clbits {
            if clbit.index() >= self.clbits.len() {
                return Err(IrError::ClbitNotFound {
                    clbit,
                    num_clbits: self.clbits.len(),
                });
            }
        }
        Ok(())
    }

    fn gate1(&mut self, gate: StandardGate, qubit: QubitId) -> IrResult<&mut Self> {
        self.append(Instruction::gate(gate, [qubit]))
    }

    fn gate2(&mut self, gate: StandardGate, q1: QubitId, q2: QubitId) -> IrResult<&mut Self> {
        self.append(Instruction::gate(gate, [q1, q2]))
    }

    // =========================================================================
    // Single-qubit gates
    // =========================================================================

    /// Apply identity gate.
    pub fn id(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.gate1(StandardGate::I, qubit)
    }

    /// Apply Hadamard gate.
    pub fn h(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.gate1(StandardGate::H, qubit)
    }

    /// Apply Pauli-X gate.
    pub fn x(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.gate1(StandardGate::X, qubit)
    }

    /// Apply Pauli-Y gate.
    pub fn y(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.gate1(StandardGate::Y, qubit)
    }

    /// Apply Pauli-Z gate.
    pub fn z(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.gate1(StandardGate::Z, qubit)
    }

    /// Apply S gate.
    pub fn s(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.gate1(StandardGate::S, qubit)
    }

    /// Apply S-dagger gate.
    pub fn sdg(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.gate1(StandardGate::Sdg, qubit)
    }

    /// Apply T gate.
    pub fn t(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.gate1(StandardGate::T, qubit)
    }

    /// Apply T-dagger gate.
    pub fn tdg(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.gate1(StandardGate::Tdg, qubit)
    }

    /// Apply sqrt(X) gate.
    pub fn sx(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.gate1(StandardGate::SX, qubit)
    }

    /// Apply sqrt(X)-dagger gate.
    pub fn sxdg(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.gate1(StandardGate::SXdg, qubit)
    }

    /// Apply Rx rotation gate.
    pub fn rx(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.gate1(StandardGate::Rx(theta), qubit)
    }

    /// Apply Ry rotation gate.
    pub fn ry(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.gate1(StandardGate::Ry(theta), qubit)
    }

    /// Apply Rz rotation gate.
    pub fn rz(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.gate1(StandardGate::Rz(theta), qubit)
    }

    /// Apply phase gate.
    pub fn p(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.gate1(StandardGate::P(theta), qubit)
    }

    /// Apply universal U gate.
    pub fn u(
        &mut self,
        theta: f64,
        phi: f64,
        lambda: f64,
        qubit: QubitId,
    ) -> IrResult<&mut Self> {
        self.gate1(StandardGate::U(theta, phi, lambda), qubit)
    }

    // =========================================================================
    // Multi-qubit gates
    // =========================================================================

    /// Apply CNOT (CX) gate.
    pub fn cx(
        &mut self,
        control: QubitId,
        target: QubitId,
    ) -> IrResult<&mut Self> {
        self.gate2(StandardGate::CX, control, target)
    }

    /// Apply CY gate.
    pub fn cy(
        &mut self,
        control: QubitId,
        target: QubitId,
    ) -> IrResult<&mut Self> {
        self.gate2(StandardGate::CY, control, target)
    }

    /// Apply CZ gate.
    pub fn cz(
        &mut self,
        control: QubitId,
        target: QubitId,
    ) -> IrResult<&mut Self> {
        self.gate2(StandardGate::CZ, control, target)
    }

    /// Apply controlled-Hadamard gate.
    pub fn ch(
        &mut self,
        control: QubitId,
        target: QubitId,
    ) -> IrResult<&mut Self> {
        self.gate2(StandardGate::CH, control, target)
    }

    /// Apply SWAP gate.
    pub fn swap(&mut self, q1: QubitId, q2: QubitId) -> IrResult<&mut Self> {
        self.gate2(StandardGate::Swap, q1, q2)
    }

    /// Apply controlled-Rz gate.
    pub fn crz(
        &mut self,
        theta: f64,
        control: QubitId,
        target: QubitId,
    ) -> IrResult<&mut Self> {
        self.gate2(StandardGate::CRz(theta), control, target)
    }

    /// Apply controlled-phase gate.
    pub fn cp(
        &mut self,
        theta: f64,
        control: QubitId,
        target: QubitId,
    ) -> IrResult<&mut Self> {
        self.gate2(StandardGate::CP(theta), control, target)
    }

    /// Apply Toffoli (CCX) gate.
    pub fn ccx(
        &mut self,
        c1: QubitId,
        c2: QubitId,
        target: QubitId,
    ) -> IrResult<&mut Self> {
        self.append(Instruction::gate(
            StandardGate::CCX,
            [c1, c2, target],
        ))
    }

    /// Apply Fredkin (CSWAP) gate.
    pub fn cswap(
        &mut self,
        control: QubitId,
        t1: QubitId,
        t2: QubitId,
    ) -> IrResult<&mut Self> {
        self.append(Instruction::gate(
            StandardGate::CSwap,
            [control, t1, t2],
        ))
    }

    /// Apply any standard gate to the given qubits.
    pub fn gate(
        &mut self,
        gate: StandardGate,
        qubits: impl IntoIterator<Item = QubitId>,
    ) -> IrResult<&mut Self> {
        self.append(Instruction::gate(gate, qubits))
    }

    // =========================================================================
    // Non-unitary operations
    // =========================================================================

    /// Measure a qubit into a classical bit.
    pub fn measure(
        &mut self,
        qubit: QubitId,
        clbit: ClbitId,
    ) -> IrResult<&mut Self> {
        self.append(Instruction::measure(qubit, clbit))
    }

    /// Measure `qubits[i]` into `clbits[i]` for every position.
    ///
    /// Both lists must have the same length. Nothing is appended if any
    /// pair is invalid.
    pub fn measure_many<Q, C>(
        &mut self,
        qubits: impl IntoIterator<Item = Q>,
        clbits: impl IntoIterator<Item = C>,
    ) -> IrResult<&mut Self>
    where
        Q: Into<QubitId>,
        C: Into<ClbitId>,
    {
        let qubits: Vec<QubitId> = qubits.into_iter().map(Into::into).collect();
        let clbits: Vec<ClbitId> = clbits.into_iter().map(Into::into).collect();
        if qubits.len() != clbits.len() {
            return Err(IrError::MeasureArityMismatch {
                qubits: qubits.len(),
                clbits: clbits.len(),
            });
        }

        let measures: Vec<_> = qubits
            .into_iter()
            .zip(clbits)
            .map(|(q, c)| Instruction::measure(q, c))
            .collect();
        for inst in &measures {
            self.check(inst)?;
        }
        self.instructions.extend(measures);
        Ok(self)
    }

    /// Measure every qubit into a freshly added `meas` register.
    ///
    /// A barrier across all qubits is placed before the measurements.
    pub fn measure_all(&mut self) -> IrResult<&mut Self> {
        if self.qubits.is_empty() {
            return Ok(self);
        }

        let mut name = String::from("meas");
        let mut suffix = 0;
        while self.cregs.iter().any(|r| r.name == name) {
            suffix += 1;
            name = format!("meas{suffix}");
        }

        let size = self.qubits.len() as u32;
        check_wire_budget(&name, self.clbits.len(), size, "classical bits")?;
        let clbits = self.push_creg(name, size);
        let qubits: Vec<_> = self.qubits.iter().map(|q| q.id).collect();
        self.barrier_all()?;
        self.measure_many(qubits, clbits)
    }

    /// Reset a qubit to |0⟩.
    pub fn reset(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.append(Instruction::reset(qubit))
    }

    /// Apply a barrier to specified qubits.
    pub fn barrier(&mut self, qubits: impl IntoIterator<Item = QubitId>) -> IrResult<&mut Self> {
        self.append(Instruction::barrier(qubits))
    }

    /// Apply a barrier to all qubits.
    pub fn barrier_all(&mut self) -> IrResult<&mut Self> {
        let qubits: Vec<_> = self.qubits.iter().map(|q| q.id).collect();
        self.append(Instruction::barrier(qubits))
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the circuit name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.qubits.len()
    }

    /// Get the number of classical bits.
    pub fn num_clbits(&self) -> usize {
        self.clbits.len()
    }

    /// Get the qubits in the circuit.
    pub fn qubits(&self) -> &[Qubit] {
        &self.qubits
    }

    /// Get the classical bits in the circuit.
    pub fn clbits(&self) -> &[Clbit] {
        &self.clbits
    }

    /// Quantum registers in declaration order.
    pub fn qregs(&self) -> &[QuantumRegister] {
        &self.qregs
    }

    /// Classical registers in declaration order.
    pub fn cregs(&self) -> &[ClassicalRegister] {
        &self.cregs
    }

    /// Instructions in program order.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Whether any instruction writes a classical bit.
    pub fn has_measurements(&self) -> bool {
        self.instructions.iter().any(Instruction::is_measure)
    }

    /// Get the circuit depth.
    ///
    /// Length of the longest chain of operations over qubit and classical
    /// bit wires. Barriers do not count.
    pub fn depth(&self) -> usize {
        let mut qubit_level = vec![0usize; self.qubits.len()];
        let mut clbit_level = vec![0usize; self.clbits.len()];
        let mut depth = 0;

        for inst in self.instructions.iter().filter(|i| !i.is_barrier()) {
            let level = inst
                .qubits
                .iter()
                .map(|q| qubit_level[q.index()])
                .chain(inst.clbits.iter().map(|c| clbit_level[c.index()]))
                .max()
                .unwrap_or(0)
                + 1;
            for q in &inst.qubits {
                qubit_level[q.index()] = level;
            }
            for c in &inst.clbits {
                clbit_level[c.index()] = level;
            }
            depth = depth.max(level);
        }
        depth
    }

    /// Count instructions by name.
    pub fn count_ops(&self) -> BTreeMap<String, usize> {
        let mut ops = BTreeMap::new();
        for inst in &self.instructions {
            *ops.entry(inst.name().to_string()).or_insert(0) += 1;
        }
        ops
    }

    // =========================================================================
    // JSON form
    // =========================================================================

    /// Load a circuit from JSON, re-checking every instruction.
    pub fn from_json(source: &str) -> IrResult<Self> {
        Ok(serde_json::from_str(source)?)
    }

    /// Serialize the circuit to pretty-printed JSON.
    pub fn to_json(&self) -> IrResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    // =========================================================================
    // Pre-built circuits
    // =========================================================================

    /// Create a Bell state circuit.
    pub fn bell() -> IrResult<Self> {
        let mut circuit = Self::with_size("bell", 2, 2);
        circuit
            .h(QubitId(0))?
            .cx(QubitId(0), QubitId(1))?
            .measure_many([0u32, 1], [0u32, 1])?;
        Ok(circuit)
    }

    /// Create a GHZ state circuit.
    pub fn ghz(n: u32) -> IrResult<Self> {
        if n == 0 {
            return Ok(Self::new("ghz_0"));
        }

        let mut circuit = Self::with_size(format!("ghz_{n}"), n, n);
        circuit.h(QubitId(0))?;
        for i in 0..n - 1 {
            circuit.cx(QubitId(i), QubitId(i + 1))?;
        }
        circuit.measure_many(0..n, 0..n)?;
        Ok(circuit)
    }

    fn qubit_label(&self, id: QubitId) -> String {
        self.qubits
            .get(id.index())
            .map_or_else(|| id.to_string(), ToString::to_string)
    }

    fn clbit_label(&self, id: ClbitId) -> String {
        self.clbits
            .get(id.index())
            .map_or_else(|| id.to_string(), ToString::to_string)
    }
}

fn check_wire_budget(register: &str, existing: usize, size: u32, what: &str) -> IrResult<()> {
    let total = usize::try_from(size)
        .ok()
        .and_then(|size| existing.checked_add(size));
    match total {
        Some(total) if total <= MAX_WIRES => Ok(()),
        _ => Err(IrError::InvalidRegister(format!(
            "register '{register}' of size {size} would exceed {MAX_WIRES} {what} \
             ({existing} already declared)"
        ))),
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "circuit {}: {} qubits, {} clbits",
            self.name,
            self.num_qubits(),
            self.num_clbits()
        )?;
        for inst in &self.instructions {
            let qubits: Vec<_> = inst.qubits.iter().map(|q| self.qubit_label(*q)).collect();
            match &inst.kind {
                InstructionKind::Gate(gate) => writeln!(f, "  {gate} {}", qubits.join(", "))?,
                InstructionKind::Measure => {
                    let clbits: Vec<_> = inst.clbits.iter().map(|c| self.clbit_label(*c)).collect();
                    writeln!(f, "  measure {} -> {}", qubits.join(", "), clbits.join(", "))?;
                }
                InstructionKind::Reset | InstructionKind::Barrier => {
                    writeln!(f, "  {} {}", inst.name(), qubits.join(", "))?;
                }
            }
        }
        Ok(())
    }
}

/// Serialized form of a circuit: register sizes plus the instruction list.
#[derive(Serialize, Deserialize)]
struct CircuitData {
    #[serde(default)]
    name: String,
    #[serde(default)]
    qregs: Vec<RegisterSpec>,
    #[serde(default)]
    cregs: Vec<RegisterSpec>,
    #[serde(default)]
    instructions: Vec<Instruction>,
}

#[derive(Serialize, Deserialize)]
struct RegisterSpec {
    name: String,
    size: u32,
}

impl TryFrom<CircuitData> for Circuit {
    type Error = IrError;

    fn try_from(data: CircuitData) -> IrResult<Self> {
        let mut circuit = Circuit::new(data.name);
        for reg in data.qregs {
            circuit.add_qreg(reg.name, reg.size)?;
        }
        for reg in data.cregs {
            circuit.add_creg(reg.name, reg.size)?;
        }
        for inst in data.instructions {
            circuit.append(inst)?;
        }
        Ok(circuit)
    }
}

impl From<Circuit> for CircuitData {
    fn from(circuit: Circuit) -> Self {
        Self {
            name: circuit.name,
            qregs: circuit
                .qregs
                .into_iter()
                .map(|r| RegisterSpec {
                    size: r.qubits.len() as u32,
                    name: r.name,
                })
                .collect(),
            cregs: circuit
                .cregs
                .into_iter()
                .map(|r| RegisterSpec {
                    size: r.bits.len() as u32,
                    name: r.name,
                })
                .collect(),
            instructions: circuit.instructions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_new_circuit() {
        let circuit = Circuit::new("test");
        assert_eq!(circuit.name(), "test");
        assert_eq!(circuit.num_qubits(), 0);
        assert_eq!(circuit.num_clbits(), 0);
        assert!(circuit.cregs().is_empty());
    }

    #[test]
    fn test_circuit_with_size() {
        let circuit = Circuit::with_size("test", 3, 2);
        assert_eq!(circuit.num_qubits(), 3);
        assert_eq!(circuit.num_clbits(), 2);
        assert_eq!(circuit.qregs()[0].name, "q");
        assert_eq!(circuit.cregs()[0].name, "c");
        assert_eq!(circuit.qubits()[2].to_string(), "q[2]");
    }

    #[test]
    fn test_add_registers() {
        let mut circuit = Circuit::new("test");
        let qreg = circuit.add_qreg("data", 4).unwrap();
        let anc = circuit.add_qreg("anc", 1).unwrap();
        let creg = circuit.add_creg("out", 4).unwrap();

        assert_eq!(qreg, vec![QubitId(0), QubitId(1), QubitId(2), QubitId(3)]);
        assert_eq!(anc, vec![QubitId(4)]);
        assert_eq!(creg.len(), 4);
        assert_eq!(circuit.qubits()[4].to_string(), "anc[0]");
    }

    #[test]
    fn test_duplicate_register_rejected() {
        let mut circuit = Circuit::with_size("test", 1, 1);
        assert!(matches!(
            circuit.add_creg("c", 2),
            Err(IrError::InvalidRegister(_))
        ));
        assert!(matches!(
            circuit.add_qreg("", 2),
            Err(IrError::InvalidRegister(_))
        ));
    }

    #[test]
    fn test_bell_state() {
        let circuit = Circuit::bell().unwrap();
        assert_eq!(circuit.num_qubits(), 2);
        assert_eq!(circuit.num_clbits(), 2);
        assert_eq!(circuit.depth(), 3); // H, CX, parallel measures
        assert_eq!(circuit.instructions().len(), 4);
        assert!(circuit.has_measurements());
    }

    #[test]
    fn test_ghz_state() {
        let circuit = Circuit::ghz(5).unwrap();
        assert_eq!(circuit.num_qubits(), 5);
        assert_eq!(circuit.num_clbits(), 5);
        assert_eq!(circuit.count_ops()["cx"], 4);
        assert_eq!(circuit.count_ops()["measure"], 5);
        assert_eq!(Circuit::ghz(0).unwrap().num_qubits(), 0);
    }

    #[test]
    fn test_fluent_api() {
        let mut circuit = Circuit::with_size("test", 2, 2);
        circuit
            .h(QubitId(0))
            .unwrap()
            .rx(PI / 2.0, QubitId(1))
            .unwrap()
            .cx(QubitId(0), QubitId(1))
            .unwrap()
            .measure(QubitId(0), ClbitId(0))
            .unwrap()
            .measure(QubitId(1), ClbitId(1))
            .unwrap();

        assert_eq!(circuit.depth(), 3);
    }

    #[test]
    fn test_out_of_range_qubit() {
        let mut circuit = Circuit::with_size("test", 2, 2);
        let err = circuit.cx(QubitId(0), QubitId(2)).unwrap_err();
        assert!(matches!(err, IrError::QubitNotFound { qubit: QubitId(2), .. }));
        assert!(err.to_string().contains("gate: cx"));
        assert!(circuit.instructions().is_empty());
    }

    #[test]
    fn test_out_of_range_clbit() {
        let mut circuit = Circuit::with_size("test", 2, 1);
        assert!(matches!(
            circuit.measure(QubitId(1), ClbitId(1)),
            Err(IrError::ClbitNotFound { clbit: ClbitId(1), .. })
        ));
    }

    #[test]
    fn test_duplicate_qubit() {
        let mut circuit = Circuit::with_size("test", 2, 0);
        assert!(matches!(
            circuit.cx(QubitId(1), QubitId(1)),
            Err(IrError::DuplicateQubit { .. })
        ));
    }

    #[test]
    fn test_gate_arity_checked() {
        let mut circuit = Circuit::with_size("test", 3, 0);
        let err = circuit
            .gate(StandardGate::CX, [QubitId(0)])
            .unwrap_err();
        assert!(matches!(
            err,
            IrError::QubitCountMismatch {
                expected: 2,
                got: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_measure_many_is_all_or_nothing() {
        let mut circuit = Circuit::with_size("test", 2, 2);
        assert!(matches!(
            circuit.measure_many([0u32, 1], [0u32]),
            Err(IrError::MeasureArityMismatch { qubits: 2, clbits: 1 })
        ));
        assert!(circuit.measure_many([0u32, 1], [0u32, 5]).is_err());
        assert!(circuit.instructions().is_empty());
    }

    #[test]
    fn test_measure_all_adds_register() {
        let mut circuit = Circuit::with_size("test", 3, 0);
        circuit.h(QubitId(0)).unwrap();
        circuit.measure_all().unwrap();
        circuit.measure_all().unwrap();

        let names: Vec<_> = circuit.cregs().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["meas", "meas1"]);
        assert_eq!(circuit.num_clbits(), 6);
        assert_eq!(circuit.count_ops()["barrier"], 2);
    }

    #[test]
    fn test_barrier_does_not_add_depth() {
        let mut circuit = Circuit::with_size("test", 2, 0);
        circuit
            .h(QubitId(0))
            .unwrap()
            .barrier_all()
            .unwrap()
            .h(QubitId(1))
            .unwrap();
        assert_eq!(circuit.depth(), 1);
    }

    #[test]
    fn test_display() {
        let circuit = Circuit::bell().unwrap();
        let text = circuit.to_string();
        assert!(text.starts_with("circuit bell: 2 qubits, 2 clbits"));
        assert!(text.contains("  h q[0]\n"));
        assert!(text.contains("  cx q[0], q[1]\n"));
        assert!(text.contains("  measure q[1] -> c[1]\n"));
    }

    #[test]
    fn test_json_roundtrip_keeps_registers() {
        let mut circuit = Circuit::new("regs");
        circuit.add_qreg("a", 1).unwrap();
        circuit.add_qreg("b", 1).unwrap();
        circuit.add_creg("out", 2).unwrap();
        circuit
            .h(QubitId(0))
            .unwrap()
            .cx(QubitId(0), QubitId(1))
            .unwrap();

        let json = circuit.to_json().unwrap();
        let loaded = Circuit::from_json(&json).unwrap();
        assert_eq!(loaded.qubits()[1].to_string(), "b[0]");
        assert_eq!(loaded.instructions(), circuit.instructions());
    }

    #[test]
    fn test_register_size_is_bounded() {
        let mut circuit = Circuit::new("wide");
        circuit.add_qreg("a", MAX_WIRES as u32).unwrap();
        assert!(matches!(
            circuit.add_qreg("b", 1),
            Err(IrError::InvalidRegister(_))
        ));
        assert!(matches!(
            circuit.add_creg("c", u32::MAX),
            Err(IrError::InvalidRegister(_))
        ));
        assert_eq!(circuit.num_qubits(), MAX_WIRES);
        assert_eq!(circuit.num_clbits(), 0);
    }

    #[test]
    fn test_json_rejects_oversized_registers() {
        let source = r#"{"qregs":[{"name":"a","size":4294967295},{"name":"b","size":2}]}"#;
        match Circuit::from_json(source) {
            Err(IrError::Json(e)) => assert!(e.to_string().contains("Invalid register")),
            other => panic!("expected a register error, got {other:?}"),
        }

        let source = r#"{"name":"x","cregs":[{"name":"a","size":65536},{"name":"b","size":1}]}"#;
        assert!(Circuit::from_json(source).is_err());
    }

    #[test]
    fn test_json_rejects_invalid_operands() {
        let source = r#"{
            "name": "broken",
            "qregs": [{"name": "q", "size": 1}],
            "instructions": [{"kind": {"gate": "cx"}, "qubits": [0, 1]}]
        }"#;
        let err = Circuit::from_json(source).unwrap_err();
        assert!(matches!(err, IrError::Json(_)));
    }
}
