//! Statevector simulation engine.
//!
//! Basis states are little-endian: qubit `k` is bit `k` of the amplitude
//! index, so `|q1 q0⟩ = |10⟩` lives at index 2.

use std::f64::consts::{FRAC_1_SQRT_2, PI};

use num_complex::Complex64;
use rand::Rng;
use rustc_hash::FxHashMap;

use qplot_ir::StandardGate;

/// A 2x2 unitary acting on one target qubit, row-major.
type Matrix2 = [[Complex64; 2]; 2];

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);
const I: Complex64 = Complex64::new(0.0, 1.0);

/// Probabilities below this are treated as zero when collapsing.
const COLLAPSE_EPSILON: f64 = 1e-12;

fn diagonal(d0: Complex64, d1: Complex64) -> Matrix2 {
    [[d0, ZERO], [ZERO, d1]]
}

fn phase(theta: f64) -> Matrix2 {
    diagonal(ONE, Complex64::from_polar(1.0, theta))
}

fn hadamard() -> Matrix2 {
    let h = Complex64::new(FRAC_1_SQRT_2, 0.0);
    [[h, h], [h, -h]]
}

fn pauli_y() -> Matrix2 {
    [[ZERO, -I], [I, ZERO]]
}

fn rx(theta: f64) -> Matrix2 {
    let c = Complex64::new((theta / 2.0).cos(), 0.0);
    let s = Complex64::new(0.0, -(theta / 2.0).sin());
    [[c, s], [s, c]]
}

fn ry(theta: f64) -> Matrix2 {
    let c = Complex64::new((theta / 2.0).cos(), 0.0);
    let s = Complex64::new((theta / 2.0).sin(), 0.0);
    [[c, -s], [s, c]]
}

fn rz(theta: f64) -> Matrix2 {
    diagonal(
        Complex64::from_polar(1.0, -theta / 2.0),
        Complex64::from_polar(1.0, theta / 2.0),
    )
}

fn u(theta: f64, phi: f64, lambda: f64) -> Matrix2 {
    let c = (theta / 2.0).cos();
    let s = (theta / 2.0).sin();
    [
        [
            Complex64::new(c, 0.0),
            -Complex64::from_polar(s, lambda),
        ],
        [
            Complex64::from_polar(s, phi),
            Complex64::from_polar(c, phi + lambda),
        ],
    ]
}

/// sqrt(X); `dagger` gives its inverse.
fn sqrt_x(dagger: bool) -> Matrix2 {
    let p = Complex64::new(0.5, 0.5);
    let m = Complex64::new(0.5, -0.5);
    if dagger { [[m, p], [p, m]] } else { [[p, m], [m, p]] }
}

/// A quantum state of `num_qubits` qubits as 2^n complex amplitudes.
#[derive(Debug, Clone)]
pub struct Statevector {
    amplitudes: Vec<Complex64>,
    num_qubits: usize,
}

impl Statevector {
    /// Create a new statevector initialized to |0...0⟩.
    pub fn new(num_qubits: usize) -> Self {
        let mut amplitudes = vec![ZERO; 1 << num_qubits];
        amplitudes[0] = ONE;
        Self {
            amplitudes,
            num_qubits,
        }
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// The raw amplitudes.
    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    /// Probability of each basis state.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(Complex64::norm_sqr).collect()
    }

    /// Apply a gate to the given qubits (controls first, as in the circuit).
    pub fn apply_gate(&mut self, gate: &StandardGate, qubits: &[usize]) {
        match *gate {
            StandardGate::I => {}
            StandardGate::X => self.controlled_x(0, qubits[0]),
            StandardGate::Y => self.controlled_matrix(0, qubits[0], pauli_y()),
            StandardGate::Z => self.controlled_matrix(0, qubits[0], phase(PI)),
            StandardGate::H => self.controlled_matrix(0, qubits[0], hadamard()),
            StandardGate::S => self.controlled_matrix(0, qubits[0], phase(PI / 2.0)),
            StandardGate::Sdg => self.controlled_matrix(0, qubits[0], phase(-PI / 2.0)),
            StandardGate::T => self.controlled_matrix(0, qubits[0], phase(PI / 4.0)),
            StandardGate::Tdg => self.controlled_matrix(0, qubits[0], phase(-PI / 4.0)),
            StandardGate::SX => self.controlled_matrix(0, qubits[0], sqrt_x(false)),
            StandardGate::SXdg => self.controlled_matrix(0, qubits[0], sqrt_x(true)),
            StandardGate::Rx(theta) => self.controlled_matrix(0, qubits[0], rx(theta)),
            StandardGate::Ry(theta) => self.controlled_matrix(0, qubits[0], ry(theta)),
            StandardGate::Rz(theta) => self.controlled_matrix(0, qubits[0], rz(theta)),
            StandardGate::P(theta) => self.controlled_matrix(0, qubits[0], phase(theta)),
            StandardGate::U(theta, phi, lambda) => {
                self.controlled_matrix(0, qubits[0], u(theta, phi, lambda));
            }

            StandardGate::CX => self.controlled_x(1 << qubits[0], qubits[1]),
            StandardGate::CY => self.controlled_matrix(1 << qubits[0], qubits[1], pauli_y()),
            StandardGate::CZ => self.controlled_matrix(1 << qubits[0], qubits[1], phase(PI)),
            StandardGate::CH => self.controlled_matrix(1 << qubits[0], qubits[1], hadamard()),
            StandardGate::Swap => self.controlled_swap(0, qubits[0], qubits[1]),
            StandardGate::CRz(theta) => {
                self.controlled_matrix(1 << qubits[0], qubits[1], rz(theta));
            }
            StandardGate::CP(theta) => {
                self.controlled_matrix(1 << qubits[0], qubits[1], phase(theta));
            }

            StandardGate::CCX => self.controlled_x((1 << qubits[0]) | (1 << qubits[1]), qubits[2]),
            StandardGate::CSwap => self.controlled_swap(1 << qubits[0], qubits[1], qubits[2]),
        }
    }

    /// Apply `matrix` to `target` on every basis state where all bits of
    /// `controls` are set. `controls == 0` is an uncontrolled gate.
    fn controlled_matrix(&mut self, controls: usize, target: usize, matrix: Matrix2) {
        let tgt_mask = 1 << target;
        for i in 0..self.amplitudes.len() {
            if i & tgt_mask == 0 && i & controls == controls {
                let j = i | tgt_mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = matrix[0][0] * a + matrix[0][1] * b;
                self.amplitudes[j] = matrix[1][0] * a + matrix[1][1] * b;
            }
        }
    }

    /// X is a permutation; swapping amplitudes avoids the multiply.
    fn controlled_x(&mut self, controls: usize, target: usize) {
        let tgt_mask = 1 << target;
        for i in 0..self.amplitudes.len() {
            if i & tgt_mask == 0 && i & controls == controls {
                self.amplitudes.swap(i, i | tgt_mask);
            }
        }
    }

    fn controlled_swap(&mut self, controls: usize, q1: usize, q2: usize) {
        let mask1 = 1 << q1;
        let mask2 = 1 << q2;
        for i in 0..self.amplitudes.len() {
            if i & mask1 != 0 && i & mask2 == 0 && i & controls == controls {
                self.amplitudes.swap(i, (i & !mask1) | mask2);
            }
        }
    }

    /// Probability that `qubit` reads 1.
    pub fn probability_one(&self, qubit: usize) -> f64 {
        let mask = 1 << qubit;
        self.amplitudes
            .iter()
            .enumerate()
            .filter(|(i, _)| i & mask != 0)
            .map(|(_, amp)| amp.norm_sqr())
            .sum()
    }

    /// Measure one qubit, collapsing the state onto the observed outcome.
    pub fn measure<R: Rng + ?Sized>(&mut self, qubit: usize, rng: &mut R) -> bool {
        let p1 = self.probability_one(qubit);
        let r: f64 = rng.r#gen();
        let mut outcome = r < p1;

        // Guard against rounding picking an outcome with no weight.
        let p_outcome = if outcome { p1 } else { 1.0 - p1 };
        if p_outcome < COLLAPSE_EPSILON {
            outcome = !outcome;
        }
        self.collapse(qubit, outcome);
        outcome
    }

    /// Project `qubit` onto `outcome` and renormalize.
    fn collapse(&mut self, qubit: usize, outcome: bool) {
        let mask = 1 << qubit;
        let mut norm_sq = 0.0;
        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            if (i & mask != 0) == outcome {
                norm_sq += amp.norm_sqr();
            } else {
                *amp = ZERO;
            }
        }

        let norm = norm_sq.sqrt();
        if norm > 0.0 {
            for amp in &mut self.amplitudes {
                *amp /= norm;
            }
        }
    }

    /// Reset a qubit to |0⟩: measure it, then flip it back if it read 1.
    pub fn reset<R: Rng + ?Sized>(&mut self, qubit: usize, rng: &mut R) {
        if self.measure(qubit, rng) {
            self.controlled_x(0, qubit);
        }
    }

    /// Sample one basis state index without collapsing.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        let r: f64 = rng.r#gen();
        let mut cumulative = 0.0;
        for (i, amp) in self.amplitudes.iter().enumerate() {
            cumulative += amp.norm_sqr();
            if r < cumulative {
                return i;
            }
        }
        self.last_nonzero()
    }

    /// Sample `shots` basis state indices and count them.
    pub fn sample_counts<R: Rng + ?Sized>(&self, shots: u32, rng: &mut R) -> FxHashMap<usize, u64> {
        let cdf: Vec<f64> = self
            .amplitudes
            .iter()
            .scan(0.0, |acc, amp| {
                *acc += amp.norm_sqr();
                Some(*acc)
            })
            .collect();
        let total = cdf.last().copied().unwrap_or(0.0);
        let fallback = self.last_nonzero();

        let mut counts = FxHashMap::default();
        for _ in 0..shots {
            let r = rng.r#gen::<f64>() * total;
            let idx = cdf.partition_point(|&c| c <= r);
            *counts.entry(idx.min(fallback)).or_insert(0) += 1;
        }
        counts
    }

    /// Highest index with non-zero weight, used when rounding runs off the end.
    fn last_nonzero(&self) -> usize {
        self.amplitudes
            .iter()
            .rposition(|amp| amp.norm_sqr() > 0.0)
            .unwrap_or(0)
    }
}
