//! Simulator backend implementation.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;

use async_trait::async_trait;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rustc_hash::FxHashMap;
use tracing::{debug, instrument};
use uuid::Uuid;

use qplot_hal::{
    Backend, BackendAvailability, BackendConfig, BackendFactory, Capabilities, Counts,
    ExecutionResult, HalError, HalResult, Job, JobId, JobStatus, ValidationResult,
};
use qplot_ir::{Circuit, InstructionKind};

use crate::statevector::Statevector;

/// Name the simulator registers under.
pub const BACKEND_NAME: &str = "qasm_simulator";

/// Qubit limit when `max_qubits` is not configured.
pub const DEFAULT_MAX_QUBITS: u32 = 24;

/// Hard ceiling for `max_qubits`; 2^30 amplitudes is 16 GiB.
const QUBIT_CEILING: u32 = 30;

/// How a circuit's shots are produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationMethod {
    /// Evolve once, sample every shot from the final distribution.
    Sampled,
    /// Re-run the circuit for every shot, collapsing on measure and reset.
    PerShot,
}

impl SimulationMethod {
    /// Pick the cheapest method that is still exact for `circuit`.
    ///
    /// Sampling is only valid when no gate or reset acts on a qubit after it
    /// has been measured and the circuit has no resets at all.
    pub fn for_circuit(circuit: &Circuit) -> Self {
        let mut measured = vec![false; circuit.num_qubits()];
        for inst in circuit.instructions() {
            match inst.kind {
                InstructionKind::Measure => {
                    for q in &inst.qubits {
                        measured[q.index()] = true;
                    }
                }
                InstructionKind::Reset => return SimulationMethod::PerShot,
                InstructionKind::Gate(_) => {
                    if inst.qubits.iter().any(|q| measured[q.index()]) {
                        return SimulationMethod::PerShot;
                    }
                }
                InstructionKind::Barrier => {}
            }
        }
        SimulationMethod::Sampled
    }

    /// Name reported in result metadata.
    pub fn as_str(self) -> &'static str {
        match self {
            SimulationMethod::Sampled => "sampled",
            SimulationMethod::PerShot => "per-shot",
        }
    }
}

/// Job data for the simulator.
struct SimJob {
    job: Job,
    result: Option<ExecutionResult>,
}

/// Local statevector simulator.
///
/// Jobs run to completion inside [`Backend::submit`]; afterwards
/// [`Backend::status`] reports `Completed` and the result can be read any
/// number of times. Finished jobs keep their counts in memory until
/// [`SimulatorBackend::clear_finished`] drops them.
pub struct SimulatorBackend {
    config: BackendConfig,
    capabilities: Capabilities,
    seed: Option<u64>,
    jobs: Arc<Mutex<FxHashMap<String, SimJob>>>,
}

impl SimulatorBackend {
    /// Create a new simulator backend with default settings.
    pub fn new() -> Self {
        Self::build(BackendConfig::new(BACKEND_NAME), DEFAULT_MAX_QUBITS, None)
    }

    /// Create a simulator with custom max qubits.
    ///
    /// The limit is clamped to `1..=30`; a statevector beyond 30 qubits does
    /// not fit in memory.
    pub fn with_max_qubits(max_qubits: u32) -> Self {
        Self::build(
            BackendConfig::new(BACKEND_NAME),
            max_qubits.clamp(1, QUBIT_CEILING),
            None,
        )
    }

    /// Fix the RNG seed so every job gives the same counts.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    fn build(config: BackendConfig, max_qubits: u32, seed: Option<u64>) -> Self {
        let capabilities = Capabilities::simulator(config.name.clone(), max_qubits);
        Self {
            config,
            capabilities,
            seed,
            jobs: Arc::new(Mutex::new(FxHashMap::default())),
        }
    }

    /// Forget every job in a terminal state, results included.
    ///
    /// Returns the number of jobs removed.
    pub fn clear_finished(&self) -> usize {
        let mut jobs = self.lock_jobs();
        let before = jobs.len();
        jobs.retain(|_, sim_job| !sim_job.job.status.is_terminal());
        let removed = before - jobs.len();
        debug!("Cleared {} finished jobs", removed);
        removed
    }

    fn lock_jobs(&self) -> std::sync::MutexGuard<'_, FxHashMap<String, SimJob>> {
        self.jobs.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn check_circuit(&self, circuit: &Circuit) -> Vec<String> {
        let mut reasons = Vec::new();

        let max_qubits = self.capabilities.num_qubits;
        if circuit.num_qubits() > max_qubits as usize {
            reasons.push(format!(
                "circuit has {} qubits but {} supports at most {}",
                circuit.num_qubits(),
                self.name(),
                max_qubits
            ));
        }

        let mut unsupported: Vec<&str> = circuit
            .instructions()
            .iter()
            .filter_map(|inst| inst.as_gate())
            .map(|gate| gate.name())
            .filter(|name| !self.capabilities.gate_set.contains(name))
            .collect();
        unsupported.sort_unstable();
        unsupported.dedup();
        for name in unsupported {
            reasons.push(format!("gate '{name}' is not supported"));
        }

        if !circuit.has_measurements() {
            reasons.push("circuit has no measurements, so there is nothing to count".into());
        }

        reasons
    }

    /// Run simulation synchronously.
    #[instrument(skip(self, circuit, rng), fields(circuit = circuit.name()))]
    fn run_simulation(&self, circuit: &Circuit, shots: u32, rng: &mut StdRng) -> Counts {
        let method = SimulationMethod::for_circuit(circuit);
        debug!(
            "Starting simulation: {} qubits, {} shots, method {}",
            circuit.num_qubits(),
            shots,
            method.as_str()
        );

        match method {
            SimulationMethod::Sampled => sample_final_state(circuit, shots, rng),
            SimulationMethod::PerShot => run_each_shot(circuit, shots, rng),
        }
    }
}

impl Default for SimulatorBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Evolve the unitary part once, then sample.
fn sample_final_state(circuit: &Circuit, shots: u32, rng: &mut StdRng) -> Counts {
    let mut sv = Statevector::new(circuit.num_qubits());
    let mut readout = Vec::new();

    for inst in circuit.instructions() {
        match &inst.kind {
            InstructionKind::Gate(gate) => {
                let qubits: Vec<_> = inst.qubits.iter().map(|q| q.index()).collect();
                sv.apply_gate(gate, &qubits);
            }
            InstructionKind::Measure => {
                readout.extend(
                    inst.qubits
                        .iter()
                        .zip(&inst.clbits)
                        .map(|(q, c)| (q.index(), c.index())),
                );
            }
            InstructionKind::Reset | InstructionKind::Barrier => {}
        }
    }

    let mut counts = Counts::new();
    let mut clbits = vec![false; circuit.num_clbits()];
    for (outcome, n) in sv.sample_counts(shots, rng) {
        clbits.fill(false);
        for &(qubit, clbit) in &readout {
            clbits[clbit] = outcome & (1 << qubit) != 0;
        }
        counts.insert(format_bitstring(circuit, &clbits), n);
    }
    counts
}

/// Run the full circuit once per shot.
fn run_each_shot(circuit: &Circuit, shots: u32, rng: &mut StdRng) -> Counts {
    let mut counts = Counts::new();
    let mut clbits = vec![false; circuit.num_clbits()];

    for shot in 0..shots {
        let mut sv = Statevector::new(circuit.num_qubits());
        clbits.fill(false);

        for inst in circuit.instructions() {
            match &inst.kind {
                InstructionKind::Gate(gate) => {
                    let qubits: Vec<_> = inst.qubits.iter().map(|q| q.index()).collect();
                    sv.apply_gate(gate, &qubits);
                }
                InstructionKind::Measure => {
                    for (q, c) in inst.qubits.iter().zip(&inst.clbits) {
                        clbits[c.index()] = sv.measure(q.index(), rng);
                    }
                }
                InstructionKind::Reset => {
                    for q in &inst.qubits {
                        sv.reset(q.index(), rng);
                    }
                }
                InstructionKind::Barrier => {}
            }
        }

        counts.insert(format_bitstring(circuit, &clbits), 1);

        if shot > 0 && shot % 1000 == 0 {
            debug!("Completed {} shots", shot);
        }
    }
    counts
}

/// Render classical bits as a counts key.
///
/// Registers are written last-declared first and separated by spaces; within
/// a register the highest index comes first.
pub(crate) fn format_bitstring(circuit: &Circuit, clbits: &[bool]) -> String {
    circuit
        .cregs()
        .iter()
        .rev()
        .map(|reg| {
            reg.bits
                .iter()
                .rev()
                .map(|bit| if clbits[bit.index()] { '1' } else { '0' })
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[async_trait]
impl Backend for SimulatorBackend {
    fn name(&self) -> &str {
        &self.config.name
    }

    fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    async fn availability(&self) -> HalResult<BackendAvailability> {
        Ok(BackendAvailability::always_available())
    }

    async fn validate(&self, circuit: &Circuit) -> HalResult<ValidationResult> {
        Ok(ValidationResult::from_reasons(self.check_circuit(circuit)))
    }

    #[instrument(skip(self, circuit), fields(circuit = circuit.name()))]
    async fn submit(&self, circuit: &Circuit, shots: u32) -> HalResult<JobId> {
        if circuit.num_qubits() > self.capabilities.num_qubits as usize {
            return Err(HalError::CircuitTooLarge(format!(
                "Circuit has {} qubits but simulator only supports {}",
                circuit.num_qubits(),
                self.capabilities.num_qubits
            )));
        }
        let reasons = self.check_circuit(circuit);
        if !reasons.is_empty() {
            return Err(HalError::InvalidCircuit(reasons.join("; ")));
        }
        if shots == 0 || shots > self.capabilities.max_shots {
            return Err(HalError::InvalidShots(format!(
                "{shots} is outside 1..={}",
                self.capabilities.max_shots
            )));
        }

        let job_id = JobId::new(Uuid::new_v4().to_string());
        let mut job = Job::new(job_id.clone(), shots).with_backend(self.name());
        debug!("Submitted job: {}", job_id);

        job.transition(JobStatus::Running)?;
        self.lock_jobs().insert(
            job_id.0.clone(),
            SimJob {
                job: job.clone(),
                result: None,
            },
        );

        let seed = self.seed.unwrap_or_else(rand::random);
        let mut rng = StdRng::seed_from_u64(seed);
        let start = Instant::now();
        let counts = self.run_simulation(circuit, shots, &mut rng);
        let elapsed = start.elapsed();
        debug!("Simulation completed in {:?}", elapsed);

        let result = ExecutionResult::new(counts, shots)
            .with_backend(self.name())
            .with_execution_time(u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX))
            .with_metadata(serde_json::json!({
                "method": SimulationMethod::for_circuit(circuit).as_str(),
                "seed_simulator": seed,
                "num_qubits": circuit.num_qubits(),
                "num_clbits": circuit.num_clbits(),
            }));

        let mut jobs = self.lock_jobs();
        if let Some(sim_job) = jobs.get_mut(&job_id.0) {
            // A concurrent cancel wins; its result is dropped.
            if sim_job.job.status == JobStatus::Running {
                sim_job.job.transition(JobStatus::Completed)?;
                sim_job.result = Some(result);
            }
        }

        Ok(job_id)
    }

    async fn status(&self, job_id: &JobId) -> HalResult<JobStatus> {
        self.lock_jobs()
            .get(&job_id.0)
            .map(|j| j.job.status.clone())
            .ok_or_else(|| HalError::JobNotFound(job_id.0.clone()))
    }

    async fn result(&self, job_id: &JobId) -> HalResult<ExecutionResult> {
        let jobs = self.lock_jobs();
        let sim_job = jobs
            .get(&job_id.0)
            .ok_or_else(|| HalError::JobNotFound(job_id.0.clone()))?;

        match (&sim_job.job.status, &sim_job.result) {
            (JobStatus::Completed, Some(result)) => Ok(result.clone()),
            (JobStatus::Failed(msg), _) => Err(HalError::JobFailed(msg.clone())),
            (JobStatus::Cancelled, _) => Err(HalError::JobCancelled),
            (status, _) => Err(HalError::Backend(format!(
                "job {job_id} has no result yet (status: {status})"
            ))),
        }
    }

    async fn cancel(&self, job_id: &JobId) -> HalResult<()> {
        let mut jobs = self.lock_jobs();
        let sim_job = jobs
            .get_mut(&job_id.0)
            .ok_or_else(|| HalError::JobNotFound(job_id.0.clone()))?;
        sim_job.job.transition(JobStatus::Cancelled)
    }
}

impl BackendFactory for SimulatorBackend {
    fn from_config(config: BackendConfig) -> HalResult<Self> {
        let max_qubits = match config.get_u64("max_qubits")? {
            None => DEFAULT_MAX_QUBITS,
            Some(n) => u32::try_from(n)
                .ok()
                .filter(|n| (1..=QUBIT_CEILING).contains(n))
                .ok_or_else(|| {
                    HalError::Configuration(format!(
                        "max_qubits must be between 1 and {QUBIT_CEILING}, got {n}"
                    ))
                })?,
        };
        let seed = config.seed()?;

        Ok(Self::build(config, max_qubits, seed))
    }
}
