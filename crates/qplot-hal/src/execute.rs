//! Execute a circuit on a backend and collect its result.

use tracing::{debug, instrument};

use qplot_ir::Circuit;

use crate::backend::{Backend, ValidationResult};
use crate::error::{HalError, HalResult};
use crate::job::{JobId, JobStatus};
use crate::result::ExecutionResult;

/// Shots used when the caller does not ask for a specific number.
pub const DEFAULT_SHOTS: u32 = 1024;

/// Handle to a submitted job.
pub struct JobHandle<'a> {
    backend: &'a dyn Backend,
    id: JobId,
}

impl<'a> JobHandle<'a> {
    /// The job identifier.
    pub fn id(&self) -> &JobId {
        &self.id
    }

    /// The backend the job was submitted to.
    pub fn backend(&self) -> &'a dyn Backend {
        self.backend
    }

    /// Current job status.
    pub async fn status(&self) -> HalResult<JobStatus> {
        self.backend.status(&self.id).await
    }

    /// Wait for the job to finish and return its result.
    pub async fn result(self) -> HalResult<ExecutionResult> {
        self.backend.wait(&self.id).await
    }
}

impl std::fmt::Debug for JobHandle<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JobHandle")
            .field("backend", &self.backend.name())
            .field("id", &self.id)
            .finish()
    }
}

/// Run `circuit` on `backend` for `shots` repetitions.
///
/// Shots must be in `1..=max_shots` for the backend and the circuit must
/// pass [`Backend::validate`]. Nothing is submitted otherwise.
#[instrument(skip(circuit, backend), fields(circuit = circuit.name(), backend = backend.name()))]
pub async fn execute<'a>(
    circuit: &Circuit,
    backend: &'a dyn Backend,
    shots: u32,
) -> HalResult<JobHandle<'a>> {
    let max_shots = backend.capabilities().max_shots;
    if shots == 0 || shots > max_shots {
        return Err(HalError::InvalidShots(format!(
            "{shots} is outside 1..={max_shots}"
        )));
    }

    if let ValidationResult::Invalid { reasons } = backend.validate(circuit).await? {
        return Err(HalError::InvalidCircuit(reasons.join("; ")));
    }

    let id = backend.submit(circuit, shots).await?;
    debug!("Submitted job {}", id);
    Ok(JobHandle { backend, id })
}
