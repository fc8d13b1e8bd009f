//! Identifier generator adapters implementing `domain::ports::IdGenerator`.

mod flake;
mod machine_id;

use async_trait::async_trait;

use crate::domain::ports::{IdGenerationError, IdGenerator};

pub use flake::{
    DEFAULT_BACKWARD_TOLERANCE, EPOCH_MILLIS, FlakeConfigError, FlakeIdGenerator, IdGenStatus,
    IdParts, TICK_MILLIS, decompose,
};
pub use machine_id::{MachineIdError, machine_id_from_ip, resolve_machine_id};

/// Stand-in used when the real generator failed to start.
///
/// Every call fails with [`IdGenerationError::Unavailable`], so the service
/// keeps serving reads while creates report the startup failure.
#[derive(Debug, Clone)]
pub struct UnavailableIdGenerator {
    reason: String,
}

impl UnavailableIdGenerator {
    /// Record why the real generator could not be built.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl IdGenerator for UnavailableIdGenerator {
    async fn next_id(&self) -> Result<u64, IdGenerationError> {
        Err(IdGenerationError::unavailable(self.reason.clone()))
    }
}
