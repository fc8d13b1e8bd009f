//! Port for minting unique, time-sortable 64-bit identifiers.

use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Per-call failures raised by identifier generators.
    pub enum IdGenerationError {
        /// The clock fell behind the last issued tick by more than the tolerance.
        ClockMovedBackwards { ticks: u64 } => "clock moved backwards by {ticks} ticks",
        /// Elapsed time no longer fits the time component of the id layout.
        TimeOverflow => "id generator time component overflowed",
        /// The generator could not be constructed at startup.
        Unavailable { message: String } => "id generator unavailable: {message}",
    }
}

/// Source of unique identifiers for new rows.
///
/// Implementations suspend the calling task while waiting for the next tick
/// instead of blocking a worker thread.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdGenerator: Send + Sync {
    async fn next_id(&self) -> Result<u64, IdGenerationError>;
}
