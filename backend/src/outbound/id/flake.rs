//! Mutex-guarded flake identifier generator.
//!
//! Layout of a generated id (63 bits, so it always fits a signed `BIGINT`):
//!
//! ```text
//!  62                      24 23             8 7        0
//! +--------------------------+----------------+----------+
//! | ticks since EPOCH (39)   | machine id (16)| seq (8)  |
//! +--------------------------+----------------+----------+
//! ```
//!
//! A tick is 10 ms. Up to 256 ids are issued per tick per machine; callers
//! past that wait for the next tick.

use std::cmp::Ordering;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use mockable::Clock;
use tracing::{debug, warn};

use crate::domain::ports::{IdGenerationError, IdGenerator};

use super::machine_id::{MachineIdError, resolve_machine_id};

/// Generator epoch, 2014-09-01T00:00:00Z, in Unix milliseconds.
pub const EPOCH_MILLIS: i64 = 1_409_529_600_000;
/// Length of one tick in milliseconds.
pub const TICK_MILLIS: i64 = 10;
/// Default tolerance for a clock running backwards, in ticks.
pub const DEFAULT_BACKWARD_TOLERANCE: u64 = 10;

const TIME_BITS: u32 = 39;
const MACHINE_BITS: u32 = 16;
const SEQUENCE_BITS: u32 = 8;
const MAX_TICK: u64 = (1 << TIME_BITS) - 1;
const MAX_SEQUENCE: u64 = (1 << SEQUENCE_BITS) - 1;

/// Errors that prevent a generator from being built.
#[derive(Debug, thiserror::Error)]
pub enum FlakeConfigError {
    /// The clock reads earlier than the generator epoch.
    #[error("clock reads {now}, before the id generator epoch")]
    BeforeEpoch { now: DateTime<Utc> },
    /// No machine id was configured and none could be derived.
    #[error(transparent)]
    MachineId(#[from] MachineIdError),
}

/// Outcome of a single non-blocking attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdGenStatus {
    Ready { id: u64 },
    /// Retry after this many ticks.
    Pending { yield_for: u64 },
}

/// Components of a generated identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdParts {
    pub tick: u64,
    pub machine_id: u16,
    pub sequence: u8,
}

/// Split an identifier into its tick, machine, and sequence components.
///
/// # Examples
/// ```
/// use product_backend::outbound::id::decompose;
///
/// let parts = decompose((5 << 24) | (0x0102 << 8) | 3);
/// assert_eq!((parts.tick, parts.machine_id, parts.sequence), (5, 0x0102, 3));
/// ```
#[must_use]
pub fn decompose(id: u64) -> IdParts {
    IdParts {
        tick: id >> (MACHINE_BITS + SEQUENCE_BITS),
        machine_id: ((id >> SEQUENCE_BITS) & u64::from(u16::MAX)) as u16,
        sequence: (id & MAX_SEQUENCE) as u8,
    }
}

#[derive(Debug, Default)]
struct State {
    tick: u64,
    sequence: u64,
}

/// Coordination-free unique id source for one process.
pub struct FlakeIdGenerator {
    machine_id: u16,
    backward_tolerance: u64,
    state: Mutex<State>,
    clock: Arc<dyn Clock>,
}

impl FlakeIdGenerator {
    /// Build a generator for `machine_id`.
    ///
    /// # Errors
    /// [`FlakeConfigError::BeforeEpoch`] when the clock reads before
    /// [`EPOCH_MILLIS`].
    pub fn new(machine_id: u16, clock: Arc<dyn Clock>) -> Result<Self, FlakeConfigError> {
        let now = clock.utc();
        if now.timestamp_millis() < EPOCH_MILLIS {
            return Err(FlakeConfigError::BeforeEpoch { now });
        }
        Ok(Self {
            machine_id,
            backward_tolerance: DEFAULT_BACKWARD_TOLERANCE,
            state: Mutex::new(State::default()),
            clock,
        })
    }

    /// Build a generator, deriving the machine id when none is configured.
    ///
    /// # Errors
    /// Any [`FlakeConfigError`]; the caller decides whether to run degraded.
    pub fn from_config(
        machine_id: Option<u16>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, FlakeConfigError> {
        let machine_id = resolve_machine_id(machine_id)?;
        debug!(machine_id, "id generator machine id resolved");
        Self::new(machine_id, clock)
    }

    /// Override how many ticks the clock may run backwards before failing.
    #[must_use]
    pub fn with_backward_tolerance(mut self, ticks: u64) -> Self {
        self.backward_tolerance = ticks;
        self
    }

    /// Machine id embedded in every issued id.
    pub fn machine_id(&self) -> u16 {
        self.machine_id
    }

    /// The generator epoch as a timestamp.
    #[must_use]
    pub fn epoch() -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(EPOCH_MILLIS).single()
    }

    fn current_tick(&self) -> Result<u64, IdGenerationError> {
        let elapsed = self.clock.utc().timestamp_millis() - EPOCH_MILLIS;
        // A clock that has dropped below the epoch is just very far behind.
        let tick = u64::try_from(elapsed / TICK_MILLIS).unwrap_or(0);
        if tick > MAX_TICK {
            return Err(IdGenerationError::time_overflow());
        }
        Ok(tick)
    }

    fn compose(&self, tick: u64, sequence: u64) -> u64 {
        (tick << (MACHINE_BITS + SEQUENCE_BITS))
            | (u64::from(self.machine_id) << SEQUENCE_BITS)
            | sequence
    }

    /// Attempt to issue an id without waiting.
    ///
    /// # Errors
    /// [`IdGenerationError::ClockMovedBackwards`] past the tolerance and
    /// [`IdGenerationError::TimeOverflow`] once the tick range is exhausted.
    pub fn try_next_id(&self) -> Result<IdGenStatus, IdGenerationError> {
        let now = self.current_tick()?;
        let mut state = self
            .state
            .lock()
            .map_err(|_| IdGenerationError::unavailable("id generator state poisoned"))?;

        match now.cmp(&state.tick) {
            Ordering::Equal => {
                if state.sequence < MAX_SEQUENCE {
                    state.sequence += 1;
                    Ok(IdGenStatus::Ready {
                        id: self.compose(state.tick, state.sequence),
                    })
                } else {
                    Ok(IdGenStatus::Pending { yield_for: 1 })
                }
            }
            Ordering::Greater => {
                state.tick = now;
                state.sequence = 0;
                Ok(IdGenStatus::Ready {
                    id: self.compose(now, 0),
                })
            }
            Ordering::Less => {
                let behind = state.tick - now;
                if behind > self.backward_tolerance {
                    warn!(behind, "clock moved backwards beyond tolerance");
                    Err(IdGenerationError::clock_moved_backwards(behind))
                } else {
                    Ok(IdGenStatus::Pending { yield_for: behind })
                }
            }
        }
    }
}

#[async_trait]
impl IdGenerator for FlakeIdGenerator {
    async fn next_id(&self) -> Result<u64, IdGenerationError> {
        loop {
            let ticks = match self.try_next_id()? {
                IdGenStatus::Ready { id } => return Ok(id),
                IdGenStatus::Pending { yield_for } => yield_for,
            };
            let millis = ticks.saturating_mul(TICK_MILLIS as u64);
            tokio::time::sleep(Duration::from_millis(millis)).await;
        }
    }
}
