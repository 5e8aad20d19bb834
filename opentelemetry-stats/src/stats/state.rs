use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};

use crate::error::{StatsError, StatsResult};

/// Whether stats are being collected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StatsCollectionState {
    /// Recordings are aggregated into registered views.
    Enabled,
    /// Recordings are dropped and views report no data.
    Disabled,
}

impl fmt::Display for StatsCollectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatsCollectionState::Enabled => f.write_str("ENABLED"),
            StatsCollectionState::Disabled => f.write_str("DISABLED"),
        }
    }
}

const DISABLED_BIT: u8 = 0b01;
const READ_BIT: u8 = 0b10;

fn decode(bits: u8) -> StatsCollectionState {
    if bits & DISABLED_BIT == 0 {
        StatsCollectionState::Enabled
    } else {
        StatsCollectionState::Disabled
    }
}

fn encode(state: StatsCollectionState) -> u8 {
    match state {
        StatsCollectionState::Enabled => 0,
        StatsCollectionState::Disabled => DISABLED_BIT,
    }
}

/// The current [`StatsCollectionState`] together with a read latch.
///
/// The state and the latch share one atomic byte, so readers never observe
/// a state that was changed after the latch was taken. Once [`get`] has been
/// called, [`set`] fails with [`StatsError::StateLocked`].
///
/// [`get`]: CurrentStatsState::get
/// [`set`]: CurrentStatsState::set
#[derive(Debug)]
pub struct CurrentStatsState {
    bits: AtomicU8,
}

impl Default for CurrentStatsState {
    fn default() -> Self {
        CurrentStatsState::new(StatsCollectionState::Enabled)
    }
}

impl CurrentStatsState {
    /// Creates an unlatched state cell.
    pub fn new(initial: StatsCollectionState) -> Self {
        CurrentStatsState {
            bits: AtomicU8::new(encode(initial)),
        }
    }

    /// Returns the current state and locks it against further changes.
    pub fn get(&self) -> StatsCollectionState {
        decode(self.bits.fetch_or(READ_BIT, Ordering::AcqRel))
    }

    /// Returns the current state without locking it.
    pub fn get_internal(&self) -> StatsCollectionState {
        decode(self.bits.load(Ordering::Acquire))
    }

    /// Whether [`get`](CurrentStatsState::get) has been called.
    pub fn is_read(&self) -> bool {
        self.bits.load(Ordering::Acquire) & READ_BIT != 0
    }

    /// Changes the state.
    ///
    /// Returns `Ok(true)` if the state changed and `Ok(false)` if it already
    /// had the requested value.
    pub fn set(&self, state: StatsCollectionState) -> StatsResult<bool> {
        let target = encode(state);
        let mut current = self.bits.load(Ordering::Acquire);
        loop {
            if current & READ_BIT != 0 {
                return Err(StatsError::StateLocked);
            }
            if current & DISABLED_BIT == target {
                return Ok(false);
            }
            match self.bits.compare_exchange_weak(
                current,
                target,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => return Ok(true),
                Err(actual) => current = actual,
            }
        }
    }
}
