//! Timestamps at the precision the database keeps.

use chrono::{DateTime, SubsecRound, Utc};
use mockable::Clock;

/// Fractional-second digits kept by `TIMESTAMPTZ`.
pub const STORED_SUBSEC_DIGITS: u16 = 6;

/// Returns the clock's current time truncated to microseconds.
///
/// Entities stamp themselves through this so that a value returned straight
/// after a write equals the one read back later.
#[must_use]
pub fn now(clock: &impl Clock) -> DateTime<Utc> {
    clock.utc().trunc_subsecs(STORED_SUBSEC_DIGITS)
}
