//! Bounded polling
//!
//! Every wait on a peripheral status flag goes through [`poll_until`], so a
//! stuck flag costs a fixed number of iterations instead of a hang.

/// Iteration budget for a single status wait
pub const DEFAULT_POLL_BUDGET: u32 = 100_000;

/// The condition never became true within the budget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Exhausted;

/// Poll `ready` until it returns true, at most `budget` times
///
/// Returns the number of polls that were needed. A budget of zero never
/// polls and always fails.
pub fn poll_until<F>(budget: u32, mut ready: F) -> Result<u32, Exhausted>
where
    F: FnMut() -> bool,
{
    for attempt in 1..=budget {
        if ready() {
            return Ok(attempt);
        }
        core::hint::spin_loop();
    }
    Err(Exhausted)
}
