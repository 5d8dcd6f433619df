//! Greedy shrink search for minimizing failing inputs.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::time::{Duration, Instant};

use crate::error::panic_message;
use crate::generated::Generated;
use crate::property::Property;

/// Result of a shrinking operation
#[derive(Debug, Clone)]
pub struct ShrinkResult<T> {
    /// Simplest input found that still fails
    pub minimal: Generated<T>,
    /// Number of accepted shrink steps
    pub shrink_steps: usize,
    /// The timeout stopped the search early
    pub timed_out: bool,
    /// Enumerating candidates panicked; `minimal` is the last good input
    pub aborted: bool,
}

/// Shrinking engine that coordinates the shrinking process
#[derive(Debug, Clone, Default)]
pub struct ShrinkEngine {
    timeout: Option<Duration>,
}

impl ShrinkEngine {
    /// `None` disables the timeout.
    pub fn new(timeout: Option<Duration>) -> Self {
        Self { timeout }
    }

    /// Hill-climb from `failing`: move to the first candidate that still
    /// fails and repeat, until a whole batch passes.
    ///
    /// The timeout is checked before each candidate. A panicking check
    /// counts as a failure of that candidate.
    pub fn shrink<P>(&self, property: &P, failing: Generated<P::Input>) -> ShrinkResult<P::Input>
    where
        P: Property + ?Sized,
    {
        let start = Instant::now();
        let mut current = failing;
        let mut shrink_steps = 0;
        let mut timed_out = false;
        let mut aborted = false;

        'search: loop {
            let candidates =
                match catch_unwind(AssertUnwindSafe(|| property.shrink_input(&current))) {
                    Ok(candidates) => candidates,
                    Err(payload) => {
                        log::warn!(
                            "panic while shrinking, keeping current input: {}",
                            panic_message(payload.as_ref())
                        );
                        aborted = true;
                        break;
                    }
                };

            for candidate in candidates {
                if self.timeout.is_some_and(|limit| start.elapsed() >= limit) {
                    log::warn!("shrinking timed out after {shrink_steps} steps");
                    timed_out = true;
                    break 'search;
                }
                if !passes(property, candidate.value()) {
                    log::trace!("shrink step {}: {:?}", shrink_steps + 1, candidate.value());
                    current = candidate;
                    shrink_steps += 1;
                    continue 'search;
                }
            }
            break;
        }

        ShrinkResult {
            minimal: current,
            shrink_steps,
            timed_out,
            aborted,
        }
    }
}

fn passes<P: Property + ?Sized>(property: &P, input: &P::Input) -> bool {
    catch_unwind(AssertUnwindSafe(|| property.check_input(input))).unwrap_or(false)
}
