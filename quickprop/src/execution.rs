//! The driver: runs trials of a property, shrinks failures and reports.

use std::io::{self, Write};
use std::panic::{AssertUnwindSafe, catch_unwind};

use rand::RngCore;

use crate::config::{CheckConfig, SEED_ENV_VAR, resolve_seed};
use crate::error::{CheckError, panic_message};
use crate::generated::Generated;
use crate::property::Property;
use crate::rng::create_seeded_rng;
use crate::shrink::ShrinkEngine;
use crate::statistics::{LabelCollector, LabelHistogram};

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultType {
    /// Every trial passed, or a property expected to fail did fail
    Success,
    /// A trial failed although the property was expected to hold
    Failure,
    /// A property expected to fail passed every trial
    NoExpectedFailure,
    /// Too many trials were discarded
    GaveUp,
}

/// Summary of one driver run
#[derive(Debug, Clone)]
pub struct CheckResult<I> {
    pub result: ResultType,
    /// Trials executed, including a failing one
    pub num_tests: usize,
    /// Labels of every classified trial grouped by occurrence count
    pub labels: LabelHistogram,
    /// Seed that reproduces the run
    pub seed: u32,
    pub num_shrinks: usize,
    /// Size of the last trial
    pub used_size: usize,
    /// The shrunk failing input, if a trial failed
    pub counterexample: Option<I>,
}

impl<I> CheckResult<I> {
    pub fn is_success(&self) -> bool {
        self.result == ResultType::Success
    }
}

/// Check `property` with the default configuration, without output.
pub fn quick_check<P>(property: &P) -> Result<CheckResult<P::Input>, CheckError>
where
    P: Property + ?Sized,
{
    quick_check_with(property, &CheckConfig::default())
}

/// Check `property` with `config`, without output.
pub fn quick_check_with<P>(
    property: &P,
    config: &CheckConfig,
) -> Result<CheckResult<P::Input>, CheckError>
where
    P: Property + ?Sized,
{
    quick_check_output(property, &mut io::sink(), config)
}

/// Check `property` with `config`, writing a human-readable report to `out`.
///
/// Trial `i` runs at size `(i * max_size + discarded) / max_success`. A
/// panic in the check fails the trial; a generator error or panic discards
/// it. Only configuration and I/O problems are returned as errors.
pub fn quick_check_output<P>(
    property: &P,
    out: &mut dyn Write,
    config: &CheckConfig,
) -> Result<CheckResult<P::Input>, CheckError>
where
    P: Property + ?Sized,
{
    config.validate()?;
    let seed = resolve_seed(config.seed)?;
    let max_success = config.max_success;
    let max_discarded = config.effective_max_discarded();
    let max_size = config.effective_max_size();

    let name = property.name();
    log::debug!(
        "checking {name:?}: seed={seed} max_success={max_success} \
         max_discarded={max_discarded} max_size={max_size}"
    );
    writeln!(out, "* Checking property \"{name}\" ...")?;

    let mut rng = create_seeded_rng(seed);
    let mut labels = LabelCollector::new();
    let mut num_success = 0;
    let mut num_discarded = 0;
    let mut used_size = 0;

    while num_success < max_success {
        let size = (num_success * max_size + num_discarded) / max_success;
        used_size = size;

        let Some(generated) = generate_trial(property, &mut rng, size) else {
            num_discarded += 1;
            if num_discarded >= max_discarded {
                writeln!(out, "*** Gave up! Passed only {num_success} tests.")?;
                log::debug!("{name:?} gave up after {num_discarded} discards");
                return Ok(CheckResult {
                    result: ResultType::GaveUp,
                    num_tests: num_success,
                    labels: labels.histogram(),
                    seed,
                    num_shrinks: 0,
                    used_size,
                    counterexample: None,
                });
            }
            continue;
        };

        let input = generated.value();
        let passed = contain_panic(out, || property.check_input(input))?.unwrap_or(false);
        // Every trial is classified, a failing one included.
        let observed = contain_panic(out, || {
            (property.classify_input(input), property.trivial_input(input))
        })?;
        let passed = match observed {
            Some((label, trivial)) => {
                labels.record(label, trivial);
                passed
            }
            None => false,
        };

        if passed {
            num_success += 1;
            continue;
        }
        log::debug!("{name:?} failed at size {size}");

        let num_tests = num_success + 1;
        let shrunk = ShrinkEngine::new(config.shrink_timeout).shrink(property, generated);
        if shrunk.timed_out {
            writeln!(out, "Shrinking timed out...")?;
        }

        let expected = property.expect();
        let verdict = if expected {
            "*** Failed! "
        } else {
            "+++ OK, failed as expected. "
        };
        write!(out, "{verdict}Falsifiable after {num_tests} {}", plural(num_tests, "test"))?;
        if shrunk.shrink_steps > 0 {
            write!(
                out,
                " and {} {}",
                shrunk.shrink_steps,
                plural(shrunk.shrink_steps, "shrink")
            )?;
        }
        writeln!(out, " for input:")?;
        for (index, line) in property
            .describe_input(shrunk.minimal.value())
            .iter()
            .enumerate()
        {
            writeln!(out, "  {index}: {line}")?;
        }
        writeln!(out, "(To reproduce the test, use {SEED_ENV_VAR}={seed})")?;

        log::debug!(
            "{name:?} falsified after {num_tests} tests and {} shrinks",
            shrunk.shrink_steps
        );
        return Ok(CheckResult {
            result: if expected {
                ResultType::Failure
            } else {
                ResultType::Success
            },
            num_tests,
            labels: labels.histogram(),
            seed,
            num_shrinks: shrunk.shrink_steps,
            used_size,
            counterexample: Some(shrunk.minimal.into_value()),
        });
    }

    let result = if property.expect() {
        write!(out, "+++ OK, passed {num_success} tests")?;
        ResultType::Success
    } else {
        write!(out, "*** Failed! Expected failure but passed {num_success} tests")?;
        ResultType::NoExpectedFailure
    };
    write_summary(out, &labels, num_success)?;
    log::debug!("{name:?} finished: {result:?} after {num_success} tests");

    Ok(CheckResult {
        result,
        num_tests: num_success,
        labels: labels.histogram(),
        seed,
        num_shrinks: 0,
        used_size,
        counterexample: None,
    })
}

/// Generate one input, or `None` if the trial has to be discarded.
fn generate_trial<P>(property: &P, rng: &mut dyn RngCore, size: usize) -> Option<Generated<P::Input>>
where
    P: Property + ?Sized,
{
    match catch_unwind(AssertUnwindSafe(|| property.generate_input(rng, size))) {
        Ok(Ok(generated)) => Some(generated),
        Ok(Err(error)) => {
            log::trace!("discarding trial at size {size}: {error}");
            None
        }
        Err(payload) => {
            log::warn!(
                "generator panicked at size {size}: {}",
                panic_message(payload.as_ref())
            );
            None
        }
    }
}

/// Run `f`, reporting a panic and returning `None` in its place.
fn contain_panic<T>(out: &mut dyn Write, f: impl FnOnce() -> T) -> Result<Option<T>, CheckError> {
    match catch_unwind(AssertUnwindSafe(f)) {
        Ok(value) => Ok(Some(value)),
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            log::warn!("property panicked: {message}");
            writeln!(out, "Caught panic checking property: {message}")?;
            Ok(None)
        }
    }
}

/// Finish the summary line with the trivial share, then list the labels.
fn write_summary(out: &mut dyn Write, labels: &LabelCollector, num_tests: usize) -> io::Result<()> {
    if labels.trivial_count() > 0 {
        write!(out, " ({}% trivial)", labels.trivial_percentage(num_tests))?;
    }
    writeln!(out, ".")?;
    labels.write_labels(out, num_tests)
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        noun.to_string()
    } else {
        format!("{noun}s")
    }
}
