//! Tests for the driver report and the errors a check can return.

use quickprop::{
    CheckConfig, CheckError, ConfigError, ResultType, choose, elements, property, property_with,
};
use std::io::{self, Write};
use std::time::Duration;

fn seeded() -> CheckConfig {
    CheckConfig::default().with_seed(31337)
}

/// A sink that rejects every write.
struct BrokenPipe;

impl Write for BrokenPipe {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_write_failure_is_returned() {
    let error = property("anything", |_: &bool| true)
        .check_output(&mut BrokenPipe, &seeded())
        .unwrap_err();
    assert!(matches!(error, CheckError::Io(ref e) if e.kind() == io::ErrorKind::BrokenPipe));
    assert!(error.to_string().starts_with("failed to write report"));
}

#[test]
fn test_invalid_configuration_is_reported_before_running() {
    let mut out = Vec::new();
    let error = property("anything", |_: &bool| true)
        .check_output(&mut out, &seeded().with_max_success(0))
        .unwrap_err();
    assert!(matches!(error, CheckError::Config(ConfigError::InvalidMaxSuccess)));
    assert!(out.is_empty());
}

#[test]
fn test_panic_message_is_reported() {
    let mut out = Vec::new();
    let result = property("below seven", |x: &u8| {
        if *x >= 7 {
            panic!("{x} is too large");
        }
        true
    })
    .check_output(&mut out, &seeded())
    .unwrap();

    let output = String::from_utf8(out).unwrap();
    assert_eq!(result.result, ResultType::Failure);
    assert_eq!(result.counterexample, Some((7,)));
    assert!(output.contains("Caught panic checking property: "));
    assert!(output.contains(" is too large\n"));
    assert!(output.contains("for input:\n  0: 7\n"));
}

#[test]
fn test_shrink_timeout_is_reported() {
    let mut out = Vec::new();
    let result = property("below ten", |x: &u32| *x < 10)
        .check_output(&mut out, &seeded().with_shrink_timeout(Duration::from_nanos(1)))
        .unwrap();

    let output = String::from_utf8(out).unwrap();
    assert_eq!(result.result, ResultType::Failure);
    assert_eq!(result.num_shrinks, 0);
    assert!(output.contains("Shrinking timed out...\n*** Failed! Falsifiable after"));
    assert!(!output.contains(" shrink"));
}

#[test]
fn test_counts_are_pluralized() {
    let mut out = Vec::new();
    property_with("first fails", choose(3u8, 3), |_: &u8| false)
        .check_output(&mut out, &seeded())
        .unwrap();
    let output = String::from_utf8(out).unwrap();
    assert!(output.contains("*** Failed! Falsifiable after 1 test for input:\n"));

    let mut out = Vec::new();
    let result = property("short lists", |xs: &Vec<u8>| xs.len() < 5)
        .check_output(&mut out, &seeded())
        .unwrap();
    let output = String::from_utf8(out).unwrap();
    assert!(result.num_tests > 1);
    assert!(output.contains(&format!("Falsifiable after {} tests", result.num_tests)));
}

#[test]
fn test_label_lines() {
    let mut out = Vec::new();
    property_with("parity", elements(vec![1u8, 2, 3, 4]), |_: &u8| true)
        .classify(|x: &u8| if x % 2 == 0 { "even" } else { "odd" })
        .trivial(|x: &u8| *x == 1)
        .check_output(&mut out, &seeded())
        .unwrap();

    let output = String::from_utf8(out).unwrap();
    let mut lines = output.lines();
    assert_eq!(lines.next(), Some("* Checking property \"parity\" ..."));
    let summary = lines.next().unwrap();
    assert!(summary.starts_with("+++ OK, passed 100 tests ("));
    assert!(summary.ends_with("% trivial)."));

    let labels: Vec<&str> = lines.collect();
    assert_eq!(labels.len(), 2);
    for line in &labels {
        let (percent, label) = line.trim_start().split_once("% ").unwrap();
        assert!(percent.parse::<u32>().unwrap() <= 100);
        assert!(label == "even" || label == "odd");
    }
}
