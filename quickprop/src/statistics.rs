//! Classification labels and trivial-case counts gathered during a run.

use std::collections::BTreeMap;
use std::io::{self, Write};

/// Labels shown in a report, most frequent first.
pub const MAX_REPORTED_LABELS: usize = 20;

/// Labels grouped by how many trials they were attached to.
pub type LabelHistogram = BTreeMap<usize, Vec<String>>;

/// Statistics collector for the labels and trivial flags of every trial
#[derive(Debug, Clone, Default)]
pub struct LabelCollector {
    counts: BTreeMap<String, usize>,
    trivial: usize,
}

impl LabelCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one trial. Empty labels are not counted.
    pub fn record(&mut self, label: String, trivial: bool) {
        if trivial {
            self.trivial += 1;
        }
        if !label.is_empty() {
            *self.counts.entry(label).or_insert(0) += 1;
        }
    }

    pub fn trivial_count(&self) -> usize {
        self.trivial
    }

    /// Group labels by occurrence count, labels in each group sorted.
    pub fn histogram(&self) -> LabelHistogram {
        let mut histogram = LabelHistogram::new();
        for (label, count) in &self.counts {
            histogram.entry(*count).or_default().push(label.clone());
        }
        histogram
    }

    /// Trivial trials as a whole percentage of `num_tests`.
    pub fn trivial_percentage(&self, num_tests: usize) -> usize {
        self.trivial * 100 / num_tests.max(1)
    }

    /// Write up to [`MAX_REPORTED_LABELS`] lines of `PCT% label`.
    pub fn write_labels(&self, out: &mut dyn Write, num_tests: usize) -> io::Result<()> {
        let histogram = self.histogram();
        let ranked = histogram
            .iter()
            .rev()
            .flat_map(|(count, labels)| labels.iter().map(move |label| (*count, label)))
            .take(MAX_REPORTED_LABELS);
        for (count, label) in ranked {
            writeln!(out, "{:>3}% {}", count * 100 / num_tests.max(1), label)?;
        }
        Ok(())
    }
}
