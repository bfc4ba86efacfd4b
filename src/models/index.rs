use std::collections::HashMap;

use super::outcome::{TestOutcome, signature};
use super::status::TestStatus;

/// Insertion-ordered store of outcomes keyed by `suite::test` signature.
#[derive(Debug, Default)]
pub struct SignatureIndex {
    outcomes: Vec<TestOutcome>,
    by_signature: HashMap<String, usize>,
}

impl SignatureIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the outcome for `suite::test` unless one already exists.
    /// Returns true if a new outcome was created.
    pub fn insert(&mut self, suite: &str, test: &str) -> bool {
        let key = signature(suite, test);
        if self.by_signature.contains_key(&key) {
            return false;
        }
        let id = self.outcomes.len();
        self.outcomes.push(TestOutcome::new(suite, test));
        self.by_signature.insert(key, id);
        true
    }

    pub fn get(&self, suite: &str, test: &str) -> Option<&TestOutcome> {
        let id = *self.by_signature.get(&signature(suite, test))?;
        self.outcomes.get(id)
    }

    pub fn get_mut(&mut self, suite: &str, test: &str) -> Option<&mut TestOutcome> {
        let id = *self.by_signature.get(&signature(suite, test))?;
        self.outcomes.get_mut(id)
    }

    /// Look up an outcome, creating it if the test never announced its start.
    pub fn get_or_insert(&mut self, suite: &str, test: &str) -> &mut TestOutcome {
        self.insert(suite, test);
        let id = self.by_signature[&signature(suite, test)];
        &mut self.outcomes[id]
    }

    pub fn iter(&self) -> impl Iterator<Item = &TestOutcome> {
        self.outcomes.iter()
    }

    pub fn with_status(&self, status: TestStatus) -> impl Iterator<Item = &TestOutcome> {
        self.outcomes.iter().filter(move |o| o.status == status)
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn summary(&self) -> RunSummary {
        let mut summary = RunSummary {
            tests: self.outcomes.len(),
            ..RunSummary::default()
        };
        for outcome in &self.outcomes {
            summary.assertions += outcome.assertions;
            summary.total_time += outcome.duration;
            match outcome.status {
                TestStatus::Success => {}
                TestStatus::Failure => summary.failures += 1,
                TestStatus::Error => summary.errors += 1,
            }
        }
        summary
    }
}

/// Aggregate accounting over every outcome in the index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    pub tests: usize,
    pub assertions: u64,
    pub failures: usize,
    pub errors: usize,
    /// Seconds.
    pub total_time: f64,
}

impl RunSummary {
    /// Mean test duration in seconds; zero for an empty run.
    pub fn average_time(&self) -> f64 {
        if self.tests == 0 {
            0.0
        } else {
            self.total_time / self.tests as f64
        }
    }
}
