use serde::{Deserialize, Serialize};

use super::status::TestStatus;

/// Everything recorded about one `suite::test` signature over a run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TestOutcome {
    pub suite: String,
    pub test: String,
    pub assertions: u64,
    /// Seconds.
    pub duration: f64,
    pub status: TestStatus,
    pub diagnostics: Vec<Diagnostic>,
}

impl TestOutcome {
    pub fn new(suite: impl Into<String>, test: impl Into<String>) -> Self {
        Self {
            suite: suite.into(),
            test: test.into(),
            ..Self::default()
        }
    }

    pub fn signature(&self) -> String {
        signature(&self.suite, &self.test)
    }

    /// Record a failure or error. The newest classification always wins, but
    /// every diagnostic is kept.
    pub fn record(&mut self, diagnostic: Diagnostic) {
        self.status = diagnostic.status();
        self.diagnostics.push(diagnostic);
    }

    /// The diagnostic to show under the outcome's current status: the first one
    /// of the same kind, falling back to the first recorded.
    pub fn primary_diagnostic(&self) -> Option<&Diagnostic> {
        self.diagnostics
            .iter()
            .find(|d| d.status() == self.status)
            .or_else(|| self.diagnostics.first())
    }
}

pub fn signature(suite: &str, test: &str) -> String {
    format!("{}::{}", suite, test)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub file: String,
    pub line: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diff {
    pub expected: String,
    pub actual: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Diagnostic {
    Failure {
        message: String,
        location: Option<Location>,
        diff: Option<Diff>,
    },
    Error {
        message: String,
        location: Option<Location>,
        trace: String,
    },
}

impl Diagnostic {
    pub fn status(&self) -> TestStatus {
        match self {
            Diagnostic::Failure { .. } => TestStatus::Failure,
            Diagnostic::Error { .. } => TestStatus::Error,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Diagnostic::Failure { message, .. } | Diagnostic::Error { message, .. } => message,
        }
    }

    pub fn location(&self) -> Option<&Location> {
        match self {
            Diagnostic::Failure { location, .. } | Diagnostic::Error { location, .. } => {
                location.as_ref()
            }
        }
    }
}
