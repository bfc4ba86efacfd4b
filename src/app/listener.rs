use serde::Deserialize;

use crate::error::Result;

/// A suite as announced by the host framework.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuiteInfo {
    pub name: String,
    pub kind: SuiteKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuiteKind {
    /// A concrete test-case class with a known number of tests.
    Class { tests: usize },
    /// A logical grouping of other suites.
    Group,
}

impl SuiteInfo {
    pub fn class(name: impl Into<String>, tests: usize) -> Self {
        Self {
            name: name.into(),
            kind: SuiteKind::Class { tests },
        }
    }

    pub fn group(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: SuiteKind::Group,
        }
    }
}

/// One frame of a raised condition's call stack, innermost first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TraceFrame {
    #[serde(default)]
    pub class: Option<String>,
    pub function: String,
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default)]
    pub line: Option<u32>,
    /// Call arguments rendered as text.
    #[serde(default)]
    pub args: Vec<String>,
}

/// A failure or error raised by a test.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RaisedCondition {
    pub message: String,
    /// Where the condition was raised.
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default)]
    pub line: Option<u32>,
    #[serde(default)]
    pub frames: Vec<TraceFrame>,
    /// Full textual trace.
    #[serde(default)]
    pub trace: String,
}

/// Lifecycle callbacks a host test framework drives, one at a time, in the
/// order suite start, (test start, failures/errors, test end)*, suite end.
pub trait TestListener {
    fn on_suite_start(&mut self, suite: &SuiteInfo) -> Result<()>;

    fn on_suite_end(&mut self, suite: &SuiteInfo) -> Result<()>;

    fn on_test_start(&mut self, test: &str) -> Result<()>;

    /// `duration` is in seconds.
    fn on_test_end(&mut self, test: &str, assertions: u64, duration: f64) -> Result<()>;

    fn on_failure(&mut self, test: &str, condition: &RaisedCondition) -> Result<()>;

    fn on_error(&mut self, test: &str, condition: &RaisedCondition) -> Result<()>;

    fn on_warning(&mut self, _test: &str, _message: &str) -> Result<()> {
        Ok(())
    }

    fn on_incomplete(&mut self, _test: &str, _message: &str) -> Result<()> {
        Ok(())
    }

    fn on_risky(&mut self, _test: &str, _message: &str) -> Result<()> {
        Ok(())
    }

    fn on_skipped(&mut self, _test: &str, _message: &str) -> Result<()> {
        Ok(())
    }
}
