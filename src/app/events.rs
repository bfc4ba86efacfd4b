use super::listener::{RaisedCondition, SuiteInfo, TestListener};
use crate::error::Result;

/// Events streamed from an event source into the presenter.
#[derive(Debug, Clone, PartialEq)]
pub enum TestEvent {
    SuiteStarted(SuiteInfo),
    SuiteFinished(SuiteInfo),
    TestStarted {
        name: String,
    },
    TestFinished {
        name: String,
        assertions: u64,
        duration: f64,
    },
    TestFailed {
        name: String,
        condition: RaisedCondition,
    },
    TestErrored {
        name: String,
        condition: RaisedCondition,
    },
    TestWarning {
        name: String,
        message: String,
    },
    TestIncomplete {
        name: String,
        message: String,
    },
    TestRisky {
        name: String,
        message: String,
    },
    TestSkipped {
        name: String,
        message: String,
    },
    /// A line from the source that isn't an event.
    Output {
        line: String,
    },
}

/// Dispatch one event to the listener.
pub fn handle_test_event(listener: &mut impl TestListener, event: TestEvent) -> Result<()> {
    match event {
        TestEvent::SuiteStarted(suite) => listener.on_suite_start(&suite),
        TestEvent::SuiteFinished(suite) => listener.on_suite_end(&suite),
        TestEvent::TestStarted { name } => listener.on_test_start(&name),
        TestEvent::TestFinished {
            name,
            assertions,
            duration,
        } => listener.on_test_end(&name, assertions, duration),
        TestEvent::TestFailed { name, condition } => listener.on_failure(&name, &condition),
        TestEvent::TestErrored { name, condition } => listener.on_error(&name, &condition),
        TestEvent::TestWarning { name, message } => listener.on_warning(&name, &message),
        TestEvent::TestIncomplete { name, message } => listener.on_incomplete(&name, &message),
        TestEvent::TestRisky { name, message } => listener.on_risky(&name, &message),
        TestEvent::TestSkipped { name, message } => listener.on_skipped(&name, &message),
        TestEvent::Output { line } => {
            tracing::debug!(line, "non-event output");
            Ok(())
        }
    }
}
