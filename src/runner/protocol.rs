//! Newline-delimited JSON form of the lifecycle events.
//!
//! ```text
//! {"type":"suite-started","name":"CalcTest","tests":2}
//! {"type":"test-started","name":"testAdd"}
//! {"type":"test-failed","name":"testAdd","condition":{"message":"...","frames":[...],"trace":"..."}}
//! {"type":"test-finished","name":"testAdd","assertions":1,"duration":0.012}
//! {"type":"suite-finished","name":"CalcTest","tests":2}
//! ```

use serde::Deserialize;

use crate::app::{RaisedCondition, SuiteInfo, TestEvent};
use crate::error::ProtocolError;

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
enum WireEvent {
    /// `tests` is present only for concrete test-case classes.
    SuiteStarted {
        name: String,
        #[serde(default)]
        tests: Option<usize>,
    },
    SuiteFinished {
        name: String,
        #[serde(default)]
        tests: Option<usize>,
    },
    TestStarted {
        name: String,
    },
    TestFinished {
        name: String,
        #[serde(default)]
        assertions: u64,
        #[serde(default)]
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
        #[serde(default)]
        message: String,
    },
    TestIncomplete {
        name: String,
        #[serde(default)]
        message: String,
    },
    TestRisky {
        name: String,
        #[serde(default)]
        message: String,
    },
    TestSkipped {
        name: String,
        #[serde(default)]
        message: String,
    },
}

impl WireEvent {
    fn into_test_event(self) -> TestEvent {
        match self {
            WireEvent::SuiteStarted { name, tests } => TestEvent::SuiteStarted(suite(name, tests)),
            WireEvent::SuiteFinished { name, tests } => TestEvent::SuiteFinished(suite(name, tests)),
            WireEvent::TestStarted { name } => TestEvent::TestStarted { name },
            WireEvent::TestFinished {
                name,
                assertions,
                duration,
            } => TestEvent::TestFinished {
                name,
                assertions,
                duration,
            },
            WireEvent::TestFailed { name, condition } => TestEvent::TestFailed {
                name,
                condition: clean(condition),
            },
            WireEvent::TestErrored { name, condition } => TestEvent::TestErrored {
                name,
                condition: clean(condition),
            },
            WireEvent::TestWarning { name, message } => TestEvent::TestWarning { name, message },
            WireEvent::TestIncomplete { name, message } => {
                TestEvent::TestIncomplete { name, message }
            }
            WireEvent::TestRisky { name, message } => TestEvent::TestRisky { name, message },
            WireEvent::TestSkipped { name, message } => TestEvent::TestSkipped { name, message },
        }
    }
}

fn suite(name: String, tests: Option<usize>) -> SuiteInfo {
    match tests {
        Some(tests) => SuiteInfo::class(name, tests),
        None => SuiteInfo::group(name),
    }
}

/// Host frameworks often colour their messages; the renderer applies its own.
fn clean(mut condition: RaisedCondition) -> RaisedCondition {
    condition.message = strip_ansi(&condition.message);
    condition.trace = strip_ansi(&condition.trace);
    condition
}

/// Decode one line of the stream.
pub fn decode_line(line: &str) -> Result<TestEvent, ProtocolError> {
    serde_json::from_str::<WireEvent>(line)
        .map(WireEvent::into_test_event)
        .map_err(|source| ProtocolError {
            line: line.to_string(),
            source,
        })
}

/// Decode a raw line, passing through anything that isn't an event as output.
/// Blank lines yield nothing.
pub fn parse_line(line: &str) -> Option<TestEvent> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    match decode_line(line) {
        Ok(event) => Some(event),
        Err(e) => {
            if line.starts_with('{') {
                tracing::warn!(error = %e, "malformed event");
            }
            Some(TestEvent::Output {
                line: line.to_string(),
            })
        }
    }
}

/// Strip ANSI escape sequences from a string.
fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            // Skip until we hit a letter (end of escape sequence)
            for c2 in chars.by_ref() {
                if c2.is_ascii_alphabetic() {
                    break;
                }
            }
        } else {
            out.push(c);
        }
    }
    out
}
