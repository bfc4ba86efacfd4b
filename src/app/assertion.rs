use super::listener::{RaisedCondition, TraceFrame};
use crate::models::{Diagnostic, Diff, Location};

/// Assertions whose first two arguments are the expected and actual values.
const EQUALITY_ASSERTIONS: &[&str] = &["assertEquals", "assertNotEquals"];

/// Find the frame of the assertion call that raised a failure: the frame just
/// inside the first frame belonging to the suite's class.
pub fn assertion_site<'a>(frames: &'a [TraceFrame], suite: &str) -> Option<&'a TraceFrame> {
    frames
        .windows(2)
        .find(|pair| pair[1].class.as_deref() == Some(suite))
        .map(|pair| &pair[0])
}

/// Build a failure diagnostic, locating the assertion within `suite` if possible.
pub fn failure_diagnostic(condition: &RaisedCondition, suite: Option<&str>) -> Diagnostic {
    let site = suite.and_then(|suite| assertion_site(&condition.frames, suite));
    if site.is_none() {
        tracing::debug!(?suite, "no assertion site in failure trace");
    }

    Diagnostic::Failure {
        message: condition.message.clone(),
        location: site.and_then(frame_location),
        diff: site.and_then(equality_diff),
    }
}

pub fn error_diagnostic(condition: &RaisedCondition) -> Diagnostic {
    let location = match (&condition.file, condition.line) {
        (Some(file), Some(line)) => Some(Location {
            file: file.clone(),
            line,
        }),
        _ => None,
    };

    Diagnostic::Error {
        message: condition.message.clone(),
        location,
        trace: condition.trace.clone(),
    }
}

fn frame_location(frame: &TraceFrame) -> Option<Location> {
    Some(Location {
        file: frame.file.clone()?,
        line: frame.line?,
    })
}

fn equality_diff(frame: &TraceFrame) -> Option<Diff> {
    // Frames may carry qualified names such as `Assert::assertEquals`.
    let name = frame
        .function
        .rsplit([':', '.'])
        .next()
        .unwrap_or(&frame.function);
    if !EQUALITY_ASSERTIONS.contains(&name) {
        return None;
    }
    match frame.args.as_slice() {
        [expected, actual, ..] => Some(Diff {
            expected: expected.clone(),
            actual: actual.clone(),
        }),
        _ => None,
    }
}
