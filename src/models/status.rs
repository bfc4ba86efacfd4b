use crossterm::style::Color;
use serde::{Deserialize, Serialize};

use crate::ui::theme;

/// Final classification of a single test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestStatus {
    #[default]
    Success,
    Failure,
    Error,
}

impl TestStatus {
    pub fn icon(&self) -> &'static str {
        match self {
            TestStatus::Success => "✔",
            TestStatus::Failure => "✗",
            TestStatus::Error => "E",
        }
    }

    pub fn color(&self) -> Color {
        match self {
            TestStatus::Success => theme::GREEN,
            TestStatus::Failure | TestStatus::Error => theme::RED,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, TestStatus::Success)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_success() {
        assert_eq!(TestStatus::default(), TestStatus::Success);
        assert!(TestStatus::default().is_success());
    }

    #[test]
    fn failures_and_errors_share_alarm_colour() {
        assert_eq!(TestStatus::Failure.color(), TestStatus::Error.color());
        assert_ne!(TestStatus::Success.color(), TestStatus::Failure.color());
        assert_eq!(TestStatus::Error.icon(), "E");
    }
}
