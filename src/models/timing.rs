use std::fmt;

use crossterm::style::Color;

use crate::ui::theme;

const WARN_MS: f64 = 400.0;
const DANGER_MS: f64 = 1000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    Millis,
    Secs,
    Mins,
}

impl TimeUnit {
    pub fn suffix(&self) -> &'static str {
        match self {
            TimeUnit::Millis => "ms",
            TimeUnit::Secs => "secs",
            TimeUnit::Mins => "mins",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Ok,
    Warn,
    Danger,
}

impl Severity {
    pub fn color(&self) -> Color {
        match self {
            Severity::Ok => theme::GREEN,
            Severity::Warn => theme::YELLOW,
            Severity::Danger => theme::RED,
        }
    }
}

/// A duration scaled to a readable unit and graded by how slow it is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeReading {
    pub amount: f64,
    pub unit: TimeUnit,
    pub severity: Severity,
}

impl TimeReading {
    pub fn classify(seconds: f64) -> Self {
        let ms = seconds * 1000.0;

        if ms < WARN_MS {
            return Self::new(ms, TimeUnit::Millis, Severity::Ok);
        }
        if ms < DANGER_MS {
            return Self::new(ms, TimeUnit::Millis, Severity::Warn);
        }

        let secs = ms / 1000.0;
        if secs >= 60.0 {
            Self::new(secs / 60.0, TimeUnit::Mins, Severity::Danger)
        } else {
            Self::new(secs, TimeUnit::Secs, Severity::Danger)
        }
    }

    fn new(value: f64, unit: TimeUnit, severity: Severity) -> Self {
        Self {
            amount: round2(value),
            unit,
            severity,
        }
    }
}

impl fmt::Display for TimeReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.unit.suffix())
    }
}

/// Round half away from zero to two decimal places.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
