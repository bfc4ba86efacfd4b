use std::io;

use super::{Renderer, Span, Terminal, theme};
use crate::config::Format;
use crate::models::{Diagnostic, SignatureIndex, TestOutcome, TestStatus, TimeReading};
use crate::source;

const DIVIDER: &str = "-----";

impl<T: Terminal> Renderer<T> {
    /// Write the end-of-run report: totals, then failure and error details.
    pub fn report(&mut self, index: &SignatureIndex) -> io::Result<()> {
        if self.format == Format::Condensed {
            self.blank()?;
        }
        self.blank()?;
        self.heading("Results", theme::BLUE)?;
        self.blank()?;

        self.totals(index)?;
        self.details(index, TestStatus::Failure, "Failures")?;
        self.details(index, TestStatus::Error, "Errors")
    }

    fn totals(&mut self, index: &SignatureIndex) -> io::Result<()> {
        let summary = index.summary();
        let average = TimeReading::classify(summary.average_time());

        self.stat("Tests run: ", Span::raw(summary.tests.to_string()))?;
        self.stat("Assertions made: ", Span::raw(summary.assertions.to_string()))?;
        self.stat(
            "Avg. test time: ",
            Span::styled(average.to_string(), average.severity.color()),
        )?;
        self.stat("Failures: ", alarm_count(summary.failures))?;
        self.stat("Errors: ", alarm_count(summary.errors))
    }

    fn stat(&mut self, label: &str, value: Span) -> io::Result<()> {
        self.line(vec![Span::styled(label, theme::BLUE), value])
    }

    fn heading(&mut self, title: &str, color: crossterm::style::Color) -> io::Result<()> {
        self.line(vec![Span::styled(title, color).bold().underlined()])
    }

    fn details(&mut self, index: &SignatureIndex, status: TestStatus, title: &str) -> io::Result<()> {
        let mut outcomes = index.with_status(status).peekable();
        if outcomes.peek().is_none() {
            return Ok(());
        }

        self.blank()?;
        self.heading(title, theme::RED)?;
        self.blank()?;

        for (i, outcome) in outcomes.enumerate() {
            if i > 0 {
                self.blank()?;
                self.line(vec![Span::raw(DIVIDER)])?;
                self.blank()?;
            }
            self.outcome_detail(outcome)?;
        }
        Ok(())
    }

    fn outcome_detail(&mut self, outcome: &TestOutcome) -> io::Result<()> {
        self.inline(vec![Span::raw(format!("{}::", outcome.suite)).bold()])?;
        self.line(vec![Span::raw(&outcome.test)])?;

        let Some(diagnostic) = outcome.primary_diagnostic() else {
            return Ok(());
        };

        if let Some(location) = diagnostic.location() {
            self.line(vec![Span::styled(&location.file, theme::DARK_GREY)])?;
        }
        self.line(vec![Span::styled(diagnostic.message(), theme::RED)])?;
        self.blank()?;

        if let Some(location) = diagnostic.location() {
            let excerpt = source::lookup(&location.file, location.line).unwrap_or_default();
            self.line(vec![Span::raw(format!("Line {} | {}", location.line, excerpt))])?;
        }

        match diagnostic {
            Diagnostic::Failure { diff: Some(diff), .. } => {
                self.line(vec![Span::styled(
                    format!("Expected: {}", diff.expected),
                    theme::GREEN,
                )])?;
                self.line(vec![Span::styled(format!("Actual:   {}", diff.actual), theme::RED)])?;
            }
            Diagnostic::Failure { diff: None, .. } => {}
            Diagnostic::Error { trace, .. } => {
                if !trace.trim().is_empty() {
                    self.blank()?;
                    for trace_line in trace.lines() {
                        self.line(vec![Span::styled(trace_line, theme::DARK_GREY)])?;
                    }
                }
            }
        }
        Ok(())
    }
}

fn alarm_count(count: usize) -> Span {
    if count > 0 {
        Span::styled(count.to_string(), theme::RED)
    } else {
        Span::raw("0")
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::config::Config;
    use crate::models::{Diff, Location};
    use crate::ui::MemoryTerminal;

    fn render(config: Config, index: &SignatureIndex) -> MemoryTerminal {
        let mut renderer = Renderer::new(&config, MemoryTerminal::new());
        renderer.report(index).unwrap();
        renderer.into_terminal()
    }

    fn plain() -> Config {
        Config {
            colours: false,
            ..Config::default()
        }
    }

    #[test]
    fn totals_for_passing_run() {
        let mut index = SignatureIndex::new();
        let outcome = index.get_or_insert("CalcTest", "testAdd");
        outcome.assertions = 2;
        outcome.duration = 0.01;

        let term = render(plain(), &index);
        assert_eq!(
            term.lines(),
            [
                "",
                "Results",
                "",
                "Tests run: 1",
                "Assertions made: 2",
                "Avg. test time: 10ms",
                "Failures: 0",
                "Errors: 0",
            ]
        );
    }

    #[test]
    fn empty_run_reports_zero_average() {
        let term = render(plain(), &SignatureIndex::new());
        assert!(term.lines().contains(&"Avg. test time: 0ms".to_string()));
    }

    #[test]
    fn condensed_adds_closing_blank_line() {
        let config = Config {
            format: Format::Condensed,
            ..plain()
        };
        let term = render(config, &SignatureIndex::new());
        assert_eq!(term.lines()[..3], ["", "", "Results"]);
    }

    #[test]
    fn failures_show_source_line_and_diff() {
        let mut file = tempfile::Builder::new().suffix(".php").tempfile().unwrap();
        writeln!(file, "<?php\n\nclass CalcTest\n{{\n    public function testAdd()\n    {{").unwrap();
        writeln!(file, "        $this->assertEquals(4, 2 + 3);").unwrap();
        let path = file.path().to_string_lossy().to_string();

        let mut index = SignatureIndex::new();
        index.get_or_insert("CalcTest", "testAdd").record(Diagnostic::Failure {
            message: "Failed asserting that 5 matches expected 4.".into(),
            location: Some(Location {
                file: path.clone(),
                line: 7,
            }),
            diff: Some(Diff {
                expected: "4".into(),
                actual: "5".into(),
            }),
        });

        let lines = render(plain(), &index).lines();
        let failures = lines.iter().position(|l| l == "Failures").unwrap();
        assert_eq!(
            lines[failures..],
            [
                "Failures".to_string(),
                "".into(),
                "CalcTest::testAdd".into(),
                path,
                "Failed asserting that 5 matches expected 4.".into(),
                "".into(),
                "Line 7 | $this->assertEquals(4, 2 + 3);".into(),
                "Expected: 4".into(),
                "Actual:   5".into(),
            ]
        );
        assert!(lines.contains(&"Failures: 1".to_string()));
        assert!(!lines.contains(&"Errors".to_string()));
    }

    #[test]
    fn errors_show_trace_and_tolerate_missing_source() {
        let mut index = SignatureIndex::new();
        for test in ["testDivide", "testModulo"] {
            index.get_or_insert("CalcTest", test).record(Diagnostic::Error {
                message: "Division by zero".into(),
                location: Some(Location {
                    file: "/nonexistent/Calc.php".into(),
                    line: 12,
                }),
                trace: "#0 /nonexistent/CalcTest.php(20): Calc->divide()\n#1 {main}".into(),
            });
        }

        let lines = render(plain(), &index).lines();
        let errors = lines.iter().position(|l| l == "Errors").unwrap();
        assert_eq!(
            lines[errors..],
            [
                "Errors".to_string(),
                "".into(),
                "CalcTest::testDivide".into(),
                "/nonexistent/Calc.php".into(),
                "Division by zero".into(),
                "".into(),
                "Line 12 | ".into(),
                "".into(),
                "#0 /nonexistent/CalcTest.php(20): Calc->divide()".into(),
                "#1 {main}".into(),
                "".into(),
                DIVIDER.into(),
                "".into(),
                "CalcTest::testModulo".into(),
                "/nonexistent/Calc.php".into(),
                "Division by zero".into(),
                "".into(),
                "Line 12 | ".into(),
                "".into(),
                "#0 /nonexistent/CalcTest.php(20): Calc->divide()".into(),
                "#1 {main}".into(),
            ]
        );
    }

    #[test]
    fn failure_without_location_omits_file_and_line() {
        let mut index = SignatureIndex::new();
        index.get_or_insert("CalcTest", "testAdd").record(Diagnostic::Failure {
            message: "nope".into(),
            location: None,
            diff: None,
        });

        let lines = render(plain(), &index).lines();
        let failures = lines.iter().position(|l| l == "Failures").unwrap();
        assert_eq!(lines[failures + 2..], ["CalcTest::testAdd", "nope", ""]);
    }

    #[test]
    fn nonzero_counts_use_alarm_colour() {
        let mut index = SignatureIndex::new();
        index.get_or_insert("CalcTest", "testAdd").record(Diagnostic::Failure {
            message: "nope".into(),
            location: None,
            diff: None,
        });

        let term = render(Config::default(), &index);
        let spans = term.spans();
        let label = spans.iter().position(|s| s.text == "Failures: ").unwrap();
        assert_eq!(spans[label + 1].fg, Some(theme::RED));
        let label = spans.iter().position(|s| s.text == "Errors: ").unwrap();
        assert_eq!(spans[label + 1].fg, None);
    }
}
