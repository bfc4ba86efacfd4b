mod report;
pub mod terminal;
pub mod theme;

use std::io;

pub use terminal::{CrosstermTerminal, MemoryTerminal, Span, Terminal};

use crate::app::{SuiteInfo, SuiteKind};
use crate::config::{Config, Format};
use crate::models::{TestOutcome, TimeReading};

const TITLE: &str = "Running tests";

/// Stateful writer for live progress and the final report.
pub struct Renderer<T: Terminal> {
    term: T,
    format: Format,
    show_times: bool,
    colours: bool,
    hide_successful: bool,
    /// A `[ ] name` placeholder is the last line on screen.
    placeholder: bool,
}

impl<T: Terminal> Renderer<T> {
    pub fn new(config: &Config, term: T) -> Self {
        let format = match config.format {
            Format::Default if !term.supports_rewrite() => {
                tracing::debug!("terminal can't rewrite lines, using feed output");
                Format::Feed
            }
            other => other,
        };
        Self {
            term,
            format,
            show_times: config.effective_show_times(),
            colours: config.colours,
            hide_successful: config.hide_successful,
            placeholder: false,
        }
    }

    /// The output mode actually in use.
    pub fn format(&self) -> Format {
        self.format
    }

    pub fn terminal(&self) -> &T {
        &self.term
    }

    pub fn into_terminal(self) -> T {
        self.term
    }

    pub fn header(&mut self) -> io::Result<()> {
        self.term.clear()?;
        self.line(vec![Span::styled(TITLE, theme::BLUE).bold().underlined()])?;
        self.blank()
    }

    pub fn suite_header(&mut self, suite: &SuiteInfo) -> io::Result<()> {
        self.placeholder = false;
        match suite.kind {
            SuiteKind::Class { tests } => {
                self.blank()?;
                if self.format == Format::Condensed {
                    self.inline(vec![Span::raw(format!("{} ", suite.name)).bold()])
                } else {
                    let count = if tests == 1 {
                        "1 test".to_string()
                    } else {
                        format!("{} tests", tests)
                    };
                    self.line(vec![
                        Span::raw(format!("{} ", suite.name)).bold(),
                        Span::styled(format!("({})", count), theme::YELLOW).bold(),
                    ])
                }
            }
            SuiteKind::Group => self.line(vec![Span::styled(&suite.name, theme::YELLOW).bold()]),
        }
    }

    pub fn test_started(&mut self, test: &str) -> io::Result<()> {
        if self.format == Format::Default && !self.hide_successful {
            self.line(vec![Span::raw(format!("[ ] {}", test))])?;
            self.placeholder = true;
        }
        Ok(())
    }

    pub fn test_finished(&mut self, outcome: &TestOutcome) -> io::Result<()> {
        let rewrite = std::mem::take(&mut self.placeholder);
        if self.hide_successful && outcome.status.is_success() {
            return Ok(());
        }

        let glyph = Span::styled(outcome.status.icon(), outcome.status.color());
        if self.format == Format::Condensed {
            return self.inline(vec![glyph]);
        }

        let mut spans = vec![
            Span::raw("["),
            glyph,
            Span::raw(format!("] {}", outcome.test)),
        ];
        if self.show_times {
            let time = TimeReading::classify(outcome.duration);
            spans.push(Span::raw(" "));
            spans.push(Span::styled(format!("({})", time), time.severity.color()));
        }

        let spans = self.paint(spans);
        if rewrite {
            self.term.rewrite_last_line(&spans)
        } else {
            self.term.line(&spans)
        }
    }

    fn paint(&self, spans: Vec<Span>) -> Vec<Span> {
        if self.colours {
            spans
        } else {
            spans.into_iter().map(Span::plain).collect()
        }
    }

    fn inline(&mut self, spans: Vec<Span>) -> io::Result<()> {
        let spans = self.paint(spans);
        self.term.inline(&spans)
    }

    fn line(&mut self, spans: Vec<Span>) -> io::Result<()> {
        let spans = self.paint(spans);
        self.term.line(&spans)
    }

    fn blank(&mut self) -> io::Result<()> {
        self.term.blank()
    }
}
