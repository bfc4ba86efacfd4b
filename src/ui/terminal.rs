use std::io::{self, Write};

use crossterm::{
    QueueableCommand, cursor,
    style::{self, Color, PrintStyledContent, Stylize},
    terminal::{Clear, ClearType},
    tty::IsTty,
};

/// A run of text with one style.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub fg: Option<Color>,
    pub bold: bool,
    pub underline: bool,
}

impl Span {
    pub fn raw(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn styled(text: impl Into<String>, fg: Color) -> Self {
        Self::raw(text).fg(fg)
    }

    pub fn fg(mut self, color: Color) -> Self {
        self.fg = Some(color);
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn underlined(mut self) -> Self {
        self.underline = true;
        self
    }

    /// Same text, no styling.
    pub fn plain(self) -> Self {
        Self::raw(self.text)
    }

    pub fn is_plain(&self) -> bool {
        self.fg.is_none() && !self.bold && !self.underline
    }
}

/// Line-oriented output the renderer draws onto.
pub trait Terminal {
    /// Clear the screen and home the cursor.
    fn clear(&mut self) -> io::Result<()>;

    /// Write spans without ending the line.
    fn inline(&mut self, spans: &[Span]) -> io::Result<()>;

    /// Write spans and end the line.
    fn line(&mut self, spans: &[Span]) -> io::Result<()>;

    fn blank(&mut self) -> io::Result<()> {
        self.line(&[])
    }

    /// Replace the most recently completed line with `spans`, ending the line.
    fn rewrite_last_line(&mut self, spans: &[Span]) -> io::Result<()>;

    /// Whether `rewrite_last_line` really redraws in place. Callers fall back to
    /// appending when it doesn't.
    fn supports_rewrite(&self) -> bool;
}

/// Terminal over any writer, styled with crossterm escape sequences.
pub struct CrosstermTerminal<W: Write> {
    out: W,
    interactive: bool,
}

impl CrosstermTerminal<io::Stdout> {
    /// Stdout, rewriting lines only when it's a TTY.
    pub fn stdout() -> Self {
        let out = io::stdout();
        let interactive = out.is_tty();
        Self { out, interactive }
    }
}

impl<W: Write> CrosstermTerminal<W> {
    pub fn new(out: W, interactive: bool) -> Self {
        Self { out, interactive }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn queue_spans(&mut self, spans: &[Span]) -> io::Result<()> {
        for span in spans {
            if span.is_plain() {
                self.out.queue(style::Print(&span.text))?;
                continue;
            }
            let mut content = style::style(&span.text);
            if let Some(fg) = span.fg {
                content = content.with(fg);
            }
            if span.bold {
                content = content.bold();
            }
            if span.underline {
                content = content.underlined();
            }
            self.out.queue(PrintStyledContent(content))?;
        }
        Ok(())
    }
}

impl<W: Write> Terminal for CrosstermTerminal<W> {
    fn clear(&mut self) -> io::Result<()> {
        if self.interactive {
            self.out.queue(Clear(ClearType::All))?;
            self.out.queue(cursor::MoveTo(0, 0))?;
        }
        self.out.flush()
    }

    fn inline(&mut self, spans: &[Span]) -> io::Result<()> {
        self.queue_spans(spans)?;
        self.out.flush()
    }

    fn line(&mut self, spans: &[Span]) -> io::Result<()> {
        self.queue_spans(spans)?;
        self.out.queue(style::Print("\n"))?;
        self.out.flush()
    }

    fn rewrite_last_line(&mut self, spans: &[Span]) -> io::Result<()> {
        if self.interactive {
            self.out.queue(cursor::MoveToPreviousLine(1))?;
            self.out.queue(Clear(ClearType::CurrentLine))?;
        }
        self.line(spans)
    }

    fn supports_rewrite(&self) -> bool {
        self.interactive
    }
}

/// Terminal that keeps the rendered text in memory.
#[derive(Debug, Default)]
pub struct MemoryTerminal {
    lines: Vec<String>,
    current: String,
    spans: Vec<Span>,
    clears: usize,
    rewrites: usize,
    rewritable: bool,
}

impl MemoryTerminal {
    /// A memory terminal that can rewrite its last line, like a TTY.
    pub fn new() -> Self {
        Self {
            rewritable: true,
            ..Self::default()
        }
    }

    /// A memory terminal that behaves like a pipe.
    pub fn append_only() -> Self {
        Self::default()
    }

    /// Completed lines, plus the unfinished line if any.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = self.lines.clone();
        if !self.current.is_empty() {
            lines.push(self.current.clone());
        }
        lines
    }

    pub fn text(&self) -> String {
        self.lines().join("\n")
    }

    /// Every span written so far, in order.
    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    pub fn clears(&self) -> usize {
        self.clears
    }

    pub fn rewrites(&self) -> usize {
        self.rewrites
    }

    fn push(&mut self, spans: &[Span]) {
        for span in spans {
            self.current.push_str(&span.text);
        }
        self.spans.extend_from_slice(spans);
    }
}

impl Terminal for MemoryTerminal {
    fn clear(&mut self) -> io::Result<()> {
        self.lines.clear();
        self.current.clear();
        self.clears += 1;
        Ok(())
    }

    fn inline(&mut self, spans: &[Span]) -> io::Result<()> {
        self.push(spans);
        Ok(())
    }

    fn line(&mut self, spans: &[Span]) -> io::Result<()> {
        self.push(spans);
        self.lines.push(std::mem::take(&mut self.current));
        Ok(())
    }

    fn rewrite_last_line(&mut self, spans: &[Span]) -> io::Result<()> {
        if self.rewritable && self.current.is_empty() {
            self.lines.pop();
            self.rewrites += 1;
        }
        self.line(spans)
    }

    fn supports_rewrite(&self) -> bool {
        self.rewritable
    }
}
