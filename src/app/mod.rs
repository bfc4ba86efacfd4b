pub mod assertion;
pub mod events;
pub mod listener;

pub use events::{TestEvent, handle_test_event};
pub use listener::{RaisedCondition, SuiteInfo, SuiteKind, TestListener, TraceFrame};

use crate::config::Config;
use crate::error::Result;
use crate::models::SignatureIndex;
use crate::ui::{Renderer, Terminal};

/// Ingests lifecycle callbacks into a [`SignatureIndex`] and drives the renderer.
pub struct Presenter<T: Terminal> {
    index: SignatureIndex,
    renderer: Renderer<T>,
    /// The suite whose tests are currently running.
    suite: Option<SuiteInfo>,
    begun: bool,
}

impl<T: Terminal> Presenter<T> {
    pub fn new(config: &Config, term: T) -> Self {
        Self {
            index: SignatureIndex::new(),
            renderer: Renderer::new(config, term),
            suite: None,
            begun: false,
        }
    }

    pub fn index(&self) -> &SignatureIndex {
        &self.index
    }

    pub fn renderer(&self) -> &Renderer<T> {
        &self.renderer
    }

    pub fn active_suite(&self) -> Option<&SuiteInfo> {
        self.suite.as_ref()
    }

    /// Write the final report. Call once, after the last event.
    pub fn flush(&mut self) -> Result<()> {
        self.renderer.report(&self.index)?;
        Ok(())
    }

    pub fn into_terminal(self) -> T {
        self.renderer.into_terminal()
    }

    fn suite_name(&self, test: &str) -> String {
        match &self.suite {
            Some(suite) => suite.name.clone(),
            None => {
                tracing::warn!(test, "test event outside of any suite");
                String::new()
            }
        }
    }
}

impl<T: Terminal> TestListener for Presenter<T> {
    fn on_suite_start(&mut self, suite: &SuiteInfo) -> Result<()> {
        if !self.begun {
            self.renderer.header()?;
            self.begun = true;
        }
        self.suite = Some(suite.clone());
        self.renderer.suite_header(suite)?;
        Ok(())
    }

    fn on_suite_end(&mut self, _suite: &SuiteInfo) -> Result<()> {
        self.suite = None;
        Ok(())
    }

    fn on_test_start(&mut self, test: &str) -> Result<()> {
        let suite = self.suite_name(test);
        if !self.index.insert(&suite, test) {
            tracing::warn!(suite, test, "test started twice, keeping first record");
        }
        self.renderer.test_started(test)?;
        Ok(())
    }

    fn on_test_end(&mut self, test: &str, assertions: u64, duration: f64) -> Result<()> {
        let suite = self.suite_name(test);
        let outcome = self.index.get_or_insert(&suite, test);
        outcome.assertions = assertions;
        outcome.duration = duration.max(0.0);
        self.renderer.test_finished(outcome)?;
        Ok(())
    }

    fn on_failure(&mut self, test: &str, condition: &RaisedCondition) -> Result<()> {
        let suite = self.suite_name(test);
        let active = self.suite.as_ref().map(|s| s.name.as_str());
        let diagnostic = assertion::failure_diagnostic(condition, active);
        self.index.get_or_insert(&suite, test).record(diagnostic);
        Ok(())
    }

    fn on_error(&mut self, test: &str, condition: &RaisedCondition) -> Result<()> {
        let suite = self.suite_name(test);
        let diagnostic = assertion::error_diagnostic(condition);
        self.index.get_or_insert(&suite, test).record(diagnostic);
        Ok(())
    }
}
