//! Real-time test-run reporter.
//!
//! A host test framework drives a [`app::TestListener`] through the run's
//! lifecycle. The [`app::Presenter`] records every test's outcome and renders
//! live progress and a final report onto a [`ui::Terminal`].

pub mod app;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod runner;
pub mod source;
pub mod ui;

pub use app::{Presenter, TestListener};
pub use config::{Config, Format};
pub use error::{PresenterError, Result};
