pub mod command;
pub mod protocol;
pub mod stream;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::app::TestEvent;

pub use command::CommandSource;
pub use stream::StreamSource;

/// Somewhere lifecycle events come from.
#[async_trait]
pub trait EventSource: Send + Sync {
    /// Stream every event over the channel until the source is exhausted.
    /// Returns the exit code of the producing process, if there is one.
    async fn run(&self, tx: mpsc::UnboundedSender<TestEvent>) -> Result<Option<i32>>;

    /// Display name for this source (e.g., "stdin").
    fn name(&self) -> &str;
}

/// Pick the source for the given invocation: a command beats an event file,
/// which beats stdin.
pub fn detect(
    command: Vec<String>,
    events: Option<PathBuf>,
    cwd: PathBuf,
) -> Result<Arc<dyn EventSource>> {
    if !command.is_empty() {
        return Ok(Arc::new(CommandSource::new(command, cwd)?));
    }
    Ok(match events {
        Some(path) => Arc::new(StreamSource::file(path)),
        None => Arc::new(StreamSource::stdin()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_takes_precedence() {
        let source = detect(
            vec!["phpunit".into(), "--log-events".into()],
            Some("events.ndjson".into()),
            PathBuf::from("."),
        )
        .unwrap();
        assert_eq!(source.name(), "phpunit");
    }

    #[test]
    fn falls_back_to_file_then_stdin() {
        let source = detect(Vec::new(), Some("events.ndjson".into()), PathBuf::from(".")).unwrap();
        assert_eq!(source.name(), "file");
        let source = detect(Vec::new(), None, PathBuf::from(".")).unwrap();
        assert_eq!(source.name(), "stdin");
    }
}
