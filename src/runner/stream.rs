use std::path::PathBuf;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::sync::mpsc;

use super::{EventSource, protocol};
use crate::app::TestEvent;

/// Reads events from stdin or a file written by the host framework.
pub struct StreamSource {
    path: Option<PathBuf>,
}

impl StreamSource {
    pub fn stdin() -> Self {
        Self { path: None }
    }

    pub fn file(path: PathBuf) -> Self {
        Self { path: Some(path) }
    }
}

#[async_trait]
impl EventSource for StreamSource {
    async fn run(&self, tx: mpsc::UnboundedSender<TestEvent>) -> Result<Option<i32>> {
        match &self.path {
            Some(path) => {
                let file = tokio::fs::File::open(path)
                    .await
                    .with_context(|| format!("failed to open event file {}", path.display()))?;
                forward_lines(file, &tx).await?;
            }
            None => forward_lines(tokio::io::stdin(), &tx).await?,
        }
        Ok(None)
    }

    fn name(&self) -> &str {
        match self.path {
            Some(_) => "file",
            None => "stdin",
        }
    }
}

/// Decode every line of `reader` and send the resulting events.
pub(crate) async fn forward_lines<R>(reader: R, tx: &mpsc::UnboundedSender<TestEvent>) -> Result<()>
where
    R: AsyncRead + Unpin,
{
    let mut lines = BufReader::new(reader).lines();
    while let Some(line) = lines.next_line().await.context("failed to read event stream")? {
        if let Some(event) = protocol::parse_line(&line)
            && tx.send(event).is_err()
        {
            tracing::debug!("event receiver closed, stopping stream");
            break;
        }
    }
    Ok(())
}
