use std::path::PathBuf;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tokio::sync::mpsc;

use super::{EventSource, stream::forward_lines};
use crate::app::TestEvent;

/// Guard that kills the child process (and its entire process group) on drop.
struct ChildGuard {
    child: tokio::process::Child,
    /// Process group ID saved at spawn time so we can kill the whole group.
    #[cfg(unix)]
    pgid: Option<u32>,
}

impl ChildGuard {
    fn new(child: tokio::process::Child) -> Self {
        #[cfg(unix)]
        let pgid = child.id();
        Self {
            child,
            #[cfg(unix)]
            pgid,
        }
    }
}

impl Drop for ChildGuard {
    fn drop(&mut self) {
        // Kill the entire process group so workers forked by the host don't become orphans.
        #[cfg(unix)]
        if let Some(pgid) = self.pgid {
            unsafe { libc::kill(-(pgid as libc::pid_t), libc::SIGKILL) };
        }
        let _ = self.child.start_kill();
    }
}

/// Runs the host test command and reads events from its stdout.
pub struct CommandSource {
    program: String,
    args: Vec<String>,
    cwd: PathBuf,
}

impl CommandSource {
    /// `command` is the program followed by its arguments; it must not be empty.
    pub fn new(command: Vec<String>, cwd: PathBuf) -> Result<Self> {
        let mut parts = command.into_iter();
        let program = parts.next().context("no command given")?;
        Ok(Self {
            program,
            args: parts.collect(),
            cwd,
        })
    }
}

#[async_trait]
impl EventSource for CommandSource {
    async fn run(&self, tx: mpsc::UnboundedSender<TestEvent>) -> Result<Option<i32>> {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        tracing::debug!(cmd = ?cmd.as_std(), cwd = ?self.cwd, "spawning test command");

        // Own process group so ChildGuard can take out anything the host forks.
        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            cmd.as_std_mut().process_group(0);
        }

        let mut child = cmd
            .current_dir(&self.cwd)
            .stdin(std::process::Stdio::null())
            .stdout(std::process::Stdio::piped())
            .stderr(std::process::Stdio::piped())
            .spawn()
            .with_context(|| format!("failed to spawn `{}`", self.program))?;

        let stdout = child.stdout.take().context("missing stdout")?;
        let stderr = child.stderr.take().context("missing stderr")?;
        let mut guard = ChildGuard::new(child);

        // Stderr would break in-place line rewriting, so it only goes to the log.
        let stderr_handle = tokio::spawn(async move {
            let mut lines = BufReader::new(stderr).lines();
            while let Ok(Some(line)) = lines.next_line().await {
                tracing::debug!(line, "test command stderr");
            }
        });

        forward_lines(stdout, &tx).await?;
        stderr_handle.await.ok();

        let status = guard
            .child
            .wait()
            .await
            .context("failed to wait for test command")?;
        if !status.success() {
            tracing::info!(code = ?status.code(), "test command exited unsuccessfully");
        }
        Ok(Some(status.code().unwrap_or(-1)))
    }

    fn name(&self) -> &str {
        &self.program
    }
}
