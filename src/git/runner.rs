use crate::error::{ReleaseError, Result};
use crate::git::{GitOutput, GitRunner};
use std::io::Read;
use std::path::Path;
use std::process::{Command, Stdio};
use std::thread;
use std::time::Duration;
use tracing::debug;
use wait_timeout::ChildExt;

/// Runs the system `git` binary
pub struct SystemGit {
    program: String,
}

impl SystemGit {
    pub fn new() -> Self {
        Self::with_program("git")
    }

    /// Use a specific git executable
    pub fn with_program(program: impl Into<String>) -> Self {
        SystemGit {
            program: program.into(),
        }
    }

    /// Spawn a thread draining one of the child's pipes so a chatty process
    /// cannot block on a full pipe while we wait on it
    fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> thread::JoinHandle<String> {
        thread::spawn(move || {
            let mut buf = Vec::new();
            if let Some(mut pipe) = pipe {
                let _ = pipe.read_to_end(&mut buf);
            }
            String::from_utf8_lossy(&buf).into_owned()
        })
    }
}

impl Default for SystemGit {
    fn default() -> Self {
        Self::new()
    }
}

impl GitRunner for SystemGit {
    fn run(&self, working_dir: &Path, args: &[&str], timeout: Duration) -> Result<GitOutput> {
        // Only the subcommand is logged; later arguments may carry credentials.
        let subcommand = args.first().copied().unwrap_or_default();
        let command = format!("git {}", subcommand);
        debug!(subcommand, dir = %working_dir.display(), "running git");

        let mut child = Command::new(&self.program)
            .args(args)
            .current_dir(working_dir)
            .env("GIT_TERMINAL_PROMPT", "0")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| ReleaseError::GitCommand {
                command: command.clone(),
                reason: format!("failed to start '{}': {}", self.program, e),
            })?;

        let stdout = Self::drain(child.stdout.take());
        let stderr = Self::drain(child.stderr.take());

        let status = match child.wait_timeout(timeout)? {
            Some(status) => status,
            None => {
                let _ = child.kill();
                let _ = child.wait();
                // Grandchildren may still hold the pipes open; leave the
                // drain threads detached instead of joining them.
                drop((stdout, stderr));
                return Err(ReleaseError::GitCommand {
                    command,
                    reason: format!("timed out after {}s", timeout.as_secs()),
                });
            }
        };

        let output = GitOutput {
            stdout: stdout.join().unwrap_or_default(),
            stderr: stderr.join().unwrap_or_default(),
        };

        if !status.success() {
            return Err(ReleaseError::GitCommand {
                command,
                reason: format!(
                    "exited with code {}: {}",
                    status.code().unwrap_or(-1),
                    output.stderr.trim()
                ),
            });
        }

        Ok(output)
    }
}
