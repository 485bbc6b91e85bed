//! Running an external command bound to a cancellation token.

use std::io;
use std::process::{ExitStatus, Stdio};

use deadline_types::CancelCause;
use thiserror::Error;
use tokio::process::{Child, Command};

use crate::CancelToken;

#[derive(Debug, Error)]
pub enum ExecutionError {
    #[error("failed to start `{program}`: {source}")]
    Spawn { program: String, source: io::Error },
    #[error("failed to wait for `{program}`: {source}")]
    Wait { program: String, source: io::Error },
    #[error("`{program}` failed: {status}")]
    Failed { program: String, status: ExitStatus },
    #[error("`{program}` killed: {cause}")]
    Cancelled { program: String, cause: CancelCause },
}

impl ExecutionError {
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, ExecutionError::Cancelled { .. })
    }
}

/// A program and its arguments. Standard streams are not connected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    program: String,
    args: Vec<String>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Run to completion, or kill the process group as soon as `token` is cancelled.
    ///
    /// Success means the process exited with status zero. A cancelled run always
    /// returns [`ExecutionError::Cancelled`], even if the process happened to exit
    /// cleanly while being killed.
    pub async fn run(self, token: CancelToken) -> Result<(), ExecutionError> {
        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true);
        #[cfg(unix)]
        set_new_session(&mut command);

        let child = command.spawn().map_err(|source| ExecutionError::Spawn {
            program: self.program.clone(),
            source,
        })?;
        let mut guard = ChildGuard::new(child);
        tracing::debug!(program = %self.program, pid = ?guard.pid(), "Spawned supervised command");

        let finished = tokio::select! {
            status = guard.child_mut().wait() => Some(status),
            () = token.cancelled() => None,
        };

        let Some(status) = finished else {
            let cause = token.cause().unwrap_or(CancelCause::Deadline);
            if let Err(e) = guard.terminate().await {
                tracing::warn!(program = %self.program, "Failed to reap killed command: {e}");
            }
            tracing::info!(program = %self.program, %cause, "Supervised command killed");
            return Err(ExecutionError::Cancelled {
                program: self.program,
                cause,
            });
        };
        guard.disarm();

        let status = status.map_err(|source| ExecutionError::Wait {
            program: self.program.clone(),
            source,
        })?;
        if status.success() {
            Ok(())
        } else {
            Err(ExecutionError::Failed {
                program: self.program,
                status,
            })
        }
    }
}

/// RAII guard that kills a child process (and its process group on Unix) on drop.
///
/// Call `disarm()` after the process exits normally to prevent the kill.
struct ChildGuard {
    child: Option<Child>,
}

impl ChildGuard {
    fn new(child: Child) -> Self {
        Self { child: Some(child) }
    }

    fn pid(&self) -> Option<u32> {
        self.child.as_ref().and_then(Child::id)
    }

    fn child_mut(&mut self) -> &mut Child {
        self.child.as_mut().expect("child present")
    }

    fn disarm(&mut self) {
        self.child = None;
    }

    /// Kill now and wait for the process to be reaped.
    async fn terminate(&mut self) -> io::Result<ExitStatus> {
        let Some(mut child) = self.child.take() else {
            return Err(io::Error::other("child already released"));
        };
        kill_tree(&mut child);
        child.wait().await
    }
}

impl Drop for ChildGuard {
    fn drop(&mut self) {
        let Some(child) = self.child.as_mut() else {
            return;
        };
        kill_tree(child);
        let _ = child.try_wait();
    }
}

fn kill_tree(child: &mut Child) {
    #[cfg(unix)]
    {
        if let Some(pid) = child.id()
            && let Ok(pgid) = i32::try_from(pid)
        {
            // SAFETY: killpg only sends a signal; the group was created by `set_new_session`.
            let rc = unsafe { libc::killpg(pgid, libc::SIGKILL) };
            if rc == 0 {
                return;
            }
        }
        let _ = child.start_kill();
    }
    #[cfg(not(unix))]
    {
        let _ = child.start_kill();
    }
}

/// Put the child in its own session so the whole process group can be killed
/// and terminal signals aimed at us do not reach it directly.
#[cfg(unix)]
fn set_new_session(command: &mut Command) {
    // SAFETY: the pre_exec hook only calls async-signal-safe functions.
    unsafe {
        command.pre_exec(|| {
            if libc::setsid() == -1 {
                return Err(io::Error::last_os_error());
            }
            // Linux-only: ensure the child dies if we die before cancelling it.
            #[cfg(target_os = "linux")]
            if libc::prctl(libc::PR_SET_PDEATHSIG, libc::SIGKILL) == -1 {
                return Err(io::Error::last_os_error());
            }
            Ok(())
        });
    }
}
