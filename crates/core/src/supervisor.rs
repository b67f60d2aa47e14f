//! Child process supervision.
//!
//! The [`Supervisor`] owns the table of spawned package processes and is the
//! only component that terminates them. Per-child tasks (stream readers and
//! the exit waiter) never touch shared state; they report back over a single
//! [`ProcessEvent`] channel that the caller's control loop drains, so all
//! mutation of the process table happens on one task.
//!
//! A child exiting, with any code, is not an error here: the exit is recorded
//! and its siblings keep running. The only cancellation path is global
//! shutdown, which interrupts every child once and exits the parent after a
//! fixed grace period without waiting for the children to be reaped.

use std::process::Stdio;
use std::time::Duration;

use colored::Colorize;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;
use tokio::sync::mpsc;

use crate::types::{RunnerError, RunnerResult};
use crate::workspace::{PackageDescriptor, PackageManager};

/// How long to wait after interrupting children before the parent exits.
pub const SHUTDOWN_GRACE: Duration = Duration::from_millis(500);

/// The invocation used to start every selected package.
#[derive(Debug, Clone)]
pub struct RunnerCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl RunnerCommand {
    /// `<pm> run <script>` for the detected package manager.
    pub fn package_script(manager: PackageManager, script: &str) -> Self {
        Self {
            program: manager.program().to_string(),
            args: vec!["run".to_string(), script.to_string()],
        }
    }
}

/// Messages sent from per-child tasks to the control loop.
#[derive(Debug, Clone)]
pub enum ProcessEvent {
    /// One line of child stdout or stderr (captured mode only).
    Output { name: String, chunk: String },
    /// The child exited; `code` is `None` when it was killed by a signal.
    Exited { name: String, code: Option<i32> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessStatus {
    Running,
    Exited(Option<i32>),
}

/// Bookkeeping for one spawned package process. The OS child handle itself
/// is owned by the wait task; the supervisor keeps the pid for signalling.
pub struct ManagedProcess {
    pub name: String,
    pub pid: Option<u32>,
    pub status: ProcessStatus,
    /// Append-only output buffer, never truncated.
    pub log: Vec<String>,
    interrupted: bool,
}

/// Owns every child process spawned for the current invocation.
pub struct Supervisor {
    procs: Vec<ManagedProcess>,
    events_tx: mpsc::UnboundedSender<ProcessEvent>,
}

impl Supervisor {
    /// Create a supervisor plus the receiving half of its event channel.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<ProcessEvent>) {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        (
            Self {
                procs: Vec::new(),
                events_tx,
            },
            events_rx,
        )
    }

    pub fn processes(&self) -> &[ManagedProcess] {
        &self.procs
    }

    pub fn process(&self, name: &str) -> Option<&ManagedProcess> {
        self.procs.iter().find(|p| p.name == name)
    }

    fn process_mut(&mut self, name: &str) -> Option<&mut ManagedProcess> {
        self.procs.iter_mut().find(|p| p.name == name)
    }

    pub fn running_count(&self) -> usize {
        self.procs
            .iter()
            .filter(|p| p.status == ProcessStatus::Running)
            .count()
    }

    /// Spawn `command` with the package directory as working directory and
    /// the parent's environment. With `capture`, stdout and stderr are piped
    /// back as [`ProcessEvent::Output`] lines; without it the child inherits
    /// the parent's streams and output interleaves freely.
    pub fn spawn(
        &mut self,
        descriptor: &PackageDescriptor,
        command: &RunnerCommand,
        capture: bool,
    ) -> RunnerResult<()> {
        let mut cmd = Command::new(&command.program);
        cmd.args(&command.args).current_dir(&descriptor.path);
        if capture {
            cmd.stdin(Stdio::null())
                .stdout(Stdio::piped())
                .stderr(Stdio::piped());
        }

        let mut child = cmd.spawn().map_err(|e| {
            RunnerError::Process(format!(
                "Failed to spawn '{}' for {}: {}",
                command.program, descriptor.name, e
            ))
        })?;

        let pid = child.id();
        let name = descriptor.name.clone();

        if capture {
            if let Some(stdout) = child.stdout.take() {
                forward_output(name.clone(), stdout, self.events_tx.clone());
            }
            if let Some(stderr) = child.stderr.take() {
                forward_output(name.clone(), stderr, self.events_tx.clone());
            }
        }

        // The wait task owns the child handle and reports the exit code.
        let tx = self.events_tx.clone();
        let exited = name.clone();
        tokio::spawn(async move {
            let code = match child.wait().await {
                Ok(status) => status.code(),
                Err(_) => None,
            };
            let _ = tx.send(ProcessEvent::Exited { name: exited, code });
        });

        self.procs.push(ManagedProcess {
            name,
            pid,
            status: ProcessStatus::Running,
            log: Vec::new(),
            interrupted: false,
        });
        Ok(())
    }

    /// Record a child exit reported over the event channel. Siblings are
    /// unaffected; a non-zero code is not an error for the supervisor.
    pub fn record_exit(&mut self, name: &str, code: Option<i32>) {
        if let Some(proc) = self.process_mut(name) {
            proc.status = ProcessStatus::Exited(code);
        }
    }

    /// Append one chunk of output to the named process's buffer.
    pub fn append_log(&mut self, name: &str, chunk: String) {
        if let Some(proc) = self.process_mut(name) {
            proc.log.push(chunk);
        }
    }

    /// Send an interrupt to every still-running child, at most once each.
    /// Returns the names that were signalled this call.
    pub fn interrupt_all(&mut self) -> Vec<String> {
        let mut signalled = Vec::new();
        for proc in &mut self.procs {
            if proc.status != ProcessStatus::Running || proc.interrupted {
                continue;
            }
            proc.interrupted = true;
            if let Some(pid) = proc.pid {
                send_interrupt(pid);
            }
            println!(
                "{} {}",
                format!("[{}]", proc.name).magenta(),
                "Application stopped".red()
            );
            signalled.push(proc.name.clone());
        }
        signalled
    }

    /// Best-effort, time-bounded shutdown: interrupt every child, wait out
    /// the grace period, then exit the parent without confirming that the
    /// children are gone.
    pub async fn shutdown(mut self, grace: Duration) {
        println!("{}", "\nStopping all running applications...".yellow());
        self.interrupt_all();
        tokio::time::sleep(grace).await;
        println!(
            "{}",
            "\nAll applications stopped. Exiting the workspace runner.\n".green()
        );
        std::process::exit(0);
    }
}

fn forward_output(
    name: String,
    stream: impl AsyncRead + Unpin + Send + 'static,
    tx: mpsc::UnboundedSender<ProcessEvent>,
) {
    tokio::spawn(async move {
        let mut lines = BufReader::new(stream).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            let event = ProcessEvent::Output {
                name: name.clone(),
                chunk: line,
            };
            if tx.send(event).is_err() {
                break;
            }
        }
    });
}

#[cfg(unix)]
fn send_interrupt(pid: u32) {
    // SAFETY: plain kill(2) on a pid this supervisor spawned.
    unsafe {
        libc::kill(pid as libc::pid_t, libc::SIGINT);
    }
}

#[cfg(not(unix))]
fn send_interrupt(_pid: u32) {
    // Without a signal to send, shutdown relies on the parent exiting.
}
