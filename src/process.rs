use std::{
    borrow::Cow,
    io::Write,
    path::PathBuf,
    process::{Child, Command, ExitStatus, Stdio},
    sync::mpsc,
    thread::{self, JoinHandle},
};

use crate::{
    builtin::{Errors, ExitCode},
    dispatch::Outcome,
    state::State,
};

pub const BACKGROUND_NOTICE: &str = "Proceso en segundo plano iniciado";

pub fn notice(pid: u32) -> String {
    format!("[PID: {pid}] {BACKGROUND_NOTICE}")
}

/// Runs `com` with the shell's own stdin/stdout/stderr.
///
/// In the foreground the call blocks until the child exits and its status is
/// handed back as-is. In the background the child is passed to a [`Watcher`],
/// the notice line is written to `stdout` and the call returns right away.
pub fn run_external(
    state: &State,
    com: &str,
    rest: &[Cow<'_, str>],
    background: bool,
    stdout: &mut dyn Write,
) -> Result<Outcome, Errors> {
    let mut cmd = command(state, com, rest);

    if background {
        run_background(com, &mut cmd, stdout)
    } else {
        run_foreground(com, &mut cmd).map(Outcome::Foreground)
    }
}

fn command(state: &State, com: &str, rest: &[Cow<'_, str>]) -> Command {
    let mut cmd = Command::new(program(state, com));
    cmd.args(rest.iter().map(AsRef::<str>::as_ref))
        .current_dir(&state.path)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());
    cmd
}

/// Bare names are looked up in `PATH`, relative paths start at the session
/// directory.
fn program(state: &State, com: &str) -> PathBuf {
    let path = PathBuf::from(com);
    if com.contains('/') && path.is_relative() {
        state.path.join(path)
    } else {
        path
    }
}

fn spawn(com: &str, cmd: &mut Command) -> Result<Child, Errors> {
    cmd.spawn().map_err(|source| Errors::Spawn {
        command: com.to_string(),
        source,
    })
}

fn run_foreground(com: &str, cmd: &mut Command) -> Result<ExitStatus, Errors> {
    let mut child = spawn(com, cmd)?;
    let pid = child.id();
    tracing::debug!(pid, command = com, "foreground process started");

    let status = child.wait()?;
    tracing::debug!(pid, %status, "foreground process finished");

    Ok(status)
}

fn run_background(
    com: &str,
    cmd: &mut Command,
    stdout: &mut dyn Write,
) -> Result<Outcome, Errors> {
    let child = spawn(com, cmd)?;
    let pid = child.id();
    tracing::debug!(pid, command = com, "background process started");

    Watcher::spawn(child).detach();

    // the child is already running, a lost notice does not undo that
    if let Err(err) = writeln!(stdout, "{}", notice(pid)).and_then(|()| stdout.flush()) {
        tracing::warn!(pid, %err, "unable to write the background notice");
    }

    Ok(Outcome::Background { pid })
}

/// Owns the one and only wait on a background child.
///
/// The wait happens on a thread of its own, so the shell never blocks on it.
/// Whatever the wait returns is logged and thrown away.
#[derive(Debug)]
pub struct Watcher {
    handle: Option<JoinHandle<()>>,
}

impl Watcher {
    pub fn spawn(child: Child) -> Self {
        let pid = child.id();
        let (tx, rx) = mpsc::channel::<Child>();

        let started = thread::Builder::new()
            .name(format!("reaper-{pid}"))
            .spawn(move || {
                if let Ok(child) = rx.recv() {
                    reap(child);
                }
            });

        match started {
            Ok(handle) => match tx.send(child) {
                Ok(()) => Self {
                    handle: Some(handle),
                },
                Err(mpsc::SendError(child)) => Self::inline(child),
            },
            Err(err) => {
                tracing::warn!(pid, %err, "unable to start a watcher thread, waiting inline");
                Self::inline(child)
            }
        }
    }

    // the child must still be reaped, even if it costs a blocking wait
    fn inline(child: Child) -> Self {
        reap(child);
        Self { handle: None }
    }

    /// Lets the watcher run on its own. The child is still reaped when it
    /// exits; nobody is told about it.
    pub fn detach(self) {
        drop(self.handle);
    }

    #[cfg(test)]
    pub fn join(self) {
        if let Some(handle) = self.handle {
            handle.join().expect("watcher thread panicked");
        }
    }
}

fn reap(mut child: Child) {
    let pid = child.id();
    match child.wait() {
        Ok(status) => tracing::debug!(pid, %status, "background process reaped"),
        Err(err) => tracing::debug!(pid, %err, "waiting on background process failed"),
    }
}

/// Shell status for a finished child: its exit code, or `128 + signal`.
pub fn status_code(status: ExitStatus) -> ExitCode {
    if let Some(code) = status.code() {
        return code;
    }
    terminated_by_signal(status)
}

#[cfg(unix)]
fn terminated_by_signal(status: ExitStatus) -> ExitCode {
    use std::os::unix::process::ExitStatusExt;
    match status.signal() {
        Some(signal) => 128 + signal,
        None => 1,
    }
}

#[cfg(not(unix))]
fn terminated_by_signal(_status: ExitStatus) -> ExitCode {
    1
}
