use std::{io::Write, process::ExitStatus};

use crate::{
    args::Command,
    builtin::{cd, exit, Builtins, Errors, ExitCode},
    process,
    state::State,
};

/// What a successfully dispatched command left behind.
#[derive(Debug)]
pub enum Outcome {
    Builtin,
    /// The child ran to completion. Any exit code counts as success here.
    Foreground(ExitStatus),
    /// The child is running, watched by its own reaper.
    Background { pid: u32 },
}

impl Outcome {
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Outcome::Builtin | Outcome::Background { .. } => 0,
            Outcome::Foreground(status) => process::status_code(*status),
        }
    }
}

/// Routes a parsed command to `cd`, `exit` or an external program.
///
/// Errors come back exactly as the handler produced them. `exit` does not
/// return.
pub fn dispatch(
    state: &mut State,
    command: &Command<'_>,
    stdout: &mut dyn Write,
) -> Result<Outcome, Errors> {
    match Builtins::from_name(&command.command) {
        Some(Builtins::Cd) => cd::run(state, &command.args).map(|()| Outcome::Builtin),
        Some(Builtins::Exit) => exit::run(),
        None => process::run_external(
            state,
            &command.command,
            &command.args,
            command.background,
            stdout,
        ),
    }
}
