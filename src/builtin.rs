pub type ExitCode = i32;

use std::{io::ErrorKind, path::PathBuf};

#[derive(thiserror::Error, Debug)]
pub enum Errors {
    #[error("cd: the home directory could not be determined")]
    EnvironmentLookup,
    #[error("cd: {}: {source}", .path.display())]
    DirectoryChange {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Io Error <{0}>")]
    IoError(#[from] std::io::Error),
}

impl Errors {
    /// Status recorded for a command that failed before or while running.
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Errors::Spawn { source, .. } => match source.kind() {
                ErrorKind::NotFound => 127,
                ErrorKind::PermissionDenied => 126,
                _ => 1,
            },
            Errors::EnvironmentLookup | Errors::DirectoryChange { .. } | Errors::IoError(_) => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtins {
    Cd,
    Exit,
}

impl Builtins {
    pub fn supported() -> [(Builtins, &'static str); 2] {
        [(Builtins::Cd, "cd"), (Builtins::Exit, "exit")]
    }

    pub fn from_name(name: &str) -> Option<Builtins> {
        Self::supported()
            .into_iter()
            .find(|(_, n)| *n == name)
            .map(|(b, _)| b)
    }
}

pub mod cd {
    use std::{borrow::Cow, path::PathBuf};

    use crate::state::State;

    use super::Errors;

    /// Moves the session to `rest[0]`, or to the home directory when no
    /// argument is given. Extra arguments are ignored.
    pub fn run(state: &mut State, rest: &[Cow<'_, str>]) -> Result<(), Errors> {
        let target = match rest.first() {
            Some(dir) => state.path.join(&**dir),
            None => state.home().ok_or(Errors::EnvironmentLookup)?.to_path_buf(),
        };

        state.path = resolve(target)?;
        tracing::debug!(path = %state.path.display(), "changed directory");
        Ok(())
    }

    fn resolve(target: PathBuf) -> Result<PathBuf, Errors> {
        let fail = |source| Errors::DirectoryChange {
            path: target.clone(),
            source,
        };

        let canonical = std::fs::canonicalize(&target).map_err(fail)?;
        if !canonical.is_dir() {
            return Err(fail(std::io::Error::other("Not a directory")));
        }
        // stat through the directory to check search permission
        std::fs::metadata(canonical.join(".")).map_err(fail)?;

        Ok(canonical)
    }
}

pub mod exit {
    /// Terminates the shell right away with a success status. Nothing
    /// pending is flushed or dropped; background children are left running.
    pub fn run() -> ! {
        std::process::exit(0)
    }
}
