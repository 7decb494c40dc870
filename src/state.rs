use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::builtin::ExitCode;

/// Everything the shell carries between two input lines.
///
/// The working directory lives here instead of in the process: `cd` only
/// updates `path`, and every child is started inside it.
#[derive(Debug, Clone)]
pub struct State {
    pub path: PathBuf,
    pub last_exit_code: ExitCode,
    home: Option<PathBuf>,
    user: String,
}

impl State {
    pub fn new(path: PathBuf, home: Option<PathBuf>, user: String) -> Self {
        Self {
            path,
            last_exit_code: 0,
            home,
            user,
        }
    }

    /// Captures the directory, `$HOME` and `$USER` of the running process.
    pub fn from_env() -> anyhow::Result<Self> {
        let path = std::env::current_dir().context("Current directory is invalid?")?;

        let home = std::env::var_os("HOME")
            .filter(|h| !h.is_empty())
            .map(PathBuf::from);

        let user = std::env::var("USER").unwrap_or_default();

        Ok(Self::new(path, home, user))
    }

    pub fn home(&self) -> Option<&Path> {
        self.home.as_deref()
    }

    pub fn user(&self) -> &str {
        &self.user
    }
}

#[cfg(test)]
mod test {
    use super::*;

    use pretty_assertions::assert_eq;

    #[test]
    fn starts_clean() {
        let state = State::new("/".into(), None, "u".into());
        assert_eq!(0, state.last_exit_code);
        assert_eq!(None, state.home());
        assert_eq!("u", state.user());
    }

    #[test]
    fn from_env_uses_current_dir() {
        let state = State::from_env().unwrap();
        assert_eq!(std::env::current_dir().unwrap(), state.path);
    }
}
