use std::io::{Stdout, Write};

use crossterm::{
    style::{self, Stylize},
    tty::IsTty,
    QueueableCommand,
};

use crate::state::State;

pub const PROMT: &str = "pshell> ";

pub fn prompt(state: &State) -> String {
    format!("{}:{} {}", state.user(), state.path.display(), PROMT)
}

/// Writes the prompt and flushes. Colors are only used on a terminal.
pub fn write_prompt(stdout: &mut Stdout, state: &State) -> std::io::Result<()> {
    if !stdout.is_tty() {
        write!(stdout, "{}", prompt(state))?;
        return stdout.flush();
    }

    let path = state.path.display().to_string();

    stdout
        .queue(style::PrintStyledContent(state.user().green().bold()))?
        .queue(style::Print(':'))?
        .queue(style::PrintStyledContent(path.blue().bold()))?
        .queue(style::Print(' '))?
        .queue(style::Print(PROMT))?;

    stdout.flush()
}

#[cfg(test)]
mod test {
    use super::*;

    use pretty_assertions::assert_str_eq;

    #[test]
    fn plain_prompt() {
        let state = State::new("/home/u".into(), None, "u".into());
        assert_str_eq!("u:/home/u pshell> ", prompt(&state));
    }

    #[test]
    fn prompt_without_user() {
        let state = State::new("/".into(), None, String::new());
        assert_str_eq!(":/ pshell> ", prompt(&state));
    }
}
