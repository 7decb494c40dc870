use std::io::{BufRead, Write};

use crate::{
    args,
    builtin::ExitCode,
    dispatch::dispatch,
    state::State,
    terminal::write_prompt,
};

/// Reads, dispatches and reports one line at a time until stdin runs dry.
///
/// Returns the status of the last command, which becomes the shell's own
/// exit status.
pub fn repl() -> anyhow::Result<ExitCode> {
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    let mut stderr = std::io::stderr();

    let mut input = String::with_capacity(1024);

    let mut state = State::from_env()?;

    loop {
        input.clear();

        write_prompt(&mut stdout, &state)?;
        stderr.flush()?;

        match stdin.lock().read_line(&mut input) {
            Ok(0) => {
                writeln!(&stdout)?;
                break;
            }
            Ok(_) => {}
            Err(err) => {
                writeln!(&stderr, "Error al leer la entrada: {}", err)?;
                continue;
            }
        }

        let Some(command) = args::parse_line(&input) else {
            continue;
        };

        match dispatch(&mut state, &command, &mut stdout) {
            Ok(outcome) => state.last_exit_code = outcome.exit_code(),
            Err(err) => {
                tracing::debug!(command = %command.command, ?err, "command failed");
                writeln!(&stderr, "Error al ejecutar el comando: {}", err)?;
                state.last_exit_code = err.exit_code();
            }
        }
    }

    Ok(state.last_exit_code)
}
