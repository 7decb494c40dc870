mod args;
mod builtin;
mod dispatch;
mod process;
mod repl;
mod state;
mod terminal;

use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let code = repl::repl()?;
    std::process::exit(code)
}
