#![forbid(unsafe_code)]

use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "numgate=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    match numgate::run() {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("numgate: {e}");
            ExitCode::from(2)
        }
    }
}
