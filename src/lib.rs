#![forbid(unsafe_code)]

pub mod cli;
pub mod field;
pub mod format;
pub mod numeric;
pub mod pattern;

/// Run the numgate session replay. Returns exit code (0, 1, or 2).
pub fn run() -> Result<u8, Box<dyn std::error::Error>> {
    use std::io::{self, Write};

    let args = match cli::args::Args::parse() {
        Ok(args) => args,
        Err(err) => {
            err.print()?;
            return Ok(2);
        }
    };

    let report = cli::session::replay(&args)?;
    let output = if args.json {
        let mut json = cli::session::render_json(&report)?;
        json.push('\n');
        json
    } else {
        cli::session::render_human(&report)
    };

    let mut stdout = io::stdout();
    stdout.write_all(output.as_bytes())?;
    stdout.flush()?;

    Ok(if report.error_count > 0 { 1 } else { 0 })
}
