//! Binary entrypoint for the `roster` CLI.

use std::process::ExitCode;

fn main() -> ExitCode {
    // `.env` may carry ROSTER_ACCESS_TOKEN for the live sheets adapter.
    let _ = dotenvy::dotenv();
    match roster::run(std::env::args()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
