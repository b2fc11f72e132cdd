//! desec-apply - reconcile a records directory against deSEC

use colored::Colorize;
use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    match desec_cli::run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\n{} {e:#}", "ERROR:".red().bold());
            ExitCode::FAILURE
        }
    }
}
