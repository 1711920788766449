// src/main.rs

use std::process::ExitCode;

use stderr_gate::{cli, logging, run};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    match run_main().await {
        Ok(code) => code,
        Err(err) => {
            // A failed check exits 1; a check that could not be performed
            // must look different to the caller.
            eprintln!("stderr-gate error: {err:?}");
            std::process::abort();
        }
    }
}

async fn run_main() -> anyhow::Result<ExitCode> {
    let args = cli::parse();
    logging::init_logging(args.log_level)?;
    Ok(run(args).await?)
}
