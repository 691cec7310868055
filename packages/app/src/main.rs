use std::process::ExitCode;

use chrono::Utc;
use clap::Parser;

use vocab_app::cli::{self, Cli};
use vocab_app::config::Config;
use vocab_app::logging::init_tracing;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = Config::from_env();
    let _log_guard = init_tracing(&config);

    let mut stdout = std::io::stdout().lock();
    match cli::run(cli, &config, &mut stdout, Utc::now()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "command failed");
            ExitCode::FAILURE
        }
    }
}
