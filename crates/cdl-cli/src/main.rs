use cdl_core::{logging, orchestrator};

mod cli;

use crate::cli::{Cli, EXIT_INTERRUPTED};

#[tokio::main]
async fn main() {
    // Initialize logging as early as possible.
    if logging::init_logging().is_err() {
        logging::init_logging_stderr();
    }

    if let Err(err) = Cli::run_from_args().await {
        if orchestrator::is_aborted(&err) {
            eprintln!("\ncdl: interrupted, partial file removed");
            std::process::exit(EXIT_INTERRUPTED);
        }
        eprintln!("cdl error: {:#}", err);
        std::process::exit(1);
    }
}
