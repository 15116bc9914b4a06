//! Falcon RTR - Entry Point
//!
//! Runs a cloud script on a device through real-time response and prints the
//! command status.

use std::env;

use falcon_rtr::app::options::{api_url, log_options, AppOptions, WorkflowOptions};
use falcon_rtr::app::run::{fetch, run};
use falcon_rtr::errors::{exit_codes, RtrError};
use falcon_rtr::logs::init_logging;
use falcon_rtr::utils::{parse_cli_args, version_info};

use tracing::{debug, error, info};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli_args = parse_cli_args(env::args().skip(1));

    // Print version and exit
    if cli_args.contains_key("version") {
        match serde_json::to_string_pretty(&version_info()) {
            Ok(version) => println!("{}", version),
            Err(e) => eprintln!("Failed to serialize version info: {e}"),
        }
        return;
    }

    // Load .env before reading any configuration
    let dotenv_result = dotenv::dotenv();

    let lookup = |key: &str| env::var(key).ok();
    if let Err(e) = init_logging(&log_options(lookup, &cli_args)) {
        eprintln!("Failed to initialize logging: {e}");
    }
    match dotenv_result {
        Ok(path) => debug!("Loaded environment from {:?}", path),
        Err(e) => debug!("No .env file loaded: {}", e),
    }

    let result = if cli_args.contains_key("fetch") {
        run_fetch(lookup).await
    } else {
        run_rtr(lookup, &cli_args).await
    };

    match result {
        Ok(()) => std::process::exit(exit_codes::SUCCESS),
        Err(e) => {
            error!("{}", e);
            eprintln!("\n[ERROR] {}", e);
            std::process::exit(e.exit_code());
        }
    }
}

async fn run_rtr<F>(
    lookup: F,
    cli_args: &std::collections::HashMap<String, String>,
) -> Result<(), RtrError>
where
    F: Fn(&str) -> Option<String>,
{
    let options = AppOptions::from_lookup(lookup, cli_args)?;
    info!(
        "Running script {} on device {}",
        options.script_name,
        options.device_id.as_deref().unwrap_or("<unset>")
    );

    run(options).await?;
    Ok(())
}

async fn run_fetch<F>(lookup: F) -> Result<(), RtrError>
where
    F: Fn(&str) -> Option<String>,
{
    let url = api_url(lookup)?;
    fetch(&url, WorkflowOptions::default().request_timeout).await
}
