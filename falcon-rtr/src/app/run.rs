//! RTR workflow driver

use std::future::Future;
use std::time::Duration;

use colored::Colorize;
use tracing::{error, info};

use crate::app::options::{AppOptions, WorkflowOptions};
use crate::errors::RtrError;
use crate::http::fetch::fetch_raw;
use crate::http::transport::{ReqwestTransport, Transport};
use crate::rtr::client::RtrClient;

/// Run the RTR workflow against the live API
pub async fn run(options: AppOptions) -> Result<serde_json::Value, RtrError> {
    let transport = ReqwestTransport::new(options.workflow.request_timeout)?;
    let mut client = RtrClient::new(options.client_config()?, transport);

    run_workflow(
        &mut client,
        &options.script_name,
        &options.workflow,
        tokio::time::sleep,
    )
    .await
}

/// Run authenticate, open session, run script, then poll the status once.
///
/// Stops at the first failing step. The status document is returned as is;
/// its content is not inspected.
pub async fn run_workflow<T, S, F>(
    client: &mut RtrClient<T>,
    script_name: &str,
    options: &WorkflowOptions,
    sleep_fn: S,
) -> Result<serde_json::Value, RtrError>
where
    T: Transport,
    S: Fn(Duration) -> F,
    F: Future<Output = ()>,
{
    info!("Starting RTR workflow for script {}", script_name);

    step("Authenticating...");
    client.authenticate().await.map_err(|e| fail("Authentication", e))?;
    done("Authenticated");

    step("Initializing RTR session...");
    let session_id = client
        .initialize_session()
        .await
        .map_err(|e| fail("Session initialization", e))?;
    done(&format!("Session ID: {}", session_id));

    step(&format!("Running script {}...", script_name));
    let cloud_request_id = client
        .run_script(script_name)
        .await
        .map_err(|e| fail("Script execution", e))?;
    done(&format!("Cloud request ID: {}", cloud_request_id));

    step(&format!(
        "Waiting {}s before checking command status...",
        options.status_delay.as_secs()
    ));
    sleep_fn(options.status_delay).await;

    let status = client
        .get_command_status()
        .await
        .map_err(|e| fail("Command status", e))?;
    done("Command status retrieved");

    println!();
    println!("Command status:");
    println!("{}", serde_json::to_string_pretty(&status)?);

    Ok(status)
}

/// Fetch `API_URL` and print the raw response body
pub async fn fetch(url: &str, timeout: Duration) -> Result<(), RtrError> {
    let transport = ReqwestTransport::new(timeout)?;

    println!("Fetching data from: {}", url);
    let body = fetch_raw(&transport, url).await?;

    println!("\nAPI Response:");
    println!("{}", body);

    Ok(())
}

fn step(message: &str) {
    println!("{} {}", "[..]".cyan(), message);
}

fn done(message: &str) {
    println!("{} {}", "[OK]".green(), message);
}

fn fail(step: &str, e: RtrError) -> RtrError {
    error!("{} failed: {}", step, e);
    e
}
