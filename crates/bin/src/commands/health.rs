//! Health check command - checks a running Roster server.

use std::{sync::Arc, time::Duration};

use roster::{ApiClient, client::MemorySession};

use crate::{
    cli::HealthArgs,
    output::{self, OutputFormat},
};

/// Run the health check command
pub async fn run(
    args: &HealthArgs,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let timeout = Duration::from_secs(args.timeout);
    let http = reqwest::Client::builder().timeout(timeout).build()?;
    let client =
        ApiClient::with_http_client(args.url.clone(), Arc::new(MemorySession::new()), http);

    match client.health().await {
        Ok(health) if health.status == "healthy" => {
            match format {
                OutputFormat::Human => println!("healthy: {} users", health.users),
                OutputFormat::Json => output::print_json(&health)?,
            }
            Ok(())
        }
        Ok(health) => {
            eprintln!("unhealthy: server returned status {}", health.status);
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("unhealthy: {} ({})", e, client.base_url());
            std::process::exit(1);
        }
    }
}
