use anyhow::Result;
use clap::Parser;
use reqwest::Client;
use tracing::info;

use lead_relay::config::cli::Args;
use lead_relay::config::loader::report_missing_credentials;
use lead_relay::server;
use lead_relay::utils::logging;

#[tokio::main]
async fn main() -> Result<()> {
    // -------------------------------
    // 1. Read .env and arguments
    // -------------------------------

    dotenvy::dotenv().ok();
    let args = Args::parse();
    let log_level = args.log_level;

    // -------------------------------
    // 2. Build config, start logging
    // -------------------------------

    let relay_config = args.into_config()?;
    logging::run(&relay_config.logging, log_level);
    report_missing_credentials(&relay_config);

    // -------------------------------
    // 3. Create request client
    // -------------------------------

    let client = Client::builder().build()?;

    // -------------------------------
    // 4. Serve /submit
    // -------------------------------

    info!(
        port = relay_config.server.port,
        lead_url = %relay_config.crm.lead_url(),
        token_cache = relay_config.token_cache.enabled,
        "Service starting..."
    );
    server::server::start(relay_config, client).await
}
