#![allow(clippy::result_large_err)]

use dotenvy::dotenv;
use relay_bots::{
    bot::{
        framework::run_client,
        pagger::{self, PaggerData},
    },
    config::{discord, webhook::get_webhook_config_path},
    core::webhook::WebhookStore,
    errors::Result,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file, non-fatal since variables can be set externally
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Open (or create) the webhook record
    let config_path = get_webhook_config_path();
    let webhook = WebhookStore::open(&config_path)
        .await
        .inspect(|_| info!("Webhook record ready at {:?}", config_path))
        .inspect_err(|e| error!("Failed to open webhook record: {}", e))?;
    info!("Current webhook target: {}", webhook.get_config().await?.url());

    // 4. Run the bot; the token is read directly before use
    let token = discord::get_bot_token()?;
    let data = PaggerData::new(webhook, reqwest::Client::new());
    run_client(&token, pagger::framework(data, discord::get_dev_guild_id())).await?;

    info!("PaggerBot stopped.");
    Ok(())
}
