#![allow(clippy::result_large_err)]

use dotenvy::dotenv;
use relay_bots::{
    bot::{
        framework::run_client,
        pyro::{self, PyroData},
    },
    config::{database, discord},
    core::panel::{self, PANEL_TIMEOUT},
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

    // 3. Initialize database and tables
    let db = database::init_db(&database::get_database_url())
        .await
        .inspect(|_| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to initialize database: {}", e))?;

    // 4. Run the bot; the token is read directly before use
    let token = discord::get_bot_token()?;
    let data = PyroData::new(db.clone(), panel::http_client(PANEL_TIMEOUT)?);
    let outcome = run_client(&token, pyro::framework(data, discord::get_dev_guild_id())).await;

    // 5. Release the database whether the client stopped cleanly or not
    db.close()
        .await
        .inspect(|_| info!("Database connection closed."))
        .inspect_err(|e| error!("Failed to close database: {}", e))?;

    outcome
}
