use std::sync::Arc;

use deckmd_api::setup;
use deckmd_api::state::AppState;
use deckmd_api::telemetry;
use deckmd_core::Config;

// Use mimalloc as the global allocator for better performance and lower fragmentation,
// especially when running on musl-based systems inside containers.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenvy::dotenv().ok();
    telemetry::init_telemetry();

    // Load configuration
    let config = Config::from_env()?;
    config.validate()?;

    let state = Arc::new(AppState::new(config.clone()));
    let app = setup::routes::build_router(state);

    // Start the server
    setup::server::start_server(&config, app).await?;

    Ok(())
}
