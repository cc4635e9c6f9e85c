use std::time::Duration;

use tracing::{error, info};

use contest_board::{AccessGate, BoardController, BoardStore, Config};
use contest_board::web::WebServer;

#[tokio::main]
async fn main() {
    // Load configuration
    let config = match Config::load_with_env("config.toml") {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config.toml: {e}");
            eprintln!("Using default configuration.");
            let mut config = Config::default();
            config.apply_env_overrides();
            config
        }
    };

    // Initialize logging
    if let Err(e) = contest_board::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        // Fall back to console-only logging
        contest_board::logging::init_console_only(&config.logging.level);
    }

    if let Err(e) = run(config).await {
        error!("{e}");
        std::process::exit(1);
    }
}

async fn run(config: Config) -> contest_board::Result<()> {
    config.validate()?;

    info!("{}", config.contest.title);

    let store = BoardStore::from_config(&config.backend).await;
    info!(backend = store.backend_name(), "Persistence backend selected");

    let gate = AccessGate::from_config(&config.admin)?;
    let controller = BoardController::new(
        store,
        gate,
        config.server.timezone.clone(),
        Duration::from_secs(config.backend.cache_ttl_secs),
    );

    WebServer::new(&config, controller)?.run().await
}
