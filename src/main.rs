use price_scout::config::load_config;
use price_scout::scraper::SourceRegistry;
use price_scout::search::Coordinator;
use price_scout::server::{self, AppState};
use std::env;
use std::sync::Arc;
use tracing::{error, info};

const CONFIG_ENV: &str = "PRICE_SCOUT_CONFIG";

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // Set panic hook to log details about any panic
    std::panic::set_hook(Box::new(|panic_info| {
        error!("😱 Panic occurred: {}", panic_info);
    }));

    let config_path = env::var(CONFIG_ENV).unwrap_or_else(|_| "config.json".to_string());
    let config = match load_config(&config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Config load error ({}): {}", config_path, e);
            return;
        }
    };

    let registry = match SourceRegistry::from_config(&config) {
        Ok(r) => Arc::new(r),
        Err(e) => {
            error!("Failed to build source registry: {}", e);
            return;
        }
    };
    if registry.is_empty() {
        error!("No enabled sources in {}", config_path);
        return;
    }

    info!(
        "🚀 price-scout starting with {} sources, {:?} per source",
        registry.len(),
        config.per_source_timeout()
    );

    let state = AppState {
        coordinator: Arc::new(Coordinator::new(registry, config.per_source_timeout())),
    };

    if let Err(e) = server::serve(&config.bind_addr, state).await {
        error!("Server error: {}", e);
    }
}
