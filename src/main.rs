use clap::Parser;
use enem_search::api::create_router;
use enem_search::api::handlers::AppState;
use enem_search::api::rate_limit::RateLimiter;
use enem_search::utils::{logger, validation::Validate};
use enem_search::{CliConfig, LocalCorpus, SearchEngine, ServerSettings, TomlConfig};
use std::net::SocketAddr;

fn load_settings(cli: &CliConfig) -> enem_search::Result<ServerSettings> {
    match &cli.config {
        Some(path) => {
            let mut config = TomlConfig::from_file(path)?;
            cli.apply_overrides(&mut config);
            config.validate()?;
            ServerSettings::from_provider(&config)
        }
        None => {
            cli.validate()?;
            ServerSettings::from_provider(cli)
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let settings = match load_settings(&cli) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    logger::init_server_logger(cli.verbose, settings.json_logs);

    tracing::info!("Starting enem-search server");
    tracing::info!("📁 Corpus root: {}", settings.corpus_root);
    tracing::info!(
        "🚦 Rate limit: {} requests per {:?} per client",
        settings.rate_limit_max_requests,
        settings.rate_limit_window
    );
    if !settings.request_log_enabled {
        tracing::info!("Request logging disabled");
    }
    tracing::debug!("Resolved settings: {:?}", settings);

    let state = AppState {
        engine: SearchEngine::new(LocalCorpus::new(&settings.corpus_root)),
        rate_limiter: RateLimiter::new(
            settings.rate_limit_max_requests,
            settings.rate_limit_window,
        ),
        request_log_enabled: settings.request_log_enabled,
    };
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(settings.bind_address).await?;
    tracing::info!("✅ Listening on http://{}", listener.local_addr()?);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
