use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use inclusiv_audit::config::{LogFormat, LoggingSettings, Settings};
use inclusiv_audit::core::{Auditor, ScoringPolicy};
use inclusiv_audit::routes::{self, AppState};
use inclusiv_audit::services::{CacheManager, PageFetcher};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Largest JSON body accepted when not configured; inline HTML can be large
const DEFAULT_JSON_LIMIT: usize = 4 * 1024 * 1024;

fn init_tracing(logging: &LoggingSettings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    match logging.log_format() {
        LogFormat::Json => subscriber.json().init(),
        LogFormat::Pretty => subscriber.pretty().init(),
        LogFormat::Compact => subscriber.compact().init(),
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = Settings::load();
    init_tracing(&settings.as_ref().map(|s| s.logging.clone()).unwrap_or_default());

    info!("Starting Inclusiv audit service...");

    let settings = settings.map_err(|e| {
        error!("Failed to load configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    let default_level = settings.default_contrast_level().map_err(|e| {
        error!("Invalid contrast.default_level: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    info!("Configuration loaded successfully");

    let fetcher = PageFetcher::new(
        Duration::from_secs(settings.fetcher.timeout_secs),
        settings.fetcher.max_body_bytes,
        &settings.fetcher.user_agent,
    )
    .map_err(|e| {
        error!("Failed to build HTTP client: {}", e);
        std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
    })?;

    info!(
        "Page fetcher initialized (timeout: {}s, max body: {} bytes)",
        settings.fetcher.timeout_secs, settings.fetcher.max_body_bytes
    );

    let cache_ttl = settings.cache.ttl_secs.unwrap_or(300);
    let l1_cache_size = settings.cache.l1_cache_size.unwrap_or(1000);
    let cache = CacheManager::connect_or_memory(
        settings.cache.redis_url.as_deref(),
        l1_cache_size,
        cache_ttl,
    )
    .await;

    info!(
        "Cache manager initialized (L1: {} entries, TTL: {}s, Redis: {})",
        l1_cache_size,
        cache_ttl,
        cache.has_l2()
    );

    let policy = ScoringPolicy {
        issue_slots: settings.scoring.issue_slots,
    };
    let auditor = Auditor::new(policy, default_level);

    info!("Auditor initialized with {:?}, default level {:?}", policy, default_level);

    let app_state = AppState {
        auditor,
        fetcher: Arc::new(fetcher),
        cache: Arc::new(cache),
    };

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.worker_count();
    let json_limit = settings.server.json_limit_bytes.unwrap_or(DEFAULT_JSON_LIMIT);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(routes::json_config(json_limit))
            .app_data(routes::query_config())
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
