use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use pingpair::config::Settings;
use pingpair::core::{CompatibilityScorer, CultureTable, Matcher, SessionScheduler};
use pingpair::routes::{self, handle_json_payload_error, handle_query_payload_error, AppState};
use pingpair::services::MemoryStore;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

fn init_logging(level: &str, format: &str) {
    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()));
        }
    };

    init_logging(&settings.logging.level, &settings.logging.format);

    info!("Starting PingPair matching service...");

    let weights = settings.scoring_weights();
    if weights.timezone < 0.0 || weights.cultural < 0.0 {
        error!("Scoring weights must not be negative: {:?}", weights);
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "negative scoring weights",
        ));
    }

    let cultures = CultureTable::builtin();
    if cultures.is_empty() {
        warn!("Culture table is empty, every pair will score a neutral cultural match");
    } else {
        info!("Loaded culture table with {} countries", cultures.len());
    }

    let matcher = Matcher::new(
        CompatibilityScorer::new(weights, cultures),
        SessionScheduler::new(settings.scheduling.meeting_link_base.clone()),
    );

    info!(
        "Matcher initialized with weights: {:?}, meeting links under {}",
        matcher.scorer().weights(),
        matcher.scheduler().meeting_link_base()
    );

    let store = Arc::new(MemoryStore::new(
        settings.store.capacity,
        settings.store.session_ttl_secs,
    ));

    info!(
        "In-memory store initialized (capacity: {}, session TTL: {}s)",
        settings.store.capacity, settings.store.session_ttl_secs
    );

    let app_state = AppState { store, matcher };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
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
