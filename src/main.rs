use std::net::TcpListener;
use secrecy::ExposeSecret;
use sqlx::postgres::PgPoolOptions;
use std::time::Duration;
use tokio::sync::broadcast::error::RecvError;

use matchday_predictor::run;
use matchday_predictor::config::settings::{get_config, StorageBackend};
use matchday_predictor::db::Stores;
use matchday_predictor::fixtures::FixtureCatalog;
use matchday_predictor::services::{AppServices, SessionEvent};
use matchday_predictor::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Panic if we can't read the config
    let config = get_config().expect("Failed to read the config.");

    let subscriber = get_subscriber(
        "matchday-predictor".into(),
        config.application.log_level.clone(),
        std::io::stdout
    );
    init_subscriber(subscriber);

    let stores = match config.database.backend {
        StorageBackend::Postgres => {
            let connection_pool = PgPoolOptions::new()
                .max_connections(16)
                .acquire_timeout(Duration::from_secs(10))
                .idle_timeout(Duration::from_secs(600))
                .max_lifetime(Duration::from_secs(1800))
                .connect_lazy(
                    config.database.connection_string().expose_secret()
                )
                .expect("Failed to create Postgres connection pool");

            if let Err(e) = sqlx::migrate!("./migrations").run(&connection_pool).await {
                tracing::error!("❌ Failed to migrate the database: {}", e);
                std::process::exit(1);
            }
            Stores::postgres(connection_pool)
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage, data is lost on restart");
            Stores::in_memory()
        }
    };

    let catalog = FixtureCatalog::builtin();
    tracing::info!("Loaded {} fixtures", catalog.len());

    let services = AppServices::new(
        stores,
        catalog,
        config.jwt_settings(),
        config.sign_up_policy(),
        config.scoring,
    );

    let mut session_events = services.session_manager.subscribe();
    tokio::spawn(async move {
        loop {
            match session_events.recv().await {
                Ok(SessionEvent::SignedUp { user_id }) => {
                    tracing::info!(%user_id, "Session event: signed up");
                }
                Ok(SessionEvent::SignedIn { user_id, session_id }) => {
                    tracing::info!(%user_id, %session_id, "Session event: signed in");
                }
                Ok(SessionEvent::SignedOut { user_id, session_id }) => {
                    tracing::info!(%user_id, %session_id, "Session event: signed out");
                }
                Ok(SessionEvent::TokenRefreshed { user_id, session_id }) => {
                    tracing::debug!(%user_id, %session_id, "Session event: token refreshed");
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!("Session event log skipped {} events", skipped);
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    let address = format!("{}:{}", config.application.host, config.application.port);
    let listener = TcpListener::bind(&address)?;
    tracing::info!("Listening on {}", address);

    run(listener, services, config.application.allowed_origins)?.await
}
