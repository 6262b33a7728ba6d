use laundry_backend::{build_router, AppConfig, AppState, PostgresUserRepository, TokenConfig};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "laundry_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting laundry backend");

    let config = AppConfig::from_env()?;
    if config.uses_default_secret() {
        warn!("JWT_SECRET not set, signing tokens with the built-in development secret");
    }

    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await?;
    info!("Connected to database");

    // Create shared application state with dependency injection
    let app_state = AppState::new(
        Arc::new(PostgresUserRepository::new(pool)),
        TokenConfig::new(config.jwt_secret.clone(), config.token_expiration_hours),
        config.bcrypt_cost,
    );

    let app = build_router(app_state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!(addr = %config.bind_addr, "Server listening");
    axum::serve(listener, app).await?;

    Ok(())
}
