//! Entry point: load config, open the database, and run the server.

use trainecg_api::auth::TokenIssuer;
use trainecg_api::config::Config;
use trainecg_api::db;
use trainecg_api::{create_app, AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::from_env().map_err(|e| anyhow::anyhow!("config: {}", e))?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))?;
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    if config.uses_default_secret() {
        tracing::warn!("JWT_SECRET is not set; using the built-in development secret");
    }

    let db_pool = db::create_pool(&config.database_path).await?;
    db::init_schema(&db_pool).await?;
    tracing::info!(path = %config.database_path.display(), "database ready");

    let token_issuer = TokenIssuer::from_minutes(&config.jwt_secret, config.token_ttl_minutes);
    let state = AppState::new(db_pool, token_issuer);
    let app = create_app(state);

    tracing::info!(addr = %config.server_addr, "listening");
    let listener = tokio::net::TcpListener::bind(config.server_addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
