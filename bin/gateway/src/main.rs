use linkedin_signin_gateway::{
    AppState, GatewayConfig, auth::SessionStore, config::ProfileStorage, router,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // A missing .env file is fine; the environment may already be set.
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = GatewayConfig::from_env().expect("failed to load configuration");
    tracing::info!(
        storage = ?config.session.storage,
        frontend_origin = %config.frontend_origin(),
        "Loaded configuration"
    );

    let addr = config.bind_address();
    let storage = config.session.storage;
    let cleanup_interval_secs = config.session.cleanup_interval_seconds;

    let app_state = AppState::new(config).expect("invalid configuration");

    if storage == ProfileStorage::Server {
        // Cleanup expired sessions on startup
        let store = app_state.sessions().clone();
        purge_expired(&store, "Cleaned up expired sessions on startup").await;

        // Spawn periodic session cleanup task
        tokio::spawn(async move {
            let mut interval =
                tokio::time::interval(std::time::Duration::from_secs(cleanup_interval_secs));
            loop {
                interval.tick().await;
                purge_expired(&store, "Periodic session cleanup").await;
            }
        });
    }

    let app = router(app_state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind to address");

    tracing::info!("listening on http://{}", addr);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");
}

async fn purge_expired(store: &SessionStore, message: &str) {
    let count = store.delete_expired().await;
    if count > 0 {
        tracing::info!(deleted_sessions = count, "{message}");
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
