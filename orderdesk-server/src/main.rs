use std::error::Error;
use std::sync::Arc;

use orderdesk_core::{init_tracing, shutdown_signal, Config};
use orderdesk_server::settings::Settings;
use orderdesk_server::store::{MemoryOrderStore, OrderStore, PgOrderStore};
use orderdesk_server::{build_app, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = Config::load("dev")?;
    let settings = Settings::from_config(&config)?;
    init_tracing(settings.json_logs);
    tracing::info!(
        profile = config.profile(),
        production = settings.production,
        "starting orderdesk"
    );

    let mut pg = None;
    let store: Arc<dyn OrderStore> = if settings.database.is_memory() {
        tracing::warn!("using in-memory store, data is lost on exit");
        Arc::new(MemoryOrderStore::seeded())
    } else {
        let store = PgOrderStore::connect(&settings.database).await?;
        if settings.database.setup {
            store.setup().await?;
        }
        pg = Some(store.clone());
        Arc::new(store)
    };

    let app = build_app(AppState::new(store), &settings);

    let addr = settings.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(pg) = pg {
        pg.close().await;
        tracing::info!("database pool closed");
    }
    Ok(())
}
