//! Overthinklytics: read-only analytics API for the dashboard frontend.
//! Used by: binary entrypoint.

pub mod console;
pub mod error;
pub mod format;
pub mod handlers;
pub mod server;
pub mod state;
pub mod store;
pub mod telemetry;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    console::print_banner();

    let db_path = std::env::var("ANALYTICS_DB").unwrap_or_else(|_| "prisma/dev.db".into());
    let state = state::build_state(&db_path)?;

    match state.store.latest_kpi() {
        Ok(snapshot) => console::print_store_summary(snapshot.as_ref()),
        Err(e) => tracing::warn!(error = %e, "could not read latest snapshot at startup"),
    }

    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8000".into());
    tracing::info!(db = %db_path, "starting overthinklytics on {}", addr);
    console::print_startup(&addr);

    server::run(state, &addr).await?;
    Ok(())
}
