//! Example consumer: serves the registration API from in-memory stores, no database required.
//!
//! Run from repo root: `cargo run -p example-consumer`
//! Set `COURSES_PATH` to a JSON seed file to choose the catalog; otherwise a small default
//! catalog is used. `BIND_ADDR` picks the listen address.

use course_registry::{
    app, load_courses, AppState, EnrollmentService, InMemoryCourseStore, InMemoryEnrollmentStore,
    Settings,
};
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("course_registry=info")),
        )
        .init();

    let settings = Settings::from_env()?;
    let catalog = match &settings.courses_path {
        Some(path) => InMemoryCourseStore::new(load_courses(path).await?),
        None => InMemoryCourseStore::with_names(["Math101", "CS201"]),
    };
    let service =
        EnrollmentService::new(Arc::new(catalog), Arc::new(InMemoryEnrollmentStore::new()));

    let listener = TcpListener::bind(settings.bind_addr).await?;
    tracing::info!("Example consumer listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app(AppState::new(service), settings.body_limit)).await?;
    Ok(())
}
