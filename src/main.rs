//! Registration server: ensures the database and tables exist, seeds the catalog if asked,
//! then serves the API.

use course_registry::{
    app, ensure_database_exists, ensure_tables, load_courses, seed_courses, AppState,
    EnrollmentService, PgCourseStore, PgEnrollmentStore, Settings,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("course_registry=info,tower_http=info")),
        )
        .init();

    let settings = Settings::from_env()?;
    ensure_database_exists(&settings.database_url).await?;
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .connect(&settings.database_url)
        .await?;

    ensure_tables(&pool, &settings.schema).await?;
    if let Some(path) = &settings.courses_path {
        let courses = load_courses(path).await?;
        let inserted = seed_courses(&pool, &settings.schema, &courses).await?;
        tracing::info!(path = %path.display(), inserted, total = courses.len(), "catalog seeded");
    }

    let service = EnrollmentService::new(
        Arc::new(PgCourseStore::new(pool.clone(), &settings.schema)),
        Arc::new(PgEnrollmentStore::new(pool, &settings.schema)),
    );
    let router = app(AppState::new(service), settings.body_limit);

    let listener = TcpListener::bind(settings.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, router).await?;
    Ok(())
}
