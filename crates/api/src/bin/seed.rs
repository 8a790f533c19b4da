//! Database seeding binary.
//!
//! Usage: `DATABASE_URL=... cargo run --bin civica-seed`
//!
//! Applies migrations and populates roles, a bootstrap admin, the report-type
//! catalog, and sample development data. Safe to run repeatedly.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "civica_api=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = civica_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");

    civica_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    civica_api::seed::seed_all(&pool)
        .await
        .expect("Seeding failed");

    tracing::info!("Seeding complete");
}
