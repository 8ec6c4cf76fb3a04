use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use member_search::infrastructure::AppState;
use member_search::{config, db, seed, server};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "member_search=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    // Initialize database
    let db = db::init_db(&config.database_url)
        .await
        .expect("Failed to initialize database");

    if config.seed_demo {
        tracing::info!("Seeding demo data...");
        if let Err(e) = seed::seed_demo_data(&db).await {
            tracing::error!("Failed to seed data: {}", e);
        }
    }

    let state = AppState::with_page_defaults(db, config.page_defaults);
    let app = server::build_router(state, &config.cors_allowed_origins);

    if let Err(e) = server::serve(app, config.port).await {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}
