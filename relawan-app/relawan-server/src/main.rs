use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use relawan_api::{build_router, AppState, UploadStore};
use relawan_core::services::{AuthService, EventService, SkillService};
use relawan_infrastructure::{
    create_pool, run_migrations, seed_defaults, PgEventRepository, PgReportRepository,
    PgSkillRepository, PgUserRepository, PgVolunteerRepository,
};
use relawan_security::JwtService;
use relawan_shared::config::AppConfig;
use relawan_shared::telemetry::init_telemetry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().context("Failed to load configuration")?;

    // Initialize telemetry; the guard flushes the file writer on exit
    let _log_guard = init_telemetry(&config.logging)?;

    info!("{} starting in {} mode...", config.app.name, config.app.env);

    // Connect to Database
    info!("Connecting to database...");
    let pool = create_pool(&config.database)
        .await
        .context("Failed to connect to database")?;
    run_migrations(&pool).await.context("Failed to run migrations")?;
    info!("Database connection established.");

    if std::env::args().nth(1).as_deref() == Some("seed") {
        let summary = seed_defaults(&pool).await?;
        info!(
            "Seeding done: {} skills inserted, admin created: {}",
            summary.skills_inserted, summary.admin_created
        );
        return Ok(());
    }

    // Repositories
    let users = Arc::new(PgUserRepository::new(pool.clone()));
    let skills = Arc::new(PgSkillRepository::new(pool.clone()));
    let events = Arc::new(PgEventRepository::new(pool.clone()));
    let volunteers = Arc::new(PgVolunteerRepository::new(pool.clone()));
    let reports = Arc::new(PgReportRepository::new(pool));

    // Services
    let jwt = Arc::new(JwtService::new(
        &config.jwt.access_secret,
        &config.jwt.refresh_secret,
        config.jwt.access_token_expiry,
        config.jwt.refresh_token_expiry,
    ));
    let auth_service = AuthService::new(users.clone(), skills.clone(), jwt);
    let event_service = EventService::new(
        events,
        volunteers,
        reports,
        skills.clone(),
        users,
        config.app.utc_offset_hours,
    );
    let skill_service = SkillService::new(skills);

    let uploads = UploadStore::new(&config.app.upload_dir);
    tokio::fs::create_dir_all(uploads.root())
        .await
        .with_context(|| format!("Failed to create upload directory {}", config.app.upload_dir))?;

    // Bind address
    let host: std::net::IpAddr = config.app.host.parse()?;
    let addr = SocketAddr::from((host, config.app.port));

    let state = AppState::new(auth_service, event_service, skill_service, uploads, config);
    let app = build_router(state);

    info!("Listening on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
