// Main entry point for the Milkrun API server

use std::sync::Arc;

use anyhow::{Context, Result};
use server_core::kernel::{ConsoleOtpSender, OtpSender, ServerDeps, TwilioOtpSender};
use server_core::server::build_app;
use server_core::{domains::auth::JwtService, Config};
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use twilio::{TwilioOptions, TwilioService};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,server_core=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Milkrun API");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!("Configuration loaded");

    // Connect to database
    tracing::info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connected");

    // Run migrations
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Migrations complete");

    // Ensure the upload directory exists before serving from it
    tokio::fs::create_dir_all(&config.upload_dir)
        .await
        .with_context(|| format!("Failed to create upload dir {}", config.upload_dir))?;

    // OTP delivery: Twilio SMS when configured, log output otherwise
    let otp_sender: Arc<dyn OtpSender> = match &config.twilio {
        Some(twilio_config) => {
            tracing::info!("OTP delivery via Twilio SMS");
            Arc::new(TwilioOtpSender::new(Arc::new(TwilioService::new(
                TwilioOptions {
                    account_sid: twilio_config.account_sid.clone(),
                    auth_token: twilio_config.auth_token.clone(),
                    from_number: twilio_config.from_number.clone(),
                },
            ))))
        }
        None => {
            tracing::info!("OTP delivery via console log (no Twilio credentials)");
            Arc::new(ConsoleOtpSender)
        }
    };

    let jwt_service = Arc::new(JwtService::new(&config.jwt_secret, config.jwt_issuer.clone()));

    let deps = Arc::new(ServerDeps::new(
        pool,
        jwt_service,
        otp_sender,
        config.admin_contacts.clone(),
        config.upload_dir.clone().into(),
    ));

    // Build application
    let app = build_app(deps, &config.allowed_origins);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Health check: http://localhost:{}/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
