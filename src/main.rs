use clap::Parser;
use enrolld::application::{CompletionService, PaymentService};
use enrolld::config::Config;
use enrolld::domain::ports::{
    CatalogStoreRef, CertificateStoreRef, EnrollmentStoreRef, MailerRef, PaymentGatewayRef,
    ProfileStoreRef, SettingsStoreRef,
};
use enrolld::infrastructure::in_memory::{
    InMemoryCatalog, InMemoryCertificateStore, InMemoryEnrollmentStore, InMemoryProfileStore,
    InMemorySettingsStore,
};
use enrolld::infrastructure::mailer::TracingMailer;
use enrolld::infrastructure::paystack::PaystackClient;
use enrolld::interfaces::http::{self, AppState};
use miette::{IntoDiagnostic, Result};
use std::sync::Arc;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Address to bind the HTTP server to (overrides BIND_ADDR)
    #[arg(long)]
    bind: Option<String>,

    /// Path to persistent database (optional). If provided, uses RocksDB;
    /// requires the storage-rocksdb feature.
    #[arg(long)]
    db_path: Option<std::path::PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = Config::from_env().into_diagnostic()?;
    let bind = cli
        .bind
        .clone()
        .unwrap_or_else(|| config.bind_addr.clone());

    let state = build_state(&cli, &config).await.into_diagnostic()?;
    let app = http::router(state);

    let listener = tokio::net::TcpListener::bind(&bind).await.into_diagnostic()?;
    tracing::info!(%bind, "listening");
    axum::serve(listener, app).await.into_diagnostic()?;

    Ok(())
}

fn init_tracing() {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_env("ENROLLD_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn build_state(cli: &Cli, config: &Config) -> enrolld::error::Result<AppState> {
    let gateway: PaymentGatewayRef = Arc::new(PaystackClient::new(
        config.gateway_base_url.clone(),
        config.gateway_timeout,
    )?);
    let mailer: MailerRef = Arc::new(TracingMailer::new(config.mail_from.clone()));
    // Catalog administration is a separate surface; the service starts with
    // an empty in-memory catalog and the fixed combo table.
    let catalog: CatalogStoreRef = Arc::new(InMemoryCatalog::new());

    if let Some(path) = cli.db_path.clone() {
        #[cfg(feature = "storage-rocksdb")]
        {
            use enrolld::infrastructure::retry::{
                DEFAULT_ATTEMPTS, DEFAULT_BASE_DELAY, connect_with_retry,
            };
            use enrolld::infrastructure::rocksdb::RocksDbStore;

            let store =
                connect_with_retry("rocksdb", DEFAULT_ATTEMPTS, DEFAULT_BASE_DELAY, || {
                    let path = path.clone();
                    async move { RocksDbStore::open(path) }
                })
                .await?;

            let enrollments: EnrollmentStoreRef = Arc::new(store.clone());
            let certificates: CertificateStoreRef = Arc::new(store.clone());
            let profiles: ProfileStoreRef = Arc::new(store.clone());
            let settings: SettingsStoreRef = Arc::new(store);
            return Ok(assemble(
                config,
                enrollments,
                certificates,
                profiles,
                settings,
                catalog,
                gateway,
                mailer,
            ));
        }
        #[cfg(not(feature = "storage-rocksdb"))]
        {
            let _ = path;
            return Err(enrolld::error::ServiceError::Config(
                "built without the storage-rocksdb feature; --db-path is unavailable".to_string(),
            ));
        }
    }

    let enrollments: EnrollmentStoreRef = Arc::new(InMemoryEnrollmentStore::new());
    let certificates: CertificateStoreRef = Arc::new(InMemoryCertificateStore::new());
    let profiles: ProfileStoreRef = Arc::new(InMemoryProfileStore::new());
    let settings: SettingsStoreRef = Arc::new(InMemorySettingsStore::new());
    Ok(assemble(
        config,
        enrollments,
        certificates,
        profiles,
        settings,
        catalog,
        gateway,
        mailer,
    ))
}

#[allow(clippy::too_many_arguments)]
fn assemble(
    config: &Config,
    enrollments: EnrollmentStoreRef,
    certificates: CertificateStoreRef,
    profiles: ProfileStoreRef,
    settings: SettingsStoreRef,
    catalog: CatalogStoreRef,
    gateway: PaymentGatewayRef,
    mailer: MailerRef,
) -> AppState {
    let payments = Arc::new(PaymentService::new(
        enrollments.clone(),
        catalog.clone(),
        settings,
        gateway,
        config.gateway_secret.clone(),
    ));
    let completion = Arc::new(CompletionService::new(
        enrollments,
        certificates,
        catalog,
        profiles,
        mailer,
    ));
    AppState {
        payments,
        completion,
        webhook_secret: config.gateway_secret.clone(),
    }
}
