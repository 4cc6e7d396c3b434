use actix_web::{web, HttpServer};
use anyhow::Context;
use log::{error, info, warn};
use std::sync::Arc;

use ps_api::app::{create_app, AppState};
use ps_core::repositories::{InMemoryProfileRepository, ProfileRepository};
use ps_core::services::token::{TokenService, TokenServiceConfig};
use ps_infra::FirestoreProfileRepository;
use ps_shared::config::{AppConfig, StorageBackend};

#[actix_web::main]
async fn main() {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = match AppConfig::from_default_location() {
        Ok(config) => config,
        Err(e) => {
            init_logger("info");
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logger(&config.logging.filter_for(config.environment));

    if let Err(e) = run(config).await {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

/// Initialize logger; `RUST_LOG` takes precedence over `default_filter`
fn init_logger(default_filter: &str) {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or(default_filter));
}

/// Wire the configured profile store and serve until shutdown
async fn run(config: AppConfig) -> anyhow::Result<()> {
    let token_service = TokenService::new(TokenServiceConfig::from(&config.auth.jwt))
        .context("Failed to initialize token service")?;
    let token_service = Arc::new(token_service);

    match config.storage {
        StorageBackend::Firestore => {
            let firestore = config
                .firestore
                .as_ref()
                .context("firestore section is required for the firestore backend")?;
            let repository = FirestoreProfileRepository::from_config(firestore)
                .context("Failed to initialize Firestore client")?;
            info!(
                "Profile store: Firestore {}/{}/{}",
                firestore.project_id, firestore.collection, firestore.document_id
            );
            serve(&config, Arc::new(repository), token_service).await
        }
        StorageBackend::Memory => {
            warn!("Profile store: in-memory, data is lost on restart");
            serve(&config, Arc::new(InMemoryProfileRepository::new()), token_service).await
        }
    }
}

async fn serve<R>(config: &AppConfig, repository: Arc<R>, token_service: Arc<TokenService>) -> anyhow::Result<()>
where
    R: ProfileRepository + 'static,
{
    let app_state = web::Data::new(AppState::new(repository, token_service, &config.auth));
    let cors_config = config.cors.clone();
    let bind_address = config.bind_address();

    info!("Starting profile API server ({})", config.environment);
    if config.auth.allow_token_issuance {
        warn!("Token issuance endpoint is enabled");
    }

    HttpServer::new(move || create_app(app_state.clone(), &cors_config))
        .bind(&bind_address)
        .with_context(|| format!("Failed to bind {}", bind_address))?
        .run()
        .await
        .context("Server error")?;

    info!("Server shut down");
    Ok(())
}
