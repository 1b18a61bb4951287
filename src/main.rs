//! Project Pilot server entry point.

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use project_pilot::adapters::ai::{
    AnthropicConfig, AnthropicProvider, FailoverAIProvider, MockAIProvider, OpenAIConfig,
    OpenAIProvider,
};
use project_pilot::adapters::auth::{JwtConfig, JwtSessionValidator};
use project_pilot::adapters::http::{build_router, AppState, Repositories, RouterConfig};
use project_pilot::adapters::storage::LocalObjectStorage;
use project_pilot::application::{ContentGenerator, StorageBuckets};
use project_pilot::config::{AiConfig, AiProvider, AppConfig};
use project_pilot::ports::AIProvider as AIProviderPort;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("loading configuration")?;
    config.validate().context("validating configuration")?;

    init_tracing(&config);

    let addr = config.server.socket_addr()?;

    let pool = config
        .database
        .pool_options()
        .connect(&config.database.url)
        .await
        .context("connecting to database")?;

    if config.database.run_migrations {
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("running migrations")?;
        tracing::info!("migrations applied");
    }

    let provider = build_provider(&config.ai)?;
    let generator = ContentGenerator::new(provider).with_max_tokens(config.ai.max_tokens);
    tracing::info!(provider = %generator.provider_name(), "AI provider ready");

    let storage = Arc::new(LocalObjectStorage::new(
        config.storage.root_path.clone(),
        config.storage.public_base_url.clone(),
    ));
    let validator = Arc::new(JwtSessionValidator::new(JwtConfig::new(
        config.auth.jwt_secret.clone(),
        config.auth.jwt_audience.clone(),
    )));

    let state = AppState::new(Repositories::postgres(pool), storage, generator, validator)
        .with_buckets(StorageBuckets {
            uploads: config.storage.uploads_bucket.clone(),
            proposals: config.storage.proposals_bucket.clone(),
        })
        .with_public_base_url(config.server.public_base_url.clone());

    let router = build_router(
        state,
        &RouterConfig {
            request_timeout: config.server.request_timeout(),
            cors_origins: config.server.cors_origins_list(),
        },
    );

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    tracing::info!(%addr, environment = ?config.server.environment, "listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if config.is_production() {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn provider_for(kind: AiProvider, ai: &AiConfig) -> anyhow::Result<Arc<dyn AIProviderPort>> {
    let provider: Arc<dyn AIProviderPort> = match kind {
        AiProvider::OpenAI => {
            let key = ai.openai_api_key.clone().unwrap_or_default();
            Arc::new(OpenAIProvider::new(
                OpenAIConfig::new(key)
                    .with_model(ai.openai_model.clone())
                    .with_timeout(ai.timeout())
                    .with_max_retries(ai.max_retries),
            )?)
        }
        AiProvider::Anthropic => {
            let key = ai.anthropic_api_key.clone().unwrap_or_default();
            Arc::new(AnthropicProvider::new(
                AnthropicConfig::new(key)
                    .with_model(ai.anthropic_model.clone())
                    .with_timeout(ai.timeout())
                    .with_max_retries(ai.max_retries),
            )?)
        }
        AiProvider::Mock => {
            tracing::warn!("using mock AI provider; pipelines return canned replies");
            Arc::new(MockAIProvider::new())
        }
    };
    Ok(provider)
}

fn build_provider(ai: &AiConfig) -> anyhow::Result<Arc<dyn AIProviderPort>> {
    let primary = provider_for(ai.primary_provider, ai)?;
    match ai.fallback_provider {
        Some(kind) if kind != ai.primary_provider => {
            let failover = FailoverAIProvider::new(primary).with_fallback(provider_for(kind, ai)?);
            Ok(Arc::new(failover))
        }
        _ => Ok(primary),
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
    tracing::info!("shutting down");
}
