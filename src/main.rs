use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use job_assistant::api::{create_router, AppState};
use job_assistant::application::{
    ConversationService, RetrievalService, TrendService,
};
use job_assistant::infrastructure::{
    Config, DatasetStore, EmbeddingCache, OpenAiEmbedding, OpenAiGeneration, ResponseGenerator,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenvy::dotenv().ok();

    let config = Config::from_env();
    let store = Arc::new(DatasetStore::load(&config.dataset.path)?);
    info!(postings = store.len(), "dataset ready");

    let provider_timeout = Duration::from_secs(config.llm.timeout_seconds);
    let embedding = Arc::new(OpenAiEmbedding::from_config(&config.embedding));
    let cache = Arc::new(EmbeddingCache::new(
        &config.dataset.embeddings_path,
        embedding.clone(),
        provider_timeout,
    ));
    let retrieval = Arc::new(RetrievalService::new(
        store.clone(),
        cache.clone(),
        embedding,
        config.retrieval.top_k,
        provider_timeout,
    ));
    let trends = Arc::new(TrendService::new(store, config.retrieval.trend_top_k));
    let llm = Arc::new(OpenAiGeneration::new(&config.llm.model));
    let generator = Arc::new(ResponseGenerator::new(llm, provider_timeout));
    let conversation = Arc::new(ConversationService::new(
        retrieval.clone(),
        trends.clone(),
        generator,
    ));

    // Warm the index in the background; /ready reports building until the
    // cold-start sweep (or cache load) finishes.
    {
        let retrieval = retrieval.clone();
        tokio::spawn(async move {
            if let Err(e) = retrieval.warm().await {
                warn!(error = %e, "index warm-up failed");
            }
        });
    }

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);
    let state = AppState::new(conversation, trends, cache, Arc::new(config));
    let app = create_router(state);

    info!("API server listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
