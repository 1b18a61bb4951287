//! Shared dependencies for the HTTP adapters.

use std::sync::Arc;

use sqlx::PgPool;

use crate::adapters::http::middleware::AuthState;
use crate::adapters::memory::InMemoryStore;
use crate::adapters::postgres::{
    PostgresDocumentRepository, PostgresJobRepository, PostgresProgressReportRepository,
    PostgresProjectRepository, PostgresProposalRepository, PostgresQualityCheckRepository,
    PostgresSourceCodeRepository, PostgresWorkEstimateRepository,
};
use crate::application::{ContentGenerator, StorageBuckets};
use crate::ports::{
    DocumentRepository, JobRepository, ObjectStorage, ProgressReportRepository,
    ProjectRepository, ProposalRepository, QualityCheckRepository, SourceCodeRepository,
    WorkEstimateRepository,
};

/// One handle per repository port.
#[derive(Clone)]
pub struct Repositories {
    pub projects: Arc<dyn ProjectRepository>,
    pub documents: Arc<dyn DocumentRepository>,
    pub source_codes: Arc<dyn SourceCodeRepository>,
    pub checks: Arc<dyn QualityCheckRepository>,
    pub estimates: Arc<dyn WorkEstimateRepository>,
    pub reports: Arc<dyn ProgressReportRepository>,
    pub proposals: Arc<dyn ProposalRepository>,
    pub jobs: Arc<dyn JobRepository>,
}

impl Repositories {
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            projects: Arc::new(PostgresProjectRepository::new(pool.clone())),
            documents: Arc::new(PostgresDocumentRepository::new(pool.clone())),
            source_codes: Arc::new(PostgresSourceCodeRepository::new(pool.clone())),
            checks: Arc::new(PostgresQualityCheckRepository::new(pool.clone())),
            estimates: Arc::new(PostgresWorkEstimateRepository::new(pool.clone())),
            reports: Arc::new(PostgresProgressReportRepository::new(pool.clone())),
            proposals: Arc::new(PostgresProposalRepository::new(pool.clone())),
            jobs: Arc::new(PostgresJobRepository::new(pool)),
        }
    }

    pub fn in_memory(store: Arc<InMemoryStore>) -> Self {
        Self {
            projects: store.clone(),
            documents: store.clone(),
            source_codes: store.clone(),
            checks: store.clone(),
            estimates: store.clone(),
            reports: store.clone(),
            proposals: store.clone(),
            jobs: store,
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub repos: Repositories,
    pub storage: Arc<dyn ObjectStorage>,
    pub generator: ContentGenerator,
    pub validator: AuthState,
    pub buckets: StorageBuckets,
    /// Prefix for links handed back to clients, without a trailing slash.
    pub public_base_url: String,
}

impl AppState {
    pub fn new(
        repos: Repositories,
        storage: Arc<dyn ObjectStorage>,
        generator: ContentGenerator,
        validator: AuthState,
    ) -> Self {
        Self {
            repos,
            storage,
            generator,
            validator,
            buckets: StorageBuckets::default(),
            public_base_url: String::new(),
        }
    }

    pub fn with_buckets(mut self, buckets: StorageBuckets) -> Self {
        self.buckets = buckets;
        self
    }

    pub fn with_public_base_url(mut self, url: impl Into<String>) -> Self {
        self.public_base_url = url.into().trim_end_matches('/').to_string();
        self
    }
}
