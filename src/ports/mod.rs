//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## External Services
//!
//! - `AIProvider` - Text generation (OpenAI, Anthropic, failover, mock)
//! - `ObjectStorage` - Uploaded files and rendered proposals
//! - `SessionValidator` - Bearer token validation
//!
//! ## Repositories
//!
//! One port per aggregate, each with PostgreSQL and in-memory adapters.
//!
//! ## Pipeline Support
//!
//! - `ProgressSink` - Where pipelines report their checkpoints

mod ai_provider;
mod document_repository;
mod job_repository;
mod object_storage;
mod progress_report_repository;
mod progress_sink;
mod project_repository;
mod proposal_repository;
mod quality_check_repository;
mod session_validator;
mod source_code_repository;
mod work_estimate_repository;

pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, Message,
    MessageRole, ProviderInfo, RequestMetadata, TokenUsage,
};
pub use document_repository::DocumentRepository;
pub use job_repository::JobRepository;
pub use object_storage::{validate_key, ObjectStorage, StorageError, StoredObject};
pub use progress_report_repository::ProgressReportRepository;
pub use progress_sink::{NoopProgress, ProgressSink};
pub use project_repository::ProjectRepository;
pub use proposal_repository::ProposalRepository;
pub use quality_check_repository::QualityCheckRepository;
pub use session_validator::SessionValidator;
pub use source_code_repository::SourceCodeRepository;
pub use work_estimate_repository::WorkEstimateRepository;
