//! Background pipeline execution with persisted progress.
//!
//! A handler validates its input, then hands a [`Pipeline`] to
//! [`spawn_pipeline`]. The pipeline runs on the tokio runtime and reports
//! checkpoints through a [`JobTracker`], which writes every change to the
//! job repository so clients can poll it.
//!
//! Outcome mapping:
//!
//! | pipeline returns | job ends as |
//! |---|---|
//! | `Ok` without fallback reason | completed, `fallback = false` |
//! | `Ok` with fallback reason | completed, `fallback = true` |
//! | `Err` | failed, progress kept |

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::domain::foundation::{DomainError, ErrorCode, ProjectId};
use crate::domain::job::{Checkpoint, GenerationJob, JobKind};
use crate::ports::{JobRepository, ProgressSink, StorageError};

const RESULT_WRITE_ATTEMPTS: u32 = 3;
const RESULT_RETRY_DELAY: Duration = Duration::from_millis(50);

/// Errors a pipeline or handler can end with.
#[derive(Debug, Clone, Error)]
pub enum PipelineError {
    /// A referenced row does not exist.
    #[error("{0}")]
    NotFound(DomainError),

    /// The request itself is unusable.
    #[error("{0}")]
    InvalidInput(String),

    #[error(transparent)]
    Domain(DomainError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl PipelineError {
    pub fn not_found(code: ErrorCode, message: impl Into<String>) -> Self {
        PipelineError::NotFound(DomainError::new(code, message))
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        PipelineError::InvalidInput(message.into())
    }
}

impl From<DomainError> for PipelineError {
    fn from(err: DomainError) -> Self {
        if err.code.is_not_found() {
            PipelineError::NotFound(err)
        } else {
            PipelineError::Domain(err)
        }
    }
}

/// What a pipeline produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOutcome {
    /// Id of the row the pipeline wrote.
    pub target_id: Option<String>,
    /// Set when sample content was written instead of generated content.
    pub fallback_reason: Option<String>,
}

impl PipelineOutcome {
    pub fn generated(target_id: impl ToString) -> Self {
        Self {
            target_id: Some(target_id.to_string()),
            fallback_reason: None,
        }
    }

    pub fn fallback(target_id: impl ToString, reason: impl Into<String>) -> Self {
        Self {
            target_id: Some(target_id.to_string()),
            fallback_reason: Some(reason.into()),
        }
    }

    /// Attaches a fallback reason if one occurred.
    pub fn with_fallback(mut self, reason: Option<String>) -> Self {
        self.fallback_reason = reason;
        self
    }
}

/// A sequence of stages that reports fixed checkpoints.
#[async_trait]
pub trait Pipeline: Send + Sync + 'static {
    fn kind(&self) -> JobKind;

    async fn run(&self, progress: &dyn ProgressSink) -> Result<PipelineOutcome, PipelineError>;
}

/// Persists job progress as a pipeline reports it.
pub struct JobTracker {
    jobs: Arc<dyn JobRepository>,
    job: Mutex<GenerationJob>,
}

impl JobTracker {
    /// Saves `job` and starts tracking it.
    pub async fn start(
        jobs: Arc<dyn JobRepository>,
        job: GenerationJob,
    ) -> Result<Self, DomainError> {
        jobs.save(&job).await?;
        Ok(Self {
            jobs,
            job: Mutex::new(job),
        })
    }

    /// Records the pipeline result as the job's terminal state.
    pub async fn finish(&self, result: Result<PipelineOutcome, PipelineError>) -> GenerationJob {
        let mut job = self.job.lock().await;
        let kind = job.kind();
        let job_id = *job.id();

        let transition = match result {
            Ok(outcome) => {
                match &outcome.fallback_reason {
                    Some(reason) => warn!(
                        %job_id,
                        kind = kind.as_str(),
                        reason = %reason,
                        "pipeline completed with sample content"
                    ),
                    None => info!(%job_id, kind = kind.as_str(), "pipeline completed"),
                }
                job.complete(outcome.target_id, outcome.fallback_reason)
            }
            Err(err) => {
                error!(%job_id, kind = kind.as_str(), error = %err, "pipeline failed");
                job.fail(err.to_string())
            }
        };

        if let Err(err) = transition {
            warn!(%job_id, error = %err, "job already terminal");
        }
        self.persist_terminal(&job).await;
        job.clone()
    }

    /// Fails the job after its pipeline task died without reporting a result.
    async fn abandon(&self, reason: String) -> GenerationJob {
        let mut job = self.job.lock().await;
        error!(job_id = %job.id(), kind = job.kind().as_str(), reason = %reason, "pipeline task aborted");
        if job.fail(reason).is_ok() {
            self.persist_terminal(&job).await;
        }
        job.clone()
    }

    async fn persist_terminal(&self, job: &GenerationJob) {
        let mut delay = RESULT_RETRY_DELAY;
        for attempt in 1..=RESULT_WRITE_ATTEMPTS {
            match self.jobs.update(job).await {
                Ok(()) => return,
                Err(err) if attempt < RESULT_WRITE_ATTEMPTS => {
                    warn!(job_id = %job.id(), attempt, error = %err, "retrying job result write");
                    tokio::time::sleep(delay).await;
                    delay *= 2;
                }
                Err(err) => {
                    error!(job_id = %job.id(), error = %err, "failed to persist job result");
                }
            }
        }
    }
}

#[async_trait]
impl ProgressSink for JobTracker {
    async fn advance(&self, checkpoint: Checkpoint) -> Result<(), DomainError> {
        let mut job = self.job.lock().await;
        job.advance(checkpoint)?;
        self.jobs.update(&job).await?;
        tracing::debug!(
            job_id = %job.id(),
            progress = checkpoint.progress.value(),
            stage = checkpoint.label,
            "checkpoint reached"
        );
        Ok(())
    }

    async fn set_target(&self, target_id: String) -> Result<(), DomainError> {
        let mut job = self.job.lock().await;
        job.set_target(target_id)?;
        self.jobs.update(&job).await
    }
}

/// A job whose pipeline is running in the background.
#[derive(Debug)]
pub struct StartedJob {
    /// The job as it was persisted before the pipeline started.
    pub job: GenerationJob,
    handle: JoinHandle<GenerationJob>,
}

impl StartedJob {
    /// Waits for the pipeline and returns the terminal job.
    pub async fn finished(self) -> Result<GenerationJob, DomainError> {
        self.handle.await.map_err(|e| {
            DomainError::new(ErrorCode::InternalError, format!("Pipeline task aborted: {}", e))
        })
    }
}

/// Persists a pending job and runs `pipeline` on the tokio runtime.
pub async fn spawn_pipeline<P: Pipeline>(
    jobs: Arc<dyn JobRepository>,
    project_id: Option<ProjectId>,
    target_id: Option<String>,
    pipeline: P,
) -> Result<StartedJob, DomainError> {
    let mut job = GenerationJob::new(pipeline.kind(), project_id);
    if let Some(target_id) = target_id {
        job.set_target(target_id)?;
    }

    let tracker = Arc::new(JobTracker::start(jobs, job.clone()).await?);
    info!(job_id = %job.id(), kind = job.kind().as_str(), "pipeline started");

    // The outer task outlives a panicking pipeline and fails its job.
    let runner = tracker.clone();
    let handle = tokio::spawn(async move {
        let run = tokio::spawn(async move {
            let result = pipeline.run(runner.as_ref()).await;
            runner.finish(result).await
        });
        match run.await {
            Ok(job) => job,
            Err(err) => tracker.abandon(format!("Pipeline task aborted: {}", err)).await,
        }
    });

    Ok(StartedJob { job, handle })
}
