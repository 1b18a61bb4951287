//! StartQualityCheckHandler - reviews a project's documents and source codes.
//!
//! Checkpoints: 20 artifacts loaded, 40 document issues, 60 code issues,
//! 80 suggestions, 100 saved. Each model stage falls back to its own sample
//! entries independently.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::warn;

use super::{parse_issues, parse_suggestions, StartedCheck};
use crate::application::handlers::project::require_project;
use crate::application::{
    encode_json, spawn_pipeline, ContentGenerator, Pipeline, PipelineError, PipelineOutcome,
};
use crate::domain::foundation::ProjectId;
use crate::domain::job::{Checkpoint, JobKind};
use crate::domain::quality::{
    quality_score, sample_code_issues, sample_document_issues, sample_suggestions, CheckKind,
    CheckResult, Issue, QualityCheck, Suggestion,
};
use crate::ports::{
    DocumentRepository, JobRepository, ProgressSink, ProjectRepository, QualityCheckRepository,
    SourceCodeRepository,
};

const LOADED: Checkpoint = Checkpoint::new("artifacts loaded", 20);
const DOCUMENTS_CHECKED: Checkpoint = Checkpoint::new("documents checked", 40);
const CODE_CHECKED: Checkpoint = Checkpoint::new("source code checked", 60);
const SUGGESTED: Checkpoint = Checkpoint::new("suggestions generated", 80);
const SAVED: Checkpoint = Checkpoint::new("result saved", 100);

const DOCUMENT_PROMPT: &str = "Check the following documents for consistency and completeness. \
Respond with a JSON array of issues: [{\"type\": \"...\", \"description\": \"...\", \"severity\": \"low|medium|high\"}].";

const CODE_PROMPT: &str = "Check the following source code for syntax errors and best-practice \
violations. Respond with a JSON array of issues: [{\"type\": \"...\", \"description\": \"...\", \"severity\": \"low|medium|high\"}].";

const SUGGESTION_PROMPT: &str = "Generate improvement suggestions for the following issues. \
Respond with a JSON array: [{\"issue\": \"...\", \"suggestion\": \"...\"}].";

#[derive(Debug, Clone)]
pub struct StartQualityCheckCommand {
    pub project_id: ProjectId,
}

pub struct StartQualityCheckHandler {
    projects: Arc<dyn ProjectRepository>,
    documents: Arc<dyn DocumentRepository>,
    source_codes: Arc<dyn SourceCodeRepository>,
    checks: Arc<dyn QualityCheckRepository>,
    jobs: Arc<dyn JobRepository>,
    generator: ContentGenerator,
}

impl StartQualityCheckHandler {
    pub fn new(
        projects: Arc<dyn ProjectRepository>,
        documents: Arc<dyn DocumentRepository>,
        source_codes: Arc<dyn SourceCodeRepository>,
        checks: Arc<dyn QualityCheckRepository>,
        jobs: Arc<dyn JobRepository>,
        generator: ContentGenerator,
    ) -> Self {
        Self {
            projects,
            documents,
            source_codes,
            checks,
            jobs,
            generator,
        }
    }

    /// Creates the check record and starts the review in the background.
    pub async fn handle(&self, cmd: StartQualityCheckCommand) -> Result<StartedCheck, PipelineError> {
        require_project(self.projects.as_ref(), &cmd.project_id).await?;

        let check = QualityCheck::new(cmd.project_id, CheckKind::Quality);
        self.checks.save(&check).await?;

        let pipeline = QualityReview {
            check: check.clone(),
            documents: self.documents.clone(),
            source_codes: self.source_codes.clone(),
            checks: self.checks.clone(),
            generator: self.generator.clone(),
        };
        let started = spawn_pipeline(
            self.jobs.clone(),
            Some(cmd.project_id),
            Some(check.id().to_string()),
            pipeline,
        )
        .await?;

        Ok(StartedCheck { check, started })
    }
}

struct QualityReview {
    check: QualityCheck,
    documents: Arc<dyn DocumentRepository>,
    source_codes: Arc<dyn SourceCodeRepository>,
    checks: Arc<dyn QualityCheckRepository>,
    generator: ContentGenerator,
}

impl QualityReview {
    /// Runs one issue-finding stage, returning the sample on failure.
    async fn find_issues(
        &self,
        operation: &str,
        system_prompt: &str,
        payload: String,
        sample: fn() -> Vec<Issue>,
        fallback: &mut Option<String>,
    ) -> Vec<Issue> {
        let reply = self
            .generator
            .generate(operation, Some(*self.check.project_id()), system_prompt, &payload)
            .await;

        match reply.map(|r| parse_issues(&r)) {
            Ok(Some(issues)) => issues,
            Ok(None) => {
                note_fallback(fallback, operation, "reply was not a JSON issue list");
                sample()
            }
            Err(err) => {
                note_fallback(fallback, operation, &err.to_string());
                sample()
            }
        }
    }

    async fn suggest(&self, issues: &[Issue], fallback: &mut Option<String>) -> Result<Vec<Suggestion>, PipelineError> {
        const OPERATION: &str = "quality.suggestions";
        let reply = self
            .generator
            .generate(
                OPERATION,
                Some(*self.check.project_id()),
                SUGGESTION_PROMPT,
                &encode_json(issues)?,
            )
            .await;

        Ok(match reply.map(|r| parse_suggestions(&r)) {
            Ok(Some(suggestions)) => suggestions,
            Ok(None) => {
                note_fallback(fallback, OPERATION, "reply was not a JSON suggestion list");
                sample_suggestions()
            }
            Err(err) => {
                note_fallback(fallback, OPERATION, &err.to_string());
                sample_suggestions()
            }
        })
    }
}

fn note_fallback(fallback: &mut Option<String>, operation: &str, reason: &str) {
    warn!(operation, reason, "check stage using sample entries");
    fallback.get_or_insert_with(|| format!("{}: {}", operation, reason));
}

#[async_trait]
impl Pipeline for QualityReview {
    fn kind(&self) -> JobKind {
        JobKind::QualityCheck
    }

    async fn run(&self, progress: &dyn ProgressSink) -> Result<PipelineOutcome, PipelineError> {
        let project_id = self.check.project_id();
        let documents = self.documents.find_by_project(project_id).await?;
        let source_codes = self.source_codes.find_by_project(project_id).await?;
        progress.advance(LOADED).await?;

        let mut fallback = None;
        let document_issues = self
            .find_issues(
                "quality.documents",
                DOCUMENT_PROMPT,
                encode_json(&documents)?,
                sample_document_issues,
                &mut fallback,
            )
            .await;
        progress.advance(DOCUMENTS_CHECKED).await?;

        let code_issues = self
            .find_issues(
                "quality.code",
                CODE_PROMPT,
                encode_json(&source_codes)?,
                sample_code_issues,
                &mut fallback,
            )
            .await;
        progress.advance(CODE_CHECKED).await?;

        let issues: Vec<Issue> = document_issues.into_iter().chain(code_issues).collect();
        let score = quality_score(issues.len());
        let suggestions = self.suggest(&issues, &mut fallback).await?;
        progress.advance(SUGGESTED).await?;

        let mut check = self.check.clone();
        check.complete(CheckResult {
            score,
            issues,
            suggestions,
        });
        self.checks.update(&check).await?;
        progress.advance(SAVED).await?;

        tracing::info!(check_id = %check.id(), score = score.value(), "quality check saved");
        Ok(PipelineOutcome::generated(check.id()).with_fallback(fallback))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockAIProvider, MockError};
    use crate::adapters::memory::InMemoryStore;
    use crate::application::testing::{seed_generated, seed_project, ProgressRecorder};
    use crate::domain::job::{GenerationJob, JobStatus};
    use crate::domain::quality::Severity;

    async fn run(store: &Arc<InMemoryStore>, project_id: ProjectId, provider: MockAIProvider) -> (QualityCheck, GenerationJob) {
        let started = StartQualityCheckHandler::new(
            store.clone(),
            store.clone(),
            store.clone(),
            store.clone(),
            store.clone(),
            ContentGenerator::new(Arc::new(provider)),
        )
        .handle(StartQualityCheckCommand { project_id })
        .await
        .unwrap();

        assert!(!started.check.is_complete());
        let job = started.started.finished().await.unwrap();
        let check = QualityCheckRepository::find_by_id(store.as_ref(), started.check.id())
            .await
            .unwrap()
            .unwrap();
        (check, job)
    }

    #[tokio::test]
    async fn scores_parsed_issues() {
        let store = Arc::new(InMemoryStore::new());
        let project = seed_project(&store).await;
        seed_generated(&store, &project, "brief.txt", &[("Scope", "All")]).await;
        let provider = MockAIProvider::new()
            .with_response(r#"[{"type": "gap", "description": "No error states", "severity": "high"}]"#)
            .with_response("[]")
            .with_response(r#"[{"issue": "No error states", "suggestion": "Describe failures"}]"#);

        let (check, job) = run(&store, *project.id(), provider.clone()).await;

        assert_eq!(job.status(), JobStatus::Completed);
        assert!(!job.fallback());
        assert!(check.is_complete());
        assert_eq!(check.result().score.value(), 90);
        assert_eq!(check.result().issues, vec![Issue::new("gap", "No error states", Severity::High)]);
        assert_eq!(check.result().suggestions[0].suggestion, "Describe failures");
        assert_eq!(
            provider.operations(),
            ["quality.documents", "quality.code", "quality.suggestions"]
        );
    }

    #[tokio::test]
    async fn unparseable_stage_uses_its_own_samples() {
        let store = Arc::new(InMemoryStore::new());
        let project = seed_project(&store).await;
        let provider = MockAIProvider::new()
            .with_response("[]")
            .with_response("The code looks fine to me.")
            .with_response("[]");

        let (check, job) = run(&store, *project.id(), provider).await;

        assert!(job.fallback());
        assert_eq!(check.result().issues, sample_code_issues());
        assert_eq!(check.result().score.value(), 80);
        assert!(check.result().suggestions.is_empty());
    }

    #[tokio::test]
    async fn all_stages_failing_yields_samples_and_score_sixty() {
        let store = Arc::new(InMemoryStore::new());
        let project = seed_project(&store).await;
        let provider = MockAIProvider::failing();

        let (check, job) = run(&store, *project.id(), provider).await;

        assert_eq!(job.status(), JobStatus::Completed);
        assert!(job.fallback());
        assert_eq!(check.result().issues.len(), 4);
        assert_eq!(check.result().score.value(), 60);
        assert_eq!(check.result().suggestions, sample_suggestions());
    }

    #[tokio::test]
    async fn save_failure_fails_job() {
        let store = Arc::new(InMemoryStore::new());
        let project = seed_project(&store).await;
        store.fail_result_writes();

        let (check, job) = run(&store, *project.id(), MockAIProvider::new().with_default_error(MockError::Empty)).await;

        assert_eq!(job.status(), JobStatus::Failed);
        assert!(!check.is_complete());
    }

    #[tokio::test]
    async fn reports_one_checkpoint_per_stage() {
        let store = Arc::new(InMemoryStore::new());
        let project = seed_project(&store).await;
        let recorder = ProgressRecorder::new(store.clone());

        let job = StartQualityCheckHandler::new(
            store.clone(),
            store.clone(),
            store.clone(),
            store.clone(),
            recorder.clone(),
            ContentGenerator::new(Arc::new(MockAIProvider::failing())),
        )
        .handle(StartQualityCheckCommand { project_id: *project.id() })
        .await
        .unwrap()
        .started
        .finished()
        .await
        .unwrap();

        assert_eq!(job.status(), JobStatus::Completed);
        assert_eq!(recorder.job_checkpoints(), vec![20, 40, 60, 80, 100]);
    }
}
