//! CreateProposalHandler - drafts a proposal from a project and a template.
//!
//! Three chained model stages (extract key facts, apply the template,
//! polish) followed by storing the Markdown file and recording the row.

use async_trait::async_trait;
use std::sync::Arc;

use crate::application::handlers::project::require_project;
use crate::application::{
    encode_json, spawn_pipeline, ContentGenerator, Pipeline, PipelineError, PipelineOutcome,
    StartedJob,
};
use crate::domain::foundation::{ErrorCode, ProjectId, TemplateId, Timestamp};
use crate::domain::job::{Checkpoint, JobKind};
use crate::domain::project::{Project, Template};
use crate::domain::proposal::{Proposal, SAMPLE_PROPOSAL};
use crate::ports::{
    DocumentRepository, JobRepository, ObjectStorage, ProgressSink, ProjectRepository,
    ProposalRepository,
};

const LOADED: Checkpoint = Checkpoint::new("inputs loaded", 20);
const EXTRACTED: Checkpoint = Checkpoint::new("key facts extracted", 40);
const DRAFTED: Checkpoint = Checkpoint::new("template applied", 60);
const OPTIMIZED: Checkpoint = Checkpoint::new("proposal optimized", 80);
const STORED: Checkpoint = Checkpoint::new("file stored", 90);
const RECORDED: Checkpoint = Checkpoint::new("proposal recorded", 100);

const EXTRACT_PROMPT: &str =
    "You are an expert at writing proposals. Extract the important information from the given documents.";
const DRAFT_PROMPT: &str =
    "You are an excellent proposal writer. Create a proposal based on the following template.";
const OPTIMIZE_PROMPT: &str =
    "Optimize the following proposal so that it is more professional and easier to read. Use Markdown.";

const CONTENT_TYPE: &str = "text/markdown; charset=utf-8";

#[derive(Debug, Clone)]
pub struct CreateProposalCommand {
    pub project_id: ProjectId,
    pub template_id: TemplateId,
}

pub struct CreateProposalHandler {
    projects: Arc<dyn ProjectRepository>,
    documents: Arc<dyn DocumentRepository>,
    proposals: Arc<dyn ProposalRepository>,
    jobs: Arc<dyn JobRepository>,
    storage: Arc<dyn ObjectStorage>,
    proposals_bucket: String,
    generator: ContentGenerator,
}

impl CreateProposalHandler {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        projects: Arc<dyn ProjectRepository>,
        documents: Arc<dyn DocumentRepository>,
        proposals: Arc<dyn ProposalRepository>,
        jobs: Arc<dyn JobRepository>,
        storage: Arc<dyn ObjectStorage>,
        proposals_bucket: impl Into<String>,
        generator: ContentGenerator,
    ) -> Self {
        Self {
            projects,
            documents,
            proposals,
            jobs,
            storage,
            proposals_bucket: proposals_bucket.into(),
            generator,
        }
    }

    /// # Errors
    ///
    /// - `NotFound` if the project or template doesn't exist
    pub async fn handle(&self, cmd: CreateProposalCommand) -> Result<StartedJob, PipelineError> {
        let project = require_project(self.projects.as_ref(), &cmd.project_id).await?;
        let template = self
            .projects
            .find_template(&cmd.template_id)
            .await?
            .ok_or_else(|| {
                PipelineError::not_found(
                    ErrorCode::TemplateNotFound,
                    format!("Template not found: {}", cmd.template_id),
                )
            })?;

        let pipeline = ProposalDrafting {
            project,
            template,
            documents: self.documents.clone(),
            proposals: self.proposals.clone(),
            storage: self.storage.clone(),
            proposals_bucket: self.proposals_bucket.clone(),
            generator: self.generator.clone(),
        };
        Ok(spawn_pipeline(self.jobs.clone(), Some(cmd.project_id), None, pipeline).await?)
    }
}

struct ProposalDrafting {
    project: Project,
    template: Template,
    documents: Arc<dyn DocumentRepository>,
    proposals: Arc<dyn ProposalRepository>,
    storage: Arc<dyn ObjectStorage>,
    proposals_bucket: String,
    generator: ContentGenerator,
}

impl ProposalDrafting {
    /// One model stage; a failure yields the sample text and records why.
    async fn stage(
        &self,
        operation: &str,
        system_prompt: &str,
        user_prompt: &str,
        fallback: &mut Option<String>,
    ) -> String {
        match self
            .generator
            .generate(operation, Some(*self.project.id()), system_prompt, user_prompt)
            .await
        {
            Ok(reply) => reply,
            Err(err) => {
                tracing::warn!(operation, error = %err, "proposal stage using sample text");
                fallback.get_or_insert_with(|| format!("{} failed: {}", operation, err));
                SAMPLE_PROPOSAL.to_string()
            }
        }
    }
}

#[async_trait]
impl Pipeline for ProposalDrafting {
    fn kind(&self) -> JobKind {
        JobKind::ProposalCreation
    }

    async fn run(&self, progress: &dyn ProgressSink) -> Result<PipelineOutcome, PipelineError> {
        let documents = self.documents.find_by_project(self.project.id()).await?;
        progress.advance(LOADED).await?;

        let mut fallback = None;
        let facts_prompt = format!(
            "Project name: {}\nProject description: {}\nRelated documents: {}",
            self.project.name(),
            self.project.description(),
            encode_json(&documents)?
        );
        let facts = self
            .stage("proposal.extract", EXTRACT_PROMPT, &facts_prompt, &mut fallback)
            .await;
        progress.advance(EXTRACTED).await?;

        let draft_prompt = format!(
            "Template content: {}\nExtracted information: {}",
            self.template.content, facts
        );
        let draft = self
            .stage("proposal.draft", DRAFT_PROMPT, &draft_prompt, &mut fallback)
            .await;
        progress.advance(DRAFTED).await?;

        let content = self
            .stage("proposal.optimize", OPTIMIZE_PROMPT, &draft, &mut fallback)
            .await;
        progress.advance(OPTIMIZED).await?;

        let key = Proposal::object_key(self.project.id(), &Timestamp::now());
        self.storage
            .put(&self.proposals_bucket, &key, content.as_bytes(), CONTENT_TYPE)
            .await?;
        progress.advance(STORED).await?;

        let file_url = self.storage.public_url(&self.proposals_bucket, &key);
        let proposal = Proposal::new(*self.project.id(), self.template.id, content, file_url);
        self.proposals.save(&proposal).await?;
        progress.advance(RECORDED).await?;

        tracing::info!(proposal_id = %proposal.id, key = %key, "proposal recorded");
        Ok(PipelineOutcome::generated(proposal.id).with_fallback(fallback))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockAIProvider, MockError};
    use crate::adapters::memory::InMemoryStore;
    use crate::adapters::storage::InMemoryObjectStorage;
    use crate::application::testing::{seed_generated, seed_project, ProgressRecorder};
    use crate::domain::foundation::ProposalId;
    use crate::domain::job::{GenerationJob, JobStatus};

    struct Fixture {
        store: Arc<InMemoryStore>,
        storage: InMemoryObjectStorage,
        project: Project,
        template: Template,
    }

    async fn fixture() -> Fixture {
        let store = Arc::new(InMemoryStore::new());
        let project = seed_project(&store).await;
        seed_generated(&store, &project, "scope.txt", &[("Scope", "Stock levels")]).await;
        let template = Template::new("Standard", "# Summary\n# Budget");
        store.save_template(&template).await.unwrap();
        Fixture {
            store,
            storage: InMemoryObjectStorage::new(),
            project,
            template,
        }
    }

    fn handler(fx: &Fixture, provider: MockAIProvider) -> CreateProposalHandler {
        CreateProposalHandler::new(
            fx.store.clone(),
            fx.store.clone(),
            fx.store.clone(),
            fx.store.clone(),
            Arc::new(fx.storage.clone()),
            "proposals",
            ContentGenerator::new(Arc::new(provider)),
        )
    }

    async fn run(fx: &Fixture, provider: MockAIProvider) -> GenerationJob {
        handler(fx, provider)
            .handle(CreateProposalCommand {
                project_id: *fx.project.id(),
                template_id: fx.template.id,
            })
            .await
            .unwrap()
            .finished()
            .await
            .unwrap()
    }

    async fn proposal(fx: &Fixture, job: &GenerationJob) -> Proposal {
        let id: ProposalId = job.target_id().unwrap().parse().unwrap();
        ProposalRepository::find_by_id(fx.store.as_ref(), &id)
            .await
            .unwrap()
            .unwrap()
    }

    #[tokio::test]
    async fn chains_stages_and_stores_markdown() {
        let fx = fixture().await;
        let provider = MockAIProvider::new()
            .with_response("Facts: stock tracking")
            .with_response("Draft proposal")
            .with_response("# Final proposal");

        let job = run(&fx, provider.clone()).await;

        assert_eq!(job.status(), JobStatus::Completed);
        assert!(!job.fallback());
        let proposal = proposal(&fx, &job).await;
        assert_eq!(proposal.content, "# Final proposal");
        assert!(proposal.file_url.starts_with("memory://proposals/proposal_"));
        assert!(proposal.file_url.ends_with(".md"));

        let calls = provider.get_calls();
        assert!(calls[0].last_user_message().unwrap().contains("Project name: Inventory"));
        assert!(calls[1].last_user_message().unwrap().contains("Template content: # Summary"));
        assert!(calls[1].last_user_message().unwrap().contains("Facts: stock tracking"));
        assert_eq!(calls[2].last_user_message(), Some("Draft proposal"));

        let key = proposal.file_url.trim_start_matches("memory://proposals/");
        let stored = fx.storage.get("proposals", key).await.unwrap();
        assert_eq!(stored, b"# Final proposal");
    }

    #[tokio::test]
    async fn failed_stage_substitutes_sample_and_continues() {
        let fx = fixture().await;
        let provider = MockAIProvider::new()
            .with_error(MockError::RateLimited { retry_after_secs: 1 })
            .with_response("Draft proposal")
            .with_response("Polished");

        let job = run(&fx, provider.clone()).await;

        assert!(job.fallback());
        assert!(job.message().unwrap().starts_with("proposal.extract failed"));
        assert_eq!(provider.call_count(), 3);
        assert!(provider.get_calls()[1]
            .last_user_message()
            .unwrap()
            .contains(SAMPLE_PROPOSAL));
        assert_eq!(proposal(&fx, &job).await.content, "Polished");
    }

    #[tokio::test]
    async fn save_failure_fails_job_after_storing_file() {
        let fx = fixture().await;
        fx.store.fail_result_writes();

        let job = run(&fx, MockAIProvider::new()).await;

        assert_eq!(job.status(), JobStatus::Failed);
        assert_eq!(job.progress().value(), 90);
        assert_eq!(fx.store.proposal_count().await, 0);
    }

    #[tokio::test]
    async fn unknown_template_is_not_found() {
        let fx = fixture().await;
        let err = handler(&fx, MockAIProvider::new())
            .handle(CreateProposalCommand {
                project_id: *fx.project.id(),
                template_id: TemplateId::new(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, PipelineError::NotFound(_)));
    }

    #[tokio::test]
    async fn reports_checkpoints_through_storage_and_record() {
        let fx = fixture().await;
        let recorder = ProgressRecorder::new(fx.store.clone());
        let provider = MockAIProvider::new()
            .with_response("Facts")
            .with_response("Draft")
            .with_response("# Proposal");

        let job = CreateProposalHandler::new(
            fx.store.clone(),
            fx.store.clone(),
            fx.store.clone(),
            recorder.clone(),
            Arc::new(fx.storage.clone()),
            "proposals",
            ContentGenerator::new(Arc::new(provider)),
        )
        .handle(CreateProposalCommand {
            project_id: *fx.project.id(),
            template_id: fx.template.id,
        })
        .await
        .unwrap()
        .finished()
        .await
        .unwrap();

        assert_eq!(job.status(), JobStatus::Completed);
        assert_eq!(recorder.job_checkpoints(), vec![20, 40, 60, 80, 90, 100]);
    }
}
