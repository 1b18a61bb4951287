//! RunWorkEstimateHandler - per-phase effort estimate, computed inline.

use std::sync::Arc;
use tracing::warn;

use crate::application::handlers::project::require_project;
use crate::application::{ContentGenerator, PipelineError};
use crate::domain::estimate::{
    parse_hours, Estimate, Phase, PhaseEstimate, ProjectMetrics, WorkEstimate,
    FALLBACK_PHASE_HOURS, HISTORY_SAMPLE_SIZE,
};
use crate::domain::foundation::ProjectId;
use crate::domain::project::Project;
use crate::ports::{
    DocumentRepository, ProjectRepository, SourceCodeRepository, WorkEstimateRepository,
};

#[derive(Debug, Clone)]
pub struct RunWorkEstimateCommand {
    pub project_id: ProjectId,
}

pub struct RunWorkEstimateHandler {
    projects: Arc<dyn ProjectRepository>,
    documents: Arc<dyn DocumentRepository>,
    source_codes: Arc<dyn SourceCodeRepository>,
    estimates: Arc<dyn WorkEstimateRepository>,
    generator: ContentGenerator,
}

impl RunWorkEstimateHandler {
    pub fn new(
        projects: Arc<dyn ProjectRepository>,
        documents: Arc<dyn DocumentRepository>,
        source_codes: Arc<dyn SourceCodeRepository>,
        estimates: Arc<dyn WorkEstimateRepository>,
        generator: ContentGenerator,
    ) -> Self {
        Self {
            projects,
            documents,
            source_codes,
            estimates,
            generator,
        }
    }

    /// Asks the model for each phase in turn and stores the total.
    ///
    /// A phase whose reply is missing, negative or does not start with a
    /// number is estimated at [`FALLBACK_PHASE_HOURS`].
    pub async fn handle(&self, cmd: RunWorkEstimateCommand) -> Result<WorkEstimate, PipelineError> {
        let project = require_project(self.projects.as_ref(), &cmd.project_id).await?;

        let documents = self.documents.find_by_project(&cmd.project_id).await?;
        let source_codes = self.source_codes.find_by_project(&cmd.project_id).await?;
        let past_totals = self
            .estimates
            .recent_totals_excluding(&cmd.project_id, HISTORY_SAMPLE_SIZE)
            .await?;
        let metrics = ProjectMetrics::compute(&documents, &source_codes, &past_totals);

        let mut breakdown = Vec::with_capacity(Phase::ALL.len());
        for phase in Phase::ALL {
            breakdown.push(self.estimate_phase(&project, &metrics, phase).await);
        }

        let estimate = WorkEstimate::new(cmd.project_id, Estimate::from_breakdown(breakdown));
        self.estimates.save(&estimate).await?;

        tracing::info!(
            project_id = %cmd.project_id,
            total_hours = estimate.estimate.total_hours,
            fallback = estimate.estimate.used_fallback(),
            "work estimate saved"
        );
        Ok(estimate)
    }

    async fn estimate_phase(
        &self,
        project: &Project,
        metrics: &ProjectMetrics,
        phase: Phase,
    ) -> PhaseEstimate {
        let system_prompt = format!(
            "Instructions for estimating the effort of a project. Phase: {}",
            phase.label()
        );
        let user_prompt = format!(
            "Project name: {}\n\
             Number of documents: {}\n\
             Document complexity: {}\n\
             Total lines of code: {}\n\
             Code complexity: {}\n\
             Historical average hours: {:.1}\n\
             Estimate the hours needed for the {} phase. Reply with the number of hours first.",
            project.name(),
            metrics.document_count,
            metrics.document_complexity,
            metrics.total_lines,
            metrics.code_complexity,
            metrics.historical_average_hours,
            phase.label()
        );

        let reply = self
            .generator
            .generate("estimate.phase", Some(*project.id()), &system_prompt, &user_prompt)
            .await;

        match reply.as_deref().map(parse_hours) {
            Ok(Some(hours)) => PhaseEstimate {
                phase,
                hours,
                fallback: false,
            },
            Ok(None) => {
                warn!(phase = phase.label(), "estimate reply did not start with a number");
                fallback_phase(phase)
            }
            Err(err) => {
                warn!(phase = phase.label(), error = %err, "estimate request failed");
                fallback_phase(phase)
            }
        }
    }
}

fn fallback_phase(phase: Phase) -> PhaseEstimate {
    PhaseEstimate {
        phase,
        hours: FALLBACK_PHASE_HOURS,
        fallback: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockAIProvider, MockError};
    use crate::adapters::memory::InMemoryStore;
    use crate::application::testing::{seed_generated, seed_project};

    fn handler(store: &Arc<InMemoryStore>, provider: MockAIProvider) -> RunWorkEstimateHandler {
        RunWorkEstimateHandler::new(
            store.clone(),
            store.clone(),
            store.clone(),
            store.clone(),
            ContentGenerator::new(Arc::new(provider)),
        )
    }

    #[tokio::test]
    async fn sums_phase_replies_and_falls_back_per_phase() {
        let store = Arc::new(InMemoryStore::new());
        let project = seed_project(&store).await;
        seed_generated(&store, &project, "brief.txt", &[("A", ""), ("B", "")]).await;
        let provider = MockAIProvider::new()
            .with_response("40 hours")
            .with_response("About sixty")
            .with_error(MockError::Unavailable { message: "down".into() })
            .with_response("12.5");

        let estimate = handler(&store, provider.clone())
            .handle(RunWorkEstimateCommand {
                project_id: *project.id(),
            })
            .await
            .unwrap();

        let hours: Vec<f64> = estimate.estimate.breakdown.iter().map(|p| p.hours).collect();
        assert_eq!(hours, vec![40.0, 50.0, 50.0, 12.5]);
        assert_eq!(estimate.estimate.total_hours, 152.5);
        assert!(estimate.estimate.used_fallback());
        assert_eq!(store.estimate_count().await, 1);

        let prompt = provider.get_calls()[0].last_user_message().unwrap().to_string();
        assert!(prompt.contains("Number of documents: 1"));
        assert!(prompt.contains("Document complexity: 2"));
        assert!(prompt.contains("Historical average hours: 100.0"));
    }

    #[tokio::test]
    async fn history_comes_from_other_projects() {
        let store = Arc::new(InMemoryStore::new());
        let earlier = seed_project(&store).await;
        let provider = MockAIProvider::new().with_default_response("30");
        handler(&store, provider)
            .handle(RunWorkEstimateCommand {
                project_id: *earlier.id(),
            })
            .await
            .unwrap();

        let project = seed_project(&store).await;
        let provider = MockAIProvider::new().with_default_response("10");
        let estimate = handler(&store, provider.clone())
            .handle(RunWorkEstimateCommand {
                project_id: *project.id(),
            })
            .await
            .unwrap();

        assert_eq!(estimate.estimate.total_hours, 40.0);
        let prompt = provider.get_calls()[0].last_user_message().unwrap().to_string();
        assert!(prompt.contains("Historical average hours: 120.0"));
    }

    #[tokio::test]
    async fn unknown_project_is_not_found() {
        let store = Arc::new(InMemoryStore::new());
        let err = handler(&store, MockAIProvider::new())
            .handle(RunWorkEstimateCommand {
                project_id: ProjectId::new(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, PipelineError::NotFound(_)));
        assert_eq!(store.estimate_count().await, 0);
    }
}
