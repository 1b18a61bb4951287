//! In-memory repository adapters.
//!
//! One `InMemoryStore` implements every repository port so pipeline and
//! HTTP tests can share a single handle. Rows are kept in insertion order.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::document::Document;
use crate::domain::estimate::WorkEstimate;
use crate::domain::foundation::{
    DocumentId, DomainError, ErrorCode, JobId, ProgressReportId, ProjectId, ProposalId,
    QualityCheckId, SourceCodeId, TemplateId, Timestamp,
};
use crate::domain::job::GenerationJob;
use crate::domain::project::{ActivityLog, Project, Template};
use crate::domain::proposal::Proposal;
use crate::domain::quality::QualityCheck;
use crate::domain::report::ProgressReport;
use crate::domain::source_code::SourceCode;
use crate::ports::{
    DocumentRepository, JobRepository, ProgressReportRepository, ProjectRepository,
    ProposalRepository, QualityCheckRepository, SourceCodeRepository, WorkEstimateRepository,
};

#[derive(Debug, Default)]
struct Tables {
    projects: Vec<Project>,
    templates: Vec<Template>,
    activity: Vec<ActivityLog>,
    documents: Vec<Document>,
    source_codes: Vec<SourceCode>,
    checks: Vec<QualityCheck>,
    estimates: Vec<WorkEstimate>,
    reports: Vec<ProgressReport>,
    proposals: Vec<Proposal>,
    jobs: Vec<GenerationJob>,
}

/// In-memory storage for all aggregates.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
    /// When set, writes of pipeline results fail. Job and project writes still succeed.
    fail_result_writes: Arc<AtomicBool>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every pipeline result write fail with a database error.
    pub fn fail_result_writes(&self) {
        self.fail_result_writes.store(true, Ordering::SeqCst);
    }

    fn check_result_write(&self, what: &str) -> Result<(), DomainError> {
        if self.fail_result_writes.load(Ordering::SeqCst) {
            return Err(DomainError::database(what, "simulated write failure"));
        }
        Ok(())
    }

    pub async fn source_code_count(&self) -> usize {
        self.tables.read().await.source_codes.len()
    }

    pub async fn report_count(&self) -> usize {
        self.tables.read().await.reports.len()
    }

    pub async fn proposal_count(&self) -> usize {
        self.tables.read().await.proposals.len()
    }

    pub async fn estimate_count(&self) -> usize {
        self.tables.read().await.estimates.len()
    }
}

fn replace<T>(rows: &mut [T], item: &T, same: impl Fn(&T) -> bool) -> bool
where
    T: Clone,
{
    match rows.iter_mut().find(|row| same(row)) {
        Some(row) => {
            *row = item.clone();
            true
        }
        None => false,
    }
}

#[async_trait]
impl ProjectRepository for InMemoryStore {
    async fn save(&self, project: &Project) -> Result<(), DomainError> {
        self.tables.write().await.projects.push(project.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &ProjectId) -> Result<Option<Project>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables.projects.iter().find(|p| p.id() == id).cloned())
    }

    async fn list(&self) -> Result<Vec<Project>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables.projects.iter().rev().cloned().collect())
    }

    async fn list_templates(&self) -> Result<Vec<Template>, DomainError> {
        let mut templates = self.tables.read().await.templates.clone();
        templates.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(templates)
    }

    async fn find_template(&self, id: &TemplateId) -> Result<Option<Template>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables.templates.iter().find(|t| &t.id == id).cloned())
    }

    async fn save_template(&self, template: &Template) -> Result<(), DomainError> {
        let mut tables = self.tables.write().await;
        if !replace(&mut tables.templates, template, |t| t.id == template.id) {
            tables.templates.push(template.clone());
        }
        Ok(())
    }

    async fn record_activity(&self, log: &ActivityLog) -> Result<(), DomainError> {
        self.tables.write().await.activity.push(log.clone());
        Ok(())
    }

    async fn activity_between(
        &self,
        project_id: &ProjectId,
        start: &Timestamp,
        end: &Timestamp,
    ) -> Result<Vec<ActivityLog>, DomainError> {
        let tables = self.tables.read().await;
        let mut logs: Vec<ActivityLog> = tables
            .activity
            .iter()
            .filter(|log| &log.project_id == project_id)
            .filter(|log| !log.timestamp.is_before(start) && !log.timestamp.is_after(end))
            .cloned()
            .collect();
        logs.sort_by_key(|log| log.timestamp);
        Ok(logs)
    }
}

#[async_trait]
impl DocumentRepository for InMemoryStore {
    async fn save(&self, document: &Document) -> Result<(), DomainError> {
        self.tables.write().await.documents.push(document.clone());
        Ok(())
    }

    async fn update(&self, document: &Document) -> Result<(), DomainError> {
        self.check_result_write("Failed to update document")?;
        let mut tables = self.tables.write().await;
        if replace(&mut tables.documents, document, |d| d.id() == document.id()) {
            Ok(())
        } else {
            Err(DomainError::new(
                ErrorCode::DocumentNotFound,
                format!("Document not found: {}", document.id()),
            ))
        }
    }

    async fn find_by_id(&self, id: &DocumentId) -> Result<Option<Document>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables.documents.iter().find(|d| d.id() == id).cloned())
    }

    async fn find_many(&self, ids: &[DocumentId]) -> Result<Vec<Document>, DomainError> {
        let tables = self.tables.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| tables.documents.iter().find(|d| d.id() == id).cloned())
            .collect())
    }

    async fn find_by_project(&self, project_id: &ProjectId) -> Result<Vec<Document>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables
            .documents
            .iter()
            .filter(|d| d.project_id() == project_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl SourceCodeRepository for InMemoryStore {
    async fn save(&self, source_code: &SourceCode) -> Result<(), DomainError> {
        self.check_result_write("Failed to insert source code")?;
        self.tables.write().await.source_codes.push(source_code.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &SourceCodeId) -> Result<Option<SourceCode>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables.source_codes.iter().find(|s| &s.id == id).cloned())
    }

    async fn find_by_project(
        &self,
        project_id: &ProjectId,
    ) -> Result<Vec<SourceCode>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables
            .source_codes
            .iter()
            .filter(|s| &s.project_id == project_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl QualityCheckRepository for InMemoryStore {
    async fn save(&self, check: &QualityCheck) -> Result<(), DomainError> {
        self.tables.write().await.checks.push(check.clone());
        Ok(())
    }

    async fn update(&self, check: &QualityCheck) -> Result<(), DomainError> {
        self.check_result_write("Failed to update check")?;
        let mut tables = self.tables.write().await;
        if replace(&mut tables.checks, check, |c| c.id() == check.id()) {
            Ok(())
        } else {
            Err(DomainError::new(
                ErrorCode::CheckNotFound,
                format!("Check not found: {}", check.id()),
            ))
        }
    }

    async fn find_by_id(&self, id: &QualityCheckId) -> Result<Option<QualityCheck>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables.checks.iter().find(|c| c.id() == id).cloned())
    }
}

#[async_trait]
impl WorkEstimateRepository for InMemoryStore {
    async fn save(&self, estimate: &WorkEstimate) -> Result<(), DomainError> {
        self.check_result_write("Failed to insert work estimate")?;
        self.tables.write().await.estimates.push(estimate.clone());
        Ok(())
    }

    async fn latest_for_project(
        &self,
        project_id: &ProjectId,
    ) -> Result<Option<WorkEstimate>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables
            .estimates
            .iter()
            .rev()
            .find(|e| &e.project_id == project_id)
            .cloned())
    }

    async fn recent_totals_excluding(
        &self,
        project_id: &ProjectId,
        limit: usize,
    ) -> Result<Vec<f64>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables
            .estimates
            .iter()
            .rev()
            .filter(|e| &e.project_id != project_id)
            .take(limit)
            .map(|e| e.estimate.total_hours)
            .collect())
    }
}

#[async_trait]
impl ProgressReportRepository for InMemoryStore {
    async fn save(&self, report: &ProgressReport) -> Result<(), DomainError> {
        self.check_result_write("Failed to insert progress report")?;
        self.tables.write().await.reports.push(report.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: &ProgressReportId,
    ) -> Result<Option<ProgressReport>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables.reports.iter().find(|r| &r.id == id).cloned())
    }
}

#[async_trait]
impl ProposalRepository for InMemoryStore {
    async fn save(&self, proposal: &Proposal) -> Result<(), DomainError> {
        self.check_result_write("Failed to insert proposal")?;
        self.tables.write().await.proposals.push(proposal.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &ProposalId) -> Result<Option<Proposal>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables.proposals.iter().find(|p| &p.id == id).cloned())
    }
}

#[async_trait]
impl JobRepository for InMemoryStore {
    async fn save(&self, job: &GenerationJob) -> Result<(), DomainError> {
        self.tables.write().await.jobs.push(job.clone());
        Ok(())
    }

    async fn update(&self, job: &GenerationJob) -> Result<(), DomainError> {
        let mut tables = self.tables.write().await;
        if replace(&mut tables.jobs, job, |j| j.id() == job.id()) {
            Ok(())
        } else {
            Err(DomainError::new(
                ErrorCode::JobNotFound,
                format!("Job not found: {}", job.id()),
            ))
        }
    }

    async fn find_by_id(&self, id: &JobId) -> Result<Option<GenerationJob>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables.jobs.iter().find(|j| j.id() == id).cloned())
    }
}
