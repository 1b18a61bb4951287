//! Fixtures shared by handler tests.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::adapters::memory::InMemoryStore;
use crate::adapters::storage::InMemoryObjectStorage;
use crate::domain::document::{DocType, Document, Section};
use crate::domain::foundation::{DocumentId, DomainError, JobId, ProjectId, UserId};
use crate::domain::job::GenerationJob;
use crate::domain::project::Project;
use crate::ports::{DocumentRepository, JobRepository, ObjectStorage, ProjectRepository};

pub(crate) fn user() -> UserId {
    UserId::new("user-1").unwrap()
}

pub(crate) async fn seed_project(store: &Arc<InMemoryStore>) -> Project {
    let project = Project::new("Inventory", "Warehouse stock tracking", user()).unwrap();
    ProjectRepository::save(store.as_ref(), &project).await.unwrap();
    project
}

/// Registers a text document and writes its body to the uploads bucket.
pub(crate) async fn seed_upload(
    store: &Arc<InMemoryStore>,
    storage: &InMemoryObjectStorage,
    project: &Project,
    title: &str,
    body: &str,
) -> Document {
    let document = Document::register(*project.id(), user(), DocType::Text, title).unwrap();
    storage
        .put("uploads", &document.storage_key(), body.as_bytes(), "text/plain")
        .await
        .unwrap();
    DocumentRepository::save(store.as_ref(), &document).await.unwrap();
    document
}

/// Saves a document that already has generated sections.
pub(crate) async fn seed_generated(
    store: &Arc<InMemoryStore>,
    project: &Project,
    title: &str,
    sections: &[(&str, &str)],
) -> Document {
    let mut document = Document::register(*project.id(), user(), DocType::Text, title).unwrap();
    document.apply_sections(
        sections
            .iter()
            .map(|(heading, content)| Section::new(*heading, *content))
            .collect(),
    );
    DocumentRepository::save(store.as_ref(), &document).await.unwrap();
    document
}

/// Job and document repository that remembers every progress value written.
pub(crate) struct ProgressRecorder {
    store: Arc<InMemoryStore>,
    jobs: Mutex<Vec<u8>>,
    documents: Mutex<Vec<u8>>,
}

impl ProgressRecorder {
    pub(crate) fn new(store: Arc<InMemoryStore>) -> Arc<Self> {
        Arc::new(Self {
            store,
            jobs: Mutex::new(Vec::new()),
            documents: Mutex::new(Vec::new()),
        })
    }

    /// Distinct job progress values in the order they were written.
    pub(crate) fn job_checkpoints(&self) -> Vec<u8> {
        dedup(&self.jobs.lock().unwrap())
    }

    /// Distinct `content.progress` values in the order they were written.
    pub(crate) fn document_checkpoints(&self) -> Vec<u8> {
        dedup(&self.documents.lock().unwrap())
    }
}

fn dedup(values: &[u8]) -> Vec<u8> {
    let mut out = values.to_vec();
    out.dedup();
    out
}

#[async_trait]
impl JobRepository for ProgressRecorder {
    async fn save(&self, job: &GenerationJob) -> Result<(), DomainError> {
        JobRepository::save(self.store.as_ref(), job).await
    }

    async fn update(&self, job: &GenerationJob) -> Result<(), DomainError> {
        self.jobs.lock().unwrap().push(job.progress().value());
        JobRepository::update(self.store.as_ref(), job).await
    }

    async fn find_by_id(&self, id: &JobId) -> Result<Option<GenerationJob>, DomainError> {
        JobRepository::find_by_id(self.store.as_ref(), id).await
    }
}

#[async_trait]
impl DocumentRepository for ProgressRecorder {
    async fn save(&self, document: &Document) -> Result<(), DomainError> {
        DocumentRepository::save(self.store.as_ref(), document).await
    }

    async fn update(&self, document: &Document) -> Result<(), DomainError> {
        self.documents
            .lock()
            .unwrap()
            .push(document.content().progress.value());
        DocumentRepository::update(self.store.as_ref(), document).await
    }

    async fn find_by_id(&self, id: &DocumentId) -> Result<Option<Document>, DomainError> {
        DocumentRepository::find_by_id(self.store.as_ref(), id).await
    }

    async fn find_many(&self, ids: &[DocumentId]) -> Result<Vec<Document>, DomainError> {
        DocumentRepository::find_many(self.store.as_ref(), ids).await
    }

    async fn find_by_project(&self, project_id: &ProjectId) -> Result<Vec<Document>, DomainError> {
        DocumentRepository::find_by_project(self.store.as_ref(), project_id).await
    }
}
