//! GenerateDocumentHandler - turns an uploaded file into structured sections.
//!
//! Checkpoints: 20 document loaded, 40 file read, 80 text generated,
//! 100 sections saved. Each checkpoint is mirrored into `content.progress`.

use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use tracing::warn;

use crate::application::{
    spawn_pipeline, ContentGenerator, Pipeline, PipelineError, PipelineOutcome, StartedJob,
};
use crate::domain::document::{DocType, Document, Section};
use crate::domain::foundation::{DocumentId, ErrorCode};
use crate::domain::job::{Checkpoint, JobKind};
use crate::ports::{DocumentRepository, JobRepository, ObjectStorage, ProgressSink};

const LOADED: Checkpoint = Checkpoint::new("document loaded", 20);
const FILE_READ: Checkpoint = Checkpoint::new("file read", 40);
const GENERATED: Checkpoint = Checkpoint::new("text generated", 80);
const SAVED: Checkpoint = Checkpoint::new("sections saved", 100);

const SYSTEM_PROMPT: &str = "You are an expert technical writer. Using the information provided, \
write detailed development documentation. Respond with JSON of the form \
{\"sections\": [{\"heading\": \"...\", \"content\": \"...\"}]}.";

/// Text used for PDF uploads; the pipeline does not extract PDF text.
const PDF_PLACEHOLDER: &str = "PDF content (text extraction is not available).";

#[derive(Debug, Clone)]
pub struct GenerateDocumentCommand {
    pub document_id: DocumentId,
}

pub struct GenerateDocumentHandler {
    documents: Arc<dyn DocumentRepository>,
    jobs: Arc<dyn JobRepository>,
    storage: Arc<dyn ObjectStorage>,
    uploads_bucket: String,
    generator: ContentGenerator,
}

impl GenerateDocumentHandler {
    pub fn new(
        documents: Arc<dyn DocumentRepository>,
        jobs: Arc<dyn JobRepository>,
        storage: Arc<dyn ObjectStorage>,
        uploads_bucket: impl Into<String>,
        generator: ContentGenerator,
    ) -> Self {
        Self {
            documents,
            jobs,
            storage,
            uploads_bucket: uploads_bucket.into(),
            generator,
        }
    }

    /// Starts generation in the background.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the document doesn't exist
    pub async fn handle(&self, cmd: GenerateDocumentCommand) -> Result<StartedJob, PipelineError> {
        let document = self
            .documents
            .find_by_id(&cmd.document_id)
            .await?
            .ok_or_else(|| {
                PipelineError::not_found(
                    ErrorCode::DocumentNotFound,
                    format!("Document not found: {}", cmd.document_id),
                )
            })?;

        let project_id = *document.project_id();
        let target_id = document.id().to_string();
        let pipeline = DocumentGeneration {
            document,
            documents: self.documents.clone(),
            storage: self.storage.clone(),
            uploads_bucket: self.uploads_bucket.clone(),
            generator: self.generator.clone(),
        };

        Ok(spawn_pipeline(self.jobs.clone(), Some(project_id), Some(target_id), pipeline).await?)
    }
}

struct DocumentGeneration {
    document: Document,
    documents: Arc<dyn DocumentRepository>,
    storage: Arc<dyn ObjectStorage>,
    uploads_bucket: String,
    generator: ContentGenerator,
}

impl DocumentGeneration {
    async fn checkpoint(
        &self,
        document: &mut Document,
        checkpoint: Checkpoint,
        progress: &dyn ProgressSink,
    ) -> Result<(), PipelineError> {
        document.set_progress(checkpoint.progress);
        self.documents.update(document).await?;
        progress.advance(checkpoint).await?;
        Ok(())
    }

    async fn write_sample(
        &self,
        mut document: Document,
        reason: String,
        progress: &dyn ProgressSink,
    ) -> Result<PipelineOutcome, PipelineError> {
        warn!(document_id = %document.id(), reason = %reason, "writing sample document");
        document.apply_sample(&reason);
        self.documents.update(&document).await?;
        progress.advance(SAVED).await?;
        Ok(PipelineOutcome::fallback(document.id(), reason))
    }

    async fn read_source(&self, document: &Document) -> Result<String, String> {
        let bytes = self
            .storage
            .get(&self.uploads_bucket, &document.storage_key())
            .await
            .map_err(|e| format!("Failed to read the uploaded file: {}", e))?;

        match document.doc_type() {
            DocType::Text => String::from_utf8(bytes)
                .map_err(|_| "The uploaded file is not valid UTF-8 text".to_string()),
            DocType::Pdf => Ok(PDF_PLACEHOLDER.to_string()),
        }
    }
}

#[async_trait]
impl Pipeline for DocumentGeneration {
    fn kind(&self) -> JobKind {
        JobKind::DocumentGeneration
    }

    async fn run(&self, progress: &dyn ProgressSink) -> Result<PipelineOutcome, PipelineError> {
        let mut document = self.document.clone();
        self.checkpoint(&mut document, LOADED, progress).await?;

        let text = match self.read_source(&document).await {
            Ok(text) => text,
            Err(reason) => return self.write_sample(document, reason, progress).await,
        };
        self.checkpoint(&mut document, FILE_READ, progress).await?;

        let reply = match self
            .generator
            .generate(
                "document.generate",
                Some(*document.project_id()),
                SYSTEM_PROMPT,
                &text,
            )
            .await
        {
            Ok(reply) => reply,
            Err(err) => {
                let reason = format!("AI request failed: {}", err);
                return self.write_sample(document, reason, progress).await;
            }
        };
        self.checkpoint(&mut document, GENERATED, progress).await?;

        let sections = parse_sections(&reply, document.title());
        tracing::debug!(document_id = %document.id(), sections = sections.len(), "sections parsed");
        document.apply_sections(sections);
        self.documents.update(&document).await?;
        progress.advance(SAVED).await?;

        Ok(PipelineOutcome::generated(document.id()))
    }
}

#[derive(Deserialize)]
struct RawSection {
    #[serde(alias = "title")]
    heading: String,
    #[serde(default, alias = "body", alias = "text")]
    content: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawSections {
    Wrapped { sections: Vec<RawSection> },
    List(Vec<RawSection>),
}

/// Splits a model reply into sections.
///
/// Tries JSON (`{"sections": [...]}` or a bare array), then markdown
/// headings, and otherwise returns the whole reply as one section titled
/// `fallback_heading`.
pub fn parse_sections(reply: &str, fallback_heading: &str) -> Vec<Section> {
    if let Some(raw) = crate::application::parse_json::<RawSections>(reply) {
        let raw = match raw {
            RawSections::Wrapped { sections } | RawSections::List(sections) => sections,
        };
        if !raw.is_empty() {
            return raw
                .into_iter()
                .map(|s| Section::new(s.heading.trim(), s.content.trim()))
                .collect();
        }
    }

    let headed = markdown_sections(reply);
    if !headed.is_empty() {
        return headed;
    }

    vec![Section::new(fallback_heading, reply.trim())]
}

fn markdown_sections(reply: &str) -> Vec<Section> {
    let mut sections: Vec<(String, Vec<&str>)> = Vec::new();
    for line in reply.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with('#') {
            let heading = trimmed.trim_start_matches('#').trim();
            if !heading.is_empty() {
                sections.push((heading.to_string(), Vec::new()));
                continue;
            }
        }
        // Text before the first heading is dropped.
        if let Some((_, body)) = sections.last_mut() {
            body.push(line);
        }
    }

    sections
        .into_iter()
        .map(|(heading, body)| Section::new(heading, body.join("\n").trim()))
        .collect()
}
