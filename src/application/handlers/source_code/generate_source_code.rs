//! GenerateSourceCodeHandler - generates a source file from a document.

use async_trait::async_trait;
use std::sync::Arc;

use crate::application::{
    encode_json, spawn_pipeline, strip_code_fences, ContentGenerator, Pipeline, PipelineError,
    PipelineOutcome, StartedJob,
};
use crate::domain::document::Document;
use crate::domain::foundation::{DocumentId, ErrorCode};
use crate::domain::job::{Checkpoint, JobKind};
use crate::domain::source_code::{Language, SourceCode};
use crate::ports::{DocumentRepository, JobRepository, ProgressSink, SourceCodeRepository};

const LOADED: Checkpoint = Checkpoint::new("document loaded", 20);
const GENERATED: Checkpoint = Checkpoint::new("code generated", 80);
const SAVED: Checkpoint = Checkpoint::new("source code saved", 100);

/// File stem used when the document title yields no usable characters.
const DEFAULT_STEM: &str = "source";

#[derive(Debug, Clone)]
pub struct GenerateSourceCodeCommand {
    pub document_id: DocumentId,
    pub language: Language,
}

pub struct GenerateSourceCodeHandler {
    documents: Arc<dyn DocumentRepository>,
    source_codes: Arc<dyn SourceCodeRepository>,
    jobs: Arc<dyn JobRepository>,
    generator: ContentGenerator,
}

impl GenerateSourceCodeHandler {
    pub fn new(
        documents: Arc<dyn DocumentRepository>,
        source_codes: Arc<dyn SourceCodeRepository>,
        jobs: Arc<dyn JobRepository>,
        generator: ContentGenerator,
    ) -> Self {
        Self {
            documents,
            source_codes,
            jobs,
            generator,
        }
    }

    pub async fn handle(&self, cmd: GenerateSourceCodeCommand) -> Result<StartedJob, PipelineError> {
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
        let pipeline = SourceCodeGeneration {
            document,
            language: cmd.language,
            source_codes: self.source_codes.clone(),
            generator: self.generator.clone(),
        };
        Ok(spawn_pipeline(self.jobs.clone(), Some(project_id), None, pipeline).await?)
    }
}

struct SourceCodeGeneration {
    document: Document,
    language: Language,
    source_codes: Arc<dyn SourceCodeRepository>,
    generator: ContentGenerator,
}

#[async_trait]
impl Pipeline for SourceCodeGeneration {
    fn kind(&self) -> JobKind {
        JobKind::SourceCodeGeneration
    }

    async fn run(&self, progress: &dyn ProgressSink) -> Result<PipelineOutcome, PipelineError> {
        progress.advance(LOADED).await?;

        let system_prompt = format!(
            "You are an excellent software engineer. Based on the following document, \
             generate source code in {}. Respond with the code only.",
            self.language.display_name()
        );
        let user_prompt = format!("Document content: {}", encode_json(self.document.content())?);

        let (content, fallback_reason) = match self
            .generator
            .generate(
                "source_code.generate",
                Some(*self.document.project_id()),
                &system_prompt,
                &user_prompt,
            )
            .await
        {
            Ok(reply) => (strip_code_fences(&reply), None),
            Err(err) => {
                let reason = format!("AI request failed: {}", err);
                tracing::warn!(document_id = %self.document.id(), reason = %reason, "writing sample source code");
                (SourceCode::sample_content(self.language), Some(reason))
            }
        };
        progress.advance(GENERATED).await?;

        let project_id = *self.document.project_id();
        let source_code =
            match SourceCode::generated(project_id, self.document.title(), self.language, content.clone()) {
                Ok(source_code) => source_code,
                Err(_) => SourceCode::generated(project_id, DEFAULT_STEM, self.language, content)?,
            };
        self.source_codes.save(&source_code).await?;
        progress.advance(SAVED).await?;

        Ok(PipelineOutcome::generated(source_code.id).with_fallback(fallback_reason))
    }
}
