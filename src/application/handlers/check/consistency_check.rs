//! StartConsistencyCheckHandler - cross-checks a set of documents.
//!
//! Five chained model stages, each fed the previous reply:
//!
//! | stage | checkpoint |
//! |---|---|
//! | relationship analysis | 20 |
//! | keyword and concept consistency | 40 |
//! | requirement/design traceability | 60 |
//! | inconsistency listing | 80 |
//! | scoring | 90 |
//!
//! The result is saved at 100. A failure in any stage stores the sample
//! result instead.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use std::sync::Arc;

use super::{parse_issues, StartedCheck};
use crate::application::{
    encode_json, spawn_pipeline, ContentGenerator, Pipeline, PipelineError, PipelineOutcome,
};
use crate::domain::document::Document;
use crate::domain::foundation::{DocumentId, ErrorCode, Percentage};
use crate::domain::job::{Checkpoint, JobKind};
use crate::domain::quality::{
    consistency_sample, CheckKind, CheckResult, Issue, QualityCheck, Severity,
};
use crate::ports::{DocumentRepository, JobRepository, ProgressSink, QualityCheckRepository};

struct Stage {
    operation: &'static str,
    system_prompt: &'static str,
    checkpoint: Checkpoint,
}

const STAGES: [Stage; 5] = [
    Stage {
        operation: "consistency.relationships",
        system_prompt: "Analyze the relationships between the following documents.",
        checkpoint: Checkpoint::new("relationships analyzed", 20),
    },
    Stage {
        operation: "consistency.keywords",
        system_prompt: "Check the consistency of keywords and concepts in the following analysis.",
        checkpoint: Checkpoint::new("keywords checked", 40),
    },
    Stage {
        operation: "consistency.traceability",
        system_prompt: "Verify traceability between requirements and design in the following analysis.",
        checkpoint: Checkpoint::new("traceability verified", 60),
    },
    Stage {
        operation: "consistency.inconsistencies",
        system_prompt: "Identify the inconsistencies in the following analysis and list them, \
                        one per line, or as a JSON array of {\"type\", \"description\", \"severity\"}.",
        checkpoint: Checkpoint::new("inconsistencies listed", 80),
    },
    Stage {
        operation: "consistency.score",
        system_prompt: "Calculate a consistency score from 0 to 100 for the following findings. \
                        Start your reply with the score.",
        checkpoint: Checkpoint::new("score calculated", 90),
    },
];

const LISTING_STAGE: usize = 3;

const SAVED: Checkpoint = Checkpoint::new("result saved", 100);

static FIRST_INTEGER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").expect("valid regex"));

/// First run of digits in `reply`, clamped to 0..=100.
pub fn first_integer(reply: &str) -> Option<Percentage> {
    let digits = FIRST_INTEGER.find(reply)?.as_str();
    let value = digits.parse::<i64>().unwrap_or(i64::MAX);
    Some(Percentage::clamped(value))
}

#[derive(Debug, Clone)]
pub struct StartConsistencyCheckCommand {
    pub document_ids: Vec<DocumentId>,
}

pub struct StartConsistencyCheckHandler {
    documents: Arc<dyn DocumentRepository>,
    checks: Arc<dyn QualityCheckRepository>,
    jobs: Arc<dyn JobRepository>,
    generator: ContentGenerator,
}

impl StartConsistencyCheckHandler {
    pub fn new(
        documents: Arc<dyn DocumentRepository>,
        checks: Arc<dyn QualityCheckRepository>,
        jobs: Arc<dyn JobRepository>,
        generator: ContentGenerator,
    ) -> Self {
        Self {
            documents,
            checks,
            jobs,
            generator,
        }
    }

    /// Validates the selection, creates the check and starts the stages.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` if no documents are given or they span projects
    /// - `NotFound` if any document is missing
    pub async fn handle(
        &self,
        cmd: StartConsistencyCheckCommand,
    ) -> Result<StartedCheck, PipelineError> {
        let mut seen = HashSet::new();
        let ids: Vec<DocumentId> = cmd
            .document_ids
            .into_iter()
            .filter(|id| seen.insert(*id))
            .collect();
        if ids.is_empty() {
            return Err(PipelineError::invalid_input("Select at least one document"));
        }

        let documents = self.documents.find_many(&ids).await?;
        if let Some(missing) = ids
            .iter()
            .find(|id| !documents.iter().any(|d| d.id() == *id))
        {
            return Err(PipelineError::not_found(
                ErrorCode::DocumentNotFound,
                format!("Document not found: {}", missing),
            ));
        }

        let project_id = *documents[0].project_id();
        if documents.iter().any(|d| *d.project_id() != project_id) {
            return Err(PipelineError::invalid_input(
                "All documents must belong to the same project",
            ));
        }

        let check = QualityCheck::new(project_id, CheckKind::Consistency);
        self.checks.save(&check).await?;

        let pipeline = ConsistencyReview {
            check: check.clone(),
            documents,
            checks: self.checks.clone(),
            generator: self.generator.clone(),
        };
        let started = spawn_pipeline(
            self.jobs.clone(),
            Some(project_id),
            Some(check.id().to_string()),
            pipeline,
        )
        .await?;

        Ok(StartedCheck { check, started })
    }
}

struct ConsistencyReview {
    check: QualityCheck,
    documents: Vec<Document>,
    checks: Arc<dyn QualityCheckRepository>,
    generator: ContentGenerator,
}

impl ConsistencyReview {
    /// Runs the stage chain. `Err` carries the reason for using the sample.
    async fn analyze(&self, progress: &dyn ProgressSink) -> Result<Result<CheckResult, String>, PipelineError> {
        let mut input = encode_json(&self.documents)?;
        let mut listing = String::new();

        for (index, stage) in STAGES.iter().enumerate() {
            let reply = match self
                .generator
                .generate(
                    stage.operation,
                    Some(*self.check.project_id()),
                    stage.system_prompt,
                    &input,
                )
                .await
            {
                Ok(reply) => reply,
                Err(err) => return Ok(Err(format!("{} failed: {}", stage.operation, err))),
            };
            progress.advance(stage.checkpoint).await?;

            if index == LISTING_STAGE {
                listing = reply.clone();
            }
            input = reply;
        }

        let Some(score) = first_integer(&input) else {
            return Ok(Err("consistency.score reply contained no number".to_string()));
        };

        Ok(Ok(CheckResult {
            score,
            issues: listed_issues(&listing),
            suggestions: Vec::new(),
        }))
    }
}

#[async_trait]
impl Pipeline for ConsistencyReview {
    fn kind(&self) -> JobKind {
        JobKind::ConsistencyCheck
    }

    async fn run(&self, progress: &dyn ProgressSink) -> Result<PipelineOutcome, PipelineError> {
        let (result, fallback) = match self.analyze(progress).await? {
            Ok(result) => (result, None),
            Err(reason) => {
                tracing::warn!(check_id = %self.check.id(), reason = %reason, "storing sample consistency result");
                (consistency_sample(), Some(reason))
            }
        };

        let mut check = self.check.clone();
        check.complete(result);
        self.checks.update(&check).await?;
        progress.advance(SAVED).await?;

        Ok(PipelineOutcome::generated(check.id()).with_fallback(fallback))
    }
}

/// Issues from the listing reply: a JSON list, else one per bullet or
/// numbered line.
fn listed_issues(listing: &str) -> Vec<Issue> {
    if let Some(issues) = parse_issues(listing) {
        return issues;
    }

    listing
        .lines()
        .filter_map(|line| {
            let line = line.trim();
            let text = line
                .strip_prefix("- ")
                .or_else(|| line.strip_prefix("* "))
                .or_else(|| line.strip_prefix("• "))
                .or_else(|| strip_numbering(line))?;
            let text = text.trim();
            (!text.is_empty()).then(|| Issue::new("inconsistency", text, Severity::Medium))
        })
        .collect()
}

fn strip_numbering(line: &str) -> Option<&str> {
    let digits = line.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits == 0 {
        return None;
    }
    line[digits..]
        .strip_prefix(". ")
        .or_else(|| line[digits..].strip_prefix(") "))
}
