//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors)
//! - `project` - Projects, proposal templates and activity logs
//! - `job` - Background pipeline runs and their progress checkpoints
//! - `document` - Uploaded documents and their generated sections
//! - `source_code` - Files generated from documents
//! - `quality` - Quality and consistency check records
//! - `estimate` - Project metrics and per-phase work estimates
//! - `report` - Progress reports computed from activity logs
//! - `proposal` - Generated proposals

pub mod document;
pub mod estimate;
pub mod foundation;
pub mod job;
pub mod project;
pub mod proposal;
pub mod quality;
pub mod report;
pub mod source_code;
