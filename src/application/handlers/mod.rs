//! Application handlers.
//!
//! One module per feature. Generation handlers return a started job;
//! estimates and progress reports run inline.

pub mod check;
pub mod document;
pub mod estimate;
pub mod job;
pub mod project;
pub mod proposal;
pub mod report;
pub mod source_code;

pub use check::{
    GetCheckHandler, StartConsistencyCheckCommand, StartConsistencyCheckHandler,
    StartQualityCheckCommand, StartQualityCheckHandler, StartedCheck,
};
pub use document::{
    GenerateDocumentCommand, GenerateDocumentHandler, GetDocumentHandler, ListDocumentsHandler,
    RegisterDocumentCommand, RegisterDocumentHandler,
};
pub use estimate::{GetLatestEstimateHandler, RunWorkEstimateCommand, RunWorkEstimateHandler};
pub use job::GetJobHandler;
pub use project::{
    CreateProjectCommand, CreateProjectHandler, GetProjectHandler, GetProjectQuery,
    ListProjectsHandler, ListTemplatesHandler, RecordActivityCommand, RecordActivityHandler,
};
pub use proposal::{CreateProposalCommand, CreateProposalHandler, GetProposalHandler};
pub use report::{
    GetProgressReportHandler, ProgressReportOutcome, RunProgressReportCommand,
    RunProgressReportHandler, NO_ACTIVITY_MESSAGE,
};
pub use source_code::{
    GenerateSourceCodeCommand, GenerateSourceCodeHandler, GetSourceCodeHandler,
    ListSourceCodesHandler,
};
