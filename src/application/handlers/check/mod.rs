//! Quality and consistency check handlers.

mod check_queries;
mod consistency_check;
mod quality_check;

pub use check_queries::GetCheckHandler;
pub use consistency_check::{
    first_integer, StartConsistencyCheckCommand, StartConsistencyCheckHandler,
};
pub use quality_check::{StartQualityCheckCommand, StartQualityCheckHandler};

use serde::Deserialize;

use crate::application::{parse_json, StartedJob};
use crate::domain::quality::{Issue, QualityCheck, Suggestion};

/// A started check: the record clients read and the job they poll.
#[derive(Debug)]
pub struct StartedCheck {
    pub check: QualityCheck,
    pub started: StartedJob,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IssueList {
    Wrapped { issues: Vec<Issue> },
    List(Vec<Issue>),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SuggestionList {
    Wrapped { suggestions: Vec<Suggestion> },
    List(Vec<Suggestion>),
}

/// Reads issues from a JSON array or an `{"issues": [...]}` object.
pub(crate) fn parse_issues(reply: &str) -> Option<Vec<Issue>> {
    match parse_json::<IssueList>(reply)? {
        IssueList::Wrapped { issues } | IssueList::List(issues) => Some(issues),
    }
}

pub(crate) fn parse_suggestions(reply: &str) -> Option<Vec<Suggestion>> {
    match parse_json::<SuggestionList>(reply)? {
        SuggestionList::Wrapped { suggestions } | SuggestionList::List(suggestions) => {
            Some(suggestions)
        }
    }
}
