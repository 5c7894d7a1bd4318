use crate::codeforces::client::CodeforcesError;
use serde::{Deserialize, Serialize};

/// `status` field of the Codeforces API envelope.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseStatus {
    #[default]
    #[serde(rename = "OK")]
    Ok,
    #[serde(rename = "FAILED")]
    Failed,
}

/// Envelope wrapping every Codeforces API response.
///
/// A body without `status` is accepted as successful.
#[derive(Serialize, Deserialize, Debug)]
pub struct CodeforcesResponse<T> {
    #[serde(default)]
    pub status: ResponseStatus,
    pub comment: Option<String>,
    pub result: Option<T>,
}

impl<T> CodeforcesResponse<T> {
    pub fn into_result(self) -> Result<T, CodeforcesError> {
        match self.status {
            ResponseStatus::Ok => self.result.ok_or(CodeforcesError::ApiError(String::from(
                "response has no result",
            ))),
            ResponseStatus::Failed => Err(CodeforcesError::ApiError(
                self.comment.unwrap_or(String::from("unknown error")),
            )),
        }
    }
}

/// `result` of `problemset.problems`: two index-aligned lists.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ProblemsetResult {
    pub problems: Vec<ProblemDescriptor>,
    #[serde(alias = "problemStatistics")]
    pub problem_statistics: Vec<ProblemStatistics>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ProblemDescriptor {
    #[serde(alias = "contestId")]
    pub contest_id: i64,
    pub index: String,
    pub name: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub rating: Option<i32>,
}

impl ProblemDescriptor {
    /// Contest id followed by the index inside the contest, e.g. `1792A`.
    pub fn number(&self) -> String {
        format!("{}{}", self.contest_id, self.index)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ProblemStatistics {
    #[serde(alias = "contestId")]
    pub contest_id: Option<i64>,
    pub index: Option<String>,
    #[serde(alias = "solvedCount")]
    pub solved_count: i32,
}
