use crate::codeforces::model::{CodeforcesResponse, ProblemsetResult};
use reqwest::{Client, Url};
use serde_json::Value;
use thiserror::Error;

type Result<T> = std::result::Result<T, CodeforcesError>;

pub const PROBLEMSET_URL: &str = "https://codeforces.com/api/problemset.problems";

#[derive(Debug, Error)]
pub enum CodeforcesError {
    #[error("failed to request to codeforces api")]
    RequestError(#[from] reqwest::Error),
    #[error("failed to deserialize JSON data")]
    DeserializeError(#[from] serde_json::Error),
    #[error("invalid codeforces api url given")]
    InvalidUrlError(#[from] url::ParseError),
    #[error("codeforces api returned an error: {0}")]
    ApiError(String),
    #[error("{0}")]
    UnexpectedError(String),
}

/// Client of the Codeforces `problemset.problems` endpoint.
pub struct CodeforcesClient {
    endpoint: Url,
    client: Client,
}

impl CodeforcesClient {
    pub fn new(endpoint: &str) -> Result<Self> {
        let endpoint = Url::parse(endpoint)?;
        let client = Client::builder().gzip(true).build()?;

        Ok(CodeforcesClient { endpoint, client })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Fetch the whole problemset in one request.
    pub async fn problemset(&self) -> Result<ProblemsetResult> {
        tracing::info!("Attempting to get problem list from {}", self.endpoint);
        let res = self.client.get(self.endpoint.clone()).send().await?;

        match res.error_for_status_ref() {
            Ok(_) => {
                let body = res.text().await?;
                let response: CodeforcesResponse<ProblemsetResult> = serde_json::from_str(&body)?;
                let result = response.into_result()?;

                tracing::info!(
                    "{} problems and {} statistics retrieved.",
                    result.problems.len(),
                    result.problem_statistics.len()
                );
                Ok(result)
            }
            Err(e) => {
                // Codeforces answers a failed call with a 400 and a FAILED envelope.
                let body = res.text().await.unwrap_or_default();
                let comment = serde_json::from_str::<CodeforcesResponse<Value>>(&body)
                    .ok()
                    .and_then(|response| response.comment)
                    .unwrap_or_default();
                Err(CodeforcesError::UnexpectedError(format!(
                    "unexpected error [{}] cause [{}]",
                    e, comment
                )))
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn create_new_client() {
        let client = CodeforcesClient::new(PROBLEMSET_URL).unwrap();

        assert_eq!(
            client.endpoint(),
            &Url::parse("https://codeforces.com/api/problemset.problems").unwrap()
        );
    }

    #[test]
    fn create_client_with_invalid_url() {
        let client = CodeforcesClient::new("not a url");

        assert!(matches!(client, Err(CodeforcesError::InvalidUrlError(_))));
    }

    /// Normal system test to fetch the real problemset.
    ///
    /// Requires network access to codeforces.com.
    #[tokio::test]
    #[ignore]
    async fn test_fetch_problemset() {
        let client = CodeforcesClient::new(PROBLEMSET_URL).unwrap();
        let result = client.problemset().await.unwrap();

        assert!(!result.problems.is_empty());
        assert_eq!(result.problems.len(), result.problem_statistics.len());
    }
}
