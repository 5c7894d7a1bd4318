use crate::{
    modules::problems::repository::{ProblemStore, SaveMode},
    types::tables::Problem,
};
use anyhow::{Context, Result};
use cf_problems_libs::codeforces::{CodeforcesClient, ProblemsetResult};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NormalizeError {
    #[error("malformed upstream response: {problems} problems but {statistics} statistics")]
    LengthMismatch { problems: usize, statistics: usize },
    #[error(
        "malformed upstream response: problem {expected} at {position} \
         is paired with statistics of {actual}"
    )]
    Misaligned {
        position: usize,
        expected: String,
        actual: String,
    },
}

/// Pair the i-th problem with the i-th statistic entry and flatten them into rows.
///
/// A problem without rating gets rating 0.
pub fn normalize(result: ProblemsetResult) -> Result<Vec<Problem>, NormalizeError> {
    let ProblemsetResult {
        problems,
        problem_statistics,
    } = result;

    if problems.len() != problem_statistics.len() {
        return Err(NormalizeError::LengthMismatch {
            problems: problems.len(),
            statistics: problem_statistics.len(),
        });
    }

    problems
        .into_iter()
        .zip(problem_statistics)
        .enumerate()
        .map(|(position, (problem, statistics))| {
            let contest_matches = statistics
                .contest_id
                .map_or(true, |contest_id| contest_id == problem.contest_id);
            let index_matches = statistics
                .index
                .as_ref()
                .map_or(true, |index| index == &problem.index);
            if !(contest_matches && index_matches) {
                return Err(NormalizeError::Misaligned {
                    position,
                    expected: problem.number(),
                    actual: format!(
                        "{}{}",
                        statistics
                            .contest_id
                            .map(|id| id.to_string())
                            .unwrap_or_default(),
                        statistics.index.unwrap_or_default()
                    ),
                });
            }

            Ok(Problem {
                number: problem.number(),
                rating: problem.rating.unwrap_or(0),
                name: problem.name,
                tags: problem.tags,
                solved_count: statistics.solved_count,
            })
        })
        .collect()
}

pub struct ProblemCrawler<'a, S: ProblemStore + ?Sized> {
    client: CodeforcesClient,
    store: &'a S,
}

impl<'a, S: ProblemStore + ?Sized> ProblemCrawler<'a, S> {
    pub fn new(client: CodeforcesClient, store: &'a S) -> Self {
        Self { client, store }
    }

    /// Normalize a fetched problemset and save it.
    pub async fn ingest(&self, result: ProblemsetResult, mode: SaveMode) -> Result<usize> {
        let problems = normalize(result).map_err(|e| {
            tracing::error!("{}", e);
            e
        })?;
        tracing::info!(
            "{} problems information successfully normalized.",
            problems.len()
        );

        self.store.save(&problems, mode).await?;

        Ok(problems.len())
    }

    /// Run the whole pipeline from fetching to saving.
    pub async fn run(&self, mode: SaveMode) -> Result<usize> {
        tracing::info!("Start to crawl problems information.");
        let result = self.client.problemset().await.with_context(|| {
            let message = "failed to fetch problemset from Codeforces";
            tracing::error!(message);
            message
        })?;
        tracing::info!(
            "{} problems information successfully crawled.",
            result.problems.len()
        );

        self.ingest(result, mode).await
    }
}
