use crate::types::tables::Problem;
use anyhow::{Context, Result};
use async_trait::async_trait;
use cf_problems_libs::Columns;
use clap::ValueEnum;
use sqlx::{postgres::Postgres, Pool};
use std::fmt;

/// Maximum number of problems returned by a single query.
pub const QUERY_LIMIT: i64 = 10;

/// How the loader treats a problem whose number already exists in the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SaveMode {
    /// Always append a new row. Re-running the ingestion duplicates problems.
    #[default]
    Insert,
    /// Update the rows having the same number, insert otherwise.
    Upsert,
}

impl fmt::Display for SaveMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SaveMode::Insert => write!(f, "insert"),
            SaveMode::Upsert => write!(f, "upsert"),
        }
    }
}

#[async_trait]
pub trait ProblemStore: Send + Sync {
    /// Write every problem in one transaction.
    async fn save(&self, problems: &[Problem], mode: SaveMode) -> Result<()>;

    /// Problems having exactly `rating` and tagged with `tag`, most solved first.
    async fn find_by_rating_and_tag(&self, rating: i32, tag: &str) -> Result<Vec<Problem>>;
}

pub struct PgProblemStore<'a> {
    pool: &'a Pool<Postgres>,
}

impl<'a> PgProblemStore<'a> {
    pub fn new(pool: &'a Pool<Postgres>) -> Self {
        Self { pool }
    }
}

fn save_statement(mode: SaveMode) -> String {
    match mode {
        SaveMode::Insert => format!(
            "INSERT INTO problems ({}) VALUES ({});",
            Problem::columns(),
            Problem::placeholders()
        ),
        // MERGE INTO requires PostgreSQL 15 or later
        SaveMode::Upsert => String::from(
            r#"
            MERGE INTO problems
            USING
                (VALUES($1, $2, $3, $4, $5)) AS problem(name, number, tags, solved_count, rating)
            ON
                problems.number = problem.number
            WHEN MATCHED THEN
                UPDATE SET (name, tags, solved_count, rating) =
                    (problem.name, problem.tags, problem.solved_count, problem.rating)
            WHEN NOT MATCHED THEN
                INSERT (name, number, tags, solved_count, rating)
                VALUES (
                    problem.name,
                    problem.number,
                    problem.tags,
                    problem.solved_count,
                    problem.rating
                );
            "#,
        ),
    }
}

fn select_statement() -> String {
    format!(
        r#"
        SELECT {} FROM problems
        WHERE rating = $1 AND $2 = ANY(tags)
        ORDER BY solved_count DESC
        LIMIT $3;
        "#,
        Problem::columns()
    )
}

#[async_trait]
impl<'a> ProblemStore for PgProblemStore<'a> {
    async fn save(&self, problems: &[Problem], mode: SaveMode) -> Result<()> {
        tracing::info!("Start to save {} problems in {} mode.", problems.len(), mode);
        let statement = save_statement(mode);

        let mut tx = self.pool.begin().await.with_context(|| {
            let message = "failed to start transaction";
            tracing::error!(message);
            message
        })?;

        for problem in problems.iter() {
            let result = sqlx::query(&statement)
                .bind(&problem.name)
                .bind(&problem.number)
                .bind(&problem.tags)
                .bind(problem.solved_count)
                .bind(problem.rating)
                .execute(&mut tx)
                .await;

            // roll back the whole batch on the first failure
            if let Err(e) = result {
                let message =
                    format!("an error occurred at saving {}: [{:?}]", problem.number, e);
                tracing::error!(message);
                tx.rollback().await?;
                anyhow::bail!(message);
            }
        }

        tx.commit().await?;
        tracing::info!("{} problems successfully saved.", problems.len());

        Ok(())
    }

    async fn find_by_rating_and_tag(&self, rating: i32, tag: &str) -> Result<Vec<Problem>> {
        let statement = select_statement();
        let problems: Vec<Problem> = sqlx::query_as(&statement)
            .bind(rating)
            .bind(tag)
            .bind(QUERY_LIMIT)
            .fetch_all(self.pool)
            .await
            .with_context(|| {
                let message = format!(
                    "failed to find problems with rating {} and tag {}",
                    rating, tag
                );
                tracing::error!(message);
                message
            })?;

        tracing::info!(
            "{} problems found with rating {} and tag {}",
            problems.len(),
            rating,
            tag
        );

        Ok(problems)
    }
}
