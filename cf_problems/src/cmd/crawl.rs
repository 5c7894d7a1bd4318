use crate::{
    cmd::connect,
    modules::problems::{
        crawler::ProblemCrawler,
        repository::{PgProblemStore, SaveMode},
    },
};
use anyhow::{Context, Result};
use cf_problems_libs::codeforces::{CodeforcesClient, PROBLEMSET_URL};
use clap::Args;
use sqlx::{postgres::Postgres, Pool};

#[derive(Debug, Args)]
pub struct CrawlArgs {
    /// Append every problem, or update problems already stored with the same number
    #[arg(long, env = "SAVE_MODE", value_enum, default_value_t = SaveMode::Insert)]
    pub mode: SaveMode,
    /// Codeforces problemset endpoint
    #[arg(long, env = "CODEFORCES_API_URL", default_value = PROBLEMSET_URL)]
    pub endpoint: String,
}

pub async fn run(args: CrawlArgs) -> Result<()> {
    let pool = connect().await?;
    crawl(&pool, &args).await?;
    pool.close().await;

    Ok(())
}

/// Fetch, normalize and save the problemset once.
pub async fn crawl(pool: &Pool<Postgres>, args: &CrawlArgs) -> Result<()> {
    let client = CodeforcesClient::new(&args.endpoint).with_context(|| {
        let message = format!("couldn't create Codeforces client for {}", args.endpoint);
        tracing::error!(message);
        message
    })?;

    let store = PgProblemStore::new(pool);
    let crawler = ProblemCrawler::new(client, &store);
    let saved = crawler.run(args.mode).await?;
    tracing::info!("Crawling finished, {} problems saved.", saved);

    Ok(())
}
