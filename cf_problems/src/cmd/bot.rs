use crate::{
    cmd::{
        connect,
        crawl::{self, CrawlArgs},
    },
    modules::{bot::runner::BotRunner, problems::repository::PgProblemStore},
};
use anyhow::{Context, Result};
use cf_problems_libs::telegram::TelegramClient;
use clap::Args;
use std::env;

#[derive(Debug, Args)]
pub struct BotArgs {
    #[command(flatten)]
    crawl: CrawlArgs,
    /// Serve from the problems already stored instead of crawling at startup
    #[arg(long)]
    skip_crawl: bool,
}

pub async fn run(args: BotArgs) -> Result<()> {
    let token: String = env::var("TELEGRAM_BOT_TOKEN").with_context(|| {
        let message = "TELEGRAM_BOT_TOKEN must be configured.";
        tracing::error!(message);
        message
    })?;
    let client = TelegramClient::new(&token).with_context(|| {
        let message = "couldn't create Telegram client";
        tracing::error!(message);
        message
    })?;

    let pool = connect().await?;

    if args.skip_crawl {
        tracing::info!("Skip crawling, serve problems already stored.");
    } else {
        crawl::crawl(&pool, &args.crawl).await?;
    }

    let store = PgProblemStore::new(&pool);
    let mut runner = BotRunner::new(client, &store);
    runner.run().await?;

    pool.close().await;
    Ok(())
}
