use crate::{modules::problems::repository::ProblemStore, types::tables::Problem};
use anyhow::Result;
use cf_problems_libs::telegram::BotCommand;
use itertools::Itertools;

pub const WELCOME_MESSAGE: &str =
    "Welcome to the Codeforces problems bot! Type /help for more information.";
pub const HELP_MESSAGE: &str = "To get problems by rating and tag, type:\n/rating <rating> <tag>";
pub const INVALID_INPUT_MESSAGE: &str = "Invalid input. Please enter a rating followed by a tag.";
pub const NOT_FOUND_MESSAGE: &str = "No problems found.";
const RESULT_HEADER: &str = "Here are the top 10 problems:\n";

/// Arguments of `/rating`: exactly a rating and a tag.
pub fn parse_rating_args<'a>(args: &[&'a str]) -> Option<(i32, &'a str)> {
    match args {
        [rating, tag] => rating.parse::<i32>().ok().map(|rating| (rating, *tag)),
        _ => None,
    }
}

/// Numbered list of problems, one line each.
pub fn render_problems(problems: &[Problem]) -> String {
    let lines = problems
        .iter()
        .enumerate()
        .map(|(i, problem)| {
            format!(
                "{}. {} (solved count: {}, rating: {})\n",
                i + 1,
                problem.name,
                problem.solved_count,
                problem.rating
            )
        })
        .join("");

    format!("{}{}", RESULT_HEADER, lines)
}

async fn rating<S: ProblemStore + ?Sized>(store: &S, args: &[&str]) -> Result<String> {
    let (rating, tag) = match parse_rating_args(args) {
        Some(parsed) => parsed,
        None => {
            tracing::info!("invalid arguments for /rating: {:?}", args);
            return Ok(String::from(INVALID_INPUT_MESSAGE));
        }
    };

    let problems = store.find_by_rating_and_tag(rating, tag).await?;
    if problems.is_empty() {
        return Ok(String::from(NOT_FOUND_MESSAGE));
    }

    Ok(render_problems(&problems))
}

/// Reply text for a command, or `None` when the bot doesn't know the command.
pub async fn handle<S: ProblemStore + ?Sized>(
    store: &S,
    command: &BotCommand<'_>,
) -> Result<Option<String>> {
    let reply = match command.name {
        "start" => String::from(WELCOME_MESSAGE),
        "help" => String::from(HELP_MESSAGE),
        "rating" => rating(store, &command.args).await?,
        _ => return Ok(None),
    };

    Ok(Some(reply))
}
