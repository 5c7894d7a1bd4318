use crate::telegram::model::*;
use reqwest::{Client, Url};
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;
use thiserror::Error;

type Result<T> = std::result::Result<T, TelegramError>;

pub const TELEGRAM_API_URL: &str = "https://api.telegram.org";

#[derive(Debug, Error)]
pub enum TelegramError {
    #[error("failed to request to telegram bot api")]
    RequestError(#[from] reqwest::Error),
    #[error("failed to deserialize JSON data")]
    DeserializeError(#[from] serde_json::Error),
    #[error("invalid telegram bot api url given")]
    InvalidUrlError(#[from] url::ParseError),
    #[error("telegram bot api returned an error [{code}]: {description}")]
    ApiError { code: i32, description: String },
}

/// Minimal Bot API client: just enough for long polling and plain text replies.
pub struct TelegramClient {
    method_url: Url,
    client: Client,
}

impl TelegramClient {
    pub fn new(token: &str) -> Result<Self> {
        Self::with_base_url(token, TELEGRAM_API_URL)
    }

    pub fn with_base_url(token: &str, base_url: &str) -> Result<Self> {
        let mut method_url = Url::parse(base_url)?;
        method_url.set_path(&format!("bot{}/", token));

        // must outlive the long polling timeout passed to getUpdates
        let client = Client::builder().timeout(Duration::from_secs(90)).build()?;

        Ok(TelegramClient { method_url, client })
    }

    async fn call<P, T>(&self, method: &str, params: &P) -> Result<T>
    where
        P: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.method_url.join(method)?;
        // the url carries the bot token, keep it out of error messages
        let res = self
            .client
            .post(url)
            .json(params)
            .send()
            .await
            .map_err(|e| e.without_url())?;
        let body = res.text().await.map_err(|e| e.without_url())?;

        let response: TelegramResponse<T> = serde_json::from_str(&body)?;
        response.into_result()
    }

    pub async fn get_me(&self) -> Result<User> {
        self.call("getMe", &serde_json::json!({})).await
    }

    /// Long poll for new updates. `timeout` is in seconds.
    pub async fn get_updates(&self, offset: Option<i64>, timeout: u64) -> Result<Vec<Update>> {
        let params = GetUpdatesParams {
            offset,
            timeout: Some(timeout),
            allowed_updates: Some(vec![String::from("message")]),
        };
        self.call("getUpdates", &params).await
    }

    pub async fn send_message(&self, chat_id: i64, text: &str) -> Result<Message> {
        let params = SendMessageParams { chat_id, text };
        self.call("sendMessage", &params).await
    }
}
