use crate::modules::{bot::handlers, problems::repository::ProblemStore};
use anyhow::{Context, Result};
use cf_problems_libs::telegram::{BotCommand, Message, TelegramClient};
use tokio::time::{self, Duration};

/// Seconds a single getUpdates call waits for new messages.
const POLLING_TIMEOUT: u64 = 30;
const RETRY_INTERVAL: Duration = Duration::from_secs(5);

/// Long polling loop answering bot commands one message at a time.
pub struct BotRunner<'a, S: ProblemStore + ?Sized> {
    client: TelegramClient,
    store: &'a S,
    username: Option<String>,
    offset: Option<i64>,
}

impl<'a, S: ProblemStore + ?Sized> BotRunner<'a, S> {
    pub fn new(client: TelegramClient, store: &'a S) -> Self {
        Self {
            client,
            store,
            username: None,
            offset: None,
        }
    }

    /// Poll until SIGINT or SIGTERM is received.
    pub async fn run(&mut self) -> Result<()> {
        let me = self.client.get_me().await.with_context(|| {
            let message = "failed to get bot information. check TELEGRAM_BOT_TOKEN.";
            tracing::error!(message);
            message
        })?;
        tracing::info!(
            "Bot @{} starts polling.",
            me.username.as_deref().unwrap_or(&me.first_name)
        );
        self.username = me.username;

        let shutdown = shutdown_signal();
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                _ = self.poll() => {},
            }
        }

        tracing::info!("Bot stopped polling.");
        Ok(())
    }

    async fn poll(&mut self) {
        let updates = match self.client.get_updates(self.offset, POLLING_TIMEOUT).await {
            Ok(updates) => updates,
            Err(e) => {
                tracing::error!("failed to get updates: {}", e);
                time::sleep(RETRY_INTERVAL).await;
                return;
            }
        };

        for update in updates {
            self.offset = Some(update.update_id + 1);
            if let Some(message) = update.message {
                self.dispatch(&message).await;
            }
        }
    }

    async fn dispatch(&self, message: &Message) {
        let Some(command) = message.text.as_deref().and_then(BotCommand::parse) else {
            return;
        };
        if !command.is_addressed_to(self.username.as_deref()) {
            return;
        }

        tracing::info!(
            "Received /{} {:?} from chat {}",
            command.name,
            command.args,
            message.chat.id
        );

        match handlers::handle(self.store, &command).await {
            Ok(Some(reply)) => {
                match self.client.send_message(message.chat.id, &reply).await {
                    Ok(_) => {
                        tracing::info!("Replied to /{} in chat {}", command.name, message.chat.id)
                    }
                    Err(e) => {
                        tracing::error!("failed to reply to chat {}: {}", message.chat.id, e)
                    }
                }
            }
            Ok(None) => {
                tracing::debug!("ignore unknown command /{}", command.name);
            }
            Err(e) => {
                tracing::error!("failed to handle /{}: {:?}", command.name, e);
            }
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, stop polling.");
}
