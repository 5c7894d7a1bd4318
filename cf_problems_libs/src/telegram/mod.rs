pub mod client;
pub mod model;

pub use client::{TelegramClient, TelegramError, TELEGRAM_API_URL};
pub use model::{BotCommand, Chat, Message, Update, User};
