use crate::telegram::client::TelegramError;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

/// Envelope wrapping every Bot API response.
#[derive(Serialize, Deserialize, Debug)]
pub struct TelegramResponse<T> {
    pub ok: bool,
    pub result: Option<T>,
    pub description: Option<String>,
    pub error_code: Option<i32>,
}

impl<T> TelegramResponse<T> {
    pub fn into_result(self) -> Result<T, TelegramError> {
        match (self.ok, self.result) {
            (true, Some(result)) => Ok(result),
            (_, _) => Err(TelegramError::ApiError {
                code: self.error_code.unwrap_or_default(),
                description: self
                    .description
                    .unwrap_or(String::from("response has no result")),
            }),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct User {
    pub id: i64,
    pub is_bot: bool,
    pub first_name: String,
    pub username: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Chat {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Message {
    pub message_id: i64,
    pub from: Option<User>,
    pub chat: Chat,
    pub date: i64,
    pub text: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
}

#[skip_serializing_none]
#[derive(Serialize, Debug)]
pub struct GetUpdatesParams {
    pub offset: Option<i64>,
    pub timeout: Option<u64>,
    pub allowed_updates: Option<Vec<String>>,
}

#[derive(Serialize, Debug)]
pub struct SendMessageParams<'a> {
    pub chat_id: i64,
    pub text: &'a str,
}

/// A `/command[@bot] arg...` message split into its parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotCommand<'a> {
    pub name: &'a str,
    pub mention: Option<&'a str>,
    pub args: Vec<&'a str>,
}

impl<'a> BotCommand<'a> {
    /// Returns `None` unless the first token starts with `/`.
    pub fn parse(text: &'a str) -> Option<Self> {
        let mut tokens = text.split_whitespace();
        let head = tokens.next()?.strip_prefix('/')?;

        let (name, mention) = match head.split_once('@') {
            Some((name, mention)) => (name, Some(mention)),
            None => (head, None),
        };
        if name.is_empty() {
            return None;
        }

        Some(BotCommand {
            name,
            mention,
            args: tokens.collect(),
        })
    }

    /// Whether the command is meant for the bot named `username`.
    ///
    /// Commands without a mention are addressed to every bot in the chat.
    pub fn is_addressed_to(&self, username: Option<&str>) -> bool {
        match (self.mention, username) {
            (None, _) => true,
            (Some(mention), Some(username)) => mention.eq_ignore_ascii_case(username),
            (Some(_), None) => false,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_deserialize_updates() {
        let raw = r#"
        {
            "ok": true,
            "result": [
                {
                    "update_id": 861240012,
                    "message": {
                        "message_id": 42,
                        "from": {
                            "id": 1001,
                            "is_bot": false,
                            "first_name": "Alice",
                            "username": "alice"
                        },
                        "chat": {"id": 1001, "first_name": "Alice", "type": "private"},
                        "date": 1700000000,
                        "text": "/rating 800 greedy",
                        "entities": [{"offset": 0, "length": 7, "type": "bot_command"}]
                    }
                },
                {
                    "update_id": 861240013,
                    "edited_message": {
                        "message_id": 42,
                        "chat": {"id": 1001, "type": "private"},
                        "date": 1700000001,
                        "text": "/rating 900 greedy"
                    }
                }
            ]
        }
        "#;

        let response: TelegramResponse<Vec<Update>> = serde_json::from_str(raw).unwrap();
        let updates = response.into_result().unwrap();

        assert_eq!(updates.len(), 2);
        let message = updates[0].message.as_ref().unwrap();
        assert_eq!(message.chat.id, 1001);
        assert_eq!(message.chat.kind, "private");
        assert_eq!(message.text.as_deref(), Some("/rating 800 greedy"));
        assert!(updates[1].message.is_none());
    }

    #[test]
    fn test_deserialize_error_response() {
        let raw = r#"{"ok": false, "error_code": 401, "description": "Unauthorized"}"#;
        let response: TelegramResponse<User> = serde_json::from_str(raw).unwrap();

        match response.into_result() {
            Err(TelegramError::ApiError { code, description }) => {
                assert_eq!(code, 401);
                assert_eq!(description, "Unauthorized");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_serialize_get_updates_skips_none() {
        let params = GetUpdatesParams {
            offset: None,
            timeout: Some(30),
            allowed_updates: Some(vec![String::from("message")]),
        };

        assert_eq!(
            serde_json::to_string(&params).unwrap(),
            r#"{"timeout":30,"allowed_updates":["message"]}"#
        );
    }

    #[test]
    fn test_serialize_send_message() {
        let params = SendMessageParams {
            chat_id: 1001,
            text: "No problems found.",
        };

        assert_eq!(
            serde_json::to_string(&params).unwrap(),
            r#"{"chat_id":1001,"text":"No problems found."}"#
        );
    }

    #[test]
    fn test_parse_command() {
        let command = BotCommand::parse("/rating 800 greedy").unwrap();

        assert_eq!(command.name, "rating");
        assert_eq!(command.mention, None);
        assert_eq!(command.args, vec!["800", "greedy"]);
    }

    #[test]
    fn test_parse_command_with_mention() {
        let command = BotCommand::parse("/help@CfProblemsBot").unwrap();

        assert_eq!(command.name, "help");
        assert_eq!(command.mention, Some("CfProblemsBot"));
        assert!(command.args.is_empty());
        assert!(command.is_addressed_to(Some("cfproblemsbot")));
        assert!(!command.is_addressed_to(Some("OtherBot")));
    }

    #[test]
    fn test_parse_command_collapses_whitespace() {
        let command = BotCommand::parse("  /rating   1200\tdp  ").unwrap();

        assert_eq!(command.args, vec!["1200", "dp"]);
    }

    #[test]
    fn test_parse_not_a_command() {
        assert_eq!(BotCommand::parse("hello there"), None);
        assert_eq!(BotCommand::parse(""), None);
        assert_eq!(BotCommand::parse("/"), None);
        assert_eq!(BotCommand::parse("/@bot"), None);
    }
}
