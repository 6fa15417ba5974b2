//! Communication - the outgoing message log

use std::fmt;

use serde::{Deserialize, Serialize};

pub const MAX_MESSAGES: usize = 10;

pub const FAKE_TRADE_REQUEST: &str = "Trade Request: 100 Iron for 200 Gold";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub recipient: String,
    pub content: String,
    pub is_fake: bool,
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.content)?;
        if self.is_fake {
            f.write_str(" (FAKE)")?;
        }
        Ok(())
    }
}

/// Messages this kingdom has sent, at most [`MAX_MESSAGES`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Communication {
    sent: Vec<Message>,
}

impl Communication {
    pub fn new() -> Self {
        Self::default()
    }

    /// Log a message. Returns false once the log is full; nothing is overwritten.
    pub fn send_message(&mut self, recipient: &str, content: &str, is_fake: bool) -> bool {
        if self.sent.len() >= MAX_MESSAGES {
            tracing::info!(recipient, "message limit reached");
            return false;
        }
        self.sent.push(Message {
            recipient: recipient.to_string(),
            content: content.to_string(),
            is_fake,
        });
        tracing::debug!(recipient, is_fake, "message sent");
        true
    }

    pub fn send_fake_trade_request(&mut self, recipient: &str) -> bool {
        self.send_message(recipient, FAKE_TRADE_REQUEST, true)
    }

    /// Messages in this log addressed to `kingdom`
    pub fn messages_for<'a>(&'a self, kingdom: &'a str) -> impl Iterator<Item = &'a Message> + 'a {
        self.sent.iter().filter(move |m| m.recipient == kingdom)
    }

    pub fn sent(&self) -> &[Message] {
        &self.sent
    }
}
