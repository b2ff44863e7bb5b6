//! Bot transport abstraction

use anyhow::Result;
use async_trait::async_trait;

/// Where a message came from and where the reply goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageContext {
    /// Conversation identifier (group or private chat)
    pub chat_id: String,
    /// Sender identifier
    pub sender: String,
}

impl MessageContext {
    pub fn console() -> Self {
        Self {
            chat_id: "console".to_string(),
            sender: std::env::var("USER").unwrap_or_else(|_| "user".to_string()),
        }
    }
}

/// One inbound text event
#[derive(Debug, Clone)]
pub struct InboundMessage {
    pub text: String,
    pub context: MessageContext,
}

/// Capability to send a reply into a conversation
#[async_trait]
pub trait BotClient: Send + Sync {
    async fn send_message(&self, context: &MessageContext, content: &str) -> Result<()>;
}

/// Prints replies to stdout
pub struct ConsoleBot;

#[async_trait]
impl BotClient for ConsoleBot {
    async fn send_message(&self, context: &MessageContext, content: &str) -> Result<()> {
        println!("[{}] {}", context.chat_id, content);
        Ok(())
    }
}
