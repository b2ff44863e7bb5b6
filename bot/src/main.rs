//! chat-bot console driver
//!
//! Reads one message per line from stdin and answers through the console
//! transport. Ctrl-C while a reply is pending abandons that reply; Ctrl-C
//! at the prompt exits.

use std::sync::Arc;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};

use chat_bot::{handle_message, ChatResponder, ConsoleBot, InboundMessage, MessageContext};
use search_augment::{Config, Llm, OpenAiCompatClient, SearchOrchestrator};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    augment_common::init_tracing("chat_bot")?;

    let config = Config::load()?;
    let llm: Arc<dyn Llm> = Arc::new(OpenAiCompatClient::new(&config.llm, &config.http)?);
    let orchestrator = SearchOrchestrator::from_config(&config)?;
    let responder = ChatResponder::new(llm.clone(), orchestrator);
    let bot = ConsoleBot;

    tracing::info!(model = llm.model(), "Chat bot ready, type /h for help");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = tokio::signal::ctrl_c() => break,
        };
        let Some(text) = line else {
            break;
        };

        let message = InboundMessage {
            text,
            context: MessageContext::console(),
        };

        tokio::select! {
            result = handle_message(&bot, &responder, &message) => {
                if let Err(e) = result {
                    tracing::error!(error = %e, "Failed to handle message");
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::warn!("Reply cancelled");
            }
        }
    }

    tracing::info!("Shutting down");
    Ok(())
}
