//! Chat bot front end
//!
//! Routes inbound text to commands and answers `/chat` questions with the
//! chat model, augmented by the search pipeline when the question needs
//! outside information. The transport is abstracted behind [`BotClient`].

pub mod chat;
pub mod client;
pub mod commands;
pub mod persona;

pub use chat::ChatResponder;
pub use client::{BotClient, ConsoleBot, InboundMessage, MessageContext};
pub use commands::{handle_message, Command};
