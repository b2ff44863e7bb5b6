//! Text command routing

use anyhow::Result;
use sysinfo::System;

use crate::chat::ChatResponder;
use crate::client::{BotClient, InboundMessage};

const ECHO_REPLY: &str = "hi 我是小皮";
const HELP_TEXT: &str = "可用指令：\n\
echo - 打个招呼\n\
/chat <问题> - 和我聊天（需要时会联网查资料）\n\
/os - 查看主机状态\n\
/h - 帮助  /m - 菜单  /s - 设置";
const MENU_TEXT: &str = "菜单：聊天 /chat，状态 /os，帮助 /h";
const SETTINGS_TEXT: &str = "设置：当前没有可调整的选项。";

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// A recognized command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Echo,
    Help,
    Menu,
    Settings,
    SystemStatus,
    Chat(String),
}

impl Command {
    /// Parse trimmed message text; unrecognized text yields `None`
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        match text {
            "echo" => Some(Command::Echo),
            "/h" => Some(Command::Help),
            "/m" => Some(Command::Menu),
            "/s" => Some(Command::Settings),
            "/os" => Some(Command::SystemStatus),
            _ => text
                .strip_prefix("/chat ")
                .map(str::trim)
                .filter(|q| !q.is_empty())
                .map(|q| Command::Chat(q.to_string())),
        }
    }
}

/// Format host status for `/os`
pub fn format_status(uptime_secs: u64, free_bytes: u64, total_bytes: u64, cpus: usize) -> String {
    format!(
        "系统运行时间: {} 秒\n空闲内存: {:.2} MB\n总内存: {:.2} MB\nCPU 核心数: {}",
        uptime_secs,
        free_bytes as f64 / BYTES_PER_MB,
        total_bytes as f64 / BYTES_PER_MB,
        cpus
    )
}

fn system_status() -> String {
    let mut sys = System::new();
    sys.refresh_memory();
    sys.refresh_cpu_all();

    format_status(
        System::uptime(),
        sys.free_memory(),
        sys.total_memory(),
        sys.cpus().len(),
    )
}

/// Handle one inbound message, replying through `bot` when it is a command
pub async fn handle_message(
    bot: &dyn BotClient,
    responder: &ChatResponder,
    message: &InboundMessage,
) -> Result<()> {
    let Some(command) = Command::parse(&message.text) else {
        return Ok(());
    };
    tracing::debug!(?command, chat = %message.context.chat_id, "Command received");

    let reply = match command {
        Command::Echo => ECHO_REPLY.to_string(),
        Command::Help => HELP_TEXT.to_string(),
        Command::Menu => MENU_TEXT.to_string(),
        Command::Settings => SETTINGS_TEXT.to_string(),
        Command::SystemStatus => system_status(),
        Command::Chat(question) => responder.answer(&question).await,
    };

    bot.send_message(&message.context, &reply).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::testing::{responder, QueueLlm};
    use crate::client::MessageContext;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingBot {
        sent: Mutex<Vec<(String, String)>>,
    }

    #[async_trait]
    impl BotClient for RecordingBot {
        async fn send_message(&self, context: &MessageContext, content: &str) -> Result<()> {
            self.sent
                .lock()
                .unwrap()
                .push((context.chat_id.clone(), content.to_string()));
            Ok(())
        }
    }

    fn message(text: &str) -> InboundMessage {
        InboundMessage {
            text: text.to_string(),
            context: MessageContext {
                chat_id: "group-1".to_string(),
                sender: "alice".to_string(),
            },
        }
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("echo"), Some(Command::Echo));
        assert_eq!(Command::parse("  /h "), Some(Command::Help));
        assert_eq!(Command::parse("/os"), Some(Command::SystemStatus));
        assert_eq!(
            Command::parse("/chat 北京今天天气怎么样"),
            Some(Command::Chat("北京今天天气怎么样".to_string()))
        );
    }

    #[test]
    fn test_parse_ignores_other_text() {
        assert_eq!(Command::parse("hello"), None);
        assert_eq!(Command::parse("/chat"), None);
        assert_eq!(Command::parse("/chatty"), None);
        assert_eq!(Command::parse("Echo"), None);
    }

    #[test]
    fn test_format_status() {
        let status = format_status(3600, 512 * 1024 * 1024, 2048 * 1024 * 1024, 8);
        assert_eq!(
            status,
            "系统运行时间: 3600 秒\n空闲内存: 512.00 MB\n总内存: 2048.00 MB\nCPU 核心数: 8"
        );
    }

    #[tokio::test]
    async fn test_echo_replies_to_origin_chat() {
        let bot = RecordingBot::default();
        let chat = responder(QueueLlm::new(&[]), None);

        handle_message(&bot, &chat, &message("echo")).await.unwrap();

        let sent = bot.sent.lock().unwrap();
        assert_eq!(sent.as_slice(), &[("group-1".to_string(), ECHO_REPLY.to_string())]);
    }

    #[tokio::test]
    async fn test_unrecognized_text_is_ignored() {
        let bot = RecordingBot::default();
        let llm = QueueLlm::new(&[]);
        let chat = responder(llm.clone(), None);

        handle_message(&bot, &chat, &message("随便说说")).await.unwrap();

        assert!(bot.sent.lock().unwrap().is_empty());
        assert!(llm.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_chat_command_sends_answer() {
        let bot = RecordingBot::default();
        let chat = responder(QueueLlm::new(&[Some("no"), Some("你好呀")]), None);

        handle_message(&bot, &chat, &message("/chat 讲个笑话")).await.unwrap();

        let sent = bot.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].1, "你好呀");
    }

    #[tokio::test]
    async fn test_os_command_reports_status() {
        let bot = RecordingBot::default();
        let chat = responder(QueueLlm::new(&[]), None);

        handle_message(&bot, &chat, &message("/os")).await.unwrap();

        let sent = bot.sent.lock().unwrap();
        assert!(sent[0].1.starts_with("系统运行时间"));
        assert!(sent[0].1.contains("CPU 核心数"));
    }
}
