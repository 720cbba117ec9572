//! Colored terminal output for transcripts and analysis results.

use colored::Colorize;
use ng_protocol::{Message, MessageKind, MessageRole};

/// Print messages in order, each under a colored heading.
pub fn print_messages(messages: &[Message]) {
    for message in messages {
        println!("{}", heading(message));
        println!("{}", body(message));
        println!();
    }
}

pub fn heading(message: &Message) -> String {
    match (message.role, &message.kind) {
        (MessageRole::User, _) => "▸ You".yellow().bold().to_string(),
        (MessageRole::System, MessageKind::ExecutionOutput) => {
            "▸ Execution log".magenta().bold().to_string()
        }
        (MessageRole::System, _) => "▸ System".dimmed().to_string(),
        (_, MessageKind::Code { language }) => {
            format!("▸ Script ({language})").green().bold().to_string()
        }
        (_, MessageKind::ReasoningTrace) => "▸ Reasoning".cyan().bold().to_string(),
        (_, MessageKind::ExecutionOutput) => "▸ Output".magenta().bold().to_string(),
        (_, MessageKind::AgentResponse) => "▸ Agent".blue().bold().to_string(),
        (_, MessageKind::PlainText) => "▸ NetGenius".blue().bold().to_string(),
    }
}

fn body(message: &Message) -> String {
    match message.kind {
        MessageKind::Code { .. } => message.content.green().to_string(),
        MessageKind::ReasoningTrace => message.content.cyan().italic().to_string(),
        MessageKind::ExecutionOutput => message.content.dimmed().to_string(),
        _ => message.content.clone(),
    }
}

/// Print a one-shot analysis result under `title`.
pub fn print_analysis(title: &str, text: &str) {
    println!("{}", format!("▸ {title}").cyan().bold());
    println!("{text}");
}
