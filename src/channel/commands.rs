//! Shared command dispatch for both bot front-ends.
//!
//! Telegram and Discord surface the same command set; each adapter parses
//! its platform event into `(conversation key, text)` and hands the text
//! here. Non-command text goes straight to the AI responder.

use std::sync::Arc;
use std::time::Instant;

use crate::branding::{emoji, BOT_NAME, SHORT_NAME, TAGLINE, VERSION};
use crate::core::responder::Responder;
use crate::knowledge::{
    format_company_overview, format_grants_list, format_patent_summary, format_project_status,
    Region,
};
use crate::utils::format_uptime;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    Help,
    Ask(String),
    Patent,
    Grants(Region),
    Status,
    Company,
    Clear,
    Stats,
}

impl Command {
    /// Parse a leading-slash command. Returns `None` for ordinary text.
    /// A `@BotName` suffix on the command word (Telegram group syntax)
    /// is ignored.
    pub fn parse(text: &str) -> Option<Command> {
        let trimmed = text.trim();
        let rest = trimmed.strip_prefix('/')?;
        let (word, args) = match rest.split_once(char::is_whitespace) {
            Some((word, args)) => (word, args.trim()),
            None => (rest, ""),
        };
        let word = word.split('@').next().unwrap_or(word).to_ascii_lowercase();

        match word.as_str() {
            "start" => Some(Command::Start),
            "help" => Some(Command::Help),
            "ask" => Some(Command::Ask(args.to_string())),
            "patent" => Some(Command::Patent),
            "grants" => Some(Command::Grants(
                Region::parse(args).unwrap_or_default(),
            )),
            "grants_alaska" => Some(Command::Grants(Region::Alaska)),
            "grants_alberta" => Some(Command::Grants(Region::Alberta)),
            "status" => Some(Command::Status),
            "company" => Some(Command::Company),
            "clear" => Some(Command::Clear),
            "stats" => Some(Command::Stats),
            _ => None,
        }
    }
}

pub struct CommandRouter {
    responder: Arc<Responder>,
    started_at: Instant,
}

impl CommandRouter {
    pub fn new(responder: Arc<Responder>) -> Self {
        Self {
            responder,
            started_at: Instant::now(),
        }
    }

    /// Produce the reply text for one inbound message. Never fails; AI
    /// errors are already converted to fallback text by the responder.
    pub async fn handle(&self, key: &str, text: &str) -> String {
        match Command::parse(text) {
            Some(Command::Start) => self.welcome(),
            Some(Command::Help) => self.help(),
            Some(Command::Ask(question)) if question.is_empty() => format!(
                "{} **Ask me anything!**\n\nUsage: /ask What temperature range does the TEG operate in?\n\nOr just send a message directly.",
                emoji::BRAIN
            ),
            Some(Command::Ask(question)) => self.responder.respond(key, &question).await,
            Some(Command::Patent) => format_patent_summary(),
            Some(Command::Grants(region)) => format_grants_list(region),
            Some(Command::Status) => format_project_status(),
            Some(Command::Company) => format_company_overview(),
            Some(Command::Clear) => {
                self.responder.clear_history(key).await;
                format!(
                    "{} Conversation history cleared. Starting fresh!",
                    emoji::CHECK
                )
            }
            Some(Command::Stats) => {
                let stats = self.responder.stats().await;
                format!(
                    "{} **Bot Stats**\n\nActive Conversations: {}\nTotal Messages in Memory: {}\nUptime: {}",
                    emoji::CHART,
                    stats.active_conversations,
                    stats.total_messages,
                    format_uptime(self.started_at.elapsed().as_secs()),
                )
            }
            None => self.responder.respond(key, text.trim()).await,
        }
    }

    fn welcome(&self) -> String {
        format!(
            "{snow}{bolt} **Welcome to {name}** {bolt}{snow}\n\n\
             *\"{tagline}\"*\n\n\
             I'm the Arctic Electric AI assistant. I can help you learn about:\n\n\
             {docs} Our patent & technology\n\
             {money} Available grants & funding\n\
             {chart} Project status & milestones\n\
             {brain} Anything about Arctic energy harvesting\n\n\
             **Quick Commands:**\n\
             /patent — Patent status & claims\n\
             /grants — Funding programs\n\
             /status — Project dashboard\n\
             /company — Company overview\n\
             /ask [question] — Ask me anything\n\
             /help — Full command list\n\n\
             Or just send me a message and I'll respond! {rocket}",
            snow = emoji::SNOWFLAKE,
            bolt = emoji::BOLT,
            name = SHORT_NAME,
            tagline = TAGLINE,
            docs = emoji::DOCS,
            money = emoji::MONEY,
            chart = emoji::CHART,
            brain = emoji::BRAIN,
            rocket = emoji::ROCKET,
        )
    }

    fn help(&self) -> String {
        format!(
            "{snow} **{name} — Command Reference**\n\n\
             {rocket} **General:**\n\
             /start — Welcome & quick menu\n\
             /help — This help message\n\
             /clear — Reset conversation memory\n\n\
             {docs} **Patent & Technology:**\n\
             /patent — Patent status, claims & innovations\n\
             /ask [question] — Ask about our technology\n\n\
             {money} **Funding:**\n\
             /grants — All available grants\n\
             /grants_alaska — Alaska & US Federal grants\n\
             /grants_alberta — Alberta & Canada grants\n\n\
             {chart} **Project:**\n\
             /status — Project status dashboard\n\
             /company — Company overview\n\n\
             {brain} **AI Chat:**\n\
             Just send any message to chat with the AI!\n\n\
             *{bot} v{version}*",
            snow = emoji::SNOWFLAKE,
            name = SHORT_NAME,
            rocket = emoji::ROCKET,
            docs = emoji::DOCS,
            money = emoji::MONEY,
            chart = emoji::CHART,
            brain = emoji::BRAIN,
            bot = BOT_NAME,
            version = VERSION,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(Command::parse("/help"), Some(Command::Help));
        assert_eq!(Command::parse("/patent"), Some(Command::Patent));
        assert_eq!(Command::parse("  /clear  "), Some(Command::Clear));
    }

    #[test]
    fn test_parse_ask_with_question() {
        assert_eq!(
            Command::parse("/ask How cold is too cold?"),
            Some(Command::Ask("How cold is too cold?".to_string()))
        );
        assert_eq!(Command::parse("/ask"), Some(Command::Ask(String::new())));
    }

    #[test]
    fn test_parse_grants_regions() {
        assert_eq!(Command::parse("/grants"), Some(Command::Grants(Region::All)));
        assert_eq!(
            Command::parse("/grants alberta"),
            Some(Command::Grants(Region::Alberta))
        );
        assert_eq!(
            Command::parse("/grants_alaska"),
            Some(Command::Grants(Region::Alaska))
        );
        // Unknown region falls back to the full listing
        assert_eq!(
            Command::parse("/grants mars"),
            Some(Command::Grants(Region::All))
        );
    }

    #[test]
    fn test_parse_strips_bot_mention_suffix() {
        assert_eq!(Command::parse("/help@ArcticBot"), Some(Command::Help));
        assert_eq!(
            Command::parse("/ask@ArcticBot what is a TEG"),
            Some(Command::Ask("what is a TEG".to_string()))
        );
    }

    #[test]
    fn test_plain_text_is_not_a_command() {
        assert_eq!(Command::parse("hello there"), None);
        assert_eq!(Command::parse("/unknowncmd"), None);
    }
}
