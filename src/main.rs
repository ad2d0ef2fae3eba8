use anyhow::{anyhow, Result};
use clap::Parser;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use arcticbot::channel::commands::CommandRouter;
use arcticbot::channel::discord::DiscordBot;
use arcticbot::channel::telegram::TelegramBot;
use arcticbot::cli::{Cli, Commands};
use arcticbot::{
    branding, utils, AnthropicClient, ConversationStore, GenerationOptions, Responder, Settings,
};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let settings = Settings::new()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(settings.logging.level.clone())),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { telegram, discord } => run_bots(settings, telegram, discord).await,
        Commands::Chat {
            prompt,
            model,
            max_tokens,
        } => handle_chat(settings, prompt, model, max_tokens).await,
    }
}

async fn handle_chat(
    settings: Settings,
    prompt: String,
    model: Option<String>,
    max_tokens: Option<u32>,
) -> Result<()> {
    let api_key = Settings::api_key()?;
    let client = AnthropicClient::new(api_key, settings.llm.clone());
    let responder = Responder::new(client, Arc::new(ConversationStore::new()));
    let options = GenerationOptions { model, max_tokens };

    utils::print_info("Sending request...");
    let reply = responder.respond_with("cli", &prompt, &options).await;
    println!("\n{}", reply);
    Ok(())
}

async fn run_bots(settings: Settings, telegram_only: bool, discord_only: bool) -> Result<()> {
    // No flag selects everything that has a token configured
    let (want_telegram, want_discord) = if telegram_only || discord_only {
        (telegram_only, discord_only)
    } else {
        (true, true)
    };

    let api_key = Settings::api_key()?;
    let client = AnthropicClient::new(api_key, settings.llm.clone());
    let store = Arc::new(ConversationStore::new());
    let responder = Arc::new(Responder::new(client, store));
    let router = Arc::new(CommandRouter::new(responder));

    utils::print_header(&format!("{} v{}", branding::BOT_NAME, branding::VERSION));
    utils::print_info(&format!("\"{}\"", branding::TAGLINE));

    let mut handles = Vec::new();

    if want_telegram {
        match Settings::telegram_token() {
            Ok(token) => {
                let bot = Arc::new(TelegramBot::new(
                    token,
                    settings.telegram.clone(),
                    router.clone(),
                ));
                handles.push(tokio::spawn(bot.run()));
                utils::print_success("✅ Telegram bot starting");
            }
            Err(e) if telegram_only => return Err(e),
            Err(_) => utils::print_info("Telegram disabled: TELEGRAM_BOT_TOKEN not set"),
        }
    }

    if want_discord {
        match Settings::discord_token() {
            Ok(token) => {
                let bot = Arc::new(DiscordBot::new(
                    token,
                    settings.discord.clone(),
                    router.clone(),
                ));
                handles.push(tokio::spawn(bot.run()));
                utils::print_success("✅ Discord bot starting");
            }
            Err(e) if discord_only => return Err(e),
            Err(_) => utils::print_info("Discord disabled: DISCORD_BOT_TOKEN not set"),
        }
    }

    if handles.is_empty() {
        return Err(anyhow!(
            "No bot tokens configured. Set TELEGRAM_BOT_TOKEN and/or DISCORD_BOT_TOKEN"
        ));
    }

    tokio::signal::ctrl_c().await?;
    utils::print_info("\nShutting down...");
    for handle in &handles {
        handle.abort();
    }
    Ok(())
}
