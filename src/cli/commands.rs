use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "arcticbot")]
#[command(author, version, about = "Arctic Electric AI assistant bots", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the chat bots (both platforms unless a flag narrows it)
    Run {
        /// Run only the Telegram bot
        #[arg(long)]
        telegram: bool,

        /// Run only the Discord bot
        #[arg(long)]
        discord: bool,
    },

    /// Send a single prompt to the AI from the terminal
    Chat {
        prompt: String,

        /// Override the configured model
        #[arg(short, long)]
        model: Option<String>,

        /// Override the configured max_tokens
        #[arg(long)]
        max_tokens: Option<u32>,
    },
}
