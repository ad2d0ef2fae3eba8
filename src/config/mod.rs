mod settings;

pub use settings::{DiscordConfig, LlmConfig, LoggingConfig, Settings, TelegramConfig};
