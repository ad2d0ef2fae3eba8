//! Branding constants shared by both bot front-ends.

pub const COMPANY_NAME: &str = "Arctic Electric — Resonance Energy Inc.";
pub const SHORT_NAME: &str = "Arctic Electric";
pub const TAGLINE: &str = "The cold is the fuel. The cold never runs out.";
pub const WEBSITE: &str = "https://resonanceenergy.co";

pub const BOT_NAME: &str = "Arctic Electric AI";
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod emoji {
    pub const BOLT: &str = "⚡";
    pub const SNOWFLAKE: &str = "❄️";
    pub const GEAR: &str = "⚙️";
    pub const CHART: &str = "📊";
    pub const DOCS: &str = "📄";
    pub const MONEY: &str = "💰";
    pub const ROCKET: &str = "🚀";
    pub const CHECK: &str = "✅";
    pub const STAR: &str = "⭐";
    pub const PIN: &str = "📌";
    pub const BRAIN: &str = "🧠";
}
