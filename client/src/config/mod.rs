mod bot_config;
mod config;
mod network_config;

pub(crate) use common::config::{ConfigManager, FileContentConfigProvider, YamlConfigSerializer};

pub use bot_config::BotConfig;
pub use config::get_config_manager;
pub use network_config::NetworkConfig;

/// Upper bound for every configurable delay.
pub const MAX_DELAY_MS: u64 = 10_000;
