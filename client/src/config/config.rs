use common::config::Validate;
use serde::{Deserialize, Serialize};

use super::{BotConfig, ConfigManager, FileContentConfigProvider, NetworkConfig, YamlConfigSerializer};

pub const DEFAULT_CONFIG_FILE_NAME: &str = "tictactoe_client_config.yaml";

pub fn default_config_path() -> String {
    if let Ok(exe_path) = std::env::current_exe()
        && let Some(exe_dir) = exe_path.parent()
    {
        return exe_dir.join(DEFAULT_CONFIG_FILE_NAME).to_string_lossy().into_owned();
    }
    DEFAULT_CONFIG_FILE_NAME.to_string()
}

pub fn get_config_manager(path: Option<&str>) -> ConfigManager<FileContentConfigProvider, Config, YamlConfigSerializer> {
    match path {
        Some(path) => ConfigManager::from_yaml_file(path),
        None => ConfigManager::from_yaml_file(&default_config_path()),
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub bot: BotConfig,
    #[serde(default)]
    pub network: NetworkConfig,
}

impl Validate for Config {
    fn validate(&self) -> Result<(), String> {
        self.bot.validate()?;
        self.network.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::config::{ConfigContentProvider, ConfigError, ConfigSerializer};
    use common::games::tictactoe::{Difficulty, Mark};

    fn get_temp_file_path() -> String {
        use std::env;
        let mut path = env::temp_dir();
        let random_number: u32 = rand::random();
        let file_name = format!("temp_tictactoe_client_config_{}.yaml", random_number);
        path.push(file_name);
        path.to_str().unwrap().to_string()
    }

    #[test]
    fn test_default_config_matches_documented_values() {
        let config = Config::default();
        assert_eq!(config.bot.human_mark, Mark::X);
        assert_eq!(config.bot.difficulty, Difficulty::Hard);
        assert_eq!(config.bot.reply_delay_ms, 250);
        assert_eq!(config.bot.opening_delay_ms, 350);
        assert!(config.network.enabled);
        assert_eq!(config.network.collection, "tttRooms");
        assert_eq!(config.network.auto_reset_delay_ms, 1200);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_config_can_be_serialized_and_deserialized_string() {
        let default_config = Config::default();
        let serializer = YamlConfigSerializer::new();
        let serialized_string = serializer.serialize(&default_config).unwrap();
        let deserialized_config: Config = serializer.deserialize(&serialized_string).unwrap();
        assert_eq!(default_config, deserialized_config);
    }

    #[test]
    fn test_config_round_trips_through_manager() {
        let mut config = Config::default();
        config.bot.difficulty = Difficulty::Easy;
        config.bot.human_mark = Mark::O;
        let file_path = get_temp_file_path();
        let manager = ConfigManager::new(FileContentConfigProvider::new(file_path.clone()), YamlConfigSerializer::new());

        manager.set_config(&config).unwrap();
        assert_eq!(manager.get_config().unwrap(), config);

        let reloaded = get_config_manager(Some(&file_path)).get_config().unwrap();
        assert_eq!(reloaded, config);
        let _ = std::fs::remove_file(file_path);
    }

    #[test]
    fn test_config_file_does_not_exist_returns_default_config() {
        let manager = get_config_manager(Some("this_file_does_not_exist.yaml"));
        assert_eq!(manager.get_config().unwrap(), Config::default());
    }

    #[test]
    fn test_partial_file_fills_missing_sections() {
        let file_path = get_temp_file_path();
        let content_provider = FileContentConfigProvider::new(file_path.clone());
        content_provider
            .set_config_content("bot:\n  human_mark: O\n  difficulty: medium\n  reply_delay_ms: 100\n  opening_delay_ms: 0\n")
            .unwrap();

        let config = get_config_manager(Some(&file_path)).get_config().unwrap();

        assert_eq!(config.bot.difficulty, Difficulty::Medium);
        assert_eq!(config.bot.human_mark, Mark::O);
        assert_eq!(config.network, NetworkConfig::default());
        let _ = std::fs::remove_file(file_path);
    }

    #[test]
    fn test_out_of_range_delay_is_rejected() {
        let file_path = get_temp_file_path();
        let content_provider = FileContentConfigProvider::new(file_path.clone());
        content_provider
            .set_config_content("network:\n  enabled: true\n  collection: tttRooms\n  auto_reset_delay_ms: 60000\n")
            .unwrap();

        let result = get_config_manager(Some(&file_path)).get_config();

        assert!(matches!(result, Err(ConfigError::Validation(_))));
        let _ = std::fs::remove_file(file_path);
    }

    #[test]
    fn test_collection_with_slash_is_invalid() {
        let mut config = Config::default();
        config.network.collection = "rooms/nested".to_string();
        assert!(config.validate().is_err());

        config.network.collection.clear();
        assert!(config.validate().is_err());
    }
}
