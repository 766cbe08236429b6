use std::time::Duration;

use common::config::Validate;
use common::network::DEFAULT_ROOM_COLLECTION;
use serde::{Deserialize, Serialize};

use super::MAX_DELAY_MS;

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct NetworkConfig {
    pub enabled: bool,
    pub collection: String,
    pub auto_reset_delay_ms: u64,
}

impl NetworkConfig {
    pub fn auto_reset_delay(&self) -> Duration {
        Duration::from_millis(self.auto_reset_delay_ms)
    }
}

impl Validate for NetworkConfig {
    fn validate(&self) -> Result<(), String> {
        if self.collection.is_empty() {
            return Err("collection must not be empty".to_string());
        }
        if self.collection.contains('/') {
            return Err("collection must not contain '/'".to_string());
        }
        if self.auto_reset_delay_ms > MAX_DELAY_MS {
            return Err(format!("auto_reset_delay_ms must not exceed {}", MAX_DELAY_MS));
        }
        Ok(())
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            collection: DEFAULT_ROOM_COLLECTION.to_string(),
            auto_reset_delay_ms: 1200,
        }
    }
}
