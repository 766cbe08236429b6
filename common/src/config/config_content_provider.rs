use std::io::ErrorKind;
use std::sync::{Mutex, PoisonError};

use super::ConfigError;

pub trait ConfigContentProvider {
    /// `None` when no config has been stored yet.
    fn get_config_content(&self) -> Result<Option<String>, ConfigError>;
    fn set_config_content(&self, content: &str) -> Result<(), ConfigError>;
}

pub struct FileContentConfigProvider {
    file_path: String,
}

impl FileContentConfigProvider {
    pub fn new(file_path: String) -> Self {
        Self { file_path }
    }
}

impl ConfigContentProvider for FileContentConfigProvider {
    fn get_config_content(&self) -> Result<Option<String>, ConfigError> {
        match std::fs::read_to_string(self.file_path.as_str()) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn set_config_content(&self, content: &str) -> Result<(), ConfigError> {
        std::fs::write(self.file_path.as_str(), content)?;
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryContentConfigProvider {
    content: Mutex<Option<String>>,
}

impl MemoryContentConfigProvider {
    pub fn new(content: Option<String>) -> Self {
        Self {
            content: Mutex::new(content),
        }
    }
}

impl ConfigContentProvider for MemoryContentConfigProvider {
    fn get_config_content(&self) -> Result<Option<String>, ConfigError> {
        Ok(self.content.lock().unwrap_or_else(PoisonError::into_inner).clone())
    }

    fn set_config_content(&self, content: &str) -> Result<(), ConfigError> {
        *self.content.lock().unwrap_or_else(PoisonError::into_inner) = Some(content.to_string());
        Ok(())
    }
}
