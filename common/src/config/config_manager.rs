use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use super::{ConfigContentProvider, ConfigSerializer, FileContentConfigProvider, Validate, YamlConfigSerializer};

pub struct ConfigManager<TConfigContentProvider, TConfig, TConfigSerializer = YamlConfigSerializer>
where
    TConfigContentProvider: ConfigContentProvider,
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
    TConfigSerializer: ConfigSerializer<TConfig>,
{
    config_serializer: TConfigSerializer,
    config_content_provider: TConfigContentProvider,
    config: Arc<Mutex<Option<TConfig>>>,
}

impl<TConfig> ConfigManager<FileContentConfigProvider, TConfig, YamlConfigSerializer>
where
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
{
    pub fn from_yaml_file(file_path: impl Into<PathBuf>) -> Self {
        Self::new(FileContentConfigProvider::new(file_path), YamlConfigSerializer::new())
    }
}

impl<TConfigContentProvider, TConfig, TConfigSerializer>
    ConfigManager<TConfigContentProvider, TConfig, TConfigSerializer>
where
    TConfigContentProvider: ConfigContentProvider,
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
    TConfigSerializer: ConfigSerializer<TConfig>,
{
    pub fn new(config_content_provider: TConfigContentProvider, config_serializer: TConfigSerializer) -> Self {
        Self {
            config: Arc::new(Mutex::new(None)),
            config_content_provider,
            config_serializer,
        }
    }

    /// Loads and caches the config. A missing source yields `TConfig::default()`.
    pub fn get_config(&self) -> Result<TConfig, String> {
        let mut current = self
            .config
            .lock()
            .map_err(|_| "Config cache lock poisoned".to_string())?;

        if let Some(config) = current.as_ref() {
            return Ok(config.clone());
        }

        let Some(config_data) = self.config_content_provider.get_config_content()? else {
            return Ok(TConfig::default());
        };

        let config = self.config_serializer.deserialize(&config_data)?;
        config
            .validate()
            .map_err(|e| format!("Config validation error: {}", e))?;

        *current = Some(config.clone());
        Ok(config)
    }

    pub fn set_config(&self, config: &TConfig) -> Result<(), String> {
        config
            .validate()
            .map_err(|e| format!("Config validation error: {}", e))?;

        let serialized_config = self.config_serializer.serialize(config)?;
        self.config_content_provider
            .set_config_content(&serialized_config)?;

        let mut current = self
            .config
            .lock()
            .map_err(|_| "Config cache lock poisoned".to_string())?;
        *current = Some(config.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{InMemoryConfigContentProvider, validate_range};

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct SampleConfig {
        size: u32,
    }

    impl Default for SampleConfig {
        fn default() -> Self {
            Self { size: 3 }
        }
    }

    impl Validate for SampleConfig {
        fn validate(&self) -> Result<(), String> {
            validate_range("size", self.size, 3, 5)
        }
    }

    fn manager(content: Option<&str>) -> ConfigManager<InMemoryConfigContentProvider, SampleConfig> {
        ConfigManager::new(
            InMemoryConfigContentProvider::new(content.map(str::to_string)),
            YamlConfigSerializer::new(),
        )
    }

    #[test]
    fn test_missing_content_returns_default() {
        assert_eq!(manager(None).get_config(), Ok(SampleConfig::default()));
    }

    #[test]
    fn test_reads_and_caches_content() {
        let provider = InMemoryConfigContentProvider::new(Some("size: 4\n".to_string()));
        let manager: ConfigManager<_, SampleConfig> =
            ConfigManager::new(provider.clone(), YamlConfigSerializer::new());
        assert_eq!(manager.get_config().unwrap().size, 4);

        provider.set_config_content("size: 5\n").unwrap();
        assert_eq!(manager.get_config().unwrap().size, 4);
    }

    #[test]
    fn test_invalid_content_is_rejected() {
        let result = manager(Some("size: 9\n")).get_config();
        let error = result.unwrap_err();
        assert!(error.starts_with("Config validation error"), "{}", error);
    }

    #[test]
    fn test_malformed_content_is_rejected() {
        let result = manager(Some("size: [not a number")).get_config();
        assert!(result.unwrap_err().starts_with("Failed to deserialize config"));
    }

    #[test]
    fn test_set_config_validates_before_writing() {
        let manager = manager(None);
        assert!(manager.set_config(&SampleConfig { size: 2 }).is_err());
        assert_eq!(manager.get_config(), Ok(SampleConfig::default()));

        assert!(manager.set_config(&SampleConfig { size: 5 }).is_ok());
        assert_eq!(manager.get_config(), Ok(SampleConfig { size: 5 }));
    }
}
