use crate::assets::AssetLoader;
use crate::error::ConfigError;
use fuzzy_infer::{KnowledgeBase, KnowledgeBaseDefinition};
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

/// Application configuration loaded from config.yaml
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct AppConfig {
    /// Alternative knowledge base (YAML); the built-in one when unset
    #[serde(default)]
    pub knowledge_base: Option<PathBuf>,

    /// Inference result memoization
    #[serde(default)]
    pub cache: CacheConfig,

    /// Upload limits
    #[serde(default)]
    pub limits: LimitsConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CacheConfig {
    #[serde(default = "default_cache_enabled")]
    pub enabled: bool,

    /// Entries kept before the cache is cleared
    #[serde(default = "default_cache_capacity")]
    pub capacity: usize,
}

fn default_cache_enabled() -> bool {
    true
}

fn default_cache_capacity() -> usize {
    1024
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: default_cache_enabled(),
            capacity: default_cache_capacity(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct LimitsConfig {
    /// Largest accepted request body in bytes
    #[serde(default = "default_max_image_bytes")]
    pub max_image_bytes: usize,

    /// Largest accepted decoded image in pixels
    #[serde(default = "default_max_pixels")]
    pub max_pixels: usize,
}

fn default_max_image_bytes() -> usize {
    16 * 1024 * 1024
}

fn default_max_pixels() -> usize {
    4096 * 4096
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_image_bytes: default_max_image_bytes(),
            max_pixels: default_max_pixels(),
        }
    }
}

impl AppConfig {
    /// Load configuration from AssetLoader (embedded or external)
    pub fn load_from_assets(loader: &AssetLoader) -> Self {
        match loader.read_config_string() {
            Ok(content) => match serde_yaml::from_str::<Option<Self>>(&content) {
                Ok(config) => {
                    let config = config.unwrap_or_default();
                    tracing::info!(
                        knowledge_base = ?config.knowledge_base,
                        cache = config.cache.enabled,
                        "Loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    /// Knowledge base selected by this configuration
    ///
    /// The built-in base when `knowledge_base` is unset. A configured file
    /// that cannot be read, parsed or validated is an error, never a silent
    /// fallback.
    pub fn load_knowledge_base(&self) -> Result<KnowledgeBase, ConfigError> {
        let Some(path) = &self.knowledge_base else {
            return Ok(KnowledgeBase::standard().clone());
        };

        let path_display = path.display().to_string();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path_display.clone(),
            source,
        })?;
        let definition: KnowledgeBaseDefinition =
            serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
                path: path_display.clone(),
                source,
            })?;
        let kb = KnowledgeBase::try_from(definition)?;

        tracing::info!(path = %path_display, rules = kb.rules().len(), "Loaded knowledge base");
        Ok(kb)
    }
}
