//! Layered configuration.
//!
//! Sources, later ones overriding earlier ones:
//! 1. Bundled defaults (`storyloom.toml` shipped with the crate)
//! 2. `~/.config/storyloom/storyloom.toml`
//! 3. `./storyloom.toml`
//! 4. `STORYLOOM_<SECTION>__<KEY>` environment variables
//!
//! Every file source is optional.

use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use storyloom_error::{ConfigError, StoryloomError, StoryloomResult};
use storyloom_models::OpenAiCompatibleClient;
use storyloom_narrative::{GenerationDefaults, LocaleCatalog};
use tracing::{debug, instrument};

const DEFAULT_CONFIG: &str = include_str!("../../../storyloom.toml");

/// Where generation requests are sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
#[serde(default)]
pub struct ProviderConfig {
    /// API root of an OpenAI-compatible provider
    base_url: String,
    /// Name of the environment variable holding the API key
    api_key_env: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
        }
    }
}

/// Message catalog selection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
#[serde(default)]
pub struct LocaleConfig {
    /// Catalog laid over the bundled English one
    catalog: Option<PathBuf>,
}

/// Top-level configuration.
///
/// # Example
///
/// ```toml
/// [generation]
/// text_model = "gpt-4o"
///
/// [provider]
/// base_url = "http://localhost:11434/v1"
/// api_key_env = "LOCAL_API_KEY"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
#[serde(default)]
pub struct StoryloomConfig {
    /// Fallback models and sampling settings
    generation: GenerationDefaults,
    /// Provider endpoint and credentials
    provider: ProviderConfig,
    /// Message catalog
    locale: LocaleConfig,
}

impl StoryloomConfig {
    /// Load configuration from every layer.
    ///
    /// # Errors
    ///
    /// Returns an error if a present source cannot be parsed.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use storyloom::StoryloomConfig;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let config = StoryloomConfig::load()?;
    /// println!("text model: {}", config.generation().text_model());
    /// # Ok(())
    /// # }
    /// ```
    #[instrument]
    pub fn load() -> StoryloomResult<Self> {
        debug!("Loading configuration with precedence: env > current dir > home dir > bundled defaults");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(config_dir) = dirs::home_dir() {
            let home_config = config_dir.join(".config/storyloom/storyloom.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder
            .add_source(File::with_name("storyloom").required(false))
            .add_source(
                Environment::with_prefix("STORYLOOM")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        Self::deserialize_from(builder)
    }

    /// Load the bundled defaults with a single file laid over them.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> StoryloomResult<Self> {
        debug!("Loading configuration from file");
        let builder = Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .add_source(File::from(path.as_ref()));
        Self::deserialize_from(builder)
    }

    /// Load the bundled defaults with TOML `text` laid over them.
    ///
    /// # Errors
    ///
    /// Returns an error if `text` is not valid TOML for this schema.
    pub fn from_toml_str(text: &str) -> StoryloomResult<Self> {
        let builder = Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .add_source(File::from_str(text, FileFormat::Toml));
        Self::deserialize_from(builder)
    }

    fn deserialize_from(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> StoryloomResult<Self> {
        builder
            .build()
            .map_err(|e| {
                StoryloomError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                StoryloomError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })
    }

    /// The bundled catalog, with the configured override file applied if any.
    ///
    /// # Errors
    ///
    /// Returns an error if a catalog cannot be read or parsed.
    pub fn catalog(&self) -> StoryloomResult<LocaleCatalog> {
        match &self.locale.catalog {
            Some(path) => LocaleCatalog::with_overrides(path),
            None => LocaleCatalog::bundled(),
        }
    }

    /// A client for the configured provider, reading the key from the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the key variable is unset or blank.
    pub fn client(&self) -> StoryloomResult<OpenAiCompatibleClient> {
        OpenAiCompatibleClient::from_env(&self.provider.api_key_env, self.provider.base_url.clone())
    }
}
