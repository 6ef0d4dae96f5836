//! Studio configuration.
//!
//! Configuration is layered, later sources overriding earlier ones:
//!
//! 1. Bundled defaults (include_str! from reel.toml)
//! 2. `~/.config/reel/reel.toml`
//! 3. `./reel.toml`
//! 4. A file passed explicitly (`--config`)
//! 5. `REEL__SECTION__KEY` environment variables
//!
//! Credentials are not part of the configuration. Backends read them from
//! the environment when they are built.

use config::{Config, Environment, File, FileFormat};
use reel_error::{ConfigError, ReelResult};
use reel_knowledge::DEFAULT_COLLECTION;
use reel_models::LlmProvider;
use reel_production::MediaProvider;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Bundled default configuration
const DEFAULT_CONFIG: &str = include_str!("../../../reel.toml");

/// Where a run writes its artifacts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
#[serde(default)]
pub struct StudioSection {
    /// Directory for the screenplay, shot list, project state and shots
    output_dir: PathBuf,
}

impl Default for StudioSection {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("output"),
        }
    }
}

/// Text backend selection.
#[derive(
    Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters,
)]
#[serde(default)]
pub struct LlmSection {
    /// Provider name
    provider: LlmProvider,
    /// Model override, provider default when absent
    model: Option<String>,
}

/// Media backend selection.
#[derive(
    Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters,
)]
#[serde(default)]
pub struct MediaSection {
    /// Provider name
    provider: MediaProvider,
}

/// Knowledge store location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
#[serde(default)]
pub struct KnowledgeSection {
    /// Chroma server url; seed knowledge only when absent
    chroma_url: Option<String>,
    /// Collection to query
    collection: String,
}

impl Default for KnowledgeSection {
    fn default() -> Self {
        Self {
            chroma_url: None,
            collection: DEFAULT_COLLECTION.to_string(),
        }
    }
}

/// Complete studio configuration.
///
/// # Example
///
/// ```
/// use reel::StudioConfig;
/// use reel_models::LlmProvider;
///
/// let config = StudioConfig::from_toml_str("[llm]\nprovider = \"groq\"\n").unwrap();
/// assert_eq!(*config.llm().provider(), LlmProvider::Groq);
/// assert_eq!(config.knowledge().collection(), "reel_knowledge");
/// ```
#[derive(
    Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters,
)]
#[serde(default)]
pub struct StudioConfig {
    /// `[studio]` section
    studio: StudioSection,
    /// `[llm]` section
    llm: LlmSection,
    /// `[media]` section
    media: MediaSection,
    /// `[knowledge]` section
    knowledge: KnowledgeSection,
}

impl StudioConfig {
    /// Load configuration with the full precedence chain.
    ///
    /// `explicit` is a file the user named on the command line; unlike the
    /// other files it must exist.
    ///
    /// # Errors
    ///
    /// Returns error if a file cannot be parsed or a value has the wrong type.
    pub fn load(explicit: Option<&Path>) -> ReelResult<Self> {
        debug!("Loading configuration with precedence: env > explicit > current dir > home dir > bundled defaults");

        let mut builder = Self::bundled(DEFAULT_CONFIG);

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("reel").join("reel.toml");
            builder = builder.add_source(File::from(user_config).required(false));
        }

        builder = builder.add_source(File::with_name("reel").required(false));

        if let Some(path) = explicit {
            debug!(path = %path.display(), "Adding explicit configuration file");
            builder = builder.add_source(File::from(path));
        }

        builder = builder.add_source(Environment::with_prefix("REEL").separator("__"));

        Self::deserialize_from(builder)
    }

    /// Load configuration from a single file layered over the bundled
    /// `reel.toml`.
    ///
    /// # Errors
    ///
    /// Returns error if the file is missing or malformed.
    pub fn from_file(path: impl AsRef<Path>) -> ReelResult<Self> {
        debug!(path = %path.as_ref().display(), "Loading configuration from file");
        Self::deserialize_from(Self::bundled(DEFAULT_CONFIG).add_source(File::from(path.as_ref())))
    }

    /// Parse a TOML string layered over the bundled `reel.toml`.
    ///
    /// # Errors
    ///
    /// Returns error if the string is not valid TOML for this layout.
    pub fn from_toml_str(toml: &str) -> ReelResult<Self> {
        Self::deserialize_from(
            Self::bundled(DEFAULT_CONFIG).add_source(File::from_str(toml, FileFormat::Toml)),
        )
    }

    fn bundled(defaults: &str) -> config::ConfigBuilder<config::builder::DefaultState> {
        Config::builder().add_source(File::from_str(defaults, FileFormat::Toml))
    }

    fn deserialize_from(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> ReelResult<Self> {
        let config = builder.build().map_err(|e| {
            ConfigError::new(format!("Failed to build configuration: {}", e))
        })?;

        let studio: Self = config.try_deserialize().map_err(|e| {
            ConfigError::new(format!("Failed to parse configuration: {}", e))
        })?;

        debug!(
            output_dir = %studio.studio.output_dir.display(),
            llm = %studio.llm.provider,
            media = %studio.media.provider,
            chroma = studio.knowledge.chroma_url.is_some(),
            "Configuration loaded"
        );
        Ok(studio)
    }

    /// Replace the output directory, as the `--output-dir` flag does.
    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.studio.output_dir = output_dir.into();
        self
    }
}
