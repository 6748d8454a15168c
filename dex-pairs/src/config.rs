//! Runtime configuration.
//!
//! The JSON-RPC endpoint is read from the `URL` environment variable and
//! is required. An optional `dex-pairs.toml` can move the output
//! directory and override where each factory's scan starts:
//!
//! ```toml
//! output_dir = "res"
//!
//! [factories.sushiswap]
//! from_block = 12_000_000
//! ```
//!
//! When no settings file is present the deployment blocks from
//! [`dex_factories::FactoryDescriptor`] and the `res` directory are used.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use dex_factories::{Factory, FactoryError};
use serde::Deserialize;

/// Environment variable holding the JSON-RPC endpoint URL.
pub const ENDPOINT_VAR: &str = "URL";

/// Settings file read when `--config` is not given.
pub const DEFAULT_SETTINGS_FILE: &str = "dex-pairs.toml";

/// Output directory used when neither the CLI nor the settings name one.
pub const DEFAULT_OUTPUT_DIR: &str = "res";

/// The JSON-RPC endpoint the dump runs against.
#[derive(Debug, Clone)]
pub struct Endpoint {
    url: String,
}

impl Endpoint {
    /// Read the endpoint from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if [`ENDPOINT_VAR`] is unset or blank.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the endpoint through `lookup`, which maps a variable name to
    /// its value.
    ///
    /// # Errors
    ///
    /// Returns an error if `lookup` has no non-blank value for
    /// [`ENDPOINT_VAR`].
    pub fn from_lookup(lookup: impl FnOnce(&str) -> Option<String>) -> Result<Self> {
        let url = lookup(ENDPOINT_VAR)
            .map(|v| v.trim().to_owned())
            .filter(|v| !v.is_empty())
            .with_context(|| {
                format!("{ENDPOINT_VAR} is not set (e.g. {ENDPOINT_VAR}=http://localhost:8545)")
            })?;
        Ok(Self { url })
    }

    /// The endpoint URL as given.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

/// Optional settings loaded from TOML.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Directory the pair lists are written to.
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
    /// Per-factory overrides, keyed by factory name (`uniswap-v1`, ...).
    #[serde(default)]
    pub factories: HashMap<String, FactoryOverride>,
}

/// Overrides for a single factory.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FactoryOverride {
    /// First block to scan instead of the deployment block.
    pub from_block: Option<u64>,
}

impl Settings {
    /// Load settings from a TOML file.
    ///
    /// Returns [`Settings::default`] if the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed,
    /// or names a factory that does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text =
            std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("parsing {}", path.display()))
    }

    /// Parse settings from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error on malformed TOML or an unknown factory name.
    pub fn parse(text: &str) -> Result<Self> {
        let settings: Self = toml::from_str(text)?;
        for name in settings.factories.keys() {
            if Factory::from_name(name).is_none() {
                return Err(FactoryError::UnknownFactory(name.clone()).into());
            }
        }
        Ok(settings)
    }

    /// First block to scan for `factory`.
    #[must_use]
    pub fn start_block(&self, factory: Factory) -> u64 {
        self.factories
            .get(factory.name())
            .and_then(|o| o.from_block)
            .unwrap_or(factory.descriptor().deployment_block)
    }

    /// Resolve the output directory: the CLI value wins over the settings
    /// file, which wins over [`DEFAULT_OUTPUT_DIR`].
    #[must_use]
    pub fn output_dir(&self, cli_override: Option<&Path>) -> PathBuf {
        cli_override
            .or(self.output_dir.as_deref())
            .map_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR), Path::to_path_buf)
    }
}
