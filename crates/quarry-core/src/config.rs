//! Configuration types for quarry.
//!
//! [`Config::load`] reads `~/.config/quarry/config.toml`, creating it with
//! hardcoded defaults if it does not yet exist; [`Config::load_if_present`]
//! reads it only if it is there. [`Config::load_from`] layers an explicit
//! file instead. Both apply `QUARRY__<SECTION>__<KEY>` environment
//! overrides last. [`Config::defaults`] returns the built-in defaults without
//! touching the filesystem or environment (useful in tests).

use serde::Deserialize;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[search]
exact_strip_quotes   = false
exact_case_sensitive = false

[server]
addr = "127.0.0.1:8000"

[corpus]
# posts    = "/path/to/posts.jsonl"
# comments = "/path/to/comments.jsonl"
"#;

const ENV_PREFIX: &str = "QUARRY";

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub corpus: CorpusConfig,
}

/// `[search]` section: how quoted terms are matched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct SearchConfig {
    /// Drop the surrounding `"` of an exact term before comparing. Off by
    /// default, so `"foo"` only matches a body that is literally `"foo"`.
    #[serde(default)]
    pub exact_strip_quotes: bool,
    #[serde(default)]
    pub exact_case_sensitive: bool,
}

/// `[server]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_addr")]
    pub addr: String,
}

fn default_addr() -> String { "127.0.0.1:8000".to_string() }

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: default_addr(),
        }
    }
}

/// `[corpus]` section: where posts and comments are loaded from at startup.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CorpusConfig {
    #[serde(default)]
    pub posts: Option<PathBuf>,
    #[serde(default)]
    pub comments: Option<PathBuf>,
}

impl Config {
    /// Load from `~/.config/quarry/config.toml`, layered on top of the built-in
    /// defaults. Creates the file with defaults if it does not exist.
    pub fn load() -> anyhow::Result<Self> {
        let path = config_path();

        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, DEFAULT_CONFIG.trim_start())?;
        }

        Self::build(&path, false)
    }

    /// Like [`Config::load`], but a missing `config.toml` is skipped rather
    /// than created. Used by commands that should leave no trace on disk.
    pub fn load_if_present() -> anyhow::Result<Self> {
        Self::build(&config_path(), false)
    }

    /// Load an explicit config file, layered on top of the built-in defaults.
    /// The file must exist.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        Self::build(path, true)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }

    fn build(path: &Path, required: bool) -> anyhow::Result<Self> {
        let cfg: Self = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path).required(required))
            .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?
            .try_deserialize()?;

        tracing::debug!(path = %path.display(), "loaded config");
        Ok(cfg)
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("quarry")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
