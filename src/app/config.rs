use anyhow::{Context, Result};
use directories::ProjectDirs;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::constants::{
    APP_NAME, DEFAULT_MAX_NEW_TOKENS, DEFAULT_MAX_TOKENS, DEFAULT_PRIMARY_API_KEY_ENV,
    DEFAULT_PRIMARY_BASE_URL, DEFAULT_PRIMARY_REFERER, DEFAULT_PRIMARY_TITLE,
    DEFAULT_SECONDARY_API_KEY_ENV, DEFAULT_SECONDARY_BASE_URL, DEFAULT_SUMMARY_WINDOW,
    DEFAULT_TEMPERATURE, ENV_PREFIX, PRIMARY_TIMEOUT_SECS, SECONDARY_TIMEOUT_SECS,
};
use crate::models::default_allow_list;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Chat-completion provider tried first
    #[serde(default)]
    pub primary: PrimaryProviderConfig,

    /// Text-generation provider used when the primary is unavailable
    #[serde(default)]
    pub secondary: SecondaryProviderConfig,

    /// Model catalog loading
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Chat-history summaries
    #[serde(default)]
    pub summary: SummaryConfig,
}

/// Primary provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrimaryProviderConfig {
    /// API root; `/chat/completions` and `/models` are appended
    pub base_url: String,
    /// Environment variable containing API key
    pub api_key_env: String,
    pub timeout_secs: u64,
    pub max_tokens: usize,
    pub temperature: f32,
    /// Sent as `HTTP-Referer` for attribution
    pub referer: String,
    /// Sent as `X-Title` for attribution
    pub title: String,
}

impl Default for PrimaryProviderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_PRIMARY_BASE_URL.to_string(),
            api_key_env: DEFAULT_PRIMARY_API_KEY_ENV.to_string(),
            timeout_secs: PRIMARY_TIMEOUT_SECS,
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            referer: DEFAULT_PRIMARY_REFERER.to_string(),
            title: DEFAULT_PRIMARY_TITLE.to_string(),
        }
    }
}

impl PrimaryProviderConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Secondary provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecondaryProviderConfig {
    /// API root; `/<model-repo>` is appended
    pub base_url: String,
    /// Environment variable containing API key
    pub api_key_env: String,
    pub timeout_secs: u64,
    pub max_new_tokens: usize,
    pub temperature: f32,
}

impl Default for SecondaryProviderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_SECONDARY_BASE_URL.to_string(),
            api_key_env: DEFAULT_SECONDARY_API_KEY_ENV.to_string(),
            timeout_secs: SECONDARY_TIMEOUT_SECS,
            max_new_tokens: DEFAULT_MAX_NEW_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

impl SecondaryProviderConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Catalog configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Query the primary provider's model listing at startup
    pub fetch_live: bool,
    /// Only these model ids are ever exposed, in this order
    pub allow_list: Vec<String>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            fetch_live: true,
            allow_list: default_allow_list(),
        }
    }
}

/// Summary configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryConfig {
    /// Number of most recent turns fed to the summarizer
    pub window: usize,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            window: DEFAULT_SUMMARY_WINDOW,
        }
    }
}

/// Where each configuration layer is read from, lowest priority first
#[derive(Debug, Clone)]
pub struct ConfigSources {
    pub global: Option<PathBuf>,
    pub local: PathBuf,
    pub explicit: Option<PathBuf>,
    pub env_prefix: String,
}

impl ConfigSources {
    /// The user's config dir, `./.chatgate/config.toml`, and `CHATGATE_*` variables
    pub fn discover(explicit: Option<&Path>) -> Self {
        Self {
            global: get_config_dir().ok().map(|dir| dir.join("config.toml")),
            local: local_config_path(),
            explicit: explicit.map(Path::to_path_buf),
            env_prefix: ENV_PREFIX.to_string(),
        }
    }
}

/// Load configuration from multiple sources
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    load_config_from(&ConfigSources::discover(explicit))
}

pub fn load_config_from(sources: &ConfigSources) -> Result<Config> {
    let mut figment = Figment::from(Serialized::defaults(Config::default()));

    // Add global config if it exists
    if let Some(global_config) = &sources.global {
        if global_config.exists() {
            figment = figment.merge(Toml::file(global_config));
        }
    }

    // Add local config if it exists
    if sources.local.exists() {
        figment = figment.merge(Toml::file(&sources.local));
    }

    // An explicit file must exist
    if let Some(path) = &sources.explicit {
        if !path.exists() {
            anyhow::bail!("Config file not found: {}", path.display());
        }
        figment = figment.merge(Toml::file(path));
    }

    // Environment variables win; `__` separates nested keys
    figment = figment.merge(Env::prefixed(&sources.env_prefix).split("__"));

    figment
        .extract()
        .context("Failed to load configuration")
}

/// Project-local configuration file
pub fn local_config_path() -> PathBuf {
    PathBuf::from(format!(".{}/config.toml", APP_NAME))
}

/// Get the configuration directory
pub fn get_config_dir() -> Result<PathBuf> {
    if let Some(proj_dirs) = ProjectDirs::from("", "", APP_NAME) {
        Ok(proj_dirs.config_dir().to_path_buf())
    } else {
        // Fallback to home directory
        let home = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .context("Could not determine home directory")?;
        Ok(PathBuf::from(home).join(".config").join(APP_NAME))
    }
}

/// Save configuration to file
pub fn save_config(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let toml_string = toml::to_string_pretty(config)?;
    std::fs::write(path, toml_string)
        .with_context(|| format!("Failed to write config to {}", path.display()))?;

    Ok(())
}

/// Create a default configuration file if it doesn't exist.
/// Returns the path and whether it was newly written.
pub fn init_config() -> Result<(PathBuf, bool)> {
    let config_file = get_config_dir()?.join("config.toml");
    if config_file.exists() {
        return Ok((config_file, false));
    }
    save_config(&Config::default(), &config_file)?;
    Ok((config_file, true))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    /// Sources confined to a temp dir, with an env prefix nothing else sets
    fn isolated(dir: &TempDir, explicit: Option<PathBuf>, env_prefix: &str) -> ConfigSources {
        ConfigSources {
            global: Some(dir.path().join("global").join("config.toml")),
            local: dir.path().join("local").join("config.toml"),
            explicit,
            env_prefix: env_prefix.to_string(),
        }
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.primary.timeout(), Duration::from_secs(30));
        assert_eq!(config.secondary.timeout(), Duration::from_secs(60));
        assert_eq!(config.summary.window, 10);
        assert!(config.catalog.fetch_live);
        assert!(!config.catalog.allow_list.is_empty());
    }

    #[test]
    fn test_no_sources_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let loaded =
            load_config_from(&isolated(&dir, None, "CHATGATE_TEST_EMPTY_")).unwrap();
        assert_eq!(loaded.summary.window, DEFAULT_SUMMARY_WINDOW);
        assert_eq!(loaded.primary.base_url, DEFAULT_PRIMARY_BASE_URL);
    }

    #[test]
    fn test_save_and_load_explicit_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.summary.window = 20;
        config.primary.base_url = "http://localhost:9999/v1".to_string();
        save_config(&config, &path).unwrap();

        let loaded =
            load_config_from(&isolated(&dir, Some(path), "CHATGATE_TEST_EXPLICIT_")).unwrap();
        assert_eq!(loaded.summary.window, 20);
        assert_eq!(loaded.primary.base_url, "http://localhost:9999/v1");
        assert_eq!(loaded.secondary.base_url, DEFAULT_SECONDARY_BASE_URL);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[catalog]\nfetch_live = false\nallow_list = [\"a/b\"]\n").unwrap();

        let loaded =
            load_config_from(&isolated(&dir, Some(path), "CHATGATE_TEST_PARTIAL_")).unwrap();
        assert!(!loaded.catalog.fetch_live);
        assert_eq!(loaded.catalog.allow_list, vec!["a/b".to_string()]);
        assert_eq!(loaded.primary.max_tokens, DEFAULT_MAX_TOKENS);
    }

    #[test]
    fn test_layer_priority() {
        let dir = TempDir::new().unwrap();
        let explicit = dir.path().join("explicit.toml");
        let sources = isolated(&dir, Some(explicit.clone()), "CHATGATE_TEST_LAYERS_");

        let global = sources.global.clone().unwrap();
        std::fs::create_dir_all(global.parent().unwrap()).unwrap();
        std::fs::write(&global, "[summary]\nwindow = 11\n[primary]\nmax_tokens = 100\ntitle = \"global\"\n").unwrap();
        std::fs::create_dir_all(sources.local.parent().unwrap()).unwrap();
        std::fs::write(&sources.local, "[summary]\nwindow = 12\n[primary]\nmax_tokens = 200\n").unwrap();
        std::fs::write(&explicit, "[summary]\nwindow = 13\n").unwrap();
        std::env::set_var("CHATGATE_TEST_LAYERS_SUMMARY__WINDOW", "14");

        let loaded = load_config_from(&sources).unwrap();
        std::env::remove_var("CHATGATE_TEST_LAYERS_SUMMARY__WINDOW");

        assert_eq!(loaded.summary.window, 14);
        assert_eq!(loaded.primary.max_tokens, 200);
        assert_eq!(loaded.primary.title, "global");
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let sources = isolated(&dir, Some(dir.path().join("absent.toml")), "CHATGATE_TEST_MISSING_");
        let err = load_config_from(&sources).unwrap_err();
        assert!(err.to_string().contains("Config file not found"));
    }
}
