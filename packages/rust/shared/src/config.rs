//! Application configuration for the glossary generator.
//!
//! User config lives at `~/.glossary/glossary.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{GlossaryError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "glossary.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".glossary";

// ---------------------------------------------------------------------------
// Config structs (matching glossary.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Output defaults.
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Hyperlink insertion settings.
    #[serde(default)]
    pub linking: LinkingConfig,
}

/// `[defaults]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Directory for the index page when no output path is given.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// File name of the index page when no output path is given.
    #[serde(default = "default_index_name")]
    pub index_name: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            index_name: default_index_name(),
        }
    }
}

impl DefaultsConfig {
    /// `output_dir/index_name`.
    pub fn default_output_path(&self) -> PathBuf {
        Path::new(&self.output_dir).join(&self.index_name)
    }
}

fn default_output_dir() -> String {
    ".".into()
}
fn default_index_name() -> String {
    "index.html".into()
}

/// How term occurrences are substituted into a definition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LinkStrategy {
    /// One replace-all pass per term over the progressively rewritten text.
    /// Later terms may match inside anchors inserted by earlier passes.
    #[default]
    Sequential,
    /// A single scan with all match positions fixed before any rewriting.
    SinglePass,
}

/// `[linking]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkingConfig {
    #[serde(default)]
    pub strategy: LinkStrategy,

    /// Whether a term occurring in its own definition links to its own page.
    #[serde(default = "default_true")]
    pub link_self: bool,
}

impl Default for LinkingConfig {
    fn default() -> Self {
        Self {
            strategy: LinkStrategy::default(),
            link_self: true,
        }
    }
}

fn default_true() -> bool {
    true
}

// ---------------------------------------------------------------------------
// Link options (runtime, merged from config + CLI flags)
// ---------------------------------------------------------------------------

/// Runtime linking options, merged from config file + CLI flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkOptions {
    pub strategy: LinkStrategy,
    pub link_self: bool,
}

impl Default for LinkOptions {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

impl From<&AppConfig> for LinkOptions {
    fn from(config: &AppConfig) -> Self {
        Self {
            strategy: config.linking.strategy,
            link_self: config.linking.link_self,
        }
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.glossary/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| GlossaryError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.glossary/glossary.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| GlossaryError::io(path, e))?;

    toml::from_str(&content)
        .map_err(|e| GlossaryError::config(format!("failed to parse {}: {e}", path.display())))
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| GlossaryError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| GlossaryError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| GlossaryError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize default config");
        assert!(toml_str.contains("index_name"));
        assert!(toml_str.contains("strategy = \"sequential\""));
    }

    #[test]
    fn partial_config_fills_defaults() {
        let toml_str = r#"
[linking]
strategy = "single-pass"
"#;
        let config: AppConfig = toml::from_str(toml_str).expect("parse");
        assert_eq!(config.linking.strategy, LinkStrategy::SinglePass);
        assert!(config.linking.link_self);
        assert_eq!(config.defaults.index_name, "index.html");
    }

    #[test]
    fn link_options_from_app_config() {
        let mut app = AppConfig::default();
        app.linking.link_self = false;
        let opts = LinkOptions::from(&app);
        assert_eq!(opts.strategy, LinkStrategy::Sequential);
        assert!(!opts.link_self);
    }

    #[test]
    fn default_output_path_joins_dir_and_name() {
        let defaults = DefaultsConfig {
            output_dir: "site".into(),
            index_name: "glossary.html".into(),
        };
        assert_eq!(
            defaults.default_output_path(),
            Path::new("site").join("glossary.html")
        );
    }

    #[test]
    fn unparseable_config_is_a_config_error() {
        let path = std::env::temp_dir().join(format!(
            "glossary-config-test-{}.toml",
            std::process::id()
        ));
        std::fs::write(&path, "[linking]\nstrategy = \"sideways\"\n").unwrap();

        let err = load_config_from(&path).unwrap_err();
        assert!(matches!(err, GlossaryError::Config { .. }));

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn missing_config_file_is_an_io_error() {
        let err = load_config_from(Path::new("/definitely/not/here/glossary.toml")).unwrap_err();
        assert!(matches!(err, GlossaryError::Io { .. }));
    }
}
