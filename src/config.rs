use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result, bail};
use glob::Pattern;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::setup::setup;

pub const CONFIG_FILE_NAME: &str = ".potgenrc.json";

/// Domain grouping of documents.
///
/// `true` groups documents by top-level directory, `false` gives every document
/// its own catalog, and a string collects everything into that one domain.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Compact {
    Enabled(bool),
    Domain(String),
}

/// Extra node kinds to extract besides prose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AdditionalTarget {
    Index,
    LiteralBlock,
    DoctestBlock,
    Raw,
    Image,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_project")]
    pub project: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub copyright: String,
    /// Directory holding `*.doctree.json` documents.
    #[serde(default = "default_source_root")]
    pub source_root: String,
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    /// Template directories, searched recursively.
    #[serde(default)]
    pub templates_path: Vec<String>,
    #[serde(default = "default_template_extension")]
    pub template_extension: String,
    /// Glob patterns of document files to skip.
    #[serde(default)]
    pub ignores: Vec<String>,
    #[serde(default = "default_compact")]
    pub compact: Compact,
    #[serde(default = "default_true")]
    pub show_locations: bool,
    /// Show occurrence ids. Also makes ids stable across builds.
    #[serde(default)]
    pub show_ids: bool,
    /// Compile catalogs automatically in builders that consume them.
    #[serde(default = "default_true")]
    pub auto_build: bool,
    #[serde(default)]
    pub additional_targets: Vec<AdditionalTarget>,
    #[serde(default = "default_last_translator")]
    pub last_translator: String,
    #[serde(default = "default_language_team")]
    pub language_team: String,
}

fn default_project() -> String {
    "Project name not set".to_string()
}

fn default_source_root() -> String {
    ".".to_string()
}

fn default_output_dir() -> String {
    "_build/gettext".to_string()
}

fn default_template_extension() -> String {
    "html".to_string()
}

fn default_compact() -> Compact {
    Compact::Enabled(true)
}

fn default_true() -> bool {
    true
}

fn default_last_translator() -> String {
    "FULL NAME <EMAIL@ADDRESS>".to_string()
}

fn default_language_team() -> String {
    "LANGUAGE <LL@li.org>".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            project: default_project(),
            version: String::new(),
            copyright: String::new(),
            source_root: default_source_root(),
            output_dir: default_output_dir(),
            templates_path: Vec::new(),
            template_extension: default_template_extension(),
            ignores: Vec::new(),
            compact: default_compact(),
            show_locations: true,
            show_ids: false,
            auto_build: true,
            additional_targets: Vec::new(),
            last_translator: default_last_translator(),
            language_team: default_language_team(),
        }
    }
}

impl Config {
    /// Parse a config document, checking value kinds against the registered
    /// options before deserializing.
    pub fn from_json(content: &str) -> Result<Self> {
        let raw: Value = serde_json::from_str(content).context("Config is not valid JSON")?;
        let Some(table) = raw.as_object() else {
            bail!("Config must be a JSON object");
        };

        for option in setup().options {
            let Some(value) = table.get(option.name) else {
                continue;
            };
            if !option.accepts(value) {
                bail!(
                    "Invalid value for '{}': expected {}, found {}",
                    option.name,
                    option.expected(),
                    value
                );
            }
        }

        let config: Config = serde_json::from_value(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }

        if self.output_dir.trim().is_empty() {
            bail!("'outputDir' must not be empty");
        }

        if self.template_extension.trim_start_matches('.').is_empty() {
            bail!("'templateExtension' must not be empty");
        }

        if let Compact::Domain(domain) = &self.compact
            && domain.trim().is_empty()
        {
            bail!("'compact' must be a boolean or a non-empty domain name");
        }

        Ok(())
    }

    /// Template file extension without a leading dot.
    pub fn template_extension(&self) -> &str {
        self.template_extension.trim_start_matches('.')
    }

    pub fn extracts(&self, target: AdditionalTarget) -> bool {
        self.additional_targets.contains(&target)
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
    /// Directory relative config paths are resolved against: the config
    /// file's directory, or the start directory when using defaults.
    pub base_dir: PathBuf,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)?;
            let config = Config::from_json(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            tracing::debug!("Loaded config from {}", path.display());
            let base_dir = path.parent().unwrap_or(start_dir).to_path_buf();
            Ok(ConfigLoadResult {
                config,
                from_file: true,
                base_dir,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
            base_dir: start_dir.to_path_buf(),
        }),
    }
}
