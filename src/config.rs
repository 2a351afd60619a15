use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result, bail};
use glob::Pattern;
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = ".polintrc.json";

/// Longest physical line a catalog may contain, quotes included.
pub const DEFAULT_MAX_LINE_LENGTH: usize = 79;

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Glob patterns excluded when walking directories.
    #[serde(default = "default_ignores")]
    pub ignores: Vec<String>,
    #[serde(default = "default_max_line_length")]
    pub max_line_length: usize,
    /// Extra glossary terms, checked after the built-in ones.
    #[serde(default)]
    pub glossary: BTreeMap<String, Vec<String>>,
    /// Personal dictionary sources: local paths or http(s) URLs.
    #[serde(default)]
    pub personal_dictionaries: Vec<String>,
    /// Words accepted by the spelling check in addition to the dictionaries.
    #[serde(default = "default_personal_words")]
    pub personal_words: Vec<String>,
    #[serde(default)]
    pub grammar: GrammarConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GrammarConfig {
    #[serde(default = "default_grammar_enabled")]
    pub enabled: bool,
    #[serde(default = "default_grammar_program")]
    pub program: String,
    /// Arguments following `-f <file>`.
    #[serde(default = "default_grammar_args")]
    pub args: Vec<String>,
    #[serde(default = "default_grammar_timeout_secs")]
    pub timeout_secs: u64,
    /// Command run once when the engine cannot be started. Empty to disable.
    #[serde(default)]
    pub install_command: Vec<String>,
}

fn default_ignores() -> Vec<String> {
    ["**/.git/**", "**/venv/**", "**/.venv/**"]
        .map(String::from)
        .to_vec()
}

fn default_max_line_length() -> usize {
    DEFAULT_MAX_LINE_LENGTH
}

fn default_personal_words() -> Vec<String> {
    vec!["HMAC".to_string()]
}

fn default_grammar_enabled() -> bool {
    true
}

fn default_grammar_program() -> String {
    "grammalecte-cli.py".to_string()
}

fn default_grammar_args() -> Vec<String> {
    ["-off", "apos", "--json", "--only_when_errors"]
        .map(String::from)
        .to_vec()
}

fn default_grammar_timeout_secs() -> u64 {
    120
}

impl Default for GrammarConfig {
    fn default() -> Self {
        Self {
            enabled: default_grammar_enabled(),
            program: default_grammar_program(),
            args: default_grammar_args(),
            timeout_secs: default_grammar_timeout_secs(),
            install_command: Vec::new(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ignores: default_ignores(),
            max_line_length: default_max_line_length(),
            glossary: BTreeMap::new(),
            personal_dictionaries: Vec::new(),
            personal_words: default_personal_words(),
            grammar: GrammarConfig::default(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if a glob pattern in `ignores` is invalid or a limit
    /// is out of range.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }

        if self.max_line_length <= 2 {
            bail!(
                "'maxLineLength' must be greater than 2, got {}",
                self.max_line_length
            );
        }

        for (term, translations) in &self.glossary {
            if translations.is_empty() {
                bail!("Glossary term \"{}\" has no accepted translation", term);
            }
        }

        if self.grammar.enabled && self.grammar.timeout_secs == 0 {
            bail!("'grammar.timeoutSecs' must be greater than 0");
        }

        Ok(())
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
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}
