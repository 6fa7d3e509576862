// Startup configuration: CLI flags, environment, and an optional JSON file.
//
// `Cli` is the clap surface; every flag has a `GOWON_*` environment fallback
// where the chat bus defines one. `BotConfig` is the resolved, serde-backed
// configuration. Resolution order, highest first:
//
// 1. CLI flags and their environment variables
// 2. the JSON file named by `--config`
// 3. built-in defaults (`localhost:1883`, empty word lists)
//
// Word lists may arrive as repeated flags, a single space-separated
// environment variable, or JSON arrays; every entry is split on whitespace
// and flattened, so `-s "cat bat" -s hat` yields three words.

use std::path::{Path, PathBuf};

use clap::Parser;
use morelike_engine::Engine;
use morelike_phonetics::{
    HyphenationPatterns, PhoneticsError, PronouncingDictionary, default_dictionary,
    default_patterns,
};
use morelike_prng::PunRng;
use serde::{Deserialize, Serialize};

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 1883;

/// morelike chat-bus module.
#[derive(Parser, Debug, Default)]
#[command(name = "morelike", about = "Answers \"X? More like Y\" requests")]
pub struct Cli {
    /// Host to bind.
    #[arg(short = 'H', long, env = "GOWON_BROKER_HOST")]
    pub broker_host: Option<String>,

    /// Port to bind (0 for auto-assign).
    #[arg(short = 'P', long, env = "GOWON_BROKER_PORT")]
    pub broker_port: Option<u16>,

    /// Substitute words, space-separated; may be repeated.
    #[arg(short = 's', long = "sub-words", env = "GOWON_SUB_WORDS")]
    pub sub_words: Vec<String>,

    /// Words to leave untouched, space-separated; may be repeated.
    #[arg(short = 'i', long = "ignored-words", env = "GOWON_IGNORED_WORDS")]
    pub ignored_words: Vec<String>,

    /// Pronouncing dictionary in cmudict format (defaults to the embedded one).
    #[arg(long)]
    pub dictionary: Option<PathBuf>,

    /// Hyphenation patterns in hunspell `.dic` format.
    #[arg(long)]
    pub patterns: Option<PathBuf>,

    /// Seed for the substitute picker; omitted means seeded from entropy.
    #[arg(long)]
    pub seed: Option<u64>,

    /// JSON configuration file.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Serve stdin/stdout instead of TCP.
    #[arg(long)]
    pub stdio: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Phonetics(#[from] PhoneticsError),
}

/// Resolved bot configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    pub broker_host: String,
    pub broker_port: u16,
    pub sub_words: Vec<String>,
    pub ignored_words: Vec<String>,
    pub dictionary: Option<PathBuf>,
    pub patterns: Option<PathBuf>,
    pub seed: Option<u64>,
    pub stdio: bool,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            broker_host: DEFAULT_HOST.into(),
            broker_port: DEFAULT_PORT,
            sub_words: Vec::new(),
            ignored_words: Vec::new(),
            dictionary: None,
            patterns: None,
            seed: None,
            stdio: false,
        }
    }
}

impl BotConfig {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_json::from_str(text)?;
        config.sub_words = split_words(&config.sub_words);
        config.ignored_words = split_words(&config.ignored_words);
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Layer `cli` over the `--config` file (if any) and the defaults.
    pub fn resolve(cli: Cli) -> Result<Self, ConfigError> {
        let mut config = match &cli.config {
            Some(path) => Self::from_path(path)?,
            None => Self::default(),
        };
        if let Some(host) = cli.broker_host {
            config.broker_host = host;
        }
        if let Some(port) = cli.broker_port {
            config.broker_port = port;
        }
        if !cli.sub_words.is_empty() {
            config.sub_words = split_words(&cli.sub_words);
        }
        if !cli.ignored_words.is_empty() {
            config.ignored_words = split_words(&cli.ignored_words);
        }
        if cli.dictionary.is_some() {
            config.dictionary = cli.dictionary;
        }
        if cli.patterns.is_some() {
            config.patterns = cli.patterns;
        }
        if cli.seed.is_some() {
            config.seed = cli.seed;
        }
        config.stdio |= cli.stdio;
        Ok(config)
    }

    /// Warnings for each data set that falls back to the small embedded
    /// sample, which covers only a few dozen words.
    pub fn embedded_data_warnings(&self) -> Vec<&'static str> {
        let mut warnings = Vec::new();
        if self.dictionary.is_none() {
            warnings.push(
                "no --dictionary given; using the embedded sample dictionary, most words will pass through unchanged",
            );
        }
        if self.patterns.is_none() {
            warnings.push(
                "no --patterns given; using the embedded sample hyphenation patterns",
            );
        }
        warnings
    }

    /// Load the phonetic data and word lists into an engine.
    pub fn build_engine(&self) -> Result<Engine, ConfigError> {
        for warning in self.embedded_data_warnings() {
            tracing::warn!("{warning}");
        }
        let dictionary = match &self.dictionary {
            Some(path) => PronouncingDictionary::from_path(path)?,
            None => default_dictionary(),
        };
        let patterns = match &self.patterns {
            Some(path) => HyphenationPatterns::from_path(path)?,
            None => default_patterns(),
        };
        let engine = Engine::new(dictionary, patterns, &self.sub_words, &self.ignored_words);
        if engine.vocabulary().is_empty() {
            tracing::warn!("no usable substitute words configured; replies will echo input");
        }
        Ok(engine)
    }

    pub fn rng(&self) -> PunRng {
        match self.seed {
            Some(seed) => PunRng::new(seed),
            None => PunRng::from_entropy(),
        }
    }
}

fn split_words(raw: &[String]) -> Vec<String> {
    raw.iter()
        .flat_map(|entry| entry.split_whitespace())
        .map(str::to_string)
        .collect()
}
