//! Run configuration: defaults, optional YAML overrides, CLI overrides.
//!
//! All the knobs that used to be literals at the top of a script live here as
//! one immutable [`RunConfig`] value, assembled once in `main` and passed by
//! reference into the run. Precedence when resolving: CLI flag, then config
//! file, then built-in default. The API key is accepted only via flag or
//! environment, never from the file.

use crate::cli::Cli;
use once_cell::sync::Lazy;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// The NewsAPI search endpoint every request goes to.
pub const NEWSAPI_ENDPOINT: &str = "https://newsapi.org/v2/everything";

/// Pages requested per window. Held at 1 on purpose: the free NewsAPI tier
/// only serves the first page, and raising this changes request volume and
/// cost, so it is a constant rather than an operator flag.
pub const MAX_PAGES: u32 = 1;

/// The largest page size NewsAPI accepts.
pub const MAX_PAGE_SIZE: u32 = 100;

/// The widest days-back span accepted at resolve time: ten years, well past
/// the archive depth of any NewsAPI plan. Spans inside the cap always stay
/// within chrono's representable date range.
pub const MAX_DAYS: u32 = 3650;

pub const DEFAULT_DAYS: u32 = 28;
pub const DEFAULT_PAGE_SIZE: u32 = MAX_PAGE_SIZE;
pub const DEFAULT_LANGUAGE: &str = "en";
pub const DEFAULT_OUTPUT: &str = "trump_last.json";

/// Pause between consecutive windows, as a courtesy to the API's rate
/// limiter. Applied between windows only, never before the first request or
/// after the last.
pub const INTER_WINDOW_DELAY: Duration = Duration::from_secs(1);

/// The phrases collected by default. Used verbatim for the API query and for
/// the local relevance re-check.
pub const DEFAULT_TERMS: &[&str] = &[
    "Donald Trump",
    "President Trump",
    "Trump Administration",
    "Former President Trump",
    "Trump Organization",
    "Donald J. Trump",
];

/// NewsAPI source identifiers for the US and Canadian outlets collected by
/// default.
pub const NORTH_AMERICAN_SOURCES: &[&str] = &[
    "the-new-york-times",
    "the-washington-post",
    "the-wall-street-journal",
    "usa-today",
    "la-times",
    "cnn",
    "fox-news",
    "nbc-news",
    "abc-news",
    "cbs-news",
    "politico",
    "the-hill",
    "national-review",
    "vice-news",
    "associated-press",
    "npr",
    "chicago-tribune",
    "houston-chronicle",
    "boston-globe",
    "miami-herald",
    "bloomberg",
    "cnbc",
    "business-insider",
    "the-globe-and-mail",
    "national-post",
    "toronto-star",
    "vancouver-sun",
    "montreal-gazette",
    "cbc-news",
    "ctv-news",
    "global-news",
];

static DEFAULT_ENDPOINT: Lazy<Url> =
    Lazy::new(|| Url::parse(NEWSAPI_ENDPOINT).expect("endpoint constant is a valid URL"));

/// Errors raised while resolving or validating the run configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("the API key must not be empty")]
    EmptyApiKey,
    #[error("the relevant-term list must not be empty")]
    EmptyTerms,
    #[error("relevant term {0:?} is blank")]
    BlankTerm(String),
    #[error("the source allow-list must not be empty")]
    EmptySources,
    #[error("page size must be between 1 and {}, got {got}", MAX_PAGE_SIZE)]
    PageSize { got: u32 },
    #[error("days must be at most {}, got {got}", MAX_DAYS)]
    Days { got: u32 },
}

/// Optional overrides loaded from a YAML config file.
///
/// Every field may be omitted; omitted fields fall through to the built-in
/// defaults. The API key is deliberately absent from this shape.
#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    pub terms: Option<Vec<String>>,
    pub sources: Option<Vec<String>>,
    pub language: Option<String>,
    pub page_size: Option<u32>,
    pub days: Option<u32>,
    pub output: Option<PathBuf>,
}

impl FileConfig {
    /// Read and parse a YAML config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_yaml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// The complete, immutable configuration for one collection run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Credential sent as the `apiKey` query parameter.
    pub api_key: String,
    /// Search endpoint. Constant in real runs; tests point it at a stub.
    pub endpoint: Url,
    /// Phrases used both in the API query and in the local filter.
    pub terms: Vec<String>,
    /// NewsAPI source identifiers, comma-joined into the `sources` parameter.
    pub sources: Vec<String>,
    /// Two-letter language code.
    pub language: String,
    /// Articles requested per page.
    pub page_size: u32,
    /// How many daily windows to walk back from today.
    pub days: u32,
    /// Where the aggregated JSON array is written.
    pub output: PathBuf,
    /// Pause inserted between windows.
    pub delay: Duration,
}

impl RunConfig {
    /// Assemble the configuration for one run.
    ///
    /// Resolution precedence is CLI flag, then the config file the arguments
    /// point at, then built-in default; the result is validated before it is
    /// returned.
    ///
    /// # Arguments
    ///
    /// * `cli` - The parsed command-line arguments
    ///
    /// # Returns
    ///
    /// The complete, immutable configuration the run loop consumes.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if:
    /// - The config file cannot be read or parsed
    /// - The API key is blank
    /// - The term list is empty or contains a blank entry
    /// - The source list is empty
    /// - The page size or the days span is outside the accepted range
    pub fn resolve(cli: &Cli) -> Result<Self, ConfigError> {
        let file = match cli.config.as_deref() {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };

        let config = Self {
            api_key: cli.api_key.clone(),
            endpoint: DEFAULT_ENDPOINT.clone(),
            terms: resolve_list(&cli.terms, file.terms, DEFAULT_TERMS),
            sources: resolve_list(&cli.sources, file.sources, NORTH_AMERICAN_SOURCES),
            language: cli
                .language
                .clone()
                .or(file.language)
                .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
            page_size: cli.page_size.or(file.page_size).unwrap_or(DEFAULT_PAGE_SIZE),
            days: cli.days.or(file.days).unwrap_or(DEFAULT_DAYS),
            output: cli
                .output
                .clone()
                .or(file.output)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT)),
            delay: INTER_WINDOW_DELAY,
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::EmptyApiKey);
        }
        if self.terms.is_empty() {
            return Err(ConfigError::EmptyTerms);
        }
        if let Some(term) = self.terms.iter().find(|term| term.trim().is_empty()) {
            return Err(ConfigError::BlankTerm(term.clone()));
        }
        if self.sources.is_empty() {
            return Err(ConfigError::EmptySources);
        }
        if self.page_size == 0 || self.page_size > MAX_PAGE_SIZE {
            return Err(ConfigError::PageSize {
                got: self.page_size,
            });
        }
        if self.days > MAX_DAYS {
            return Err(ConfigError::Days { got: self.days });
        }
        Ok(())
    }
}

/// CLI list if any entries were given, else the file's list if present, else
/// the built-in default.
fn resolve_list(cli: &[String], file: Option<Vec<String>>, default: &[&str]) -> Vec<String> {
    if !cli.is_empty() {
        cli.to_vec()
    } else if let Some(list) = file {
        list
    } else {
        default.iter().map(|entry| entry.to_string()).collect()
    }
}
