//! The configured source list and its YAML file.
//!
//! The list is an explicit value handed to each run. It only changes between
//! runs, through [`SourceList::add`], [`SourceList::remove`], and
//! [`SourceList::reset`] followed by [`save_sources`].

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ranking::RankingParams;
use crate::ConfigError;

/// Outlets consulted when no sources file exists.
pub const DEFAULT_SOURCES: [&str; 11] = [
    "https://supplychaindigital.com/",
    "https://www.unesco.org/en",
    "https://www.infobae.com/",
    "https://www.xataka.com/",
    "https://www.genbeta.com/",
    "https://hipertextual.com/",
    "https://techcrunch.com/",
    "https://www.theverge.com/",
    "https://openai.com/es-419/news/",
    "https://www.anthropic.com/engineering",
    "https://deepmind.google/blog/",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceConfig {
    pub url: String,
}

impl SourceConfig {
    #[must_use]
    pub fn new(url: &str) -> Self {
        Self {
            url: url.trim().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceList(Vec<SourceConfig>);

impl Default for SourceList {
    fn default() -> Self {
        Self(DEFAULT_SOURCES.iter().map(|u| SourceConfig::new(u)).collect())
    }
}

impl SourceList {
    #[must_use]
    pub fn from_urls<I, S>(urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            urls.into_iter()
                .map(|u| SourceConfig::new(u.as_ref()))
                .collect(),
        )
    }

    #[must_use]
    pub fn as_slice(&self) -> &[SourceConfig] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SourceConfig> {
        self.0.iter()
    }

    /// Appends a source.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] if the URL is not http(s) or is
    /// already in the list.
    pub fn add(&mut self, url: &str) -> Result<(), ConfigError> {
        let source = SourceConfig::new(url);
        validate_url(&source.url)?;
        if self.contains(&source.url) {
            return Err(ConfigError::Validation(format!(
                "source already configured: '{}'",
                source.url
            )));
        }
        self.0.push(source);
        Ok(())
    }

    /// Removes a source, returning whether it was present.
    pub fn remove(&mut self, url: &str) -> bool {
        let key = source_key(url);
        let before = self.0.len();
        self.0.retain(|s| source_key(&s.url) != key);
        self.0.len() != before
    }

    /// Restores the built-in default list.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    #[must_use]
    pub fn contains(&self, url: &str) -> bool {
        let key = source_key(url);
        self.0.iter().any(|s| source_key(&s.url) == key)
    }
}

impl<'a> IntoIterator for &'a SourceList {
    type Item = &'a SourceConfig;
    type IntoIter = std::slice::Iter<'a, SourceConfig>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourcesFile {
    #[serde(default)]
    pub sources: SourceList,
    #[serde(default)]
    pub ranking: RankingParams,
}

/// Comparison key: lower-cased, surrounding whitespace and trailing `/` dropped.
fn source_key(url: &str) -> String {
    url.trim().trim_end_matches('/').to_lowercase()
}

fn validate_url(url: &str) -> Result<(), ConfigError> {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .ok_or_else(|| {
            ConfigError::Validation(format!("source URL must start with http:// or https://: '{url}'"))
        })?;
    let host = rest.split(['/', '?', '#']).next().unwrap_or_default();
    if host.is_empty() || host.contains(char::is_whitespace) {
        return Err(ConfigError::Validation(format!(
            "source URL has no valid host: '{url}'"
        )));
    }
    Ok(())
}

/// Load and validate the sources file.
///
/// A missing file yields the built-in defaults.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_sources(path: &Path) -> Result<SourcesFile, ConfigError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Ok(SourcesFile::default());
        }
        Err(e) => {
            return Err(ConfigError::SourcesFileIo {
                path: path.display().to_string(),
                source: e,
            })
        }
    };

    let file: SourcesFile = serde_yaml::from_str(&content)?;
    validate_sources(&file)?;
    Ok(file)
}

fn validate_sources(file: &SourcesFile) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();
    for source in &file.sources {
        validate_url(&source.url)?;
        if !seen.insert(source_key(&source.url)) {
            return Err(ConfigError::Validation(format!(
                "duplicate source: '{}'",
                source.url
            )));
        }
    }
    if file.ranking.min_results == 0 {
        return Err(ConfigError::Validation(
            "ranking.min_results must be at least 1".to_string(),
        ));
    }
    Ok(())
}

/// Write the sources file, replacing any previous version atomically.
///
/// # Errors
///
/// Returns `ConfigError` if serialization or any filesystem step fails.
pub fn save_sources(path: &Path, file: &SourcesFile) -> Result<(), ConfigError> {
    let io_err = |source: std::io::Error| ConfigError::SourcesFileIo {
        path: path.display().to_string(),
        source,
    };

    let yaml = serde_yaml::to_string(file)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }
    let tmp = path.with_extension("yaml.tmp");
    std::fs::write(&tmp, yaml).map_err(io_err)?;
    std::fs::rename(&tmp, path).map_err(io_err)
}

#[cfg(test)]
#[path = "sources_test.rs"]
mod tests;
