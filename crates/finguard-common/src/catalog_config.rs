//! Catalog configuration for extra compliance patterns.
//!
//! The built-in pattern tables ship with the compliance crate. Deployments can
//! extend them (never reorder them) through a TOML, YAML or JSON file, e.g.
//!
//! ```toml
//! [advisory]
//! weak = ["담아도 될까"]
//!
//! [context]
//! company_aliases = ["에코프로"]
//! tickers = ["pltr"]
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{FinguardError, Result};

/// Env var consulted when no explicit catalog path is given.
pub const CONFIG_ENV_VAR: &str = "FINGUARD_CONFIG";

/// Extra patterns appended after the built-in catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Prediction cues
    #[serde(default)]
    pub prediction: IntentPatterns,

    /// Advisory cues
    #[serde(default)]
    pub advisory: IntentPatterns,

    /// Financial-context markers used by the weak-pattern gate
    #[serde(default)]
    pub context: ContextPatterns,
}

// ── Intent patterns ───────────────────────────────────────────────────────────

/// Strong and weak cues for one compliance category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IntentPatterns {
    /// Decisive on their own
    #[serde(default)]
    pub strong: Vec<String>,

    /// Only count when a financial-context signal is also present
    #[serde(default)]
    pub weak: Vec<String>,
}

// ── Context markers ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContextPatterns {
    /// Financial vocabulary terms (e.g. "종목", "dividend")
    #[serde(default)]
    pub vocabulary: Vec<String>,

    /// Korean company-name suffixes (e.g. "전자", "증권")
    #[serde(default)]
    pub company_suffixes: Vec<String>,

    /// Company names and aliases matched as substrings
    #[serde(default)]
    pub company_aliases: Vec<String>,

    /// Known ticker tokens, matched as whole words
    #[serde(default)]
    pub tickers: Vec<String>,
}

// ── Loading ───────────────────────────────────────────────────────────────────

impl CatalogConfig {
    /// Load from TOML file
    pub fn from_toml(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        config.normalized()
    }

    /// Load from YAML file
    pub fn from_yaml(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        config.normalized()
    }

    /// Load from JSON file
    pub fn from_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.normalized()
    }

    /// Load a catalog file, picking the format from its extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match ext.as_deref() {
            Some("toml") => Self::from_toml(path),
            Some("yaml") | Some("yml") => Self::from_yaml(path),
            Some("json") => Self::from_json(path),
            _ => Err(FinguardError::Config(format!(
                "Unsupported catalog file extension: {}",
                path.display()
            ))),
        }
    }

    /// Resolve the catalog location: explicit path first, then FINGUARD_CONFIG.
    /// Returns `Ok(None)` when neither is set, meaning built-in patterns only.
    pub fn load(explicit: Option<&Path>) -> Result<Option<Self>> {
        let path: Option<PathBuf> = match explicit {
            Some(p) => Some(p.to_path_buf()),
            None => std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from),
        };

        let Some(path) = path else {
            return Ok(None);
        };

        if !path.exists() {
            return Err(FinguardError::Config(format!(
                "Catalog file not found: {}",
                path.display()
            )));
        }

        let config = Self::from_path(&path)?;
        tracing::info!(
            path = %path.display(),
            patterns = config.pattern_count(),
            "Compliance catalog loaded"
        );
        Ok(Some(config))
    }

    /// Lower-case and trim every entry. Empty entries are rejected: an empty
    /// pattern would match every input.
    pub fn normalized(mut self) -> Result<Self> {
        for (name, list) in self.lists_mut() {
            for entry in list.iter_mut() {
                let norm = entry.trim().to_ascii_lowercase();
                if norm.is_empty() {
                    return Err(FinguardError::Config(format!(
                        "Empty pattern in `{name}`"
                    )));
                }
                *entry = norm;
            }
        }
        Ok(self)
    }

    /// Total number of configured patterns across all lists.
    pub fn pattern_count(&self) -> usize {
        self.prediction.strong.len()
            + self.prediction.weak.len()
            + self.advisory.strong.len()
            + self.advisory.weak.len()
            + self.context.vocabulary.len()
            + self.context.company_suffixes.len()
            + self.context.company_aliases.len()
            + self.context.tickers.len()
    }

    fn lists_mut(&mut self) -> [(&'static str, &mut Vec<String>); 8] {
        [
            ("prediction.strong", &mut self.prediction.strong),
            ("prediction.weak", &mut self.prediction.weak),
            ("advisory.strong", &mut self.advisory.strong),
            ("advisory.weak", &mut self.advisory.weak),
            ("context.vocabulary", &mut self.context.vocabulary),
            ("context.company_suffixes", &mut self.context.company_suffixes),
            ("context.company_aliases", &mut self.context.company_aliases),
            ("context.tickers", &mut self.context.tickers),
        ]
    }
}
