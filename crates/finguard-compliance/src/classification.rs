//! Compliance intent classification for finance-assistant queries.
//!
//! Lexical, not semantic: every decision is a literal substring test against
//! the normalised input. Precedence, first match wins:
//!   1. prediction-strong
//!   2. advisory-strong
//!   3. prediction-weak + context, then advisory-weak + context
//!   4. Info

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use finguard_common::{CatalogConfig, FinguardError};
use serde::{Deserialize, Serialize};

use crate::context::ContextSignal;
use crate::patterns::{first_match, PatternCatalog};

/// Compliance bucket for a user query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceCategory {
    /// General information or education.
    Info,
    /// Request for a buy/sell/hold recommendation or target price.
    Advisory,
    /// Request for a future price movement or guaranteed return.
    Prediction,
}

impl ComplianceCategory {
    pub const ALL: [ComplianceCategory; 3] = [
        ComplianceCategory::Info,
        ComplianceCategory::Advisory,
        ComplianceCategory::Prediction,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ComplianceCategory::Info       => "INFO",
            ComplianceCategory::Advisory   => "ADVISORY",
            ComplianceCategory::Prediction => "PREDICTION",
        }
    }

    pub fn is_triggered(&self) -> bool {
        match self {
            ComplianceCategory::Info => false,
            ComplianceCategory::Advisory | ComplianceCategory::Prediction => true,
        }
    }
}

impl fmt::Display for ComplianceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComplianceCategory {
    type Err = FinguardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "info"       => Ok(ComplianceCategory::Info),
            "advisory"   => Ok(ComplianceCategory::Advisory),
            "prediction" => Ok(ComplianceCategory::Prediction),
            _ => Err(FinguardError::UnknownCategory(s.to_string())),
        }
    }
}

/// Which pass produced a triggered result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchPhase {
    Strong,
    ContextGated,
}

/// Outcome of classifying one input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub category: ComplianceCategory,
    pub triggered: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_pattern: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase: Option<MatchPhase>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<ContextSignal>,
}

impl ClassificationResult {
    pub fn info() -> Self {
        Self {
            category: ComplianceCategory::Info,
            triggered: false,
            matched_pattern: None,
            phase: None,
            context: None,
        }
    }

    pub fn strong(category: ComplianceCategory, pattern: &str) -> Self {
        Self {
            category,
            triggered: category.is_triggered(),
            matched_pattern: Some(pattern.to_string()),
            phase: Some(MatchPhase::Strong),
            context: None,
        }
    }

    pub fn gated(category: ComplianceCategory, pattern: &str, signal: ContextSignal) -> Self {
        Self {
            category,
            triggered: category.is_triggered(),
            matched_pattern: Some(pattern.to_string()),
            phase: Some(MatchPhase::ContextGated),
            context: Some(signal),
        }
    }
}

/// ASCII case-fold and trim. Hangul has no case and passes through unchanged.
pub fn normalize(input: &str) -> String {
    input.trim().to_ascii_lowercase()
}

/// Rule-based intent classifier over a pattern catalog.
#[derive(Debug, Clone, Default)]
pub struct IntentClassifier {
    catalog: PatternCatalog,
}

impl IntentClassifier {
    pub fn new(catalog: PatternCatalog) -> Self {
        Self { catalog }
    }

    /// Built-in catalog extended with configured patterns.
    pub fn with_config(config: &CatalogConfig) -> Self {
        Self::new(PatternCatalog::with_overrides(config))
    }

    pub fn catalog(&self) -> &PatternCatalog {
        &self.catalog
    }

    pub fn classify(&self, input: &str) -> ClassificationResult {
        let raw = input.trim();
        let normalized = normalize(raw);

        let result = self
            .strong_pass(&normalized)
            .or_else(|| self.gated_pass(raw, &normalized))
            .unwrap_or_else(ClassificationResult::info);

        if result.triggered {
            tracing::debug!(
                category = result.category.as_str(),
                pattern = result.matched_pattern.as_deref().unwrap_or_default(),
                phase = ?result.phase,
                "Compliance intent detected"
            );
        }
        result
    }

    /// Decisive patterns, prediction before advisory.
    pub fn strong_pass(&self, normalized: &str) -> Option<ClassificationResult> {
        if let Some(p) = first_match(&self.catalog.prediction_strong, normalized) {
            return Some(ClassificationResult::strong(ComplianceCategory::Prediction, p));
        }
        if let Some(p) = first_match(&self.catalog.advisory_strong, normalized) {
            return Some(ClassificationResult::strong(ComplianceCategory::Advisory, p));
        }
        None
    }

    /// Weak patterns, escalated only when a financial-context signal is present.
    pub fn gated_pass(&self, raw: &str, normalized: &str) -> Option<ClassificationResult> {
        let prediction = first_match(&self.catalog.prediction_weak, normalized);
        let advisory = first_match(&self.catalog.advisory_weak, normalized);

        let (category, pattern) = match (prediction, advisory) {
            (Some(p), _) => (ComplianceCategory::Prediction, p),
            (None, Some(p)) => (ComplianceCategory::Advisory, p),
            (None, None) => return None,
        };

        match self.catalog.context.detect(raw, normalized) {
            Some(signal) => Some(ClassificationResult::gated(category, pattern, signal)),
            None => {
                tracing::trace!(
                    category = category.as_str(),
                    pattern,
                    "Weak pattern without financial context, left as info"
                );
                None
            }
        }
    }
}

fn default_classifier() -> &'static IntentClassifier {
    static CLASSIFIER: OnceLock<IntentClassifier> = OnceLock::new();
    CLASSIFIER.get_or_init(IntentClassifier::default)
}

/// Classify with the built-in catalog.
pub fn classify(input: &str) -> ClassificationResult {
    default_classifier().classify(input)
}
