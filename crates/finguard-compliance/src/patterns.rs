//! Pattern tables for the compliance intent classifier.
//!
//! Every table is an ordered list of literal, already-normalised substrings
//! (lower-case, trimmed). Order matters: the first pattern contained in the
//! input wins, there is no longest-match search.
//!
//! Four intent tables per language:
//!   prediction-strong, advisory-strong: decisive on their own
//!   prediction-weak,   advisory-weak  : need a financial-context signal
//!
//! The context markers used to gate the weak tables live in `context.rs`.

use finguard_common::CatalogConfig;

use crate::classification::ComplianceCategory;
use crate::context::FinancialContext;

// ── Prediction ────────────────────────────────────────────────────────────────

pub const PREDICTION_STRONG_KO: &[&str] = &[
    "수익률 보장",
    "수익 보장",
    "무조건 오르",
    "확실히 오르",
    "주가 전망",
    "주가 예측",
    "주가 예상",
    "얼마까지 오를",
    "얼마까지 떨어",
    "상한가 갈",
    "떡상",
    "떡락",
];

pub const PREDICTION_STRONG_EN: &[&str] = &[
    "price prediction",
    "price forecast",
    "stock forecast",
    "will it go up",
    "will it go down",
    "guaranteed return",
    "guaranteed profit",
    "how high will",
    "how low will",
];

pub const PREDICTION_WEAK_KO: &[&str] = &[
    "올라갈까",
    "오를까",
    "오르나요",
    "오를 것 같",
    "내려갈까",
    "떨어질까",
    "떨어질 것 같",
    "내릴까",
    "상승할까",
    "하락할까",
    "반등할까",
    "폭등할까",
    "폭락할까",
    "전망",
];

pub const PREDICTION_WEAK_EN: &[&str] = &[
    "will it rise",
    "will it fall",
    "will rise",
    "will fall",
    "going up",
    "going down",
    "go up",
    "go down",
    "skyrocket",
    "rebound",
    "crash",
    "outlook",
];

// ── Advisory ──────────────────────────────────────────────────────────────────

pub const ADVISORY_STRONG_KO: &[&str] = &[
    "추천 종목",
    "종목 추천",
    "주식 추천",
    "매수 추천",
    "매도 추천",
    "뭐 사면",
    "뭘 사면",
    "무엇을 사면",
    "어떤 종목 사",
    "매수해도",
    "매도해도",
    "매수할까",
    "매도할까",
    "매수 타이밍",
    "매도 타이밍",
    "목표가",
    "목표 주가",
    "손절",
    "익절",
    "물타기",
    "풀매수",
    "몰빵",
];

pub const ADVISORY_STRONG_EN: &[&str] = &[
    "should i buy",
    "should i sell",
    "recommend a stock",
    "recommend stocks",
    "stock recommendation",
    "stock pick",
    "which stock should",
    "what stock should",
    "what should i buy",
    "buy or sell",
    "target price",
    "price target",
    "stop loss",
    "stop-loss",
    "take profit",
    "take-profit",
];

pub const ADVISORY_WEAK_KO: &[&str] = &[
    "사야 할까",
    "사야할까",
    "사야 하나",
    "사야하나",
    "사야 돼",
    "사도 될까",
    "사도 되나",
    "팔아야 할까",
    "팔아야할까",
    "팔아야 하나",
    "팔아야하나",
    "팔아도 될까",
    "팔아도 되나",
    "들어가도 될까",
    "해도 될까",
    "해도 되나",
    "괜찮을까",
    "추천해",
    "살까?",
    "살까요",
    "살까 말까",
    "팔까?",
    "팔까요",
    "팔까 말까",
];

pub const ADVISORY_WEAK_EN: &[&str] = &[
    "worth buying",
    "good time to buy",
    "good time to sell",
    "is it a good buy",
    "should i hold",
    "should i get",
    "buy now",
    "sell now",
];

// ── Pattern sets ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    Korean,
    English,
    /// Patterns added through a catalog file; tested after the built-ins.
    Configured,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Korean => "ko",
            Language::English => "en",
            Language::Configured => "configured",
        }
    }
}

/// A named, ordered collection of literal substrings.
#[derive(Debug, Clone)]
pub struct PatternSet {
    pub name: String,
    pub category: ComplianceCategory,
    pub language: Language,
    pub patterns: Vec<String>,
}

impl PatternSet {
    pub fn new(
        name: impl Into<String>,
        category: ComplianceCategory,
        language: Language,
        patterns: &[&str],
    ) -> Self {
        Self {
            name: name.into(),
            category,
            language,
            patterns: patterns.iter().map(|p| p.to_string()).collect(),
        }
    }

    /// First pattern (in declared order) contained in `normalized`.
    pub fn first_match(&self, normalized: &str) -> Option<&str> {
        self.patterns
            .iter()
            .map(String::as_str)
            .find(|p| normalized.contains(p))
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

/// First match across a group of sets, in group order.
pub fn first_match<'a>(sets: &'a [PatternSet], normalized: &str) -> Option<&'a str> {
    sets.iter().find_map(|set| set.first_match(normalized))
}

// ── Catalog ───────────────────────────────────────────────────────────────────

/// Every table one classifier instance consults.
#[derive(Debug, Clone)]
pub struct PatternCatalog {
    pub prediction_strong: Vec<PatternSet>,
    pub advisory_strong: Vec<PatternSet>,
    pub prediction_weak: Vec<PatternSet>,
    pub advisory_weak: Vec<PatternSet>,
    pub context: FinancialContext,
}

impl Default for PatternCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl PatternCatalog {
    /// The static built-in tables, Korean before English.
    pub fn builtin() -> Self {
        use ComplianceCategory::{Advisory, Prediction};
        use Language::{English, Korean};

        Self {
            prediction_strong: vec![
                PatternSet::new("prediction-strong", Prediction, Korean, PREDICTION_STRONG_KO),
                PatternSet::new("prediction-strong", Prediction, English, PREDICTION_STRONG_EN),
            ],
            advisory_strong: vec![
                PatternSet::new("advisory-strong", Advisory, Korean, ADVISORY_STRONG_KO),
                PatternSet::new("advisory-strong", Advisory, English, ADVISORY_STRONG_EN),
            ],
            prediction_weak: vec![
                PatternSet::new("prediction-weak", Prediction, Korean, PREDICTION_WEAK_KO),
                PatternSet::new("prediction-weak", Prediction, English, PREDICTION_WEAK_EN),
            ],
            advisory_weak: vec![
                PatternSet::new("advisory-weak", Advisory, Korean, ADVISORY_WEAK_KO),
                PatternSet::new("advisory-weak", Advisory, English, ADVISORY_WEAK_EN),
            ],
            context: FinancialContext::builtin(),
        }
    }

    /// Built-in tables followed by the configured extras. Extras are appended
    /// as separate sets so built-in patterns keep their precedence.
    pub fn with_overrides(config: &CatalogConfig) -> Self {
        use ComplianceCategory::{Advisory, Prediction};

        let mut catalog = Self::builtin();
        push_configured(&mut catalog.prediction_strong, "prediction-strong", Prediction, &config.prediction.strong);
        push_configured(&mut catalog.prediction_weak, "prediction-weak", Prediction, &config.prediction.weak);
        push_configured(&mut catalog.advisory_strong, "advisory-strong", Advisory, &config.advisory.strong);
        push_configured(&mut catalog.advisory_weak, "advisory-weak", Advisory, &config.advisory.weak);
        catalog.context.extend(&config.context);
        catalog
    }

    /// Total number of intent patterns (context markers excluded).
    pub fn intent_pattern_count(&self) -> usize {
        [
            &self.prediction_strong,
            &self.advisory_strong,
            &self.prediction_weak,
            &self.advisory_weak,
        ]
        .iter()
        .flat_map(|sets| sets.iter())
        .map(PatternSet::len)
        .sum()
    }
}

fn push_configured(
    sets: &mut Vec<PatternSet>,
    name: &str,
    category: ComplianceCategory,
    extra: &[String],
) {
    if extra.is_empty() {
        return;
    }
    sets.push(PatternSet {
        name: name.to_string(),
        category,
        language: Language::Configured,
        patterns: extra.to_vec(),
    });
}
