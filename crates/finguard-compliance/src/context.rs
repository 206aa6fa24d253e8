//! Financial-context gate.
//!
//! Weak patterns ("사야 할까", "괜찮을까", "go up") read the same whether the
//! topic is a stock, a jacket or the weather. They only escalate when the
//! input also carries one of these signals, tested in order:
//!   1. Ticker      : upper-case 1-5 letter token, known ticker, 6-digit KRX code
//!   2. CompanyName : token ending in a company suffix, or a curated alias
//!   3. Vocabulary  : a Korean financial term anywhere, an English one as a whole word

use finguard_common::ContextPatterns;
use regex::Regex;
use serde::{Deserialize, Serialize};

pub const VOCABULARY_KO: &[&str] = &[
    "종목", "투자", "주식", "주가", "매수", "매도", "펀드", "환율", "금리",
    "코스피", "코스닥", "나스닥", "배당", "채권", "증시", "시총", "상장",
    "공모주", "리츠", "비트코인", "알트코인", "암호화폐", "가상자산",
];

/// Matched as whole words, so inflected forms are listed explicitly.
pub const VOCABULARY_EN: &[&str] = &[
    "stock", "stocks", "shares", "share price", "invest", "investing",
    "investment", "investments", "investor", "portfolio", "dividend",
    "dividends", "etf", "etfs", "bonds", "bond yield", "crypto", "bitcoin",
    "equity", "equities", "market cap", "nasdaq", "s&p", "dow jones",
];

/// A token must be strictly longer than the suffix ("은행" alone is a bank,
/// "하나은행" is a listed company).
pub const COMPANY_SUFFIXES: &[&str] = &[
    "전자", "금융", "증권", "은행", "홀딩스", "지주", "바이오", "제약",
    "화학", "중공업", "생명", "화재", "건설", "솔루션", "에너지",
];

pub const COMPANY_ALIASES: &[&str] = &[
    "삼성", "하이닉스", "현대차", "카카오", "네이버", "셀트리온", "포스코",
    "lg엔솔", "테슬라", "애플", "엔비디아", "마이크로소프트", "아마존", "구글",
];

pub const KNOWN_TICKERS: &[&str] = &[
    "aapl", "nvda", "tsla", "msft", "googl", "goog", "amzn", "meta", "amd",
    "intc", "nflx", "spy", "qqq", "tqqq", "soxl",
];

/// Upper-case words that look like tickers but almost never are.
pub const TICKER_STOP_WORDS: &[&str] = &[
    "I", "A", "OK", "TV", "PC", "ID", "PW", "USB", "DIY", "FAQ", "PDF", "LOL",
];

/// Single-syllable particles that may trail a company name ("삼성전자가").
const PARTICLES: &[char] = &[
    '은', '는', '이', '가', '을', '를', '도', '의', '에', '랑', '와', '과', '만',
];

// ASCII word boundaries: Hangul counts as a non-word character, so a particle
// glued to an English token ("ETF가", "PER이") still ends the word.
const TICKER_SHAPE: &str = r"(?-u:\b)[A-Z]{1,5}(?-u:\b)";
const KRX_CODE: &str = r"(?-u:\b)[0-9]{6}(?-u:\b)";

/// Evidence that an input is about financial subject matter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ContextSignal {
    Ticker(String),
    CompanyName(String),
    Vocabulary(String),
}

impl ContextSignal {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContextSignal::Ticker(_) => "TICKER",
            ContextSignal::CompanyName(_) => "COMPANY_NAME",
            ContextSignal::Vocabulary(_) => "VOCABULARY",
        }
    }

    /// The text that produced the signal.
    pub fn evidence(&self) -> &str {
        match self {
            ContextSignal::Ticker(s)
            | ContextSignal::CompanyName(s)
            | ContextSignal::Vocabulary(s) => s,
        }
    }
}

/// Context markers plus the word-bounded matchers compiled from them.
///
/// ASCII terms (English vocabulary, known tickers) only match whole words;
/// Korean terms are plain substrings since particles attach directly.
#[derive(Debug, Clone)]
pub struct FinancialContext {
    vocabulary: Vec<String>,
    company_suffixes: Vec<String>,
    company_aliases: Vec<String>,
    tickers: Vec<String>,
    ticker_stop_words: Vec<String>,
    ticker_shape: Regex,
    krx_code: Regex,
    ticker_matcher: Option<Regex>,
    vocabulary_matcher: Option<Regex>,
}

impl Default for FinancialContext {
    fn default() -> Self {
        Self::builtin()
    }
}

fn owned(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

/// `\b(a|b|c)\b` over the ASCII entries of `terms`, or `None` if there are none.
fn word_matcher<'a>(terms: impl Iterator<Item = &'a String>) -> Option<Regex> {
    let alternation = terms
        .filter(|t| t.is_ascii())
        .map(|t| regex::escape(t))
        .collect::<Vec<_>>()
        .join("|");
    if alternation.is_empty() {
        return None;
    }
    match Regex::new(&format!(r"(?-u:\b)(?:{})(?-u:\b)", alternation)) {
        Ok(re) => Some(re),
        Err(e) => {
            tracing::warn!("Could not compile context matcher: {e}");
            None
        }
    }
}

impl FinancialContext {
    pub fn builtin() -> Self {
        let mut vocabulary = owned(VOCABULARY_KO);
        vocabulary.extend(owned(VOCABULARY_EN));

        let mut ctx = Self {
            vocabulary,
            company_suffixes: owned(COMPANY_SUFFIXES),
            company_aliases: owned(COMPANY_ALIASES),
            tickers: owned(KNOWN_TICKERS),
            ticker_stop_words: owned(TICKER_STOP_WORDS),
            ticker_shape: Regex::new(TICKER_SHAPE).expect("ticker-shape regex is valid"),
            krx_code: Regex::new(KRX_CODE).expect("KRX-code regex is valid"),
            ticker_matcher: None,
            vocabulary_matcher: None,
        };
        ctx.rebuild_matchers();
        ctx
    }

    /// Append configured markers after the built-in ones.
    pub fn extend(&mut self, extra: &ContextPatterns) {
        self.vocabulary.extend(extra.vocabulary.iter().cloned());
        self.company_suffixes.extend(extra.company_suffixes.iter().cloned());
        self.company_aliases.extend(extra.company_aliases.iter().cloned());
        self.tickers.extend(extra.tickers.iter().cloned());
        self.rebuild_matchers();
    }

    fn rebuild_matchers(&mut self) {
        self.ticker_matcher = word_matcher(self.tickers.iter());
        self.vocabulary_matcher = word_matcher(self.vocabulary.iter());
    }

    /// Number of context markers, stop words excluded.
    pub fn marker_count(&self) -> usize {
        self.vocabulary.len()
            + self.company_suffixes.len()
            + self.company_aliases.len()
            + self.tickers.len()
    }

    /// First context signal present in the input.
    ///
    /// `raw` is the trimmed, un-lowercased input (ticker shape needs case);
    /// `normalized` is the lower-cased form used by everything else.
    pub fn detect(&self, raw: &str, normalized: &str) -> Option<ContextSignal> {
        self.ticker_signal(raw, normalized)
            .or_else(|| self.company_signal(normalized))
            .or_else(|| self.vocabulary_signal(normalized))
    }

    pub fn ticker_signal(&self, raw: &str, normalized: &str) -> Option<ContextSignal> {
        let shaped = self
            .ticker_shape
            .find_iter(raw)
            .map(|m| m.as_str())
            .find(|run| !self.ticker_stop_words.iter().any(|w| w == run));
        if let Some(run) = shaped {
            return Some(ContextSignal::Ticker(run.to_string()));
        }

        if let Some(m) = self.ticker_matcher.as_ref().and_then(|re| re.find(normalized)) {
            return Some(ContextSignal::Ticker(m.as_str().to_string()));
        }

        self.krx_code
            .find(normalized)
            .map(|m| ContextSignal::Ticker(m.as_str().to_string()))
    }

    pub fn company_signal(&self, normalized: &str) -> Option<ContextSignal> {
        for token in normalized.split_whitespace() {
            let token = token.trim_matches(|c: char| !c.is_alphanumeric());
            let stem = strip_particle(token);
            for candidate in [token, stem] {
                if self
                    .company_suffixes
                    .iter()
                    .any(|s| candidate.len() > s.len() && candidate.ends_with(s.as_str()))
                {
                    return Some(ContextSignal::CompanyName(candidate.to_string()));
                }
            }
        }

        self.company_aliases
            .iter()
            .find(|alias| normalized.contains(alias.as_str()))
            .map(|alias| ContextSignal::CompanyName(alias.clone()))
    }

    /// Korean terms as substrings (declared order), then English whole words.
    pub fn vocabulary_signal(&self, normalized: &str) -> Option<ContextSignal> {
        if let Some(term) = self
            .vocabulary
            .iter()
            .filter(|term| !term.is_ascii())
            .find(|term| normalized.contains(term.as_str()))
        {
            return Some(ContextSignal::Vocabulary(term.clone()));
        }

        self.vocabulary_matcher
            .as_ref()
            .and_then(|re| re.find(normalized))
            .map(|m| ContextSignal::Vocabulary(m.as_str().to_string()))
    }
}

/// Drop one trailing particle syllable, if present.
fn strip_particle(token: &str) -> &str {
    match token.char_indices().last() {
        Some((idx, c)) if idx > 0 && PARTICLES.contains(&c) => &token[..idx],
        _ => token,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detect(input: &str) -> Option<ContextSignal> {
        let raw = input.trim();
        FinancialContext::builtin().detect(raw, &raw.to_ascii_lowercase())
    }

    #[test]
    fn test_company_suffix() {
        assert_eq!(
            detect("삼성전자 사야 할까?"),
            Some(ContextSignal::CompanyName("삼성전자".to_string()))
        );
    }

    #[test]
    fn test_company_suffix_with_particle() {
        assert_eq!(
            detect("신한금융이 괜찮을까"),
            Some(ContextSignal::CompanyName("신한금융".to_string()))
        );
    }

    #[test]
    fn test_bare_suffix_is_not_a_company() {
        assert_eq!(detect("은행 가도 될까"), None);
    }

    #[test]
    fn test_ticker_shape_on_raw_input() {
        assert_eq!(detect("AAPL 팔아야 하나?"), Some(ContextSignal::Ticker("AAPL".to_string())));
    }

    #[test]
    fn test_known_ticker_lowercase() {
        assert_eq!(detect("nvda 오를까"), Some(ContextSignal::Ticker("nvda".to_string())));
    }

    #[test]
    fn test_stop_word_is_not_a_ticker() {
        assert_eq!(detect("Should I wear it"), None);
    }

    #[test]
    fn test_ticker_embedded_in_word_is_ignored() {
        // "ABCDEF" is six letters and "Hello" is mixed case.
        assert_eq!(detect("ABCDEF Hello"), None);
    }

    #[test]
    fn test_krx_code() {
        assert_eq!(detect("005930 어때"), Some(ContextSignal::Ticker("005930".to_string())));
        assert_eq!(detect("010-1234-5678"), None);
    }

    #[test]
    fn test_vocabulary() {
        assert_eq!(detect("투자해도 될까요"), Some(ContextSignal::Vocabulary("투자".to_string())));
        assert_eq!(detect("이 종목 괜찮을까"), Some(ContextSignal::Vocabulary("종목".to_string())));
    }

    #[test]
    fn test_no_signal_for_everyday_text() {
        assert_eq!(detect("이 옷 사야 할까?"), None);
        assert_eq!(detect("집 팔아야 하나"), None);
        assert_eq!(detect("이거 괜찮을까"), None);
        assert_eq!(detect("기온 올라갈까?"), None);
        assert_eq!(detect(""), None);
    }

    #[test]
    fn test_configured_markers_extend_builtins() {
        let mut ctx = FinancialContext::builtin();
        ctx.extend(&ContextPatterns {
            company_aliases: vec!["에코프로".to_string()],
            ..Default::default()
        });
        assert_eq!(
            ctx.detect("에코프로 살까", "에코프로 살까"),
            Some(ContextSignal::CompanyName("에코프로".to_string()))
        );
    }

    #[test]
    fn test_english_vocabulary_needs_whole_word() {
        assert_eq!(detect("should i get these stockings"), None);
        assert_eq!(detect("will the investigation go up"), None);
        assert_eq!(detect("inequity going up"), None);
        assert_eq!(detect("is the james bond movie worth buying"), None);
        assert_eq!(
            detect("should i get more stock"),
            Some(ContextSignal::Vocabulary("stock".to_string()))
        );
    }

    #[test]
    fn test_english_term_followed_by_particle() {
        assert_eq!(detect("ETF가 괜찮을까"), Some(ContextSignal::Ticker("ETF".to_string())));
        assert_eq!(
            detect("etf가 괜찮을까"),
            Some(ContextSignal::Vocabulary("etf".to_string()))
        );
    }

    #[test]
    fn test_known_ticker_inside_word_is_ignored() {
        // "meta" and "spy" are tickers; "metal" and "spyware" are not.
        assert_eq!(detect("metal spyware"), None);
    }

    #[test]
    fn test_krx_code_inside_longer_number_is_ignored() {
        assert_eq!(detect("1234567890"), None);
    }

    #[test]
    fn test_coin_karaoke_is_not_crypto() {
        assert_eq!(detect("코인노래방 가도 괜찮을까"), None);
        assert_eq!(
            detect("알트코인 괜찮을까"),
            Some(ContextSignal::Vocabulary("알트코인".to_string()))
        );
    }

    #[test]
    fn test_configured_english_vocabulary_is_word_bounded() {
        let mut ctx = FinancialContext::builtin();
        ctx.extend(&ContextPatterns {
            vocabulary: vec!["ipo".to_string()],
            tickers: vec!["pltr".to_string()],
            ..Default::default()
        });
        assert_eq!(ctx.detect("ipo soon", "ipo soon"), Some(ContextSignal::Vocabulary("ipo".to_string())));
        assert_eq!(ctx.detect("hipoint", "hipoint"), None);
        assert_eq!(ctx.detect("pltr up", "pltr up"), Some(ContextSignal::Ticker("pltr".to_string())));
        assert_eq!(ctx.marker_count(), FinancialContext::builtin().marker_count() + 2);
    }
}
