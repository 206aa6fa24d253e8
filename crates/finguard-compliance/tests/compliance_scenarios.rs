//! End-to-end classification scenarios for Korean and English queries.
//!
//! Run with:
//! ```bash
//! cargo test --package finguard-compliance --test compliance_scenarios
//! ```

use std::sync::Arc;
use std::thread;

use finguard_compliance::{
    build_instruction, classify, disclaimer, ComplianceCategory, ContextSignal, IntentClassifier,
    MatchPhase,
};

fn assert_category(inputs: &[&str], expected: ComplianceCategory) {
    for input in inputs {
        let result = classify(input);
        assert_eq!(result.category, expected, "input: {input:?} -> {result:?}");
        assert_eq!(result.triggered, expected.is_triggered(), "input: {input:?}");
    }
}

#[test]
fn test_informational_queries_do_not_trigger() {
    assert_category(
        &[
            "PER이 뭐야?",
            "삼성전자 실적 알려줘",
            "반도체 업종 분석해줘",
            "영업이익 계산 방법",
            "AAPL 재무제표 보여줘",
            "금리란 무엇인가",
        ],
        ComplianceCategory::Info,
    );
}

#[test]
fn test_strong_advisory_needs_no_context() {
    assert_category(
        &[
            "추천 종목 알려줘",
            "뭐 사면 좋을까",
            "지금 매수해도 되나",
            "목표가가 어디야",
            "손절해야 하나",
            "should i buy NVDA",
            "recommend a stock",
        ],
        ComplianceCategory::Advisory,
    );
    for input in ["뭐 사면 좋을까", "recommend a stock"] {
        assert_eq!(classify(input).phase, Some(MatchPhase::Strong));
    }
}

#[test]
fn test_weak_advisory_with_context() {
    assert_category(
        &["삼성전자 사야 할까?", "AAPL 팔아야 하나?", "투자해도 될까요", "이 종목 괜찮을까"],
        ComplianceCategory::Advisory,
    );

    assert_eq!(
        classify("삼성전자 사야 할까?").context,
        Some(ContextSignal::CompanyName("삼성전자".to_string()))
    );
    assert_eq!(
        classify("AAPL 팔아야 하나?").context,
        Some(ContextSignal::Ticker("AAPL".to_string()))
    );
    assert_eq!(
        classify("투자해도 될까요").context,
        Some(ContextSignal::Vocabulary("투자".to_string()))
    );
    assert_eq!(
        classify("이 종목 괜찮을까").context,
        Some(ContextSignal::Vocabulary("종목".to_string()))
    );
}

#[test]
fn test_weak_advisory_without_context_stays_info() {
    assert_category(
        &["이 옷 사야 할까?", "집 팔아야 하나", "이거 괜찮을까"],
        ComplianceCategory::Info,
    );
    assert!(classify("이 옷 사야 할까?").matched_pattern.is_none());
}

#[test]
fn test_english_vocabulary_inside_other_words_is_not_context() {
    assert_category(
        &[
            "should i get these stockings",
            "will the investigation go up",
            "is inequity going up",
            "is the james bond movie worth buying",
        ],
        ComplianceCategory::Info,
    );

    let stock = classify("should i get more stock");
    assert_eq!(stock.category, ComplianceCategory::Advisory);
    assert_eq!(stock.matched_pattern.as_deref(), Some("should i get"));
    assert_eq!(stock.context, Some(ContextSignal::Vocabulary("stock".to_string())));
}

#[test]
fn test_korean_lookalikes_stay_info() {
    assert_category(
        &["삼성전자 다니면 몇 살까지 일할 수 있어", "코인노래방 가도 괜찮을까"],
        ComplianceCategory::Info,
    );
    assert_category(&["비트코인 지금 살까요", "알트코인 팔아도 될까"], ComplianceCategory::Advisory);
}

#[test]
fn test_prediction_with_and_without_context() {
    assert_category(
        &["삼성전자 올라갈까?", "수익률 보장되나요", "will it go up", "price prediction"],
        ComplianceCategory::Prediction,
    );
    assert_eq!(classify("삼성전자 올라갈까?").phase, Some(MatchPhase::ContextGated));
    assert_eq!(classify("수익률 보장되나요").phase, Some(MatchPhase::Strong));

    let weather = classify("기온 올라갈까?");
    assert!(!weather.triggered);
    assert_eq!(weather.category, ComplianceCategory::Info);
}

#[test]
fn test_case_insensitive() {
    let upper = classify("Should I Buy AAPL?");
    let lower = classify("should i buy aapl?");
    assert_eq!(upper, lower);
    assert!(upper.triggered);
    assert_eq!(upper.category, ComplianceCategory::Advisory);
}

#[test]
fn test_surrounding_whitespace_ignored() {
    assert_eq!(classify("  목표가가 어디야 \n"), classify("목표가가 어디야"));
}

#[test]
fn test_prediction_wins_over_advisory() {
    let result = classify("수익률 보장되는 종목이면 지금 매수해도 되나");
    assert_eq!(result.category, ComplianceCategory::Prediction);
    assert_eq!(result.matched_pattern.as_deref(), Some("수익률 보장"));

    let english = classify("target price and price prediction for NVDA");
    assert_eq!(english.category, ComplianceCategory::Prediction);
}

#[test]
fn test_totality_on_odd_inputs() {
    for input in [
        "", " ", "🚀🚀🚀", "ㅋㅋㅋ", "\u{0}", "A", "1234567890", "매수매도매수매도", "TA\u{212A}E PROFIT",
    ] {
        let result = classify(input);
        assert_eq!(result.triggered, result.category.is_triggered(), "input: {input:?}");
        assert_eq!(result.matched_pattern.is_some(), result.triggered, "input: {input:?}");
    }
}

#[test]
fn test_instruction_per_category() {
    assert_eq!(build_instruction(ComplianceCategory::Info), None);

    let advisory = build_instruction(ComplianceCategory::Advisory).unwrap();
    let prediction = build_instruction(ComplianceCategory::Prediction).unwrap();
    assert!(!advisory.is_empty());
    assert!(!prediction.is_empty());
    assert_ne!(advisory, prediction);
    assert!(advisory.contains(disclaimer(ComplianceCategory::Advisory).unwrap()));
    assert!(prediction.contains(disclaimer(ComplianceCategory::Prediction).unwrap()));
}

#[test]
fn test_shared_classifier_across_threads() {
    let classifier = Arc::new(IntentClassifier::default());
    let inputs = ["삼성전자 사야 할까?", "기온 올라갈까?", "price prediction", "PER이 뭐야?"];

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let classifier = Arc::clone(&classifier);
            thread::spawn(move || {
                inputs
                    .iter()
                    .map(|i| classifier.classify(i).category)
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(
            handle.join().unwrap(),
            vec![
                ComplianceCategory::Advisory,
                ComplianceCategory::Info,
                ComplianceCategory::Prediction,
                ComplianceCategory::Info,
            ]
        );
    }
}
