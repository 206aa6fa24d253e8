//! Compliance directives appended to the language-model system prompt.

use crate::classification::ComplianceCategory;

pub const ADVISORY_DISCLAIMER: &str =
    "본 정보는 투자 권유가 아니며, 투자 판단과 그에 따른 책임은 투자자 본인에게 있습니다.";

pub const PREDICTION_DISCLAIMER: &str =
    "본 내용은 미래 주가나 수익을 예측하거나 보장하지 않으며, 실제 결과는 시장 상황에 따라 크게 달라질 수 있습니다.";

pub const ADVISORY_DIRECTIVE: &str = r#"## COMPLIANCE: INVESTMENT ADVISORY REQUEST
The user is asking for a personal investment recommendation.
- Do NOT tell the user to buy, sell or hold any specific security.
- Do NOT give target prices, entry/exit points, stop-loss or take-profit levels.
- Reframe the answer as educational and analytical content: explain the relevant
  fundamentals, valuation metrics, risks and the factors an investor would weigh.
- End the answer with the following sentence, verbatim:
본 정보는 투자 권유가 아니며, 투자 판단과 그에 따른 책임은 투자자 본인에게 있습니다."#;

pub const PREDICTION_DIRECTIVE: &str = r#"## COMPLIANCE: MARKET PREDICTION REQUEST
The user is asking for a price prediction or a guaranteed return.
- Do NOT predict a specific price, direction or date, and never imply a return is guaranteed.
- Present a multi-scenario analysis (bull / base / bear) with the assumptions behind each.
- State the uncertainty explicitly: name the drivers that could invalidate every scenario.
- End the answer with the following sentence, verbatim:
본 내용은 미래 주가나 수익을 예측하거나 보장하지 않으며, 실제 결과는 시장 상황에 따라 크게 달라질 수 있습니다."#;

/// Directive for a category; `None` leaves the prompt unrestricted.
pub fn build_instruction(category: ComplianceCategory) -> Option<&'static str> {
    match category {
        ComplianceCategory::Info       => None,
        ComplianceCategory::Advisory   => Some(ADVISORY_DIRECTIVE),
        ComplianceCategory::Prediction => Some(PREDICTION_DIRECTIVE),
    }
}

/// The disclaimer sentence alone, for the UI banner.
pub fn disclaimer(category: ComplianceCategory) -> Option<&'static str> {
    match category {
        ComplianceCategory::Info       => None,
        ComplianceCategory::Advisory   => Some(ADVISORY_DISCLAIMER),
        ComplianceCategory::Prediction => Some(PREDICTION_DISCLAIMER),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_info_has_no_instruction() {
        assert_eq!(build_instruction(ComplianceCategory::Info), None);
        assert_eq!(disclaimer(ComplianceCategory::Info), None);
    }

    #[test]
    fn test_directives_are_distinct_and_carry_disclaimer() {
        let advisory = build_instruction(ComplianceCategory::Advisory).unwrap();
        let prediction = build_instruction(ComplianceCategory::Prediction).unwrap();

        assert_ne!(advisory, prediction);
        assert!(advisory.ends_with(ADVISORY_DISCLAIMER));
        assert!(prediction.ends_with(PREDICTION_DISCLAIMER));
        assert!(!advisory.contains(PREDICTION_DISCLAIMER));
        assert!(!prediction.contains(ADVISORY_DISCLAIMER));
    }

    #[test]
    fn test_prediction_directive_asks_for_scenarios() {
        let prediction = build_instruction(ComplianceCategory::Prediction).unwrap();
        assert!(prediction.contains("bull / base / bear"));
    }

    #[test]
    fn test_disclaimer_matches_triggered_categories() {
        for category in ComplianceCategory::ALL {
            assert_eq!(disclaimer(category).is_some(), category.is_triggered());
            assert_eq!(build_instruction(category).is_some(), category.is_triggered());
        }
    }
}
