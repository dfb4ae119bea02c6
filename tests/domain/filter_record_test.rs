use spendbot::domain::{ComparisonOperator, FilterRecord, MathOperation};

use crate::helpers::PMU_FILTERS;

#[test]
fn given_full_model_output_when_parsed_then_every_field_is_mapped() {
    let record = FilterRecord::from_model_output(PMU_FILTERS).unwrap();

    assert_eq!(record.time_frame.as_deref(), Some("last month"));
    assert_eq!(record.start_date.as_deref(), Some("2025-01-01"));
    assert_eq!(record.end_date.as_deref(), Some("2025-01-31"));
    assert_eq!(record.category.as_deref(), Some("Paiements"));
    assert_eq!(record.pfm_category, vec!["cafes_bars"]);
    assert_eq!(record.beneficiaries.as_deref(), Some("PMU"));
    assert_eq!(record.math_operation, MathOperation::Sum);
    assert!(record.keywords.is_empty());
    assert!(record.needs_clarification());
    assert_eq!(record.clarification_options.len(), 2);
    assert_eq!(record.confidence_scores.get("beneficiaries"), Some(&0.3));

    let amount = record.amount_filter();
    assert_eq!(amount.operator, Some(ComparisonOperator::GreaterThan));
    assert_eq!(amount.value, Some(50.0));
    assert!(!record.is_unconstrained());
}

#[test]
fn given_output_wrapped_in_whitespace_when_parsed_then_accepted() {
    let record = FilterRecord::from_model_output("\n  {\"amount\": \"NULL\"}  \n").unwrap();

    assert!(record.amount_filter().is_empty());
    assert!(record.is_unconstrained());
}

#[test]
fn given_prose_when_parsed_then_error() {
    assert!(FilterRecord::from_model_output("Voici les filtres demandés").is_err());
}

#[test]
fn given_unknown_math_operation_when_parsed_then_null() {
    let record = FilterRecord::from_model_output(r#"{"math_operation": "MEDIAN"}"#).unwrap();

    assert_eq!(record.math_operation, MathOperation::Null);
    assert_eq!(record.math_operation.as_str(), "NULL");
}

#[test]
fn given_clarification_as_plain_string_with_commas_when_parsed_then_kept_whole() {
    let record = FilterRecord::from_model_output(
        r#"{"clarification_needed": "PMU peut être un lieu de paris, ou un simple bar. À quoi faites-vous référence ?", "clarification_options": "NULL"}"#,
    )
    .unwrap();

    assert_eq!(
        record.clarification_needed,
        vec!["PMU peut être un lieu de paris, ou un simple bar. À quoi faites-vous référence ?"]
    );
    assert!(record.clarification_options.is_empty());
}

#[test]
fn given_keywords_as_comma_string_when_parsed_then_split() {
    let record = FilterRecord::from_model_output(r#"{"keywords": "loyer, juin"}"#).unwrap();

    assert_eq!(record.keywords, vec!["loyer", "juin"]);
}
