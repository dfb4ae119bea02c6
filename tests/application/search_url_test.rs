use spendbot::application::services::{
    QueryOptions, SearchUrlError, build_search_query, build_search_url, search_url_params,
};
use spendbot::domain::FilterRecord;

use crate::helpers::PMU_FILTERS;

const BASE: &str = "https://app.example.com/transactions";

#[test]
fn given_full_record_when_params_listed_then_fixed_order() {
    let record = FilterRecord::from_model_output(PMU_FILTERS).unwrap();

    let keys: Vec<&str> = search_url_params(&record).iter().map(|(k, _)| *k).collect();

    assert_eq!(
        keys,
        vec![
            "start_date",
            "end_date",
            "category",
            "sub_category",
            "pfm_category",
            "transaction_type",
            "movement_type",
            "movement_scope",
            "beneficiary",
            "amount_operator",
            "amount",
        ]
    );
}

#[test]
fn given_full_record_when_url_built_then_values_are_form_encoded() {
    let record = FilterRecord::from_model_output(PMU_FILTERS).unwrap();

    let url = build_search_url(BASE, &record).unwrap().to_string();

    assert!(url.starts_with("https://app.example.com/transactions?start_date=2025-01-01&"));
    assert!(url.contains("sub_category=Bars+%26+caf%C3%A9s"));
    assert!(url.contains("transaction_type=Sorties+d%27argent"));
    assert!(url.contains("amount_operator=%3E&amount=50"));
}

#[test]
fn given_base_with_query_when_url_built_then_existing_pairs_kept_first() {
    let record =
        FilterRecord::from_model_output(r#"{"keywords": ["loyer", "juin"], "amount": "<12,5€"}"#)
            .unwrap();

    let url = build_search_url("https://app.example.com/t?tab=history", &record).unwrap();

    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    assert_eq!(
        pairs,
        vec![
            ("tab".to_string(), "history".to_string()),
            ("amount_operator".to_string(), "<".to_string()),
            ("amount".to_string(), "12.5".to_string()),
            ("keywords".to_string(), "loyer juin".to_string()),
        ]
    );
}

#[test]
fn given_empty_record_when_url_built_then_base_unchanged() {
    let url = build_search_url(BASE, &FilterRecord::default()).unwrap();

    assert_eq!(url.as_str(), BASE);
}

#[test]
fn given_relative_base_when_url_built_then_invalid_base_error() {
    let error = build_search_url("/transactions", &FilterRecord::default()).unwrap_err();

    assert!(matches!(error, SearchUrlError::InvalidBase { .. }));
}

#[test]
fn given_oversized_amount_when_url_and_query_built_then_both_carry_same_value() {
    let record =
        FilterRecord::from_model_output(r#"{"amount": ">99999999999999999999999€"}"#).unwrap();

    let url = build_search_url(BASE, &record).unwrap();
    let query = build_search_query(&record, &QueryOptions::default());

    let url_amount: f64 = url
        .query_pairs()
        .find(|(k, _)| k == "amount")
        .map(|(_, v)| v.parse().unwrap())
        .unwrap();
    let query_amount = query["query"]["bool"]["filter"][0]["range"]["absolute_amount"]["gt"]
        .as_f64()
        .unwrap();
    assert_eq!(url_amount, query_amount);
}

#[test]
fn given_unrepresentable_amount_when_url_and_query_built_then_amount_omitted() {
    let raw = format!(r#"{{"amount": ">{}€"}}"#, "9".repeat(400));
    let record = FilterRecord::from_model_output(&raw).unwrap();

    let url = build_search_url(BASE, &record).unwrap();
    let query = build_search_query(&record, &QueryOptions::default());

    assert_eq!(url.as_str(), BASE);
    assert_eq!(query["query"], serde_json::json!({ "match_all": {} }));
}
