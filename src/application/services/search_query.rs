use serde_json::{Value, json};

use crate::domain::FilterRecord;

/// Index field names and paging used when building a history query.
#[derive(Debug, Clone)]
pub struct QueryOptions {
    pub size: usize,
    pub date_field: String,
    pub amount_field: String,
    pub category_field: String,
    pub pfm_category_field: String,
    pub transaction_type_field: String,
    pub movement_type_field: String,
    pub movement_scope_field: String,
    pub beneficiary_field: String,
    pub text_fields: Vec<String>,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            size: 100,
            date_field: "date".to_string(),
            amount_field: "absolute_amount".to_string(),
            category_field: "category".to_string(),
            pfm_category_field: "pfm_category".to_string(),
            transaction_type_field: "transaction_type".to_string(),
            movement_type_field: "movement_type".to_string(),
            movement_scope_field: "movement_scope".to_string(),
            beneficiary_field: "beneficiary".to_string(),
            text_fields: vec![
                "label".to_string(),
                "beneficiary".to_string(),
                "description".to_string(),
            ],
        }
    }
}

/// Builds an Elasticsearch-style bool query from the extracted filters.
///
/// Exact-match constraints go to `filter`, scored text matches to `must`.
/// A record with no usable field produces `match_all`.
pub fn build_search_query(record: &FilterRecord, options: &QueryOptions) -> Value {
    let mut filter: Vec<Value> = Vec::new();
    let mut must: Vec<Value> = Vec::new();

    if record.start_date.is_some() || record.end_date.is_some() {
        let mut range = serde_json::Map::new();
        if let Some(start) = &record.start_date {
            range.insert("gte".to_string(), json!(start));
        }
        if let Some(end) = &record.end_date {
            range.insert("lte".to_string(), json!(end));
        }
        range.insert("format".to_string(), json!("yyyy-MM-dd"));
        filter.push(json!({ "range": { options.date_field.as_str(): range } }));
    }

    let exact_terms = [
        (&options.category_field, &record.category),
        (&options.transaction_type_field, &record.transaction_type),
        (&options.movement_type_field, &record.movement_type),
        (&options.movement_scope_field, &record.movement_scope),
    ];
    for (field, value) in exact_terms {
        if let Some(value) = value {
            filter.push(json!({ "term": { field.as_str(): value } }));
        }
    }

    if !record.pfm_category.is_empty() {
        filter.push(json!({ "terms": { options.pfm_category_field.as_str(): record.pfm_category } }));
    }

    let amount = record.amount_filter();
    if let (Some(operator), Some(value)) = (amount.operator, amount.value) {
        let clause = match operator.range_keyword() {
            Some(keyword) => json!({ "range": { options.amount_field.as_str(): { keyword: value } } }),
            None => json!({ "term": { options.amount_field.as_str(): value } }),
        };
        filter.push(clause);
    }

    if let Some(beneficiary) = &record.beneficiaries {
        must.push(json!({
            "match": { options.beneficiary_field.as_str(): { "query": beneficiary, "fuzziness": "AUTO" } }
        }));
    }

    let mut text_terms: Vec<&str> = record.keywords.iter().map(String::as_str).collect();
    if let Some(sub_category) = &record.sub_category {
        text_terms.push(sub_category);
    }
    if !text_terms.is_empty() {
        must.push(json!({
            "multi_match": {
                "query": text_terms.join(" "),
                "fields": options.text_fields,
                "operator": "or"
            }
        }));
    }

    let query = if filter.is_empty() && must.is_empty() {
        json!({ "match_all": {} })
    } else {
        let mut bool_query = serde_json::Map::new();
        if !filter.is_empty() {
            bool_query.insert("filter".to_string(), Value::Array(filter));
        }
        if !must.is_empty() {
            bool_query.insert("must".to_string(), Value::Array(must));
        }
        json!({ "bool": bool_query })
    };

    json!({
        "size": options.size,
        "sort": [{ options.date_field.as_str(): { "order": "desc" } }],
        "query": query
    })
}
