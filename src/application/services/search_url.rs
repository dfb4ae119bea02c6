use reqwest::Url;

use crate::domain::FilterRecord;

#[derive(Debug, thiserror::Error)]
pub enum SearchUrlError {
    #[error("invalid base url {url}: {reason}")]
    InvalidBase { url: String, reason: String },
}

fn push_text(params: &mut Vec<(&'static str, String)>, key: &'static str, value: &Option<String>) {
    if let Some(value) = value {
        params.push((key, value.clone()));
    }
}

/// Ordered query parameters for a filter record. Absent fields are skipped.
pub fn search_url_params(record: &FilterRecord) -> Vec<(&'static str, String)> {
    let mut params: Vec<(&'static str, String)> = Vec::new();

    push_text(&mut params, "start_date", &record.start_date);
    push_text(&mut params, "end_date", &record.end_date);
    push_text(&mut params, "category", &record.category);
    push_text(&mut params, "sub_category", &record.sub_category);
    if !record.pfm_category.is_empty() {
        params.push(("pfm_category", record.pfm_category.join(",")));
    }
    push_text(&mut params, "transaction_type", &record.transaction_type);
    push_text(&mut params, "movement_type", &record.movement_type);
    push_text(&mut params, "movement_scope", &record.movement_scope);
    push_text(&mut params, "beneficiary", &record.beneficiaries);

    let amount = record.amount_filter();
    if let (Some(operator), Some(value)) = (amount.operator, amount.value) {
        params.push(("amount_operator", operator.as_symbol().to_string()));
        params.push(("amount", value.to_string()));
    }

    if !record.keywords.is_empty() {
        params.push(("keywords", record.keywords.join(" ")));
    }

    params
}

/// Deep link into the transaction screen with the filters pre-applied.
///
/// Pairs already present on `base` are kept ahead of the filter pairs.
pub fn build_search_url(base: &str, record: &FilterRecord) -> Result<Url, SearchUrlError> {
    let mut url = Url::parse(base).map_err(|e| SearchUrlError::InvalidBase {
        url: base.to_string(),
        reason: e.to_string(),
    })?;

    let params = search_url_params(record);
    if !params.is_empty() {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in &params {
            pairs.append_pair(key, value);
        }
    }

    Ok(url)
}
