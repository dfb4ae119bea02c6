use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::amount::{AmountFilter, parse_amount};

/// Aggregation the user asked for, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MathOperation {
    Sum,
    Max,
    Min,
    Avg,
    Count,
    #[default]
    Null,
}

impl MathOperation {
    pub const ALL: [&'static str; 6] = ["SUM", "MAX", "MIN", "AVG", "COUNT", "NULL"];

    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_uppercase().as_str() {
            "SUM" => Self::Sum,
            "MAX" => Self::Max,
            "MIN" => Self::Min,
            "AVG" | "AVERAGE" => Self::Avg,
            "COUNT" => Self::Count,
            _ => Self::Null,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sum => "SUM",
            Self::Max => "MAX",
            Self::Min => "MIN",
            Self::Avg => "AVG",
            Self::Count => "COUNT",
            Self::Null => "NULL",
        }
    }
}

/// Filters extracted from one user query. Lives for a single request.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FilterRecord {
    #[serde(default, deserialize_with = "nullable_text")]
    pub time_frame: Option<String>,
    #[serde(default, deserialize_with = "nullable_text")]
    pub start_date: Option<String>,
    #[serde(default, deserialize_with = "nullable_text")]
    pub end_date: Option<String>,
    #[serde(default, deserialize_with = "nullable_text")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "nullable_text")]
    pub sub_category: Option<String>,
    #[serde(default, alias = "pfm-category", deserialize_with = "text_list")]
    pub pfm_category: Vec<String>,
    #[serde(default, deserialize_with = "nullable_text")]
    pub transaction_type: Option<String>,
    #[serde(default, deserialize_with = "nullable_text")]
    pub movement_type: Option<String>,
    #[serde(default, deserialize_with = "nullable_text")]
    pub movement_scope: Option<String>,
    #[serde(
        default,
        alias = "beneficiares",
        alias = "beneficiary",
        deserialize_with = "nullable_text"
    )]
    pub beneficiaries: Option<String>,
    #[serde(default, deserialize_with = "math_operation")]
    pub math_operation: MathOperation,
    #[serde(default, deserialize_with = "nullable_text")]
    pub amount: Option<String>,
    #[serde(default, deserialize_with = "text_list")]
    pub keywords: Vec<String>,
    #[serde(default, deserialize_with = "confidence_map")]
    pub confidence_scores: BTreeMap<String, f64>,
    #[serde(default, deserialize_with = "phrase_list")]
    pub clarification_needed: Vec<String>,
    #[serde(default, deserialize_with = "phrase_list")]
    pub clarification_options: Vec<String>,
    #[serde(skip)]
    pub user_message: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum FilterParseError {
    #[error("invalid JSON response format: {0}")]
    InvalidJson(String),
}

impl FilterRecord {
    pub fn from_model_output(raw: &str) -> Result<Self, FilterParseError> {
        serde_json::from_str(raw.trim()).map_err(|e| FilterParseError::InvalidJson(e.to_string()))
    }

    pub fn amount_filter(&self) -> AmountFilter {
        self.amount.as_deref().map(parse_amount).unwrap_or_default()
    }

    pub fn needs_clarification(&self) -> bool {
        !self.clarification_needed.is_empty()
    }

    /// True when no field would narrow a search.
    pub fn is_unconstrained(&self) -> bool {
        self.start_date.is_none()
            && self.end_date.is_none()
            && self.category.is_none()
            && self.sub_category.is_none()
            && self.pfm_category.is_empty()
            && self.transaction_type.is_none()
            && self.movement_type.is_none()
            && self.movement_scope.is_none()
            && self.beneficiaries.is_none()
            && self.amount_filter().is_empty()
            && self.keywords.is_empty()
    }
}

fn normalize_text(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("null") {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn nullable_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => normalize_text(&s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

fn text_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| item.as_str().and_then(normalize_text))
            .collect(),
        Some(Value::String(s)) => s.split(',').filter_map(normalize_text).collect(),
        _ => Vec::new(),
    })
}

/// Like `text_list`, but a bare string is one sentence and is never split.
fn phrase_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| item.as_str().and_then(normalize_text))
            .collect(),
        Some(Value::String(s)) => normalize_text(&s).into_iter().collect(),
        _ => Vec::new(),
    })
}

fn math_operation<'de, D>(deserializer: D) -> Result<MathOperation, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(Value::as_str)
        .map(MathOperation::parse)
        .unwrap_or_default())
}

fn confidence_map<'de, D>(deserializer: D) -> Result<BTreeMap<String, f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Object(map)) => map
            .into_iter()
            .filter_map(|(field, score)| score.as_f64().map(|s| (field, s.clamp(0.0, 1.0))))
            .collect(),
        _ => BTreeMap::new(),
    })
}
