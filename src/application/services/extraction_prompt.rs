use chrono::NaiveDate;
use serde_json::{Value, json};

use crate::domain::MathOperation;
use crate::domain::catalog::{
    MOVEMENT_SCOPES, MOVEMENT_TYPES, PFM_CATEGORIES, TRANSACTION_CATEGORIES, TRANSACTION_TYPES,
};

pub const EXTRACTION_SYSTEM_PROMPT: &str = "Extract structured data for transaction filtering.";
pub const EXTRACTION_SCHEMA_NAME: &str = "response";

fn quoted_list(values: &[&str]) -> String {
    values
        .iter()
        .map(|v| format!("\"{}\"", v))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Builds the user message asking the model to fill the transaction filter form.
pub fn build_extraction_prompt(user_input: &str, today: NaiveDate) -> String {
    format!(
        r#"You extract structured information from a banking customer's question in order to fill a transaction search form.

## Context
- Today is {today}. Resolve every relative period against this date.
- Questions may be written in formal French, casual French, slang (argot) or English.
- Some words name either a spending category or a specific merchant. Resolve them from context, or ask for clarification.

## Allowed values
- Transaction categories: [{categories}]
- Transaction types: [{types}]
- Movement types: [{movement_types}]
- Movement scopes: [{movement_scopes}]
- PFM categories: [{pfm}]

## Fields to extract
- time_frame: the period in words ("last month", "this year", "cette semaine").
- start_date, end_date: the period as YYYY-MM-DD. "January" means the most recent January. "last week" is the previous Monday to Sunday.
- category: the single most relevant transaction category.
- pfm_category: every relevant PFM category, as a list.
- sub_category: a finer French label describing the intent ("drinks" -> "bars & cafés", "grec" -> "restaurant").
- transaction_type: the single most relevant transaction type.
- movement_type, movement_scope: direction and counterpart of the money movement.
- beneficiaries: the merchant or person, only when explicitly named.
- math_operation: one of {operations} matching what the user wants computed.
- amount: operator followed by value and currency, e.g. ">50€", "<100€", "=20€". Use "NULL" when no amount is mentioned.
- keywords: other significant words useful for a full-text search.
- confidence_scores: a score between 0 and 1 for each extracted field.
- clarification_needed: questions (in French) to ask when the request is ambiguous, instead of guessing.
- clarification_options: exactly two short choices the user can pick from when a clarification is needed.

Use "NULL" for any string field that does not apply and an empty list for list fields.

## Ambiguity rules
- A word that can be both a sub_category and a beneficiary requires a clarification.
  "Combien ai-je dépensé au Grec ?" -> generic kebab restaurant or one named shop?
  Ask: "Voulez-vous dire un restaurant grec en général ou un établissement spécifique ?"
- "J'ai claqué au PMU" -> betting shop or a simple bar visit (cafes_bars)?
  Ask: "PMU peut être un lieu de paris ou un simple bar. À quoi faites-vous référence ?"
- "McDo" is a named chain (beneficiary) unless the user talks about fast food in general.
- "La boulangerie" is the bakeries category unless a shop name follows.

## Slang
- "claquer", "cramer", "flamber" mean spending. "balles" means euros.
- "J'ai filé 50 balles à Thomas" is an outgoing transfer to a contact of "=50€".
- "J'ai tout cramé à la FNAC" is shopping, probably electronics_it_stores.
- "en soirée" points to cafes_bars or entertainment.

## Example
Question: "Show my payments at PMU last month over 50€."
Answer:
{{"time_frame": "last month", "start_date": "2024-01-01", "end_date": "2024-01-31", "category": "Paiements", "pfm_category": ["cafes_bars", "betting"], "sub_category": "Bars & cafés", "transaction_type": "Sorties d'argent", "movement_type": "outflow", "movement_scope": "merchants", "beneficiaries": "PMU", "math_operation": "NULL", "amount": ">50€", "keywords": [], "confidence_scores": {{"time_frame": 1.0, "category": 0.9, "beneficiaries": 0.3, "amount": 1.0}}, "clarification_needed": ["PMU peut être un lieu de paris ou un simple bar. À quoi faites-vous référence ?"], "clarification_options": ["lieu de paris", "un simple bar"]}}

Return only the JSON object.

Question: "{user_input}""#,
        today = today.format("%Y-%m-%d"),
        categories = quoted_list(TRANSACTION_CATEGORIES),
        types = quoted_list(TRANSACTION_TYPES),
        movement_types = quoted_list(MOVEMENT_TYPES),
        movement_scopes = quoted_list(MOVEMENT_SCOPES),
        pfm = quoted_list(PFM_CATEGORIES),
        operations = MathOperation::ALL.join(", "),
        user_input = user_input.trim(),
    )
}

fn text_field(description: &str) -> Value {
    json!({ "type": "string", "description": description })
}

fn nullable_text_field(description: &str) -> Value {
    json!({ "type": ["string", "null"], "description": description })
}

fn text_list_field(description: &str) -> Value {
    json!({ "type": "array", "items": { "type": "string" }, "description": description })
}

/// Strict structured-output schema for the filter record.
pub fn extraction_schema() -> Value {
    let scored_fields = [
        "time_frame",
        "category",
        "sub_category",
        "pfm_category",
        "transaction_type",
        "beneficiaries",
        "amount",
    ];
    let score_properties: serde_json::Map<String, Value> = scored_fields
        .iter()
        .map(|field| ((*field).to_string(), json!({ "type": "number" })))
        .collect();

    let properties = json!({
        "time_frame": text_field("The relevant period in words, e.g. 'last month'."),
        "start_date": text_field("Start of the period, YYYY-MM-DD."),
        "end_date": text_field("End of the period, YYYY-MM-DD."),
        "category": text_field("Most relevant transaction category from the allowed list."),
        "sub_category": text_field("Finer French label for the spending intent."),
        "pfm_category": {
            "type": "array",
            "items": { "type": "string", "enum": PFM_CATEGORIES },
            "description": "Relevant PFM categories."
        },
        "transaction_type": text_field("Most relevant transaction type from the allowed list."),
        "movement_type": text_field("Direction of the money movement."),
        "movement_scope": text_field("Counterpart of the money movement."),
        "beneficiaries": text_field("Named merchant or person, if explicit."),
        "math_operation": {
            "type": "string",
            "enum": MathOperation::ALL,
            "description": "Computation requested by the user."
        },
        "amount": nullable_text_field("Amount with leading operator, e.g. '>50€'."),
        "keywords": text_list_field("Additional full-text search terms."),
        "confidence_scores": {
            "type": "object",
            "properties": score_properties,
            "required": scored_fields,
            "additionalProperties": false
        },
        "clarification_needed": text_list_field("Questions to ask when the request is ambiguous."),
        "clarification_options": text_list_field("Two choices offered with a clarification."),
    });

    let required: Vec<&str> = properties
        .as_object()
        .map(|fields| fields.keys().map(String::as_str).collect())
        .unwrap_or_default();

    json!({
        "type": "object",
        "properties": properties,
        "required": required,
        "additionalProperties": false
    })
}
