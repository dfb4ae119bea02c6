use std::sync::LazyLock;

use regex::Regex;

const MAX_VISIBLE_CHARS: usize = 100;

static SECRET_ASSIGNMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\b(api_key|password|secret|token)=[^\s&"']+"#).unwrap()
});

static BEARER_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bbearer\s+[A-Za-z0-9._~+/=-]+").unwrap());

static IBAN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Z]{2}[0-9]{2}(?:\s?[A-Z0-9]{4}){3,7}(?:\s?[A-Z0-9]{1,3})?\b").unwrap()
});

static CARD_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:[0-9][ -]?){12,18}[0-9]\b").unwrap());

/// Makes user text safe to log: truncated, with credentials and account numbers masked.
pub fn sanitize_prompt(prompt: &str) -> String {
    let trimmed = prompt.trim();

    if trimmed.is_empty() {
        return String::from("[EMPTY]");
    }

    let redacted = redact_sensitive_patterns(trimmed);
    let total_chars = redacted.chars().count();

    if total_chars > MAX_VISIBLE_CHARS {
        let visible: String = redacted.chars().take(MAX_VISIBLE_CHARS).collect();
        format!("{}... ({} chars total)", visible, total_chars)
    } else {
        redacted
    }
}

fn redact_sensitive_patterns(text: &str) -> String {
    let text = BEARER_TOKEN.replace_all(text, "Bearer [REDACTED]");
    let text = SECRET_ASSIGNMENT.replace_all(&text, "$1=[REDACTED]");
    let text = IBAN.replace_all(&text, "[IBAN]");
    CARD_NUMBER.replace_all(&text, "[CARD]").into_owned()
}
