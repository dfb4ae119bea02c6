use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

// Dot-separated groups of exactly three digits are thousands ("1.000,50").
static AMOUNT_EXPRESSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<op>>=|<=|>|<|=)?\s*(?P<int>[0-9]{1,3}(?:\.[0-9]{3})+|[0-9]+)(?:[.,](?P<frac>[0-9]+))?(?:[^0-9.,]|$)",
    )
    .unwrap()
});

static CURRENCY_NOISE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)€|eur(?:os?)?|balles|\s").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ComparisonOperator {
    #[serde(rename = ">")]
    GreaterThan,
    #[serde(rename = ">=")]
    GreaterOrEqual,
    #[serde(rename = "<")]
    LessThan,
    #[serde(rename = "<=")]
    LessOrEqual,
    #[serde(rename = "=")]
    Equal,
}

impl ComparisonOperator {
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            ">" => Some(Self::GreaterThan),
            ">=" => Some(Self::GreaterOrEqual),
            "<" => Some(Self::LessThan),
            "<=" => Some(Self::LessOrEqual),
            "=" => Some(Self::Equal),
            _ => None,
        }
    }

    pub fn as_symbol(&self) -> &'static str {
        match self {
            Self::GreaterThan => ">",
            Self::GreaterOrEqual => ">=",
            Self::LessThan => "<",
            Self::LessOrEqual => "<=",
            Self::Equal => "=",
        }
    }

    /// Range keyword understood by the search backend; `None` for equality.
    pub fn range_keyword(&self) -> Option<&'static str> {
        match self {
            Self::GreaterThan => Some("gt"),
            Self::GreaterOrEqual => Some("gte"),
            Self::LessThan => Some("lt"),
            Self::LessOrEqual => Some("lte"),
            Self::Equal => None,
        }
    }
}

impl fmt::Display for ComparisonOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_symbol())
    }
}

/// Comparison extracted from an amount expression such as `">50€"`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct AmountFilter {
    pub operator: Option<ComparisonOperator>,
    pub value: Option<f64>,
}

impl AmountFilter {
    pub fn is_empty(&self) -> bool {
        self.value.is_none()
    }
}

/// Parses an amount expression using the leading-operator convention.
///
/// `"NULL"`, empty input, strings without a number and values too large to
/// represent yield an empty filter. A number without an operator is treated
/// as an equality.
pub fn parse_amount(raw: &str) -> AmountFilter {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("null") {
        return AmountFilter::default();
    }

    let compact = CURRENCY_NOISE.replace_all(trimmed, "");
    let Some(captures) = AMOUNT_EXPRESSION.captures(&compact) else {
        return AmountFilter::default();
    };

    let Some(integer) = captures.name("int") else {
        return AmountFilter::default();
    };
    let mut digits = integer.as_str().replace('.', "");
    if let Some(fraction) = captures.name("frac") {
        digits.push('.');
        digits.push_str(fraction.as_str());
    }

    let Some(value) = digits.parse::<f64>().ok().filter(|v| v.is_finite()) else {
        return AmountFilter::default();
    };

    let operator = captures
        .name("op")
        .and_then(|m| ComparisonOperator::from_symbol(m.as_str()))
        .unwrap_or(ComparisonOperator::Equal);

    AmountFilter {
        operator: Some(operator),
        value: Some(value),
    }
}
