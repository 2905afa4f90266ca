use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use super::super::attributes::{Attribute, AttributeKind, AttributeValue};
use super::super::domain::Hotel;
use super::super::weights::ScoreType;

/// One `{field, operator, value}` expression as entered in the admin back office.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BadgeCriterion {
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub field: String,
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub operator: String,
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub value: String,
}

impl BadgeCriterion {
    pub fn new(
        field: impl Into<String>,
        operator: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            operator: operator.into(),
            value: value.into(),
        }
    }
}

/// Accept `"4"`, `4`, `true`, or `null` for criterion parts; forms post numbers unquoted.
fn scalar_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    match value {
        None | Some(serde_json::Value::Null) => Ok(String::new()),
        Some(serde_json::Value::String(text)) => Ok(text),
        Some(serde_json::Value::Number(number)) => Ok(number.to_string()),
        Some(serde_json::Value::Bool(flag)) => Ok(flag.to_string()),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected a scalar, found {other}"
        ))),
    }
}

/// Compact text form used by the CLI, e.g. `cleanliness_rating>=4`.
impl FromStr for BadgeCriterion {
    type Err = BadgeRuleError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let is_operator_char = |c: char| matches!(c, '<' | '>' | '=' | '!');
        let start = raw
            .find(is_operator_char)
            .ok_or(BadgeRuleError::MissingOperator { index: 0 })?;
        let rest = &raw[start..];
        let end = rest
            .find(|c: char| !is_operator_char(c))
            .unwrap_or(rest.len());

        Ok(Self::new(
            raw[..start].trim(),
            &rest[..end],
            rest[end..].trim(),
        ))
    }
}

impl fmt::Display for BadgeCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.field, self.operator, self.value)
    }
}

/// Comparison operators accepted in badge criteria.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    #[serde(rename = ">")]
    GreaterThan,
    #[serde(rename = ">=")]
    GreaterOrEqual,
    #[serde(rename = "<")]
    LessThan,
    #[serde(rename = "<=")]
    LessOrEqual,
    #[serde(rename = "==")]
    Equal,
    #[serde(rename = "!=")]
    NotEqual,
}

impl Operator {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            ">" => Some(Self::GreaterThan),
            ">=" => Some(Self::GreaterOrEqual),
            "<" => Some(Self::LessThan),
            "<=" => Some(Self::LessOrEqual),
            "==" | "=" => Some(Self::Equal),
            "!=" => Some(Self::NotEqual),
            _ => None,
        }
    }

    pub const fn symbol(self) -> &'static str {
        match self {
            Operator::GreaterThan => ">",
            Operator::GreaterOrEqual => ">=",
            Operator::LessThan => "<",
            Operator::LessOrEqual => "<=",
            Operator::Equal => "==",
            Operator::NotEqual => "!=",
        }
    }

    fn compare_numbers(self, left: f64, right: f64) -> bool {
        match self {
            Operator::GreaterThan => left > right,
            Operator::GreaterOrEqual => left >= right,
            Operator::LessThan => left < right,
            Operator::LessOrEqual => left <= right,
            Operator::Equal => left == right,
            Operator::NotEqual => left != right,
        }
    }

    fn compare_text(self, left: &str, right: &str) -> bool {
        match self {
            Operator::Equal => left.eq_ignore_ascii_case(right),
            Operator::NotEqual => !left.eq_ignore_ascii_case(right),
            _ => false,
        }
    }
}

/// What a badge criterion reads from a hotel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeField {
    Attribute(Attribute),
    Score(ScoreType),
}

impl BadgeField {
    pub fn parse(raw: &str) -> Option<Self> {
        if let Some(attribute) = Attribute::from_name(raw) {
            return Some(Self::Attribute(attribute));
        }

        let prefix = raw.trim().strip_suffix("_score")?;
        ScoreType::ALL
            .into_iter()
            .find(|score_type| score_type.label().eq_ignore_ascii_case(prefix))
            .map(Self::Score)
    }

    /// Flag and level values spelled the way hotel data is stored (`yes` → `true`,
    /// `silent` → `none`). Other fields compare as entered.
    fn canonical(self, raw: &str) -> Option<AttributeValue> {
        let BadgeField::Attribute(attribute) = self else {
            return None;
        };
        match attribute.kind() {
            AttributeKind::Flag | AttributeKind::Level => attribute.parse_value(raw),
            _ => None,
        }
    }

    /// Numeric and textual views of the hotel's value, `None` when missing.
    fn read(self, hotel: &Hotel) -> Option<(Option<f64>, String)> {
        match self {
            BadgeField::Attribute(attribute) => {
                let value = attribute.read(hotel.pool.as_ref()?)?;
                Some((value.as_number(), value.to_string()))
            }
            BadgeField::Score(score_type) => {
                let score = hotel.scores.get(score_type)?;
                Some((Some(score), score.to_string()))
            }
        }
    }
}

/// Validation failures for badge criteria. `index` is the position in the submitted list.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BadgeRuleError {
    #[error("criterion {index} is missing a field")]
    MissingField { index: usize },
    #[error("criterion {index} is missing an operator")]
    MissingOperator { index: usize },
    #[error("criterion {index} is missing a value")]
    MissingValue { index: usize },
    #[error("criterion {index} references unknown field '{field}'")]
    UnknownField { index: usize, field: String },
    #[error("criterion {index} uses unsupported operator '{operator}'")]
    UnknownOperator { index: usize, operator: String },
}

/// A validated criterion ready for evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct BadgeRule {
    pub field: BadgeField,
    pub operator: Operator,
    pub value: String,
    numeric: Option<f64>,
}

impl BadgeRule {
    pub fn compile(index: usize, criterion: &BadgeCriterion) -> Result<Self, BadgeRuleError> {
        let field_name = criterion.field.trim();
        let operator_symbol = criterion.operator.trim();
        let value = criterion.value.trim();

        if field_name.is_empty() {
            return Err(BadgeRuleError::MissingField { index });
        }
        if operator_symbol.is_empty() {
            return Err(BadgeRuleError::MissingOperator { index });
        }
        if value.is_empty() {
            return Err(BadgeRuleError::MissingValue { index });
        }

        let field = BadgeField::parse(field_name).ok_or_else(|| BadgeRuleError::UnknownField {
            index,
            field: field_name.to_string(),
        })?;
        let operator =
            Operator::parse(operator_symbol).ok_or_else(|| BadgeRuleError::UnknownOperator {
                index,
                operator: operator_symbol.to_string(),
            })?;

        let (value, numeric) = match field.canonical(value) {
            Some(canonical) => (canonical.to_string(), canonical.as_number()),
            None => (value.to_string(), parse_number(value)),
        };

        Ok(Self {
            field,
            operator,
            value,
            numeric,
        })
    }

    /// Missing hotel values never satisfy a rule.
    pub fn matches(&self, hotel: &Hotel) -> bool {
        let Some((number, text)) = self.field.read(hotel) else {
            return false;
        };

        match (number, self.numeric) {
            (Some(left), Some(right)) => self.operator.compare_numbers(left, right),
            _ => self.operator.compare_text(&text, &self.value),
        }
    }
}

fn parse_number(raw: &str) -> Option<f64> {
    raw.parse::<f64>().ok().filter(|value| value.is_finite())
}
