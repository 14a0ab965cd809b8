// SPDX-License-Identifier: PMPL-1.0-or-later
//! Filter operators.
//!
//! Groups and rules share one operator vocabulary on the wire, so a single
//! type covers both. Strings the console does not recognize are kept as
//! [`Operator::Other`] and written back unchanged.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::value::FilterValue;

/// A group (logical) or rule (comparison) operator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Operator {
    And,
    Or,
    Equals,
    NotEquals,
    /// `NOT_EQUALS`, the underscore spelling of [`Operator::NotEquals`].
    /// Compares the same way but is written back as it arrived.
    NotEqualsUnderscore,
    Contains,
    StartsWith,
    EndsWith,
    Gte,
    Gt,
    Lte,
    Lt,
    Exists,
    /// Operator string not known to this build.
    Other(String),
}

impl Operator {
    /// Every known operator, logical ones first.
    pub const KNOWN: [Operator; 13] = [
        Operator::And,
        Operator::Or,
        Operator::Equals,
        Operator::NotEquals,
        Operator::NotEqualsUnderscore,
        Operator::Contains,
        Operator::StartsWith,
        Operator::EndsWith,
        Operator::Gte,
        Operator::Gt,
        Operator::Lte,
        Operator::Lt,
        Operator::Exists,
    ];

    /// Wire spelling of the operator.
    pub fn as_str(&self) -> &str {
        match self {
            Operator::And => "AND",
            Operator::Or => "OR",
            Operator::Equals => "EQUALS",
            Operator::NotEquals => "NOT EQUALS",
            Operator::NotEqualsUnderscore => "NOT_EQUALS",
            Operator::Contains => "CONTAINS",
            Operator::StartsWith => "STARTS_WITH",
            Operator::EndsWith => "ENDS_WITH",
            Operator::Gte => "GTE",
            Operator::Gt => "GT",
            Operator::Lte => "LTE",
            Operator::Lt => "LT",
            Operator::Exists => "EXISTS",
            Operator::Other(s) => s,
        }
    }

    /// `AND` or `OR`.
    pub fn is_logical(&self) -> bool {
        matches!(self, Operator::And | Operator::Or)
    }

    /// A known rule operator.
    pub fn is_comparison(&self) -> bool {
        self.is_known() && !self.is_logical()
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Operator::Other(_))
    }

    /// The operator with alternate spellings folded together.
    pub fn canonical(&self) -> Operator {
        match self {
            Operator::NotEqualsUnderscore => Operator::NotEquals,
            other => other.clone(),
        }
    }

    /// Ordering comparisons accept numbers and date-like strings only.
    pub fn is_ordering(&self) -> bool {
        matches!(
            self,
            Operator::Gte | Operator::Gt | Operator::Lte | Operator::Lt
        )
    }

    /// Whether `value` is permissible for a rule using this operator.
    ///
    /// Unknown operators admit anything; the backend owns their semantics.
    pub fn admits(&self, value: &FilterValue) -> bool {
        match self {
            Operator::Gte | Operator::Gt | Operator::Lte | Operator::Lt => {
                value.is_number() || value.is_numeric_string() || value.is_date_like()
            }
            Operator::Contains | Operator::StartsWith | Operator::EndsWith => value.is_string(),
            Operator::And | Operator::Or => false,
            Operator::Equals
            | Operator::NotEquals
            | Operator::NotEqualsUnderscore
            | Operator::Exists
            | Operator::Other(_) => true,
        }
    }
}

impl From<&str> for Operator {
    fn from(s: &str) -> Self {
        match s {
            "AND" => Operator::And,
            "OR" => Operator::Or,
            "EQUALS" => Operator::Equals,
            "NOT EQUALS" => Operator::NotEquals,
            "NOT_EQUALS" => Operator::NotEqualsUnderscore,
            "CONTAINS" => Operator::Contains,
            "STARTS_WITH" => Operator::StartsWith,
            "ENDS_WITH" => Operator::EndsWith,
            "GTE" => Operator::Gte,
            "GT" => Operator::Gt,
            "LTE" => Operator::Lte,
            "LT" => Operator::Lt,
            "EXISTS" => Operator::Exists,
            other => Operator::Other(other.to_string()),
        }
    }
}

impl From<String> for Operator {
    fn from(s: String) -> Self {
        match Operator::from(s.as_str()) {
            Operator::Other(_) => Operator::Other(s),
            known => known,
        }
    }
}

impl From<Operator> for String {
    fn from(op: Operator) -> Self {
        match op {
            Operator::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
