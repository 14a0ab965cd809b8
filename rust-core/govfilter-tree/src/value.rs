// SPDX-License-Identifier: PMPL-1.0-or-later
//! Rule values.

use std::fmt;

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::Number;

/// The value side of a rule: string, number or boolean.
///
/// Numbers are kept as [`serde_json::Number`] so a value read from the wire
/// is written back with the same representation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Bool(bool),
    Number(Number),
    String(String),
}

impl FilterValue {
    pub fn is_string(&self) -> bool {
        matches!(self, FilterValue::String(_))
    }

    pub fn is_number(&self) -> bool {
        matches!(self, FilterValue::Number(_))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FilterValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Empty string, the value of a freshly added rule.
    pub fn is_blank(&self) -> bool {
        matches!(self, FilterValue::String(s) if s.trim().is_empty())
    }

    /// A string that parses as a finite number.
    pub fn is_numeric_string(&self) -> bool {
        self.as_str()
            .and_then(|s| s.trim().parse::<f64>().ok())
            .is_some_and(f64::is_finite)
    }

    /// A `YYYY-MM-DD` date or an RFC 3339 timestamp.
    pub fn is_date_like(&self) -> bool {
        match self.as_str() {
            Some(s) => {
                let s = s.trim();
                NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok()
                    || DateTime::parse_from_rfc3339(s).is_ok()
            }
            None => false,
        }
    }
}

impl Default for FilterValue {
    fn default() -> Self {
        FilterValue::String(String::new())
    }
}

impl From<&str> for FilterValue {
    fn from(s: &str) -> Self {
        FilterValue::String(s.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(s: String) -> Self {
        FilterValue::String(s)
    }
}

impl From<bool> for FilterValue {
    fn from(b: bool) -> Self {
        FilterValue::Bool(b)
    }
}

impl From<i64> for FilterValue {
    fn from(n: i64) -> Self {
        FilterValue::Number(n.into())
    }
}

impl From<u64> for FilterValue {
    fn from(n: u64) -> Self {
        FilterValue::Number(n.into())
    }
}

impl From<i32> for FilterValue {
    fn from(n: i32) -> Self {
        FilterValue::Number(n.into())
    }
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterValue::Bool(b) => write!(f, "{}", b),
            FilterValue::Number(n) => write!(f, "{}", n),
            FilterValue::String(s) => write!(f, "\"{}\"", s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_untagged_deserialize() {
        let v: FilterValue = serde_json::from_str("true").unwrap();
        assert_eq!(v, FilterValue::Bool(true));
        let v: FilterValue = serde_json::from_str("12").unwrap();
        assert_eq!(v, FilterValue::from(12));
        let v: FilterValue = serde_json::from_str("\"False\"").unwrap();
        assert_eq!(v, FilterValue::from("False"));
    }

    #[test]
    fn test_float_keeps_representation() {
        let v: FilterValue = serde_json::from_str("2.5").unwrap();
        assert_eq!(serde_json::to_string(&v).unwrap(), "2.5");
    }

    #[test]
    fn test_date_like() {
        assert!(FilterValue::from("2023-03-07").is_date_like());
        assert!(FilterValue::from("2023-03-07T10:00:00Z").is_date_like());
        assert!(!FilterValue::from("2023-13-07").is_date_like());
        assert!(!FilterValue::from("yesterday").is_date_like());
        assert!(!FilterValue::from(20230307).is_date_like());
    }

    #[test]
    fn test_numeric_string() {
        assert!(FilterValue::from("10").is_numeric_string());
        assert!(FilterValue::from(" -3.25 ").is_numeric_string());
        assert!(!FilterValue::from("NaN").is_numeric_string());
        assert!(!FilterValue::from("ten").is_numeric_string());
        assert!(!FilterValue::from(10).is_numeric_string());
    }

    #[test]
    fn test_default_is_blank() {
        assert!(FilterValue::default().is_blank());
        assert!(!FilterValue::from(0).is_blank());
    }
}
