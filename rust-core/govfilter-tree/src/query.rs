// SPDX-License-Identifier: PMPL-1.0-or-later
//! Backend query tree.
//!
//! This is the shape the governance query API accepts as its filter
//! parameter:
//!
//! ```json
//! { "operator": "OR", "operand": [
//!     { "operator": "EQUALS", "operand": { "targetName": "name", "targetValue": "test" } }
//! ] }
//! ```
//!
//! Groups carry a list operand, rules carry a target object. The bare `{}`
//! object stands for "no filter" and is only meaningful as the whole filter.
//!
//! Partially specified nodes are filled in rather than rejected: a missing
//! `targetName` or `targetValue` reads as blank, and an operand without an
//! operator gets `EQUALS` (target) or `OR` (list). A node whose operand is
//! neither a list nor an object is [`FilterError::MalformedNode`].

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::{FilterError, Result};
use crate::operator::Operator;
use crate::value::FilterValue;

/// The field/value pair of a rule on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Target {
    #[serde(default)]
    pub target_name: String,
    #[serde(default, deserialize_with = "blank_if_null")]
    pub target_value: FilterValue,
}

fn blank_if_null<'de, D>(deserializer: D) -> std::result::Result<FilterValue, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<FilterValue>::deserialize(deserializer)?.unwrap_or_default())
}

impl Target {
    pub fn new(target_name: impl Into<String>, target_value: impl Into<FilterValue>) -> Self {
        Self {
            target_name: target_name.into(),
            target_value: target_value.into(),
        }
    }
}

/// A node of the backend query tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum QueryNode {
    /// `{operator, operand: [...]}`
    Group {
        operator: Operator,
        operand: Vec<QueryNode>,
    },
    /// `{operator, operand: {targetName, targetValue}}`
    Rule { operator: Operator, operand: Target },
    /// `{}`
    Empty {},
}

impl QueryNode {
    pub fn group(operator: impl Into<Operator>, operand: Vec<QueryNode>) -> Self {
        QueryNode::Group {
            operator: operator.into(),
            operand,
        }
    }

    pub fn rule(
        operator: impl Into<Operator>,
        target_name: impl Into<String>,
        target_value: impl Into<FilterValue>,
    ) -> Self {
        QueryNode::Rule {
            operator: operator.into(),
            operand: Target::new(target_name, target_value),
        }
    }

    pub fn empty() -> Self {
        QueryNode::Empty {}
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, QueryNode::Empty {})
    }

    pub fn operator(&self) -> Option<&Operator> {
        match self {
            QueryNode::Group { operator, .. } | QueryNode::Rule { operator, .. } => Some(operator),
            QueryNode::Empty {} => None,
        }
    }

    /// Nesting depth; a lone rule has depth 1, `{}` has depth 0.
    pub fn depth(&self) -> usize {
        match self {
            QueryNode::Group { operand, .. } => {
                1 + operand.iter().map(QueryNode::depth).max().unwrap_or(0)
            }
            QueryNode::Rule { .. } => 1,
            QueryNode::Empty {} => 0,
        }
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(s)?;
        Self::from_json(value)
    }

    pub fn from_json(value: Value) -> Result<Self> {
        if !value.is_object() {
            return Err(FilterError::MalformedNode(format!(
                "filter node must be an object, got {}",
                value
            )));
        }
        let raw: RawQueryNode = serde_json::from_value(value)?;
        QueryNode::try_from(raw)
    }

    pub fn to_json(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl Default for QueryNode {
    fn default() -> Self {
        QueryNode::empty()
    }
}

/// Wire shape before the operand has been classified.
#[derive(Deserialize)]
struct RawQueryNode {
    #[serde(default)]
    operator: Option<Operator>,
    #[serde(default)]
    operand: Option<Value>,
}

impl TryFrom<RawQueryNode> for QueryNode {
    type Error = FilterError;

    fn try_from(raw: RawQueryNode) -> Result<Self> {
        match (raw.operator, raw.operand) {
            (None, None) => Ok(QueryNode::Empty {}),
            (operator, Some(Value::Array(items))) => {
                let operator = operator.unwrap_or_else(|| {
                    debug!("List operand without an operator, using OR");
                    Operator::Or
                });
                let operand = items
                    .into_iter()
                    .map(QueryNode::from_json)
                    .collect::<Result<Vec<QueryNode>>>()?;
                Ok(QueryNode::Group { operator, operand })
            }
            (operator, Some(obj @ Value::Object(_))) => {
                let operator = operator.unwrap_or_else(|| {
                    debug!("Target operand without an operator, using EQUALS");
                    Operator::Equals
                });
                let operand: Target = serde_json::from_value(obj)?;
                Ok(QueryNode::Rule { operator, operand })
            }
            (Some(operator), Some(other)) => Err(FilterError::MalformedNode(format!(
                "operand of {} must be a list or a target object, got {}",
                operator, other
            ))),
            (None, Some(other)) => Err(FilterError::MalformedNode(format!(
                "operand must be a list or a target object, got {}",
                other
            ))),
            (Some(operator), None) => Err(FilterError::MalformedNode(format!(
                "operator {} has no operand",
                operator
            ))),
        }
    }
}

impl<'de> Deserialize<'de> for QueryNode {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = RawQueryNode::deserialize(deserializer)?;
        QueryNode::try_from(raw).map_err(de::Error::custom)
    }
}
