// SPDX-License-Identifier: PMPL-1.0-or-later
//! Option catalogue behind the filter builder's dropdowns.
//!
//! Labels are i18n keys; the console resolves them.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::operator::Operator;

/// "All" / "Any" selector on a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GroupMode {
    All,
    Any,
}

impl GroupMode {
    pub fn operator(self) -> Operator {
        match self {
            GroupMode::All => Operator::And,
            GroupMode::Any => Operator::Or,
        }
    }

    /// `None` for anything but `AND`/`OR`.
    pub fn from_operator(operator: &Operator) -> Option<Self> {
        match operator {
            Operator::And => Some(GroupMode::All),
            Operator::Or => Some(GroupMode::Any),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            GroupMode::All => "All",
            GroupMode::Any => "Any",
        }
    }
}

impl fmt::Display for GroupMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Schema type of the field a rule targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldType {
    String,
    Number,
    Int,
    Boolean,
    ManagedObject,
}

/// One entry of the condition dropdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConditionOption {
    pub key: &'static str,
    pub label: &'static str,
    pub operator: Operator,
    pub field_types: &'static [FieldType],
}

impl ConditionOption {
    pub fn applies_to(&self, field_type: FieldType) -> bool {
        self.field_types.contains(&field_type)
    }
}

const STRING: &[FieldType] = &[FieldType::String];
const NUMERIC: &[FieldType] = &[FieldType::Number, FieldType::Int];
const SCALAR: &[FieldType] = &[
    FieldType::String,
    FieldType::Number,
    FieldType::Int,
    FieldType::Boolean,
];
const MANAGED: &[FieldType] = &[FieldType::ManagedObject];

/// Every condition in dropdown order.
pub fn catalogue() -> Vec<ConditionOption> {
    vec![
        option("Contains", "filters.contains", Operator::Contains, STRING),
        option("Is", "filters.is", Operator::Equals, SCALAR),
        option("Exists", "filters.exists", Operator::Exists, MANAGED),
        option("Include", "filters.include", Operator::Equals, MANAGED),
        option("DontInclude", "filters.dontInclude", Operator::NotEquals, MANAGED),
        option("StartsWith", "filters.startsWith", Operator::StartsWith, STRING),
        option("EndsWith", "filters.endsWith", Operator::EndsWith, STRING),
        option("Gte", "filters.greaterThanEqual", Operator::Gte, NUMERIC),
        option("Gt", "filters.greaterThan", Operator::Gt, NUMERIC),
        option("Lte", "filters.lessThanEqual", Operator::Lte, NUMERIC),
        option("Lt", "filters.lessThan", Operator::Lt, NUMERIC),
    ]
}

fn option(
    key: &'static str,
    label: &'static str,
    operator: Operator,
    field_types: &'static [FieldType],
) -> ConditionOption {
    ConditionOption {
        key,
        label,
        operator,
        field_types,
    }
}

/// Conditions offered for a field of the given type.
pub fn conditions_for(field_type: FieldType) -> Vec<ConditionOption> {
    catalogue()
        .into_iter()
        .filter(|c| c.applies_to(field_type))
        .collect()
}
