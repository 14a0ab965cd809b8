// SPDX-License-Identifier: PMPL-1.0-or-later
//! Value-type checks over a UI tree.
//!
//! Validation is advisory. It never blocks an edit because the form passes
//! through invalid intermediate states while the user is typing.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::filter::{FilterGroup, FilterNode, FilterRule};
use crate::operator::Operator;

/// Why a node was flagged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// Rule has no field selected.
    MissingField,
    /// Value type not admitted by the rule operator.
    ValueType,
    /// Group uses a comparison operator.
    GroupOperator,
    /// Rule uses a logical operator.
    RuleOperator,
}

/// One problem found in the tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub unique_index: u64,
    pub operator: Operator,
    pub field: Option<String>,
    pub kind: IssueKind,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let what = match self.kind {
            IssueKind::MissingField => "no field selected",
            IssueKind::ValueType => "value not permitted for operator",
            IssueKind::GroupOperator => "group operator must be AND or OR",
            IssueKind::RuleOperator => "rule operator cannot be AND or OR",
        };
        match &self.field {
            Some(field) if !field.is_empty() => {
                write!(f, "#{} {} {}: {}", self.unique_index, field, self.operator, what)
            }
            _ => write!(f, "#{} {}: {}", self.unique_index, self.operator, what),
        }
    }
}

/// Collect every issue in pre-order.
pub fn validate(node: &FilterNode) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    visit(node, &mut issues);
    issues
}

pub fn validate_group(group: &FilterGroup) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    visit_group(group, &mut issues);
    issues
}

fn visit(node: &FilterNode, issues: &mut Vec<ValidationIssue>) {
    match node {
        FilterNode::Group(g) => visit_group(g, issues),
        FilterNode::Rule(r) => visit_rule(r, issues),
    }
}

fn visit_group(group: &FilterGroup, issues: &mut Vec<ValidationIssue>) {
    if group.operator.is_known() && !group.operator.is_logical() {
        issues.push(ValidationIssue {
            unique_index: group.unique_index,
            operator: group.operator.clone(),
            field: None,
            kind: IssueKind::GroupOperator,
        });
    }
    for child in &group.subfilters {
        visit(child, issues);
    }
}

fn visit_rule(rule: &FilterRule, issues: &mut Vec<ValidationIssue>) {
    let kind = if rule.operator.is_logical() {
        IssueKind::RuleOperator
    } else if rule.field.trim().is_empty() {
        IssueKind::MissingField
    } else if !rule.operator.admits(&rule.value) {
        IssueKind::ValueType
    } else {
        return;
    };
    issues.push(ValidationIssue {
        unique_index: rule.unique_index,
        operator: rule.operator.clone(),
        field: Some(rule.field.clone()),
        kind,
    });
}
