// SPDX-License-Identifier: PMPL-1.0-or-later
//! UI tree → query tree.

use serde_json::Value;

use crate::error::Result;
use crate::filter::{FilterGroup, FilterNode};
use crate::query::{QueryNode, Target};

/// Serialize an editable tree into the backend shape, dropping indices.
pub fn serialize(node: &FilterNode) -> QueryNode {
    match node {
        FilterNode::Group(g) => serialize_group(g),
        FilterNode::Rule(r) => QueryNode::Rule {
            operator: r.operator.clone(),
            operand: Target {
                target_name: r.field.clone(),
                target_value: r.value.clone(),
            },
        },
    }
}

pub fn serialize_group(group: &FilterGroup) -> QueryNode {
    QueryNode::Group {
        operator: group.operator.clone(),
        operand: group.subfilters.iter().map(serialize).collect(),
    }
}

/// [`serialize`] straight to JSON.
pub fn to_query_json(node: &FilterNode) -> Result<Value> {
    serialize(node).to_json()
}
