// SPDX-License-Identifier: PMPL-1.0-or-later
//! Query tree → UI tree.
//!
//! Index assignment follows the form's reference sequence: a group takes its
//! index before its subfilters, which are numbered in order. The seeded
//! default group is the exception: its rule is built first and so takes the
//! lower index.

use tracing::debug;

use crate::allocator::IndexAllocator;
use crate::config::ParseOptions;
use crate::error::{FilterError, Result};
use crate::filter::{FilterGroup, FilterNode, FilterRule};
use crate::operator::Operator;
use crate::query::QueryNode;

/// Parse a backend filter into an editable tree.
///
/// The input is checked completely before any index is drawn, so a rejected
/// filter leaves the allocator untouched.
pub fn parse(
    query: &QueryNode,
    alloc: &mut IndexAllocator,
    opts: &ParseOptions,
) -> Result<FilterNode> {
    if query.is_empty() {
        debug!("Empty filter, seeding default group");
        return Ok(default_group(alloc, opts.default_group_operator.clone()).into());
    }

    check(query, 1, opts.max_depth)?;

    let first = alloc.peek();
    let node = build(query, alloc);
    debug!(
        first_index = first,
        last_index = alloc.peek() - 1,
        depth = node.depth(),
        rules = node.rule_count(),
        "Parsed query filter"
    );
    Ok(node)
}

/// A rule with `EQUALS`, an empty field and an empty value.
pub fn default_rule(alloc: &mut IndexAllocator) -> FilterRule {
    FilterRule::default_with_index(alloc.next_index())
}

/// A group holding one default rule. The rule takes the lower index.
pub fn default_group(alloc: &mut IndexAllocator, operator: Operator) -> FilterGroup {
    let rule = default_rule(alloc);
    FilterGroup {
        operator,
        subfilters: vec![rule.into()],
        unique_index: alloc.next_index(),
    }
}

fn check(query: &QueryNode, depth: usize, max_depth: usize) -> Result<()> {
    if depth > max_depth {
        return Err(FilterError::TooDeep(max_depth));
    }
    match query {
        QueryNode::Group { operand, .. } => operand
            .iter()
            .try_for_each(|child| check(child, depth + 1, max_depth)),
        QueryNode::Rule { .. } => Ok(()),
        QueryNode::Empty {} => Err(FilterError::MalformedNode(
            "nested node has neither an operator nor an operand".to_string(),
        )),
    }
}

fn build(query: &QueryNode, alloc: &mut IndexAllocator) -> FilterNode {
    match query {
        QueryNode::Group { operator, operand } => {
            note_unknown(operator);
            let unique_index = alloc.next_index();
            let subfilters = if operand.is_empty() {
                vec![default_rule(alloc).into()]
            } else {
                operand.iter().map(|child| build(child, alloc)).collect()
            };
            FilterGroup {
                operator: operator.clone(),
                subfilters,
                unique_index,
            }
            .into()
        }
        QueryNode::Rule { operator, operand } => {
            note_unknown(operator);
            FilterRule {
                operator: operator.clone(),
                field: operand.target_name.clone(),
                value: operand.target_value.clone(),
                unique_index: alloc.next_index(),
            }
            .into()
        }
        // rejected by check()
        QueryNode::Empty {} => default_rule(alloc).into(),
    }
}

fn note_unknown(operator: &Operator) {
    if !operator.is_known() {
        debug!(%operator, "Passing through unrecognized operator");
    }
}
