// SPDX-License-Identifier: PMPL-1.0-or-later
//! Editable filter tree used by the filter builder form.
//!
//! Every node carries a `uniqueIndex` the form uses to track rows across
//! edits. The index is UI metadata only and never reaches the backend.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{FilterError, Result};
use crate::operator::Operator;
use crate::value::FilterValue;

/// A group combining subfilters with a logical operator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterGroup {
    pub operator: Operator,
    pub subfilters: Vec<FilterNode>,
    pub unique_index: u64,
}

/// A leaf comparing one field against one value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterRule {
    pub operator: Operator,
    /// Dot path into the resource schema, e.g. `glossary.startDate`.
    pub field: String,
    pub value: FilterValue,
    pub unique_index: u64,
}

impl FilterRule {
    /// `EQUALS` on an empty field with an empty value.
    pub fn default_with_index(unique_index: u64) -> Self {
        Self {
            operator: Operator::Equals,
            field: String::new(),
            value: FilterValue::default(),
            unique_index,
        }
    }
}

impl FilterGroup {
    /// Look up a descendant node.
    pub fn find(&self, index: u64) -> Option<&FilterNode> {
        self.subfilters.iter().find_map(|child| child.find(index))
    }

    /// This group or a nested group with the given index.
    pub fn find_group_mut(&mut self, index: u64) -> Option<&mut FilterGroup> {
        if self.unique_index == index {
            return Some(self);
        }
        self.subfilters.iter_mut().find_map(|child| match child {
            FilterNode::Group(g) => g.find_group_mut(index),
            FilterNode::Rule(_) => None,
        })
    }

    pub fn find_rule_mut(&mut self, index: u64) -> Option<&mut FilterRule> {
        self.subfilters.iter_mut().find_map(|child| match child {
            FilterNode::Group(g) => g.find_rule_mut(index),
            FilterNode::Rule(r) if r.unique_index == index => Some(r),
            FilterNode::Rule(_) => None,
        })
    }

    /// Group that directly contains `index`.
    pub fn parent_of(&self, index: u64) -> Option<&FilterGroup> {
        if self.subfilters.iter().any(|c| c.unique_index() == index) {
            return Some(self);
        }
        self.subfilters.iter().find_map(|child| match child {
            FilterNode::Group(g) => g.parent_of(index),
            FilterNode::Rule(_) => None,
        })
    }

    pub fn parent_of_mut(&mut self, index: u64) -> Option<&mut FilterGroup> {
        if self.subfilters.iter().any(|c| c.unique_index() == index) {
            return Some(self);
        }
        self.subfilters.iter_mut().find_map(|child| match child {
            FilterNode::Group(g) => g.parent_of_mut(index),
            FilterNode::Rule(_) => None,
        })
    }

    /// Level of a node below this group, which sits at level 1.
    pub fn level_of(&self, index: u64) -> Option<usize> {
        if self.unique_index == index {
            return Some(1);
        }
        self.subfilters.iter().find_map(|child| match child {
            FilterNode::Group(g) => g.level_of(index).map(|l| l + 1),
            FilterNode::Rule(r) if r.unique_index == index => Some(2),
            FilterNode::Rule(_) => None,
        })
    }

    /// All indices in pre-order, this group first.
    pub fn indices(&self) -> Vec<u64> {
        let mut out = Vec::new();
        self.collect_indices(&mut out);
        out
    }

    fn collect_indices(&self, out: &mut Vec<u64>) {
        out.push(self.unique_index);
        for child in &self.subfilters {
            match child {
                FilterNode::Group(g) => g.collect_indices(out),
                FilterNode::Rule(r) => out.push(r.unique_index),
            }
        }
    }

    pub fn depth(&self) -> usize {
        1 + self.subfilters.iter().map(FilterNode::depth).max().unwrap_or(0)
    }

    pub fn rule_count(&self) -> usize {
        self.subfilters.iter().map(FilterNode::rule_count).sum()
    }

    /// Fails on the first index that appears twice.
    pub fn check_indices(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for index in self.indices() {
            if !seen.insert(index) {
                return Err(FilterError::DuplicateIndex(index));
            }
        }
        Ok(())
    }
}

/// A node of the UI tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterNode {
    Group(FilterGroup),
    Rule(FilterRule),
}

impl FilterNode {
    pub fn unique_index(&self) -> u64 {
        match self {
            FilterNode::Group(g) => g.unique_index,
            FilterNode::Rule(r) => r.unique_index,
        }
    }

    pub fn operator(&self) -> &Operator {
        match self {
            FilterNode::Group(g) => &g.operator,
            FilterNode::Rule(r) => &r.operator,
        }
    }

    pub fn is_group(&self) -> bool {
        matches!(self, FilterNode::Group(_))
    }

    pub fn as_group(&self) -> Option<&FilterGroup> {
        match self {
            FilterNode::Group(g) => Some(g),
            FilterNode::Rule(_) => None,
        }
    }

    pub fn as_rule(&self) -> Option<&FilterRule> {
        match self {
            FilterNode::Rule(r) => Some(r),
            FilterNode::Group(_) => None,
        }
    }

    /// Look up a node anywhere in the tree.
    pub fn find(&self, index: u64) -> Option<&FilterNode> {
        if self.unique_index() == index {
            return Some(self);
        }
        match self {
            FilterNode::Group(g) => g.find(index),
            FilterNode::Rule(_) => None,
        }
    }

    pub fn find_mut(&mut self, index: u64) -> Option<&mut FilterNode> {
        if self.unique_index() == index {
            return Some(self);
        }
        match self {
            FilterNode::Group(g) => g
                .subfilters
                .iter_mut()
                .find_map(|child| child.find_mut(index)),
            FilterNode::Rule(_) => None,
        }
    }

    /// Group that directly contains `index`.
    pub fn parent_of(&self, index: u64) -> Option<&FilterGroup> {
        self.as_group()?.parent_of(index)
    }

    /// All indices in pre-order.
    pub fn indices(&self) -> Vec<u64> {
        match self {
            FilterNode::Group(g) => g.indices(),
            FilterNode::Rule(r) => vec![r.unique_index],
        }
    }

    /// Nesting depth; a lone rule has depth 1.
    pub fn depth(&self) -> usize {
        match self {
            FilterNode::Group(g) => g.depth(),
            FilterNode::Rule(_) => 1,
        }
    }

    pub fn rule_count(&self) -> usize {
        match self {
            FilterNode::Group(g) => g.rule_count(),
            FilterNode::Rule(_) => 1,
        }
    }

    pub fn check_indices(&self) -> Result<()> {
        match self {
            FilterNode::Group(g) => g.check_indices(),
            FilterNode::Rule(_) => Ok(()),
        }
    }
}

impl From<FilterGroup> for FilterNode {
    fn from(g: FilterGroup) -> Self {
        FilterNode::Group(g)
    }
}

impl From<FilterRule> for FilterNode {
    fn from(r: FilterRule) -> Self {
        FilterNode::Rule(r)
    }
}
