// SPDX-License-Identifier: PMPL-1.0-or-later
//! Filter builder configuration.
//!
//! Defaults match the certification filter form:
//! - indices start at 1
//! - new groups combine their subfilters with `OR` ("Any")
//! - trees deeper than 16 levels are rejected

use serde::{Deserialize, Serialize};

use crate::operator::Operator;

/// Configuration for a [`FilterBuilder`](crate::FilterBuilder) session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterBuilderConfig {
    /// First `uniqueIndex` handed out by the session allocator.
    pub index_seed: u64,
    /// Operator of seeded groups (empty filter, `add_group`).
    pub default_group_operator: Operator,
    /// Maximum nesting depth accepted from the backend or built by editing.
    pub max_depth: usize,
    /// Log validation issues on every emitted update.
    pub validate_on_emit: bool,
}

impl FilterBuilderConfig {
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            default_group_operator: self.default_group_operator.clone(),
            max_depth: self.max_depth,
        }
    }
}

impl Default for FilterBuilderConfig {
    fn default() -> Self {
        Self {
            index_seed: 1,
            default_group_operator: Operator::Or,
            max_depth: 16,
            validate_on_emit: false,
        }
    }
}

/// Knobs consulted by [`parse`](crate::parse::parse).
#[derive(Debug, Clone, PartialEq)]
pub struct ParseOptions {
    pub default_group_operator: Operator,
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        FilterBuilderConfig::default().parse_options()
    }
}
