// SPDX-License-Identifier: PMPL-1.0-or-later
//! Filter tree error types.

use thiserror::Error;

/// Errors raised by the filter tree transformer and the editing session.
///
/// None of these are expected in normal operation. They signal either a
/// malformed incoming filter or an editing call that refers to a node the
/// tree does not contain.
#[derive(Error, Debug)]
pub enum FilterError {
    #[error("malformed filter node: {0}")]
    MalformedNode(String),

    #[error("duplicate unique index {0} in filter tree")]
    DuplicateIndex(u64),

    #[error("no filter node with unique index {0}")]
    UnknownIndex(u64),

    #[error("filter node {0} is not a group")]
    NotAGroup(u64),

    #[error("filter node {0} is not a rule")]
    NotARule(u64),

    #[error("filter node {child} is not a direct child of group {parent}")]
    NotAChild { parent: u64, child: u64 },

    #[error("no subfilters selected")]
    EmptySelection,

    #[error("the root group cannot be removed or un-nested")]
    RootRemoval,

    #[error("operator {operator} cannot be used here, expected a {expected} operator")]
    OperatorKind {
        operator: String,
        expected: &'static str,
    },

    #[error("filter tree exceeds maximum depth of {0}")]
    TooDeep(usize),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Crate-level result alias using [`FilterError`].
pub type Result<T> = std::result::Result<T, FilterError>;
