// SPDX-License-Identifier: PMPL-1.0-or-later
//! Govfilter Tree
//!
//! Filter tree transformer behind the certification filter builder of the
//! governance console. Converts the backend query tree into the editable
//! UI tree and back, numbers UI nodes with a per-session allocator, and
//! runs the builder's editing operations.

pub mod allocator;
pub mod builder;
pub mod conditions;
pub mod config;
pub mod error;
pub mod filter;
pub mod operator;
pub mod parse;
pub mod query;
pub mod serialize;
pub mod validate;
pub mod value;

pub use allocator::IndexAllocator;
pub use builder::{FilterBuilder, FilterObserver, RuleUpdate};
pub use conditions::{conditions_for, ConditionOption, FieldType, GroupMode};
pub use config::{FilterBuilderConfig, ParseOptions};
pub use error::{FilterError, Result};
pub use filter::{FilterGroup, FilterNode, FilterRule};
pub use operator::Operator;
pub use parse::parse;
pub use query::{QueryNode, Target};
pub use serialize::{serialize, to_query_json};
pub use validate::{validate, IssueKind, ValidationIssue};
pub use value::FilterValue;
