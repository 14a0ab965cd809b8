// SPDX-License-Identifier: PMPL-1.0-or-later
//! Filter builder editing session.
//!
//! A [`FilterBuilder`] owns one editable tree and the allocator that
//! numbers it. It is created when the filter form mounts and dropped when
//! the form goes away. Every successful mutation serializes the tree and
//! hands the result to the registered observers before returning.
//!
//! Removal semantics:
//! - a nested group left without subfilters is removed as well, cascading
//!   upward
//! - the root group left without subfilters is re-seeded with one default
//!   rule
//! - a group left with a single subfilter is kept as is

use std::fmt;

use serde_json::Value;
use tracing::{debug, warn};

use crate::allocator::IndexAllocator;
use crate::config::FilterBuilderConfig;
use crate::error::{FilterError, Result};
use crate::filter::{FilterGroup, FilterNode};
use crate::operator::Operator;
use crate::parse::{default_group, default_rule, parse};
use crate::query::QueryNode;
use crate::serialize::serialize_group;
use crate::validate::{validate_group, ValidationIssue};
use crate::value::FilterValue;

/// Receives the `filter-update` payload after every edit.
pub trait FilterObserver {
    fn filter_updated(&mut self, query: &QueryNode);
}

impl<F> FilterObserver for F
where
    F: FnMut(&QueryNode),
{
    fn filter_updated(&mut self, query: &QueryNode) {
        self(query)
    }
}

/// Partial update of a rule. `None` leaves the attribute unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleUpdate {
    pub field: Option<String>,
    pub operator: Option<Operator>,
    pub value: Option<FilterValue>,
}

impl RuleUpdate {
    pub fn field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    pub fn operator(mut self, operator: impl Into<Operator>) -> Self {
        self.operator = Some(operator.into());
        self
    }

    pub fn value(mut self, value: impl Into<FilterValue>) -> Self {
        self.value = Some(value.into());
        self
    }
}

/// One filter builder instance.
pub struct FilterBuilder {
    root: FilterGroup,
    alloc: IndexAllocator,
    resource_name: String,
    config: FilterBuilderConfig,
    observers: Vec<Box<dyn FilterObserver>>,
}

impl FilterBuilder {
    /// Build the editable tree from the incoming filter.
    ///
    /// `{}` yields a group holding one default rule. A lone rule is wrapped
    /// in a group using the configured default operator so there is always
    /// a group to add to.
    pub fn new(
        filter: &QueryNode,
        resource_name: impl Into<String>,
        config: FilterBuilderConfig,
    ) -> Result<Self> {
        let mut alloc = IndexAllocator::with_seed(config.index_seed);
        let root = Self::materialize(filter, &mut alloc, &config)?;
        let resource_name = resource_name.into();
        debug!(
            resource = %resource_name,
            root = root.unique_index,
            rules = root.rule_count(),
            "Filter builder created"
        );
        Ok(Self {
            root,
            alloc,
            resource_name,
            config,
            observers: Vec::new(),
        })
    }

    /// [`new`](Self::new) from the wire JSON of the filter.
    pub fn from_json(
        filter: &str,
        resource_name: impl Into<String>,
        config: FilterBuilderConfig,
    ) -> Result<Self> {
        let query = QueryNode::from_json_str(filter)?;
        Self::new(&query, resource_name, config)
    }

    fn materialize(
        filter: &QueryNode,
        alloc: &mut IndexAllocator,
        config: &FilterBuilderConfig,
    ) -> Result<FilterGroup> {
        let root = match parse(filter, alloc, &config.parse_options())? {
            FilterNode::Group(g) => g,
            rule @ FilterNode::Rule(_) => FilterGroup {
                operator: config.default_group_operator.clone(),
                subfilters: vec![rule],
                unique_index: alloc.next_index(),
            },
        };
        root.check_indices()?;
        Ok(root)
    }

    pub fn root(&self) -> &FilterGroup {
        &self.root
    }

    /// Label scoping the field picker. Not interpreted here.
    pub fn resource_name(&self) -> &str {
        &self.resource_name
    }

    pub fn config(&self) -> &FilterBuilderConfig {
        &self.config
    }

    pub fn allocator(&self) -> &IndexAllocator {
        &self.alloc
    }

    /// Current tree in backend shape.
    pub fn query(&self) -> QueryNode {
        serialize_group(&self.root)
    }

    pub fn query_json(&self) -> Result<Value> {
        self.query().to_json()
    }

    /// Current tree in the form's shape, indices included.
    pub fn ui_json(&self) -> Result<Value> {
        Ok(serde_json::to_value(&self.root)?)
    }

    pub fn validate(&self) -> Vec<ValidationIssue> {
        validate_group(&self.root)
    }

    /// Register an observer; observers run in registration order.
    pub fn subscribe(&mut self, observer: impl FilterObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Append a default rule to a group. Returns the rule's index.
    pub fn add_rule(&mut self, group_index: u64) -> Result<u64> {
        self.expect_group(group_index)?;
        self.check_room(group_index, 1)?;
        self.commit(|b| {
            let rule = default_rule(&mut b.alloc);
            let index = rule.unique_index;
            b.group_mut(group_index)?.subfilters.push(rule.into());
            debug!(group = group_index, rule = index, "Added rule");
            Ok(index)
        })
    }

    /// Append a nested group holding one default rule. Returns the group's
    /// index.
    pub fn add_group(&mut self, parent_index: u64, operator: impl Into<Operator>) -> Result<u64> {
        let operator = Self::logical(operator.into())?;
        self.expect_group(parent_index)?;
        self.check_room(parent_index, 2)?;
        self.commit(|b| {
            let group = default_group(&mut b.alloc, operator);
            let index = group.unique_index;
            b.group_mut(parent_index)?.subfilters.push(group.into());
            debug!(parent = parent_index, group = index, "Added group");
            Ok(index)
        })
    }

    /// Remove a rule or nested group.
    pub fn remove(&mut self, index: u64) -> Result<()> {
        if index == self.root.unique_index {
            return Err(FilterError::RootRemoval);
        }
        if self.root.parent_of(index).is_none() {
            return Err(FilterError::UnknownIndex(index));
        }

        self.commit(|b| {
            let root_index = b.root.unique_index;
            let mut target = index;
            loop {
                let parent = b
                    .root
                    .parent_of_mut(target)
                    .ok_or(FilterError::UnknownIndex(target))?;
                parent.subfilters.retain(|c| c.unique_index() != target);
                if !parent.subfilters.is_empty() {
                    break;
                }
                if parent.unique_index == root_index {
                    let rule = default_rule(&mut b.alloc);
                    debug!(rule = rule.unique_index, "Root emptied, re-seeding default rule");
                    parent.subfilters.push(rule.into());
                    break;
                }
                debug!(group = parent.unique_index, "Collapsing emptied group");
                target = parent.unique_index;
            }
            debug!(index, "Removed filter node");
            Ok(())
        })
    }

    /// Change a group's operator in place.
    pub fn set_group_operator(&mut self, index: u64, operator: impl Into<Operator>) -> Result<()> {
        let operator = Self::logical(operator.into())?;
        self.expect_group(index)?;
        self.commit(|b| {
            let group = b.group_mut(index)?;
            debug!(group = index, from = %group.operator, to = %operator, "Changed group operator");
            group.operator = operator;
            Ok(())
        })
    }

    /// Change a rule's field, operator and/or value in place.
    pub fn update_rule(&mut self, index: u64, update: RuleUpdate) -> Result<()> {
        if let Some(op) = &update.operator {
            if op.is_logical() {
                return Err(FilterError::OperatorKind {
                    operator: op.to_string(),
                    expected: "comparison",
                });
            }
        }
        self.expect_rule(index)?;
        self.commit(|b| {
            let rule = b
                .root
                .find_rule_mut(index)
                .ok_or(FilterError::UnknownIndex(index))?;
            if let Some(field) = update.field {
                rule.field = field;
            }
            if let Some(operator) = update.operator {
                rule.operator = operator;
            }
            if let Some(value) = update.value {
                rule.value = value;
            }
            debug!(rule = index, "Updated rule");
            Ok(())
        })
    }

    /// Wrap selected direct children of a group into a new sub-group.
    ///
    /// The sub-group takes the place of the first selected child and keeps
    /// the children in their current order. Returns the sub-group's index.
    pub fn nest(
        &mut self,
        parent_index: u64,
        children: &[u64],
        operator: impl Into<Operator>,
    ) -> Result<u64> {
        let operator = Self::logical(operator.into())?;
        if children.is_empty() {
            return Err(FilterError::EmptySelection);
        }
        self.expect_group(parent_index)?;

        let parent = self
            .root
            .find_group_mut(parent_index)
            .ok_or(FilterError::UnknownIndex(parent_index))?;
        let mut deepest = 0;
        for (i, &child) in children.iter().enumerate() {
            if children[..i].contains(&child) {
                return Err(FilterError::DuplicateIndex(child));
            }
            let node = parent
                .subfilters
                .iter()
                .find(|c| c.unique_index() == child)
                .ok_or(FilterError::NotAChild {
                    parent: parent_index,
                    child,
                })?;
            deepest = deepest.max(node.depth());
        }
        let level = self.root.level_of(parent_index).unwrap_or(1);
        if level + 1 + deepest > self.config.max_depth {
            return Err(FilterError::TooDeep(self.config.max_depth));
        }

        self.commit(|b| {
            let unique_index = b.alloc.next_index();
            let parent = b.group_mut(parent_index)?;
            let position = parent
                .subfilters
                .iter()
                .position(|c| children.contains(&c.unique_index()))
                .unwrap_or(0);
            let (picked, mut kept): (Vec<FilterNode>, Vec<FilterNode>) =
                std::mem::take(&mut parent.subfilters)
                    .into_iter()
                    .partition(|c| children.contains(&c.unique_index()));
            kept.insert(
                position,
                FilterGroup {
                    operator,
                    subfilters: picked,
                    unique_index,
                }
                .into(),
            );
            parent.subfilters = kept;

            debug!(
                parent = parent_index,
                group = unique_index,
                nested = children.len(),
                "Nested subfilters"
            );
            Ok(unique_index)
        })
    }

    /// Replace a nested group with its subfilters.
    pub fn unnest(&mut self, group_index: u64) -> Result<()> {
        if group_index == self.root.unique_index {
            return Err(FilterError::RootRemoval);
        }
        self.expect_group(group_index)?;
        self.commit(|b| {
            let parent = b
                .root
                .parent_of_mut(group_index)
                .ok_or(FilterError::UnknownIndex(group_index))?;
            let position = parent
                .subfilters
                .iter()
                .position(|c| c.unique_index() == group_index)
                .ok_or(FilterError::UnknownIndex(group_index))?;
            if let FilterNode::Group(group) = parent.subfilters.remove(position) {
                let tail = parent.subfilters.split_off(position);
                parent.subfilters.extend(group.subfilters);
                parent.subfilters.extend(tail);
            }
            debug!(group = group_index, "Un-nested group");
            Ok(())
        })
    }

    /// Replace the whole tree with a new incoming filter.
    ///
    /// The session allocator carries on, so new indices never collide with
    /// ones the form has already seen.
    pub fn reset(&mut self, filter: &QueryNode) -> Result<()> {
        self.commit(|b| {
            b.root = Self::materialize(filter, &mut b.alloc, &b.config)?;
            debug!(root = b.root.unique_index, "Filter reset");
            Ok(())
        })
    }

    /// Apply one edit, check the result and notify observers.
    ///
    /// If the edit fails or leaves two nodes sharing an index, the tree and
    /// allocator are restored to their state before the call and nothing is
    /// emitted.
    fn commit<T>(&mut self, edit: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        let root = self.root.clone();
        let alloc = self.alloc.clone();
        let outcome = edit(self).and_then(|value| {
            self.root.check_indices()?;
            Ok(value)
        });
        match outcome {
            Ok(value) => {
                self.emit();
                Ok(value)
            }
            Err(err) => {
                warn!(error = %err, resource = %self.resource_name, "Filter edit rolled back");
                self.root = root;
                self.alloc = alloc;
                Err(err)
            }
        }
    }

    fn emit(&mut self) {
        if self.config.validate_on_emit {
            for issue in self.validate() {
                warn!(%issue, resource = %self.resource_name, "Filter validation issue");
            }
        }
        let query = serialize_group(&self.root);
        for observer in self.observers.iter_mut() {
            observer.filter_updated(&query);
        }
    }

    fn logical(operator: Operator) -> Result<Operator> {
        if operator.is_logical() {
            Ok(operator)
        } else {
            Err(FilterError::OperatorKind {
                operator: operator.to_string(),
                expected: "logical",
            })
        }
    }

    fn expect_group(&self, index: u64) -> Result<()> {
        if index == self.root.unique_index {
            return Ok(());
        }
        match self.root.find(index) {
            Some(FilterNode::Group(_)) => Ok(()),
            Some(FilterNode::Rule(_)) => Err(FilterError::NotAGroup(index)),
            None => Err(FilterError::UnknownIndex(index)),
        }
    }

    fn expect_rule(&self, index: u64) -> Result<()> {
        if index == self.root.unique_index {
            return Err(FilterError::NotARule(index));
        }
        match self.root.find(index) {
            Some(FilterNode::Rule(_)) => Ok(()),
            Some(FilterNode::Group(_)) => Err(FilterError::NotARule(index)),
            None => Err(FilterError::UnknownIndex(index)),
        }
    }

    /// Whether `extra` more levels fit below `group_index`.
    fn check_room(&self, group_index: u64, extra: usize) -> Result<()> {
        let level = self.root.level_of(group_index).unwrap_or(1);
        if level + extra > self.config.max_depth {
            return Err(FilterError::TooDeep(self.config.max_depth));
        }
        Ok(())
    }

    fn group_mut(&mut self, index: u64) -> Result<&mut FilterGroup> {
        self.root
            .find_group_mut(index)
            .ok_or(FilterError::NotAGroup(index))
    }
}

impl fmt::Debug for FilterBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterBuilder")
            .field("root", &self.root)
            .field("alloc", &self.alloc)
            .field("resource_name", &self.resource_name)
            .field("config", &self.config)
            .field("observers", &self.observers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn builder(filter: QueryNode) -> FilterBuilder {
        FilterBuilder::new(&filter, "test", FilterBuilderConfig::default()).unwrap()
    }

    fn recorded(b: &mut FilterBuilder) -> Rc<RefCell<Vec<QueryNode>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        b.subscribe(move |q: &QueryNode| sink.borrow_mut().push(q.clone()));
        seen
    }

    fn two_rules() -> QueryNode {
        QueryNode::group(
            "OR",
            vec![
                QueryNode::rule("EQUALS", "glossary.active", "False"),
                QueryNode::rule("CONTAINS", "name", "test"),
            ],
        )
    }

    #[test]
    fn test_empty_filter_default_group() {
        let b = builder(QueryNode::empty());
        assert_eq!(b.root().unique_index, 2);
        assert_eq!(b.root().operator, Operator::Or);
        assert_eq!(b.root().indices(), vec![2, 1]);
        assert_eq!(b.allocator().peek(), 3);
        assert_eq!(b.resource_name(), "test");
    }

    #[test]
    fn test_lone_rule_is_wrapped() {
        let b = builder(QueryNode::rule("EQUALS", "name", "x"));
        assert_eq!(b.root().unique_index, 2);
        assert_eq!(b.root().subfilters[0].unique_index(), 1);
        assert_eq!(
            b.query(),
            QueryNode::group("OR", vec![QueryNode::rule("EQUALS", "name", "x")])
        );
    }

    #[test]
    fn test_add_rule_emits() {
        let mut b = builder(two_rules());
        let seen = recorded(&mut b);
        let index = b.add_rule(1).unwrap();
        assert_eq!(index, 4);
        let seen = seen.borrow();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0], b.query());
        match &seen[0] {
            QueryNode::Group { operand, .. } => {
                assert_eq!(operand[2], QueryNode::rule("EQUALS", "", ""))
            }
            other => panic!("expected group, got {:?}", other),
        }
    }

    #[test]
    fn test_add_rule_to_rule_fails() {
        let mut b = builder(two_rules());
        assert!(matches!(b.add_rule(2), Err(FilterError::NotAGroup(2))));
        assert!(matches!(b.add_rule(99), Err(FilterError::UnknownIndex(99))));
    }

    #[test]
    fn test_add_group_allocates_rule_first() {
        let mut b = builder(two_rules());
        let group = b.add_group(1, "AND").unwrap();
        assert_eq!(group, 5);
        let nested = b.root().subfilters[2].as_group().unwrap();
        assert_eq!(nested.operator, Operator::And);
        assert_eq!(nested.subfilters[0].unique_index(), 4);
    }

    #[test]
    fn test_add_group_rejects_comparison_operator() {
        let mut b = builder(two_rules());
        assert!(matches!(
            b.add_group(1, "EQUALS"),
            Err(FilterError::OperatorKind { expected: "logical", .. })
        ));
    }

    #[test]
    fn test_remove_rule() {
        let mut b = builder(two_rules());
        let seen = recorded(&mut b);
        b.remove(2).unwrap();
        assert_eq!(
            b.query(),
            QueryNode::group("OR", vec![QueryNode::rule("CONTAINS", "name", "test")])
        );
        assert_eq!(seen.borrow().len(), 1);
    }

    #[test]
    fn test_remove_last_root_rule_reseeds() {
        let mut b = builder(QueryNode::empty());
        b.remove(1).unwrap();
        assert_eq!(b.root().subfilters.len(), 1);
        let rule = b.root().subfilters[0].as_rule().unwrap();
        assert_eq!(rule.unique_index, 3);
        assert_eq!(rule.field, "");
        assert_eq!(rule.operator, Operator::Equals);
    }

    #[test]
    fn test_remove_collapses_emptied_nested_groups() {
        let q = QueryNode::group(
            "OR",
            vec![
                QueryNode::rule("EQUALS", "a", "1"),
                QueryNode::group(
                    "AND",
                    vec![QueryNode::group("OR", vec![QueryNode::rule("EQUALS", "b", "2")])],
                ),
            ],
        );
        let mut b = builder(q);
        // 1 root, 2 a, 3 AND, 4 OR, 5 b
        b.remove(5).unwrap();
        assert_eq!(b.root().indices(), vec![1, 2]);
    }

    #[test]
    fn test_remove_keeps_single_child_parent() {
        let q = QueryNode::group(
            "OR",
            vec![
                QueryNode::rule("EQUALS", "a", "1"),
                QueryNode::group(
                    "AND",
                    vec![
                        QueryNode::rule("EQUALS", "b", "2"),
                        QueryNode::rule("EQUALS", "c", "3"),
                    ],
                ),
            ],
        );
        let mut b = builder(q);
        b.remove(4).unwrap();
        assert_eq!(b.root().indices(), vec![1, 2, 3, 5]);
    }

    #[test]
    fn test_remove_root_or_unknown() {
        let mut b = builder(two_rules());
        let seen = recorded(&mut b);
        assert!(matches!(b.remove(1), Err(FilterError::RootRemoval)));
        assert!(matches!(b.remove(42), Err(FilterError::UnknownIndex(42))));
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn test_set_group_operator_keeps_indices() {
        let mut b = builder(two_rules());
        let before = b.root().indices();
        b.set_group_operator(1, "AND").unwrap();
        assert_eq!(b.root().operator, Operator::And);
        assert_eq!(b.root().indices(), before);
        assert!(matches!(b.set_group_operator(2, "OR"), Err(FilterError::NotAGroup(2))));
        assert!(b.set_group_operator(1, "CONTAINS").is_err());
    }

    #[test]
    fn test_update_rule() {
        let mut b = builder(two_rules());
        let seen = recorded(&mut b);
        b.update_rule(3, RuleUpdate::default().field("description").value("admin"))
            .unwrap();
        b.update_rule(2, RuleUpdate::default().operator("NOT EQUALS")).unwrap();
        assert_eq!(
            b.query(),
            QueryNode::group(
                "OR",
                vec![
                    QueryNode::rule("NOT EQUALS", "glossary.active", "False"),
                    QueryNode::rule("CONTAINS", "description", "admin"),
                ]
            )
        );
        assert_eq!(seen.borrow().len(), 2);
        assert!(matches!(
            b.update_rule(1, RuleUpdate::default().field("x")),
            Err(FilterError::NotARule(1))
        ));
        assert!(b.update_rule(2, RuleUpdate::default().operator("OR")).is_err());
    }

    #[test]
    fn test_nest_and_unnest() {
        let q = QueryNode::group(
            "OR",
            vec![
                QueryNode::rule("EQUALS", "a", "1"),
                QueryNode::rule("EQUALS", "b", "2"),
                QueryNode::rule("EQUALS", "c", "3"),
            ],
        );
        let mut b = builder(q.clone());
        let seen = recorded(&mut b);
        let group = b.nest(1, &[4, 3], "AND").unwrap();
        assert_eq!(group, 5);
        assert_eq!(b.root().indices(), vec![1, 2, 5, 3, 4]);
        assert_eq!(
            b.query(),
            QueryNode::group(
                "OR",
                vec![
                    QueryNode::rule("EQUALS", "a", "1"),
                    QueryNode::group(
                        "AND",
                        vec![
                            QueryNode::rule("EQUALS", "b", "2"),
                            QueryNode::rule("EQUALS", "c", "3"),
                        ]
                    ),
                ]
            )
        );

        b.unnest(group).unwrap();
        assert_eq!(b.query(), q);
        assert_eq!(b.root().indices(), vec![1, 2, 3, 4]);
        assert_eq!(seen.borrow().len(), 2);
    }

    #[test]
    fn test_nest_rejects_bad_selection() {
        let mut b = builder(two_rules());
        assert!(matches!(b.nest(1, &[], "AND"), Err(FilterError::EmptySelection)));
        assert!(matches!(
            b.nest(1, &[2, 2], "AND"),
            Err(FilterError::DuplicateIndex(2))
        ));
        assert!(matches!(
            b.nest(1, &[7], "AND"),
            Err(FilterError::NotAChild { parent: 1, child: 7 })
        ));
        // failed calls draw no index
        assert_eq!(b.allocator().peek(), 4);
    }

    #[test]
    fn test_index_collision_rolls_back_edit() {
        let mut b = builder(two_rules());
        let seen = recorded(&mut b);
        let before = b.root().clone();
        // the next rule would reuse index 2
        b.alloc = IndexAllocator::with_seed(2);
        assert!(matches!(b.add_rule(1), Err(FilterError::DuplicateIndex(2))));
        assert_eq!(b.root(), &before);
        assert_eq!(b.allocator().peek(), 2);
        assert!(seen.borrow().is_empty());

        b.alloc = IndexAllocator::with_seed(10);
        assert_eq!(b.add_rule(1).unwrap(), 10);
        assert_eq!(b.root().indices(), vec![1, 2, 3, 10]);
        assert_eq!(seen.borrow().len(), 1);
    }

    #[test]
    fn test_unnest_root_fails() {
        let mut b = builder(two_rules());
        assert!(matches!(b.unnest(1), Err(FilterError::RootRemoval)));
        assert!(matches!(b.unnest(2), Err(FilterError::NotAGroup(2))));
    }

    #[test]
    fn test_max_depth_enforced_by_editing() {
        let config = FilterBuilderConfig {
            max_depth: 2,
            ..Default::default()
        };
        let mut b = FilterBuilder::new(&two_rules(), "test", config).unwrap();
        assert!(matches!(b.add_group(1, "AND"), Err(FilterError::TooDeep(2))));
        assert!(matches!(b.nest(1, &[2], "AND"), Err(FilterError::TooDeep(2))));
        assert!(b.add_rule(1).is_ok());
    }

    #[test]
    fn test_reset_continues_allocator() {
        let mut b = builder(QueryNode::empty());
        let seen = recorded(&mut b);
        b.reset(&two_rules()).unwrap();
        assert_eq!(b.root().indices(), vec![3, 4, 5]);
        assert_eq!(seen.borrow().last(), Some(&two_rules()));
    }

    #[test]
    fn test_observers_run_in_order() {
        let mut b = builder(two_rules());
        let log = Rc::new(RefCell::new(Vec::new()));
        for name in ["first", "second"] {
            let log = Rc::clone(&log);
            b.subscribe(move |_: &QueryNode| log.borrow_mut().push(name));
        }
        b.add_rule(1).unwrap();
        assert_eq!(*log.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn test_from_json_and_ui_json() {
        let filter = json!({
            "operator": "AND",
            "operand": [
                { "operator": "GTE", "operand": { "targetName": "age", "targetValue": 18 } }
            ]
        });
        let b = FilterBuilder::from_json(
            &filter.to_string(),
            "user",
            FilterBuilderConfig::default(),
        )
        .unwrap();
        let ui = b.ui_json().unwrap();
        assert_eq!(ui["uniqueIndex"], 1);
        assert_eq!(ui["subfilters"][0]["value"], 18);
        assert_eq!(b.query_json().unwrap()["operand"][0]["operand"]["targetName"], "age");
    }

    #[test]
    fn test_validate_reports_default_rule() {
        let b = builder(QueryNode::empty());
        let issues = b.validate();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].unique_index, 1);
    }
}
