// SPDX-License-Identifier: PMPL-1.0-or-later
//
// Fuzz target for the query filter reader.
// Run with: cargo +nightly fuzz run fuzz_query_filter
//
// Feeds arbitrary JSON to the wire deserializer and, when it is accepted,
// through parse and serialize. Rejection is fine; panics are not, and an
// accepted filter must serialize back to itself.

#![no_main]

use govfilter_tree::{parse, serialize, IndexAllocator, ParseOptions, QueryNode};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };
    if input.len() > 8192 {
        return;
    }
    let Ok(query) = QueryNode::from_json_str(input) else {
        return;
    };
    let mut alloc = IndexAllocator::new();
    if let Ok(node) = parse(&query, &mut alloc, &ParseOptions::default()) {
        assert!(node.check_indices().is_ok());
        let back = serialize(&node);
        if !query.is_empty() && !has_empty_group(&query) {
            assert_eq!(back, query);
        }
    }
});

fn has_empty_group(query: &QueryNode) -> bool {
    match query {
        QueryNode::Group { operand, .. } => {
            operand.is_empty() || operand.iter().any(has_empty_group)
        }
        _ => false,
    }
}
