//! Structural pattern matching between documents.
//!
//! A pattern is just another [`Document`] (or [`Node`]): each pattern node
//! must pair with *some* unused actual sibling of the same name whose value,
//! properties and children satisfy it — sibling order is irrelevant on both
//! sides, and actual nodes or properties with no pattern counterpart are
//! ignored. Names and property keys compare case-insensitively.
//!
//! Value constraints compare canonical text projections exactly, so a
//! numeric literal matches its quoted-string counterpart. A pattern text
//! value of the form `/op=regex <expression>` instead requires the actual
//! value's text projection to satisfy the expression as a whole-string
//! regular expression. A pattern node without a value accepts anything; a
//! pattern value against a valueless node never matches.
//!
//! Mismatch is an expected outcome, so matching returns `bool` and never
//! errors; an unparseable regex in a pattern simply fails to match.

use regex::Regex;

use crate::node::{name_eq, Document, Node};
use crate::value::Value;

const REGEX_OPERATOR: &str = "/op=regex ";

impl Document {
    /// Whether every root node of `pattern` pairs with a distinct root node
    /// of this document.
    #[must_use]
    pub fn matches(&self, pattern: &Document) -> bool {
        siblings_match(&self.nodes, &pattern.nodes)
    }
}

impl Node {
    /// Whether this node's subtree satisfies `pattern`.
    #[must_use]
    pub fn matches(&self, pattern: &Node) -> bool {
        node_matches(self, pattern)
    }
}

fn node_matches(actual: &Node, pattern: &Node) -> bool {
    if !name_eq(actual.name(), pattern.name()) {
        return false;
    }
    match (&pattern.value, &actual.value) {
        (None, _) => {}
        (Some(_), None) => return false,
        (Some(wanted), Some(found)) => {
            if !value_matches(wanted, found) {
                return false;
            }
        }
    }
    for (key, wanted) in pattern.properties.iter() {
        match actual.properties.get(key) {
            Some(found) if value_matches(wanted, found) => {}
            _ => return false,
        }
    }
    siblings_match(&actual.nodes, &pattern.nodes)
}

/// Multiset pairing: assigns each pattern node to a distinct actual node,
/// backtracking when a tentative pairing starves a later pattern node.
fn siblings_match(actual: &[Node], pattern: &[Node]) -> bool {
    let mut used = vec![false; actual.len()];
    pair_remaining(actual, pattern, &mut used)
}

fn pair_remaining(actual: &[Node], pattern: &[Node], used: &mut [bool]) -> bool {
    let Some((first, rest)) = pattern.split_first() else {
        return true;
    };
    for (index, candidate) in actual.iter().enumerate() {
        if used[index] || !node_matches(candidate, first) {
            continue;
        }
        used[index] = true;
        if pair_remaining(actual, rest, used) {
            return true;
        }
        used[index] = false;
    }
    false
}

fn value_matches(pattern: &Value, actual: &Value) -> bool {
    if let Value::Text(text) = pattern {
        if let Some(expression) = text.strip_prefix(REGEX_OPERATOR) {
            let Some(subject) = actual.as_string() else {
                return false;
            };
            return Regex::new(&format!("^(?:{expression})$"))
                .is_ok_and(|regex| regex.is_match(&subject));
        }
    }
    pattern.as_string() == actual.as_string()
}
