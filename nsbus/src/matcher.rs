//! Prefix-based namespace matching.
//!
//! A registry maps namespaces to ordered entry lists. Resolving a target
//! namespace flattens the registry into the chain that applies to it:
//!
//! 1. the root (`""`) list, always first;
//! 2. every namespace whose segments are a prefix of the target's segments,
//!    in ascending lexicographic order of the namespace *string* — so
//!    `"a.b"` sorts before `"a.c"` and before `"ab"`, independent of
//!    segment count;
//! 3. within one namespace, entries keep registration order.
//!
//! `BTreeMap` gives both orderings for free: its keys iterate in lexicographic
//! order, and `""` orders before every other string.

use std::collections::BTreeMap;

/// Namespace → ordered entries, insertion order preserved per namespace.
pub(crate) type Registry<T> = BTreeMap<String, Vec<T>>;

/// Flatten `registry` into the ordered chain applicable to `target`.
pub(crate) fn resolve<'a, T>(target: &str, registry: &'a Registry<T>) -> Vec<&'a T> {
    let segments = split(target);

    let mut chain = Vec::new();
    for (candidate, entries) in registry {
        if applies(candidate, &segments) {
            chain.extend(entries.iter());
        }
    }
    chain
}

/// Split a namespace into segments; the root has none.
fn split(namespace: &str) -> Vec<&str> {
    if namespace.is_empty() {
        Vec::new()
    } else {
        namespace.split('.').collect()
    }
}

/// The prefix rule: every candidate segment must equal the target segment at
/// the same position, and the candidate may not be deeper than the target.
/// The root matches everything.
fn applies(candidate: &str, target: &[&str]) -> bool {
    if candidate.is_empty() {
        return true;
    }

    let mut position = 0;
    for segment in candidate.split('.') {
        if target.get(position) != Some(&segment) {
            return false;
        }
        position += 1;
    }
    true
}
