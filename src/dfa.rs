//! Subset construction: turns the shared [`Nfa`] into a graph where every
//! `(node, symbol)` pair has at most one successor.
//!
//! Determinization preserves which terminals are reachable via any given
//! input prefix, and (by unioning tag sets) which placeholder is active for
//! each terminal at each combined node. It does not preserve multiplicity:
//! two NFA paths for the same terminal arriving at the same combined node
//! collapse into one tag, with the combined node's full terminal-tag list
//! sorted by terminal index so that the visitor always sees terminals in
//! registration order (see module docs in `matcher.rs`).
//!
//! Work proceeds over an explicit stack of not-yet-expanded combined nodes,
//! not recursion, so that a pathological route set cannot blow the host
//! stack.

use std::collections::HashMap;

use itertools::Itertools;

use crate::error::BuildError;
use crate::nfa::{merge_tag, Nfa, Tag, ALPHABET_LEN};

pub(crate) struct DfaNode {
    pub(crate) tags: Vec<Tag>,
    edges: Vec<Option<u32>>,
}

impl DfaNode {
    pub(crate) fn successor(&self, symbol: usize) -> Option<u32> {
        self.edges[symbol]
    }
}

pub(crate) struct Dfa {
    pub(crate) nodes: Vec<DfaNode>,
}

/// Computes the ordered, de-duplicated union of tag sets for the NFA nodes
/// in `set`, sorted by terminal index (see module docs for why sorting here
/// stands in for "order of first insertion").
fn union_tags(nfa: &Nfa, set: &[u32]) -> Result<Vec<Tag>, BuildError> {
    let mut tags = Vec::new();
    for &n in set {
        for t in &nfa.node(n).tags {
            merge_tag(&mut tags, t.clone())?;
        }
    }
    tags.sort_by_key(|t| t.terminal);
    Ok(tags)
}

/// Returns the combined node id for `set` (a sorted, de-duplicated list of
/// NFA node ids), creating and enqueueing it if this is the first time this
/// exact set has been seen.
fn intern(
    set: Vec<u32>,
    nfa: &Nfa,
    map: &mut HashMap<Vec<u32>, u32>,
    nodes: &mut Vec<DfaNode>,
    nfa_sets: &mut Vec<Vec<u32>>,
    stack: &mut Vec<u32>,
) -> Result<u32, BuildError> {
    if let Some(&id) = map.get(&set) {
        return Ok(id);
    }
    let id = nodes.len() as u32;
    let tags = union_tags(nfa, &set)?;
    nodes.push(DfaNode {
        tags,
        edges: vec![None; ALPHABET_LEN],
    });
    nfa_sets.push(set.clone());
    map.insert(set, id);
    stack.push(id);
    Ok(id)
}

pub(crate) fn build(nfa: &Nfa) -> Result<Dfa, BuildError> {
    let mut map: HashMap<Vec<u32>, u32> = HashMap::new();
    let mut nodes: Vec<DfaNode> = Vec::new();
    let mut nfa_sets: Vec<Vec<u32>> = Vec::new();
    let mut stack: Vec<u32> = Vec::new();

    let start_set: Vec<u32> = nfa.roots.iter().copied().sorted().dedup().collect();
    intern(start_set, nfa, &mut map, &mut nodes, &mut nfa_sets, &mut stack)?;
    // By construction there is exactly one combined start node: `intern`
    // always produces a single id for the (possibly multi-member) start set.

    while let Some(id) = stack.pop() {
        let set = nfa_sets[id as usize].clone();
        for symbol in 0..ALPHABET_LEN {
            let mut succ = Vec::new();
            for &n in &set {
                for &s in nfa.node(n).successors(symbol) {
                    if !succ.contains(&s) {
                        succ.push(s);
                    }
                }
            }
            if succ.is_empty() {
                continue;
            }
            let key: Vec<u32> = succ.into_iter().sorted().dedup().collect();
            let next_id = intern(key, nfa, &mut map, &mut nodes, &mut nfa_sets, &mut stack)?;
            nodes[id as usize].edges[symbol] = Some(next_id);
        }
    }

    Ok(Dfa { nodes })
}
