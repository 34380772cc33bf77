//! Compact automaton: a cache-friendly, flat-array representation of the
//! determinized graph, and the compaction step that builds one from a
//! [`Dfa`].
//!
//! Because the determinizer already assigns dense, sequential ids to
//! combined nodes as it discovers them, compaction is a 1:1 transcription —
//! no second renumbering pass is needed. What compaction *does* add is:
//! resolving each tag's placeholder name to a placeholder index (by position
//! in the owning terminal's name list) and recording, for every node a
//! placeholder passes through, `node -> placeholder index` in that
//! terminal's [`crate::terminal::Terminal::node_to_placeholder`] map — the
//! state the matcher needs to reconstruct captures without ever touching the
//! graph again.

use crate::dfa::Dfa;
use crate::nfa::ALPHABET_LEN;
use crate::terminal::Terminal;

/// Sentinel value for "no edge", since node ids never legitimately reach
/// `u32::MAX` for realistic route sets.
pub(crate) const NONE: u32 = u32::MAX;

/// `(terminal-index, placeholder-index-or-none)`, compacted from
/// [`crate::nfa::Tag`]. Node-local duplicates are impossible by
/// construction: [`crate::nfa::merge_tag`] keeps at most one tag per
/// terminal per (N)FA node, and that invariant survives determinization.
#[derive(Clone, Copy, Debug)]
pub(crate) struct CompactTag {
    pub(crate) terminal: usize,
    pub(crate) placeholder: Option<usize>,
}

struct Node {
    edges: Box<[u32]>,
    terminals_start: u32,
    terminals_end: u32,
}

/// The only structure needed at match time.
pub(crate) struct Automaton {
    nodes: Vec<Node>,
    tags: Vec<CompactTag>,
}

impl Automaton {
    pub(crate) fn start(&self) -> u32 {
        0
    }

    #[inline]
    pub(crate) fn successor(&self, node: u32, symbol: usize) -> Option<u32> {
        match self.nodes[node as usize].edges[symbol] {
            NONE => None,
            id => Some(id),
        }
    }

    pub(crate) fn terminals(&self, node: u32) -> &[CompactTag] {
        let n = &self.nodes[node as usize];
        &self.tags[n.terminals_start as usize..n.terminals_end as usize]
    }
}

/// Builds the compact automaton from a determinized graph, resolving each
/// tag's placeholder name against its owning terminal's name list and
/// populating every terminal's `node_to_placeholder` map along the way.
pub(crate) fn compact<T>(dfa: &Dfa, terminals: &mut [Terminal<T>]) -> Automaton {
    let mut nodes = Vec::with_capacity(dfa.nodes.len());
    let mut tags_flat = Vec::new();

    for (node_idx, dnode) in dfa.nodes.iter().enumerate() {
        let mut edges = vec![NONE; ALPHABET_LEN];
        for (symbol, edge) in edges.iter_mut().enumerate() {
            if let Some(succ) = dnode.successor(symbol) {
                *edge = succ;
            }
        }

        let start = tags_flat.len() as u32;
        for tag in &dnode.tags {
            let placeholder_index = match &tag.placeholder {
                None => None,
                Some(name) => {
                    let term = &terminals[tag.terminal];
                    let idx = term
                        .placeholder_names
                        .iter()
                        .position(|n| n.as_ref() == name.as_ref())
                        .expect("a tag's placeholder name must be in its own terminal's name list");
                    terminals[tag.terminal]
                        .node_to_placeholder
                        .insert(node_idx as u32, idx);
                    Some(idx)
                }
            };
            tags_flat.push(CompactTag {
                terminal: tag.terminal,
                placeholder: placeholder_index,
            });
        }
        let end = tags_flat.len() as u32;

        nodes.push(Node {
            edges: edges.into_boxed_slice(),
            terminals_start: start,
            terminals_end: end,
        });
    }

    Automaton {
        nodes,
        tags: tags_flat,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nfa::{Nfa, DOLLAR};
    use crate::pattern::parse;
    use crate::terminal::Terminal;

    fn build<T: Clone>(patterns: &[(&str, T)]) -> (Automaton, Vec<Terminal<T>>) {
        let mut nfa = Nfa::new();
        let mut terminals = Vec::new();
        for (i, (p, data)) in patterns.iter().enumerate() {
            let parsed = parse(p.as_bytes()).unwrap();
            nfa.compile(&parsed, i).unwrap();
            terminals.push(Terminal::new(p.as_bytes().to_vec(), data.clone(), parsed));
        }
        let dfa = crate::dfa::build(&nfa).unwrap();
        let automaton = compact(&dfa, &mut terminals);
        (automaton, terminals)
    }

    #[test]
    fn start_node_has_no_terminals_for_nonempty_patterns() {
        let (automaton, _terminals) = build(&[("/test", ())]);
        assert!(automaton.terminals(automaton.start()).is_empty());
    }

    #[test]
    fn literal_pattern_reaches_accept_on_dollar() {
        let (automaton, _terminals) = build(&[("ab", ())]);
        let n1 = automaton.successor(automaton.start(), b'a' as usize).unwrap();
        let n2 = automaton.successor(n1, b'b' as usize).unwrap();
        let accept = automaton.successor(n2, DOLLAR).unwrap();
        let tags = automaton.terminals(accept);
        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].terminal, 0);
        assert_eq!(tags[0].placeholder, None);
    }

    #[test]
    fn placeholder_node_is_recorded_in_terminal_map() {
        let (automaton, terminals) = build(&[(":x", ())]);
        let start = automaton.start();
        assert_eq!(
            terminals[0].node_to_placeholder.get(&start).copied(),
            Some(0)
        );
    }
}
