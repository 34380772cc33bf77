//! Nondeterministic match graph construction.
//!
//! Each registered pattern extends a shared NFA with a path uniquely
//! attributable to its terminal index. The alphabet used throughout this
//! crate is 257-valued: byte values `0..=255` plus one synthetic "end of
//! input" symbol, [`DOLLAR`], which is never present in real input and is
//! only ever followed at the very end of a match attempt.
//!
//! There is no shared root node threaded through a labelled "start" edge:
//! instead [`Nfa`] records one entry node per terminal directly
//! ([`Nfa::roots`]). The determinizer seeds its start set from the union of
//! those roots, which is exactly what following a start edge from a shared
//! root and taking its closure would produce.

use crate::error::BuildError;
use crate::pattern::{ParsedPattern, Segment};

/// One of the 257 symbols an NFA/DFA edge may be labelled with: a literal
/// byte, or the synthetic end-of-input sentinel.
pub(crate) const DOLLAR: usize = 256;
pub(crate) const ALPHABET_LEN: usize = 257;

/// `(terminal-index, placeholder-name-or-none)`, attached to the node an
/// edge leads into.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Tag {
    pub(crate) terminal: usize,
    /// `None` means the terminal passes through this node but not inside any
    /// of its placeholders.
    pub(crate) placeholder: Option<Box<str>>,
}

/// Merges `new` into `tags` for the same terminal, in place.
///
/// An empty (`None`) tag for a terminal is upgraded to a named one; two
/// different non-empty names for the same terminal at the same node is a
/// build-time bug, not a user error.
pub(crate) fn merge_tag(tags: &mut Vec<Tag>, new: Tag) -> Result<(), BuildError> {
    if let Some(existing) = tags.iter_mut().find(|t| t.terminal == new.terminal) {
        match (&existing.placeholder, &new.placeholder) {
            (None, Some(_)) => existing.placeholder = new.placeholder,
            (Some(a), Some(b)) if a != b => {
                return Err(BuildError::conflicting_placeholder(new.terminal, a, b))
            }
            _ => {}
        }
        return Ok(());
    }
    tags.push(new);
    Ok(())
}

#[derive(Clone, Debug, Default)]
pub(crate) struct Node {
    pub(crate) tags: Vec<Tag>,
    /// `edges[symbol]` is the (possibly empty) set of successor node ids for
    /// that symbol, in the order transitions were added.
    edges: Vec<Vec<u32>>,
}

impl Node {
    fn new() -> Node {
        Node {
            tags: Vec::new(),
            edges: vec![Vec::new(); ALPHABET_LEN],
        }
    }

    pub(crate) fn successors(&self, symbol: usize) -> &[u32] {
        &self.edges[symbol]
    }
}

/// The nondeterministic match graph shared by every registered pattern.
#[derive(Clone, Debug, Default)]
pub(crate) struct Nfa {
    nodes: Vec<Node>,
    /// One entry node id per terminal, in registration order.
    pub(crate) roots: Vec<u32>,
}

impl Nfa {
    pub(crate) fn new() -> Nfa {
        Nfa {
            nodes: Vec::new(),
            roots: Vec::new(),
        }
    }

    pub(crate) fn node(&self, id: u32) -> &Node {
        &self.nodes[id as usize]
    }

    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    fn alloc(&mut self) -> u32 {
        let id = self.nodes.len() as u32;
        self.nodes.push(Node::new());
        id
    }

    fn add_edge(&mut self, from: u32, symbol: usize, to: u32, tag: Tag) -> Result<(), BuildError> {
        self.nodes[from as usize].edges[symbol].push(to);
        merge_tag(&mut self.nodes[to as usize].tags, tag)
    }

    /// Extends this NFA with a path for `pattern`, attributed to
    /// `terminal_index`: an entry node, a chain of literal/placeholder/
    /// wildcard edges, and a final edge on [`DOLLAR`] into an accept node.
    pub(crate) fn compile(
        &mut self,
        pattern: &ParsedPattern,
        terminal_index: usize,
    ) -> Result<(), BuildError> {
        let entry = self.alloc();
        merge_tag(
            &mut self.nodes[entry as usize].tags,
            Tag {
                terminal: terminal_index,
                placeholder: None,
            },
        )?;
        debug_assert_eq!(self.roots.len(), terminal_index);
        self.roots.push(entry);

        let mut cur = entry;
        for segment in &pattern.segments {
            match segment {
                Segment::Literal(b) => {
                    let next = self.alloc();
                    self.add_edge(
                        cur,
                        *b as usize,
                        next,
                        Tag {
                            terminal: terminal_index,
                            placeholder: None,
                        },
                    )?;
                    cur = next;
                }
                Segment::Placeholder(name_idx) => {
                    let name = pattern.placeholder_names[*name_idx].clone();
                    for v in 0u16..256 {
                        if v as u8 == b'/' {
                            continue;
                        }
                        self.add_edge(
                            cur,
                            v as usize,
                            cur,
                            Tag {
                                terminal: terminal_index,
                                placeholder: Some(name.clone()),
                            },
                        )?;
                    }
                }
                Segment::Wildcard => {
                    for v in 0u16..256 {
                        self.add_edge(
                            cur,
                            v as usize,
                            cur,
                            Tag {
                                terminal: terminal_index,
                                placeholder: None,
                            },
                        )?;
                    }
                }
            }
        }

        let accept = self.alloc();
        self.add_edge(
            cur,
            DOLLAR,
            accept,
            Tag {
                terminal: terminal_index,
                placeholder: None,
            },
        )?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::parse;

    fn compiled(patterns: &[&str]) -> Nfa {
        let mut nfa = Nfa::new();
        for (i, p) in patterns.iter().enumerate() {
            let parsed = parse(p.as_bytes()).unwrap();
            nfa.compile(&parsed, i).unwrap();
        }
        nfa
    }

    #[test]
    fn literal_pattern_has_linear_chain() {
        let nfa = compiled(&["ab"]);
        // entry -a-> n1 -b-> n2 -$-> accept
        assert_eq!(nfa.len(), 4);
        let entry = nfa.roots[0];
        let n1 = nfa.node(entry).successors(b'a' as usize)[0];
        let n2 = nfa.node(n1).successors(b'b' as usize)[0];
        let accept = nfa.node(n2).successors(DOLLAR)[0];
        assert!(nfa.node(accept).tags.iter().any(|t| t.terminal == 0));
    }

    #[test]
    fn placeholder_self_loops() {
        let nfa = compiled(&[":x"]);
        let entry = nfa.roots[0];
        // Every non-slash byte should loop back to the same node.
        let next_a = nfa.node(entry).successors(b'a' as usize)[0];
        let next_z = nfa.node(entry).successors(b'z' as usize)[0];
        assert_eq!(next_a, entry);
        assert_eq!(next_z, entry);
        assert!(nfa.node(entry).successors(b'/' as usize).is_empty());
        let tag = nfa
            .node(entry)
            .tags
            .iter()
            .find(|t| t.terminal == 0)
            .unwrap();
        assert_eq!(tag.placeholder.as_deref(), Some("x"));
    }

    #[test]
    fn wildcard_accepts_dollar_too() {
        let nfa = compiled(&["foo/*"]);
        let entry = nfa.roots[0];
        let n_f = nfa.node(entry).successors(b'f' as usize)[0];
        let n_o = nfa.node(n_f).successors(b'o' as usize)[0];
        let n_o2 = nfa.node(n_o).successors(b'o' as usize)[0];
        let n_slash = nfa.node(n_o2).successors(b'/' as usize)[0];
        // the wildcard node accepts any byte back to itself, and $ too.
        assert_eq!(nfa.node(n_slash).successors(b'x' as usize)[0], n_slash);
        assert!(!nfa.node(n_slash).successors(DOLLAR).is_empty());
    }
}
