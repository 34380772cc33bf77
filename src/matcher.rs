//! Matching and placeholder-capture extraction.
//!
//! A match proceeds in two passes over the same input, both walking the
//! compact [`Automaton`]:
//!
//! 1. **Find.** Walk the automaton byte by byte, then take the
//!    [`DOLLAR`] edge. Getting stuck at either step means no pattern
//!    matches this path at all — the automaton is shared, so a dead end is
//!    a dead end for every terminal. Reaching the `$`-node yields the set
//!    of terminals tagging it, in registration order.
//! 2. **Extract.** For each matching terminal, re-walk the very same
//!    sequence of automaton nodes (cached from pass 1, so this is a cheap
//!    linear scan, not a second traversal) and consult that terminal's
//!    `node_to_placeholder` map to find where each of its placeholders
//!    opens and closes.
//!
//! A placeholder opens the first time its node carries it and closes the
//! first time it doesn't (or at end of input, if it is still open there).
//! A placeholder that never captures at least one byte — including one
//! whose capture would start and end at the same position — disqualifies
//! the whole terminal from this match; `":x"` must not match an empty
//! path segment. `Captures` borrows directly out of the input slice: no
//! bytes are copied or decoded as UTF-8, matching the crate's
//! byte-oriented matching throughout.

use crate::automaton::Automaton;
use crate::nfa::DOLLAR;
use crate::terminal::Terminal;

/// The placeholder captures produced by one matching terminal.
///
/// Values borrow directly from the path that was matched (`'t`); placeholder
/// names borrow from the router's own terminal bookkeeping (`'r`).
#[derive(Clone, Debug)]
pub struct Captures<'r, 't> {
    path: &'t [u8],
    names: &'r [Box<str>],
    spans: Vec<(usize, usize)>,
}

impl<'r, 't> Captures<'r, 't> {
    /// Returns the captured bytes for a named placeholder, or `None` if this
    /// pattern declares no placeholder with that name.
    pub fn get(&self, name: &str) -> Option<&'t [u8]> {
        let idx = self.names.iter().position(|n| n.as_ref() == name)?;
        let (start, end) = self.spans[idx];
        Some(&self.path[start..end])
    }

    /// Iterates over every placeholder this pattern declares, in the order
    /// they appear in the pattern, paired with its captured bytes.
    pub fn iter(&self) -> impl Iterator<Item = (&'r str, &'t [u8])> + '_ {
        self.names
            .iter()
            .zip(self.spans.iter())
            .map(move |(name, &(start, end))| (name.as_ref(), &self.path[start..end]))
    }

    /// The number of placeholders this pattern declares.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Walks `path` through `automaton` and, for each terminal tagging the
/// terminating node (in registration order), extracts its captures and
/// invokes `visit(terminal_index, &captures)`. Stops and returns `true` the
/// first time `visit` returns `true`; returns `false` if no terminal
/// matches, or every matching terminal is rejected for lacking a
/// non-empty placeholder capture.
pub(crate) fn find<'r, 't, T>(
    automaton: &Automaton,
    terminals: &'r [Terminal<T>],
    path: &'t [u8],
    mut visit: impl FnMut(usize, &Captures<'r, 't>) -> bool,
) -> bool {
    let mut node_path = Vec::with_capacity(path.len() + 1);
    let mut cur = automaton.start();
    node_path.push(cur);
    for &b in path {
        match automaton.successor(cur, b as usize) {
            Some(next) => {
                cur = next;
                node_path.push(cur);
            }
            None => return false,
        }
    }
    let accept = match automaton.successor(cur, DOLLAR) {
        Some(a) => a,
        None => return false,
    };

    for tag in automaton.terminals(accept) {
        let terminal = &terminals[tag.terminal];
        if let Some(captures) = extract_captures(terminal, &node_path, path) {
            if visit(tag.terminal, &captures) {
                return true;
            }
        }
    }
    false
}

/// Re-walks the cached node path for one terminal, opening and closing
/// placeholder spans as `node_to_placeholder` says they become active or
/// inactive. Returns `None` if any declared placeholder ends up uncaptured
/// or captures zero bytes.
fn extract_captures<'r, 't, T>(
    terminal: &'r Terminal<T>,
    node_path: &[u32],
    path: &'t [u8],
) -> Option<Captures<'r, 't>> {
    let mut spans: Vec<Option<(usize, usize)>> = vec![None; terminal.placeholder_names.len()];
    let mut active: Option<usize> = None;
    let mut start = 0usize;

    for (i, &node) in node_path.iter().enumerate() {
        let cur_active = terminal.node_to_placeholder.get(&node).copied();
        if cur_active != active {
            if let Some(p) = active {
                spans[p] = Some((start, i - 1));
            }
            if let Some(p) = cur_active {
                start = i;
            }
            active = cur_active;
        }
    }
    if let Some(p) = active {
        spans[p] = Some((start, node_path.len() - 1));
    }

    let mut resolved = Vec::with_capacity(spans.len());
    for span in spans {
        match span {
            Some((s, e)) if e > s => resolved.push((s, e)),
            _ => return None,
        }
    }

    Some(Captures {
        path,
        names: &terminal.placeholder_names,
        spans: resolved,
    })
}
