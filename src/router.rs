//! The router façade: the four operations a caller actually touches, built
//! on top of the pattern compiler, determinizer, compaction, and matcher
//! modules.
//!
//! `Router<T>` owns the NFA builder, the terminal list, and the compact
//! automaton (absent until the first build). Registration only ever touches
//! the NFA and terminal list and marks the automaton stale; `match_path`
//! rebuilds lazily the first time it is needed. `T` is deliberately opaque —
//! a caller that wants method filtering, `HEAD → GET` fallback, or prefix
//! stripping reaches for [`crate::dispatch`] instead of teaching this type
//! about HTTP.

use crate::automaton::{self, Automaton};
use crate::dfa;
use crate::error::PatternError;
use crate::matcher::{self, Captures};
use crate::nfa::Nfa;
use crate::pattern;
use crate::terminal::Terminal;

/// A compiled router over byte patterns, each carrying an opaque `T`.
pub struct Router<T> {
    prefix: Box<[u8]>,
    nfa: Nfa,
    terminals: Vec<Terminal<T>>,
    automaton: Option<Automaton>,
}

impl<T> Router<T> {
    /// Creates a fresh, empty router. `prefix` is not matched against —
    /// callers who strip a mount prefix before calling [`Router::match_path`]
    /// (as [`crate::dispatch`] does) read it back with [`Router::prefix`].
    pub fn create(prefix: impl AsRef<[u8]>) -> Router<T> {
        Router {
            prefix: prefix.as_ref().to_vec().into_boxed_slice(),
            nfa: Nfa::new(),
            terminals: Vec::new(),
            automaton: None,
        }
    }

    pub fn prefix(&self) -> &[u8] {
        &self.prefix
    }

    pub fn is_empty(&self) -> bool {
        self.terminals.is_empty()
    }

    pub fn len(&self) -> usize {
        self.terminals.len()
    }

    /// The original registered pattern bytes for a terminal index, as
    /// returned to the visitor by [`Router::match_path`]. Useful for
    /// diagnostics (e.g. logging which pattern matched).
    pub fn pattern(&self, terminal_index: usize) -> &[u8] {
        &self.terminals[terminal_index].pattern
    }

    /// Registers `pattern` with associated `data`. Rejects malformed
    /// patterns without touching the existing router state. Marks the
    /// automaton stale; the next [`Router::match_path`] or explicit
    /// [`Router::rebuild`] recompiles it.
    pub fn add(&mut self, pattern: &[u8], data: T) -> Result<&mut Self, PatternError> {
        let parsed = pattern::parse(pattern)?;
        let terminal_index = self.terminals.len();
        self.nfa
            .compile(&parsed, terminal_index)
            .unwrap_or_else(|e| e.abort());
        log::debug!(
            "router: registered terminal #{terminal_index} for pattern `{}`",
            String::from_utf8_lossy(pattern)
        );
        self.terminals
            .push(Terminal::new(pattern.to_vec(), data, parsed));
        self.automaton = None;
        Ok(self)
    }

    /// Forces eager (re)compilation: determinize the NFA, then compact it.
    /// A no-op on terminal count is fine to call repeatedly; two consecutive
    /// calls with no registrations between them produce behaviorally
    /// identical automata.
    pub fn rebuild(&mut self) {
        let dfa = dfa::build(&self.nfa).unwrap_or_else(|e| e.abort());
        log::debug!(
            "router: rebuilt automaton ({} terminals, {} dfa nodes)",
            self.terminals.len(),
            dfa.nodes.len()
        );
        self.automaton = Some(automaton::compact(&dfa, &mut self.terminals));
    }

    /// Rebuilds if stale, then walks `path` through the automaton, invoking
    /// `visit(terminal_index, data, captures)` for each matching terminal in
    /// registration order until one call returns `true`. Returns whether any
    /// call did.
    pub fn match_path<'r, 't>(
        &'r mut self,
        path: &'t [u8],
        mut visit: impl FnMut(usize, &'r T, &Captures<'r, 't>) -> bool,
    ) -> bool {
        if self.automaton.is_none() {
            self.rebuild();
        }
        let automaton = self.automaton.as_ref().expect("just rebuilt above");
        let terminals = &self.terminals;
        matcher::find(automaton, terminals, path, |idx, caps| {
            visit(idx, &terminals[idx].data, caps)
        })
    }
}
