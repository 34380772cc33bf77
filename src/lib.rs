//! A byte-oriented, DFA-backed router for pattern-based HTTP-style dispatch.
//!
//! Registered patterns — literal bytes, `:name` placeholders, and a
//! trailing `*` wildcard — are compiled into a shared nondeterministic
//! match graph, determinized by subset construction, and flattened into a
//! single dense-edge automaton that matches every registered pattern in one
//! left-to-right pass over the input path. A second, cheap re-walk of the
//! same traversal recovers each matching pattern's placeholder captures as
//! byte ranges into the original input — no allocation, no UTF-8 decoding,
//! no backtracking.
//!
//! ```
//! use routeglyph::Router;
//!
//! let mut router = Router::create("");
//! router.add(b"/users/:id", "show_user").unwrap();
//! router.add(b"/users/me", "show_current_user").unwrap();
//!
//! router.match_path(b"/users/42", |_terminal, data, captures| {
//!     assert_eq!(*data, "show_user");
//!     assert_eq!(captures.get("id"), Some(b"42".as_slice()));
//!     true
//! });
//! ```
//!
//! # Module map
//!
//! - [`pattern`] parses the registration grammar.
//! - [`nfa`] compiles each pattern into the shared match graph.
//! - [`dfa`] determinizes it by subset construction.
//! - [`automaton`] is the compact, dense-edge representation used at match
//!   time.
//! - [`matcher`] walks the automaton and reconstructs placeholder captures.
//! - [`router`] is the façade most callers want: [`Router`].
//! - [`dispatch`] layers method filtering, prefix stripping, and the
//!   `HEAD → GET` fallback on top of `Router`, for callers building an
//!   actual HTTP dispatcher.
//!
//! # Non-goals
//!
//! This crate does not implement regular expressions (placeholders are
//! coarser than regex groups), URL percent-decoding, query string parsing,
//! or content negotiation, and it makes no guarantee that the compiled
//! automaton's size is proportional to the number or length of registered
//! patterns — like any DFA built by subset construction, it can blow up on
//! pathological inputs.

mod automaton;
mod dfa;
pub mod dispatch;
mod error;
mod matcher;
mod nfa;
mod pattern;
mod router;
mod terminal;

pub use dispatch::{Dispatcher, Method};
pub use error::{BuildError, PatternError, MAX_PLACEHOLDERS};
pub use matcher::Captures;
pub use router::Router;
