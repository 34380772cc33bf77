//! Per-registration bookkeeping.
//!
//! A [`Terminal`] is what a registered pattern becomes once it has been
//! parsed: its original bytes (kept for diagnostics and for returning the
//! matched pattern to callers), the opaque payload the caller attached, the
//! ordered placeholder name list the pattern declared, and — filled in once
//! the automaton is compacted — the map from automaton node to placeholder
//! index used to drive the second "re-walk" in `matcher.rs`.

use std::collections::HashMap;

use crate::pattern::ParsedPattern;

pub(crate) struct Terminal<T> {
    pub(crate) pattern: Box<[u8]>,
    pub(crate) data: T,
    pub(crate) placeholder_names: Vec<Box<str>>,
    /// Populated by [`crate::automaton::compact`]: for every automaton node
    /// this terminal's tags pass through with an active placeholder, the
    /// index of that placeholder in `placeholder_names`.
    pub(crate) node_to_placeholder: HashMap<u32, usize>,
}

impl<T> Terminal<T> {
    pub(crate) fn new(pattern: Vec<u8>, data: T, parsed: ParsedPattern) -> Terminal<T> {
        Terminal {
            pattern: pattern.into_boxed_slice(),
            data,
            placeholder_names: parsed.placeholder_names,
            node_to_placeholder: HashMap::new(),
        }
    }

}
