use std::fmt;

/// The maximum number of distinct placeholders a single pattern may contain.
///
/// See the "Capacity exceeded" error kind.
pub const MAX_PLACEHOLDERS: usize = 64;

/// An error produced while registering a pattern.
///
/// All of these are detected purely from the pattern text, before any NFA
/// state is touched; a rejected registration leaves the router's terminal
/// list and automaton exactly as they were.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PatternError {
    /// The pattern was the empty string.
    EmptyPattern,
    /// A `:` was not followed by at least one name byte before the next `/`,
    /// `:`, `*`, or end of pattern.
    EmptyPlaceholderName,
    /// A `*` appeared somewhere other than as the pattern's final byte.
    WildcardNotFinal,
    /// Two placeholders, or a placeholder and a wildcard, were adjacent with
    /// no literal byte separating them.
    AdjacentPlaceholders,
    /// The same placeholder name was used twice within one pattern.
    DuplicateName(Box<str>),
    /// More than [`MAX_PLACEHOLDERS`] placeholders were present.
    TooManyPlaceholders,
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternError::EmptyPattern => write!(f, "pattern must not be empty"),
            PatternError::EmptyPlaceholderName => {
                write!(f, "placeholder `:` must be followed by a name")
            }
            PatternError::WildcardNotFinal => {
                write!(f, "`*` may only appear as the final byte of a pattern")
            }
            PatternError::AdjacentPlaceholders => write!(
                f,
                "two placeholders, or a placeholder and `*`, may not be adjacent"
            ),
            PatternError::DuplicateName(name) => {
                write!(f, "placeholder name `{name}` used more than once in one pattern")
            }
            PatternError::TooManyPlaceholders => {
                write!(f, "pattern has more than {MAX_PLACEHOLDERS} placeholders")
            }
        }
    }
}

impl std::error::Error for PatternError {}

/// An error produced while building (determinizing and compacting) the
/// automaton.
///
/// Unlike [`PatternError`], these do not correspond to invalid user input:
/// every `BuildError` indicates that two already-accepted registrations
/// disagree about the automaton in a way the compiler's own invariants
/// should have prevented. Per the design, this is a programmer error in the
/// implementation, not a condition callers are expected to recover from; see
/// [`BuildError::abort`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuildError {
    message: Box<str>,
}

impl BuildError {
    pub(crate) fn conflicting_placeholder(
        terminal: usize,
        existing: &str,
        new: &str,
    ) -> BuildError {
        BuildError {
            message: format!(
                "terminal {terminal} reaches one DFA state with two different \
                 active placeholders (`{existing}` and `{new}`); this indicates \
                 a bug in the NFA compiler or determinizer, not a malformed pattern"
            )
            .into_boxed_str(),
        }
    }

    /// Aborts the process with this error as a diagnostic.
    ///
    /// Called at the one place a conflict can be detected (determinization);
    /// the design treats this as unrecoverable, matching a corrupted
    /// compiler invariant rather than bad user input.
    pub(crate) fn abort(&self) -> ! {
        panic!("{self}")
    }
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for BuildError {}
