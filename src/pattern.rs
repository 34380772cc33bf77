//! Pattern grammar.
//!
//! ```text
//! pattern  := segment (segment)*
//! segment  := literal-byte | ':' name | '*'
//! name     := one or more bytes, terminated by '/' or end-of-pattern
//! ```
//!
//! A literal `:` or `*` can only occur at those syntactic positions; there is
//! no escape mechanism, and unknown constructs are registration errors.
//!
//! ## Name termination
//! Taken literally, "terminated by `/` or end-of-pattern" would make
//! `:a:b` parse as a single placeholder named `a:b` — but the invariant that
//! two adjacent placeholders are rejected only makes sense if a name also
//! ends at the next `:` or `*`. This parser terminates a name on `/`, `:`,
//! `*`, or end of pattern, and then reports [`PatternError::AdjacentPlaceholders`]
//! when a placeholder or wildcard segment immediately follows another with
//! no literal byte between them.

use crate::error::{PatternError, MAX_PLACEHOLDERS};

/// One parsed segment of a pattern, in left-to-right order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Segment {
    Literal(u8),
    /// Index into the pattern's placeholder name list.
    Placeholder(usize),
    /// Always the final segment, if present.
    Wildcard,
}

/// A pattern parsed into segments, plus the ordered list of placeholder
/// names it declares (in the order they appear).
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct ParsedPattern {
    pub(crate) segments: Vec<Segment>,
    pub(crate) placeholder_names: Vec<Box<str>>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum LastKind {
    None,
    Literal,
    Placeholder,
    Wildcard,
}

/// Parses a registered pattern, enforcing every invariant in the grammar.
pub(crate) fn parse(pattern: &[u8]) -> Result<ParsedPattern, PatternError> {
    if pattern.is_empty() {
        return Err(PatternError::EmptyPattern);
    }

    let mut segments = Vec::with_capacity(pattern.len());
    let mut placeholder_names: Vec<Box<str>> = Vec::new();
    let mut last = LastKind::None;
    let mut i = 0;

    while i < pattern.len() {
        match pattern[i] {
            b':' => {
                if matches!(last, LastKind::Placeholder | LastKind::Wildcard) {
                    return Err(PatternError::AdjacentPlaceholders);
                }
                let name_start = i + 1;
                let mut j = name_start;
                while j < pattern.len()
                    && !matches!(pattern[j], b'/' | b':' | b'*')
                {
                    j += 1;
                }
                if j == name_start {
                    return Err(PatternError::EmptyPlaceholderName);
                }
                let name = String::from_utf8_lossy(&pattern[name_start..j]).into_owned();
                if placeholder_names.iter().any(|n| n.as_ref() == name) {
                    return Err(PatternError::DuplicateName(name.into_boxed_str()));
                }
                if placeholder_names.len() >= MAX_PLACEHOLDERS {
                    return Err(PatternError::TooManyPlaceholders);
                }
                placeholder_names.push(name.into_boxed_str());
                segments.push(Segment::Placeholder(placeholder_names.len() - 1));
                last = LastKind::Placeholder;
                i = j;
            }
            b'*' => {
                if matches!(last, LastKind::Placeholder | LastKind::Wildcard) {
                    return Err(PatternError::AdjacentPlaceholders);
                }
                if i + 1 != pattern.len() {
                    return Err(PatternError::WildcardNotFinal);
                }
                segments.push(Segment::Wildcard);
                last = LastKind::Wildcard;
                i += 1;
            }
            b => {
                segments.push(Segment::Literal(b));
                last = LastKind::Literal;
                i += 1;
            }
        }
    }

    Ok(ParsedPattern {
        segments,
        placeholder_names,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(p: &ParsedPattern) -> Vec<&str> {
        p.placeholder_names.iter().map(|n| n.as_ref()).collect()
    }

    #[test]
    fn literal_only() {
        let p = parse(b"/test").unwrap();
        assert!(names(&p).is_empty());
        assert_eq!(p.segments.len(), 5);
    }

    #[test]
    fn single_placeholder() {
        let p = parse(b"/a/:test").unwrap();
        assert_eq!(names(&p), vec!["test"]);
        assert_eq!(p.segments.last(), Some(&Segment::Placeholder(0)));
    }

    #[test]
    fn trailing_wildcard() {
        let p = parse(b"foo/*").unwrap();
        assert_eq!(p.segments.last(), Some(&Segment::Wildcard));
    }

    #[test]
    fn wildcard_not_final_is_rejected() {
        assert_eq!(parse(b"foo/*/bar"), Err(PatternError::WildcardNotFinal));
    }

    #[test]
    fn empty_pattern_is_rejected() {
        assert_eq!(parse(b""), Err(PatternError::EmptyPattern));
    }

    #[test]
    fn empty_placeholder_name_is_rejected() {
        assert_eq!(parse(b"/a/:/b"), Err(PatternError::EmptyPlaceholderName));
        assert_eq!(parse(b"/a/:"), Err(PatternError::EmptyPlaceholderName));
    }

    #[test]
    fn adjacent_placeholders_are_rejected() {
        assert_eq!(parse(b":a:b"), Err(PatternError::AdjacentPlaceholders));
    }

    #[test]
    fn placeholder_adjacent_to_wildcard_is_rejected() {
        assert_eq!(parse(b":a*"), Err(PatternError::AdjacentPlaceholders));
    }

    #[test]
    fn duplicate_names_are_rejected() {
        assert_eq!(
            parse(b"/:a/:a"),
            Err(PatternError::DuplicateName("a".into()))
        );
    }

    #[test]
    fn too_many_placeholders_is_rejected() {
        let mut pattern = String::new();
        for i in 0..MAX_PLACEHOLDERS + 1 {
            pattern.push_str(&format!("/:v{i}"));
        }
        assert_eq!(
            parse(pattern.as_bytes()),
            Err(PatternError::TooManyPlaceholders)
        );
    }

    #[test]
    fn exactly_max_placeholders_is_allowed() {
        let mut pattern = String::new();
        for i in 0..MAX_PLACEHOLDERS {
            pattern.push_str(&format!("/:v{i}"));
        }
        assert!(parse(pattern.as_bytes()).is_ok());
    }

    #[test]
    fn multi_segment_pattern() {
        let p = parse(b":v1/:v2").unwrap();
        assert_eq!(names(&p), vec!["v1", "v2"]);
    }
}
