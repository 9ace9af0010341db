//! Scanning of `$` sequences inside variable values.
//!
//! Only `$(NAME)` and `${NAME}` are references. `$$` is an escaped dollar sign. Every other use of
//! `$` (function calls such as `$(addprefix ...)`, substitution references like `$(OBJS:.o=.c)`,
//! automatic variables, an unterminated `$(`) is malformed and gets dropped by the resolver.

use std::ops::Range;

use once_cell::sync::Lazy;
use regex::Regex;

static REFERENCE_NAME_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9\-_]*$").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Run of text without any `$`
    Text(&'a str),
    EscapedDollar,
    /// Name of a referenced variable, without the surrounding `$(` `)`
    Reference(&'a str),
    Malformed(&'a str),
}

pub struct Segments<'a> {
    value: &'a str,
    pos: usize,
}

impl<'a> Iterator for Segments<'a> {
    type Item = (Range<usize>, Segment<'a>);

    fn next(&mut self) -> Option<Self::Item> {
        let rest = &self.value[self.pos..];
        if rest.is_empty() {
            return None;
        }

        let start = self.pos;
        let (len, segment) = scan_segment(rest);
        self.pos += len;

        Some((start..self.pos, segment))
    }
}

pub fn segments(value: &str) -> Segments<'_> {
    Segments { value, pos: 0 }
}

fn scan_segment(rest: &str) -> (usize, Segment<'_>) {
    if !rest.starts_with('$') {
        let len = rest.find('$').unwrap_or(rest.len());
        return (len, Segment::Text(&rest[..len]));
    }

    match rest[1..].chars().next() {
        Some('$') => (2, Segment::EscapedDollar),
        Some(open @ ('(' | '{')) => {
            let close = if open == '(' { ')' } else { '}' };
            match find_closing(&rest[2..], open, close) {
                Some(inner_len) => {
                    let len = inner_len + 3;
                    let inner = &rest[2..2 + inner_len];
                    if REFERENCE_NAME_REGEX.is_match(inner) {
                        (len, Segment::Reference(inner))
                    } else {
                        (len, Segment::Malformed(&rest[..len]))
                    }
                }
                None => (rest.len(), Segment::Malformed(rest)),
            }
        }
        Some(c) => {
            let len = 1 + c.len_utf8();
            (len, Segment::Malformed(&rest[..len]))
        }
        None => (1, Segment::Malformed(rest)),
    }
}

/// Byte offset of the bracket that closes an already opened one, honoring nesting.
fn find_closing(s: &str, open: char, close: char) -> Option<usize> {
    let mut depth = 0usize;
    for (i, c) in s.char_indices() {
        if c == open {
            depth += 1;
        } else if c == close {
            if depth == 0 {
                return Some(i);
            }
            depth -= 1;
        }
    }
    None
}

/// Whether a value has anything besides escaped dollars that needs looking at.
pub fn needs_interpolation(value: &str) -> bool {
    value.replace("$$", "").contains('$')
}

pub fn collapse_escaped_dollars(value: &str) -> String {
    value.replace("$$", "$")
}

pub fn escape_dollars(value: &str) -> String {
    value.replace('$', "$$")
}

/// Names referenced by a value, in order of appearance.
pub fn referenced_names(value: &str) -> impl Iterator<Item = &str> {
    segments(value).filter_map(|(_, segment)| match segment {
        Segment::Reference(name) => Some(name),
        _ => None,
    })
}

#[cfg(test)]
mod test {
    use super::{needs_interpolation, referenced_names, segments, Segment};
    use pretty_assertions::assert_eq;

    fn scan(value: &str) -> Vec<Segment<'_>> {
        segments(value).map(|(_, s)| s).collect()
    }

    #[test]
    fn references_in_both_bracket_styles() {
        assert_eq!(
            scan("x $(A) ${B-yes}y"),
            vec![
                Segment::Text("x "),
                Segment::Reference("A"),
                Segment::Text(" "),
                Segment::Reference("B-yes"),
                Segment::Text("y"),
            ]
        );
    }

    #[test]
    fn escaped_dollars() {
        assert_eq!(
            scan("$$(A)"),
            vec![Segment::EscapedDollar, Segment::Text("(A)")]
        );
        assert_eq!(
            scan("a$$$(B)"),
            vec![
                Segment::Text("a"),
                Segment::EscapedDollar,
                Segment::Reference("B"),
            ]
        );
        assert!(!needs_interpolation("cost: $$5"));
        assert!(!needs_interpolation("$$$$"));
        assert!(needs_interpolation("a$$$(B)"));
        assert!(needs_interpolation("$(B)"));
    }

    #[test]
    fn malformed() {
        assert_eq!(
            scan("$(addprefix x/, $(Y)) z"),
            vec![
                Segment::Malformed("$(addprefix x/, $(Y))"),
                Segment::Text(" z"),
            ]
        );
        assert_eq!(
            scan("$(OBJS:.o=.c)"),
            vec![Segment::Malformed("$(OBJS:.o=.c)")]
        );
        assert_eq!(scan("$(A"), vec![Segment::Malformed("$(A")]);
        assert_eq!(
            scan("$@ x"),
            vec![Segment::Malformed("$@"), Segment::Text(" x")]
        );
        assert_eq!(
            scan("x$"),
            vec![Segment::Text("x"), Segment::Malformed("$")]
        );
    }

    #[test]
    fn names() {
        let names: Vec<_> = referenced_names("$(A) $$(B) ${C} $(bad name)").collect();
        assert_eq!(names, vec!["A", "C"]);
    }

    #[test]
    fn spans_cover_input() {
        let value = "a $(B) $$ ${C}";
        let rebuilt: String = segments(value).map(|(range, _)| &value[range]).collect();
        assert_eq!(rebuilt, value);
    }
}
