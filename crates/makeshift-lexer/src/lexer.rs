use muncher::Muncher;
use phf::{self, phf_map};

use crate::token::{Directive, Lexed, LexerError, LexerErrorKind, LineKind, LogicalLine};

static MAKE_DIRECTIVES: phf::Map<&'static str, Directive> = phf_map! {
    "include" => Directive::Include,
    "-include" => Directive::Include,
    "sinclude" => Directive::Include,
    "ifeq" => Directive::Conditional,
    "ifneq" => Directive::Conditional,
    "ifdef" => Directive::Conditional,
    "ifndef" => Directive::Conditional,
    "else" => Directive::Else,
    "endif" => Directive::EndIf,
    "define" => Directive::Define,
    "endef" => Directive::EndDef,
    "export" => Directive::Export,
    "unexport" => Directive::Unexport,
    "override" => Directive::Override,
    "undefine" => Directive::Undefine,
    "vpath" => Directive::Vpath,
};

const ASSIGNMENT_OPERATORS: [&str; 5] = ["=", "+=", ":=", "?=", "!="];

/// What remains of a physical line once its comment is gone.
#[derive(Debug, PartialEq, Eq)]
enum Stripped {
    /// The line held nothing but a comment; it is dropped without ending a continuation
    CommentOnly,
    Text(String),
}

/// Remove a trailing `#` comment. `\#` stands for a literal `#` and does not start a comment.
fn strip_comment(line: &str) -> Stripped {
    let mut out = String::with_capacity(line.len());
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' if chars.peek() == Some(&'#') => {
                chars.next();
                out.push('#');
            }
            '#' => {
                if out.trim().is_empty() {
                    return Stripped::CommentOnly;
                }
                return Stripped::Text(out);
            }
            _ => out.push(c),
        }
    }

    Stripped::Text(out)
}

fn first_word(text: &str) -> &str {
    text.split(|c: char| c.is_whitespace() || c == '(')
        .next()
        .unwrap_or_default()
}

/// A directive keyword only counts when it isn't itself the target of an assignment, e.g.
/// `export = 1` assigns a variable called `export`.
fn scan_directive(text: &str) -> Option<Directive> {
    let word = first_word(text);
    let directive = *MAKE_DIRECTIVES.get(word)?;

    let rest = text[word.len()..].trim_start();
    if ASSIGNMENT_OPERATORS.iter().any(|op| rest.starts_with(op)) {
        return None;
    }

    Some(directive)
}

pub struct MakefileLexer<'input> {
    muncher: Muncher<'input>,
    /// Number of physical lines consumed so far
    line_no: usize,
    define_depth: usize,
    errors: Vec<LexerError>,
    done: bool,
}

impl<'input> MakefileLexer<'input> {
    pub fn new(input: &'input str) -> MakefileLexer<'input> {
        MakefileLexer {
            muncher: Muncher::new(input),
            line_no: 0,
            define_depth: 0,
            errors: vec![],
            done: false,
        }
    }

    pub fn errors(&self) -> &[LexerError] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<LexerError> {
        self.errors
    }

    fn next_physical_line(&mut self) -> Option<String> {
        let mut line = String::new();
        let mut saw_any = false;

        while let Some(c) = self.muncher.eat() {
            saw_any = true;
            if c == '\n' {
                break;
            }
            line.push(c);
        }

        if !saw_any {
            return None;
        }

        self.line_no += 1;
        Some(line)
    }

    /// Join continuations and skip blank and comment-only lines. Returns the starting line number
    /// along with the joined text.
    fn next_joined_line(&mut self) -> Option<(usize, String)> {
        let mut buildup: Option<(usize, String)> = None;

        loop {
            let Some(raw) = self.next_physical_line() else {
                if let Some((start, text)) = buildup {
                    self.errors.push(LexerError {
                        line_no: self.line_no,
                        kind: LexerErrorKind::UnterminatedLineContinuation,
                    });
                    return Some((start, text));
                }
                return None;
            };

            let text = match strip_comment(&raw) {
                Stripped::CommentOnly => continue,
                Stripped::Text(text) => text,
            };

            let (start, mut line) = match buildup.take() {
                Some((start, mut joined)) => {
                    joined.push_str(&text);
                    (start, joined)
                }
                None => (self.line_no, text),
            };

            line.truncate(line.trim_end().len());
            if line.is_empty() {
                continue;
            }

            if line.ends_with('\\') {
                line.pop();
                buildup = Some((start, line));
                continue;
            }

            return Some((start, line));
        }
    }

    fn classify(&mut self, text: &str) -> LineKind {
        let directive = scan_directive(text);

        if self.define_depth > 0 {
            match directive {
                Some(Directive::EndDef) => {
                    self.define_depth -= 1;
                    return LineKind::Directive(Directive::EndDef);
                }
                Some(Directive::Define) => self.define_depth += 1,
                _ => {}
            }
            return LineKind::DefineBody;
        }

        if text.starts_with('\t') {
            return LineKind::Recipe;
        }

        match directive {
            Some(directive) => {
                if directive == Directive::Define {
                    self.define_depth += 1;
                }
                LineKind::Directive(directive)
            }
            None => LineKind::Text,
        }
    }
}

impl Iterator for MakefileLexer<'_> {
    type Item = LogicalLine;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match self.next_joined_line() {
            Some((line_no, text)) => {
                let kind = self.classify(&text);
                Some(LogicalLine {
                    line_no,
                    kind,
                    text,
                })
            }
            None => {
                self.done = true;
                if self.define_depth > 0 {
                    self.errors.push(LexerError {
                        line_no: self.line_no,
                        kind: LexerErrorKind::UnterminatedDefine,
                    });
                }
                None
            }
        }
    }
}

pub fn tokenize(data: &str) -> Lexed {
    let mut lexer = MakefileLexer::new(data);
    let lines: Vec<LogicalLine> = lexer.by_ref().collect();

    Lexed {
        lines,
        errors: lexer.into_errors(),
    }
}

#[cfg(test)]
mod test {
    use super::{scan_directive, strip_comment, Stripped};
    use crate::token::Directive;

    #[test]
    fn comments() {
        assert_eq!(strip_comment("A = b # c"), Stripped::Text("A = b ".into()));
        assert_eq!(strip_comment("   # only"), Stripped::CommentOnly);
        assert_eq!(
            strip_comment(r"A = \#not # yes"),
            Stripped::Text("A = #not ".into())
        );
        assert_eq!(strip_comment("A = b"), Stripped::Text("A = b".into()));
    }

    #[test]
    fn directives() {
        assert_eq!(scan_directive("include $(SRC)/common.mak"), Some(Directive::Include));
        assert_eq!(scan_directive("-include foo.d"), Some(Directive::Include));
        assert_eq!(scan_directive("ifeq ($(A),b)"), Some(Directive::Conditional));
        assert_eq!(scan_directive("ifeq($(A),b)"), Some(Directive::Conditional));
        assert_eq!(scan_directive("endif"), Some(Directive::EndIf));
        assert_eq!(scan_directive("export = 1"), None);
        assert_eq!(scan_directive("include += x"), None);
        assert_eq!(scan_directive("OBJS = include"), None);
        assert_eq!(scan_directive("includes = a"), None);
    }
}
