use thiserror::Error;

#[derive(PartialEq, Eq, Debug, Clone)]
pub struct LogicalLine {
    /// 1-based number of the first physical line this logical line was built from
    pub line_no: usize,
    pub kind: LineKind,
    /// Line contents with comments removed and continuations joined
    pub text: String,
}

impl LogicalLine {
    pub fn is_text(&self) -> bool {
        self.kind.is_text()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineKind {
    /// Anything that may be a variable assignment
    Text,
    /// A tab-indented command belonging to a rule
    Recipe,
    Directive(Directive),
    /// Lines between `define` and `endef`
    DefineBody,
}

impl LineKind {
    pub fn is_text(&self) -> bool {
        matches!(self, LineKind::Text)
    }

    pub fn is_directive(&self) -> bool {
        matches!(self, LineKind::Directive(_))
    }
}

/// Make directives. None of them are interpreted; they are recognized so they can be skipped
/// with a precise diagnostic instead of being mistaken for malformed assignments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Directive {
    Include,
    Conditional,
    Else,
    EndIf,
    Define,
    EndDef,
    Export,
    Unexport,
    Override,
    Undefine,
    Vpath,
}

impl Directive {
    pub fn keyword(&self) -> &'static str {
        match self {
            Directive::Include => "include",
            Directive::Conditional => "if",
            Directive::Else => "else",
            Directive::EndIf => "endif",
            Directive::Define => "define",
            Directive::EndDef => "endef",
            Directive::Export => "export",
            Directive::Unexport => "unexport",
            Directive::Override => "override",
            Directive::Undefine => "undefine",
            Directive::Vpath => "vpath",
        }
    }
}

/// Result of reading a whole input.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Lexed {
    pub lines: Vec<LogicalLine>,
    pub errors: Vec<LexerError>,
}

impl Lexed {
    pub fn text_lines(&self) -> impl Iterator<Item = &LogicalLine> {
        self.lines.iter().filter(|line| line.is_text())
    }
}

#[derive(Error, Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[error("line {line_no}: {kind}")]
pub struct LexerError {
    pub line_no: usize,
    pub kind: LexerErrorKind,
}

#[derive(Error, Debug, Eq, PartialEq, Copy, Clone, Hash)]
pub enum LexerErrorKind {
    #[error("continuation line immediately precedes end-of-file")]
    UnterminatedLineContinuation,
    #[error("`define` without matching `endef`")]
    UnterminatedDefine,
}
