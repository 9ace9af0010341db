use std::path::Path;

use makeshift_lexer::{tokenize, LexerErrorKind, LineKind};

use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::errors::{VarsError, VarsResult};
use crate::variable_parser::{parse_statement, ParsedLine, Statement};

/// The assignments of one variable-definition source, independent of any configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Makefile {
    pub statements: Vec<Statement>,
}

impl Makefile {
    /// Parse Makefile text. Lines outside the supported subset are reported to `diagnostics` and
    /// otherwise ignored.
    pub fn parse<S: AsRef<str>>(text: S, diagnostics: &mut Diagnostics) -> Makefile {
        let lexed = tokenize(text.as_ref());
        let mut statements = vec![];

        for line in &lexed.lines {
            match line.kind {
                LineKind::Text => {}
                LineKind::Directive(directive) => {
                    diagnostics.push(
                        DiagnosticKind::UnsupportedDirective,
                        Some(line.line_no),
                        format!("skipping `{}` directive", directive.keyword()),
                    );
                    continue;
                }
                LineKind::Recipe | LineKind::DefineBody => continue,
            }

            match parse_statement(line.line_no, &line.text) {
                ParsedLine::Statement(statement) => statements.push(statement),
                ParsedLine::EmptyValue { var } => {
                    tracing::trace!(line = line.line_no, "ignoring empty assignment to {var}");
                }
                ParsedLine::Unrecognized => diagnostics.push(
                    DiagnosticKind::UnrecognizedLine,
                    Some(line.line_no),
                    format!("not an assignment: {}", line.text),
                ),
            }
        }

        for error in lexed.errors {
            let kind = match error.kind {
                LexerErrorKind::UnterminatedLineContinuation => {
                    DiagnosticKind::UnterminatedContinuation
                }
                LexerErrorKind::UnterminatedDefine => DiagnosticKind::UnterminatedDefine,
            };
            diagnostics.push(kind, Some(error.line_no), error.kind.to_string());
        }

        Makefile { statements }
    }

    pub fn from_path<P: AsRef<Path>>(
        path: P,
        diagnostics: &mut Diagnostics,
    ) -> VarsResult<Makefile> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| VarsError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Makefile::parse(text, diagnostics))
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}
