use once_cell::sync::Lazy;
use regex::Regex;

use crate::flags::Flags;
use crate::key::{Polarity, VariableKey};

static ASSIGNMENT_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([a-zA-Z][a-zA-Z0-9\-_]*)\s*(\+?)=\s*(.*)$").unwrap());

static CONDITIONAL_ASSIGNMENT_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([a-zA-Z][a-zA-Z0-9\-_]*)-\$\(([a-zA-Z][a-zA-Z0-9\-_]*)\)\s*(\+?)=\s*(.*)$")
        .unwrap()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssignOperator {
    /// `=`
    Assign,
    /// `+=`
    Append,
}

impl AssignOperator {
    fn from_plus(plus: &str) -> Self {
        if plus.is_empty() {
            AssignOperator::Assign
        } else {
            AssignOperator::Append
        }
    }
}

/// Left-hand side of an assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableExpression {
    pub var_base: String,
    pub kind: VariableExpressionKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VariableExpressionKind {
    /// e.g. OBJS = a.o
    ///      OBJS-yes += a.o
    Plain,
    /// e.g. OBJS-$(CONFIG_FOO) += foo.o
    Gated { flag: String },
}

impl VariableExpression {
    pub fn plain<S: Into<String>>(var_base: S) -> Self {
        VariableExpression {
            var_base: var_base.into(),
            kind: VariableExpressionKind::Plain,
        }
    }

    pub fn gated<S: Into<String>, F: Into<String>>(var_base: S, flag: F) -> Self {
        VariableExpression {
            var_base: var_base.into(),
            kind: VariableExpressionKind::Gated { flag: flag.into() },
        }
    }

    pub fn gating_flag(&self) -> Option<&str> {
        match &self.kind {
            VariableExpressionKind::Plain => None,
            VariableExpressionKind::Gated { flag } => Some(flag),
        }
    }

    /// Table entry this expression assigns to under the given flags.
    pub fn key(&self, flags: &Flags) -> VariableKey {
        match &self.kind {
            VariableExpressionKind::Plain => VariableKey::parse(&self.var_base),
            VariableExpressionKind::Gated { flag } => VariableKey::conditional(
                self.var_base.clone(),
                Polarity::from_enabled(flags.is_enabled(flag)),
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub line_no: usize,
    pub lhs: VariableExpression,
    pub operator: AssignOperator,
    /// Assigned value with surrounding whitespace removed
    pub rhs: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedLine {
    Statement(Statement),
    /// An assignment without a value; these are ignored
    EmptyValue { var: String },
    Unrecognized,
}

pub fn parse_statement(line_no: usize, line: &str) -> ParsedLine {
    let (lhs, plus, value) = if let Some(caps) = ASSIGNMENT_REGEX.captures(line) {
        (VariableExpression::plain(&caps[1]), caps[2].to_string(), caps[3].to_string())
    } else if let Some(caps) = CONDITIONAL_ASSIGNMENT_REGEX.captures(line) {
        (
            VariableExpression::gated(&caps[1], &caps[2]),
            caps[3].to_string(),
            caps[4].to_string(),
        )
    } else {
        return ParsedLine::Unrecognized;
    };

    let rhs = value.trim();
    if rhs.is_empty() {
        return ParsedLine::EmptyValue { var: lhs.var_base };
    }

    ParsedLine::Statement(Statement {
        line_no,
        lhs,
        operator: AssignOperator::from_plus(&plus),
        rhs: rhs.to_string(),
    })
}
