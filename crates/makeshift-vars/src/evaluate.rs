use crate::diagnostics::Diagnostics;
use crate::environment::{EmptyEnvironment, Environment};
use crate::flags::Flags;
use crate::makefile::Makefile;
use crate::resolver::TableBuilder;
use crate::table::VariableTable;
use crate::variable_parser::Statement;

/// Parse and resolve Makefile text without an environment, discarding diagnostics.
pub fn eval<D: AsRef<str>>(data: D, flags: &Flags) -> VariableTable {
    let mut diagnostics = Diagnostics::new();
    let makefile = Makefile::parse(data, &mut diagnostics);
    resolve(&makefile, flags, &EmptyEnvironment, &mut diagnostics)
}

/// Evaluate an already parsed Makefile under one configuration's flags.
pub fn resolve<E: Environment + ?Sized>(
    makefile: &Makefile,
    flags: &Flags,
    env: &E,
    diagnostics: &mut Diagnostics,
) -> VariableTable {
    let mut builder = TableBuilder::new();
    makefile.evaluate(&mut builder, flags);
    builder.resolve(env, diagnostics)
}

pub trait Evaluate {
    fn evaluate(&self, builder: &mut TableBuilder, flags: &Flags);
}

impl Evaluate for Makefile {
    fn evaluate(&self, builder: &mut TableBuilder, flags: &Flags) {
        for statement in &self.statements {
            statement.evaluate(builder, flags);
        }
    }
}

impl Evaluate for Statement {
    fn evaluate(&self, builder: &mut TableBuilder, flags: &Flags) {
        builder.assign(self.lhs.key(flags), self.operator, &self.rhs, self.line_no);
    }
}
