mod composition;
mod conditionals;
mod quirks;

use crate::diagnostics::Diagnostics;
use crate::flags::Flags;
use crate::makefile::Makefile;
use crate::table::VariableTable;
use crate::evaluate::resolve;
use crate::environment::Environment;

/// Evaluate `data` and also hand back the diagnostics it produced.
fn eval_with<E: Environment>(data: &str, flags: &Flags, env: &E) -> (VariableTable, Diagnostics) {
    let mut diagnostics = Diagnostics::new();
    let makefile = Makefile::parse(data, &mut diagnostics);
    let table = resolve(&makefile, flags, env, &mut diagnostics);
    (table, diagnostics)
}
