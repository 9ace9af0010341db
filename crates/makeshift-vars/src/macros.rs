/// Look up a variable in a [`VariableTable`](crate::table::VariableTable) by its Makefile name.
///
/// `get_var!(&table, "OBJS")` is `table.get_var("OBJS")`; a flag map can be given to pick the
/// side of a conditional variable, e.g. `get_var!(&table, "OBJS", &flags, "HAVE_NEON")` reads
/// `OBJS-yes` or `OBJS-no` depending on `HAVE_NEON`.
#[macro_export]
macro_rules! get_var {
    ($table:expr, $name:expr) => {
        $table.get_var($name)
    };
    ($table:expr, $base:expr, $flags:expr, $flag:expr) => {
        $table.get(&$crate::key::VariableKey::conditional(
            $base,
            $crate::key::Polarity::from_enabled($flags.is_enabled($flag)),
        ))
    };
}
