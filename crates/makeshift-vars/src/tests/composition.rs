use pretty_assertions::assert_eq;

use crate::evaluate::eval;
use crate::flags::Flags;
use crate::get_var;

#[test]
fn append_space_joins() {
    let d = eval(
        r#"
OBJS = a.o
OBJS += b.o
OBJS += c.o d.o
"#,
        &Flags::new(),
    );

    assert_eq!(get_var!(&d, "OBJS").unwrap(), "a.o b.o c.o d.o");
}

#[test]
fn append_without_prior_value() {
    let d = eval("OBJS += a.o", &Flags::new());
    assert_eq!(get_var!(&d, "OBJS").unwrap(), "a.o");
}

#[test]
fn assign_replaces() {
    let d = eval(
        r#"
OBJS = a.o
OBJS += b.o
OBJS = c.o
"#,
        &Flags::new(),
    );

    assert_eq!(get_var!(&d, "OBJS").unwrap(), "c.o");
}

#[test]
fn deferred_values_follow_literal_ones() {
    let d = eval(
        r#"
EXTRA = x.o
OBJS = $(EXTRA)
OBJS += a.o
OBJS += $(EXTRA:.o=.c) y.o
"#,
        &Flags::new(),
    );

    // `$(EXTRA)` and the malformed substitution reference are kept apart from `a.o`
    assert_eq!(get_var!(&d, "OBJS").unwrap(), "a.o x.o  y.o");
}

#[test]
fn deferred_assign_replaces_deferred_part_only() {
    let d = eval(
        r#"
B = b
C = c
A = a
A += $(B)
A = $(C)
"#,
        &Flags::new(),
    );

    assert_eq!(get_var!(&d, "A").unwrap(), "a c");
}

#[test]
fn empty_assignments_are_ignored() {
    let d = eval(
        r#"
OBJS = a.o
OBJS =
OBJS +=
"#,
        &Flags::new(),
    );

    assert_eq!(get_var!(&d, "OBJS").unwrap(), "a.o");
}

#[test]
fn values_are_trimmed() {
    let d = eval("OBJS =    a.o   b.o    ", &Flags::new());
    assert_eq!(get_var!(&d, "OBJS").unwrap(), "a.o   b.o");
    assert_eq!(d.words("OBJS"), vec!["a.o", "b.o"]);
    assert!(d.words("MISSING").is_empty());
}

#[test]
fn table_keeps_first_assignment_order() {
    let d = eval(
        r#"
C = $(A)
B = b
A = a
C += c
"#,
        &Flags::new(),
    );

    let keys: Vec<String> = d.keys().map(ToString::to_string).collect();
    assert_eq!(keys, vec!["C", "B", "A"]);
}

#[test]
fn continuation_lines() {
    let d = eval(
        "OBJS = a.o \\\n       b.o \\\n       c.o\n",
        &Flags::new(),
    );

    assert_eq!(d.words("OBJS"), vec!["a.o", "b.o", "c.o"]);
}
