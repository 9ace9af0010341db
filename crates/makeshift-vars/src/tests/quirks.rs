use pretty_assertions::assert_eq;

use crate::diagnostics::{DiagnosticKind, Severity};
use crate::environment::EmptyEnvironment;
use crate::flags::Flags;
use crate::get_var;
use crate::tests::eval_with;

// Constructs outside the supported subset must not disturb the assignments around them.
#[test_log::test]
fn unsupported_lines_are_skipped() {
    let (d, diagnostics) = eval_with(
        r#"
include $(SUBDIR)../Makefile
NAME = avcodec

ifdef CONFIG_SHARED
SHARED = 1
else
SHARED = 0
endif

define RULES
OBJS = not-an-assignment.o
endef

$(SUBDIR)x86/a.o: CFLAGS += -O3
clean::
	$(RM) $(CLEANSUFFIXES)
CC := gcc
OBJS = a.o
"#,
        &Flags::new(),
        &EmptyEnvironment,
    );

    assert_eq!(get_var!(&d, "NAME").unwrap(), "avcodec");
    // Both branches are read, the later one wins
    assert_eq!(get_var!(&d, "SHARED").unwrap(), "0");
    assert_eq!(get_var!(&d, "OBJS").unwrap(), "a.o");
    assert_eq!(get_var!(&d, "CC"), None);

    // include, ifdef, else, endif, define, endef
    assert_eq!(diagnostics.count(DiagnosticKind::UnsupportedDirective), 6);
    // the rule with a target-specific variable, `clean::` and `CC :=`
    assert_eq!(diagnostics.count(DiagnosticKind::UnrecognizedLine), 3);
    assert!(!diagnostics.has_severity(Severity::Warning));
}

#[test_log::test]
fn comments_and_escaped_hashes() {
    let (d, _) = eval_with(
        r#"
# leading comment
OBJS = a.o # trailing comment
OBJS += \
# comment-only lines inside a continuation are dropped
        b.o
HASH = \#define
"#,
        &Flags::new(),
        &EmptyEnvironment,
    );

    assert_eq!(get_var!(&d, "OBJS").unwrap(), "a.o b.o");
    assert_eq!(get_var!(&d, "HASH").unwrap(), "#define");
}

#[test_log::test]
fn unterminated_continuation_is_kept() {
    let (d, diagnostics) = eval_with("OBJS = a.o \\", &Flags::new(), &EmptyEnvironment);

    assert_eq!(get_var!(&d, "OBJS").unwrap(), "a.o");
    assert_eq!(
        diagnostics.count(DiagnosticKind::UnterminatedContinuation),
        1
    );
}
