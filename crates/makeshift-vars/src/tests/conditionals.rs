use pretty_assertions::assert_eq;

use crate::evaluate::eval;
use crate::flags::{FlagValue, Flags};
use crate::get_var;

const NEON: &str = r#"
OBJS = base.o
OBJS-$(HAVE_NEON) += neon.o
"#;

#[test]
fn truthy_flag_selects_yes() {
    let flags: Flags = [("HAVE_NEON", FlagValue::Int(1))].into_iter().collect();
    let d = eval(NEON, &flags);

    assert_eq!(get_var!(&d, "OBJS-yes").unwrap(), "neon.o");
    assert_eq!(get_var!(&d, "OBJS-no"), None);
    assert_eq!(get_var!(&d, "OBJS", &flags, "HAVE_NEON").unwrap(), "neon.o");
    assert_eq!(get_var!(&d, "OBJS").unwrap(), "base.o");
}

#[test]
fn falsy_flag_selects_no() {
    let flags: Flags = [("HAVE_NEON", FlagValue::Int(0))].into_iter().collect();
    let d = eval(NEON, &flags);

    assert_eq!(get_var!(&d, "OBJS-no").unwrap(), "neon.o");
    assert_eq!(get_var!(&d, "OBJS-yes"), None);
}

#[test]
fn absent_flag_selects_no() {
    let d = eval(NEON, &Flags::new());

    assert_eq!(get_var!(&d, "OBJS-no").unwrap(), "neon.o");
    assert_eq!(get_var!(&d, "OBJS-yes"), None);
}

#[test]
fn string_flags() {
    let flags: Flags = [
        ("ON", FlagValue::Str("x".into())),
        ("OFF", FlagValue::Str(String::new())),
    ]
    .into_iter()
    .collect();

    let d = eval(
        r#"
A-$(ON) = on
B-$(OFF) = off
"#,
        &flags,
    );

    assert_eq!(get_var!(&d, "A-yes").unwrap(), "on");
    assert_eq!(get_var!(&d, "B-no").unwrap(), "off");
}

#[test]
fn literal_and_conditional_forms_share_an_entry() {
    let flags: Flags = [("CONFIG_A", 1i64), ("CONFIG_B", 1i64)].into_iter().collect();

    let d = eval(
        r#"
OBJS-yes = x.o
OBJS-$(CONFIG_A) += a.o
OBJS-$(CONFIG_B) += b.o
OBJS-$(CONFIG_C) += c.o
"#,
        &flags,
    );

    assert_eq!(get_var!(&d, "OBJS-yes").unwrap(), "x.o a.o b.o");
    assert_eq!(get_var!(&d, "OBJS-no").unwrap(), "c.o");
}

#[test]
fn stacked_conditionals() {
    let flags: Flags = [("HAVE_NEON", 1i64), ("CONFIG_FFT", 1i64)].into_iter().collect();

    let d = eval(
        r#"
NEON-OBJS-$(CONFIG_FFT) += fft_neon.o
NEON-OBJS += common_neon.o
"#,
        &flags,
    );

    assert_eq!(get_var!(&d, "NEON-OBJS").unwrap(), "common_neon.o");
    assert_eq!(get_var!(&d, "NEON-OBJS-yes").unwrap(), "fft_neon.o");
}
