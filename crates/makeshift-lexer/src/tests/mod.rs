use pretty_assertions::assert_eq;

use crate::lexer::tokenize;
use crate::token::{Directive, LexerErrorKind, LineKind};

fn texts(data: &str) -> Vec<(usize, String)> {
    tokenize(data)
        .text_lines()
        .map(|line| (line.line_no, line.text.clone()))
        .collect()
}

#[test]
fn blank_lines_and_comments_are_skipped() {
    let input = r#"
# libavutil Makefile

NAME = avutil   # trailing comment

HEADERS = adler32.h
"#;

    assert_eq!(
        texts(input),
        vec![
            (4, "NAME = avutil".to_string()),
            (6, "HEADERS = adler32.h".to_string()),
        ]
    );
}

#[test]
fn continuations_are_joined_verbatim() {
    let input = "OBJS = a.o \\\n       b.o \\\n       c.o\nNEXT = 1\n";

    assert_eq!(
        texts(input),
        vec![
            (1, "OBJS = a.o        b.o        c.o".to_string()),
            (4, "NEXT = 1".to_string()),
        ]
    );
}

#[test]
fn comment_line_inside_continuation() {
    let input = "OBJS = a.o \\\n# dropped\n       b.o\n";

    assert_eq!(texts(input), vec![(1, "OBJS = a.o        b.o".to_string())]);
}

#[test]
fn continuation_at_end_of_input() {
    let lexed = tokenize("OBJS = a.o \\");

    assert_eq!(lexed.lines.len(), 1);
    assert_eq!(lexed.lines[0].text, "OBJS = a.o ");
    assert_eq!(
        lexed.errors[0].kind,
        LexerErrorKind::UnterminatedLineContinuation
    );
}

#[test]
fn crlf_input() {
    assert_eq!(
        texts("A = 1\r\nB = 2\r\n"),
        vec![(1, "A = 1".to_string()), (2, "B = 2".to_string())]
    );
}

#[test]
fn line_classification() {
    let input = r#"
include $(SUBDIR)../common.mak
ifdef CONFIG_SMALL
OBJS-$(CONFIG_FOO) += foo.o
else
OBJS += bar.o
endif
$(SUBDIR)x86/foo.o: CFLAGS += -O3
	$(CC) -c $<
"#;

    let kinds: Vec<_> = tokenize(input).lines.into_iter().map(|l| l.kind).collect();
    assert_eq!(
        kinds,
        vec![
            LineKind::Directive(Directive::Include),
            LineKind::Directive(Directive::Conditional),
            LineKind::Text,
            LineKind::Directive(Directive::Else),
            LineKind::Text,
            LineKind::Directive(Directive::EndIf),
            LineKind::Text,
            LineKind::Recipe,
        ]
    );
}

#[test]
fn define_blocks_are_opaque() {
    let input = r#"
define RULES
OBJS += hidden.o
endef
OBJS += visible.o
"#;

    let lexed = tokenize(input);
    assert_eq!(texts(input), vec![(5, "OBJS += visible.o".to_string())]);
    assert_eq!(lexed.lines[1].kind, LineKind::DefineBody);
    assert!(lexed.errors.is_empty());
}

#[test]
fn unterminated_define() {
    let lexed = tokenize("define X\nA = 1\n");

    assert_eq!(lexed.errors.len(), 1);
    assert_eq!(lexed.errors[0].kind, LexerErrorKind::UnterminatedDefine);
}
