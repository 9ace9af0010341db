//! Fixed text wrapped around the generated file lists.

use std::fmt::{self, Write};

use crate::manifest::LibrarySpec;

const BANNER: &str = r#"
-----------------------------------------------------------------------
----   Automatically generated by makeshift. Do not edit !         ----
-----------------------------------------------------------------------
"#;

/// Project declaration, build kind and the warning exemption, followed by the libraries to
/// link against when there are any.
pub fn project_header<W: Write>(out: &mut W, library: &LibrarySpec) -> fmt::Result {
    write!(
        out,
        r#"{BANNER}
project("{name}")
  uuid("{uuid}")
  kind("StaticLib")
  language("C")
  ffmpeg_common()

  filter("files:not {exempt}")
    warnings "Off"
  filter({{}})
"#,
        name = library.name,
        uuid = library.uuid,
        exempt = library.warnings_exempt,
    )?;

    if !library.links.is_empty() {
        writeln!(out, "  links({{")?;
        for link in &library.links {
            writeln!(out, "    \"{link}\",")?;
        }
        writeln!(out, "  }})")?;
    }

    Ok(())
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::project_header;
    use crate::manifest::LibrarySpec;

    #[test]
    fn header_with_links() {
        let mut out = String::new();
        let library = LibrarySpec::new("libavcodec", "9DB2830C-D326-48ED-B4CC-08EA6A1B7272")
            .with_links(["libavutil"]);
        project_header(&mut out, &library).unwrap();

        assert_eq!(
            out,
            r#"
-----------------------------------------------------------------------
----   Automatically generated by makeshift. Do not edit !         ----
-----------------------------------------------------------------------

project("libavcodec")
  uuid("9DB2830C-D326-48ED-B4CC-08EA6A1B7272")
  kind("StaticLib")
  language("C")
  ffmpeg_common()

  filter("files:not wmaprodec.c")
    warnings "Off"
  filter({})
  links({
    "libavutil",
  })
"#
        );
    }

    #[test]
    fn header_without_links() {
        let mut out = String::new();
        let library = LibrarySpec::new("libavutil", "19216035-F781-4F15-B009-213B7E3A18AC");
        project_header(&mut out, &library).unwrap();

        assert!(out.ends_with("    warnings \"Off\"\n  filter({})\n"));
        assert!(!out.contains("links"));
    }
}
