//! Maps object file names back to the sources they are compiled from.

use std::path::{Path, PathBuf};

use makeshift_vars::{DiagnosticKind, Diagnostics};

pub const OBJECT_SUFFIX: &str = ".o";

/// Source extensions in the order the build system prefers them.
pub const SOURCE_EXTENSIONS: [&str; 6] = [".c", ".cpp", ".m", ".S", ".asm", ".rc"];

/// Answers whether a file exists, relative to a library directory.
pub trait SourceProbe {
    fn exists(&self, relative: &str) -> bool;
}

#[derive(Debug, Clone)]
pub struct FsProbe {
    root: PathBuf,
}

impl FsProbe {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        FsProbe { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl SourceProbe for FsProbe {
    fn exists(&self, relative: &str) -> bool {
        self.root.join(relative).is_file()
    }
}

impl<F: Fn(&str) -> bool> SourceProbe for F {
    fn exists(&self, relative: &str) -> bool {
        self(relative)
    }
}

pub struct ExtensionResolver<P> {
    probe: P,
}

impl<P: SourceProbe> ExtensionResolver<P> {
    pub fn new(probe: P) -> Self {
        ExtensionResolver { probe }
    }

    /// Replace a `.o` suffix with the first source extension that exists. Names without that
    /// suffix are returned as they are. An object without any source is kept unchanged and
    /// reported as an error.
    pub fn resolve(&self, file: &str, diagnostics: &mut Diagnostics) -> String {
        let Some(stem) = file.strip_suffix(OBJECT_SUFFIX).filter(|s| !s.is_empty()) else {
            return file.to_string();
        };

        let found = SOURCE_EXTENSIONS
            .iter()
            .map(|ext| format!("{stem}{ext}"))
            .find(|candidate| self.probe.exists(candidate));

        match found {
            Some(source) => source,
            None => {
                diagnostics.push(
                    DiagnosticKind::UnresolvedExtension,
                    None,
                    format!("could not resolve source for object \"{file}\""),
                );
                file.to_string()
            }
        }
    }
}

#[cfg(test)]
mod test {
    use makeshift_vars::{DiagnosticKind, Diagnostics};
    use pretty_assertions::assert_eq;

    use super::ExtensionResolver;

    fn probe(existing: &'static [&'static str]) -> impl Fn(&str) -> bool {
        move |candidate: &str| existing.contains(&candidate)
    }

    #[test]
    fn first_extension_wins() {
        let resolver = ExtensionResolver::new(probe(&["x86/fft.asm", "x86/fft.c", "utils.c"]));
        let mut diagnostics = Diagnostics::new();

        assert_eq!(resolver.resolve("x86/fft.o", &mut diagnostics), "x86/fft.c");
        assert_eq!(resolver.resolve("utils.o", &mut diagnostics), "utils.c");
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn non_objects_are_untouched() {
        let resolver = ExtensionResolver::new(probe(&[]));
        let mut diagnostics = Diagnostics::new();

        for file in ["avutil.h", "version.h", ".o", "foo.obj", "foo.o.h"] {
            assert_eq!(resolver.resolve(file, &mut diagnostics), file);
        }
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn unresolved_objects_are_reported() {
        let resolver = ExtensionResolver::new(probe(&["a.S"]));
        let mut diagnostics = Diagnostics::new();

        assert_eq!(resolver.resolve("a.o", &mut diagnostics), "a.S");
        assert_eq!(resolver.resolve("missing.o", &mut diagnostics), "missing.o");
        assert_eq!(diagnostics.count(DiagnosticKind::UnresolvedExtension), 1);
    }
}
