//! Optional TOML description of what to generate.
//!
//! ```toml
//! [[config]]
//! os = "linux"
//! arch = "x86_64"
//! filter = "platforms:Linux"
//!
//! [[library]]
//! name = "libavutil"
//! uuid = "19216035-F781-4F15-B009-213B7E3A18AC"
//! ```
//!
//! Sections left out of a manifest keep their built-in values.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::config::ConfigSpec;
use crate::MakeshiftResult;

/// Source file exempt from compiler warnings unless a library says otherwise.
pub const DEFAULT_WARNINGS_EXEMPT: &str = "wmaprodec.c";

/// A Makefile consulted for a library, relative to the library directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSpec {
    pub path: String,
    /// Restrict the source to configurations of this architecture
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arch: Option<String>,
}

impl SourceSpec {
    pub fn new<S: Into<String>>(path: S, arch: Option<&str>) -> Self {
        SourceSpec {
            path: path.into(),
            arch: arch.map(String::from),
        }
    }

    pub fn defaults() -> Vec<SourceSpec> {
        vec![
            SourceSpec::new("Makefile", None),
            SourceSpec::new("aarch64/Makefile", Some("aarch64")),
            SourceSpec::new("x86/Makefile", Some("x86_64")),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibrarySpec {
    pub name: String,
    pub uuid: String,
    #[serde(default)]
    pub links: Vec<String>,
    #[serde(default = "default_warnings_exempt")]
    pub warnings_exempt: String,
    #[serde(default = "SourceSpec::defaults")]
    pub sources: Vec<SourceSpec>,
}

fn default_warnings_exempt() -> String {
    DEFAULT_WARNINGS_EXEMPT.to_string()
}

impl LibrarySpec {
    pub fn new<S: Into<String>>(name: S, uuid: S) -> Self {
        LibrarySpec {
            name: name.into(),
            uuid: uuid.into(),
            links: vec![],
            warnings_exempt: default_warnings_exempt(),
            sources: SourceSpec::defaults(),
        }
    }

    pub fn with_links<S: Into<String>>(mut self, links: impl IntoIterator<Item = S>) -> Self {
        self.links = links.into_iter().map(Into::into).collect();
        self
    }

    pub fn defaults() -> Vec<LibrarySpec> {
        vec![
            LibrarySpec::new("libavutil", "19216035-F781-4F15-B009-213B7E3A18AC"),
            LibrarySpec::new("libavcodec", "9DB2830C-D326-48ED-B4CC-08EA6A1B7272")
                .with_links(["libavutil"]),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default = "ConfigSpec::defaults", rename = "config")]
    pub configs: Vec<ConfigSpec>,
    #[serde(default = "LibrarySpec::defaults", rename = "library")]
    pub libraries: Vec<LibrarySpec>,
}

impl Default for Manifest {
    fn default() -> Self {
        Manifest {
            configs: ConfigSpec::defaults(),
            libraries: LibrarySpec::defaults(),
        }
    }
}

impl Manifest {
    pub fn load_from(path: &Path) -> MakeshiftResult<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("unable to read manifest {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("invalid manifest {}", path.display()))
    }

    pub fn parse(content: &str) -> MakeshiftResult<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn library<S: AsRef<str>>(&self, name: S) -> Option<&LibrarySpec> {
        self.libraries.iter().find(|lib| lib.name == name.as_ref())
    }
}
