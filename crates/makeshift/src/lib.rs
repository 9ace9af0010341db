//! Generates premake5 project descriptors for the libraries of a Makefile based C code base.
//!
//! For every library, the Makefile variables that list sources (`HEADERS`, `OBJS`,
//! `NEON-OBJS`, ...) are resolved under each target configuration. Each file is then known to
//! be part of some set of configurations; files sharing the same set form one class, written
//! as one `files({...})` list under a `filter` naming those configurations. Files that every
//! configuration uses are written without a filter.

pub mod cache;
pub mod config;
pub mod emit;
pub mod errors;
pub mod extension;
pub mod file_blocks;
pub mod generate;
pub mod manifest;
pub mod partition;
pub mod templates;

pub use config::{ConfigId, ConfigRegistry, ConfigSpec, Configuration};
pub use errors::GenerateError;
pub use generate::{Generator, LibraryReport, RunSummary};
pub use manifest::{LibrarySpec, Manifest};

pub type MakeshiftResult<T> = anyhow::Result<T>;
