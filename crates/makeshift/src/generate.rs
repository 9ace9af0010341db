//! One generation pass per library: read its sources under every configuration, collect the
//! file lists, partition them and write the descriptor.

use std::fs;
use std::path::{Path, PathBuf};

use makeshift_vars::{DiagnosticKind, Diagnostics, Environment};
use tracing::{error, info, warn};

use crate::cache::TableCache;
use crate::config::ConfigRegistry;
use crate::emit::{CategoryBlock, Descriptor};
use crate::errors::GenerateError;
use crate::extension::{ExtensionResolver, FsProbe};
use crate::file_blocks::{Categories, FileBlock};
use crate::manifest::LibrarySpec;
use crate::partition::partition;
use crate::MakeshiftResult;

pub const DESCRIPTOR_FILE_NAME: &str = "premake5.lua";

#[derive(Debug)]
pub struct LibraryReport {
    pub library: String,
    /// Where the descriptor belongs
    pub output: PathBuf,
    pub descriptor: String,
    pub diagnostics: Diagnostics,
    pub classes: usize,
    pub filter_scopes: usize,
}

impl LibraryReport {
    pub fn unresolved_extensions(&self) -> usize {
        self.diagnostics.count(DiagnosticKind::UnresolvedExtension)
    }
}

/// Outcome of a batch of libraries.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub reports: Vec<LibraryReport>,
    pub failures: Vec<(String, anyhow::Error)>,
}

impl RunSummary {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

pub struct Generator<'a, E: ?Sized> {
    root: PathBuf,
    registry: &'a ConfigRegistry,
    blocks: Vec<FileBlock>,
    env: &'a E,
}

impl<'a, E: Environment + ?Sized> Generator<'a, E> {
    pub fn new<P: Into<PathBuf>>(root: P, registry: &'a ConfigRegistry, env: &'a E) -> Self {
        Generator {
            root: root.into(),
            registry,
            blocks: FileBlock::defaults(),
            env,
        }
    }

    pub fn with_blocks(mut self, blocks: Vec<FileBlock>) -> Self {
        self.blocks = blocks;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Build a library's descriptor in memory.
    pub fn build(&self, library: &LibrarySpec) -> MakeshiftResult<LibraryReport> {
        let lib_dir = self.root.join(&library.name);
        if !lib_dir.is_dir() {
            return Err(GenerateError::MissingLibrary(lib_dir).into());
        }

        let mut cache = TableCache::new(self.env);
        let mut categories = Categories::new(&self.blocks);

        for source in &library.sources {
            let path = lib_dir.join(&source.path);
            let configs = self
                .registry
                .iter()
                .filter(|(_, config)| source.arch.as_deref().map_or(true, |a| config.arch() == a));

            for (id, config) in configs {
                let table = cache.table(&path, id, config)?;
                categories.collect(&self.blocks, table, id, &config.flags);
            }
        }

        let mut diagnostics = cache.into_diagnostics();
        let resolver = ExtensionResolver::new(FsProbe::new(&lib_dir));
        let mut ext_diagnostics = Diagnostics::for_origin(library.name.clone());

        let blocks: Vec<CategoryBlock> = categories
            .iter()
            .map(|(name, matrix)| {
                let resolved =
                    matrix.map_files(|file| resolver.resolve(file, &mut ext_diagnostics));
                CategoryBlock {
                    name: name.to_string(),
                    classes: partition(&resolved),
                }
            })
            .collect();
        diagnostics.extend(ext_diagnostics);

        let descriptor = Descriptor {
            library,
            sources: library
                .sources
                .iter()
                .map(|source| format!("{}/{}", library.name, source.path))
                .collect(),
            categories: blocks,
        };

        let text = descriptor
            .render(self.registry)
            .map_err(|_| GenerateError::Render(library.name.clone()))?;

        Ok(LibraryReport {
            library: library.name.clone(),
            output: lib_dir.join(DESCRIPTOR_FILE_NAME),
            classes: descriptor.categories.iter().map(|c| c.classes.len()).sum(),
            filter_scopes: descriptor.filter_scopes(self.registry),
            descriptor: text,
            diagnostics,
        })
    }

    /// Build a library's descriptor and write it next to its sources.
    pub fn generate(&self, library: &LibrarySpec) -> MakeshiftResult<LibraryReport> {
        let report = self.build(library)?;

        fs::write(&report.output, &report.descriptor).map_err(|source| {
            GenerateError::WriteFailed {
                path: report.output.clone(),
                source,
            }
        })?;
        info!("wrote {}", report.output.display());

        Ok(report)
    }

    /// Process libraries independently; a failing library doesn't stop the others.
    pub fn run<'l, I>(&self, libraries: I, write: bool) -> RunSummary
    where
        I: IntoIterator<Item = &'l LibrarySpec>,
    {
        let mut summary = RunSummary::default();

        for library in libraries {
            let result = if write {
                self.generate(library)
            } else {
                self.build(library)
            };

            match result {
                Ok(report) => {
                    let unresolved = report.unresolved_extensions();
                    if unresolved > 0 {
                        warn!(
                            "{}: {unresolved} object(s) without a source file",
                            report.library
                        );
                    }
                    info!(
                        "{}: {} classes, {} filter scopes, {} diagnostics",
                        report.library,
                        report.classes,
                        report.filter_scopes,
                        report.diagnostics.len()
                    );
                    summary.reports.push(report);
                }
                Err(e) => {
                    error!("{}: {e:#}", library.name);
                    summary.failures.push((library.name.clone(), e));
                }
            }
        }

        summary
    }
}
