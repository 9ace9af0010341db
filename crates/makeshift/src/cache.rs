use std::path::{Path, PathBuf};

use anyhow::Context;
use indexmap::map::Entry;
use indexmap::IndexMap;
use makeshift_vars::{resolve, Diagnostics, Environment, Makefile, VariableTable};

use crate::config::{ConfigId, Configuration};
use crate::MakeshiftResult;

/// Parsed sources and their variable tables, owned by a single library generation.
///
/// Each source is read and parsed once; its table is evaluated once per configuration.
pub struct TableCache<'e, E: ?Sized> {
    env: &'e E,
    parsed: IndexMap<PathBuf, Makefile>,
    tables: IndexMap<(PathBuf, ConfigId), VariableTable>,
    diagnostics: Diagnostics,
}

impl<'e, E: Environment + ?Sized> TableCache<'e, E> {
    pub fn new(env: &'e E) -> Self {
        TableCache {
            env,
            parsed: IndexMap::new(),
            tables: IndexMap::new(),
            diagnostics: Diagnostics::new(),
        }
    }

    pub fn makefile(&mut self, path: &Path) -> MakeshiftResult<&Makefile> {
        parse_once(&mut self.parsed, &mut self.diagnostics, path)
    }

    pub fn table(
        &mut self,
        path: &Path,
        id: ConfigId,
        config: &Configuration,
    ) -> MakeshiftResult<&VariableTable> {
        match self.tables.entry((path.to_path_buf(), id)) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                let makefile = parse_once(&mut self.parsed, &mut self.diagnostics, path)?;

                let mut diagnostics =
                    Diagnostics::for_origin(format!("{} ({config})", path.display()));
                let table = resolve(makefile, &config.flags, self.env, &mut diagnostics);
                tracing::trace!("{} ({config}): {} variables", path.display(), table.len());

                self.diagnostics.extend(diagnostics);
                Ok(entry.insert(table))
            }
        }
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Diagnostics {
        self.diagnostics
    }
}

fn parse_once<'p>(
    parsed: &'p mut IndexMap<PathBuf, Makefile>,
    diagnostics: &mut Diagnostics,
    path: &Path,
) -> MakeshiftResult<&'p Makefile> {
    match parsed.entry(path.to_path_buf()) {
        Entry::Occupied(entry) => Ok(entry.into_mut()),
        Entry::Vacant(entry) => {
            let mut parse_diagnostics = Diagnostics::for_origin(path.display().to_string());
            let makefile = Makefile::from_path(path, &mut parse_diagnostics)
                .with_context(|| format!("reading variables from {}", path.display()))?;
            tracing::debug!("{}: {} assignments", path.display(), makefile.len());

            diagnostics.extend(parse_diagnostics);
            Ok(entry.insert(makefile))
        }
    }
}
