//! Collection of file names from the variables known to list sources.

use std::collections::BTreeSet;

use indexmap::IndexMap;
use makeshift_vars::{Flags, VariableKey, VariableTable};

use crate::config::ConfigId;

/// A variable listing files, optionally only relevant when a feature flag is enabled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileBlock {
    pub name: String,
    pub gate: Option<String>,
}

impl FileBlock {
    pub fn new<S: Into<String>>(name: S) -> Self {
        FileBlock {
            name: name.into(),
            gate: None,
        }
    }

    pub fn gated<S: Into<String>, G: Into<String>>(name: S, gate: G) -> Self {
        FileBlock {
            name: name.into(),
            gate: Some(gate.into()),
        }
    }

    pub fn defaults() -> Vec<FileBlock> {
        vec![
            FileBlock::new("HEADERS"),
            FileBlock::new("ARCH_HEADERS"),
            FileBlock::new("BUILT_HEADERS"),
            FileBlock::new("OBJS"),
            FileBlock::gated("ARMV5TE-OBJS", "HAVE_ARMV5TE"),
            FileBlock::gated("ARMV6-OBJS", "HAVE_ARMV6"),
            FileBlock::gated("ARMV8-OBJS", "HAVE_ARMV8"),
            FileBlock::gated("VFP-OBJS", "HAVE_VFP"),
            FileBlock::gated("NEON-OBJS", "HAVE_NEON"),
            FileBlock::gated("MMX-OBJS", "HAVE_MMX"),
            FileBlock::gated("X86ASM-OBJS", "HAVE_X86ASM"),
        ]
    }

    pub fn is_enabled(&self, flags: &Flags) -> bool {
        self.gate.as_ref().map_or(true, |gate| flags.is_enabled(gate))
    }

    /// Files this block contributes for one configuration: the words of the variable itself
    /// followed by those of its `-yes` companion, which collects `NAME-$(FLAG)` assignments.
    pub fn files(&self, table: &VariableTable, flags: &Flags) -> Vec<String> {
        if !self.is_enabled(flags) {
            return vec![];
        }

        let key = VariableKey::parse(&self.name);
        let companion = key.enabled_companion();

        [key, companion]
            .iter()
            .filter_map(|key| table.get(key))
            .flat_map(|value| {
                value
                    .split_whitespace()
                    .map(String::from)
                    .collect::<Vec<_>>()
            })
            .collect()
    }
}

/// For one category, the configurations each file is part of. Files keep the order in which
/// they were first seen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileSupportMatrix {
    files: IndexMap<String, BTreeSet<ConfigId>>,
}

impl FileSupportMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add<S: Into<String>>(&mut self, file: S, config: ConfigId) {
        self.files.entry(file.into()).or_default().insert(config);
    }

    pub fn support<S: AsRef<str>>(&self, file: S) -> Option<&BTreeSet<ConfigId>> {
        self.files.get(file.as_ref())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<ConfigId>)> {
        self.files.iter().map(|(file, configs)| (file.as_str(), configs))
    }

    pub fn files(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    /// Rename every file. Files that end up with the same name share their configurations.
    pub fn map_files<F: FnMut(&str) -> String>(&self, mut f: F) -> FileSupportMatrix {
        let mut mapped = FileSupportMatrix::new();
        for (file, configs) in &self.files {
            mapped
                .files
                .entry(f(file))
                .or_default()
                .extend(configs.iter().copied());
        }
        mapped
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Support matrices of every file block, in block order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Categories {
    categories: IndexMap<String, FileSupportMatrix>,
}

impl Categories {
    pub fn new(blocks: &[FileBlock]) -> Self {
        Categories {
            categories: blocks
                .iter()
                .map(|block| (block.name.clone(), FileSupportMatrix::new()))
                .collect(),
        }
    }

    /// Add what one configuration's table holds for every block.
    pub fn collect(
        &mut self,
        blocks: &[FileBlock],
        table: &VariableTable,
        config: ConfigId,
        flags: &Flags,
    ) {
        for block in blocks {
            let files = block.files(table, flags);
            if files.is_empty() {
                continue;
            }

            let matrix = self.categories.entry(block.name.clone()).or_default();
            for file in files {
                matrix.add(file, config);
            }
        }
    }

    pub fn get<S: AsRef<str>>(&self, name: S) -> Option<&FileSupportMatrix> {
        self.categories.get(name.as_ref())
    }

    /// Categories with at least one file.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FileSupportMatrix)> {
        self.categories
            .iter()
            .filter(|(_, matrix)| !matrix.is_empty())
            .map(|(name, matrix)| (name.as_str(), matrix))
    }
}
