use std::collections::BTreeSet;

use makeshift_util::index_map::{sorted_by_size_desc, IntoIndexMap};

use crate::config::ConfigId;
use crate::file_blocks::FileSupportMatrix;

/// Files supported by exactly the same configurations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EquivalenceClass {
    pub configs: BTreeSet<ConfigId>,
    pub files: Vec<String>,
}

impl EquivalenceClass {
    pub fn len(&self) -> usize {
        self.configs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }
}

/// Group the files of a matrix by their set of configurations.
///
/// Classes come out largest first; classes of the same size, and the files inside a class, keep
/// the order in which the matrix first saw them.
pub fn partition(matrix: &FileSupportMatrix) -> Vec<EquivalenceClass> {
    let groups = matrix
        .iter()
        .into_index_map_by(|(_, configs): &(&str, &BTreeSet<ConfigId>)| (*configs).clone());

    sorted_by_size_desc(groups, BTreeSet::len)
        .into_iter()
        .map(|(configs, files)| EquivalenceClass {
            configs,
            files: files.into_iter().map(|(file, _)| file.to_string()).collect(),
        })
        .collect()
}
