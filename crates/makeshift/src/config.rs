//! Target configurations and the feature flags each of them was configured with.

use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;

use anyhow::Context;
use itertools::Itertools;
use makeshift_vars::Flags;
use serde::{Deserialize, Serialize};

use crate::MakeshiftResult;

/// Position of a configuration in its [`ConfigRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ConfigId(pub usize);

/// Where a configuration's flags come from and how it is named in the generated descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigSpec {
    pub os: String,
    pub arch: String,
    /// Generated configuration header, relative to the source root. Defaults to
    /// `config_<os>_<arch>.h`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<String>,
    /// premake filter selecting this configuration, e.g. `platforms:Linux`
    pub filter: String,
}

impl ConfigSpec {
    pub fn new<S: Into<String>>(os: S, arch: S, filter: S) -> Self {
        ConfigSpec {
            os: os.into(),
            arch: arch.into(),
            header: None,
            filter: filter.into(),
        }
    }

    pub fn header(&self) -> String {
        self.header
            .clone()
            .unwrap_or_else(|| format!("config_{}_{}.h", self.os, self.arch))
    }

    /// Built-in list of supported configurations.
    pub fn defaults() -> Vec<ConfigSpec> {
        vec![
            ConfigSpec::new("windows", "x86_64", "platforms:Windows-x86_64"),
            ConfigSpec::new("windows", "aarch64", "platforms:Windows-ARM64"),
            ConfigSpec::new("linux", "x86_64", "platforms:Linux"),
            ConfigSpec::new("android", "x86_64", "platforms:Android-x86_64"),
            ConfigSpec::new("android", "aarch64", "platforms:Android-ARM64"),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    pub spec: ConfigSpec,
    pub flags: Flags,
}

impl Configuration {
    pub fn new(spec: ConfigSpec, flags: Flags) -> Self {
        Configuration { spec, flags }
    }

    pub fn os(&self) -> &str {
        &self.spec.os
    }

    pub fn arch(&self) -> &str {
        &self.spec.arch
    }

    pub fn filter(&self) -> &str {
        &self.spec.filter
    }
}

impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.spec.os, self.spec.arch)
    }
}

/// All configurations of a run. Loaded once, read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigRegistry {
    configs: Vec<Configuration>,
}

impl ConfigRegistry {
    pub fn new(configs: Vec<Configuration>) -> Self {
        ConfigRegistry { configs }
    }

    /// Read every configuration header below `root`.
    pub fn load<P: AsRef<Path>>(root: P, specs: &[ConfigSpec]) -> MakeshiftResult<Self> {
        let root = root.as_ref();
        let mut configs = Vec::with_capacity(specs.len());

        for spec in specs {
            let header = root.join(spec.header());
            let flags = Flags::from_config_header_path(&header)
                .with_context(|| format!("loading flags for {}/{}", spec.os, spec.arch))?;
            tracing::debug!(
                "{}/{}: {} flags from {}",
                spec.os,
                spec.arch,
                flags.len(),
                header.display()
            );
            configs.push(Configuration::new(spec.clone(), flags));
        }

        Ok(ConfigRegistry { configs })
    }

    pub fn get(&self, id: ConfigId) -> Option<&Configuration> {
        self.configs.get(id.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ConfigId, &Configuration)> {
        self.configs
            .iter()
            .enumerate()
            .map(|(i, config)| (ConfigId(i), config))
    }

    /// Configurations of one architecture, in registry order.
    pub fn with_arch<'a>(
        &'a self,
        arch: &'a str,
    ) -> impl Iterator<Item = (ConfigId, &'a Configuration)> + 'a {
        self.iter().filter(move |(_, config)| config.arch() == arch)
    }

    pub fn ids(&self) -> BTreeSet<ConfigId> {
        (0..self.configs.len()).map(ConfigId).collect()
    }

    /// Whether `ids` names every configuration of the registry.
    pub fn is_full(&self, ids: &BTreeSet<ConfigId>) -> bool {
        ids.len() == self.configs.len() && ids.iter().all(|id| id.0 < self.configs.len())
    }

    /// premake filter expression matching exactly the given configurations. Duplicate filters
    /// are merged and the rest sorted.
    pub fn filter_expression(&self, ids: &BTreeSet<ConfigId>) -> String {
        ids.iter()
            .filter_map(|id| self.get(*id))
            .map(Configuration::filter)
            .sorted()
            .dedup()
            .join(" or ")
    }

    pub fn len(&self) -> usize {
        self.configs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }
}
