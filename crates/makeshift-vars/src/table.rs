use indexmap::{IndexMap, IndexSet};

use crate::key::VariableKey;
use crate::reference::collapse_escaped_dollars;

/// Fully interpolated variables of one source evaluated under one configuration.
///
/// Values are stored with `$$` still escaped so they can be spliced into other values without
/// being mistaken for references; every accessor hands out the collapsed form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariableTable {
    values: IndexMap<VariableKey, String>,
    undefined: IndexSet<String>,
    forced_empty: IndexSet<VariableKey>,
}

impl VariableTable {
    pub(crate) fn new(
        values: IndexMap<VariableKey, String>,
        undefined: IndexSet<String>,
        forced_empty: IndexSet<VariableKey>,
    ) -> Self {
        VariableTable {
            values,
            undefined,
            forced_empty,
        }
    }

    pub fn get(&self, key: &VariableKey) -> Option<String> {
        self.values.get(key).map(|v| collapse_escaped_dollars(v))
    }

    /// Look up a variable by the name it has in Makefile text, e.g. `OBJS` or `NEON-OBJS-yes`.
    pub fn get_var<S: AsRef<str>>(&self, name: S) -> Option<String> {
        self.get(&VariableKey::parse(name))
    }

    /// Whitespace separated words of a variable; empty when the variable doesn't exist.
    pub fn words<S: AsRef<str>>(&self, name: S) -> Vec<String> {
        self.get_var(name)
            .map(|v| v.split_whitespace().map(String::from).collect())
            .unwrap_or_default()
    }

    pub fn contains<S: AsRef<str>>(&self, name: S) -> bool {
        self.values.contains_key(&VariableKey::parse(name))
    }

    /// Entries in the order they were first assigned.
    pub fn iter(&self) -> impl Iterator<Item = (&VariableKey, String)> + '_ {
        self.values
            .iter()
            .map(|(k, v)| (k, collapse_escaped_dollars(v)))
    }

    pub fn keys(&self) -> impl Iterator<Item = &VariableKey> {
        self.values.keys()
    }

    /// Names that were referenced but defined neither locally nor in the environment. They are
    /// present in the table with an empty value.
    pub fn undefined_references(&self) -> impl Iterator<Item = &str> {
        self.undefined.iter().map(String::as_str)
    }

    /// Variables whose interpolation never finished, typically because of a reference cycle.
    pub fn forced_empty(&self) -> impl Iterator<Item = &VariableKey> {
        self.forced_empty.iter()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
