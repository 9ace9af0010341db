//! premake5 rendering of partitioned file lists.

use std::fmt::{self, Write};

use crate::config::ConfigRegistry;
use crate::manifest::LibrarySpec;
use crate::partition::EquivalenceClass;
use crate::templates::project_header;

/// One category ready to be written, e.g. `OBJS` with its classes in partition order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryBlock {
    pub name: String,
    pub classes: Vec<EquivalenceClass>,
}

/// Everything that goes into one `premake5.lua`.
#[derive(Debug, Clone)]
pub struct Descriptor<'a> {
    pub library: &'a LibrarySpec,
    /// Variable-definition sources, as shown in the descriptor
    pub sources: Vec<String>,
    pub categories: Vec<CategoryBlock>,
}

impl Descriptor<'_> {
    pub fn render(&self, registry: &ConfigRegistry) -> Result<String, fmt::Error> {
        let mut out = String::new();
        project_header(&mut out, self.library)?;

        writeln!(out)?;
        for source in &self.sources {
            writeln!(out, "  -- source: {source}")?;
        }

        for category in &self.categories {
            write_category(&mut out, category, registry)?;
        }

        Ok(out)
    }

    /// Number of `filter` scopes opened for class file lists, resets excluded.
    pub fn filter_scopes(&self, registry: &ConfigRegistry) -> usize {
        self.categories
            .iter()
            .flat_map(|category| &category.classes)
            .filter(|class| !registry.is_full(&class.configs))
            .count()
    }
}

fn write_category<W: Write>(
    out: &mut W,
    category: &CategoryBlock,
    registry: &ConfigRegistry,
) -> fmt::Result {
    if category.classes.iter().all(|class| class.files.is_empty()) {
        return Ok(());
    }

    writeln!(out, "  -- {}:", category.name)?;

    let mut filtered = false;
    for class in &category.classes {
        if !registry.is_full(&class.configs) {
            filtered = true;
            write_filter(out, Some(registry.filter_expression(&class.configs).as_str()))?;
        }
        write_files(out, &class.files)?;
    }

    if filtered {
        write_filter(out, None)?;
    }

    Ok(())
}

fn write_filter<W: Write>(out: &mut W, expression: Option<&str>) -> fmt::Result {
    match expression {
        Some(expression) => writeln!(out, "  filter({{\"{expression}\"}})"),
        None => writeln!(out, "  filter({{}})"),
    }
}

fn write_files<W: Write>(out: &mut W, files: &[String]) -> fmt::Result {
    writeln!(out, "  files({{")?;
    for file in files {
        writeln!(out, "    \"{file}\",")?;
    }
    writeln!(out, "  }})")
}
