//! Source registry

use super::types::SourceDefinition;
use crate::error::{Error, Result};
use std::collections::{BTreeMap, HashMap};
use std::sync::LazyLock;

/// Built-in source YAML definitions
static BUILTIN_SOURCES: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    let mut m = HashMap::new();
    m.insert("lrytas", include_str!("../../sources/lrytas.yaml"));
    m
});

/// Get a built-in source definition by name
pub fn get_builtin(name: &str) -> Option<&'static str> {
    BUILTIN_SOURCES.get(name).copied()
}

/// List all built-in source names, sorted
pub fn list_builtin() -> Vec<&'static str> {
    let mut names: Vec<_> = BUILTIN_SOURCES.keys().copied().collect();
    names.sort_unstable();
    names
}

/// Parse and validate a source definition from YAML
pub fn load_source_from_str(yaml: &str) -> Result<SourceDefinition> {
    let source: SourceDefinition = serde_yaml::from_str(yaml)?;
    validate(&source)?;
    Ok(source)
}

fn validate(source: &SourceDefinition) -> Result<()> {
    if source.name.trim().is_empty() {
        return Err(Error::config("Source name must not be empty"));
    }
    url::Url::parse(&source.url)?;
    if source.page_size == 0 {
        return Err(Error::config(format!(
            "Source '{}': page_size must be positive",
            source.name
        )));
    }
    Ok(())
}

/// Named collection of sources
#[derive(Debug, Clone, Default)]
pub struct SourceRegistry {
    sources: BTreeMap<String, SourceDefinition>,
}

impl SourceRegistry {
    /// Registry with no sources
    pub fn empty() -> Self {
        Self::default()
    }

    /// Registry with every built-in source
    pub fn builtin() -> Result<Self> {
        let mut registry = Self::empty();
        for name in list_builtin() {
            if let Some(yaml) = get_builtin(name) {
                registry.insert(load_source_from_str(yaml)?)?;
            }
        }
        Ok(registry)
    }

    /// Add a source, replacing any source with the same name
    pub fn insert(&mut self, source: SourceDefinition) -> Result<()> {
        validate(&source)?;
        self.sources.insert(source.name.clone(), source);
        Ok(())
    }

    /// Add several sources
    pub fn extend(&mut self, sources: impl IntoIterator<Item = SourceDefinition>) -> Result<()> {
        for source in sources {
            self.insert(source)?;
        }
        Ok(())
    }

    /// Look a source up by name
    pub fn get(&self, name: &str) -> Result<&SourceDefinition> {
        self.sources.get(name).ok_or_else(|| Error::UnknownSource {
            name: name.to_string(),
            available: self.names().join(", "),
        })
    }

    /// Registered source names, sorted
    pub fn names(&self) -> Vec<&str> {
        self.sources.keys().map(String::as_str).collect()
    }

    /// Iterate over sources in name order
    pub fn iter(&self) -> impl Iterator<Item = &SourceDefinition> {
        self.sources.values()
    }
}
