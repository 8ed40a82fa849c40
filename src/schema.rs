use crate::family::FamilyRegistry;
use anyhow::Context;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Physical storage metadata for one data class. `discriminator_column` is
/// absent when the class is stored without polymorphism.
#[derive(Debug, Clone, Deserialize)]
pub struct Mapping {
    pub table: String,
    pub discriminator_column: Option<String>,
    pub discriminator_value: String,
    pub family_column: String,
}

/// Lookup from data class to storage metadata. Stands in for the host ORM's
/// class metadata; any backing store that can resolve a mapping works.
pub trait Schema: Send + Sync {
    fn mapping(&self, data_class: &str) -> anyhow::Result<Mapping>;
}

/// The declared model: families plus the storage mappings of their data
/// classes, loaded from a single JSON document.
#[derive(Debug, Clone, Deserialize)]
pub struct Model {
    pub families: FamilyRegistry,
    pub classes: BTreeMap<String, Mapping>,
}

impl Model {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read model file {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parse model file {}", path.display()))
    }
}

impl Schema for Model {
    fn mapping(&self, data_class: &str) -> anyhow::Result<Mapping> {
        self.classes
            .get(data_class)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("no storage mapping for data class {}", data_class))
    }
}
