use serde::Deserialize;

/// A type descriptor in the EAV model. A family names a unique code, whether
/// rows of this exact type are stored directly, and the data class that owns
/// its storage mapping. Abstract base types set `instantiable` to false.
#[derive(Debug, Clone, Deserialize)]
pub struct Family {
    pub code: String,
    pub instantiable: bool,
    pub data_class: String,
}

/// Ordered collection of family descriptors. Iteration order is model
/// declaration order.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FamilyRegistry(Vec<Family>);

impl FamilyRegistry {
    pub fn new(families: Vec<Family>) -> Self {
        Self(families)
    }

    pub fn families(&self) -> impl Iterator<Item = &Family> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
