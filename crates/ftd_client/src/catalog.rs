//! StaticCatalog - configuration-backed operation catalog

use std::collections::BTreeMap;

use contracts::{ContractError, OperationCatalog, OperationSpec, UploaderConfig};
use tracing::{debug, instrument};

/// In-memory catalog keyed by operation name
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    operations: BTreeMap<String, OperationSpec>,
}

impl StaticCatalog {
    pub fn new(operations: BTreeMap<String, OperationSpec>) -> Self {
        Self { operations }
    }

    /// Build from the loaded configuration (inline + merged catalog file)
    pub fn from_config(config: &UploaderConfig) -> Self {
        Self::new(config.operations.clone())
    }

    /// Register or replace an operation
    pub fn insert(&mut self, name: impl Into<String>, spec: OperationSpec) {
        self.operations.insert(name.into(), spec);
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Operation names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.operations.keys().map(String::as_str)
    }
}

impl FromIterator<(String, OperationSpec)> for StaticCatalog {
    fn from_iter<I: IntoIterator<Item = (String, OperationSpec)>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl OperationCatalog for StaticCatalog {
    #[instrument(name = "static_catalog_lookup", skip(self))]
    async fn operation_spec(&self, name: &str) -> Result<Option<OperationSpec>, ContractError> {
        let spec = self.operations.get(name).cloned();
        debug!(found = spec.is_some(), "Catalog lookup");
        Ok(spec)
    }
}
