//! OperationCatalog trait - device operation lookup

use crate::{ContractError, OperationSpec};

/// Lookup of device operations by name
#[trait_variant::make(OperationCatalog: Send)]
pub trait LocalOperationCatalog {
    /// Resolve an operation spec
    ///
    /// Returns `Ok(None)` when the catalog has no entry for `name`.
    ///
    /// # Errors
    /// Returns an error only when the catalog itself cannot be queried.
    async fn operation_spec(&self, name: &str) -> Result<Option<OperationSpec>, ContractError>;
}
