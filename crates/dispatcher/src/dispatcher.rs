//! UploadDispatcher - validates an upload request and delegates it to the transport

use contracts::{HttpMethod, OperationCatalog, OperationSpec, Transport, UploadRequest};
use tracing::{debug, info, instrument, warn};

use crate::error::DispatchError;
use crate::facts::{AnsibleFactBuilder, FactBuilder};
use crate::outcome::UploadOutcome;

/// Model-name marker of operations returning an upload status
const UPLOAD_STATUS_MODEL: &str = "UploadStatus";

/// True when the operation can carry a file upload
pub fn is_upload_operation(spec: &OperationSpec) -> bool {
    spec.method == HttpMethod::Post || spec.model_name.contains(UPLOAD_STATUS_MODEL)
}

/// Dispatches one upload request through injected collaborators
pub struct UploadDispatcher<C, T, F = AnsibleFactBuilder> {
    catalog: C,
    transport: T,
    fact_builder: F,
    check_mode: bool,
}

impl<C, T> UploadDispatcher<C, T>
where
    C: OperationCatalog + Sync,
    T: Transport + Sync,
{
    /// Create a dispatcher using the default fact builder, check mode off
    pub fn new(catalog: C, transport: T) -> Self {
        Self {
            catalog,
            transport,
            fact_builder: AnsibleFactBuilder,
            check_mode: false,
        }
    }
}

impl<C, T, F> UploadDispatcher<C, T, F>
where
    C: OperationCatalog + Sync,
    T: Transport + Sync,
    F: FactBuilder,
{
    /// Replace the fact builder
    pub fn with_fact_builder<G: FactBuilder>(self, fact_builder: G) -> UploadDispatcher<C, T, G> {
        UploadDispatcher {
            catalog: self.catalog,
            transport: self.transport,
            fact_builder,
            check_mode: self.check_mode,
        }
    }

    /// Enable or disable check (dry-run) mode
    pub fn with_check_mode(mut self, check_mode: bool) -> Self {
        self.check_mode = check_mode;
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Look up the `OperationSpec` of `operation`
    ///
    /// # Errors
    /// `OperationNotFound` when the catalog has no entry; `Catalog` when it cannot be queried.
    #[instrument(name = "dispatcher_validate_operation", skip(self))]
    pub async fn validate_operation(&self, operation: &str) -> Result<OperationSpec, DispatchError> {
        self.catalog
            .operation_spec(operation)
            .await
            .map_err(|source| DispatchError::Catalog {
                operation: operation.to_string(),
                source,
            })?
            .ok_or_else(|| DispatchError::operation_not_found(operation))
    }

    /// Run the request to one of the three terminal outcomes
    #[instrument(
        name = "dispatcher_execute",
        skip(self, request),
        fields(operation = %request.operation, check_mode = self.check_mode)
    )]
    pub async fn execute(&self, request: &UploadRequest) -> UploadOutcome {
        match self.try_execute(request).await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(error = %e, "Upload dispatch failed");
                UploadOutcome::failed(e.to_string())
            }
        }
    }

    async fn try_execute(&self, request: &UploadRequest) -> Result<UploadOutcome, DispatchError> {
        let spec = self.validate_operation(&request.operation).await?;
        if !is_upload_operation(&spec) {
            return Err(DispatchError::invalid_operation_kind(&request.operation));
        }

        if self.check_mode {
            debug!(url = %spec.url, "Check mode, skipping upload");
            return Ok(UploadOutcome::Unchanged);
        }

        let response = self
            .transport
            .upload_file(&request.file_to_upload, &spec.url)
            .await
            .map_err(|e| DispatchError::from_transport(&request.operation, e))?;

        let facts = self.fact_builder.build(&response, request);
        info!(url = %spec.url, facts = facts.len(), "File uploaded");

        Ok(UploadOutcome::Uploaded { response, facts })
    }
}
