//! # Contracts
//!
//! Interface contracts shared by every crate of the uploader: the operation
//! data model, the upload request, and the collaborator traits the dispatcher
//! is driven through.
//! All business crates can only depend on this crate, reverse dependencies are prohibited.

mod catalog;
mod config;
mod error;
mod operation;
mod request;
mod transport;

pub use catalog::{LocalOperationCatalog, OperationCatalog};
pub use config::*;
pub use error::*;
pub use operation::{HttpMethod, OperationSpec};
pub use request::UploadRequest;
pub use transport::{LocalTransport, Transport};
