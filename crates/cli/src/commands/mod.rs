//! Command implementations.

mod upload;
mod validate;

pub use upload::run_upload;
pub use validate::run_validate;
