//! # FTD Client
//!
//! Concrete collaborators for the upload dispatcher.
//!
//! 负责：
//! - `StaticCatalog`: 配置驱动的操作目录
//! - `FtdHttpClient`: token 认证 + multipart 上传 (reqwest)
//! - `MockTransport`: 用于单元测试的传输层 mock

pub mod catalog;
pub mod error;
pub mod http_client;
pub mod mock;

pub use catalog::StaticCatalog;
pub use error::{FtdClientError, Result};
pub use http_client::FtdHttpClient;
pub use mock::{MockTransport, UploadCall};
