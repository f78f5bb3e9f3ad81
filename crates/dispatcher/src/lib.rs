//! # Dispatcher
//!
//! 上传分发模块。
//!
//! 负责：
//! - 按名称解析操作 (`OperationCatalog`)
//! - 校验操作是否为上传接口 (POST 或返回 UploadStatus 模型)
//! - 委托 `Transport` 执行上传, 并由响应构建 Ansible facts
//! - 将结果映射为 `UploadOutcome`

pub mod dispatcher;
pub mod error;
pub mod facts;
pub mod outcome;

pub use contracts::{OperationSpec, UploadRequest};
pub use dispatcher::{is_upload_operation, UploadDispatcher};
pub use error::DispatchError;
pub use facts::{AnsibleFactBuilder, FactBuilder};
pub use outcome::UploadOutcome;
