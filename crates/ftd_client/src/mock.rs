//! Mock transport
//!
//! 用于单元测试的 mock 实现，支持注入失败场景并记录调用。

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use contracts::{ServerError, Transport, TransportError};
use serde_json::{Map, Value};
use tracing::instrument;

/// Recorded `upload_file` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadCall {
    pub path: PathBuf,
    pub url: String,
}

#[derive(Default)]
struct MockState {
    /// 预设响应（按顺序消费，耗尽后返回 `{}`）
    responses: VecDeque<Result<Value, TransportError>>,
    /// 已记录的调用
    calls: Vec<UploadCall>,
}

/// Mock transport
///
/// Cloning shares state, so a test can keep a handle after moving a clone
/// into the dispatcher.
#[derive(Clone, Default)]
pub struct MockTransport {
    state: Arc<Mutex<MockState>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mock that answers the next upload with `response`
    pub fn with_response(response: Value) -> Self {
        let mock = Self::new();
        mock.push_response(Ok(response));
        mock
    }

    /// Mock that fails the next upload with a server error
    pub fn with_server_error(code: u16, response: impl Into<Value>) -> Self {
        let mock = Self::new();
        mock.push_response(Err(ServerError::new(code, response).into()));
        mock
    }

    /// Queue a result for a future upload
    pub fn push_response(&self, response: Result<Value, TransportError>) {
        self.state.lock().unwrap().responses.push_back(response);
    }

    /// All recorded calls, oldest first
    pub fn calls(&self) -> Vec<UploadCall> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn call_count(&self) -> usize {
        self.state.lock().unwrap().calls.len()
    }
}

impl Transport for MockTransport {
    #[instrument(name = "mock_upload_file", skip(self, path), fields(url = %url))]
    async fn upload_file(&self, path: &Path, url: &str) -> Result<Value, TransportError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(UploadCall {
            path: path.to_path_buf(),
            url: url.to_string(),
        });
        state
            .responses
            .pop_front()
            .unwrap_or_else(|| Ok(Value::Object(Map::new())))
    }
}
