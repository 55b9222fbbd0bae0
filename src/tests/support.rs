//! 测试辅助：记录请求的假传输与内存剪贴板

use crate::api::{ApiError, ApiRequest, ApiResponse, HttpTransport};
use crate::clipboard::{ClipboardError, TextClipboard};
use std::cell::RefCell;
use std::collections::VecDeque;

/// 记录所有请求并按队列返回预置响应的假传输。
/// 队列空时返回 200 + `[]`（等价空列表/无内容成功）。
pub struct RecordingTransport {
    requests: RefCell<Vec<ApiRequest>>,
    responses: RefCell<VecDeque<Result<ApiResponse, ApiError>>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self {
            requests: RefCell::new(Vec::new()),
            responses: RefCell::new(VecDeque::new()),
        }
    }

    pub fn push_response(&self, status: u16, body: &str) {
        self.responses.borrow_mut().push_back(Ok(ApiResponse {
            status,
            body: body.as_bytes().to_vec(),
        }));
    }

    pub fn push_error(&self, error: ApiError) {
        self.responses.borrow_mut().push_back(Err(error));
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.borrow().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }
}

impl HttpTransport for RecordingTransport {
    fn execute(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
        self.requests.borrow_mut().push(request.clone());
        self.responses.borrow_mut().pop_front().unwrap_or(Ok(ApiResponse {
            status: 200,
            body: b"[]".to_vec(),
        }))
    }
}

/// 内存剪贴板，可切换为写入失败
pub struct FakeClipboard {
    pub contents: Option<String>,
    pub fail: bool,
}

impl FakeClipboard {
    pub fn new() -> Self {
        Self {
            contents: None,
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            contents: None,
            fail: true,
        }
    }
}

impl TextClipboard for FakeClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        if self.fail {
            return Err(ClipboardError::WriteFailed("denied".to_string()));
        }
        self.contents = Some(text.to_string());
        Ok(())
    }
}
