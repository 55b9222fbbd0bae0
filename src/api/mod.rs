//! REST API 客户端 - 设置页消费的用户接口
//!
//! 请求构造是纯数据（`ApiRequest`），收发走 `HttpTransport`；
//! 生产环境用 ureq，测试用记录假件。失败不重试，
//! 状态也不回滚（调用方没有乐观更新）。

mod avatar;
mod keys;

pub use avatar::{avatar_refresh_url, encode_multipart, AvatarUpload, CropGeometry, AVATAR_PATH};
pub use keys::{
    expire_value, ApiKey, CreateKeyRequest, CreatedKey, ExpireMode, API_KEYS_PATH,
    DEFAULT_EXPIRE_DAYS, DEFAULT_EXPIRE_USES, SECONDS_PER_DAY,
};

use serde::de::DeserializeOwned;
use std::io::Read;
use std::time::Duration;
use thiserror::Error;

/// 请求方法
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Delete => "DELETE",
        }
    }
}

/// 一次请求的纯数据描述
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub content_type: Option<String>,
    pub body: Option<Vec<u8>>,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            path: path.into(),
            content_type: None,
            body: None,
        }
    }

    pub fn post(path: impl Into<String>, content_type: &str, body: Vec<u8>) -> Self {
        Self {
            method: Method::Post,
            path: path.into(),
            content_type: Some(content_type.to_string()),
            body: Some(body),
        }
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self {
            method: Method::Delete,
            path: path.into(),
            content_type: None,
            body: None,
        }
    }
}

/// 响应：状态码 + 原始负载
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        serde_json::from_slice(&self.body).map_err(ApiError::Decode)
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("unexpected status {0}")]
    Status(u16),
    #[error("invalid response payload: {0}")]
    Decode(#[from] serde_json::Error),
}

/// 请求收发边界
pub trait HttpTransport {
    fn execute(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError>;
}

/// ureq 实现：固定 10 秒超时的阻塞请求
pub struct UreqTransport {
    agent: ureq::Agent,
    base_url: String,
}

impl UreqTransport {
    pub fn new(base_url: &str) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(10))
            .build();
        Self {
            agent,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

impl HttpTransport for UreqTransport {
    fn execute(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
        let url = format!("{}{}", self.base_url, request.path);
        let mut req = self.agent.request(request.method.as_str(), &url);
        if let Some(content_type) = &request.content_type {
            req = req.set("Content-Type", content_type);
        }

        let result = match &request.body {
            Some(body) => req.send_bytes(body),
            None => req.call(),
        };

        match result {
            Ok(response) => read_response(response),
            // 4xx/5xx 不算传输错误，交给调用方按状态码处理
            Err(ureq::Error::Status(_, response)) => read_response(response),
            Err(e) => Err(ApiError::Network(e.to_string())),
        }
    }
}

fn read_response(response: ureq::Response) -> Result<ApiResponse, ApiError> {
    let status = response.status();
    let mut body = Vec::new();
    response
        .into_reader()
        .take(10 * 1024 * 1024)
        .read_to_end(&mut body)
        .map_err(|e| ApiError::Network(e.to_string()))?;
    Ok(ApiResponse { status, body })
}

/// 用户接口客户端
pub struct ApiClient<T: HttpTransport> {
    transport: T,
}

impl<T: HttpTransport> ApiClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub(crate) fn execute(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
        self.transport.execute(request)
    }

    pub fn transport_ref(&self) -> &T {
        &self.transport
    }
}

impl ApiClient<UreqTransport> {
    /// 按基地址构建生产客户端
    pub fn with_base_url(base_url: &str) -> Self {
        Self::new(UreqTransport::new(base_url))
    }
}
