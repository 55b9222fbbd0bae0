//! API 密钥接口 - 列表、创建、吊销

use super::{ApiClient, ApiError, ApiRequest, HttpTransport};
use serde::{Deserialize, Deserializer, Serialize};

pub const API_KEYS_PATH: &str = "/api/user/api-keys";

pub const DEFAULT_EXPIRE_DAYS: u64 = 30;
pub const DEFAULT_EXPIRE_USES: u64 = 100;
pub const SECONDS_PER_DAY: u64 = 86400;

/// 服务端返回的密钥条目
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiKey {
    pub id: u64,
    pub name: String,
    pub created_at: String,
    pub usage_count: u64,
    #[serde(default, deserialize_with = "permissions_or_empty")]
    pub permissions: Vec<String>,
}

/// permissions 偶见非数组值，按空列表处理（服务端不一致的成因未知）
fn permissions_or_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Array(items) => items
            .into_iter()
            .filter_map(|v| match v {
                serde_json::Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    })
}

/// 过期方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExpireMode {
    Never,
    Date,
    Usage,
}

impl ExpireMode {
    /// 过期输入框的标签；`Never` 时输入框隐藏
    pub fn value_label(&self) -> Option<&'static str> {
        match self {
            ExpireMode::Never => None,
            ExpireMode::Date => Some("Days until expiry"),
            ExpireMode::Usage => Some("Maximum uses"),
        }
    }
}

/// 计算请求体里的 expire_value
///
/// `Never` 为空；`Date` 把天数换算成到期时刻（epoch 秒）；
/// `Usage` 直接是次数上限。缺省分别取 30 天和 100 次。
pub fn expire_value(mode: ExpireMode, input: Option<u64>, now_secs: u64) -> Option<u64> {
    match mode {
        ExpireMode::Never => None,
        ExpireMode::Date => {
            Some(now_secs + input.unwrap_or(DEFAULT_EXPIRE_DAYS) * SECONDS_PER_DAY)
        }
        ExpireMode::Usage => Some(input.unwrap_or(DEFAULT_EXPIRE_USES)),
    }
}

/// 创建密钥的请求体；`expire_value` 为空时序列化为 null
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateKeyRequest {
    pub name: String,
    pub permissions: Vec<String>,
    pub expire_on: ExpireMode,
    pub expire_value: Option<u64>,
}

impl CreateKeyRequest {
    pub fn new(
        name: &str,
        permissions: &[String],
        expire_on: ExpireMode,
        expire_input: Option<u64>,
        now_secs: u64,
    ) -> Self {
        Self {
            name: name.to_string(),
            permissions: permissions.to_vec(),
            expire_on,
            expire_value: expire_value(expire_on, expire_input, now_secs),
        }
    }
}

/// 创建成功的返回：完整密钥只在这里出现一次
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedKey {
    pub key: String,
}

impl<T: HttpTransport> ApiClient<T> {
    /// GET /api/user/api-keys
    pub fn list_keys(&self) -> Result<Vec<ApiKey>, ApiError> {
        let response = self.execute(&ApiRequest::get(API_KEYS_PATH))?;
        if !response.is_success() {
            return Err(ApiError::Status(response.status));
        }
        response.json()
    }

    /// POST /api/user/api-keys
    pub fn create_key(&self, request: &CreateKeyRequest) -> Result<CreatedKey, ApiError> {
        let body = serde_json::to_vec(request)?;
        let response = self.execute(&ApiRequest::post(API_KEYS_PATH, "application/json", body))?;
        if !response.is_success() {
            return Err(ApiError::Status(response.status));
        }
        response.json()
    }

    /// DELETE /api/user/api-keys/{id}
    pub fn revoke_key(&self, id: u64) -> Result<(), ApiError> {
        let response = self.execute(&ApiRequest::delete(format!("{}/{}", API_KEYS_PATH, id)))?;
        if !response.is_success() {
            return Err(ApiError::Status(response.status));
        }
        Ok(())
    }
}
