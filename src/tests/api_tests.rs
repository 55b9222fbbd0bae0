//! 接口客户端单元测试
//! 测试过期换算、请求序列化、防御式反序列化和请求路径

use super::support::RecordingTransport;
use crate::api::{
    avatar_refresh_url, encode_multipart, expire_value, ApiClient, ApiError, AvatarUpload,
    CreateKeyRequest, CropGeometry, ExpireMode, Method, API_KEYS_PATH, SECONDS_PER_DAY,
};

/// 测试 expire_value 的三种模式
#[test]
fn test_expire_value() {
    let now = 1_755_000_000u64;

    assert_eq!(expire_value(ExpireMode::Never, Some(30), now), None);
    assert_eq!(
        expire_value(ExpireMode::Date, Some(30), now),
        Some(now + 30 * SECONDS_PER_DAY)
    );
    // 缺省 30 天
    assert_eq!(
        expire_value(ExpireMode::Date, None, now),
        Some(now + 30 * 86400)
    );
    assert_eq!(expire_value(ExpireMode::Usage, Some(7), now), Some(7));
    // 缺省 100 次
    assert_eq!(expire_value(ExpireMode::Usage, None, now), Some(100));
}

/// 测试 Never 序列化为显式 null
#[test]
fn test_create_request_serializes_null() {
    let request = CreateKeyRequest::new("ci-key", &["publish".to_string()], ExpireMode::Never, None, 0);
    let value = serde_json::to_value(&request).unwrap();

    assert_eq!(value["name"], "ci-key");
    assert_eq!(value["permissions"][0], "publish");
    assert_eq!(value["expire_on"], "Never");
    assert!(value["expire_value"].is_null());
    // 字段存在而不是被省略
    assert!(value.as_object().unwrap().contains_key("expire_value"));
}

/// 测试 Date 模式：30 天输入换算为到期时刻
#[test]
fn test_create_request_date_mode() {
    let now = 1_700_000_000u64;
    let request = CreateKeyRequest::new("backup", &[], ExpireMode::Date, Some(30), now);
    let value = serde_json::to_value(&request).unwrap();

    assert_eq!(value["expire_on"], "Date");
    assert_eq!(value["expire_value"], now + 30 * 86400);
}

/// 测试密钥列表解析，包括非数组 permissions 的防御处理
#[test]
fn test_list_keys_defensive_permissions() {
    let transport = RecordingTransport::new();
    transport.push_response(
        200,
        r#"[
            {"id": 1, "name": "ci", "created_at": "2026-01-02T03:04:05Z", "usage_count": 4,
             "permissions": ["publish", "yank"]},
            {"id": 2, "name": "odd", "created_at": "2026-02-03T00:00:00Z", "usage_count": 0,
             "permissions": "publish"},
            {"id": 3, "name": "bare", "created_at": "2026-03-04T00:00:00Z", "usage_count": 1}
        ]"#,
    );
    let client = ApiClient::new(transport);

    let keys = client.list_keys().unwrap();
    assert_eq!(keys.len(), 3);
    assert_eq!(keys[0].permissions, vec!["publish", "yank"]);
    // 非数组值按空列表处理
    assert!(keys[1].permissions.is_empty());
    // 字段缺失同样为空
    assert!(keys[2].permissions.is_empty());
}

/// 测试列表请求的路径与方法
#[test]
fn test_list_keys_request_shape() {
    let transport = RecordingTransport::new();
    transport.push_response(200, "[]");
    let client = ApiClient::new(transport);
    client.list_keys().unwrap();

    let requests = client_requests(&client);
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, Method::Get);
    assert_eq!(requests[0].path, API_KEYS_PATH);
}

/// 测试吊销只发一次 DELETE，且路径带 id
#[test]
fn test_revoke_key_single_delete() {
    let transport = RecordingTransport::new();
    transport.push_response(200, "");
    let client = ApiClient::new(transport);
    client.revoke_key(42).unwrap();

    let requests = client_requests(&client);
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, Method::Delete);
    assert_eq!(requests[0].path, "/api/user/api-keys/42");
    assert!(requests[0].body.is_none());
}

/// 测试创建请求的负载与返回解析
#[test]
fn test_create_key_round_trip() {
    let transport = RecordingTransport::new();
    transport.push_response(200, r#"{"key": "odk_live_abc123"}"#);
    let client = ApiClient::new(transport);

    let request = CreateKeyRequest::new("deploy", &["publish".to_string()], ExpireMode::Usage, Some(50), 0);
    let created = client.create_key(&request).unwrap();
    assert_eq!(created.key, "odk_live_abc123");

    let requests = client_requests(&client);
    assert_eq!(requests[0].method, Method::Post);
    assert_eq!(requests[0].path, API_KEYS_PATH);
    assert_eq!(requests[0].content_type.as_deref(), Some("application/json"));

    let sent: serde_json::Value =
        serde_json::from_slice(requests[0].body.as_ref().unwrap()).unwrap();
    assert_eq!(sent["name"], "deploy");
    assert_eq!(sent["expire_on"], "Usage");
    assert_eq!(sent["expire_value"], 50);
}

/// 测试非 2xx 状态映射为 Status 错误
#[test]
fn test_error_status() {
    let transport = RecordingTransport::new();
    transport.push_response(500, "boom");
    let client = ApiClient::new(transport);

    match client.list_keys() {
        Err(ApiError::Status(500)) => {}
        other => panic!("unexpected result: {:?}", other.map(|_| ())),
    }
}

/// 测试 multipart 编码包含文件与裁剪字段
#[test]
fn test_multipart_encoding() {
    let upload = AvatarUpload {
        file_name: "avatar.png".to_string(),
        bytes: vec![0x89, 0x50, 0x4e, 0x47],
        crop: CropGeometry {
            x: 25,
            y: 5,
            width: 50,
            height: 50,
        },
    };
    let (content_type, body) = encode_multipart(&upload);
    let text = String::from_utf8_lossy(&body);

    assert!(content_type.starts_with("multipart/form-data; boundary="));
    let boundary = content_type.split("boundary=").nth(1).unwrap();
    assert!(text.contains(&format!("--{}\r\n", boundary)));
    assert!(text.contains(r#"name="file"; filename="avatar.png""#));
    assert!(text.contains("name=\"x\"\r\n\r\n25\r\n"));
    assert!(text.contains("name=\"y\"\r\n\r\n5\r\n"));
    assert!(text.contains("name=\"width\"\r\n\r\n50\r\n"));
    assert!(text.contains("name=\"height\"\r\n\r\n50\r\n"));
    assert!(text.ends_with(&format!("--{}--\r\n", boundary)));
}

/// 测试头像刷新地址带时间戳
#[test]
fn test_avatar_refresh_url() {
    assert_eq!(
        avatar_refresh_url("u_7f3k", 1_755_012_345_678),
        "/uploads/avatars/u_7f3k.webp?t=1755012345678"
    );
}

fn client_requests(client: &ApiClient<RecordingTransport>) -> Vec<crate::api::ApiRequest> {
    client.transport_ref().requests()
}
