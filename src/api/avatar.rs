//! 头像上传接口 - multipart 编码与缓存刷新地址

use super::{ApiClient, ApiError, ApiRequest, HttpTransport};

pub const AVATAR_PATH: &str = "/api/user/avatar";

/// 表单边界串
const BOUNDARY: &str = "----registry-ui-form-boundary";

/// 取整后的裁剪几何（像素）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropGeometry {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// 待上传的头像：原始文件 + 裁剪几何，裁剪在服务端执行
#[derive(Debug, Clone)]
pub struct AvatarUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub crop: CropGeometry,
}

/// 手工编码 multipart/form-data 请求体，返回 (Content-Type, body)
pub fn encode_multipart(upload: &AvatarUpload) -> (String, Vec<u8>) {
    let mut body = Vec::new();

    let push_text_field = |body: &mut Vec<u8>, name: &str, value: &str| {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name).as_bytes(),
        );
        body.extend_from_slice(value.as_bytes());
        body.extend_from_slice(b"\r\n");
    };

    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"file\"; filename=\"{}\"\r\n",
            upload.file_name.replace('"', "_")
        )
        .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
    body.extend_from_slice(&upload.bytes);
    body.extend_from_slice(b"\r\n");

    push_text_field(&mut body, "x", &upload.crop.x.to_string());
    push_text_field(&mut body, "y", &upload.crop.y.to_string());
    push_text_field(&mut body, "width", &upload.crop.width.to_string());
    push_text_field(&mut body, "height", &upload.crop.height.to_string());

    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());

    (
        format!("multipart/form-data; boundary={}", BOUNDARY),
        body,
    )
}

/// 上传成功后的头像地址，带时间戳绕过缓存
pub fn avatar_refresh_url(user_pid: &str, timestamp_ms: u64) -> String {
    format!("/uploads/avatars/{}.webp?t={}", user_pid, timestamp_ms)
}

impl<T: HttpTransport> ApiClient<T> {
    /// POST /api/user/avatar
    pub fn upload_avatar(&self, upload: &AvatarUpload) -> Result<(), ApiError> {
        let (content_type, body) = encode_multipart(upload);
        let response = self.execute(&ApiRequest::post(AVATAR_PATH, &content_type, body))?;
        if !response.is_success() {
            return Err(ApiError::Status(response.status));
        }
        Ok(())
    }
}
