//! 设置页控制器 - 分区导航、头像上传、API 密钥、注销账号
//!
//! 控制器持有页面内的可变状态（裁剪器、待上传文件），
//! 网络失败只返回类型化错误，文档树保持原状，由调用方弹提示。

mod cropper;

pub use cropper::{Cropper, CropperError, AUTO_CROP_RATIO, MIN_CROP_SIZE};

use crate::api::{
    avatar_refresh_url, ApiClient, ApiError, AvatarUpload, CreateKeyRequest, CreatedKey,
    ExpireMode, HttpTransport,
};
use crate::clipboard::{ClipboardError, TextClipboard};
use crate::dom::{Document, NodeId};
use crate::icons::{self, IconRegistry};
use thiserror::Error;

/// 注销账号需要逐字输入的确认语
pub const DELETE_CONFIRM_PHRASE: &str = "DELETE MY ACCOUNT";

#[derive(Debug, Error)]
pub enum SettingsError {
    /// 头像上传被服务端拒绝（非 2xx）
    #[error("avatar upload rejected")]
    AvatarRejected,
    #[error("avatar upload failed: {0}")]
    AvatarFailed(ApiError),
    #[error("failed to create key: {0}")]
    CreateKey(ApiError),
    #[error("failed to revoke key: {0}")]
    RevokeKey(ApiError),
    #[error("no avatar selected")]
    NoPendingAvatar,
    #[error(transparent)]
    Cropper(#[from] CropperError),
}

impl SettingsError {
    /// 对应的用户提示文案
    pub fn alert_message(&self) -> &'static str {
        match self {
            SettingsError::AvatarRejected => "Failed to upload avatar",
            SettingsError::AvatarFailed(_) => "Error uploading avatar",
            SettingsError::CreateKey(_) => "Failed to create key",
            SettingsError::RevokeKey(_) => "Failed to revoke key",
            SettingsError::NoPendingAvatar => "No avatar selected",
            SettingsError::Cropper(_) => "Unsupported image",
        }
    }
}

struct PendingAvatar {
    file_name: String,
    bytes: Vec<u8>,
}

/// 设置页控制器
pub struct SettingsController {
    user_pid: String,
    cropper: Option<Cropper>,
    pending_avatar: Option<PendingAvatar>,
}

impl SettingsController {
    pub fn new(user_pid: &str) -> Self {
        Self {
            user_pid: user_pid.to_string(),
            cropper: None,
            pending_avatar: None,
        }
    }

    /// 页面进入：按初始锚点激活分区，并拉取密钥列表
    pub fn init<T: HttpTransport>(
        &self,
        doc: &mut Document,
        registry: &IconRegistry,
        client: &ApiClient<T>,
        initial_hash: Option<&str>,
    ) {
        if let Some(hash) = initial_hash {
            self.activate_section(doc, hash.trim_start_matches('#'));
        }
        self.load_keys(doc, registry, client);
    }

    // ---- 分区导航 ----

    /// 激活设置分区；返回应写入地址栏的锚点
    pub fn activate_section(&self, doc: &mut Document, section: &str) -> Option<String> {
        let link = self
            .nav_links(doc)
            .into_iter()
            .find(|l| doc.attr(*l, "data-section") == Some(section))?;
        let target = doc.element_by_id(section)?;

        for other in self.nav_links(doc) {
            doc.remove_class(other, "active");
        }
        for section_el in doc.elements_with_class("settings-section") {
            doc.remove_class(section_el, "active");
        }

        doc.add_class(link, "active");
        doc.add_class(target, "active");
        Some(format!("#{}", section))
    }

    fn nav_links(&self, doc: &Document) -> Vec<NodeId> {
        let mut links = Vec::new();
        for nav in doc.elements_with_class("settings-nav") {
            for node in doc.descendants(nav) {
                if doc.tag(node) == Some("a") {
                    links.push(node);
                }
            }
        }
        links
    }

    // ---- 头像上传 ----

    /// 选择头像文件：创建裁剪器（销毁旧实例）并打开裁剪弹层
    pub fn select_avatar(
        &mut self,
        doc: &mut Document,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<(), SettingsError> {
        let cropper = Cropper::new(&bytes)?;
        self.cropper = Some(cropper);
        self.pending_avatar = Some(PendingAvatar {
            file_name: file_name.to_string(),
            bytes,
        });
        if let Some(modal) = doc.element_by_id("cropperModal") {
            doc.add_class(modal, "active");
        }
        Ok(())
    }

    /// 关闭裁剪弹层并销毁裁剪器
    pub fn cancel_crop(&mut self, doc: &mut Document) {
        if let Some(modal) = doc.element_by_id("cropperModal") {
            doc.remove_class(modal, "active");
        }
        self.cropper = None;
        self.pending_avatar = None;
    }

    /// 当前裁剪器（调整裁剪框用）
    pub fn cropper_mut(&mut self) -> Option<&mut Cropper> {
        self.cropper.as_mut()
    }

    /// 上传裁剪后的头像；成功后刷新页面头像并关闭弹层
    pub fn upload_avatar<T: HttpTransport>(
        &mut self,
        doc: &mut Document,
        client: &ApiClient<T>,
        now_ms: u64,
    ) -> Result<(), SettingsError> {
        let cropper = self.cropper.as_ref().ok_or(SettingsError::NoPendingAvatar)?;
        let pending = self
            .pending_avatar
            .as_ref()
            .ok_or(SettingsError::NoPendingAvatar)?;

        let upload = AvatarUpload {
            file_name: pending.file_name.clone(),
            bytes: pending.bytes.clone(),
            crop: cropper.data(),
        };

        client.upload_avatar(&upload).map_err(|e| match e {
            ApiError::Status(_) => SettingsError::AvatarRejected,
            other => SettingsError::AvatarFailed(other),
        })?;

        if let Some(avatar) = doc.element_by_id("currentAvatar") {
            doc.set_attr(avatar, "src", &avatar_refresh_url(&self.user_pid, now_ms));
        }
        self.cancel_crop(doc);
        Ok(())
    }

    // ---- API 密钥 ----

    /// 拉取并渲染密钥列表；失败时在列表位置显示错误文案
    pub fn load_keys<T: HttpTransport>(
        &self,
        doc: &mut Document,
        registry: &IconRegistry,
        client: &ApiClient<T>,
    ) {
        match client.list_keys() {
            Ok(keys) => render_key_list(doc, registry, &keys),
            Err(e) => {
                log::error!("failed to load API keys: {}", e);
                if let Some(container) = doc.element_by_id("apiKeysList") {
                    let p = doc.create_element("p");
                    doc.set_attr(p, "style", "color: var(--error);");
                    doc.set_text(p, "Failed to load keys");
                    doc.set_children(container, vec![p]);
                }
            }
        }
    }

    /// 吊销密钥并刷新列表；未经确认直接返回
    pub fn revoke_key<T: HttpTransport>(
        &self,
        doc: &mut Document,
        registry: &IconRegistry,
        client: &ApiClient<T>,
        id: u64,
        confirmed: bool,
    ) -> Result<(), SettingsError> {
        if !confirmed {
            return Ok(());
        }
        client.revoke_key(id).map_err(SettingsError::RevokeKey)?;
        self.load_keys(doc, registry, client);
        Ok(())
    }

    /// 提交创建密钥表单
    ///
    /// 成功后把完整密钥写进展示区（只此一次机会），
    /// 关闭弹层、重置表单并刷新列表。
    pub fn submit_create_key<T: HttpTransport>(
        &self,
        doc: &mut Document,
        registry: &IconRegistry,
        client: &ApiClient<T>,
        form: &mut CreateKeyForm,
        now_secs: u64,
    ) -> Result<CreatedKey, SettingsError> {
        let request = form.to_request(now_secs);
        let created = client
            .create_key(&request)
            .map_err(SettingsError::CreateKey)?;

        if !created.key.is_empty() {
            if let Some(value) = doc.element_by_id("newKeyValue") {
                doc.set_text(value, &created.key);
            }
            if let Some(display) = doc.element_by_id("newKeyDisplay") {
                doc.set_attr(display, "style", "display: block;");
            }
            icons::render(doc, registry);
        }

        self.close_create_key_modal(doc, form);
        self.load_keys(doc, registry, client);
        Ok(created)
    }

    /// 关闭创建弹层并重置表单状态
    pub fn close_create_key_modal(&self, doc: &mut Document, form: &mut CreateKeyForm) {
        if let Some(modal) = doc.element_by_id("createKeyModal") {
            doc.remove_class(modal, "active");
        }
        form.reset();
        if let Some(group) = doc.element_by_id("expireValueGroup") {
            doc.set_attr(group, "style", "display: none;");
        }
    }

    /// 复制新建的密钥（无按钮反馈）
    pub fn copy_new_key(
        &self,
        doc: &Document,
        clipboard: &mut dyn TextClipboard,
    ) -> Result<(), ClipboardError> {
        let text = doc
            .element_by_id("newKeyValue")
            .map(|n| doc.text_content(n))
            .unwrap_or_default();
        clipboard.write_text(&text)
    }

    // ---- 注销账号 ----

    /// 确认输入变化：只有逐字匹配时注销按钮才可用
    pub fn delete_confirm_changed(&self, doc: &mut Document, input: &str) {
        let Some(button) = doc.element_by_id("deleteAccountBtn") else {
            return;
        };
        if delete_button_enabled(input) {
            doc.remove_attr(button, "disabled");
        } else {
            doc.set_attr(button, "disabled", "");
        }
    }
}

/// 注销按钮是否可用
pub fn delete_button_enabled(input: &str) -> bool {
    input == DELETE_CONFIRM_PHRASE
}

/// 创建密钥表单的值状态
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateKeyForm {
    pub name: String,
    pub permissions: Vec<String>,
    pub expire_on: ExpireMode,
    pub expire_value: Option<u64>,
}

impl Default for CreateKeyForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            permissions: Vec::new(),
            expire_on: ExpireMode::Never,
            expire_value: None,
        }
    }
}

impl CreateKeyForm {
    /// 切换过期方式，同步输入组的可见性和标签
    pub fn set_expire_mode(&mut self, doc: &mut Document, mode: ExpireMode) {
        self.expire_on = mode;
        let label_text = mode.value_label();
        if let Some(group) = doc.element_by_id("expireValueGroup") {
            let display = if label_text.is_some() {
                "display: block;"
            } else {
                "display: none;"
            };
            doc.set_attr(group, "style", display);
        }
        if let Some(label) = doc.element_by_id("expireValueLabel") {
            if let Some(text) = label_text {
                doc.set_text(label, text);
            }
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn to_request(&self, now_secs: u64) -> CreateKeyRequest {
        CreateKeyRequest::new(
            &self.name,
            &self.permissions,
            self.expire_on,
            self.expire_value,
            now_secs,
        )
    }
}

/// 把密钥列表渲染进 #apiKeysList
fn render_key_list(doc: &mut Document, registry: &IconRegistry, keys: &[crate::api::ApiKey]) {
    let Some(container) = doc.element_by_id("apiKeysList") else {
        return;
    };

    if keys.is_empty() {
        let p = doc.create_element("p");
        doc.set_attr(p, "style", "color: var(--text-muted);");
        doc.set_text(p, "No API keys yet. Create one to get started.");
        doc.set_children(container, vec![p]);
        return;
    }

    let mut cards = Vec::new();
    for key in keys {
        let card = doc.create_element("div");
        doc.set_attr(card, "class", "api-key-card");

        let info = doc.create_element("div");
        doc.set_attr(info, "class", "api-key-info");

        let title = doc.create_element("h4");
        doc.set_text(title, &key.name);
        doc.append_child(info, title);

        let meta = doc.create_element("p");
        doc.set_text(
            meta,
            &format!(
                "Created {} • Used {} times",
                format_created(&key.created_at),
                key.usage_count
            ),
        );
        doc.append_child(info, meta);

        let permissions = doc.create_element("div");
        doc.set_attr(permissions, "class", "api-key-permissions");
        for permission in &key.permissions {
            let span = doc.create_element("span");
            doc.set_text(span, permission);
            doc.append_child(permissions, span);
        }
        doc.append_child(info, permissions);
        doc.append_child(card, info);

        let revoke = doc.create_element("button");
        doc.set_attr(revoke, "class", "btn btn-secondary btn-sm");
        doc.set_attr(revoke, "style", "color: var(--error);");
        doc.set_attr(revoke, "data-key-id", &key.id.to_string());
        let icon = doc.create_element("i");
        doc.set_attr(icon, icons::PLACEHOLDER_ATTR, "trash-2");
        doc.append_child(revoke, icon);
        doc.append_child(card, revoke);

        cards.push(card);
    }
    doc.set_children(container, cards);
    icons::render_within(doc, registry, container);
}

/// 时间戳只取日期部分展示
fn format_created(created_at: &str) -> &str {
    created_at.split('T').next().unwrap_or(created_at)
}
