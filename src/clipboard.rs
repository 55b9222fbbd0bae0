//! 剪贴板模块 - 文本复制与按钮的临时反馈
//!
//! 复制成功后按钮内容换成对勾图标加 "Copied!"，失败换成 "Error"，
//! 到期后恢复原内容。时间由调用方注入，反馈靠 `poll` 驱动。

use crate::dom::{Document, NodeId};
use crate::icons::{self, IconRegistry};
use std::time::{Duration, Instant};
use thiserror::Error;

/// 反馈恢复的默认延时
pub const DEFAULT_FEEDBACK_DURATION: Duration = Duration::from_millis(2000);

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),
    #[error("clipboard write failed: {0}")]
    WriteFailed(String),
}

/// 文本剪贴板。系统实现走 arboard，测试用内存假件。
pub trait TextClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// 系统剪贴板
pub struct SystemClipboard {
    inner: arboard::Clipboard,
}

impl SystemClipboard {
    pub fn new() -> Result<Self, ClipboardError> {
        arboard::Clipboard::new()
            .map(|inner| Self { inner })
            .map_err(|e| ClipboardError::Unavailable(e.to_string()))
    }
}

impl TextClipboard for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.inner
            .set_text(text)
            .map_err(|e| ClipboardError::WriteFailed(e.to_string()))
    }
}

/// 当前反馈阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackPhase {
    Idle,
    Copied,
    Failed,
}

struct ActiveFeedback {
    button: NodeId,
    original_children: Vec<NodeId>,
    success: bool,
    revert_at: Instant,
}

/// 复制按钮的反馈状态机
pub struct CopyFeedback {
    duration: Duration,
    active: Option<ActiveFeedback>,
}

impl CopyFeedback {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            active: None,
        }
    }

    pub fn phase(&self) -> FeedbackPhase {
        match &self.active {
            None => FeedbackPhase::Idle,
            Some(active) if active.success => FeedbackPhase::Copied,
            Some(_) => FeedbackPhase::Failed,
        }
    }

    /// 复制文本并在按钮上显示结果反馈
    pub fn copy(
        &mut self,
        doc: &mut Document,
        registry: &IconRegistry,
        clipboard: &mut dyn TextClipboard,
        button: NodeId,
        text: &str,
        now: Instant,
    ) -> Result<(), ClipboardError> {
        // 上一次反馈还没恢复就先恢复，避免把反馈内容当成原内容保存
        self.revert(doc, registry);

        let result = clipboard.write_text(text);
        let success = result.is_ok();
        if let Err(e) = &result {
            log::error!("failed to copy: {}", e);
        }

        let original_children = doc.take_children(button);

        let icon = doc.create_element("i");
        doc.set_attr(icon, icons::PLACEHOLDER_ATTR, if success { "check" } else { "x" });
        doc.set_attr(icon, "style", "width:16px;height:16px;");
        let label = doc.create_text(if success { " Copied!" } else { " Error" });
        doc.set_children(button, vec![icon, label]);
        if success {
            doc.add_class(button, "success");
        }
        icons::render_within(doc, registry, button);

        self.active = Some(ActiveFeedback {
            button,
            original_children,
            success,
            revert_at: now + self.duration,
        });

        result
    }

    /// 到期后恢复按钮原内容
    pub fn poll(&mut self, doc: &mut Document, registry: &IconRegistry, now: Instant) {
        let due = self
            .active
            .as_ref()
            .map(|a| now >= a.revert_at)
            .unwrap_or(false);
        if due {
            self.revert(doc, registry);
        }
    }

    fn revert(&mut self, doc: &mut Document, registry: &IconRegistry) {
        if let Some(active) = self.active.take() {
            doc.set_children(active.button, active.original_children);
            if active.success {
                doc.remove_class(active.button, "success");
            }
            icons::render_within(doc, registry, active.button);
        }
    }
}

impl Default for CopyFeedback {
    fn default() -> Self {
        Self::new(DEFAULT_FEEDBACK_DURATION)
    }
}
