//! 页面运行时 - 文档加载、启动与事件分发
//!
//! 单线程事件驱动：嵌入方把点击、定时等离散事件喂进来，
//! 这里串起图标渲染、图表初始化、下拉分发和复制反馈。
//! 所有失败都只降级单个功能，不会拖垮页面。

use crate::chart;
use crate::clipboard::{CopyFeedback, TextClipboard};
use crate::config::PageConfig;
use crate::dom::{Document, NodeId};
use crate::dropdown;
use crate::icons::{self, IconRegistry};
use std::time::{Duration, Instant};

/// 一个已加载的页面
pub struct Page {
    doc: Document,
    config: PageConfig,
    feedback: CopyFeedback,
    alerts: Vec<String>,
}

impl Page {
    /// 解析页面标记
    pub fn load(html: &str, config: PageConfig) -> Result<Self, String> {
        let doc = Document::parse(html)?;
        let feedback = CopyFeedback::new(Duration::from_millis(config.copy_feedback_ms));
        Ok(Self {
            doc,
            config,
            feedback,
            alerts: Vec::new(),
        })
    }

    /// 页面就绪：渲染全部图标占位符并初始化下载图表
    pub fn boot(&mut self) {
        icons::render(&mut self.doc, IconRegistry::builtin());
        chart::init_chart(&mut self.doc, &self.config.chart);
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.doc
    }

    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    /// 文档级点击分发（目前只有下拉菜单关心）
    pub fn handle_click(&mut self, target: Option<NodeId>) {
        dropdown::handle_document_click(&mut self.doc, target);
    }

    /// 带按钮反馈的复制；剪贴板失败时反馈自己会显示错误态
    pub fn copy_text(
        &mut self,
        clipboard: &mut dyn TextClipboard,
        button: NodeId,
        text: &str,
        now: Instant,
    ) {
        let _ = self.feedback.copy(
            &mut self.doc,
            IconRegistry::builtin(),
            clipboard,
            button,
            text,
            now,
        );
    }

    /// 推进时间相关状态（反馈恢复）
    pub fn tick(&mut self, now: Instant) {
        self.feedback
            .poll(&mut self.doc, IconRegistry::builtin(), now);
    }

    pub fn feedback(&self) -> &CopyFeedback {
        &self.feedback
    }

    /// 挂一条待展示的用户提示
    pub fn alert(&mut self, message: impl Into<String>) {
        self.alerts.push(message.into());
    }

    /// 取走积压的提示
    pub fn drain_alerts(&mut self) -> Vec<String> {
        std::mem::take(&mut self.alerts)
    }
}
