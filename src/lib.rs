//! Registry UI - 包仓库站点的页面运行时
//! 图标渲染、下拉菜单、剪贴板反馈、下载图表与设置页控制

mod geometry;
mod svg;

pub use geometry::{Point, Rect};
pub use svg::SvgPath;

// 文档树与标记解析
pub mod dom;

// 图标注册表与渲染器
pub mod icons;

// 下载历史图表
pub mod chart;

// 剪贴板与复制反馈
pub mod clipboard;

// REST API 客户端
pub mod api;

// 设置页控制器
pub mod settings;

// 下拉菜单
pub mod dropdown;

// 页面配置
pub mod config;

// 页面运行时
pub mod runtime;

pub use config::PageConfig;
pub use dom::{Document, NodeId};
pub use icons::IconRegistry;
pub use runtime::Page;

// 单元测试
#[cfg(test)]
mod tests;
