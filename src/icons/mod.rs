//! 图标模块 - 注册表与占位符渲染

mod registry;
mod renderer;

pub use registry::IconRegistry;
pub use renderer::{
    apply, plan, render, render_within, IconReplacement, RenderPlan, PLACEHOLDER_ATTR,
};
