//! 占位符渲染器 - 扫描文档树并替换图标占位符
//!
//! 分两步：`plan` 对树快照做纯扫描，产出替换操作列表；
//! `apply` 是唯一改动文档树的薄边界。`render` 把两步串起来。
//! 已渲染的图标不再携带占位属性，重复调用是无操作。

use crate::dom::{parse_fragment, Document, NodeId};
use crate::icons::IconRegistry;

/// 占位符属性：值为请求的图标名
pub const PLACEHOLDER_ATTR: &str = "data-lucide";

/// 单个替换操作
#[derive(Debug, Clone)]
pub struct IconReplacement {
    pub placeholder: NodeId,
    pub name: String,
}

/// 一次扫描的结果
#[derive(Debug, Clone, Default)]
pub struct RenderPlan {
    pub replacements: Vec<IconReplacement>,
    /// 引用了未注册图标的占位符，保持原样
    pub missing: Vec<(NodeId, String)>,
}

impl RenderPlan {
    pub fn is_empty(&self) -> bool {
        self.replacements.is_empty() && self.missing.is_empty()
    }
}

/// 纯扫描：收集 `root` 之下全部占位符的替换操作，不改动文档
pub fn plan(doc: &Document, registry: &IconRegistry, root: NodeId) -> RenderPlan {
    let mut plan = RenderPlan::default();

    for node in doc.elements_with_attr(root, PLACEHOLDER_ATTR) {
        let name = match doc.attr(node, PLACEHOLDER_ATTR) {
            Some(name) => name.to_string(),
            None => continue,
        };
        if registry.contains(&name) {
            plan.replacements.push(IconReplacement {
                placeholder: node,
                name,
            });
        } else {
            plan.missing.push((node, name));
        }
    }

    plan
}

/// 执行替换：把每个占位符换成完整的 svg 元素
///
/// 占位符上的 `class`（追加在基础 class 之后）、`style`、`id` 会保留。
pub fn apply(doc: &mut Document, registry: &IconRegistry, plan: &RenderPlan) {
    for replacement in &plan.replacements {
        // 占位符可能已被更早的操作替换掉
        if doc.attr(replacement.placeholder, PLACEHOLDER_ATTR) != Some(replacement.name.as_str())
        {
            continue;
        }
        let Some(markup) = registry.get(&replacement.name) else {
            continue;
        };
        let markup = markup.to_string();

        let extra_class = doc
            .attr(replacement.placeholder, "class")
            .map(|s| s.to_string());
        let style = doc
            .attr(replacement.placeholder, "style")
            .map(|s| s.to_string());
        let dom_id = doc
            .attr(replacement.placeholder, "id")
            .map(|s| s.to_string());

        let children = match parse_fragment(doc, &markup) {
            Ok(children) => children,
            Err(e) => {
                log::warn!("bad icon markup for '{}': {}", replacement.name, e);
                continue;
            }
        };

        let svg = doc.create_element("svg");
        let mut class = format!("lucide lucide-{}", replacement.name);
        if let Some(extra) = extra_class {
            if !extra.is_empty() {
                class = format!("{} {}", class, extra);
            }
        }
        doc.set_attr(svg, "xmlns", "http://www.w3.org/2000/svg");
        doc.set_attr(svg, "class", &class);
        doc.set_attr(svg, "width", "24");
        doc.set_attr(svg, "height", "24");
        doc.set_attr(svg, "viewBox", "0 0 24 24");
        doc.set_attr(svg, "fill", "none");
        doc.set_attr(svg, "stroke", "currentColor");
        doc.set_attr(svg, "stroke-width", "2");
        doc.set_attr(svg, "stroke-linecap", "round");
        doc.set_attr(svg, "stroke-linejoin", "round");
        if let Some(style) = style {
            doc.set_attr(svg, "style", &style);
        }
        if let Some(dom_id) = dom_id {
            doc.set_attr(svg, "id", &dom_id);
        }
        for child in children {
            doc.append_child(svg, child);
        }

        doc.replace_node(replacement.placeholder, svg);
    }
}

/// 扫描整个文档并渲染图标；未注册的图标各记一条告警后跳过
pub fn render(doc: &mut Document, registry: &IconRegistry) {
    let root = doc.root();
    render_within(doc, registry, root);
}

/// 只处理 `root` 之下的占位符（动态插入内容后重渲染用）
pub fn render_within(doc: &mut Document, registry: &IconRegistry, root: NodeId) {
    let plan = plan(doc, registry, root);
    for (_, name) in &plan.missing {
        log::warn!("icon not found: {}", name);
    }
    apply(doc, registry, &plan);
}
