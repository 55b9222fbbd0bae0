//! 图标渲染单元测试
//! 测试占位符替换、属性保留、缺失图标和幂等性

use crate::dom::{parse_fragment, Document};
use crate::icons::{self, IconRegistry};

fn render_doc(html: &str) -> Document {
    let mut doc = Document::parse(html).unwrap();
    icons::render(&mut doc, IconRegistry::builtin());
    doc
}

/// 测试占位符被替换为完整的 svg 元素
#[test]
fn test_render_replaces_placeholder() {
    let doc = render_doc(r#"<i data-lucide="plus"></i>"#);
    let svg = doc.children(doc.root())[0];

    assert_eq!(doc.tag(svg), Some("svg"));
    assert_eq!(doc.attr(svg, "class"), Some("lucide lucide-plus"));
    assert_eq!(doc.attr(svg, "width"), Some("24"));
    assert_eq!(doc.attr(svg, "height"), Some("24"));
    assert_eq!(doc.attr(svg, "viewBox"), Some("0 0 24 24"));
    assert_eq!(doc.attr(svg, "fill"), Some("none"));
    assert_eq!(doc.attr(svg, "stroke"), Some("currentColor"));
    assert_eq!(doc.attr(svg, "stroke-width"), Some("2"));
    assert_eq!(doc.attr(svg, "stroke-linecap"), Some("round"));
    assert_eq!(doc.attr(svg, "stroke-linejoin"), Some("round"));
    // 占位属性不跟过来，重复渲染因此是无操作
    assert_eq!(doc.attr(svg, icons::PLACEHOLDER_ATTR), None);

    let paths = doc.children(svg);
    assert_eq!(paths.len(), 2);
    assert_eq!(doc.attr(paths[0], "d"), Some("M5 12h14"));
    assert_eq!(doc.attr(paths[1], "d"), Some("M12 5v14"));
}

/// 测试占位符上的 class/style/id 保留到替换元素
#[test]
fn test_preserves_class_style_id() {
    let doc = render_doc(
        r#"<i data-lucide="search" class="toolbar-icon dim" style="width:16px;" id="searchIcon"></i>"#,
    );
    let svg = doc.children(doc.root())[0];

    // 追加在基础 class 之后，不是覆盖
    assert_eq!(
        doc.attr(svg, "class"),
        Some("lucide lucide-search toolbar-icon dim")
    );
    assert_eq!(doc.attr(svg, "style"), Some("width:16px;"));
    assert_eq!(doc.attr(svg, "id"), Some("searchIcon"));
}

/// 测试每个内置图标的标记都原样进入替换元素
#[test]
fn test_builtin_markup_fidelity() {
    let registry = IconRegistry::builtin();
    assert!(registry.len() >= 24);

    for name in registry.names() {
        let mut doc = Document::parse(&format!(r#"<i data-lucide="{}"></i>"#, name)).unwrap();
        icons::render(&mut doc, registry);
        let svg = doc.children(doc.root())[0];
        assert_eq!(doc.tag(svg), Some("svg"), "icon {} not rendered", name);

        // 期望内容：同一解析器走一遍注册表标记
        let mut expected_doc = Document::new();
        let expected_root = expected_doc.root();
        let nodes = parse_fragment(&mut expected_doc, registry.get(name).unwrap()).unwrap();
        for node in nodes {
            expected_doc.append_child(expected_root, node);
        }
        assert_eq!(
            doc.inner_html(svg),
            expected_doc.inner_html(expected_root),
            "icon {} markup mismatch",
            name
        );
    }
}

/// 测试未注册图标：占位符原样保留，诊断恰好一条
#[test]
fn test_missing_icon_left_untouched() {
    let mut doc = Document::parse(r#"<i data-lucide="does-not-exist" class="x"></i>"#).unwrap();
    let placeholder = doc.children(doc.root())[0];
    let before = doc.outer_html(placeholder);

    let plan = icons::plan(&doc, IconRegistry::builtin(), doc.root());
    assert_eq!(plan.replacements.len(), 0);
    assert_eq!(plan.missing.len(), 1);
    assert_eq!(plan.missing[0].1, "does-not-exist");

    icons::render(&mut doc, IconRegistry::builtin());
    assert_eq!(doc.outer_html(placeholder), before);
    assert_eq!(doc.attr(placeholder, icons::PLACEHOLDER_ATTR), Some("does-not-exist"));
}

/// 测试缺失图标不影响同一棵树里的其它占位符
#[test]
fn test_per_element_isolation() {
    let doc = render_doc(
        r#"<div><i data-lucide="ghost"></i><i data-lucide="copy" id="ok"></i></div>"#,
    );
    let wrapper = doc.children(doc.root())[0];
    let children = doc.children(wrapper);

    assert_eq!(doc.tag(children[0]), Some("i"));
    assert_eq!(doc.tag(children[1]), Some("svg"));
    assert_eq!(doc.attr(children[1], "id"), Some("ok"));
}

/// 测试幂等性：第二次渲染后树不变
#[test]
fn test_render_idempotent() {
    let mut doc = Document::parse(
        r#"<nav><i data-lucide="package"></i><span>Packages</span><i data-lucide="user" class="avatar"></i></nav>"#,
    )
    .unwrap();
    let registry = IconRegistry::builtin();

    icons::render(&mut doc, registry);
    let after_first = doc.inner_html(doc.root());

    icons::render(&mut doc, registry);
    assert_eq!(doc.inner_html(doc.root()), after_first);

    // 渲染过的树上再也扫不出占位符
    let plan = icons::plan(&doc, registry, doc.root());
    assert!(plan.is_empty());
}

/// 测试 plan 是纯扫描，不改文档
#[test]
fn test_plan_does_not_mutate() {
    let doc = Document::parse(r#"<i data-lucide="key"></i>"#).unwrap();
    let before = doc.inner_html(doc.root());
    let plan = icons::plan(&doc, IconRegistry::builtin(), doc.root());
    assert_eq!(plan.replacements.len(), 1);
    assert_eq!(doc.inner_html(doc.root()), before);
}

/// 测试子树渲染不越界
#[test]
fn test_render_within_scopes_to_subtree() {
    let mut doc = Document::parse(
        r#"<div id="inside"><i data-lucide="plus"></i></div><div id="outside"><i data-lucide="plus"></i></div>"#,
    )
    .unwrap();
    let inside = doc.element_by_id("inside").unwrap();
    icons::render_within(&mut doc, IconRegistry::builtin(), inside);

    assert_eq!(doc.tag(doc.children(inside)[0]), Some("svg"));
    let outside = doc.element_by_id("outside").unwrap();
    assert_eq!(doc.tag(doc.children(outside)[0]), Some("i"));
}
