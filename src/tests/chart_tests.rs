//! 图表单元测试
//! 测试历史数据解析、svg 生成与损坏数据的隔离

use crate::chart::{self, HistoryPoint};
use crate::config::ChartTheme;
use crate::dom::Document;

const HISTORY_JSON: &str = r#"[
    {"date": "2026-07-01", "downloads": 12},
    {"date": "2026-07-02", "downloads": 30},
    {"date": "2026-07-03", "downloads": 18},
    {"date": "2026-07-04", "downloads": 45}
]"#;

fn chart_doc(history_attr: &str) -> Document {
    Document::parse(&format!(
        r#"<div id="downloadChart" data-history='{}'><p id="chartFallback">loading</p></div>"#,
        history_attr
    ))
    .unwrap()
}

/// 测试历史 JSON 解析
#[test]
fn test_parse_history() {
    let history = chart::parse_history(HISTORY_JSON).unwrap();
    assert_eq!(history.len(), 4);
    assert_eq!(
        history[0],
        HistoryPoint {
            date: "2026-07-01".to_string(),
            downloads: 12
        }
    );
    assert_eq!(history[3].downloads, 45);

    assert!(chart::parse_history("not json").is_err());
    assert!(chart::parse_history(r#"{"date": "x"}"#).is_err());
}

/// 测试初始化后容器只含生成的 svg
#[test]
fn test_init_chart_builds_svg() {
    let mut doc = chart_doc(HISTORY_JSON);
    chart::init_chart(&mut doc, &ChartTheme::default());

    let container = doc.element_by_id("downloadChart").unwrap();
    let children = doc.children(container);
    assert_eq!(children.len(), 1);
    let svg = children[0];
    assert_eq!(doc.tag(svg), Some("svg"));
    assert_eq!(doc.attr(svg, "class"), Some("download-chart"));

    let html = doc.inner_html(container);
    // 渐变面积 + 折线
    assert!(html.contains("linearGradient"));
    assert!(html.contains("url(#downloadAreaGradient)"));
    assert!(html.contains("#3b82f6"));
    // 网格线与 y 轴标签
    assert!(html.contains("rgba(148, 163, 184, 0.1)"));
    assert!(html.contains("#64748b"));
    // 原占位内容被替换
    assert!(doc.element_by_id("chartFallback").is_none());
}

/// 测试折线与面积路径从同一组点生成
#[test]
fn test_chart_paths() {
    let mut doc = Document::new();
    let history = chart::parse_history(HISTORY_JSON).unwrap();
    let svg = chart::build_chart(&mut doc, &history, &ChartTheme::default());

    let paths: Vec<_> = doc
        .children(svg)
        .iter()
        .copied()
        .filter(|n| doc.tag(*n) == Some("path"))
        .collect();
    assert_eq!(paths.len(), 2);

    let area_d = doc.attr(paths[0], "d").unwrap();
    let line_d = doc.attr(paths[1], "d").unwrap();
    assert!(area_d.starts_with(line_d));
    assert!(area_d.ends_with('Z'));
    assert!(!line_d.contains('Z'));
    // 平滑曲线：至少一段三次贝塞尔
    assert!(line_d.contains('C'));
}

/// 测试损坏数据：记日志跳过，容器原样保留
#[test]
fn test_malformed_history_leaves_container() {
    let mut doc = chart_doc("oops not json");
    let container = doc.element_by_id("downloadChart").unwrap();
    let before = doc.inner_html(container);

    chart::init_chart(&mut doc, &ChartTheme::default());
    assert_eq!(doc.inner_html(container), before);
    assert!(doc.element_by_id("chartFallback").is_some());
}

/// 测试数据点不足时跳过绘制
#[test]
fn test_single_point_skipped() {
    let mut doc = chart_doc(r#"[{"date": "2026-07-01", "downloads": 3}]"#);
    let container = doc.element_by_id("downloadChart").unwrap();
    let before = doc.inner_html(container);

    chart::init_chart(&mut doc, &ChartTheme::default());
    assert_eq!(doc.inner_html(container), before);
}

/// 测试没有容器的页面不受影响
#[test]
fn test_missing_container_is_noop() {
    let mut doc = Document::parse("<main><p>no chart here</p></main>").unwrap();
    let before = doc.inner_html(doc.root());
    chart::init_chart(&mut doc, &ChartTheme::default());
    assert_eq!(doc.inner_html(doc.root()), before);
}
