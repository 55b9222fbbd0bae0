//! 下载历史图表 - 把历史数据渲染成平滑面积折线图
//!
//! 容器元素的 `data-history` 属性携带 `[{date, downloads}]` JSON。
//! 数据损坏只影响图表本身：记一条错误日志，容器保持原样。

use crate::config::ChartTheme;
use crate::dom::{Document, NodeId};
use crate::geometry::Point;
use crate::svg::SvgPath;
use serde::Deserialize;

/// 图表容器的元素 id
pub const CHART_CONTAINER_ID: &str = "downloadChart";
/// 历史数据所在的属性
pub const HISTORY_ATTR: &str = "data-history";

/// 网格分割数
const SPLIT_COUNT: usize = 4;
/// y 轴标签的留白
const LABEL_GUTTER: f32 = 40.0;
const MARGIN_RIGHT: f32 = 8.0;
const MARGIN_BOTTOM: f32 = 8.0;

/// 单日下载量
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HistoryPoint {
    pub date: String,
    pub downloads: u64,
}

/// 解析 `data-history` 的 JSON 负载
pub fn parse_history(raw: &str) -> Result<Vec<HistoryPoint>, serde_json::Error> {
    serde_json::from_str(raw)
}

/// 页面启动时的图表初始化
///
/// 没有容器就静默跳过；数据损坏记错误日志后跳过；
/// 成功时把生成的 svg 挂为容器的唯一子节点。
pub fn init_chart(doc: &mut Document, theme: &ChartTheme) {
    let Some(container) = doc.element_by_id(CHART_CONTAINER_ID) else {
        return;
    };

    let raw = match doc.attr(container, HISTORY_ATTR) {
        Some(raw) => raw.to_string(),
        None => {
            log::error!("chart container has no {} attribute", HISTORY_ATTR);
            return;
        }
    };

    let history = match parse_history(&raw) {
        Ok(history) => history,
        Err(e) => {
            log::error!("failed to parse download history: {}", e);
            return;
        }
    };

    if history.len() < 2 {
        // 一个点画不出折线
        log::debug!("download history too short, chart skipped");
        return;
    }

    let svg = build_chart(doc, &history, theme);
    doc.set_children(container, vec![svg]);
}

/// 从历史数据构建 svg 图表元素（未挂载）
pub fn build_chart(doc: &mut Document, history: &[HistoryPoint], theme: &ChartTheme) -> NodeId {
    let w = theme.width;
    let h = theme.height;
    let top = h * 0.1;
    let plot_w = w - LABEL_GUTTER - MARGIN_RIGHT;
    let plot_h = h - top - MARGIN_BOTTOM;

    let max_value = nice_ceil(history.iter().map(|p| p.downloads).max().unwrap_or(0));

    let points: Vec<Point> = history
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let x = LABEL_GUTTER + plot_w * i as f32 / (history.len() - 1) as f32;
            let ratio = p.downloads as f32 / max_value as f32;
            let y = top + plot_h * (1.0 - ratio);
            Point::new(x, y)
        })
        .collect();

    let svg = doc.create_element("svg");
    doc.set_attr(svg, "xmlns", "http://www.w3.org/2000/svg");
    doc.set_attr(svg, "class", "download-chart");
    doc.set_attr(svg, "width", &format_value(w));
    doc.set_attr(svg, "height", &format_value(h));
    doc.set_attr(svg, "viewBox", &format!("0 0 {} {}", format_value(w), format_value(h)));

    // 面积渐变
    let defs = doc.create_element("defs");
    let gradient = doc.create_element("linearGradient");
    doc.set_attr(gradient, "id", "downloadAreaGradient");
    doc.set_attr(gradient, "x1", "0");
    doc.set_attr(gradient, "y1", "0");
    doc.set_attr(gradient, "x2", "0");
    doc.set_attr(gradient, "y2", "1");
    let stop_from = doc.create_element("stop");
    doc.set_attr(stop_from, "offset", "0%");
    doc.set_attr(stop_from, "stop-color", &theme.area_from);
    let stop_to = doc.create_element("stop");
    doc.set_attr(stop_to, "offset", "100%");
    doc.set_attr(stop_to, "stop-color", &theme.area_to);
    doc.append_child(gradient, stop_from);
    doc.append_child(gradient, stop_to);
    doc.append_child(defs, gradient);
    doc.append_child(svg, defs);

    // 水平网格线和 y 轴标签；x 轴标签不画（原型里交给悬浮提示）
    for k in 0..=SPLIT_COUNT {
        let y = top + plot_h * k as f32 / SPLIT_COUNT as f32;
        let line = doc.create_element("line");
        doc.set_attr(line, "x1", &format_value(LABEL_GUTTER));
        doc.set_attr(line, "x2", &format_value(w - MARGIN_RIGHT));
        doc.set_attr(line, "y1", &format_value(y));
        doc.set_attr(line, "y2", &format_value(y));
        doc.set_attr(line, "stroke", &theme.grid_color);
        doc.set_attr(line, "stroke-width", "1");
        doc.append_child(svg, line);

        let label_value = max_value as f32 * (SPLIT_COUNT - k) as f32 / SPLIT_COUNT as f32;
        let text = doc.create_element("text");
        doc.set_attr(text, "x", &format_value(LABEL_GUTTER - 8.0));
        doc.set_attr(text, "y", &format_value(y + 4.0));
        doc.set_attr(text, "text-anchor", "end");
        doc.set_attr(text, "font-size", "12");
        doc.set_attr(text, "fill", &theme.label_color);
        let label = doc.create_text(&format_value(label_value));
        doc.append_child(text, label);
        doc.append_child(svg, text);
    }

    let baseline = top + plot_h;
    let line_path = smooth_path(&points);

    // 渐变面积
    let mut area_path = line_path.clone();
    area_path
        .line_to(points[points.len() - 1].x, baseline)
        .line_to(points[0].x, baseline)
        .close();
    let area = doc.create_element("path");
    doc.set_attr(area, "d", &area_path.to_attr());
    doc.set_attr(area, "fill", "url(#downloadAreaGradient)");
    doc.set_attr(area, "stroke", "none");
    doc.append_child(svg, area);

    // 折线
    let line = doc.create_element("path");
    doc.set_attr(line, "d", &line_path.to_attr());
    doc.set_attr(line, "fill", "none");
    doc.set_attr(line, "stroke", &theme.line_color);
    doc.set_attr(line, "stroke-width", "2");
    doc.append_child(svg, line);

    svg
}

/// Catmull-Rom 转三次贝塞尔的平滑折线
fn smooth_path(points: &[Point]) -> SvgPath {
    let mut path = SvgPath::new();
    if points.is_empty() {
        return path;
    }
    path.move_to(points[0].x, points[0].y);

    let n = points.len();
    for i in 0..n - 1 {
        let p_prev = points[i.saturating_sub(1)];
        let p0 = points[i];
        let p1 = points[i + 1];
        let p_next = points[(i + 2).min(n - 1)];

        let c1x = p0.x + (p1.x - p_prev.x) / 6.0;
        let c1y = p0.y + (p1.y - p_prev.y) / 6.0;
        let c2x = p1.x - (p_next.x - p0.x) / 6.0;
        let c2y = p1.y - (p_next.y - p0.y) / 6.0;
        path.cubic_to(c1x, c1y, c2x, c2y, p1.x, p1.y);
    }

    path
}

/// 向上取整到 1/2/5 × 10^k 的刻度上限
fn nice_ceil(value: u64) -> u64 {
    if value == 0 {
        return SPLIT_COUNT as u64;
    }
    let mut magnitude = 1u64;
    while magnitude * 10 <= value {
        magnitude *= 10;
    }
    for factor in [1, 2, 5, 10] {
        let candidate = magnitude * factor;
        if candidate >= value {
            return candidate;
        }
    }
    magnitude * 10
}

/// 数值标签：最多一位小数，去掉结尾的零
fn format_value(value: f32) -> String {
    let s = format!("{:.1}", value);
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}
