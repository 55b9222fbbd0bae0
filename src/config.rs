//! 页面运行配置结构体

use serde::Deserialize;

/// 页面配置
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageConfig {
    /// REST 接口的基地址
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// 复制反馈恢复延时（毫秒）
    #[serde(default = "default_copy_feedback_ms")]
    pub copy_feedback_ms: u64,
    #[serde(default)]
    pub chart: ChartTheme,
}

impl PageConfig {
    pub fn from_json(input: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(input)
    }
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            copy_feedback_ms: default_copy_feedback_ms(),
            chart: ChartTheme::default(),
        }
    }
}

fn default_api_base() -> String { "http://127.0.0.1:5150".to_string() }
fn default_copy_feedback_ms() -> u64 { 2000 }

/// 图表尺寸与配色
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartTheme {
    #[serde(default = "default_chart_width")]
    pub width: f32,
    #[serde(default = "default_chart_height")]
    pub height: f32,
    #[serde(default = "default_line_color")]
    pub line_color: String,
    #[serde(default = "default_area_from")]
    pub area_from: String,
    #[serde(default = "default_area_to")]
    pub area_to: String,
    #[serde(default = "default_grid_color")]
    pub grid_color: String,
    #[serde(default = "default_label_color")]
    pub label_color: String,
}

impl Default for ChartTheme {
    fn default() -> Self {
        Self {
            width: default_chart_width(),
            height: default_chart_height(),
            line_color: default_line_color(),
            area_from: default_area_from(),
            area_to: default_area_to(),
            grid_color: default_grid_color(),
            label_color: default_label_color(),
        }
    }
}

fn default_chart_width() -> f32 { 640.0 }
fn default_chart_height() -> f32 { 260.0 }
fn default_line_color() -> String { "#3b82f6".to_string() }
fn default_area_from() -> String { "rgba(59, 130, 246, 0.5)".to_string() }
fn default_area_to() -> String { "rgba(59, 130, 246, 0.01)".to_string() }
fn default_grid_color() -> String { "rgba(148, 163, 184, 0.1)".to_string() }
fn default_label_color() -> String { "#64748b".to_string() }
