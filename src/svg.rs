//! SVG 路径构建 - 命令序列到 path 数据串

use crate::geometry::Point;

/// 路径命令
#[derive(Debug, Clone)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    QuadTo(Point, Point),         // 控制点, 终点
    CubicTo(Point, Point, Point), // 控制点1, 控制点2, 终点
    Close,
}

/// SVG 路径
#[derive(Debug, Clone, Default)]
pub struct SvgPath {
    commands: Vec<PathCommand>,
}

impl SvgPath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(&mut self, x: f32, y: f32) -> &mut Self {
        self.commands.push(PathCommand::MoveTo(Point::new(x, y)));
        self
    }

    pub fn line_to(&mut self, x: f32, y: f32) -> &mut Self {
        self.commands.push(PathCommand::LineTo(Point::new(x, y)));
        self
    }

    pub fn quad_to(&mut self, cx: f32, cy: f32, x: f32, y: f32) -> &mut Self {
        self.commands
            .push(PathCommand::QuadTo(Point::new(cx, cy), Point::new(x, y)));
        self
    }

    pub fn cubic_to(&mut self, c1x: f32, c1y: f32, c2x: f32, c2y: f32, x: f32, y: f32) -> &mut Self {
        self.commands.push(PathCommand::CubicTo(
            Point::new(c1x, c1y),
            Point::new(c2x, c2y),
            Point::new(x, y),
        ));
        self
    }

    pub fn close(&mut self) -> &mut Self {
        self.commands.push(PathCommand::Close);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    /// 生成 `d` 属性值
    pub fn to_attr(&self) -> String {
        let mut out = String::new();
        for cmd in &self.commands {
            if !out.is_empty() {
                out.push(' ');
            }
            match cmd {
                PathCommand::MoveTo(p) => {
                    out.push_str(&format!("M{} {}", fmt_num(p.x), fmt_num(p.y)));
                }
                PathCommand::LineTo(p) => {
                    out.push_str(&format!("L{} {}", fmt_num(p.x), fmt_num(p.y)));
                }
                PathCommand::QuadTo(c, p) => {
                    out.push_str(&format!(
                        "Q{} {} {} {}",
                        fmt_num(c.x),
                        fmt_num(c.y),
                        fmt_num(p.x),
                        fmt_num(p.y)
                    ));
                }
                PathCommand::CubicTo(c1, c2, p) => {
                    out.push_str(&format!(
                        "C{} {} {} {} {} {}",
                        fmt_num(c1.x),
                        fmt_num(c1.y),
                        fmt_num(c2.x),
                        fmt_num(c2.y),
                        fmt_num(p.x),
                        fmt_num(p.y)
                    ));
                }
                PathCommand::Close => out.push('Z'),
            }
        }
        out
    }
}

/// 坐标格式化：最多两位小数，去掉结尾的零
fn fmt_num(value: f32) -> String {
    let s = format!("{:.2}", value);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s.is_empty() || s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}
