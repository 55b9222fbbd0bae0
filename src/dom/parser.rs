//! 标记解析器 - 把页面 HTML 片段解析为文档树

use super::{Document, NodeId};

/// 无内容元素：没有子节点也没有结束标签
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// 解析完整文档，顶层节点挂在合成根下
pub fn parse_document(input: &str) -> Result<Document, String> {
    let mut doc = Document::new();
    let nodes = parse_fragment(&mut doc, input)?;
    let root = doc.root();
    for node in nodes {
        doc.append_child(root, node);
    }
    Ok(doc)
}

/// 在已有文档的 arena 里解析一段标记，返回未挂载的顶层节点
pub fn parse_fragment(doc: &mut Document, input: &str) -> Result<Vec<NodeId>, String> {
    let mut parser = MarkupParser::new(input);
    parser.parse_nodes(doc)
}

/// 标记解析器
struct MarkupParser {
    input: Vec<char>,
    pos: usize,
}

impl MarkupParser {
    fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            pos: 0,
        }
    }

    fn parse_nodes(&mut self, doc: &mut Document) -> Result<Vec<NodeId>, String> {
        let mut nodes = Vec::new();

        while self.pos < self.input.len() {
            if self.starts_with("<!--") {
                self.skip_comment();
            } else if self.starts_with("<!") {
                // DOCTYPE 等声明直接跳过
                self.skip_until('>');
            } else if self.current_char() == '<' {
                if self.starts_with("</") {
                    break; // 结束标签，返回上层
                }
                if let Some(node) = self.parse_element(doc)? {
                    nodes.push(node);
                }
            } else if let Some(text) = self.parse_text() {
                if !text.trim().is_empty() {
                    nodes.push(doc.create_text(&text));
                }
            }
        }

        Ok(nodes)
    }

    fn parse_element(&mut self, doc: &mut Document) -> Result<Option<NodeId>, String> {
        self.expect('<')?;

        let tag_name = self.parse_tag_name();
        if tag_name.is_empty() {
            return Err("Empty tag name".to_string());
        }

        let node = doc.create_element(&tag_name);

        // 解析属性
        loop {
            self.skip_whitespace();
            if self.pos >= self.input.len() {
                return Err(format!("Unclosed tag: {}", tag_name));
            }
            if self.current_char() == '>' || self.starts_with("/>") {
                break;
            }

            let (name, value) = self.parse_attribute()?;
            doc.set_attr(node, &name, &value);
        }

        // 自闭合标签
        if self.starts_with("/>") {
            self.advance();
            self.advance();
            return Ok(Some(node));
        }

        self.expect('>')?;

        // 无内容元素没有子节点和结束标签
        if VOID_ELEMENTS.contains(&tag_name.as_str()) {
            return Ok(Some(node));
        }

        // 解析子节点
        let children = self.parse_nodes(doc)?;
        for child in children {
            doc.append_child(node, child);
        }

        // 解析结束标签
        if self.starts_with("</") {
            self.advance();
            self.advance();
            let end_tag = self.parse_tag_name();
            if end_tag != tag_name {
                return Err(format!("Mismatched tags: {} vs {}", tag_name, end_tag));
            }
            self.skip_whitespace();
            self.expect('>')?;
        }

        Ok(Some(node))
    }

    fn parse_tag_name(&mut self) -> String {
        let mut name = String::new();
        while self.pos < self.input.len() {
            let c = self.current_char();
            if c.is_alphanumeric() || c == '-' || c == '_' || c == ':' {
                name.push(c);
                self.advance();
            } else {
                break;
            }
        }
        name
    }

    fn parse_attribute(&mut self) -> Result<(String, String), String> {
        let name = self.parse_attribute_name();
        if name.is_empty() {
            return Err(format!("Expected attribute, got '{}'", self.current_char()));
        }

        self.skip_whitespace();

        if self.current_char() != '=' {
            // 布尔属性（disabled、checked 等）
            return Ok((name, String::new()));
        }

        self.advance(); // skip '='
        self.skip_whitespace();

        let value = self.parse_attribute_value()?;

        Ok((name, decode_entities(&value)))
    }

    fn parse_attribute_name(&mut self) -> String {
        let mut name = String::new();
        while self.pos < self.input.len() {
            let c = self.current_char();
            if c.is_alphanumeric() || c == '-' || c == '_' || c == ':' || c == '.' {
                name.push(c);
                self.advance();
            } else {
                break;
            }
        }
        name
    }

    fn parse_attribute_value(&mut self) -> Result<String, String> {
        let quote = self.current_char();
        if quote != '"' && quote != '\'' {
            // 无引号值
            let mut value = String::new();
            while self.pos < self.input.len() {
                let c = self.current_char();
                if c.is_whitespace() || c == '>' || c == '/' {
                    break;
                }
                value.push(c);
                self.advance();
            }
            return Ok(value);
        }

        self.advance(); // skip opening quote

        let mut value = String::new();
        while self.pos < self.input.len() && self.current_char() != quote {
            value.push(self.current_char());
            self.advance();
        }

        if self.pos < self.input.len() {
            self.advance(); // skip closing quote
        }

        Ok(value)
    }

    fn parse_text(&mut self) -> Option<String> {
        let mut text = String::new();
        while self.pos < self.input.len() && self.current_char() != '<' {
            text.push(self.current_char());
            self.advance();
        }

        if text.is_empty() {
            None
        } else {
            Some(decode_entities(&text))
        }
    }

    fn skip_comment(&mut self) {
        // Skip <!--
        for _ in 0..4 {
            self.advance();
        }

        while self.pos < self.input.len() && !self.starts_with("-->") {
            self.advance();
        }

        // Skip -->
        for _ in 0..3 {
            if self.pos < self.input.len() {
                self.advance();
            }
        }
    }

    fn skip_until(&mut self, c: char) {
        while self.pos < self.input.len() && self.current_char() != c {
            self.advance();
        }
        if self.pos < self.input.len() {
            self.advance();
        }
    }

    fn current_char(&self) -> char {
        if self.pos < self.input.len() {
            self.input[self.pos]
        } else {
            '\0'
        }
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    fn skip_whitespace(&mut self) {
        while self.pos < self.input.len() && self.current_char().is_whitespace() {
            self.advance();
        }
    }

    fn starts_with(&self, s: &str) -> bool {
        let chars: Vec<char> = s.chars().collect();
        for (i, c) in chars.iter().enumerate() {
            if self.pos + i >= self.input.len() || self.input[self.pos + i] != *c {
                return false;
            }
        }
        true
    }

    fn expect(&mut self, c: char) -> Result<(), String> {
        if self.current_char() == c {
            self.advance();
            Ok(())
        } else {
            Err(format!("Expected '{}', got '{}'", c, self.current_char()))
        }
    }
}

/// 还原常见字符实体
fn decode_entities(input: &str) -> String {
    if !input.contains('&') {
        return input.to_string();
    }
    input
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}
