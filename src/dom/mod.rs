//! 文档树模块 - 页面标记的节点树
//!
//! 浏览器里的活动 DOM 在这里变成一棵自持有的 arena 树：
//! 节点统一存放在 `Document` 内部，`NodeId` 是索引句柄。
//! 被替换下来的节点保持分配但脱离树（detached），
//! 活动树是从根可达的部分，因此保存/恢复按钮内容等操作只需交换子节点列表。

mod parser;

pub use parser::{parse_document, parse_fragment};

use std::collections::HashMap;

/// 节点句柄
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

/// 元素数据：标签名 + 属性表
#[derive(Debug, Clone, PartialEq)]
pub struct ElementData {
    pub tag: String,
    pub attributes: HashMap<String, String>,
}

impl ElementData {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            attributes: HashMap::new(),
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(|s| s.as_str())
    }

    pub fn has_class(&self, class_name: &str) -> bool {
        if let Some(classes) = self.attributes.get("class") {
            classes.split_whitespace().any(|c| c == class_name)
        } else {
            false
        }
    }
}

/// 节点内容
#[derive(Debug, Clone, PartialEq)]
pub enum NodeData {
    Element(ElementData),
    Text(String),
}

#[derive(Debug, Clone)]
struct Node {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    data: NodeData,
}

/// 文档树
///
/// 根节点是合成的 `#document` 元素，解析出的顶层节点挂在它下面。
pub struct Document {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Document {
    pub fn new() -> Self {
        let root_node = Node {
            parent: None,
            children: Vec::new(),
            data: NodeData::Element(ElementData::new("#document")),
        };
        Self {
            nodes: vec![root_node],
            root: NodeId(0),
        }
    }

    /// 解析标记文本为文档树
    pub fn parse(input: &str) -> Result<Self, String> {
        parse_document(input)
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    // ---- 节点创建 ----

    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push_node(NodeData::Element(ElementData::new(tag)))
    }

    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.push_node(NodeData::Text(text.to_string()))
    }

    pub(crate) fn push_node(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            parent: None,
            children: Vec::new(),
            data,
        });
        id
    }

    // ---- 节点访问 ----

    pub fn data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.0].data
    }

    pub fn as_element(&self, id: NodeId) -> Option<&ElementData> {
        match &self.nodes[id.0].data {
            NodeData::Element(el) => Some(el),
            NodeData::Text(_) => None,
        }
    }

    pub fn is_element(&self, id: NodeId) -> bool {
        self.as_element(id).is_some()
    }

    pub fn tag(&self, id: NodeId) -> Option<&str> {
        self.as_element(id).map(|el| el.tag.as_str())
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    // ---- 属性 ----

    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.as_element(id).and_then(|el| el.attr(name))
    }

    pub fn set_attr(&mut self, id: NodeId, name: &str, value: &str) {
        if let NodeData::Element(el) = &mut self.nodes[id.0].data {
            el.attributes.insert(name.to_string(), value.to_string());
        }
    }

    pub fn remove_attr(&mut self, id: NodeId, name: &str) -> Option<String> {
        if let NodeData::Element(el) = &mut self.nodes[id.0].data {
            el.attributes.remove(name)
        } else {
            None
        }
    }

    // ---- class 列表 ----

    pub fn has_class(&self, id: NodeId, class_name: &str) -> bool {
        self.as_element(id)
            .map(|el| el.has_class(class_name))
            .unwrap_or(false)
    }

    pub fn add_class(&mut self, id: NodeId, class_name: &str) {
        if self.has_class(id, class_name) {
            return;
        }
        let merged = match self.attr(id, "class") {
            Some(existing) if !existing.trim().is_empty() => {
                format!("{} {}", existing.trim(), class_name)
            }
            _ => class_name.to_string(),
        };
        self.set_attr(id, "class", &merged);
    }

    pub fn remove_class(&mut self, id: NodeId, class_name: &str) {
        if let Some(existing) = self.attr(id, "class") {
            let remaining: Vec<&str> = existing
                .split_whitespace()
                .filter(|c| *c != class_name)
                .collect();
            let joined = remaining.join(" ");
            self.set_attr(id, "class", &joined);
        }
    }

    /// 切换 class，返回切换后是否存在
    pub fn toggle_class(&mut self, id: NodeId, class_name: &str) -> bool {
        if self.has_class(id, class_name) {
            self.remove_class(id, class_name);
            false
        } else {
            self.add_class(id, class_name);
            true
        }
    }

    // ---- 树结构修改 ----

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    /// 把节点从父节点的子列表中摘出（节点本身仍在 arena 里，可重新挂载）
    pub fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self.nodes[id.0].parent.take() {
            self.nodes[parent.0].children.retain(|c| *c != id);
        }
    }

    /// 用新节点原位替换旧节点；旧节点脱离树
    pub fn replace_node(&mut self, old: NodeId, new: NodeId) {
        let Some(parent) = self.nodes[old.0].parent else {
            return;
        };
        self.detach(new);
        if let Some(slot) = self.nodes[parent.0]
            .children
            .iter()
            .position(|c| *c == old)
        {
            self.nodes[parent.0].children[slot] = new;
            self.nodes[new.0].parent = Some(parent);
            self.nodes[old.0].parent = None;
        }
    }

    /// 摘下全部子节点并返回（用于之后恢复）
    pub fn take_children(&mut self, parent: NodeId) -> Vec<NodeId> {
        let children = std::mem::take(&mut self.nodes[parent.0].children);
        for child in &children {
            self.nodes[child.0].parent = None;
        }
        children
    }

    /// 替换全部子节点
    pub fn set_children(&mut self, parent: NodeId, children: Vec<NodeId>) {
        self.take_children(parent);
        for child in children {
            self.append_child(parent, child);
        }
    }

    /// 把子节点替换为一个文本节点
    pub fn set_text(&mut self, id: NodeId, text: &str) {
        let text_node = self.create_text(text);
        self.set_children(id, vec![text_node]);
    }

    // ---- 查询 ----

    /// 先序遍历 `root` 之下的全部节点（不含 root 自身）
    pub fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.nodes[root.0].children.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            for child in self.nodes[id.0].children.iter().rev() {
                stack.push(*child);
            }
        }
        out
    }

    pub fn element_by_id(&self, dom_id: &str) -> Option<NodeId> {
        self.descendants(self.root)
            .into_iter()
            .find(|n| self.attr(*n, "id") == Some(dom_id))
    }

    pub fn elements_with_attr(&self, root: NodeId, name: &str) -> Vec<NodeId> {
        self.descendants(root)
            .into_iter()
            .filter(|n| self.attr(*n, name).is_some())
            .collect()
    }

    pub fn elements_with_class(&self, class_name: &str) -> Vec<NodeId> {
        self.descendants(self.root)
            .into_iter()
            .filter(|n| self.has_class(*n, class_name))
            .collect()
    }

    /// 从自身开始沿祖先链查找首个满足条件的元素
    pub fn closest(
        &self,
        id: NodeId,
        pred: impl Fn(&ElementData) -> bool,
    ) -> Option<NodeId> {
        let mut current = Some(id);
        while let Some(node) = current {
            if let Some(el) = self.as_element(node) {
                if pred(el) {
                    return Some(node);
                }
            }
            current = self.nodes[node.0].parent;
        }
        None
    }

    /// 节点及其后代的文本内容
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        match &self.nodes[id.0].data {
            NodeData::Text(text) => out.push_str(text),
            NodeData::Element(_) => {
                for child in &self.nodes[id.0].children {
                    self.collect_text(*child, out);
                }
            }
        }
    }

    // ---- 序列化 ----

    /// 节点自身的标记文本（属性按名称排序，输出稳定）
    pub fn outer_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_node(id, &mut out);
        out
    }

    pub fn inner_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        for child in &self.nodes[id.0].children {
            self.write_node(*child, &mut out);
        }
        out
    }

    fn write_node(&self, id: NodeId, out: &mut String) {
        match &self.nodes[id.0].data {
            NodeData::Text(text) => out.push_str(&escape_text(text)),
            NodeData::Element(el) => {
                if el.tag == "#document" {
                    for child in &self.nodes[id.0].children {
                        self.write_node(*child, out);
                    }
                    return;
                }
                out.push('<');
                out.push_str(&el.tag);
                let mut names: Vec<&String> = el.attributes.keys().collect();
                names.sort();
                for name in names {
                    out.push(' ');
                    out.push_str(name);
                    out.push_str("=\"");
                    out.push_str(&escape_attr(&el.attributes[name]));
                    out.push('"');
                }
                if self.nodes[id.0].children.is_empty() {
                    out.push_str(" />");
                } else {
                    out.push('>');
                    for child in &self.nodes[id.0].children {
                        self.write_node(*child, out);
                    }
                    out.push_str("</");
                    out.push_str(&el.tag);
                    out.push('>');
                }
            }
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attr(value: &str) -> String {
    escape_text(value).replace('"', "&quot;")
}
