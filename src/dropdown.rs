//! 下拉菜单 - 文档级点击分发
//!
//! 点在菜单外关闭全部；点在触发器上先关其它再切换自身；
//! 点在菜单内部的其它位置不动。

use crate::dom::{Document, NodeId};

pub const DROPDOWN_CLASS: &str = "dropdown";
pub const TRIGGER_CLASS: &str = "dropdown-trigger";
pub const ACTIVE_CLASS: &str = "active";

/// 处理一次文档级点击；`target` 为空表示点在空白处
pub fn handle_document_click(doc: &mut Document, target: Option<NodeId>) {
    let inside = target.and_then(|t| doc.closest(t, |el| el.has_class(DROPDOWN_CLASS)));
    let Some(target) = target.filter(|_| inside.is_some()) else {
        close_all(doc, None);
        return;
    };

    if let Some(trigger) = doc.closest(target, |el| el.has_class(TRIGGER_CLASS)) {
        if let Some(dropdown) = doc.closest(trigger, |el| el.has_class(DROPDOWN_CLASS)) {
            close_all(doc, Some(dropdown));
            doc.toggle_class(dropdown, ACTIVE_CLASS);
        }
    }
}

fn close_all(doc: &mut Document, except: Option<NodeId>) {
    for dropdown in doc.elements_with_class(DROPDOWN_CLASS) {
        if Some(dropdown) != except {
            doc.remove_class(dropdown, ACTIVE_CLASS);
        }
    }
}
