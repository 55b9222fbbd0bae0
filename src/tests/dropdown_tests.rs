//! 下拉菜单单元测试
//! 测试切换、互斥关闭和点击外部收起

use crate::dom::Document;
use crate::dropdown;

fn menu_doc() -> Document {
    Document::parse(
        r#"
        <div class="dropdown" id="userMenu">
            <button class="dropdown-trigger" id="userTrigger">User</button>
            <div class="dropdown-menu"><a id="profileItem">Profile</a></div>
        </div>
        <div class="dropdown" id="langMenu">
            <button class="dropdown-trigger" id="langTrigger">Lang</button>
        </div>
        <main id="outside">content</main>
    "#,
    )
    .unwrap()
}

/// 测试点击触发器切换 active
#[test]
fn test_trigger_toggles() {
    let mut doc = menu_doc();
    let trigger = doc.element_by_id("userTrigger").unwrap();
    let dropdown = doc.element_by_id("userMenu").unwrap();

    dropdown::handle_document_click(&mut doc, Some(trigger));
    assert!(doc.has_class(dropdown, "active"));

    dropdown::handle_document_click(&mut doc, Some(trigger));
    assert!(!doc.has_class(dropdown, "active"));
}

/// 测试打开一个菜单时其它菜单关闭
#[test]
fn test_other_dropdowns_close() {
    let mut doc = menu_doc();
    let user_trigger = doc.element_by_id("userTrigger").unwrap();
    let lang_trigger = doc.element_by_id("langTrigger").unwrap();
    let user_menu = doc.element_by_id("userMenu").unwrap();
    let lang_menu = doc.element_by_id("langMenu").unwrap();

    dropdown::handle_document_click(&mut doc, Some(user_trigger));
    dropdown::handle_document_click(&mut doc, Some(lang_trigger));

    assert!(!doc.has_class(user_menu, "active"));
    assert!(doc.has_class(lang_menu, "active"));
}

/// 测试点击菜单之外全部收起
#[test]
fn test_outside_click_closes_all() {
    let mut doc = menu_doc();
    let trigger = doc.element_by_id("userTrigger").unwrap();
    let dropdown = doc.element_by_id("userMenu").unwrap();
    let outside = doc.element_by_id("outside").unwrap();

    dropdown::handle_document_click(&mut doc, Some(trigger));
    assert!(doc.has_class(dropdown, "active"));

    dropdown::handle_document_click(&mut doc, Some(outside));
    assert!(!doc.has_class(dropdown, "active"));

    // 空白处点击（无目标）同样收起
    dropdown::handle_document_click(&mut doc, Some(trigger));
    dropdown::handle_document_click(&mut doc, None);
    assert!(!doc.has_class(dropdown, "active"));
}

/// 测试点击菜单内部非触发器区域不改变状态
#[test]
fn test_menu_item_click_keeps_open() {
    let mut doc = menu_doc();
    let trigger = doc.element_by_id("userTrigger").unwrap();
    let item = doc.element_by_id("profileItem").unwrap();
    let dropdown = doc.element_by_id("userMenu").unwrap();

    dropdown::handle_document_click(&mut doc, Some(trigger));
    dropdown::handle_document_click(&mut doc, Some(item));
    assert!(doc.has_class(dropdown, "active"));
}
