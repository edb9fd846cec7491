use super::*;

#[test]
fn landing_page_exposes_every_feature_root() {
    let doc = Document::landing_page();
    for id in [
        "navbar",
        "theme-toggle",
        "nav-toggle",
        "nav-menu",
        "hero",
        "stats",
        "contact-form",
        "success-modal",
    ] {
        assert!(doc.element_by_id(id).is_some(), "missing #{id}");
    }
    assert_eq!(doc.elements_with_class("stat-number").len(), 3);
    assert_eq!(doc.elements_with_class("nav-link").len(), 3);
}

#[test]
fn contains_walks_ancestors() {
    let doc = Document::landing_page();
    let menu = doc.element_by_id("nav-menu").expect("menu");
    let link = doc.first_with_class("nav-link").expect("link");
    let navbar = doc.element_by_id("navbar").expect("navbar");
    let hero = doc.element_by_id("hero").expect("hero");

    assert!(doc.contains(menu, link));
    assert!(doc.contains(navbar, link));
    assert!(doc.contains(link, link));
    assert!(!doc.contains(hero, link));
    assert!(!doc.contains(link, menu));
}

#[test]
fn named_within_scopes_to_subtree() {
    let mut b = DocumentBuilder::new();
    let outside = b.add(None, ElementSpec::new().attr("name", "email"));
    let form = b.add(None, ElementSpec::new().id("contact-form"));
    let inside = b.add(Some(form), ElementSpec::new().attr("name", "email"));
    let doc = b.build();

    assert_eq!(doc.named_within(form, "email"), Some(inside));
    assert_ne!(doc.named_within(form, "email"), Some(outside));
    assert_eq!(doc.named_within(form, "phone"), None);
}

#[test]
fn remove_detaches_whole_subtree_and_drops_focus() {
    let mut b = DocumentBuilder::new();
    let parent = b.add(None, ElementSpec::new().class("box"));
    let child = b.add(Some(parent), ElementSpec::new().class("item"));
    let mut doc = b.build();
    doc.focus(child);

    doc.remove(parent);

    assert!(doc.get(parent).is_none());
    assert!(doc.get(child).is_none());
    assert!(doc.elements_with_class("item").is_empty());
    assert_eq!(doc.focused, None);
}

#[test]
fn mutations_on_removed_nodes_are_ignored() {
    let mut b = DocumentBuilder::new();
    let node = b.add(None, ElementSpec::new());
    let mut doc = b.build();
    doc.remove(node);

    doc.add_class(node, "x");
    doc.set_text(node, "hello");

    assert!(!doc.has_class(node, "x"));
    assert_eq!(doc.text(node), "");
}

#[test]
fn class_spec_splits_on_whitespace() {
    let mut b = DocumentBuilder::new();
    let node = b.add(None, ElementSpec::new().class("reveal service-card"));
    let doc = b.build();
    assert!(doc.has_class(node, "reveal"));
    assert!(doc.has_class(node, "service-card"));
}

#[test]
fn scroll_stays_locked_until_every_owner_releases() {
    let mut doc = Document::new();
    assert!(!doc.scroll_locked());

    doc.lock_scroll(ScrollLockOwner::Menu);
    doc.lock_scroll(ScrollLockOwner::Modal);
    doc.unlock_scroll(ScrollLockOwner::Menu);
    assert!(doc.scroll_locked());

    doc.unlock_scroll(ScrollLockOwner::Menu);
    assert!(doc.scroll_locked());

    doc.unlock_scroll(ScrollLockOwner::Modal);
    assert!(!doc.scroll_locked());
}
