use super::*;
use crate::dom::{DocumentBuilder, ElementSpec};

fn doc_with_box(top: f64, height: f64) -> (Document, NodeId) {
    let mut b = DocumentBuilder::new().viewport_height(800.0);
    let node = b.add(None, ElementSpec::new().layout(top, height));
    (b.build(), node)
}

#[test]
fn bottom_margin_shrinks_the_root_box() {
    let (mut doc, node) = doc_with_box(800.0, 200.0);
    let observer = VisibilityObserver::new(0.1, 50.0);

    doc.viewport.scroll_y = 69.0;
    assert!(!observer.is_intersecting(&doc, node));

    doc.viewport.scroll_y = 70.0;
    assert!((observer.visible_ratio(&doc, node) - 0.1).abs() < 1e-9);
    assert!(observer.is_intersecting(&doc, node));
}

#[test]
fn half_threshold_needs_half_the_box() {
    let (mut doc, node) = doc_with_box(1000.0, 400.0);
    let observer = VisibilityObserver::new(0.5, 0.0);

    doc.viewport.scroll_y = 390.0;
    assert!(!observer.is_intersecting(&doc, node));

    doc.viewport.scroll_y = 400.0;
    assert!(observer.is_intersecting(&doc, node));
}

#[test]
fn poll_reports_only_transitions_into_view() {
    let (mut doc, node) = doc_with_box(100.0, 100.0);
    let mut observer = VisibilityObserver::new(0.1, 0.0);
    observer.observe(node);

    assert_eq!(observer.poll(&doc), vec![node]);
    assert!(observer.poll(&doc).is_empty());

    doc.viewport.scroll_y = 5000.0;
    assert!(observer.poll(&doc).is_empty());

    doc.viewport.scroll_y = 0.0;
    assert_eq!(observer.poll(&doc), vec![node]);
}

#[test]
fn unobserved_elements_are_not_reported() {
    let (doc, node) = doc_with_box(100.0, 100.0);
    let mut observer = VisibilityObserver::new(0.1, 0.0);
    observer.observe(node);
    observer.unobserve(node);

    assert!(!observer.is_observing(node));
    assert!(observer.poll(&doc).is_empty());
}

#[test]
fn zero_height_element_counts_when_inside_root() {
    let (mut doc, node) = doc_with_box(300.0, 0.0);
    let observer = VisibilityObserver::new(0.1, 0.0);
    assert!(observer.is_intersecting(&doc, node));

    doc.viewport.scroll_y = 301.0;
    assert!(!observer.is_intersecting(&doc, node));
}
