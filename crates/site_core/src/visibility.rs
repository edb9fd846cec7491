use std::collections::BTreeMap;

use crate::dom::{Document, NodeId};

/// Reports elements crossing into the viewport past a visible-ratio threshold.
///
/// The root box is the viewport with its bottom edge pulled up by
/// `bottom_margin` pixels.
#[derive(Debug, Clone)]
pub struct VisibilityObserver {
    threshold: f64,
    bottom_margin: f64,
    observed: BTreeMap<NodeId, Option<bool>>,
}

impl VisibilityObserver {
    pub fn new(threshold: f64, bottom_margin: f64) -> Self {
        Self {
            threshold: threshold.clamp(0.0, 1.0),
            bottom_margin,
            observed: BTreeMap::new(),
        }
    }

    pub fn observe(&mut self, node: NodeId) {
        self.observed.entry(node).or_insert(None);
    }

    pub fn unobserve(&mut self, node: NodeId) {
        self.observed.remove(&node);
    }

    pub fn is_observing(&self, node: NodeId) -> bool {
        self.observed.contains_key(&node)
    }

    pub fn observed_count(&self) -> usize {
        self.observed.len()
    }

    pub fn visible_ratio(&self, doc: &Document, node: NodeId) -> f64 {
        let Some(el) = doc.get(node) else {
            return 0.0;
        };
        let root_top = doc.viewport.scroll_y;
        let root_bottom = root_top + (doc.viewport.height - self.bottom_margin).max(0.0);
        let el_top = el.top;
        let el_bottom = el.top + el.height.max(0.0);

        if el.height <= 0.0 {
            return if el_top >= root_top && el_top <= root_bottom {
                1.0
            } else {
                0.0
            };
        }

        let overlap = (el_bottom.min(root_bottom) - el_top.max(root_top)).max(0.0);
        overlap / el.height
    }

    pub fn is_intersecting(&self, doc: &Document, node: NodeId) -> bool {
        let ratio = self.visible_ratio(doc, node);
        ratio > 0.0 && ratio >= self.threshold
    }

    /// Re-evaluates every observed element and returns those that became
    /// intersecting since the last poll, in document order. The first poll
    /// after `observe` reports an element that is already in view.
    pub fn poll(&mut self, doc: &Document) -> Vec<NodeId> {
        let states: Vec<(NodeId, bool)> = self
            .observed
            .keys()
            .map(|node| (*node, self.is_intersecting(doc, *node)))
            .collect();

        let mut entered = Vec::new();
        for (node, now_intersecting) in states {
            if let Some(previous) = self.observed.get_mut(&node) {
                if now_intersecting && *previous != Some(true) {
                    entered.push(node);
                }
                *previous = Some(now_intersecting);
            }
        }
        entered
    }
}

#[cfg(test)]
#[path = "tests/visibility_tests.rs"]
mod tests;
