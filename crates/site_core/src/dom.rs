//! Minimal document model the feature controllers operate on.
//!
//! Only what the controllers observe or mutate is modelled: classes,
//! attributes, text, form values, a vertical layout box per element, the
//! viewport, the root theme attribute, the body scroll lock, and focus.

use std::collections::{BTreeMap, BTreeSet};

use shared::domain::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

#[derive(Debug, Clone, Default)]
pub struct Element {
    pub id: Option<String>,
    pub classes: BTreeSet<String>,
    pub attributes: BTreeMap<String, String>,
    pub text: String,
    pub value: String,
    pub parent: Option<NodeId>,
    pub top: f64,
    pub height: f64,
    removed: bool,
}

impl Element {
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub scroll_y: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            scroll_y: 0.0,
            height: 800.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    pub prefers_reduced_motion: bool,
    pub supports_visibility_observer: bool,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            prefers_reduced_motion: false,
            supports_visibility_observer: true,
        }
    }
}

/// Feature holding the body scroll lock. The page scrolls only while no owner holds it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ScrollLockOwner {
    Menu,
    Modal,
}

#[derive(Debug, Clone, Default)]
pub struct Document {
    elements: Vec<Element>,
    pub viewport: Viewport,
    pub capabilities: Capabilities,
    pub root_theme: Option<Theme>,
    scroll_locks: BTreeSet<ScrollLockOwner>,
    pub focused: Option<NodeId>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, node: NodeId) -> Option<&Element> {
        self.elements.get(node.0).filter(|el| !el.removed)
    }

    fn get_mut(&mut self, node: NodeId) -> Option<&mut Element> {
        self.elements.get_mut(node.0).filter(|el| !el.removed)
    }

    pub fn append(&mut self, parent: Option<NodeId>, mut element: Element) -> NodeId {
        element.parent = parent;
        element.removed = false;
        self.elements.push(element);
        NodeId(self.elements.len() - 1)
    }

    /// Detaches `node` and its whole subtree.
    pub fn remove(&mut self, node: NodeId) {
        let doomed: Vec<NodeId> = self
            .nodes()
            .filter(|candidate| self.contains(node, *candidate))
            .collect();
        for id in doomed {
            if let Some(el) = self.elements.get_mut(id.0) {
                el.removed = true;
            }
        }
        if self.focused.is_some_and(|f| self.get(f).is_none()) {
            self.focused = None;
        }
    }

    pub fn lock_scroll(&mut self, owner: ScrollLockOwner) {
        self.scroll_locks.insert(owner);
    }

    pub fn unlock_scroll(&mut self, owner: ScrollLockOwner) {
        self.scroll_locks.remove(&owner);
    }

    pub fn scroll_locked(&self) -> bool {
        !self.scroll_locks.is_empty()
    }

    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.elements
            .iter()
            .enumerate()
            .filter(|(_, el)| !el.removed)
            .map(|(idx, _)| NodeId(idx))
    }

    pub fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.nodes()
            .find(|node| self.elements[node.0].id.as_deref() == Some(id))
    }

    pub fn elements_with_class(&self, class: &str) -> Vec<NodeId> {
        self.nodes()
            .filter(|node| self.elements[node.0].has_class(class))
            .collect()
    }

    pub fn first_with_class(&self, class: &str) -> Option<NodeId> {
        self.nodes()
            .find(|node| self.elements[node.0].has_class(class))
    }

    /// Finds a form control by its `name` attribute inside `scope`.
    pub fn named_within(&self, scope: NodeId, name: &str) -> Option<NodeId> {
        self.nodes().find(|node| {
            *node != scope
                && self.contains(scope, *node)
                && self.elements[node.0].attribute("name") == Some(name)
        })
    }

    pub fn first_with_class_within(&self, scope: NodeId, class: &str) -> Option<NodeId> {
        self.nodes().find(|node| {
            *node != scope && self.contains(scope, *node) && self.elements[node.0].has_class(class)
        })
    }

    /// True when `node` is `ancestor` or sits somewhere beneath it.
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut cursor = Some(node);
        while let Some(current) = cursor {
            if current == ancestor {
                return true;
            }
            cursor = self.elements.get(current.0).and_then(|el| el.parent);
        }
        false
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.get(node).is_some_and(|el| el.has_class(class))
    }

    pub fn add_class(&mut self, node: NodeId, class: &str) {
        if let Some(el) = self.get_mut(node) {
            el.classes.insert(class.to_string());
        }
    }

    pub fn remove_class(&mut self, node: NodeId, class: &str) {
        if let Some(el) = self.get_mut(node) {
            el.classes.remove(class);
        }
    }

    pub fn set_class(&mut self, node: NodeId, class: &str, enabled: bool) {
        if enabled {
            self.add_class(node, class);
        } else {
            self.remove_class(node, class);
        }
    }

    pub fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.get(node).and_then(|el| el.attribute(name))
    }

    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: impl Into<String>) {
        if let Some(el) = self.get_mut(node) {
            el.attributes.insert(name.to_string(), value.into());
        }
    }

    pub fn remove_attribute(&mut self, node: NodeId, name: &str) {
        if let Some(el) = self.get_mut(node) {
            el.attributes.remove(name);
        }
    }

    pub fn text(&self, node: NodeId) -> &str {
        self.get(node).map(|el| el.text.as_str()).unwrap_or_default()
    }

    pub fn set_text(&mut self, node: NodeId, text: impl Into<String>) {
        if let Some(el) = self.get_mut(node) {
            el.text = text.into();
        }
    }

    pub fn value(&self, node: NodeId) -> &str {
        self.get(node).map(|el| el.value.as_str()).unwrap_or_default()
    }

    pub fn set_value(&mut self, node: NodeId, value: impl Into<String>) {
        if let Some(el) = self.get_mut(node) {
            el.value = value.into();
        }
    }

    pub fn children(&self, parent: NodeId) -> Vec<NodeId> {
        self.nodes()
            .filter(|node| self.elements[node.0].parent == Some(parent))
            .collect()
    }

    pub fn focus(&mut self, node: NodeId) {
        if self.get(node).is_some() {
            self.focused = Some(node);
        }
    }
}

/// Fluent element construction for [`DocumentBuilder`].
#[derive(Debug, Clone, Default)]
pub struct ElementSpec {
    element: Element,
}

impl ElementSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: &str) -> Self {
        self.element.id = Some(id.to_string());
        self
    }

    pub fn class(mut self, class: &str) -> Self {
        for part in class.split_whitespace() {
            self.element.classes.insert(part.to_string());
        }
        self
    }

    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.element
            .attributes
            .insert(name.to_string(), value.to_string());
        self
    }

    pub fn text(mut self, text: &str) -> Self {
        self.element.text = text.to_string();
        self
    }

    pub fn layout(mut self, top: f64, height: f64) -> Self {
        self.element.top = top;
        self.element.height = height;
        self
    }

    pub fn into_element(self) -> Element {
        self.element
    }
}

#[derive(Debug, Default)]
pub struct DocumentBuilder {
    doc: Document,
}

impl DocumentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn viewport_height(mut self, height: f64) -> Self {
        self.doc.viewport.height = height;
        self
    }

    pub fn reduced_motion(mut self, enabled: bool) -> Self {
        self.doc.capabilities.prefers_reduced_motion = enabled;
        self
    }

    pub fn visibility_observer(mut self, supported: bool) -> Self {
        self.doc.capabilities.supports_visibility_observer = supported;
        self
    }

    pub fn add(&mut self, parent: Option<NodeId>, spec: ElementSpec) -> NodeId {
        self.doc.append(parent, spec.into_element())
    }

    pub fn build(self) -> Document {
        self.doc
    }
}

impl Document {
    /// The canonical marketing page: navigation, hero, service sections,
    /// stats, contact form and success modal.
    pub fn landing_page() -> Self {
        Self::landing_page_with(DocumentBuilder::new())
    }

    pub fn landing_page_with(mut b: DocumentBuilder) -> Self {
        let nav = b.add(
            None,
            ElementSpec::new()
                .id("navbar")
                .class("navbar")
                .layout(0.0, 70.0),
        );
        let theme_toggle = b.add(
            Some(nav),
            ElementSpec::new()
                .id("theme-toggle")
                .class("theme-toggle")
                .attr("aria-label", "Toggle theme"),
        );
        b.add(Some(theme_toggle), ElementSpec::new().class("theme-icon"));
        b.add(
            Some(nav),
            ElementSpec::new()
                .id("nav-toggle")
                .class("nav-toggle")
                .attr("aria-expanded", "false"),
        );
        let menu = b.add(
            Some(nav),
            ElementSpec::new().id("nav-menu").class("nav-menu"),
        );
        for (label, href) in [
            ("Services", "#services"),
            ("Results", "#stats"),
            ("Contact", "#contact"),
        ] {
            b.add(
                Some(menu),
                ElementSpec::new()
                    .class("nav-link")
                    .attr("href", href)
                    .text(label),
            );
        }

        let hero = b.add(
            None,
            ElementSpec::new()
                .id("hero")
                .class("hero")
                .layout(0.0, 700.0),
        );
        for (text, top, height) in [
            ("Websites that work", 200.0, 80.0),
            ("for small businesses", 300.0, 40.0),
            ("Get started", 380.0, 50.0),
        ] {
            b.add(
                Some(hero),
                ElementSpec::new()
                    .class("reveal")
                    .text(text)
                    .layout(top, height),
            );
        }

        let services = b.add(
            None,
            ElementSpec::new()
                .id("services")
                .class("services")
                .layout(700.0, 900.0),
        );
        for (idx, title) in ["Design", "Development", "Hosting"].iter().enumerate() {
            let top = 800.0 + 250.0 * idx as f64;
            let delay = (idx * 100).to_string();
            b.add(
                Some(services),
                ElementSpec::new()
                    .class("reveal service-card")
                    .attr("data-delay", &delay)
                    .text(title)
                    .layout(top, 200.0),
            );
        }

        let stats = b.add(
            None,
            ElementSpec::new()
                .id("stats")
                .class("stats")
                .layout(1600.0, 400.0),
        );
        for (value, label) in [
            ("20+", "Sites launched"),
            ("7-14", "Days to launch"),
            ("100%", "Satisfaction"),
        ] {
            let stat = b.add(
                Some(stats),
                ElementSpec::new().class("stat").layout(1650.0, 200.0),
            );
            b.add(Some(stat), ElementSpec::new().class("stat-number").text(value));
            b.add(Some(stat), ElementSpec::new().class("stat-label").text(label));
        }

        let contact = b.add(
            None,
            ElementSpec::new()
                .id("contact")
                .class("contact reveal")
                .layout(2000.0, 900.0),
        );
        let form = b.add(
            Some(contact),
            ElementSpec::new().id("contact-form").class("contact-form"),
        );
        for (name, kind) in [
            ("name", "text"),
            ("email", "email"),
            ("business", "text"),
            ("message", "textarea"),
        ] {
            b.add(
                Some(form),
                ElementSpec::new().attr("name", name).attr("type", kind),
            );
        }
        b.add(
            Some(form),
            ElementSpec::new()
                .class("submit-btn")
                .attr("type", "submit")
                .text("Send Message"),
        );

        let modal = b.add(
            None,
            ElementSpec::new()
                .id("success-modal")
                .class("modal")
                .attr("aria-hidden", "true"),
        );
        let content = b.add(Some(modal), ElementSpec::new().class("modal-content"));
        b.add(Some(content), ElementSpec::new().class("modal-close").text("×"));
        b.add(Some(content), ElementSpec::new().class("modal-title").text("Thank you!"));
        b.add(Some(content), ElementSpec::new().class("modal-ok").text("OK"));

        b.build()
    }
}

#[cfg(test)]
#[path = "tests/dom_tests.rs"]
mod tests;
