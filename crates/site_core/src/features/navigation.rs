use tracing::debug;

use crate::{
    config::SiteConfig,
    dom::{Document, NodeId, ScrollLockOwner},
    scheduler::{Scheduler, TaskId},
    task::{NavigationTask, Task},
};

pub const SCROLLED_CLASS: &str = "scrolled";
pub const HIDDEN_CLASS: &str = "nav-hidden";
pub const ACTIVE_CLASS: &str = "active";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuState {
    Closed,
    Open,
}

struct Menu {
    toggle: NodeId,
    panel: NodeId,
    links: Vec<NodeId>,
}

pub struct NavigationController {
    navbar: NodeId,
    menu: Option<Menu>,
    menu_state: MenuState,
    scrolled: bool,
    hidden: bool,
    last_settled_y: f64,
    pending_settle: Option<TaskId>,
    scrolled_threshold: f64,
    hide_after: f64,
    debounce_ms: u64,
}

impl NavigationController {
    pub fn init(doc: &mut Document, config: &SiteConfig) -> Option<Self> {
        let navbar = doc.element_by_id("navbar")?;
        let menu = match (doc.element_by_id("nav-toggle"), doc.element_by_id("nav-menu")) {
            (Some(toggle), Some(panel)) => {
                doc.set_attribute(toggle, "aria-expanded", "false");
                Some(Menu {
                    toggle,
                    panel,
                    links: doc.elements_with_class("nav-link"),
                })
            }
            _ => None,
        };

        let mut controller = Self {
            navbar,
            menu,
            menu_state: MenuState::Closed,
            scrolled: false,
            hidden: false,
            last_settled_y: doc.viewport.scroll_y,
            pending_settle: None,
            scrolled_threshold: config.scrolled_threshold_px,
            hide_after: config.hide_nav_after_px,
            debounce_ms: config.scroll_debounce_ms,
        };
        controller.apply_scroll(doc);
        Some(controller)
    }

    pub fn menu_state(&self) -> MenuState {
        self.menu_state
    }

    pub fn is_scrolled(&self) -> bool {
        self.scrolled
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Replaces any pending recompute with a fresh one after the quiet period.
    pub fn on_scroll(&mut self, scheduler: &mut Scheduler<Task>) {
        if let Some(pending) = self.pending_settle.take() {
            scheduler.cancel(pending);
        }
        self.pending_settle = Some(scheduler.schedule(
            self.debounce_ms,
            Task::Navigation(NavigationTask::ScrollSettled),
        ));
    }

    pub fn on_task(&mut self, task: NavigationTask, doc: &mut Document) {
        match task {
            NavigationTask::ScrollSettled => {
                self.pending_settle = None;
                self.apply_scroll(doc);
            }
        }
    }

    fn apply_scroll(&mut self, doc: &mut Document) {
        let y = doc.viewport.scroll_y;
        self.scrolled = y > self.scrolled_threshold;
        doc.set_class(self.navbar, SCROLLED_CLASS, self.scrolled);

        if self.menu_state == MenuState::Open || y <= self.hide_after || y < self.last_settled_y {
            self.hidden = false;
        } else if y > self.last_settled_y {
            self.hidden = true;
        }
        doc.set_class(self.navbar, HIDDEN_CLASS, self.hidden);
        self.last_settled_y = y;
    }

    /// Returns true when the click was consumed by the menu.
    pub fn on_click(&mut self, doc: &mut Document, target: NodeId) -> bool {
        let Some(menu) = &self.menu else {
            return false;
        };

        if doc.contains(menu.toggle, target) {
            self.toggle_menu(doc);
            return true;
        }
        if menu.links.iter().any(|link| doc.contains(*link, target)) {
            self.close_menu(doc);
            return false;
        }
        if !doc.contains(menu.panel, target) {
            self.close_menu(doc);
        }
        false
    }

    pub fn on_escape(&mut self, doc: &mut Document) {
        self.close_menu(doc);
    }

    pub fn toggle_menu(&mut self, doc: &mut Document) {
        let next = match self.menu_state {
            MenuState::Closed => MenuState::Open,
            MenuState::Open => MenuState::Closed,
        };
        self.set_menu(doc, next);
    }

    pub fn close_menu(&mut self, doc: &mut Document) {
        if self.menu_state == MenuState::Open {
            self.set_menu(doc, MenuState::Closed);
        }
    }

    fn set_menu(&mut self, doc: &mut Document, state: MenuState) {
        let Some(menu) = &self.menu else {
            return;
        };
        let open = state == MenuState::Open;
        self.menu_state = state;
        doc.set_class(menu.panel, ACTIVE_CLASS, open);
        doc.set_class(menu.toggle, ACTIVE_CLASS, open);
        doc.set_attribute(menu.toggle, "aria-expanded", if open { "true" } else { "false" });
        if open {
            doc.lock_scroll(ScrollLockOwner::Menu);
        } else {
            doc.unlock_scroll(ScrollLockOwner::Menu);
        }
        if open {
            self.hidden = false;
            doc.remove_class(self.navbar, HIDDEN_CLASS);
        }
        debug!(open, "navigation menu toggled");
    }
}
