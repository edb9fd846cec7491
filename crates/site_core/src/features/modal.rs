use crate::dom::{Document, NodeId, ScrollLockOwner};

pub const OPEN_CLASS: &str = "show";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalState {
    Closed,
    Open,
}

pub struct ModalController {
    modal: NodeId,
    close_button: Option<NodeId>,
    ok_button: Option<NodeId>,
    return_focus: Option<NodeId>,
    state: ModalState,
}

impl ModalController {
    pub fn init(doc: &mut Document, return_focus: Option<NodeId>) -> Option<Self> {
        let modal = doc.element_by_id("success-modal")?;
        Some(Self {
            modal,
            close_button: doc.first_with_class_within(modal, "modal-close"),
            ok_button: doc.first_with_class_within(modal, "modal-ok"),
            return_focus,
            state: ModalState::Closed,
        })
    }

    pub fn state(&self) -> ModalState {
        self.state
    }

    pub fn open(&mut self, doc: &mut Document) {
        if self.state == ModalState::Open {
            return;
        }
        self.state = ModalState::Open;
        doc.add_class(self.modal, OPEN_CLASS);
        doc.set_attribute(self.modal, "aria-hidden", "false");
        doc.lock_scroll(ScrollLockOwner::Modal);
        if let Some(ok) = self.ok_button {
            doc.focus(ok);
        }
    }

    /// Every close path ends here; closing a closed modal does nothing.
    pub fn close(&mut self, doc: &mut Document) {
        if self.state == ModalState::Closed {
            return;
        }
        self.state = ModalState::Closed;
        doc.remove_class(self.modal, OPEN_CLASS);
        doc.set_attribute(self.modal, "aria-hidden", "true");
        doc.unlock_scroll(ScrollLockOwner::Modal);
        if let Some(control) = self.return_focus {
            doc.focus(control);
        }
    }

    /// Close button, OK button, or the backdrop itself (not its content).
    pub fn on_click(&mut self, doc: &mut Document, target: NodeId) -> bool {
        let on_button = [self.close_button, self.ok_button]
            .into_iter()
            .flatten()
            .any(|button| doc.contains(button, target));
        if on_button || target == self.modal {
            self.close(doc);
            return true;
        }
        false
    }

    pub fn on_escape(&mut self, doc: &mut Document) {
        self.close(doc);
    }
}
