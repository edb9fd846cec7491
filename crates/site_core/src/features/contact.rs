use shared::{
    contact::{normalize, validate},
    protocol::{ContactRequest, ContactResponse},
};
use tracing::{info, warn};

use crate::{
    dom::{Document, ElementSpec, NodeId},
    error::TransportError,
};

pub const BUSY_LABEL: &str = "Sending...";
pub const GENERIC_FAILURE: &str = "Something went wrong. Please try again later.";
pub const ERRORS_CLASS: &str = "form-errors";
pub const ERROR_ITEM_CLASS: &str = "form-error";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Succeeded,
    Rejected(String),
}

struct Fields {
    name: NodeId,
    email: NodeId,
    business: Option<NodeId>,
    message: NodeId,
}

impl Fields {
    fn all(&self) -> impl Iterator<Item = NodeId> + '_ {
        [Some(self.name), Some(self.email), self.business, Some(self.message)]
            .into_iter()
            .flatten()
    }
}

pub struct ContactFormController {
    form: NodeId,
    fields: Fields,
    submit: NodeId,
    errors: Option<NodeId>,
    original_label: Option<String>,
    state: SubmissionState,
}

impl ContactFormController {
    pub fn init(doc: &mut Document) -> Option<Self> {
        let form = doc.element_by_id("contact-form")?;
        let fields = Fields {
            name: doc.named_within(form, "name")?,
            email: doc.named_within(form, "email")?,
            business: doc.named_within(form, "business"),
            message: doc.named_within(form, "message")?,
        };
        let submit = doc.first_with_class_within(form, "submit-btn")?;
        Some(Self {
            form,
            fields,
            submit,
            errors: doc.first_with_class_within(form, ERRORS_CLASS),
            original_label: None,
            state: SubmissionState::Idle,
        })
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    pub fn submit_control(&self) -> NodeId {
        self.submit
    }

    pub fn read(&self, doc: &Document) -> ContactRequest {
        let business = self
            .fields
            .business
            .map(|node| doc.value(node).to_string())
            .filter(|value| !value.trim().is_empty());
        ContactRequest {
            name: doc.value(self.fields.name).to_string(),
            email: doc.value(self.fields.email).to_string(),
            business,
            message: doc.value(self.fields.message).to_string(),
        }
    }

    /// Validates the form and, if it passes, flips the submit control to its
    /// busy state and returns the request to send. Returns `None` when
    /// validation fails or a submission is already in flight.
    pub fn begin(&mut self, doc: &mut Document) -> Option<ContactRequest> {
        if self.state == SubmissionState::Submitting {
            return None;
        }

        self.clear_errors(doc);
        let request = self.read(doc);
        let errors = validate(&request);
        if !errors.is_empty() {
            self.show_errors(doc, &errors);
            return None;
        }

        self.original_label = Some(doc.text(self.submit).to_string());
        doc.set_attribute(self.submit, "disabled", "true");
        doc.add_class(self.submit, "loading");
        doc.set_text(self.submit, BUSY_LABEL);
        self.state = SubmissionState::Submitting;
        Some(normalize(request))
    }

    /// Settles an in-flight submission. The submit control is always
    /// restored, whichever way the request ended.
    pub fn complete(
        &mut self,
        doc: &mut Document,
        result: Result<ContactResponse, TransportError>,
    ) -> Option<SubmissionOutcome> {
        if self.state != SubmissionState::Submitting {
            return None;
        }

        let outcome = match result {
            Ok(response) if response.success => {
                info!("contact form accepted");
                for field in self.fields.all().collect::<Vec<_>>() {
                    doc.set_value(field, "");
                }
                SubmissionOutcome::Succeeded
            }
            Ok(response) => {
                let message = response
                    .error
                    .filter(|e| !e.trim().is_empty())
                    .unwrap_or_else(|| GENERIC_FAILURE.to_string());
                warn!(%message, "contact form rejected by server");
                SubmissionOutcome::Rejected(message)
            }
            Err(error) => {
                let message = Some(error.to_string())
                    .filter(|e| !e.trim().is_empty())
                    .unwrap_or_else(|| GENERIC_FAILURE.to_string());
                warn!(%error, "contact form submission failed");
                SubmissionOutcome::Rejected(message)
            }
        };

        match &outcome {
            SubmissionOutcome::Succeeded => self.state = SubmissionState::Succeeded,
            SubmissionOutcome::Rejected(message) => {
                self.show_errors(doc, std::slice::from_ref(message));
                self.state = SubmissionState::Failed;
            }
        }
        self.restore_submit(doc);
        Some(outcome)
    }

    pub fn error_messages(&self, doc: &Document) -> Vec<String> {
        let Some(container) = self.errors else {
            return Vec::new();
        };
        doc.children(container)
            .into_iter()
            .map(|node| doc.text(node).to_string())
            .collect()
    }

    fn restore_submit(&mut self, doc: &mut Document) {
        doc.remove_attribute(self.submit, "disabled");
        doc.remove_class(self.submit, "loading");
        if let Some(label) = self.original_label.take() {
            doc.set_text(self.submit, label);
        }
    }

    fn clear_errors(&mut self, doc: &mut Document) {
        let Some(container) = self.errors else {
            return;
        };
        for child in doc.children(container) {
            doc.remove(child);
        }
        doc.remove_class(container, "visible");
    }

    fn show_errors(&mut self, doc: &mut Document, errors: &[String]) {
        self.clear_errors(doc);
        let form = self.form;
        let container = *self.errors.get_or_insert_with(|| {
            doc.append(
                Some(form),
                ElementSpec::new()
                    .class(ERRORS_CLASS)
                    .attr("role", "alert")
                    .into_element(),
            )
        });
        for error in errors {
            doc.append(
                Some(container),
                ElementSpec::new()
                    .class(ERROR_ITEM_CLASS)
                    .text(error)
                    .into_element(),
            );
        }
        doc.add_class(container, "visible");
    }
}
