use shared::{
    domain::Theme,
    protocol::{ContactRequest, ContactResponse},
};
use tracing::{debug, error, info};

use crate::{
    config::SiteConfig,
    dom::{Document, NodeId},
    error::TransportError,
    features::{
        ContactFormController, CounterAnimator, ModalController, NavigationController,
        RevealAnimator, SubmissionOutcome, ThemeController,
    },
    scheduler::{Millis, Scheduler},
    store::ThemeStore,
    task::Task,
    transport::ContactTransport,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AppState {
    pub theme: Theme,
    pub initialized: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Escape,
    Enter,
    Tab,
    Character(char),
}

#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    Scroll { y: f64 },
    Resize { height: f64 },
    Click(NodeId),
    KeyDown(Key),
}

/// Work the host must perform on the controller's behalf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    SendContact(ContactRequest),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    Theme,
    Navigation,
    Reveal,
    Counters,
    ContactForm,
    Modal,
}

pub const INIT_ORDER: [Feature; 6] = [
    Feature::Theme,
    Feature::Navigation,
    Feature::Reveal,
    Feature::Counters,
    Feature::ContactForm,
    Feature::Modal,
];

pub struct SiteController<S: ThemeStore> {
    doc: Document,
    scheduler: Scheduler<Task>,
    store: S,
    config: SiteConfig,
    app: AppState,
    theme: Option<ThemeController>,
    navigation: Option<NavigationController>,
    reveal: Option<RevealAnimator>,
    counters: Option<CounterAnimator>,
    contact: Option<ContactFormController>,
    modal: Option<ModalController>,
}

impl<S: ThemeStore> SiteController<S> {
    pub fn new(doc: Document, store: S, config: SiteConfig) -> Self {
        Self {
            doc,
            scheduler: Scheduler::new(config.frame_interval_ms),
            store,
            config,
            app: AppState::default(),
            theme: None,
            navigation: None,
            reveal: None,
            counters: None,
            contact: None,
            modal: None,
        }
    }

    /// Initializes every feature once, in [`INIT_ORDER`].
    pub fn init(&mut self) {
        if self.app.initialized {
            return;
        }

        for feature in INIT_ORDER {
            let active = match feature {
                Feature::Theme => {
                    self.theme = ThemeController::init(
                        &mut self.doc,
                        &self.store,
                        &mut self.app,
                        &self.config,
                    );
                    self.theme.is_some()
                }
                Feature::Navigation => {
                    self.navigation = NavigationController::init(&mut self.doc, &self.config);
                    self.navigation.is_some()
                }
                Feature::Reveal => {
                    self.reveal =
                        RevealAnimator::init(&mut self.doc, &mut self.scheduler, &self.config);
                    self.reveal.is_some()
                }
                Feature::Counters => {
                    self.counters =
                        CounterAnimator::init(&mut self.doc, &mut self.scheduler, &self.config);
                    self.counters.is_some()
                }
                Feature::ContactForm => {
                    self.contact = ContactFormController::init(&mut self.doc);
                    self.contact.is_some()
                }
                Feature::Modal => {
                    let submit = self.contact.as_ref().map(|c| c.submit_control());
                    self.modal = ModalController::init(&mut self.doc, submit);
                    self.modal.is_some()
                }
            };
            debug!(?feature, active, "feature initialized");
        }

        self.app.initialized = true;
        info!(theme = %self.app.theme, "site controller initialized");
        self.run_due();
    }

    pub fn dispatch(&mut self, event: PageEvent) -> Effect {
        let effect = match event {
            PageEvent::Scroll { y } => {
                self.doc.viewport.scroll_y = y.max(0.0);
                self.on_viewport_change();
                Effect::None
            }
            PageEvent::Resize { height } => {
                self.doc.viewport.height = height.max(0.0);
                self.on_viewport_change();
                Effect::None
            }
            PageEvent::Click(target) => self.on_click(target),
            PageEvent::KeyDown(Key::Escape) => {
                if let Some(modal) = self.modal.as_mut() {
                    modal.on_escape(&mut self.doc);
                }
                if let Some(nav) = self.navigation.as_mut() {
                    nav.on_escape(&mut self.doc);
                }
                Effect::None
            }
            PageEvent::KeyDown(_) => Effect::None,
        };
        self.run_due();
        effect
    }

    fn on_viewport_change(&mut self) {
        if let Some(nav) = self.navigation.as_mut() {
            nav.on_scroll(&mut self.scheduler);
        }
        if let Some(reveal) = self.reveal.as_mut() {
            reveal.on_scroll(&self.doc, &mut self.scheduler);
        }
        if let Some(counters) = self.counters.as_mut() {
            counters.on_scroll(&self.doc, &mut self.scheduler);
        }
    }

    /// Navigation sees every click first: anything outside its toggle and
    /// panel closes the menu, even when another feature also handles it.
    fn on_click(&mut self, target: NodeId) -> Effect {
        if let Some(nav) = self.navigation.as_mut() {
            if nav.on_click(&mut self.doc, target) {
                return Effect::None;
            }
        }

        if let Some(theme) = self.theme.as_mut() {
            if self.doc.contains(theme.toggle_control(), target) {
                theme.toggle(&mut self.doc, &mut self.scheduler, &mut self.app);
                return Effect::None;
            }
        }

        if let Some(modal) = self.modal.as_mut() {
            if modal.on_click(&mut self.doc, target) {
                return Effect::None;
            }
        }

        let on_submit = self
            .contact
            .as_ref()
            .is_some_and(|c| self.doc.contains(c.submit_control(), target));
        if on_submit {
            if let Some(request) = self.begin_submission() {
                return Effect::SendContact(request);
            }
        }
        Effect::None
    }

    /// Validates and, on success, moves the form into its busy state.
    pub fn begin_submission(&mut self) -> Option<ContactRequest> {
        self.contact.as_mut()?.begin(&mut self.doc)
    }

    pub fn complete_submission(
        &mut self,
        result: Result<ContactResponse, TransportError>,
    ) -> Option<SubmissionOutcome> {
        let outcome = self.contact.as_mut()?.complete(&mut self.doc, result)?;
        if outcome == SubmissionOutcome::Succeeded {
            if let Some(modal) = self.modal.as_mut() {
                modal.open(&mut self.doc);
            }
        }
        Some(outcome)
    }

    /// Validates, sends, and settles one submission through `transport`.
    pub async fn submit<T>(&mut self, transport: &T) -> Option<SubmissionOutcome>
    where
        T: ContactTransport + ?Sized,
    {
        let request = self.begin_submission()?;
        let result = transport.send_contact(&request).await;
        self.complete_submission(result)
    }

    /// Runs the event loop forward by `ms`, firing every task that falls due.
    pub fn advance(&mut self, ms: Millis) {
        let until = self.scheduler.now().saturating_add(ms);
        while let Some((_, task)) = self.scheduler.pop_due(until) {
            self.run_task(task);
        }
        self.scheduler.advance_clock_to(until);
    }

    fn run_due(&mut self) {
        self.advance(0);
    }

    fn run_task(&mut self, task: Task) {
        match task {
            Task::Theme(task) => {
                if let Some(theme) = self.theme.as_mut() {
                    theme.on_task(task, &mut self.doc, &mut self.scheduler, &mut self.store);
                }
            }
            Task::Navigation(task) => {
                if let Some(nav) = self.navigation.as_mut() {
                    nav.on_task(task, &mut self.doc);
                }
            }
            Task::Reveal(task) => {
                if let Some(reveal) = self.reveal.as_mut() {
                    reveal.on_task(task, &mut self.doc);
                }
            }
            Task::Counter(task) => {
                if let Some(counters) = self.counters.as_mut() {
                    counters.on_task(task, &mut self.doc, &mut self.scheduler);
                }
            }
        }
    }

    /// Top-level sink for errors nothing else handled. Logged, never recovered.
    pub fn report_uncaught(&self, err: &dyn std::error::Error) {
        error!(error = %err, now_ms = self.scheduler.now(), "uncaught page error");
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.doc
    }

    pub fn app(&self) -> &AppState {
        &self.app
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn now(&self) -> Millis {
        self.scheduler.now()
    }

    pub fn pending_tasks(&self) -> usize {
        self.scheduler.pending()
    }

    pub fn theme(&self) -> Option<&ThemeController> {
        self.theme.as_ref()
    }

    pub fn navigation(&self) -> Option<&NavigationController> {
        self.navigation.as_ref()
    }

    pub fn reveal(&self) -> Option<&RevealAnimator> {
        self.reveal.as_ref()
    }

    pub fn counters(&self) -> Option<&CounterAnimator> {
        self.counters.as_ref()
    }

    pub fn contact(&self) -> Option<&ContactFormController> {
        self.contact.as_ref()
    }

    pub fn modal(&self) -> Option<&ModalController> {
        self.modal.as_ref()
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
