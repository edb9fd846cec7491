use shared::domain::Theme;
use tracing::{debug, warn};

use crate::{
    config::SiteConfig,
    dom::{Document, ElementSpec, NodeId},
    scheduler::Scheduler,
    store::ThemeStore,
    task::{Task, ThemeTask},
    AppState,
};

pub const PULSE_CLASS: &str = "theme-pulse";
pub const ANNOUNCEMENT_CLASS: &str = "sr-only";

pub struct ThemeController {
    toggle: NodeId,
    icon: Option<NodeId>,
    storage_key: String,
    pulse_half_ms: u64,
    announcement_ttl_ms: u64,
    pulses_in_flight: usize,
}

impl ThemeController {
    /// Applies the persisted theme (default light) to the document root.
    ///
    /// The root attribute is always applied; the controller itself only
    /// exists when the page has a `#theme-toggle` control.
    pub fn init(
        doc: &mut Document,
        store: &dyn ThemeStore,
        app: &mut AppState,
        config: &SiteConfig,
    ) -> Option<Self> {
        let theme = store
            .load(&config.theme_storage_key)
            .and_then(|raw| raw.parse::<Theme>().ok())
            .unwrap_or_default();
        app.theme = theme;
        doc.root_theme = Some(theme);

        let toggle = doc.element_by_id("theme-toggle")?;
        let controller = Self {
            toggle,
            icon: doc.first_with_class_within(toggle, "theme-icon"),
            storage_key: config.theme_storage_key.clone(),
            pulse_half_ms: config.theme_pulse_half_ms,
            announcement_ttl_ms: config.announcement_ttl_ms,
            pulses_in_flight: 0,
        };
        controller.render_icon(doc, theme);
        debug!(%theme, "theme initialized");
        Some(controller)
    }

    pub fn is_pulsing(&self) -> bool {
        self.pulses_in_flight > 0
    }

    pub fn toggle_control(&self) -> NodeId {
        self.toggle
    }

    /// Flips the in-memory theme now; the document and the store follow at the pulse midpoint.
    pub fn toggle(
        &mut self,
        doc: &mut Document,
        scheduler: &mut Scheduler<Task>,
        app: &mut AppState,
    ) {
        app.theme = app.theme.toggled();
        self.pulses_in_flight += 1;
        doc.add_class(self.toggle, PULSE_CLASS);
        scheduler.schedule(
            self.pulse_half_ms,
            Task::Theme(ThemeTask::Commit(app.theme)),
        );
    }

    pub fn on_task(
        &mut self,
        task: ThemeTask,
        doc: &mut Document,
        scheduler: &mut Scheduler<Task>,
        store: &mut dyn ThemeStore,
    ) {
        match task {
            ThemeTask::Commit(theme) => {
                doc.root_theme = Some(theme);
                if let Err(error) = store.save(&self.storage_key, theme.as_str()) {
                    warn!(%error, "failed to persist theme preference");
                }
                self.render_icon(doc, theme);
                self.pulses_in_flight = self.pulses_in_flight.saturating_sub(1);
                if self.pulses_in_flight == 0 {
                    doc.remove_class(self.toggle, PULSE_CLASS);
                }

                let announcement = doc.append(
                    None,
                    ElementSpec::new()
                        .class(ANNOUNCEMENT_CLASS)
                        .attr("aria-live", "polite")
                        .attr("role", "status")
                        .text(&format!("Switched to {theme} theme"))
                        .into_element(),
                );
                scheduler.schedule(
                    self.announcement_ttl_ms,
                    Task::Theme(ThemeTask::RemoveAnnouncement(announcement)),
                );
            }
            ThemeTask::RemoveAnnouncement(node) => doc.remove(node),
        }
    }

    fn render_icon(&self, doc: &mut Document, theme: Theme) {
        doc.set_text(self.icon.unwrap_or(self.toggle), theme.toggle_icon());
    }
}
