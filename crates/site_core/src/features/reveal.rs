use std::collections::BTreeSet;

use tracing::debug;

use crate::{
    config::SiteConfig,
    dom::{Document, NodeId},
    scheduler::Scheduler,
    task::{RevealTask, Task},
    visibility::VisibilityObserver,
};

pub const TARGET_CLASS: &str = "reveal";
pub const REVEALED_CLASS: &str = "revealed";
pub const HERO_CLASS: &str = "hero";

pub struct RevealAnimator {
    observer: Option<VisibilityObserver>,
    revealed: BTreeSet<NodeId>,
}

impl RevealAnimator {
    pub fn init(
        doc: &mut Document,
        scheduler: &mut Scheduler<Task>,
        config: &SiteConfig,
    ) -> Option<Self> {
        let targets = doc.elements_with_class(TARGET_CLASS);
        if targets.is_empty() {
            return None;
        }

        let mut animator = Self {
            observer: None,
            revealed: BTreeSet::new(),
        };

        let caps = doc.capabilities;
        if caps.prefers_reduced_motion || !caps.supports_visibility_observer {
            for node in targets {
                animator.reveal(doc, node);
            }
            debug!("reveal animations bypassed");
            return Some(animator);
        }

        let hero = doc.first_with_class(HERO_CLASS);
        let (hero_targets, scroll_targets): (Vec<NodeId>, Vec<NodeId>) = targets
            .into_iter()
            .partition(|node| hero.is_some_and(|hero| doc.contains(hero, *node)));

        for (idx, node) in hero_targets.into_iter().enumerate() {
            let delay = config.hero_first_reveal_ms + config.hero_stagger_ms * idx as u64;
            scheduler.schedule(delay, Task::Reveal(RevealTask::Reveal(node)));
        }

        let mut observer =
            VisibilityObserver::new(config.reveal_threshold, config.reveal_bottom_margin_px);
        for node in scroll_targets {
            observer.observe(node);
        }
        animator.observer = Some(observer);
        animator.on_scroll(doc, scheduler);
        Some(animator)
    }

    pub fn is_observing(&self) -> bool {
        self.observer.is_some()
    }

    pub fn observed_count(&self) -> usize {
        self.observer.as_ref().map_or(0, VisibilityObserver::observed_count)
    }

    pub fn is_revealed(&self, node: NodeId) -> bool {
        self.revealed.contains(&node)
    }

    /// Schedules the reveal of every target that just came into view and
    /// stops observing it, so it can never be scheduled twice.
    pub fn on_scroll(&mut self, doc: &Document, scheduler: &mut Scheduler<Task>) {
        let Some(observer) = self.observer.as_mut() else {
            return;
        };
        for node in observer.poll(doc) {
            observer.unobserve(node);
            let delay = doc
                .attribute(node, "data-delay")
                .and_then(|raw| raw.trim().parse::<u64>().ok())
                .unwrap_or(0);
            scheduler.schedule(delay, Task::Reveal(RevealTask::Reveal(node)));
        }
    }

    pub fn on_task(&mut self, task: RevealTask, doc: &mut Document) {
        match task {
            RevealTask::Reveal(node) => self.reveal(doc, node),
        }
    }

    fn reveal(&mut self, doc: &mut Document, node: NodeId) {
        if self.revealed.insert(node) {
            doc.add_class(node, REVEALED_CLASS);
        }
    }
}
