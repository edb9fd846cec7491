use tracing::debug;

use crate::{
    config::SiteConfig,
    dom::{Document, NodeId},
    scheduler::{Millis, Scheduler},
    task::{CounterTask, Task},
    visibility::VisibilityObserver,
};

pub const COUNTER_CLASS: &str = "stat-number";
pub const SECTION_CLASS: &str = "stats";

/// Target value and static decoration recovered from a counter's final text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterFormat {
    pub target: u64,
    pub prefix: String,
    pub suffix: String,
}

impl CounterFormat {
    pub fn render(&self, value: u64) -> String {
        format!("{}{}{}", self.prefix, value, self.suffix)
    }
}

/// Parses a stat such as `"20+"`, `"7-14"` or `"100%"`.
///
/// Known literals are matched by substring first, in the order `20`,
/// `7-14`, `100`; anything else falls back to the digits of the text.
/// Returns `None` when no number can be recovered.
pub fn parse_counter(text: &str) -> Option<CounterFormat> {
    let suffix = trailing_marker(text);

    if text.contains("20") {
        return Some(CounterFormat {
            target: 20,
            prefix: String::new(),
            suffix,
        });
    }
    if text.contains("7-14") {
        return Some(CounterFormat {
            target: 14,
            prefix: "7-".to_string(),
            suffix: String::new(),
        });
    }
    if text.contains("100") {
        return Some(CounterFormat {
            target: 100,
            prefix: String::new(),
            suffix,
        });
    }

    let digits: String = text.chars().filter(char::is_ascii_digit).collect();
    let target = digits.parse::<u64>().ok()?;
    Some(CounterFormat {
        target,
        prefix: String::new(),
        suffix,
    })
}

fn trailing_marker(text: &str) -> String {
    match text.trim_end().chars().last() {
        Some(marker @ ('+' | '%')) => marker.to_string(),
        _ => String::new(),
    }
}

pub fn ease_out_quart(progress: f64) -> f64 {
    let p = progress.clamp(0.0, 1.0);
    1.0 - (1.0 - p).powi(4)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterPhase {
    Idle,
    Animating { started_at: Millis },
    Settled,
}

struct Counter {
    node: NodeId,
    final_text: String,
    format: CounterFormat,
    phase: CounterPhase,
}

pub struct CounterAnimator {
    counters: Vec<Counter>,
    section: Option<NodeId>,
    observer: Option<VisibilityObserver>,
    has_animated: bool,
    start_delay_ms: Millis,
    duration_ms: Millis,
}

impl CounterAnimator {
    pub fn init(
        doc: &mut Document,
        scheduler: &mut Scheduler<Task>,
        config: &SiteConfig,
    ) -> Option<Self> {
        let nodes = doc.elements_with_class(COUNTER_CLASS);
        if nodes.is_empty() {
            return None;
        }

        let counters = nodes
            .into_iter()
            .filter_map(|node| {
                let final_text = doc.text(node).to_string();
                match parse_counter(&final_text) {
                    Some(format) => Some(Counter {
                        node,
                        final_text,
                        format,
                        phase: CounterPhase::Idle,
                    }),
                    None => {
                        debug!(text = %final_text, "skipping counter without a number");
                        None
                    }
                }
            })
            .collect();

        let mut animator = Self {
            counters,
            section: doc.first_with_class(SECTION_CLASS),
            observer: None,
            has_animated: false,
            start_delay_ms: config.counter_start_delay_ms,
            duration_ms: config.counter_duration_ms.max(1),
        };

        match animator.section {
            Some(section) if doc.capabilities.supports_visibility_observer => {
                let mut observer = VisibilityObserver::new(config.stats_threshold, 0.0);
                observer.observe(section);
                animator.observer = Some(observer);
                animator.on_scroll(doc, scheduler);
            }
            _ => {
                animator.has_animated = true;
                scheduler.schedule(
                    config.counter_fallback_delay_ms,
                    Task::Counter(CounterTask::Start),
                );
            }
        }
        Some(animator)
    }

    pub fn has_animated(&self) -> bool {
        self.has_animated
    }

    pub fn phases(&self) -> Vec<CounterPhase> {
        self.counters.iter().map(|c| c.phase).collect()
    }

    pub fn is_observing(&self) -> bool {
        self.observer.is_some()
    }

    pub fn counter_nodes(&self) -> Vec<NodeId> {
        self.counters.iter().map(|c| c.node).collect()
    }

    pub fn on_scroll(&mut self, doc: &Document, scheduler: &mut Scheduler<Task>) {
        let Some(observer) = self.observer.as_mut() else {
            return;
        };
        if observer.poll(doc).is_empty() || self.has_animated {
            return;
        }
        self.has_animated = true;
        self.observer = None;
        debug!(section = ?self.section, "stats visible, counters armed");
        scheduler.schedule(self.start_delay_ms, Task::Counter(CounterTask::Start));
    }

    pub fn on_task(
        &mut self,
        task: CounterTask,
        doc: &mut Document,
        scheduler: &mut Scheduler<Task>,
    ) {
        match task {
            CounterTask::Start => {
                let now = scheduler.now();
                for (idx, counter) in self.counters.iter_mut().enumerate() {
                    if counter.phase != CounterPhase::Idle {
                        continue;
                    }
                    counter.phase = CounterPhase::Animating { started_at: now };
                    scheduler.request_frame(Task::Counter(CounterTask::Frame(idx)));
                }
            }
            CounterTask::Frame(idx) => self.step(idx, doc, scheduler),
        }
    }

    fn step(&mut self, idx: usize, doc: &mut Document, scheduler: &mut Scheduler<Task>) {
        let duration = self.duration_ms;
        let Some(counter) = self.counters.get_mut(idx) else {
            return;
        };
        let CounterPhase::Animating { started_at } = counter.phase else {
            return;
        };

        let elapsed = scheduler.now().saturating_sub(started_at);
        let progress = (elapsed as f64 / duration as f64).min(1.0);
        if progress >= 1.0 {
            doc.set_text(counter.node, counter.final_text.clone());
            counter.phase = CounterPhase::Settled;
            return;
        }

        let value = (counter.format.target as f64 * ease_out_quart(progress)).floor() as u64;
        doc.set_text(counter.node, counter.format.render(value));
        scheduler.request_frame(Task::Counter(CounterTask::Frame(idx)));
    }
}

#[cfg(test)]
#[path = "tests/counter_tests.rs"]
mod tests;
