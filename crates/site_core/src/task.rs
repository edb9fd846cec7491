use shared::domain::Theme;

use crate::dom::NodeId;

/// Deferred work queued on the page scheduler, tagged by owning feature.
#[derive(Debug, Clone, PartialEq)]
pub enum Task {
    Theme(ThemeTask),
    Navigation(NavigationTask),
    Reveal(RevealTask),
    Counter(CounterTask),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ThemeTask {
    Commit(Theme),
    RemoveAnnouncement(NodeId),
}

#[derive(Debug, Clone, PartialEq)]
pub enum NavigationTask {
    ScrollSettled,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RevealTask {
    Reveal(NodeId),
}

#[derive(Debug, Clone, PartialEq)]
pub enum CounterTask {
    Start,
    Frame(usize),
}
