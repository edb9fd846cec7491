//! Feature controllers. Each `init` returns `None` when the page lacks the
//! elements the feature needs, leaving the rest of the page unaffected.

pub mod contact;
pub mod counter;
pub mod modal;
pub mod navigation;
pub mod reveal;
pub mod theme;

pub use contact::{ContactFormController, SubmissionOutcome, SubmissionState};
pub use counter::{ease_out_quart, parse_counter, CounterAnimator, CounterFormat, CounterPhase};
pub use modal::{ModalController, ModalState};
pub use navigation::{MenuState, NavigationController};
pub use reveal::RevealAnimator;
pub use theme::ThemeController;
