//! Headless interaction controller for the marketing site.
//!
//! The page is a [`dom::Document`]; time is a virtual clock driven through
//! [`SiteController::advance`]. Features share nothing but the document.

pub mod config;
pub mod controller;
pub mod dom;
pub mod error;
pub mod features;
pub mod scheduler;
pub mod store;
pub mod task;
pub mod transport;
pub mod visibility;

pub use config::SiteConfig;
pub use controller::{AppState, Effect, Feature, Key, PageEvent, SiteController, INIT_ORDER};
pub use dom::{Document, DocumentBuilder, ElementSpec, NodeId, ScrollLockOwner};
pub use error::{StoreError, TransportError};
pub use store::{JsonFileThemeStore, MemoryThemeStore, ThemeStore};
pub use transport::{ContactTransport, HttpContactTransport};
