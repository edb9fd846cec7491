use std::{path::PathBuf, sync::Arc, time::Instant};

use shared::domain::Service;

#[derive(Clone)]
pub struct AppState {
    pub static_dir: PathBuf,
    pub spa_entry: String,
    pub started_at: Instant,
    pub services: Arc<Vec<Service>>,
}

impl AppState {
    pub fn new(static_dir: PathBuf, spa_entry: impl Into<String>, services: Vec<Service>) -> Self {
        Self {
            static_dir,
            spa_entry: spa_entry.into(),
            started_at: Instant::now(),
            services: Arc::new(services),
        }
    }

    pub fn spa_entry_path(&self) -> PathBuf {
        self.static_dir.join(&self.spa_entry)
    }
}
