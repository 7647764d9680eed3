use std::sync::Arc;

use crate::database::UserRepository;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<dyn UserRepository>,
    pub service_name: String,
}

impl AppState {
    pub fn new(repository: Arc<dyn UserRepository>, service_name: impl Into<String>) -> Self {
        Self {
            repository,
            service_name: service_name.into(),
        }
    }
}
