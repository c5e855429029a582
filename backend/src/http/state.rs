//! Application state for the HTTP server.

use std::sync::Arc;

use crate::db::repository::PetRepository;
use crate::services::PetService;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub pets: Arc<PetService>,
}

impl AppState {
    /// Create a new application state with the given service.
    pub fn new(pets: PetService) -> Self {
        Self {
            pets: Arc::new(pets),
        }
    }

    /// Build the service stack over a repository.
    pub fn from_repository(repository: Arc<dyn PetRepository>) -> Self {
        Self::new(PetService::new(repository))
    }
}
