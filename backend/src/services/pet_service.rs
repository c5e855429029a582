//! Pet use cases.
//!
//! Sits between the HTTP handlers and the repository. Responses for create
//! and update are synthesized from the assigned identifier and the submitted
//! fields; the record is not read back from the store.

use std::sync::Arc;

use log::debug;

use crate::db::repository::{PetRepository, RepositoryError, RepositoryResult};
use crate::db::search::PetSearch;
use crate::models::{CreatePet, Pet, PetId, SearchPets, UpdatePet};

/// Use-case layer over a [`PetRepository`].
#[derive(Clone)]
pub struct PetService {
    repository: Arc<dyn PetRepository>,
}

impl PetService {
    pub fn new(repository: Arc<dyn PetRepository>) -> Self {
        Self { repository }
    }

    /// Check if the store is reachable.
    pub async fn health_check(&self) -> RepositoryResult<bool> {
        self.repository.health_check().await
    }

    /// Insert a pet and return it with its new identifier.
    pub async fn create_pet(&self, pet: CreatePet) -> RepositoryResult<Pet> {
        let id = self.repository.create(&pet).await?;
        debug!("Created pet {}", id);
        Ok(Pet::from_fields(id, pet))
    }

    /// Replace every field of an existing pet.
    ///
    /// # Errors
    /// `RepositoryError::NotFound` when no row carries `id`.
    pub async fn update_pet(&self, id: PetId, pet: UpdatePet) -> RepositoryResult<Pet> {
        let affected = self.repository.update(id, &pet).await?;
        if affected == 0 {
            return Err(not_found(id, "update_pet"));
        }
        Ok(Pet::from_fields(id, pet))
    }

    /// Delete a pet.
    ///
    /// # Errors
    /// `RepositoryError::NotFound` when no row carries `id`.
    pub async fn delete_pet(&self, id: PetId) -> RepositoryResult<()> {
        let affected = self.repository.delete(id).await?;
        if affected == 0 {
            return Err(not_found(id, "delete_pet"));
        }
        Ok(())
    }

    pub async fn get_pets(&self) -> RepositoryResult<Vec<Pet>> {
        self.repository.get_all().await
    }

    pub async fn get_pet_by_id(&self, id: PetId) -> RepositoryResult<Pet> {
        self.repository.get_by_id(id).await
    }

    /// Pets matching every non-empty criterion of `criteria`.
    pub async fn search_pets(&self, criteria: SearchPets) -> RepositoryResult<Vec<Pet>> {
        let search = PetSearch::from(&criteria);
        debug!("Searching pets: {}", search);
        self.repository.search(&search).await
    }
}

fn not_found(id: PetId, operation: &str) -> RepositoryError {
    RepositoryError::not_found(format!("Pet {} not found", id))
        .with_operation(operation)
        .with_pet_id(id)
}
