//! In-memory local repository implementation.
//!
//! Stores pets in a `BTreeMap` keyed by identifier, so store order is
//! ascending id. Suitable for unit tests and local development: fast,
//! deterministic and isolated.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::db::repository::{ErrorContext, PetRepository, RepositoryError, RepositoryResult};
use crate::db::search::PetSearch;
use crate::models::{CreatePet, Pet, PetId, UpdatePet};

/// In-memory local repository.
///
/// # Example
/// ```
/// use pets_backend::db::repositories::LocalRepository;
/// use pets_backend::db::repository::PetRepository;
/// use pets_backend::models::CreatePet;
///
/// # tokio_test_block(async {
/// let repo = LocalRepository::new();
/// let id = repo
///     .create(&CreatePet {
///         species: "cat".into(),
///         pet_size: "small".into(),
///         name: "Siamese".into(),
///         average_male_adult_weight: 4500,
///         average_female_adult_weight: 3500,
///     })
///     .await
///     .unwrap();
/// assert_eq!(repo.get_by_id(id).await.unwrap().name, "Siamese");
/// # });
/// # fn tokio_test_block<F: std::future::Future>(f: F) -> F::Output {
/// #     tokio::runtime::Runtime::new().unwrap().block_on(f)
/// # }
/// ```
#[derive(Clone)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
}

struct LocalData {
    pets: BTreeMap<PetId, Pet>,
    next_id: i64,
    // Connection health
    is_healthy: bool,
}

impl Default for LocalData {
    fn default() -> Self {
        Self {
            pets: BTreeMap::new(),
            next_id: 1,
            is_healthy: true,
        }
    }
}

impl LocalRepository {
    /// Create a new empty local repository.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(LocalData::default())),
        }
    }

    /// Set the health status for testing connection failures.
    ///
    /// While unhealthy every operation fails with a connection error.
    pub fn set_healthy(&self, healthy: bool) {
        self.data.write().is_healthy = healthy;
    }

    /// Clear all data from the repository. Identifiers are not reused.
    pub fn clear(&self) {
        self.data.write().pets.clear();
    }

    /// Get the number of pets stored.
    pub fn pet_count(&self) -> usize {
        self.data.read().pets.len()
    }

    /// Check if a pet exists.
    pub fn has_pet(&self, id: PetId) -> bool {
        self.data.read().pets.contains_key(&id)
    }

    fn check_health(data: &LocalData, operation: &str) -> RepositoryResult<()> {
        if !data.is_healthy {
            return Err(RepositoryError::connection_with_context(
                "Database is not healthy",
                ErrorContext::new(operation),
            ));
        }
        Ok(())
    }

    fn insert(data: &mut LocalData, fields: &CreatePet) -> PetId {
        let id = PetId::new(data.next_id);
        data.next_id += 1;
        data.pets.insert(id, Pet::from_fields(id, fields.clone()));
        id
    }
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PetRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(self.data.read().is_healthy)
    }

    async fn create(&self, pet: &CreatePet) -> RepositoryResult<PetId> {
        let mut data = self.data.write();
        Self::check_health(&data, "create_pet")?;
        Ok(Self::insert(&mut data, pet))
    }

    async fn get_all(&self) -> RepositoryResult<Vec<Pet>> {
        let data = self.data.read();
        Self::check_health(&data, "get_all_pets")?;
        Ok(data.pets.values().cloned().collect())
    }

    async fn get_by_id(&self, id: PetId) -> RepositoryResult<Pet> {
        let data = self.data.read();
        Self::check_health(&data, "get_pet")?;
        data.pets.get(&id).cloned().ok_or_else(|| {
            RepositoryError::not_found_with_context(
                format!("Pet {} not found", id),
                ErrorContext::new("get_pet")
                    .with_entity("pet")
                    .with_entity_id(id),
            )
        })
    }

    async fn update(&self, id: PetId, pet: &UpdatePet) -> RepositoryResult<u64> {
        let mut data = self.data.write();
        Self::check_health(&data, "update_pet")?;
        match data.pets.get_mut(&id) {
            Some(existing) => {
                *existing = Pet::from_fields(id, pet.clone());
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&self, id: PetId) -> RepositoryResult<u64> {
        let mut data = self.data.write();
        Self::check_health(&data, "delete_pet")?;
        Ok(u64::from(data.pets.remove(&id).is_some()))
    }

    async fn search(&self, search: &PetSearch) -> RepositoryResult<Vec<Pet>> {
        let data = self.data.read();
        Self::check_health(&data, "search_pets")?;
        Ok(data
            .pets
            .values()
            .filter(|pet| search.matches(pet))
            .cloned()
            .collect())
    }

    async fn count(&self) -> RepositoryResult<u64> {
        let data = self.data.read();
        Self::check_health(&data, "count_pets")?;
        Ok(data.pets.len() as u64)
    }

    async fn insert_many(&self, pets: &[CreatePet]) -> RepositoryResult<u64> {
        let mut data = self.data.write();
        Self::check_health(&data, "insert_pets")?;
        for pet in pets {
            Self::insert(&mut data, pet);
        }
        Ok(pets.len() as u64)
    }
}
