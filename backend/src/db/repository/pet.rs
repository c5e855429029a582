//! Pet repository trait.
//!
//! Every operation maps onto a single statement against the `pets` table
//! (`insert_many` runs its inserts inside one transaction). Mutations report
//! rows affected rather than a typed not-found; turning a zero count into an
//! error is the service layer's job.

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use super::error::RepositoryResult;
use crate::db::search::PetSearch;
use crate::models::{CreatePet, Pet, PetId, UpdatePet};

/// Repository trait for pet records.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to be shared across request tasks.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait PetRepository: Send + Sync {
    /// Check if the store is reachable.
    ///
    /// # Returns
    /// - `Ok(true)` if the store answered
    /// - `Ok(false)` if it is known to be unavailable
    /// - `Err(RepositoryError)` if the check itself failed
    async fn health_check(&self) -> RepositoryResult<bool>;

    /// Insert one pet and return the identifier assigned by the store.
    async fn create(&self, pet: &CreatePet) -> RepositoryResult<PetId>;

    /// Every stored pet, in store order. Empty when the table is empty.
    async fn get_all(&self) -> RepositoryResult<Vec<Pet>>;

    /// A single pet.
    ///
    /// # Returns
    /// * `Err(RepositoryError::NotFound)` - If no pet has this identifier
    async fn get_by_id(&self, id: PetId) -> RepositoryResult<Pet>;

    /// Overwrite every field of the pet with this identifier.
    ///
    /// # Returns
    /// * `Ok(0)` if the identifier does not exist, `Ok(1)` otherwise
    async fn update(&self, id: PetId, pet: &UpdatePet) -> RepositoryResult<u64>;

    /// Delete the pet with this identifier.
    ///
    /// # Returns
    /// * `Ok(0)` if the identifier does not exist, `Ok(1)` otherwise
    async fn delete(&self, id: PetId) -> RepositoryResult<u64>;

    /// Pets satisfying every criterion of `search`.
    async fn search(&self, search: &PetSearch) -> RepositoryResult<Vec<Pet>>;

    /// Number of stored pets.
    async fn count(&self) -> RepositoryResult<u64>;

    /// Insert all `pets` atomically and return how many rows were written.
    async fn insert_many(&self, pets: &[CreatePet]) -> RepositoryResult<u64>;
}
