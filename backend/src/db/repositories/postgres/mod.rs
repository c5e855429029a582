//! Postgres repository implementation using Diesel.
//!
//! ## Features
//!
//! - Connection pooling with r2d2
//! - Blocking diesel calls run on tokio's blocking pool
//! - Search criteria applied as filters on a boxed query
//!
//! The `pets` table is created by the external migrator from the SQL under
//! `migrations/`; this repository never alters the schema.
//!
//! ## Configuration
//!
//! See [`PostgresConfig::from_env`](crate::db::PostgresConfig::from_env).

use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sql_query;
use std::time::Duration;
use tokio::task;

use crate::db::config::PostgresConfig;
use crate::db::repository::{ErrorContext, PetRepository, RepositoryError, RepositoryResult};
use crate::db::search::{PetSearch, SearchCriterion};
use crate::models::{CreatePet, Pet, PetId, UpdatePet};

mod models;
mod schema;

use models::*;
use schema::*;

type PgPool = Pool<ConnectionManager<PgConnection>>;

// Keeps a single INSERT well under Postgres' 65535 bind parameter limit.
const INSERT_CHUNK_SIZE: usize = 1000;

/// Diesel-backed repository for Postgres.
#[derive(Clone, Debug)]
pub struct PostgresRepository {
    pool: PgPool,
}

impl PostgresRepository {
    /// Create a new repository, opening the connection pool.
    ///
    /// The pool opens `min_pool_size` connections eagerly, so an unreachable
    /// or misconfigured store fails here rather than on the first request.
    pub fn new(config: PostgresConfig) -> RepositoryResult<Self> {
        let manager = ConnectionManager::<PgConnection>::new(&config.database_url);

        let pool = Pool::builder()
            .max_size(config.max_pool_size)
            .min_idle(Some(config.min_pool_size))
            .connection_timeout(Duration::from_secs(config.connection_timeout_sec))
            .idle_timeout(Some(Duration::from_secs(config.idle_timeout_sec)))
            .test_on_check_out(true)
            .build(manager)
            .map_err(|e| {
                RepositoryError::connection_with_context(
                    e.to_string(),
                    ErrorContext::new("create_pool")
                        .with_details(format!("max_size={}", config.max_pool_size)),
                )
            })?;

        Ok(Self { pool })
    }

    /// Run `f` with a pooled connection on the blocking thread pool.
    async fn with_conn<T, F>(&self, operation: &'static str, f: F) -> RepositoryResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut PgConnection) -> RepositoryResult<T> + Send + 'static,
    {
        let pool = self.pool.clone();

        task::spawn_blocking(move || {
            let mut conn = pool.get().map_err(|e| {
                RepositoryError::connection_with_context(
                    e.to_string(),
                    ErrorContext::new(operation).with_details("get_connection"),
                )
            })?;
            f(&mut *conn).map_err(|e| e.with_operation(operation))
        })
        .await
        .map_err(|e| {
            RepositoryError::internal_with_context(
                format!("Task join error: {}", e),
                ErrorContext::new("spawn_blocking"),
            )
        })?
    }
}

fn map_diesel_error(err: diesel::result::Error) -> RepositoryError {
    RepositoryError::from(err)
}

#[async_trait]
impl PetRepository for PostgresRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        self.with_conn("health_check", |conn| {
            sql_query("SELECT 1")
                .execute(conn)
                .map(|_| true)
                .map_err(map_diesel_error)
        })
        .await
    }

    async fn create(&self, pet: &CreatePet) -> RepositoryResult<PetId> {
        let row = NewPetRow::from(pet);
        self.with_conn("create_pet", move |conn| {
            diesel::insert_into(pets::table)
                .values(&row)
                .returning(pets::id)
                .get_result::<i64>(conn)
                .map(PetId::new)
                .map_err(map_diesel_error)
        })
        .await
    }

    async fn get_all(&self) -> RepositoryResult<Vec<Pet>> {
        self.with_conn("get_all_pets", |conn| {
            let rows = pets::table
                .select(PetRow::as_select())
                .load::<PetRow>(conn)
                .map_err(map_diesel_error)?;
            rows_to_pets(rows)
        })
        .await
    }

    async fn get_by_id(&self, id: PetId) -> RepositoryResult<Pet> {
        self.with_conn("get_pet", move |conn| {
            let row = pets::table
                .find(id.value())
                .select(PetRow::as_select())
                .first::<PetRow>(conn)
                .map_err(|e| match e {
                    diesel::result::Error::NotFound => {
                        RepositoryError::not_found(format!("Pet {} not found", id))
                    }
                    other => map_diesel_error(other),
                })
                .map_err(|e| e.with_pet_id(id))?;
            Pet::try_from(row)
        })
        .await
    }

    async fn update(&self, id: PetId, pet: &UpdatePet) -> RepositoryResult<u64> {
        let changes = NewPetRow::from(pet);
        self.with_conn("update_pet", move |conn| {
            diesel::update(pets::table.find(id.value()))
                .set(&changes)
                .execute(conn)
                .map(|n| n as u64)
                .map_err(|e| map_diesel_error(e).with_pet_id(id))
        })
        .await
    }

    async fn delete(&self, id: PetId) -> RepositoryResult<u64> {
        self.with_conn("delete_pet", move |conn| {
            diesel::delete(pets::table.find(id.value()))
                .execute(conn)
                .map(|n| n as u64)
                .map_err(|e| map_diesel_error(e).with_pet_id(id))
        })
        .await
    }

    async fn search(&self, search: &PetSearch) -> RepositoryResult<Vec<Pet>> {
        let criteria = search.criteria().to_vec();
        self.with_conn("search_pets", move |conn| {
            let mut query = pets::table.select(PetRow::as_select()).into_boxed();
            for criterion in criteria {
                query = match criterion {
                    SearchCriterion::Species(species) => query.filter(pets::species.eq(species)),
                    SearchCriterion::MinWeight(weight) => {
                        let weight = i64::from(weight);
                        query.filter(
                            pets::average_male_adult_weight
                                .ge(weight)
                                .or(pets::average_female_adult_weight.ge(weight)),
                        )
                    }
                    SearchCriterion::MaxWeight(weight) => {
                        let weight = i64::from(weight);
                        query.filter(
                            pets::average_male_adult_weight
                                .le(weight)
                                .or(pets::average_female_adult_weight.le(weight)),
                        )
                    }
                };
            }
            let rows = query.load::<PetRow>(conn).map_err(map_diesel_error)?;
            rows_to_pets(rows)
        })
        .await
    }

    async fn count(&self) -> RepositoryResult<u64> {
        self.with_conn("count_pets", |conn| {
            pets::table
                .count()
                .get_result::<i64>(conn)
                .map(|n| n.max(0) as u64)
                .map_err(map_diesel_error)
        })
        .await
    }

    async fn insert_many(&self, new_pets: &[CreatePet]) -> RepositoryResult<u64> {
        let rows: Vec<NewPetRow> = new_pets.iter().map(NewPetRow::from).collect();
        self.with_conn("insert_pets", move |conn| {
            conn.transaction::<_, RepositoryError, _>(|tx| {
                let mut inserted = 0usize;
                for chunk in rows.chunks(INSERT_CHUNK_SIZE) {
                    inserted += diesel::insert_into(pets::table)
                        .values(chunk)
                        .execute(tx)
                        .map_err(map_diesel_error)?;
                }
                Ok(inserted as u64)
            })
        })
        .await
    }
}
