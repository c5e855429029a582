use diesel::prelude::*;

use super::schema::pets;
use crate::db::repository::{ErrorContext, RepositoryError, RepositoryResult};
use crate::models::{CreatePet, Pet, PetId};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = pets)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PetRow {
    pub id: i64,
    pub species: String,
    pub pet_size: String,
    pub name: String,
    pub average_male_adult_weight: i64,
    pub average_female_adult_weight: i64,
}

/// Insert payload; also used as the full-row changeset on update.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = pets)]
pub struct NewPetRow {
    pub species: String,
    pub pet_size: String,
    pub name: String,
    pub average_male_adult_weight: i64,
    pub average_female_adult_weight: i64,
}

impl From<&CreatePet> for NewPetRow {
    fn from(pet: &CreatePet) -> Self {
        Self {
            species: pet.species.clone(),
            pet_size: pet.pet_size.clone(),
            name: pet.name.clone(),
            average_male_adult_weight: i64::from(pet.average_male_adult_weight),
            average_female_adult_weight: i64::from(pet.average_female_adult_weight),
        }
    }
}

fn weight_from_column(id: i64, column: &str, value: i64) -> RepositoryResult<u32> {
    u32::try_from(value).map_err(|_| {
        RepositoryError::internal_with_context(
            format!("{} out of range: {}", column, value),
            ErrorContext::new("decode_pet_row")
                .with_entity("pet")
                .with_entity_id(id),
        )
    })
}

impl TryFrom<PetRow> for Pet {
    type Error = RepositoryError;

    fn try_from(row: PetRow) -> RepositoryResult<Self> {
        Ok(Pet {
            id: PetId::new(row.id),
            average_male_adult_weight: weight_from_column(
                row.id,
                "average_male_adult_weight",
                row.average_male_adult_weight,
            )?,
            average_female_adult_weight: weight_from_column(
                row.id,
                "average_female_adult_weight",
                row.average_female_adult_weight,
            )?,
            species: row.species,
            pet_size: row.pet_size,
            name: row.name,
        })
    }
}

pub fn rows_to_pets(rows: Vec<PetRow>) -> RepositoryResult<Vec<Pet>> {
    rows.into_iter().map(Pet::try_from).collect()
}
