//! Pet breed records.
//!
//! Weights are average adult weights in grams. Inputs are passed through
//! as-is: the only validation is what JSON decoding into these types implies
//! (integers, non-negative weights).

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Pet identifier (database primary key).
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
pub struct PetId(pub i64);

impl PetId {
    pub fn new(value: i64) -> Self {
        PetId(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for PetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for PetId {
    fn from(value: i64) -> Self {
        PetId(value)
    }
}

impl From<PetId> for i64 {
    fn from(id: PetId) -> Self {
        id.0
    }
}

/// A persisted pet breed record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Pet {
    pub id: PetId,
    pub species: String,
    pub pet_size: String,
    pub name: String,
    pub average_male_adult_weight: u32,
    pub average_female_adult_weight: u32,
}

impl Pet {
    /// Build a record from an identifier and the submitted fields.
    pub fn from_fields(id: PetId, fields: PetFields) -> Self {
        Self {
            id,
            species: fields.species,
            pet_size: fields.pet_size,
            name: fields.name,
            average_male_adult_weight: fields.average_male_adult_weight,
            average_female_adult_weight: fields.average_female_adult_weight,
        }
    }

    /// The replaceable part of the record.
    pub fn fields(&self) -> PetFields {
        PetFields {
            species: self.species.clone(),
            pet_size: self.pet_size.clone(),
            name: self.name.clone(),
            average_male_adult_weight: self.average_male_adult_weight,
            average_female_adult_weight: self.average_female_adult_weight,
        }
    }
}

/// Every field of a pet except its identifier.
///
/// Creation and full-record updates carry the same shape, so both
/// [`CreatePet`] and [`UpdatePet`] alias it. Absent fields decode to their
/// zero value (empty text, zero weight) and are stored as such.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct PetFields {
    pub species: String,
    pub pet_size: String,
    pub name: String,
    pub average_male_adult_weight: u32,
    pub average_female_adult_weight: u32,
}

/// Request body for `POST /v1/pets`.
pub type CreatePet = PetFields;

/// Request body for `PUT /v1/pets/{id}`. All fields are replaced.
pub type UpdatePet = PetFields;

/// Search criteria for `POST /v1/pets/search`.
///
/// Empty `species` and zero weights mean "no filter". Weight bounds are
/// inclusive and match when either the male or the female average satisfies
/// them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SearchPets {
    #[serde(default)]
    pub species: String,
    #[serde(default)]
    pub min_weight: u32,
    #[serde(default)]
    pub max_weight: u32,
}
