//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to
//! [`PetService`](crate::services::PetService). Body and path extraction
//! failures are caught here so they render as the error envelope with a 400
//! status rather than axum's plain-text rejection.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use tracing::{error, info};

use super::dto::{
    CreatePet, ErrorResponse, Pet, PetFields, PetId, SearchPets, SuccessResponse, UpdatePet,
};
use super::error::AppError;
use super::openapi::{EmptyResponse, PetListResponse, PetResponse};
use super::state::AppState;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<SuccessResponse<T>>, AppError>;

fn ok<T>(data: T) -> HandlerResult<T> {
    Ok(Json(SuccessResponse::new(data)))
}

/// Log a failed request with its route before it is converted to a response.
fn log_failure(route: &'static str) -> impl FnOnce(AppError) -> AppError {
    move |err| {
        error!(route, error = %err, "request failed");
        err
    }
}

fn decode_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    body.map(|Json(value)| value)
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
}

fn decode_id(id: Result<Path<i64>, PathRejection>) -> Result<PetId, AppError> {
    id.map(|Path(id)| PetId::new(id))
        .map_err(|_| AppError::BadRequest("Invalid ID".to_string()))
}

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Liveness probe. Always 200 with an empty body; the store is not consulted.
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses((status = 200, description = "Service is running"))
)]
pub async fn health_check() -> StatusCode {
    StatusCode::OK
}

// =============================================================================
// Pet CRUD
// =============================================================================

/// POST /v1/pets
#[utoipa::path(
    post,
    path = "/v1/pets",
    tag = "Pets",
    request_body = PetFields,
    responses(
        (status = 200, description = "Created pet with its identifier", body = PetResponse),
        (status = 400, description = "Malformed body", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn create_pet(
    State(state): State<AppState>,
    body: Result<Json<CreatePet>, JsonRejection>,
) -> HandlerResult<Pet> {
    const ROUTE: &str = "[POST] /v1/pets";
    info!("{}", ROUTE);

    let pet = decode_body(body).map_err(log_failure(ROUTE))?;
    let created = state
        .pets
        .create_pet(pet)
        .await
        .map_err(|e| log_failure(ROUTE)(e.into()))?;
    ok(created)
}

/// GET /v1/pets
#[utoipa::path(
    get,
    path = "/v1/pets",
    tag = "Pets",
    responses(
        (status = 200, description = "Every pet", body = PetListResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn get_pets(State(state): State<AppState>) -> HandlerResult<Vec<Pet>> {
    const ROUTE: &str = "[GET] /v1/pets";
    info!("{}", ROUTE);

    let pets = state
        .pets
        .get_pets()
        .await
        .map_err(|e| log_failure(ROUTE)(e.into()))?;
    ok(pets)
}

/// GET /v1/pets/{id}
#[utoipa::path(
    get,
    path = "/v1/pets/{id}",
    tag = "Pets",
    params(("id" = i64, Path, description = "Pet identifier")),
    responses(
        (status = 200, description = "The pet", body = PetResponse),
        (status = 400, description = "Non-integer id", body = ErrorResponse),
        (status = 404, description = "No pet with this id", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn get_pet(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> HandlerResult<Pet> {
    const ROUTE: &str = "[GET] /v1/pets/{id}";
    info!("{}", ROUTE);

    let id = decode_id(id).map_err(log_failure(ROUTE))?;
    let pet = state
        .pets
        .get_pet_by_id(id)
        .await
        .map_err(|e| log_failure(ROUTE)(e.into()))?;
    ok(pet)
}

/// PUT /v1/pets/{id}
///
/// Replaces every field of the pet.
#[utoipa::path(
    put,
    path = "/v1/pets/{id}",
    tag = "Pets",
    params(("id" = i64, Path, description = "Pet identifier")),
    request_body = PetFields,
    responses(
        (status = 200, description = "The replaced pet", body = PetResponse),
        (status = 400, description = "Non-integer id or malformed body", body = ErrorResponse),
        (status = 404, description = "No pet with this id", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn update_pet(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<UpdatePet>, JsonRejection>,
) -> HandlerResult<Pet> {
    const ROUTE: &str = "[PUT] /v1/pets/{id}";
    info!("{}", ROUTE);

    let id = decode_id(id).map_err(log_failure(ROUTE))?;
    let pet = decode_body(body).map_err(log_failure(ROUTE))?;
    let updated = state
        .pets
        .update_pet(id, pet)
        .await
        .map_err(|e| log_failure(ROUTE)(e.into()))?;
    ok(updated)
}

/// DELETE /v1/pets/{id}
///
/// Responds with `{"data": null}`.
#[utoipa::path(
    delete,
    path = "/v1/pets/{id}",
    tag = "Pets",
    params(("id" = i64, Path, description = "Pet identifier")),
    responses(
        (status = 200, description = "Deleted", body = EmptyResponse),
        (status = 400, description = "Non-integer id", body = ErrorResponse),
        (status = 404, description = "No pet with this id", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn delete_pet(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> HandlerResult<()> {
    const ROUTE: &str = "[DELETE] /v1/pets/{id}";
    info!("{}", ROUTE);

    let id = decode_id(id).map_err(log_failure(ROUTE))?;
    state
        .pets
        .delete_pet(id)
        .await
        .map_err(|e| log_failure(ROUTE)(e.into()))?;
    ok(())
}

/// POST /v1/pets/search
#[utoipa::path(
    post,
    path = "/v1/pets/search",
    tag = "Pets",
    request_body = SearchPets,
    responses(
        (status = 200, description = "Pets matching every given criterion", body = PetListResponse),
        (status = 400, description = "Malformed body", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn search_pets(
    State(state): State<AppState>,
    body: Result<Json<SearchPets>, JsonRejection>,
) -> HandlerResult<Vec<Pet>> {
    const ROUTE: &str = "[POST] /v1/pets/search";
    info!("{}", ROUTE);

    let criteria = decode_body(body).map_err(log_failure(ROUTE))?;
    let pets = state
        .pets
        .search_pets(criteria)
        .await
        .map_err(|e| log_failure(ROUTE)(e.into()))?;
    ok(pets)
}
