//! Service layer for business logic and orchestration.
//!
//! Services sit between the HTTP handlers and the repository layer. They own
//! the rules that do not belong to either side, such as turning a zero
//! rows-affected count into a not-found error.

pub mod pet_service;

pub use pet_service::PetService;
