//! # Pets Rust Backend
//!
//! CRUD and search service for pet breed records.
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`models`]: Pet records and request payloads
//! - [`db`]: Repository pattern, search composition, seed loading and persistence
//! - [`services`]: Use cases over the repository
//! - [`http`]: Axum-based HTTP server and request handlers
//! - [`config`]: Server settings from the environment
//!
//! ## Features
//!
//! - `local-repo` (default): in-memory repository for tests and development
//! - `postgres-repo`: Postgres repository via diesel and an r2d2 pool
//! - `http-server` (default): the axum REST API and the `pets-server` binary

// Allow large error types - RepositoryError contains rich context for debugging
#![allow(clippy::result_large_err)]

pub mod config;
pub mod db;
pub mod models;
pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
