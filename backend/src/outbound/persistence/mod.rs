//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the domain repository ports backed by
//! PostgreSQL via Diesel with async support through `diesel-async` and
//! `bb8` pooling.
//!
//! - Repositories only translate between Diesel rows and domain types;
//!   business policy stays in the domain services.
//! - Row structs (`models.rs`) and table definitions (`schema.rs`) are
//!   internal and never exposed to the domain.
//! - The conditional mutations (capacity re-check under `FOR UPDATE`,
//!   count-then-attach) live here because they are storage-transactional
//!   halves of the port contracts.

mod diesel_error_mapping;
mod diesel_interest_repository;
mod diesel_project_repository;
mod diesel_skill_repository;
mod diesel_token_repository;
mod diesel_user_repository;
mod models;
mod pool;
mod schema;

pub use diesel_interest_repository::DieselInterestRepository;
pub use diesel_project_repository::DieselProjectRepository;
pub use diesel_skill_repository::DieselSkillRepository;
pub use diesel_token_repository::DieselTokenRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
