//! Domain model for the library catalog and lending lifecycle.
//!
//! # Responsibility
//! - Define persisted records and creation inputs per entity.
//! - Own the field-level validation rules applied before persistence.
//!
//! # Invariants
//! - Every persisted record is identified by a storage-assigned `i64` id.
//! - Creation inputs validate fully before any storage interaction.

pub mod author;
pub mod book;
pub mod genre;
pub mod loan;
pub mod publisher;
pub mod validate;
