//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate validation, pre-checks and repository calls per operation.
//! - Keep boundary layers decoupled from storage details.

pub mod catalog_service;
pub mod loan_service;
