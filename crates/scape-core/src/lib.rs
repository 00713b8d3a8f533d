//! # scape-core
//!
//! Core types shared across all Smellscape crates:
//! - Entity structs for the three backend collections (reports, articles, scents)
//! - Draft and patch payloads for create/update calls
//! - The smell category enum and coordinate validation
//! - Form validation producing drafts (or a [`errors::ValidationError`])
//! - Free-text and category filtering for derived list views
//! - Static fallback collections shown when the backend is unreachable

pub mod entities;
pub mod enums;
pub mod errors;
pub mod filter;
pub mod geo;
pub mod samples;
pub mod validation;

/// Backend-generated primary key shared by every collection.
pub type RecordId = i64;
