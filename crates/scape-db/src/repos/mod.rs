//! Per-collection gateway implementations for [`crate::LocalGateway`].

mod articles;
mod library;
mod reports;
