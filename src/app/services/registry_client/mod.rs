//! Registry lookup client for CNPJ records
//!
//! Performs one HTTP lookup per identifier against the registry endpoint
//! and checks the response body against a fixed structural schema before
//! handing out a typed record.
//!
//! ## Architecture
//!
//! - [`client`] - HTTP transport and the [`RegistryLookup`] seam
//! - [`schema`] - declarative field table and structural validation
//!
//! Transport failures, non-2xx statuses and undecodable bodies surface as
//! lookup errors carrying the identifier; shape mismatches surface as
//! validation errors carrying the identifier and every field violation.

pub mod client;
pub mod schema;

// Re-export main types for easy access
pub use client::{RegistryClient, RegistryLookup};
pub use schema::Violation;
