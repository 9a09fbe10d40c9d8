//! # Domain Module
//!
//! Core domain types for the commit plugin: round artifacts, value
//! objects, errors and observation admission rules.

pub mod entities;
pub mod errors;
pub mod invariants;
pub mod value_objects;

pub use entities::*;
pub use errors::*;
pub use invariants::*;
pub use value_objects::*;
