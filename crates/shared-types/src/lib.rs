//! # Shared Types Crate
//!
//! Primitive types shared by the commit plugin, its adapters and the test
//! suite.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: chain selectors, sequence numbers and price
//!   integers are defined once here.
//! - **Opaque Round Payloads**: the host runtime only ever sees byte blobs
//!   (`Query`, `Observation`, `Outcome`, reports); their layout belongs to the
//!   plugin.

pub mod entities;
pub mod round;

pub use entities::*;
pub use round::*;
