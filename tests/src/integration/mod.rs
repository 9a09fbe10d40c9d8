//! # Integration Scenarios
//!
//! Drives several commit plugin instances through full rounds, with the
//! harness playing the host runtime.

pub mod harness;

#[cfg(test)]
mod faults;
#[cfg(test)]
mod rounds;
