//! # Ports Module
//!
//! Hexagonal architecture ports: the plugin API the host runtime drives
//! (inbound) and the collaborators the plugin reads from (outbound).

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
