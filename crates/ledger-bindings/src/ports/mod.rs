//! Ports Layer
//!
//! Defines the interfaces (traits) for:
//! - Driving Ports (inbound) - codec API for callers
//! - Driven Ports (outbound) - what the crate needs from the contract type
//!   descriptors produced by code generation

pub mod inbound;
pub mod outbound;

pub use inbound::SubscriptionCodecApi;
pub use outbound::{ContractType, ContractTypeDescriptor};
