//! Command submission messages.
//!
//! The submission envelope itself belongs to the transport layer; only the
//! repeated `disclosed_contracts` element type lives here.

use super::value::Identifier;

/// A contract the submitter vouches for, attached to a command batch.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct DisclosedContract {
    /// Template the contract instantiates.
    #[prost(message, optional, tag = "1")]
    pub template_id: ::core::option::Option<Identifier>,
    /// Ledger-assigned contract identifier.
    #[prost(string, tag = "2")]
    pub contract_id: ::prost::alloc::string::String,
    /// Opaque created-event data as previously returned by the ledger.
    #[prost(bytes = "vec", tag = "3")]
    pub created_event_blob: ::prost::alloc::vec::Vec<u8>,
}
