//! Transaction filter messages.
//!
//! A `TransactionFilter` selects the events a subscription observes. Only
//! the per-party kind is understood by current clients; the any-party kind is
//! declared so that it decodes into a recognizable case instead of being
//! skipped as an unknown field.

use super::value::Identifier;

/// Inclusion mode for one template or interface entry.
///
/// `Unspecified` is the proto3 default and never a valid choice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum InclusionMode {
    Unspecified = 0,
    /// Observe the contract without its created-event blob.
    HideCreatedEventBlob = 1,
    /// Observe the interface view without the created-event blob.
    IncludeViewHideCreatedEventBlob = 2,
    /// Observe the contract together with its created-event blob.
    IncludeCreatedEventBlob = 3,
}

impl InclusionMode {
    /// String value of the enum field name used in the ProtoBuf definition.
    pub fn as_str_name(&self) -> &'static str {
        match self {
            Self::Unspecified => "INCLUSION_MODE_UNSPECIFIED",
            Self::HideCreatedEventBlob => "HIDE_CREATED_EVENT_BLOB",
            Self::IncludeViewHideCreatedEventBlob => "INCLUDE_VIEW_HIDE_CREATED_EVENT_BLOB",
            Self::IncludeCreatedEventBlob => "INCLUDE_CREATED_EVENT_BLOB",
        }
    }

    /// Creates an enum from field names used in the ProtoBuf definition.
    pub fn from_str_name(value: &str) -> Option<Self> {
        match value {
            "INCLUSION_MODE_UNSPECIFIED" => Some(Self::Unspecified),
            "HIDE_CREATED_EVENT_BLOB" => Some(Self::HideCreatedEventBlob),
            "INCLUDE_VIEW_HIDE_CREATED_EVENT_BLOB" => Some(Self::IncludeViewHideCreatedEventBlob),
            "INCLUDE_CREATED_EVENT_BLOB" => Some(Self::IncludeCreatedEventBlob),
            _ => None,
        }
    }
}

/// Inclusion rule for a concrete template.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TemplateFilter {
    #[prost(message, optional, tag = "1")]
    pub template_id: ::core::option::Option<Identifier>,
    #[prost(enumeration = "InclusionMode", tag = "2")]
    pub inclusion: i32,
}

/// Inclusion rule for an interface.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct InterfaceFilter {
    #[prost(message, optional, tag = "1")]
    pub interface_id: ::core::option::Option<Identifier>,
    #[prost(enumeration = "InclusionMode", tag = "2")]
    pub inclusion: i32,
}

/// Template and interface rules for one party.
///
/// Protobuf maps cannot be keyed by messages, so the identifier to mode
/// mappings are repeated entries. Each identifier should appear once.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Filters {
    #[prost(message, repeated, tag = "1")]
    pub template_filters: ::prost::alloc::vec::Vec<TemplateFilter>,
    #[prost(message, repeated, tag = "2")]
    pub interface_filters: ::prost::alloc::vec::Vec<InterfaceFilter>,
}

/// Rules keyed by party.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct FiltersByParty {
    #[prost(btree_map = "string, message", tag = "1")]
    pub filters: ::prost::alloc::collections::BTreeMap<::prost::alloc::string::String, Filters>,
}

/// Top-level subscription filter.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TransactionFilter {
    #[prost(oneof = "transaction_filter::Kind", tags = "1, 2")]
    pub kind: ::core::option::Option<transaction_filter::Kind>,
}

/// Nested message and enum types in `TransactionFilter`.
pub mod transaction_filter {
    /// The filter kinds defined by the protocol.
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Kind {
        #[prost(message, tag = "1")]
        FiltersByParty(super::FiltersByParty),
        #[prost(message, tag = "2")]
        FiltersForAnyParty(super::Filters),
    }
}
