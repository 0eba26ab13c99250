//! `ledger.api.v1` message definitions.
//!
//! The schema these derives implement:
//!
//! ```text
//! message Identifier { string package_id = 1; string module_name = 2; string entity_name = 3; }
//! message DisclosedContract { Identifier template_id = 1; string contract_id = 2; bytes created_event_blob = 3; }
//! message TemplateFilter { Identifier template_id = 1; InclusionMode inclusion = 2; }
//! message InterfaceFilter { Identifier interface_id = 1; InclusionMode inclusion = 2; }
//! message Filters { repeated TemplateFilter template_filters = 1; repeated InterfaceFilter interface_filters = 2; }
//! message FiltersByParty { map<string, Filters> filters = 1; }
//! message TransactionFilter { oneof kind { FiltersByParty filters_by_party = 1; Filters filters_for_any_party = 2; } }
//! ```

pub mod commands;
pub mod filters;
pub mod value;

pub use commands::DisclosedContract;
pub use filters::{
    transaction_filter::Kind as TransactionFilterKind, Filters, FiltersByParty, InclusionMode,
    InterfaceFilter, TemplateFilter, TransactionFilter,
};
pub use value::Identifier;
