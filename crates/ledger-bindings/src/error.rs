//! Error types for the ledger bindings

use ledger_api::InclusionMode;
use thiserror::Error;

use crate::domain::{FilterPolicy, Identifier, KeyKind, Party};

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, BindingError>;

/// Errors raised while building, merging, encoding or decoding filters and
/// disclosures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindingError {
    #[error("Malformed record: {0}")]
    MalformedRecord(String),

    #[error("Unsupported {key_kind} policy tag: {}", describe_tag(.tag))]
    UnsupportedPolicy { tag: i32, key_kind: KeyKind },

    #[error("Unsupported filter kind: {0}")]
    UnsupportedFilterKind(String),

    #[error("Conflicting policy for {key} under party {party}: {existing} vs {incoming}")]
    ConflictingPolicy {
        party: Party,
        key: Identifier,
        existing: FilterPolicy,
        incoming: FilterPolicy,
    },

    #[error("Conflicting rule for {key}: {existing} vs {incoming}")]
    ConflictingRule {
        key: Identifier,
        existing: FilterPolicy,
        incoming: FilterPolicy,
    },

    #[error("Invalid disclosure record: {0}")]
    InvalidRecord(String),

    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    #[error("Invalid party: {0}")]
    InvalidParty(String),

    #[error("Policy {policy} is not allowed for {key_kind} keys")]
    PolicyNotAllowed { key_kind: KeyKind, policy: FilterPolicy },

    #[error("Duplicate key {key} under party {party}")]
    DuplicateKey { party: Party, key: Identifier },

    #[error("Limit exceeded for {what}: {count} > {max}")]
    LimitExceeded {
        what: &'static str,
        count: usize,
        max: usize,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Protobuf decode error: {0}")]
    Decode(#[from] prost::DecodeError),
}

fn describe_tag(tag: &i32) -> String {
    match InclusionMode::try_from(*tag) {
        Ok(mode) => format!("{} ({})", mode.as_str_name(), tag),
        Err(_) => format!("unknown ({})", tag),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_policy_message_names_known_tags() {
        let err = BindingError::UnsupportedPolicy {
            tag: 0,
            key_kind: KeyKind::Template,
        };
        assert_eq!(
            err.to_string(),
            "Unsupported template policy tag: INCLUSION_MODE_UNSPECIFIED (0)"
        );
    }

    #[test]
    fn test_unsupported_policy_message_for_future_tag() {
        let err = BindingError::UnsupportedPolicy {
            tag: 99,
            key_kind: KeyKind::Interface,
        };
        assert_eq!(err.to_string(), "Unsupported interface policy tag: unknown (99)");
    }
}
