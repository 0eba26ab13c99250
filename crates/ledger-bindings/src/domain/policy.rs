//! Filter policies
//!
//! A [`FilterPolicy`] states how much of a matching contract a subscriber
//! sees. Template keys and interface keys accept different subsets:
//!
//! | Policy | Template | Interface |
//! |--------|----------|-----------|
//! | `HideEventBlob` | yes | yes (view hidden) |
//! | `IncludeViewHideEventBlob` | no | yes |
//! | `IncludeViewAndBlob` | yes | no |

use std::fmt;

use ledger_api::InclusionMode;
use serde::{Deserialize, Serialize};

use crate::error::{BindingError, Result};

/// Which kind of key a policy is attached to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyKind {
    Template,
    Interface,
}

impl fmt::Display for KeyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyKind::Template => f.write_str("template"),
            KeyKind::Interface => f.write_str("interface"),
        }
    }
}

/// Inclusion rule for one template or interface key
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterPolicy {
    /// Observe the contract, never its created-event blob
    HideEventBlob,
    /// Observe the interface view, without the blob
    IncludeViewHideEventBlob,
    /// Full fidelity: the contract and its blob
    IncludeViewAndBlob,
}

impl FilterPolicy {
    /// Whether events matched by this policy carry the created-event blob
    pub fn includes_created_event_blob(self) -> bool {
        matches!(self, FilterPolicy::IncludeViewAndBlob)
    }

    /// Whether the policy asks for view data beyond what `HideEventBlob` gives
    pub fn includes_view(self) -> bool {
        !matches!(self, FilterPolicy::HideEventBlob)
    }

    pub fn is_legal_for(self, key_kind: KeyKind) -> bool {
        match (key_kind, self) {
            (_, FilterPolicy::HideEventBlob) => true,
            (KeyKind::Template, FilterPolicy::IncludeViewAndBlob) => true,
            (KeyKind::Interface, FilterPolicy::IncludeViewHideEventBlob) => true,
            _ => false,
        }
    }

    /// Fixed wire tag for this policy
    pub fn to_wire(self) -> InclusionMode {
        match self {
            FilterPolicy::HideEventBlob => InclusionMode::HideCreatedEventBlob,
            FilterPolicy::IncludeViewHideEventBlob => InclusionMode::IncludeViewHideCreatedEventBlob,
            FilterPolicy::IncludeViewAndBlob => InclusionMode::IncludeCreatedEventBlob,
        }
    }

    /// Decode a raw wire tag for a key of the given kind
    ///
    /// Unspecified, unknown and kind-illegal tags are all rejected; there is
    /// no fallback policy.
    pub fn from_wire(tag: i32, key_kind: KeyKind) -> Result<Self> {
        let unsupported = BindingError::UnsupportedPolicy { tag, key_kind };
        let policy = match InclusionMode::try_from(tag).map_err(|_| unsupported.clone())? {
            InclusionMode::Unspecified => return Err(unsupported),
            InclusionMode::HideCreatedEventBlob => FilterPolicy::HideEventBlob,
            InclusionMode::IncludeViewHideCreatedEventBlob => FilterPolicy::IncludeViewHideEventBlob,
            InclusionMode::IncludeCreatedEventBlob => FilterPolicy::IncludeViewAndBlob,
        };
        if !policy.is_legal_for(key_kind) {
            return Err(unsupported);
        }
        Ok(policy)
    }
}

impl fmt::Display for FilterPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_wire().as_str_name())
    }
}
