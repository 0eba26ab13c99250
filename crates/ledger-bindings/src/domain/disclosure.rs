//! Disclosed contracts
//!
//! A [`DisclosureRecord`] is a contract the submitter vouches for and
//! attaches to a command batch, so the ledger can authorize use of a
//! contract the submitter cannot see on its own. The payload is the
//! created-event blob the client received earlier; it is passed through
//! untouched and never checked against the identifiers.

use ledger_api::v1 as wire;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, Bytes};

use super::identifier::{decode_required, Identifier};
use crate::error::{BindingError, Result};

/// A contract disclosed alongside a command submission
///
/// # Invariants
/// - Built with [`DisclosureRecord::new`] or deserialized with serde:
///   contract id and payload are non-empty
/// - Decoded from the wire: only the template id is checked
/// - Never mutated after construction
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "DisclosureRecordRepr")]
pub struct DisclosureRecord {
    template_id: Identifier,
    contract_id: String,
    #[serde_as(as = "Bytes")]
    payload: Vec<u8>,
}

/// Unvalidated serde shape, checked through [`DisclosureRecord::new`]
#[serde_as]
#[derive(Deserialize)]
struct DisclosureRecordRepr {
    template_id: Identifier,
    contract_id: String,
    #[serde_as(as = "Bytes")]
    payload: Vec<u8>,
}

impl TryFrom<DisclosureRecordRepr> for DisclosureRecord {
    type Error = BindingError;

    fn try_from(repr: DisclosureRecordRepr) -> Result<Self> {
        Self::new(repr.template_id, repr.contract_id, repr.payload)
    }
}

impl DisclosureRecord {
    /// Create a record from data the caller observed earlier
    pub fn new(
        template_id: Identifier,
        contract_id: impl Into<String>,
        payload: impl Into<Vec<u8>>,
    ) -> Result<Self> {
        let contract_id = contract_id.into();
        let payload = payload.into();
        if contract_id.is_empty() {
            return Err(BindingError::InvalidRecord("contract_id is empty".to_string()));
        }
        if payload.is_empty() {
            return Err(BindingError::InvalidRecord(format!(
                "created event blob is empty for contract {}",
                contract_id
            )));
        }
        Ok(Self {
            template_id,
            contract_id,
            payload,
        })
    }

    pub fn template_id(&self) -> &Identifier {
        &self.template_id
    }

    pub fn contract_id(&self) -> &str {
        &self.contract_id
    }

    /// Created-event blob
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Encode as the wire message
    pub fn encode(&self) -> wire::DisclosedContract {
        wire::DisclosedContract {
            template_id: Some(self.template_id.to_wire()),
            contract_id: self.contract_id.clone(),
            created_event_blob: self.payload.clone(),
        }
    }

    /// Decode from the wire message
    ///
    /// Only the template id is required. An empty contract id or blob is
    /// passed through as received; the ledger rejects it if it matters.
    pub fn decode(contract: &wire::DisclosedContract) -> Result<Self> {
        let template_id = decode_required(contract.template_id.as_ref(), "template_id")?;
        Ok(Self {
            template_id,
            contract_id: contract.contract_id.clone(),
            payload: contract.created_event_blob.clone(),
        })
    }

    /// Encode a batch for the repeated `disclosed_contracts` field
    pub fn encode_all(records: &[DisclosureRecord]) -> Vec<wire::DisclosedContract> {
        records.iter().map(DisclosureRecord::encode).collect()
    }

    /// Decode a batch, stopping at the first malformed entry
    pub fn decode_all(contracts: &[wire::DisclosedContract]) -> Result<Vec<DisclosureRecord>> {
        contracts
            .iter()
            .enumerate()
            .map(|(index, contract)| {
                Self::decode(contract).map_err(|err| match err {
                    BindingError::MalformedRecord(reason) => BindingError::MalformedRecord(
                        format!("disclosed_contracts[{}]: {}", index, reason),
                    ),
                    other => other,
                })
            })
            .collect()
    }
}
