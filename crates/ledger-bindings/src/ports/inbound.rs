//! Inbound Ports (Driving Ports)
//!
//! The API callers use to move filters and disclosures across the wire
//! boundary with configured limits applied.

use ledger_api::v1 as wire;

use crate::domain::{DisclosureRecord, SubscriptionFilter};
use crate::error::Result;

/// Codec API (Driving Port)
///
/// Encoding never fails. Every decode checks the configured limits first and
/// then the domain rules; failures are returned as-is, never retried or
/// replaced by a default.
pub trait SubscriptionCodecApi: Send + Sync {
    /// Encode a filter as the wire message
    fn encode_filter(&self, filter: &SubscriptionFilter) -> wire::TransactionFilter;

    /// Decode a wire filter
    fn decode_filter(&self, filter: &wire::TransactionFilter) -> Result<SubscriptionFilter>;

    /// Encode a filter to protobuf bytes
    fn encode_filter_bytes(&self, filter: &SubscriptionFilter) -> Vec<u8>;

    /// Decode a filter from protobuf bytes
    fn decode_filter_bytes(&self, bytes: &[u8]) -> Result<SubscriptionFilter>;

    /// Encode records for a command submission's disclosed contracts
    fn encode_disclosures(&self, records: &[DisclosureRecord]) -> Vec<wire::DisclosedContract>;

    /// Decode disclosed contracts, e.g. to re-attach them to a later command
    fn decode_disclosures(
        &self,
        contracts: &[wire::DisclosedContract],
    ) -> Result<Vec<DisclosureRecord>>;

    /// Merge two filters
    fn merge_filters(
        &self,
        left: &SubscriptionFilter,
        right: &SubscriptionFilter,
    ) -> Result<SubscriptionFilter>;
}
