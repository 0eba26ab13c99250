//! Subscription Codec Service
//!
//! Implements [`SubscriptionCodecApi`] on top of the domain codec. Wire
//! input is checked against [`CodecConfig`] before any domain decoding.

use std::sync::Arc;
use std::time::Instant;

use ledger_api::v1 as wire;
use ledger_api::TransactionFilterKind;
use prost::Message;
use tracing::{debug, warn};

use crate::domain::{CodecConfig, DisclosureRecord, SubscriptionFilter};
use crate::error::{BindingError, Result};
use crate::metrics::{MetricsRecorder, NoOpMetrics};
use crate::ports::SubscriptionCodecApi;

/// Codec service implementation
pub struct SubscriptionCodecService<M: MetricsRecorder = NoOpMetrics> {
    config: CodecConfig,
    metrics: Arc<M>,
}

impl SubscriptionCodecService<NoOpMetrics> {
    /// Create a service without metrics
    pub fn new(config: CodecConfig) -> Result<Self> {
        Self::with_metrics(config, Arc::new(NoOpMetrics))
    }
}

impl<M: MetricsRecorder> SubscriptionCodecService<M> {
    /// Create a service reporting to `metrics`
    pub fn with_metrics(config: CodecConfig, metrics: Arc<M>) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, metrics })
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    pub fn metrics(&self) -> &Arc<M> {
        &self.metrics
    }

    fn reject(&self, operation: &'static str, err: BindingError) -> BindingError {
        warn!(operation, error = %err, "[SubscriptionCodec] Rejected wire input");
        self.metrics.record_decode_rejected();
        err
    }

    fn check_limit(what: &'static str, count: usize, max: usize) -> Result<()> {
        if count > max {
            return Err(BindingError::LimitExceeded { what, count, max });
        }
        Ok(())
    }

    fn check_filter_limits(&self, filter: &wire::TransactionFilter) -> Result<()> {
        // kinds other than per-party are rejected later by the domain decoder
        if let Some(TransactionFilterKind::FiltersByParty(by_party)) = &filter.kind {
            Self::check_limit("parties", by_party.filters.len(), self.config.max_parties)?;
            for filters in by_party.filters.values() {
                Self::check_limit(
                    "rules_per_party",
                    filters.template_filters.len() + filters.interface_filters.len(),
                    self.config.max_rules_per_party,
                )?;
            }
        }
        Ok(())
    }

    fn check_disclosure_limits(&self, contracts: &[wire::DisclosedContract]) -> Result<()> {
        Self::check_limit(
            "disclosed_contracts",
            contracts.len(),
            self.config.max_disclosed_contracts,
        )?;
        for contract in contracts {
            Self::check_limit(
                "created_event_blob_bytes",
                contract.created_event_blob.len(),
                self.config.max_created_event_blob_bytes,
            )?;
        }
        Ok(())
    }
}

impl<M: MetricsRecorder> SubscriptionCodecApi for SubscriptionCodecService<M> {
    fn encode_filter(&self, filter: &SubscriptionFilter) -> wire::TransactionFilter {
        let parties = filter.parties().len();
        self.metrics.record_filter_encoded(parties);
        debug!(
            kind = filter.kind_name(),
            parties, "[SubscriptionCodec] Encoded transaction filter"
        );
        filter.encode()
    }

    fn decode_filter(&self, filter: &wire::TransactionFilter) -> Result<SubscriptionFilter> {
        let start = Instant::now();
        self.check_filter_limits(filter)
            .and_then(|()| SubscriptionFilter::decode(filter))
            .map(|decoded| {
                let parties = decoded.parties().len();
                self.metrics.record_filter_decoded(parties, start.elapsed());
                debug!(parties, "[SubscriptionCodec] Decoded transaction filter");
                decoded
            })
            .map_err(|err| self.reject("decode_filter", err))
    }

    fn encode_filter_bytes(&self, filter: &SubscriptionFilter) -> Vec<u8> {
        self.encode_filter(filter).encode_to_vec()
    }

    fn decode_filter_bytes(&self, bytes: &[u8]) -> Result<SubscriptionFilter> {
        let filter = Self::check_limit("message_bytes", bytes.len(), self.config.max_message_bytes)
            .and_then(|()| wire::TransactionFilter::decode(bytes).map_err(BindingError::from))
            .map_err(|err| self.reject("decode_filter_bytes", err))?;
        self.decode_filter(&filter)
    }

    fn encode_disclosures(&self, records: &[DisclosureRecord]) -> Vec<wire::DisclosedContract> {
        self.metrics.record_disclosures_encoded(records.len());
        debug!(
            count = records.len(),
            "[SubscriptionCodec] Encoded disclosed contracts"
        );
        DisclosureRecord::encode_all(records)
    }

    fn decode_disclosures(
        &self,
        contracts: &[wire::DisclosedContract],
    ) -> Result<Vec<DisclosureRecord>> {
        let records = self
            .check_disclosure_limits(contracts)
            .and_then(|()| DisclosureRecord::decode_all(contracts))
            .map_err(|err| self.reject("decode_disclosures", err))?;
        self.metrics.record_disclosures_decoded(records.len());
        debug!(
            count = records.len(),
            "[SubscriptionCodec] Decoded disclosed contracts"
        );
        Ok(records)
    }

    fn merge_filters(
        &self,
        left: &SubscriptionFilter,
        right: &SubscriptionFilter,
    ) -> Result<SubscriptionFilter> {
        let merged = left.merge(right);
        let conflict = matches!(merged, Err(BindingError::ConflictingPolicy { .. }));
        self.metrics.record_merge(conflict);
        if let Err(err) = &merged {
            warn!(error = %err, "[SubscriptionCodec] Filter merge failed");
        }
        merged
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CodecConfigBuilder, FilterPolicy, Identifier, Party, RuleSet};
    use crate::metrics::Metrics;

    fn iou() -> Identifier {
        Identifier::new("pkg", "Main", "Iou").unwrap()
    }

    fn parties(names: &[&str]) -> Vec<Party> {
        names.iter().map(|name| Party::new(*name).unwrap()).collect()
    }

    fn service_with(config: CodecConfig) -> SubscriptionCodecService<Metrics> {
        SubscriptionCodecService::with_metrics(config, Arc::new(Metrics::new())).unwrap()
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = CodecConfigBuilder::new().max_parties(0).build_unchecked();
        assert!(matches!(
            SubscriptionCodecService::new(config),
            Err(BindingError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_bytes_roundtrip_records_metrics() {
        let service = service_with(CodecConfig::default());
        let filter = SubscriptionFilter::for_template(parties(&["Alice", "Bob"]), iou(), false);

        let bytes = service.encode_filter_bytes(&filter);
        let decoded = service.decode_filter_bytes(&bytes).unwrap();
        assert_eq!(decoded, filter);

        let snapshot = service.metrics().snapshot();
        assert_eq!(snapshot.filters_encoded, 1);
        assert_eq!(snapshot.parties_encoded, 2);
        assert_eq!(snapshot.filters_decoded, 1);
        assert_eq!(snapshot.parties_decoded, 2);
        assert_eq!(snapshot.decode_rejections, 0);
    }

    #[test]
    fn test_party_limit_enforced() {
        let service = service_with(CodecConfigBuilder::new().max_parties(1).build().unwrap());
        let filter = SubscriptionFilter::for_template(parties(&["Alice", "Bob"]), iou(), false);

        let result = service.decode_filter(&filter.encode());
        assert_eq!(
            result,
            Err(BindingError::LimitExceeded {
                what: "parties",
                count: 2,
                max: 1
            })
        );
        assert_eq!(service.metrics().snapshot().decode_rejections, 1);
    }

    #[test]
    fn test_rules_per_party_limit_enforced() {
        let service =
            service_with(CodecConfigBuilder::new().max_rules_per_party(1).build().unwrap());
        let rules = RuleSet::builder()
            .template(iou(), FilterPolicy::HideEventBlob)
            .unwrap()
            .interface(iou(), FilterPolicy::IncludeViewHideEventBlob)
            .unwrap()
            .build();
        let filter = SubscriptionFilter::with_shared_rules(parties(&["Alice"]), rules);

        assert!(matches!(
            service.decode_filter(&filter.encode()),
            Err(BindingError::LimitExceeded {
                what: "rules_per_party",
                ..
            })
        ));
    }

    #[test]
    fn test_message_size_limit_enforced() {
        let service = service_with(
            CodecConfigBuilder::new()
                .max_message_bytes(8)
                .max_created_event_blob_bytes(8)
                .build()
                .unwrap(),
        );
        let filter = SubscriptionFilter::for_template(parties(&["Alice"]), iou(), false);
        let bytes = filter.encode().encode_to_vec();

        assert!(matches!(
            service.decode_filter_bytes(&bytes),
            Err(BindingError::LimitExceeded {
                what: "message_bytes",
                ..
            })
        ));
    }

    #[test]
    fn test_garbage_bytes_rejected() {
        let service = service_with(CodecConfig::default());
        assert!(matches!(
            service.decode_filter_bytes(&[0xff, 0xff, 0xff]),
            Err(BindingError::Decode(_))
        ));
        assert_eq!(service.metrics().snapshot().decode_rejections, 1);
    }

    #[test]
    fn test_disclosure_limits_enforced() {
        let service = service_with(
            CodecConfigBuilder::new()
                .max_disclosed_contracts(1)
                .max_created_event_blob_bytes(4)
                .build()
                .unwrap(),
        );
        let small = DisclosureRecord::new(iou(), "00aa", vec![1, 2]).unwrap();
        let large = DisclosureRecord::new(iou(), "00bb", vec![0; 5]).unwrap();

        let too_many = service.encode_disclosures(&[small.clone(), small.clone()]);
        assert!(matches!(
            service.decode_disclosures(&too_many),
            Err(BindingError::LimitExceeded {
                what: "disclosed_contracts",
                ..
            })
        ));

        let too_big = service.encode_disclosures(&[large]);
        assert!(matches!(
            service.decode_disclosures(&too_big),
            Err(BindingError::LimitExceeded {
                what: "created_event_blob_bytes",
                ..
            })
        ));

        let ok = service.encode_disclosures(&[small.clone()]);
        assert_eq!(service.decode_disclosures(&ok).unwrap(), vec![small]);
        assert_eq!(service.metrics().snapshot().disclosures_decoded, 1);
    }

    #[test]
    fn test_merge_conflict_counted() {
        let service = service_with(CodecConfig::default());
        let left = SubscriptionFilter::for_template(parties(&["Alice"]), iou(), false);
        let right = SubscriptionFilter::with_shared_rules(
            parties(&["Alice"]),
            RuleSet::single_template(iou(), FilterPolicy::IncludeViewAndBlob).unwrap(),
        );

        assert!(service.merge_filters(&left, &right).is_err());
        assert!(service.merge_filters(&left, &left).is_ok());

        let snapshot = service.metrics().snapshot();
        assert_eq!(snapshot.merges, 2);
        assert_eq!(snapshot.merge_conflicts, 1);
    }
}
