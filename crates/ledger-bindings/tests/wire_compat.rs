//! # Wire Compatibility Tests for Ledger Bindings
//!
//! Exercise the codec against raw protobuf bytes, including messages a newer
//! or misbehaving peer could send.
//!
//! ## Test Categories
//!
//! 1. **Scenarios** - Filters built by callers survive the wire unchanged
//! 2. **Forward Compatibility** - Unknown kinds and tags are rejected, never defaulted
//! 3. **Disclosure Batches** - Repeated disclosed contracts on a submission

use std::sync::Arc;

use ledger_api::v1 as wire;
use ledger_api::{InclusionMode, TransactionFilterKind};
use ledger_bindings::{
    BindingError, CodecConfig, ContractType, DisclosureRecord, FilterPolicy, Identifier, KeyKind,
    Metrics, Party, RuleSet, SubscriptionCodecApi, SubscriptionCodecService, SubscriptionFilter,
};
use prost::Message;

// =============================================================================
// TEST HELPERS
// =============================================================================

fn t1() -> Identifier {
    "5d1b7a:Finance.Iou:T1".parse().unwrap()
}

fn asset() -> Identifier {
    "5d1b7a:Finance.Asset:Asset".parse().unwrap()
}

fn parties(names: &[&str]) -> Vec<Party> {
    names.iter().map(|name| Party::new(*name).unwrap()).collect()
}

fn service() -> SubscriptionCodecService<Metrics> {
    SubscriptionCodecService::with_metrics(CodecConfig::default(), Arc::new(Metrics::new()))
        .unwrap()
}

fn by_party_filter(party: &str, filters: wire::Filters) -> wire::TransactionFilter {
    let mut by_party = wire::FiltersByParty::default();
    by_party.filters.insert(party.to_string(), filters);
    wire::TransactionFilter {
        kind: Some(TransactionFilterKind::FiltersByParty(by_party)),
    }
}

// =============================================================================
// SCENARIOS
// =============================================================================

#[test]
fn alice_observes_t1_without_blob() {
    let filter = SubscriptionFilter::for_template(parties(&["Alice"]), t1(), false);
    let bytes = filter.encode().encode_to_vec();

    let wire = wire::TransactionFilter::decode(bytes.as_slice()).unwrap();
    let expected = by_party_filter(
        "Alice",
        wire::Filters {
            template_filters: vec![wire::TemplateFilter {
                template_id: Some(wire::Identifier::new("5d1b7a", "Finance.Iou", "T1")),
                inclusion: InclusionMode::HideCreatedEventBlob as i32,
            }],
            interface_filters: vec![],
        },
    );
    assert_eq!(wire, expected);
    assert_eq!(SubscriptionFilter::decode(&wire).unwrap(), filter);
}

#[test]
fn multi_template_subscription_through_service() {
    let service = service();
    let iou = SubscriptionFilter::for_contract_type(
        parties(&["Alice", "Bob"]),
        &ContractType::template(t1()),
    );
    let assets = SubscriptionFilter::for_contract_type(
        parties(&["Bob", "Carol"]),
        &ContractType::interface(asset()),
    );

    let merged = service.merge_filters(&iou, &assets).unwrap();
    let decoded = service
        .decode_filter_bytes(&service.encode_filter_bytes(&merged))
        .unwrap();
    assert_eq!(decoded, merged);

    let bob = decoded.rules_for("Bob").unwrap();
    assert_eq!(bob.template_policy(&t1()), Some(FilterPolicy::HideEventBlob));
    assert_eq!(
        bob.interface_policy(&asset()),
        Some(FilterPolicy::IncludeViewHideEventBlob)
    );
    assert!(decoded.rules_for("Alice").unwrap().interfaces().is_empty());
    assert!(decoded.rules_for("Carol").unwrap().templates().is_empty());

    let snapshot = service.metrics().snapshot();
    assert_eq!(snapshot.merges, 1);
    assert_eq!(snapshot.filters_decoded, 1);
    assert_eq!(snapshot.parties_decoded, 3);
}

#[test]
fn full_fidelity_template_rule_roundtrips() {
    let rules = RuleSet::builder()
        .template(t1(), FilterPolicy::IncludeViewAndBlob)
        .unwrap()
        .build();
    let filter = SubscriptionFilter::with_shared_rules(parties(&["Alice"]), rules);
    let wire = filter.encode();
    assert_eq!(SubscriptionFilter::decode(&wire).unwrap(), filter);
}

// =============================================================================
// FORWARD COMPATIBILITY
// =============================================================================

#[test]
fn unknown_oneof_case_is_unsupported_kind() {
    // field 3, length-delimited, empty: a filter kind this client has never seen
    let bytes = [0x1a, 0x00];
    let wire = wire::TransactionFilter::decode(bytes.as_slice()).unwrap();
    assert!(wire.kind.is_none());

    assert!(matches!(
        SubscriptionFilter::decode(&wire),
        Err(BindingError::UnsupportedFilterKind(_))
    ));
}

#[test]
fn any_party_kind_is_unsupported_through_service() {
    let service = service();
    let wire = wire::TransactionFilter {
        kind: Some(TransactionFilterKind::FiltersForAnyParty(wire::Filters::default())),
    };
    assert!(matches!(
        service.decode_filter_bytes(&wire.encode_to_vec()),
        Err(BindingError::UnsupportedFilterKind(_))
    ));
    assert_eq!(service.metrics().snapshot().decode_rejections, 1);
}

#[test]
fn future_inclusion_tag_is_rejected() {
    let wire = by_party_filter(
        "Alice",
        wire::Filters {
            template_filters: vec![wire::TemplateFilter {
                template_id: Some(t1().to_wire()),
                inclusion: 7,
            }],
            interface_filters: vec![],
        },
    );
    let bytes = wire.encode_to_vec();
    let decoded_wire = wire::TransactionFilter::decode(bytes.as_slice()).unwrap();

    assert_eq!(
        SubscriptionFilter::decode(&decoded_wire),
        Err(BindingError::UnsupportedPolicy {
            tag: 7,
            key_kind: KeyKind::Template
        })
    );
}

#[test]
fn unspecified_interface_inclusion_is_rejected() {
    let wire = by_party_filter(
        "Alice",
        wire::Filters {
            template_filters: vec![],
            interface_filters: vec![wire::InterfaceFilter {
                interface_id: Some(asset().to_wire()),
                inclusion: InclusionMode::Unspecified as i32,
            }],
        },
    );
    assert_eq!(
        SubscriptionFilter::decode(&wire),
        Err(BindingError::UnsupportedPolicy {
            tag: 0,
            key_kind: KeyKind::Interface
        })
    );
}

// =============================================================================
// DISCLOSURE BATCHES
// =============================================================================

#[test]
fn disclosed_contracts_survive_bytes_roundtrip() {
    let service = service();
    let records = vec![
        DisclosureRecord::new(t1(), "00a1", b"created-event-1".to_vec()).unwrap(),
        DisclosureRecord::new(t1(), "00a2", b"created-event-2".to_vec()).unwrap(),
    ];

    let encoded: Vec<Vec<u8>> = service
        .encode_disclosures(&records)
        .iter()
        .map(|contract| contract.encode_to_vec())
        .collect();
    let received: Vec<wire::DisclosedContract> = encoded
        .iter()
        .map(|bytes| wire::DisclosedContract::decode(bytes.as_slice()).unwrap())
        .collect();

    assert_eq!(service.decode_disclosures(&received).unwrap(), records);
    let snapshot = service.metrics().snapshot();
    assert_eq!(snapshot.disclosures_encoded, 2);
    assert_eq!(snapshot.disclosures_decoded, 2);
}

#[test]
fn disclosed_contract_without_template_is_malformed() {
    let contract = wire::DisclosedContract {
        template_id: None,
        contract_id: "00a1".to_string(),
        created_event_blob: vec![1],
    };
    assert!(matches!(
        service().decode_disclosures(&[contract]),
        Err(BindingError::MalformedRecord(_))
    ));
}
