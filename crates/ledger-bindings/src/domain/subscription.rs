//! Subscription filters
//!
//! A [`SubscriptionFilter`] tells the ledger which events to deliver. The
//! protocol defines several filter kinds; this enum is closed over the kinds
//! this client understands (today, per-party rules only) and decoding any
//! other kind is an error rather than a guess.
//!
//! INVARIANTS:
//! - Never mutated after construction; `merge` returns a new filter
//! - Rule sets are shared between parties through `Arc` and have no mutators
//! - Encoding is deterministic: parties and keys are emitted in order

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::sync::Arc;

use ledger_api::v1 as wire;
use ledger_api::TransactionFilterKind;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::identifier::{Identifier, Party};
use super::policy::{FilterPolicy, KeyKind};
use super::rule_set::RuleSet;
use crate::error::{BindingError, Result};
use crate::ports::ContractTypeDescriptor;

/// Filter selecting the events a subscription observes
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SubscriptionFilter {
    /// Rules keyed by party
    ByParty(FiltersByParty),
}

/// Per-party rule sets
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FiltersByParty {
    rules: BTreeMap<Party, Arc<RuleSet>>,
}

impl FiltersByParty {
    pub fn new(rules: BTreeMap<Party, Arc<RuleSet>>) -> Self {
        Self { rules }
    }

    pub fn parties(&self) -> BTreeSet<Party> {
        self.rules.keys().cloned().collect()
    }

    pub fn rules_for(&self, party: &str) -> Option<&Arc<RuleSet>> {
        self.rules.get(party)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Party, &Arc<RuleSet>)> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Hands out one `Arc` per distinct rule set
#[derive(Default)]
struct RuleSetInterner {
    seen: HashSet<Arc<RuleSet>>,
}

impl RuleSetInterner {
    fn intern(&mut self, rules: RuleSet) -> Arc<RuleSet> {
        if let Some(existing) = self.seen.get(&rules) {
            return Arc::clone(existing);
        }
        let rules = Arc::new(rules);
        self.seen.insert(Arc::clone(&rules));
        rules
    }
}

impl SubscriptionFilter {
    /// Filter observing one template or interface for every party in `parties`
    ///
    /// Interface-like keys get `IncludeViewHideEventBlob`, template keys get
    /// `HideEventBlob`. All parties share a single rule set. An empty party
    /// set gives an empty filter.
    pub fn for_template<I, P>(parties: I, template_key: Identifier, is_interface_like: bool) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Party>,
    {
        let rules = if is_interface_like {
            RuleSet::with_entry(
                KeyKind::Interface,
                template_key,
                FilterPolicy::IncludeViewHideEventBlob,
            )
        } else {
            RuleSet::with_entry(KeyKind::Template, template_key, FilterPolicy::HideEventBlob)
        };
        Self::with_shared_rules(parties, rules)
    }

    /// Same as [`SubscriptionFilter::for_template`], with the key and the
    /// interface flag taken from a contract type descriptor
    pub fn for_contract_type<I, P, D>(parties: I, descriptor: &D) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Party>,
        D: ContractTypeDescriptor + ?Sized,
    {
        Self::for_template(
            parties,
            descriptor.contract_type_id().clone(),
            descriptor.is_interface(),
        )
    }

    /// Every party gets the same rule set instance
    pub fn with_shared_rules<I, P>(parties: I, rules: RuleSet) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Party>,
    {
        let rules = Arc::new(rules);
        let by_party = parties
            .into_iter()
            .map(|party| (party.into(), Arc::clone(&rules)))
            .collect();
        SubscriptionFilter::ByParty(FiltersByParty::new(by_party))
    }

    /// Build from explicit (party, rules) pairs
    ///
    /// A party listed more than once has its rule sets merged; conflicting
    /// policies fail the same way as [`SubscriptionFilter::merge`].
    pub fn for_parties<I, P>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (P, RuleSet)>,
        P: Into<Party>,
    {
        let mut collected: BTreeMap<Party, RuleSet> = BTreeMap::new();
        for (party, rules) in entries {
            let party = party.into();
            let rules = match collected.remove(&party) {
                Some(existing) => existing.merge(&rules, &party)?,
                None => rules,
            };
            collected.insert(party, rules);
        }

        let mut interner = RuleSetInterner::default();
        let by_party = collected
            .into_iter()
            .map(|(party, rules)| (party, interner.intern(rules)))
            .collect();
        Ok(SubscriptionFilter::ByParty(FiltersByParty::new(by_party)))
    }

    /// Parties this filter has rules for
    pub fn parties(&self) -> BTreeSet<Party> {
        match self {
            SubscriptionFilter::ByParty(by_party) => by_party.parties(),
        }
    }

    pub fn rules_for(&self, party: &str) -> Option<&Arc<RuleSet>> {
        match self {
            SubscriptionFilter::ByParty(by_party) => by_party.rules_for(party),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            SubscriptionFilter::ByParty(by_party) => by_party.is_empty(),
        }
    }

    /// Wire name of this filter's kind, for logs and errors
    pub fn kind_name(&self) -> &'static str {
        match self {
            SubscriptionFilter::ByParty(_) => "filters_by_party",
        }
    }

    /// Combine two filters
    ///
    /// Parties are unioned. For a party present on both sides the rule sets
    /// are unioned, and a key with different policies on the two sides fails
    /// with `ConflictingPolicy`. Neither input changes. Rule sets that the
    /// merge does not touch keep their `Arc`.
    pub fn merge(&self, other: &SubscriptionFilter) -> Result<SubscriptionFilter> {
        let (SubscriptionFilter::ByParty(left), SubscriptionFilter::ByParty(right)) = (self, other);

        let mut interner = RuleSetInterner::default();
        let mut merged = left.rules.clone();
        for (party, incoming) in &right.rules {
            let combined = match merged.get(party) {
                None => Arc::clone(incoming),
                Some(existing) if Arc::ptr_eq(existing, incoming) || existing == incoming => {
                    continue
                }
                Some(existing) => {
                    let rules = existing.merge(incoming, party).map_err(|err| {
                        if let BindingError::ConflictingPolicy { key, .. } = &err {
                            debug!(party = %party, key = %key, "[SubscriptionFilter] Merge rejected conflicting policies");
                        }
                        err
                    })?;
                    interner.intern(rules)
                }
            };
            merged.insert(party.clone(), combined);
        }
        Ok(SubscriptionFilter::ByParty(FiltersByParty::new(merged)))
    }

    /// Encode as the wire message
    ///
    /// An empty rule set becomes a `Filters` entry with no children, so the
    /// party stays present on the wire.
    pub fn encode(&self) -> wire::TransactionFilter {
        match self {
            SubscriptionFilter::ByParty(by_party) => wire::TransactionFilter {
                kind: Some(TransactionFilterKind::FiltersByParty(wire::FiltersByParty {
                    filters: by_party
                        .iter()
                        .map(|(party, rules)| (party.as_str().to_string(), rules.to_wire()))
                        .collect(),
                })),
            },
        }
    }

    /// Decode from the wire message
    ///
    /// Only the per-party kind is accepted. Identical rule sets received for
    /// different parties come back sharing one `Arc`.
    pub fn decode(filter: &wire::TransactionFilter) -> Result<SubscriptionFilter> {
        let by_party = match &filter.kind {
            Some(TransactionFilterKind::FiltersByParty(by_party)) => by_party,
            Some(TransactionFilterKind::FiltersForAnyParty(_)) => {
                return Err(BindingError::UnsupportedFilterKind(
                    "filters_for_any_party".to_string(),
                ))
            }
            None => {
                return Err(BindingError::UnsupportedFilterKind(
                    "filter kind is absent or unknown".to_string(),
                ))
            }
        };

        let mut interner = RuleSetInterner::default();
        let mut rules = BTreeMap::new();
        for (party, filters) in &by_party.filters {
            let party = Party::new(party.as_str()).map_err(|_| {
                BindingError::MalformedRecord("filters_by_party has an empty party key".to_string())
            })?;
            let decoded = RuleSet::from_wire(filters, &party)?;
            rules.insert(party, interner.intern(decoded));
        }
        Ok(SubscriptionFilter::ByParty(FiltersByParty::new(rules)))
    }
}
