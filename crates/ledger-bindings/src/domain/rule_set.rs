//! Per-party rule sets
//!
//! A [`RuleSet`] holds one party's template and interface rules. It is
//! immutable once built and is shared between parties through `Arc`.
//!
//! INVARIANTS:
//! - Each template and interface key appears at most once
//! - Every policy is legal for its key kind

use std::collections::BTreeMap;

use ledger_api::v1 as wire;
use serde::{Deserialize, Serialize};

use super::identifier::{decode_required, Identifier, Party};
use super::policy::{FilterPolicy, KeyKind};
use crate::error::{BindingError, Result};

/// Template and interface rules for one party
///
/// An empty rule set means "no template or interface rules"; what the
/// ledger delivers in that case is the ledger's default.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RuleSetRepr")]
pub struct RuleSet {
    templates: BTreeMap<Identifier, FilterPolicy>,
    interfaces: BTreeMap<Identifier, FilterPolicy>,
}

/// Unvalidated serde shape, checked through the builder
#[derive(Deserialize)]
struct RuleSetRepr {
    #[serde(default)]
    templates: BTreeMap<Identifier, FilterPolicy>,
    #[serde(default)]
    interfaces: BTreeMap<Identifier, FilterPolicy>,
}

impl TryFrom<RuleSetRepr> for RuleSet {
    type Error = BindingError;

    fn try_from(repr: RuleSetRepr) -> Result<Self> {
        let mut builder = RuleSetBuilder::new();
        for (id, policy) in repr.templates {
            builder = builder.template(id, policy)?;
        }
        for (id, policy) in repr.interfaces {
            builder = builder.interface(id, policy)?;
        }
        Ok(builder.build())
    }
}

impl RuleSet {
    /// Rule set with no entries
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn builder() -> RuleSetBuilder {
        RuleSetBuilder::new()
    }

    /// Rule set observing a single template
    pub fn single_template(template_id: Identifier, policy: FilterPolicy) -> Result<Self> {
        Ok(RuleSetBuilder::new().template(template_id, policy)?.build())
    }

    /// Rule set observing a single interface
    pub fn single_interface(interface_id: Identifier, policy: FilterPolicy) -> Result<Self> {
        Ok(RuleSetBuilder::new().interface(interface_id, policy)?.build())
    }

    /// Rule set with one entry whose policy is known to be legal
    pub(crate) fn with_entry(key_kind: KeyKind, key: Identifier, policy: FilterPolicy) -> Self {
        debug_assert!(policy.is_legal_for(key_kind));
        let mut rules = Self::default();
        match key_kind {
            KeyKind::Template => rules.templates.insert(key, policy),
            KeyKind::Interface => rules.interfaces.insert(key, policy),
        };
        rules
    }

    pub fn templates(&self) -> &BTreeMap<Identifier, FilterPolicy> {
        &self.templates
    }

    pub fn interfaces(&self) -> &BTreeMap<Identifier, FilterPolicy> {
        &self.interfaces
    }

    pub fn template_policy(&self, template_id: &Identifier) -> Option<FilterPolicy> {
        self.templates.get(template_id).copied()
    }

    pub fn interface_policy(&self, interface_id: &Identifier) -> Option<FilterPolicy> {
        self.interfaces.get(interface_id).copied()
    }

    /// Total number of template and interface entries
    pub fn len(&self) -> usize {
        self.templates.len() + self.interfaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty() && self.interfaces.is_empty()
    }

    /// Union of two rule sets owned by `party`
    ///
    /// A key present on both sides must carry the same policy.
    pub(crate) fn merge(&self, other: &RuleSet, party: &Party) -> Result<RuleSet> {
        let conflict = |key: &Identifier, existing: FilterPolicy, incoming: FilterPolicy| {
            BindingError::ConflictingPolicy {
                party: party.clone(),
                key: key.clone(),
                existing,
                incoming,
            }
        };

        let mut merged = self.clone();
        for (id, &incoming) in &other.templates {
            match merged.templates.get(id) {
                Some(&existing) if existing != incoming => {
                    return Err(conflict(id, existing, incoming))
                }
                Some(_) => {}
                None => {
                    merged.templates.insert(id.clone(), incoming);
                }
            }
        }
        for (id, &incoming) in &other.interfaces {
            match merged.interfaces.get(id) {
                Some(&existing) if existing != incoming => {
                    return Err(conflict(id, existing, incoming))
                }
                Some(_) => {}
                None => {
                    merged.interfaces.insert(id.clone(), incoming);
                }
            }
        }
        Ok(merged)
    }

    /// Encode as the wire `Filters` message
    pub fn to_wire(&self) -> wire::Filters {
        wire::Filters {
            template_filters: self
                .templates
                .iter()
                .map(|(id, policy)| wire::TemplateFilter {
                    template_id: Some(id.to_wire()),
                    inclusion: policy.to_wire() as i32,
                })
                .collect(),
            interface_filters: self
                .interfaces
                .iter()
                .map(|(id, policy)| wire::InterfaceFilter {
                    interface_id: Some(id.to_wire()),
                    inclusion: policy.to_wire() as i32,
                })
                .collect(),
        }
    }

    /// Decode the wire `Filters` message received for `party`
    ///
    /// Repeated identifiers are rejected even when their policies agree, since
    /// a well-behaved encoder never emits them.
    pub(crate) fn from_wire(filters: &wire::Filters, party: &Party) -> Result<RuleSet> {
        let mut rules = RuleSet::default();
        for entry in &filters.template_filters {
            let id = decode_required(entry.template_id.as_ref(), "template_filters.template_id")?;
            let policy = FilterPolicy::from_wire(entry.inclusion, KeyKind::Template)?;
            if rules.templates.insert(id.clone(), policy).is_some() {
                return Err(BindingError::DuplicateKey {
                    party: party.clone(),
                    key: id,
                });
            }
        }
        for entry in &filters.interface_filters {
            let id = decode_required(entry.interface_id.as_ref(), "interface_filters.interface_id")?;
            let policy = FilterPolicy::from_wire(entry.inclusion, KeyKind::Interface)?;
            if rules.interfaces.insert(id.clone(), policy).is_some() {
                return Err(BindingError::DuplicateKey {
                    party: party.clone(),
                    key: id,
                });
            }
        }
        Ok(rules)
    }
}

/// Builder for [`RuleSet`] with per-entry validation
///
/// # Example
///
/// ```ignore
/// let rules = RuleSet::builder()
///     .template(iou_id, FilterPolicy::IncludeViewAndBlob)?
///     .interface(asset_id, FilterPolicy::IncludeViewHideEventBlob)?
///     .build();
/// ```
#[derive(Debug, Default)]
pub struct RuleSetBuilder {
    rules: RuleSet,
}

impl RuleSetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a template rule
    pub fn template(self, template_id: Identifier, policy: FilterPolicy) -> Result<Self> {
        self.add(KeyKind::Template, template_id, policy)
    }

    /// Add an interface rule
    pub fn interface(self, interface_id: Identifier, policy: FilterPolicy) -> Result<Self> {
        self.add(KeyKind::Interface, interface_id, policy)
    }

    fn add(mut self, key_kind: KeyKind, key: Identifier, policy: FilterPolicy) -> Result<Self> {
        if !policy.is_legal_for(key_kind) {
            return Err(BindingError::PolicyNotAllowed { key_kind, policy });
        }
        let map = match key_kind {
            KeyKind::Template => &mut self.rules.templates,
            KeyKind::Interface => &mut self.rules.interfaces,
        };
        match map.get(&key).copied() {
            Some(existing) if existing != policy => {
                return Err(BindingError::ConflictingRule {
                    key,
                    existing,
                    incoming: policy,
                })
            }
            Some(_) => {}
            None => {
                map.insert(key, policy);
            }
        }
        Ok(self)
    }

    pub fn build(self) -> RuleSet {
        self.rules
    }
}
