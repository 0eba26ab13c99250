//! Domain Layer - Pure value model
//!
//! This layer contains:
//! - Identifiers for templates, interfaces and parties
//! - Disclosed contract records
//! - Filter policies and per-party rule sets
//! - Subscription filters and their wire codec
//! - Codec configuration
//!
//! RULES:
//! - No I/O operations
//! - No async code
//! - Values are immutable once built

pub mod config;
pub mod disclosure;
pub mod identifier;
pub mod policy;
pub mod rule_set;
pub mod subscription;

pub use config::{CodecConfig, CodecConfigBuilder};
pub use disclosure::DisclosureRecord;
pub use identifier::{Identifier, Party};
pub use policy::{FilterPolicy, KeyKind};
pub use rule_set::{RuleSet, RuleSetBuilder};
pub use subscription::{FiltersByParty, SubscriptionFilter};
