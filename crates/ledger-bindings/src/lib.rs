//! # Ledger Bindings
//!
//! Client-side value model for ledger subscriptions and contract disclosure.
//!
//! ## Architecture
//!
//! This crate follows Hexagonal Architecture (Ports & Adapters):
//!
//! - **Domain Layer** (`domain/`): Pure values, no I/O
//!   - `SubscriptionFilter`: which events each party observes
//!   - `RuleSet`: one party's template and interface rules, shared via `Arc`
//!   - `FilterPolicy`: inclusion rule for one template or interface
//!   - `DisclosureRecord`: contract data attached to a command submission
//!   - `CodecConfig`: limits for untrusted wire input
//!
//! - **Ports Layer** (`ports/`): Trait definitions
//!   - `SubscriptionCodecApi`: Driving port (inbound API)
//!   - `ContractTypeDescriptor`: Driven port (generated template/interface descriptors)
//!
//! - **Service Layer** (`service/`): Orchestration
//!   - `SubscriptionCodecService`: Implements `SubscriptionCodecApi` with limits,
//!     metrics and logging
//!
//! Wire messages come from the `ledger-api` crate.
//!
//! ## Invariants
//!
//! - Filters, rule sets and records are immutable once built
//! - A template or interface key appears at most once per party
//! - Party names are never empty, so every filter that can be built decodes back
//! - Decoding never substitutes a default for an unknown filter kind or
//!   inclusion mode; it fails instead
//!
//! ## Usage Example
//!
//! ```ignore
//! use ledger_bindings::{Identifier, Party, SubscriptionFilter};
//!
//! let iou: Identifier = "abc123:Main:Iou".parse()?;
//! let parties = [Party::new("Alice")?, Party::new("Bob")?];
//! let filter = SubscriptionFilter::for_template(parties, iou, false);
//!
//! let wire = filter.encode();
//! assert_eq!(SubscriptionFilter::decode(&wire)?, filter);
//! ```

pub mod domain;
pub mod error;
pub mod metrics;
pub mod ports;
pub mod service;

// Re-exports for convenience
pub use domain::{
    CodecConfig, CodecConfigBuilder, DisclosureRecord, FilterPolicy, FiltersByParty, Identifier,
    KeyKind, Party, RuleSet, RuleSetBuilder, SubscriptionFilter,
};
pub use error::{BindingError, Result};
pub use metrics::{Metrics, MetricsRecorder, MetricsSnapshot, NoOpMetrics};
pub use ports::{ContractType, ContractTypeDescriptor, SubscriptionCodecApi};
pub use service::SubscriptionCodecService;
