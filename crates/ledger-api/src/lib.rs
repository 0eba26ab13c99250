//! # Ledger API Wire Types
//!
//! Protocol Buffer messages for the client-facing ledger API, declared with
//! `prost` derives so no code generation step is needed at build time.
//!
//! ## Layout
//!
//! - [`v1`]: the `ledger.api.v1` package
//!   - `Identifier`: package / module / entity triple naming a template or interface
//!   - `DisclosedContract`: a contract attached to a command submission
//!   - `TransactionFilter`: which events a subscription observes
//!
//! ## Compatibility
//!
//! Field tags are fixed once published. Unknown fields are skipped by the
//! decoder, which means a `oneof` case added by a newer peer arrives here as
//! an absent case. Consumers must treat an absent case as unsupported rather
//! than as a default.

pub mod v1;

pub use v1::*;
