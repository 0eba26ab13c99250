//! Codec configuration and validation
//!
//! Limits applied when decoding untrusted wire input. The pure domain
//! `decode` functions do not look at these; the codec service checks them
//! before handing a message to the domain.
//!
//! # Example
//!
//! ```ignore
//! use ledger_bindings::domain::CodecConfigBuilder;
//!
//! let config = CodecConfigBuilder::new()
//!     .max_parties(50)
//!     .max_rules_per_party(200)
//!     .build()
//!     .expect("Valid config");
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{BindingError, Result};

const MIB: usize = 1024 * 1024;

/// Codec limits
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Maximum encoded message size accepted by the byte-level decoders
    pub max_message_bytes: usize,
    /// Maximum parties in one decoded filter
    pub max_parties: usize,
    /// Maximum template plus interface entries for one party
    pub max_rules_per_party: usize,
    /// Maximum created-event blob size for one disclosed contract
    pub max_created_event_blob_bytes: usize,
    /// Maximum disclosed contracts in one decoded batch
    pub max_disclosed_contracts: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            max_message_bytes: 4 * MIB,
            max_parties: 1_000,
            max_rules_per_party: 1_000,
            max_created_event_blob_bytes: MIB,
            max_disclosed_contracts: 1_000,
        }
    }
}

impl CodecConfig {
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("max_message_bytes", self.max_message_bytes),
            ("max_parties", self.max_parties),
            ("max_rules_per_party", self.max_rules_per_party),
            ("max_created_event_blob_bytes", self.max_created_event_blob_bytes),
            ("max_disclosed_contracts", self.max_disclosed_contracts),
        ] {
            if value == 0 {
                return Err(BindingError::InvalidConfig(format!("{} cannot be 0", name)));
            }
        }

        // a blob that cannot fit in any message is a misconfiguration
        if self.max_created_event_blob_bytes > self.max_message_bytes {
            return Err(BindingError::InvalidConfig(format!(
                "max_created_event_blob_bytes ({}) exceeds max_message_bytes ({})",
                self.max_created_event_blob_bytes, self.max_message_bytes
            )));
        }

        Ok(())
    }

    /// Builder-style method to set the party limit
    pub fn with_max_parties(mut self, max: usize) -> Self {
        self.max_parties = max;
        self
    }

    /// Builder-style method to set the per-party rule limit
    pub fn with_max_rules_per_party(mut self, max: usize) -> Self {
        self.max_rules_per_party = max;
        self
    }

    /// Builder-style method to set the message size limit
    pub fn with_max_message_bytes(mut self, max: usize) -> Self {
        self.max_message_bytes = max;
        self
    }
}

/// Builder for [`CodecConfig`] with validation
#[derive(Default)]
pub struct CodecConfigBuilder {
    max_message_bytes: Option<usize>,
    max_parties: Option<usize>,
    max_rules_per_party: Option<usize>,
    max_created_event_blob_bytes: Option<usize>,
    max_disclosed_contracts: Option<usize>,
}

impl CodecConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_message_bytes(mut self, bytes: usize) -> Self {
        self.max_message_bytes = Some(bytes);
        self
    }

    pub fn max_parties(mut self, parties: usize) -> Self {
        self.max_parties = Some(parties);
        self
    }

    pub fn max_rules_per_party(mut self, rules: usize) -> Self {
        self.max_rules_per_party = Some(rules);
        self
    }

    pub fn max_created_event_blob_bytes(mut self, bytes: usize) -> Self {
        self.max_created_event_blob_bytes = Some(bytes);
        self
    }

    pub fn max_disclosed_contracts(mut self, count: usize) -> Self {
        self.max_disclosed_contracts = Some(count);
        self
    }

    /// Build the config, validating all limits
    pub fn build(self) -> Result<CodecConfig> {
        let config = self.build_unchecked();
        config.validate()?;
        Ok(config)
    }

    /// Build without validation (for tests exercising rejection paths)
    pub fn build_unchecked(self) -> CodecConfig {
        let defaults = CodecConfig::default();

        CodecConfig {
            max_message_bytes: self.max_message_bytes.unwrap_or(defaults.max_message_bytes),
            max_parties: self.max_parties.unwrap_or(defaults.max_parties),
            max_rules_per_party: self
                .max_rules_per_party
                .unwrap_or(defaults.max_rules_per_party),
            max_created_event_blob_bytes: self
                .max_created_event_blob_bytes
                .unwrap_or(defaults.max_created_event_blob_bytes),
            max_disclosed_contracts: self
                .max_disclosed_contracts
                .unwrap_or(defaults.max_disclosed_contracts),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(CodecConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_limit_rejected() {
        let config = CodecConfig::default().with_max_parties(0);
        assert!(matches!(config.validate(), Err(BindingError::InvalidConfig(_))));
    }

    #[test]
    fn test_blob_limit_above_message_limit_rejected() {
        let result = CodecConfigBuilder::new()
            .max_message_bytes(1024)
            .max_created_event_blob_bytes(2048)
            .build();
        assert!(matches!(result, Err(BindingError::InvalidConfig(_))));
    }

    #[test]
    fn test_builder_uses_defaults() {
        let config = CodecConfigBuilder::new().max_parties(10).build().unwrap();
        let defaults = CodecConfig::default();
        assert_eq!(config.max_parties, 10);
        assert_eq!(config.max_rules_per_party, defaults.max_rules_per_party);
        assert_eq!(config.max_message_bytes, defaults.max_message_bytes);
    }

    #[test]
    fn test_serde_fills_missing_fields_from_defaults() {
        let config: CodecConfig = serde_json::from_str(r#"{"max_parties": 5}"#).unwrap();
        assert_eq!(config.max_parties, 5);
        assert_eq!(
            config.max_disclosed_contracts,
            CodecConfig::default().max_disclosed_contracts
        );
    }
}
