//! Identifiers for templates, interfaces and parties
//!
//! An [`Identifier`] names a template or interface by package, module and
//! entity. Its text form is `package_id:module_name:entity_name`, which is
//! also how it serializes with serde so it can key JSON maps.

use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use ledger_api::v1 as wire;
use serde::{Deserialize, Serialize};

use crate::error::{BindingError, Result};

/// Globally unique name of a template or interface
///
/// # Invariants
/// - All three segments are non-empty
/// - No segment contains `:`
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Identifier {
    package_id: String,
    module_name: String,
    entity_name: String,
}

impl Identifier {
    /// Create an identifier, validating every segment
    pub fn new(
        package_id: impl Into<String>,
        module_name: impl Into<String>,
        entity_name: impl Into<String>,
    ) -> Result<Self> {
        let id = Self {
            package_id: package_id.into(),
            module_name: module_name.into(),
            entity_name: entity_name.into(),
        };
        id.check().map_err(BindingError::InvalidIdentifier)?;
        Ok(id)
    }

    pub fn package_id(&self) -> &str {
        &self.package_id
    }

    pub fn module_name(&self) -> &str {
        &self.module_name
    }

    pub fn entity_name(&self) -> &str {
        &self.entity_name
    }

    /// Convert to the wire message
    pub fn to_wire(&self) -> wire::Identifier {
        wire::Identifier::new(&*self.package_id, &*self.module_name, &*self.entity_name)
    }

    /// Convert from the wire message
    ///
    /// Wire input is untrusted, so a bad segment is reported as a malformed
    /// record rather than an invalid identifier.
    pub fn from_wire(wire: &wire::Identifier) -> Result<Self> {
        let id = Self {
            package_id: wire.package_id.clone(),
            module_name: wire.module_name.clone(),
            entity_name: wire.entity_name.clone(),
        };
        id.check().map_err(BindingError::MalformedRecord)?;
        Ok(id)
    }

    fn check(&self) -> std::result::Result<(), String> {
        for (name, segment) in [
            ("package_id", &self.package_id),
            ("module_name", &self.module_name),
            ("entity_name", &self.entity_name),
        ] {
            if segment.is_empty() {
                return Err(format!("{} is empty", name));
            }
            if segment.contains(':') {
                return Err(format!("{} contains ':': {}", name, segment));
            }
        }
        Ok(())
    }
}

/// Decode a required identifier sub-message
///
/// `field` names the wire field for the error message.
pub(crate) fn decode_required(wire: Option<&wire::Identifier>, field: &str) -> Result<Identifier> {
    let wire = wire.ok_or_else(|| BindingError::MalformedRecord(format!("{} is missing", field)))?;
    Identifier::from_wire(wire).map_err(|err| match err {
        BindingError::MalformedRecord(reason) => {
            BindingError::MalformedRecord(format!("{}: {}", field, reason))
        }
        other => other,
    })
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.package_id, self.module_name, self.entity_name)
    }
}

impl FromStr for Identifier {
    type Err = BindingError;

    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s.split(':');
        match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(package_id), Some(module_name), Some(entity_name), None) => {
                Self::new(package_id, module_name, entity_name)
            }
            _ => Err(BindingError::InvalidIdentifier(format!(
                "expected package_id:module_name:entity_name, got {:?}",
                s
            ))),
        }
    }
}

impl TryFrom<String> for Identifier {
    type Error = BindingError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Identifier> for String {
    fn from(value: Identifier) -> Self {
        value.to_string()
    }
}

impl From<&Identifier> for wire::Identifier {
    fn from(value: &Identifier) -> Self {
        value.to_wire()
    }
}

/// Ledger party identifier
///
/// Opaque and ledger-assigned. The only local rule is that it is non-empty,
/// since the wire map cannot carry an empty party key back.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Party(String);

impl Party {
    pub fn new(party: impl Into<String>) -> Result<Self> {
        let party = party.into();
        if party.is_empty() {
            return Err(BindingError::InvalidParty("party is empty".to_string()));
        }
        Ok(Self(party))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Party {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for Party {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl FromStr for Party {
    type Err = BindingError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<&str> for Party {
    type Error = BindingError;

    fn try_from(value: &str) -> Result<Self> {
        Self::new(value)
    }
}

impl TryFrom<String> for Party {
    type Error = BindingError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Party> for String {
    fn from(value: Party) -> Self {
        value.0
    }
}
