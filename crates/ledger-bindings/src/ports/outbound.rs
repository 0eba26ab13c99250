//! Outbound Ports (Driven Ports)
//!
//! Code-generated template and interface descriptors live outside this
//! crate. All the filter builders need from them is a stable identifier and
//! whether the descriptor denotes an interface.

use serde::{Deserialize, Serialize};

use crate::domain::Identifier;

/// Descriptor of a template or interface (Driven Port)
///
/// The interface flag selects the filter shape: interfaces are observed
/// through their view, templates directly.
pub trait ContractTypeDescriptor {
    /// Globally unique identifier of the template or interface
    fn contract_type_id(&self) -> &Identifier;

    /// True when the descriptor denotes an interface
    fn is_interface(&self) -> bool;
}

impl<T: ContractTypeDescriptor + ?Sized> ContractTypeDescriptor for &T {
    fn contract_type_id(&self) -> &Identifier {
        (**self).contract_type_id()
    }

    fn is_interface(&self) -> bool {
        (**self).is_interface()
    }
}

/// Plain descriptor for callers without generated code
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContractType {
    pub id: Identifier,
    pub interface: bool,
}

impl ContractType {
    pub fn template(id: Identifier) -> Self {
        Self {
            id,
            interface: false,
        }
    }

    pub fn interface(id: Identifier) -> Self {
        Self {
            id,
            interface: true,
        }
    }
}

impl ContractTypeDescriptor for ContractType {
    fn contract_type_id(&self) -> &Identifier {
        &self.id
    }

    fn is_interface(&self) -> bool {
        self.interface
    }
}
