//! Value-level messages shared by commands and filters.

/// Globally unique name of a template or interface.
///
/// All three segments are required by the ledger; the wire type does not
/// enforce that, so decoders must check for empty segments.
#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message)]
pub struct Identifier {
    /// Hash of the package that defines the entity.
    #[prost(string, tag = "1")]
    pub package_id: ::prost::alloc::string::String,
    /// Dot-separated module path inside the package.
    #[prost(string, tag = "2")]
    pub module_name: ::prost::alloc::string::String,
    /// Name of the template or interface inside the module.
    #[prost(string, tag = "3")]
    pub entity_name: ::prost::alloc::string::String,
}

impl Identifier {
    /// Build an identifier from its three segments.
    pub fn new(
        package_id: impl Into<String>,
        module_name: impl Into<String>,
        entity_name: impl Into<String>,
    ) -> Self {
        Self {
            package_id: package_id.into(),
            module_name: module_name.into(),
            entity_name: entity_name.into(),
        }
    }
}
