//! Value object trait: equality by value, not identity.

/// Marker trait for immutable domain values compared by their attributes
/// (an EAN code, an audit record) rather than by an identifier.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
