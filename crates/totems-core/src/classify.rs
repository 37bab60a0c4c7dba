//! Fixed vs variable-length classification of ABI types.

use totems_proto::TypeTag;

/// Whether a field's encoded length is known from its type alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extent {
    /// Encoded length depends only on the type.
    Fixed,
    /// Encoded length depends on the value (length-prefixed).
    Variable,
}

/// Classify an ABI type.
///
/// Strings, byte strings and sequences are variable; everything else is
/// fixed. Unsupported types are reported as fixed so that they fail on
/// encoding rather than on ordering.
pub fn classify(ty: &TypeTag) -> Extent {
    match ty {
        TypeTag::String | TypeTag::Bytes | TypeTag::Sequence(_) => Extent::Variable,
        _ => Extent::Fixed,
    }
}
