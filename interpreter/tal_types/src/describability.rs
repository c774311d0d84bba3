//! How instances of a type can be described in source text.

use bitflags::bitflags;

bitflags! {
    /// Descriptor forms a data type answers to.
    ///
    /// A type with no bits set can only be produced by coercion, never by
    /// a descriptor expression. The bits are consulted by the descriptor
    /// parser to decide which grammar rules a type name participates in.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct Describability: u8 {
        /// There is exactly one instance, named by the bare type name.
        const SINGLETON = 1 << 0;
        /// Instances are addressed by name ("url \"x.test\"").
        const BY_NAME = 1 << 1;
        /// Instances are addressed by 1-based index.
        const BY_INDEX = 1 << 2;
        /// Instances are addressed by an index range.
        const BY_INDEX_RANGE = 1 << 3;
        /// Instances are addressed by ordinal ("first", "last").
        const BY_ORDINAL = 1 << 4;
        /// Instances are addressed by an ordinal range.
        const BY_ORDINAL_RANGE = 1 << 5;
        /// Instances are addressed by unique id.
        const BY_ID = 1 << 6;
        /// The type has a mass-instance form ("all the ...").
        const MASS = 1 << 7;
    }
}

impl Describability {
    /// A type that descriptors cannot name at all.
    pub const NONE: Describability = Describability::empty();
}
