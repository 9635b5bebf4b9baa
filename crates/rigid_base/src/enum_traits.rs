//! Contains traits implemented by the rigid derive macros


/// Trait to get the number of variants in an enum
pub trait EnumCountT {
    /// Number of variants in the enum
    const COUNT : usize;
}

/// Trait to get an enum variant from a given index
pub trait EnumFromIndexT: Sized {
    /// Try to convert an index to an enum variant
    fn from_idx(idx: usize) -> Option<Self>;

    /// Try to convert an index to an enum variant, if it couldn't convert it, return `default`
    fn from_idx_or(idx: usize, default: Self) -> Self;

    /// Convert an index to an enum variant, without checking bounds
    /// 
    /// # SAFETY
    /// 
    /// The user is required to make sure that the index is an index of a valid enum variant
    unsafe fn from_idx_unchecked(idx: usize) -> Self;
}

/// Trait to get an enum variant from its name
pub trait EnumFromNameT: Sized {
    /// Try to parse the enum from a string slice.
    fn parse(s: &str) -> Option<Self>;

    /// Parse the enum from a string slice, if it couldn't be parsed, return `default`
    fn parse_or(s: &str, default: Self) -> Self {
        Self::parse(s).unwrap_or(default)
    }
}
