use rigid_common_macros::{EnumCount, EnumDisplay, EnumFromIndex, EnumFromName};
use crate::{EnumFromIndexT, EnumFromNameT};

/// Order in which the euler angles are applied.
///
/// The order is written outer to inner, i.e. `XYZ` rotates around z first and around x last.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, EnumCount, EnumFromIndex, EnumDisplay, EnumFromName)]
pub enum AxisOrder {
    #[default]
    XYZ = 0,
    YXZ = 1,
    ZXY = 2,
    ZYX = 3,
    YZX = 4,
    XZY = 5,
}

impl AxisOrder {
    /// Get the axis order from an index, unknown indices result in [`AxisOrder::XYZ`]
    #[must_use]
    pub fn from_index_or_default(idx: usize) -> Self {
        Self::from_idx_or(idx, AxisOrder::XYZ)
    }

    /// Get the axis order from its name (case insensitive), unknown names result in [`AxisOrder::XYZ`]
    #[must_use]
    pub fn from_name_or_default(name: &str) -> Self {
        Self::parse_or(&name.trim().to_ascii_uppercase(), AxisOrder::XYZ)
    }
}

#[cfg(test)]
mod tests {
    use crate::*;

    #[test]
    fn count_and_index() {
        assert_eq!(AxisOrder::COUNT, 6);
        assert_eq!(AxisOrder::from_idx(0), Some(AxisOrder::XYZ));
        assert_eq!(AxisOrder::from_idx(4), Some(AxisOrder::YZX));
        assert_eq!(AxisOrder::from_idx(5), Some(AxisOrder::XZY));
        assert_eq!(AxisOrder::from_idx(6), None);
        assert_eq!(AxisOrder::from_index_or_default(3), AxisOrder::ZYX);
        assert_eq!(AxisOrder::from_index_or_default(42), AxisOrder::XYZ);

        for idx in 0..AxisOrder::COUNT {
            let order = AxisOrder::from_index_or_default(idx);
            assert_eq!(order as usize, idx);
        }
    }

    #[test]
    fn names() {
        assert_eq!(AxisOrder::YZX.to_string(), "YZX");
        assert_eq!(AxisOrder::parse("ZXY"), Some(AxisOrder::ZXY));
        assert_eq!(AxisOrder::parse("zxy"), None);
        assert_eq!(AxisOrder::from_name_or_default(" zxy "), AxisOrder::ZXY);
        assert_eq!(AxisOrder::from_name_or_default("XYW"), AxisOrder::XYZ);
        assert_eq!(AxisOrder::default(), AxisOrder::XYZ);
    }

    #[test]
    fn from_idx_unchecked_in_range() {
        for idx in 0..AxisOrder::COUNT {
            let order = unsafe { AxisOrder::from_idx_unchecked(idx) };
            assert_eq!(Some(order), AxisOrder::from_idx(idx));
        }
    }

    #[test]
    #[should_panic]
    fn from_idx_unchecked_out_of_range() {
        let _ = unsafe { AxisOrder::from_idx_unchecked(AxisOrder::COUNT) };
    }
}
