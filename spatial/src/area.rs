//! Navigation areas and the masks that select them.
//!
//! Every walkable piece of a navigable surface belongs to one area index in `0..32`.
//! Queries carry an [`AreaMask`]; bit `i` set means area `i` is eligible.

use crate::{
    bitmask_flags::{FlagBitmask, FlagSet},
    constants::ALL_AREAS,
    define_flag_enum,
};

define_flag_enum!(
    /// Named area indices. Any index below 32 is valid; these are the built-in ones.
    NavArea,
    u32,
    {
        Walkable,
        NotWalkable,
        Jump,
        Road,
        Water,
    }
);

impl NavArea {
    #[inline]
    pub fn index(self) -> u8 {
        self.bit_index()
    }
}

pub type AreaMask = FlagSet<u32>;

/// Mask selecting every area.
pub const ALL_AREA_MASK: AreaMask = FlagSet::new(ALL_AREAS);

impl FlagSet<u32> {
    /// Whether the area with raw index `area` is eligible under this mask.
    #[inline]
    pub fn allows_area(&self, area: u8) -> bool {
        self.has_bit(area as u32)
    }
}

/// Anything that can narrow a navigation query down to a set of areas.
pub trait AreaFilter {
    fn area_mask(&self) -> AreaMask;
}

impl AreaFilter for AreaMask {
    #[inline]
    fn area_mask(&self) -> AreaMask {
        *self
    }
}

impl<T: AreaFilter + ?Sized> AreaFilter for &T {
    #[inline]
    fn area_mask(&self) -> AreaMask {
        (**self).area_mask()
    }
}

/// Query filter object. Equivalent to passing its mask directly.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavQueryFilter {
    pub area_mask: AreaMask,
}

impl Default for NavQueryFilter {
    fn default() -> Self {
        Self {
            area_mask: ALL_AREA_MASK,
        }
    }
}

impl NavQueryFilter {
    pub fn new(area_mask: AreaMask) -> Self {
        Self { area_mask }
    }

    /// A filter that allows nothing; add areas with [`Self::with_area`].
    pub fn none() -> Self {
        Self::new(AreaMask::empty())
    }

    pub fn with_area(mut self, area: NavArea) -> Self {
        self.area_mask.add(area);
        self
    }

    pub fn without_area(mut self, area: NavArea) -> Self {
        self.area_mask.remove(area);
        self
    }
}

impl AreaFilter for NavQueryFilter {
    #[inline]
    fn area_mask(&self) -> AreaMask {
        self.area_mask
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filter_allows_every_area() {
        let filter = NavQueryFilter::default();
        for area in 0..32u8 {
            assert!(filter.area_mask().allows_area(area));
        }
        assert!(!filter.area_mask().allows_area(32));
    }

    #[test]
    fn filter_builders_edit_the_mask() {
        let filter = NavQueryFilter::none()
            .with_area(NavArea::Walkable)
            .with_area(NavArea::Road);

        assert_eq!(filter.area_mask().bits(), 0b1001);
        assert!(filter.area_mask().allows_area(NavArea::Road.index()));
        assert!(!filter.area_mask().allows_area(NavArea::Water.index()));

        let filter = NavQueryFilter::default().without_area(NavArea::Water);
        assert!(!filter.area_mask().has(NavArea::Water));
        assert!(filter.area_mask().has(NavArea::Jump));
    }

    #[test]
    fn filter_and_raw_mask_agree() {
        let mask = AreaMask::new(0b10110);
        assert_eq!(NavQueryFilter::new(mask).area_mask(), mask.area_mask());
    }
}
