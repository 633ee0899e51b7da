use num_traits::{One, PrimInt};

/// Trait implemented by flag enums whose discriminant is a bit index.
///
/// The backing integer type is chosen via the associated `Storage`.
pub trait FlagBitmask {
    type Storage: PrimInt;

    fn bit_index(&self) -> u8;

    fn mask(&self) -> Self::Storage {
        // NOTE: `bit_index()` must be < number of bits in `Storage`.
        Self::Storage::one() << (self.bit_index() as usize)
    }
}

/// A plain bitmask over flags of a single storage type.
#[derive(Default, Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct FlagSet<T: PrimInt> {
    pub bits: T,
}

impl<T: PrimInt> FlagSet<T> {
    pub const fn new(bits: T) -> Self {
        Self { bits }
    }

    /// Every bit set.
    pub fn all() -> Self {
        Self::new(!T::zero())
    }

    /// No bit set.
    pub fn empty() -> Self {
        Self::new(T::zero())
    }

    pub fn from_flags<U: FlagBitmask<Storage = T> + Copy>(flags: &[U]) -> Self {
        let mut set = Self::empty();
        set.add_many(flags);
        set
    }

    pub fn bits(&self) -> T {
        self.bits
    }

    pub fn is_empty(&self) -> bool {
        self.bits == T::zero()
    }

    /// Whether bit `index` is set. Indices past the storage width are never set.
    pub fn has_bit(&self, index: u32) -> bool {
        if index as usize >= T::zero().count_zeros() as usize {
            return false;
        }
        (self.bits & (T::one() << index as usize)) != T::zero()
    }

    // --- Single flag operations ---
    pub fn add<U: FlagBitmask<Storage = T>>(&mut self, flag: U) {
        self.bits = self.bits | flag.mask();
    }

    pub fn remove<U: FlagBitmask<Storage = T>>(&mut self, flag: U) {
        self.bits = self.bits & !flag.mask();
    }

    pub fn has<U: FlagBitmask<Storage = T>>(&self, flag: U) -> bool {
        (self.bits & flag.mask()) != T::zero()
    }

    // --- Bulk operations ---
    pub fn add_many<U: FlagBitmask<Storage = T> + Copy>(&mut self, flags: &[U]) {
        for &flag in flags {
            self.add(flag);
        }
    }

    pub fn has_all<U: FlagBitmask<Storage = T> + Copy>(&self, flags: &[U]) -> bool {
        let combined = flags.iter().fold(T::zero(), |acc, f| acc | f.mask());
        (self.bits & combined) == combined
    }

    pub fn has_any<U: FlagBitmask<Storage = T> + Copy>(&self, flags: &[U]) -> bool {
        let combined = flags.iter().fold(T::zero(), |acc, f| acc | f.mask());
        (self.bits & combined) != T::zero()
    }

    pub fn clear(&mut self) {
        self.bits = T::zero();
    }
}

/// Declare a flag enum whose discriminant is its bit index and implement `FlagBitmask` for it.
///
/// Example:
/// ```ignore
/// define_flag_enum!(NavArea, u32, {
///     Walkable,
///     NotWalkable,
///     Jump,
/// });
/// ```
#[macro_export]
macro_rules! define_flag_enum {
    ($(#[$meta:meta])* $name:ident, $storage:ty, { $($variant:ident),* $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[repr(u8)]
        pub enum $name {
            $($variant),*
        }

        impl $crate::bitmask_flags::FlagBitmask for $name {
            type Storage = $storage;

            fn bit_index(&self) -> u8 {
                *self as u8
            }
        }
    };
}
