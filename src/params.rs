//! Result-width parameterization.
//!
//! The sealed [`ResultWord`] trait encodes the supported output widths (1,
//! 2, 4, 8 bytes) at the type level; an unsupported width is simply not a
//! `ResultWord`, so it is rejected at compile time rather than checked at
//! run time.

pub use randomshake_xof::ByteArray;

mod sealed {
    pub trait Sealed {}
}

/// Unsigned integer type the generator can emit one value of per call.
/// Sealed -- implemented exactly for `u8`, `u16`, `u32`, `u64`.
pub trait ResultWord:
    sealed::Sealed + Copy + Default + core::fmt::Debug + PartialEq + Eq + Send + Sync + 'static {
    /// Width in bytes.
    const WIDTH: usize;
    /// Smallest emitted value (always zero).
    const MIN: Self;
    /// Largest emitted value (`2^(8 * WIDTH) - 1`).
    const MAX: Self;

    /// Reassemble a value from exactly `WIDTH` little-endian bytes.
    fn from_le_slice(bytes: &[u8]) -> Self;
}

macro_rules! impl_result_word {
    ($($ty:ty),+ $(,)?) => {$(
        impl sealed::Sealed for $ty {}

        impl ResultWord for $ty {
            const WIDTH: usize = size_of::<$ty>();
            const MIN: Self = <$ty>::MIN;
            const MAX: Self = <$ty>::MAX;

            #[inline]
            fn from_le_slice(bytes: &[u8]) -> Self {
                <$ty>::from_le_bytes(bytes.try_into().unwrap())
            }
        }
    )+};
}

impl_result_word!(u8, u16, u32, u64);
