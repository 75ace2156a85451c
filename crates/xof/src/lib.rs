//! `randomshake-xof` — sponge XOF engines for the RandomShake CSPRNG.
//!
//! Two Keccak-sponge extendable-output functions behind the [`Xof`] trait:
//!
//! | variant | rate (bytes) | permutation | seed (bytes) |
//! |---|---|---|---|
//! | [`Shake256`] | 136 | Keccak-p\[1600, 24\] | 32 |
//! | [`TurboShake256`] | 168 | Keccak-p\[1600, 12\] | 32 |
//!
//! Both target 256-bit security. On top of the usual absorb / finalize /
//! squeeze phases the engines expose [`Xof::ratchet`], which zeroes a prefix
//! of the permutation state and re-permutes; output squeezed before a
//! ratchet cannot be recomputed from the state that survives it.

#![no_std]
#![deny(unsafe_code)]

mod sponge;

use sponge::Sponge;
use zeroize::Zeroize;

/// SHAKE256 rate in bytes.
pub const SHAKE256_RATE: usize = 136;
/// TurboSHAKE256 rate in bytes.
pub const TURBOSHAKE256_RATE: usize = 168;

const SHAKE256_ROUNDS: usize = 24;
const TURBOSHAKE256_ROUNDS: usize = 12;

/// SHAKE suffix bits plus the first pad bit.
const SHAKE_PAD: u8 = 0x1F;
/// TurboSHAKE domain-separation byte, doubling as the first pad bit.
const TURBOSHAKE_DOMAIN: u8 = 0x1F;

/// Fixed-size owned byte buffer. Lets rate- and seed-sized arrays travel as
/// associated types on [`Xof`] without const-generic arithmetic.
pub trait ByteArray:
    AsRef<[u8]> + AsMut<[u8]> + Clone + core::fmt::Debug + Zeroize + Send + Sync + 'static {
    const LEN: usize;
    fn zeroed() -> Self;
}

impl<const SIZE: usize> ByteArray for [u8; SIZE] {
    const LEN: usize = SIZE;

    #[inline]
    fn zeroed() -> Self {
        [0u8; SIZE]
    }
}

mod sealed {
    pub trait Sealed {}
}

/// A sponge extendable-output function usable as a CSPRNG backend. Sealed --
/// only implemented for [`Shake256`] and [`TurboShake256`].
///
/// Contracts a consumer may rely on:
///
/// - `squeeze` calls chain: squeezing L then M bytes yields the same stream
///   as squeezing L + M bytes at once, with no implicit reset in between.
/// - `ratchet(k)` is exactly "overwrite the first `k` state bytes with zero,
///   then apply the permutation once"; the engine stays finalized and the
///   next squeeze starts at the top of the refreshed rate window.
pub trait Xof: sealed::Sealed + Default + Zeroize {
    /// State bytes exposed per permutation call.
    const RATE: usize;
    /// Target security level in bits.
    const SECURITY_BIT_LEN: usize = 256;
    /// Seed length pinned by the variant.
    const SEED_BYTE_LEN: usize = Self::SECURITY_BIT_LEN / 8;
    /// Output bytes between consecutive ratchets of a consumer that
    /// ratchets once per rate window.
    const RATCHET_PERIOD_BYTE_LEN: usize = Self::RATE;

    /// `[u8; RATE]`.
    type Block: ByteArray;
    /// `[u8; SEED_BYTE_LEN]`.
    type Seed: ByteArray + Default;

    /// Clear all internal state back to the empty absorbing phase.
    fn reset(&mut self);
    /// Append message bytes. Permitted only before [`Xof::finalize`].
    fn absorb(&mut self, input: &[u8]);
    /// Close the absorbing phase. Required exactly once before the first
    /// squeeze.
    fn finalize(&mut self);
    /// Write the next `out.len()` bytes of the output stream.
    fn squeeze(&mut self, out: &mut [u8]);
    /// Zero the first `byte_len` state bytes (`1..=RATE`) and re-permute.
    fn ratchet(&mut self, byte_len: usize);
}

macro_rules! impl_xof {
    ($(#[$doc:meta])* $name:ident, rate = $rate:expr, rounds = $rounds:expr, pad = $pad:expr) => {
        $(#[$doc])*
        pub struct $name {
            sponge: Sponge<{ $rate }, { $rounds }>,
        }

        impl Default for $name {
            fn default() -> Self {
                Self { sponge: Sponge::new() }
            }
        }

        impl Zeroize for $name {
            fn zeroize(&mut self) {
                self.sponge.zeroize();
            }
        }

        impl core::fmt::Debug for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(concat!(stringify!($name), "([REDACTED])"))
            }
        }

        impl sealed::Sealed for $name {}

        impl Xof for $name {
            const RATE: usize = $rate;

            type Block = [u8; $rate];
            type Seed = [u8; 32];

            #[inline]
            fn reset(&mut self) {
                self.sponge.reset();
            }

            #[inline]
            fn absorb(&mut self, input: &[u8]) {
                self.sponge.absorb(input);
            }

            #[inline]
            fn finalize(&mut self) {
                self.sponge.finalize($pad);
            }

            #[inline]
            fn squeeze(&mut self, out: &mut [u8]) {
                self.sponge.squeeze(out);
            }

            #[inline]
            fn ratchet(&mut self, byte_len: usize) {
                self.sponge.ratchet(byte_len);
            }
        }
    };
}

impl_xof!(
    /// SHAKE256 (FIPS 202): 24-round Keccak-f\[1600\], 136-byte rate.
    Shake256,
    rate = SHAKE256_RATE,
    rounds = SHAKE256_ROUNDS,
    pad = SHAKE_PAD
);

impl_xof!(
    /// TurboSHAKE256: 12-round Keccak-p\[1600\], 168-byte rate, domain byte
    /// 0x1F. Roughly double the throughput of [`Shake256`] per output byte.
    TurboShake256,
    rate = TURBOSHAKE256_RATE,
    rounds = TURBOSHAKE256_ROUNDS,
    pad = TURBOSHAKE_DOMAIN
);

const _: () = {
    // Every supported result width (1, 2, 4, 8) must divide the rate, and a
    // rate block must be whole lanes.
    assert!(SHAKE256_RATE % 8 == 0);
    assert!(TURBOSHAKE256_RATE % 8 == 0);
    assert!(Shake256::SEED_BYTE_LEN == 32);
    assert!(TurboShake256::SEED_BYTE_LEN == 32);
    assert!(Shake256::RATCHET_PERIOD_BYTE_LEN == SHAKE256_RATE);
    assert!(TurboShake256::RATCHET_PERIOD_BYTE_LEN == TURBOSHAKE256_RATE);
};
