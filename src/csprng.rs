//! The CSPRNG state machine: sponge binding, output buffering, and
//! forward-secrecy ratcheting.
//!
//! The generator keeps one rate-sized window of squeezed output and a read
//! cursor. The first window is raw XOF output; every later window is
//! produced by the refill protocol `ratchet -> squeeze -> cursor = 0`, so a
//! ratchet lands after each full rate window of delivered output and nowhere
//! else. That placement is what makes the stream byte-identical across call
//! shapes: one value at a time, bulk, or any mix.

use core::marker::PhantomData;

use crate::entropy;
use crate::error::Error;
use crate::params::{ByteArray, ResultWord};
use randomshake_xof::{Shake256, TurboShake256, Xof};
use zeroize::Zeroize;

/// Sponge-backed cryptographically secure pseudo-random number generator
/// with forward secrecy.
///
/// `T` selects the width of the value-producing call ([`RandomShake::next`]
/// returns one `T` per invocation); `X` selects the backing XOF. The
/// defaults mirror the recommended configuration: byte output over
/// [`TurboShake256`], the faster of the two variants.
///
/// Two construction modes exist: [`RandomShake::with_seed`] yields a
/// reproducible stream from a caller-supplied seed, [`RandomShake::new`]
/// seeds itself from the operating system. For a fixed seed and XOF the
/// output byte stream is identical no matter how it is consumed --
/// `next()` calls of any width, [`RandomShake::generate`] calls of any
/// lengths, or both interleaved.
///
/// A generator deliberately implements neither `Clone` nor `Copy`: a
/// duplicate would share the sponge state and emit correlated streams while
/// looking independent. One instance serves one thread; every operation
/// takes `&mut self`. On drop, the sponge state and the output buffer are
/// wiped through non-elidable stores.
pub struct RandomShake<T: ResultWord = u8, X: Xof = TurboShake256> {
    xof: X,
    buffer: X::Block,
    cursor: usize,
    _width: PhantomData<fn() -> T>,
}

impl<T: ResultWord, X: Xof> RandomShake<T, X> {
    /// Seed length consumed by construction, in bytes.
    pub const SEED_BYTE_LEN: usize = X::SEED_BYTE_LEN;
    /// Smallest value [`RandomShake::next`] can return.
    pub const MIN: T = T::MIN;
    /// Largest value [`RandomShake::next`] can return.
    pub const MAX: T = T::MAX;
    /// State bytes zeroed at the start of every refill. Capped by the rate,
    /// sized to the 256-bit security target of both supported variants.
    pub const RATCHET_BYTE_LEN: usize = if X::SECURITY_BIT_LEN / 8 < X::RATE {
        X::SECURITY_BIT_LEN / 8
    } else {
        X::RATE
    };

    /// Deterministic construction: absorb `seed`, finalize, and squeeze the
    /// first rate window. The first `X::RATE` output bytes are plain XOF
    /// output, produced under no ratchet.
    pub fn with_seed(seed: &X::Seed) -> Self {
        let mut xof = X::default();
        let mut buffer = X::Block::zeroed();
        xof.absorb(seed.as_ref());
        xof.finalize();
        xof.squeeze(buffer.as_mut());
        Self {
            xof,
            buffer,
            cursor: 0,
            _width: PhantomData,
        }
    }

    /// Non-deterministic construction: sample the seed from the operating
    /// system, then proceed exactly as [`RandomShake::with_seed`].
    ///
    /// # Errors
    /// [`Error::EntropyUnavailable`] if the OS source cannot produce bytes.
    pub fn new() -> Result<Self, Error> {
        let seed = entropy::sample_seed::<X::Seed>()?;
        Ok(Self::with_seed(&seed))
    }

    /// The refill protocol, and the only steady-state ratchet site.
    fn refill(&mut self) {
        self.xof.ratchet(Self::RATCHET_BYTE_LEN);
        self.xof.squeeze(self.buffer.as_mut());
        self.cursor = 0;
    }

    /// Squeeze one `T`: the next `T::WIDTH` stream bytes, reinterpreted as
    /// a little-endian unsigned integer.
    #[must_use = "the generator state has advanced; the value should be consumed"]
    pub fn next(&mut self) -> T {
        const { assert!(X::RATE % T::WIDTH == 0) }
        if self.cursor == X::RATE {
            self.refill();
        }
        // generate() can leave the cursor unaligned; a tail shorter than one
        // word is read through the bulk path instead of past the window.
        if X::RATE - self.cursor < T::WIDTH {
            let mut bytes = [0u8; 8];
            self.generate(&mut bytes[..T::WIDTH]);
            return T::from_le_slice(&bytes[..T::WIDTH]);
        }
        let value = T::from_le_slice(&self.buffer.as_ref()[self.cursor..self.cursor + T::WIDTH]);
        self.cursor += T::WIDTH;
        value
    }

    /// Fill `dest` with the next `dest.len()` stream bytes, equivalent to
    /// that many one-byte calls in a row.
    ///
    /// Buffered bytes are consumed first; full rate windows are then
    /// squeezed straight into `dest`, each preceded by its ratchet, and a
    /// final partial window goes through the internal buffer so the next
    /// call continues mid-window.
    pub fn generate(&mut self, dest: &mut [u8]) {
        let head = dest.len().min(X::RATE - self.cursor);
        dest[..head].copy_from_slice(&self.buffer.as_ref()[self.cursor..self.cursor + head]);
        self.cursor += head;

        let mut produced = head;
        while dest.len() - produced >= X::RATE {
            self.xof.ratchet(Self::RATCHET_BYTE_LEN);
            self.xof.squeeze(&mut dest[produced..produced + X::RATE]);
            produced += X::RATE;
        }

        let tail = dest.len() - produced;
        if tail > 0 {
            self.refill();
            dest[produced..].copy_from_slice(&self.buffer.as_ref()[..tail]);
            self.cursor = tail;
        }
    }
}

impl<T: ResultWord, X: Xof> Zeroize for RandomShake<T, X> {
    fn zeroize(&mut self) {
        self.xof.zeroize();
        self.buffer.zeroize();
        self.cursor = 0;
    }
}

impl<T: ResultWord, X: Xof> Drop for RandomShake<T, X> {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl<T: ResultWord, X: Xof> core::fmt::Debug for RandomShake<T, X> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("RandomShake([REDACTED])")
    }
}

// -- rand_core facade --------------------------------------------------------
//
// Lets the generator stand in wherever a `CryptoRng` is expected, which is
// also what plugs it into the `rand` distribution samplers. All trait
// methods consume the same underlying byte stream as the inherent API.

impl<T: ResultWord, X: Xof> rand_core::RngCore for RandomShake<T, X> {
    /// The next 4 stream bytes, little-endian.
    fn next_u32(&mut self) -> u32 {
        let mut bytes = [0u8; 4];
        self.generate(&mut bytes);
        u32::from_le_bytes(bytes)
    }

    /// The next 8 stream bytes, little-endian.
    fn next_u64(&mut self) -> u64 {
        let mut bytes = [0u8; 8];
        self.generate(&mut bytes);
        u64::from_le_bytes(bytes)
    }

    /// Equivalent to [`RandomShake::generate`].
    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.generate(dest);
    }
}

impl<T: ResultWord, X: Xof> rand_core::CryptoRng for RandomShake<T, X> {}

impl<T: ResultWord, X: Xof> rand_core::SeedableRng for RandomShake<T, X> {
    type Seed = X::Seed;

    fn from_seed(seed: Self::Seed) -> Self {
        // The by-value seed is a copy the caller cannot wipe; do it here.
        let seed = zeroize::Zeroizing::new(seed);
        Self::with_seed(&seed)
    }
}

const _: () = {
    // Both rates hold a whole number of every supported word width, so a
    // refill can never strand a partial word.
    assert!(Shake256::RATE % 8 == 0);
    assert!(TurboShake256::RATE % 8 == 0);
    // 256-bit ratchet prefix fits inside either rate.
    assert!(RandomShake::<u8, Shake256>::RATCHET_BYTE_LEN == 32);
    assert!(RandomShake::<u8, TurboShake256>::RATCHET_BYTE_LEN == 32);
};

#[cfg(test)]
mod tests {
    use super::*;

    const SEED: [u8; 32] = [0xDE; 32];

    #[test]
    fn refill_happens_lazily_at_the_window_edge() {
        let mut rng = RandomShake::<u8, Shake256>::with_seed(&SEED);
        for _ in 0..Shake256::RATE {
            let _ = rng.next();
        }
        // The window is exhausted but not yet refilled.
        assert_eq!(rng.cursor, Shake256::RATE);
        let _ = rng.next();
        assert_eq!(rng.cursor, 1);
    }

    #[test]
    fn wide_words_advance_the_cursor_by_their_width() {
        let mut rng = RandomShake::<u64, TurboShake256>::with_seed(&SEED);
        let _ = rng.next();
        let _ = rng.next();
        assert_eq!(rng.cursor, 16);
    }

    #[test]
    fn unaligned_cursor_falls_back_to_the_bulk_path() {
        // Push the cursor to RATE - 3, then ask for a u64: the split read
        // must equal the same 8 bytes of the pure byte stream.
        let mut reference = RandomShake::<u8, Shake256>::with_seed(&SEED);
        let mut stream = vec![0u8; Shake256::RATE + 16];
        reference.generate(&mut stream);

        let mut rng = RandomShake::<u64, Shake256>::with_seed(&SEED);
        let mut skip = vec![0u8; Shake256::RATE - 3];
        rng.generate(&mut skip);
        let value = rng.next();

        let expected_bytes: [u8; 8] =
            stream[Shake256::RATE - 3..Shake256::RATE + 5].try_into().unwrap();
        assert_eq!(value, u64::from_le_bytes(expected_bytes));
    }

    #[test]
    fn empty_generate_is_a_no_op() {
        let mut rng = RandomShake::<u8, TurboShake256>::with_seed(&SEED);
        rng.generate(&mut []);
        assert_eq!(rng.cursor, 0);
        let first = rng.next();
        let mut fresh = RandomShake::<u8, TurboShake256>::with_seed(&SEED);
        assert_eq!(first, fresh.next());
    }

    #[test]
    fn min_max_bounds_are_static() {
        assert_eq!(RandomShake::<u8, TurboShake256>::MIN, 0);
        assert_eq!(RandomShake::<u8, TurboShake256>::MAX, u8::MAX);
        assert_eq!(RandomShake::<u64, Shake256>::MIN, 0);
        assert_eq!(RandomShake::<u64, Shake256>::MAX, u64::MAX);
        assert_eq!(RandomShake::<u16, Shake256>::SEED_BYTE_LEN, 32);
    }

    #[test]
    fn zeroize_wipes_buffer_and_cursor() {
        // Drop delegates to this same Zeroize impl; probe it on a live
        // instance where the wiped state is still inspectable.
        let mut rng = RandomShake::<u8, TurboShake256>::with_seed(&SEED);
        let mut out = vec![0u8; 50];
        rng.generate(&mut out);
        assert!(rng.buffer.as_ref().iter().any(|&b| b != 0));

        rng.zeroize();
        assert!(rng.buffer.as_ref().iter().all(|&b| b == 0));
        assert_eq!(rng.cursor, 0);
    }

    #[test]
    fn entropy_construction_yields_distinct_streams() {
        let mut a = RandomShake::<u8, TurboShake256>::new().expect("entropy source");
        let mut b = RandomShake::<u8, TurboShake256>::new().expect("entropy source");
        let mut out_a = vec![0u8; 64];
        let mut out_b = vec![0u8; 64];
        a.generate(&mut out_a);
        b.generate(&mut out_b);
        assert_ne!(out_a, out_b);
    }

    // -- rand_core facade ----------------------------------------------------

    #[test]
    fn fill_bytes_is_the_bulk_operation() {
        use rand_core::RngCore;

        let mut via_trait = RandomShake::<u8, TurboShake256>::with_seed(&SEED);
        let mut via_inherent = RandomShake::<u8, TurboShake256>::with_seed(&SEED);

        let mut a = vec![0u8; 1000];
        let mut b = vec![0u8; 1000];
        via_trait.fill_bytes(&mut a);
        via_inherent.generate(&mut b);
        assert_eq!(a, b);
    }

    #[test]
    fn next_u64_reads_the_byte_stream_little_endian() {
        use rand_core::RngCore;

        let mut words = RandomShake::<u8, TurboShake256>::with_seed(&SEED);
        let mut bytes = RandomShake::<u8, TurboShake256>::with_seed(&SEED);

        let word = words.next_u64();
        let mut stream = [0u8; 8];
        bytes.generate(&mut stream);
        assert_eq!(word, u64::from_le_bytes(stream));
    }

    #[test]
    fn seedable_rng_matches_inherent_construction() {
        use rand_core::{RngCore, SeedableRng};

        let mut a: RandomShake = SeedableRng::from_seed(SEED);
        let mut b = RandomShake::<u8, TurboShake256>::with_seed(&SEED);
        assert_eq!(a.next_u64(), b.next_u64());
    }

    #[test]
    fn drives_a_uniform_distribution() {
        use rand::Rng;
        use rand::distr::{Distribution, Uniform};

        let mut rng = RandomShake::<u8, TurboShake256>::with_seed(&SEED);
        let die = Uniform::new_inclusive(1u8, 6).expect("valid range");
        for _ in 0..1000 {
            let roll = die.sample(&mut rng);
            assert!((1..=6).contains(&roll));
        }
        // The blanket `Rng` extension works as well.
        let _coin: bool = rng.random();
    }
}
