//! Incremental Keccak sponge shared by both XOF variants.
//!
//! Unlike a one-shot hash, the sponge here is a long-lived object: input is
//! buffered and XORed into the state one rate-sized block at a time, and
//! output is read lazily so that consecutive squeezes continue the same
//! stream. The extra `ratchet` phase overwrites a prefix of the state and
//! re-permutes, severing the state from everything squeezed before it.

use zeroize::Zeroize;

const PLEN: usize = 25;

/// Duplex-style sponge over `Keccak-p[1600, ROUNDS]` with a byte rate of
/// `RATE`.
///
/// Phases: any number of `absorb` calls, one `finalize`, then any
/// interleaving of `squeeze` and `ratchet`. Phase misuse is a programming
/// error and is caught by debug assertions.
pub(crate) struct Sponge<const RATE: usize, const ROUNDS: usize> {
    lanes: [u64; PLEN],
    block: [u8; RATE],
    block_pos: usize,
    squeeze_pos: usize,
    finalized: bool,
}

impl<const RATE: usize, const ROUNDS: usize> Sponge<RATE, ROUNDS> {
    pub(crate) const fn new() -> Self {
        Self {
            lanes: [0; PLEN],
            block: [0; RATE],
            block_pos: 0,
            squeeze_pos: 0,
            finalized: false,
        }
    }

    #[inline]
    fn permute(&mut self) {
        keccak::p1600(&mut self.lanes, ROUNDS);
    }

    /// XOR the pending block into the state lane-wise and permute.
    #[inline]
    fn absorb_block(&mut self) {
        const { assert!(RATE % 8 == 0 && RATE <= PLEN * 8) }
        for (lane, chunk) in self.lanes.iter_mut().zip(self.block.as_chunks().0) {
            *lane ^= u64::from_le_bytes(*chunk);
        }
        self.block.fill(0);
        self.block_pos = 0;
        self.permute();
    }

    /// Byte `idx` of the state, in little-endian lane order.
    #[inline]
    fn state_byte(&self, idx: usize) -> u8 {
        (self.lanes[idx / 8] >> ((idx % 8) * 8)) as u8
    }

    /// Zero the first `byte_len` state bytes, partial trailing lane included.
    fn zero_state_prefix(&mut self, byte_len: usize) {
        let full_lanes = byte_len / 8;
        self.lanes[..full_lanes].fill(0);
        let rem = byte_len % 8;
        if rem != 0 {
            self.lanes[full_lanes] &= u64::MAX << (rem * 8);
        }
    }

    /// Return to the pristine absorbing state through non-elidable stores.
    pub(crate) fn reset(&mut self) {
        self.zeroize();
    }

    pub(crate) fn absorb(&mut self, input: &[u8]) {
        debug_assert!(!self.finalized, "absorb after finalize");
        let mut consumed = 0;
        while consumed < input.len() {
            let n = (RATE - self.block_pos).min(input.len() - consumed);
            self.block[self.block_pos..self.block_pos + n]
                .copy_from_slice(&input[consumed..consumed + n]);
            self.block_pos += n;
            consumed += n;
            if self.block_pos == RATE {
                self.absorb_block();
            }
        }
    }

    /// Close the absorbing phase with `pad` as the domain/suffix byte. The
    /// permutation run by the final block makes the first rate window
    /// immediately squeezable.
    pub(crate) fn finalize(&mut self, pad: u8) {
        debug_assert!(!self.finalized, "finalize called twice");
        self.block[self.block_pos] ^= pad;
        self.block[RATE - 1] ^= 0x80;
        self.absorb_block();
        self.squeeze_pos = 0;
        self.finalized = true;
    }

    /// Write the next `out.len()` bytes of the output stream. Consecutive
    /// squeezes chain; the permutation runs only when the rate window is
    /// exhausted.
    pub(crate) fn squeeze(&mut self, out: &mut [u8]) {
        debug_assert!(self.finalized, "squeeze before finalize");
        let mut written = 0;
        while written < out.len() {
            if self.squeeze_pos == RATE {
                self.permute();
                self.squeeze_pos = 0;
            }
            let n = (RATE - self.squeeze_pos).min(out.len() - written);
            let dst = &mut out[written..written + n];
            if self.squeeze_pos % 8 == 0 && n % 8 == 0 {
                let lanes = &self.lanes[self.squeeze_pos / 8..];
                for (chunk, lane) in dst.as_chunks_mut().0.iter_mut().zip(lanes) {
                    *chunk = lane.to_le_bytes();
                }
            } else {
                for (i, byte) in dst.iter_mut().enumerate() {
                    *byte = self.state_byte(self.squeeze_pos + i);
                }
            }
            self.squeeze_pos += n;
            written += n;
        }
    }

    /// Zero the first `byte_len` state bytes and permute once. The sponge
    /// stays finalized and the next squeeze starts a fresh rate window; the
    /// pre-ratchet stream cannot be recomputed from the surviving state.
    pub(crate) fn ratchet(&mut self, byte_len: usize) {
        debug_assert!(self.finalized, "ratchet before finalize");
        debug_assert!(
            byte_len > 0 && byte_len <= RATE,
            "ratchet byte count outside 1..=RATE"
        );
        self.zero_state_prefix(byte_len);
        self.permute();
        self.squeeze_pos = 0;
    }
}

impl<const RATE: usize, const ROUNDS: usize> Zeroize for Sponge<RATE, ROUNDS> {
    fn zeroize(&mut self) {
        self.lanes.zeroize();
        self.block.zeroize();
        self.block_pos = 0;
        self.squeeze_pos = 0;
        self.finalized = false;
    }
}
