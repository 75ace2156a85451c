//! `randomshake` — a sponge-backed CSPRNG with forward secrecy.
//!
//! One generator type, [`RandomShake`], parameterized by output width
//! (`u8`/`u16`/`u32`/`u64`) and backing XOF ([`Shake256`] or the default,
//! faster [`TurboShake256`]). Seed it yourself for a reproducible stream or
//! let it seed from OS entropy; draw output one integer at a time or in
//! bulk. The two call shapes (and any mix of them) produce the identical
//! byte stream.
//!
//! After every rate-sized window of output the generator *ratchets*: it
//! zeroes a 256-bit prefix of the sponge state and re-permutes, so a later
//! state compromise cannot recover earlier output.
//!
//! # Design principles
//!
//! - **No `unsafe`** — enforced by `#![deny(unsafe_code)]`.
//! - **RAII zeroization** of the sponge state and output buffer via the
//!   `zeroize` crate.
//! - **No cloning** — a generator owns its sponge exclusively; duplicated
//!   state would emit correlated streams.
//! - **Infallible steady state** — only entropy-backed construction can
//!   fail; generation never does.
//!
//! # Example
//!
//! ```
//! use randomshake::{RandomShake, Shake256};
//!
//! // Reproducible stream from a fixed seed.
//! let mut rng = RandomShake::<u64, Shake256>::with_seed(&[0x42; 32]);
//! let word = rng.next();
//!
//! // OS-seeded, bulk output.
//! let mut rng = RandomShake::<u8>::new().expect("OS entropy available");
//! let mut buf = [0u8; 1024];
//! rng.generate(&mut buf);
//! # let _ = word;
//! ```

#![deny(unsafe_code)]

// Output words are assembled by reinterpreting buffered bytes in host
// order; the stream is only portable because that order is little-endian.
#[cfg(target_endian = "big")]
compile_error!("randomshake requires a little-endian host");

mod csprng;
mod entropy;
mod error;
mod params;

// Re-export the public API surface.
pub use csprng::RandomShake;
pub use error::Error;
pub use params::{ByteArray, ResultWord};
pub use randomshake_xof as xof;
pub use randomshake_xof::{Shake256, TurboShake256, Xof};
