//! Construction-time errors. Steady-state generation is infallible.

use thiserror::Error;

/// Errors surfaced while constructing a generator. Everything else in the
/// crate's error taxonomy is rejected at compile time (unsupported result
/// width, big-endian host, wrong seed length).
#[derive(Debug, Error)]
pub enum Error {
    /// The operating-system entropy source could not produce any bytes.
    #[error("operating-system entropy source is unavailable")]
    EntropyUnavailable(#[source] getrandom::Error),
}
