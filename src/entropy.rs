//! Seed acquisition from the operating-system entropy source.

use crate::error::Error;
use crate::params::ByteArray;
use zeroize::Zeroizing;

/// Draw a variant-length seed from the OS entropy source.
///
/// A zero entropy estimate is reported on stderr but does not abort:
/// several hosts always report zero for a source that is still fine. The
/// returned guard wipes the seed once construction has absorbed it.
pub(crate) fn sample_seed<S: ByteArray>() -> Result<Zeroizing<S>, Error> {
    if entropy_estimate() == Some(0) {
        eprintln!(
            "[randomshake] warning: the OS entropy source reports a zero entropy \
             estimate; seeding proceeds, but verify the source on this host"
        );
    }

    let mut seed = Zeroizing::new(S::zeroed());
    getrandom::fill(seed.as_mut()).map_err(Error::EntropyUnavailable)?;
    Ok(seed)
}

/// Kernel estimate of available entropy bits, where the host exposes one.
#[cfg(target_os = "linux")]
fn entropy_estimate() -> Option<u64> {
    std::fs::read_to_string("/proc/sys/kernel/random/entropy_avail")
        .ok()?
        .trim()
        .parse()
        .ok()
}

#[cfg(not(target_os = "linux"))]
fn entropy_estimate() -> Option<u64> {
    None
}
