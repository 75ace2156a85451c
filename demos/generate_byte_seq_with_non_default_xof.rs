//! Same as `generate_byte_seq`, but over SHAKE256 instead of the default
//! TurboSHAKE256. The default has roughly double the throughput; pick
//! SHAKE256 when FIPS 202 geometry matters more than speed.

use randomshake::{RandomShake, Shake256};

fn main() -> Result<(), randomshake::Error> {
    let mut csprng = RandomShake::<u8, Shake256>::new()?;

    let mut rand_byte_seq = vec![0u8; 1024 * 1024];
    csprng.generate(&mut rand_byte_seq);

    println!(
        "generated {} random bytes over SHAKE256, first four: {:02x?}",
        rand_byte_seq.len(),
        &rand_byte_seq[..4]
    );
    Ok(())
}
