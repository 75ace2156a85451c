//! Fill a 1 MiB buffer from an OS-seeded generator over the default
//! (TurboSHAKE256) XOF.

use randomshake::RandomShake;

fn main() -> Result<(), randomshake::Error> {
    let mut csprng = RandomShake::<u8>::new()?;

    let mut rand_byte_seq = vec![0u8; 1024 * 1024];
    csprng.generate(&mut rand_byte_seq);

    println!(
        "generated {} random bytes, first four: {:02x?}",
        rand_byte_seq.len(),
        &rand_byte_seq[..4]
    );
    Ok(())
}
