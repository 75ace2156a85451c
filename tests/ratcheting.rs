//! Ratchet placement: the first rate window of output is raw XOF output,
//! and every window after it is produced under a ratchet.

use randomshake::{RandomShake, Shake256, TurboShake256, Xof};

const STREAM_BYTE_LEN: usize = 1024 * 1024;

/// A generator over the same XOF that never ratchets: finalize once,
/// squeeze forever.
struct NoRatchet<X: Xof> {
    xof: X,
}

impl<X: Xof<Seed = [u8; 32]>> NoRatchet<X> {
    fn new(seed: &[u8; 32]) -> Self {
        let mut xof = X::default();
        xof.reset();
        xof.absorb(seed);
        xof.finalize();
        Self { xof }
    }

    fn next_byte(&mut self) -> u8 {
        let mut byte = [0u8; 1];
        self.xof.squeeze(&mut byte);
        byte[0]
    }
}

fn ratchet_activates_after_one_rate_window<X: Xof<Seed = [u8; 32]>>() {
    let seed = [0xDE; 32];

    let mut csprng = RandomShake::<u8, X>::with_seed(&seed);
    let mut stream = vec![0u8; STREAM_BYTE_LEN];
    csprng.generate(&mut stream);

    let mut dummy = NoRatchet::<X>::new(&seed);
    let reference: Vec<u8> = (0..STREAM_BYTE_LEN).map(|_| dummy.next_byte()).collect();

    assert_eq!(
        &stream[..X::RATE],
        &reference[..X::RATE],
        "the first rate window must be produced under no ratchet"
    );
    assert_ne!(
        &stream[X::RATE..2 * X::RATE],
        &reference[X::RATE..2 * X::RATE],
        "the second rate window must already be ratcheted"
    );
    assert_ne!(&stream[X::RATE..], &reference[X::RATE..]);
}

#[test]
fn shake256_ratchets_after_136_bytes() {
    ratchet_activates_after_one_rate_window::<Shake256>();
}

#[test]
fn turboshake256_ratchets_after_168_bytes() {
    ratchet_activates_after_one_rate_window::<TurboShake256>();
}

/// Independent cross-check of the no-ratchet window: the first 136 output
/// bytes of a SHAKE256-backed generator are exactly SHAKE256(seed).
#[test]
fn first_window_is_shake256_of_the_seed() {
    use sha3::digest::{ExtendableOutput, Update, XofReader};

    let seed = [0xDE; 32];
    let mut rng = RandomShake::<u8, Shake256>::with_seed(&seed);
    let mut ours = vec![0u8; Shake256::RATE];
    rng.generate(&mut ours);

    let mut reference = vec![0u8; Shake256::RATE];
    let mut h = sha3::Shake256::default();
    h.update(&seed);
    h.finalize_xof().read(&mut reference);

    assert_eq!(ours, reference);
}
