//! Drive a standard uniform-integer distribution from the generator via
//! its `rand_core` facade.

use rand::distr::{Distribution, Uniform};
use randomshake::RandomShake;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut csprng = RandomShake::<u8>::new()?;

    let die = Uniform::new_inclusive(1u8, 6)?;
    let rolls: Vec<u8> = (0..10).map(|_| die.sample(&mut csprng)).collect();

    println!("ten rolls of a fair die: {rolls:?}");
    Ok(())
}
