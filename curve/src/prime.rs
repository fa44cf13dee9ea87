use num_bigint::BigUint;
use num_traits::{One, ToPrimitive, Zero};

use crate::random::random_below;

const SMALL_PRIMES: [u32; 25] = [
    2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89,
    97,
];

// Extra Miller-Rabin rounds with random bases on top of the fixed ones.
const RANDOM_ROUNDS: usize = 16;

/// Probabilistic primality test: trial division followed by Miller-Rabin.
///
/// The first 12 prime bases make the test deterministic below 3.3 * 10^24;
/// larger candidates get additional rounds with random bases.
pub(crate) fn is_probable_prime(candidate: &BigUint) -> bool {
    if let Some(small) = candidate.to_u32() {
        if small < 2 {
            return false;
        }
        if SMALL_PRIMES.contains(&small) {
            return true;
        }
    }

    for &q in SMALL_PRIMES.iter() {
        if (candidate % q).is_zero() {
            return false;
        }
    }

    let one = BigUint::one();
    let n_minus_1 = candidate - &one;
    let s = n_minus_1.trailing_zeros().unwrap_or(0);
    let d = &n_minus_1 >> s;

    let witness = |a: &BigUint| -> bool {
        let mut x = a.modpow(&d, candidate);
        if x == one || x == n_minus_1 {
            return false;
        }
        for _ in 1..s {
            x = x.modpow(&BigUint::from(2u32), candidate);
            if x == n_minus_1 {
                return false;
            }
        }
        true
    };

    if SMALL_PRIMES[..12]
        .iter()
        .any(|&a| witness(&BigUint::from(a)))
    {
        return false;
    }

    let mut rng = rand::rng();
    let three = BigUint::from(3u32);
    let span = candidate - &three;
    (0..RANDOM_ROUNDS).all(|_| {
        let a = random_below(&span, &mut rng) + &BigUint::from(2u32);
        !witness(&a)
    })
}
