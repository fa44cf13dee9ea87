use num_bigint::BigUint;
use num_traits::Zero;
use rand::Rng;

/// Samples uniformly from `[0, bound)` by rejection over big-endian bytes.
///
/// Returns zero when `bound` is zero.
pub(crate) fn random_below<R: Rng + ?Sized>(bound: &BigUint, rng: &mut R) -> BigUint {
    if bound.is_zero() {
        return BigUint::zero();
    }

    let bits = bound.bits();
    let len = bits.div_ceil(8) as usize;
    let excess = (len as u64) * 8 - bits;
    let mask = 0xffu8 >> excess;

    let mut buf = vec![0u8; len];
    loop {
        rng.fill(&mut buf[..]);
        buf[0] &= mask;
        let candidate = BigUint::from_bytes_be(&buf);
        if &candidate < bound {
            return candidate;
        }
    }
}

/// Samples uniformly from `[1, bound)`. Returns zero when the range is empty.
pub(crate) fn random_nonzero_below<R: Rng + ?Sized>(bound: &BigUint, rng: &mut R) -> BigUint {
    if bound <= &BigUint::from(1u32) {
        return BigUint::zero();
    }
    random_below(&(bound - 1u32), rng) + 1u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_random_below_in_range() {
        let mut rng = StdRng::seed_from_u64(42);
        for bound in [1u32, 2, 3, 23, 255, 256, 257, 1019] {
            let bound = BigUint::from(bound);
            for _ in 0..200 {
                assert!(random_below(&bound, &mut rng) < bound);
            }
        }
    }

    #[test]
    fn test_random_below_covers_small_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let bound = BigUint::from(23u32);
        let mut seen = [false; 23];
        for _ in 0..2000 {
            let v = random_below(&bound, &mut rng);
            seen[v.to_u64_digits().first().copied().unwrap_or(0) as usize] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_random_nonzero_below() {
        let mut rng = StdRng::seed_from_u64(1);
        let bound = BigUint::from(5u32);
        for _ in 0..200 {
            let v = random_nonzero_below(&bound, &mut rng);
            assert!(!v.is_zero() && v < bound);
        }
        assert!(random_nonzero_below(&BigUint::from(1u32), &mut rng).is_zero());
    }
}
